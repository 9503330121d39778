use std::cmp::Ordering;
use delaunator::Point;

/// Something that happens when the sweep line reaches a given position.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Event {
    /// The sweep line reached the site with index `site`.
    Site { site: usize, position: Point },

    /// The sweep line reached the bottom of the circle event with index `circle`.
    Circle { circle: usize, bottom: Point },
}

impl Event {
    /// The point the sweep line must reach for this event to happen.
    #[inline]
    pub fn position(&self) -> &Point {
        match self {
            Event::Site { position, .. } => position,
            Event::Circle { bottom, .. } => bottom,
        }
    }
}

/// Orders events top to bottom, then left to right.
pub(crate) fn compare_events(a: &Event, b: &Event) -> Ordering {
    let a = a.position();
    let b = b.position();
    a.y.partial_cmp(&b.y)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
}

/// An arc predicted to vanish when the sweep line reaches `bottom`.
///
/// Events are never removed from the queue. When the arc's neighborhood changes the event is flagged as deleted and skipped once popped.
#[derive(Debug, Clone)]
pub(crate) struct CircleEvent {
    pub arc: usize,
    pub center: Point,
    pub bottom: Point,
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority_queue::PriorityQueue;

    fn site(site: usize, x: f64, y: f64) -> Event {
        Event::Site { site, position: Point { x, y } }
    }

    #[test]
    fn events_are_ordered_by_y_then_x() {
        assert_eq!(Ordering::Less, compare_events(&site(0, 10.0, 1.0), &site(1, 0.0, 2.0)));
        assert_eq!(Ordering::Less, compare_events(&site(0, 1.0, 2.0), &site(1, 3.0, 2.0)));
        assert_eq!(Ordering::Greater, compare_events(&site(0, 3.0, 2.0), &site(1, 1.0, 2.0)));
        assert_eq!(Ordering::Equal, compare_events(&site(0, 3.0, 2.0), &site(1, 3.0, 2.0)));
    }

    #[test]
    fn circle_events_are_keyed_by_their_bottom() {
        let circle = Event::Circle { circle: 0, bottom: Point { x: 20.0, y: 40.0 } };
        assert_eq!(&Point { x: 20.0, y: 40.0 }, circle.position());
        assert_eq!(Ordering::Greater, compare_events(&circle, &site(0, 50.0, 39.0)));
        assert_eq!(Ordering::Less, compare_events(&circle, &site(0, 21.0, 40.0)));
    }

    #[test]
    fn queue_drains_events_in_sweep_order() {
        let mut queue = PriorityQueue::new(compare_events as fn(&Event, &Event) -> Ordering);
        queue.push(site(0, 5.0, 5.0));
        queue.push(Event::Circle { circle: 7, bottom: Point { x: 0.0, y: 3.0 } });
        queue.push(site(1, 1.0, 5.0));
        queue.push(site(2, 9.0, 0.0));

        let order: Vec<Point> = std::iter::from_fn(|| queue.pop())
            .map(|e| e.position().clone())
            .collect();
        assert_eq!(
            vec![Point { x: 9.0, y: 0.0 }, Point { x: 0.0, y: 3.0 }, Point { x: 1.0, y: 5.0 }, Point { x: 5.0, y: 5.0 }],
            order);
    }
}
