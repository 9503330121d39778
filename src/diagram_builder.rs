use std::cmp::Ordering;
use delaunator::Point;
use tracing::{debug, trace};

use crate::beach_line::BeachLine;
use crate::bounding_box::BoundingBox;
use crate::event::{compare_events, CircleEvent, Event};
use crate::priority_queue::PriorityQueue;
use crate::segment::{Face, Segment};
use crate::utils::{abs_diff_eq, breakpoint, circumcircle, points_eq};

type EventQueue = PriorityQueue<Event, fn(&Event, &Event) -> Ordering>;

/// A Voronoi edge being traced by a breakpoint.
#[derive(Debug, Clone)]
struct Edge {
    start: Point,
    end: Point,
    sites: (usize, usize),
    done: bool,

    /// The other half of the bisector, traced in the opposite direction from the same start.
    twin: Option<usize>,
}

impl Edge {
    fn new(start: Point, sites: (usize, usize), twin: Option<usize>) -> Self {
        Self {
            end: start.clone(),
            start,
            sites,
            done: false,
            twin,
        }
    }
}

pub(crate) struct DiagramBuilderResult {
    pub segments: Vec<Segment>,
    pub faces: Vec<Face>,
}

/// Runs Fortune's sweep over a set of sites.
///
/// The sweep line moves down (increasing y). Site and circle events are drained from the queue in order, the beach line is updated
/// and edges are finished as breakpoints meet. Every finished edge is clipped to the bounding box and recorded in the faces of its
/// two sites.
pub(crate) struct DiagramBuilder<'s> {
    sites: &'s [Point],
    bounding_box: &'s BoundingBox,
    precision: f64,
    queue: EventQueue,
    beach_line: BeachLine,
    circles: Vec<CircleEvent>,
    edges: Vec<Edge>,
    segments: Vec<Segment>,
    faces: Vec<Face>,
    sweep_y: f64,

    /// A sweep position far enough that every open edge is finished outside of the bounding box.
    far_y: f64,
}

impl<'s> DiagramBuilder<'s> {
    pub fn new(sites: &'s [Point], bounding_box: &'s BoundingBox, precision: f64) -> Self {
        let mut queue: EventQueue = PriorityQueue::with_capacity(2 * sites.len(), compare_events as fn(&Event, &Event) -> Ordering);
        for (site, position) in sites.iter().enumerate() {
            queue.push(Event::Site { site, position: position.clone() });
        }

        let faces = sites.iter()
            .enumerate()
            .map(|(site, position)| Face { site, position: position.clone(), segments: Vec::new() })
            .collect();

        Self {
            sites,
            bounding_box,
            precision,
            queue,
            beach_line: BeachLine::with_capacity(4 * sites.len()),
            circles: Vec::new(),
            edges: Vec::with_capacity(3 * sites.len()),
            segments: Vec::with_capacity(3 * sites.len()),
            faces,
            sweep_y: f64::NEG_INFINITY,
            far_y: Self::far_sweep_y(sites, bounding_box),
        }
    }

    pub fn build(mut self) -> DiagramBuilderResult {
        debug!(sites = self.sites.len(), events = self.queue.len(), precision = self.precision, "Starting sweep");

        self.sweep();
        self.finish();

        debug!(
            segments = self.segments.len(),
            circle_events = self.circles.len(),
            "Sweep finished");

        DiagramBuilderResult {
            segments: self.segments,
            faces: self.faces,
        }
    }

    fn sweep(&mut self) {
        while let Some(event) = self.queue.pop() {
            self.sweep_y = event.position().y;
            match event {
                Event::Site { site, .. } => self.process_site_event(site),
                Event::Circle { circle, .. } => self.process_circle_event(circle),
            }

            trace!("Beach line:\n{:?}", self.beach_line);
        }
    }

    fn process_site_event(&mut self, site: usize) {
        let sites = self.sites;
        let position = &sites[site];
        trace!(site, x = position.x, y = position.y, "Site event");

        if self.beach_line.is_empty() {
            self.beach_line.add_first_arc(site);
            return;
        }

        let above = self.beach_line.get_above_arc(position, sites);
        let (above_site, prev, next) = {
            let arc = self.beach_line.arc(above);
            (arc.site, arc.prev, arc.next)
        };

        if sites[above_site].y == position.y {
            // sites sharing the first row, the arc above is still a vertical ray
            self.split_arc_in_two(above, site);
            return;
        }

        // right under a breakpoint, three arcs meet here
        if let Some(prev) = prev {
            let vertex = breakpoint(&sites[self.beach_line.arc(prev).site], &sites[above_site], position.y);
            if abs_diff_eq(vertex.x, position.x, self.precision) {
                self.insert_arc_at_vertex(prev, above, site, vertex);
                return;
            }
        }

        if let Some(next) = next {
            let vertex = breakpoint(&sites[above_site], &sites[self.beach_line.arc(next).site], position.y);
            if abs_diff_eq(vertex.x, position.x, self.precision) {
                self.insert_arc_at_vertex(above, next, site, vertex);
                return;
            }
        }

        self.split_arc_in_three(above, site);
    }

    /// Replaces `above` with `above | new | above`.
    fn split_arc_in_three(&mut self, above: usize, site: usize) {
        let sites = self.sites;
        let above_site = self.beach_line.arc(above).site;
        self.invalidate_circle_event(above);

        let parent = self.beach_line.parent(above);
        let new_arc = self.beach_line.add_arc(site);
        let right_arc = self.beach_line.add_arc(above_site);
        let inner = self.beach_line.add_breakpoint(site, above_site, new_arc, right_arc);
        let outer = self.beach_line.add_breakpoint(above_site, site, above, inner);
        self.beach_line.replace(parent, above, outer);

        // both breakpoints start at the same point and move apart
        let start = breakpoint(&sites[above_site], &sites[site], self.sweep_y);
        let left_edge = self.edges.len();
        let right_edge = left_edge + 1;
        self.edges.push(Edge::new(start.clone(), (above_site, site), Some(right_edge)));
        self.edges.push(Edge::new(start, (site, above_site), Some(left_edge)));

        let (next, s1) = {
            let arc = self.beach_line.arc(above);
            (arc.next, arc.s1)
        };

        {
            let arc = self.beach_line.arc_mut(right_arc);
            arc.prev = Some(new_arc);
            arc.next = next;
            arc.s0 = Some(right_edge);
            arc.s1 = s1;
        }

        if let Some(next) = next {
            self.beach_line.arc_mut(next).prev = Some(right_arc);
        }

        {
            let arc = self.beach_line.arc_mut(new_arc);
            arc.prev = Some(above);
            arc.next = Some(right_arc);
            arc.s0 = Some(left_edge);
            arc.s1 = Some(right_edge);
        }

        {
            let arc = self.beach_line.arc_mut(above);
            arc.next = Some(new_arc);
            arc.s1 = Some(left_edge);
        }

        self.fix_circle_event(above);
        self.fix_circle_event(right_arc);
    }

    /// Replaces `above` with `above | new`, for a site on the same row as the focus of `above`.
    fn split_arc_in_two(&mut self, above: usize, site: usize) {
        let sites = self.sites;
        let above_site = self.beach_line.arc(above).site;
        self.invalidate_circle_event(above);

        let parent = self.beach_line.parent(above);
        let new_arc = self.beach_line.add_arc(site);
        let node = self.beach_line.add_breakpoint(above_site, site, above, new_arc);
        self.beach_line.replace(parent, above, node);
        self.beach_line.refresh_ancestors(node);

        // the bisector comes from infinitely far above
        let x = breakpoint(&sites[above_site], &sites[site], self.sweep_y).x;
        let edge = self.add_edge(Point { x, y: -self.far_y }, (above_site, site));

        let (next, s1) = {
            let arc = self.beach_line.arc(above);
            (arc.next, arc.s1)
        };

        {
            let arc = self.beach_line.arc_mut(new_arc);
            arc.prev = Some(above);
            arc.next = next;
            arc.s0 = Some(edge);
            arc.s1 = s1;
        }

        if let Some(next) = next {
            self.beach_line.arc_mut(next).prev = Some(new_arc);
        }

        {
            let arc = self.beach_line.arc_mut(above);
            arc.next = Some(new_arc);
            arc.s1 = Some(edge);
        }

        self.fix_circle_event(above);
        self.fix_circle_event(new_arc);
    }

    /// Inserts the arc of `site` between `left` and `right`, whose breakpoint is right above the site at `vertex`.
    fn insert_arc_at_vertex(&mut self, left: usize, right: usize, site: usize, vertex: Point) {
        let left_site = self.beach_line.arc(left).site;
        let right_site = self.beach_line.arc(right).site;
        trace!(site, left_site, right_site, x = vertex.x, y = vertex.y, "Site under a breakpoint");

        self.invalidate_circle_event(left);
        self.invalidate_circle_event(right);

        if let Some(edge) = self.beach_line.arc(left).s1 {
            self.finish_edge(edge, vertex.clone());
        }

        let parent = self.beach_line.parent(right);
        let new_arc = self.beach_line.add_arc(site);
        let node = self.beach_line.add_breakpoint(site, right_site, new_arc, right);
        self.beach_line.replace(parent, right, node);
        self.beach_line.refresh_ancestors(node);

        let left_edge = self.add_edge(vertex.clone(), (left_site, site));
        let right_edge = self.add_edge(vertex, (site, right_site));

        {
            let arc = self.beach_line.arc_mut(new_arc);
            arc.prev = Some(left);
            arc.next = Some(right);
            arc.s0 = Some(left_edge);
            arc.s1 = Some(right_edge);
        }

        {
            let arc = self.beach_line.arc_mut(left);
            arc.next = Some(new_arc);
            arc.s1 = Some(left_edge);
        }

        {
            let arc = self.beach_line.arc_mut(right);
            arc.prev = Some(new_arc);
            arc.s0 = Some(right_edge);
        }

        self.fix_circle_event(left);
        self.fix_circle_event(right);
    }

    /// Schedules the removal of `arc` if its breakpoints converge.
    fn fix_circle_event(&mut self, arc: usize) {
        self.invalidate_circle_event(arc);

        let (prev, site, next) = {
            let node = self.beach_line.arc(arc);
            match (node.prev, node.next) {
                (Some(prev), Some(next)) => (prev, node.site, next),
                _ => return,
            }
        };

        let sites = self.sites;
        let a = &sites[self.beach_line.arc(prev).site];
        let b = &sites[site];
        let c = &sites[self.beach_line.arc(next).site];

        let circle = match circumcircle(a, b, c) {
            Some(circle) => circle,
            None => return,
        };

        if circle.bottom.y < self.sweep_y - self.precision {
            return;
        }

        let left = breakpoint(a, b, circle.bottom.y);
        let right = breakpoint(b, c, circle.bottom.y);
        if !points_eq(&left, &right, self.precision) {
            return;
        }

        let index = self.circles.len();
        trace!(arc, site, x = circle.center.x, y = circle.center.y, bottom = circle.bottom.y, "Circle event scheduled");

        self.queue.push(Event::Circle { circle: index, bottom: circle.bottom.clone() });
        self.circles.push(CircleEvent {
            arc,
            center: circle.center,
            bottom: circle.bottom,
            deleted: false,
        });
        self.beach_line.arc_mut(arc).circle_event = Some(index);
    }

    fn invalidate_circle_event(&mut self, arc: usize) {
        if let Some(circle) = self.beach_line.arc_mut(arc).circle_event.take() {
            self.circles[circle].deleted = true;
        }
    }

    fn process_circle_event(&mut self, circle: usize) {
        let event = &self.circles[circle];
        if event.deleted {
            trace!(circle, "Skipping deleted circle event");
            return;
        }

        let arc = event.arc;
        let center = event.center.clone();
        trace!(circle, arc, x = center.x, y = center.y, bottom = event.bottom.y, "Circle event");

        let (prev, next, s0, s1) = {
            let node = self.beach_line.arc(arc);
            match (node.prev, node.next) {
                (Some(prev), Some(next)) => (prev, next, node.s0, node.s1),
                _ => panic!("Circle event {} fired for arc {} at an end of the beach line", circle, arc),
            }
        };
        self.beach_line.arc_mut(arc).circle_event = None;

        let prev_site = self.beach_line.arc(prev).site;
        let next_site = self.beach_line.arc(next).site;
        let edge = self.add_edge(center.clone(), (prev_site, next_site));

        {
            let node = self.beach_line.arc_mut(prev);
            node.next = Some(next);
            node.s1 = Some(edge);
        }

        {
            let node = self.beach_line.arc_mut(next);
            node.prev = Some(prev);
            node.s0 = Some(edge);
        }

        self.invalidate_circle_event(prev);
        self.invalidate_circle_event(next);
        self.beach_line.remove_arc(arc);

        if let Some(s0) = s0 {
            self.finish_edge(s0, center.clone());
        }

        if let Some(s1) = s1 {
            self.finish_edge(s1, center);
        }

        self.fix_circle_event(prev);
        self.fix_circle_event(next);
    }

    fn add_edge(&mut self, start: Point, sites: (usize, usize)) -> usize {
        self.edges.push(Edge::new(start, sites, None));
        self.edges.len() - 1
    }

    /// Fixes the end of `edge`. Once an edge and its twin, if any, are both finished, the segment is recorded.
    fn finish_edge(&mut self, edge: usize, end: Point) {
        let (twin, sites) = {
            let e = &mut self.edges[edge];
            if e.done {
                return;
            }

            e.end = end;
            e.done = true;
            (e.twin, e.sites)
        };

        let start = match twin {
            Some(twin) if self.edges[twin].done => self.edges[twin].end.clone(),
            Some(_) => return,
            None => self.edges[edge].start.clone(),
        };

        let end = self.edges[edge].end.clone();
        self.record(start, end, sites);
    }

    fn record(&mut self, start: Point, end: Point, sites: (usize, usize)) {
        let (start, end) = match self.bounding_box.clip_segment(&start, &end) {
            // only a vertex on the box edge is left after clipping
            Some((a, b)) if points_eq(&a, &b, self.precision) && (a != start || b != end) => {
                trace!(?sites, x = a.x, y = a.y, "Segment touches the bounding box at a single point");
                (Point { x: 0.0, y: 0.0 }, Point { x: 0.0, y: 0.0 })
            },
            Some(clipped) => clipped,
            None => {
                trace!(?sites, "Segment outside of the bounding box");
                (Point { x: 0.0, y: 0.0 }, Point { x: 0.0, y: 0.0 })
            },
        };

        let index = self.segments.len();
        self.segments.push(Segment { start, end, sites });
        self.faces[sites.0].segments.push(index);
        self.faces[sites.1].segments.push(index);
    }

    /// Finishes the edges still traced by the beach line far beyond the bounding box.
    fn finish(&mut self) {
        debug_assert!(self.queue.is_empty(), "Finishing with pending events");

        let sites = self.sites;
        let far_y = self.far_y;
        let arcs: Vec<usize> = self.beach_line.iter_arcs().collect();
        trace!(arcs = arcs.len(), far_y, "Finishing open edges");

        for pair in arcs.windows(2) {
            let left = self.beach_line.arc(pair[0]);
            let right = self.beach_line.arc(pair[1]);
            if let Some(edge) = left.s1 {
                let end = breakpoint(&sites[left.site], &sites[right.site], far_y);
                self.finish_edge(edge, end);
            }
        }
    }

    fn far_sweep_y(sites: &[Point], bounding_box: &BoundingBox) -> f64 {
        let extent = sites.iter()
            .map(|p| p.x.abs().max(p.y.abs()))
            .fold(0.0, f64::max);

        2.0 * (bounding_box.width() + bounding_box.height() + extent)
    }
}
