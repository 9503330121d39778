use super::Point;

/// One of the four edges of a [BoundingBox]. The y axis points down, so `Top` is the edge at `y = 0`.
#[derive(PartialEq, Copy, Clone, Debug)]
pub(crate) enum BoundingBoxEdge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Defines the rectangle `[0, width) x [0, height)` the diagram is clipped to.
///
/// The origin is the top left corner and y grows downwards, matching image coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    width: f64,
    height: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl BoundingBox {
    /// Constructs a new bounding box.
    ///
    /// # Arguments
    ///
    /// * `width` - The bounding box's width, the right edge is at `x = width`
    /// * `height` - The bounding box's height, the bottom edge is at `y = height`
    ///
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Constructs a new square bounding box with the provided side.
    pub fn new_square(side: f64) -> Self {
        Self::new(side, side)
    }

    /// Gets the width of the bounding box.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Gets the height of the bounding box.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the corners in clockwise order, starting at the origin.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point { x: 0.0, y: 0.0 },
            Point { x: self.width, y: 0.0 },
            Point { x: self.width, y: self.height },
            Point { x: 0.0, y: self.height },
        ]
    }

    /// Returns whether a given point is inside the half-open box `[0, width) x [0, height)`.
    #[inline]
    pub fn is_inside(&self, point: &Point) -> bool {
        0.0 <= point.x && point.x < self.width && 0.0 <= point.y && point.y < self.height
    }

    /// Returns whether a given point is inside the box or on any of its edges.
    #[inline]
    pub fn contains(&self, point: &Point) -> bool {
        0.0 <= point.x && point.x <= self.width && 0.0 <= point.y && point.y <= self.height
    }

    /// Returns whether a given point lies on one of the box's edges.
    pub fn is_on_edge(&self, point: &Point) -> bool {
        self.contains(point)
            && (point.x == 0.0 || point.x == self.width || point.y == 0.0 || point.y == self.height)
    }

    /// Moves `point` along the line of the given `slope` until it hits `edge`.
    /// Returns None if the line meets the edge's supporting line outside of the box.
    fn project(&self, point: &Point, slope: f64, edge: BoundingBoxEdge) -> Option<Point> {
        // y = slope * x + c
        let c = point.y - slope * point.x;
        let projected = match edge {
            BoundingBoxEdge::Top => Point { x: -c / slope, y: 0.0 },
            BoundingBoxEdge::Bottom => Point { x: (self.height - c) / slope, y: self.height },
            BoundingBoxEdge::Left => Point { x: 0.0, y: c },
            BoundingBoxEdge::Right => Point { x: self.width, y: self.width * slope + c },
        };

        if self.contains(&projected) {
            Some(projected)
        } else {
            None
        }
    }

    /// Restricts the segment `a`-`b` to the box.
    ///
    /// Returns the clipped endpoints in the same order they were given, or None if the segment does not cross the box.
    /// Endpoints already inside the box are returned unchanged. Clipped endpoints land on the box edges, which
    /// may be the far edges `x = width` or `y = height`.
    pub fn clip_segment(&self, a: &Point, b: &Point) -> Option<(Point, Point)> {
        // left to right, top to bottom on ties
        let swapped = a.x > b.x || (a.x == b.x && a.y > b.y);
        let (mut first, mut second) = if swapped {
            (b.clone(), a.clone())
        } else {
            (a.clone(), b.clone())
        };

        if first.x == second.x {
            // vertical
            if first.x < 0.0 || first.x >= self.width || first.y >= self.height || second.y < 0.0 {
                return None;
            }

            first.y = first.y.max(0.0);
            second.y = second.y.min(self.height);
        } else {
            let slope = (second.y - first.y) / (second.x - first.x);

            // candidate edges for each endpoint, in priority order
            let (first_edges, second_edges): (&[BoundingBoxEdge], &[BoundingBoxEdge]) = if slope == 0.0 {
                if first.y < 0.0 || first.y >= self.height || first.x >= self.width || second.x < 0.0 {
                    return None;
                }
                (&[BoundingBoxEdge::Left][..], &[BoundingBoxEdge::Right][..])
            } else if slope < 0.0 {
                // going up to the right, first is the lower end
                if first.y < 0.0 || first.x >= self.width || second.y >= self.height || second.x < 0.0 {
                    return None;
                }
                (&[BoundingBoxEdge::Left, BoundingBoxEdge::Bottom][..], &[BoundingBoxEdge::Top, BoundingBoxEdge::Right][..])
            } else {
                // going down to the right, first is the upper end
                if first.y >= self.height || first.x >= self.width || second.y < 0.0 || second.x < 0.0 {
                    return None;
                }
                (&[BoundingBoxEdge::Top, BoundingBoxEdge::Left][..], &[BoundingBoxEdge::Right, BoundingBoxEdge::Bottom][..])
            };

            let (min_x, max_x) = (first.x, second.x);
            let fix = |point: &Point, edges: &[BoundingBoxEdge]| -> Option<Point> {
                edges
                    .iter()
                    .filter_map(|&edge| self.project(point, slope, edge))
                    .find(|p| min_x <= p.x && p.x <= max_x)
            };

            if !self.is_inside(&first) {
                first = fix(&first, first_edges)?;
            }

            if !self.is_inside(&second) {
                second = fix(&second, second_edges)?;
            }
        }

        if swapped {
            Some((second, first))
        } else {
            Some((first, second))
        }
    }
}
