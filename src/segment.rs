use delaunator::Point;

/// A Voronoi edge clipped to the bounding box, separating the cells of two sites.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub(crate) start: Point,
    pub(crate) end: Point,
    pub(crate) sites: (usize, usize),
}

impl Segment {
    #[inline]
    pub fn start(&self) -> &Point {
        &self.start
    }

    #[inline]
    pub fn end(&self) -> &Point {
        &self.end
    }

    /// Indices of the two sites this segment separates.
    #[inline]
    pub fn sites(&self) -> (usize, usize) {
        self.sites
    }

    /// Given one of the two sites of this segment, returns the other one.
    /// Returns None if `site` is not adjacent to this segment.
    pub fn other_site(&self, site: usize) -> Option<usize> {
        if self.sites.0 == site {
            Some(self.sites.1)
        } else if self.sites.1 == site {
            Some(self.sites.0)
        } else {
            None
        }
    }

    /// Whether both endpoints are the same point.
    ///
    /// Edges lying entirely outside of the bounding box are kept, collapsed to the origin, so the adjacency of their sites is
    /// not lost. Such segments have no meaningful geometry.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// The Voronoi cell of one site, as the list of segments bounding it.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub(crate) site: usize,
    pub(crate) position: Point,
    pub(crate) segments: Vec<usize>,
}

impl Face {
    /// Index of the site of this face.
    #[inline]
    pub fn site(&self) -> usize {
        self.site
    }

    #[inline]
    pub fn position(&self) -> &Point {
        &self.position
    }

    /// Indices into [crate::Voronoi::segments] of the segments bounding this face, in the order they were finished.
    #[inline]
    pub fn segments(&self) -> &[usize] {
        &self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_site_test() {
        let segment = Segment { start: Point { x: 0.0, y: 0.0 }, end: Point { x: 1.0, y: 1.0 }, sites: (3, 7) };
        assert_eq!(Some(7), segment.other_site(3));
        assert_eq!(Some(3), segment.other_site(7));
        assert_eq!(None, segment.other_site(1));
        assert!(!segment.is_degenerate());
    }

    #[test]
    fn collapsed_segment_is_degenerate() {
        let segment = Segment { start: Point { x: 0.0, y: 0.0 }, end: Point { x: 0.0, y: 0.0 }, sites: (0, 1) };
        assert!(segment.is_degenerate());
    }
}
