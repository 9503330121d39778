use std::fmt;
use super::{NeighborSiteIterator, Point, Segment, Voronoi};

/// A view over the Voronoi cell of one site.
#[derive(Clone, Copy)]
pub struct VoronoiCell<'v> {
    site: usize,
    voronoi: &'v Voronoi
}

impl<'v> VoronoiCell<'v> {
    pub fn new(site: usize, voronoi: &'v Voronoi) -> Self {
        Self {
            site,
            voronoi
        }
    }

    /// Index of the site of this cell.
    #[inline]
    pub fn site(&self) -> usize {
        self.site
    }

    #[inline]
    pub fn site_position(&self) -> &'v Point {
        &self.voronoi.sites()[self.site]
    }

    /// Iterates over the segments bounding this cell, in the order the sweep finished them.
    ///
    /// Segments that were clipped out of the bounding box are included, see [Segment::is_degenerate].
    pub fn iter_segments(&self) -> impl Iterator<Item = &'v Segment> + 'v + Clone {
        let segments = self.voronoi.segments();
        self.voronoi.faces()[self.site].segments().iter().map(move |s| &segments[*s])
    }

    /// Iterates over the sites that share a segment with this cell.
    pub fn iter_neighbors(&self) -> NeighborSiteIterator<'v> {
        NeighborSiteIterator::new(self.voronoi, self.site)
    }

    /// Iterates over the distinct endpoints of the non-degenerate segments of this cell.
    ///
    /// Vertices are returned in the order they were found, not around the cell.
    pub fn iter_vertices(&self) -> impl Iterator<Item = &'v Point> + 'v {
        let precision = self.voronoi.precision();
        let mut seen: Vec<&'v Point> = Vec::new();

        self.iter_segments()
            .filter(|s| !s.is_degenerate())
            .flat_map(|s| vec![s.start(), s.end()])
            .filter(move |p| {
                if seen.iter().any(|v| (v.x - p.x).abs() <= precision && (v.y - p.y).abs() <= precision) {
                    false
                } else {
                    seen.push(*p);
                    true
                }
            })
    }

    /// Returns a boolean indicating whether this cell touches the edge of the bounding box.
    pub fn is_on_boundary(&self) -> bool {
        let bbox = self.voronoi.bounding_box();
        self.iter_segments()
            .filter(|s| !s.is_degenerate())
            .any(|s| bbox.is_on_edge(s.start()) || bbox.is_on_edge(s.end()))
    }
}

impl<'v> fmt::Debug for VoronoiCell<'v> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[derive(Debug)]
        struct Site {
            site: usize,
            position: Point,
            is_on_boundary: bool,
        }

        f.debug_struct("VoronoiCell")
            .field("site", &Site {
                site: self.site,
                position: self.site_position().clone(),
                is_on_boundary: self.is_on_boundary(),
            })
            .field("neighbors", &self.iter_neighbors().collect::<Vec<usize>>())
            .field("segments", &self.iter_segments().collect::<Vec<&Segment>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{BoundingBox, Point, VoronoiBuilder};

    fn square() -> crate::Voronoi {
        VoronoiBuilder::default()
            .set_bounding_box(BoundingBox::new_square(40.0))
            .set_sites(vec![
                Point { x: 10.0, y: 10.0 },
                Point { x: 30.0, y: 10.0 },
                Point { x: 10.0, y: 30.0 },
                Point { x: 30.0, y: 30.0 },
                Point { x: 20.0, y: 21.0 },
            ])
            .build()
            .expect("Diagram expected")
    }

    #[test]
    fn cell_segments_border_the_site() {
        let voronoi = square();
        let cell = voronoi.cell(4);
        assert_eq!(4, cell.site());
        assert_eq!(&Point { x: 20.0, y: 21.0 }, cell.site_position());

        let segments: Vec<_> = cell.iter_segments().collect();
        assert_eq!(4, segments.len(), "Center site is surrounded by the four corners {:?}", cell);
        assert!(segments.iter().all(|s| s.other_site(4).is_some()));
        assert!(!cell.is_on_boundary(), "Center cell does not reach the box");
    }

    #[test]
    fn corner_cells_reach_the_boundary() {
        let voronoi = square();
        for site in 0..4 {
            assert!(voronoi.cell(site).is_on_boundary(), "{:?}", voronoi.cell(site));
        }
    }

    #[test]
    fn vertices_are_distinct() {
        let voronoi = square();
        let vertices: Vec<&Point> = voronoi.cell(4).iter_vertices().collect();
        assert_eq!(4, vertices.len(), "A diamond around the center site {:?}", vertices);

        for (i, a) in vertices.iter().enumerate() {
            for b in vertices.iter().skip(i + 1) {
                assert!((a.x - b.x).abs() > 1e-6 || (a.y - b.y).abs() > 1e-6);
            }
        }
    }
}
