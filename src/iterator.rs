use std::slice;
use delaunator::Point;
use crate::{Voronoi, utils::dist2};

/// Iterates over sites that neighbor another site.
///
/// Two sites are neighbors when a segment separates them. Neighbors are topological: segments clipped out of the bounding box
/// still count.
#[derive(Clone)]
pub struct NeighborSiteIterator<'v> {
    voronoi: &'v Voronoi,
    segments: slice::Iter<'v, usize>,
    source_site: usize,
}

impl<'v> NeighborSiteIterator<'v> {
    /// Creates iterator based on the site.
    pub fn new(voronoi: &'v Voronoi, site: usize) -> Self {
        Self {
            voronoi,
            segments: voronoi.faces()[site].segments().iter(),
            source_site: site,
        }
    }
}

impl<'v> Iterator for NeighborSiteIterator<'v> {
    type Item = usize;

    /// Walks the segments of the site's face, returning the site on the other side of each one
    fn next(&mut self) -> Option<Self::Item> {
        let segments = self.voronoi.segments();
        let source_site = self.source_site;
        self.segments
            .by_ref()
            .find_map(|s| segments[*s].other_site(source_site))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.segments.len()))
    }
}

/// Iterator that produces a path between two point.
///
/// Starting at a site, it repeatedly moves to the neighbor closest to the destination, stopping once no neighbor gets any closer.
#[derive(Clone)]
pub struct CellPathIterator<'v, 'p> {
    site: Option<usize>,
    dest: &'p Point,
    distance: f64,
    voronoi: &'v Voronoi
}

impl<'v, 'p> CellPathIterator<'v, 'p> {
    /// Creates iterator based on the site and destination point.
    pub fn new(voronoi: &'v Voronoi, site: usize, dest: &'p Point) -> Self {
        let mut s = Self {
            site: Some(site),
            dest,
            voronoi,
            distance: 0.0
        };

        s.distance = s.dist2_for_site(site);

        s
    }

    fn dist2_for_site(&self, site: usize) -> f64 {
        let point = &self.voronoi.sites()[site];
        dist2(point, self.dest)
    }
}

impl<'v, 'p> Iterator for CellPathIterator<'v, 'p> {
    type Item = usize;

    /// Walks current site neighbor and find the next site in the path
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.site?;

        // take the neighbor that is closest to dest
        let closest = NeighborSiteIterator::new(self.voronoi, current)
            .map(|n| (n, self.dist2_for_site(n)))
            .min_by(|(_, dist0), (_, dist1)| dist0.partial_cmp(dist1).unwrap_or(std::cmp::Ordering::Equal));

        // if neighbor is closer to destination than we are, it is next in the path
        self.site = match closest {
            Some((n, dist)) if dist < self.distance => {
                self.distance = dist;
                Some(n)
            },
            _ => None,
        };

        Some(current)
    }
}

#[cfg(test)]
mod test {
    use delaunator::Point;
    use crate::{BoundingBox, VoronoiBuilder};
    use super::*;

    fn plus_sites() -> Vec<Point> {
        vec![Point { x: 5.0, y: 10.0 }, Point { x: 15.0, y: 10.0 }, Point { x: 10.0, y: 10.0 }, Point { x: 10.0, y: 15.0 }, Point { x: 10.0, y: 5.0 }]
    }

    fn build(sites: Vec<Point>) -> Voronoi {
        VoronoiBuilder::default()
            .set_bounding_box(BoundingBox::new_square(20.0))
            .set_sites(sites)
            .build()
            .unwrap()
    }

    #[test]
    fn iter_neighbors_hull_test() {
        let v = build(plus_sites());
        let mut neighbors: Vec<usize> = NeighborSiteIterator::new(&v, 0).collect();
        neighbors.sort_unstable();
        assert_eq!(vec![2, 3, 4], neighbors, "There are 3 neighboring sites");
    }

    #[test]
    fn iter_neighbors_inner_test() {
        let v = build(plus_sites());
        let mut neighbors: Vec<usize> = NeighborSiteIterator::new(&v, 2).collect();
        neighbors.sort_unstable();
        assert_eq!(vec![0, 1, 3, 4], neighbors, "There are 4 neighboring sites");
    }

    #[test]
    fn iter_neighbors_include_clipped_segments() {
        // sites 0 and 1 share an edge far left of the box, which is clipped out
        let sites = vec![Point { x: 1.0, y: 1.0 }, Point { x: 1.0, y: 19.0 }, Point { x: 3.0, y: 10.0 }];
        let v = VoronoiBuilder::default()
            .set_bounding_box(BoundingBox::new_square(4.0))
            .set_sites(sites)
            .build()
            .unwrap();

        let segment = v.segments().iter().find(|s| s.sites() == (0, 1) || s.sites() == (1, 0)).expect("Sites 0 and 1 are neighbors");
        assert!(segment.is_degenerate());

        let mut neighbors: Vec<usize> = NeighborSiteIterator::new(&v, 0).collect();
        neighbors.sort_unstable();
        assert_eq!(vec![1, 2], neighbors);
    }

    #[test]
    fn iter_cell_path_test() {
        let sites = vec![
            Point { x: 5.0, y: 10.0 },
            Point { x: 10.0, y: 10.0 }, Point { x: 10.0, y: 15.0 }, Point { x: 10.0, y: 5.0 },
            Point { x: 12.0, y: 10.0 }, Point { x: 12.0, y: 15.0 }, Point { x: 12.0, y: 5.0 },
            Point { x: 15.0, y: 10.0 },
        ];
        let v = build(sites.clone());
        let mut path = CellPathIterator::new(&v, 0, sites.last().unwrap());
        assert_eq!(Some(0), path.next());
        assert_eq!(Some(1), path.next());
        assert_eq!(Some(4), path.next());
        assert_eq!(Some(7), path.next());
        assert_eq!(None, path.next());
    }
}
