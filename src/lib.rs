//! Planar Voronoi diagrams built with Fortune's sweep-line algorithm.
//!
//! The diagram is clipped to a [BoundingBox] with its origin at the top left corner and y growing downwards.
//!
//! ```
//! use fortune_voronoi::{BoundingBox, Point, VoronoiBuilder};
//!
//! let voronoi = VoronoiBuilder::default()
//!     .set_bounding_box(BoundingBox::new(40.0, 40.0))
//!     .set_sites(vec![Point { x: 10.0, y: 10.0 }, Point { x: 30.0, y: 10.0 }])
//!     .build()
//!     .unwrap();
//!
//! let face = voronoi.face(&Point { x: 10.0, y: 10.0 }).unwrap();
//! assert_eq!(1, face.segments().len());
//! ```

mod beach_line;
mod bounding_box;
mod cell;
mod diagram_builder;
mod error;
mod event;
mod iterator;
mod priority_queue;
mod segment;
mod utils;
mod voronoi_builder;

use std::collections::{HashMap, HashSet};

use self::diagram_builder::{DiagramBuilder, DiagramBuilderResult};

pub use delaunator::Point;
pub use self::bounding_box::BoundingBox;
pub use self::cell::VoronoiCell;
pub use self::error::VoronoiError;
pub use self::iterator::{CellPathIterator, NeighborSiteIterator};
pub use self::segment::{Face, Segment};
pub use self::voronoi_builder::VoronoiBuilder;

/// Tolerance used by default when comparing points during the sweep.
///
/// It is absolute and suits coordinates up to a few thousands. Larger diagrams need a tolerance scaled with their
/// bounding box, see [VoronoiBuilder::set_precision].
pub const DEFAULT_PRECISION: f64 = 1e-6;

/// Key of a site for exact lookups. Negative zero is folded into zero.
fn site_key(point: &Point) -> (u64, u64) {
    ((point.x + 0.0).to_bits(), (point.y + 0.0).to_bits())
}

/// The Voronoi diagram of a set of sites, clipped to a bounding box.
///
/// Each site has one [Face] listing the [Segment]s bounding its cell. The diagram is immutable once built.
pub struct Voronoi {
    sites: Vec<Point>,
    bounding_box: BoundingBox,
    precision: f64,
    segments: Vec<Segment>,
    faces: Vec<Face>,

    /// First index of each distinct site position.
    site_lookup: HashMap<(u64, u64), usize>,
}

impl std::fmt::Debug for Voronoi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Voronoi")
            .field("sites", &self.sites.len())
            .field("segments", &self.segments.len())
            .field("bounding_box", &self.bounding_box)
            .field("precision", &self.precision)
            .finish()
    }
}

impl Voronoi {
    pub(crate) fn new(sites: Vec<Point>, bounding_box: BoundingBox, precision: f64) -> Self {
        let DiagramBuilderResult { segments, faces } = DiagramBuilder::new(&sites, &bounding_box, precision).build();

        let mut site_lookup = HashMap::with_capacity(sites.len());
        for (index, site) in sites.iter().enumerate() {
            site_lookup.entry(site_key(site)).or_insert(index);
        }

        Self {
            sites,
            bounding_box,
            precision,
            segments,
            faces,
            site_lookup,
        }
    }

    /// The sites the diagram was built from, in input order.
    #[inline]
    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    #[inline]
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    #[inline]
    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Every segment of the diagram, including the ones clipped out of the bounding box.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// One face per site, indexed like [Self::sites].
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Returns the index of `site`. If the same position was given more than once, the first one is returned.
    pub fn face_index(&self, site: &Point) -> Result<usize, VoronoiError> {
        self.site_lookup
            .get(&site_key(site))
            .copied()
            .ok_or(VoronoiError::SiteNotFound { x: site.x, y: site.y })
    }

    /// Returns the face of `site`, which must be one of the sites the diagram was built from.
    pub fn face(&self, site: &Point) -> Result<&Face, VoronoiError> {
        self.face_index(site).map(|index| &self.faces[index])
    }

    /// Gets a representation of the Voronoi cell of the site with index `site`.
    pub fn cell(&self, site: usize) -> VoronoiCell<'_> {
        VoronoiCell::new(site, self)
    }

    /// Iterates over all cells, in site order.
    pub fn iter_cells(&self) -> impl Iterator<Item = VoronoiCell<'_>> + Clone {
        (0..self.sites.len()).map(move |s| self.cell(s))
    }

    /// Iterates over the edges of the dual Delaunay triangulation, that is every pair of sites separated by a segment.
    ///
    /// Each pair is returned once, smaller index first.
    pub fn iter_delaunay_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let mut seen = HashSet::with_capacity(self.segments.len());
        self.segments.iter()
            .map(|s| {
                let (a, b) = s.sites();
                (a.min(b), a.max(b))
            })
            .filter(move |edge| seen.insert(*edge))
    }

    /// Walks from cell `site` towards `dest`, see [CellPathIterator].
    pub fn iter_path<'p>(&self, site: usize, dest: &'p Point) -> CellPathIterator<'_, 'p> {
        CellPathIterator::new(self, site, dest)
    }

    pub(crate) fn into_sites(self) -> Vec<Point> {
        self.sites
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;
    use crate::utils::test::{random_sites, validate_voronoi};

    fn create_random_builder(size: usize) -> VoronoiBuilder {
        let mut rng = rand::thread_rng();
        let builder = VoronoiBuilder::default();
        let bbox = BoundingBox::default();

        let x_range = rand::distributions::Uniform::new(0.0, bbox.width());
        let y_range = rand::distributions::Uniform::new(0.0, bbox.height());
        let sites = (0..size)
            .map(|_| Point { x: rng.sample(x_range), y: rng.sample(y_range) })
            .collect();

        builder
            .set_bounding_box(bbox)
            .set_sites(sites)
    }

    fn build(sites: Vec<Point>, width: f64, height: f64) -> Voronoi {
        VoronoiBuilder::default()
            .set_bounding_box(BoundingBox::new(width, height))
            .set_sites(sites)
            .build()
            .expect("Diagram expected")
    }

    #[test]
    fn random_site_generation_test() {
        let voronoi = create_random_builder(10_000)
            .build()
            .expect("Some voronoi expected.");
        assert_eq!(10_000, voronoi.faces().len());
    }

    #[test]
    fn voronoi_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Voronoi>();
    }

    #[test]
    fn two_sites_are_split_by_their_bisector() {
        let voronoi = build(vec![Point { x: 10.0, y: 10.0 }, Point { x: 30.0, y: 10.0 }], 40.0, 40.0);
        assert_eq!(1, voronoi.segments().len());

        let segment = &voronoi.segments()[0];
        assert_eq!(&Point { x: 20.0, y: 0.0 }, segment.start());
        assert_eq!(&Point { x: 20.0, y: 40.0 }, segment.end());

        let face = voronoi.face(&Point { x: 30.0, y: 10.0 }).unwrap();
        assert_eq!(1, face.site());
        assert_eq!(&[0], face.segments());
        validate_voronoi(&voronoi);
    }

    #[test]
    fn three_sites_share_the_circumcenter() {
        let voronoi = build(vec![Point { x: 0.0, y: 0.0 }, Point { x: 40.0, y: 0.0 }, Point { x: 20.0, y: 40.0 }], 50.0, 50.0);
        assert_eq!(3, voronoi.segments().len());

        let center = Point { x: 20.0, y: 15.0 };
        let near = |p: &Point| (p.x - center.x).abs() <= voronoi.precision() && (p.y - center.y).abs() <= voronoi.precision();
        assert!(voronoi.segments().iter().all(|s| near(s.start()) || near(s.end())), "{:?}", voronoi.segments());
        validate_voronoi(&voronoi);
    }

    #[test]
    fn unknown_site_is_not_found() {
        let voronoi = build(vec![Point { x: 1.0, y: 1.0 }, Point { x: 3.0, y: 2.0 }], 4.0, 4.0);
        assert_eq!(
            Err(VoronoiError::SiteNotFound { x: 2.0, y: 2.0 }),
            voronoi.face(&Point { x: 2.0, y: 2.0 }));
        assert!(voronoi.face_index(&Point { x: 1.0, y: 1.0 + 1e-12 }).is_err(), "Lookup is exact");
    }

    #[test]
    fn negative_zero_finds_the_site_at_zero() {
        let voronoi = build(vec![Point { x: 0.0, y: 0.0 }, Point { x: 3.0, y: 2.0 }], 4.0, 4.0);
        assert_eq!(Ok(0), voronoi.face_index(&Point { x: -0.0, y: 0.0 }));
    }

    #[test]
    fn duplicated_site_resolves_to_first_face() {
        let sites = vec![Point { x: 1.0, y: 1.0 }, Point { x: 3.0, y: 2.0 }, Point { x: 1.0, y: 1.0 }];
        let voronoi = build(sites, 4.0, 4.0);
        assert_eq!(3, voronoi.faces().len());
        assert_eq!(Ok(0), voronoi.face_index(&Point { x: 1.0, y: 1.0 }));
    }

    #[test]
    fn queries_are_idempotent() {
        let voronoi = build(random_sites(100, 50.0, 50.0, 3), 50.0, 50.0);
        let site = voronoi.sites()[42].clone();

        let first = voronoi.face(&site).unwrap().clone();
        let segments = voronoi.segments().to_vec();
        assert_eq!(Ok(&first), voronoi.face(&site));
        assert_eq!(&segments[..], voronoi.segments());
    }

    #[test]
    fn random_sites_hold_planar_bounds() {
        for (seed, size) in [(1, 3), (2, 10), (3, 100), (4, 500)].iter() {
            let voronoi = build(random_sites(*size, 200.0, 100.0, *seed), 200.0, 100.0);

            assert_eq!(*size, voronoi.faces().len());
            assert!(
                voronoi.segments().len() <= 3 * size - 6,
                "Seed {}: {} segments for {} sites", seed, voronoi.segments().len(), size);

            for face in voronoi.faces() {
                assert!(!face.segments().is_empty(), "Seed {}: face {} has no segments", seed, face.site());
            }

            validate_voronoi(&voronoi);
        }
    }

    #[test]
    fn adjacency_matches_delaunay_triangulation() {
        for seed in [5, 6, 7].iter() {
            let sites = random_sites(150, 1000.0, 1000.0, *seed);
            let voronoi = build(sites.clone(), 1000.0, 1000.0);

            let triangulation = delaunator::triangulate(&sites);
            let mut expected: Vec<(usize, usize)> = (0..triangulation.triangles.len())
                .map(|e| {
                    let a = triangulation.triangles[e];
                    let b = triangulation.triangles[delaunator::next_halfedge(e)];
                    (a.min(b), a.max(b))
                })
                .collect();
            expected.sort_unstable();
            expected.dedup();

            let mut actual: Vec<(usize, usize)> = voronoi.iter_delaunay_edges().collect();
            actual.sort_unstable();

            assert_eq!(expected, actual, "Seed {}", seed);
        }
    }

    #[test]
    fn sites_outside_the_box_still_get_faces() {
        let sites = vec![Point { x: -5.0, y: 2.0 }, Point { x: 2.0, y: 2.0 }, Point { x: 9.0, y: 12.0 }];
        let voronoi = build(sites, 4.0, 4.0);
        assert_eq!(3, voronoi.faces().len());
        validate_voronoi(&voronoi);
    }

    #[test]
    fn cells_iterate_in_site_order() {
        let voronoi = build(random_sites(10, 10.0, 10.0, 9), 10.0, 10.0);
        let sites: Vec<usize> = voronoi.iter_cells().map(|c| c.site()).collect();
        assert_eq!((0..10).collect::<Vec<usize>>(), sites);
    }
}
