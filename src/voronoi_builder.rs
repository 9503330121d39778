use tracing::debug;

use super::{BoundingBox, Point, Voronoi, VoronoiError, DEFAULT_PRECISION};
use super::utils::calculate_approximated_centroid;

/// Provides a convenient way to construct a Voronoi diagram.
pub struct VoronoiBuilder {
    sites: Option<Vec<Point>>,
    lloyd_iterations: usize,
    bounding_box: BoundingBox,
    precision: f64,
}

impl Default for VoronoiBuilder {
    fn default() -> Self {
        Self {
            sites: None,
            lloyd_iterations: 0,
            bounding_box: BoundingBox::default(),
            precision: DEFAULT_PRECISION,
        }
    }
}

impl VoronoiBuilder {

    /// Sets the [BoundingBox] that will be used to clip the diagram.
    pub fn set_bounding_box(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = bounding_box;
        self
    }

    /// Sets the tolerance used when comparing points during the sweep. Defaults to [DEFAULT_PRECISION].
    ///
    /// The tolerance is absolute, so it must grow with the coordinates of the sites. Circle events whose breakpoints
    /// disagree by more than the tolerance are dropped, which with coordinates around `1e5` and the default
    /// tolerance already loses edges. A value around `1e-9` times the size of the bounding box works well.
    /// Must be finite and positive.
    pub fn set_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// Sets a vector of [Point]s representing the sites of each Voronoi cell that should be constructed.
    /// Duplicated sites are kept as given.
    pub fn set_sites(mut self, sites: Vec<Point>) -> Self {
        self.sites.replace(sites);
        self
    }

    /// Sets the number of [LLoyd relaxation](https://en.wikipedia.org/wiki/Lloyd%27s_algorithm) iterations that should be run as part of the graph generation.
    pub fn set_lloyd_relaxation_iterations(mut self, iterations: usize) -> Self {
        self.lloyd_iterations = iterations;
        self
    }

    /// Consumes this builder and generates a Voronoi diagram.
    ///
    /// Fails if the bounding box or the precision are not valid. Building without sites produces an empty diagram.
    pub fn build(mut self) -> Result<Voronoi, VoronoiError> {
        self.validate()?;

        let v = Voronoi::new(
            self.sites.take().unwrap_or_default(),
            self.bounding_box.clone(),
            self.precision,
        );

        Ok(self.perform_lloyd_relaxation(v))
    }

    fn validate(&self) -> Result<(), VoronoiError> {
        let (width, height) = (self.bounding_box.width(), self.bounding_box.height());
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(VoronoiError::InvalidBoundingBox { width, height });
        }

        if !(self.precision.is_finite() && self.precision > 0.0) {
            return Err(VoronoiError::InvalidPrecision(self.precision));
        }

        Ok(())
    }

    fn perform_lloyd_relaxation(&self, mut voronoi: Voronoi) -> Voronoi {
        for iteration in 0..self.lloyd_iterations {
            // get vertices for each cell and approximate centroid, cells without vertices keep their site
            let new_sites = voronoi.iter_cells()
                .map(|c| calculate_approximated_centroid(c.iter_vertices()).unwrap_or_else(|| c.site_position().clone()))
                .collect::<Vec<Point>>();

            debug!(iteration, sites = new_sites.len(), "Lloyd relaxation");

            // recompute new voronoi with sites after relaxation
            voronoi = Voronoi::new(new_sites, self.bounding_box.clone(), self.precision);
        }

        voronoi
    }

    fn create_builder_from_voronoi_without_sites(v: &Voronoi) -> Self {
        Self {
            bounding_box: v.bounding_box().clone(),
            precision: v.precision(),
            lloyd_iterations: 0,
            sites: None,
        }
    }
}

impl From<&Voronoi> for VoronoiBuilder {
    /// Creates a builder with same configurations that produced the original voronoi.
    /// Useful for performing Lloyd relaxation or storing the configuration to generate a identical diagram.
    fn from(v: &Voronoi) -> Self {
        let mut builder = Self::create_builder_from_voronoi_without_sites(v);
        builder.sites = Some(v.sites().to_vec());

        builder
    }
}

impl From<Voronoi> for VoronoiBuilder {
    /// Creates a builder with same configurations that produced the original voronoi, consuming it.
    fn from(v: Voronoi) -> Self {
        let mut builder = Self::create_builder_from_voronoi_without_sites(&v);
        builder.sites = Some(v.into_sites());

        builder
    }
}
