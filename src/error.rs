use thiserror::Error;

/// Errors reported while configuring or querying a [crate::Voronoi] diagram.
///
/// Broken internal invariants of the sweep are not represented here; they panic.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum VoronoiError {
    /// The queried point is not one of the sites the diagram was built from.
    #[error("site ({x}, {y}) is not part of the diagram")]
    SiteNotFound { x: f64, y: f64 },

    /// The bounding box must have finite, positive dimensions.
    #[error("invalid bounding box dimensions {width} x {height}, expected finite positive values")]
    InvalidBoundingBox { width: f64, height: f64 },

    /// The equality tolerance must be finite and positive.
    #[error("invalid precision {0}, expected a finite positive value")]
    InvalidPrecision(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let e = VoronoiError::SiteNotFound { x: 1.5, y: -2.0 };
        assert_eq!("site (1.5, -2) is not part of the diagram", e.to_string());

        let e = VoronoiError::InvalidBoundingBox { width: 0.0, height: 3.0 };
        assert!(e.to_string().contains("0 x 3"));

        let e = VoronoiError::InvalidPrecision(-1.0);
        assert!(e.to_string().contains("-1"));

        let e = VoronoiError::InvalidPrecision(0.0);
        assert_eq!("invalid precision 0, expected a finite positive value", e.to_string());
    }
}
