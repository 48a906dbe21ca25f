//! Error types.

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// The errors raised by the simulation.
///
/// Rays that miss everything, parallel lines and circles out of reach are
/// not errors; they are reported as empty results.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A ray is tangent to a circle, so the hit is not a stable point.
    #[error("Degenerate geometry: ray at bearing {bearing} is tangent to circle at ({x}, {y})")]
    DegenerateGeometry {
        /// The bearing of the offending ray in radians.
        bearing: f64,
        /// The x coordinate of the circle's centre.
        x: f64,
        /// The y coordinate of the circle's centre.
        y: f64,
    },

    /// A world, item or robot was built with unusable parameters.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An action cannot be turned into a duration.
    #[error("Invalid action: {0}")]
    InvalidAction(String),
}
