use thiserror::Error;

/// Failures surfaced by the noise engine.
///
/// None of them leaves partial state behind: a failed regeneration keeps the
/// previously published lattice, and a rejected query touches nothing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NoiseError {
    /// `eval` was called before any successful `regen`.
    #[error("noise engine must be initialised by calling regen before eval")]
    Uninitialized,

    /// The simplex range clamp produced an empty interval for a tangent draw.
    /// Redrawing, i.e. calling `regen` again, is the remedy.
    #[error("degenerate simplex tangent: empty gradient range [{min_l}, {max_l}]")]
    Generation { min_l: f64, max_l: f64 },

    #[error("invalid engine parameters: {0}")]
    InvalidParams(String),

    /// Query outside the generated extent `[0, width] × [0, height]`.
    #[error("point ({x}, {y}) lies outside the lattice extent [0, {width}] x [0, {height}]")]
    OutOfBounds { x: f64, y: f64, width: usize, height: usize },
}
