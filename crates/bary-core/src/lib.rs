//! Barycentric gradient noise.
//!
//! A Perlin-style lattice noise whose value is an n-component vector instead
//! of a scalar. Depending on [`Mode`], the components are independent noises,
//! sum to zero, or form a point of the probability simplex (non-negative,
//! summing to one), which makes the field usable directly as blend weights.
//!
//! ```
//! use bary_core::{Engine, EngineParams, Mode};
//!
//! let mut engine = Engine::with_seed(EngineParams::new(3, 4, 4, Mode::ConstrainedSimplex), 42)?;
//! engine.regen()?;
//! let weights = engine.eval(1.25, 2.5)?;
//! assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-9);
//! # Ok::<(), bary_core::NoiseError>(())
//! ```

pub mod engine;
pub mod error;
pub mod eval;
pub mod lattice;
pub mod params;
pub mod sampler;
pub mod vector;

pub use engine::Engine;
pub use error::NoiseError;
pub use eval::{fade, ComponentNoise};
pub use lattice::{GradientPair, Lattice, Vertex};
pub use params::{EngineParams, Mode};
pub use vector::Vector;
