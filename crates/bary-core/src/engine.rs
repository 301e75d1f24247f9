//! The noise engine: configuration, random source and the published lattice.
//!
//! State machine:
//! - `Uninitialized` (no lattice) → `regen` ok → `Ready`
//! - `Ready` → `regen` ok → `Ready` with the lattice replaced wholesale
//! - any failed `regen` leaves the previous state untouched
//! - reconfiguring (`set_mode`, `set_dimensions`, `set_extent`) drops the
//!   lattice, so a fresh `regen` is needed before the next `eval`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

use crate::error::NoiseError;
use crate::lattice::Lattice;
use crate::params::{EngineParams, Mode};
use crate::vector::Vector;

pub struct Engine {
    params: EngineParams,
    rng: StdRng,
    lattice: Option<Arc<Lattice>>,
}

impl Engine {
    /// Engine seeded from OS entropy.
    pub fn new(params: EngineParams) -> Result<Self, NoiseError> {
        Self::with_rng(params, StdRng::from_entropy())
    }

    /// Engine with a reproducible random stream: two engines built with the
    /// same params and seed generate bit-identical lattices.
    pub fn with_seed(params: EngineParams, seed: u64) -> Result<Self, NoiseError> {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(params: EngineParams, rng: StdRng) -> Result<Self, NoiseError> {
        params.validate()?;
        Ok(Self { params, rng, lattice: None })
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    pub fn is_ready(&self) -> bool {
        self.lattice.is_some()
    }

    /// Draw a fresh lattice and publish it.
    ///
    /// The table is built off to the side and swapped in only once complete;
    /// snapshots handed out earlier keep pointing at the old table.
    pub fn regen(&mut self) -> Result<(), NoiseError> {
        let built = Lattice::generate(&self.params, &mut self.rng);
        self.publish(built)
    }

    /// Call [`Engine::regen`] until it succeeds, at most `max_attempts` times.
    /// Only degenerate draws are retried; other errors return immediately.
    pub fn regen_with_retries(&mut self, max_attempts: usize) -> Result<usize, NoiseError> {
        let mut last = NoiseError::InvalidParams("max_attempts must be at least 1".into());
        for attempt in 1..=max_attempts {
            match self.regen() {
                Ok(()) => return Ok(attempt),
                Err(e @ NoiseError::Generation { .. }) => {
                    tracing::debug!(attempt, "regeneration failed, retrying");
                    last = e;
                }
                Err(e) => return Err(e),
            }
        }
        Err(last)
    }

    fn publish(&mut self, built: Result<Lattice, NoiseError>) -> Result<(), NoiseError> {
        let lattice = built?;
        tracing::debug!(
            mode = %lattice.mode(),
            n = lattice.n(),
            width = lattice.width(),
            height = lattice.height(),
            "published lattice"
        );
        self.lattice = Some(Arc::new(lattice));
        Ok(())
    }

    /// The currently published lattice. Safe to evaluate from other threads
    /// while this engine regenerates.
    pub fn snapshot(&self) -> Result<Arc<Lattice>, NoiseError> {
        self.lattice.clone().ok_or(NoiseError::Uninitialized)
    }

    /// Evaluate the field at `(x, y)`.
    pub fn eval(&self, x: f64, y: f64) -> Result<Vector, NoiseError> {
        let lattice = self.lattice.as_ref().ok_or(NoiseError::Uninitialized)?;
        if !lattice.contains(x, y) {
            return Err(NoiseError::OutOfBounds {
                x,
                y,
                width: lattice.width(),
                height: lattice.height(),
            });
        }
        Ok(lattice.eval(x, y))
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.params.mode = mode;
        self.invalidate();
    }

    pub fn set_dimensions(&mut self, n: usize) -> Result<(), NoiseError> {
        self.reconfigure(EngineParams { n, ..self.params.clone() })
    }

    pub fn set_extent(&mut self, width: usize, height: usize) -> Result<(), NoiseError> {
        self.reconfigure(EngineParams { width, height, ..self.params.clone() })
    }

    fn reconfigure(&mut self, params: EngineParams) -> Result<(), NoiseError> {
        params.validate()?;
        self.params = params;
        self.invalidate();
        Ok(())
    }

    fn invalidate(&mut self) {
        if self.lattice.take().is_some() {
            tracing::debug!("configuration changed, lattice dropped");
        }
    }
}
