//! Smoothed lattice interpolation over a generated [`Lattice`].

use noise::NoiseFn;
use std::sync::Arc;

use crate::lattice::Lattice;
use crate::vector::{add, scale, Vector};

/// Quintic smoothstep `w³(6w² − 15w + 10)`.
///
/// First and second derivatives vanish at 0 and 1, so the field is C² across
/// cell boundaries.
#[inline]
pub fn fade(w: f64) -> f64 {
    w * w * w * (6.0 * w * w - 15.0 * w + 10.0)
}

/// Interpolate from `a0` to `a1` with faded weight `w ∈ [0, 1]`.
fn lerp(a0: &[f64], a1: &[f64], w: f64) -> Vector {
    let w = fade(w);
    add(&scale(1.0 - w, a0), &scale(w, a1))
}

/// Cell index along one axis and the fractional offset inside it.
/// The far edge belongs to the last cell, with offset 1.
#[inline]
fn locate(coord: f64, extent: usize) -> (usize, f64) {
    let i0 = (coord.floor() as usize).min(extent - 1);
    (i0, coord - i0 as f64)
}

impl Lattice {
    /// Whether `(x, y)` lies in the generated extent `[0, width] × [0, height]`.
    /// NaN coordinates are never inside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width() as f64).contains(&x) && (0.0..=self.height() as f64).contains(&y)
    }

    /// Contribution of vertex `(ix, iy)` at `(x, y)`:
    /// `gx·(x − ix) + gy·(y − iy) + offset`.
    fn dot_grid_gradient(&self, ix: usize, iy: usize, x: f64, y: f64) -> Vector {
        let v = self.vertex(ix, iy);
        let dx = x - ix as f64;
        let dy = y - iy as f64;
        add(&add(&scale(dx, &v.gradient.x), &scale(dy, &v.gradient.y)), &v.offset)
    }

    /// Evaluate the field at `(x, y)`.
    ///
    /// At integer vertices the result is exactly the stored offset.
    ///
    /// # Panics
    /// If `(x, y)` is outside [`Lattice::contains`]; there are no vertices to
    /// interpolate there.
    pub fn eval(&self, x: f64, y: f64) -> Vector {
        assert!(
            self.contains(x, y),
            "({x}, {y}) outside lattice extent {}x{}", self.width(), self.height()
        );
        let (x0, sx) = locate(x, self.width());
        let (y0, sy) = locate(y, self.height());
        let (x1, y1) = (x0 + 1, y0 + 1);

        let n0 = self.dot_grid_gradient(x0, y0, x, y);
        let n1 = self.dot_grid_gradient(x1, y0, x, y);
        let ix0 = lerp(&n0, &n1, sx);
        let n0 = self.dot_grid_gradient(x0, y1, x, y);
        let n1 = self.dot_grid_gradient(x1, y1, x, y);
        let ix1 = lerp(&n0, &n1, sx);
        lerp(&ix0, &ix1, sy)
    }
}

/// One output component of a lattice as a scalar [`NoiseFn`].
///
/// Lets a single channel feed the `noise` crate's combinators. Points must
/// stay inside the lattice extent, as for [`Lattice::eval`].
#[derive(Debug, Clone)]
pub struct ComponentNoise {
    lattice: Arc<Lattice>,
    component: usize,
}

impl ComponentNoise {
    /// `None` if `component >= lattice.n()`.
    pub fn new(lattice: Arc<Lattice>, component: usize) -> Option<Self> {
        (component < lattice.n()).then_some(Self { lattice, component })
    }

    pub fn component(&self) -> usize {
        self.component
    }
}

impl NoiseFn<f64, 2> for ComponentNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.lattice.eval(point[0], point[1])[self.component]
    }
}
