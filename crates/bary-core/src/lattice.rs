//! Per-vertex gradient tables for barycentric gradient noise.
//!
//! Each integer vertex `(ix, iy)` of a `width × height` cell grid stores a
//! pair of n-dimensional gradients (one per input axis) and an offset that
//! the field takes at the vertex itself. The three [`Mode`]s differ only in
//! how those are drawn; evaluation is shared (see `eval.rs`).

use rand::Rng;
use serde::Serialize;

use crate::error::NoiseError;
use crate::params::{EngineParams, Mode};
use crate::sampler::{random_simplex_tangent, random_tangent_2d};
use crate::vector::{add, barycenter, scale, zeros, Vector};

/// Gradients attached to one vertex: `x` is dotted with the horizontal
/// distance, `y` with the vertical one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientPair {
    pub x: Vector,
    pub y: Vector,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vertex {
    pub gradient: GradientPair,
    /// Value of the field at the vertex. Zero except in constrained mode.
    pub offset: Vector,
}

/// A fully populated `(width + 1) × (height + 1)` table of vertices.
///
/// There is no way to obtain a partially built lattice: [`Lattice::generate`]
/// either returns a complete table or an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lattice {
    n: usize,
    width: usize,
    height: usize,
    mode: Mode,
    /// Column-major: vertex `(ix, iy)` lives at `ix * (height + 1) + iy`.
    vertices: Vec<Vertex>,
}

impl Lattice {
    /// Draw a new table for `params`, one independent vertex at a time.
    ///
    /// Fails with [`NoiseError::Generation`] if a constrained-mode tangent
    /// draw is degenerate; nothing is kept from the partial table, and a
    /// retry draws fresh randomness.
    pub fn generate<R: Rng + ?Sized>(params: &EngineParams, rng: &mut R) -> Result<Self, NoiseError> {
        params.validate()?;
        let mut vertices = Vec::with_capacity(params.vertex_count());
        for _ix in 0..=params.width {
            for _iy in 0..=params.height {
                vertices.push(generate_vertex(params.mode, params.n, rng)?);
            }
        }
        Ok(Self {
            n: params.n,
            width: params.width,
            height: params.height,
            mode: params.mode,
            vertices,
        })
    }

    pub fn n(&self) -> usize { self.n }
    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn mode(&self) -> Mode { self.mode }

    /// The vertex at integer coordinates `(ix, iy)`.
    ///
    /// # Panics
    /// If `ix > width` or `iy > height`.
    #[inline]
    pub fn vertex(&self, ix: usize, iy: usize) -> &Vertex {
        assert!(
            ix <= self.width && iy <= self.height,
            "vertex ({ix}, {iy}) outside lattice {}x{}", self.width, self.height
        );
        &self.vertices[ix * (self.height + 1) + iy]
    }

    /// All vertices, column-major.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
}

// ── Per-mode vertex generation ────────────────────────────────────────────────

fn generate_vertex<R: Rng + ?Sized>(mode: Mode, n: usize, rng: &mut R) -> Result<Vertex, NoiseError> {
    match mode {
        Mode::IndependentAxes => {
            // One planar direction per component.
            let (gx, gy): (Vector, Vector) = (0..n).map(|_| random_tangent_2d(rng)).unzip();
            Ok(Vertex { gradient: GradientPair { x: gx, y: gy }, offset: zeros(n) })
        }
        Mode::VariantSimplex => {
            // A random output direction mapped from a random input direction.
            // The 2→n linear map has more freedom than this, but extra
            // degrees of freedom are not visible in the result.
            let t = random_simplex_tangent(rng, n);
            Ok(Vertex { gradient: rotated(&t, rng), offset: zeros(n) })
        }
        Mode::ConstrainedSimplex => {
            let t = random_simplex_tangent(rng, n);
            let (offset, t) = constrain_to_simplex(&t).inspect_err(|e| {
                tracing::warn!(n, error = %e, "degenerate simplex tangent draw");
            })?;
            Ok(Vertex { gradient: rotated(&t, rng), offset })
        }
    }
}

/// Gradient pair `(s·t, c·t)` for a fresh random rotation `(s, c)`.
fn rotated<R: Rng + ?Sized>(t: &[f64], rng: &mut R) -> GradientPair {
    let (s, c) = random_tangent_2d(rng);
    GradientPair { x: scale(s, t), y: scale(c, t) }
}

/// Widest interval `[min_l, max_l]` such that `barycenter + l·t` keeps every
/// component non-negative for all `l` in it.
///
/// Component `i` reaches zero at `l_i = −1 / (n·t[i])`; negative roots bound
/// the interval from below, positive ones from above. Components with
/// `t[i] == 0` never reach zero.
pub fn simplex_range(t: &[f64]) -> (f64, f64) {
    let n = t.len() as f64;
    let mut min_l = f64::NEG_INFINITY;
    let mut max_l = f64::INFINITY;
    for &ti in t {
        if ti != 0.0 {
            let l = -1.0 / n / ti;
            if l < 0.0 {
                min_l = min_l.max(l);
            } else {
                max_l = max_l.min(l);
            }
        }
    }
    (min_l, max_l)
}

/// Centre a zero-sum tangent inside the simplex.
///
/// Returns `(offset, t')` with `offset = barycenter + centre·t` and
/// `t' = half_width·t`, so `offset + λ·t'` stays in the simplex for every
/// `λ ∈ [−1, 1]`. Interpolation only ever forms convex combinations of such
/// points, which keeps the evaluated field inside the simplex without any
/// clamping at evaluation time.
///
/// A unit zero-sum tangent always has components of both signs, so the range
/// is finite and non-empty; an empty or unbounded range means the draw is
/// unusable.
pub fn constrain_to_simplex(t: &[f64]) -> Result<(Vector, Vector), NoiseError> {
    let (min_l, max_l) = simplex_range(t);
    if max_l < min_l || !min_l.is_finite() || !max_l.is_finite() {
        return Err(NoiseError::Generation { min_l, max_l });
    }
    let center = (min_l + max_l) / 2.0;
    let half_width = (max_l - min_l) / 2.0;
    let offset = add(&barycenter(t.len()), &scale(center, t));
    Ok((offset, scale(half_width, t)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::sum;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lattice(mode: Mode, n: usize, w: usize, h: usize, seed: u64) -> Lattice {
        let mut rng = StdRng::seed_from_u64(seed);
        Lattice::generate(&EngineParams::new(n, w, h, mode), &mut rng).unwrap()
    }

    #[test]
    fn table_covers_every_vertex() {
        for mode in Mode::ALL {
            let l = lattice(mode, 4, 3, 2, 1);
            assert_eq!(l.vertices().len(), 4 * 3);
            for v in l.vertices() {
                assert_eq!(v.gradient.x.len(), 4);
                assert_eq!(v.gradient.y.len(), 4);
                assert_eq!(v.offset.len(), 4);
            }
            // Far corner is addressable.
            let _ = l.vertex(3, 2);
        }
    }

    #[test]
    #[should_panic(expected = "outside lattice")]
    fn vertex_past_extent_panics() {
        let l = lattice(Mode::IndependentAxes, 2, 1, 1, 1);
        let _ = l.vertex(2, 0);
    }

    #[test]
    fn independent_axes_pair_components_into_unit_tangents() {
        let l = lattice(Mode::IndependentAxes, 5, 2, 2, 9);
        for v in l.vertices() {
            assert!(v.offset.iter().all(|&x| x == 0.0));
            for (gx, gy) in v.gradient.x.iter().zip(&v.gradient.y) {
                assert_abs_diff_eq!(gx * gx + gy * gy, 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn variant_simplex_gradients_are_zero_sum() {
        let l = lattice(Mode::VariantSimplex, 4, 3, 3, 5);
        for v in l.vertices() {
            assert!(v.offset.iter().all(|&x| x == 0.0));
            assert!(sum(&v.gradient.x).abs() < 1e-12);
            assert!(sum(&v.gradient.y).abs() < 1e-12);
        }
    }

    #[test]
    fn simplex_range_for_known_tangent() {
        // t = (1, −1)/√2, n = 2: roots at ∓1/√2.
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let (lo, hi) = simplex_range(&[h, -h]);
        assert_abs_diff_eq!(lo, -h, epsilon = 1e-12);
        assert_abs_diff_eq!(hi, h, epsilon = 1e-12);
    }

    #[test]
    fn zero_components_impose_no_bound() {
        let (lo, hi) = simplex_range(&[0.5, -0.5, 0.0]);
        assert_abs_diff_eq!(lo, -1.0 / 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(hi, 1.0 / 1.5, epsilon = 1e-12);
    }

    #[test]
    fn constrained_offsets_reach_simplex_boundary_at_unit_lambda() {
        let mut rng = StdRng::seed_from_u64(21);
        for n in 2..=6 {
            for _ in 0..500 {
                let t = random_simplex_tangent(&mut rng, n);
                let (offset, ts) = constrain_to_simplex(&t).unwrap();
                assert_abs_diff_eq!(sum(&offset), 1.0, epsilon = 1e-12);
                for lambda in [-1.0, -0.5, 0.0, 0.5, 1.0] {
                    let p = add(&offset, &scale(lambda, &ts));
                    assert!(
                        p.iter().all(|&x| x >= -1e-12 && x <= 1.0 + 1e-12),
                        "n={n} λ={lambda}: {p:?}"
                    );
                }
                // The clamp is tight: both ends touch a face of the simplex.
                let lo = add(&offset, &scale(-1.0, &ts));
                let hi = add(&offset, &ts);
                let min_lo = lo.iter().cloned().fold(f64::INFINITY, f64::min);
                let min_hi = hi.iter().cloned().fold(f64::INFINITY, f64::min);
                assert!(min_lo.abs() < 1e-12 && min_hi.abs() < 1e-12, "n={n}: {lo:?} / {hi:?}");
            }
        }
    }

    #[test]
    fn degenerate_tangents_are_rejected() {
        assert!(matches!(constrain_to_simplex(&[0.0, 0.0, 0.0]), Err(NoiseError::Generation { .. })));
        // Not zero-sum: nothing bounds the interval from above.
        assert!(matches!(constrain_to_simplex(&[0.6, 0.8]), Err(NoiseError::Generation { .. })));
    }

    #[test]
    fn same_seed_gives_identical_tables() {
        let a = lattice(Mode::IndependentAxes, 3, 2, 2, 1234);
        let b = lattice(Mode::IndependentAxes, 3, 2, 2, 1234);
        assert_eq!(a, b);
        let c = lattice(Mode::IndependentAxes, 3, 2, 2, 1235);
        assert_ne!(a, c);
    }

    #[test]
    fn generate_rejects_invalid_params() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = Lattice::generate(&EngineParams::new(1, 2, 2, Mode::VariantSimplex), &mut rng).unwrap_err();
        assert!(matches!(err, NoiseError::InvalidParams(_)));
    }
}
