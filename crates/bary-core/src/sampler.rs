//! Random unit directions for lattice gradients.
//!
//! Two distributions are needed:
//! - uniform directions in the plane, used as input-space rotations;
//! - uniform unit vectors in the zero-sum hyperplane `{v : Σv = 0}` of ℝⁿ,
//!   used as output-space gradients that never leave the simplex plane.

use rand::Rng;
use std::f64::consts::TAU;

use crate::vector::Vector;

/// Uniform random unit vector in the plane, returned as `(sin θ, cos θ)`.
pub fn random_tangent_2d<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    let angle: f64 = rng.gen_range(0.0..TAU);
    (angle.sin(), angle.cos())
}

/// Uniform random unit vector of dimension `n` whose components sum to zero.
///
/// Rejection sampling: the first `n − 1` components are drawn from
/// `[−1, 1]`, the last is set to minus their sum, and the draw is kept only
/// if it falls inside the unit ball. Accepted draws are uniform in the ball
/// of the hyperplane, so their normalised direction is uniform on its sphere.
///
/// There is no iteration cap. The acceptance rate is the ratio of the ball's
/// volume to the sampled box, which shrinks quickly with `n`; expect a few
/// attempts for n ≤ 4 and tens of attempts around n = 6. Capping the loop
/// would bias the distribution.
pub fn random_simplex_tangent<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vector {
    debug_assert!(n >= 2, "zero-sum tangents need at least two components");
    let mut rejected = 0u64;
    loop {
        let mut v = vec![0.0f64; n];
        let mut component_sum = 0.0f64;
        let mut d2 = 0.0f64;
        for x in v.iter_mut().take(n - 1) {
            let c: f64 = rng.gen_range(-1.0..=1.0);
            *x = c;
            component_sum += c;
            d2 += c * c;
        }
        v[n - 1] = -component_sum;
        d2 += component_sum * component_sum;

        // d2 == 0 only when every draw is exactly zero; treat it as a miss.
        if d2 <= 1.0 && d2 > 0.0 {
            if rejected > 0 {
                tracing::trace!(n, rejected, "simplex tangent accepted after rejections");
            }
            let d = d2.sqrt();
            for x in &mut v {
                *x /= d;
            }
            return v;
        }
        rejected += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{norm, sum};
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn tangent_2d_is_unit_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let (s, c) = random_tangent_2d(&mut rng);
            assert_abs_diff_eq!(s * s + c * c, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn simplex_tangent_is_zero_sum_unit_vector() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in 2..=6 {
            for _ in 0..10_000 {
                let t = random_simplex_tangent(&mut rng, n);
                assert_eq!(t.len(), n);
                assert!(sum(&t).abs() < 1e-9, "n={n}: component sum {}", sum(&t));
                assert!((norm(&t) - 1.0).abs() < 1e-9, "n={n}: norm {}", norm(&t));
            }
        }
    }

    #[test]
    fn simplex_tangent_in_two_dimensions_is_antipodal_pair() {
        // The zero-sum line in ℝ² only has the directions ±(1, −1)/√2.
        let mut rng = StdRng::seed_from_u64(3);
        let h = std::f64::consts::FRAC_1_SQRT_2;
        for _ in 0..100 {
            let t = random_simplex_tangent(&mut rng, 2);
            assert_abs_diff_eq!(t[0].abs(), h, epsilon = 1e-12);
            assert_abs_diff_eq!(t[0], -t[1], epsilon = 1e-12);
        }
    }

    #[test]
    fn simplex_tangent_components_have_no_preferred_sign() {
        // By symmetry every component has mean zero.
        let mut rng = StdRng::seed_from_u64(11);
        let n = 4;
        let trials = 20_000;
        let mut mean = vec![0.0f64; n];
        for _ in 0..trials {
            let t = random_simplex_tangent(&mut rng, n);
            for (m, x) in mean.iter_mut().zip(&t) {
                *m += x / trials as f64;
            }
        }
        for (i, m) in mean.iter().enumerate() {
            assert!(m.abs() < 0.03, "component {i} mean {m:.4} should be near 0");
        }
    }
}
