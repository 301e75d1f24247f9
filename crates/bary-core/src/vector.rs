//! Elementwise arithmetic over the n-component output vectors.
//!
//! Every vector handled by the engine has the same length `n`; these helpers
//! never check that, they simply zip the shorter input.

/// An output vector of the noise field, one `f64` per component.
pub type Vector = Vec<f64>;

/// Elementwise sum `v1 + v2`.
pub fn add(v1: &[f64], v2: &[f64]) -> Vector {
    v1.iter().zip(v2).map(|(a, b)| a + b).collect()
}

/// Multiply every component by `s`.
pub fn scale(s: f64, v: &[f64]) -> Vector {
    v.iter().map(|x| s * x).collect()
}

/// Add `s` to every component.
pub fn shift(s: f64, v: &[f64]) -> Vector {
    v.iter().map(|x| s + x).collect()
}

pub fn zeros(n: usize) -> Vector {
    vec![0.0; n]
}

/// Centre of the probability simplex: every component `1/n`.
pub fn barycenter(n: usize) -> Vector {
    vec![1.0 / n as f64; n]
}

#[inline]
pub fn sum(v: &[f64]) -> f64 {
    v.iter().sum()
}

/// Euclidean length.
#[inline]
pub fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}
