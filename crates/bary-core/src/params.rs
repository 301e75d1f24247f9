use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NoiseError;

/// How lattice gradients are drawn, which fixes the range of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// n independent scalar Perlin noises, one per component.
    #[serde(alias = "independent")]
    IndependentAxes,
    /// Gradients confined to the zero-sum hyperplane: outputs sum to 0,
    /// magnitude unbounded.
    #[serde(alias = "barycentric_variant")]
    VariantSimplex,
    /// Range-clamped zero-sum gradients around a per-vertex offset: outputs
    /// are points of the probability simplex (sum 1, components in [0, 1]).
    #[default]
    #[serde(alias = "barycentric")]
    ConstrainedSimplex,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::IndependentAxes, Mode::VariantSimplex, Mode::ConstrainedSimplex];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::IndependentAxes    => "independent-axes",
            Mode::VariantSimplex     => "variant-simplex",
            Mode::ConstrainedSimplex => "constrained-simplex",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = NoiseError;

    /// Accepts the canonical kebab-case names as well as the short names
    /// used by the browser demo (`independent`, `barycentric_variant`,
    /// `barycentric`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "independent-axes" | "independent" | "indep-axes" => Ok(Mode::IndependentAxes),
            "variant-simplex" | "barycentric-variant"         => Ok(Mode::VariantSimplex),
            "constrained-simplex" | "barycentric"             => Ok(Mode::ConstrainedSimplex),
            other => Err(NoiseError::InvalidParams(format!("unknown mode `{other}`"))),
        }
    }
}

/// Engine configuration. Changing any field requires a fresh lattice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParams {
    /// Number of output components (≥ 2).
    pub n: usize,
    /// Lattice cells along x; vertices run 0..=width.
    pub width: usize,
    /// Lattice cells along y; vertices run 0..=height.
    pub height: usize,
    pub mode: Mode,
}

impl Default for EngineParams {
    /// Three components over a 6×6 lattice: a 500 px canvas at 100 px tiles.
    fn default() -> Self {
        Self { n: 3, width: 6, height: 6, mode: Mode::ConstrainedSimplex }
    }
}

impl EngineParams {
    pub fn new(n: usize, width: usize, height: usize, mode: Mode) -> Self {
        Self { n, width, height, mode }
    }

    /// Reject configurations the generator cannot honour.
    pub fn validate(&self) -> Result<(), NoiseError> {
        if self.n < 2 {
            return Err(NoiseError::InvalidParams(format!(
                "n must be at least 2, got {}", self.n
            )));
        }
        if self.width < 1 || self.height < 1 {
            return Err(NoiseError::InvalidParams(format!(
                "lattice extent must be at least 1x1, got {}x{}", self.width, self.height
            )));
        }
        Ok(())
    }

    /// Number of lattice vertices, `(width + 1) × (height + 1)`.
    pub fn vertex_count(&self) -> usize {
        (self.width + 1) * (self.height + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        let p = EngineParams::default();
        assert!(p.validate().is_ok());
        assert_eq!(p.vertex_count(), 49);
    }

    #[test]
    fn validate_rejects_degenerate_shapes() {
        assert!(matches!(
            EngineParams::new(1, 4, 4, Mode::ConstrainedSimplex).validate(),
            Err(NoiseError::InvalidParams(_))
        ));
        assert!(EngineParams::new(3, 0, 4, Mode::IndependentAxes).validate().is_err());
        assert!(EngineParams::new(3, 4, 0, Mode::VariantSimplex).validate().is_err());
    }

    #[test]
    fn mode_parses_canonical_and_demo_names() {
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
        }
        assert_eq!("independent".parse::<Mode>().unwrap(), Mode::IndependentAxes);
        assert_eq!("barycentric_variant".parse::<Mode>().unwrap(), Mode::VariantSimplex);
        assert_eq!("BARYCENTRIC".parse::<Mode>().unwrap(), Mode::ConstrainedSimplex);
        assert!("double_barycentric".parse::<Mode>().is_err());
    }

    #[test]
    fn params_deserialize_with_defaults_and_aliases() {
        let p: EngineParams = serde_json::from_str(r#"{"n": 4, "mode": "barycentric_variant"}"#).unwrap();
        assert_eq!(p, EngineParams::new(4, 6, 6, Mode::VariantSimplex));

        let json = serde_json::to_string(&EngineParams::default()).unwrap();
        assert!(json.contains("\"constrained-simplex\""), "json: {json}");
    }
}
