//! Command-line sampler for barycentric gradient noise.
//!
//! Builds an engine, regenerates its lattice and prints either sampled
//! field values or the lattice table as JSON on stdout.

use anyhow::{bail, Context, Result};
use bary_core::{Engine, EngineParams, Lattice, Mode, Vector};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "bary", about = "Sample barycentric gradient noise")]
struct Args {
    /// JSON file with engine params; flags below override its fields.
    #[arg(short, long)]
    params: Option<String>,

    /// independent-axes, variant-simplex or constrained-simplex.
    #[arg(short, long)]
    mode: Option<Mode>,

    /// Number of output components.
    #[arg(short = 'n', long)]
    dimensions: Option<usize>,

    /// Lattice cells along x.
    #[arg(long)]
    width: Option<usize>,

    /// Lattice cells along y.
    #[arg(long)]
    height: Option<usize>,

    /// Seed for the lattice and the sample points; random if omitted.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of random points to evaluate.
    #[arg(long, default_value_t = 16)]
    samples: usize,

    /// Regeneration attempts before giving up on degenerate draws.
    #[arg(long, default_value_t = 8)]
    retries: usize,

    /// Print the lattice table instead of samples.
    #[arg(long)]
    dump_lattice: bool,
}

#[derive(Serialize)]
struct Sample {
    x: f64,
    y: f64,
    value: Vector,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Body<'a> {
    Samples { samples: Vec<Sample> },
    Lattice { lattice: &'a Lattice },
}

#[derive(Serialize)]
struct Report<'a> {
    params: &'a EngineParams,
    seed: Option<u64>,
    #[serde(flatten)]
    body: Body<'a>,
}

fn load_params(args: &Args) -> Result<EngineParams> {
    let mut params = match &args.params {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?
        }
        None => EngineParams::default(),
    };
    if let Some(mode) = args.mode { params.mode = mode; }
    if let Some(n) = args.dimensions { params.n = n; }
    if let Some(w) = args.width { params.width = w; }
    if let Some(h) = args.height { params.height = h; }
    Ok(params)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();
    if args.retries == 0 {
        bail!("--retries must be at least 1");
    }
    let params = load_params(&args)?;

    let mut engine = match args.seed {
        Some(seed) => Engine::with_seed(params.clone(), seed),
        None => Engine::new(params.clone()),
    }
    .context("building engine")?;

    let attempts = engine.regen_with_retries(args.retries).context("generating lattice")?;
    tracing::info!(mode = %params.mode, n = params.n, attempts, "lattice ready");

    let lattice = engine.snapshot()?;
    let body = if args.dump_lattice {
        Body::Lattice { lattice: &*lattice }
    } else {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ 0x5A3C_9F12_6B7E_4D01),
            None => StdRng::from_entropy(),
        };
        let samples = (0..args.samples)
            .map(|_| -> Result<Sample> {
                let x = rng.gen_range(0.0..=params.width as f64);
                let y = rng.gen_range(0.0..=params.height as f64);
                Ok(Sample { x, y, value: engine.eval(x, y)? })
            })
            .collect::<Result<Vec<_>>>()?;
        Body::Samples { samples }
    };

    let report = Report { params: &params, seed: args.seed, body };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from(["bary", "--mode", "barycentric_variant", "-n", "5", "--width", "3"]);
        let p = load_params(&args).unwrap();
        assert_eq!(p, EngineParams::new(5, 3, 6, Mode::VariantSimplex));
    }

    #[test]
    fn unknown_mode_is_a_parse_error() {
        assert!(Args::try_parse_from(["bary", "--mode", "double_barycentric"]).is_err());
    }

    #[test]
    fn missing_params_file_is_reported() {
        let args = Args::parse_from(["bary", "--params", "/nonexistent/params.json"]);
        let err = load_params(&args).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/params.json"));
    }
}
