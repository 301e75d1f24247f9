//! Diagnostic visualizer: renders every mode with the demo colour mappings
//! and writes the images to data/debug/.
//! Not part of the noise library; the library only hands out vectors.

use std::fs;
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use bary_core::vector::{scale, shift};
use bary_core::{Engine, EngineParams, Lattice, Mode};
use clap::Parser;
use rayon::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "visualize", about = "Render barycentric noise debug images")]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Canvas side length in pixels.
    #[arg(long, default_value_t = 500)]
    size: usize,

    /// Pixels per lattice cell.
    #[arg(long, default_value_t = 100)]
    tile: usize,

    #[arg(short, long, default_value = "data/debug")]
    out: PathBuf,
}

// ── Colour styles ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Style {
    Rgb,
    /// Largest component bright, the rest half intensity.
    Best,
    /// Diagonal hatching between the two largest components where they are
    /// within `threshold` of each other.
    Crosshatch { diamonds: bool, thin: bool },
}

impl Style {
    const ALL: [(Style, &'static str); 6] = [
        (Style::Rgb, "rgb"),
        (Style::Best, "best"),
        (Style::Crosshatch { diamonds: false, thin: false }, "crosshatch1"),
        (Style::Crosshatch { diamonds: true,  thin: false }, "crosshatch2"),
        (Style::Crosshatch { diamonds: false, thin: true  }, "crosshatch3"),
        (Style::Crosshatch { diamonds: true,  thin: true  }, "crosshatch4"),
    ];
}

const RGB_CONTRAST: f64 = 3.0;
const HATCH_THRESHOLD: f64 = 0.03;
const HATCH_WIDTH: f64 = 10.0;

/// Canvas-style byte conversion: round, then clamp.
#[inline]
fn to_byte(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Map the first three components to RGB, boosting contrast.
/// Constrained output lives in [0, 1]; the other modes are roughly [−1, 1].
fn rgb(v: &[f64], mode: Mode) -> [u8; 3] {
    let c = match mode {
        Mode::ConstrainedSimplex => {
            let third = 1.0 / 3.0;
            scale(256.0, &shift(third, &scale(RGB_CONTRAST, &shift(-third, v))))
        }
        Mode::IndependentAxes | Mode::VariantSimplex => scale(128.0, &shift(1.0, &scale(RGB_CONTRAST, v))),
    };
    [to_byte(c[0]), to_byte(c[1]), to_byte(c[2])]
}

fn highlight(v: &[f64], m: f64) -> [u8; 3] {
    let pick = |x: f64| if x == m { 255 } else { 128 };
    [pick(v[0]), pick(v[1]), pick(v[2])]
}

fn best(v: &[f64]) -> [u8; 3] {
    let m = v.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    highlight(v, m)
}

fn crosshatch(v: &[f64], px: usize, py: usize, diamonds: bool, thin: bool) -> [u8; 3] {
    let mut order: Vec<usize> = (0..v.len()).collect();
    order.sort_by(|&a, &b| v[a].partial_cmp(&v[b]).unwrap_or(std::cmp::Ordering::Equal));
    let (i1, i2) = (order[v.len() - 1], order[v.len() - 2]);
    let (m1, m2) = (v[i1], v[i2]);
    // Swapping the hatch phase with the component order hides the seam where
    // the two largest components trade places.
    let invert = i1 < i2;
    // 0 → only the largest shows, 1 → both show equally.
    let otherness = 1.0 - (m1 - m2).abs() / HATCH_THRESHOLD;

    let m = if otherness < 0.0 {
        m1
    } else {
        let diag1 = ((px + py) as f64 / HATCH_WIDTH).rem_euclid(1.0);
        let diag2 = ((px as f64 - py as f64) / HATCH_WIDTH).rem_euclid(1.0);
        let mut thresh = if thin { 1.0 - otherness * 0.5 } else { 0.5 };
        let thresh2 = thresh;
        if invert {
            thresh = 1.0 - thresh;
        }
        let mut crossed = invert != (diag1 > thresh / 2.0 && diag1 < 1.0 - thresh / 2.0);
        if diamonds {
            crossed = crossed == !(diag2 > thresh2 / 2.0 && diag2 < 1.0 - thresh2 / 2.0);
        }
        if crossed { m2 } else { m1 }
    };
    highlight(v, m)
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render one image. Rows are evaluated in parallel against the same
/// immutable lattice snapshot.
fn render(lattice: &Lattice, style: Style, size: usize, tile: usize) -> Result<image::RgbImage> {
    let mode = lattice.mode();
    let mut buf = vec![0u8; size * size * 3];
    buf.par_chunks_mut(size * 3).enumerate().for_each(|(py, row)| {
        for px in 0..size {
            // Pixel centres: integer lattice coordinates look flat under BEST.
            let v = lattice.eval((px as f64 + 0.5) / tile as f64, (py as f64 + 0.5) / tile as f64);
            let color = match style {
                Style::Rgb => rgb(&v, mode),
                Style::Best => best(&v),
                Style::Crosshatch { diamonds, thin } => crosshatch(&v, px, py, diamonds, thin),
            };
            row[px * 3..px * 3 + 3].copy_from_slice(&color);
        }
    });
    image::RgbImage::from_raw(size as u32, size as u32, buf).context("image buffer size mismatch")
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    ensure!(args.size > 0 && args.tile > 0, "size and tile must be positive");
    let cells = args.size / args.tile + 1;

    fs::create_dir_all(&args.out).with_context(|| format!("cannot create {}", args.out.display()))?;

    for mode in Mode::ALL {
        println!("Generating {mode} lattice ({cells}×{cells})…");
        let mut engine = Engine::with_seed(EngineParams::new(3, cells, cells, mode), args.seed)?;
        engine.regen_with_retries(8)?;
        let lattice = engine.snapshot()?;

        for (style, name) in Style::ALL {
            let img = render(&lattice, style, args.size, args.tile)?;
            let path = args.out.join(format!("{mode}_{name}.png"));
            img.save(&path).with_context(|| format!("failed to save {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
    }

    println!("Done.");
    Ok(())
}
