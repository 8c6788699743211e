//! # Diffusion Example
//!
//! A 16x16x16 grid carrying one variable per cell, diffused by a
//! sequence of identical 7-point stencil stages. Each stage reads the
//! six axis neighbors of every cell, so interior cells on a boundary
//! face pull values through the periodic halo installed by the exchange
//! between stages.
//!
//! The input is a unit impulse at the grid center. Diffusion on a torus
//! conserves the total, so the printed sum stays at 1.0 while the peak
//! decays.
//!
//! ## Run this example:
//! ```bash
//! cargo run -p stencilkernel --example diffusion
//! ```

use std::io::Cursor;

use stencilkernel::prelude::*;

/// One explicit diffusion step: each cell moves a fraction of its
/// difference to the six-neighbor average.
struct Diffuse {
    alpha: f64,
}

impl Stage for Diffuse {
    fn label(&self) -> &str {
        "diffuse"
    }

    fn vars(&self) -> usize {
        1
    }

    fn apply(&self, layout: &GridLayout, source: &[f64], sink: &mut [f64]) {
        for i in 0..layout.ni as i64 {
            for j in 0..layout.nj as i64 {
                for k in 0..layout.nk as i64 {
                    let center = source[layout.offset(i, j, k, 1)];
                    let neighbors = source[layout.offset(i - 1, j, k, 1)]
                        + source[layout.offset(i + 1, j, k, 1)]
                        + source[layout.offset(i, j - 1, k, 1)]
                        + source[layout.offset(i, j + 1, k, 1)]
                        + source[layout.offset(i, j, k - 1, 1)]
                        + source[layout.offset(i, j, k + 1, 1)];
                    sink[layout.offset(i, j, k, 1)] =
                        center + self.alpha * (neighbors - 6.0 * center);
                }
            }
        }
    }
}

fn main() -> stencilkernel::Result<()> {
    tracing_subscriber::fmt::init();

    let config = GridConfig::cube(16, 1, 1, 1)?;
    let layout = config.layout();
    let mut engine = StencilEngine::new(config)?;
    for _ in 0..8 {
        engine.add_stage(Box::new(Diffuse { alpha: 0.1 }))?;
    }

    // Unit impulse at the grid center.
    let mut input = vec![0.0_f64; config.input_len()];
    input[layout.packed_offset(8, 8, 8, 1)] = 1.0;

    let bytes: Vec<u8> = bytemuck::cast_slice(&input).to_vec();
    let mut output = Vec::new();
    engine.run_with(&mut Cursor::new(bytes), &mut output)?;

    let values: Vec<f64> = output
        .chunks_exact(8)
        .map(|chunk| f64::from_ne_bytes(chunk.try_into().unwrap()))
        .collect();
    let total: f64 = values.iter().sum();
    println!(
        "after {} diffusion stages: peak {:.6}, total {:.6}",
        engine.steps_completed(),
        engine.workspace().max_abs(1),
        total
    );

    Ok(())
}
