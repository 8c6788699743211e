//! # Add-One Example
//!
//! The smallest complete scaffold instance: a 2x2x2 grid with one
//! variable per cell and a single stage that adds 1.0 to every cell.
//! Input and output streams are held in memory so the example is
//! self-contained; a generated scaffold would call `engine.run()` and
//! use the process's standard streams instead.
//!
//! ## Run this example:
//! ```bash
//! cargo run -p stencilkernel --example add_one
//! ```

use std::io::Cursor;

use stencilkernel::prelude::*;

/// Adds 1.0 to every cell's single variable.
struct AddOne;

impl Stage for AddOne {
    fn label(&self) -> &str {
        "add_one"
    }

    fn vars(&self) -> usize {
        1
    }

    fn apply(&self, layout: &GridLayout, source: &[f64], sink: &mut [f64]) {
        for i in 0..layout.ni as i64 {
            for j in 0..layout.nj as i64 {
                for k in 0..layout.nk as i64 {
                    let off = layout.offset(i, j, k, 1);
                    sink[off] = source[off] + 1.0;
                }
            }
        }
    }
}

fn main() -> stencilkernel::Result<()> {
    tracing_subscriber::fmt::init();

    let config = GridConfig::cube(2, 1, 1, 1)?;
    let mut engine = StencilEngine::new(config)?;
    engine.add_stage(Box::new(AddOne))?;

    let input: Vec<f64> = (0..config.input_len()).map(|v| v as f64).collect();
    println!("input:  {:?}", input);

    let bytes: Vec<u8> = bytemuck::cast_slice(&input).to_vec();
    let mut output = Vec::new();
    engine.run_with(&mut Cursor::new(bytes), &mut output)?;

    let values: Vec<f64> = output
        .chunks_exact(8)
        .map(|chunk| f64::from_ne_bytes(chunk.try_into().unwrap()))
        .collect();
    println!("output: {:?}", values);

    Ok(())
}
