//! # Stencilkernel
//!
//! Runtime scaffold for generated stencil-computation kernels.
//!
//! An external code generator produces a sequence of numeric kernel
//! passes ("stages") over a 3-D grid with periodic boundaries, plus the
//! grid shape and per-stage variable widths. This crate supplies
//! everything around those stages:
//!
//! - **Workspace**: one up-front allocation holding two padded grid
//!   buffers whose source/sink roles flip between stages
//! - **Halo exchange**: the K -> J -> I periodic boundary copy protocol
//!   that makes out-of-domain neighbor reads resolve to the opposite
//!   face of the torus
//! - **I/O framing**: headerless native-endianness `f64` streams, read
//!   once from stdin at start-up and written once to stdout at shutdown
//! - **Stage sequencing**: the strict populate -> (stage -> exchange)*
//!   -> drain loop, with structured logging around each step
//!
//! The whole pipeline is single-threaded and synchronous; any I/O or
//! configuration failure is fatal for the run.
//!
//! ## Example
//!
//! ```
//! use std::io::Cursor;
//! use stencilkernel::prelude::*;
//!
//! /// A stage that adds 1.0 to every cell's single variable.
//! struct AddOne;
//!
//! impl Stage for AddOne {
//!     fn label(&self) -> &str {
//!         "add_one"
//!     }
//!
//!     fn vars(&self) -> usize {
//!         1
//!     }
//!
//!     fn apply(&self, layout: &GridLayout, source: &[f64], sink: &mut [f64]) {
//!         for i in 0..layout.ni as i64 {
//!             for j in 0..layout.nj as i64 {
//!                 for k in 0..layout.nk as i64 {
//!                     let off = layout.offset(i, j, k, 1);
//!                     sink[off] = source[off] + 1.0;
//!                 }
//!             }
//!         }
//!     }
//! }
//!
//! # fn main() -> stencilkernel::Result<()> {
//! let config = GridConfig::cube(2, 1, 1, 1)?;
//! let mut engine = StencilEngine::new(config)?;
//! engine.add_stage(Box::new(AddOne))?;
//!
//! let input: Vec<u8> = (0..8).flat_map(|v| (v as f64).to_ne_bytes()).collect();
//! let mut output = Vec::new();
//! engine.run_with(&mut Cursor::new(input), &mut output)?;
//!
//! let first = f64::from_ne_bytes(output[0..8].try_into().unwrap());
//! assert_eq!(first, 1.0);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod io;
pub mod stage;

pub use engine::StencilEngine;
pub use stage::Stage;

pub use stencilkernel_core::config::GridConfig;
pub use stencilkernel_core::error::{Result, StencilKernelError};
pub use stencilkernel_core::layout::GridLayout;
pub use stencilkernel_core::workspace::Workspace;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::StencilEngine;
    pub use crate::stage::Stage;
    pub use stencilkernel_core::prelude::*;
}
