//! # Stencilkernel Core
//!
//! Core types for the stencilkernel runtime scaffold: the padded grid
//! index scheme, the double-buffered workspace, and the periodic
//! halo-exchange protocol that generated stencil kernels run against.
//!
//! This crate holds everything below the stage sequencer. It performs no
//! I/O and spawns no threads; the whole model is a single owned
//! allocation mutated in place by a strictly sequential pipeline.
//!
//! ## Core Abstractions
//!
//! - [`GridConfig`] - Immutable build-time grid parameters
//! - [`GridLayout`] - Cell coordinate to flat offset arithmetic
//! - [`Workspace`] - Two-buffer arena with flipping source/sink roles
//!
//! ## Example
//!
//! ```
//! use stencilkernel_core::prelude::*;
//!
//! let config = GridConfig::cube(8, 2, 1, 1).unwrap();
//! let mut workspace = Workspace::new(&config);
//!
//! // Flip the source/sink roles and install periodic halos at width 1.
//! workspace.swap_and_sync(1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod layout;
pub mod workspace;

pub use config::GridConfig;
pub use error::{Result, StencilKernelError};
pub use layout::GridLayout;
pub use workspace::Workspace;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::GridConfig;
    pub use crate::error::{Result, StencilKernelError};
    pub use crate::layout::GridLayout;
    pub use crate::workspace::Workspace;
}
