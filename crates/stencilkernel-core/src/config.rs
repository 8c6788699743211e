//! Build-time grid parameters.

use crate::error::{Result, StencilKernelError};
use crate::layout::GridLayout;

/// Immutable grid parameters, fixed for the lifetime of a process.
///
/// The external code generator bakes these values into the scaffold
/// before compilation; nothing is runtime-configurable. They live in an
/// explicit config struct rather than process-wide constants so that one
/// test binary can exercise several grid shapes.
///
/// The addressable domain is `[0, ni) x [0, nj) x [0, nk)`; each axis
/// additionally reserves one padding layer on each side (coordinates
/// `-1` and `n`) for periodic halo data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    /// Cells along the I axis (slowest-varying).
    pub ni: usize,
    /// Cells along the J axis.
    pub nj: usize,
    /// Cells along the K axis (fastest-varying).
    pub nk: usize,
    /// Widest per-cell variable count any stage uses. The workspace is
    /// sized for this up front so per-stage width changes never
    /// reallocate.
    pub max_vars: usize,
    /// Per-cell variable count of the input stream.
    pub num_inputs: usize,
    /// Per-cell variable count of the output stream.
    pub num_outputs: usize,
}

impl GridConfig {
    /// Create a validated configuration.
    ///
    /// # Arguments
    /// * `ni`, `nj`, `nk` - Grid extents per axis, each >= 1
    /// * `max_vars` - Widest per-cell variable count, >= 1
    /// * `num_inputs` - Input stream width, in `1..=max_vars`
    /// * `num_outputs` - Output stream width, in `1..=max_vars`
    pub fn new(
        ni: usize,
        nj: usize,
        nk: usize,
        max_vars: usize,
        num_inputs: usize,
        num_outputs: usize,
    ) -> Result<Self> {
        let config = Self {
            ni,
            nj,
            nk,
            max_vars,
            num_inputs,
            num_outputs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration for a symmetric `n x n x n` grid.
    pub fn cube(n: usize, max_vars: usize, num_inputs: usize, num_outputs: usize) -> Result<Self> {
        Self::new(n, n, n, max_vars, num_inputs, num_outputs)
    }

    /// Check the invariants `new` enforces.
    ///
    /// Useful when a config was assembled field-by-field.
    pub fn validate(&self) -> Result<()> {
        if self.ni == 0 || self.nj == 0 || self.nk == 0 {
            return Err(StencilKernelError::InvalidConfig(format!(
                "grid extents must all be >= 1, got {}x{}x{}",
                self.ni, self.nj, self.nk
            )));
        }
        if self.max_vars == 0 {
            return Err(StencilKernelError::InvalidConfig(
                "max_vars must be >= 1".to_string(),
            ));
        }
        if self.num_inputs == 0 || self.num_inputs > self.max_vars {
            return Err(StencilKernelError::InvalidConfig(format!(
                "num_inputs must be in 1..={}, got {}",
                self.max_vars, self.num_inputs
            )));
        }
        if self.num_outputs == 0 || self.num_outputs > self.max_vars {
            return Err(StencilKernelError::InvalidConfig(format!(
                "num_outputs must be in 1..={}, got {}",
                self.max_vars, self.num_outputs
            )));
        }
        Ok(())
    }

    /// Index scheme for this grid shape.
    #[inline]
    pub fn layout(&self) -> GridLayout {
        GridLayout::new(self.ni, self.nj, self.nk)
    }

    /// Number of interior (real) cells.
    #[inline]
    pub const fn interior_cells(&self) -> usize {
        self.ni * self.nj * self.nk
    }

    /// Number of cells including the padding layer on every side.
    #[inline]
    pub const fn padded_cells(&self) -> usize {
        (self.ni + 2) * (self.nj + 2) * (self.nk + 2)
    }

    /// Length in `f64` values of one workspace half.
    #[inline]
    pub const fn buffer_len(&self) -> usize {
        self.padded_cells() * self.max_vars
    }

    /// Number of `f64` values the input stream must supply.
    #[inline]
    pub const fn input_len(&self) -> usize {
        self.interior_cells() * self.num_inputs
    }

    /// Number of `f64` values the output stream receives.
    #[inline]
    pub const fn output_len(&self) -> usize {
        self.interior_cells() * self.num_outputs
    }
}
