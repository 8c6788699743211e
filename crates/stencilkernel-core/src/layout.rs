//! Index arithmetic for the padded grid buffer.
//!
//! Maps 3-D cell coordinates onto flat offsets in a buffer that carries
//! one halo layer on each side of every axis. The same scheme is used by
//! population, halo exchange, and drain, so a cell written at stride `n`
//! is always read back at the same stride `n`.

/// Coordinate-to-offset mapping for one padded grid shape.
///
/// Coordinates range over `[-1, n_axis]` per axis; `-1` and `n_axis` are
/// the halo layers. Memory layout is variable-major per cell with K the
/// fastest-varying axis, then J, then I:
///
/// `offset = n * ((k+1) + (j+1)*(nk+2) + (i+1)*(nk+2)*(nj+2))`
///
/// Coordinates outside the padded range are a contract violation: they
/// are asserted in debug builds and undefined in release builds. All
/// iteration helpers in this workspace stay inside the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Cells along the I axis (slowest-varying).
    pub ni: usize,
    /// Cells along the J axis.
    pub nj: usize,
    /// Cells along the K axis (fastest-varying).
    pub nk: usize,
}

impl GridLayout {
    /// Create a layout for the given interior extents.
    #[inline]
    pub const fn new(ni: usize, nj: usize, nk: usize) -> Self {
        Self { ni, nj, nk }
    }

    /// Flat offset of cell `(i, j, k)` at per-cell stride `n`.
    ///
    /// Accepts the full padded coordinate range `[-1, n_axis]` on each
    /// axis.
    #[inline]
    pub fn offset(&self, i: i64, j: i64, k: i64, n: usize) -> usize {
        debug_assert!(
            i >= -1 && i <= self.ni as i64,
            "i coordinate {} outside padded range [-1, {}]",
            i,
            self.ni
        );
        debug_assert!(
            j >= -1 && j <= self.nj as i64,
            "j coordinate {} outside padded range [-1, {}]",
            j,
            self.nj
        );
        debug_assert!(
            k >= -1 && k <= self.nk as i64,
            "k coordinate {} outside padded range [-1, {}]",
            k,
            self.nk
        );

        let i = (i + 1) as usize;
        let j = (j + 1) as usize;
        let k = (k + 1) as usize;
        n * (k + j * (self.nk + 2) + i * (self.nk + 2) * (self.nj + 2))
    }

    /// Flat offset of interior cell `(i, j, k)` in the *unpadded*
    /// cell-major layout used by the I/O stream temporaries.
    #[inline]
    pub fn packed_offset(&self, i: usize, j: usize, k: usize, n: usize) -> usize {
        debug_assert!(i < self.ni && j < self.nj && k < self.nk);
        n * (k + j * self.nk + i * self.nk * self.nj)
    }

    /// Length in values of one padded K row (fixed `i`, `j`) at stride
    /// `n`. K rows are contiguous, which the J exchange pass exploits.
    #[inline]
    pub const fn padded_row_len(&self, n: usize) -> usize {
        (self.nk + 2) * n
    }

    /// Length in values of one padded JK plane (fixed `i`) at stride
    /// `n`. Planes are contiguous, which the I exchange pass exploits.
    #[inline]
    pub const fn padded_plane_len(&self, n: usize) -> usize {
        (self.nj + 2) * (self.nk + 2) * n
    }

    /// Number of cells including the padding layers.
    #[inline]
    pub const fn padded_cells(&self) -> usize {
        (self.ni + 2) * (self.nj + 2) * (self.nk + 2)
    }
}
