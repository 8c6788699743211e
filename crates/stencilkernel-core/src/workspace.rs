//! Double-buffered grid workspace and the periodic halo-exchange
//! protocol.
//!
//! The workspace owns two equally sized padded grid buffers. At any
//! point one is the *source* (the previous stage's finalized output,
//! halos included) and the other is the *sink* (the buffer the next
//! stage writes into). Roles flip at every exchange; the allocations
//! themselves never move.

use crate::config::GridConfig;
use crate::layout::GridLayout;

/// Two-buffer arena for one grid computation.
///
/// Both halves are allocated once, sized for the widest per-cell
/// variable count any stage uses, so width changes between stages never
/// reallocate. The source/sink roles are a single index that flips on
/// every [`Workspace::swap_and_sync`]; no data moves between the halves.
///
/// # Invariant
///
/// At the point a stage begins, the source half's halo layers
/// (coordinate `-1` and `n_axis` on each axis) hold the periodic
/// wrap-around values for that stage's variable width, and its interior
/// holds valid data for at least that width. `swap_and_sync` establishes
/// this; everything else preserves it.
pub struct Workspace {
    layout: GridLayout,
    max_vars: usize,
    buffers: [Vec<f64>; 2],
    /// Index of the buffer currently holding the source role.
    source: usize,
}

impl Workspace {
    /// Allocate both halves for the given configuration.
    ///
    /// Allocation failure aborts the process; this is a batch numeric
    /// job with no recovery policy.
    pub fn new(config: &GridConfig) -> Self {
        let len = config.buffer_len();
        Self {
            layout: config.layout(),
            max_vars: config.max_vars,
            buffers: [vec![0.0; len], vec![0.0; len]],
            source: 0,
        }
    }

    /// Index scheme shared by both halves.
    #[inline]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Widest per-cell variable count the halves are sized for.
    #[inline]
    pub fn max_vars(&self) -> usize {
        self.max_vars
    }

    /// The buffer currently holding the source role.
    #[inline]
    pub fn source(&self) -> &[f64] {
        &self.buffers[self.source]
    }

    /// Mutable access to the buffer currently holding the sink role.
    #[inline]
    pub fn sink_mut(&mut self) -> &mut [f64] {
        &mut self.buffers[self.source ^ 1]
    }

    /// Disjoint access to both halves: source read-only, sink mutable.
    ///
    /// This is the view a stage runs against.
    #[inline]
    pub fn source_and_sink_mut(&mut self) -> (&[f64], &mut [f64]) {
        let [first, second] = &mut self.buffers;
        if self.source == 0 {
            (first.as_slice(), second.as_mut_slice())
        } else {
            (second.as_slice(), first.as_mut_slice())
        }
    }

    /// Flip the source/sink roles, then install periodic halos on the
    /// new source for per-cell width `n`.
    ///
    /// The role flip is a pure index toggle. The halo copy then runs
    /// three axis passes in K, J, I order:
    ///
    /// 1. K: for every interior `(i, j)`, cell `(i, j, nk-1)` is copied
    ///    to `(i, j, -1)` and `(i, j, 0)` to `(i, j, nk)`;
    /// 2. J: for every interior `i`, the full padded K row at `j = nj-1`
    ///    is copied to `j = -1` and the row at `j = 0` to `j = nj`;
    /// 3. I: the full padded JK plane at `i = ni-1` is copied to
    ///    `i = -1` and the plane at `i = 0` to `i = ni`.
    ///
    /// The J pass re-copies K halos filled in step 1 and the I pass
    /// re-copies both, so every edge and corner halo cell ends up
    /// consistent with a fully periodic 3-D torus without a separate
    /// corner pass. The axis order must not be changed.
    pub fn swap_and_sync(&mut self, n: usize) {
        debug_assert!(n >= 1 && n <= self.max_vars);

        self.source ^= 1;

        let layout = self.layout;
        let (ni, nj, nk) = (layout.ni, layout.nj, layout.nk);
        let buf = &mut self.buffers[self.source];

        // K axis: per-cell copies over the interior I/J extent.
        for i in 0..ni as i64 {
            for j in 0..nj as i64 {
                let last = layout.offset(i, j, nk as i64 - 1, n);
                let low = layout.offset(i, j, -1, n);
                buf.copy_within(last..last + n, low);

                let first = layout.offset(i, j, 0, n);
                let high = layout.offset(i, j, nk as i64, n);
                buf.copy_within(first..first + n, high);
            }
        }

        // J axis: whole padded K rows, so the K halos just written wrap
        // into the J halo rows as well.
        let row = layout.padded_row_len(n);
        for i in 0..ni as i64 {
            let last = layout.offset(i, nj as i64 - 1, -1, n);
            let low = layout.offset(i, -1, -1, n);
            buf.copy_within(last..last + row, low);

            let first = layout.offset(i, 0, -1, n);
            let high = layout.offset(i, nj as i64, -1, n);
            buf.copy_within(first..first + row, high);
        }

        // I axis: whole padded JK planes, picking up the combined effect
        // of both earlier passes.
        let plane = layout.padded_plane_len(n);
        let last = layout.offset(ni as i64 - 1, -1, -1, n);
        let low = layout.offset(-1, -1, -1, n);
        buf.copy_within(last..last + plane, low);

        let first = layout.offset(0, -1, -1, n);
        let high = layout.offset(ni as i64, -1, -1, n);
        buf.copy_within(first..first + plane, high);
    }

    /// Largest magnitude over the source interior for the first `n`
    /// variables. Diagnostic only; halos are excluded.
    pub fn max_abs(&self, n: usize) -> f64 {
        debug_assert!(n >= 1 && n <= self.max_vars);
        let layout = self.layout;
        let src = self.source();
        let mut max = 0.0_f64;
        for i in 0..layout.ni as i64 {
            for j in 0..layout.nj as i64 {
                for k in 0..layout.nk as i64 {
                    let off = layout.offset(i, j, k, n);
                    for value in &src[off..off + n] {
                        max = max.max(value.abs());
                    }
                }
            }
        }
        max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Distinct, axis-identifying value per (cell, variable).
    fn sentinel(i: i64, j: i64, k: i64, var: usize) -> f64 {
        (((i * 1000 + j * 100 + k) * 10) + var as i64) as f64
    }

    /// Write sentinels into the sink interior at width `n`, then flip it
    /// into the source role with halos installed.
    fn synced_workspace(config: &GridConfig, n: usize) -> Workspace {
        let mut ws = Workspace::new(config);
        let layout = *ws.layout();
        let sink = ws.sink_mut();
        for i in 0..layout.ni as i64 {
            for j in 0..layout.nj as i64 {
                for k in 0..layout.nk as i64 {
                    let off = layout.offset(i, j, k, n);
                    for var in 0..n {
                        sink[off + var] = sentinel(i, j, k, var);
                    }
                }
            }
        }
        ws.swap_and_sync(n);
        ws
    }

    #[test]
    fn roles_flip_without_moving_allocations() {
        let config = GridConfig::new(2, 2, 2, 1, 1, 1).unwrap();
        let mut ws = Workspace::new(&config);

        let source_ptr = ws.source().as_ptr();
        let sink_ptr = ws.sink_mut().as_ptr();
        ws.swap_and_sync(1);
        assert_eq!(ws.source().as_ptr(), sink_ptr);
        assert_eq!(ws.sink_mut().as_ptr(), source_ptr);

        ws.swap_and_sync(1);
        assert_eq!(ws.source().as_ptr(), source_ptr);
    }

    #[test]
    fn halo_is_periodic_on_every_axis() {
        let config = GridConfig::new(3, 4, 2, 3, 1, 1).unwrap();
        let layout = config.layout();
        let (ni, nj, nk) = (3i64, 4i64, 2i64);

        for n in [1usize, config.max_vars] {
            let ws = synced_workspace(&config, n);
            let src = ws.source();

            for var in 0..n {
                // K axis.
                for i in 0..ni {
                    for j in 0..nj {
                        assert_eq!(
                            src[layout.offset(i, j, -1, n) + var],
                            sentinel(i, j, nk - 1, var)
                        );
                        assert_eq!(
                            src[layout.offset(i, j, nk, n) + var],
                            sentinel(i, j, 0, var)
                        );
                    }
                }
                // J axis.
                for i in 0..ni {
                    for k in 0..nk {
                        assert_eq!(
                            src[layout.offset(i, -1, k, n) + var],
                            sentinel(i, nj - 1, k, var)
                        );
                        assert_eq!(
                            src[layout.offset(i, nj, k, n) + var],
                            sentinel(i, 0, k, var)
                        );
                    }
                }
                // I axis.
                for j in 0..nj {
                    for k in 0..nk {
                        assert_eq!(
                            src[layout.offset(-1, j, k, n) + var],
                            sentinel(ni - 1, j, k, var)
                        );
                        assert_eq!(
                            src[layout.offset(ni, j, k, n) + var],
                            sentinel(0, j, k, var)
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn edges_and_corners_follow_torus_wrap() {
        // The K -> J -> I pass order must compose so that every halo
        // cell, edges and corners included, equals the torus-wrapped
        // interior cell. Independent single-axis passes would leave the
        // corners stale.
        let config = GridConfig::new(3, 2, 4, 1, 1, 1).unwrap();
        let layout = config.layout();
        let (ni, nj, nk) = (3i64, 2i64, 4i64);

        let ws = synced_workspace(&config, 1);
        let src = ws.source();

        for i in -1..=ni {
            for j in -1..=nj {
                for k in -1..=nk {
                    let wrapped = (
                        (i + ni) % ni,
                        (j + nj) % nj,
                        (k + nk) % nk,
                    );
                    assert_eq!(
                        src[layout.offset(i, j, k, 1)],
                        sentinel(wrapped.0, wrapped.1, wrapped.2, 0),
                        "halo mismatch at ({i}, {j}, {k})"
                    );
                }
            }
        }
    }

    #[test]
    fn copy_stage_plus_exchange_is_idempotent() {
        let config = GridConfig::new(2, 3, 2, 2, 2, 2).unwrap();
        let layout = config.layout();
        let n = 2;
        let mut ws = synced_workspace(&config, n);

        let mut snapshots = Vec::new();
        for _ in 0..2 {
            // A stage that copies the source interior to the sink
            // unchanged.
            let (source, sink) = ws.source_and_sink_mut();
            for i in 0..layout.ni as i64 {
                for j in 0..layout.nj as i64 {
                    for k in 0..layout.nk as i64 {
                        let off = layout.offset(i, j, k, n);
                        sink[off..off + n].copy_from_slice(&source[off..off + n]);
                    }
                }
            }
            ws.swap_and_sync(n);
            snapshots.push(ws.source().to_vec());
        }
        assert_eq!(snapshots[0], snapshots[1]);
    }

    #[test]
    fn single_cell_grid_wraps_onto_itself() {
        let config = GridConfig::new(1, 1, 1, 1, 1, 1).unwrap();
        let layout = config.layout();
        let mut ws = Workspace::new(&config);
        ws.sink_mut()[layout.offset(0, 0, 0, 1)] = 42.0;
        ws.swap_and_sync(1);

        let src = ws.source();
        for i in -1..=1 {
            for j in -1..=1 {
                for k in -1..=1 {
                    assert_eq!(src[layout.offset(i, j, k, 1)], 42.0);
                }
            }
        }
    }

    #[test]
    fn max_abs_reports_peak_magnitude() {
        let config = GridConfig::new(2, 2, 2, 1, 1, 1).unwrap();
        let layout = config.layout();
        let mut ws = Workspace::new(&config);
        ws.sink_mut()[layout.offset(1, 0, 1, 1)] = -7.5;
        ws.swap_and_sync(1);
        assert_eq!(ws.max_abs(1), 7.5);
    }
}
