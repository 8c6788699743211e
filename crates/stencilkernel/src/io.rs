//! Raw binary framing between process streams and the workspace.
//!
//! The wire format is a headerless dump of native-endianness `f64`
//! values in row-major `(I, J, K)` cell order, with each cell's
//! variables contiguous. Exactly `ni*nj*nk*num_inputs` values are read
//! once at start-up and exactly `ni*nj*nk*num_outputs` values are
//! written once at shutdown.

use std::io::{ErrorKind, Read, Write};

use stencilkernel_core::config::GridConfig;
use stencilkernel_core::error::{Result, StencilKernelError};
use stencilkernel_core::workspace::Workspace;

/// Read the input frame and project it into the sink half's padded
/// layout.
///
/// Only interior cells are written; the halo stays stale until the
/// engine's first [`Workspace::swap_and_sync`] call flips the filled
/// half into the source role and installs it.
///
/// A stream that ends before `config.input_len()` values arrive fails
/// with [`StencilKernelError::ShortRead`].
pub fn populate<R: Read>(
    workspace: &mut Workspace,
    config: &GridConfig,
    reader: &mut R,
) -> Result<()> {
    let mut packed = vec![0.0_f64; config.input_len()];
    read_values(reader, &mut packed)?;

    let layout = *workspace.layout();
    let n = config.num_inputs;
    let sink = workspace.sink_mut();
    for i in 0..config.ni {
        for j in 0..config.nj {
            for k in 0..config.nk {
                let src = layout.packed_offset(i, j, k, n);
                let dst = layout.offset(i as i64, j as i64, k as i64, n);
                sink[dst..dst + n].copy_from_slice(&packed[src..src + n]);
            }
        }
    }
    Ok(())
}

/// Project the source half's interior back into the contiguous wire
/// layout and write the output frame.
///
/// The projection slices each cell to `config.num_outputs` variables.
/// Short writes surface through [`Write::write_all`] as
/// [`StencilKernelError::Io`].
pub fn drain<W: Write>(workspace: &Workspace, config: &GridConfig, writer: &mut W) -> Result<()> {
    let layout = *workspace.layout();
    let n = config.num_outputs;
    let source = workspace.source();

    let mut packed = vec![0.0_f64; config.output_len()];
    for i in 0..config.ni {
        for j in 0..config.nj {
            for k in 0..config.nk {
                let src = layout.offset(i as i64, j as i64, k as i64, n);
                let dst = layout.packed_offset(i, j, k, n);
                packed[dst..dst + n].copy_from_slice(&source[src..src + n]);
            }
        }
    }

    writer.write_all(bytemuck::cast_slice(&packed))?;
    writer.flush()?;
    Ok(())
}

/// Fill `values` from the reader, counting transferred bytes so a
/// truncated stream is reported with exact value counts.
fn read_values<R: Read>(reader: &mut R, values: &mut [f64]) -> Result<()> {
    let expected = values.len();
    let bytes = bytemuck::cast_slice_mut::<f64, u8>(values);
    let mut filled = 0;
    while filled < bytes.len() {
        match reader.read(&mut bytes[filled..]) {
            Ok(0) => break,
            Ok(count) => filled += count,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        }
    }
    if filled != bytes.len() {
        return Err(StencilKernelError::ShortRead {
            expected,
            got: filled / std::mem::size_of::<f64>(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn to_bytes(values: &[f64]) -> Vec<u8> {
        bytemuck::cast_slice(values).to_vec()
    }

    #[test]
    fn populate_projects_into_padded_layout() {
        let config = GridConfig::new(2, 2, 2, 2, 2, 2).unwrap();
        let layout = config.layout();
        let mut ws = Workspace::new(&config);

        let values: Vec<f64> = (0..config.input_len()).map(|v| v as f64).collect();
        populate(&mut ws, &config, &mut Cursor::new(to_bytes(&values))).unwrap();

        let sink = ws.sink_mut();
        for i in 0..2 {
            for j in 0..2 {
                for k in 0..2 {
                    let padded = layout.offset(i as i64, j as i64, k as i64, 2);
                    let packed = layout.packed_offset(i, j, k, 2);
                    assert_eq!(sink[padded], values[packed]);
                    assert_eq!(sink[padded + 1], values[packed + 1]);
                }
            }
        }
    }

    #[test]
    fn drain_inverts_populate() {
        let config = GridConfig::new(3, 2, 4, 3, 3, 3).unwrap();
        let mut ws = Workspace::new(&config);

        let values: Vec<f64> = (0..config.input_len()).map(|v| 0.5 * v as f64).collect();
        populate(&mut ws, &config, &mut Cursor::new(to_bytes(&values))).unwrap();
        ws.swap_and_sync(config.num_inputs);

        let mut out = Vec::new();
        drain(&ws, &config, &mut out).unwrap();
        assert_eq!(out, to_bytes(&values));
    }

    #[test]
    fn truncated_input_reports_value_counts() {
        let config = GridConfig::new(2, 2, 2, 1, 1, 1).unwrap();
        let mut ws = Workspace::new(&config);

        let values: Vec<f64> = vec![1.0; 3];
        let err = populate(&mut ws, &config, &mut Cursor::new(to_bytes(&values))).unwrap_err();
        match err {
            StencilKernelError::ShortRead { expected, got } => {
                assert_eq!(expected, 8);
                assert_eq!(got, 3);
            }
            other => panic!("expected ShortRead, got {other:?}"),
        }
    }

    #[test]
    fn partial_trailing_value_counts_as_missing() {
        let config = GridConfig::new(1, 1, 2, 1, 1, 1).unwrap();
        let mut ws = Workspace::new(&config);

        // One whole value plus three stray bytes.
        let mut bytes = to_bytes(&[1.0]);
        bytes.extend_from_slice(&[0xAA, 0xBB, 0xCC]);
        let err = populate(&mut ws, &config, &mut Cursor::new(bytes)).unwrap_err();
        match err {
            StencilKernelError::ShortRead { expected, got } => {
                assert_eq!(expected, 2);
                assert_eq!(got, 1);
            }
            other => panic!("expected ShortRead, got {other:?}"),
        }
    }
}
