//! Stage sequencing and the populate -> exchange -> drain run loop.

use std::io::{Read, Write};

use tracing::{debug, info};

use stencilkernel_core::config::GridConfig;
use stencilkernel_core::error::{Result, StencilKernelError};
use stencilkernel_core::workspace::Workspace;

use crate::io;
use crate::stage::Stage;

/// The per-process engine driving one grid computation.
///
/// The engine owns the workspace and an ordered list of opaque stages.
/// A run is a strict sequence with no suspension points:
///
/// 1. populate the workspace from the input stream;
/// 2. flip the filled half into the source role and install halos for
///    the input width;
/// 3. for each stage: apply it (source -> sink interior), then flip
///    roles and install halos for the stage's width;
/// 4. drain the final source half to the output stream.
///
/// The process scaffold reads stdin exactly once at start-up and writes
/// stdout exactly once at shutdown; [`StencilEngine::run_with`] exposes
/// the same pipeline over arbitrary reader/writer pairs for tests.
pub struct StencilEngine {
    config: GridConfig,
    workspace: Workspace,
    stages: Vec<Box<dyn Stage>>,
    steps: u64,
}

impl StencilEngine {
    /// Create an engine and allocate its workspace.
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        info!(
            "initializing stencil engine ({}x{}x{} grid, max {} vars/cell)",
            config.ni, config.nj, config.nk, config.max_vars
        );
        Ok(Self {
            workspace: Workspace::new(&config),
            config,
            stages: Vec::new(),
            steps: 0,
        })
    }

    /// Append a stage to the sequence.
    ///
    /// Rejects stages whose declared width exceeds what the workspace
    /// was allocated for.
    pub fn add_stage(&mut self, stage: Box<dyn Stage>) -> Result<()> {
        let vars = stage.vars();
        if vars == 0 {
            return Err(StencilKernelError::InvalidConfig(format!(
                "stage '{}' declares zero variables per cell",
                stage.label()
            )));
        }
        if vars > self.config.max_vars {
            return Err(StencilKernelError::StageTooWide {
                label: stage.label().to_string(),
                vars,
                max_vars: self.config.max_vars,
            });
        }
        debug!("registered stage '{}' ({} vars/cell)", stage.label(), vars);
        self.stages.push(stage);
        Ok(())
    }

    /// The engine's configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The engine's workspace (for diagnostics and tests).
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Number of registered stages.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Stages completed during the most recent run.
    pub fn steps_completed(&self) -> u64 {
        self.steps
    }

    /// Run the pipeline over the process's standard streams.
    pub fn run(&mut self) -> Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.run_with(&mut stdin.lock(), &mut stdout.lock())
    }

    /// Run the pipeline over an arbitrary reader/writer pair.
    pub fn run_with<R: Read, W: Write>(&mut self, reader: &mut R, writer: &mut W) -> Result<()> {
        self.steps = 0;

        debug!("reading {} input values", self.config.input_len());
        io::populate(&mut self.workspace, &self.config, reader)?;
        self.workspace.swap_and_sync(self.config.num_inputs);

        let layout = *self.workspace.layout();
        let total = self.stages.len();
        for stage in &self.stages {
            let (source, sink) = self.workspace.source_and_sink_mut();
            stage.apply(&layout, source, sink);
            self.workspace.swap_and_sync(stage.vars());
            self.steps += 1;
            debug!(
                "stage '{}' complete ({} of {})",
                stage.label(),
                self.steps,
                total
            );
        }

        debug!("writing {} output values", self.config.output_len());
        io::drain(&self.workspace, &self.config, writer)?;
        info!("run complete after {} stages", self.steps);
        Ok(())
    }
}
