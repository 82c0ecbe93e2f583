//! Build pipeline
//!
//! A build is an explicit, ordered list of stages run against one
//! [`BuildContext`]:
//!
//! 1. [`Stage::CopyAssets`]: copy the static sources into staging
//! 2. [`Stage::Compile`]: run the toolchain and read the module interface
//! 3. [`Stage::Assemble`]: emit the module, shim, entry scripts and manifest
//!
//! Every stage writes into a private staging directory. The output directory
//! is only replaced after the last stage succeeds; any failure leaves the
//! previous output as it was. Builds against the same output directory are
//! serialised through an advisory lock.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::assemble::{self, Manifest};
use crate::assets::{self, Asset};
use crate::compiler::{self, BinaryModule, Toolchain};
use crate::config::ProjectConfig;
use crate::error::{Result, fs as fs_error};
use crate::output::{OutputGuard, OutputTransaction};
use crate::ui::BuildReporter;

/// A build stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CopyAssets,
    Compile,
    Assemble,
}

impl Stage {
    /// Stages in execution order
    pub const ALL: [Stage; 3] = [Stage::CopyAssets, Stage::Compile, Stage::Assemble];

    pub fn name(self) -> &'static str {
        match self {
            Stage::CopyAssets => "copy-assets",
            Stage::Compile => "compile",
            Stage::Assemble => "assemble",
        }
    }

    /// Progress message
    pub fn description(self) -> &'static str {
        match self {
            Stage::CopyAssets => "Copying static assets",
            Stage::Compile => "Compiling to WebAssembly",
            Stage::Assemble => "Assembling output",
        }
    }

    fn run<T: Toolchain>(self, context: &mut BuildContext<'_, T>) -> Result<()> {
        match self {
            Stage::CopyAssets => copy_assets(context),
            Stage::Compile => compile(context),
            Stage::Assemble => assemble(context),
        }
    }
}

/// State shared by the stages of one build
pub struct BuildContext<'a, T: Toolchain> {
    pub config: &'a ProjectConfig,
    pub toolchain: &'a T,
    pub staging: PathBuf,
    pub assets: Vec<Asset>,
    pub module: Option<BinaryModule>,
    pub manifest: Option<Manifest>,
}

impl<'a, T: Toolchain> BuildContext<'a, T> {
    pub fn new(config: &'a ProjectConfig, toolchain: &'a T, staging: &Path) -> Self {
        Self {
            config,
            toolchain,
            staging: staging.to_path_buf(),
            assets: Vec::new(),
            module: None,
            manifest: None,
        }
    }
}

/// Result of a committed build
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub out_dir: PathBuf,
    pub manifest: Manifest,
    pub elapsed: Duration,
}

/// Run every stage and commit the output directory
pub fn run<T: Toolchain>(
    config: &ProjectConfig,
    toolchain: &T,
    reporter: &mut dyn BuildReporter,
) -> Result<BuildReport> {
    let result = run_stages(config, toolchain, reporter);
    match &result {
        Ok(report) => reporter.finish(report),
        Err(_) => reporter.abandon(),
    }
    result
}

fn run_stages<T: Toolchain>(
    config: &ProjectConfig,
    toolchain: &T,
    reporter: &mut dyn BuildReporter,
) -> Result<BuildReport> {
    let started = Instant::now();

    let _guard = OutputGuard::acquire(&config.out_dir)?;
    let transaction = OutputTransaction::begin(&config.out_dir)?;
    let mut context = BuildContext::new(config, toolchain, transaction.staging());

    for stage in Stage::ALL {
        tracing::info!(stage = stage.name(), "stage started");
        reporter.stage_started(stage);
        let stage_started = Instant::now();

        stage.run(&mut context)?;

        reporter.stage_finished(stage);
        tracing::info!(
            stage = stage.name(),
            elapsed_ms = stage_started.elapsed().as_millis() as u64,
            "stage finished"
        );
    }

    let manifest = context
        .manifest
        .take()
        .ok_or_else(|| fs_error::io_error("build finished without a manifest"))?;

    let out_dir = transaction.commit()?;
    tracing::info!(out_dir = %out_dir.display(), "build committed");

    Ok(BuildReport {
        out_dir,
        manifest,
        elapsed: started.elapsed(),
    })
}

fn copy_assets<T: Toolchain>(context: &mut BuildContext<'_, T>) -> Result<()> {
    context.assets = assets::copy_assets(&context.config.static_sources, &context.staging)?;
    Ok(())
}

fn compile<T: Toolchain>(context: &mut BuildContext<'_, T>) -> Result<()> {
    context.module = Some(compiler::compile(context.toolchain, context.config)?);
    Ok(())
}

fn assemble<T: Toolchain>(context: &mut BuildContext<'_, T>) -> Result<()> {
    let module = context
        .module
        .as_ref()
        .ok_or_else(|| fs_error::io_error("assemble stage ran before compile"))?;
    let assets = std::mem::take(&mut context.assets);

    let manifest = assemble::assemble(context.config, module, assets, &context.staging)?;
    context.manifest = Some(manifest);
    Ok(())
}
