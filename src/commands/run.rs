//! # Run Command Module / 运行命令模块
//!
//! This module implements the run command: it resolves the project root and
//! configuration, opens the output sink, loads the preset table, drives the
//! matrix and prints the summary.
//!
//! 此模块实现运行命令：解析项目根目录和配置，打开输出目标，
//! 加载预设表，驱动矩阵并打印摘要。

use anyhow::{Context, Result};
use std::{path::PathBuf, process::ExitCode};

use crate::{
    core::{
        config::{self, MatrixConfig},
        execution::{Driver, DriverSettings},
        models::{EnabledToolchains, Platform},
        presets::PresetTable,
    },
    infra::{command::SystemExecutor, fs, output::Output, t},
    reporting::{print_summary, print_verdict},
};

/// Arguments of a matrix run, as parsed from the command line.
/// 从命令行解析的矩阵运行参数。
#[derive(Debug, Clone)]
pub struct RunArgs {
    pub enabled: EnabledToolchains,
    pub verbose: bool,
    /// `--log` value; `Some` when output goes to a file.
    pub log: Option<String>,
    pub project_dir: PathBuf,
    pub config: Option<PathBuf>,
    pub language: Option<String>,
}

/// Executes the run command with the provided arguments.
///
/// # Returns
/// The process exit code: failure if any recorded step failed.
pub async fn execute(args: RunArgs) -> Result<ExitCode> {
    let project_root = fs::absolute_path(&args.project_dir)?;
    let matrix_config = config::resolve_matrix_config(&project_root, args.config.as_deref())?;
    if args.language.is_none() {
        if let Some(language) = &matrix_config.language {
            crate::set_language(language);
        }
    }

    let mut output = open_output(&args, &project_root)?;
    output.emit(
        t!("project_root_detected", path = project_root.display())
            .to_string(),
    );

    let presets_path = project_root.join(&matrix_config.presets_file);
    let table = PresetTable::load(&presets_path)?;
    tracing::info!(
        path = %presets_path.display(),
        configure = table.count(crate::models::PresetKind::Configure),
        build = table.count(crate::models::PresetKind::Build),
        test = table.count(crate::models::PresetKind::Test),
        "loaded preset table"
    );

    let settings = driver_settings(args.enabled, &matrix_config);
    let mut driver = Driver::new(SystemExecutor::new(project_root), table, settings, output);
    driver.run().await;

    let (_, results, mut output) = driver.finish();
    print_summary(&results, &mut output);
    print_verdict(&results, &mut output);

    Ok(ExitCode::from(results.exit_code()))
}

fn driver_settings(enabled: EnabledToolchains, matrix_config: &MatrixConfig) -> DriverSettings {
    DriverSettings {
        host: Platform::host(),
        enabled,
        standards: matrix_config.standards.clone(),
        configurations: matrix_config.configurations.clone(),
    }
}

/// Opens the log file when `--log` was given, otherwise standard output.
/// Colors are turned off for files.
fn open_output(args: &RunArgs, project_root: &std::path::Path) -> Result<Output> {
    let Some(raw) = &args.log else {
        return Ok(Output::stdout(args.verbose));
    };

    let path = fs::resolve_log_path(project_root, raw)?;
    fs::ensure_parent_dir(&path)?;
    let mut output = Output::log_file(&path, args.verbose)
        .with_context(|| format!("Cannot log to {}", path.display()))?;
    colored::control::set_override(false);
    output.emit(
        t!("log_header", time = chrono::Local::now().to_rfc3339())
            .to_string(),
    );
    Ok(output)
}
