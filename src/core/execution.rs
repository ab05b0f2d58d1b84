//! # Matrix Driver Module / 矩阵驱动模块
//!
//! This module walks the filtered candidates of every execution context,
//! makes sure each candidate's configure preset has run exactly once in that
//! context, runs the build or test step and records the outcome.
//!
//! 此模块遍历每个执行上下文中过滤后的候选项，确保每个候选项的 configure 预设
//! 在该上下文中只运行一次，然后运行构建或测试步骤并记录结果。

use colored::*;
use std::collections::HashSet;

use crate::{
    core::{
        models::{
            Candidate, EnabledToolchains, ExecContext, Platform, PresetKind, ResultsLog,
        },
        planner::{self, CompilerAvailability},
        presets::PresetTable,
    },
    infra::{command::Executor, output::Output, t},
};

/// Everything that shapes which candidates a run enumerates.
/// 决定一次运行枚举哪些候选项的所有设置。
#[derive(Debug, Clone)]
pub struct DriverSettings {
    /// The platform the driver runs on natively.
    pub host: Platform,
    pub enabled: EnabledToolchains,
    pub standards: Vec<String>,
    pub configurations: Vec<String>,
}

/// Configure outcomes of one execution context. Both sets only grow.
#[derive(Debug, Default)]
struct ConfigureState {
    configured: HashSet<String>,
    failed: HashSet<String>,
}

/// The per-invocation driver context. It owns the executor, the preset table,
/// the output sink, one configure state per execution context and the results log.
///
/// 每次调用的驱动上下文。它拥有执行器、预设表、输出目标、
/// 每个执行上下文各自的已配置集合以及结果日志。
pub struct Driver<E: Executor> {
    executor: E,
    table: PresetTable,
    settings: DriverSettings,
    output: Output,
    native: ConfigureState,
    wsl: ConfigureState,
    results: ResultsLog,
}

impl<E: Executor> Driver<E> {
    pub fn new(executor: E, table: PresetTable, settings: DriverSettings, output: Output) -> Self {
        Self {
            executor,
            table,
            settings,
            output,
            native: ConfigureState::default(),
            wsl: ConfigureState::default(),
            results: ResultsLog::new(),
        }
    }

    /// Processes every candidate for the host platform and, on Windows, for WSL.
    /// Step failures never stop the run; they only end up in the results log.
    ///
    /// 处理主机平台的所有候选项，在 Windows 上还会处理 WSL。
    /// 步骤失败不会中止运行，只会记录在结果日志中。
    pub async fn run(&mut self) {
        if !self
            .executor
            .is_available(ExecContext::Native, "cmake", &mut self.output)
            .await
        {
            tracing::warn!("cmake was not found on PATH, nothing to run");
            return;
        }

        match self.settings.host {
            Platform::Windows => {
                let availability = self.probe_compilers(ExecContext::Native).await;
                self.run_context(ExecContext::Native, Platform::Windows, availability)
                    .await;
                self.run_wsl().await;
            }
            Platform::Linux => {
                let availability = self.probe_compilers(ExecContext::Native).await;
                self.run_context(ExecContext::Native, Platform::Linux, availability)
                    .await;
            }
        }
    }

    async fn run_wsl(&mut self) {
        if !self
            .executor
            .is_available(ExecContext::Native, "wsl.exe", &mut self.output)
            .await
        {
            tracing::debug!("wsl.exe not found, skipping WSL presets");
            return;
        }
        if self.executor.translate_root(&mut self.output).await.is_none() {
            tracing::warn!("could not translate the repository path for WSL, skipping WSL presets");
            return;
        }
        let availability = self.probe_compilers(ExecContext::Wsl).await;
        self.run_context(ExecContext::Wsl, Platform::Linux, availability)
            .await;
    }

    /// Checks the gated compilers once per context.
    /// MSVC and clang-cl candidates are never gated.
    async fn probe_compilers(&mut self, context: ExecContext) -> CompilerAvailability {
        let gpp = self
            .executor
            .is_available(context, "g++", &mut self.output)
            .await;
        let clangpp = self
            .executor
            .is_available(context, "clang++", &mut self.output)
            .await;
        let availability = CompilerAvailability { gpp, clangpp };
        tracing::debug!(?context, ?availability, "compiler availability");
        availability
    }

    async fn run_context(
        &mut self,
        context: ExecContext,
        platform: Platform,
        availability: CompilerAvailability,
    ) {
        let candidates = planner::enumerate_candidates(
            platform,
            &self.settings.standards,
            &self.settings.configurations,
            availability,
        );
        let plan = planner::plan_execution(candidates, self.settings.enabled, &self.table);
        tracing::info!(
            ?context,
            steps = plan.steps.len(),
            skipped_disabled = plan.skipped_disabled,
            skipped_undeclared = plan.skipped_undeclared,
            "planned presets"
        );

        for candidate in &plan.steps {
            self.run_candidate(context, candidate).await;
        }
    }

    async fn run_candidate(&mut self, context: ExecContext, candidate: &Candidate) {
        let kind = candidate.intent.kind();
        let name = candidate.preset_name();
        let dependency = self
            .table
            .configure_dependency(kind, &name)
            .map(str::to_string);

        if let Some(dependency) = dependency {
            if !self.ensure_configured(context, &dependency).await {
                return;
            }
        }

        self.step(context.step_label(&name), context, kind, &name)
            .await;
    }

    /// Makes sure `name` has been configured in `context`, configuring it if needed.
    ///
    /// Returns `false` when the dependent step must be skipped. An undeclared
    /// configure preset is recorded as a failure; a configure step that fails
    /// records only its own entry, and the dependent step is dropped silently.
    /// A configure preset is attempted at most once per context, so later
    /// dependents of a failed one are dropped without another attempt.
    ///
    /// 确保 `name` 已在 `context` 中配置，必要时进行配置。
    /// 返回 `false` 表示必须跳过依赖它的步骤。
    pub async fn ensure_configured(&mut self, context: ExecContext, name: &str) -> bool {
        let state = self.state(context);
        if state.configured.contains(name) {
            return true;
        }
        if state.failed.contains(name) {
            tracing::debug!(?context, name, "configure already failed, skipping dependent");
            return false;
        }

        let label = context.configure_label(name);
        if !self.table.contains(PresetKind::Configure, name) {
            let message = match context {
                ExecContext::Native => t!("missing_configure_preset", name = name),
                ExecContext::Wsl => t!("missing_configure_preset_wsl", name = name),
            };
            self.output.emit(message.yellow().to_string());
            self.results.record(label, false);
            return false;
        }

        let success = self
            .step(label, context, PresetKind::Configure, name)
            .await;
        let state = self.state_mut(context);
        if success {
            state.configured.insert(name.to_string());
        } else {
            state.failed.insert(name.to_string());
        }
        success
    }

    fn state(&self, context: ExecContext) -> &ConfigureState {
        match context {
            ExecContext::Native => &self.native,
            ExecContext::Wsl => &self.wsl,
        }
    }

    fn state_mut(&mut self, context: ExecContext) -> &mut ConfigureState {
        match context {
            ExecContext::Native => &mut self.native,
            ExecContext::Wsl => &mut self.wsl,
        }
    }

    /// Runs one step, prints its progress and records the outcome.
    async fn step(&mut self, label: String, context: ExecContext, kind: PresetKind, preset: &str) -> bool {
        self.output
            .emit(t!("running_step", label = label).to_string());
        let code = self
            .executor
            .run_step(context, kind, preset, &mut self.output)
            .await;
        let success = code == 0;
        let status = if success {
            t!("status_pass").green()
        } else {
            t!("status_fail").red()
        };
        self.output.emit(format!("{} {}\n", label, status));
        tracing::debug!(label = %label, code, "step finished");
        self.results.record(label, success);
        success
    }

    pub fn results(&self) -> &ResultsLog {
        &self.results
    }

    /// Whether `name` has been configured in `context` during this run.
    pub fn is_configured(&self, context: ExecContext, name: &str) -> bool {
        self.state(context).configured.contains(name)
    }

    /// Tears the driver down, handing back the executor, the results log and the sink.
    pub fn finish(self) -> (E, ResultsLog, Output) {
        (self.executor, self.results, self.output)
    }
}
