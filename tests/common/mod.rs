// Shared test helpers for integration tests
#![allow(dead_code)]

use preset_matrix::core::execution::{Driver, DriverSettings};
use preset_matrix::core::presets::PresetTable;
use preset_matrix::infra::command::Executor;
use preset_matrix::infra::output::Output;
use preset_matrix::models::{EnabledToolchains, ExecContext, Platform, PresetKind};
use std::collections::{HashMap, HashSet};

/// One call the driver made into the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub context: ExecContext,
    pub kind: PresetKind,
    pub preset: String,
}

/// An executor that never spawns anything. Steps succeed unless a failure
/// code was registered for them; every call is recorded in order.
#[derive(Debug, Default)]
pub struct StubExecutor {
    pub native_tools: HashSet<String>,
    pub wsl_tools: HashSet<String>,
    pub wsl_root: Option<String>,
    pub exit_codes: HashMap<(ExecContext, String), i32>,
    pub invocations: Vec<Invocation>,
    pub availability_queries: Vec<(ExecContext, String)>,
}

impl StubExecutor {
    /// `cmake` available natively, nothing else.
    pub fn with_cmake() -> Self {
        let mut stub = Self::default();
        stub.native_tools.insert("cmake".to_string());
        stub
    }

    pub fn native_tool(mut self, tool: &str) -> Self {
        self.native_tools.insert(tool.to_string());
        self
    }

    pub fn wsl_tool(mut self, tool: &str) -> Self {
        self.wsl_tools.insert(tool.to_string());
        self
    }

    pub fn wsl_root(mut self, root: &str) -> Self {
        self.wsl_root = Some(root.to_string());
        self
    }

    pub fn fail(mut self, context: ExecContext, preset: &str) -> Self {
        self.exit_codes.insert((context, preset.to_string()), 2);
        self
    }

    pub fn invoked(&self, kind: PresetKind, preset: &str) -> usize {
        self.invocations
            .iter()
            .filter(|call| call.kind == kind && call.preset == preset)
            .count()
    }
}

impl Executor for StubExecutor {
    async fn is_available(&mut self, context: ExecContext, tool: &str, _output: &mut Output) -> bool {
        self.availability_queries.push((context, tool.to_string()));
        match context {
            ExecContext::Native => self.native_tools.contains(tool),
            ExecContext::Wsl => self.wsl_tools.contains(tool),
        }
    }

    async fn translate_root(&mut self, _output: &mut Output) -> Option<String> {
        self.wsl_root.clone().filter(|root| !root.is_empty())
    }

    async fn run_step(
        &mut self,
        context: ExecContext,
        kind: PresetKind,
        preset: &str,
        _output: &mut Output,
    ) -> i32 {
        self.invocations.push(Invocation {
            context,
            kind,
            preset: preset.to_string(),
        });
        self.exit_codes
            .get(&(context, preset.to_string()))
            .copied()
            .unwrap_or(0)
    }
}

pub fn table(json: &str) -> PresetTable {
    PresetTable::from_json_str(json).expect("fixture presets must parse")
}

pub fn settings(host: Platform, enabled: EnabledToolchains) -> DriverSettings {
    DriverSettings {
        host,
        enabled,
        standards: vec!["23".to_string()],
        configurations: vec!["debug".to_string(), "release".to_string()],
    }
}

pub fn gcc_only() -> EnabledToolchains {
    EnabledToolchains {
        gcc: true,
        ..EnabledToolchains::default()
    }
}

/// Runs a driver to completion and hands back the executor, results and captured text.
pub async fn drive(
    executor: StubExecutor,
    table: PresetTable,
    settings: DriverSettings,
) -> (StubExecutor, preset_matrix::models::ResultsLog, String) {
    preset_matrix::set_language("en");
    let mut driver = Driver::new(executor, table, settings, Output::in_memory(false));
    driver.run().await;
    let (executor, results, output) = driver.finish();
    let text = output.captured().unwrap_or_default();
    (executor, results, text)
}
