//! # Candidate Planner Module / 候选计划模块
//!
//! This module enumerates candidate presets by naming convention and filters
//! them down to the ones that should actually be attempted: the toolchain group
//! must be enabled, the compiler must be available in the execution context and
//! the preset must be declared.
//!
//! 此模块按命名约定枚举候选预设，并将其过滤为真正应尝试的预设：
//! 工具链组必须已启用，编译器必须在执行上下文中可用，并且预设必须已声明。

use crate::core::models::{Candidate, EnabledToolchains, Intent, Platform, Toolchain};
use crate::core::presets::PresetTable;

/// Which gated compilers were found in an execution context.
/// 在执行上下文中找到了哪些受控编译器。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompilerAvailability {
    pub gpp: bool,
    pub clangpp: bool,
}

impl CompilerAvailability {
    /// Everything available; handy when the check does not matter.
    pub fn all() -> Self {
        Self {
            gpp: true,
            clangpp: true,
        }
    }

    pub fn allows(&self, toolchain: Toolchain) -> bool {
        match toolchain {
            Toolchain::Msvc | Toolchain::ClangCl => true,
            Toolchain::Gpp => self.gpp,
            Toolchain::ClangPp => self.clangpp,
        }
    }
}

/// Enumerates candidates for `platform` in the order they are attempted:
/// every build candidate first, then every test candidate.
///
/// On Windows the loop nests standard, configuration, toolchain. On Linux it
/// nests toolchain, standard, configuration. Compilers missing from
/// `availability` are never generated.
///
/// 按尝试顺序枚举 `platform` 的候选项：先所有构建候选，再所有测试候选。
pub fn enumerate_candidates(
    platform: Platform,
    standards: &[String],
    configurations: &[String],
    availability: CompilerAvailability,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for intent in [Intent::Build, Intent::Test] {
        let make = |toolchain: Toolchain, standard: &String, configuration: &String| Candidate {
            platform,
            toolchain,
            standard: standard.clone(),
            configuration: configuration.clone(),
            intent,
        };
        match platform {
            Platform::Windows => {
                for standard in standards {
                    for configuration in configurations {
                        candidates.extend(
                            Toolchain::WINDOWS
                                .into_iter()
                                .filter(|toolchain| availability.allows(*toolchain))
                                .map(|toolchain| make(toolchain, standard, configuration)),
                        );
                    }
                }
            }
            Platform::Linux => {
                for toolchain in Toolchain::LINUX {
                    if !availability.allows(toolchain) {
                        continue;
                    }
                    for standard in standards {
                        for configuration in configurations {
                            candidates.push(make(toolchain, standard, configuration));
                        }
                    }
                }
            }
        }
    }
    candidates
}

/// The candidates that survived filtering, plus counts of what was dropped.
/// 通过过滤的候选项，以及被丢弃的数量。
#[derive(Debug, Default)]
pub struct ExecutionPlan {
    /// Candidates to attempt, in order.
    /// 按顺序要尝试的候选项。
    pub steps: Vec<Candidate>,
    /// Candidates whose toolchain group was not enabled.
    pub skipped_disabled: usize,
    /// Candidates with no matching declaration in the preset table.
    pub skipped_undeclared: usize,
}

/// Filters `candidates` by enabled toolchain group and by declaration,
/// keeping their relative order.
pub fn plan_execution(
    candidates: Vec<Candidate>,
    enabled: EnabledToolchains,
    table: &PresetTable,
) -> ExecutionPlan {
    let mut plan = ExecutionPlan::default();
    for candidate in candidates {
        if !enabled.contains(candidate.toolchain.group()) {
            tracing::debug!(preset = %candidate, "toolchain group disabled, skipping");
            plan.skipped_disabled += 1;
            continue;
        }
        if !table.contains(candidate.intent.kind(), &candidate.preset_name()) {
            tracing::debug!(preset = %candidate, "preset not declared, skipping");
            plan.skipped_undeclared += 1;
            continue;
        }
        plan.steps.push(candidate);
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> (Vec<String>, Vec<String>) {
        (
            vec!["23".to_string()],
            vec!["debug".to_string(), "release".to_string()],
        )
    }

    #[test]
    fn windows_without_gnu_compilers_only_has_msvc_and_clangcl() {
        let (standards, configurations) = defaults();
        let names: Vec<_> = enumerate_candidates(
            Platform::Windows,
            &standards,
            &configurations,
            CompilerAvailability::default(),
        )
        .iter()
        .map(Candidate::preset_name)
        .collect();
        assert_eq!(
            names,
            vec![
                "build-win-msvc-23-debug",
                "build-win-clangcl-23-debug",
                "build-win-msvc-23-release",
                "build-win-clangcl-23-release",
                "test-win-msvc-23-debug",
                "test-win-clangcl-23-debug",
                "test-win-msvc-23-release",
                "test-win-clangcl-23-release",
            ]
        );
    }

    #[test]
    fn linux_nests_toolchain_outermost() {
        let (standards, configurations) = defaults();
        let names: Vec<_> = enumerate_candidates(
            Platform::Linux,
            &standards,
            &configurations,
            CompilerAvailability::all(),
        )
        .iter()
        .map(Candidate::preset_name)
        .collect();
        assert_eq!(
            &names[..4],
            &[
                "build-linux-gpp-23-debug",
                "build-linux-gpp-23-release",
                "build-linux-clangpp-23-debug",
                "build-linux-clangpp-23-release",
            ]
        );
        assert_eq!(names.len(), 8);
    }
}
