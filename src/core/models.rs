//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the preset matrix:
//! the tagged candidate description, preset kinds, execution contexts and the
//! append-only results log.
//!
//! 此模块定义了整个预设矩阵中使用的核心数据结构：
//! 带标签的候选项描述、预设类型、执行上下文以及只追加的结果日志。

use serde::{Deserialize, Serialize};
use std::fmt;

/// The platform a preset name targets.
/// 预设名称所针对的平台。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    /// Native Windows (`win`) / 原生 Windows
    Windows,
    /// Linux, either native or inside WSL (`linux`) / Linux（原生或 WSL 内）
    Linux,
}

impl Platform {
    /// The platform this binary was compiled for.
    /// 当前二进制文件编译目标的平台。
    pub fn host() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// The token used inside preset names.
    pub fn token(self) -> &'static str {
        match self {
            Platform::Windows => "win",
            Platform::Linux => "linux",
        }
    }
}

/// A toolchain group that can be enabled from the command line.
/// 可以从命令行启用的工具链组。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ToolchainGroup {
    Msvc,
    Gcc,
    Clang,
}

/// A concrete compiler toolchain as it appears in preset names.
/// 预设名称中出现的具体编译器工具链。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Toolchain {
    /// MSVC `cl.exe`
    Msvc,
    /// `clang-cl` with the MSVC ABI
    ClangCl,
    /// GNU `g++`
    Gpp,
    /// LLVM `clang++`
    ClangPp,
}

impl Toolchain {
    /// Toolchains generated for native Windows candidates, in enumeration order.
    pub const WINDOWS: [Toolchain; 4] = [
        Toolchain::Msvc,
        Toolchain::ClangCl,
        Toolchain::Gpp,
        Toolchain::ClangPp,
    ];

    /// Toolchains generated for Linux candidates, in enumeration order.
    pub const LINUX: [Toolchain; 2] = [Toolchain::Gpp, Toolchain::ClangPp];

    /// The token used inside preset names.
    pub fn token(self) -> &'static str {
        match self {
            Toolchain::Msvc => "msvc",
            Toolchain::ClangCl => "clangcl",
            Toolchain::Gpp => "gpp",
            Toolchain::ClangPp => "clangpp",
        }
    }

    /// The group that must be enabled for this toolchain to be attempted.
    /// 必须启用才能尝试此工具链的组。
    pub fn group(self) -> ToolchainGroup {
        match self {
            Toolchain::Msvc => ToolchainGroup::Msvc,
            Toolchain::ClangCl | Toolchain::ClangPp => ToolchainGroup::Clang,
            Toolchain::Gpp => ToolchainGroup::Gcc,
        }
    }
}

/// The set of toolchain groups enabled for this invocation.
/// 本次调用启用的工具链组集合。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnabledToolchains {
    pub msvc: bool,
    pub gcc: bool,
    pub clang: bool,
}

impl EnabledToolchains {
    /// Every group enabled, as selected by `--all`.
    pub fn all() -> Self {
        Self {
            msvc: true,
            gcc: true,
            clang: true,
        }
    }

    pub fn contains(&self, group: ToolchainGroup) -> bool {
        match group {
            ToolchainGroup::Msvc => self.msvc,
            ToolchainGroup::Gcc => self.gcc,
            ToolchainGroup::Clang => self.clang,
        }
    }

    /// Returns `true` when no group was selected at all.
    pub fn is_empty(&self) -> bool {
        !(self.msvc || self.gcc || self.clang)
    }
}

/// What a build-or-test candidate intends to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Build,
    Test,
}

impl Intent {
    pub fn token(self) -> &'static str {
        match self {
            Intent::Build => "build",
            Intent::Test => "test",
        }
    }

    /// The preset table a candidate of this intent must be declared in.
    pub fn kind(self) -> PresetKind {
        match self {
            Intent::Build => PresetKind::Build,
            Intent::Test => PresetKind::Test,
        }
    }
}

/// The three kinds of declared presets, which are also the three kinds of steps.
/// 三种声明的预设类型，同时也是三种步骤类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresetKind {
    /// `cmake --preset <name>`
    Configure,
    /// `cmake --build --preset <name>`
    Build,
    /// `ctest --preset <name>`
    Test,
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PresetKind::Configure => "configure",
            PresetKind::Build => "build",
            PresetKind::Test => "test",
        };
        f.write_str(name)
    }
}

/// Where a step is executed.
/// 步骤的执行位置。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecContext {
    /// Directly on the host.
    /// 直接在主机上执行。
    Native,
    /// Inside the Windows Subsystem for Linux, reached through `wsl.exe`.
    /// 通过 `wsl.exe` 在 Windows Linux 子系统中执行。
    Wsl,
}

impl ExecContext {
    /// Prefix that distinguishes result labels of this context.
    pub fn label_prefix(self) -> &'static str {
        match self {
            ExecContext::Native => "",
            ExecContext::Wsl => "wsl-",
        }
    }

    /// Label recorded for a configure step of `preset`.
    pub fn configure_label(self, preset: &str) -> String {
        format!("{}{} configure", self.label_prefix(), preset)
    }

    /// Label recorded for a build or test step of `preset`.
    pub fn step_label(self, preset: &str) -> String {
        format!("{}{}", self.label_prefix(), preset)
    }
}

/// A candidate build or test preset, described by its parts rather than by its name.
/// The name is derived from the parts and is only used for table lookups and labels.
///
/// 一个候选的构建或测试预设，由其组成部分而不是名称描述。
/// 名称由各部分派生，仅用于表查找和标签。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub platform: Platform,
    pub toolchain: Toolchain,
    /// Language standard version, e.g. `23`.
    pub standard: String,
    /// Build configuration, e.g. `debug`.
    pub configuration: String,
    pub intent: Intent,
}

impl Candidate {
    /// `<intent>-<platform>-<toolchain>-<standard>-<configuration>`
    pub fn preset_name(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            self.intent.token(),
            self.platform.token(),
            self.toolchain.token(),
            self.standard,
            self.configuration
        )
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.preset_name())
    }
}

/// One entry of the results log.
/// 结果日志中的一个条目。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    pub label: String,
    pub success: bool,
}

/// The ordered, append-only record of every attempted step.
/// 每个已尝试步骤的有序、只追加记录。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsLog {
    entries: Vec<StepResult>,
}

impl ResultsLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, label: impl Into<String>, success: bool) {
        self.entries.push(StepResult {
            label: label.into(),
            success,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepResult> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(|entry| !entry.success)
    }

    /// Process exit code for this log: `1` if anything failed, otherwise `0`.
    pub fn exit_code(&self) -> u8 {
        u8::from(self.has_failures())
    }

    /// The log as `(label, success)` pairs, convenient for assertions.
    pub fn as_pairs(&self) -> Vec<(&str, bool)> {
        self.entries
            .iter()
            .map(|entry| (entry.label.as_str(), entry.success))
            .collect()
    }
}
