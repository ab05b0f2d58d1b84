//! # Preset Matrix Library / Preset Matrix 库
//!
//! This library provides the core functionality for the `preset-matrix` tool,
//! which drives CMake configure/build/test presets across toolchains
//! (MSVC, Clang, GCC) and platforms (Windows, Linux, WSL).
//!
//! 此库为 `preset-matrix` 工具提供核心功能，
//! 它在多个工具链（MSVC、Clang、GCC）和平台（Windows、Linux、WSL）上
//! 驱动 CMake 的 configure/build/test 预设。
//!
//! ## Modules / 模块
//!
//! - `core` - Data models, preset table, planning and the matrix driver
//! - `infra` - External commands, the output sink and file system helpers
//! - `reporting` - Results summary
//! - `cli` / `commands` - Command-line interface and the run command
//!
//! - `core` - 数据模型、预设表、计划和矩阵驱动程序
//! - `infra` - 外部命令、输出目标和文件系统辅助函数
//! - `reporting` - 结果摘要
//! - `cli` / `commands` - 命令行接口和运行命令

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod logging;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::{execution, models, presets};

/// Selects the language for the application's messages.
///
/// It attempts to match the full locale (e.g., "zh-CN"), then just the
/// language code (e.g., "en"), and finally falls back to "en".
///
/// 选择应用程序消息的语言。先尝试完整匹配（例如 "zh-CN"），
/// 再匹配语言代码（例如 "en"），最后回退到 "en"。
pub fn set_language(requested: &str) {
    let available_locales = rust_i18n::available_locales!();

    let lang = if available_locales.contains(&requested) {
        requested
    } else {
        requested
            .split(['-', '_'])
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
    };

    rust_i18n::set_locale(lang);
}

/// Initializes i18n from the system locale, falling back to "en".
pub fn init() {
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    set_language(&locale);
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
