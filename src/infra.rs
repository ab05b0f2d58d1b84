//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the preset matrix,
//! including external command execution, the output sink, path helpers and i18n.
//!
//! 此模块为预设矩阵提供基础设施服务，
//! 包括外部命令执行、输出目标、路径辅助函数和国际化支持。

pub mod command;
pub mod fs;
pub mod output;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
