//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the preset matrix,
//! including data models, the preset table, configuration, planning and
//! the driver that executes the matrix.
//!
//! 此模块包含预设矩阵的核心功能，
//! 包括数据模型、预设表、配置、计划以及执行矩阵的驱动程序。

pub mod config;
pub mod execution;
pub mod models;
pub mod planner;
pub mod presets;

// Re-exports
pub use config::MatrixConfig;
pub use execution::{Driver, DriverSettings};
pub use models::ResultsLog;
pub use presets::PresetTable;
