//! # Reporting Module / 报告模块
//!
//! This module prints the results summary of a matrix run.
//!
//! 此模块打印矩阵运行的结果摘要。

pub mod console;

pub use console::{print_summary, print_verdict};
