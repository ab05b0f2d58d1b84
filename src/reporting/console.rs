//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints the final results summary, one line per recorded step in
//! attempt order, to the run's output sink.
//!
//! 此模块按尝试顺序将最终结果摘要（每个记录的步骤一行）打印到运行的输出目标。

use colored::*;

use crate::core::models::ResultsLog;
use crate::infra::{output::Output, t};

/// Prints the results summary.
///
/// # Output Format / 输出格式
/// ```text
///
/// RESULTS:
///
/// cfg-linux-gpp-23 configure: pass
/// build-linux-gpp-23-debug: pass
/// test-linux-gpp-23-debug: fail
/// ```
pub fn print_summary(results: &ResultsLog, output: &mut Output) {
    output.emit(format!("\n{}\n", t!("results_banner").bold()));
    for entry in results.iter() {
        let status = if entry.success {
            t!("status_pass")
        } else {
            t!("status_fail")
        };
        let line = format!("{}: {}", entry.label, status);
        let line = if entry.success { line.green() } else { line.red() };
        output.emit(line.to_string());
    }
}

/// The one-line verdict printed after the summary.
pub fn print_verdict(results: &ResultsLog, output: &mut Output) {
    if results.is_empty() {
        output.emit(t!("nothing_attempted").dimmed().to_string());
    } else if results.has_failures() {
        let failed = results.iter().filter(|entry| !entry.success).count();
        output.emit(
            t!("matrix_failed", failed = failed, total = results.len())
                .red()
                .bold()
                .to_string(),
        );
    } else {
        output.emit(
            t!("matrix_passed", total = results.len())
                .green()
                .bold()
                .to_string(),
        );
    }
}
