//! # File System Operations Module / 文件系统操作模块
//!
//! Path helpers for the project root and the optional log file.
//!
//! 项目根目录和可选日志文件的路径辅助函数。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Log file name used when `--log` is given without a value.
pub const DEFAULT_LOG_FILE: &str = "build_matrix.log";

/// Resolves the `--log` argument: `~` and environment variables are expanded,
/// and relative paths are taken from the project root.
///
/// # Arguments
/// * `project_root` - The repository root the matrix runs in
/// * `raw` - The path as given on the command line
pub fn resolve_log_path(project_root: &Path, raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .with_context(|| format!("Failed to expand log path: {}", raw))?;
    let path = PathBuf::from(expanded.into_owned());
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(project_root.join(path))
    }
}

/// Creates the parent directories of `path` if they do not exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Gets the absolute path from a potentially relative path.
///
/// # Returns
/// Canonicalized absolute path, or an error if the path doesn't exist
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}
