use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the optional configuration file looked up in the project root.
pub const DEFAULT_CONFIG_FILE: &str = "PresetMatrix.toml";

/// Driver settings, loaded from an optional TOML file. Every field has a default,
/// so an absent file or an empty one behaves exactly like the built-in matrix.
///
/// 驱动程序设置，从可选的 TOML 文件加载。每个字段都有默认值，
/// 因此缺失或空的文件与内置矩阵的行为完全相同。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MatrixConfig {
    /// The preset declarations file, relative to the project root.
    /// 预设声明文件，相对于项目根目录。
    pub presets_file: PathBuf,

    /// Language standard versions to enumerate, e.g. `["23"]`.
    pub standards: Vec<String>,

    /// Build configurations to enumerate, e.g. `["debug", "release"]`.
    pub configurations: Vec<String>,

    /// The language for the runner's output messages (e.g., "en", "zh-CN").
    /// The `--lang` flag takes precedence; otherwise the system locale is used.
    ///
    /// 运行器输出消息的语言（例如 "en", "zh-CN"）。
    /// `--lang` 参数优先；否则使用系统语言。
    pub language: Option<String>,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            presets_file: PathBuf::from("CMakePresets.json"),
            standards: vec!["23".to_string()],
            configurations: vec!["debug".to_string(), "release".to_string()],
            language: None,
        }
    }
}

/// Parses a configuration file.
pub fn load_matrix_config(path: &Path) -> Result<MatrixConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Finds the configuration for a run. An explicitly requested file must exist
/// (relative paths are taken from the working directory, like any CLI path);
/// the default `PresetMatrix.toml` in the project root is optional.
pub fn resolve_matrix_config(project_root: &Path, explicit: Option<&Path>) -> Result<MatrixConfig> {
    match explicit {
        Some(path) => load_matrix_config(path),
        None => {
            let path = project_root.join(DEFAULT_CONFIG_FILE);
            if path.is_file() {
                load_matrix_config(&path)
            } else {
                Ok(MatrixConfig::default())
            }
        }
    }
}
