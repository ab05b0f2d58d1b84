//! # Preset Table Module / 预设表模块
//!
//! Loads the configure, build and test presets declared in a
//! `CMakePresets.json` file. The table is the source of truth for which
//! candidate combinations are actually valid.
//!
//! 从 `CMakePresets.json` 文件加载声明的 configure、build 和 test 预设。
//! 该表是判断哪些候选组合真正有效的唯一依据。

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::models::PresetKind;

/// A single declared preset. Only the fields the driver needs are typed;
/// everything else in the record is kept verbatim.
/// 单个已声明的预设。仅对驱动程序需要的字段进行类型化，其余字段原样保留。
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PresetRecord {
    pub name: String,
    /// The configure preset a build or test preset depends on.
    /// 构建或测试预设所依赖的 configure 预设。
    #[serde(rename = "configurePreset", default)]
    pub configure_preset: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct PresetFile {
    #[serde(rename = "configurePresets", default)]
    configure_presets: Vec<PresetRecord>,
    #[serde(rename = "buildPresets", default)]
    build_presets: Vec<PresetRecord>,
    #[serde(rename = "testPresets", default)]
    test_presets: Vec<PresetRecord>,
}

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("failed to read preset file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse preset file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The three preset mappings, immutable once loaded.
/// 三个预设映射，加载后不可变。
#[derive(Debug, Clone, Default)]
pub struct PresetTable {
    configure: BTreeMap<String, PresetRecord>,
    build: BTreeMap<String, PresetRecord>,
    test: BTreeMap<String, PresetRecord>,
}

impl PresetTable {
    /// A table with nothing declared.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the table from `path`. A missing or blank file is not an error and
    /// yields an empty table; a file that cannot be read or parsed is.
    ///
    /// 从 `path` 加载表。文件不存在或为空不是错误，会返回空表；
    /// 文件无法读取或解析则返回错误。
    pub fn load(path: &Path) -> Result<Self, PresetError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "preset file not found, nothing is declared");
            return Ok(Self::empty());
        }
        let content = std::fs::read_to_string(path).map_err(|source| PresetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "preset file is empty, nothing is declared");
            return Ok(Self::empty());
        }
        Self::from_json_str(&content).map_err(|source| PresetError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses the table from the contents of a preset file.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        let file: PresetFile = serde_json::from_str(content)?;
        let index = |records: Vec<PresetRecord>| {
            records
                .into_iter()
                .map(|record| (record.name.clone(), record))
                .collect::<BTreeMap<_, _>>()
        };
        Ok(Self {
            configure: index(file.configure_presets),
            build: index(file.build_presets),
            test: index(file.test_presets),
        })
    }

    fn mapping(&self, kind: PresetKind) -> &BTreeMap<String, PresetRecord> {
        match kind {
            PresetKind::Configure => &self.configure,
            PresetKind::Build => &self.build,
            PresetKind::Test => &self.test,
        }
    }

    pub fn contains(&self, kind: PresetKind, name: &str) -> bool {
        self.mapping(kind).contains_key(name)
    }

    pub fn get(&self, kind: PresetKind, name: &str) -> Option<&PresetRecord> {
        self.mapping(kind).get(name)
    }

    /// The configure preset that `name` depends on. Empty names count as no dependency.
    pub fn configure_dependency(&self, kind: PresetKind, name: &str) -> Option<&str> {
        self.get(kind, name)
            .and_then(|record| record.configure_preset.as_deref())
            .filter(|dependency| !dependency.is_empty())
    }

    /// Number of presets declared of the given kind.
    pub fn count(&self, kind: PresetKind) -> usize {
        self.mapping(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        self.configure.is_empty() && self.build.is_empty() && self.test.is_empty()
    }
}
