use crate::constants::{config, dump, output};
use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// 应用配置结构
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub dump: DumpConfig,
}

/// 迁移输出相关配置
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub indent: usize,
    /// 自定义迁移模板路径，空字符串表示使用内置模板
    pub template: String,
    pub directory: String,
    pub timestamp_prefix: bool,
}

/// 每张表目录下的导出文件名
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DumpConfig {
    pub structure_file: String,
    pub keys_file: String,
    pub constraints_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            indent: output::DEFAULT_INDENT,
            template: String::new(),
            directory: output::DEFAULT_DIRECTORY.to_string(),
            timestamp_prefix: true,
        }
    }
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            structure_file: dump::DEFAULT_STRUCTURE_FILE.to_string(),
            keys_file: dump::DEFAULT_KEYS_FILE.to_string(),
            constraints_file: dump::DEFAULT_CONSTRAINTS_FILE.to_string(),
        }
    }
}

impl AppConfig {
    /// 智能查找并加载配置文件
    /// 按优先级查找：migration.toml -> .migration.toml，都不存在时使用默认配置
    pub fn find_and_load_config() -> Result<Self> {
        for config_file in config::CONFIG_FILE_CANDIDATES {
            if Path::new(config_file).exists() {
                tracing::info!("找到配置文件: {}", config_file);
                return Self::load_from_file(config_file);
            }
        }

        tracing::debug!("未找到配置文件，使用默认配置");
        Ok(Self::default())
    }

    /// 加载指定配置文件，文件不存在时回退到智能查找
    pub fn load_or_find<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::info!("使用配置文件: {}", path.display());
            return Self::load_from_file(path);
        }
        Self::find_and_load_config()
    }

    /// 从指定文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let config: AppConfig = toml::from_str(&content)?;

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_with_comments()?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// 生成带注释的TOML配置
    fn to_toml_with_comments(&self) -> Result<String> {
        const TEMPLATE: &str = include_str!("../templates/config.toml.template");

        // 字符串值经 toml 序列化后自带引号与转义
        let quote = |value: &str| toml::Value::String(value.to_string()).to_string();

        Ok(TEMPLATE
            .replace("{indent}", &self.output.indent.to_string())
            .replace("{template}", &quote(&self.output.template))
            .replace("{directory}", &quote(&self.output.directory))
            .replace(
                "{timestamp_prefix}",
                &self.output.timestamp_prefix.to_string(),
            )
            .replace("{structure_file}", &quote(&self.dump.structure_file))
            .replace("{keys_file}", &quote(&self.dump.keys_file))
            .replace("{constraints_file}", &quote(&self.dump.constraints_file)))
    }

    /// 自定义模板路径，未配置时返回 None
    pub fn template_path(&self) -> Option<PathBuf> {
        let template = self.output.template.trim();
        if template.is_empty() {
            None
        } else {
            Some(PathBuf::from(template))
        }
    }

    /// 获取迁移文件输出目录
    pub fn get_output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output.directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.output.indent, 12);
        assert!(config.template_path().is_none());
        assert_eq!(config.output.directory, "migrations");
        assert_eq!(config.dump.structure_file, "structure.tsv");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str("[output]\nindent = 8\n").unwrap();
        assert_eq!(config.output.indent, 8);
        assert!(config.output.timestamp_prefix);
        assert_eq!(config.dump.keys_file, "keys.tsv");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("migration.toml");

        let mut config = AppConfig::default();
        config.output.indent = 4;
        config.output.template = "stubs/create.stub".to_string();
        config.output.timestamp_prefix = false;
        config.save_to_file(&path).unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.template_path(),
            Some(PathBuf::from("stubs/create.stub"))
        );
    }

    #[test]
    fn test_invalid_config_is_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("migration.toml");
        fs::write(&path, "[output\nindent = ").unwrap();

        assert!(AppConfig::load_from_file(&path).is_err());
    }
}
