use anyhow::{Context, Result};
use migration_core::{MigrationTemplate, config::AppConfig};
use std::path::Path;

use crate::cli::Commands;
use crate::commands::{self, GenerateArgs};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct CliApp {
    pub config: AppConfig,
    pub template: MigrationTemplate,
}

impl CliApp {
    /// 加载配置与迁移模板
    pub fn new_with_config(config_path: &Path) -> Result<Self> {
        let config = AppConfig::load_or_find(config_path)
            .with_context(|| format!("加载配置失败: {}", config_path.display()))?;

        let template = match config.template_path() {
            Some(path) => {
                info!("使用自定义迁移模板: {}", path.display());
                MigrationTemplate::from_file(&path)
                    .with_context(|| format!("加载迁移模板失败: {}", path.display()))?
            }
            None => {
                debug!("使用内置迁移模板");
                MigrationTemplate::builtin()
            }
        };

        Ok(Self { config, template })
    }

    /// 运行应用命令
    pub async fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Init { .. } => unreachable!(), // 已经在 main.rs 中处理
            Commands::Generate {
                table,
                structure,
                keys,
                constraints,
                output,
                write,
            } => {
                let args = GenerateArgs {
                    table,
                    structure,
                    keys,
                    constraints,
                    output,
                    write,
                };
                commands::run_generate(self, &args)
            }
            Commands::Batch { dir, out_dir } => {
                let out_dir = out_dir.unwrap_or_else(|| self.config.get_output_dir());
                let report = commands::run_batch(self, &dir, &out_dir).await?;
                report.into_result()
            }
        }
    }
}
