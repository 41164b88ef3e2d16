use crate::project_info::{metadata, version_info};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Migration CLI - 把 MySQL 表结构导出转换为 Laravel 迁移文件
#[derive(Parser, Debug)]
#[command(name = "migration-cli")]
#[command(about = metadata::PROJECT_DESCRIPTION)]
#[command(version = version_info::CLI_VERSION)]
#[command(long_about = metadata::display::DESCRIPTION_LONG)]
#[command(author = metadata::PROJECT_AUTHORS)]
pub struct Cli {
    /// 配置文件路径
    #[arg(short, long, default_value = "migration.toml")]
    pub config: PathBuf,

    /// 详细输出
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 创建默认配置文件
    Init {
        /// 如果配置文件已存在，强制覆盖
        #[arg(long)]
        force: bool,
    },
    /// 转换单张表的导出文件
    Generate {
        /// 表名，用于生成类名与 Schema::create 调用
        #[arg(short, long)]
        table: String,
        /// 结构导出文件（field, type, null, key, default, extra, comment）
        #[arg(short, long)]
        structure: PathBuf,
        /// 索引导出文件（可选）
        #[arg(short, long)]
        keys: Option<PathBuf>,
        /// 外键导出文件（可选）
        #[arg(long)]
        constraints: Option<PathBuf>,
        /// 输出到指定文件，默认输出到标准输出
        #[arg(short, long, conflicts_with = "write")]
        output: Option<PathBuf>,
        /// 按配置的输出目录和命名规则写入迁移文件
        #[arg(short, long)]
        write: bool,
    },
    /// 批量转换目录下的所有表（每个子目录为一张表）
    Batch {
        /// 包含各表子目录的导出目录
        dir: PathBuf,
        /// 迁移文件输出目录，默认使用配置中的目录
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}
