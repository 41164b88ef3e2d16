use anyhow::{Context, Result};
use migration_core::config::AppConfig;
use std::path::Path;
use tracing::{info, warn};

/// 创建默认配置文件，返回是否实际写入
pub fn run_init(config_path: &Path, force: bool) -> Result<bool> {
    info!("📋 初始化 migration-cli 配置");

    if !force && config_path.exists() {
        warn!("⚠️  配置文件已存在: {}", config_path.display());
        info!("如果您要重新初始化，请使用 --force 参数");
        info!("示例: migration-cli init --force");
        return Ok(false);
    }

    let config = AppConfig::default();
    config
        .save_to_file(config_path)
        .with_context(|| format!("写入配置文件失败: {}", config_path.display()))?;
    info!("   ✅ 创建配置文件: {}", config_path.display());

    info!("📝 接下来的步骤:");
    info!("   1️⃣  从数据库导出表的结构、索引、外键为制表符分隔文件");
    info!("   2️⃣  运行 'migration-cli generate -t <表名> -s <结构导出>' 生成迁移");
    info!(
        "   3️⃣  或把每张表的导出放到 <目录>/<表名>/ 下，运行 'migration-cli batch <目录>'"
    );

    Ok(true)
}
