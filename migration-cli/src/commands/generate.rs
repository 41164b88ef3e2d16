use crate::app::CliApp;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use migration_core::{MigrationTemplate, template::migration_file_name, translate_table};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// generate 命令参数
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub table: String,
    pub structure: PathBuf,
    pub keys: Option<PathBuf>,
    pub constraints: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub write: bool,
}

/// 读取导出文件，未提供时视为没有数据行
pub(crate) fn read_dump(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("读取导出文件失败: {}", path.display())),
        None => Ok(String::new()),
    }
}

/// 读取三份导出并转换为迁移文件内容
pub(crate) fn translate_files(
    table: &str,
    structure: &Path,
    keys: Option<&Path>,
    constraints: Option<&Path>,
    template: &MigrationTemplate,
    indent: usize,
) -> Result<String> {
    let structure_dump = read_dump(Some(structure))?;
    let keys_dump = read_dump(keys)?;
    let constraints_dump = read_dump(constraints)?;

    translate_table(
        table,
        &structure_dump,
        &keys_dump,
        &constraints_dump,
        template,
        indent,
    )
    .with_context(|| format!("转换表 {table} 失败"))
}

/// 按命名规则把迁移写入输出目录
pub(crate) fn write_migration(
    out_dir: &Path,
    table: &str,
    content: &str,
    timestamp: Option<NaiveDateTime>,
) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("创建输出目录失败: {}", out_dir.display()))?;

    let path = out_dir.join(migration_file_name(table, timestamp));
    fs::write(&path, content).with_context(|| format!("写入迁移文件失败: {}", path.display()))?;
    Ok(path)
}

/// 当前本地时间，配置关闭时间前缀时返回 None
pub(crate) fn file_timestamp(app: &CliApp) -> Option<NaiveDateTime> {
    app.config
        .output
        .timestamp_prefix
        .then(|| chrono::Local::now().naive_local())
}

/// 转换单张表
pub fn run_generate(app: &CliApp, args: &GenerateArgs) -> Result<()> {
    info!("🔄 转换表: {}", args.table);

    let migration = translate_files(
        &args.table,
        &args.structure,
        args.keys.as_deref(),
        args.constraints.as_deref(),
        &app.template,
        app.config.output.indent,
    )?;

    if let Some(output) = &args.output {
        fs::write(output, &migration)
            .with_context(|| format!("写入迁移文件失败: {}", output.display()))?;
        info!("   ✅ 迁移已写入: {}", output.display());
    } else if args.write {
        let path = write_migration(
            &app.config.get_output_dir(),
            &args.table,
            &migration,
            file_timestamp(app),
        )?;
        info!("   ✅ 迁移已写入: {}", path.display());
    } else {
        print!("{migration}");
    }

    Ok(())
}
