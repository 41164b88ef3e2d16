use super::generate::{file_timestamp, translate_files, write_migration};
use crate::app::CliApp;
use anyhow::{Context, Result, anyhow};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info, warn};
use walkdir::WalkDir;

/// 批量转换结果
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(String, String)>,
}

impl BatchReport {
    /// 有表转换失败时返回错误
    pub fn into_result(self) -> Result<()> {
        if self.failed.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("{} 张表转换失败", self.failed.len()))
        }
    }
}

/// 单张表的导出文件位置
#[derive(Debug, Clone)]
struct TableDump {
    table: String,
    structure: PathBuf,
    keys: Option<PathBuf>,
    constraints: Option<PathBuf>,
}

/// 扫描导出目录：每个直接子目录是一张表，目录名即表名
fn discover_tables(app: &CliApp, dir: &Path) -> Result<Vec<TableDump>> {
    let mut tables = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("遍历导出目录失败: {}", dir.display()))?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let table = entry.file_name().to_string_lossy().to_string();
        let table_dir = entry.path();
        let structure = table_dir.join(&app.config.dump.structure_file);
        if !structure.exists() {
            warn!("⚠️  跳过 {}: 缺少结构导出 {}", table, structure.display());
            continue;
        }

        let optional = |name: &str| Some(table_dir.join(name)).filter(|p| p.exists());
        tables.push(TableDump {
            keys: optional(&app.config.dump.keys_file),
            constraints: optional(&app.config.dump.constraints_file),
            table,
            structure,
        });
    }

    Ok(tables)
}

/// 并行转换目录下的所有表，单表失败不影响其他表
pub async fn run_batch(app: &CliApp, dir: &Path, out_dir: &Path) -> Result<BatchReport> {
    let tables = discover_tables(app, dir)?;
    info!("📦 发现 {} 张表，开始批量转换", tables.len());

    let template = Arc::new(app.template.clone());
    let indent = app.config.output.indent;
    let timestamp = file_timestamp(app);
    let out_dir = Arc::new(out_dir.to_path_buf());

    let mut tasks = JoinSet::new();
    for dump in tables {
        let template = Arc::clone(&template);
        let out_dir = Arc::clone(&out_dir);

        tasks.spawn_blocking(move || {
            let result = translate_files(
                &dump.table,
                &dump.structure,
                dump.keys.as_deref(),
                dump.constraints.as_deref(),
                &template,
                indent,
            )
            .and_then(|migration| write_migration(&out_dir, &dump.table, &migration, timestamp));
            (dump.table, result)
        });
    }

    let mut report = BatchReport::default();
    while let Some(joined) = tasks.join_next().await {
        let (table, result) = joined.context("转换任务异常退出")?;
        match result {
            Ok(path) => {
                info!("   ✅ {} -> {}", table, path.display());
                report.written.push(path);
            }
            Err(e) => {
                error!("   ❌ {}: {:#}", table, e);
                report.failed.push((table, format!("{e:#}")));
            }
        }
    }

    report.written.sort();
    report.failed.sort();
    info!(
        "批量转换完成: 成功 {} 张, 失败 {} 张",
        report.written.len(),
        report.failed.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration_core::MigrationTemplate;
    use migration_core::config::AppConfig;
    use std::fs;
    use tempfile::tempdir;

    const STRUCTURE: &str = "Field\tType\tNull\tKey\tDefault\tExtra\tComment\n\
                             id\tbigint(20) unsigned\tNO\tPRI\tNULL\tauto_increment\t\n";

    fn app() -> CliApp {
        let mut config = AppConfig::default();
        config.output.timestamp_prefix = false;
        CliApp {
            config,
            template: MigrationTemplate::builtin(),
        }
    }

    #[tokio::test]
    async fn test_batch_translates_each_table_directory() {
        let temp_dir = tempdir().unwrap();
        let dumps = temp_dir.path().join("dumps");
        for table in ["posts", "users"] {
            fs::create_dir_all(dumps.join(table)).unwrap();
            fs::write(dumps.join(table).join("structure.tsv"), STRUCTURE).unwrap();
        }
        fs::write(
            dumps.join("posts").join("keys.tsv"),
            "header\nposts\t1\tidx_id\t1\tid\t\n",
        )
        .unwrap();
        // 没有结构导出的目录会被跳过
        fs::create_dir_all(dumps.join("empty")).unwrap();

        let out_dir = temp_dir.path().join("out");
        let report = run_batch(&app(), &dumps, &out_dir).await.unwrap();

        assert!(report.failed.is_empty());
        assert_eq!(
            report.written,
            vec![
                out_dir.join("create_posts_table.php"),
                out_dir.join("create_users_table.php"),
            ]
        );

        let posts = fs::read_to_string(out_dir.join("create_posts_table.php")).unwrap();
        assert!(posts.contains("$table->bigIncrements('id');"));
        assert!(posts.contains("$table->index('id', 'idx_id');"));
    }

    #[tokio::test]
    async fn test_batch_reports_failed_table() {
        let temp_dir = tempdir().unwrap();
        let dumps = temp_dir.path().join("dumps");
        fs::create_dir_all(dumps.join("good")).unwrap();
        fs::create_dir_all(dumps.join("bad")).unwrap();
        fs::write(dumps.join("good").join("structure.tsv"), STRUCTURE).unwrap();
        fs::write(dumps.join("bad").join("structure.tsv"), "header\nid\tint\n").unwrap();

        let out_dir = temp_dir.path().join("out");
        let report = run_batch(&app(), &dumps, &out_dir).await.unwrap();

        assert_eq!(report.written.len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "bad");
        assert!(report.into_result().is_err());
    }
}
