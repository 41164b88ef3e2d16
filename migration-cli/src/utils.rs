/// # Migration CLI 日志系统使用说明
///
/// ## 基本原则
/// 1. **库代码只使用 `tracing` 宏**：`info!()`, `warn!()`, `error!()`, `debug!()`
/// 2. **应用入口控制日志配置**：在 `main.rs` 中调用 `setup_logging()`
/// 3. **生成结果与日志分离**：迁移代码输出到 stdout，日志输出到 stderr
///
/// ## 日志配置选项
///
/// - `-v, --verbose`：启用详细日志模式（DEBUG 级别）
/// - `RUST_LOG`：标准的 Rust 日志级别控制
/// - `MIGRATION_LOG_FILE`：日志文件路径，设置后日志输出到文件而非终端
///
/// ```bash
/// # 迁移输出到文件，日志输出到终端
/// migration-cli generate -t users -s users.tsv > create_users_table.php
///
/// # 查看每一列的类型解析过程
/// RUST_LOG=migration_core::schema=debug migration-cli generate -t users -s users.tsv
/// ```
pub const LOG_FILE_ENV: &str = "MIGRATION_LOG_FILE";

/// 设置日志记录系统
///
/// - 支持 RUST_LOG 环境变量控制日志级别
/// - 默认输出到stderr，避免与生成的迁移代码混淆
/// - 终端输出简洁格式，文件输出详细格式
pub fn setup_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // 根据verbose参数和环境变量确定日志级别
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 检查环境变量，决定是否输出到文件
    if let Ok(log_file) = std::env::var(LOG_FILE_ENV) {
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
        {
            Ok(file) => {
                // 输出到文件 - 使用详细格式便于调试
                fmt()
                    .with_env_filter(env_filter)
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .init();
                return;
            }
            Err(e) => {
                eprintln!("无法打开日志文件 {log_file}: {e}，改为输出到终端");
            }
        }
    }

    // 输出到终端 - 使用简洁格式，用户友好
    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false) // 不显示模块路径
        .with_line_number(false) // 不显示行号
        .without_time() // 不显示时间戳
        .compact() // 使用紧凑格式
        .init();
}
