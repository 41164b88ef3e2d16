/// Migration CLI 项目信息模块
///
/// 由于 migration-cli 是面向用户的主程序，项目元数据统一在这里定义
/// migration-core 作为内部库，只提供技术性常量

/// 项目元数据（自动从 migration-cli 的 Cargo.toml 同步）
pub mod metadata {
    /// 项目名称（自动从 Cargo.toml 同步）
    pub const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");

    /// 项目描述（自动从 Cargo.toml 同步）
    pub const PROJECT_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

    /// 项目作者（自动从 Cargo.toml 同步）
    pub const PROJECT_AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

    /// 用户友好的显示名称（手动维护，用于日志显示）
    pub mod display {
        /// CLI 工具的完整名称
        pub const CLI_FULL_NAME: &str = "Laravel Migration Exporter";

        /// 项目详细描述（比 Cargo.toml 中的描述更详细）
        pub const DESCRIPTION_LONG: &str = "读取 MySQL 表的结构、索引、外键三份制表符分隔导出，生成 Laravel Schema 迁移文件；自动识别自增主键、软删除、时间戳与 remember token 列";
    }
}

/// 版本信息
pub mod version_info {
    /// CLI 版本（自动从 Cargo.toml 同步）
    pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

    /// 核心库版本（从 migration-core 获取）
    pub const CORE_VERSION: &str = migration_core::constants::version::CORE_VERSION;
}

/// 启动时打印的版本横幅
pub fn banner() -> String {
    format!(
        "{} v{} (core v{})",
        metadata::display::CLI_FULL_NAME,
        version_info::CLI_VERSION,
        version_info::CORE_VERSION
    )
}
