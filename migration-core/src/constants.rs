/// 导出数据相关常量
pub mod dump {
    /// 字段分隔符
    pub const FIELD_SEPARATOR: char = '\t';

    /// 结构导出中表示“无默认值”的占位文本
    pub const NULL_SENTINEL: &str = "NULL";

    /// 结构导出中表示可空的取值
    pub const NULLABLE_YES: &str = "YES";

    /// 结构导出的列数: field, type, null, key, default, extra, comment
    pub const STRUCTURE_FIELDS: usize = 7;

    /// 索引导出的列数: table, non_unique, key_name, seq_in_index, column_name, extra
    pub const KEYS_FIELDS: usize = 6;

    /// 外键导出的列数: constraint_name, column_name, referenced_table, referenced_column,
    /// update_rule, delete_rule
    pub const CONSTRAINTS_FIELDS: usize = 6;

    /// 默认的结构导出文件名
    pub const DEFAULT_STRUCTURE_FILE: &str = "structure.tsv";

    /// 默认的索引导出文件名
    pub const DEFAULT_KEYS_FILE: &str = "keys.tsv";

    /// 默认的外键导出文件名
    pub const DEFAULT_CONSTRAINTS_FILE: &str = "constraints.tsv";
}

/// 索引相关常量
pub mod keys {
    /// MySQL 主键索引的保留名称
    pub const PRIMARY_KEY_NAME: &str = "PRIMARY";
}

/// 迁移输出相关常量
pub mod output {
    /// 每条生成语句前的默认缩进空格数
    pub const DEFAULT_INDENT: usize = 12;

    /// 默认的迁移文件输出目录
    pub const DEFAULT_DIRECTORY: &str = "migrations";

    /// 迁移文件名时间前缀格式
    pub const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M%S";

    /// 模板占位符
    pub mod placeholders {
        pub const CLASS: &str = "DummyClass";
        pub const TABLE: &str = "DummyTable";
        pub const STRUCTURE: &str = "// structure";
        pub const KEYS: &str = "// keys";
        pub const CONSTRAINTS: &str = "// constraints";
    }
}

/// 配置文件相关常量
pub mod config {
    /// 配置文件查找顺序
    pub const CONFIG_FILE_CANDIDATES: &[&str] = &["migration.toml", ".migration.toml"];
}

/// 版本相关常量
pub mod version {
    /// 核心库版本
    pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
}
