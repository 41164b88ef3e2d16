use thiserror::Error;

use crate::schema::DumpKind;

pub type Result<T> = std::result::Result<T, MigrationError>;

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("配置错误: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("{stage}第 {line} 行格式错误: {reason} (原始内容: {row:?})")]
    MalformedRow {
        stage: DumpKind,
        line: usize,
        reason: String,
        row: String,
    },

    #[error("迁移模板错误: {0}")]
    Template(String),
}

impl MigrationError {
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    pub fn malformed_row(
        stage: DumpKind,
        line: usize,
        reason: impl Into<String>,
        row: impl Into<String>,
    ) -> Self {
        Self::MalformedRow {
            stage,
            line,
            reason: reason.into(),
            row: row.into(),
        }
    }
}
