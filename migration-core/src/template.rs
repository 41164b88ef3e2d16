use crate::constants::output::{TIMESTAMP_FORMAT, placeholders};
use crate::error::{MigrationError, Result};
use chrono::NaiveDateTime;
use std::fs;
use std::path::Path;

const BUILTIN_TEMPLATE: &str = include_str!("../templates/create.stub");

/// 迁移文件模板
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationTemplate {
    content: String,
}

/// 模板替换内容
#[derive(Debug, Clone, Default)]
pub struct TemplateValues<'a> {
    pub class_name: &'a str,
    pub table_name: &'a str,
    pub structure: &'a str,
    pub keys: &'a str,
    pub constraints: &'a str,
}

impl MigrationTemplate {
    /// 内置的 Laravel create 模板
    pub fn builtin() -> Self {
        Self {
            content: BUILTIN_TEMPLATE.to_string(),
        }
    }

    /// 从文件加载自定义模板，模板中至少要有类名占位符
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        Self::from_content(content)
    }

    pub fn from_content(content: impl Into<String>) -> Result<Self> {
        let content = content.into();
        if !content.contains(placeholders::CLASS) {
            return Err(MigrationError::template(format!(
                "模板缺少类名占位符 {}",
                placeholders::CLASS
            )));
        }
        Ok(Self { content })
    }

    /// 按占位符一次性替换，替换进去的内容不会再被扫描
    pub fn render(&self, values: &TemplateValues<'_>) -> String {
        let replacements: [(&str, &str); 5] = [
            (placeholders::CLASS, values.class_name),
            (placeholders::TABLE, values.table_name),
            (placeholders::STRUCTURE, values.structure),
            (placeholders::KEYS, values.keys),
            (placeholders::CONSTRAINTS, values.constraints),
        ];

        let mut output = String::with_capacity(self.content.len());
        let mut rest = self.content.as_str();

        while !rest.is_empty() {
            // 找到最靠前的占位符，位置相同时取先声明的
            let next = replacements
                .iter()
                .filter_map(|(placeholder, value)| {
                    rest.find(placeholder).map(|pos| (pos, *placeholder, *value))
                })
                .min_by_key(|(pos, _, _)| *pos);

            match next {
                Some((pos, placeholder, value)) => {
                    output.push_str(&rest[..pos]);
                    output.push_str(value);
                    rest = &rest[pos + placeholder.len()..];
                }
                None => {
                    output.push_str(rest);
                    break;
                }
            }
        }

        output
    }
}

impl Default for MigrationTemplate {
    fn default() -> Self {
        Self::builtin()
    }
}

/// 表名转 StudlyCase，`-` 与 `_` 视为单词边界
pub fn studly(value: &str) -> String {
    value
        .replace(['-', '_'], " ")
        .split_whitespace()
        .map(crate::schema::ucfirst)
        .collect()
}

/// 迁移类名：Create + StudlyCase(表名) + Table
pub fn class_name_for(table: &str) -> String {
    format!("Create{}Table", studly(table))
}

/// 迁移文件名：可选时间前缀 + create_<表名>_table.php
pub fn migration_file_name(table: &str, timestamp: Option<NaiveDateTime>) -> String {
    let base = format!("create_{}_table.php", table.to_lowercase());
    match timestamp {
        Some(ts) => format!("{}_{}", ts.format(TIMESTAMP_FORMAT), base),
        None => base,
    }
}
