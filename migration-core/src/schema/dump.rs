use super::types::DumpKind;
use crate::constants::dump::{
    CONSTRAINTS_FIELDS, FIELD_SEPARATOR, KEYS_FIELDS, STRUCTURE_FIELDS,
};
use crate::error::{MigrationError, Result};
use tracing::debug;

/// 结构导出中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct StructureRow {
    pub field: String,
    pub column_type: String,
    pub null: String,
    pub key: String,
    pub default: String,
    pub extra: String,
    pub comment: String,
}

/// 索引导出中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct KeyRow {
    pub table: String,
    pub non_unique: String,
    pub key_name: String,
    pub seq_in_index: usize,
    pub column_name: String,
    pub extra: String,
}

/// 外键导出中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintRow {
    pub constraint_name: String,
    pub column_name: String,
    pub referenced_table: String,
    pub referenced_column: String,
    pub update_rule: String,
    pub delete_rule: String,
}

/// 跳过表头与空行，返回 (行号, 行内容)，行号从 1 开始
fn data_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .skip(1)
        .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty())
}

fn split_exact(
    stage: DumpKind,
    line_no: usize,
    line: &str,
    expected: usize,
) -> Result<Vec<String>> {
    let fields: Vec<String> = line.split(FIELD_SEPARATOR).map(str::to_string).collect();
    if fields.len() != expected {
        return Err(MigrationError::malformed_row(
            stage,
            line_no,
            format!("应有 {expected} 个字段，实际 {} 个", fields.len()),
            line,
        ));
    }
    Ok(fields)
}

/// 解析结构导出（field, type, null, key, default, extra, comment）
pub fn parse_structure_dump(content: &str) -> Result<Vec<StructureRow>> {
    let mut rows = Vec::new();

    for (line_no, line) in data_lines(content) {
        let mut fields =
            split_exact(DumpKind::Structure, line_no, line, STRUCTURE_FIELDS)?.into_iter();
        let mut next = || fields.next().unwrap_or_default();

        rows.push(StructureRow {
            field: next(),
            column_type: next(),
            null: next(),
            key: next(),
            default: next(),
            extra: next(),
            comment: next(),
        });
    }

    debug!("结构导出解析到 {} 行", rows.len());
    Ok(rows)
}

/// 解析索引导出，前五列固定拆分，剩余内容整体作为 extra 保留
pub fn parse_keys_dump(content: &str) -> Result<Vec<KeyRow>> {
    let mut rows = Vec::new();

    for (line_no, line) in data_lines(content) {
        let fields: Vec<&str> = line.splitn(KEYS_FIELDS, FIELD_SEPARATOR).collect();
        if fields.len() != KEYS_FIELDS {
            return Err(MigrationError::malformed_row(
                DumpKind::Keys,
                line_no,
                format!("应至少有 {KEYS_FIELDS} 个字段，实际 {} 个", fields.len()),
                line,
            ));
        }

        let seq_in_index = fields[3]
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|seq| *seq > 0)
            .ok_or_else(|| {
                MigrationError::malformed_row(
                    DumpKind::Keys,
                    line_no,
                    format!("seq_in_index 必须是正整数: {:?}", fields[3]),
                    line,
                )
            })?;

        rows.push(KeyRow {
            table: fields[0].to_string(),
            non_unique: fields[1].to_string(),
            key_name: fields[2].to_string(),
            seq_in_index,
            column_name: fields[4].to_string(),
            extra: fields[5].to_string(),
        });
    }

    debug!("索引导出解析到 {} 行", rows.len());
    Ok(rows)
}

/// 解析外键导出
pub fn parse_constraints_dump(content: &str) -> Result<Vec<ConstraintRow>> {
    let mut rows = Vec::new();

    for (line_no, line) in data_lines(content) {
        let mut fields =
            split_exact(DumpKind::Constraints, line_no, line, CONSTRAINTS_FIELDS)?.into_iter();
        let mut next = || fields.next().unwrap_or_default();

        rows.push(ConstraintRow {
            constraint_name: next(),
            column_name: next(),
            referenced_table: next(),
            referenced_column: next(),
            update_rule: next(),
            delete_rule: next(),
        });
    }

    debug!("外键导出解析到 {} 行", rows.len());
    Ok(rows)
}
