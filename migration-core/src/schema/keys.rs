use super::dump::KeyRow;
use super::types::{ColumnRecord, IndexRecord};
use crate::constants::keys::PRIMARY_KEY_NAME;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// 构建过程中的索引分组，列按 seq_in_index 排序
struct IndexGroup {
    name: String,
    unique: bool,
    columns: BTreeMap<usize, String>,
}

/// 按索引名分组构建索引定义
///
/// 单列主键且该列为自增列时不生成主键，Laravel 的 increments 会自动创建主键。
pub fn build_keys(rows: &[KeyRow], structure: &[ColumnRecord]) -> Vec<IndexRecord> {
    let mut groups: Vec<IndexGroup> = Vec::new();

    for row in rows {
        let index = match groups.iter().position(|g| g.name == row.key_name) {
            Some(index) => index,
            None => {
                groups.push(IndexGroup {
                    name: row.key_name.clone(),
                    unique: is_falsy(&row.non_unique),
                    columns: BTreeMap::new(),
                });
                groups.len() - 1
            }
        };
        groups[index]
            .columns
            .insert(row.seq_in_index, row.column_name.clone());
    }

    let mut keys: Vec<IndexRecord> = groups
        .into_iter()
        .map(|group| IndexRecord {
            name: group.name,
            unique: group.unique,
            columns: group.columns.into_values().collect(),
        })
        .collect();

    if primary_is_implicit(&keys, structure) {
        debug!("主键列为自增列，省略 primary() 定义");
        keys.retain(|k| k.name != PRIMARY_KEY_NAME);
    }

    info!("解析到 {} 个索引", keys.len());
    keys
}

/// 主键只有一列，且该列解析为 increments 系列方法
fn primary_is_implicit(keys: &[IndexRecord], structure: &[ColumnRecord]) -> bool {
    let Some(primary) = keys.iter().find(|k| k.name == PRIMARY_KEY_NAME) else {
        return false;
    };
    let [column_name] = primary.columns.as_slice() else {
        return false;
    };

    match structure.iter().find(|c| &c.field == column_name) {
        Some(column) => column.method.to_lowercase().contains("increments"),
        None => {
            debug!("主键列 {} 不在结构导出中，保留主键定义", column_name);
            false
        }
    }
}

/// 导出中的 non_unique 为空或 0 时视为假
fn is_falsy(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == "0"
}
