use super::dump::ConstraintRow;
use super::types::{ConstraintRecord, IndexRecord};
use tracing::{debug, info};

/// 构建外键约束，并移除与外键同名的索引
///
/// 同名外键以最后一行为准，位置保持首次出现的位置。
pub fn build_constraints(
    rows: &[ConstraintRow],
    keys: &mut Vec<IndexRecord>,
) -> Vec<ConstraintRecord> {
    let mut constraints: Vec<ConstraintRecord> = Vec::new();

    for row in rows {
        let before = keys.len();
        keys.retain(|k| k.name != row.constraint_name);
        if keys.len() != before {
            debug!("外键 {} 覆盖同名索引", row.constraint_name);
        }

        let record = ConstraintRecord {
            name: row.constraint_name.clone(),
            local_column: row.column_name.clone(),
            referenced_table: row.referenced_table.clone(),
            referenced_column: row.referenced_column.clone(),
            on_update: row.update_rule.clone(),
            on_delete: row.delete_rule.clone(),
        };

        match constraints.iter_mut().find(|c| c.name == record.name) {
            Some(existing) => *existing = record,
            None => constraints.push(record),
        }
    }

    info!("解析到 {} 个外键约束", constraints.len());
    constraints
}
