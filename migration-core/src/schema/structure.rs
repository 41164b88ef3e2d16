use super::column_type::resolve_column_type;
use super::dump::StructureRow;
use super::types::{ColumnArgs, ColumnRecord};
use crate::constants::dump::{NULLABLE_YES, NULL_SENTINEL};
use tracing::{debug, info};

/// 由结构导出行构建列定义，并应用软删除、时间戳、remember token 识别
pub fn build_structure(rows: &[StructureRow]) -> Vec<ColumnRecord> {
    let mut columns: Vec<ColumnRecord> = Vec::with_capacity(rows.len());

    for row in rows {
        let record = column_from_row(row);

        // 重复的列名覆盖原记录，但保留原来的位置
        match columns.iter_mut().find(|c| c.field == record.field) {
            Some(existing) => {
                debug!("重复的列定义，覆盖: {}", record.field);
                *existing = record;
            }
            None => columns.push(record),
        }
    }

    let columns = apply_heuristics(columns);
    info!("解析到 {} 个列定义", columns.len());
    columns
}

fn column_from_row(row: &StructureRow) -> ColumnRecord {
    let resolved = resolve_column_type(&row.column_type, &row.extra);

    ColumnRecord {
        field: row.field.clone(),
        name: row.field.clone(),
        raw_type: row.column_type.clone(),
        method: resolved.method,
        args: resolved.args,
        unsigned: resolved.unsigned,
        nullable: row.null == NULLABLE_YES,
        default_value: (row.default != NULL_SENTINEL).then(|| row.default.clone()),
        comment: row.comment.replace(['\r', '\n'], "").trim().to_string(),
    }
}

/// 按固定顺序应用全部识别规则
pub fn apply_heuristics(columns: Vec<ColumnRecord>) -> Vec<ColumnRecord> {
    let columns = apply_soft_deletes(columns);
    let columns = apply_timestamps(columns);
    apply_remember_token(columns)
}

fn find_mut<'a>(columns: &'a mut [ColumnRecord], field: &str) -> Option<&'a mut ColumnRecord> {
    columns.iter_mut().find(|c| c.field == field)
}

fn has_method(columns: &[ColumnRecord], field: &str, method: &str) -> bool {
    columns
        .iter()
        .any(|c| c.field == field && c.method == method)
}

/// deleted_at timestamp -> softDeletes()
pub fn apply_soft_deletes(mut columns: Vec<ColumnRecord>) -> Vec<ColumnRecord> {
    if let Some(column) = find_mut(&mut columns, "deleted_at") {
        if column.method == "timestamp" {
            debug!("识别到软删除列 deleted_at");
            column.fold_into("softDeletes");
        }
    }
    columns
}

/// created_at + updated_at timestamp -> timestamps() / nullableTimestamps()
pub fn apply_timestamps(mut columns: Vec<ColumnRecord>) -> Vec<ColumnRecord> {
    if !has_method(&columns, "created_at", "timestamp")
        || !has_method(&columns, "updated_at", "timestamp")
    {
        return columns;
    }

    columns.retain(|c| c.field != "updated_at");
    if let Some(column) = find_mut(&mut columns, "created_at") {
        let method = if column.nullable {
            "nullableTimestamps"
        } else {
            "timestamps"
        };
        debug!("识别到时间戳列 created_at/updated_at -> {}", method);
        column.fold_into(method);
    }
    columns
}

/// remember_token varchar(100) NULL -> rememberToken()
pub fn apply_remember_token(mut columns: Vec<ColumnRecord>) -> Vec<ColumnRecord> {
    if let Some(column) = find_mut(&mut columns, "remember_token") {
        let is_token = column.method == "string"
            && column.nullable
            && column.args == ColumnArgs::Scalar("100".to_string());
        if is_token {
            debug!("识别到 remember_token 列");
            column.fold_into("rememberToken");
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(field: &str, column_type: &str, null: &str, default: &str) -> StructureRow {
        StructureRow {
            field: field.to_string(),
            column_type: column_type.to_string(),
            null: null.to_string(),
            key: String::new(),
            default: default.to_string(),
            extra: String::new(),
            comment: String::new(),
        }
    }

    #[test]
    fn test_column_attributes() {
        let mut comment_row = row("title", "varchar(120)", "YES", "untitled");
        comment_row.comment = "  标题\r\n".to_string();

        let columns = build_structure(&[comment_row, row("body", "text", "NO", "NULL")]);
        assert_eq!(columns.len(), 2);

        let title = &columns[0];
        assert_eq!(title.name, "title");
        assert_eq!(title.raw_type, "varchar(120)");
        assert_eq!(title.method, "string");
        assert!(title.nullable);
        assert_eq!(title.default_value.as_deref(), Some("untitled"));
        assert_eq!(title.comment, "标题");

        let body = &columns[1];
        assert!(!body.nullable);
        assert_eq!(body.default_value, None);
    }

    #[test]
    fn test_declaration_order_preserved() {
        let rows = [
            row("zeta", "int(11)", "NO", "NULL"),
            row("alpha", "int(11)", "NO", "NULL"),
            row("mid", "int(11)", "NO", "NULL"),
        ];
        let fields: Vec<String> = build_structure(&rows).into_iter().map(|c| c.field).collect();
        assert_eq!(fields, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_duplicate_field_replaced_in_place() {
        let rows = [
            row("a", "int(11)", "NO", "NULL"),
            row("b", "int(11)", "NO", "NULL"),
            row("a", "text", "NO", "NULL"),
        ];
        let columns = build_structure(&rows);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].field, "a");
        assert_eq!(columns[0].method, "text");
    }

    #[test]
    fn test_soft_deletes() {
        let columns = build_structure(&[row("deleted_at", "timestamp", "YES", "NULL")]);
        let column = &columns[0];
        assert_eq!(column.method, "softDeletes");
        assert!(column.name.is_empty());
        assert!(!column.nullable);
        assert_eq!(column.default_value, None);
        // 查找键保持不变
        assert_eq!(column.field, "deleted_at");
    }

    #[test]
    fn test_soft_deletes_requires_timestamp() {
        let columns = build_structure(&[row("deleted_at", "datetime", "YES", "NULL")]);
        assert_eq!(columns[0].method, "dateTime");
        assert_eq!(columns[0].name, "deleted_at");
    }

    #[test]
    fn test_timestamps_pair() {
        let columns = build_structure(&[
            row("id", "int(10) unsigned", "NO", "NULL"),
            row("created_at", "timestamp", "NO", "CURRENT_TIMESTAMP"),
            row("updated_at", "timestamp", "NO", "CURRENT_TIMESTAMP"),
        ]);
        assert_eq!(columns.len(), 2);
        assert!(columns.iter().all(|c| c.field != "updated_at"));
        assert_eq!(columns[1].method, "timestamps");
        assert!(columns[1].name.is_empty());
        assert_eq!(columns[1].default_value, None);
    }

    #[test]
    fn test_nullable_timestamps() {
        let columns = build_structure(&[
            row("created_at", "timestamp", "YES", "NULL"),
            row("updated_at", "timestamp", "YES", "NULL"),
        ]);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].method, "nullableTimestamps");
        assert!(!columns[0].nullable);
    }

    #[test]
    fn test_timestamps_need_both_columns() {
        let columns = build_structure(&[
            row("created_at", "timestamp", "NO", "NULL"),
            row("updated_at", "datetime", "NO", "NULL"),
        ]);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].method, "timestamp");
        assert_eq!(columns[0].name, "created_at");
    }

    #[test]
    fn test_remember_token() {
        let columns = build_structure(&[row("remember_token", "varchar(100)", "YES", "NULL")]);
        assert_eq!(columns[0].method, "rememberToken");
        assert!(columns[0].name.is_empty());
        assert!(!columns[0].nullable);
    }

    #[test]
    fn test_remember_token_conditions() {
        let not_null = build_structure(&[row("remember_token", "varchar(100)", "NO", "NULL")]);
        assert_eq!(not_null[0].method, "string");

        let wrong_length = build_structure(&[row("remember_token", "varchar(60)", "YES", "NULL")]);
        assert_eq!(wrong_length[0].method, "string");
    }
}
