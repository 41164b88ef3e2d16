use super::types::{ColumnArgs, ColumnRecord, ConstraintRecord, IndexRecord};
use crate::constants::keys::PRIMARY_KEY_NAME;

/// 生成列定义语句
pub fn format_structure(columns: &[ColumnRecord]) -> Vec<String> {
    columns.iter().map(format_column).collect()
}

/// 生成单列定义语句，如 `$table->string('name', 255)->nullable();`
pub fn format_column(column: &ColumnRecord) -> String {
    let method = column.method.as_str();
    let mut line = format!("$table->{method}");

    if column.name.is_empty() {
        line.push_str("()");
    } else {
        line.push_str(&format!("({}", quote_literal(&column.name)));
        if method == "enum" {
            let values: Vec<String> = column.args.values().into_iter().map(enum_value).collect();
            line.push_str(&format!(", [{}]", values.join(", ")));
        } else if let Some(args) = render_column_args(&column.args) {
            line.push_str(&format!(", {args}"));
        }
        line.push(')');
    }

    if column.nullable {
        line.push_str("->nullable()");
    }

    if let Some(default) = &column.default_value {
        line.push_str(&format!("->default({})", render_default(method, default)));
    }

    if !column.comment.is_empty() {
        line.push_str(&format!("->comment({})", quote_literal(&column.comment)));
    }

    line.push(';');
    line
}

/// 列类型参数原样输出：多个参数使用数组形式，单个参数直接输出
fn render_column_args(args: &ColumnArgs) -> Option<String> {
    match args {
        ColumnArgs::None => None,
        ColumnArgs::Scalar(value) => Some(value.clone()),
        ColumnArgs::List(values) if values.len() == 1 => Some(values[0].clone()),
        ColumnArgs::List(values) => Some(format!("[{}]", values.join(", "))),
    }
}

/// 枚举值转为 PHP 字面量：去掉 SQL 转义（`''` 与反斜杠）后重新加引号，未加引号的值原样输出
fn enum_value(raw: &str) -> String {
    let Some(inner) = raw
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
    else {
        return raw.to_string();
    };

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\'' if chars.peek() == Some(&'\'') => {
                chars.next();
                value.push('\'');
            }
            '\\' => value.extend(chars.next()),
            _ => value.push(ch),
        }
    }
    quote_literal(&value)
}

/// 数值类方法：名称包含 integer，或是 decimal/double/float
pub fn is_numeric_method(method: &str) -> bool {
    method.to_lowercase().contains("integer") || matches!(method, "decimal" | "double" | "float")
}

/// 按列类型输出默认值
fn render_default(method: &str, default: &str) -> String {
    if is_numeric_method(method) {
        default.to_string()
    } else if method == "boolean" {
        let literal = if is_truthy(default) { "true" } else { "false" };
        literal.to_string()
    } else if default.trim().eq_ignore_ascii_case("current_timestamp") {
        "\\DB::raw('CURRENT_TIMESTAMP')".to_string()
    } else {
        quote_literal(default.trim())
    }
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty() || value == "0")
}

/// 生成索引语句
pub fn format_keys(keys: &[IndexRecord]) -> Vec<String> {
    keys.iter()
        .map(|key| {
            let columns = escape_list(&key.columns);
            if key.name == PRIMARY_KEY_NAME {
                format!("$table->primary({columns});")
            } else {
                let method = if key.unique { "unique" } else { "index" };
                format!("$table->{method}({columns}, {});", quote_literal(&key.name))
            }
        })
        .collect()
}

/// 生成外键语句
pub fn format_constraints(constraints: &[ConstraintRecord]) -> Vec<String> {
    constraints
        .iter()
        .map(|c| {
            format!(
                "$table->foreign({}, {})->references({})->on({})->onDelete({})->onUpdate({});",
                escape_list(std::slice::from_ref(&c.local_column)),
                quote_literal(&c.name),
                quote_literal(&c.referenced_column),
                quote_literal(&c.referenced_table),
                quote_literal(&c.on_delete),
                quote_literal(&c.on_update),
            )
        })
        .collect()
}

/// 单引号字符串字面量，转义反斜杠与单引号
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// 参数列表：单个元素直接输出，多个元素输出为数组；非数字元素逐个加引号转义
pub fn escape_list<S: AsRef<str>>(values: &[S]) -> String {
    let rendered: Vec<String> = values
        .iter()
        .map(|value| {
            let value = value.as_ref();
            if is_numeric(value) {
                value.to_string()
            } else {
                quote_literal(value)
            }
        })
        .collect();

    let joined = rendered.join(", ");
    if rendered.len() > 1 {
        format!("[{joined}]")
    } else {
        joined
    }
}

/// 十进制数字（可带符号、小数点与指数）
pub fn is_numeric(value: &str) -> bool {
    let value = value.trim_start();
    let value = value.strip_prefix(['+', '-']).unwrap_or(value);

    let (mantissa, exponent) = match value.find(['e', 'E']) {
        Some(pos) => (&value[..pos], Some(&value[pos + 1..])),
        None => (value, None),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (mantissa, ""),
    };
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(int_part)
        || !all_digits(frac_part)
        || (int_part.is_empty() && frac_part.is_empty())
    {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && all_digits(exp)
        }
    }
}

/// 拼接语句块：换行加缩进连接，去掉首尾空白后以换行结束
pub fn join_block(lines: &[String], indent: usize) -> String {
    let separator = format!("\n{}", " ".repeat(indent));
    format!("{}\n", lines.join(&separator).trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, method: &str, args: ColumnArgs) -> ColumnRecord {
        ColumnRecord {
            field: name.to_string(),
            name: name.to_string(),
            raw_type: String::new(),
            method: method.to_string(),
            args,
            unsigned: None,
            nullable: false,
            default_value: None,
            comment: String::new(),
        }
    }

    #[test]
    fn test_scalar_argument() {
        let c = column("name", "string", ColumnArgs::Scalar("255".to_string()));
        assert_eq!(format_column(&c), "$table->string('name', 255);");
    }

    #[test]
    fn test_list_argument_bracketed() {
        let c = column(
            "amount",
            "decimal",
            ColumnArgs::List(vec!["10".to_string(), "2".to_string()]),
        );
        assert_eq!(format_column(&c), "$table->decimal('amount', [10, 2]);");
    }

    #[test]
    fn test_enum_always_bracketed() {
        let single = column("status", "enum", ColumnArgs::Scalar("'on'".to_string()));
        assert_eq!(format_column(&single), "$table->enum('status', ['on']);");

        let many = column(
            "status",
            "enum",
            ColumnArgs::List(vec!["'a'".to_string(), "'b'".to_string()]),
        );
        assert_eq!(format_column(&many), "$table->enum('status', ['a', 'b']);");
    }

    #[test]
    fn test_enum_values_reescaped_for_php() {
        let column = column(
            "status",
            "enum",
            ColumnArgs::List(vec![
                "'it''s'".to_string(),
                "'back\\\\slash'".to_string(),
                "'x'".to_string(),
            ]),
        );
        assert_eq!(
            format_column(&column),
            "$table->enum('status', ['it\\'s', 'back\\\\slash', 'x']);"
        );
    }

    #[test]
    fn test_no_argument_call() {
        let mut c = column("created_at", "timestamps", ColumnArgs::None);
        c.name.clear();
        assert_eq!(format_column(&c), "$table->timestamps();");
    }

    #[test]
    fn test_nullable_and_comment() {
        let mut c = column("bio", "text", ColumnArgs::None);
        c.nullable = true;
        c.comment = "user's bio".to_string();
        assert_eq!(
            format_column(&c),
            "$table->text('bio')->nullable()->comment('user\\'s bio');"
        );
    }

    #[test]
    fn test_default_rendering() {
        let mut numeric = column("votes", "unsignedInteger", ColumnArgs::None);
        numeric.default_value = Some("0".to_string());
        assert_eq!(format_column(&numeric), "$table->unsignedInteger('votes')->default(0);");

        let mut price = column("price", "decimal", ColumnArgs::None);
        price.default_value = Some("9.99".to_string());
        assert!(format_column(&price).ends_with("->default(9.99);"));

        let mut flag = column("active", "boolean", ColumnArgs::None);
        flag.default_value = Some("1".to_string());
        assert!(format_column(&flag).ends_with("->default(true);"));
        flag.default_value = Some("0".to_string());
        assert!(format_column(&flag).ends_with("->default(false);"));

        let mut ts = column("seen_at", "timestamp", ColumnArgs::None);
        ts.default_value = Some("current_timestamp".to_string());
        assert!(format_column(&ts).ends_with("->default(\\DB::raw('CURRENT_TIMESTAMP'));"));

        let mut text = column("label", "string", ColumnArgs::None);
        text.default_value = Some("it's".to_string());
        assert!(format_column(&text).ends_with("->default('it\\'s');"));
    }

    #[test]
    fn test_numeric_method_detection() {
        assert!(is_numeric_method("integer"));
        assert!(is_numeric_method("unsignedBigInteger"));
        assert!(is_numeric_method("decimal"));
        assert!(is_numeric_method("float"));
        assert!(!is_numeric_method("increments"));
        assert!(!is_numeric_method("string"));
    }

    #[test]
    fn test_escape_list() {
        assert_eq!(escape_list(&["id"]), "'id'");
        assert_eq!(escape_list(&["a", "b"]), "['a', 'b']");
        assert_eq!(escape_list(&["it's"]), "'it\\'s'");
        assert_eq!(escape_list(&["10", "x"]), "[10, 'x']");
    }

    #[test]
    fn test_is_numeric() {
        for value in ["0", "42", "-7", "+3.5", ".5", "5.", "1e10", "2.5E-3"] {
            assert!(is_numeric(value), "{value}");
        }
        for value in ["", "abc", "1a", "e5", "1e", ".", "inf", "NaN"] {
            assert!(!is_numeric(value), "{value}");
        }
    }

    #[test]
    fn test_keys_and_constraints() {
        let keys = vec![
            IndexRecord {
                name: "PRIMARY".to_string(),
                unique: true,
                columns: vec!["id".to_string(), "tenant_id".to_string()],
            },
            IndexRecord {
                name: "idx_name".to_string(),
                unique: false,
                columns: vec!["name".to_string()],
            },
            IndexRecord {
                name: "uk_email".to_string(),
                unique: true,
                columns: vec!["email".to_string()],
            },
        ];
        assert_eq!(
            format_keys(&keys),
            vec![
                "$table->primary(['id', 'tenant_id']);",
                "$table->index('name', 'idx_name');",
                "$table->unique('email', 'uk_email');",
            ]
        );

        let constraints = vec![ConstraintRecord {
            name: "fk_posts_user".to_string(),
            local_column: "user_id".to_string(),
            referenced_table: "users".to_string(),
            referenced_column: "id".to_string(),
            on_update: "CASCADE".to_string(),
            on_delete: "RESTRICT".to_string(),
        }];
        assert_eq!(
            format_constraints(&constraints),
            vec![
                "$table->foreign('user_id', 'fk_posts_user')->references('id')->on('users')->onDelete('RESTRICT')->onUpdate('CASCADE');"
            ]
        );
    }

    #[test]
    fn test_join_block() {
        let lines = vec!["$table->a();".to_string(), "$table->b();".to_string()];
        assert_eq!(join_block(&lines, 4), "$table->a();\n    $table->b();\n");
        assert_eq!(join_block(&[], 12), "\n");
    }
}
