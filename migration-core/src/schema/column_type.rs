use super::types::ColumnArgs;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// 类型字符串: 基础类型，其后是可选的括号参数与尾部修饰（如 unsigned）
static TYPE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)(.*)$").expect("类型字符串正则表达式无效"));

/// 支持的 MySQL 基础列类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseType {
    Int,
    BigInt,
    MediumInt,
    SmallInt,
    TinyInt,
    Blob,
    Char,
    Date,
    DateTime,
    Decimal,
    Double,
    Float,
    LongText,
    MediumText,
    TinyText,
    Text,
    Varchar,
    Enum,
    Time,
    Timestamp,
    Json,
    Unknown(String),
}

impl BaseType {
    pub fn parse(value: &str) -> Self {
        let lower = value.to_lowercase();
        match lower.as_str() {
            "int" => BaseType::Int,
            "bigint" => BaseType::BigInt,
            "mediumint" => BaseType::MediumInt,
            "smallint" => BaseType::SmallInt,
            "tinyint" => BaseType::TinyInt,
            "blob" => BaseType::Blob,
            "char" => BaseType::Char,
            "date" => BaseType::Date,
            "datetime" => BaseType::DateTime,
            "decimal" => BaseType::Decimal,
            "double" => BaseType::Double,
            "float" => BaseType::Float,
            "longtext" => BaseType::LongText,
            "mediumtext" => BaseType::MediumText,
            "tinytext" => BaseType::TinyText,
            "text" => BaseType::Text,
            "varchar" => BaseType::Varchar,
            "enum" => BaseType::Enum,
            "time" => BaseType::Time,
            "timestamp" => BaseType::Timestamp,
            "json" => BaseType::Json,
            _ => BaseType::Unknown(lower),
        }
    }

    /// 整数类型对应的基础方法名
    fn integer_method(&self) -> Option<&'static str> {
        match self {
            BaseType::Int => Some("integer"),
            BaseType::BigInt => Some("bigInteger"),
            BaseType::MediumInt => Some("mediumInteger"),
            BaseType::SmallInt => Some("smallInteger"),
            BaseType::TinyInt => Some("tinyInteger"),
            _ => None,
        }
    }

    /// 固定映射的方法名，以及是否保留参数
    fn fixed_method(&self) -> Option<(&'static str, bool)> {
        let mapping = match self {
            BaseType::Blob => ("binary", true),
            BaseType::Char => ("char", true),
            BaseType::Date => ("date", false),
            BaseType::DateTime => ("dateTime", true),
            BaseType::Decimal => ("decimal", true),
            BaseType::Double => ("double", true),
            BaseType::Float => ("float", true),
            BaseType::LongText => ("longText", true),
            BaseType::MediumText => ("mediumText", true),
            BaseType::TinyText => ("tinyText", true),
            BaseType::Text => ("text", true),
            BaseType::Varchar => ("string", true),
            BaseType::Enum => ("enum", true),
            BaseType::Time => ("time", true),
            BaseType::Timestamp => ("timestamp", true),
            BaseType::Json => ("json", true),
            _ => return None,
        };
        Some(mapping)
    }
}

/// 拆分后的类型字符串
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParts {
    pub base: String,
    pub args: ColumnArgs,
    pub modifiers: Option<String>,
}

/// 类型解析结果
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedType {
    pub base: BaseType,
    pub method: String,
    pub args: ColumnArgs,
    /// 仅 boolean 特例会设置（明确表示丢弃符号信息）
    pub unsigned: Option<bool>,
}

/// 拆分类型字符串，无法匹配或括号未闭合时返回 None
pub fn split_type(raw_type: &str) -> Option<TypeParts> {
    let captures = TYPE_PATTERN.captures(raw_type.trim())?;

    let base = captures.get(1)?.as_str().to_string();
    let rest = captures.get(2).map(|m| m.as_str()).unwrap_or_default();

    let (body, modifiers) = match rest.strip_prefix('(') {
        Some(inner) => {
            let close = closing_paren(inner)?;
            (&inner[..close], &inner[close + 1..])
        }
        None => ("", rest),
    };
    let modifiers = Some(modifiers.trim())
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    Some(TypeParts {
        base,
        args: parse_args(body),
        modifiers,
    })
}

/// 引号外第一个 `)` 的字节位置
fn closing_paren(inner: &str) -> Option<usize> {
    let mut in_string = false;
    let mut escape_next = false;

    for (pos, ch) in inner.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape_next = true,
            '\'' => in_string = !in_string,
            ')' if !in_string => return Some(pos),
            _ => {}
        }
    }
    None
}

/// 解析括号内参数：含逗号时拆分为列表，否则为单值，空则无参数
pub fn parse_args(body: &str) -> ColumnArgs {
    if body.trim().is_empty() {
        return ColumnArgs::None;
    }
    if !body.contains(',') {
        return ColumnArgs::Scalar(body.to_string());
    }
    ColumnArgs::List(split_quoted_list(body))
}

/// 按逗号拆分，引号内的逗号不拆分，元素保留原样（含引号）
pub fn split_quoted_list(body: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut escape_next = false;

    for ch in body.chars() {
        if escape_next {
            current.push(ch);
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => {
                current.push(ch);
                escape_next = true;
            }
            '\'' => {
                // 连续两个单引号在 SQL 中表示转义，来回切换两次状态不变
                in_string = !in_string;
                current.push(ch);
            }
            ',' if !in_string => {
                values.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    values.push(current.trim().to_string());

    values
}

/// 解析列类型，映射为 Laravel 迁移方法
///
/// `extra` 为结构导出中的 Extra 列（如 `auto_increment`）。
/// 不支持的类型返回 `UNKNOWN:<type>` 方法，从不失败。
pub fn resolve_column_type(raw_type: &str, extra: &str) -> ResolvedType {
    let Some(parts) = split_type(raw_type) else {
        warn!("无法解析的列类型: {:?}", raw_type);
        return unknown(BaseType::Unknown(raw_type.trim().to_lowercase()));
    };

    let base = BaseType::parse(&parts.base);
    let resolved = dispatch(base, parts.args, parts.modifiers.as_deref(), extra);
    debug!("列类型 {} -> {}", raw_type, resolved.method);
    resolved
}

fn dispatch(
    base: BaseType,
    args: ColumnArgs,
    modifiers: Option<&str>,
    extra: &str,
) -> ResolvedType {
    // tinyint(1) 必须先于通用整数规则处理
    if base == BaseType::TinyInt && is_boolean_width(&args) {
        return ResolvedType {
            base,
            method: "boolean".to_string(),
            args: ColumnArgs::None,
            unsigned: Some(false),
        };
    }

    if let Some(method) = base.integer_method() {
        let method = integer_method(method, modifiers, extra);
        return ResolvedType {
            base,
            method,
            args: ColumnArgs::None,
            unsigned: None,
        };
    }

    match base.fixed_method() {
        Some((method, keep_args)) => ResolvedType {
            method: method.to_string(),
            args: if keep_args { args } else { ColumnArgs::None },
            base,
            unsigned: None,
        },
        None => {
            warn!("不支持的列类型: {:?}，需要手动处理", base);
            unknown(base)
        }
    }
}

fn is_boolean_width(args: &ColumnArgs) -> bool {
    matches!(args, ColumnArgs::Scalar(width) if width.trim() == "1")
}

fn integer_method(method: &str, modifiers: Option<&str>, extra: &str) -> String {
    if extra.contains("auto_increment") {
        method.replace("nteger", "ncrements")
    } else if modifiers.is_some_and(|m| m.contains("unsigned")) {
        format!("unsigned{}", ucfirst(method))
    } else {
        method.to_string()
    }
}

fn unknown(base: BaseType) -> ResolvedType {
    let name = match &base {
        BaseType::Unknown(name) => name.clone(),
        other => format!("{other:?}").to_lowercase(),
    };
    ResolvedType {
        method: format!("UNKNOWN:{name}"),
        args: ColumnArgs::None,
        base,
        unsigned: None,
    }
}

/// 首字母大写
pub(crate) fn ucfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
