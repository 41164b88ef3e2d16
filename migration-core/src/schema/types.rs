use std::fmt;

/// 导出文件类型，用于错误定位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpKind {
    Structure,
    Keys,
    Constraints,
}

impl DumpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DumpKind::Structure => "结构导出",
            DumpKind::Keys => "索引导出",
            DumpKind::Constraints => "外键导出",
        }
    }
}

impl fmt::Display for DumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 列类型参数
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColumnArgs {
    #[default]
    None,
    Scalar(String),
    List(Vec<String>),
}

impl ColumnArgs {
    /// 按出现顺序返回全部参数
    pub fn values(&self) -> Vec<&str> {
        match self {
            ColumnArgs::None => Vec::new(),
            ColumnArgs::Scalar(value) => vec![value.as_str()],
            ColumnArgs::List(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// 表列定义（结构导出中的一行经过类型解析后的结果）
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRecord {
    /// 导出中声明的列名，用于查找
    pub field: String,
    /// 生成代码时使用的列名，为空表示无参数调用（如 `timestamps()`）
    pub name: String,
    pub raw_type: String,
    pub method: String,
    pub args: ColumnArgs,
    pub unsigned: Option<bool>,
    pub nullable: bool,
    pub default_value: Option<String>,
    pub comment: String,
}

impl ColumnRecord {
    /// 折叠为无参数的 DSL 调用
    pub(crate) fn fold_into(&mut self, method: &str) {
        self.method = method.to_string();
        self.args = ColumnArgs::None;
        self.default_value = None;
        self.nullable = false;
        self.name.clear();
    }
}

/// 表索引定义
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRecord {
    pub name: String,
    pub unique: bool,
    pub columns: Vec<String>,
}

/// 外键约束定义
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintRecord {
    pub name: String,
    pub local_column: String,
    pub referenced_table: String,
    pub referenced_column: String,
    pub on_update: String,
    pub on_delete: String,
}
