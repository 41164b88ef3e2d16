use super::constraints::build_constraints;
use super::dump::{parse_constraints_dump, parse_keys_dump, parse_structure_dump};
use super::formatter::{format_constraints, format_keys, format_structure, join_block};
use super::keys::build_keys;
use super::structure::build_structure;
use super::types::{ColumnRecord, ConstraintRecord, IndexRecord};
use crate::error::Result;
use crate::template::{MigrationTemplate, TemplateValues, class_name_for};
use tracing::info;

/// 渲染后的三个语句块
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBlocks {
    pub structure: String,
    pub keys: String,
    pub constraints: String,
}

/// 单张表的一次转换会话
///
/// 必须按结构、索引、外键的顺序加载：索引依赖结构判断自增主键，
/// 外键会移除同名索引。
#[derive(Debug, Clone)]
pub struct MigrationSession {
    table: String,
    structure: Vec<ColumnRecord>,
    keys: Vec<IndexRecord>,
    constraints: Vec<ConstraintRecord>,
}

impl MigrationSession {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            structure: Vec::new(),
            keys: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn structure(&self) -> &[ColumnRecord] {
        &self.structure
    }

    pub fn keys(&self) -> &[IndexRecord] {
        &self.keys
    }

    pub fn constraints(&self) -> &[ConstraintRecord] {
        &self.constraints
    }

    /// 加载结构导出
    pub fn load_structure(&mut self, content: &str) -> Result<&mut Self> {
        let rows = parse_structure_dump(content)?;
        self.structure = build_structure(&rows);
        Ok(self)
    }

    /// 加载索引导出
    pub fn load_keys(&mut self, content: &str) -> Result<&mut Self> {
        let rows = parse_keys_dump(content)?;
        self.keys = build_keys(&rows, &self.structure);
        Ok(self)
    }

    /// 加载外键导出
    pub fn load_constraints(&mut self, content: &str) -> Result<&mut Self> {
        let rows = parse_constraints_dump(content)?;
        self.constraints = build_constraints(&rows, &mut self.keys);
        Ok(self)
    }

    /// 渲染三个语句块
    pub fn render_blocks(&self, indent: usize) -> RenderedBlocks {
        RenderedBlocks {
            structure: join_block(&format_structure(&self.structure), indent),
            keys: join_block(&format_keys(&self.keys), indent),
            constraints: join_block(&format_constraints(&self.constraints), indent),
        }
    }

    /// 生成完整的迁移文件内容
    pub fn to_migration(&self, template: &MigrationTemplate, indent: usize) -> String {
        let blocks = self.render_blocks(indent);
        let class_name = class_name_for(&self.table);

        info!(
            "生成迁移 {}: {} 列, {} 个索引, {} 个外键",
            class_name,
            self.structure.len(),
            self.keys.len(),
            self.constraints.len()
        );

        template.render(&TemplateValues {
            class_name: &class_name,
            table_name: &self.table,
            structure: &blocks.structure,
            keys: &blocks.keys,
            constraints: &blocks.constraints,
        })
    }
}

/// 一次性完成单张表的转换
pub fn translate_table(
    table: &str,
    structure: &str,
    keys: &str,
    constraints: &str,
    template: &MigrationTemplate,
    indent: usize,
) -> Result<String> {
    let mut session = MigrationSession::new(table);
    session
        .load_structure(structure)?
        .load_keys(keys)?
        .load_constraints(constraints)?;

    Ok(session.to_migration(template, indent))
}
