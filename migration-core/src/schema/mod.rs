mod column_type;
mod constraints;
mod dump;
mod formatter;
mod generator;
mod keys;
mod structure;
mod types;


// 重新导出公共接口
pub use column_type::{BaseType, ResolvedType, TypeParts, resolve_column_type, split_type};
pub use constraints::build_constraints;
pub use dump::{
    ConstraintRow, KeyRow, StructureRow, parse_constraints_dump, parse_keys_dump,
    parse_structure_dump,
};
pub use formatter::{
    escape_list, format_column, format_constraints, format_keys, format_structure,
    is_numeric_method, quote_literal,
};
pub use generator::{MigrationSession, RenderedBlocks, translate_table};
pub use keys::build_keys;
pub use structure::{
    apply_heuristics, apply_remember_token, apply_soft_deletes, apply_timestamps,
    build_structure,
};
pub use types::{ColumnArgs, ColumnRecord, ConstraintRecord, DumpKind, IndexRecord};

pub(crate) use column_type::ucfirst;
