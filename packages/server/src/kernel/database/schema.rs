//! Engine-neutral table definitions rendered to DDL by the dialect.

use super::value::SqlValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Bounded string, `VARCHAR(n)`.
    Text(u32),
    /// Unbounded free text.
    LongText,
    SmallInt,
    Integer,
    /// Engine-generated integer primary key.
    Identity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    Cascade,
    SetNull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: &'static str,
    pub column: &'static str,
    pub on_delete: OnDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
    pub primary_key: bool,
    pub not_null: bool,
    pub references: Option<ForeignKey>,
}

impl ColumnDef {
    pub const fn new(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            primary_key: false,
            not_null: false,
            references: None,
        }
    }

    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.not_null = true;
        self
    }

    pub const fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub const fn references(
        mut self,
        table: &'static str,
        column: &'static str,
        on_delete: OnDelete,
    ) -> Self {
        self.references = Some(ForeignKey {
            table,
            column,
            on_delete,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: Vec<ColumnDef>,
}

impl TableDef {
    pub fn new(name: &'static str, columns: Vec<ColumnDef>) -> Self {
        Self { name, columns }
    }
}

/// Column added to an existing table after its first release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddedColumn {
    pub table: &'static str,
    pub column: ColumnDef,
}

/// Reference rows inserted only while the table is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedSet {
    pub table: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<SqlValue>>,
}

/// Everything the bootstrapper ensures, in execution order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaPlan {
    /// Parents before children.
    pub tables: Vec<TableDef>,
    pub added_columns: Vec<AddedColumn>,
    pub seeds: Vec<SeedSet>,
}
