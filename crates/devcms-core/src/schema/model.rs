//! Schema graph models.

use serde::{Deserialize, Serialize};

use devcms_db::queries::catalog::{ColumnRow, ForeignKeyRow, IndexRow, RelationshipRow};

/// In-memory snapshot of a database schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaGraph {
    pub tables: Vec<Table>,
    pub relationships: Vec<Relationship>,
}

impl SchemaGraph {
    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub primary_key: Vec<String>,
    pub foreign_keys: Vec<ForeignKey>,
    pub indexes: Vec<Index>,
}

impl Table {
    /// Create an empty table entry.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub nullable: bool,
    pub default_value: Option<String>,
    pub is_primary_key: bool,
    pub is_foreign_key: bool,
    pub max_length: Option<i32>,
    pub precision: Option<i32>,
    pub scale: Option<i32>,
}

impl Column {
    /// Create from database row.
    pub fn from_row(row: ColumnRow) -> Self {
        Self {
            name: row.column_name,
            data_type: row.data_type,
            nullable: row.is_nullable,
            default_value: row.column_default,
            is_primary_key: row.is_primary_key,
            is_foreign_key: row.is_foreign_key,
            max_length: row.character_maximum_length,
            precision: row.numeric_precision,
            scale: row.numeric_scale,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
    pub constraint_name: String,
}

impl ForeignKey {
    /// Create from database row.
    pub fn from_row(row: ForeignKeyRow) -> Self {
        Self {
            column: row.column_name,
            referenced_table: row.referenced_table,
            referenced_column: row.referenced_column,
            constraint_name: row.constraint_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub columns: Vec<String>,
    pub is_unique: bool,
    #[serde(rename = "type")]
    pub index_type: String,
}

impl Index {
    /// Create from database row.
    pub fn from_row(row: IndexRow) -> Self {
        Self {
            name: row.index_name,
            columns: row.columns,
            is_unique: row.is_unique,
            index_type: row.index_type,
        }
    }
}

/// Cardinality of a relationship edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipType {
    OneToOne,
    OneToMany,
    ManyToMany,
}

impl RelationshipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneToOne => "one-to-one",
            Self::OneToMany => "one-to-many",
            Self::ManyToMany => "many-to-many",
        }
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A foreign-key edge in the schema-wide relationship list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub table: String,
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,
}

impl Relationship {
    /// Create from database row.
    ///
    /// Every foreign key is reported as one-to-many; telling one-to-one and
    /// many-to-many apart would need uniqueness and join-table heuristics.
    pub fn from_row(row: RelationshipRow) -> Self {
        Self {
            table: row.table_name,
            column: row.column_name,
            referenced_table: row.referenced_table,
            referenced_column: row.referenced_column,
            relationship_type: RelationshipType::OneToMany,
        }
    }
}
