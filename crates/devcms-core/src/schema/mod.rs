//! Schema introspection.

pub mod model;

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::error::{DevcmsError, DevcmsResult};
use devcms_db::queries::catalog::{self, ColumnRow, ForeignKeyRow, IndexRow, RelationshipRow};
use devcms_db::{DbPool, DbResult};
use model::{Column, ForeignKey, Index, Relationship, SchemaGraph, Table};

/// Catalog metadata queries the introspector depends on.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Every column of every base table, ordered by table then ordinal position.
    async fn columns(&self) -> DbResult<Vec<ColumnRow>>;

    async fn foreign_keys(&self, table: &str) -> DbResult<Vec<ForeignKeyRow>>;

    async fn indexes(&self, table: &str) -> DbResult<Vec<IndexRow>>;

    async fn relationships(&self) -> DbResult<Vec<RelationshipRow>>;
}

#[async_trait]
impl CatalogSource for DbPool {
    async fn columns(&self) -> DbResult<Vec<ColumnRow>> {
        catalog::list_columns(self).await
    }

    async fn foreign_keys(&self, table: &str) -> DbResult<Vec<ForeignKeyRow>> {
        catalog::list_foreign_keys(self, table).await
    }

    async fn indexes(&self, table: &str) -> DbResult<Vec<IndexRow>> {
        catalog::list_indexes(self, table).await
    }

    async fn relationships(&self) -> DbResult<Vec<RelationshipRow>> {
        catalog::list_relationships(self).await
    }
}

/// Builds a [`SchemaGraph`] from catalog metadata.
pub struct SchemaIntrospector<'a, S: CatalogSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: CatalogSource + ?Sized> SchemaIntrospector<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Read tables, columns, keys, indexes and relationships.
    ///
    /// Any catalog query failure aborts the whole introspection.
    pub async fn introspect(&self) -> DevcmsResult<SchemaGraph> {
        let tables = self.tables().await.map_err(DevcmsError::Introspection)?;
        let relationships = self
            .source
            .relationships()
            .await
            .map_err(DevcmsError::Introspection)?
            .into_iter()
            .map(Relationship::from_row)
            .collect::<Vec<_>>();

        info!(
            tables = tables.len(),
            relationships = relationships.len(),
            "schema introspected"
        );

        Ok(SchemaGraph {
            tables,
            relationships,
        })
    }

    async fn tables(&self) -> DbResult<Vec<Table>> {
        let rows = self.source.columns().await?;
        let mut tables = group_columns(rows);

        for table in &mut tables {
            table.foreign_keys = self
                .source
                .foreign_keys(&table.name)
                .await?
                .into_iter()
                .map(ForeignKey::from_row)
                .collect();
            table.indexes = self
                .source
                .indexes(&table.name)
                .await?
                .into_iter()
                .map(Index::from_row)
                .collect();
            debug!(
                table = %table.name,
                columns = table.columns.len(),
                foreign_keys = table.foreign_keys.len(),
                indexes = table.indexes.len(),
                "table introspected"
            );
        }

        Ok(tables)
    }
}

/// Group ordered column rows into tables, keeping first-seen table order.
fn group_columns(rows: Vec<ColumnRow>) -> Vec<Table> {
    let mut tables: Vec<Table> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let idx = match positions.get(&row.table_name) {
            Some(&idx) => idx,
            None => {
                tables.push(Table::new(row.table_name.clone()));
                positions.insert(row.table_name.clone(), tables.len() - 1);
                tables.len() - 1
            }
        };

        let column = Column::from_row(row);
        let table = &mut tables[idx];
        if column.is_primary_key {
            table.primary_key.push(column.name.clone());
        }
        table.columns.push(column);
    }

    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use devcms_db::DbError;
    use model::RelationshipType;

    fn column(table: &str, name: &str, data_type: &str, pk: bool, fk: bool) -> ColumnRow {
        ColumnRow {
            table_name: table.to_string(),
            column_name: name.to_string(),
            data_type: data_type.to_string(),
            is_nullable: !pk,
            column_default: None,
            character_maximum_length: None,
            numeric_precision: None,
            numeric_scale: None,
            is_primary_key: pk,
            is_foreign_key: fk,
        }
    }

    #[derive(Default)]
    struct FakeCatalog {
        fail_indexes: bool,
    }

    #[async_trait]
    impl CatalogSource for FakeCatalog {
        async fn columns(&self) -> DbResult<Vec<ColumnRow>> {
            Ok(vec![
                column("categories", "id", "uuid", true, false),
                column("categories", "name", "text", false, false),
                column("posts", "id", "uuid", true, false),
                column("posts", "category_id", "uuid", false, true),
                column("posts", "title", "text", false, false),
            ])
        }

        async fn foreign_keys(&self, table: &str) -> DbResult<Vec<ForeignKeyRow>> {
            if table != "posts" {
                return Ok(Vec::new());
            }
            Ok(vec![ForeignKeyRow {
                column_name: "category_id".to_string(),
                referenced_table: "categories".to_string(),
                referenced_column: "id".to_string(),
                constraint_name: "posts_category_id_fkey".to_string(),
            }])
        }

        async fn indexes(&self, table: &str) -> DbResult<Vec<IndexRow>> {
            if self.fail_indexes {
                return Err(DbError::OperationFailed("pg_index unavailable".to_string()));
            }
            Ok(vec![IndexRow {
                index_name: format!("{}_pkey", table),
                columns: vec!["id".to_string()],
                is_unique: true,
                index_type: "btree".to_string(),
            }])
        }

        async fn relationships(&self) -> DbResult<Vec<RelationshipRow>> {
            Ok(vec![RelationshipRow {
                table_name: "posts".to_string(),
                column_name: "category_id".to_string(),
                referenced_table: "categories".to_string(),
                referenced_column: "id".to_string(),
            }])
        }
    }

    #[tokio::test]
    async fn test_introspect_groups_tables_in_order() {
        let source = FakeCatalog::default();
        let schema = SchemaIntrospector::new(&source).introspect().await.unwrap();

        let names: Vec<_> = schema.tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["categories", "posts"]);

        let posts = schema.table("posts").unwrap();
        let cols: Vec<_> = posts.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(cols, vec!["id", "category_id", "title"]);
        assert_eq!(posts.primary_key, vec!["id".to_string()]);
        assert!(posts.columns[1].is_foreign_key);
        assert_eq!(posts.foreign_keys.len(), 1);
        assert_eq!(posts.foreign_keys[0].referenced_table, "categories");
        assert_eq!(posts.indexes[0].name, "posts_pkey");
        assert!(schema.table("categories").unwrap().foreign_keys.is_empty());
    }

    #[tokio::test]
    async fn test_relationships_are_one_to_many() {
        let source = FakeCatalog::default();
        let schema = SchemaIntrospector::new(&source).introspect().await.unwrap();
        assert_eq!(schema.relationships.len(), 1);
        assert_eq!(schema.relationships[0].relationship_type, RelationshipType::OneToMany);

        let json = serde_json::to_value(&schema.relationships[0]).unwrap();
        assert_eq!(json["type"], "one-to-many");
        assert_eq!(schema.relationships[0].relationship_type.to_string(), "one-to-many");
    }

    #[tokio::test]
    async fn test_catalog_failure_aborts() {
        let source = FakeCatalog { fail_indexes: true };
        let err = SchemaIntrospector::new(&source).introspect().await.unwrap_err();
        assert!(matches!(err, DevcmsError::Introspection(_)));
        assert!(err.to_string().starts_with("Schema introspection failed"));
    }
}
