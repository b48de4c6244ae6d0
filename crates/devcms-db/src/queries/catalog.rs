//! Catalog queries used for schema introspection.

use crate::pool::{DbPool, DbResult};

/// One column of one base table, with its key participation flags.
#[derive(Debug, Clone)]
pub struct ColumnRow {
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
    pub is_nullable: bool,
    pub column_default: Option<String>,
    pub character_maximum_length: Option<i32>,
    pub numeric_precision: Option<i32>,
    pub numeric_scale: Option<i32>,
    pub is_primary_key: bool,
    pub is_foreign_key: bool,
}

/// One foreign-key edge out of a table.
#[derive(Debug, Clone)]
pub struct ForeignKeyRow {
    pub column_name: String,
    pub referenced_table: String,
    pub referenced_column: String,
    pub constraint_name: String,
}

/// One index on a table.
#[derive(Debug, Clone)]
pub struct IndexRow {
    pub index_name: String,
    pub columns: Vec<String>,
    pub is_unique: bool,
    pub index_type: String,
}

/// One foreign-key edge anywhere in the schema.
#[derive(Debug, Clone)]
pub struct RelationshipRow {
    pub table_name: String,
    pub column_name: String,
    pub referenced_table: String,
    pub referenced_column: String,
}

/// List every column of every base table in the schema, ordered by table then ordinal position.
pub async fn list_columns(pool: &DbPool) -> DbResult<Vec<ColumnRow>> {
    let rows = pool
        .client()
        .query(
            "SELECT
                t.table_name::text AS table_name,
                c.column_name::text AS column_name,
                c.data_type::text AS data_type,
                (c.is_nullable = 'YES') AS is_nullable,
                c.column_default::text AS column_default,
                c.character_maximum_length::int4 AS character_maximum_length,
                c.numeric_precision::int4 AS numeric_precision,
                c.numeric_scale::int4 AS numeric_scale,
                EXISTS (
                    SELECT 1
                    FROM information_schema.table_constraints tc
                    JOIN information_schema.key_column_usage ku
                      ON tc.constraint_name = ku.constraint_name
                     AND tc.constraint_schema = ku.constraint_schema
                    WHERE tc.constraint_type = 'PRIMARY KEY'
                      AND ku.table_schema = c.table_schema
                      AND ku.table_name = c.table_name
                      AND ku.column_name = c.column_name
                ) AS is_primary_key,
                EXISTS (
                    SELECT 1
                    FROM information_schema.table_constraints tc
                    JOIN information_schema.key_column_usage ku
                      ON tc.constraint_name = ku.constraint_name
                     AND tc.constraint_schema = ku.constraint_schema
                    WHERE tc.constraint_type = 'FOREIGN KEY'
                      AND ku.table_schema = c.table_schema
                      AND ku.table_name = c.table_name
                      AND ku.column_name = c.column_name
                ) AS is_foreign_key
             FROM information_schema.tables t
             JOIN information_schema.columns c
               ON t.table_schema = c.table_schema
              AND t.table_name = c.table_name
             WHERE t.table_schema = $1::text
               AND t.table_type = 'BASE TABLE'
             ORDER BY t.table_name, c.ordinal_position",
            &[&pool.schema()],
        )
        .await?;

    rows.iter()
        .map(|row| -> DbResult<ColumnRow> {
            Ok(ColumnRow {
                table_name: row.try_get("table_name")?,
                column_name: row.try_get("column_name")?,
                data_type: row.try_get("data_type")?,
                is_nullable: row.try_get("is_nullable")?,
                column_default: row.try_get("column_default")?,
                character_maximum_length: row.try_get("character_maximum_length")?,
                numeric_precision: row.try_get("numeric_precision")?,
                numeric_scale: row.try_get("numeric_scale")?,
                is_primary_key: row.try_get("is_primary_key")?,
                is_foreign_key: row.try_get("is_foreign_key")?,
            })
        })
        .collect()
}

/// List the foreign keys declared on one table.
pub async fn list_foreign_keys(pool: &DbPool, table_name: &str) -> DbResult<Vec<ForeignKeyRow>> {
    let rows = pool
        .client()
        .query(
            "SELECT
                kcu.column_name::text AS column_name,
                ccu.table_name::text AS referenced_table,
                ccu.column_name::text AS referenced_column,
                tc.constraint_name::text AS constraint_name
             FROM information_schema.table_constraints tc
             JOIN information_schema.key_column_usage kcu
               ON tc.constraint_name = kcu.constraint_name
              AND tc.constraint_schema = kcu.constraint_schema
             JOIN information_schema.constraint_column_usage ccu
               ON ccu.constraint_name = tc.constraint_name
              AND ccu.constraint_schema = tc.constraint_schema
             WHERE tc.constraint_type = 'FOREIGN KEY'
               AND tc.table_schema = $1::text
               AND tc.table_name = $2::text
             ORDER BY tc.constraint_name, kcu.ordinal_position",
            &[&pool.schema(), &table_name],
        )
        .await?;

    rows.iter()
        .map(|row| -> DbResult<ForeignKeyRow> {
            Ok(ForeignKeyRow {
                column_name: row.try_get("column_name")?,
                referenced_table: row.try_get("referenced_table")?,
                referenced_column: row.try_get("referenced_column")?,
                constraint_name: row.try_get("constraint_name")?,
            })
        })
        .collect()
}

/// List the indexes on one table, columns ordered by attribute number.
pub async fn list_indexes(pool: &DbPool, table_name: &str) -> DbResult<Vec<IndexRow>> {
    let rows = pool
        .client()
        .query(
            "SELECT
                i.relname::text AS index_name,
                array_agg(a.attname::text ORDER BY a.attnum) AS columns,
                ix.indisunique AS is_unique,
                am.amname::text AS index_type
             FROM pg_class t
             JOIN pg_namespace n ON n.oid = t.relnamespace
             JOIN pg_index ix ON t.oid = ix.indrelid
             JOIN pg_class i ON i.oid = ix.indexrelid
             JOIN pg_am am ON i.relam = am.oid
             JOIN pg_attribute a ON a.attrelid = t.oid AND a.attnum = ANY(ix.indkey)
             WHERE n.nspname = $1::text
               AND t.relname = $2::text
               AND t.relkind = 'r'
             GROUP BY i.relname, ix.indisunique, am.amname
             ORDER BY i.relname",
            &[&pool.schema(), &table_name],
        )
        .await?;

    rows.iter()
        .map(|row| -> DbResult<IndexRow> {
            Ok(IndexRow {
                index_name: row.try_get("index_name")?,
                columns: row.try_get("columns")?,
                is_unique: row.try_get("is_unique")?,
                index_type: row.try_get("index_type")?,
            })
        })
        .collect()
}

/// List every foreign-key edge in the schema.
pub async fn list_relationships(pool: &DbPool) -> DbResult<Vec<RelationshipRow>> {
    let rows = pool
        .client()
        .query(
            "SELECT
                tc.table_name::text AS table_name,
                kcu.column_name::text AS column_name,
                ccu.table_name::text AS referenced_table,
                ccu.column_name::text AS referenced_column
             FROM information_schema.table_constraints tc
             JOIN information_schema.key_column_usage kcu
               ON tc.constraint_name = kcu.constraint_name
              AND tc.constraint_schema = kcu.constraint_schema
             JOIN information_schema.constraint_column_usage ccu
               ON ccu.constraint_name = tc.constraint_name
              AND ccu.constraint_schema = tc.constraint_schema
             WHERE tc.constraint_type = 'FOREIGN KEY'
               AND tc.table_schema = $1::text
             ORDER BY tc.table_name, kcu.column_name",
            &[&pool.schema()],
        )
        .await?;

    rows.iter()
        .map(|row| -> DbResult<RelationshipRow> {
            Ok(RelationshipRow {
                table_name: row.try_get("table_name")?,
                column_name: row.try_get("column_name")?,
                referenced_table: row.try_get("referenced_table")?,
                referenced_column: row.try_get("referenced_column")?,
            })
        })
        .collect()
}
