//! Schema provider types.
//!
//! Table and column names come from outside the query tree. Anything that can
//! name a table and enumerate its columns implements [`SchemaProvider`];
//! [`SchemaRegistry`] is a ready-made provider loaded from TOML.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ast::Node;
use crate::error::{QueryError, QueryResult};

/// A column descriptor: the logical field name and the database column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ColumnSpec")]
pub struct ColumnDef {
    pub name: String,
    pub column: String,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
        }
    }

    /// A column whose logical name is the database column.
    pub fn plain(column: impl Into<String>) -> Self {
        let column = column.into();
        Self {
            name: column.clone(),
            column,
        }
    }
}

/// Columns may be written as `"id"` or `{ name = "user", column = "user_id" }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColumnSpec {
    Plain(String),
    Mapped { name: String, column: String },
}

impl From<ColumnSpec> for ColumnDef {
    fn from(spec: ColumnSpec) -> Self {
        match spec {
            ColumnSpec::Plain(column) => ColumnDef::plain(column),
            ColumnSpec::Mapped { name, column } => ColumnDef::new(name, column),
        }
    }
}

/// Supplies a table name and its column descriptors.
pub trait SchemaProvider {
    fn table_name(&self) -> &str;
    fn columns(&self) -> Vec<ColumnDef>;
}

/// Table schema definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnDef>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    pub fn from_provider(provider: &(impl SchemaProvider + ?Sized)) -> Self {
        Self::new(provider.table_name(), provider.columns())
    }

    /// Resolve a field name to `(column, row_key)`.
    ///
    /// A logical name wins over a column name.
    pub fn resolve(&self, key: &str) -> Option<(String, String)> {
        if let Some(c) = self.columns.iter().find(|c| c.name == key) {
            return Some((c.column.clone(), c.name.clone()));
        }
        self.columns
            .iter()
            .find(|c| c.column == key)
            .map(|c| (c.column.clone(), c.column.clone()))
    }
}

impl SchemaProvider for TableSchema {
    fn table_name(&self) -> &str {
        &self.name
    }

    fn columns(&self) -> Vec<ColumnDef> {
        self.columns.clone()
    }
}

/// A many-to-many link table and its two foreign-key columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkTable {
    pub table: String,
    pub source: ColumnDef,
    pub target: ColumnDef,
}

impl LinkTable {
    pub fn new(table: impl Into<String>, source: ColumnDef, target: ColumnDef) -> Self {
        Self {
            table: table.into(),
            source,
            target,
        }
    }
}

impl SchemaProvider for LinkTable {
    fn table_name(&self) -> &str {
        &self.table
    }

    fn columns(&self) -> Vec<ColumnDef> {
        vec![self.source.clone(), self.target.clone()]
    }
}

/// Schema section of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default)]
    pub tables: Vec<TableSchema>,
    #[serde(default)]
    pub links: Vec<LinkTable>,
}

/// Named table and link-table schemas.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    tables: HashMap<String, TableSchema>,
    links: HashMap<String, LinkTable>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: SchemaConfig) -> Self {
        let mut registry = Self::new();
        for table in config.tables {
            tracing::debug!("Loaded schema for table: {}", table.name);
            registry.add_table(table);
        }
        for link in config.links {
            tracing::debug!("Loaded schema for link table: {}", link.table);
            registry.add_link(link);
        }
        registry
    }

    /// Load schemas from a TOML file with `[[tables]]` and `[[links]]` entries.
    pub fn load_from_file(path: impl AsRef<Path>) -> QueryResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: SchemaConfig = toml::from_str(&content).map_err(|e| {
            QueryError::Config(format!("Failed to parse schema {}: {}", path.display(), e))
        })?;
        let registry = Self::from_config(config);
        tracing::info!(
            "Loaded {} table schemas from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    pub fn add_table(&mut self, schema: TableSchema) {
        self.tables.insert(schema.name.clone(), schema);
    }

    pub fn add_link(&mut self, link: LinkTable) {
        self.links.insert(link.table.clone(), link);
    }

    pub fn len(&self) -> usize {
        self.tables.len() + self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn provider(&self, name: &str) -> QueryResult<&dyn SchemaProvider> {
        if let Some(table) = self.tables.get(name) {
            return Ok(table as &dyn SchemaProvider);
        }
        self.links
            .get(name)
            .map(|link| link as &dyn SchemaProvider)
            .ok_or_else(|| QueryError::UnknownTable(name.to_string()))
    }

    /// Build a fresh table node. Every call yields a new identity, so calling
    /// this twice gives two independently aliased references.
    pub fn table(&self, name: &str) -> QueryResult<Node> {
        let provider = self.provider(name)?;
        Ok(Node::table(&TableSchema::from_provider(provider)))
    }

    /// Table schemas sorted by name.
    pub fn tables(&self) -> Vec<&TableSchema> {
        let mut tables: Vec<_> = self.tables.values().collect();
        tables.sort_by(|a, b| a.name.cmp(&b.name));
        tables
    }

    /// Link tables sorted by name.
    pub fn links(&self) -> Vec<&LinkTable> {
        let mut links: Vec<_> = self.links.values().collect();
        links.sort_by(|a, b| a.table.cmp(&b.table));
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"
[[tables]]
name = "user"
columns = ["id", "username"]

[[tables]]
name = "post"
columns = ["id", "title", { name = "user", column = "user_id" }]

[[links]]
table = "group_members"
source = { name = "group", column = "group_id" }
target = { name = "user", column = "user_id" }
"#;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::from_config(toml::from_str(SCHEMA).unwrap())
    }

    #[test]
    fn test_parse_schema_config() {
        let config: SchemaConfig = toml::from_str(SCHEMA).unwrap();
        assert_eq!(config.tables.len(), 2);
        assert_eq!(config.tables[1].columns[2], ColumnDef::new("user", "user_id"));
        assert_eq!(config.tables[0].columns[0], ColumnDef::plain("id"));
        assert_eq!(config.links[0].source.column, "group_id");
    }

    #[test]
    fn test_resolve_prefers_name() {
        let schema = TableSchema::new(
            "t",
            vec![ColumnDef::new("a", "b"), ColumnDef::new("b", "c")],
        );
        assert_eq!(schema.resolve("b"), Some(("c".to_string(), "b".to_string())));
        assert_eq!(schema.resolve("c"), Some(("c".to_string(), "c".to_string())));
        assert_eq!(schema.resolve("x"), None);
    }

    #[test]
    fn test_registry_lookup() {
        let registry = registry();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.provider("post").unwrap().table_name(), "post");
        assert_eq!(registry.provider("group_members").unwrap().columns().len(), 2);
        assert!(matches!(
            registry.table("comment"),
            Err(QueryError::UnknownTable(name)) if name == "comment"
        ));
    }

    #[test]
    fn test_registry_tables_are_distinct_nodes() {
        let registry = registry();
        let a = registry.table("user").unwrap();
        let b = registry.table("user").unwrap();
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn test_link_table_fields() {
        let registry = registry();
        let members = registry.table("group_members").unwrap();
        assert_eq!(members.field("user").unwrap().row_key(), Some("user"));
        assert_eq!(members.field("group_id").unwrap().row_key(), Some("group_id"));
        assert!(members.field("id").is_err());
    }

    #[test]
    fn test_sorted_listing() {
        let registry = registry();
        let names: Vec<_> = registry.tables().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["post", "user"]);
    }
}
