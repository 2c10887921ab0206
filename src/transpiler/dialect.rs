use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::transpiler::sql::mysql::MysqlGenerator;
use crate::transpiler::sql::postgres::PostgresGenerator;
use crate::transpiler::sql::sqlite::SqliteGenerator;
use crate::transpiler::traits::SqlGenerator;

/// Supported SQL Dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Postgres,
    #[serde(rename = "sqlite")]
    SQLite,
    #[serde(rename = "mysql")]
    MySQL,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::Postgres
    }
}

impl Dialect {
    pub fn generator(&self) -> Box<dyn SqlGenerator> {
        match self {
            Dialect::Postgres => Box::new(PostgresGenerator),
            Dialect::SQLite => Box::new(SqliteGenerator),
            Dialect::MySQL => Box::new(MysqlGenerator),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Postgres => write!(f, "postgres"),
            Dialect::SQLite => write!(f, "sqlite"),
            Dialect::MySQL => write!(f, "mysql"),
        }
    }
}

impl FromStr for Dialect {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            "sqlite" => Ok(Dialect::SQLite),
            "mysql" | "mariadb" => Ok(Dialect::MySQL),
            other => Err(QueryError::Config(format!(
                "Unknown dialect: '{}'. Expected: postgres, sqlite or mysql",
                other
            ))),
        }
    }
}
