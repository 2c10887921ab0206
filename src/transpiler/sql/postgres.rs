use crate::transpiler::traits::{SqlGenerator, quote_with};

pub struct PostgresGenerator;

impl Default for PostgresGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PostgresGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl SqlGenerator for PostgresGenerator {
    fn quote_identifier(&self, name: &str) -> String {
        quote_with(name, '"')
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }
}
