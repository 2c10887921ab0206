use super::super::traits::{SqlGenerator, quote_with};

pub struct SqliteGenerator;

impl SqlGenerator for SqliteGenerator {
    fn quote_identifier(&self, id: &str) -> String {
        quote_with(id, '"')
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }
}
