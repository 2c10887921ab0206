use super::super::traits::{SqlGenerator, quote_with};

pub struct MysqlGenerator;

impl SqlGenerator for MysqlGenerator {
    fn quote_identifier(&self, id: &str) -> String {
        quote_with(id, '`')
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }
}
