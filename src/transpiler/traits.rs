//! Transpiler traits and utilities.

/// Wrap an identifier in `quote`, doubling any embedded quote characters.
pub fn quote_with(name: &str, quote: char) -> String {
    let mut escaped = String::with_capacity(name.len() + 2);
    escaped.push(quote);
    for c in name.chars() {
        if c == quote {
            escaped.push(quote);
        }
        escaped.push(c);
    }
    escaped.push(quote);
    escaped
}

/// Trait for dialect-specific SQL generation.
pub trait SqlGenerator {
    /// Quote an identifier (table, column or alias name).
    fn quote_identifier(&self, name: &str) -> String;
    /// Generate the parameter placeholder (e.g., $1, ?) for the value at
    /// 1-based `index` in the bound value list.
    fn placeholder(&self, index: usize) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_with_escapes() {
        assert_eq!(quote_with("user", '"'), "\"user\"");
        assert_eq!(quote_with("we\"ird", '"'), "\"we\"\"ird\"");
        assert_eq!(quote_with("a`b", '`'), "`a``b`");
    }
}
