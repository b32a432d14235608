//! Parsed-rule cache with fast hashing

use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::error::Result;
use crate::expr::ast::Node;
use crate::expr::evaluator::{self, Outcome, Record};
use crate::expr::parser;

/// Global parse cache keyed by rule text
static PARSE_CACHE: Lazy<RwLock<AHashMap<String, Node>>> = Lazy::new(|| {
    let map = AHashMap::with_capacity(512);
    RwLock::new(map)
});

/// Get or parse a rule string, using the cache for repeated rules
#[inline]
pub fn get_or_parse(rule: &str) -> Result<Node> {
    // Fast path: check read lock first
    {
        let cache = PARSE_CACHE.read();
        if let Some(ast) = cache.get(rule) {
            return Ok(ast.clone());
        }
    }

    // Slow path: parse and cache
    let ast = parser::parse(rule)?;

    {
        let mut cache = PARSE_CACHE.write();
        cache.insert(rule.to_string(), ast.clone());
    }

    Ok(ast)
}

/// Evaluate a raw rule string against a record, using the cached AST.
/// The `Err` side is a parse failure; evaluation problems come back as
/// `Outcome::Error`.
#[inline]
pub fn evaluate_str(rule: &str, record: &Record) -> Result<Outcome> {
    let ast = get_or_parse(rule)?;
    Ok(evaluator::evaluate(&ast, record))
}

/// Clear the parse cache (useful for testing)
pub fn clear_cache() {
    let mut cache = PARSE_CACHE.write();
    cache.clear();
}

/// Get cache statistics
pub fn cache_size() -> usize {
    let cache = PARSE_CACHE.read();
    cache.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ast::Value;

    // The cache is process-global and tests run concurrently, so these
    // assert on behavior for rule strings unique to each test rather than
    // on exact cache sizes.

    #[test]
    fn test_cache_hit_returns_same_result() {
        let mut record = Record::new();
        record.insert("age".to_string(), Value::Number(35.0));

        // First call misses, second call hits; both must agree
        let first = evaluate_str("age > 31", &record).unwrap();
        let second = evaluate_str("age > 31", &record).unwrap();

        assert_eq!(first, Outcome::Passed);
        assert_eq!(first, second);
        assert!(cache_size() >= 1);
    }

    #[test]
    fn test_parse_failures_surface_every_time() {
        assert!(get_or_parse("salary >=").is_err());
        assert!(get_or_parse("salary >=").is_err());
    }

    #[test]
    fn test_cached_ast_matches_direct_parse() {
        let rule = "(left > 1 OR middle = 2) AND right < 3";
        let direct = parser::parse(rule).unwrap();
        let cached = get_or_parse(rule).unwrap();

        assert_eq!(direct, cached);
    }

    #[test]
    fn test_clear_cache_keeps_working() {
        let _ = get_or_parse("tenure >= 4").unwrap();
        clear_cache();
        // A cleared cache simply re-parses
        let reparsed = get_or_parse("tenure >= 4").unwrap();
        assert_eq!(reparsed, parser::parse("tenure >= 4").unwrap());
    }
}
