use std::sync::Arc;

use dashmap::DashMap;

use crate::NumberFormat;

/// Cache of compiled patterns, keyed by the pattern string.
///
/// Compilation is deterministic, so a racing double-compile is harmless;
/// the entry API keeps a single compiled form per pattern.
#[derive(Debug, Default)]
pub struct FormatCache {
    compiled: DashMap<String, Arc<NumberFormat>>,
}

impl FormatCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the compiled form of `pattern`, compiling on first use.
    pub fn get(&self, pattern: &str) -> Arc<NumberFormat> {
        if let Some(fmt) = self.compiled.get(pattern) {
            return fmt.clone();
        }

        let fmt = Arc::new(NumberFormat::compile(pattern));
        let entry = self.compiled.entry(pattern.to_string());
        entry.or_insert(fmt).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_compiles_once_per_pattern() {
        let cache = FormatCache::new();
        let a = cache.get("###-#");
        let b = cache.get("###-#");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn distinct_patterns_get_distinct_entries() {
        let cache = FormatCache::new();
        let a = cache.get("###");
        let b = cache.get("000");
        assert_ne!(*a, *b);
    }
}
