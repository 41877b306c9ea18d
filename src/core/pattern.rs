//! Name patterns for `--hide` and `--ignore`.
//!
//! Patterns are shell globs matched against the whole file name: `*`, `?`,
//! bracket classes with ranges and `!`/`^` negation, and `\` escapes.

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};

/// A compiled set of name globs. An empty set matches nothing.
#[derive(Debug, Clone)]
pub struct NamePatterns {
    set: GlobSet,
}

impl NamePatterns {
    /// Compile `patterns`. Patterns that fail to parse are skipped with a warning.
    pub fn new(patterns: &[String]) -> Self {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            match compile(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => tracing::warn!(pattern = %pattern, "ignoring invalid pattern: {}", e),
            }
        }
        let set = builder.build().unwrap_or_else(|e| {
            tracing::warn!("ignoring patterns: {}", e);
            GlobSet::empty()
        });
        NamePatterns { set }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    #[inline]
    pub fn is_match(&self, name: &str) -> bool {
        self.set.is_match(name)
    }
}

fn compile(pattern: &str) -> Result<Glob, globset::Error> {
    // `[^...]` is spelled `[!...]` in globset.
    let pattern = pattern.replace("[^", "[!");
    GlobBuilder::new(&pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
}

/// Does `name` match the single glob `pattern`? Invalid patterns match nothing.
pub fn glob_match(pattern: &str, name: &str) -> bool {
    compile(pattern).is_ok_and(|g| g.compile_matcher().is_match(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcards() {
        assert!(glob_match("*.rs", "main.rs"));
        assert!(glob_match("*", ""));
        assert!(glob_match("a*b*c", "aXXbYYc"));
        assert!(!glob_match("*.rs", "main.rsx"));
        assert!(glob_match("?.txt", "a.txt"));
        assert!(!glob_match("?.txt", "ab.txt"));
    }

    #[test]
    fn classes_and_ranges() {
        assert!(glob_match("[abc]*", "banana"));
        assert!(!glob_match("[!abc]*", "banana"));
        assert!(glob_match("[^abc]*", "zebra"));
        assert!(!glob_match("[^abc]*", "apple"));
        assert!(glob_match("file[0-9]", "file7"));
        assert!(!glob_match("file[0-9]", "fileX"));
    }

    #[test]
    fn escapes_and_case() {
        assert!(glob_match("\\*", "*"));
        assert!(!glob_match("\\*", "a"));
        assert!(glob_match("*~", "notes~"));
        assert!(!glob_match("*.MD", "readme.md"));
    }

    #[test]
    fn set_matches_any_pattern() {
        let set = NamePatterns::new(&["*.o".to_string(), "tmp".to_string()]);
        assert!(set.is_match("main.o"));
        assert!(set.is_match("tmp"));
        assert!(!set.is_match("tmp2"));
        assert!(NamePatterns::new(&[]).is_empty());
    }

    #[test]
    fn invalid_patterns_are_skipped() {
        let set = NamePatterns::new(&["a[".to_string(), "*.log".to_string()]);
        assert!(set.is_match("build.log"));
        assert!(!set.is_match("a["));
    }
}
