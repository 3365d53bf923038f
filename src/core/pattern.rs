//! File-name pattern matching for the walker.

use globset::{GlobBuilder, GlobMatcher};

use super::error::WalkError;

/// A compiled, case-insensitive wildcard pattern (`*` and `?`) matched
/// against bare file names.
///
/// An empty pattern and the DOS-style `"*.*"` both mean "match every file".
/// The latter is special-cased because a literal glob `*.*` would reject
/// files without an extension, while the original desktop search treats
/// `*.*` as match-all.
#[derive(Debug, Clone)]
pub struct FilePattern {
    matcher: Option<GlobMatcher>,
}

impl FilePattern {
    /// Compiles a pattern string. `None`-like inputs (empty, whitespace,
    /// `"*.*"`) produce the match-all pattern.
    pub fn new(pattern: &str) -> Result<Self, WalkError> {
        let trimmed = pattern.trim();
        if trimmed.is_empty() || trimmed == "*.*" || trimmed == "*" {
            return Ok(Self { matcher: None });
        }

        let glob = GlobBuilder::new(trimmed)
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            matcher: Some(glob.compile_matcher()),
        })
    }

    /// The pattern that matches every file name.
    pub fn match_all() -> Self {
        Self { matcher: None }
    }

    pub fn is_match(&self, file_name: &str) -> bool {
        match &self.matcher {
            Some(matcher) => matcher.is_match(file_name),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn wildcard_star_matches_any_suffix() {
        let pattern = FilePattern::new("*.txt").unwrap();
        assert!(pattern.is_match("notes.txt"));
        assert!(pattern.is_match("NOTES.TXT"));
        assert!(!pattern.is_match("notes.log"));
    }

    #[test]
    fn question_mark_matches_single_character() {
        let pattern = FilePattern::new("file?.rs").unwrap();
        assert!(pattern.is_match("file1.rs"));
        assert!(pattern.is_match("fileA.rs"));
        assert!(!pattern.is_match("file10.rs"));
    }

    #[test]
    fn dos_star_dot_star_matches_extensionless_names() {
        let pattern = FilePattern::new("*.*").unwrap();
        assert!(pattern.is_match("Makefile"));
        assert!(pattern.is_match("a.b"));
    }

    #[test]
    fn invalid_glob_is_rejected_up_front() {
        assert!(matches!(
            FilePattern::new("a[unclosed"),
            Err(WalkError::Pattern(_))
        ));
    }

    proptest! {
        #[test]
        fn empty_and_star_dot_star_match_everything(name in "[a-zA-Z0-9._ -]{1,24}") {
            prop_assert!(FilePattern::new("").unwrap().is_match(&name));
            prop_assert!(FilePattern::new("*.*").unwrap().is_match(&name));
        }

        #[test]
        fn matching_is_case_insensitive(stem in "[a-z]{1,12}", ext in "[a-z]{1,4}") {
            let name = format!("{stem}.{ext}");
            let pattern = FilePattern::new(&format!("*.{}", ext.to_uppercase())).unwrap();
            prop_assert!(pattern.is_match(&name));
        }
    }
}
