//! `NAME=VALUE` env files, used to fill `${NAME}` placeholders while parsing.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::EnvError;

/// Name → value table for placeholder substitution.
pub type EnvMap = HashMap<String, String>;

/// Parse env text into a mapping.
///
/// Blank lines are skipped. Every other line is split on its first `=` and
/// both sides are trimmed, so `A = b=c` maps `A` to `b=c`. A later line for
/// the same name overrides an earlier one.
///
/// ```
/// let env = typeagen_core::env::load("HOST=example.com\n\nPORT = 8080\n").unwrap();
/// assert_eq!(env["HOST"], "example.com");
/// assert_eq!(env["PORT"], "8080");
/// ```
pub fn load(text: &str) -> Result<EnvMap, EnvError> {
    let mut vars = EnvMap::new();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (name, value) = line
            .split_once('=')
            .ok_or_else(|| EnvError::MissingSeparator {
                line: idx + 1,
                content: line.to_string(),
            })?;
        vars.insert(name.trim().to_string(), value.trim().to_string());
    }

    Ok(vars)
}

/// Read and parse an env file.
///
/// A file that cannot be read yields `Ok(None)`: the caller proceeds without
/// interpolation. Malformed content is still an error.
pub fn load_file(path: &Path) -> Result<Option<EnvMap>, EnvError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "env file unavailable, skipping interpolation");
            return Ok(None);
        }
    };
    let vars = load(&text)?;
    debug!(path = %path.display(), count = vars.len(), "loaded env file");
    Ok(Some(vars))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_lines_are_skipped() {
        let env = load("  \t\r\nA=1\n\n").unwrap();
        assert_eq!(env.len(), 1);
        assert_eq!(env["A"], "1");
    }

    #[test]
    fn splits_on_first_equals_only() {
        let env = load("URL=https://x.test/?a=b").unwrap();
        assert_eq!(env["URL"], "https://x.test/?a=b");
    }

    #[test]
    fn empty_value_is_allowed() {
        let env = load("EMPTY=").unwrap();
        assert_eq!(env["EMPTY"], "");
    }

    #[test]
    fn line_without_separator_is_reported() {
        let err = load("A=1\nBROKEN\n").unwrap_err();
        assert_eq!(
            err,
            EnvError::MissingSeparator {
                line: 2,
                content: "BROKEN".to_string()
            }
        );
    }

    #[test]
    fn missing_file_means_no_interpolation() {
        let result = load_file(Path::new("/definitely/not/here/.env")).unwrap();
        assert!(result.is_none());
    }
}
