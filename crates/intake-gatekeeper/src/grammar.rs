//! Exact-match field grammars

use crate::GatekeeperError;
use regex::Regex;

/// A compiled grammar that must consume the entire candidate
///
/// The configured pattern is wrapped as `\A(?:pattern)\z`, so partial matches,
/// leading or trailing whitespace and trailing newlines are all rejected.
#[derive(Debug, Clone)]
pub struct FieldGrammar {
    source: String,
    regex: Regex,
}

impl FieldGrammar {
    /// Compile a grammar
    ///
    /// # Examples
    ///
    /// ```
    /// use intake_gatekeeper::FieldGrammar;
    ///
    /// let grammar = FieldGrammar::new(r"03[0-9]{9}|\+92[0-9]{10}").unwrap();
    /// assert!(grammar.matches("03207673078"));
    /// assert!(!grammar.matches("my number is 03207673078"));
    /// assert!(!grammar.matches("03207673078\n"));
    /// ```
    pub fn new(pattern: &str) -> Result<Self, GatekeeperError> {
        if pattern.is_empty() {
            return Err(GatekeeperError::Config("pattern must not be empty".to_string()));
        }

        let regex = Regex::new(&format!(r"\A(?:{})\z", pattern)).map_err(|e| {
            GatekeeperError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// True if `value` matches the grammar in full
    pub fn matches(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// The pattern as configured (unanchored)
    pub fn pattern(&self) -> &str {
        &self.source
    }
}
