#![forbid(unsafe_code)]

//! Widget-tree error model.
//!
//! Tree resolution is the only fallible operation in this crate. Following
//! the no-panic rule, a missing or mistyped node surfaces as a typed error
//! naming the offending path instead of a blocking wait or an unwrap.

use std::fmt;

/// Failure while resolving the console subtree from a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// No node is registered at the path.
    Missing {
        /// The path that was looked up.
        path: String,
    },
    /// A node exists at the path but has the wrong kind.
    Kind {
        /// The path that was looked up.
        path: String,
        /// The node kind the console expected there.
        expected: &'static str,
        /// The node kind actually registered there.
        found: &'static str,
    },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { path } => write!(f, "no widget at '{path}'"),
            Self::Kind {
                path,
                expected,
                found,
            } => {
                write!(f, "widget at '{path}' is not a {expected} (found {found})")
            }
        }
    }
}

impl std::error::Error for TreeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_names_path() {
        let err = TreeError::Missing {
            path: "Main/CommandLine".into(),
        };
        assert!(format!("{err}").contains("Main/CommandLine"));
    }

    #[test]
    fn kind_names_expectation_and_actual() {
        let err = TreeError::Kind {
            path: "console/main/output".into(),
            expected: "scroll frame",
            found: "label",
        };
        let msg = format!("{err}");
        assert!(msg.contains("console/main/output"));
        assert!(msg.contains("scroll frame"));
        assert!(msg.contains("label"));
    }
}
