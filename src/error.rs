//! Error types for the engine

use std::collections::TryReserveError;

use thiserror::Error;

/// Reasons a command line is rejected before it touches the store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("empty command line")]
    Empty,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("wrong number of arguments for '{command}' command: expected {expected}, got {actual}")]
    WrongArity {
        command: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("non-finite number for {field}: '{value}'")]
    NonFinite { field: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to allocate record '{code}': {source}")]
    Allocation {
        code: String,
        #[source]
        source: TryReserveError,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {reason}")]
    Load { path: String, reason: String },

    #[error("invalid value for [{section}] {key}: {reason}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_allocation_error_display() {
        let source = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();
        let err = StoreError::Allocation {
            code: "SP".to_string(),
            source,
        };

        let message = err.to_string();
        assert!(message.starts_with("failed to allocate record 'SP': "));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::WrongArity {
            command: "L",
            expected: 7,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "wrong number of arguments for 'L' command: expected 7, got 2"
        );
        assert_eq!(
            ParseError::UnknownCommand("D".to_string()).to_string(),
            "unknown command 'D'"
        );
    }
}
