// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use thiserror::Error;

/// Internal compiler errors. Programs reaching the backend are assumed
/// well-typed, so every variant here aborts generation of the whole unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// An IR shape or AST construct that has no translation rule.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    #[error("unknown variable '{name}' in method '{method}'")]
    UnknownVariable {
        method: String,
        name: String
    },

    #[error("unknown method '{0}'")]
    UnknownMethod(String),

    #[error("operand stack underflow in method '{method}'")]
    StackUnderflow {
        method: String
    },

    #[error("invalid literal '{0}'")]
    InvalidLiteral(String),
}

pub type CompileResult<T> = Result<T, CompileError>;

impl CompileError {
    pub fn not_implemented(what: impl Into<String>) -> Self {
        Self::NotImplemented(what.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CompileError::UnknownVariable {
            method: "main".into(),
            name: "x".into()
        };
        assert_eq!(err.to_string(), "unknown variable 'x' in method 'main'");

        let err = CompileError::not_implemented("newarray of boolean");
        assert_eq!(err.to_string(), "not implemented: newarray of boolean");
    }
}
