// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::fmt::Display;

pub const INT_TYPE_NAME: &str = "int";
pub const BOOLEAN_TYPE_NAME: &str = "boolean";
pub const VOID_TYPE_NAME: &str = "void";
pub const STRING_TYPE_NAME: &str = "String";

/// Semantic type attached to every expression by the analyzer.
///
/// Arrays are one-dimensional: `int[]` is `Type { name: "int", is_array: true }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Type {
    pub name: String,
    pub is_array: bool,
}

impl Type {
    pub fn new(name: impl Into<String>, is_array: bool) -> Self {
        Self {
            name: name.into(),
            is_array,
        }
    }

    pub fn int() -> Self {
        Self::new(INT_TYPE_NAME, false)
    }

    pub fn boolean() -> Self {
        Self::new(BOOLEAN_TYPE_NAME, false)
    }

    pub fn void() -> Self {
        Self::new(VOID_TYPE_NAME, false)
    }

    pub fn string() -> Self {
        Self::new(STRING_TYPE_NAME, false)
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    pub fn array_of(elem_name: impl Into<String>) -> Self {
        Self::new(elem_name, true)
    }

    /// Element type of an array type. Non-array types are returned unchanged.
    pub fn element(&self) -> Type {
        Self::new(self.name.clone(), false)
    }

    pub fn is_int(&self) -> bool {
        !self.is_array && self.name == INT_TYPE_NAME
    }

    pub fn is_boolean(&self) -> bool {
        !self.is_array && self.name == BOOLEAN_TYPE_NAME
    }

    pub fn is_void(&self) -> bool {
        !self.is_array && self.name == VOID_TYPE_NAME
    }

    pub fn is_primitive(&self) -> bool {
        self.is_int() || self.is_boolean()
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_array {
            write!(f, "{}[]", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}
