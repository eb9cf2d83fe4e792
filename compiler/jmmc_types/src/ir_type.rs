// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::collections::HashMap;
use std::fmt::Display;

use lazy_static::lazy_static;

use crate::ty::*;

/// Type suffix used by the three-address IR (`.i32`, `.bool`, `.array.i32`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IrType {
    I32,
    Bool,
    Void,
    String,
    Class(String),
    Array(Box<IrType>),
}

lazy_static! {
    static ref BUILTIN_SUFFIXES: HashMap<&'static str, IrType> = {
        let mut table = HashMap::new();
        table.insert(INT_TYPE_NAME, IrType::I32);
        table.insert(BOOLEAN_TYPE_NAME, IrType::Bool);
        table.insert(VOID_TYPE_NAME, IrType::Void);
        table.insert(STRING_TYPE_NAME, IrType::String);
        table
    };
}

impl IrType {
    /// Translates a semantic type name into its suffix. Unknown names are
    /// class types.
    pub fn from_type_name(name: &str) -> Self {
        BUILTIN_SUFFIXES
            .get(name)
            .cloned()
            .unwrap_or_else(|| IrType::Class(name.to_string()))
    }

    pub fn array_of(elem: IrType) -> Self {
        IrType::Array(Box::new(elem))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, IrType::Void)
    }

    /// Values of this type live in an `a*` slot on the JVM.
    pub fn is_reference(&self) -> bool {
        matches!(self, IrType::String | IrType::Class(_) | IrType::Array(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, IrType::Array(_))
    }

    pub fn element(&self) -> Option<&IrType> {
        match self {
            IrType::Array(elem) => Some(elem),
            _ => None,
        }
    }

    /// Class name of a class-typed value, if any.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            IrType::Class(name) => Some(name),
            _ => None,
        }
    }
}

impl From<&Type> for IrType {
    fn from(ty: &Type) -> Self {
        let base = IrType::from_type_name(&ty.name);
        if ty.is_array {
            IrType::array_of(base)
        } else {
            base
        }
    }
}

impl Display for IrType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IrType::I32 => write!(f, ".i32"),
            IrType::Bool => write!(f, ".bool"),
            IrType::Void => write!(f, ".V"),
            IrType::String => write!(f, ".String"),
            IrType::Class(name) => write!(f, ".{name}"),
            IrType::Array(elem) => write!(f, ".array{elem}"),
        }
    }
}
