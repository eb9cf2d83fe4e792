// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::fmt::Display;

use itertools::Itertools;
use jmmc_types::Type;

use crate::Symbol;

/// Declared signature and scope of one method of the current class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,
    pub is_static: bool,
    pub is_varargs: bool,
    pub return_type: Type,
    pub params: Vec<Symbol>,
    pub locals: Vec<Symbol>,
}

impl MethodInfo {
    pub fn param(&self, name: &str) -> Option<&Symbol> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn local(&self, name: &str) -> Option<&Symbol> {
        self.locals.iter().find(|l| l.name == name)
    }

    /// Locals and parameters shadow fields of the same name.
    pub fn declares(&self, name: &str) -> bool {
        self.param(name).is_some() || self.local(name).is_some()
    }

    /// Type of the variadic parameter (always an array type), if any.
    pub fn varargs_type(&self) -> Option<&Type> {
        if self.is_varargs {
            self.params.last().map(|p| &p.ty)
        } else {
            None
        }
    }

    /// Number of parameters preceding the variadic one.
    pub fn fixed_arity(&self) -> usize {
        if self.is_varargs {
            self.params.len().saturating_sub(1)
        } else {
            self.params.len()
        }
    }
}

impl Display for MethodInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = self.params
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .join(", ");
        write!(f, "{} {}({})", self.return_type, self.name, params)
    }
}
