// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use jmmc_symbol::{MethodInfo, Symbol};
use jmmc_types::IrType;

/// Holds method-specific context during AST-to-IR conversion.
#[derive(Debug)]
pub struct FnCtx {
    /// Declarations of the method being lowered.
    pub method: MethodInfo,

    /// Suffix used by every `ret` of the method.
    pub ret: IrType,
}

impl FnCtx {
    pub fn new(method: MethodInfo) -> Self {
        let ret = IrType::from(&method.return_type);
        Self { method, ret }
    }

    pub fn name(&self) -> &str {
        &self.method.name
    }

    pub fn is_static(&self) -> bool {
        self.method.is_static
    }

    /// Parameters and locals shadow fields.
    pub fn declares(&self, name: &str) -> bool {
        self.method.declares(name)
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.method.local(name).or_else(|| self.method.param(name))
    }
}
