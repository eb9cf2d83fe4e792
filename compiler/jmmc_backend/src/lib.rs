// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

pub mod stack;
pub mod descriptor;
pub mod codegen_jasmin;

use jmmc_errors::CompileResult;
use jmmc_ir::ir_class::{IRClass, IRMethod};

pub use codegen_jasmin::JasminGenerator;
pub use stack::StackDepth;

/// Parent trait for generating code.
pub trait CodeGenerator {
    /// Generate the whole output unit of a class.
    fn gen_class(&self, class: &IRClass) -> CompileResult<String>;

    /// Generate code for one method of `class`.
    fn gen_method(&self, class: &IRClass, method: &IRMethod) -> CompileResult<String>;
}
