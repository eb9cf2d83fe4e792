// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

mod method;

use std::cell::RefCell;
use std::rc::Rc;

use jmmc_ctx::{CodegenOptions, CompilerCtx};
use jmmc_errors::CompileResult;
use jmmc_ir::ir_class::{IRClass, IRMethod};
use log::debug;

use crate::descriptor::{descriptor, super_name};
use crate::CodeGenerator;

use method::MethodEmitter;

/// Emits Jasmin assembly for a lowered class.
///
/// Holds no state between methods: emitting the same class twice yields the
/// same text.
pub struct JasminGenerator {
    compiler_cx: Rc<RefCell<CompilerCtx>>,
}

impl Default for JasminGenerator {
    fn default() -> Self {
        Self {
            compiler_cx: Rc::new(RefCell::new(CompilerCtx::default())),
        }
    }
}

impl JasminGenerator {
    pub fn new(ccx: Rc<RefCell<CompilerCtx>>) -> Self {
        Self { compiler_cx: ccx }
    }

    fn options(&self) -> CodegenOptions {
        self.compiler_cx.borrow().options.clone()
    }

    fn emit_class_header(&self, class: &IRClass, code: &mut String) {
        let super_class = super_name(class.super_name.as_deref(), &class.imports);
        code.push_str(&format!(".class public {}\n", class.name));
        code.push_str(&format!(".super {super_class}\n\n"));

        for field in &class.fields {
            let desc = descriptor(&field.ty, &class.imports);
            code.push_str(&format!(".field public {} {desc}\n", field.name));
        }
        if !class.fields.is_empty() {
            code.push('\n');
        }
    }

    fn emit_default_constructor(&self, class: &IRClass, code: &mut String) {
        let indent = self.options().indent;
        let super_class = super_name(class.super_name.as_deref(), &class.imports);
        code.push_str(";default constructor\n");
        code.push_str(".method public <init>()V\n");
        code.push_str(&format!("{indent}aload_0\n"));
        code.push_str(&format!("{indent}invokespecial {super_class}/<init>()V\n"));
        code.push_str(&format!("{indent}return\n"));
        code.push_str(".end method\n");
    }
}

impl CodeGenerator for JasminGenerator {
    fn gen_class(&self, class: &IRClass) -> CompileResult<String> {
        let mut code = String::new();
        self.emit_class_header(class, &mut code);
        self.emit_default_constructor(class, &mut code);

        for method in &class.methods {
            code.push('\n');
            code.push_str(&self.gen_method(class, method)?);
        }
        Ok(code)
    }

    fn gen_method(&self, class: &IRClass, method: &IRMethod) -> CompileResult<String> {
        debug!("emitting method '{}.{}'", class.name, method.name);
        let options = self.options();
        MethodEmitter::new(class, method, &options).emit()
    }
}
