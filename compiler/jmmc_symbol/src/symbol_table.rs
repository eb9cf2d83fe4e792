// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use indexmap::IndexMap;
use jmmc_ast::Program;

use crate::{MethodInfo, Symbol};

/// Read-only view of the declarations of the class being compiled.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    pub class_name: String,
    pub super_name: Option<String>,

    /// Dotted import paths in declaration order.
    pub imports: Vec<String>,

    pub fields: IndexMap<String, Symbol>,
    pub methods: IndexMap<String, MethodInfo>,
}

impl SymbolTable {
    pub fn new(class_name: &str) -> Self {
        Self {
            class_name: class_name.to_string(),
            ..Default::default()
        }
    }

    /// Builds the table from the declarations of a program.
    pub fn collect(program: &Program) -> Self {
        let class = &program.class;
        let mut table = Self::new(&class.name);
        table.super_name = class.super_name.clone();
        table.imports = program.imports.clone();

        for field in &class.fields {
            table.fields.insert(field.name.clone(), Symbol::new(&field.name, field.ty.clone()));
        }

        for method in &class.methods {
            let info = MethodInfo {
                name: method.name.clone(),
                is_static: method.is_static,
                is_varargs: method.is_varargs(),
                return_type: method.return_type.clone(),
                params: method.params
                    .iter()
                    .map(|p| Symbol::new(&p.name, p.ty.clone()))
                    .collect(),
                locals: method.locals
                    .iter()
                    .map(|l| Symbol::new(&l.name, l.ty.clone()))
                    .collect(),
            };
            table.methods.insert(method.name.clone(), info);
        }
        table
    }

    pub fn field(&self, name: &str) -> Option<&Symbol> {
        self.fields.get(name)
    }

    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.get(name)
    }

    /// Resolves a simple class name against the imports by matching the
    /// last dotted segment. Returns the full dotted path.
    pub fn resolve_import(&self, simple_name: &str) -> Option<&str> {
        self.imports
            .iter()
            .find(|imp| imp.rsplit('.').next() == Some(simple_name))
            .map(|imp| imp.as_str())
    }

    pub fn is_imported(&self, simple_name: &str) -> bool {
        self.resolve_import(simple_name).is_some()
    }

    pub fn is_super(&self, name: &str) -> bool {
        self.super_name.as_deref() == Some(name)
    }
}
