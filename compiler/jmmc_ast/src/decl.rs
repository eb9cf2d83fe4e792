// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use jmmc_types::Type;

use crate::stmt::Stmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: Type,

    /// `int... xs`; only the last parameter may be variadic. `ty` is the
    /// array type the callee sees.
    pub is_varargs: bool,
}

impl Param {
    pub fn new(name: &str, ty: Type) -> Self {
        Self {
            name: name.to_string(),
            ty,
            is_varargs: false,
        }
    }

    pub fn varargs(name: &str, elem: Type) -> Self {
        Self {
            name: name.to_string(),
            ty: Type::array_of(elem.name),
            is_varargs: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub ty: Type,
}

impl VarDecl {
    pub fn new(name: &str, ty: Type) -> Self {
        Self {
            name: name.to_string(),
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub is_public: bool,
    pub is_static: bool,
    pub params: Vec<Param>,
    pub return_type: Type,
    pub locals: Vec<VarDecl>,
    pub body: Vec<Stmt>,
}

impl MethodDecl {
    pub fn new(name: &str, return_type: Type) -> Self {
        Self {
            name: name.to_string(),
            is_public: true,
            is_static: false,
            params: vec![],
            return_type,
            locals: vec![],
            body: vec![],
        }
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_params(mut self, params: Vec<Param>) -> Self {
        self.params = params;
        self
    }

    pub fn with_locals(mut self, locals: Vec<VarDecl>) -> Self {
        self.locals = locals;
        self
    }

    pub fn with_body(mut self, body: Vec<Stmt>) -> Self {
        self.body = body;
        self
    }

    pub fn is_varargs(&self) -> bool {
        self.params.last().is_some_and(|p| p.is_varargs)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    pub super_name: Option<String>,
    pub fields: Vec<VarDecl>,
    pub methods: Vec<MethodDecl>,
}

impl ClassDecl {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            super_name: None,
            fields: vec![],
            methods: vec![],
        }
    }
}

/// A compilation unit: import declarations plus exactly one class.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Dotted import paths, e.g. `java.util.List`.
    pub imports: Vec<String>,
    pub class: ClassDecl,
}

impl Program {
    pub fn new(imports: Vec<String>, class: ClassDecl) -> Self {
        Self { imports, class }
    }
}
