// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use jmmc_types::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Lt,
}

impl BinOp {
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div)
    }

    /// Source-level spelling, reused by the IR printer.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::And => "&&",
            BinOp::Lt => "<",
        }
    }
}

/// Typed expression. `ty` is the type derived by the analyzer and is
/// trusted as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    IntLiteral(i32),

    BoolLiteral(bool),

    This,

    /// Reference to a local, parameter, field or (as a call receiver)
    /// a class name.
    VarRef(String),

    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    Not(Box<Expr>),

    Paren(Box<Expr>),

    /// `new C()`
    NewObject(String),

    /// `new T[size]`
    NewArray {
        elem: Type,
        size: Box<Expr>,
    },

    /// `[e1, e2, ...]`
    ArrayInit(Vec<Expr>),

    ArrayAccess {
        array: Box<Expr>,
        index: Box<Expr>,
    },

    ArrayLength(Box<Expr>),

    MethodCall {
        receiver: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, ty: Type) -> Self {
        Self { kind, ty }
    }

    pub fn int(value: i32) -> Self {
        Self::new(ExprKind::IntLiteral(value), Type::int())
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(ExprKind::BoolLiteral(value), Type::boolean())
    }

    pub fn this(class_name: &str) -> Self {
        Self::new(ExprKind::This, Type::class(class_name))
    }

    pub fn var(name: &str, ty: Type) -> Self {
        Self::new(ExprKind::VarRef(name.to_string()), ty)
    }

    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        let ty = if op.is_arithmetic() { Type::int() } else { Type::boolean() };
        Self::new(
            ExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            ty,
        )
    }

    pub fn not(operand: Expr) -> Self {
        Self::new(ExprKind::Not(Box::new(operand)), Type::boolean())
    }

    pub fn paren(inner: Expr) -> Self {
        let ty = inner.ty.clone();
        Self::new(ExprKind::Paren(Box::new(inner)), ty)
    }

    pub fn new_object(class_name: &str) -> Self {
        Self::new(ExprKind::NewObject(class_name.to_string()), Type::class(class_name))
    }

    pub fn new_int_array(size: Expr) -> Self {
        Self::new(
            ExprKind::NewArray {
                elem: Type::int(),
                size: Box::new(size),
            },
            Type::array_of(jmmc_types::INT_TYPE_NAME),
        )
    }

    pub fn array_init(elem: Type, items: Vec<Expr>) -> Self {
        Self::new(ExprKind::ArrayInit(items), Type::array_of(elem.name))
    }

    pub fn index(array: Expr, index: Expr) -> Self {
        let ty = array.ty.element();
        Self::new(
            ExprKind::ArrayAccess {
                array: Box::new(array),
                index: Box::new(index),
            },
            ty,
        )
    }

    pub fn length(array: Expr) -> Self {
        Self::new(ExprKind::ArrayLength(Box::new(array)), Type::int())
    }

    pub fn call(receiver: Expr, method: &str, args: Vec<Expr>, ty: Type) -> Self {
        Self::new(
            ExprKind::MethodCall {
                receiver: Box::new(receiver),
                method: method.to_string(),
                args,
            },
            ty,
        )
    }

    /// Name of the referenced variable when this is a plain reference.
    pub fn var_name(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::VarRef(name) => Some(name),
            _ => None,
        }
    }
}
