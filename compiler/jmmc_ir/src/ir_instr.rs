// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use jmmc_types::IrType;

use crate::ir_operands::*;
use crate::Label;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IRBinOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Lt,
    Gte,
}

impl IRBinOp {
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, IRBinOp::Add | IRBinOp::Sub | IRBinOp::Mul | IRBinOp::Div)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            IRBinOp::Add => "+",
            IRBinOp::Sub => "-",
            IRBinOp::Mul => "*",
            IRBinOp::Div => "/",
            IRBinOp::And => "&&",
            IRBinOp::Lt => "<",
            IRBinOp::Gte => ">=",
        }
    }

    /// Result suffix of the operator.
    pub fn result_type(&self) -> IrType {
        if self.is_arithmetic() {
            IrType::I32
        } else {
            IrType::Bool
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Virtual,
    Static,
    Special,
}

impl CallKind {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            CallKind::Virtual => "invokevirtual",
            CallKind::Static => "invokestatic",
            CallKind::Special => "invokespecial",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallTarget {
    /// Simple class name of a static callee, e.g. `io`.
    Class(String),

    /// Receiver object of a virtual or special call.
    Object(Operand),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    pub kind: CallKind,
    pub target: CallTarget,
    pub method: String,
    pub args: Vec<Element>,
    pub ret: IrType,
}

/// Right-hand side shapes of an assignment. Conditional branches reuse the
/// element, binary and not shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IRExpr {
    Element(Element),

    Binary {
        op: IRBinOp,
        lhs: Element,
        rhs: Element,
    },

    Not(Element),

    Call(CallExpr),

    /// `new(C).C`
    New(String),

    /// `new(array, n.i32).array.T`
    NewArray {
        size: Element,
        ty: IrType,
    },

    ArrayLength(Operand),

    /// `getfield(this, f.T).T`
    GetField {
        object: Operand,
        field: Operand,
    },

    Index(ArrayOperand),
}

impl IRExpr {
    /// Type of the value this expression leaves behind.
    pub fn ty(&self) -> IrType {
        match self {
            IRExpr::Element(elem) => elem.ty().clone(),
            IRExpr::Binary { op, .. } => op.result_type(),
            IRExpr::Not(_) => IrType::Bool,
            IRExpr::Call(call) => call.ret.clone(),
            IRExpr::New(class) => IrType::Class(class.clone()),
            IRExpr::NewArray { ty, .. } => ty.clone(),
            IRExpr::ArrayLength(_) => IrType::I32,
            IRExpr::GetField { field, .. } => field.ty.clone(),
            IRExpr::Index(arr) => arr.elem_ty.clone(),
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            IRExpr::Element(elem) => Some(elem),
            _ => None,
        }
    }
}

impl From<Element> for IRExpr {
    fn from(value: Element) -> Self {
        IRExpr::Element(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dest {
    Var(Operand),
    Index(ArrayOperand),
}

impl Dest {
    pub fn ty(&self) -> &IrType {
        match self {
            Dest::Var(op) => &op.ty,
            Dest::Index(arr) => &arr.elem_ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IRInstr {
    /// `dest :=.T rhs;`
    Assign {
        dest: Dest,
        ty: IrType,
        rhs: IRExpr,
    },

    /// `putfield(this, f.T, v).V;`
    PutField {
        object: Operand,
        field: Operand,
        value: Element,
    },

    /// A call whose result is unused.
    Call(CallExpr),

    Goto(Label),

    Label(Label),

    /// `if(cond) goto L;`
    CondBranch {
        cond: IRExpr,
        target: Label,
    },

    Return {
        ty: IrType,
        value: Option<Element>,
    },
}

impl IRInstr {
    /// Shorthand for assigning into a plain variable of the given type.
    pub fn assign_var(dest: Operand, rhs: IRExpr) -> Self {
        let ty = dest.ty.clone();
        IRInstr::Assign {
            dest: Dest::Var(dest),
            ty,
            rhs,
        }
    }

    pub fn dest(&self) -> Option<&Dest> {
        match self {
            IRInstr::Assign { dest, .. } => Some(dest),
            _ => None,
        }
    }

    pub fn is_return(&self) -> bool {
        matches!(self, IRInstr::Return { .. })
    }
}
