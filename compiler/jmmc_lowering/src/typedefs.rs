// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use jmmc_errors::CompileResult;
use jmmc_ir::ir_instr::{IRExpr, IRInstr};
use jmmc_ir::ir_operands::{ArrayOperand, Element, Operand};

/// Where an expression sits relative to its consumer. Decides whether a
/// result may stay a bare expression or must be stored in a temp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprPos {
    /// The value must end up in a variable or literal.
    Operand,

    /// Right-hand side of an assignment.
    AssignRhs,

    /// Left-hand side of an assignment.
    AssignTarget,

    /// Expression statement; the value is discarded.
    Statement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lowered {
    Value(Element),

    Expr(IRExpr),

    /// A field on the left of an assignment. Closed by the assignment as a
    /// `putfield` once the value is known.
    PendingFieldStore {
        object: Operand,
        field: Operand,
    },
}

/// Result of lowering one expression: its `code` plus the instructions that
/// must run before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprLowering {
    pub code: Lowered,
    pub computation: Vec<IRInstr>,
}

impl ExprLowering {
    pub fn value(elem: Element) -> Self {
        Self {
            code: Lowered::Value(elem),
            computation: vec![],
        }
    }

    pub fn with_computation(code: Lowered, computation: Vec<IRInstr>) -> Self {
        Self { code, computation }
    }
}

pub type ExprLoweringResult = CompileResult<ExprLowering>;

/// Lowered operand with its computation.
pub type OperandResult = CompileResult<(Element, Vec<IRInstr>)>;

pub type ArrayOperandResult = CompileResult<(ArrayOperand, Vec<IRInstr>)>;

pub type StmtLoweringResult = CompileResult<Vec<IRInstr>>;
