// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

//! Textual form of the IR.

use std::fmt::{Display, Formatter, Result};

use itertools::Itertools;
use jmmc_types::IrType;

use crate::ir_class::*;
use crate::ir_instr::*;
use crate::ir_operands::*;

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}{}", self.name, self.ty)
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}{}", self.value, self.ty)
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Element::Operand(op) => write!(f, "{op}"),
            Element::Literal(lit) => write!(f, "{lit}"),
        }
    }
}

impl Display for ArrayOperand {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}[{}]{}", self.array.name, self.index, self.elem_ty)
    }
}

/// Field accesses on `this` print the receiver without a suffix.
fn field_object(object: &Operand) -> String {
    if object.is_this() {
        object.name.clone()
    } else {
        object.to_string()
    }
}

impl Display for CallTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            CallTarget::Class(name) => write!(f, "{name}"),
            CallTarget::Object(op) => write!(f, "{op}"),
        }
    }
}

impl Display for CallExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}({}, \"{}\"", self.kind.mnemonic(), self.target, self.method)?;
        for arg in &self.args {
            write!(f, ", {arg}")?;
        }
        write!(f, "){}", self.ret)
    }
}

impl Display for IRExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            IRExpr::Element(elem) => write!(f, "{elem}"),
            IRExpr::Binary { op, lhs, rhs } => {
                write!(f, "{lhs} {}{} {rhs}", op.symbol(), op.result_type())
            }
            IRExpr::Not(elem) => write!(f, "!{} {elem}", IrType::Bool),
            IRExpr::Call(call) => write!(f, "{call}"),
            IRExpr::New(class) => write!(f, "new({class}){}", IrType::Class(class.clone())),
            IRExpr::NewArray { size, ty } => write!(f, "new(array, {size}){ty}"),
            IRExpr::ArrayLength(arr) => write!(f, "arraylength({arr}){}", IrType::I32),
            IRExpr::GetField { object, field } => {
                write!(f, "getfield({}, {field}){}", field_object(object), field.ty)
            }
            IRExpr::Index(arr) => write!(f, "{arr}"),
        }
    }
}

impl Display for Dest {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Dest::Var(op) => write!(f, "{op}"),
            Dest::Index(arr) => write!(f, "{arr}"),
        }
    }
}

impl Display for IRInstr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            IRInstr::Assign { dest, ty, rhs } => write!(f, "{dest} :={ty} {rhs};"),
            IRInstr::PutField { object, field, value } => {
                write!(f, "putfield({}, {field}, {value}){};", field_object(object), IrType::Void)
            }
            IRInstr::Call(call) => write!(f, "{call};"),
            IRInstr::Goto(label) => write!(f, "goto {label};"),
            IRInstr::Label(label) => write!(f, "{label}:"),
            IRInstr::CondBranch { cond, target } => write!(f, "if({cond}) goto {target};"),
            IRInstr::Return { ty, value: Some(value) } => write!(f, "ret{ty} {value};"),
            IRInstr::Return { ty, value: None } => write!(f, "ret{ty};"),
        }
    }
}

impl Display for IRMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, ".method ")?;
        if self.is_public {
            write!(f, "public ")?;
        }
        if self.is_static {
            write!(f, "static ")?;
        }
        if self.is_varargs {
            write!(f, "varargs ")?;
        }
        writeln!(f, "{}({}){} {{", self.name, self.params.iter().join(", "), self.ret)?;
        for instr in &self.body {
            writeln!(f, "{instr}")?;
        }
        writeln!(f, "}}")
    }
}

impl Display for IRClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for import in &self.imports {
            writeln!(f, "import {import};")?;
        }
        write!(f, "{}", self.name)?;
        if let Some(super_name) = &self.super_name {
            write!(f, " extends {super_name}")?;
        }
        writeln!(f, " {{")?;
        writeln!(f)?;

        for field in &self.fields {
            writeln!(f, ".field public {field};")?;
        }
        if !self.fields.is_empty() {
            writeln!(f)?;
        }

        writeln!(f, ".construct {}(){} {{", self.name, IrType::Void)?;
        writeln!(f, "invokespecial(this, \"<init>\"){};", IrType::Void)?;
        writeln!(f, "}}")?;

        for method in &self.methods {
            writeln!(f)?;
            write!(f, "{method}")?;
        }
        writeln!(f, "}}")
    }
}
