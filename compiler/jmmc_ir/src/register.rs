// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use indexmap::IndexMap;

use crate::ir_class::IRMethod;
use crate::ir_instr::*;
use crate::ir_operands::*;
use crate::{THIS_NAME, THIS_REGISTER};

/// JVM local variable slot.
pub type Register = usize;

/// Maps each variable of a method to its local slot. Iteration follows
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterTable {
    regs: IndexMap<String, Register>,
}

impl RegisterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// One slot per variable, no reuse. Instance methods get `this` in slot
    /// 0 and parameters from 1; static methods start parameters at 0. Other
    /// variables follow in order of first appearance in the body.
    pub fn sequential(method: &IRMethod) -> Self {
        let mut table = Self::new();
        if !method.is_static {
            table.insert(THIS_NAME, THIS_REGISTER);
        }
        for param in &method.params {
            table.push(&param.name);
        }
        for instr in &method.body {
            table.visit_instr(instr);
        }
        table
    }

    pub fn insert(&mut self, name: &str, reg: Register) {
        self.regs.insert(name.to_string(), reg);
    }

    /// Gives `name` the next free slot unless it already has one.
    pub fn push(&mut self, name: &str) -> Register {
        if let Some(reg) = self.regs.get(name) {
            return *reg;
        }
        let reg = self.next_free();
        self.regs.insert(name.to_string(), reg);
        reg
    }

    pub fn get(&self, name: &str) -> Option<Register> {
        self.regs.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.regs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    pub fn max_register(&self) -> Option<Register> {
        self.regs.values().copied().max()
    }

    /// Value of `.limit locals`: the non-`this` variables plus one, raised
    /// to cover the highest slot in use.
    pub fn locals_limit(&self) -> usize {
        let non_this = self.regs.keys().filter(|name| *name != THIS_NAME).count();
        let by_count = non_this + 1;
        let by_slot = self.max_register().map_or(0, |reg| reg + 1);
        by_count.max(by_slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Register)> {
        self.regs.iter()
    }

    fn next_free(&self) -> Register {
        self.max_register().map_or(0, |reg| reg + 1)
    }

    fn visit_operand(&mut self, op: &Operand) {
        if !op.is_this() {
            self.push(&op.name);
        }
    }

    fn visit_element(&mut self, elem: &Element) {
        if let Element::Operand(op) = elem {
            self.visit_operand(op);
        }
    }

    fn visit_array(&mut self, arr: &ArrayOperand) {
        self.visit_operand(&arr.array);
        self.visit_element(&arr.index);
    }

    fn visit_call(&mut self, call: &CallExpr) {
        // class targets of static calls are not variables
        if let CallTarget::Object(receiver) = &call.target {
            self.visit_operand(receiver);
        }
        call.args.iter().for_each(|arg| self.visit_element(arg));
    }

    fn visit_expr(&mut self, expr: &IRExpr) {
        match expr {
            IRExpr::Element(elem) => self.visit_element(elem),
            IRExpr::Binary { lhs, rhs, .. } => {
                self.visit_element(lhs);
                self.visit_element(rhs);
            }
            IRExpr::Not(elem) => self.visit_element(elem),
            IRExpr::Call(call) => self.visit_call(call),
            IRExpr::New(_) => {}
            IRExpr::NewArray { size, .. } => self.visit_element(size),
            IRExpr::ArrayLength(arr) => self.visit_operand(arr),
            IRExpr::GetField { object, .. } => self.visit_operand(object),
            IRExpr::Index(arr) => self.visit_array(arr),
        }
    }

    fn visit_instr(&mut self, instr: &IRInstr) {
        match instr {
            IRInstr::Assign { dest, rhs, .. } => {
                match dest {
                    Dest::Var(op) => self.visit_operand(op),
                    Dest::Index(arr) => self.visit_array(arr),
                }
                self.visit_expr(rhs);
            }
            IRInstr::PutField { object, value, .. } => {
                self.visit_operand(object);
                self.visit_element(value);
            }
            IRInstr::Call(call) => self.visit_call(call),
            IRInstr::CondBranch { cond, .. } => self.visit_expr(cond),
            IRInstr::Return { value: Some(value), .. } => self.visit_element(value),
            IRInstr::Return { value: None, .. }
            | IRInstr::Goto(_)
            | IRInstr::Label(_) => {}
        }
    }
}
