// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::borrow::Cow;

use jmmc_ctx::{CodegenOptions, Label};
use jmmc_errors::{CompileError, CompileResult};
use jmmc_ir::ir_class::{IRClass, IRMethod};
use jmmc_ir::ir_instr::*;
use jmmc_ir::ir_operands::*;
use jmmc_ir::register::{Register, RegisterTable};
use jmmc_types::IrType;
use log::trace;

use crate::descriptor::{descriptor, full_name, method_descriptor};
use crate::stack::StackDepth;

type EmitResult = CompileResult<StackDepth>;

/// `iinc` takes a signed byte.
const IINC_RANGE: std::ops::RangeInclusive<i32> = -128..=127;

/// Emits the body of a single method. A fresh emitter is used per method.
pub(crate) struct MethodEmitter<'a> {
    class: &'a IRClass,
    method: &'a IRMethod,
    options: &'a CodegenOptions,
    registers: Cow<'a, RegisterTable>,
    code: String,
}

impl<'a> MethodEmitter<'a> {
    pub(crate) fn new(class: &'a IRClass, method: &'a IRMethod, options: &'a CodegenOptions) -> Self {
        let registers = if method.registers.is_empty() {
            Cow::Owned(RegisterTable::sequential(method))
        } else {
            Cow::Borrowed(&method.registers)
        };
        Self {
            class,
            method,
            options,
            registers,
            code: String::new(),
        }
    }

    pub(crate) fn emit(mut self) -> CompileResult<String> {
        let mut depth = StackDepth::new();
        for instr in &self.method.body {
            depth = self.emit_instr(instr, depth)?;
            trace!("{}: `{instr}` leaves stack at {}", self.method.name, depth.current);
        }

        let mut out = self.emit_signature();
        let indent = &self.options.indent;
        out.push_str(&format!("{indent}.limit stack {}\n", depth.max));
        out.push_str(&format!("{indent}.limit locals {}\n", self.registers.locals_limit()));
        out.push_str(&self.code);
        out.push_str(".end method\n");
        Ok(out)
    }

    fn emit_signature(&self) -> String {
        let mut sig = String::from(".method ");
        if self.method.is_public {
            sig.push_str("public ");
        }
        if self.method.is_static {
            sig.push_str("static ");
        }
        let desc = method_descriptor(
            self.method.params.iter().map(|p| &p.ty),
            &self.method.ret,
            &self.class.imports
        );
        sig.push_str(&format!("{}{desc}\n", self.method.name));
        sig
    }

    fn line(&mut self, text: &str) {
        self.code.push_str(&self.options.indent);
        self.code.push_str(text);
        self.code.push('\n');
    }

    fn label(&mut self, label: &Label) {
        self.code.push_str(&format!("{label}:\n"));
    }

    fn pop(&self, depth: StackDepth, n: usize) -> EmitResult {
        depth.pop(n).ok_or_else(|| CompileError::StackUnderflow {
            method: self.method.name.clone(),
        })
    }

    fn register(&self, name: &str) -> CompileResult<Register> {
        self.registers.get(name).ok_or_else(|| CompileError::UnknownVariable {
            method: self.method.name.clone(),
            name: name.to_string(),
        })
    }

    /// Short form `_N` for slots 0..=3, ` N` otherwise.
    fn slot(reg: Register) -> String {
        if reg <= 3 {
            format!("_{reg}")
        } else {
            format!(" {reg}")
        }
    }

    /// `i` for int and boolean slots, `a` for references.
    fn slot_prefix(&self, ty: &IrType) -> CompileResult<&'static str> {
        match ty {
            IrType::I32 | IrType::Bool => Ok("i"),
            ty if ty.is_reference() => Ok("a"),
            ty => Err(CompileError::not_implemented(format!("local of type {ty}"))),
        }
    }

    /// Internal name of the class an object belongs to.
    fn owner_of(&self, object: &Operand) -> CompileResult<String> {
        if object.is_this() {
            return Ok(self.class.name.clone());
        }
        match &object.ty {
            IrType::Class(name) => Ok(full_name(name, &self.class.imports)),
            IrType::String => Ok("java/lang/String".to_string()),
            ty => Err(CompileError::not_implemented(format!("member access on {ty}"))),
        }
    }

    fn emit_load(&mut self, op: &Operand, depth: StackDepth) -> EmitResult {
        let reg = self.register(&op.name)?;
        let prefix = self.slot_prefix(&op.ty)?;
        self.line(&format!("{prefix}load{}", Self::slot(reg)));
        Ok(depth.push(1))
    }

    fn emit_store(&mut self, op: &Operand, depth: StackDepth) -> EmitResult {
        let reg = self.register(&op.name)?;
        let prefix = self.slot_prefix(&op.ty)?;
        self.line(&format!("{prefix}store{}", Self::slot(reg)));
        self.pop(depth, 1)
    }

    /// Shortest encoding for integer constants, `ldc` for everything else.
    fn emit_literal(&mut self, lit: &Literal, depth: StackDepth) -> EmitResult {
        match lit.ty {
            IrType::I32 | IrType::Bool => {
                let value = lit.as_int().ok_or_else(|| CompileError::InvalidLiteral(lit.to_string()))?;
                let instr = match value {
                    -1 => "iconst_m1".to_string(),
                    0..=5 => format!("iconst_{value}"),
                    -128..=127 => format!("bipush {value}"),
                    -32768..=32767 => format!("sipush {value}"),
                    _ => format!("ldc {value}"),
                };
                self.line(&instr);
            }
            _ => self.line(&format!("ldc {}", lit.value)),
        }
        Ok(depth.push(1))
    }

    fn emit_element(&mut self, elem: &Element, depth: StackDepth) -> EmitResult {
        match elem {
            Element::Operand(op) => self.emit_load(op, depth),
            Element::Literal(lit) => self.emit_literal(lit, depth),
        }
    }

    fn array_suffix(elem_ty: &IrType) -> &'static str {
        if elem_ty.is_reference() { "a" } else { "i" }
    }

    fn emit_array_slot(&mut self, access: &ArrayOperand, depth: StackDepth) -> EmitResult {
        let depth = self.emit_load(&access.array, depth)?;
        self.emit_element(&access.index, depth)
    }

    /// Leaves the value of `expr` on the stack. Void calls leave nothing.
    fn emit_expr(&mut self, expr: &IRExpr, depth: StackDepth) -> EmitResult {
        match expr {
            IRExpr::Element(elem) => self.emit_element(elem, depth),
            IRExpr::Binary { op, lhs, rhs } => {
                let mnemonic = match op {
                    IRBinOp::Add => "iadd",
                    IRBinOp::Sub => "isub",
                    IRBinOp::Mul => "imul",
                    IRBinOp::Div => "idiv",
                    IRBinOp::And | IRBinOp::Lt | IRBinOp::Gte => {
                        return Err(CompileError::not_implemented(
                            format!("'{}' used as a value", op.symbol())
                        ));
                    }
                };
                let depth = self.emit_element(lhs, depth)?;
                let depth = self.emit_element(rhs, depth)?;
                self.line(mnemonic);
                self.pop(depth, 1)
            }
            IRExpr::Not(operand) => {
                let depth = self.emit_element(operand, depth)?;
                self.line("iconst_1");
                let depth = depth.push(1);
                self.line("ixor");
                self.pop(depth, 1)
            }
            IRExpr::Call(call) => self.emit_call(call, depth),
            IRExpr::New(class) => {
                let name = full_name(class, &self.class.imports);
                self.line(&format!("new {name}"));
                Ok(depth.push(1))
            }
            IRExpr::NewArray { size, ty } => {
                if ty.element() != Some(&IrType::I32) {
                    return Err(CompileError::not_implemented(format!("newarray of {ty}")));
                }
                let depth = self.emit_element(size, depth)?;
                self.line("newarray int");
                Ok(depth)
            }
            IRExpr::ArrayLength(array) => {
                let depth = self.emit_load(array, depth)?;
                self.line("arraylength");
                Ok(depth)
            }
            IRExpr::GetField { object, field } => {
                let owner = self.owner_of(object)?;
                let desc = descriptor(&field.ty, &self.class.imports);
                let depth = self.emit_load(object, depth)?;
                self.line(&format!("getfield {owner}/{} {desc}", field.name));
                Ok(depth)
            }
            IRExpr::Index(access) => {
                let depth = self.emit_array_slot(access, depth)?;
                self.line(&format!("{}aload", Self::array_suffix(&access.elem_ty)));
                self.pop(depth, 1)
            }
        }
    }

    fn emit_call(&mut self, call: &CallExpr, depth: StackDepth) -> EmitResult {
        let mut depth = depth;
        let mut consumed = call.args.len();

        let owner = match (&call.kind, &call.target) {
            (CallKind::Static, CallTarget::Class(class)) => full_name(class, &self.class.imports),
            (CallKind::Virtual | CallKind::Special, CallTarget::Object(object)) => {
                depth = self.emit_load(object, depth)?;
                consumed += 1;
                self.owner_of(object)?
            }
            (kind, target) => {
                return Err(CompileError::not_implemented(
                    format!("{} on target {target}", kind.mnemonic())
                ));
            }
        };

        for arg in &call.args {
            depth = self.emit_element(arg, depth)?;
        }

        let desc = method_descriptor(
            call.args.iter().map(|arg| arg.ty()),
            &call.ret,
            &self.class.imports
        );
        self.line(&format!("{} {owner}/{}{desc}", call.kind.mnemonic(), call.method));

        let depth = self.pop(depth, consumed)?;
        if call.ret.is_void() {
            Ok(depth)
        } else {
            Ok(depth.push(1))
        }
    }

    /// `x := x + c` and `x := c + x` with `c` a signed byte.
    fn iinc_increment(&self, dest: &Operand, rhs: &IRExpr) -> Option<i32> {
        if !self.options.iinc_peephole || dest.ty != IrType::I32 {
            return None;
        }
        let IRExpr::Binary { op: IRBinOp::Add, lhs, rhs } = rhs else {
            return None;
        };
        let (var, lit) = match (lhs, rhs) {
            (Element::Operand(var), Element::Literal(lit)) => (var, lit),
            (Element::Literal(lit), Element::Operand(var)) => (var, lit),
            _ => return None,
        };
        let increment = lit.as_int()?;
        (var.name == dest.name && IINC_RANGE.contains(&increment)).then_some(increment)
    }

    fn emit_cond_branch(&mut self, cond: &IRExpr, target: &Label, depth: StackDepth) -> EmitResult {
        let (op, lhs, rhs) = match cond {
            IRExpr::Binary { op: op @ (IRBinOp::Lt | IRBinOp::Gte), lhs, rhs } => (op, lhs, rhs),
            IRExpr::Binary { op: IRBinOp::And, .. } => {
                return Err(CompileError::not_implemented("'&&' as a branch condition"));
            }
            value => {
                let depth = self.emit_expr(value, depth)?;
                self.line(&format!("ifne {target}"));
                return self.pop(depth, 1);
            }
        };

        let is_lt = *op == IRBinOp::Lt;
        let depth = if rhs.is_literal() {
            // lhs - c compared against zero
            let depth = self.emit_element(lhs, depth)?;
            let depth = self.emit_element(rhs, depth)?;
            self.line("isub");
            let depth = self.pop(depth, 1)?;
            self.line(&format!("{} {target}", if is_lt { "iflt" } else { "ifge" }));
            depth
        } else if lhs.is_literal() {
            // c < x  <=>  x - c > 0
            let depth = self.emit_element(rhs, depth)?;
            let depth = self.emit_element(lhs, depth)?;
            self.line("isub");
            let depth = self.pop(depth, 1)?;
            self.line(&format!("{} {target}", if is_lt { "ifgt" } else { "ifle" }));
            depth
        } else {
            let depth = self.emit_element(lhs, depth)?;
            let depth = self.emit_element(rhs, depth)?;
            self.line(&format!("{} {target}", if is_lt { "if_icmplt" } else { "if_icmpge" }));
            self.pop(depth, 1)?
        };
        self.pop(depth, 1)
    }

    fn emit_instr(&mut self, instr: &IRInstr, depth: StackDepth) -> EmitResult {
        match instr {
            IRInstr::Assign { dest: Dest::Var(dest), rhs, .. } => {
                if let Some(increment) = self.iinc_increment(dest, rhs) {
                    let reg = self.register(&dest.name)?;
                    self.line(&format!("iinc {reg} {increment}"));
                    return Ok(depth);
                }
                if rhs.ty().is_void() {
                    return Err(CompileError::not_implemented(format!("storing a void value into '{}'", dest.name)));
                }
                let depth = self.emit_expr(rhs, depth)?;
                self.emit_store(dest, depth)
            }
            IRInstr::Assign { dest: Dest::Index(access), rhs, .. } => {
                let depth = self.emit_array_slot(access, depth)?;
                let depth = self.emit_expr(rhs, depth)?;
                self.line(&format!("{}astore", Self::array_suffix(&access.elem_ty)));
                self.pop(depth, 3)
            }
            IRInstr::PutField { object, field, value } => {
                let owner = self.owner_of(object)?;
                let desc = descriptor(&field.ty, &self.class.imports);
                let depth = self.emit_load(object, depth)?;
                let depth = self.emit_element(value, depth)?;
                self.line(&format!("putfield {owner}/{} {desc}", field.name));
                self.pop(depth, 2)
            }
            IRInstr::Call(call) => {
                let depth = self.emit_call(call, depth)?;
                if call.ret.is_void() {
                    return Ok(depth);
                }
                self.line("pop");
                self.pop(depth, 1)
            }
            IRInstr::Goto(target) => {
                self.line(&format!("goto {target}"));
                Ok(depth)
            }
            IRInstr::Label(label) => {
                self.label(label);
                Ok(depth)
            }
            IRInstr::CondBranch { cond, target } => self.emit_cond_branch(cond, target, depth),
            IRInstr::Return { ty, value } => {
                let depth = match value {
                    Some(value) => self.emit_element(value, depth)?,
                    None => depth,
                };
                let mnemonic = match ty {
                    IrType::Void => "return",
                    ty if ty.is_reference() => "areturn",
                    _ => "ireturn",
                };
                self.line(mnemonic);
                match value {
                    Some(_) => self.pop(depth, 1),
                    None => Ok(depth),
                }
            }
        }
    }
}
