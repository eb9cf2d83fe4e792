// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::cell::RefCell;
use std::rc::Rc;

use jmmc_ast::*;
use jmmc_ctx::{CompilerCtx, LabelId, LabelKind};
use jmmc_errors::{CompileError, CompileResult};
use jmmc_ir::ir_class::*;
use jmmc_ir::ir_instr::*;
use jmmc_ir::ir_operands::*;
use jmmc_symbol::SymbolTable;
use jmmc_types::IrType;
use log::debug;

use crate::fn_ctx::FnCtx;
use crate::typedefs::*;

/// Lowers a typed class declaration into structured IR.
pub struct IRLowerer<'a> {
    pub(crate) ctx: Rc<RefCell<CompilerCtx>>,

    pub(crate) symbols: &'a SymbolTable,
}

impl<'a> IRLowerer<'a> {
    pub fn new(ctx: Rc<RefCell<CompilerCtx>>, symbols: &'a SymbolTable) -> Self {
        Self { ctx, symbols }
    }

    pub fn lower_program(&mut self, program: &Program) -> CompileResult<IRClass> {
        let class = &program.class;
        let mut ir_class = IRClass::new(&class.name);
        ir_class.super_name = class.super_name.clone();
        ir_class.imports = program.imports.clone();
        ir_class.fields = class.fields
            .iter()
            .map(|field| Operand::new(&field.name, IrType::from(&field.ty)))
            .collect();

        for method in &class.methods {
            ir_class.methods.push(self.lower_method(method)?);
        }
        Ok(ir_class)
    }

    pub fn lower_method(&mut self, method: &MethodDecl) -> CompileResult<IRMethod> {
        let info = self.symbols
            .method(&method.name)
            .cloned()
            .ok_or_else(|| CompileError::UnknownMethod(method.name.clone()))?;
        let mut fn_ctx = FnCtx::new(info);
        debug!("lowering method '{}'", fn_ctx.method);

        let params = method.params
            .iter()
            .map(|p| Operand::new(&p.name, IrType::from(&p.ty)))
            .collect();
        let mut ir_method = IRMethod::new(&method.name, params, fn_ctx.ret.clone());
        ir_method.is_public = method.is_public;
        ir_method.is_static = method.is_static;
        ir_method.is_varargs = method.is_varargs();

        for stmt in &method.body {
            let instrs = self.lower_stmt(stmt, &mut fn_ctx)?;
            ir_method.body.extend(instrs);
        }

        let ends_in_return = method.body.last().is_some_and(Stmt::is_return);
        if fn_ctx.ret.is_void() && !ends_in_return {
            ir_method.body.push(IRInstr::Return {
                ty: IrType::Void,
                value: None,
            });
        }

        ir_method.assign_registers();
        Ok(ir_method)
    }

    pub(crate) fn next_temp(&self, ty: IrType) -> Operand {
        let name = self.ctx.borrow_mut().naming.next_temp();
        Operand::new(name, ty)
    }

    pub(crate) fn next_label(&self, kind: LabelKind) -> LabelId {
        self.ctx.borrow_mut().naming.next_label(kind)
    }

    pub(crate) fn next_varargs_holder(&self, ty: IrType) -> Operand {
        let name = self.ctx.borrow_mut().naming.next_varargs_holder();
        Operand::new(name, ty)
    }

    pub(crate) fn class_type(&self) -> IrType {
        IrType::Class(self.symbols.class_name.clone())
    }

    pub(crate) fn this_operand(&self) -> Operand {
        Operand::new(jmmc_ir::THIS_NAME, self.class_type())
    }

    /// A name refers to a field when the class declares it and the method
    /// does not shadow it.
    pub(crate) fn is_field(&self, name: &str, fn_ctx: &FnCtx) -> bool {
        self.symbols.field(name).is_some() && !fn_ctx.declares(name)
    }

    /// Stores a bare expression into a fresh temp of type `ty`.
    pub(crate) fn store_in_temp(
        &self,
        rhs: IRExpr,
        ty: IrType,
        computation: &mut Vec<IRInstr>
    ) -> Element {
        let temp = self.next_temp(ty);
        computation.push(IRInstr::assign_var(temp.clone(), rhs));
        Element::Operand(temp)
    }

    /// Wraps `rhs` into a temp unless the position accepts bare
    /// expressions.
    pub(crate) fn finish_expr(
        &self,
        rhs: IRExpr,
        ty: IrType,
        pos: ExprPos,
        mut computation: Vec<IRInstr>
    ) -> ExprLowering {
        if matches!(pos, ExprPos::AssignRhs) {
            return ExprLowering::with_computation(Lowered::Expr(rhs), computation);
        }
        let elem = self.store_in_temp(rhs, ty, &mut computation);
        ExprLowering::with_computation(Lowered::Value(elem), computation)
    }

    /// Lowers `expr` into an element, materializing any bare result.
    pub(crate) fn lower_operand(&mut self, expr: &Expr, fn_ctx: &mut FnCtx) -> OperandResult {
        let lowered = self.lower_expr(expr, ExprPos::Operand, fn_ctx)?;
        self.into_element(lowered, IrType::from(&expr.ty))
    }

    pub(crate) fn into_element(&self, lowered: ExprLowering, ty: IrType) -> OperandResult {
        let mut computation = lowered.computation;
        match lowered.code {
            Lowered::Value(elem) => Ok((elem, computation)),
            Lowered::Expr(IRExpr::Element(elem)) => Ok((elem, computation)),
            Lowered::Expr(rhs) => {
                let elem = self.store_in_temp(rhs, ty, &mut computation);
                Ok((elem, computation))
            }
            Lowered::PendingFieldStore { field, .. } => Err(CompileError::not_implemented(
                format!("field store to '{}' used as a value", field.name)
            )),
        }
    }

    /// Lowers an expression whose value must be a variable, e.g. an array
    /// base or a call receiver.
    pub(crate) fn lower_variable(&mut self, expr: &Expr, fn_ctx: &mut FnCtx) -> CompileResult<(Operand, Vec<IRInstr>)> {
        let (elem, mut computation) = self.lower_operand(expr, fn_ctx)?;
        match elem {
            Element::Operand(op) => Ok((op, computation)),
            Element::Literal(lit) => {
                let temp = self.next_temp(lit.ty.clone());
                computation.push(IRInstr::assign_var(temp.clone(), IRExpr::Element(Element::Literal(lit))));
                Ok((temp, computation))
            }
        }
    }
}
