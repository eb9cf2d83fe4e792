// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use jmmc_ast::*;
use jmmc_ctx::{Label, LabelKind};
use jmmc_errors::CompileError;
use jmmc_ir::ir_instr::*;
use jmmc_ir::ir_operands::*;
use jmmc_types::IrType;

use crate::fn_ctx::FnCtx;
use crate::lowerer::IRLowerer;
use crate::typedefs::*;

impl IRLowerer<'_> {
    pub fn lower_stmt(&mut self, stmt: &Stmt, fn_ctx: &mut FnCtx) -> StmtLoweringResult {
        match stmt {
            Stmt::Assign { target, value } => self.lower_assign(target, value, fn_ctx),
            Stmt::If { cond, then_branch, else_branch } => self.lower_if_else(cond, then_branch, else_branch, fn_ctx),
            Stmt::While { cond, body } => self.lower_while(cond, body, fn_ctx),
            Stmt::Expr(expr) => self.lower_expr_stmt(expr, fn_ctx),
            Stmt::Block(stmts) => {
                let mut output = vec![];
                for stmt in stmts {
                    output.extend(self.lower_stmt(stmt, fn_ctx)?);
                }
                Ok(output)
            }
            Stmt::Return(value) => self.lower_return(value.as_ref(), fn_ctx),
        }
    }

    fn lower_assign(&mut self, target: &Expr, value: &Expr, fn_ctx: &mut FnCtx) -> StmtLoweringResult {
        let lhs = self.lower_expr(target, ExprPos::AssignTarget, fn_ctx)?;
        let rhs = self.lower_expr(value, ExprPos::AssignRhs, fn_ctx)?;

        let mut output = lhs.computation;
        output.extend(rhs.computation);

        let ty = IrType::from(&target.ty);
        let dest = match lhs.code {
            Lowered::PendingFieldStore { object, field } => {
                let rhs = ExprLowering::with_computation(rhs.code, vec![]);
                let (value, value_comp) = self.into_element(rhs, field.ty.clone())?;
                output.extend(value_comp);
                output.push(IRInstr::PutField { object, field, value });
                return Ok(output);
            }
            Lowered::Value(Element::Operand(op)) => Dest::Var(op),
            Lowered::Expr(IRExpr::Index(access)) => Dest::Index(access),
            other => {
                return Err(CompileError::not_implemented(format!("assignment to {other:?}")));
            }
        };

        let rhs = match rhs.code {
            Lowered::Value(elem) => IRExpr::Element(elem),
            Lowered::Expr(expr) => expr,
            Lowered::PendingFieldStore { field, .. } => {
                return Err(CompileError::not_implemented(format!("field store to '{}' used as a value", field.name)));
            }
        };
        output.push(IRInstr::Assign { dest, ty, rhs });
        Ok(output)
    }

    /// `if(c) goto if_n; <else> goto endif_n; if_n: <then> endif_n:`
    fn lower_if_else(
        &mut self,
        cond: &Expr,
        then_branch: &Stmt,
        else_branch: &Stmt,
        fn_ctx: &mut FnCtx
    ) -> StmtLoweringResult {
        let (cond, mut output) = self.lower_operand(cond, fn_ctx)?;

        let id = self.next_label(LabelKind::If);
        let then_label = Label::new(LabelKind::If, id);
        let end_label = Label::endif(id);

        output.push(IRInstr::CondBranch {
            cond: IRExpr::Element(cond),
            target: then_label.clone(),
        });
        output.extend(self.lower_stmt(else_branch, fn_ctx)?);
        output.push(IRInstr::Goto(end_label.clone()));
        output.push(IRInstr::Label(then_label));
        output.extend(self.lower_stmt(then_branch, fn_ctx)?);
        output.push(IRInstr::Label(end_label));
        Ok(output)
    }

    /// The condition is lowered twice: once as the entry test and once at
    /// the bottom of the body, so each evaluation gets fresh temps.
    fn lower_while(&mut self, cond: &Expr, body: &Stmt, fn_ctx: &mut FnCtx) -> StmtLoweringResult {
        let (entry_cond, mut output) = self.lower_operand(cond, fn_ctx)?;

        let body_label = Label::new(LabelKind::While, self.next_label(LabelKind::While));
        let end_label = Label::new(LabelKind::EndWhile, self.next_label(LabelKind::EndWhile));

        output.push(IRInstr::CondBranch {
            cond: IRExpr::Element(entry_cond),
            target: body_label.clone(),
        });
        output.push(IRInstr::Goto(end_label.clone()));
        output.push(IRInstr::Label(body_label.clone()));
        output.extend(self.lower_stmt(body, fn_ctx)?);

        let (loop_cond, loop_comp) = self.lower_operand(cond, fn_ctx)?;
        output.extend(loop_comp);
        output.push(IRInstr::CondBranch {
            cond: IRExpr::Element(loop_cond),
            target: body_label,
        });
        output.push(IRInstr::Label(end_label));
        Ok(output)
    }

    fn lower_expr_stmt(&mut self, expr: &Expr, fn_ctx: &mut FnCtx) -> StmtLoweringResult {
        let lowered = self.lower_expr(expr, ExprPos::Statement, fn_ctx)?;
        let mut output = lowered.computation;
        if let Lowered::Expr(IRExpr::Call(call)) = lowered.code {
            output.push(IRInstr::Call(call));
        }
        Ok(output)
    }

    fn lower_return(&mut self, value: Option<&Expr>, fn_ctx: &mut FnCtx) -> StmtLoweringResult {
        let ty = fn_ctx.ret.clone();
        let Some(value) = value else {
            return Ok(vec![IRInstr::Return { ty, value: None }]);
        };
        if ty.is_void() {
            return Ok(vec![IRInstr::Return { ty, value: None }]);
        }

        let (value, mut output) = self.lower_operand(value, fn_ctx)?;
        output.push(IRInstr::Return {
            ty,
            value: Some(value),
        });
        Ok(output)
    }
}
