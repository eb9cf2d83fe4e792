// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use jmmc_ast::*;
use jmmc_ctx::{Label, LabelKind};
use jmmc_errors::CompileError;
use jmmc_ir::ir_instr::*;
use jmmc_ir::ir_operands::*;
use jmmc_types::{IrType, Type};

use crate::fn_ctx::FnCtx;
use crate::lowerer::IRLowerer;
use crate::typedefs::*;

impl IRLowerer<'_> {
    pub fn lower_expr(&mut self, expr: &Expr, pos: ExprPos, fn_ctx: &mut FnCtx) -> ExprLoweringResult {
        match &expr.kind {
            ExprKind::IntLiteral(value) => Ok(ExprLowering::value(Element::int(*value))),
            ExprKind::BoolLiteral(value) => Ok(ExprLowering::value(Element::boolean(*value))),
            ExprKind::This => Ok(ExprLowering::value(Element::Operand(self.this_operand()))),
            ExprKind::VarRef(name) => self.lower_var_ref(name, &expr.ty, pos, fn_ctx),
            ExprKind::Binary { op: BinOp::And, lhs, rhs } => self.lower_and(lhs, rhs, fn_ctx),
            ExprKind::Binary { op: BinOp::Lt, lhs, rhs } => self.lower_less_than(lhs, rhs, fn_ctx),
            ExprKind::Binary { op, lhs, rhs } => self.lower_arithmetic(*op, lhs, rhs, pos, fn_ctx),
            ExprKind::Not(operand) => self.lower_not(operand, pos, fn_ctx),
            ExprKind::Paren(inner) => self.lower_expr(inner, ExprPos::Operand, fn_ctx),
            ExprKind::NewObject(class) => Ok(self.lower_new_object(class)),
            ExprKind::NewArray { elem, size } => self.lower_new_array(elem, size, pos, fn_ctx),
            ExprKind::ArrayInit(items) => {
                let elem_ty = IrType::from(&expr.ty.element());
                let (holder, computation) = self.pack_array(elem_ty, items, fn_ctx)?;
                Ok(ExprLowering::with_computation(Lowered::Value(holder), computation))
            }
            ExprKind::ArrayAccess { array, index } => self.lower_array_access(array, index, pos, fn_ctx),
            ExprKind::ArrayLength(array) => self.lower_array_length(array, fn_ctx),
            ExprKind::MethodCall { receiver, method, args } => {
                self.lower_method_call(receiver, method, args, &expr.ty, pos, fn_ctx)
            }
        }
    }

    fn lower_var_ref(&mut self, name: &str, ty: &Type, pos: ExprPos, fn_ctx: &mut FnCtx) -> ExprLoweringResult {
        let ir_ty = IrType::from(ty);
        if !self.is_field(name, fn_ctx) {
            return Ok(ExprLowering::value(Element::var(name, ir_ty)));
        }

        let field = Operand::new(name, ir_ty.clone());
        if matches!(pos, ExprPos::AssignTarget) {
            return Ok(ExprLowering::with_computation(
                Lowered::PendingFieldStore {
                    object: self.this_operand(),
                    field,
                },
                vec![]
            ));
        }

        let mut computation = vec![];
        let read = IRExpr::GetField {
            object: self.this_operand(),
            field,
        };
        let temp = self.store_in_temp(read, ir_ty, &mut computation);
        Ok(ExprLowering::with_computation(Lowered::Value(temp), computation))
    }

    fn lower_arithmetic(
        &mut self,
        op: BinOp,
        lhs: &Expr,
        rhs: &Expr,
        pos: ExprPos,
        fn_ctx: &mut FnCtx
    ) -> ExprLoweringResult {
        let ir_op = match op {
            BinOp::Add => IRBinOp::Add,
            BinOp::Sub => IRBinOp::Sub,
            BinOp::Mul => IRBinOp::Mul,
            BinOp::Div => IRBinOp::Div,
            BinOp::And | BinOp::Lt => {
                return Err(CompileError::not_implemented(format!("'{}' as arithmetic", op.symbol())));
            }
        };
        let (left, mut computation) = self.lower_operand(lhs, fn_ctx)?;
        let (right, right_comp) = self.lower_operand(rhs, fn_ctx)?;
        computation.extend(right_comp);

        let binary = IRExpr::Binary {
            op: ir_op,
            lhs: left,
            rhs: right,
        };
        Ok(self.finish_expr(binary, ir_op.result_type(), pos, computation))
    }

    /// `&&` with short-circuit: the right operand is evaluated only on the
    /// `true_n` path.
    fn lower_and(&mut self, lhs: &Expr, rhs: &Expr, fn_ctx: &mut FnCtx) -> ExprLoweringResult {
        let (left, mut computation) = self.lower_operand(lhs, fn_ctx)?;

        let true_label = Label::new(LabelKind::True, self.next_label(LabelKind::True));
        computation.push(IRInstr::CondBranch {
            cond: IRExpr::Element(left),
            target: true_label.clone(),
        });

        let result = self.next_temp(IrType::Bool);
        computation.push(IRInstr::assign_var(result.clone(), Element::boolean(false).into()));

        let end_label = Label::new(LabelKind::End, self.next_label(LabelKind::End));
        computation.push(IRInstr::Goto(end_label.clone()));
        computation.push(IRInstr::Label(true_label));

        let (right, right_comp) = self.lower_operand(rhs, fn_ctx)?;
        computation.extend(right_comp);
        computation.push(IRInstr::assign_var(result.clone(), right.into()));
        computation.push(IRInstr::Label(end_label));

        Ok(ExprLowering::with_computation(Lowered::Value(Element::Operand(result)), computation))
    }

    fn lower_less_than(&mut self, lhs: &Expr, rhs: &Expr, fn_ctx: &mut FnCtx) -> ExprLoweringResult {
        let (left, mut computation) = self.lower_operand(lhs, fn_ctx)?;
        let (right, right_comp) = self.lower_operand(rhs, fn_ctx)?;
        computation.extend(right_comp);

        let true_label = Label::new(LabelKind::True, self.next_label(LabelKind::True));
        computation.push(IRInstr::CondBranch {
            cond: IRExpr::Binary {
                op: IRBinOp::Lt,
                lhs: left,
                rhs: right,
            },
            target: true_label.clone(),
        });

        let result = self.next_temp(IrType::Bool);
        computation.push(IRInstr::assign_var(result.clone(), Element::boolean(false).into()));

        let end_label = Label::new(LabelKind::End, self.next_label(LabelKind::End));
        computation.push(IRInstr::Goto(end_label.clone()));
        computation.push(IRInstr::Label(true_label));
        computation.push(IRInstr::assign_var(result.clone(), Element::boolean(true).into()));
        computation.push(IRInstr::Label(end_label));

        Ok(ExprLowering::with_computation(Lowered::Value(Element::Operand(result)), computation))
    }

    fn lower_not(&mut self, operand: &Expr, pos: ExprPos, fn_ctx: &mut FnCtx) -> ExprLoweringResult {
        let (value, computation) = self.lower_operand(operand, fn_ctx)?;
        Ok(self.finish_expr(IRExpr::Not(value), IrType::Bool, pos, computation))
    }

    fn lower_new_object(&mut self, class: &str) -> ExprLowering {
        let class_ty = IrType::Class(class.to_string());
        let mut computation = vec![];
        let temp = self.next_temp(class_ty);
        computation.push(IRInstr::assign_var(temp.clone(), IRExpr::New(class.to_string())));
        computation.push(IRInstr::Call(CallExpr {
            kind: CallKind::Special,
            target: CallTarget::Object(temp.clone()),
            method: "<init>".to_string(),
            args: vec![],
            ret: IrType::Void,
        }));
        ExprLowering::with_computation(Lowered::Value(Element::Operand(temp)), computation)
    }

    fn lower_new_array(&mut self, elem: &Type, size: &Expr, pos: ExprPos, fn_ctx: &mut FnCtx) -> ExprLoweringResult {
        let (size, computation) = self.lower_operand(size, fn_ctx)?;
        let ty = IrType::array_of(IrType::from(elem));
        let alloc = IRExpr::NewArray {
            size,
            ty: ty.clone(),
        };
        Ok(self.finish_expr(alloc, ty, pos, computation))
    }

    pub(crate) fn lower_array_operand(
        &mut self,
        array: &Expr,
        index: &Expr,
        fn_ctx: &mut FnCtx
    ) -> ArrayOperandResult {
        let (base, mut computation) = self.lower_variable(array, fn_ctx)?;
        let (index, index_comp) = self.lower_operand(index, fn_ctx)?;
        computation.extend(index_comp);
        Ok((ArrayOperand::new(base, index), computation))
    }

    fn lower_array_access(&mut self, array: &Expr, index: &Expr, pos: ExprPos, fn_ctx: &mut FnCtx) -> ExprLoweringResult {
        let (access, computation) = self.lower_array_operand(array, index, fn_ctx)?;
        let elem_ty = access.elem_ty.clone();
        if matches!(pos, ExprPos::AssignTarget) {
            return Ok(ExprLowering::with_computation(Lowered::Expr(IRExpr::Index(access)), computation));
        }
        Ok(self.finish_expr(IRExpr::Index(access), elem_ty, pos, computation))
    }

    fn lower_array_length(&mut self, array: &Expr, fn_ctx: &mut FnCtx) -> ExprLoweringResult {
        let (base, mut computation) = self.lower_variable(array, fn_ctx)?;
        let temp = self.store_in_temp(IRExpr::ArrayLength(base), IrType::I32, &mut computation);
        Ok(ExprLowering::with_computation(Lowered::Value(temp), computation))
    }

    /// Allocates an array of `items.len()` elements and fills it in source
    /// order through a `__varargs_array_n` holder. An empty pack is only the
    /// allocation.
    pub(crate) fn pack_array(
        &mut self,
        elem_ty: IrType,
        items: &[Expr],
        fn_ctx: &mut FnCtx
    ) -> OperandResult {
        let array_ty = IrType::array_of(elem_ty);
        let mut computation = vec![];
        let alloc = IRExpr::NewArray {
            size: Element::int(items.len() as i32),
            ty: array_ty.clone(),
        };
        let temp = self.store_in_temp(alloc, array_ty.clone(), &mut computation);
        if items.is_empty() {
            return Ok((temp, computation));
        }

        let holder = self.next_varargs_holder(array_ty);
        computation.push(IRInstr::assign_var(holder.clone(), temp.into()));

        for (idx, item) in items.iter().enumerate() {
            let (value, item_comp) = self.lower_operand(item, fn_ctx)?;
            computation.extend(item_comp);

            let slot = ArrayOperand::new(holder.clone(), Element::int(idx as i32));
            let ty = slot.elem_ty.clone();
            computation.push(IRInstr::Assign {
                dest: Dest::Index(slot),
                ty,
                rhs: value.into(),
            });
        }
        Ok((Element::Operand(holder), computation))
    }
}
