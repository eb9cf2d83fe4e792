// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use jmmc_ast::*;
use jmmc_errors::CompileResult;
use jmmc_ir::ir_instr::*;
use jmmc_ir::ir_operands::*;
use jmmc_symbol::MethodInfo;
use jmmc_types::{IrType, Type};
use log::debug;

use crate::fn_ctx::FnCtx;
use crate::lowerer::IRLowerer;
use crate::typedefs::*;

/// How a call reaches its callee.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Dispatch {
    /// The receiver is a value: `this`, a variable or an object of a known
    /// class.
    Virtual,

    /// The receiver names a class: the current one or an import.
    Static(String),

    /// Nothing matched. Treated as a static call on whatever the receiver
    /// names.
    External(String),
}

impl IRLowerer<'_> {
    fn resolve_dispatch(&self, receiver: &Expr, fn_ctx: &FnCtx) -> Dispatch {
        let symbols = self.symbols;
        match &receiver.kind {
            ExprKind::This => return Dispatch::Virtual,
            ExprKind::VarRef(name) => {
                if fn_ctx.declares(name) || symbols.field(name).is_some() {
                    return Dispatch::Virtual;
                }
                if *name == symbols.class_name || symbols.is_imported(name) {
                    return Dispatch::Static(name.clone());
                }
            }
            _ => {}
        }

        let ty = &receiver.ty;
        let known_class = ty.name == symbols.class_name
            || symbols.is_super(&ty.name)
            || symbols.is_imported(&ty.name);
        if !ty.is_array && known_class {
            return Dispatch::Virtual;
        }

        let target = receiver.var_name().unwrap_or(ty.name.as_str()).to_string();
        Dispatch::External(target)
    }

    pub(crate) fn lower_method_call(
        &mut self,
        receiver: &Expr,
        method: &str,
        args: &[Expr],
        ty: &Type,
        pos: ExprPos,
        fn_ctx: &mut FnCtx
    ) -> ExprLoweringResult {
        let mut computation = vec![];
        let symbols = self.symbols;
        let class_name = symbols.class_name.clone();

        let (kind, target, on_current_class) = match self.resolve_dispatch(receiver, fn_ctx) {
            Dispatch::Virtual => {
                let (object, object_comp) = self.lower_variable(receiver, fn_ctx)?;
                computation.extend(object_comp);
                let on_current = object.ty.class_name() == Some(class_name.as_str());
                (CallKind::Virtual, CallTarget::Object(object), on_current)
            }
            Dispatch::Static(class) => {
                let on_current = class == class_name;
                (CallKind::Static, CallTarget::Class(class), on_current)
            }
            Dispatch::External(class) => {
                debug!("no dispatch rule for '{class}.{method}' in '{}', assuming static", fn_ctx.name());
                (CallKind::Static, CallTarget::Class(class), false)
            }
        };

        let callee = if on_current_class {
            symbols.method(method)
        } else {
            None
        };

        let (ir_args, args_comp) = self.lower_call_args(args, callee, fn_ctx)?;
        computation.extend(args_comp);

        let ret = match callee {
            Some(info) => IrType::from(&info.return_type),
            None if pos != ExprPos::Statement => IrType::from(ty),
            None => IrType::Void,
        };

        let call = IRExpr::Call(CallExpr {
            kind,
            target,
            method: method.to_string(),
            args: ir_args,
            ret: ret.clone(),
        });

        if pos == ExprPos::Statement {
            return Ok(ExprLowering::with_computation(Lowered::Expr(call), computation));
        }
        let temp = self.store_in_temp(call, ret, &mut computation);
        Ok(ExprLowering::with_computation(Lowered::Value(temp), computation))
    }

    /// Lowers arguments left to right. Trailing arguments of a variadic
    /// callee are packed into one array unless the caller already passes
    /// an array of the variadic type.
    fn lower_call_args(
        &mut self,
        args: &[Expr],
        callee: Option<&MethodInfo>,
        fn_ctx: &mut FnCtx
    ) -> CompileResult<(Vec<Element>, Vec<IRInstr>)> {
        let mut elements = vec![];
        let mut computation = vec![];

        let packing = callee.and_then(|info| {
            let varargs_ty = info.varargs_type()?;
            let fixed = info.fixed_arity();
            let passes_array = args.len() == fixed + 1 && args[fixed].ty == *varargs_ty;
            if passes_array || args.len() < fixed {
                None
            } else {
                Some((fixed, varargs_ty.element()))
            }
        });

        let fixed = packing.as_ref().map_or(args.len(), |(fixed, _)| *fixed);
        for arg in &args[..fixed] {
            let (elem, arg_comp) = self.lower_operand(arg, fn_ctx)?;
            computation.extend(arg_comp);
            elements.push(elem);
        }

        if let Some((fixed, elem_ty)) = packing {
            let (array, pack_comp) = self.pack_array(IrType::from(&elem_ty), &args[fixed..], fn_ctx)?;
            computation.extend(pack_comp);
            elements.push(array);
        }
        Ok((elements, computation))
    }
}
