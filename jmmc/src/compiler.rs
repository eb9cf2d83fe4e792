// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::cell::RefCell;
use std::rc::Rc;

use jmmc_ast::Program;
use jmmc_backend::{CodeGenerator, JasminGenerator};
use jmmc_ctx::builder::CompilerCtxBuilder;
use jmmc_ctx::{CodegenOptions, CompilerCtx};
use jmmc_errors::CompileResult;
use jmmc_ir::ir_class::IRClass;
use jmmc_lowering::IRLowerer;
use jmmc_symbol::SymbolTable;
use log::debug;

/// Text produced for one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutput {
    pub ir: String,
    pub jasmin: String,
}

/// Runs lowering and Jasmin emission over an analysed program.
///
/// Every run gets its own `CompilerCtx`, so temporaries and labels are
/// numbered from zero each time and repeated runs produce the same text.
#[derive(Debug, Clone, Default)]
pub struct CompilerPipeline {
    options: CodegenOptions,
}

impl CompilerPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CodegenOptions) -> Self {
        Self { options }
    }

    fn fresh_ctx(&self) -> Rc<RefCell<CompilerCtx>> {
        let ctx = CompilerCtxBuilder::new()
            .options(self.options.clone())
            .build();
        Rc::new(RefCell::new(ctx))
    }

    /// Lowers `program` to IR without emitting assembly.
    pub fn lower_only(&self, program: &Program, symbols: &SymbolTable) -> CompileResult<IRClass> {
        let ctx = self.fresh_ctx();
        self.lower_with(ctx, program, symbols)
    }

    pub fn compile(&self, program: &Program, symbols: &SymbolTable) -> CompileResult<CompileOutput> {
        let ctx = self.fresh_ctx();
        let class = self.lower_with(ctx.clone(), program, symbols)?;

        let cg = JasminGenerator::new(ctx);
        let jasmin = cg.gen_class(&class)?;
        debug!("emitted class '{}'", class.name);

        Ok(CompileOutput {
            ir: class.to_string(),
            jasmin,
        })
    }

    fn lower_with(
        &self,
        ctx: Rc<RefCell<CompilerCtx>>,
        program: &Program,
        symbols: &SymbolTable
    ) -> CompileResult<IRClass> {
        debug!("lowering class '{}'", program.class.name);
        let mut lowerer = IRLowerer::new(ctx, symbols);
        lowerer.lower_program(program)
    }
}
