// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use crate::{CodegenOptions, CompilerCtx, NamingCtx};

pub struct CompilerCtxBuilder {
    naming: Option<NamingCtx>,
    options: Option<CodegenOptions>,
    iinc_peephole: Option<bool>,
    indent: Option<String>,
}

impl CompilerCtxBuilder {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            naming: None,
            options: None,
            iinc_peephole: None,
            indent: None,
        }
    }

    pub fn naming(mut self, naming: NamingCtx) -> Self {
        self.naming = Some(naming);
        self
    }

    pub fn options(mut self, options: CodegenOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn iinc_peephole(mut self, enabled: bool) -> Self {
        self.iinc_peephole = Some(enabled);
        self
    }

    pub fn indent(mut self, indent: &str) -> Self {
        self.indent = Some(indent.to_string());
        self
    }

    pub fn build(self) -> CompilerCtx {
        let mut options = self.options.unwrap_or_default();
        if let Some(enabled) = self.iinc_peephole {
            options.iinc_peephole = enabled;
        }
        if let Some(indent) = self.indent {
            options.indent = indent;
        }
        CompilerCtx::new(self.naming.unwrap_or_default(), options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let ctx = CompilerCtxBuilder::new().build();
        assert!(ctx.options.iinc_peephole);
        assert_eq!(ctx.options.indent, "   ");
    }

    #[test]
    fn test_builder_overrides() {
        let ctx = CompilerCtxBuilder::new()
            .iinc_peephole(false)
            .indent("\t")
            .build();
        assert!(!ctx.options.iinc_peephole);
        assert_eq!(ctx.options.indent, "\t");
    }
}
