// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

/// Knobs of the bytecode emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Rewrite `x := x + c` into `iinc` when `c` fits in a signed byte.
    pub iinc_peephole: bool,

    /// Prefix of every instruction line in the assembly output.
    pub indent: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            iinc_peephole: true,
            indent: "   ".to_string(),
        }
    }
}
