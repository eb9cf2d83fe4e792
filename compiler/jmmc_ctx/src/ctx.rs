// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use crate::{CodegenOptions, NamingCtx};

/// State shared by both stages of one compilation run.
#[derive(Debug, Default)]
pub struct CompilerCtx {
    pub naming: NamingCtx,

    pub options: CodegenOptions,
}

impl CompilerCtx {
    pub fn new(naming: NamingCtx, options: CodegenOptions) -> Self {
        Self { naming, options }
    }
}
