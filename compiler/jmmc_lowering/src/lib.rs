// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

pub mod typedefs;
pub mod fn_ctx;
mod lowerer;
mod expr;
mod call;
mod stmt;

pub use lowerer::IRLowerer;
pub use typedefs::*;
