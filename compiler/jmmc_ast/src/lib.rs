// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

pub mod expr;
pub mod stmt;
pub mod decl;

pub use expr::*;
pub use stmt::*;
pub use decl::*;
