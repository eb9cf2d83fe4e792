// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

mod ty;
mod ir_type;

pub use ty::*;
pub use ir_type::*;
