// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

pub mod ir_operands;
pub mod ir_instr;
pub mod ir_class;
pub mod register;
mod printer;

pub use jmmc_ctx::{Label, LabelId};

/// Register number of `this` in instance methods.
pub const THIS_REGISTER: usize = 0;

pub const THIS_NAME: &str = "this";
