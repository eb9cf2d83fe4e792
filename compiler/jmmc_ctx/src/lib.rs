// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

pub mod naming;
pub mod options;
pub mod builder;
mod ctx;

pub use ctx::*;
pub use naming::*;
pub use options::*;
