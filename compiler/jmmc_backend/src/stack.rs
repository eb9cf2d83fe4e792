// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

/// Operand stack height while emitting one method. `max` is the value of
/// `.limit stack`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StackDepth {
    pub current: usize,
    pub max: usize,
}

impl StackDepth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(self, n: usize) -> Self {
        let current = self.current + n;
        Self {
            current,
            max: self.max.max(current),
        }
    }

    /// `None` when more values are popped than the stack holds.
    pub fn pop(self, n: usize) -> Option<Self> {
        let current = self.current.checked_sub(n)?;
        Some(Self {
            current,
            max: self.max,
        })
    }
}
