// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::fmt::Display;

/// Counter for generating unique temporary names.
pub type TempCounter = usize;

pub type LabelId = usize;

/// Families of generated names. Each family draws from its own counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    /// Taken branch of `&&` and `<`.
    True,

    /// Join point of `&&` and `<`.
    End,

    /// Start of a loop body.
    While,

    EndWhile,

    /// Shared by the `if_n`/`endif_n` pair of one conditional.
    If,

    /// Suffix of the `__varargs_array_n` holder variables.
    VarArgs,
}

impl LabelKind {
    const COUNT: usize = 6;

    fn slot(&self) -> usize {
        match self {
            LabelKind::True => 0,
            LabelKind::End => 1,
            LabelKind::While => 2,
            LabelKind::EndWhile => 3,
            LabelKind::If => 4,
            LabelKind::VarArgs => 5,
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            LabelKind::True => "true_",
            LabelKind::End => "end_",
            LabelKind::While => "whilebody_",
            LabelKind::EndWhile => "endwhile_",
            LabelKind::If => "if_",
            LabelKind::VarArgs => "__varargs_array_",
        }
    }
}

/// A branch target as it appears in both IR and assembly text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    pub fn new(kind: LabelKind, id: LabelId) -> Self {
        Self(format!("{}{}", kind.prefix(), id))
    }

    /// Closing label of the `if_n` conditional with the same id.
    pub fn endif(id: LabelId) -> Self {
        Self(format!("endif_{id}"))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fresh-name supply for one compilation run.
///
/// Counters start at zero and only grow; they are never reset between
/// methods, so every generated name is unique within the unit.
#[derive(Debug, Default, Clone)]
pub struct NamingCtx {
    temp_counter: TempCounter,
    label_counters: [LabelId; LabelKind::COUNT],
}

impl NamingCtx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `tmpN` and advances the temp counter.
    pub fn next_temp(&mut self) -> String {
        let nt = self.temp_counter;
        self.temp_counter += 1;
        format!("tmp{nt}")
    }

    /// Returns the next id of the given family and advances only that family.
    pub fn next_label(&mut self, kind: LabelKind) -> LabelId {
        let slot = &mut self.label_counters[kind.slot()];
        let current = *slot;
        *slot += 1;
        current
    }

    /// Name of the holder variable for the next packed varargs array.
    pub fn next_varargs_holder(&mut self) -> String {
        let id = self.next_label(LabelKind::VarArgs);
        Label::new(LabelKind::VarArgs, id).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temps_are_sequential() {
        let mut naming = NamingCtx::new();
        assert_eq!(naming.next_temp(), "tmp0");
        assert_eq!(naming.next_temp(), "tmp1");
        assert_eq!(naming.next_temp(), "tmp2");
    }

    #[test]
    fn test_label_families_are_independent() {
        let mut naming = NamingCtx::new();
        assert_eq!(naming.next_label(LabelKind::True), 0);
        assert_eq!(naming.next_label(LabelKind::True), 1);
        assert_eq!(naming.next_label(LabelKind::If), 0);
        assert_eq!(naming.next_label(LabelKind::While), 0);
        assert_eq!(naming.next_label(LabelKind::True), 2);

        // temps are not affected by labels
        assert_eq!(naming.next_temp(), "tmp0");
    }

    #[test]
    fn test_label_rendering() {
        assert_eq!(Label::new(LabelKind::True, 3).to_string(), "true_3");
        assert_eq!(Label::new(LabelKind::End, 3).to_string(), "end_3");
        assert_eq!(Label::new(LabelKind::While, 0).to_string(), "whilebody_0");
        assert_eq!(Label::new(LabelKind::EndWhile, 0).to_string(), "endwhile_0");
        assert_eq!(Label::new(LabelKind::If, 1).to_string(), "if_1");
        assert_eq!(Label::endif(1).to_string(), "endif_1");
    }

    #[test]
    fn test_varargs_holders() {
        let mut naming = NamingCtx::new();
        assert_eq!(naming.next_varargs_holder(), "__varargs_array_0");
        assert_eq!(naming.next_varargs_holder(), "__varargs_array_1");
    }
}
