// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use jmmc_types::IrType;

/// A named value: local, parameter, temporary, field or `this`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub name: String,
    pub ty: IrType,
}

impl Operand {
    pub fn new(name: impl Into<String>, ty: IrType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn is_this(&self) -> bool {
        self.name == crate::THIS_NAME
    }
}

/// A constant. Booleans are stored as `1`/`0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub value: String,
    pub ty: IrType,
}

impl Literal {
    pub fn int(value: i32) -> Self {
        Self {
            value: value.to_string(),
            ty: IrType::I32,
        }
    }

    pub fn boolean(value: bool) -> Self {
        Self {
            value: if value { "1" } else { "0" }.to_string(),
            ty: IrType::Bool,
        }
    }

    /// Numeric value of an integer or boolean literal.
    pub fn as_int(&self) -> Option<i32> {
        self.value.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Operand(Operand),
    Literal(Literal),
}

macro_rules! check_element_kind {
    ($fn_name:ident, $variant:ident) => {
        pub fn $fn_name(&self) -> bool {
            matches!(self, Self::$variant(..))
        }
    };
}

impl Element {
    pub fn var(name: impl Into<String>, ty: IrType) -> Self {
        Element::Operand(Operand::new(name, ty))
    }

    pub fn int(value: i32) -> Self {
        Element::Literal(Literal::int(value))
    }

    pub fn boolean(value: bool) -> Self {
        Element::Literal(Literal::boolean(value))
    }

    pub fn ty(&self) -> &IrType {
        match self {
            Element::Operand(op) => &op.ty,
            Element::Literal(lit) => &lit.ty,
        }
    }

    check_element_kind!(is_literal, Literal);
    check_element_kind!(is_operand, Operand);

    pub fn as_operand(&self) -> Option<&Operand> {
        match self {
            Element::Operand(op) => Some(op),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Element::Literal(lit) => Some(lit),
            _ => None,
        }
    }
}

impl From<Operand> for Element {
    fn from(value: Operand) -> Self {
        Element::Operand(value)
    }
}

impl From<Literal> for Element {
    fn from(value: Literal) -> Self {
        Element::Literal(value)
    }
}

/// `array[index].T`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayOperand {
    pub array: Operand,
    pub index: Box<Element>,
    pub elem_ty: IrType,
}

impl ArrayOperand {
    pub fn new(array: Operand, index: Element) -> Self {
        let elem_ty = array.ty.element().cloned().unwrap_or(IrType::I32);
        Self {
            array,
            index: Box::new(index),
            elem_ty,
        }
    }
}
