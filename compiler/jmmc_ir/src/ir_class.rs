// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use jmmc_types::IrType;

use crate::ir_instr::IRInstr;
use crate::ir_operands::Operand;
use crate::register::RegisterTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IRMethod {
    pub name: String,
    pub is_public: bool,
    pub is_static: bool,
    pub is_varargs: bool,
    pub params: Vec<Operand>,
    pub ret: IrType,
    pub body: Vec<IRInstr>,

    /// Variable name to JVM local slot.
    pub registers: RegisterTable,
}

impl IRMethod {
    pub fn new(name: &str, params: Vec<Operand>, ret: IrType) -> Self {
        Self {
            name: name.to_string(),
            is_public: true,
            is_static: false,
            is_varargs: false,
            params,
            ret,
            body: vec![],
            registers: RegisterTable::default(),
        }
    }

    /// Assigns registers in order of first appearance. Any previous table is
    /// replaced.
    pub fn assign_registers(&mut self) {
        self.registers = RegisterTable::sequential(self);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IRClass {
    pub name: String,
    pub super_name: Option<String>,
    pub imports: Vec<String>,
    pub fields: Vec<Operand>,
    pub methods: Vec<IRMethod>,
}

impl IRClass {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            super_name: None,
            imports: vec![],
            fields: vec![],
            methods: vec![],
        }
    }

    pub fn method(&self, name: &str) -> Option<&IRMethod> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&Operand> {
        self.fields.iter().find(|f| f.name == name)
    }
}
