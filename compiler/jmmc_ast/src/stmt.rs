// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use crate::expr::Expr;

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `target = value;` where `target` is a variable, field or array element.
    Assign {
        target: Expr,
        value: Expr,
    },

    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Box<Stmt>,
    },

    While {
        cond: Expr,
        body: Box<Stmt>,
    },

    Expr(Expr),

    Block(Vec<Stmt>),

    Return(Option<Expr>),
}

impl Stmt {
    pub fn assign(target: Expr, value: Expr) -> Self {
        Stmt::Assign { target, value }
    }

    pub fn if_else(cond: Expr, then_branch: Stmt, else_branch: Stmt) -> Self {
        Stmt::If {
            cond,
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn while_loop(cond: Expr, body: Stmt) -> Self {
        Stmt::While {
            cond,
            body: Box::new(body),
        }
    }

    pub fn is_return(&self) -> bool {
        matches!(self, Stmt::Return(_))
    }
}
