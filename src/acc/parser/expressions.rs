//! Expression productions
//!
//! The slice of host-language expression grammar clauses reference:
//! ternary over binary-operator chains (precedence climbing) over
//! unary/postfix (array access, element access, call, sizeof) over primary.

use crate::acc::ast::node::{
    ArrayAccessExpression, BinaryExpression, ConstantNode, ElementAccessExpression,
    FunctionCallExpression, IdentifierNode, ListCell, ListElemType, ListNode, NodeData, NodeId,
    ParenExpression, SizeofExpression, StringLiteralNode, TernaryExpression, UnaryExpression,
};
use crate::acc::parser::{Parser, SyntaxError};
use crate::acc::token::TokenKind;

/// Binding strength of a binary operator; `None` for non-operators.
fn binary_precedence(kind: TokenKind) -> Option<u8> {
    match kind {
        TokenKind::PipePipe => Some(1),
        TokenKind::AmpAmp => Some(2),
        TokenKind::Pipe => Some(3),
        TokenKind::Caret => Some(4),
        TokenKind::Amp => Some(5),
        TokenKind::EqEq | TokenKind::NotEq => Some(6),
        TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => Some(7),
        TokenKind::Shl | TokenKind::Shr => Some(8),
        TokenKind::Plus | TokenKind::Minus => Some(9),
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some(10),
        _ => None,
    }
}

impl<'a> Parser<'a> {
    /// Conditional-expression: the entry point for every expression slot.
    pub(crate) fn parse_expression(&mut self) -> Result<NodeId, SyntaxError> {
        let condition = self.parse_binary_expr(1)?;
        if self.peek_kind() != Some(TokenKind::Question) {
            return Ok(condition);
        }
        let question = self.eat();
        let then_expr = self.parse_expression()?;
        let colon = self.expect(TokenKind::Colon, "`:`")?;
        let else_expr = self.parse_expression()?;
        Ok(self.emit(NodeData::TernaryExpression(TernaryExpression {
            condition: Some(condition),
            question,
            then_expr: Some(then_expr),
            colon,
            else_expr: Some(else_expr),
        })))
    }

    fn parse_binary_expr(&mut self, min_prec: u8) -> Result<NodeId, SyntaxError> {
        let mut lhs = self.parse_unary_expr()?;
        while let Some(kind) = self.peek_kind() {
            let prec = match binary_precedence(kind) {
                Some(prec) if prec >= min_prec => prec,
                _ => break,
            };
            let operator = self.eat();
            let rhs = self.parse_binary_expr(prec + 1)?;
            lhs = self.emit(NodeData::BinaryExpression(BinaryExpression {
                lhs: Some(lhs),
                operator,
                rhs: Some(rhs),
            }));
        }
        Ok(lhs)
    }

    fn parse_unary_expr(&mut self) -> Result<NodeId, SyntaxError> {
        match self.peek_kind() {
            Some(
                TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Bang
                | TokenKind::Tilde
                | TokenKind::Star
                | TokenKind::Amp,
            ) => {
                let operator = self.eat();
                let operand = self.parse_unary_expr()?;
                Ok(self.emit(NodeData::UnaryExpression(UnaryExpression {
                    operator,
                    operand: Some(operand),
                })))
            }
            Some(TokenKind::Sizeof) => {
                let kw_sizeof = self.eat();
                if self.peek_kind() == Some(TokenKind::LParen) {
                    let lparen = self.eat();
                    let operand = self.parse_expression()?;
                    let rparen = self.expect(TokenKind::RParen, "`)`")?;
                    Ok(self.emit(NodeData::SizeofExpression(SizeofExpression {
                        kw_sizeof,
                        lparen: Some(lparen),
                        operand: Some(operand),
                        rparen: Some(rparen),
                    })))
                } else {
                    let operand = self.parse_unary_expr()?;
                    Ok(self.emit(NodeData::SizeofExpression(SizeofExpression {
                        kw_sizeof,
                        lparen: None,
                        operand: Some(operand),
                        rparen: None,
                    })))
                }
            }
            _ => self.parse_postfix_expr(),
        }
    }

    fn parse_postfix_expr(&mut self) -> Result<NodeId, SyntaxError> {
        let mut expr = self.parse_primary_expr()?;
        loop {
            match self.peek_kind() {
                Some(TokenKind::LBracket) => {
                    let lbracket = self.eat();
                    let index = self.parse_expression()?;
                    let rbracket = self.expect(TokenKind::RBracket, "`]`")?;
                    expr = self.emit(NodeData::ArrayAccessExpression(ArrayAccessExpression {
                        array: Some(expr),
                        lbracket,
                        index: Some(index),
                        rbracket,
                    }));
                }
                Some(TokenKind::LParen) => {
                    let lparen = self.eat();
                    let args = if self.peek_kind() == Some(TokenKind::RParen) {
                        None
                    } else {
                        Some(self.parse_expression_list()?)
                    };
                    let rparen = self.expect(TokenKind::RParen, "`)`")?;
                    expr = self.emit(NodeData::FunctionCallExpression(FunctionCallExpression {
                        function: Some(expr),
                        lparen,
                        args,
                        rparen,
                    }));
                }
                Some(TokenKind::Dot | TokenKind::Arrow) => {
                    let operator = self.eat();
                    let member = self.parse_identifier_node()?;
                    expr = self.emit(NodeData::ElementAccessExpression(ElementAccessExpression {
                        object: Some(expr),
                        operator,
                        member: Some(member),
                    }));
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_primary_expr(&mut self) -> Result<NodeId, SyntaxError> {
        match self.peek_kind() {
            Some(TokenKind::Identifier) => {
                let name = self.eat();
                Ok(self.emit(NodeData::Identifier(IdentifierNode { name })))
            }
            Some(TokenKind::Number) => {
                let value = self.eat();
                Ok(self.emit(NodeData::Constant(ConstantNode { value })))
            }
            Some(TokenKind::StringLiteral) => {
                let value = self.eat();
                Ok(self.emit(NodeData::StringLiteral(StringLiteralNode { value })))
            }
            Some(TokenKind::LParen) => {
                let lparen = self.eat();
                let expr = self.parse_expression()?;
                let rparen = self.expect(TokenKind::RParen, "`)`")?;
                Ok(self.emit(NodeData::ParenExpression(ParenExpression {
                    lparen,
                    expr: Some(expr),
                    rparen,
                })))
            }
            _ => Err(self.unexpected(&["expression"])),
        }
    }

    pub(crate) fn parse_identifier_node(&mut self) -> Result<NodeId, SyntaxError> {
        let name = self.expect(TokenKind::Identifier, "identifier")?;
        Ok(self.emit(NodeData::Identifier(IdentifierNode { name })))
    }

    /// Comma-separated expression list (at least one element), separator
    /// tokens kept as list members.
    pub(crate) fn parse_expression_list(&mut self) -> Result<NodeId, SyntaxError> {
        let mut cells = vec![ListCell::Node(self.parse_expression()?)];
        while self.peek_kind() == Some(TokenKind::Comma) {
            cells.push(ListCell::Separator(self.eat()));
            cells.push(ListCell::Node(self.parse_expression()?));
        }
        Ok(self.emit(NodeData::List(ListNode {
            elem_type: ListElemType::Expressions,
            cells,
        })))
    }
}
