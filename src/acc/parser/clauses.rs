//! Clause productions and clause-list error recovery
//!
//! Clause keyword dispatch is maximal-munch over the whole identifier via
//! [`ClauseKind::lookup`], which also resolves abbreviation aliases
//! (`pcopyout` and `present_or_copyout` are the same clause). The clause
//! list production never aborts: unexpected tokens are recorded as syntax
//! errors and kept in a token run until the list resynchronizes at the next
//! comma, legal clause keyword, or end of stream.

use crate::acc::ast::node::{
    BareClause, ClauseKind, ClauseShape, DataItem, DefaultClause, DirectiveContext, ExprClause,
    ListCell, ListElemType, ListNode, NodeData, NodeId, ReductionClause, TileClause,
    VarListClause, WaitClause,
};
use crate::acc::parser::{Parser, SyntaxError};
use crate::acc::token::{Token, TokenKind};

/// Result of a clause-list production.
pub(crate) struct ClauseListOutcome {
    /// The list node, absent when the list is empty.
    pub(crate) list: Option<NodeId>,
    /// Set when the list resynchronized at a `loop` keyword before any
    /// clause parsed, turning the directive into its combined-loop form.
    pub(crate) upgrade: Option<LoopUpgrade>,
}

pub(crate) struct LoopUpgrade {
    /// Tokens skipped between the directive keyword and `loop`.
    pub(crate) skipped: Option<NodeId>,
    pub(crate) kw_loop: Token,
}

impl<'a> Parser<'a> {
    /// An isolated clause, any context: used by literal-text splicing,
    /// where legality is the destination slot's concern.
    pub(crate) fn parse_clause_fragment(&mut self) -> Result<NodeId, SyntaxError> {
        let kind = match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                ClauseKind::lookup(&token.text)
            }
            _ => None,
        };
        match kind {
            Some(kind) => {
                let keyword = self.eat();
                self.parse_clause_body(kind, keyword)
            }
            None => Err(self.unexpected(&["clause keyword"])),
        }
    }

    /// Clause body after the keyword, by the keyword's shape.
    pub(crate) fn parse_clause_body(
        &mut self,
        kind: ClauseKind,
        keyword: Token,
    ) -> Result<NodeId, SyntaxError> {
        match kind.shape() {
            ClauseShape::VarList => {
                let lparen = self.expect(TokenKind::LParen, "`(`")?;
                let items = self.parse_data_item_list()?;
                let rparen = self.expect(TokenKind::RParen, "`)`")?;
                Ok(self.emit(NodeData::VarListClause(VarListClause {
                    kind,
                    keyword,
                    lparen,
                    items: Some(items),
                    rparen,
                })))
            }
            ClauseShape::Expr => {
                let lparen = self.expect(TokenKind::LParen, "`(`")?;
                let expr = self.parse_expression()?;
                let rparen = self.expect(TokenKind::RParen, "`)`")?;
                Ok(self.emit(NodeData::ExprClause(ExprClause {
                    kind,
                    keyword,
                    lparen: Some(lparen),
                    expr: Some(expr),
                    rparen: Some(rparen),
                })))
            }
            ClauseShape::OptionalExpr => {
                if self.peek_kind() == Some(TokenKind::LParen) {
                    let lparen = self.eat();
                    let expr = self.parse_expression()?;
                    let rparen = self.expect(TokenKind::RParen, "`)`")?;
                    Ok(self.emit(NodeData::ExprClause(ExprClause {
                        kind,
                        keyword,
                        lparen: Some(lparen),
                        expr: Some(expr),
                        rparen: Some(rparen),
                    })))
                } else {
                    Ok(self.emit(NodeData::ExprClause(ExprClause {
                        kind,
                        keyword,
                        lparen: None,
                        expr: None,
                        rparen: None,
                    })))
                }
            }
            ClauseShape::Bare => Ok(self.emit(NodeData::BareClause(BareClause { kind, keyword }))),
            ClauseShape::Reduction => {
                let lparen = self.expect(TokenKind::LParen, "`(`")?;
                let operator = self.parse_reduction_operator()?;
                let colon = self.expect(TokenKind::Colon, "`:`")?;
                let items = self.parse_data_item_list()?;
                let rparen = self.expect(TokenKind::RParen, "`)`")?;
                Ok(self.emit(NodeData::ReductionClause(ReductionClause {
                    keyword,
                    lparen,
                    operator,
                    colon,
                    items: Some(items),
                    rparen,
                })))
            }
            ClauseShape::Tile => {
                let lparen = self.expect(TokenKind::LParen, "`(`")?;
                let args = self.parse_expression_list()?;
                let rparen = self.expect(TokenKind::RParen, "`)`")?;
                Ok(self.emit(NodeData::TileClause(TileClause {
                    keyword,
                    lparen,
                    args: Some(args),
                    rparen,
                })))
            }
            ClauseShape::Default => {
                let lparen = self.expect(TokenKind::LParen, "`(`")?;
                let kw_none = self.expect_keyword("none")?;
                let rparen = self.expect(TokenKind::RParen, "`)`")?;
                Ok(self.emit(NodeData::DefaultClause(DefaultClause {
                    keyword,
                    lparen,
                    kw_none,
                    rparen,
                })))
            }
            ClauseShape::Wait => {
                if self.peek_kind() == Some(TokenKind::LParen) {
                    let lparen = self.eat();
                    let args = self.parse_expression_list()?;
                    let rparen = self.expect(TokenKind::RParen, "`)`")?;
                    Ok(self.emit(NodeData::WaitClause(WaitClause {
                        keyword,
                        lparen: Some(lparen),
                        args: Some(args),
                        rparen: Some(rparen),
                    })))
                } else {
                    Ok(self.emit(NodeData::WaitClause(WaitClause {
                        keyword,
                        lparen: None,
                        args: None,
                        rparen: None,
                    })))
                }
            }
        }
    }

    fn parse_reduction_operator(&mut self) -> Result<Token, SyntaxError> {
        match self.peek() {
            Some(token)
                if matches!(
                    token.kind,
                    TokenKind::Plus
                        | TokenKind::Star
                        | TokenKind::Amp
                        | TokenKind::Pipe
                        | TokenKind::Caret
                        | TokenKind::AmpAmp
                        | TokenKind::PipePipe
                ) =>
            {
                Ok(self.eat())
            }
            Some(token)
                if token.kind == TokenKind::Identifier
                    && (token.text == "min" || token.text == "max") =>
            {
                Ok(self.eat())
            }
            _ => Err(self.unexpected(&["reduction operator"])),
        }
    }

    /// `identifier` or `identifier [ lower : count ]`.
    pub(crate) fn parse_data_item(&mut self) -> Result<NodeId, SyntaxError> {
        let identifier = self.parse_identifier_node()?;
        if self.peek_kind() != Some(TokenKind::LBracket) {
            return Ok(self.emit(NodeData::DataItem(DataItem {
                identifier: Some(identifier),
                lbracket: None,
                lower_bound: None,
                colon: None,
                count: None,
                rbracket: None,
            })));
        }
        let lbracket = self.eat();
        let lower_bound = self.parse_expression()?;
        let colon = self.expect(TokenKind::Colon, "`:`")?;
        let count = self.parse_expression()?;
        let rbracket = self.expect(TokenKind::RBracket, "`]`")?;
        Ok(self.emit(NodeData::DataItem(DataItem {
            identifier: Some(identifier),
            lbracket: Some(lbracket),
            lower_bound: Some(lower_bound),
            colon: Some(colon),
            count: Some(count),
            rbracket: Some(rbracket),
        })))
    }

    pub(crate) fn parse_data_item_list(&mut self) -> Result<NodeId, SyntaxError> {
        let mut cells = vec![ListCell::Node(self.parse_data_item()?)];
        while self.peek_kind() == Some(TokenKind::Comma) {
            cells.push(ListCell::Separator(self.eat()));
            cells.push(ListCell::Node(self.parse_data_item()?));
        }
        Ok(self.emit(NodeData::List(ListNode {
            elem_type: ListElemType::DataItems,
            cells,
        })))
    }

    /// Clause list for one directive context, comma or whitespace
    /// separated, consuming tokens to the end of the stream.
    ///
    /// Never fails: unexpected input is recorded as a syntax error once per
    /// junk run and the skipped tokens become token-run list members. With
    /// `allow_loop_upgrade`, hitting `loop` before any clause has parsed
    /// ends the list and reports the combined-form upgrade instead.
    pub(crate) fn parse_clause_list(
        &mut self,
        context: DirectiveContext,
        allow_loop_upgrade: bool,
    ) -> ClauseListOutcome {
        let mut cells: Vec<ListCell> = Vec::new();
        let mut pending: Vec<Token> = Vec::new();
        let mut produced_clause = false;
        let mut in_junk_run = false;

        loop {
            let token = match self.peek() {
                Some(token) => token,
                None => break,
            };
            match token.kind {
                TokenKind::Comma => {
                    let is_separator =
                        pending.is_empty() && matches!(cells.last(), Some(ListCell::Node(_)));
                    if is_separator {
                        cells.push(ListCell::Separator(self.eat()));
                        in_junk_run = false;
                    } else {
                        if !in_junk_run {
                            let error = self.clause_error(context);
                            self.record_error(error);
                            in_junk_run = true;
                        }
                        pending.push(self.eat());
                    }
                }
                TokenKind::Identifier => {
                    let text = token.text.clone();
                    if allow_loop_upgrade && !produced_clause && text == "loop" {
                        // Everything seen so far was junk; hand it to the
                        // combined directive as its skipped-token field.
                        let kw_loop = self.eat();
                        let skipped = self.make_token_run(pending);
                        return ClauseListOutcome {
                            list: None,
                            upgrade: Some(LoopUpgrade { skipped, kw_loop }),
                        };
                    }
                    match ClauseKind::lookup(&text) {
                        Some(kind) if kind.contexts().contains(context) => {
                            let checkpoint = self.checkpoint();
                            let keyword = self.eat();
                            match self.parse_clause_body(kind, keyword) {
                                Ok(clause) => {
                                    self.flush_pending(&mut pending, &mut cells);
                                    cells.push(ListCell::Node(clause));
                                    produced_clause = true;
                                    in_junk_run = false;
                                }
                                Err(error) => {
                                    self.record_error(error);
                                    self.restore(checkpoint);
                                    in_junk_run = true;
                                    pending.push(self.eat());
                                }
                            }
                        }
                        _ => {
                            if !in_junk_run {
                                let error = self.clause_error(context);
                                self.record_error(error);
                                in_junk_run = true;
                            }
                            pending.push(self.eat());
                        }
                    }
                }
                _ => {
                    if !in_junk_run {
                        let error = self.clause_error(context);
                        self.record_error(error);
                        in_junk_run = true;
                    }
                    pending.push(self.eat());
                }
            }
        }

        self.flush_pending(&mut pending, &mut cells);
        let list = if cells.is_empty() {
            None
        } else {
            Some(self.emit(NodeData::List(ListNode {
                elem_type: ListElemType::Clauses(context),
                cells,
            })))
        };
        ClauseListOutcome {
            list,
            upgrade: None,
        }
    }

    fn flush_pending(&mut self, pending: &mut Vec<Token>, cells: &mut Vec<ListCell>) {
        if let Some(run) = self.make_token_run(std::mem::take(pending)) {
            cells.push(ListCell::Node(run));
        }
    }

    fn clause_error(&self, context: DirectiveContext) -> SyntaxError {
        SyntaxError {
            token: self.peek().cloned(),
            expected: vec![format!("clause legal under `{}`", context)],
        }
    }

    fn checkpoint(&self) -> usize {
        self.pos
    }

    fn restore(&mut self, checkpoint: usize) {
        self.pos = checkpoint;
    }
}
