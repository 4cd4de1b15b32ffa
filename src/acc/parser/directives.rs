//! Directive productions
//!
//! One top-level production per directive keyword. `parallel` and
//! `kernels` look ahead for `loop` to build the combined constructs, and
//! accept the combined form through clause-list resynchronization as well
//! (junk between the two keywords lands in the node's skipped-token field).

use crate::acc::ast::node::{
    AccAtomic, AccData, AccDeclare, AccEnterData, AccExitData, AccHostData, AccKernels,
    AccKernelsLoop, AccLoop, AccParallel, AccParallelLoop, AccRoutine, AccUpdate, AccWait,
    DirectiveContext, NodeData, NodeId,
};
use crate::acc::parser::{Parser, SyntaxError};
use crate::acc::token::{Token, TokenKind};

const DIRECTIVE_KEYWORDS: &[&str] = &[
    "parallel",
    "kernels",
    "loop",
    "data",
    "enter",
    "exit",
    "host_data",
    "declare",
    "update",
    "wait",
    "atomic",
    "routine",
];

const ATOMIC_MODES: &[&str] = &["read", "write", "update", "capture"];

impl<'a> Parser<'a> {
    pub(crate) fn parse_directive(&mut self) -> Result<NodeId, SyntaxError> {
        let pragma_acc = self.expect(TokenKind::PragmaAcc, "#pragma acc")?;
        match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                let keyword = token.text.clone();
                match keyword.as_str() {
                    "parallel" => {
                        let kw = self.eat();
                        self.parse_parallel(pragma_acc, kw)
                    }
                    "kernels" => {
                        let kw = self.eat();
                        self.parse_kernels(pragma_acc, kw)
                    }
                    "loop" => {
                        let kw_loop = self.eat();
                        let clauses = self.parse_clause_list(DirectiveContext::Loop, false).list;
                        Ok(self.emit(NodeData::AccLoop(AccLoop {
                            pragma_acc,
                            kw_loop,
                            clauses,
                        })))
                    }
                    "data" => {
                        let kw_data = self.eat();
                        let clauses = self.parse_clause_list(DirectiveContext::Data, false).list;
                        Ok(self.emit(NodeData::AccData(AccData {
                            pragma_acc,
                            kw_data,
                            clauses,
                        })))
                    }
                    "enter" => {
                        let kw_enter = self.eat();
                        let kw_data = self.expect_keyword("data")?;
                        let clauses =
                            self.parse_clause_list(DirectiveContext::EnterData, false).list;
                        Ok(self.emit(NodeData::AccEnterData(AccEnterData {
                            pragma_acc,
                            kw_enter,
                            kw_data,
                            clauses,
                        })))
                    }
                    "exit" => {
                        let kw_exit = self.eat();
                        let kw_data = self.expect_keyword("data")?;
                        let clauses =
                            self.parse_clause_list(DirectiveContext::ExitData, false).list;
                        Ok(self.emit(NodeData::AccExitData(AccExitData {
                            pragma_acc,
                            kw_exit,
                            kw_data,
                            clauses,
                        })))
                    }
                    "host_data" => {
                        let kw_host_data = self.eat();
                        let clauses =
                            self.parse_clause_list(DirectiveContext::HostData, false).list;
                        Ok(self.emit(NodeData::AccHostData(AccHostData {
                            pragma_acc,
                            kw_host_data,
                            clauses,
                        })))
                    }
                    "declare" => {
                        let kw_declare = self.eat();
                        let clauses =
                            self.parse_clause_list(DirectiveContext::Declare, false).list;
                        Ok(self.emit(NodeData::AccDeclare(AccDeclare {
                            pragma_acc,
                            kw_declare,
                            clauses,
                        })))
                    }
                    "update" => {
                        let kw_update = self.eat();
                        let clauses =
                            self.parse_clause_list(DirectiveContext::Update, false).list;
                        Ok(self.emit(NodeData::AccUpdate(AccUpdate {
                            pragma_acc,
                            kw_update,
                            clauses,
                        })))
                    }
                    "wait" => {
                        let kw_wait = self.eat();
                        self.parse_wait(pragma_acc, kw_wait)
                    }
                    "atomic" => {
                        let kw_atomic = self.eat();
                        self.parse_atomic(pragma_acc, kw_atomic)
                    }
                    "routine" => {
                        let kw_routine = self.eat();
                        self.parse_routine(pragma_acc, kw_routine)
                    }
                    _ => Err(self.unexpected(DIRECTIVE_KEYWORDS)),
                }
            }
            _ => Err(self.unexpected(DIRECTIVE_KEYWORDS)),
        }
    }

    fn parse_parallel(&mut self, pragma_acc: Token, kw_parallel: Token) -> Result<NodeId, SyntaxError> {
        if self.peek_is_keyword("loop") {
            let kw_loop = self.eat();
            let clauses = self
                .parse_clause_list(DirectiveContext::ParallelLoop, false)
                .list;
            return Ok(self.emit(NodeData::AccParallelLoop(AccParallelLoop {
                pragma_acc,
                kw_parallel,
                skipped: None,
                kw_loop,
                clauses,
            })));
        }
        let outcome = self.parse_clause_list(DirectiveContext::Parallel, true);
        match outcome.upgrade {
            Some(upgrade) => {
                let clauses = self
                    .parse_clause_list(DirectiveContext::ParallelLoop, false)
                    .list;
                Ok(self.emit(NodeData::AccParallelLoop(AccParallelLoop {
                    pragma_acc,
                    kw_parallel,
                    skipped: upgrade.skipped,
                    kw_loop: upgrade.kw_loop,
                    clauses,
                })))
            }
            None => Ok(self.emit(NodeData::AccParallel(AccParallel {
                pragma_acc,
                kw_parallel,
                clauses: outcome.list,
            }))),
        }
    }

    fn parse_kernels(&mut self, pragma_acc: Token, kw_kernels: Token) -> Result<NodeId, SyntaxError> {
        if self.peek_is_keyword("loop") {
            let kw_loop = self.eat();
            let clauses = self
                .parse_clause_list(DirectiveContext::KernelsLoop, false)
                .list;
            return Ok(self.emit(NodeData::AccKernelsLoop(AccKernelsLoop {
                pragma_acc,
                kw_kernels,
                skipped: None,
                kw_loop,
                clauses,
            })));
        }
        let outcome = self.parse_clause_list(DirectiveContext::Kernels, true);
        match outcome.upgrade {
            Some(upgrade) => {
                let clauses = self
                    .parse_clause_list(DirectiveContext::KernelsLoop, false)
                    .list;
                Ok(self.emit(NodeData::AccKernelsLoop(AccKernelsLoop {
                    pragma_acc,
                    kw_kernels,
                    skipped: upgrade.skipped,
                    kw_loop: upgrade.kw_loop,
                    clauses,
                })))
            }
            None => Ok(self.emit(NodeData::AccKernels(AccKernels {
                pragma_acc,
                kw_kernels,
                clauses: outcome.list,
            }))),
        }
    }

    fn parse_wait(&mut self, pragma_acc: Token, kw_wait: Token) -> Result<NodeId, SyntaxError> {
        if self.peek_kind() != Some(TokenKind::LParen) {
            return Ok(self.emit(NodeData::AccWait(AccWait {
                pragma_acc,
                kw_wait,
                lparen: None,
                args: None,
                rparen: None,
            })));
        }
        let lparen = self.eat();
        let args = self.parse_expression_list()?;
        let rparen = self.expect(TokenKind::RParen, "`)`")?;
        Ok(self.emit(NodeData::AccWait(AccWait {
            pragma_acc,
            kw_wait,
            lparen: Some(lparen),
            args: Some(args),
            rparen: Some(rparen),
        })))
    }

    fn parse_atomic(&mut self, pragma_acc: Token, kw_atomic: Token) -> Result<NodeId, SyntaxError> {
        let mode = match self.peek() {
            Some(token)
                if token.kind == TokenKind::Identifier
                    && ATOMIC_MODES.contains(&token.text.as_str()) =>
            {
                Some(self.eat())
            }
            Some(_) => return Err(self.unexpected(ATOMIC_MODES)),
            None => None,
        };
        Ok(self.emit(NodeData::AccAtomic(AccAtomic {
            pragma_acc,
            kw_atomic,
            mode,
        })))
    }

    fn parse_routine(&mut self, pragma_acc: Token, kw_routine: Token) -> Result<NodeId, SyntaxError> {
        let (lparen, name, rparen) = if self.peek_kind() == Some(TokenKind::LParen) {
            let lparen = self.eat();
            let name = self.parse_identifier_node()?;
            let rparen = self.expect(TokenKind::RParen, "`)`")?;
            (Some(lparen), Some(name), Some(rparen))
        } else {
            (None, None, None)
        };
        let clauses = self.parse_clause_list(DirectiveContext::Routine, false).list;
        Ok(self.emit(NodeData::AccRoutine(AccRoutine {
            pragma_acc,
            kw_routine,
            lparen,
            name,
            rparen,
            clauses,
        })))
    }
}

#[cfg(test)]
mod tests {
    use crate::acc::ast::node::NodeKind;
    use crate::acc::ast::render::render;
    use crate::acc::ast::tree::Ast;

    #[test]
    fn test_every_directive_parses() {
        let sources = [
            ("#pragma acc parallel", NodeKind::AccParallel),
            ("#pragma acc parallel loop gang", NodeKind::AccParallelLoop),
            ("#pragma acc kernels", NodeKind::AccKernels),
            ("#pragma acc kernels loop", NodeKind::AccKernelsLoop),
            ("#pragma acc loop collapse(2)", NodeKind::AccLoop),
            ("#pragma acc data copy(a)", NodeKind::AccData),
            ("#pragma acc enter data copyin(a)", NodeKind::AccEnterData),
            ("#pragma acc exit data delete(a)", NodeKind::AccExitData),
            ("#pragma acc host_data use_device(p)", NodeKind::AccHostData),
            ("#pragma acc declare device_resident(t)", NodeKind::AccDeclare),
            ("#pragma acc update host(x) device(y)", NodeKind::AccUpdate),
            ("#pragma acc wait(1, 2)", NodeKind::AccWait),
            ("#pragma acc atomic capture", NodeKind::AccAtomic),
            ("#pragma acc routine(f) seq", NodeKind::AccRoutine),
        ];
        for (source, kind) in sources {
            let ast = Ast::parse_pragma(source).unwrap();
            assert_eq!(ast.kind(ast.root()), kind, "{}", source);
            assert!(ast.errors().is_empty(), "{}", source);
            assert_eq!(render(&ast), source);
        }
    }

    #[test]
    fn test_unknown_directive_propagates() {
        let err = Ast::parse_pragma("#pragma acc frobnicate").unwrap_err();
        assert_eq!(err.token.unwrap().text, "frobnicate");
    }

    #[test]
    fn test_missing_pragma_prefix_propagates() {
        assert!(Ast::parse_pragma("parallel copyin(a)").is_err());
    }

    #[test]
    fn test_atomic_rejects_unknown_mode() {
        assert!(Ast::parse_pragma("#pragma acc atomic banana").is_err());
    }
}
