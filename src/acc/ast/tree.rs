//! Arena-backed directive tree and its mutation API
//!
//! Nodes live in an arena owned by [`Ast`] and are addressed by [`NodeId`]
//! handles; the parent link is a stored id, so reparenting is an index
//! update and cycles are structurally impossible (an id appears in at most
//! one field slot at a time).
//!
//! Every mutation either fully completes, with the destination slot
//! type-checked, parent links consistent, and rendering still lossless, or
//! leaves the tree exactly as it was. Detached nodes stay in the arena but are unreachable
//! from the root; they are never observable through rendering or queries.

use crate::acc::ast::node::{
    Capability, FieldRef, ListElemType, NodeData, NodeId, NodeKind, SlotType,
};
use crate::acc::parser::{FragmentRule, Parser, SyntaxError};
use std::fmt;

/// Errors from illegal tree edits. Always local to the one operation that
/// failed; the tree is unchanged afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationError {
    /// The target node has no parent.
    NoParent,
    /// The given node is not a direct child of the target.
    NotAChild,
    /// A list operation was aimed at a node that is not a list.
    NotAList { found: NodeKind },
    /// Field index outside the node's declared arity.
    FieldOutOfRange { index: usize, arity: usize },
    /// The assigned node does not satisfy the slot's declared type, e.g. a
    /// clause lacking the capability a directive's clause list requires.
    TypeMismatch { expected: SlotType, found: NodeKind },
    /// Literal text did not parse as the production the slot expects.
    Reparse(SyntaxError),
}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationError::NoParent => write!(f, "node has no parent"),
            MutationError::NotAChild => write!(f, "node is not a child of the target"),
            MutationError::NotAList { found } => {
                write!(f, "expected a list node, found {:?}", found)
            }
            MutationError::FieldOutOfRange { index, arity } => {
                write!(f, "field index {} out of range (arity {})", index, arity)
            }
            MutationError::TypeMismatch { expected, found } => {
                write!(f, "expected {}, found {:?}", expected, found)
            }
            MutationError::Reparse(err) => write!(f, "literal text did not parse: {}", err),
        }
    }
}

impl std::error::Error for MutationError {}

#[derive(Debug, Clone)]
struct Entry {
    data: NodeData,
    parent: Option<NodeId>,
}

/// A parsed pragma: the node arena plus the root directive.
#[derive(Debug, Clone)]
pub struct Ast {
    entries: Vec<Entry>,
    root: Option<NodeId>,
    errors: Vec<SyntaxError>,
}

impl Ast {
    pub(crate) fn empty() -> Ast {
        Ast {
            entries: Vec::new(),
            root: None,
            errors: Vec::new(),
        }
    }

    /// Parse a complete pragma into a tree.
    ///
    /// Errors recovered inside clause lists are recorded on the tree (see
    /// [`Ast::errors`]); failures outside recovery points propagate.
    pub fn parse_pragma(text: &str) -> Result<Ast, SyntaxError> {
        let mut ast = Ast::empty();
        let root = Parser::parse_pragma_into(&mut ast, text)?;
        ast.root = Some(root);
        Ok(ast)
    }

    /// Parse a clause in isolation, allocating it (detached) in this tree.
    ///
    /// Context legality is not decided here: any known clause keyword
    /// parses, and capability gating happens when the node is placed into a
    /// clause list.
    pub fn create_clause(&mut self, text: &str) -> Result<NodeId, SyntaxError> {
        Parser::parse_fragment_into(self, text, FragmentRule::Clause)
    }

    /// Parse an expression in isolation, allocating it detached.
    pub fn create_expression(&mut self, text: &str) -> Result<NodeId, SyntaxError> {
        Parser::parse_fragment_into(self, text, FragmentRule::Expression)
    }

    /// Parse a data item (`x` or `x[lo:n]`) in isolation, allocating it
    /// detached.
    pub fn create_data_item(&mut self, text: &str) -> Result<NodeId, SyntaxError> {
        Parser::parse_fragment_into(self, text, FragmentRule::DataItem)
    }

    /// Parse an identifier in isolation, allocating it detached.
    pub fn create_identifier(&mut self, text: &str) -> Result<NodeId, SyntaxError> {
        Parser::parse_fragment_into(self, text, FragmentRule::Identifier)
    }

    /// The root directive node.
    ///
    /// Present on every tree built by [`Ast::parse_pragma`].
    pub fn root(&self) -> NodeId {
        self.root.expect("tree has no root")
    }

    /// Syntax errors recovered during parsing, in source order.
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub(crate) fn record_error(&mut self, error: SyntaxError) {
        self.errors.push(error);
    }

    pub(crate) fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.entries.len() as u32);
        self.entries.push(Entry { data, parent: None });
        id
    }

    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.entries[id.index()].data
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.entries[id.index()].data
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.entries[id.index()].parent
    }

    pub(crate) fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.entries[id.index()].parent = parent;
    }

    /// Set the parent links for every child id currently stored in `id`'s
    /// fields. Used by the parser as nodes are attached bottom-up.
    pub(crate) fn adopt_children(&mut self, id: NodeId) {
        for child in self.node(id).child_ids() {
            self.set_parent(child, Some(id));
        }
    }

    // ------------------------------------------------------------------
    // Indexed field access
    // ------------------------------------------------------------------

    /// Number of set fields of the node, in declared order.
    pub fn field_count(&self, id: NodeId) -> usize {
        self.node(id).fields().len()
    }

    /// Field at `index`, failing outside the declared arity.
    pub fn field(&self, id: NodeId, index: usize) -> Result<FieldRef<'_>, MutationError> {
        let fields = self.node(id).fields();
        let arity = fields.len();
        fields
            .into_iter()
            .nth(index)
            .ok_or(MutationError::FieldOutOfRange { index, arity })
    }

    /// Capability interfaces of the node, in declaration order.
    pub fn capabilities(&self, id: NodeId) -> Vec<Capability> {
        self.node(id).capabilities()
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Check that `node` may occupy a slot of type `slot`.
    pub(crate) fn check_slot(&self, node: NodeId, slot: SlotType) -> Result<(), MutationError> {
        let data = self.node(node);
        let kind = data.kind();
        let ok = match slot {
            SlotType::ClauseList(ctx) => matches!(
                data,
                NodeData::List(list) if list.elem_type == ListElemType::Clauses(ctx)
            ),
            SlotType::DataItemList => matches!(
                data,
                NodeData::List(list) if list.elem_type == ListElemType::DataItems
            ),
            SlotType::ExprList => matches!(
                data,
                NodeData::List(list) if list.elem_type == ListElemType::Expressions
            ),
            SlotType::SkippedTokens => kind == NodeKind::TokenRun,
            // Token runs are admissible wherever recovery padding may end
            // up: clause and data item positions.
            SlotType::Clause(ctx) => {
                kind == NodeKind::TokenRun
                    || data
                        .clause_kind()
                        .map(|clause| clause.contexts().contains(ctx))
                        .unwrap_or(false)
            }
            SlotType::DataItem => kind == NodeKind::DataItem || kind == NodeKind::TokenRun,
            SlotType::Expression => kind.is_expression(),
            SlotType::ConstantExpression => data
                .capabilities()
                .contains(&Capability::ConstantExpression),
            SlotType::Identifier => kind == NodeKind::Identifier,
        };
        if ok {
            Ok(())
        } else {
            Err(MutationError::TypeMismatch {
                expected: slot,
                found: kind,
            })
        }
    }

    /// Replace the direct child `old` of `parent` with `new`.
    ///
    /// The slot is found by identity, the assigned node is type-checked
    /// against the slot's declared type before anything changes, `new` is
    /// reparented (implicitly detaching it from any previous parent), and
    /// `old`'s parent link is cleared.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        old: NodeId,
        new: NodeId,
    ) -> Result<(), MutationError> {
        let slot = self
            .node(parent)
            .slot_of_child(old)
            .ok_or(MutationError::NotAChild)?;
        self.check_slot(new, slot)?;
        if old == new {
            return Ok(());
        }
        self.detach(new)?;
        self.node_mut(parent).assign_child(old, Some(new));
        self.set_parent(new, Some(parent));
        self.set_parent(old, None);
        Ok(())
    }

    /// Replace this node in its parent with `new`. Fails if the node is
    /// rootless.
    pub fn replace_with(&mut self, node: NodeId, new: NodeId) -> Result<(), MutationError> {
        let parent = self.parent(node).ok_or(MutationError::NoParent)?;
        self.replace_child(parent, node, new)
    }

    /// Re-parse `text` as whatever production this node's slot expects and
    /// splice the result in place of the node. On any failure the tree is
    /// left untouched (freshly parsed nodes may remain detached in the
    /// arena, where nothing can observe them).
    pub fn replace_with_text(&mut self, node: NodeId, text: &str) -> Result<NodeId, MutationError> {
        let parent = self.parent(node).ok_or(MutationError::NoParent)?;
        let slot = self
            .node(parent)
            .slot_of_child(node)
            .ok_or(MutationError::NotAChild)?;
        let rule = match slot {
            SlotType::Clause(_) => FragmentRule::Clause,
            SlotType::Expression | SlotType::ConstantExpression => FragmentRule::Expression,
            SlotType::Identifier => FragmentRule::Identifier,
            SlotType::DataItem => FragmentRule::DataItem,
            // Lists and token runs have no literal grammar of their own.
            other => {
                return Err(MutationError::TypeMismatch {
                    expected: other,
                    found: self.kind(node),
                })
            }
        };
        let new = Parser::parse_fragment_into(self, text, rule).map_err(MutationError::Reparse)?;
        self.check_slot(new, slot)?;
        self.replace_child(parent, node, new)?;
        Ok(new)
    }

    /// Detach this node from its parent. For list members the element cell
    /// and its associated separator are removed together so the list stays
    /// well formed. No-op if the node is already rootless.
    pub fn remove_from_tree(&mut self, node: NodeId) -> Result<(), MutationError> {
        self.detach(node)
    }

    pub(crate) fn detach(&mut self, node: NodeId) -> Result<(), MutationError> {
        let parent = match self.parent(node) {
            Some(parent) => parent,
            None => return Ok(()),
        };
        if matches!(self.node(parent), NodeData::List(_)) {
            crate::acc::ast::list::remove_list_member(self, parent, node)?;
        } else {
            if !self.node_mut(parent).assign_child(node, None) {
                return Err(MutationError::NotAChild);
            }
            self.set_parent(node, None);
        }
        Ok(())
    }
}
