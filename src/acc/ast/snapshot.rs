//! Serializable tree snapshots
//!
//! A snapshot is a normalized, owned representation of the tree for tooling
//! output (the CLI serializes it to JSON). It carries kinds and short
//! labels, not tokens; exact text lives with [`crate::acc::ast::render`].

use crate::acc::ast::node::{NodeData, NodeId};
use crate::acc::ast::tree::Ast;
use serde::Serialize;

/// One node of a snapshot tree.
#[derive(Debug, Clone, Serialize)]
pub struct TreeSnapshot {
    pub kind: String,
    pub label: String,
    pub children: Vec<TreeSnapshot>,
}

fn label_of(ast: &Ast, id: NodeId) -> String {
    match ast.node(id) {
        NodeData::AccParallel(_) => "parallel".to_string(),
        NodeData::AccParallelLoop(_) => "parallel loop".to_string(),
        NodeData::AccKernels(_) => "kernels".to_string(),
        NodeData::AccKernelsLoop(_) => "kernels loop".to_string(),
        NodeData::AccLoop(_) => "loop".to_string(),
        NodeData::AccData(_) => "data".to_string(),
        NodeData::AccEnterData(_) => "enter data".to_string(),
        NodeData::AccExitData(_) => "exit data".to_string(),
        NodeData::AccHostData(_) => "host_data".to_string(),
        NodeData::AccDeclare(_) => "declare".to_string(),
        NodeData::AccUpdate(_) => "update".to_string(),
        NodeData::AccWait(_) => "wait".to_string(),
        NodeData::AccAtomic(node) => match &node.mode {
            Some(mode) => format!("atomic {}", mode.text),
            None => "atomic".to_string(),
        },
        NodeData::AccRoutine(_) => "routine".to_string(),
        NodeData::List(list) => format!("{} element(s)", list.elements().len()),
        NodeData::TokenRun(run) => format!("{} skipped token(s)", run.tokens.len()),
        NodeData::VarListClause(clause) => clause.kind.name().to_string(),
        NodeData::ExprClause(clause) => clause.kind.name().to_string(),
        NodeData::BareClause(clause) => clause.kind.name().to_string(),
        NodeData::ReductionClause(clause) => format!("reduction {}", clause.operator.text),
        NodeData::TileClause(_) => "tile".to_string(),
        NodeData::DefaultClause(_) => "default(none)".to_string(),
        NodeData::WaitClause(_) => "wait".to_string(),
        NodeData::DataItem(_) => crate::acc::ast::render::render_node(ast, id).trim().to_string(),
        NodeData::Identifier(node) => node.name.text.clone(),
        NodeData::Constant(node) => node.value.text.clone(),
        NodeData::StringLiteral(node) => node.value.text.clone(),
        NodeData::ParenExpression(_)
        | NodeData::UnaryExpression(_)
        | NodeData::BinaryExpression(_)
        | NodeData::TernaryExpression(_)
        | NodeData::ArrayAccessExpression(_)
        | NodeData::ElementAccessExpression(_)
        | NodeData::FunctionCallExpression(_)
        | NodeData::SizeofExpression(_) => {
            crate::acc::ast::render::render_node(ast, id).trim().to_string()
        }
    }
}

/// Build a snapshot of one node and all its descendants.
pub fn snapshot_node(ast: &Ast, id: NodeId) -> TreeSnapshot {
    TreeSnapshot {
        kind: format!("{:?}", ast.kind(id)),
        label: label_of(ast, id),
        children: ast
            .node(id)
            .child_ids()
            .into_iter()
            .map(|child| snapshot_node(ast, child))
            .collect(),
    }
}

/// Build a snapshot of the whole tree.
pub fn snapshot(ast: &Ast) -> TreeSnapshot {
    snapshot_node(ast, ast.root())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_structure() {
        let ast = Ast::parse_pragma("#pragma acc parallel copyin(a)").unwrap();
        let snap = snapshot(&ast);
        assert_eq!(snap.kind, "AccParallel");
        assert_eq!(snap.label, "parallel");
        assert_eq!(snap.children.len(), 1);
        assert_eq!(snap.children[0].children[0].label, "copyin");
    }
}
