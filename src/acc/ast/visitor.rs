//! Visitor dispatch protocol
//!
//! Single-entry double dispatch: [`accept`] invokes, for a node, the
//! visitor method keyed to its exact concrete kind, then one method per
//! capability interface the node implements (in declaration order), then
//! the generic [`Visitor::visit_node`]. Default implementations are empty,
//! so a visitor only overrides the callbacks it cares about.
//!
//! Traversal into children is the visitor's responsibility; use
//! [`visit_children`] for plain pre-order recursion.

use crate::acc::ast::node::{Capability, DirectiveContext, NodeData, NodeId};
use crate::acc::ast::tree::Ast;

/// Visitor over directive trees. One method per concrete node kind, one per
/// capability interface, plus the universal base method.
#[allow(unused_variables)]
pub trait Visitor {
    // Concrete directive kinds
    fn visit_acc_parallel(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_acc_parallel_loop(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_acc_kernels(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_acc_kernels_loop(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_acc_loop(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_acc_data(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_acc_enter_data(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_acc_exit_data(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_acc_host_data(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_acc_declare(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_acc_update(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_acc_wait(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_acc_atomic(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_acc_routine(&mut self, ast: &Ast, id: NodeId) {}

    // Structural kinds
    fn visit_list(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_token_run(&mut self, ast: &Ast, id: NodeId) {}

    // Concrete clause kinds
    fn visit_var_list_clause(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_expr_clause(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_bare_clause(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_reduction_clause(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_tile_clause(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_default_clause(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_wait_clause(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_data_item(&mut self, ast: &Ast, id: NodeId) {}

    // Concrete expression kinds
    fn visit_identifier(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_constant(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_string_literal(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_paren_expression(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_unary_expression(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_binary_expression(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_ternary_expression(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_array_access_expression(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_element_access_expression(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_function_call_expression(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_sizeof_expression(&mut self, ast: &Ast, id: NodeId) {}

    // Capability interfaces
    fn visit_acc_construct(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_parallel_clause(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_parallel_loop_clause(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_kernels_clause(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_kernels_loop_clause(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_loop_clause(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_data_clause(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_enter_data_clause(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_exit_data_clause(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_host_data_clause(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_declare_clause(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_update_clause(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_routine_clause(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_expression(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_assignment_target(&mut self, ast: &Ast, id: NodeId) {}
    fn visit_constant_expression(&mut self, ast: &Ast, id: NodeId) {}

    // Universal base
    fn visit_node(&mut self, ast: &Ast, id: NodeId) {}
}

/// Dispatch one node to a visitor: concrete kind, capabilities in
/// declaration order, base. Does not recurse.
pub fn accept(ast: &Ast, id: NodeId, visitor: &mut dyn Visitor) {
    match ast.node(id) {
        NodeData::AccParallel(_) => visitor.visit_acc_parallel(ast, id),
        NodeData::AccParallelLoop(_) => visitor.visit_acc_parallel_loop(ast, id),
        NodeData::AccKernels(_) => visitor.visit_acc_kernels(ast, id),
        NodeData::AccKernelsLoop(_) => visitor.visit_acc_kernels_loop(ast, id),
        NodeData::AccLoop(_) => visitor.visit_acc_loop(ast, id),
        NodeData::AccData(_) => visitor.visit_acc_data(ast, id),
        NodeData::AccEnterData(_) => visitor.visit_acc_enter_data(ast, id),
        NodeData::AccExitData(_) => visitor.visit_acc_exit_data(ast, id),
        NodeData::AccHostData(_) => visitor.visit_acc_host_data(ast, id),
        NodeData::AccDeclare(_) => visitor.visit_acc_declare(ast, id),
        NodeData::AccUpdate(_) => visitor.visit_acc_update(ast, id),
        NodeData::AccWait(_) => visitor.visit_acc_wait(ast, id),
        NodeData::AccAtomic(_) => visitor.visit_acc_atomic(ast, id),
        NodeData::AccRoutine(_) => visitor.visit_acc_routine(ast, id),
        NodeData::List(_) => visitor.visit_list(ast, id),
        NodeData::TokenRun(_) => visitor.visit_token_run(ast, id),
        NodeData::VarListClause(_) => visitor.visit_var_list_clause(ast, id),
        NodeData::ExprClause(_) => visitor.visit_expr_clause(ast, id),
        NodeData::BareClause(_) => visitor.visit_bare_clause(ast, id),
        NodeData::ReductionClause(_) => visitor.visit_reduction_clause(ast, id),
        NodeData::TileClause(_) => visitor.visit_tile_clause(ast, id),
        NodeData::DefaultClause(_) => visitor.visit_default_clause(ast, id),
        NodeData::WaitClause(_) => visitor.visit_wait_clause(ast, id),
        NodeData::DataItem(_) => visitor.visit_data_item(ast, id),
        NodeData::Identifier(_) => visitor.visit_identifier(ast, id),
        NodeData::Constant(_) => visitor.visit_constant(ast, id),
        NodeData::StringLiteral(_) => visitor.visit_string_literal(ast, id),
        NodeData::ParenExpression(_) => visitor.visit_paren_expression(ast, id),
        NodeData::UnaryExpression(_) => visitor.visit_unary_expression(ast, id),
        NodeData::BinaryExpression(_) => visitor.visit_binary_expression(ast, id),
        NodeData::TernaryExpression(_) => visitor.visit_ternary_expression(ast, id),
        NodeData::ArrayAccessExpression(_) => visitor.visit_array_access_expression(ast, id),
        NodeData::ElementAccessExpression(_) => visitor.visit_element_access_expression(ast, id),
        NodeData::FunctionCallExpression(_) => visitor.visit_function_call_expression(ast, id),
        NodeData::SizeofExpression(_) => visitor.visit_sizeof_expression(ast, id),
    }

    for capability in ast.capabilities(id) {
        match capability {
            Capability::AccConstruct => visitor.visit_acc_construct(ast, id),
            Capability::ClauseFor(context) => match context {
                DirectiveContext::Parallel => visitor.visit_parallel_clause(ast, id),
                DirectiveContext::ParallelLoop => visitor.visit_parallel_loop_clause(ast, id),
                DirectiveContext::Kernels => visitor.visit_kernels_clause(ast, id),
                DirectiveContext::KernelsLoop => visitor.visit_kernels_loop_clause(ast, id),
                DirectiveContext::Loop => visitor.visit_loop_clause(ast, id),
                DirectiveContext::Data => visitor.visit_data_clause(ast, id),
                DirectiveContext::EnterData => visitor.visit_enter_data_clause(ast, id),
                DirectiveContext::ExitData => visitor.visit_exit_data_clause(ast, id),
                DirectiveContext::HostData => visitor.visit_host_data_clause(ast, id),
                DirectiveContext::Declare => visitor.visit_declare_clause(ast, id),
                DirectiveContext::Update => visitor.visit_update_clause(ast, id),
                DirectiveContext::Routine => visitor.visit_routine_clause(ast, id),
            },
            Capability::Expression => visitor.visit_expression(ast, id),
            Capability::AssignmentTarget => visitor.visit_assignment_target(ast, id),
            Capability::ConstantExpression => visitor.visit_constant_expression(ast, id),
        }
    }

    visitor.visit_node(ast, id);
}

/// Pre-order traversal helper: dispatch the node, then its children in
/// field-index order, recursively.
pub fn visit_children(ast: &Ast, id: NodeId, visitor: &mut dyn Visitor) {
    accept(ast, id, visitor);
    for child in ast.node(id).child_ids() {
        visit_children(ast, child, visitor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_order_for_a_clause() {
        // deviceptr(p) under `data`: concrete kind, six capability
        // callbacks in declaration order, then the base method.
        let ast = Ast::parse_pragma("#pragma acc data deviceptr(p)").unwrap();
        let clause =
            crate::acc::ast::query::find_first(&ast, ast.root(), crate::acc::ast::node::NodeKind::VarListClause)
                .unwrap();

        #[derive(Default)]
        struct Recorder {
            calls: Vec<&'static str>,
        }
        impl Visitor for Recorder {
            fn visit_var_list_clause(&mut self, _: &Ast, _: NodeId) {
                self.calls.push("concrete");
            }
            fn visit_parallel_clause(&mut self, _: &Ast, _: NodeId) {
                self.calls.push("parallel");
            }
            fn visit_parallel_loop_clause(&mut self, _: &Ast, _: NodeId) {
                self.calls.push("parallel loop");
            }
            fn visit_kernels_clause(&mut self, _: &Ast, _: NodeId) {
                self.calls.push("kernels");
            }
            fn visit_kernels_loop_clause(&mut self, _: &Ast, _: NodeId) {
                self.calls.push("kernels loop");
            }
            fn visit_data_clause(&mut self, _: &Ast, _: NodeId) {
                self.calls.push("data");
            }
            fn visit_declare_clause(&mut self, _: &Ast, _: NodeId) {
                self.calls.push("declare");
            }
            fn visit_node(&mut self, _: &Ast, _: NodeId) {
                self.calls.push("base");
            }
        }

        let mut recorder = Recorder::default();
        accept(&ast, clause, &mut recorder);
        assert_eq!(
            recorder.calls,
            vec![
                "concrete",
                "parallel",
                "parallel loop",
                "kernels",
                "kernels loop",
                "data",
                "declare",
                "base"
            ]
        );
    }
}
