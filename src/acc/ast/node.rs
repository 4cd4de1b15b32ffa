//! AST node model for OpenACC directives
//!
//! One sum type ([`NodeData`]) covers every node kind: the directive
//! constructs, clause nodes grouped by syntactic shape, list nodes, the
//! error-recovery token run, and the expression fragment of the host
//! language that clauses reference.
//!
//! The "capability interface" system of the directive grammar (one clause
//! syntax being legal under several directive contexts) is expressed as a
//! per-clause [`ContextSet`]: `deviceptr(list)` is one `ClauseKind` with six
//! legal contexts rather than six node types. Clause-list slots check the
//! set at insertion time, so an illegal placement fails before the tree is
//! touched.

use crate::acc::token::Token;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// Stable handle to a node in an [`crate::acc::ast::tree::Ast`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The directive contexts a clause can be legal under.
///
/// The variant order is the capability declaration order: visitors receive
/// their per-context callbacks in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveContext {
    Parallel,
    ParallelLoop,
    Kernels,
    KernelsLoop,
    Loop,
    Data,
    EnterData,
    ExitData,
    HostData,
    Declare,
    Update,
    Routine,
}

/// All contexts in declaration order.
pub const ALL_CONTEXTS: [DirectiveContext; 12] = [
    DirectiveContext::Parallel,
    DirectiveContext::ParallelLoop,
    DirectiveContext::Kernels,
    DirectiveContext::KernelsLoop,
    DirectiveContext::Loop,
    DirectiveContext::Data,
    DirectiveContext::EnterData,
    DirectiveContext::ExitData,
    DirectiveContext::HostData,
    DirectiveContext::Declare,
    DirectiveContext::Update,
    DirectiveContext::Routine,
];

impl fmt::Display for DirectiveContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DirectiveContext::Parallel => "parallel",
            DirectiveContext::ParallelLoop => "parallel loop",
            DirectiveContext::Kernels => "kernels",
            DirectiveContext::KernelsLoop => "kernels loop",
            DirectiveContext::Loop => "loop",
            DirectiveContext::Data => "data",
            DirectiveContext::EnterData => "enter data",
            DirectiveContext::ExitData => "exit data",
            DirectiveContext::HostData => "host_data",
            DirectiveContext::Declare => "declare",
            DirectiveContext::Update => "update",
            DirectiveContext::Routine => "routine",
        };
        write!(f, "{}", name)
    }
}

/// Small const bitset of directive contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContextSet(u16);

impl ContextSet {
    pub const fn of(contexts: &[DirectiveContext]) -> ContextSet {
        let mut bits = 0u16;
        let mut i = 0;
        while i < contexts.len() {
            bits |= 1 << contexts[i] as u16;
            i += 1;
        }
        ContextSet(bits)
    }

    pub fn contains(self, context: DirectiveContext) -> bool {
        self.0 & (1 << context as u16) != 0
    }

    /// Iterate the contained contexts in declaration order.
    pub fn iter(self) -> impl Iterator<Item = DirectiveContext> {
        ALL_CONTEXTS.into_iter().filter(move |c| self.contains(*c))
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Every distinct clause syntax the grammar knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    Copy,
    Copyin,
    Copyout,
    Create,
    Delete,
    Present,
    PresentOrCopy,
    PresentOrCopyin,
    PresentOrCopyout,
    PresentOrCreate,
    Deviceptr,
    DeviceResident,
    Link,
    UseDevice,
    Private,
    Firstprivate,
    Host,
    Device,
    SelfClause,
    If,
    Async,
    NumGangs,
    NumWorkers,
    VectorLength,
    Collapse,
    Gang,
    Worker,
    Vector,
    Bind,
    Seq,
    Auto,
    Independent,
    Nohost,
    Reduction,
    Tile,
    Default,
    Wait,
}

/// The argument syntax a clause keyword takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseShape {
    /// `kw ( data-item-list )`
    VarList,
    /// `kw ( expr )`
    Expr,
    /// `kw` or `kw ( expr )`
    OptionalExpr,
    /// bare keyword
    Bare,
    /// `reduction ( op : list )`
    Reduction,
    /// `tile ( expr-list )`
    Tile,
    /// `default ( none )`
    Default,
    /// `wait` or `wait ( expr-list )`
    Wait,
}

/// Keyword table, abbreviation aliases included. Lookup is over the whole
/// identifier, which gives maximal-munch resolution between a long form and
/// its abbreviation (`present_or_copyout` vs `pcopyout`) for free.
static CLAUSE_KEYWORDS: Lazy<HashMap<&'static str, ClauseKind>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert("copy", ClauseKind::Copy);
    map.insert("copyin", ClauseKind::Copyin);
    map.insert("copyout", ClauseKind::Copyout);
    map.insert("create", ClauseKind::Create);
    map.insert("delete", ClauseKind::Delete);
    map.insert("present", ClauseKind::Present);
    map.insert("present_or_copy", ClauseKind::PresentOrCopy);
    map.insert("pcopy", ClauseKind::PresentOrCopy);
    map.insert("present_or_copyin", ClauseKind::PresentOrCopyin);
    map.insert("pcopyin", ClauseKind::PresentOrCopyin);
    map.insert("present_or_copyout", ClauseKind::PresentOrCopyout);
    map.insert("pcopyout", ClauseKind::PresentOrCopyout);
    map.insert("present_or_create", ClauseKind::PresentOrCreate);
    map.insert("pcreate", ClauseKind::PresentOrCreate);
    map.insert("deviceptr", ClauseKind::Deviceptr);
    map.insert("device_resident", ClauseKind::DeviceResident);
    map.insert("link", ClauseKind::Link);
    map.insert("use_device", ClauseKind::UseDevice);
    map.insert("private", ClauseKind::Private);
    map.insert("firstprivate", ClauseKind::Firstprivate);
    map.insert("host", ClauseKind::Host);
    map.insert("device", ClauseKind::Device);
    map.insert("self", ClauseKind::SelfClause);
    map.insert("if", ClauseKind::If);
    map.insert("async", ClauseKind::Async);
    map.insert("num_gangs", ClauseKind::NumGangs);
    map.insert("num_workers", ClauseKind::NumWorkers);
    map.insert("vector_length", ClauseKind::VectorLength);
    map.insert("collapse", ClauseKind::Collapse);
    map.insert("gang", ClauseKind::Gang);
    map.insert("worker", ClauseKind::Worker);
    map.insert("vector", ClauseKind::Vector);
    map.insert("bind", ClauseKind::Bind);
    map.insert("seq", ClauseKind::Seq);
    map.insert("auto", ClauseKind::Auto);
    map.insert("independent", ClauseKind::Independent);
    map.insert("nohost", ClauseKind::Nohost);
    map.insert("reduction", ClauseKind::Reduction);
    map.insert("tile", ClauseKind::Tile);
    map.insert("default", ClauseKind::Default);
    map.insert("wait", ClauseKind::Wait);
    map
});

impl ClauseKind {
    /// Resolve a clause keyword (or abbreviation alias) to its kind.
    pub fn lookup(keyword: &str) -> Option<ClauseKind> {
        CLAUSE_KEYWORDS.get(keyword).copied()
    }

    /// Canonical keyword spelling.
    pub fn name(self) -> &'static str {
        match self {
            ClauseKind::Copy => "copy",
            ClauseKind::Copyin => "copyin",
            ClauseKind::Copyout => "copyout",
            ClauseKind::Create => "create",
            ClauseKind::Delete => "delete",
            ClauseKind::Present => "present",
            ClauseKind::PresentOrCopy => "present_or_copy",
            ClauseKind::PresentOrCopyin => "present_or_copyin",
            ClauseKind::PresentOrCopyout => "present_or_copyout",
            ClauseKind::PresentOrCreate => "present_or_create",
            ClauseKind::Deviceptr => "deviceptr",
            ClauseKind::DeviceResident => "device_resident",
            ClauseKind::Link => "link",
            ClauseKind::UseDevice => "use_device",
            ClauseKind::Private => "private",
            ClauseKind::Firstprivate => "firstprivate",
            ClauseKind::Host => "host",
            ClauseKind::Device => "device",
            ClauseKind::SelfClause => "self",
            ClauseKind::If => "if",
            ClauseKind::Async => "async",
            ClauseKind::NumGangs => "num_gangs",
            ClauseKind::NumWorkers => "num_workers",
            ClauseKind::VectorLength => "vector_length",
            ClauseKind::Collapse => "collapse",
            ClauseKind::Gang => "gang",
            ClauseKind::Worker => "worker",
            ClauseKind::Vector => "vector",
            ClauseKind::Bind => "bind",
            ClauseKind::Seq => "seq",
            ClauseKind::Auto => "auto",
            ClauseKind::Independent => "independent",
            ClauseKind::Nohost => "nohost",
            ClauseKind::Reduction => "reduction",
            ClauseKind::Tile => "tile",
            ClauseKind::Default => "default",
            ClauseKind::Wait => "wait",
        }
    }

    pub fn shape(self) -> ClauseShape {
        use ClauseKind::*;
        match self {
            Copy | Copyin | Copyout | Create | Delete | Present | PresentOrCopy
            | PresentOrCopyin | PresentOrCopyout | PresentOrCreate | Deviceptr
            | DeviceResident | Link | UseDevice | Private | Firstprivate | Host | Device
            | SelfClause => ClauseShape::VarList,
            If | NumGangs | NumWorkers | VectorLength | Collapse | Bind => ClauseShape::Expr,
            Async | Gang | Worker | Vector => ClauseShape::OptionalExpr,
            Seq | Auto | Independent | Nohost => ClauseShape::Bare,
            Reduction => ClauseShape::Reduction,
            Tile => ClauseShape::Tile,
            Default => ClauseShape::Default,
            Wait => ClauseShape::Wait,
        }
    }

    /// The directive contexts this clause is legal under. Transcribed from
    /// the per-clause interface conformance of the reference grammar.
    pub fn contexts(self) -> ContextSet {
        use DirectiveContext::*;
        match self {
            ClauseKind::Copy
            | ClauseKind::Present
            | ClauseKind::PresentOrCopy
            | ClauseKind::PresentOrCopyout
            | ClauseKind::Deviceptr => {
                ContextSet::of(&[Parallel, ParallelLoop, Kernels, KernelsLoop, Data, Declare])
            }
            ClauseKind::Copyin
            | ClauseKind::Create
            | ClauseKind::PresentOrCopyin
            | ClauseKind::PresentOrCreate => ContextSet::of(&[
                Parallel,
                ParallelLoop,
                Kernels,
                KernelsLoop,
                Data,
                EnterData,
                Declare,
            ]),
            ClauseKind::Copyout => ContextSet::of(&[
                Parallel,
                ParallelLoop,
                Kernels,
                KernelsLoop,
                Data,
                ExitData,
                Declare,
            ]),
            ClauseKind::Delete => ContextSet::of(&[ExitData]),
            ClauseKind::DeviceResident | ClauseKind::Link => ContextSet::of(&[Declare]),
            ClauseKind::UseDevice => ContextSet::of(&[HostData]),
            ClauseKind::Private => ContextSet::of(&[Parallel, ParallelLoop, KernelsLoop, Loop]),
            ClauseKind::Firstprivate => ContextSet::of(&[Parallel, ParallelLoop]),
            ClauseKind::Host | ClauseKind::Device | ClauseKind::SelfClause => {
                ContextSet::of(&[Update])
            }
            ClauseKind::If => ContextSet::of(&[
                Parallel,
                ParallelLoop,
                Kernels,
                KernelsLoop,
                Data,
                EnterData,
                ExitData,
                Update,
            ]),
            ClauseKind::Async | ClauseKind::Wait => ContextSet::of(&[
                Parallel,
                ParallelLoop,
                Kernels,
                KernelsLoop,
                EnterData,
                ExitData,
                Update,
            ]),
            ClauseKind::NumGangs | ClauseKind::NumWorkers | ClauseKind::VectorLength => {
                ContextSet::of(&[Parallel, ParallelLoop])
            }
            ClauseKind::Collapse | ClauseKind::Auto | ClauseKind::Independent => {
                ContextSet::of(&[ParallelLoop, KernelsLoop, Loop])
            }
            ClauseKind::Gang | ClauseKind::Worker | ClauseKind::Vector | ClauseKind::Seq => {
                ContextSet::of(&[ParallelLoop, KernelsLoop, Loop, Routine])
            }
            ClauseKind::Bind | ClauseKind::Nohost => ContextSet::of(&[Routine]),
            ClauseKind::Reduction => {
                ContextSet::of(&[Parallel, ParallelLoop, KernelsLoop, Loop])
            }
            ClauseKind::Tile => ContextSet::of(&[ParallelLoop, KernelsLoop, Loop]),
            ClauseKind::Default => {
                ContextSet::of(&[Parallel, ParallelLoop, Kernels, KernelsLoop])
            }
        }
    }
}

/// Fieldless tag for every node kind; what typed queries filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    AccParallel,
    AccParallelLoop,
    AccKernels,
    AccKernelsLoop,
    AccLoop,
    AccData,
    AccEnterData,
    AccExitData,
    AccHostData,
    AccDeclare,
    AccUpdate,
    AccWait,
    AccAtomic,
    AccRoutine,
    List,
    TokenRun,
    VarListClause,
    ExprClause,
    BareClause,
    ReductionClause,
    TileClause,
    DefaultClause,
    WaitClause,
    DataItem,
    Identifier,
    Constant,
    StringLiteral,
    ParenExpression,
    UnaryExpression,
    BinaryExpression,
    TernaryExpression,
    ArrayAccessExpression,
    ElementAccessExpression,
    FunctionCallExpression,
    SizeofExpression,
}

impl NodeKind {
    /// Whether this kind belongs to the host-language expression fragment.
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            NodeKind::Identifier
                | NodeKind::Constant
                | NodeKind::StringLiteral
                | NodeKind::ParenExpression
                | NodeKind::UnaryExpression
                | NodeKind::BinaryExpression
                | NodeKind::TernaryExpression
                | NodeKind::ArrayAccessExpression
                | NodeKind::ElementAccessExpression
                | NodeKind::FunctionCallExpression
                | NodeKind::SizeofExpression
        )
    }

    pub fn is_directive(self) -> bool {
        matches!(
            self,
            NodeKind::AccParallel
                | NodeKind::AccParallelLoop
                | NodeKind::AccKernels
                | NodeKind::AccKernelsLoop
                | NodeKind::AccLoop
                | NodeKind::AccData
                | NodeKind::AccEnterData
                | NodeKind::AccExitData
                | NodeKind::AccHostData
                | NodeKind::AccDeclare
                | NodeKind::AccUpdate
                | NodeKind::AccWait
                | NodeKind::AccAtomic
                | NodeKind::AccRoutine
        )
    }

    pub fn is_clause(self) -> bool {
        matches!(
            self,
            NodeKind::VarListClause
                | NodeKind::ExprClause
                | NodeKind::BareClause
                | NodeKind::ReductionClause
                | NodeKind::TileClause
                | NodeKind::DefaultClause
                | NodeKind::WaitClause
        )
    }
}

/// Capability interfaces a node kind can satisfy, beyond its concrete kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Any directive construct.
    AccConstruct,
    /// Usable as a clause of the given directive context.
    ClauseFor(DirectiveContext),
    /// Any expression.
    Expression,
    /// Usable as an assignment target.
    AssignmentTarget,
    /// Usable where a constant expression is required.
    ConstantExpression,
}

/// Element type of a list node; what its node members must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListElemType {
    Clauses(DirectiveContext),
    DataItems,
    Expressions,
}

/// One member of a list node: either an element or a separator token kept
/// in place so the list renders losslessly.
#[derive(Debug, Clone, PartialEq)]
pub enum ListCell {
    Node(NodeId),
    Separator(Token),
}

/// Ordered, homogeneous, mutable sequence node. Used for clause lists, data
/// item lists, and expression lists alike; separators are list members in
/// alternating position.
#[derive(Debug, Clone, PartialEq)]
pub struct ListNode {
    pub elem_type: ListElemType,
    pub cells: Vec<ListCell>,
}

impl ListNode {
    pub fn new(elem_type: ListElemType) -> ListNode {
        ListNode {
            elem_type,
            cells: Vec::new(),
        }
    }

    /// The node elements, skipping separators.
    pub fn elements(&self) -> Vec<NodeId> {
        self.cells
            .iter()
            .filter_map(|cell| match cell {
                ListCell::Node(id) => Some(*id),
                ListCell::Separator(_) => None,
            })
            .collect()
    }
}

/// A run of tokens skipped during error recovery, held as an explicit node
/// so the lossless-rendering invariant stays locally checkable.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRun {
    pub tokens: Vec<Token>,
}

// Directive payloads. Field declaration order is source order; hidden
// keyword tokens are ordinary fields so rendering is a plain field walk.

#[derive(Debug, Clone, PartialEq)]
pub struct AccParallel {
    pub pragma_acc: Token,
    pub kw_parallel: Token,
    pub clauses: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccParallelLoop {
    pub pragma_acc: Token,
    pub kw_parallel: Token,
    /// Tokens skipped while resynchronizing between `parallel` and `loop`.
    pub skipped: Option<NodeId>,
    pub kw_loop: Token,
    pub clauses: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccKernels {
    pub pragma_acc: Token,
    pub kw_kernels: Token,
    pub clauses: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccKernelsLoop {
    pub pragma_acc: Token,
    pub kw_kernels: Token,
    pub skipped: Option<NodeId>,
    pub kw_loop: Token,
    pub clauses: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccLoop {
    pub pragma_acc: Token,
    pub kw_loop: Token,
    pub clauses: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccData {
    pub pragma_acc: Token,
    pub kw_data: Token,
    pub clauses: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccEnterData {
    pub pragma_acc: Token,
    pub kw_enter: Token,
    pub kw_data: Token,
    pub clauses: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccExitData {
    pub pragma_acc: Token,
    pub kw_exit: Token,
    pub kw_data: Token,
    pub clauses: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccHostData {
    pub pragma_acc: Token,
    pub kw_host_data: Token,
    pub clauses: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccDeclare {
    pub pragma_acc: Token,
    pub kw_declare: Token,
    pub clauses: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccUpdate {
    pub pragma_acc: Token,
    pub kw_update: Token,
    pub clauses: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccWait {
    pub pragma_acc: Token,
    pub kw_wait: Token,
    pub lparen: Option<Token>,
    /// Expression list of wait arguments.
    pub args: Option<NodeId>,
    pub rparen: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccAtomic {
    pub pragma_acc: Token,
    pub kw_atomic: Token,
    /// `read`, `write`, `update`, or `capture`.
    pub mode: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccRoutine {
    pub pragma_acc: Token,
    pub kw_routine: Token,
    pub lparen: Option<Token>,
    pub name: Option<NodeId>,
    pub rparen: Option<Token>,
    pub clauses: Option<NodeId>,
}

// Clause payloads, one per syntactic shape. The `kind` discriminant carries
// the context set that gates which clause lists accept the node.

#[derive(Debug, Clone, PartialEq)]
pub struct VarListClause {
    pub kind: ClauseKind,
    pub keyword: Token,
    pub lparen: Token,
    /// Data item list.
    pub items: Option<NodeId>,
    pub rparen: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprClause {
    pub kind: ClauseKind,
    pub keyword: Token,
    pub lparen: Option<Token>,
    pub expr: Option<NodeId>,
    pub rparen: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BareClause {
    pub kind: ClauseKind,
    pub keyword: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReductionClause {
    pub keyword: Token,
    pub lparen: Token,
    pub operator: Token,
    pub colon: Token,
    pub items: Option<NodeId>,
    pub rparen: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileClause {
    pub keyword: Token,
    pub lparen: Token,
    /// Expression list of tile sizes.
    pub args: Option<NodeId>,
    pub rparen: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultClause {
    pub keyword: Token,
    pub lparen: Token,
    pub kw_none: Token,
    pub rparen: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaitClause {
    pub keyword: Token,
    pub lparen: Option<Token>,
    pub args: Option<NodeId>,
    pub rparen: Option<Token>,
}

/// `identifier` or `identifier [ lower : count ]` inside a data clause.
#[derive(Debug, Clone, PartialEq)]
pub struct DataItem {
    pub identifier: Option<NodeId>,
    pub lbracket: Option<Token>,
    pub lower_bound: Option<NodeId>,
    pub colon: Option<Token>,
    pub count: Option<NodeId>,
    pub rbracket: Option<Token>,
}

// Expression payloads, one node kind per concrete syntax.

#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierNode {
    pub name: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstantNode {
    pub value: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteralNode {
    pub value: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpression {
    pub lparen: Token,
    pub expr: Option<NodeId>,
    pub rparen: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub operator: Token,
    pub operand: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub lhs: Option<NodeId>,
    pub operator: Token,
    pub rhs: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TernaryExpression {
    pub condition: Option<NodeId>,
    pub question: Token,
    pub then_expr: Option<NodeId>,
    pub colon: Token,
    pub else_expr: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAccessExpression {
    pub array: Option<NodeId>,
    pub lbracket: Token,
    pub index: Option<NodeId>,
    pub rbracket: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementAccessExpression {
    pub object: Option<NodeId>,
    /// `.` or `->`.
    pub operator: Token,
    pub member: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallExpression {
    pub function: Option<NodeId>,
    pub lparen: Token,
    pub args: Option<NodeId>,
    pub rparen: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SizeofExpression {
    pub kw_sizeof: Token,
    pub lparen: Option<Token>,
    pub operand: Option<NodeId>,
    pub rparen: Option<Token>,
}

/// The closed sum of all node kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    AccParallel(AccParallel),
    AccParallelLoop(AccParallelLoop),
    AccKernels(AccKernels),
    AccKernelsLoop(AccKernelsLoop),
    AccLoop(AccLoop),
    AccData(AccData),
    AccEnterData(AccEnterData),
    AccExitData(AccExitData),
    AccHostData(AccHostData),
    AccDeclare(AccDeclare),
    AccUpdate(AccUpdate),
    AccWait(AccWait),
    AccAtomic(AccAtomic),
    AccRoutine(AccRoutine),
    List(ListNode),
    TokenRun(TokenRun),
    VarListClause(VarListClause),
    ExprClause(ExprClause),
    BareClause(BareClause),
    ReductionClause(ReductionClause),
    TileClause(TileClause),
    DefaultClause(DefaultClause),
    WaitClause(WaitClause),
    DataItem(DataItem),
    Identifier(IdentifierNode),
    Constant(ConstantNode),
    StringLiteral(StringLiteralNode),
    ParenExpression(ParenExpression),
    UnaryExpression(UnaryExpression),
    BinaryExpression(BinaryExpression),
    TernaryExpression(TernaryExpression),
    ArrayAccessExpression(ArrayAccessExpression),
    ElementAccessExpression(ElementAccessExpression),
    FunctionCallExpression(FunctionCallExpression),
    SizeofExpression(SizeofExpression),
}

/// One field of a node, as seen by generic traversal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRef<'a> {
    Token(&'a Token),
    Child(NodeId),
}

/// What a child slot requires of the node assigned into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotType {
    /// List node of clauses for the given context.
    ClauseList(DirectiveContext),
    /// List node of data items.
    DataItemList,
    /// List node of expressions.
    ExprList,
    /// Error-recovery token run.
    SkippedTokens,
    /// Clause legal under the given context.
    Clause(DirectiveContext),
    DataItem,
    Expression,
    ConstantExpression,
    Identifier,
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotType::ClauseList(ctx) => write!(f, "clause list for `{}`", ctx),
            SlotType::DataItemList => write!(f, "data item list"),
            SlotType::ExprList => write!(f, "expression list"),
            SlotType::SkippedTokens => write!(f, "skipped-token run"),
            SlotType::Clause(ctx) => write!(f, "clause legal under `{}`", ctx),
            SlotType::DataItem => write!(f, "data item"),
            SlotType::Expression => write!(f, "expression"),
            SlotType::ConstantExpression => write!(f, "constant expression"),
            SlotType::Identifier => write!(f, "identifier"),
        }
    }
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::AccParallel(_) => NodeKind::AccParallel,
            NodeData::AccParallelLoop(_) => NodeKind::AccParallelLoop,
            NodeData::AccKernels(_) => NodeKind::AccKernels,
            NodeData::AccKernelsLoop(_) => NodeKind::AccKernelsLoop,
            NodeData::AccLoop(_) => NodeKind::AccLoop,
            NodeData::AccData(_) => NodeKind::AccData,
            NodeData::AccEnterData(_) => NodeKind::AccEnterData,
            NodeData::AccExitData(_) => NodeKind::AccExitData,
            NodeData::AccHostData(_) => NodeKind::AccHostData,
            NodeData::AccDeclare(_) => NodeKind::AccDeclare,
            NodeData::AccUpdate(_) => NodeKind::AccUpdate,
            NodeData::AccWait(_) => NodeKind::AccWait,
            NodeData::AccAtomic(_) => NodeKind::AccAtomic,
            NodeData::AccRoutine(_) => NodeKind::AccRoutine,
            NodeData::List(_) => NodeKind::List,
            NodeData::TokenRun(_) => NodeKind::TokenRun,
            NodeData::VarListClause(_) => NodeKind::VarListClause,
            NodeData::ExprClause(_) => NodeKind::ExprClause,
            NodeData::BareClause(_) => NodeKind::BareClause,
            NodeData::ReductionClause(_) => NodeKind::ReductionClause,
            NodeData::TileClause(_) => NodeKind::TileClause,
            NodeData::DefaultClause(_) => NodeKind::DefaultClause,
            NodeData::WaitClause(_) => NodeKind::WaitClause,
            NodeData::DataItem(_) => NodeKind::DataItem,
            NodeData::Identifier(_) => NodeKind::Identifier,
            NodeData::Constant(_) => NodeKind::Constant,
            NodeData::StringLiteral(_) => NodeKind::StringLiteral,
            NodeData::ParenExpression(_) => NodeKind::ParenExpression,
            NodeData::UnaryExpression(_) => NodeKind::UnaryExpression,
            NodeData::BinaryExpression(_) => NodeKind::BinaryExpression,
            NodeData::TernaryExpression(_) => NodeKind::TernaryExpression,
            NodeData::ArrayAccessExpression(_) => NodeKind::ArrayAccessExpression,
            NodeData::ElementAccessExpression(_) => NodeKind::ElementAccessExpression,
            NodeData::FunctionCallExpression(_) => NodeKind::FunctionCallExpression,
            NodeData::SizeofExpression(_) => NodeKind::SizeofExpression,
        }
    }

    /// The clause kind, for clause nodes.
    pub fn clause_kind(&self) -> Option<ClauseKind> {
        match self {
            NodeData::VarListClause(c) => Some(c.kind),
            NodeData::ExprClause(c) => Some(c.kind),
            NodeData::BareClause(c) => Some(c.kind),
            NodeData::ReductionClause(_) => Some(ClauseKind::Reduction),
            NodeData::TileClause(_) => Some(ClauseKind::Tile),
            NodeData::DefaultClause(_) => Some(ClauseKind::Default),
            NodeData::WaitClause(_) => Some(ClauseKind::Wait),
            _ => None,
        }
    }

    /// Enumerate this node's fields in declared (source) order. Unset
    /// optional fields are skipped.
    pub fn fields(&self) -> Vec<FieldRef<'_>> {
        let mut out = Vec::new();
        self.push_fields(&mut out);
        out
    }

    fn push_fields<'a>(&'a self, out: &mut Vec<FieldRef<'a>>) {
        fn tok<'a>(out: &mut Vec<FieldRef<'a>>, token: &'a Token) {
            out.push(FieldRef::Token(token));
        }
        fn opt_tok<'a>(out: &mut Vec<FieldRef<'a>>, token: &'a Option<Token>) {
            if let Some(token) = token {
                out.push(FieldRef::Token(token));
            }
        }
        fn child(out: &mut Vec<FieldRef<'_>>, id: &Option<NodeId>) {
            if let Some(id) = id {
                out.push(FieldRef::Child(*id));
            }
        }

        match self {
            NodeData::AccParallel(n) => {
                tok(out, &n.pragma_acc);
                tok(out, &n.kw_parallel);
                child(out, &n.clauses);
            }
            NodeData::AccParallelLoop(n) => {
                tok(out, &n.pragma_acc);
                tok(out, &n.kw_parallel);
                child(out, &n.skipped);
                tok(out, &n.kw_loop);
                child(out, &n.clauses);
            }
            NodeData::AccKernels(n) => {
                tok(out, &n.pragma_acc);
                tok(out, &n.kw_kernels);
                child(out, &n.clauses);
            }
            NodeData::AccKernelsLoop(n) => {
                tok(out, &n.pragma_acc);
                tok(out, &n.kw_kernels);
                child(out, &n.skipped);
                tok(out, &n.kw_loop);
                child(out, &n.clauses);
            }
            NodeData::AccLoop(n) => {
                tok(out, &n.pragma_acc);
                tok(out, &n.kw_loop);
                child(out, &n.clauses);
            }
            NodeData::AccData(n) => {
                tok(out, &n.pragma_acc);
                tok(out, &n.kw_data);
                child(out, &n.clauses);
            }
            NodeData::AccEnterData(n) => {
                tok(out, &n.pragma_acc);
                tok(out, &n.kw_enter);
                tok(out, &n.kw_data);
                child(out, &n.clauses);
            }
            NodeData::AccExitData(n) => {
                tok(out, &n.pragma_acc);
                tok(out, &n.kw_exit);
                tok(out, &n.kw_data);
                child(out, &n.clauses);
            }
            NodeData::AccHostData(n) => {
                tok(out, &n.pragma_acc);
                tok(out, &n.kw_host_data);
                child(out, &n.clauses);
            }
            NodeData::AccDeclare(n) => {
                tok(out, &n.pragma_acc);
                tok(out, &n.kw_declare);
                child(out, &n.clauses);
            }
            NodeData::AccUpdate(n) => {
                tok(out, &n.pragma_acc);
                tok(out, &n.kw_update);
                child(out, &n.clauses);
            }
            NodeData::AccWait(n) => {
                tok(out, &n.pragma_acc);
                tok(out, &n.kw_wait);
                opt_tok(out, &n.lparen);
                child(out, &n.args);
                opt_tok(out, &n.rparen);
            }
            NodeData::AccAtomic(n) => {
                tok(out, &n.pragma_acc);
                tok(out, &n.kw_atomic);
                opt_tok(out, &n.mode);
            }
            NodeData::AccRoutine(n) => {
                tok(out, &n.pragma_acc);
                tok(out, &n.kw_routine);
                opt_tok(out, &n.lparen);
                child(out, &n.name);
                opt_tok(out, &n.rparen);
                child(out, &n.clauses);
            }
            NodeData::List(n) => {
                for cell in &n.cells {
                    match cell {
                        ListCell::Node(id) => out.push(FieldRef::Child(*id)),
                        ListCell::Separator(token) => out.push(FieldRef::Token(token)),
                    }
                }
            }
            NodeData::TokenRun(n) => {
                for token in &n.tokens {
                    out.push(FieldRef::Token(token));
                }
            }
            NodeData::VarListClause(n) => {
                tok(out, &n.keyword);
                tok(out, &n.lparen);
                child(out, &n.items);
                tok(out, &n.rparen);
            }
            NodeData::ExprClause(n) => {
                tok(out, &n.keyword);
                opt_tok(out, &n.lparen);
                child(out, &n.expr);
                opt_tok(out, &n.rparen);
            }
            NodeData::BareClause(n) => {
                tok(out, &n.keyword);
            }
            NodeData::ReductionClause(n) => {
                tok(out, &n.keyword);
                tok(out, &n.lparen);
                tok(out, &n.operator);
                tok(out, &n.colon);
                child(out, &n.items);
                tok(out, &n.rparen);
            }
            NodeData::TileClause(n) => {
                tok(out, &n.keyword);
                tok(out, &n.lparen);
                child(out, &n.args);
                tok(out, &n.rparen);
            }
            NodeData::DefaultClause(n) => {
                tok(out, &n.keyword);
                tok(out, &n.lparen);
                tok(out, &n.kw_none);
                tok(out, &n.rparen);
            }
            NodeData::WaitClause(n) => {
                tok(out, &n.keyword);
                opt_tok(out, &n.lparen);
                child(out, &n.args);
                opt_tok(out, &n.rparen);
            }
            NodeData::DataItem(n) => {
                child(out, &n.identifier);
                opt_tok(out, &n.lbracket);
                child(out, &n.lower_bound);
                opt_tok(out, &n.colon);
                child(out, &n.count);
                opt_tok(out, &n.rbracket);
            }
            NodeData::Identifier(n) => {
                tok(out, &n.name);
            }
            NodeData::Constant(n) => {
                tok(out, &n.value);
            }
            NodeData::StringLiteral(n) => {
                tok(out, &n.value);
            }
            NodeData::ParenExpression(n) => {
                tok(out, &n.lparen);
                child(out, &n.expr);
                tok(out, &n.rparen);
            }
            NodeData::UnaryExpression(n) => {
                tok(out, &n.operator);
                child(out, &n.operand);
            }
            NodeData::BinaryExpression(n) => {
                child(out, &n.lhs);
                tok(out, &n.operator);
                child(out, &n.rhs);
            }
            NodeData::TernaryExpression(n) => {
                child(out, &n.condition);
                tok(out, &n.question);
                child(out, &n.then_expr);
                tok(out, &n.colon);
                child(out, &n.else_expr);
            }
            NodeData::ArrayAccessExpression(n) => {
                child(out, &n.array);
                tok(out, &n.lbracket);
                child(out, &n.index);
                tok(out, &n.rbracket);
            }
            NodeData::ElementAccessExpression(n) => {
                child(out, &n.object);
                tok(out, &n.operator);
                child(out, &n.member);
            }
            NodeData::FunctionCallExpression(n) => {
                child(out, &n.function);
                tok(out, &n.lparen);
                child(out, &n.args);
                tok(out, &n.rparen);
            }
            NodeData::SizeofExpression(n) => {
                tok(out, &n.kw_sizeof);
                opt_tok(out, &n.lparen);
                child(out, &n.operand);
                opt_tok(out, &n.rparen);
            }
        }
    }

    /// Child node ids in field order.
    pub fn child_ids(&self) -> Vec<NodeId> {
        self.fields()
            .into_iter()
            .filter_map(|field| match field {
                FieldRef::Child(id) => Some(id),
                FieldRef::Token(_) => None,
            })
            .collect()
    }

    /// Capability interfaces this node implements, in declaration order.
    pub fn capabilities(&self) -> Vec<Capability> {
        let kind = self.kind();
        if kind.is_directive() {
            return vec![Capability::AccConstruct];
        }
        if let Some(clause) = self.clause_kind() {
            return clause
                .contexts()
                .iter()
                .map(Capability::ClauseFor)
                .collect();
        }
        if kind.is_expression() {
            let mut caps = vec![Capability::Expression];
            let assignable = match self {
                NodeData::Identifier(_)
                | NodeData::ArrayAccessExpression(_)
                | NodeData::ElementAccessExpression(_) => true,
                NodeData::UnaryExpression(unary) => unary.operator.text == "*",
                _ => false,
            };
            if assignable {
                caps.push(Capability::AssignmentTarget);
            }
            let constant = matches!(
                self,
                NodeData::Identifier(_)
                    | NodeData::Constant(_)
                    | NodeData::SizeofExpression(_)
                    | NodeData::UnaryExpression(_)
                    | NodeData::BinaryExpression(_)
                    | NodeData::TernaryExpression(_)
                    | NodeData::ParenExpression(_)
            );
            if constant {
                caps.push(Capability::ConstantExpression);
            }
            return caps;
        }
        Vec::new()
    }

    /// The slot type of the field currently holding `child`, if `child` is a
    /// direct child of this node. Identity is checked, not structure.
    pub(crate) fn slot_of_child(&self, child: NodeId) -> Option<SlotType> {
        let hit = |slot: &Option<NodeId>, ty: SlotType| -> Option<SlotType> {
            if *slot == Some(child) {
                Some(ty)
            } else {
                None
            }
        };
        use SlotType::*;
        match self {
            NodeData::AccParallel(n) => {
                hit(&n.clauses, ClauseList(DirectiveContext::Parallel))
            }
            NodeData::AccParallelLoop(n) => hit(&n.skipped, SkippedTokens)
                .or_else(|| hit(&n.clauses, ClauseList(DirectiveContext::ParallelLoop))),
            NodeData::AccKernels(n) => hit(&n.clauses, ClauseList(DirectiveContext::Kernels)),
            NodeData::AccKernelsLoop(n) => hit(&n.skipped, SkippedTokens)
                .or_else(|| hit(&n.clauses, ClauseList(DirectiveContext::KernelsLoop))),
            NodeData::AccLoop(n) => hit(&n.clauses, ClauseList(DirectiveContext::Loop)),
            NodeData::AccData(n) => hit(&n.clauses, ClauseList(DirectiveContext::Data)),
            NodeData::AccEnterData(n) => hit(&n.clauses, ClauseList(DirectiveContext::EnterData)),
            NodeData::AccExitData(n) => hit(&n.clauses, ClauseList(DirectiveContext::ExitData)),
            NodeData::AccHostData(n) => hit(&n.clauses, ClauseList(DirectiveContext::HostData)),
            NodeData::AccDeclare(n) => hit(&n.clauses, ClauseList(DirectiveContext::Declare)),
            NodeData::AccUpdate(n) => hit(&n.clauses, ClauseList(DirectiveContext::Update)),
            NodeData::AccWait(n) => hit(&n.args, ExprList),
            NodeData::AccAtomic(_) => None,
            NodeData::AccRoutine(n) => hit(&n.name, Identifier)
                .or_else(|| hit(&n.clauses, ClauseList(DirectiveContext::Routine))),
            NodeData::List(n) => {
                let present = n
                    .cells
                    .iter()
                    .any(|cell| matches!(cell, ListCell::Node(id) if *id == child));
                if present {
                    Some(match n.elem_type {
                        ListElemType::Clauses(ctx) => Clause(ctx),
                        ListElemType::DataItems => DataItem,
                        ListElemType::Expressions => Expression,
                    })
                } else {
                    None
                }
            }
            NodeData::TokenRun(_) => None,
            NodeData::VarListClause(n) => hit(&n.items, DataItemList),
            NodeData::ExprClause(n) => hit(&n.expr, Expression),
            NodeData::BareClause(_) => None,
            NodeData::ReductionClause(n) => hit(&n.items, DataItemList),
            NodeData::TileClause(n) => hit(&n.args, ExprList),
            NodeData::DefaultClause(_) => None,
            NodeData::WaitClause(n) => hit(&n.args, ExprList),
            NodeData::DataItem(n) => hit(&n.identifier, Identifier)
                .or_else(|| hit(&n.lower_bound, ConstantExpression))
                .or_else(|| hit(&n.count, ConstantExpression)),
            NodeData::Identifier(_) | NodeData::Constant(_) | NodeData::StringLiteral(_) => None,
            NodeData::ParenExpression(n) => hit(&n.expr, Expression),
            NodeData::UnaryExpression(n) => hit(&n.operand, Expression),
            NodeData::BinaryExpression(n) => {
                hit(&n.lhs, Expression).or_else(|| hit(&n.rhs, Expression))
            }
            NodeData::TernaryExpression(n) => hit(&n.condition, Expression)
                .or_else(|| hit(&n.then_expr, Expression))
                .or_else(|| hit(&n.else_expr, Expression)),
            NodeData::ArrayAccessExpression(n) => {
                hit(&n.array, Expression).or_else(|| hit(&n.index, Expression))
            }
            NodeData::ElementAccessExpression(n) => {
                hit(&n.object, Expression).or_else(|| hit(&n.member, Identifier))
            }
            NodeData::FunctionCallExpression(n) => {
                hit(&n.function, Expression).or_else(|| hit(&n.args, ExprList))
            }
            NodeData::SizeofExpression(n) => hit(&n.operand, Expression),
        }
    }

    /// Overwrite the slot currently holding `old` with `new`. Returns false
    /// if `old` is not a direct child. List parents replace the cell in
    /// place, keeping separators untouched.
    pub(crate) fn assign_child(&mut self, old: NodeId, new: Option<NodeId>) -> bool {
        fn set(slot: &mut Option<NodeId>, old: NodeId, new: Option<NodeId>) -> bool {
            if *slot == Some(old) {
                *slot = new;
                true
            } else {
                false
            }
        }
        match self {
            NodeData::AccParallel(n) => set(&mut n.clauses, old, new),
            NodeData::AccParallelLoop(n) => {
                set(&mut n.skipped, old, new) || set(&mut n.clauses, old, new)
            }
            NodeData::AccKernels(n) => set(&mut n.clauses, old, new),
            NodeData::AccKernelsLoop(n) => {
                set(&mut n.skipped, old, new) || set(&mut n.clauses, old, new)
            }
            NodeData::AccLoop(n) => set(&mut n.clauses, old, new),
            NodeData::AccData(n) => set(&mut n.clauses, old, new),
            NodeData::AccEnterData(n) => set(&mut n.clauses, old, new),
            NodeData::AccExitData(n) => set(&mut n.clauses, old, new),
            NodeData::AccHostData(n) => set(&mut n.clauses, old, new),
            NodeData::AccDeclare(n) => set(&mut n.clauses, old, new),
            NodeData::AccUpdate(n) => set(&mut n.clauses, old, new),
            NodeData::AccWait(n) => set(&mut n.args, old, new),
            NodeData::AccAtomic(_) => false,
            NodeData::AccRoutine(n) => {
                set(&mut n.name, old, new) || set(&mut n.clauses, old, new)
            }
            NodeData::List(n) => {
                for cell in n.cells.iter_mut() {
                    if let ListCell::Node(id) = cell {
                        if *id == old {
                            match new {
                                Some(new_id) => *id = new_id,
                                // Absent values are not representable as a
                                // list cell; removal goes through the list
                                // API, which also fixes separators.
                                None => return false,
                            }
                            return true;
                        }
                    }
                }
                false
            }
            NodeData::TokenRun(_) => false,
            NodeData::VarListClause(n) => set(&mut n.items, old, new),
            NodeData::ExprClause(n) => set(&mut n.expr, old, new),
            NodeData::BareClause(_) => false,
            NodeData::ReductionClause(n) => set(&mut n.items, old, new),
            NodeData::TileClause(n) => set(&mut n.args, old, new),
            NodeData::DefaultClause(_) => false,
            NodeData::WaitClause(n) => set(&mut n.args, old, new),
            NodeData::DataItem(n) => {
                set(&mut n.identifier, old, new)
                    || set(&mut n.lower_bound, old, new)
                    || set(&mut n.count, old, new)
            }
            NodeData::Identifier(_) | NodeData::Constant(_) | NodeData::StringLiteral(_) => false,
            NodeData::ParenExpression(n) => set(&mut n.expr, old, new),
            NodeData::UnaryExpression(n) => set(&mut n.operand, old, new),
            NodeData::BinaryExpression(n) => {
                set(&mut n.lhs, old, new) || set(&mut n.rhs, old, new)
            }
            NodeData::TernaryExpression(n) => {
                set(&mut n.condition, old, new)
                    || set(&mut n.then_expr, old, new)
                    || set(&mut n.else_expr, old, new)
            }
            NodeData::ArrayAccessExpression(n) => {
                set(&mut n.array, old, new) || set(&mut n.index, old, new)
            }
            NodeData::ElementAccessExpression(n) => {
                set(&mut n.object, old, new) || set(&mut n.member, old, new)
            }
            NodeData::FunctionCallExpression(n) => {
                set(&mut n.function, old, new) || set(&mut n.args, old, new)
            }
            NodeData::SizeofExpression(n) => set(&mut n.operand, old, new),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deviceptr_contexts_match_grammar() {
        let contexts = ClauseKind::Deviceptr.contexts();
        assert_eq!(contexts.len(), 6);
        assert!(contexts.contains(DirectiveContext::Data));
        assert!(contexts.contains(DirectiveContext::Declare));
        assert!(contexts.contains(DirectiveContext::Kernels));
        assert!(contexts.contains(DirectiveContext::KernelsLoop));
        assert!(contexts.contains(DirectiveContext::Parallel));
        assert!(contexts.contains(DirectiveContext::ParallelLoop));
        assert!(!contexts.contains(DirectiveContext::Loop));
    }

    #[test]
    fn test_present_or_variants_follow_their_base_clause() {
        // pcopyin/pcreate are legal wherever copyin/create are, enter data
        // included; pcopyout tracks copyout except for exit data.
        assert_eq!(
            ClauseKind::PresentOrCopyin.contexts(),
            ClauseKind::Copyin.contexts()
        );
        assert_eq!(
            ClauseKind::PresentOrCreate.contexts(),
            ClauseKind::Create.contexts()
        );
        assert!(ClauseKind::PresentOrCopyin
            .contexts()
            .contains(DirectiveContext::EnterData));
        assert!(!ClauseKind::PresentOrCopyout
            .contexts()
            .contains(DirectiveContext::ExitData));
    }

    #[test]
    fn test_abbreviation_aliases_resolve() {
        assert_eq!(
            ClauseKind::lookup("pcopyout"),
            Some(ClauseKind::PresentOrCopyout)
        );
        assert_eq!(
            ClauseKind::lookup("present_or_copyout"),
            Some(ClauseKind::PresentOrCopyout)
        );
        assert_eq!(ClauseKind::lookup("loop"), None);
    }

    #[test]
    fn test_context_set_iterates_in_declaration_order() {
        let contexts: Vec<DirectiveContext> = ClauseKind::Reduction.contexts().iter().collect();
        assert_eq!(
            contexts,
            vec![
                DirectiveContext::Parallel,
                DirectiveContext::ParallelLoop,
                DirectiveContext::KernelsLoop,
                DirectiveContext::Loop,
            ]
        );
    }
}
