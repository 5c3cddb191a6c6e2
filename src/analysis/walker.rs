//! The analysis walk.
//!
//! Two passes over the tree: a quick one collecting `goto` targets, then the
//! main walk that needs those targets to decide reachability before it looks
//! at variable usage inside each block.

use fixedbitset::FixedBitSet;
use readex_repr::{
    AssignOp, Block, Expr, GotoKind, LabelId, LabelTarget, ParamModifier, VarId, Variable,
};
use rustc_hash::{FxHashMap, FxHashSet};

use super::naming::NameGenerator;
use super::{call_subject, Declaration, NodeKey};

/// Where a variable was first seen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FirstUse {
    /// Target of a top-level `x = value` statement of the owning block
    Assignment { statement: NodeKey },
    /// `out` argument directly inside the owning block
    OutArgument { argument: NodeKey },
    Other,
}

#[derive(Debug)]
struct VarState {
    owner: NodeKey,
    lambda_depth: usize,
    first_use: Option<FirstUse>,
    uses: usize,
    out_uses: usize,
}

/// Collect the ids of labels targeted by a plain `goto`
pub(super) fn collect_goto_targets(root: &Expr, targets: &mut FxHashSet<LabelId>) {
    if let Expr::Goto(goto) = root {
        if goto.kind == GotoKind::Goto {
            targets.insert(goto.target.id);
        }
    }
    root.for_each_child(|child| collect_goto_targets(child, targets));
}

pub(super) struct Walker<'a> {
    goto_targets: &'a FxHashSet<LabelId>,
    vars: FxHashMap<VarId, VarState>,
    unnamed_vars: Vec<Variable>,
    unnamed_labels: Vec<LabelId>,
    seen_labels: FxHashSet<LabelId>,
    pub(super) names: NameGenerator,
    pub(super) used: FxHashSet<VarId>,
    pub(super) chain_links: FxHashSet<NodeKey>,
    pub(super) unreachable: FxHashMap<NodeKey, FixedBitSet>,
    block_stack: Vec<NodeKey>,
    lambda_depth: usize,
}

impl<'a> Walker<'a> {
    pub fn new(goto_targets: &'a FxHashSet<LabelId>) -> Self {
        Self {
            goto_targets,
            vars: FxHashMap::default(),
            unnamed_vars: Vec::new(),
            unnamed_labels: Vec::new(),
            seen_labels: FxHashSet::default(),
            names: NameGenerator::default(),
            used: FxHashSet::default(),
            chain_links: FxHashSet::default(),
            unreachable: FxHashMap::default(),
            block_stack: Vec::new(),
            lambda_depth: 0,
        }
    }

    pub fn visit(&mut self, expr: &Expr) {
        match expr {
            Expr::Variable(v) => self.record_use(v, None),
            Expr::Block(block) => self.visit_block(expr, block),
            Expr::Lambda(lambda) => {
                for param in &lambda.params {
                    self.declare_name(param);
                }
                self.lambda_depth += 1;
                self.visit(&lambda.body);
                self.lambda_depth -= 1;
            }
            Expr::Call { method, args, .. } => {
                if let Some(subject) = call_subject(expr) {
                    if matches!(subject, Expr::Call { .. }) {
                        self.chain_links.insert(NodeKey::of(subject));
                    }
                }
                if let Expr::Call {
                    subject: Some(subject),
                    ..
                } = expr
                {
                    self.visit(subject);
                }
                let params = method.description().and_then(|m| m.parameters());
                for (index, arg) in args.iter().enumerate() {
                    let is_out = params
                        .and_then(|p| p.get(index))
                        .is_some_and(|p| p.modifier == ParamModifier::Out);
                    match arg {
                        Expr::Variable(v) if is_out => self.record_use(v, Some(NodeKey::of(arg))),
                        _ => self.visit(arg),
                    }
                }
            }
            Expr::Try(try_block) => {
                for handler in &try_block.handlers {
                    if let Some(variable) = &handler.variable {
                        self.declare_name(variable);
                    }
                }
                expr.for_each_child(|child| self.visit(child));
            }
            Expr::Goto(goto) => {
                self.note_label(&goto.target);
                expr.for_each_child(|child| self.visit(child));
            }
            Expr::Label(label) => {
                self.note_label(&label.target);
                expr.for_each_child(|child| self.visit(child));
            }
            Expr::Loop(lp) => {
                for label in lp.break_label.iter().chain(&lp.continue_label) {
                    self.note_label(label);
                }
                self.visit(&lp.body);
            }
            _ => expr.for_each_child(|child| self.visit(child)),
        }
    }

    fn visit_block(&mut self, expr: &Expr, block: &Block) {
        let key = NodeKey::of(expr);
        for variable in &block.variables {
            self.declare_name(variable);
            self.vars.insert(
                variable.id,
                VarState {
                    owner: key,
                    lambda_depth: self.lambda_depth,
                    first_use: None,
                    uses: 0,
                    out_uses: 0,
                },
            );
        }

        let unreachable = self.reachability(&block.statements);
        let returns_value = !block.result_type().is_void();
        let last = block.statements.len().saturating_sub(1);

        self.block_stack.push(key);
        for (index, statement) in block.statements.iter().enumerate() {
            if unreachable.as_ref().is_some_and(|u| u.contains(index)) {
                continue;
            }
            let Expr::Assign {
                op: AssignOp::Assign,
                target,
                value,
            } = statement
            else {
                self.visit(statement);
                continue;
            };
            let Expr::Variable(variable) = target.as_ref() else {
                self.visit(statement);
                continue;
            };
            let owned_here = self
                .vars
                .get(&variable.id)
                .is_some_and(|state| state.owner == key && state.first_use.is_none());
            if !owned_here {
                self.visit(statement);
                continue;
            }

            self.visit(value);
            let declarable = !(index == last && returns_value) && !is_multi_statement(value);
            match self.vars.get_mut(&variable.id) {
                Some(state) if state.first_use.is_none() && declarable => {
                    state.first_use = Some(FirstUse::Assignment {
                        statement: NodeKey::of(statement),
                    });
                    state.uses += 1;
                    self.used.insert(variable.id);
                }
                _ => self.record_use(variable, None),
            }
        }
        self.block_stack.pop();

        if let Some(unreachable) = unreachable {
            self.unreachable.insert(key, unreachable);
        }
    }

    /// Statements following a jump, up to the next `goto` target
    fn reachability(&self, statements: &[Expr]) -> Option<FixedBitSet> {
        let mut unreachable: Option<FixedBitSet> = None;
        let mut terminated = false;
        for (index, statement) in statements.iter().enumerate() {
            if let Expr::Label(label) = statement {
                if self.goto_targets.contains(&label.target.id) {
                    terminated = false;
                    continue;
                }
            }
            if terminated {
                unreachable
                    .get_or_insert_with(|| FixedBitSet::with_capacity(statements.len()))
                    .insert(index);
                continue;
            }
            terminated = statement.is_jump();
        }
        unreachable
    }

    fn record_use(&mut self, variable: &Variable, out_argument: Option<NodeKey>) {
        if self.used.insert(variable.id) && !self.vars.contains_key(&variable.id) {
            // Free variable: parameters of the tree itself
            self.declare_name(variable);
        }
        let lambda_depth = self.lambda_depth;
        let innermost = self.block_stack.last().copied();
        let Some(state) = self.vars.get_mut(&variable.id) else {
            return;
        };
        state.uses += 1;
        if out_argument.is_some() {
            state.out_uses += 1;
        }
        if state.first_use.is_none() {
            state.first_use = Some(match out_argument {
                Some(argument)
                    if state.lambda_depth == lambda_depth && innermost == Some(state.owner) =>
                {
                    FirstUse::OutArgument { argument }
                }
                _ => FirstUse::Other,
            });
        }
    }

    fn declare_name(&mut self, variable: &Variable) {
        match &variable.name {
            Some(name) => self.names.reserve(name),
            None => self.unnamed_vars.push(variable.clone()),
        }
    }

    fn note_label(&mut self, target: &LabelTarget) {
        if !self.seen_labels.insert(target.id) {
            return;
        }
        match &target.name {
            Some(name) => self.names.reserve(name),
            None => self.unnamed_labels.push(target.id),
        }
    }

    /// Declaration decisions for every block variable
    pub fn declarations(&self) -> FxHashMap<VarId, Declaration> {
        self.vars
            .iter()
            .map(|(id, state)| {
                let declaration = if state.uses == 0 {
                    Declaration::Omit
                } else if state.out_uses == state.uses {
                    Declaration::Discard
                } else {
                    match state.first_use {
                        Some(FirstUse::Assignment { statement }) => Declaration::Inline { statement },
                        Some(FirstUse::OutArgument { argument }) => Declaration::OutVar { argument },
                        _ => Declaration::Header,
                    }
                };
                (*id, declaration)
            })
            .collect()
    }

    /// Generate names for unnamed variables and labels, in first-seen order
    pub fn generate_names(&mut self) -> (FxHashMap<VarId, String>, FxHashMap<LabelId, String>) {
        let mut variables = FxHashMap::default();
        for variable in std::mem::take(&mut self.unnamed_vars) {
            if variables.contains_key(&variable.id) {
                continue;
            }
            let name = self.names.variable(&variable.ty);
            variables.insert(variable.id, name);
        }
        let mut labels = FxHashMap::default();
        for id in std::mem::take(&mut self.unnamed_labels) {
            let name = self.names.label();
            labels.insert(id, name);
        }
        (variables, labels)
    }
}

fn is_multi_statement(value: &Expr) -> bool {
    matches!(value, Expr::Block(block) if block.statements.len() > 1)
}
