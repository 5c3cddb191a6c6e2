//! Pre-translation analysis.
//!
//! One read-only walk over the tree before anything is translated. The
//! result answers the questions translators cannot answer locally:
//!
//! - where each block variable is declared (header group, inline at its first
//!   assignment, inline as an `out var` argument, discarded, or omitted)
//! - which labels are targeted by a `goto`
//! - which statements follow a jump and can never run
//! - which calls are links of a call chain
//! - which variables are ever read (catch variables, lambda parameters)
//! - generated names for unnamed variables and labels
//!
//! Facts about specific nodes are keyed by node address. The tree is borrowed
//! for the whole translate call, so addresses are stable identities.
//!
//! The walk never fails: anything it cannot classify falls back to the
//! conservative answer (declare in the header, treat as reachable).

mod naming;
mod walker;

pub use naming::{escape_identifier, is_reserved_word};

use std::borrow::Cow;

use fixedbitset::FixedBitSet;
use readex_repr::{Expr, LabelId, LabelTarget, VarId, Variable};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use walker::{collect_goto_targets, Walker};

/// Identity of a node within the analysed tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey(usize);

impl NodeKey {
    /// Key of `expr`
    pub fn of(expr: &Expr) -> Self {
        Self(expr as *const Expr as usize)
    }
}

/// Where a block variable is declared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
    /// Grouped with same-typed variables at the top of its block
    Header,
    /// `var x = value;` at this assignment statement
    Inline { statement: NodeKey },
    /// `out var x` at this argument
    OutVar { argument: NodeKey },
    /// Only ever written through `out`; rendered `out _`
    Discard,
    /// Never referenced
    Omit,
}

/// Subject of a call: the instance, or the first argument of an extension call
pub(crate) fn call_subject(expr: &Expr) -> Option<&Expr> {
    match expr {
        Expr::Call {
            subject: Some(subject),
            ..
        } => Some(subject),
        Expr::Call {
            subject: None,
            method,
            args,
        } if method.description().is_some_and(|m| m.is_extension()) => args.first(),
        _ => None,
    }
}

/// Facts computed once per translate call
#[derive(Debug, Default)]
pub struct Analysis {
    declarations: FxHashMap<VarId, Declaration>,
    goto_targets: FxHashSet<LabelId>,
    unreachable: FxHashMap<NodeKey, FixedBitSet>,
    chain_links: FxHashSet<NodeKey>,
    used: FxHashSet<VarId>,
    variable_names: FxHashMap<VarId, String>,
    label_names: FxHashMap<LabelId, String>,
}

impl Analysis {
    /// Analyse the tree rooted at `root`
    pub fn analyze(root: &Expr) -> Self {
        let mut goto_targets = FxHashSet::default();
        collect_goto_targets(root, &mut goto_targets);

        let mut walker = Walker::new(&goto_targets);
        walker.visit(root);
        let declarations = walker.declarations();
        let (variable_names, label_names) = walker.generate_names();
        let Walker {
            used,
            chain_links,
            unreachable,
            ..
        } = walker;

        debug!(
            variables = declarations.len(),
            goto_targets = goto_targets.len(),
            chain_links = chain_links.len(),
            blocks_with_dead_code = unreachable.len(),
            generated_names = variable_names.len() + label_names.len(),
            "analysis complete"
        );

        Self {
            declarations,
            goto_targets,
            unreachable,
            chain_links,
            used,
            variable_names,
            label_names,
        }
    }

    /// Declaration decision for a block variable; `Header` for anything unknown
    pub fn declaration(&self, id: VarId) -> Declaration {
        self.declarations
            .get(&id)
            .copied()
            .unwrap_or(Declaration::Header)
    }

    /// Variable inline-declared by this assignment statement, if any
    pub fn declared_by<'e>(&self, statement: &'e Expr) -> Option<&'e Variable> {
        let Expr::Assign { target, .. } = statement else {
            return None;
        };
        let variable = target.as_variable()?;
        match self.declaration(variable.id) {
            Declaration::Inline { statement: key } if key == NodeKey::of(statement) => {
                Some(variable)
            }
            _ => None,
        }
    }

    /// Is this label the target of a `goto`?
    pub fn is_goto_target(&self, label: LabelId) -> bool {
        self.goto_targets.contains(&label)
    }

    /// Can the statement at `index` of `block` run?
    pub fn is_reachable(&self, block: &Expr, index: usize) -> bool {
        self.unreachable
            .get(&NodeKey::of(block))
            .map_or(true, |dead| !dead.contains(index))
    }

    /// Is this call the subject of another call?
    pub fn is_chain_link(&self, call: &Expr) -> bool {
        self.chain_links.contains(&NodeKey::of(call))
    }

    /// Is this variable ever referenced?
    pub fn is_used(&self, id: VarId) -> bool {
        self.used.contains(&id)
    }

    /// Display name of a variable
    pub fn variable_name<'v>(&'v self, variable: &'v Variable) -> Cow<'v, str> {
        match &variable.name {
            Some(name) => escape_identifier(name),
            None => Cow::Borrowed(
                self.variable_names
                    .get(&variable.id)
                    .map_or("value", String::as_str),
            ),
        }
    }

    /// Display name of a label
    pub fn label_name<'l>(&'l self, label: &'l LabelTarget) -> Cow<'l, str> {
        match &label.name {
            Some(name) => escape_identifier(name),
            None => Cow::Borrowed(
                self.label_names
                    .get(&label.id)
                    .map_or("label", String::as_str),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readex_repr::{
        Block, ExprBuilder, MemberInfo, ParamInfo, ParamModifier, TypeRef,
    };

    fn block_of(expr: &Expr) -> &Block {
        match expr {
            Expr::Block(block) => block,
            other => panic!("expected block, got {other:?}"),
        }
    }

    #[test]
    fn test_first_assignment_declares_inline() {
        let mut b = ExprBuilder::new();
        let x = b.variable("x", TypeRef::INT);
        let root = Expr::block(
            vec![x.clone()],
            vec![Expr::assign(Expr::var(&x), Expr::int(1)), Expr::var(&x)],
        );
        let analysis = Analysis::analyze(&root);
        let first = &block_of(&root).statements[0];
        assert_eq!(
            analysis.declaration(x.id),
            Declaration::Inline {
                statement: NodeKey::of(first)
            }
        );
        assert_eq!(analysis.declared_by(first), Some(&x));
    }

    #[test]
    fn test_read_before_write_goes_to_header() {
        let mut b = ExprBuilder::new();
        let x = b.variable("x", TypeRef::INT);
        let y = b.variable("y", TypeRef::INT);
        let root = Expr::block(
            vec![x.clone(), y.clone()],
            vec![
                Expr::assign(Expr::var(&y), Expr::var(&x)),
                Expr::assign(Expr::var(&x), Expr::int(2)),
                Expr::var(&y),
            ],
        );
        let analysis = Analysis::analyze(&root);
        assert_eq!(analysis.declaration(x.id), Declaration::Header);
        assert!(matches!(
            analysis.declaration(y.id),
            Declaration::Inline { .. }
        ));
    }

    #[test]
    fn test_unused_variable_omitted() {
        let mut b = ExprBuilder::new();
        let x = b.variable("x", TypeRef::INT);
        let root = Expr::block(vec![x.clone()], vec![Expr::comment("nothing")]);
        assert_eq!(Analysis::analyze(&root).declaration(x.id), Declaration::Omit);
    }

    #[test]
    fn test_out_arguments() {
        let mut b = ExprBuilder::new();
        let parsed = b.variable("parsed", TypeRef::INT);
        let ignored = b.variable("ignored", TypeRef::INT);
        let try_parse = MemberInfo::static_method(
            TypeRef::INT,
            "TryParse",
            vec![
                ParamInfo::new("s", TypeRef::STRING),
                ParamInfo::new("result", TypeRef::INT).with_modifier(ParamModifier::Out),
            ],
            TypeRef::BOOL,
        );
        let root = Expr::block(
            vec![parsed.clone(), ignored.clone()],
            vec![
                Expr::static_call(try_parse.clone(), vec![Expr::string("1"), Expr::var(&parsed)]),
                Expr::static_call(try_parse, vec![Expr::string("2"), Expr::var(&ignored)]),
                Expr::var(&parsed),
            ],
        );
        let analysis = Analysis::analyze(&root);
        assert!(matches!(
            analysis.declaration(parsed.id),
            Declaration::OutVar { .. }
        ));
        assert_eq!(analysis.declaration(ignored.id), Declaration::Discard);
    }

    #[test]
    fn test_statements_after_jump_unreachable() {
        let mut b = ExprBuilder::new();
        let ret = b.label("ret", TypeRef::VOID);
        let skip = b.label("skip", TypeRef::VOID);
        let root = Expr::block(
            vec![],
            vec![
                Expr::throw(Expr::string("boom")),
                Expr::comment("dead"),
                Expr::label(&skip, None),
                Expr::comment("alive"),
                Expr::ret(&ret, None),
                Expr::comment("dead again"),
                Expr::goto(&skip),
            ],
        );
        let analysis = Analysis::analyze(&root);
        // `skip` is only targeted from unreachable code, yet still counts
        assert!(analysis.is_goto_target(skip.id));
        assert!(!analysis.is_reachable(&root, 1));
        assert!(analysis.is_reachable(&root, 2));
        assert!(analysis.is_reachable(&root, 3));
        assert!(!analysis.is_reachable(&root, 5));
        assert!(!analysis.is_reachable(&root, 6));
    }

    #[test]
    fn test_chain_links() {
        let list = TypeRef::class("App", "Query");
        let where_ = MemberInfo::method(list.clone(), "Where", vec![], list.clone());
        let select = MemberInfo::method(list.clone(), "Select", vec![], list.clone());
        let mut b = ExprBuilder::new();
        let q = b.variable("q", list);
        let root = Expr::call(Expr::call(Expr::var(&q), where_, vec![]), select, vec![]);
        let analysis = Analysis::analyze(&root);
        let Expr::Call {
            subject: Some(inner),
            ..
        } = &root
        else {
            panic!("expected call");
        };
        assert!(analysis.is_chain_link(inner));
        assert!(!analysis.is_chain_link(&root));
    }

    #[test]
    fn test_generated_names() {
        let mut b = ExprBuilder::new();
        let named = b.variable("int1", TypeRef::INT);
        let unnamed = b.unnamed(TypeRef::INT);
        let root = Expr::block(
            vec![named.clone(), unnamed.clone()],
            vec![
                Expr::assign(Expr::var(&unnamed), Expr::var(&named)),
                Expr::var(&unnamed),
            ],
        );
        let analysis = Analysis::analyze(&root);
        assert_eq!(analysis.variable_name(&unnamed), "int2");
        assert_eq!(analysis.variable_name(&named), "int1");
        assert!(analysis.is_used(named.id));
    }
}
