//! Translation context and node dispatch.
//!
//! The context is built once per translate call. It owns the analysis result,
//! borrows the settings, and is handed by reference to every translator so
//! they can request translations of their children.

use std::borrow::Cow;
use std::cell::RefCell;
use std::sync::Arc;

use readex_repr::{Expr, LabelTarget, TypeKind, TypeRef, Variable};
use tracing::trace;

use crate::analysis::Analysis;
use crate::settings::TranslationSettings;
use crate::translation::{
    assignment, block, call, cast, conditional, construction, dynamic, jumps, lambda, literal,
    loops, member, misc, operators, switch, try_catch, BoxedTranslation, Position,
    PreludedStatement, ReturnStatement, Terminated, TextTranslation, Translation,
    TranslationSize,
};
use crate::type_names;
use crate::writer::{Measure, TokenFormatter, TokenKind};

/// Settings plus analysis facts, threaded through every translator
pub struct TranslationContext<'a> {
    settings: &'a TranslationSettings,
    analysis: Analysis,
    indent_len: usize,
    /// One frame per statement under construction, innermost last
    hoisted: RefCell<Vec<Vec<BoxedTranslation>>>,
}

impl<'a> TranslationContext<'a> {
    /// Analyse `root` and prepare to translate it
    pub fn new(root: &Expr, settings: &'a TranslationSettings) -> Self {
        Self {
            settings,
            analysis: Analysis::analyze(root),
            indent_len: settings.indent().chars().count(),
            hoisted: RefCell::new(Vec::new()),
        }
    }

    /// Active settings
    pub fn settings(&self) -> &TranslationSettings {
        self.settings
    }

    /// Analysis facts for the tree being translated
    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Translate `node` as a value inside an expression
    pub fn translate(&self, node: &Expr) -> BoxedTranslation {
        self.translate_in(node, Position::Expression)
    }

    /// Translate `node` in `position`, adding `return` when the position
    /// needs one the translation did not write itself
    ///
    /// Outside expression position the result is a statement, and any
    /// statements hoisted out of its expressions are written ahead of it.
    pub fn translate_in(&self, node: &Expr, position: Position) -> BoxedTranslation {
        if position == Position::Expression {
            return self.dispatch(node, position);
        }
        let (translation, prelude) = self.collect_hoisted(|| {
            let translation = self.dispatch(node, position);
            if position.returns() && needs_return(node, &*translation) {
                return Box::new(ReturnStatement::new(translation, self)) as BoxedTranslation;
            }
            translation
        });
        if prelude.is_empty() || position != Position::Body {
            return PreludedStatement::wrap(prelude, translation, self);
        }

        // A body with leading statements returns its value like a block
        let statement: BoxedTranslation = if needs_return(node, &*translation) {
            Box::new(ReturnStatement::new(translation, self))
        } else {
            translation
        };
        PreludedStatement::wrap(prelude, Terminated::wrap(statement, self), self)
    }

    /// Translate `node` as a complete, terminated statement
    pub fn translate_statement(&self, node: &Expr) -> BoxedTranslation {
        Terminated::wrap(self.translate_in(node, Position::Statement), self)
    }

    /// Translate the body of a braced construct; `returns` makes its final
    /// value the construct's result
    pub fn translate_body(&self, node: &Expr, returns: bool) -> BoxedTranslation {
        let position = if returns {
            Position::Return
        } else {
            Position::Statement
        };
        Terminated::wrap(self.translate_in(node, position), self)
    }

    /// Translate with `f`, writing any statements hoisted meanwhile ahead of
    /// the result
    pub fn with_prelude(&self, f: impl FnOnce() -> BoxedTranslation) -> BoxedTranslation {
        let (translation, prelude) = self.collect_hoisted(f);
        PreludedStatement::wrap(prelude, translation, self)
    }

    /// Run `f` in a fresh hoisting frame, returning its result and the
    /// statements hoisted out of expressions it translated
    pub fn collect_hoisted<T>(&self, f: impl FnOnce() -> T) -> (T, Vec<BoxedTranslation>) {
        self.hoisted.borrow_mut().push(Vec::new());
        let result = f();
        let prelude = self.hoisted.borrow_mut().pop().unwrap_or_default();
        (result, prelude)
    }

    /// Move `statements` ahead of the statement being translated
    ///
    /// Hands them back when no statement is under construction.
    pub fn hoist(&self, statements: Vec<BoxedTranslation>) -> Result<(), Vec<BoxedTranslation>> {
        match self.hoisted.borrow_mut().last_mut() {
            Some(frame) => {
                frame.extend(statements);
                Ok(())
            }
            None => Err(statements),
        }
    }

    /// Is `node` claimed by a custom translator?
    pub fn has_custom_translator(&self, node: &Expr) -> bool {
        self.settings
            .custom_translators
            .iter()
            .any(|custom| (custom.predicate)(node))
    }

    fn dispatch(&self, node: &Expr, position: Position) -> BoxedTranslation {
        if let Some(custom) = self
            .settings
            .custom_translators
            .iter()
            .find(|custom| (custom.predicate)(node))
        {
            trace!(kind = ?node.kind(), "custom translator");
            return (custom.factory)(node, self);
        }

        match node {
            Expr::Constant(constant) => literal::translate_constant(constant, self),
            Expr::Variable(variable) => Box::new(member::VariableTranslation::new(variable, self)),
            Expr::Default(ty) => literal::translate_default(ty, self),
            Expr::Unary { op, operand, .. } => operators::translate_unary(*op, operand, self),
            Expr::Binary {
                op, left, right, ..
            } => operators::translate_binary(*op, left, right, self),
            Expr::Assign { op, target, value } => {
                assignment::translate_assignment(node, *op, target, value, self)
            }
            Expr::Cast { kind, operand, ty } => cast::translate_cast(*kind, operand, ty, self),
            Expr::TypeTest { kind, operand, ty } => {
                cast::translate_type_test(*kind, operand, ty, self)
            }
            Expr::Call { .. } => call::translate_call(node, self),
            Expr::Invoke { target, args, .. } => call::translate_invoke(target, args, self),
            Expr::Member { subject, member } => {
                member::translate_member_access(subject.as_deref(), member, self)
            }
            Expr::Index { subject, args, .. } => call::translate_index(subject, args, self),
            Expr::New(new) => construction::translate_new(new, self),
            Expr::NewArray(array) => construction::translate_new_array(array, self),
            Expr::Lambda(l) => Box::new(lambda::LambdaTranslation::new(l, self)),
            Expr::Quote(inner) => self.dispatch(inner, position),
            Expr::Conditional(c) => conditional::translate_conditional(c, position, self),
            Expr::Block(b) => block::translate_block(node, b, position, self),
            Expr::Loop(l) => Box::new(loops::LoopTranslation::new(l, self)),
            Expr::Switch(s) => Box::new(switch::SwitchTranslation::new(s, position, self)),
            Expr::Try(t) => Box::new(try_catch::TryTranslation::new(t, position, self)),
            Expr::Throw { value, .. } => jumps::translate_throw(value.as_deref(), self),
            Expr::Goto(goto) => jumps::translate_goto(goto, position, self),
            Expr::Label(label) => jumps::translate_label(label, position, self),
            Expr::Dynamic(d) => dynamic::translate_dynamic(d, self),
            Expr::Comment(text) => Box::new(misc::CommentTranslation::new(text, self)),
            Expr::DebugInfo(info) => Box::new(misc::DebugInfoTranslation::new(info, self)),
            Expr::Extension(ext) => Box::new(misc::ExtensionTranslation::new(ext, self)),
        }
    }

    // ========================================================================
    // Shared helpers
    // ========================================================================

    /// Measure a translation's layout
    pub fn measure(&self, translation: &dyn Translation) -> TranslationSize {
        let mut measure = Measure::new(self.indent_len, self.formatter());
        translation.layout(&mut measure);
        measure.finish()
    }

    /// Classified token
    pub fn text(&self, text: impl Into<String>, kind: TokenKind) -> TextTranslation {
        TextTranslation::new(text, kind, self)
    }

    /// Classified token, boxed
    pub fn token(&self, text: impl Into<String>, kind: TokenKind) -> BoxedTranslation {
        Box::new(self.text(text, kind))
    }

    /// Keyword token, boxed
    pub fn keyword(&self, text: impl Into<String>) -> BoxedTranslation {
        self.token(text, TokenKind::Keyword)
    }

    /// Unclassified token, boxed
    pub fn plain(&self, text: impl Into<String>) -> BoxedTranslation {
        Box::new(TextTranslation::plain(text, self))
    }

    /// Display name of a type
    pub fn type_name(&self, ty: &TypeRef) -> Arc<str> {
        let namer = self
            .settings
            .anonymous_type_namer
            .as_deref()
            .map(|namer| namer as type_names::AnonymousNamer<'_>);
        type_names::type_name_with(ty, self.settings.uses_full_type_names(), namer)
    }

    /// Type name as a classified token
    pub fn type_translation(&self, ty: &TypeRef) -> BoxedTranslation {
        let kind = match ty {
            TypeRef::Prim(_) => TokenKind::Keyword,
            TypeRef::Named(named) if named.kind == TypeKind::Interface => TokenKind::InterfaceName,
            _ => TokenKind::TypeName,
        };
        Box::new(self.text(&*self.type_name(ty), kind))
    }

    /// Display name of a variable
    pub fn variable_name<'v>(&'v self, variable: &'v Variable) -> Cow<'v, str> {
        self.analysis.variable_name(variable)
    }

    /// Display name of a label
    pub fn label_name<'l>(&'l self, label: &'l LabelTarget) -> Cow<'l, str> {
        self.analysis.label_name(label)
    }

    /// Line length above which lists and ternaries wrap
    pub fn line_wrap_threshold(&self) -> usize {
        self.settings.line_wrap_threshold()
    }

    /// Characters in one indentation unit
    pub fn indent_len(&self) -> usize {
        self.indent_len
    }

    /// Configured token formatter
    pub fn formatter(&self) -> Option<&dyn TokenFormatter> {
        self.settings.formatter()
    }
}

/// Does `translation` of `node` still need a `return` to hand back its value?
fn needs_return(node: &Expr, translation: &dyn Translation) -> bool {
    !translation.handles_return()
        && !translation.has_exit()
        && !translation.is_empty()
        && !node.is_void()
}
