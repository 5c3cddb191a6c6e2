//! Translations: one per node, built bottom-up, written top-down.
//!
//! A translation is constructed by its node's translator with every child
//! translation already built, so its exact size is known before anything is
//! written. Layout code is shared between measuring and writing: each
//! translation implements [`Translation::layout`] once against a
//! [`TranslationSink`], runs it against a [`Measure`](crate::writer::Measure)
//! at construction, and caches the result in [`Translation::size`].
//!
//! # Modules
//!
//! - [`literal`]: constants, `default(T)`, closure captures
//! - [`operators`]: unary, binary and checked arithmetic with precedence parentheses
//! - [`assignment`]: simple and compound assignments, inline declarations
//! - [`call`]: method calls, call chains, delegate invocations, indexers
//! - [`parameters`]: argument lists, `params` flattening, `out`/`ref`
//! - [`member`]: variables, property and field access, captured values
//! - [`conditional`]: ternaries, `if`, `if`/`else`, short-circuit `if`
//! - [`block`]: statement sequences, declarations, return placement
//! - [`loops`], [`switch`], [`try_catch`], [`lambda`], [`construction`]
//! - [`cast`]: conversions and type tests
//! - [`jumps`]: `throw`, `return`, `goto`, `break`, `continue`, labels
//! - [`dynamic`]: late-bound operations
//! - [`misc`]: comments, debug markers, opaque extension nodes

pub mod assignment;
pub mod block;
pub mod call;
pub mod cast;
pub mod conditional;
pub mod construction;
pub mod dynamic;
pub mod jumps;
pub mod lambda;
pub mod literal;
pub mod loops;
pub mod member;
pub mod misc;
pub mod operators;
pub mod parameters;
pub mod switch;
pub mod try_catch;

use readex_repr::{precedence, NodeKind};

use crate::context::TranslationContext;
use crate::writer::{TokenKind, TranslationSink, TranslationWriter};

// ============================================================================
// Core types
// ============================================================================

/// Exact size of a translation's output
///
/// `len` and `weight` are counted as if written at indentation depth zero;
/// `lines` is the number of non-empty lines after the first, each of which
/// picks up the indentation of wherever the translation is placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationSize {
    /// Characters of plain output
    pub len: usize,
    /// Indentable line starts after the first line
    pub lines: usize,
    /// Extra characters added by the token formatter
    pub weight: usize,
}

/// Syntactic role a node is translated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Value used inside a larger expression
    Expression,
    /// Statement whose value is discarded
    Statement,
    /// Whole body of the root or of a lambda; a multi-statement body with a
    /// value returns it
    Body,
    /// Statement whose value is returned
    Return,
}

impl Position {
    /// Is the translated value returned?
    pub const fn returns(self) -> bool {
        matches!(self, Self::Return)
    }

    /// Is the translated value used at all?
    pub const fn uses_value(self) -> bool {
        !matches!(self, Self::Statement)
    }
}

/// The rendering of one node
pub trait Translation {
    /// Exact output size
    fn size(&self) -> TranslationSize;

    /// Emit output through `sink`
    fn layout(&self, sink: &mut dyn TranslationSink);

    /// Plain output length
    fn len(&self) -> usize {
        self.size().len
    }

    /// Extra characters of styled output
    fn formatting_weight(&self) -> usize {
        self.size().weight
    }

    /// Does this translation produce no output?
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kind of node translated, when there is one
    fn node_kind(&self) -> Option<NodeKind> {
        None
    }

    /// Precedence of the rendered form, for operand parenthesization
    fn precedence(&self) -> u8 {
        precedence::PRIMARY
    }

    /// Must this be parenthesized whenever it is an operand?
    fn needs_operand_parentheses(&self) -> bool {
        false
    }

    /// Does the output already end a statement (`;` or `}`)?
    fn is_terminated(&self) -> bool {
        false
    }

    /// Does control always leave at the end of this (return, throw, goto)?
    fn has_exit(&self) -> bool {
        false
    }

    /// Does the output span several statements?
    fn is_multi_statement(&self) -> bool {
        false
    }

    /// Has this already written any `return` its position requires?
    fn handles_return(&self) -> bool {
        false
    }

    /// Does a blank line belong before this statement?
    fn blank_line_before(&self) -> bool {
        false
    }

    /// Does a blank line belong after this statement?
    fn blank_line_after(&self) -> bool {
        false
    }

    /// Write into the final output
    fn write(&self, writer: &mut TranslationWriter<'_>) {
        self.layout(writer);
    }
}

impl std::fmt::Debug for dyn Translation + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translation")
            .field("kind", &self.node_kind())
            .field("size", &self.size())
            .finish()
    }
}

/// Boxed translation
pub type BoxedTranslation = Box<dyn Translation>;

// ============================================================================
// Shared building blocks
// ============================================================================

/// Produces nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyTranslation;

impl Translation for EmptyTranslation {
    fn size(&self) -> TranslationSize {
        TranslationSize::default()
    }

    fn layout(&self, _sink: &mut dyn TranslationSink) {}
}

/// A single classified token
#[derive(Debug, Clone)]
pub struct TextTranslation {
    text: String,
    kind: TokenKind,
    size: TranslationSize,
}

impl TextTranslation {
    /// Token `text` of kind `kind`
    pub fn new(text: impl Into<String>, kind: TokenKind, ctx: &TranslationContext<'_>) -> Self {
        let mut translation = Self {
            text: text.into(),
            kind,
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }

    /// Unclassified text
    pub fn plain(text: impl Into<String>, ctx: &TranslationContext<'_>) -> Self {
        Self::new(text, TokenKind::Plain, ctx)
    }

    /// The token text
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Translation for TextTranslation {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_token(&self.text, self.kind);
    }
}

/// `(inner)`
pub struct Parenthesized {
    inner: BoxedTranslation,
    size: TranslationSize,
}

impl Parenthesized {
    /// Wrap `inner` in parentheses
    pub fn new(inner: BoxedTranslation, ctx: &TranslationContext<'_>) -> Self {
        let mut translation = Self {
            inner,
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }

    /// Parenthesize `operand` if it binds looser than `min_precedence`
    pub fn operand(
        operand: BoxedTranslation,
        min_precedence: u8,
        ctx: &TranslationContext<'_>,
    ) -> BoxedTranslation {
        if operand.needs_operand_parentheses() || operand.precedence() < min_precedence {
            Box::new(Self::new(operand, ctx))
        } else {
            operand
        }
    }
}

impl Translation for Parenthesized {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_text("(");
        sink.write_translation(&*self.inner);
        sink.write_text(")");
    }

    fn node_kind(&self) -> Option<NodeKind> {
        self.inner.node_kind()
    }

    fn is_multi_statement(&self) -> bool {
        self.inner.is_multi_statement()
    }
}

/// A statement with its terminating `;`
pub struct Terminated {
    inner: BoxedTranslation,
    size: TranslationSize,
}

impl Terminated {
    /// Terminate `inner` unless it already ends a statement
    pub fn wrap(inner: BoxedTranslation, ctx: &TranslationContext<'_>) -> BoxedTranslation {
        if inner.is_terminated() || inner.is_empty() {
            return inner;
        }
        let mut translation = Self {
            inner,
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        Box::new(translation)
    }
}

impl Translation for Terminated {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_translation(&*self.inner);
        sink.write_text(";");
    }

    fn node_kind(&self) -> Option<NodeKind> {
        self.inner.node_kind()
    }

    fn is_terminated(&self) -> bool {
        true
    }

    fn has_exit(&self) -> bool {
        self.inner.has_exit()
    }

    fn handles_return(&self) -> bool {
        self.inner.handles_return()
    }

    fn blank_line_before(&self) -> bool {
        self.inner.blank_line_before()
    }

    fn blank_line_after(&self) -> bool {
        self.inner.blank_line_after()
    }
}

/// `return inner`
pub struct ReturnStatement {
    inner: BoxedTranslation,
    size: TranslationSize,
}

impl ReturnStatement {
    /// Return the value of `inner`
    pub fn new(inner: BoxedTranslation, ctx: &TranslationContext<'_>) -> Self {
        let mut translation = Self {
            inner,
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }
}

impl Translation for ReturnStatement {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_control("return");
        sink.write_text(" ");
        sink.write_translation(&*self.inner);
    }

    fn node_kind(&self) -> Option<NodeKind> {
        self.inner.node_kind()
    }

    fn has_exit(&self) -> bool {
        true
    }

    fn handles_return(&self) -> bool {
        true
    }
}

/// Child translations written back to back on one logical line
pub struct Sequence {
    parts: Vec<BoxedTranslation>,
    precedence: u8,
    needs_parentheses: bool,
    node_kind: Option<NodeKind>,
    spaced: bool,
    size: TranslationSize,
}

impl Sequence {
    /// Concatenate `parts`
    pub fn new(parts: Vec<BoxedTranslation>, ctx: &TranslationContext<'_>) -> Self {
        let mut translation = Self {
            parts,
            precedence: precedence::PRIMARY,
            needs_parentheses: false,
            node_kind: None,
            spaced: false,
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }

    /// Set the precedence of the combined form
    #[must_use]
    pub fn with_precedence(mut self, precedence: u8) -> Self {
        self.precedence = precedence;
        self
    }

    /// Always parenthesize when used as an operand
    #[must_use]
    pub fn parenthesized_as_operand(mut self) -> Self {
        self.needs_parentheses = true;
        self
    }

    /// Report `kind` as the translated node kind
    #[must_use]
    pub fn of_kind(mut self, kind: NodeKind) -> Self {
        self.node_kind = Some(kind);
        self
    }

    /// Set blank lines around the sequence when written as a statement
    #[must_use]
    pub fn spaced(mut self, spaced: bool) -> Self {
        self.spaced = spaced;
        self
    }

    /// Box the sequence
    pub fn boxed(self) -> BoxedTranslation {
        Box::new(self)
    }
}

impl Translation for Sequence {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        for part in &self.parts {
            sink.write_translation(&**part);
        }
    }

    fn node_kind(&self) -> Option<NodeKind> {
        self.node_kind
    }

    fn precedence(&self) -> u8 {
        self.precedence
    }

    fn needs_operand_parentheses(&self) -> bool {
        self.needs_parentheses
    }

    fn is_multi_statement(&self) -> bool {
        self.parts.iter().any(|part| part.is_multi_statement())
    }

    fn blank_line_before(&self) -> bool {
        self.spaced
    }

    fn blank_line_after(&self) -> bool {
        self.spaced
    }
}

/// Statements hoisted out of an expression, written ahead of the statement
/// that holds it
///
/// ```text
/// Log.Write();
/// Console.WriteLine(x);
/// ```
pub struct PreludedStatement {
    prelude: Vec<BoxedTranslation>,
    statement: BoxedTranslation,
    size: TranslationSize,
}

impl PreludedStatement {
    /// Write `prelude` ahead of `statement`; transparent when there is no
    /// prelude
    pub fn wrap(
        prelude: Vec<BoxedTranslation>,
        statement: BoxedTranslation,
        ctx: &TranslationContext<'_>,
    ) -> BoxedTranslation {
        if prelude.is_empty() {
            return statement;
        }
        let mut translation = Self {
            prelude,
            statement,
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        Box::new(translation)
    }

    fn lines(&self) -> impl Iterator<Item = &BoxedTranslation> {
        self.prelude
            .iter()
            .chain(std::iter::once(&self.statement))
            .filter(|line| !line.is_empty())
    }
}

impl Translation for PreludedStatement {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        let mut previous: Option<&BoxedTranslation> = None;
        for line in self.lines() {
            if let Some(previous) = previous {
                let is_last = std::ptr::eq(line, &self.statement);
                if previous.blank_line_after()
                    || line.blank_line_before()
                    || (is_last && line.handles_return())
                {
                    sink.write_blank_line();
                } else {
                    sink.write_new_line();
                }
            }
            sink.write_translation(&**line);
            previous = Some(line);
        }
    }

    fn node_kind(&self) -> Option<NodeKind> {
        Some(NodeKind::Block)
    }

    fn is_terminated(&self) -> bool {
        self.statement.is_terminated() || self.statement.is_empty()
    }

    fn has_exit(&self) -> bool {
        self.statement.has_exit()
    }

    fn is_multi_statement(&self) -> bool {
        true
    }

    fn handles_return(&self) -> bool {
        self.statement.handles_return()
    }

    fn blank_line_before(&self) -> bool {
        self.lines().next().is_some_and(|first| first.blank_line_before())
    }

    fn blank_line_after(&self) -> bool {
        self.statement.blank_line_after()
    }
}

/// Write `items` separated by `separator`
pub(crate) fn write_separated(
    sink: &mut dyn TranslationSink,
    items: &[BoxedTranslation],
    separator: &str,
) {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            sink.write_text(separator);
        }
        sink.write_translation(&**item);
    }
}

/// Write `body` as a braced statement body on the following lines
pub(crate) fn write_body(sink: &mut dyn TranslationSink, body: &dyn Translation) {
    sink.write_new_line();
    sink.write_braced(body);
}
