//! Shared tree-building helpers for integration tests.

#![allow(dead_code)]

use readex::writer::TranslationWriter;
use readex::{Position, Translation, TranslationContext, TranslationSettings, TranslationSize};
use readex_repr::{Expr, MemberInfo, TypeRef};

/// `System.Console`
pub fn console() -> TypeRef {
    TypeRef::class("System", "Console")
}

/// `Console.WriteLine(..)` with a void result
pub fn write_line(args: Vec<Expr>) -> Expr {
    let method = MemberInfo::static_method(console(), "WriteLine", vec![], TypeRef::VOID);
    Expr::static_call(method, args)
}

/// A static void method on `App.Log`
pub fn log(name: &str) -> Expr {
    let method =
        MemberInfo::static_method(TypeRef::class("App", "Log"), name, vec![], TypeRef::VOID);
    Expr::static_call(method, vec![])
}

/// Translate `root` in body position and write it with `settings`, returning
/// plain text, styled text and the size measured before writing.
pub fn write_measured(
    root: &Expr,
    settings: &TranslationSettings,
) -> (String, Option<String>, TranslationSize) {
    let ctx = TranslationContext::new(root, settings);
    let translation = ctx.translate_in(root, Position::Body);
    let size = translation.size();
    let mut writer = TranslationWriter::new(settings.indent(), settings.formatter(), size.len);
    translation.write(&mut writer);
    let output = writer.into_output();
    (output.plain, output.styled, size)
}
