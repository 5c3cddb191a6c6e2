//! Constant literals.
//!
//! Every literal is a short run of classified tokens: `42L`, `"text"`,
//! `int.MaxValue`, `BindingFlags.Static | BindingFlags.Public`,
//! `new DateTime(2024, 1, 2)`, `TimeSpan.FromHours(3)`, `typeof(List<int>)`.

use std::fmt::Write as _;

use readex_repr::{
    precedence, Constant, ConstantValue, DateTimeValue, EnumInfo, FloatBits, FloatPrec, NodeKind,
    PrimKind, TypeRef, TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MILLISECOND, TICKS_PER_MINUTE,
    TICKS_PER_SECOND,
};

use super::{BoxedTranslation, EmptyTranslation, Translation, TranslationSize};
use crate::context::TranslationContext;
use crate::writer::{TokenKind, TranslationSink};

/// A literal as a run of tokens
#[derive(Debug, Clone)]
pub struct LiteralTranslation {
    tokens: Vec<(String, TokenKind)>,
    precedence: u8,
    is_cast: bool,
    size: TranslationSize,
}

impl LiteralTranslation {
    fn finish(tokens: Tokens, ctx: &TranslationContext<'_>) -> Self {
        let mut translation = Self {
            tokens: tokens.items,
            precedence: tokens.precedence,
            is_cast: tokens.is_cast,
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }

    /// Literal text as written
    pub fn text(&self) -> String {
        self.tokens.iter().map(|(text, _)| text.as_str()).collect()
    }
}

impl Translation for LiteralTranslation {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        for (text, kind) in &self.tokens {
            if text.contains('\n') {
                sink.write_verbatim(text, *kind);
            } else {
                sink.write_token(text, *kind);
            }
        }
    }

    fn node_kind(&self) -> Option<NodeKind> {
        Some(NodeKind::Constant)
    }

    fn precedence(&self) -> u8 {
        self.precedence
    }

    fn needs_operand_parentheses(&self) -> bool {
        self.is_cast
    }
}

/// Token accumulator
struct Tokens {
    items: Vec<(String, TokenKind)>,
    precedence: u8,
    is_cast: bool,
}

impl Tokens {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            precedence: precedence::PRIMARY,
            is_cast: false,
        }
    }

    fn push(&mut self, text: impl Into<String>, kind: TokenKind) -> &mut Self {
        self.items.push((text.into(), kind));
        self
    }

    fn plain(&mut self, text: &str) -> &mut Self {
        self.push(text, TokenKind::Plain)
    }

    fn number(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        if text.starts_with('-') {
            self.precedence = self.precedence.min(precedence::UNARY);
        }
        self.push(text, TokenKind::NumericLiteral)
    }

    /// `Type.Member`
    fn static_member(&mut self, type_name: &str, type_kind: TokenKind, member: &str) -> &mut Self {
        self.push(type_name, type_kind)
            .plain(".")
            .push(member, TokenKind::Variable)
    }

    /// `Type.Method(args)`
    fn factory(&mut self, type_name: &str, method: &str, args: &[String]) -> &mut Self {
        self.push(type_name, TokenKind::TypeName)
            .plain(".")
            .push(method, TokenKind::MethodName)
            .plain("(");
        self.numbers(args).plain(")")
    }

    /// `new Type(args)`
    fn constructor(&mut self, type_name: &str, args: &[String]) -> &mut Self {
        self.push("new", TokenKind::Keyword)
            .plain(" ")
            .push(type_name, TokenKind::TypeName)
            .plain("(");
        self.numbers(args).plain(")")
    }

    fn numbers(&mut self, args: &[String]) -> &mut Self {
        for (index, arg) in args.iter().enumerate() {
            if index > 0 {
                self.plain(", ");
            }
            self.push(arg.as_str(), TokenKind::NumericLiteral);
        }
        self
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Translate a constant
pub fn translate_constant(constant: &Constant, ctx: &TranslationContext<'_>) -> BoxedTranslation {
    let mut tokens = Tokens::new();
    let ty = &constant.ty;
    match &constant.value {
        ConstantValue::Null => {
            tokens.push("null", TokenKind::Keyword);
        }
        ConstantValue::Bool(value) => {
            tokens.push(if *value { "true" } else { "false" }, TokenKind::Keyword);
        }
        ConstantValue::Char(c) => {
            tokens.push(char_literal(*c), TokenKind::StringLiteral);
        }
        ConstantValue::String(s) => {
            tokens.push(string_literal(s), TokenKind::StringLiteral);
        }
        ConstantValue::Int(value) => match ty.enum_info() {
            Some(info) => enum_tokens(&mut tokens, ty, info, *value as i64, ctx),
            None => integral_tokens(&mut tokens, *value, ty),
        },
        ConstantValue::Enum(value) => match ty.enum_info() {
            Some(info) => enum_tokens(&mut tokens, ty, info, *value, ctx),
            None => {
                tokens.number(value.to_string());
            }
        },
        ConstantValue::Float(bits, prec) => float_tokens(&mut tokens, *bits, *prec),
        ConstantValue::Decimal(text) => {
            tokens.number(format!("{}m", trim_decimal(text)));
        }
        ConstantValue::DateTime(value) => date_time_tokens(&mut tokens, value, ctx),
        ConstantValue::TimeSpan(ticks) => time_span_tokens(&mut tokens, *ticks, ctx),
        ConstantValue::Type(of) => {
            tokens
                .push("typeof", TokenKind::Keyword)
                .plain("(")
                .push(&*ctx.type_name(of), type_token_kind(of))
                .plain(")");
        }
        ConstantValue::Closure(_) => {
            tokens.push(&*ctx.type_name(ty), TokenKind::TypeName);
        }
        ConstantValue::Object(text) => {
            tokens.plain(text);
        }
    }
    Box::new(LiteralTranslation::finish(tokens, ctx))
}

/// Translate `default(T)`; `default(void)` produces nothing and reference
/// types render as `null`
pub fn translate_default(ty: &TypeRef, ctx: &TranslationContext<'_>) -> BoxedTranslation {
    if ty.is_void() {
        return Box::new(EmptyTranslation);
    }
    let mut tokens = Tokens::new();
    if ty.admits_null() {
        tokens.push("null", TokenKind::Keyword);
    } else {
        tokens
            .push("default", TokenKind::Keyword)
            .plain("(")
            .push(&*ctx.type_name(ty), type_token_kind(ty))
            .plain(")");
    }
    Box::new(LiteralTranslation::finish(tokens, ctx))
}

fn type_token_kind(ty: &TypeRef) -> TokenKind {
    match ty {
        TypeRef::Prim(_) => TokenKind::Keyword,
        _ => TokenKind::TypeName,
    }
}

// ============================================================================
// Text literals
// ============================================================================

fn push_escaped(out: &mut String, c: char, quote: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\0' => out.push_str("\\0"),
        '\u{7}' => out.push_str("\\a"),
        '\u{8}' => out.push_str("\\b"),
        '\u{c}' => out.push_str("\\f"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\u{b}' => out.push_str("\\v"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c if c.is_control() => {
            let _ = write!(out, "\\u{:04X}", c as u32);
        }
        c => out.push(c),
    }
}

/// `'c'` with escapes
pub fn char_literal(c: char) -> String {
    let mut out = String::from("'");
    push_escaped(&mut out, c, '\'');
    out.push('\'');
    out
}

/// `"text"` with escapes, or `@"text"` when the text spans lines and holds
/// no quotes
pub fn string_literal(s: &str) -> String {
    if s.contains('\n') && !s.contains('"') {
        return format!("@\"{s}\"");
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        push_escaped(&mut out, c, '"');
    }
    out.push('"');
    out
}

// ============================================================================
// Numbers
// ============================================================================

fn integral_tokens(tokens: &mut Tokens, value: i128, ty: &TypeRef) {
    let kind = ty.non_nullable().as_prim().unwrap_or(PrimKind::Int32);
    if let Some(member) = limit_member(kind, value) {
        tokens.static_member(kind.keyword(), TokenKind::Keyword, member);
        return;
    }
    let suffix = if kind.is_numeric() { kind.literal_suffix() } else { "" };
    tokens.number(format!("{value}{suffix}"));
}

/// `MinValue` / `MaxValue` for the wide integral types
fn limit_member(kind: PrimKind, value: i128) -> Option<&'static str> {
    if !matches!(
        kind,
        PrimKind::Int16 | PrimKind::Int32 | PrimKind::Int64 | PrimKind::UInt32 | PrimKind::UInt64
    ) {
        return None;
    }
    let (min, max) = kind.integral_range()?;
    if value == max {
        Some("MaxValue")
    } else if value == min && min != 0 {
        Some("MinValue")
    } else {
        None
    }
}

fn float_tokens(tokens: &mut Tokens, bits: FloatBits, prec: FloatPrec) {
    let (keyword, suffix) = match prec {
        FloatPrec::Single => ("float", "f"),
        FloatPrec::Double => ("double", "d"),
    };
    let (value, is_max, is_min) = match prec {
        FloatPrec::Single => {
            let v = bits.to_f32();
            (f64::from(v), v == f32::MAX, v == f32::MIN)
        }
        FloatPrec::Double => {
            let v = bits.to_f64();
            (v, v == f64::MAX, v == f64::MIN)
        }
    };
    let special = if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("PositiveInfinity")
    } else if value == f64::NEG_INFINITY {
        Some("NegativeInfinity")
    } else if is_max {
        Some("MaxValue")
    } else if is_min {
        Some("MinValue")
    } else {
        None
    };
    if let Some(member) = special {
        tokens.static_member(keyword, TokenKind::Keyword, member);
        return;
    }
    let digits = match prec {
        FloatPrec::Single => format_float(bits.to_f32()),
        FloatPrec::Double => format_float(value),
    };
    tokens.number(format!("{digits}{suffix}"));
}

/// Shortest round-trip digits at the value's own precision, switching to
/// exponent form for extreme magnitudes
fn format_float<F>(value: F) -> String
where
    F: Copy + Into<f64> + std::fmt::Display + std::fmt::LowerExp,
{
    let widened: f64 = value.into();
    let magnitude = widened.abs();
    if magnitude != 0.0 && !(1e-5..1e15).contains(&magnitude) {
        return format!("{value:e}");
    }
    value.to_string()
}

/// Drop trailing fractional zeros: `1.50` becomes `1.5`, `2.0` becomes `2`
fn trim_decimal(text: &str) -> &str {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.')
}

// ============================================================================
// Enums
// ============================================================================

fn enum_tokens(
    tokens: &mut Tokens,
    ty: &TypeRef,
    info: &EnumInfo,
    value: i64,
    ctx: &TranslationContext<'_>,
) {
    let type_name = ctx.type_name(ty.non_nullable());
    let members = if info.is_flags {
        decompose_flags(info, value)
    } else {
        info.member_for(value).map(|m| vec![m.name.as_str()])
    };
    match members {
        Some(names) if !names.is_empty() => {
            if names.len() > 1 {
                tokens.precedence = precedence::BIT_OR;
            }
            for (index, name) in names.iter().enumerate() {
                if index > 0 {
                    tokens.plain(" | ");
                }
                tokens.static_member(&type_name, TokenKind::TypeName, name);
            }
        }
        _ => {
            tokens.is_cast = true;
            tokens.precedence = precedence::UNARY;
            tokens
                .plain("(")
                .push(&*type_name, TokenKind::TypeName)
                .plain(")");
            if value < 0 {
                tokens.plain("(").number(value.to_string()).plain(")");
            } else {
                tokens.number(value.to_string());
            }
        }
    }
}

/// Names of the members combining into `value`, in declaration order
///
/// Members are tried in reverse declaration order; each one whose bits all
/// lie within `value` and adds at least one new bit is taken, until the taken
/// bits equal `value`. The zero member only matches a zero value.
pub fn decompose_flags(info: &EnumInfo, value: i64) -> Option<Vec<&str>> {
    if value == 0 {
        return info.member_for(0).map(|m| vec![m.name.as_str()]);
    }
    let mut taken = Vec::new();
    let mut total = 0i64;
    for (index, member) in info.members.iter().enumerate().rev() {
        if member.value == 0 {
            continue;
        }
        let within = member.value & !value == 0;
        let adds_bits = member.value & !total != 0;
        if within && adds_bits {
            taken.push(index);
            total |= member.value;
            if total == value {
                break;
            }
        }
    }
    if total != value {
        return None;
    }
    taken.sort_unstable();
    Some(
        taken
            .into_iter()
            .map(|index| info.members[index].name.as_str())
            .collect(),
    )
}

// ============================================================================
// Dates and durations
// ============================================================================

fn date_time_tokens(tokens: &mut Tokens, value: &DateTimeValue, ctx: &TranslationContext<'_>) {
    let mut args = vec![
        value.year.to_string(),
        value.month.to_string(),
        value.day.to_string(),
    ];
    let has_time = value.hour != 0 || value.minute != 0 || value.second != 0;
    if has_time || value.millisecond != 0 {
        args.extend([
            value.hour.to_string(),
            value.minute.to_string(),
            value.second.to_string(),
        ]);
    }
    if value.millisecond != 0 {
        args.push(value.millisecond.to_string());
    }
    tokens.constructor(&ctx.type_name(&TypeRef::date_time()), &args);
}

fn time_span_tokens(tokens: &mut Tokens, ticks: i64, ctx: &TranslationContext<'_>) {
    let type_name = ctx.type_name(&TypeRef::time_span());
    let special = match ticks {
        0 => Some("Zero"),
        i64::MIN => Some("MinValue"),
        i64::MAX => Some("MaxValue"),
        _ => None,
    };
    if let Some(member) = special {
        tokens.static_member(&type_name, TokenKind::TypeName, member);
        return;
    }

    for (unit, method) in [
        (TICKS_PER_DAY, "FromDays"),
        (TICKS_PER_HOUR, "FromHours"),
        (TICKS_PER_MINUTE, "FromMinutes"),
        (TICKS_PER_SECOND, "FromSeconds"),
    ] {
        if ticks % unit == 0 {
            tokens.factory(&type_name, method, &[(ticks / unit).to_string()]);
            return;
        }
    }
    if ticks % TICKS_PER_MILLISECOND == 0 {
        if ticks.abs() < TICKS_PER_MINUTE {
            let millis = ticks / TICKS_PER_MILLISECOND;
            tokens.factory(&type_name, "FromMilliseconds", &[millis.to_string()]);
            return;
        }
        let sign = ticks.signum();
        let mut rest = ticks.abs();
        let mut parts = Vec::with_capacity(5);
        for unit in [TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MINUTE, TICKS_PER_SECOND] {
            parts.push(rest / unit);
            rest %= unit;
        }
        parts.push(rest / TICKS_PER_MILLISECOND);
        let args: Vec<String> = parts.iter().map(|part| (part * sign).to_string()).collect();
        tokens.constructor(&type_name, &args);
        return;
    }
    tokens.factory(&type_name, "FromTicks", &[ticks.to_string()]);
}
