// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! printf-style templates for rule descriptions.
//!
//! Engines that register many rules describe them with a template such as
//! `"%s.%s(%d)"` plus captured arguments, and only pay for the string when
//! a description is actually rendered (see [`LeafDescriptor::deferred`]).
//!
//! # Placeholder grammar
//!
//! `%[index$][flags][width][.precision]conversion`
//!
//! | conversion | output |
//! |---|---|
//! | `s`, `S` | display form (upper-cased for `S`); precision truncates |
//! | `d` | decimal integer |
//! | `x`, `X`, `o` | hex (lower/upper), octal |
//! | `f` | fixed-point float, default precision 6 |
//! | `c` | character |
//! | `b`, `B` | `true`/`false` (non-bool arguments render `true`) |
//! | `n` | newline |
//! | `%` | literal `%` |
//!
//! Flags are `-` (left-justify) and `0` (zero-pad numerics). A placeholder
//! without an index consumes the next sequential argument; `n$` picks the
//! 1-based argument `n` and leaves the sequence untouched.
//!
//! # Malformed templates
//!
//! Formatting never fails. An unknown conversion, a missing argument, a
//! width or precision above [`MAX_FIELD`] or a trailing `%` is copied to
//! the output verbatim, surplus arguments are ignored, and a conversion
//! that does not fit its argument (`%d` with a string) falls back to the
//! argument's display form.
//!
//! # Negative integers in hex and octal
//!
//! `%x`, `%X` and `%o` print a negative integer as its two's complement at
//! the width it was captured with: `-1i32` renders `ffffffff`, `-1i8`
//! renders `ff`.
//!
//! [`LeafDescriptor::deferred`]: crate::LeafDescriptor::deferred

use std::fmt;
use std::sync::Arc;

use crate::RuleDescriptor;

/// An argument captured for a deferred template.
#[derive(Clone)]
pub enum TemplateArg {
    /// Shared string.
    Str(Arc<str>),
    /// Signed integer and the bit width it was captured from.
    Int {
        /// The value.
        value: i64,
        /// Source width in bits (8, 16, 32 or 64), used by `%x` and `%o`.
        bits: u32,
    },
    /// Unsigned integer.
    UInt(u64),
    /// Floating-point value.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Single character.
    Char(char),
    /// Any other displayable value, formatted only when the template is.
    Display(Arc<dyn fmt::Display + Send + Sync>),
}

impl TemplateArg {
    /// Capture an arbitrary displayable value.
    pub fn display<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        Self::Display(Arc::new(value))
    }
}

impl fmt::Display for TemplateArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int { value, .. } => write!(f, "{value}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Display(v) => write!(f, "{v}"),
        }
    }
}

impl fmt::Debug for TemplateArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Int { value, bits } => f
                .debug_struct("Int")
                .field("value", value)
                .field("bits", bits)
                .finish(),
            Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Char(v) => f.debug_tuple("Char").field(v).finish(),
            Self::Display(v) => f.debug_tuple("Display").field(&v.to_string()).finish(),
        }
    }
}

impl From<&str> for TemplateArg {
    fn from(value: &str) -> Self {
        Self::Str(Arc::from(value))
    }
}

impl From<String> for TemplateArg {
    fn from(value: String) -> Self {
        Self::Str(Arc::from(value))
    }
}

impl From<&String> for TemplateArg {
    fn from(value: &String) -> Self {
        Self::Str(Arc::from(value.as_str()))
    }
}

impl From<Arc<str>> for TemplateArg {
    fn from(value: Arc<str>) -> Self {
        Self::Str(value)
    }
}

macro_rules! template_arg_from {
    ($variant:ident, $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for TemplateArg {
                fn from(value: $source) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

macro_rules! template_arg_from_signed {
    ($($source:ty),+) => {
        $(
            impl From<$source> for TemplateArg {
                fn from(value: $source) -> Self {
                    Self::Int {
                        value: i64::from(value),
                        bits: <$source>::BITS,
                    }
                }
            }
        )+
    };
}

template_arg_from_signed!(i8, i16, i32, i64);
template_arg_from!(UInt, u64: u8, u16, u32, u64);
template_arg_from!(Float, f64: f32, f64);

impl From<isize> for TemplateArg {
    fn from(value: isize) -> Self {
        i64::try_from(value).map_or_else(
            |_| Self::display(value),
            |value| Self::Int {
                value,
                bits: isize::BITS,
            },
        )
    }
}

impl From<usize> for TemplateArg {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or_else(|_| Self::display(value), Self::UInt)
    }
}

impl From<bool> for TemplateArg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for TemplateArg {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<RuleDescriptor> for TemplateArg {
    fn from(value: RuleDescriptor) -> Self {
        Self::display(value)
    }
}

impl From<&RuleDescriptor> for TemplateArg {
    fn from(value: &RuleDescriptor) -> Self {
        Self::display(value.clone())
    }
}

/// Largest width or precision a placeholder may carry.
pub const MAX_FIELD: usize = 65_535;

/// Format `template` against `args`.
///
/// See the module docs for the placeholder grammar and how malformed
/// placeholders are handled.
pub fn format_template(template: &str, args: &[TemplateArg]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut next = 0usize;
    let mut rest = template;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let Some((placeholder, len)) = Placeholder::parse(tail) else {
            out.push('%');
            rest = &tail[1..];
            continue;
        };
        match placeholder.conversion {
            '%' => out.push('%'),
            'n' => out.push('\n'),
            _ => {
                let arg = match placeholder.index {
                    Some(index) => index.checked_sub(1).and_then(|i| args.get(i)),
                    None => {
                        next += 1;
                        args.get(next - 1)
                    }
                };
                match arg {
                    Some(arg) => placeholder.write(&mut out, arg),
                    None => out.push_str(&tail[..len]),
                }
            }
        }
        rest = &tail[len..];
    }
    out.push_str(rest);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placeholder {
    index: Option<usize>,
    left: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: char,
}

fn digits_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(bytes.len(), |p| from + p)
}

impl Placeholder {
    /// Parse a placeholder at the start of `s` (which begins with `%`).
    ///
    /// Returns the placeholder and its byte length, or `None` when malformed.
    fn parse(s: &str) -> Option<(Self, usize)> {
        let bytes = s.as_bytes();
        let mut i = 1;

        let mut index = None;
        let end = digits_end(bytes, i);
        if end > i && bytes.get(end) == Some(&b'$') {
            index = Some(s[i..end].parse().ok()?);
            i = end + 1;
        }

        let (mut left, mut zero) = (false, false);
        while let Some(&b) = bytes.get(i) {
            match b {
                b'-' => left = true,
                b'0' => zero = true,
                _ => break,
            }
            i += 1;
        }

        let end = digits_end(bytes, i);
        let width = if end > i {
            Some(field(&s[i..end])?)
        } else {
            None
        };
        i = end;

        let mut precision = None;
        if bytes.get(i) == Some(&b'.') {
            let end = digits_end(bytes, i + 1);
            if end == i + 1 {
                return None;
            }
            precision = Some(field(&s[i + 1..end])?);
            i = end;
        }

        let conversion = match bytes.get(i)? {
            c @ (b's' | b'S' | b'd' | b'x' | b'X' | b'o' | b'f' | b'c' | b'b' | b'B' | b'n'
            | b'%') => char::from(*c),
            _ => return None,
        };
        let parsed = Self {
            index,
            left,
            zero,
            width,
            precision,
            conversion,
        };
        Some((parsed, i + 1))
    }

    fn write(&self, out: &mut String, arg: &TemplateArg) {
        let (body, numeric) = self.convert(arg);
        let len = body.chars().count();
        let pad = self.width.map_or(0, |w| w.saturating_sub(len));
        if pad == 0 {
            out.push_str(&body);
        } else if self.left {
            out.push_str(&body);
            out.extend(std::iter::repeat_n(' ', pad));
        } else if self.zero && numeric {
            let digits = match body.strip_prefix('-') {
                Some(digits) => {
                    out.push('-');
                    digits
                }
                None => body.as_str(),
            };
            out.extend(std::iter::repeat_n('0', pad));
            out.push_str(digits);
        } else {
            out.extend(std::iter::repeat_n(' ', pad));
            out.push_str(&body);
        }
    }

    /// Convert `arg`, returning the text and whether it is numeric.
    fn convert(&self, arg: &TemplateArg) -> (String, bool) {
        use TemplateArg::{Bool, Char, Float, Int, UInt};

        let numeric = match (self.conversion, arg) {
            ('d', Int { value, .. }) => Some(value.to_string()),
            ('d', UInt(v)) => Some(v.to_string()),
            ('x', Int { value, bits }) => Some(format!("{:x}", twos_complement(*value, *bits))),
            ('x', UInt(v)) => Some(format!("{v:x}")),
            ('X', Int { value, bits }) => Some(format!("{:X}", twos_complement(*value, *bits))),
            ('X', UInt(v)) => Some(format!("{v:X}")),
            ('o', Int { value, bits }) => Some(format!("{:o}", twos_complement(*value, *bits))),
            ('o', UInt(v)) => Some(format!("{v:o}")),
            ('f', Float(v)) => Some(format!("{v:.prec$}", prec = self.precision.unwrap_or(6))),
            _ => None,
        };
        if let Some(body) = numeric {
            return (body, true);
        }

        let body = match (self.conversion, arg) {
            ('c', Char(c)) => c.to_string(),
            ('c', Int { value, .. }) => code_point(u32::try_from(*value).ok(), arg),
            ('c', UInt(v)) => code_point(u32::try_from(*v).ok(), arg),
            ('b', Bool(v)) => v.to_string(),
            ('B', Bool(v)) => v.to_string().to_uppercase(),
            ('b', _) => "true".to_owned(),
            ('B', _) => "TRUE".to_owned(),
            ('s', _) => truncate(arg.to_string(), self.precision),
            ('S', _) => truncate(arg.to_string(), self.precision).to_uppercase(),
            _ => arg.to_string(),
        };
        (body, false)
    }
}

/// Parse a width or precision, rejecting values above [`MAX_FIELD`].
fn field(digits: &str) -> Option<usize> {
    digits.parse().ok().filter(|n| *n <= MAX_FIELD)
}

/// Reinterpret `value` as unsigned at `bits` wide.
fn twos_complement(value: i64, bits: u32) -> u64 {
    let raw = u64::from_ne_bytes(value.to_ne_bytes());
    raw & (u64::MAX >> (64 - bits.clamp(1, 64)))
}

fn code_point(value: Option<u32>, arg: &TemplateArg) -> String {
    value
        .and_then(char::from_u32)
        .map_or_else(|| arg.to_string(), String::from)
}

fn truncate(mut text: String, precision: Option<usize>) -> String {
    if let Some((cut, _)) = precision.and_then(|p| text.char_indices().nth(p)) {
        text.truncate(cut);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(template: &str, args: &[TemplateArg]) -> String {
        format_template(template, args)
    }

    #[test]
    fn sequential_placeholders() {
        assert_eq!(fmt("%s:%d", &["x".into(), 1.into()]), "x:1");
        assert_eq!(fmt("no placeholders", &[]), "no placeholders");
        assert_eq!(fmt("100%% of %s", &["rules".into()]), "100% of rules");
        assert_eq!(fmt("a%nb", &[]), "a\nb");
    }

    #[test]
    fn explicit_indices_do_not_advance_the_sequence() {
        let args = ["first".into(), "second".into()];
        assert_eq!(fmt("%2$s %s %1$s %s", &args), "second first first second");
    }

    #[test]
    fn numeric_conversions() {
        assert_eq!(fmt("%x %X %o", &[255u32.into(), 255u32.into(), 8u8.into()]), "ff FF 10");
        assert_eq!(fmt("%f", &[1.5f64.into()]), "1.500000");
        assert_eq!(fmt("%.2f", &[2.0f32.into()]), "2.00");
        assert_eq!(fmt("%d", &[(-42i32).into()]), "-42");
    }

    #[test]
    fn width_and_flags() {
        assert_eq!(fmt("[%5s]", &["ab".into()]), "[   ab]");
        assert_eq!(fmt("[%-5s]", &["ab".into()]), "[ab   ]");
        assert_eq!(fmt("[%05d]", &[(-42i64).into()]), "[-0042]");
        assert_eq!(fmt("[%05s]", &["ab".into()]), "[   ab]");
        assert_eq!(fmt("[%2s]", &["abcd".into()]), "[abcd]");
    }

    #[test]
    fn string_precision_truncates_by_character() {
        assert_eq!(fmt("%.3s", &["héllo".into()]), "hél");
        assert_eq!(fmt("%S", &["rule".into()]), "RULE");
    }

    #[test]
    fn char_and_bool_conversions() {
        assert_eq!(fmt("%c%c", &['r'.into(), 65u8.into()]), "rA");
        assert_eq!(fmt("%b %b %B", &[false.into(), "x".into(), true.into()]), "false true TRUE");
    }

    #[test]
    fn malformed_placeholders_are_copied_verbatim() {
        assert_eq!(fmt("%q and %s", &["x".into()]), "%q and x");
        assert_eq!(fmt("trailing %", &[]), "trailing %");
        assert_eq!(fmt("%s and %s", &["only".into()]), "only and %s");
        assert_eq!(fmt("%3$s", &["a".into()]), "%3$s");
        assert_eq!(fmt("%0$s", &["a".into()]), "%0$s");
        assert_eq!(fmt("%.s", &["a".into()]), "%.s");
    }

    #[test]
    fn mismatched_conversion_falls_back_to_display() {
        assert_eq!(fmt("%d", &["seven".into()]), "seven");
        assert_eq!(fmt("%f", &[3i32.into()]), "3");
        assert_eq!(fmt("%c", &[(-1i32).into()]), "-1");
    }

    #[test]
    fn oversized_fields_are_copied_verbatim() {
        assert_eq!(fmt("%.70000f", &[1.5f64.into()]), "%.70000f");
        assert_eq!(fmt("[%99999999999999999999s]", &["a".into()]), "[%99999999999999999999s]");
        assert_eq!(fmt("%70000d|%s", &[1.into(), "x".into()]), "%70000d|1");
        assert_eq!(fmt("%.65535f", &[0.5f64.into()]).len(), 65_537);
    }

    #[test]
    fn negative_hex_uses_the_captured_width() {
        assert_eq!(fmt("%x", &[(-1i32).into()]), "ffffffff");
        assert_eq!(fmt("%X", &[(-2i8).into()]), "FE");
        assert_eq!(fmt("%o", &[(-1i16).into()]), "177777");
        assert_eq!(fmt("%x", &[(-1i64).into()]), "ffffffffffffffff");
        assert_eq!(fmt("%x", &[255i32.into()]), "ff");
    }

    #[test]
    fn surplus_arguments_are_ignored() {
        assert_eq!(fmt("%s", &["a".into(), "b".into()]), "a");
    }

    #[test]
    fn display_arguments_format_late() {
        let arg = TemplateArg::display(std::net::Ipv4Addr::LOCALHOST);
        assert_eq!(fmt("bind(%s)", &[arg]), "bind(127.0.0.1)");
    }
}
