//! Attribute/Style Serializer
//!
//! Inline CSS is written in one canonical property order. Block
//! attributes are compact JSON with nulls dropped, keys in the order the
//! builder inserted them, and strings escaped so they can never close the
//! HTML comment that carries them.

use serde::Serialize;
use serde_json::ser::{CharEscape, Formatter};
use serde_json::{Map, Value};
use std::io;

use crate::layout::{Padding, Side};

/// Style properties a block may carry. Absent properties are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineStyle<'a> {
    pub border_color: Option<&'a str>,
    pub border_width: Option<&'a str>,
    pub border_radius: Option<&'a str>,
    pub color: Option<&'a str>,
    pub background_color: Option<&'a str>,
    pub min_height: Option<&'a str>,
    pub padding: Option<&'a Padding>,
    pub font_size: Option<&'a str>,
    pub flex_basis: Option<&'a str>,
}

/// Serialize to `prop:value;prop:value` in canonical order.
pub fn serialize_style(style: &InlineStyle<'_>) -> String {
    let mut decls: Vec<String> = Vec::new();
    let mut push = |property: &str, value: Option<&str>| {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            decls.push(format!("{}:{}", property, value));
        }
    };

    push("border-color", style.border_color);
    push("border-width", style.border_width);
    push("border-radius", style.border_radius);
    push("color", style.color);
    push("background-color", style.background_color);
    push("min-height", style.min_height);
    if let Some(padding) = style.padding {
        for side in Side::CSS_ORDER {
            push(&format!("padding-{}", side.as_str()), padding.get(side));
        }
    }
    push("font-size", style.font_size);
    push("flex-basis", style.flex_basis);

    decls.join(";")
}

/// ` style="..."`, or nothing for an empty declaration list.
pub fn style_attr(css: &str) -> String {
    if css.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", css)
    }
}

/// ` class="..."`, or nothing for an empty class list.
pub fn class_attr(classes: &[String]) -> String {
    if classes.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", classes.join(" "))
    }
}

/// Parse `"48px"`, `"48"` or `"1.5em"` into whole pixels.
pub fn parse_px(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    let number = trimmed
        .strip_suffix("px")
        .or_else(|| trimmed.strip_suffix("em"))
        .unwrap_or(trimmed)
        .trim();
    number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.round() as u32)
}

/// Block attribute object under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attrs(Map<String, Value>);

impl Attrs {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn set_opt<V: Into<Value>>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    /// `attrs[outer][inner] = value`, creating `outer` on first use.
    pub fn set_nested(&mut self, outer: &str, inner: &str, value: impl Into<Value>) -> &mut Self {
        let entry = self
            .0
            .entry(outer.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(map) = entry {
            map.insert(inner.to_string(), value.into());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> String {
        serialize_attrs(&self.0)
    }
}

impl From<Attrs> for Value {
    fn from(attrs: Attrs) -> Self {
        Value::Object(attrs.0)
    }
}

/// Compact JSON, nulls dropped, comment-safe string escapes.
pub fn serialize_attrs(attrs: &Map<String, Value>) -> String {
    let cleaned = strip_nulls(attrs);
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, CommentSafeFormatter);
    if cleaned.serialize(&mut serializer).is_err() {
        return String::from("{}");
    }
    String::from_utf8(out).unwrap_or_default()
}

fn strip_nulls(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| {
            let v = match v {
                Value::Object(inner) => Value::Object(strip_nulls(inner)),
                other => other.clone(),
            };
            (k.clone(), v)
        })
        .collect()
}

/// Compact formatter that escapes `--`, `<`, `>`, `&` and `"` as unicode
/// escapes inside strings.
struct CommentSafeFormatter;

impl Formatter for CommentSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let bytes = fragment.as_bytes();
        let mut start = 0;
        let mut i = 0;
        while i < bytes.len() {
            let (escape, width): (&[u8], usize) = match bytes[i] {
                b'<' => (b"\\u003c", 1),
                b'>' => (b"\\u003e", 1),
                b'&' => (b"\\u0026", 1),
                b'-' if bytes.get(i + 1) == Some(&b'-') => (b"\\u002d\\u002d", 2),
                _ => {
                    i += 1;
                    continue;
                }
            };
            writer.write_all(&bytes[start..i])?;
            writer.write_all(escape)?;
            i += width;
            start = i;
        }
        writer.write_all(&bytes[start..])
    }

    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let escaped: &[u8] = match char_escape {
            CharEscape::Quote => b"\\u0022",
            CharEscape::ReverseSolidus => b"\\\\",
            CharEscape::Solidus => b"\\/",
            CharEscape::Backspace => b"\\b",
            CharEscape::FormFeed => b"\\f",
            CharEscape::LineFeed => b"\\n",
            CharEscape::CarriageReturn => b"\\r",
            CharEscape::Tab => b"\\t",
            CharEscape::AsciiControl(byte) => {
                return write!(writer, "\\u{:04x}", byte);
            }
        };
        writer.write_all(escaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_css_canonical_order() {
        let padding = Padding::new()
            .with(Side::Left, "40px")
            .with(Side::Top, "80px");
        let css = serialize_style(&InlineStyle {
            font_size: Some("18px"),
            padding: Some(&padding),
            background_color: Some("#000"),
            border_color: Some("#e0e0e0"),
            color: Some("#fff"),
            ..Default::default()
        });
        assert_eq!(
            css,
            "border-color:#e0e0e0;color:#fff;background-color:#000;padding-top:80px;padding-left:40px;font-size:18px"
        );
    }

    #[test]
    fn test_css_empty_when_nothing_present() {
        assert_eq!(serialize_style(&InlineStyle::default()), "");
        assert_eq!(style_attr(""), "");
    }

    #[test]
    fn test_attrs_keep_insertion_order_and_drop_nulls() {
        let mut attrs = Attrs::new();
        attrs.set("zeta", 1).set("alpha", Value::Null).set("mid", "x");
        attrs.set_nested("style", "color", json!({"text": "#fff"}));
        assert_eq!(attrs.to_json(), r##"{"zeta":1,"mid":"x","style":{"color":{"text":"#fff"}}}"##);
    }

    #[test]
    fn test_attrs_cannot_close_comment() {
        let mut attrs = Attrs::new();
        attrs.set("text", "a --> <b> & \"q\"");
        let json = attrs.to_json();
        assert!(!json.contains("--"));
        assert!(!json.contains('<'));
        assert_eq!(
            json,
            r#"{"text":"a \u002d\u002d\u003e \u003cb\u003e \u0026 \u0022q\u0022"}"#
        );
    }

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("48px"), Some(48));
        assert_eq!(parse_px(" 12 "), Some(12));
        assert_eq!(parse_px("2em"), Some(2));
        assert_eq!(parse_px("auto"), None);
    }
}
