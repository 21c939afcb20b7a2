//! Layout Document Model
//!
//! The semantic page description produced upstream of the compiler.
//! Optional fields are read leniently: a value of the wrong shape is
//! treated as absent rather than failing the whole document. Only the
//! top-level shape is enforced.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::compiler::CompileError;

/// Root entity: an optional page title and the ordered sections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutDocument {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub page_title: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl LayoutDocument {
    /// Parse a JSON-shaped document. Fails only on a malformed top level.
    pub fn from_value(value: &Value) -> Result<Self, CompileError> {
        let root = value
            .as_object()
            .ok_or_else(|| CompileError::MalformedDocument("document is not an object".into()))?;

        match root.get("sections") {
            None | Some(Value::Null) => {}
            Some(Value::Array(sections)) => {
                if let Some(index) = sections.iter().position(|s| !s.is_object()) {
                    return Err(CompileError::MalformedDocument(format!(
                        "section {} is not an object",
                        index
                    )));
                }
            }
            Some(_) => {
                return Err(CompileError::MalformedDocument("`sections` is not a sequence".into()));
            }
        }

        Ok(Self::deserialize(value)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CompileError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn load(path: &Path) -> Result<Self, CompileError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

/// One vertically stacked region of a page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Section {
    #[serde(rename = "type", deserialize_with = "de::string")]
    pub kind: String,
    #[serde(deserialize_with = "de::background")]
    pub background: Option<Background>,
    #[serde(deserialize_with = "de::opt_string")]
    pub background_color: Option<String>,
    #[serde(deserialize_with = "de::padding")]
    pub padding: Option<Padding>,
    #[serde(deserialize_with = "de::pixels")]
    pub min_height: Option<u32>,
    #[serde(deserialize_with = "de::lenient")]
    pub align: Option<TextAlign>,
    #[serde(deserialize_with = "de::seq")]
    pub content: Vec<ContentItem>,
    #[serde(deserialize_with = "de::seq")]
    pub items: Vec<Card>,
    #[serde(deserialize_with = "de::seq")]
    pub images: Vec<GalleryImage>,
    #[serde(deserialize_with = "de::lenient_or_default")]
    pub styling: SectionStyling,
    #[serde(deserialize_with = "de::lenient_or_default")]
    pub layout: SectionLayout,
    #[serde(deserialize_with = "de::pixels")]
    pub columns: Option<u32>,
    #[serde(deserialize_with = "de::lenient")]
    pub media_position: Option<MediaPosition>,
    #[serde(deserialize_with = "de::opt_string")]
    pub media_description: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub text: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub citation: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Background {
    #[serde(rename = "type", deserialize_with = "de::lenient")]
    pub kind: Option<BackgroundKind>,
    #[serde(deserialize_with = "de::opt_string")]
    pub value: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub overlay_color: Option<String>,
    #[serde(deserialize_with = "de::lenient")]
    pub overlay_opacity: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    Color,
    Image,
    Gradient,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SectionStyling {
    #[serde(deserialize_with = "de::padding")]
    pub padding: Option<Padding>,
    #[serde(deserialize_with = "de::length")]
    pub card_border_radius: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SectionLayout {
    #[serde(deserialize_with = "de::pixels")]
    pub columns: Option<u32>,
}

/// Text alignment as carried by sections and content items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaPosition {
    #[default]
    Left,
    Right,
}

/// A column or card: nested content plus optional card styling.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Card {
    #[serde(deserialize_with = "de::seq")]
    pub content: Vec<ContentItem>,
    #[serde(deserialize_with = "de::lenient")]
    pub align: Option<TextAlign>,
    #[serde(deserialize_with = "de::lenient_or_default")]
    pub card_style: CardStyle,
    #[serde(deserialize_with = "de::opt_string")]
    pub background_color: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub text_color: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub border_color: Option<String>,
    #[serde(deserialize_with = "de::length")]
    pub border_width: Option<String>,
    #[serde(deserialize_with = "de::length")]
    pub border_radius: Option<String>,
    #[serde(deserialize_with = "de::padding")]
    pub padding: Option<Padding>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardStyle {
    #[serde(deserialize_with = "de::opt_string")]
    pub background_color: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub text_color: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub border_color: Option<String>,
    #[serde(deserialize_with = "de::length")]
    pub border_width: Option<String>,
    #[serde(deserialize_with = "de::length")]
    pub border_radius: Option<String>,
    #[serde(deserialize_with = "de::padding")]
    pub padding: Option<Padding>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GalleryImage {
    #[serde(deserialize_with = "de::opt_string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub alt: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub caption_title: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub caption_meta: Option<String>,
    #[serde(deserialize_with = "de::pixels")]
    pub width: Option<u32>,
    #[serde(deserialize_with = "de::pixels")]
    pub height: Option<u32>,
}

// --- Content items ---

/// A leaf or nested element within a section.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
    Heading(Heading),
    Paragraph(Paragraph),
    Image(Image),
    Buttons(Buttons),
    List(List),
    IconList(List),
    Spacer(Spacer),
    Separator,
    Quote(Quote),
    Columns(NestedColumns),
    ImageGallery(NestedGallery),
    Form(Form),
    /// Any kind this compiler does not know; carries the raw type name.
    Unknown(String),
}

impl ContentItem {
    pub fn from_value(value: Value) -> Self {
        fn parse<T: DeserializeOwned>(value: Value) -> Option<T> {
            serde_json::from_value(value).ok()
        }

        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let item = match kind.as_str() {
            "heading" => parse(value).map(Self::Heading),
            "paragraph" => parse(value).map(Self::Paragraph),
            "image" => parse(value).map(Self::Image),
            "buttons" => parse(value).map(Self::Buttons),
            "list" => parse(value).map(Self::List),
            "icon_list" | "icon-list" => parse(value).map(Self::IconList),
            "spacer" => parse(value).map(Self::Spacer),
            "separator" => Some(Self::Separator),
            "quote" => parse(value).map(Self::Quote),
            "columns" => parse(value).map(Self::Columns),
            "image-gallery" => parse(value).map(Self::ImageGallery),
            "form" => parse(value).map(Self::Form),
            _ => None,
        };

        item.unwrap_or(Self::Unknown(kind))
    }

    /// The source `type` tag of this item.
    pub fn kind(&self) -> &str {
        match self {
            Self::Heading(_) => "heading",
            Self::Paragraph(_) => "paragraph",
            Self::Image(_) => "image",
            Self::Buttons(_) => "buttons",
            Self::List(_) => "list",
            Self::IconList(_) => "icon_list",
            Self::Spacer(_) => "spacer",
            Self::Separator => "separator",
            Self::Quote(_) => "quote",
            Self::Columns(_) => "columns",
            Self::ImageGallery(_) => "image-gallery",
            Self::Form(_) => "form",
            Self::Unknown(kind) => kind,
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, Self::Heading(_))
    }
}

impl<'de> Deserialize<'de> for ContentItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(value))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Heading {
    #[serde(deserialize_with = "de::string")]
    pub text: String,
    #[serde(deserialize_with = "de::lenient")]
    pub level: Option<u8>,
    #[serde(deserialize_with = "de::opt_string")]
    pub color: Option<String>,
    #[serde(deserialize_with = "de::length")]
    pub font_size: Option<String>,
    #[serde(deserialize_with = "de::lenient")]
    pub align: Option<TextAlign>,
    #[serde(deserialize_with = "de::opt_string")]
    pub font_weight: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Paragraph {
    #[serde(deserialize_with = "de::string")]
    pub text: String,
    #[serde(deserialize_with = "de::opt_string")]
    pub color: Option<String>,
    #[serde(deserialize_with = "de::length")]
    pub font_size: Option<String>,
    #[serde(deserialize_with = "de::lenient")]
    pub align: Option<TextAlign>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Image {
    #[serde(deserialize_with = "de::opt_string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub alt: Option<String>,
    #[serde(deserialize_with = "de::pixels")]
    pub width: Option<u32>,
    #[serde(deserialize_with = "de::pixels")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Buttons {
    #[serde(deserialize_with = "de::seq")]
    pub items: Vec<Button>,
    #[serde(deserialize_with = "de::lenient")]
    pub align: Option<TextAlign>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Button {
    #[serde(deserialize_with = "de::string")]
    pub text: String,
    #[serde(deserialize_with = "de::opt_string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub bg_color: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub text_color: Option<String>,
    #[serde(deserialize_with = "de::lenient_or_default")]
    pub style: ButtonStyle,
    #[serde(deserialize_with = "de::length")]
    pub border_radius: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    #[default]
    Fill,
    Outline,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct List {
    #[serde(deserialize_with = "de::strings")]
    pub items: Vec<String>,
    #[serde(deserialize_with = "de::lenient_or_default")]
    pub ordered: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Spacer {
    #[serde(deserialize_with = "de::pixels")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Quote {
    #[serde(deserialize_with = "de::string")]
    pub text: String,
    #[serde(deserialize_with = "de::opt_string")]
    pub citation: Option<String>,
    #[serde(deserialize_with = "de::lenient")]
    pub align: Option<TextAlign>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NestedColumns {
    #[serde(deserialize_with = "de::seq")]
    pub items: Vec<Card>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NestedGallery {
    #[serde(deserialize_with = "de::seq")]
    pub images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Form {
    #[serde(deserialize_with = "de::seq")]
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormField {
    #[serde(deserialize_with = "de::string")]
    pub label: String,
    #[serde(rename = "type", deserialize_with = "de::string")]
    pub kind: String,
    #[serde(deserialize_with = "de::lenient_or_default")]
    pub required: bool,
}

impl Default for FormField {
    fn default() -> Self {
        Self {
            label: String::new(),
            kind: "text".to_string(),
            required: false,
        }
    }
}

impl FormField {
    pub fn new(label: &str, kind: &str, required: bool) -> Self {
        Self {
            label: label.to_string(),
            kind: kind.to_string(),
            required,
        }
    }
}

// --- Padding ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// Order in which padding declarations are written as CSS.
    pub const CSS_ORDER: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "top" => Some(Self::Top),
            "right" => Some(Self::Right),
            "bottom" => Some(Self::Bottom),
            "left" => Some(Self::Left),
            _ => None,
        }
    }
}

/// Side -> CSS length mapping that remembers insertion order.
///
/// The order matters for attribute JSON; CSS output always uses
/// [`Side::CSS_ORDER`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Padding {
    entries: Vec<(Side, String)>,
}

impl Padding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uniform(value: &str) -> Self {
        Self::new()
            .with(Side::Top, value)
            .with(Side::Right, value)
            .with(Side::Bottom, value)
            .with(Side::Left, value)
    }

    /// Top and bottom set to `value`, in that order.
    pub fn vertical(value: &str) -> Self {
        Self::new().with(Side::Top, value).with(Side::Bottom, value)
    }

    pub fn with(mut self, side: Side, value: impl Into<String>) -> Self {
        self.set(side, value);
        self
    }

    /// Replace in place, or append when the side is new.
    pub fn set(&mut self, side: Side, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(s, _)| *s == side) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((side, value)),
        }
    }

    /// Append only when the side is absent.
    pub fn or_insert(&mut self, side: Side, value: impl Into<String>) {
        if self.get(side).is_none() {
            self.entries.push((side, value.into()));
        }
    }

    pub fn get(&self, side: Side) -> Option<&str> {
        self.entries
            .iter()
            .find(|(s, _)| *s == side)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Side, &str)> {
        self.entries.iter().map(|(s, v)| (*s, v.as_str()))
    }

    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .iter()
            .map(|(side, v)| (side.as_str().to_string(), Value::from(v)))
            .collect();
        Value::Object(map)
    }
}

impl<'de> Deserialize<'de> for Padding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let mut padding = Padding::new();
        if let Value::Object(map) = value {
            for (key, raw) in map {
                if let (Some(side), Some(length)) = (Side::parse(&key), de::css_length(&raw)) {
                    padding.set(side, length);
                }
            }
        }
        Ok(padding)
    }
}

/// Lenient field readers used by the model's `deserialize_with` hooks.
pub(crate) mod de {
    use super::{Background, Padding};
    use crate::style::parse_px;
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).ok())
    }

    pub fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        lenient(deserializer).map(Option::unwrap_or_default)
    }

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        opt_string(deserializer).map(Option::unwrap_or_default)
    }

    /// Non-empty strings; numbers are stringified; anything else is absent.
    pub fn opt_string<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(scalar_text(&value))
    }

    pub fn strings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Array(values) => values.iter().filter_map(scalar_text).collect(),
            _ => Vec::new(),
        })
    }

    /// A CSS length: strings pass through, bare numbers become pixels.
    pub fn length<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(css_length(&value))
    }

    /// A pixel count: `600`, `600.0` or `"600px"`.
    pub fn pixels<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match &value {
            Value::Number(n) => n
                .as_f64()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v.round() as u32),
            Value::String(s) => parse_px(s),
            _ => None,
        })
    }

    pub fn padding<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Padding>, D::Error> {
        let padding: Option<Padding> = lenient(deserializer)?;
        Ok(padding.filter(|p| !p.is_empty()))
    }

    /// Either the structured object or a bare color string.
    pub fn background<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Background>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) if !s.is_empty() => Some(Background {
                value: Some(s),
                ..Background::default()
            }),
            Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        })
    }

    /// Elements that fail to parse are dropped; a non-sequence is empty.
    pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Array(values) => values
                .into_iter()
                .filter_map(|v| serde_json::from_value(v).ok())
                .collect(),
            _ => Vec::new(),
        })
    }

    pub fn css_length(value: &Value) -> Option<String> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(format!("{}px", n)),
            _ => None,
        }
    }

    fn scalar_text(value: &Value) -> Option<String> {
        match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_item_keeps_kind() {
        let item = ContentItem::from_value(json!({"type": "bogus", "text": "x"}));
        assert_eq!(item, ContentItem::Unknown("bogus".to_string()));
        assert_eq!(item.kind(), "bogus");
    }

    #[test]
    fn test_garbled_fields_are_dropped() {
        let item = ContentItem::from_value(json!({
            "type": "heading",
            "text": "Hi",
            "level": "two",
            "align": "diagonal",
            "font_size": 48
        }));
        match item {
            ContentItem::Heading(h) => {
                assert_eq!(h.text, "Hi");
                assert_eq!(h.level, None);
                assert_eq!(h.align, None);
                assert_eq!(h.font_size.as_deref(), Some("48px"));
            }
            other => panic!("expected heading, got {:?}", other),
        }
    }

    #[test]
    fn test_padding_keeps_source_order() {
        let section: Section = serde_json::from_value(json!({
            "type": "cta",
            "padding": {"bottom": "10px", "top": 20, "middle": "1px"}
        }))
        .unwrap();
        let padding = section.padding.unwrap();
        let order: Vec<_> = padding.iter().map(|(s, _)| s).collect();
        assert_eq!(order, vec![Side::Bottom, Side::Top]);
        assert_eq!(padding.get(Side::Top), Some("20px"));
    }

    #[test]
    fn test_min_height_accepts_px_string() {
        let section: Section =
            serde_json::from_value(json!({"type": "hero", "min_height": "640px"})).unwrap();
        assert_eq!(section.min_height, Some(640));
    }

    #[test]
    fn test_flat_background_string() {
        let section: Section =
            serde_json::from_value(json!({"type": "cta", "background": "#123456"})).unwrap();
        let bg = section.background.unwrap();
        assert_eq!(bg.kind, None);
        assert_eq!(bg.value.as_deref(), Some("#123456"));
    }

    #[test]
    fn test_sections_must_be_sequence() {
        let err = LayoutDocument::from_value(&json!({"sections": {"type": "hero"}})).unwrap_err();
        assert!(err.to_string().contains("not a sequence"));

        let err = LayoutDocument::from_value(&json!({"sections": ["hero"]})).unwrap_err();
        assert!(err.to_string().contains("section 0"));
    }

    #[test]
    fn test_missing_sections_is_empty_document() {
        let doc = LayoutDocument::from_value(&json!({"page_title": "Home"})).unwrap();
        assert!(doc.sections.is_empty());
        assert_eq!(doc.page_title.as_deref(), Some("Home"));
    }
}
