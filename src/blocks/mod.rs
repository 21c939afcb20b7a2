//! Block Builders - Two Dialects, One Capability Set
//!
//! Every builder returns one self-delimiting markup unit: a start marker
//! with the block name and its JSON attributes, a body, and an end
//! marker (or a single self-closing marker).
//!
//! Section converters only see [`BlockDialect`], so the dialect is picked
//! by the caller at compile time.

pub mod native;
pub mod portable;

pub use native::NativeDialect;
pub use portable::PortableDialect;

use serde::{Deserialize, Serialize};

use crate::layout::{ButtonStyle, MediaPosition, Padding, TextAlign};
use crate::style::Attrs;

/// Which dialect a compile run emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// Core blocks; the static HTML carries all styling.
    #[default]
    Portable,
    /// Page-builder blocks rendered by the host at display time.
    Native,
}

impl DialectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Portable => "portable",
            Self::Native => "native",
        }
    }
}

/// Block-level (container width) alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockAlign {
    Wide,
    Full,
}

impl BlockAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wide => "wide",
            Self::Full => "full",
        }
    }
}

// --- Builder inputs ---

#[derive(Debug, Clone, Copy)]
pub struct HeadingBlock<'a> {
    pub text: &'a str,
    pub level: u8,
    pub color: Option<&'a str>,
    pub font_size: Option<&'a str>,
    pub align: Option<TextAlign>,
    pub font_weight: Option<&'a str>,
}

#[derive(Debug, Clone, Copy)]
pub struct ParagraphBlock<'a> {
    pub text: &'a str,
    pub color: Option<&'a str>,
    pub font_size: Option<&'a str>,
    pub align: Option<TextAlign>,
}

#[derive(Debug, Clone, Copy)]
pub struct ImageBlock<'a> {
    pub url: &'a str,
    pub alt: &'a str,
    /// Media library id of an uploaded image.
    pub id: Option<u64>,
    pub caption: Option<&'a str>,
}

#[derive(Debug, Clone, Copy)]
pub struct ButtonBlock<'a> {
    pub text: &'a str,
    pub url: Option<&'a str>,
    pub bg_color: Option<&'a str>,
    pub text_color: Option<&'a str>,
    pub style: ButtonStyle,
    pub border_radius: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryEntry {
    pub url: String,
    pub alt: String,
    /// Inline HTML; empty means no caption.
    pub caption: String,
    pub id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormFieldSpec {
    pub label: String,
    pub kind: String,
    pub required: bool,
    /// Percentage of the row this field spans.
    pub width: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactForm {
    pub fields: Vec<FormFieldSpec>,
    pub email: Option<String>,
    pub subject: String,
    pub submit_label: String,
}

/// Shared container styling. Background and text color drive both the
/// presence classes and the inline declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxStyle {
    pub bg_color: Option<String>,
    pub text_color: Option<String>,
    pub padding: Option<Padding>,
    pub min_height: Option<String>,
    pub border_radius: Option<String>,
    pub border_color: Option<String>,
    pub border_width: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnStyle {
    pub width: Option<String>,
    pub text_align: Option<TextAlign>,
    pub frame: BoxStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoverStyle {
    pub image_url: Option<String>,
    /// Overlay strength, 0-100.
    pub dim_ratio: u32,
    /// Pixels.
    pub min_height: u32,
    pub overlay_color: Option<String>,
    pub align: Option<BlockAlign>,
}

/// The capability set both dialects implement.
pub trait BlockDialect {
    fn kind(&self) -> DialectKind;

    fn heading(&self, block: &HeadingBlock<'_>) -> String;
    fn paragraph(&self, block: &ParagraphBlock<'_>) -> String;
    fn image(&self, block: &ImageBlock<'_>) -> String;
    fn buttons(&self, buttons: &[ButtonBlock<'_>], align: Option<TextAlign>) -> String;
    fn list(&self, items: &[String], ordered: bool) -> String;
    fn icon_list(&self, items: &[String]) -> String;
    fn spacer(&self, height: u32) -> String;
    fn separator(&self) -> String;
    fn quote(&self, text: &str, citation: Option<&str>, align: Option<TextAlign>) -> String;
    fn testimonial(&self, text: &str, name: &str, align: Option<TextAlign>) -> String;
    fn gallery(&self, images: &[GalleryEntry], columns: u32, crop: bool) -> String;
    fn form(&self, form: &ContactForm) -> String;
    fn media_text(
        &self,
        media: &ImageBlock<'_>,
        children: &[String],
        position: MediaPosition,
        align: Option<BlockAlign>,
    ) -> String;

    fn group(&self, children: &[String], style: &BoxStyle, align: Option<BlockAlign>) -> String;
    fn columns(&self, columns: &[String], align: Option<BlockAlign>) -> String;
    fn column(&self, children: &[String], style: &ColumnStyle) -> String;
    fn cover(&self, children: &[String], cover: &CoverStyle) -> String;

    /// Data URI standing in for an image that has no source.
    fn placeholder_image(&self, description: &str, width: u32, height: u32) -> String;

    /// Visible marker for a content kind this compiler does not know.
    fn unknown(&self, kind: &str) -> String {
        format!("<!-- unknown content type: {} -->", comment_text(kind))
    }
}

/// Text that cannot close or nest the HTML comment it is written into.
pub fn comment_text(text: &str) -> String {
    let mut out = text.replace('<', "&lt;").replace('>', "&gt;");
    while out.contains("--") {
        out = out.replace("--", "- -");
    }
    out
}

// --- Markers ---

fn marker_attrs(attrs: &Attrs) -> String {
    if attrs.is_empty() {
        String::new()
    } else {
        format!(" {}", attrs.to_json())
    }
}

/// `<!-- wp:name {attrs} -->`
pub fn open_marker(name: &str, attrs: &Attrs) -> String {
    format!("<!-- wp:{}{} -->", name, marker_attrs(attrs))
}

/// `<!-- /wp:name -->`
pub fn close_marker(name: &str) -> String {
    format!("<!-- /wp:{} -->", name)
}

/// `<!-- wp:name {attrs} /-->`
pub fn void_marker(name: &str, attrs: &Attrs) -> String {
    format!("<!-- wp:{}{} /-->", name, marker_attrs(attrs))
}

/// Start marker, body on its own line, end marker.
pub fn wrap_block(name: &str, attrs: &Attrs, body: &str) -> String {
    format!("{}\n{}\n{}", open_marker(name, attrs), body, close_marker(name))
}

/// Raw HTML block; used by both dialects.
pub fn html_block(html: &str) -> String {
    wrap_block("html", &Attrs::new(), html)
}
