//! Section Converters
//!
//! One function per archetype. Each resolves its defaults through
//! [`resolve`], converts its items with the shared item converter and
//! wraps the result in the archetype's container.

use log::debug;

use super::{convert_items, resolve, ConvertContext};
use crate::blocks::{BlockAlign, BoxStyle, ColumnStyle, CoverStyle, GalleryEntry, ImageBlock};
use crate::layout::{Card, ContentItem, FormField, GalleryImage, Padding, Section, TextAlign};

const HERO_BACKGROUND: &str = "#1a1a2e";
const HERO_MIN_HEIGHT: u32 = 600;
const DARK_BACKGROUND: &str = "#333333";
const CARD_BORDER_COLOR: &str = "#e0e0e0";
const CARD_BORDER_WIDTH: &str = "1px";
const CARD_PADDING: &str = "20px";
const HORIZONTAL_PADDING: &str = "40px";
const MAX_GALLERY_COLUMNS: u32 = 3;
const MAX_LOGO_COLUMNS: u32 = 8;
/// Footers never pad out to more columns than this.
const MAX_FOOTER_COLUMNS: u32 = 6;

/// Section archetypes, keyed by the layout's `type` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Hero,
    FeatureColumns,
    CallToAction,
    Gallery,
    LogoStrip,
    Footer,
    TextSection,
    MediaText,
    Testimonial,
    Contact,
    Map,
    Generic,
}

impl SectionKind {
    pub fn from_type(kind: &str) -> Self {
        match kind {
            "hero" => Self::Hero,
            "columns" | "features" | "stats" | "services" | "team" | "about-team" => {
                Self::FeatureColumns
            }
            "cta" | "call-to-action" => Self::CallToAction,
            "image-gallery" | "gallery" | "properties-grid" => Self::Gallery,
            "logo-strip" => Self::LogoStrip,
            "footer" => Self::Footer,
            "text-section" | "content" => Self::TextSection,
            "media-text" => Self::MediaText,
            "quote" | "testimonial" => Self::Testimonial,
            "contact" | "contact-form" => Self::Contact,
            "map" => Self::Map,
            _ => Self::Generic,
        }
    }
}

/// Convert one section; an empty string means the section emits nothing.
pub fn convert_section(cx: &ConvertContext<'_>, section: &Section) -> String {
    let kind = SectionKind::from_type(&section.kind);
    debug!("section `{}` as {:?}", section.kind, kind);

    match kind {
        SectionKind::Hero => hero(cx, section),
        SectionKind::FeatureColumns => feature_columns(cx, section),
        SectionKind::CallToAction => call_to_action(cx, section),
        SectionKind::Gallery => gallery(cx, section),
        SectionKind::LogoStrip => logo_strip(cx, section),
        SectionKind::Footer => footer(cx, section),
        SectionKind::TextSection => text_section(cx, section),
        SectionKind::MediaText => media_text(cx, section),
        SectionKind::Testimonial => testimonial(cx, section),
        SectionKind::Contact => contact(cx, section),
        SectionKind::Map => map(cx, section),
        SectionKind::Generic => generic(cx, section),
    }
}

fn full_group(cx: &ConvertContext<'_>, children: &[String], style: BoxStyle) -> String {
    cx.dialect.group(children, &style, Some(BlockAlign::Full))
}

fn section_box(section: &Section, padding: Option<Padding>) -> BoxStyle {
    BoxStyle {
        bg_color: resolve::background_color(section).map(str::to_string),
        padding,
        ..Default::default()
    }
}

/// Top/bottom `vertical`, left/right `horizontal`.
fn block_padding(vertical: &str, horizontal: &str) -> Padding {
    resolve::with_horizontal_defaults(Padding::vertical(vertical), horizontal)
}

fn hero(cx: &ConvertContext<'_>, section: &Section) -> String {
    let align = resolve::section_align(section);
    let content = convert_items(cx, &section.content, align);
    let min_height = section.min_height.unwrap_or(HERO_MIN_HEIGHT);

    if let Some(bg) = resolve::image_background(section) {
        let url = bg.url.as_deref().or_else(|| {
            bg.value
                .as_deref()
                .filter(|v| v.starts_with("http") || v.starts_with('/') || v.starts_with("data:"))
        });
        let description = bg.value.as_deref().unwrap_or("hero background");
        let (image_url, _) = cx.locate_image(url, description, Some(0), 1920, 800);

        return cx.dialect.cover(
            &content,
            &CoverStyle {
                image_url: Some(image_url),
                dim_ratio: resolve::dim_ratio(bg),
                min_height,
                overlay_color: bg.overlay_color.clone(),
                align: Some(BlockAlign::Full),
            },
        );
    }

    let padding = resolve::with_horizontal_defaults(
        section.padding.clone().unwrap_or_else(|| Padding::vertical("80px")),
        HORIZONTAL_PADDING,
    );
    full_group(
        cx,
        &content,
        BoxStyle {
            bg_color: Some(resolve::background_color(section).unwrap_or(HERO_BACKGROUND).to_string()),
            padding: Some(padding),
            min_height: Some(resolve::px(min_height)),
            ..Default::default()
        },
    )
}

fn card_column(
    cx: &ConvertContext<'_>,
    section: &Section,
    card: &Card,
    inherited: Option<TextAlign>,
) -> String {
    let align = resolve::item_align(card.align, inherited);
    let inner = convert_items(cx, &card.content, align);
    let style = &card.card_style;

    let bg_color = style.background_color.clone().or_else(|| card.background_color.clone());
    let mut border_color = style.border_color.clone().or_else(|| card.border_color.clone());
    let mut border_width = style.border_width.clone().or_else(|| card.border_width.clone());
    if bg_color.is_none() && border_color.is_none() {
        border_color = Some(CARD_BORDER_COLOR.to_string());
        border_width = border_width.or_else(|| Some(CARD_BORDER_WIDTH.to_string()));
    }

    let frame = BoxStyle {
        bg_color,
        text_color: style.text_color.clone().or_else(|| card.text_color.clone()),
        padding: Some(
            style
                .padding
                .clone()
                .or_else(|| card.padding.clone())
                .unwrap_or_else(|| Padding::uniform(CARD_PADDING)),
        ),
        min_height: None,
        border_radius: style
            .border_radius
            .clone()
            .or_else(|| card.border_radius.clone())
            .or_else(|| section.styling.card_border_radius.clone()),
        border_color,
        border_width,
    };

    cx.dialect.column(
        &inner,
        &ColumnStyle {
            width: None,
            text_align: align,
            frame,
        },
    )
}

fn feature_columns(cx: &ConvertContext<'_>, section: &Section) -> String {
    let align = resolve::section_align(section);
    let columns: Vec<String> = section
        .items
        .iter()
        .map(|card| card_column(cx, section, card, align))
        .collect();

    let mut inner = convert_items(cx, &section.content, align);
    let has_content = !inner.is_empty();
    if !columns.is_empty() {
        inner.push(cx.dialect.columns(&columns, Some(BlockAlign::Wide)));
    }

    let style = section_box(section, section.padding.clone());
    if style.bg_color.is_some() || style.padding.is_some() || has_content {
        full_group(cx, &inner, style)
    } else {
        inner.join("\n\n")
    }
}

fn call_to_action(cx: &ConvertContext<'_>, section: &Section) -> String {
    let align = resolve::section_align(section);
    let content = convert_items(cx, &section.content, align);

    let padding = section
        .styling
        .padding
        .clone()
        .or_else(|| section.padding.clone())
        .unwrap_or_else(|| Padding::vertical("80px"));

    full_group(
        cx,
        &content,
        BoxStyle {
            bg_color: Some(resolve::background_color(section).unwrap_or(DARK_BACKGROUND).to_string()),
            padding: Some(resolve::with_horizontal_defaults(padding, HORIZONTAL_PADDING)),
            min_height: section.min_height.map(resolve::px),
            ..Default::default()
        },
    )
}

/// `<strong>title</strong><br>meta`, either part optional.
fn gallery_caption(image: &GalleryImage) -> String {
    let mut parts = Vec::new();
    if let Some(title) = &image.caption_title {
        parts.push(format!("<strong>{}</strong>", title));
    }
    if let Some(meta) = &image.caption_meta {
        parts.push(meta.clone());
    }
    parts.join("<br>")
}

fn gallery(cx: &ConvertContext<'_>, section: &Section) -> String {
    let align = resolve::section_align(section);
    let mut inner = convert_items(cx, &section.content, align);

    if !section.images.is_empty() {
        let count = section.images.len() as u32;
        let columns = section
            .layout
            .columns
            .or(section.columns)
            .filter(|c| *c > 0)
            .unwrap_or_else(|| count.min(MAX_GALLERY_COLUMNS));
        let entries: Vec<GalleryEntry> = section
            .images
            .iter()
            .enumerate()
            .map(|(i, img)| cx.gallery_entry(img, Some(i), "Image", gallery_caption(img)))
            .collect();
        inner.push(cx.dialect.gallery(&entries, columns, true));
    } else if !section.items.is_empty() {
        let columns: Vec<String> = section
            .items
            .iter()
            .enumerate()
            .map(|(i, card)| {
                let mut children = convert_items(cx, &card.content, resolve::item_align(card.align, align));
                if children.is_empty() {
                    let (url, id) = cx.locate_image(None, &format!("gallery {}", i), Some(i), 800, 400);
                    children.push(cx.dialect.image(&ImageBlock {
                        url: &url,
                        alt: "",
                        id,
                        caption: None,
                    }));
                }
                cx.dialect.column(&children, &ColumnStyle::default())
            })
            .collect();
        inner.push(cx.dialect.columns(&columns, Some(BlockAlign::Wide)));
    }

    if inner.is_empty() {
        return String::new();
    }

    let style = section_box(section, section.padding.clone());
    if style.bg_color.is_some() || style.padding.is_some() {
        full_group(cx, &inner, style)
    } else {
        inner.join("\n\n")
    }
}

fn logo_strip(cx: &ConvertContext<'_>, section: &Section) -> String {
    let align = resolve::section_align(section);
    let mut inner = convert_items(cx, &section.content, align);

    if !section.images.is_empty() {
        let entries: Vec<GalleryEntry> = section
            .images
            .iter()
            .map(|img| cx.gallery_entry(img, None, "Logo", String::new()))
            .collect();
        let columns = (entries.len() as u32).min(MAX_LOGO_COLUMNS);
        inner.push(cx.dialect.gallery(&entries, columns, false));
    }

    if inner.is_empty() {
        return String::new();
    }

    let padding = section.padding.clone().unwrap_or_else(|| Padding::vertical("40px"));
    full_group(cx, &inner, section_box(section, Some(padding)))
}

/// Split footer items into column groups: a heading opens a new group
/// unless the current group is still empty.
pub fn partition_footer(items: &[ContentItem]) -> Vec<&[ContentItem]> {
    let mut groups = Vec::new();
    let mut start = 0;
    for (i, item) in items.iter().enumerate() {
        if item.is_heading() && i > start {
            groups.push(&items[start..i]);
            start = i;
        }
    }
    if start < items.len() {
        groups.push(&items[start..]);
    }
    groups
}

pub fn footer(cx: &ConvertContext<'_>, section: &Section) -> String {
    let align = resolve::section_align(section);
    let columns = section
        .layout
        .columns
        .or(section.columns)
        .unwrap_or(1)
        .min(MAX_FOOTER_COLUMNS) as usize;

    let inner = if columns > 1 {
        let mut groups = partition_footer(&section.content);
        while groups.len() < columns {
            groups.push(&[]);
        }
        let cols: Vec<String> = groups
            .into_iter()
            .map(|group| {
                cx.dialect
                    .column(&convert_items(cx, group, align), &ColumnStyle::default())
            })
            .collect();
        vec![cx.dialect.columns(&cols, Some(BlockAlign::Wide))]
    } else {
        convert_items(cx, &section.content, align)
    };

    let padding = resolve::with_horizontal_defaults(
        section.padding.clone().unwrap_or_else(|| Padding::vertical("60px")),
        HORIZONTAL_PADDING,
    );
    full_group(
        cx,
        &inner,
        BoxStyle {
            bg_color: Some(resolve::background_color(section).unwrap_or(DARK_BACKGROUND).to_string()),
            padding: Some(padding),
            ..Default::default()
        },
    )
}

fn text_section(cx: &ConvertContext<'_>, section: &Section) -> String {
    let content = convert_items(cx, &section.content, resolve::section_align(section));
    if content.is_empty() {
        return String::new();
    }
    let padding = section
        .padding
        .clone()
        .unwrap_or_else(|| block_padding("60px", "30px"));
    full_group(cx, &content, section_box(section, Some(padding)))
}

fn media_text(cx: &ConvertContext<'_>, section: &Section) -> String {
    let description = section.media_description.as_deref().unwrap_or("image");
    let (url, id) = cx.locate_image(None, description, None, 600, 400);
    let children = convert_items(cx, &section.content, resolve::section_align(section));

    let block = cx.dialect.media_text(
        &ImageBlock {
            url: &url,
            alt: description,
            id,
            caption: None,
        },
        &children,
        section.media_position.unwrap_or_default(),
        None,
    );

    let style = section_box(section, section.padding.clone());
    if style.bg_color.is_some() || style.padding.is_some() {
        full_group(cx, &[block], style)
    } else {
        block
    }
}

fn testimonial(cx: &ConvertContext<'_>, section: &Section) -> String {
    let mut text = section.text.as_deref().unwrap_or_default();
    let mut citation = section.citation.as_deref().unwrap_or_default();
    for item in &section.content {
        match item {
            ContentItem::Paragraph(p) if !p.text.is_empty() => text = p.text.as_str(),
            ContentItem::Heading(h) if !h.text.is_empty() => citation = h.text.as_str(),
            _ => {}
        }
    }
    if text.is_empty() && citation.is_empty() {
        return String::new();
    }

    let block = cx
        .dialect
        .testimonial(text, citation, resolve::section_align(section));
    let padding = section.padding.clone().unwrap_or_else(|| Padding::vertical("60px"));
    full_group(cx, &[block], section_box(section, Some(padding)))
}

fn contact(cx: &ConvertContext<'_>, section: &Section) -> String {
    let align = resolve::section_align(section);
    let mut fields: &[FormField] = &[];
    let mut others = Vec::new();
    for item in &section.content {
        match item {
            ContentItem::Form(form) => fields = form.fields.as_slice(),
            other => others.push(other.clone()),
        }
    }

    let mut inner = convert_items(cx, &others, align);
    inner.push(cx.dialect.form(&super::contact_form(cx.contact, fields)));

    let padding = section
        .padding
        .clone()
        .unwrap_or_else(|| block_padding("60px", "30px"));
    full_group(cx, &inner, section_box(section, Some(padding)))
}

fn map(cx: &ConvertContext<'_>, section: &Section) -> String {
    let Some(address) = section.address.as_deref().filter(|a| !a.trim().is_empty()) else {
        return String::new();
    };
    let embed = format!(
        "<div style=\"width:100%;height:400px\"><iframe src=\"https://maps.google.com/maps?q={}&amp;output=embed\" width=\"100%\" height=\"400\" style=\"border:0\" allowfullscreen loading=\"lazy\"></iframe></div>",
        urlencoding::encode(address.trim())
    );
    let unit = crate::blocks::html_block(&embed);
    full_group(cx, &[unit], section_box(section, section.padding.clone()))
}

fn generic(cx: &ConvertContext<'_>, section: &Section) -> String {
    let content = convert_items(cx, &section.content, resolve::section_align(section));
    let style = section_box(section, section.padding.clone());
    if content.is_empty() && style.bg_color.is_none() && style.padding.is_none() {
        return String::new();
    }
    full_group(cx, &content, style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::PortableDialect;
    use crate::config::ContactDefaults;
    use crate::images::ImageRegistry;
    use serde_json::json;

    fn convert(value: serde_json::Value) -> String {
        let section: Section = serde_json::from_value(value).unwrap();
        let images = ImageRegistry::new();
        let contact = ContactDefaults::default();
        let cx = ConvertContext::new(&PortableDialect, &images, &contact);
        convert_section(&cx, &section)
    }

    fn items(kinds: &str) -> Vec<ContentItem> {
        kinds
            .chars()
            .map(|c| match c {
                'H' => ContentItem::from_value(json!({"type": "heading", "text": "h"})),
                _ => ContentItem::from_value(json!({"type": "paragraph", "text": "p"})),
            })
            .collect()
    }

    #[test]
    fn test_dispatch_aliases() {
        assert_eq!(SectionKind::from_type("stats"), SectionKind::FeatureColumns);
        assert_eq!(SectionKind::from_type("call-to-action"), SectionKind::CallToAction);
        assert_eq!(SectionKind::from_type("properties-grid"), SectionKind::Gallery);
        assert_eq!(SectionKind::from_type("contact-form"), SectionKind::Contact);
        assert_eq!(SectionKind::from_type("banner"), SectionKind::Generic);
    }

    #[test]
    fn test_footer_partition_rule() {
        let content = items("HPPHP");
        let groups = partition_footer(&content);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 3);
        assert_eq!(groups[1].len(), 2);

        let content = items("PHP");
        let groups = partition_footer(&content);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 1);

        let content = items("HP");
        assert_eq!(partition_footer(&content).len(), 1);
        assert!(partition_footer(&[]).is_empty());
    }

    #[test]
    fn test_footer_pads_missing_columns() {
        let out = convert(json!({
            "type": "footer",
            "layout": {"columns": 3},
            "content": [{"type": "heading", "text": "Contact"}]
        }));
        assert_eq!(out.matches("<!-- wp:column -->").count(), 3);
        assert!(out.contains("background-color:#333333"));
    }

    #[test]
    fn test_footer_column_count_is_capped() {
        let out = convert(json!({
            "type": "footer",
            "layout": {"columns": 200000},
            "content": [{"type": "heading", "text": "Contact"}]
        }));
        assert_eq!(out.matches("<!-- wp:column -->").count(), MAX_FOOTER_COLUMNS as usize);
    }

    #[test]
    fn test_cards_without_background_get_border() {
        let out = convert(json!({
            "type": "features",
            "items": [
                {"content": [{"type": "paragraph", "text": "a"}]},
                {"content": [], "card_style": {"background_color": "#f5f5f5"}}
            ]
        }));
        assert_eq!(out.matches("border-color:#e0e0e0;border-width:1px").count(), 1);
        assert!(out.contains("background-color:#f5f5f5"));
        assert!(out.contains("padding-top:20px;padding-right:20px;padding-bottom:20px;padding-left:20px"));
    }

    #[test]
    fn test_cta_padding_defaults() {
        let out = convert(json!({"type": "cta", "content": [{"type": "heading", "text": "Go"}]}));
        assert!(out.contains("background-color:#333333;padding-top:80px;padding-right:40px;padding-bottom:80px;padding-left:40px"));
        assert!(out.contains("has-text-align-center"));
    }

    #[test]
    fn test_gallery_columns_and_captions() {
        let out = convert(json!({
            "type": "image-gallery",
            "images": [
                {"url": "a.jpg", "caption_title": "Villa", "caption_meta": "3 rooms"},
                {"url": "b.jpg"},
                {"url": "c.jpg"},
                {"url": "d.jpg"}
            ]
        }));
        assert!(out.contains("columns-3 is-cropped"));
        assert!(out.contains("<strong>Villa</strong><br>3 rooms"));
        assert!(!out.contains("wp:group"));
    }

    #[test]
    fn test_logo_strip_caps_columns() {
        let images: Vec<_> = (0..10).map(|i| json!({"url": format!("{}.png", i)})).collect();
        let out = convert(json!({"type": "logo-strip", "images": images}));
        assert!(out.contains(r#""columns":8"#));
        assert!(!out.contains("is-cropped"));
    }

    #[test]
    fn test_hero_image_background_is_cover() {
        let out = convert(json!({
            "type": "hero",
            "background": {"type": "image", "url": "https://img/h.jpg", "overlay_opacity": 54},
            "content": [{"type": "heading", "text": "Hi", "level": 1}]
        }));
        assert!(out.starts_with("<!-- wp:cover "));
        assert!(out.contains("has-background-dim-50"));
        assert!(out.contains("has-text-align-center"));
    }

    #[test]
    fn test_empty_sections_emit_nothing() {
        assert_eq!(convert(json!({"type": "generic"})), "");
        assert_eq!(convert(json!({"type": "map"})), "");
        assert_eq!(convert(json!({"type": "testimonial"})), "");
        assert_eq!(convert(json!({"type": "image-gallery"})), "");
        assert_eq!(convert(json!({"type": "text-section"})), "");
    }

    #[test]
    fn test_testimonial_content_overrides_fields() {
        let out = convert(json!({
            "type": "testimonial",
            "text": "old",
            "content": [
                {"type": "paragraph", "text": "Great service"},
                {"type": "heading", "text": "Kari"}
            ]
        }));
        assert!(out.contains("Great service"));
        assert!(out.contains("<cite>Kari</cite>"));
        assert!(!out.contains("old"));
    }

    #[test]
    fn test_map_encodes_address() {
        let out = convert(json!({"type": "map", "address": "Storgata 1, Oslo"}));
        assert!(out.contains("q=Storgata%201%2C%20Oslo&amp;output=embed"));
    }
}
