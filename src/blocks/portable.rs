//! Portable dialect: core blocks whose static HTML carries every style.
//!
//! Class lists, attribute key order and CSS property order reproduce
//! what the editor's own `save()` would produce for the same attributes.

use serde_json::{json, Value};

use super::{
    html_block, void_marker, wrap_block, BlockAlign, BlockDialect, BoxStyle, ButtonBlock,
    ColumnStyle, ContactForm, CoverStyle, DialectKind, GalleryEntry, HeadingBlock, ImageBlock,
    ParagraphBlock,
};
use crate::layout::{ButtonStyle, MediaPosition, TextAlign};
use crate::style::{class_attr, serialize_style, style_attr, Attrs, InlineStyle};

#[derive(Debug, Clone, Copy, Default)]
pub struct PortableDialect;

/// Dim modifier for the cover overlay class: nearest multiple of ten,
/// halves rounding up.
pub fn dim_class_value(ratio: u32) -> u32 {
    (ratio.min(100) + 5) / 10 * 10
}

/// Raw HTML unit hiding the host theme's header, footer and content padding.
pub fn theme_override_css() -> String {
    let css = concat!(
        ".site-header { display: none !important; }",
        " .site-footer { display: none !important; }",
        " .entry-hero-container-inner { display: none !important; }",
        " .entry-content-wrap { padding: 0 !important; max-width: 100% !important; }",
        " .wp-block-gallery:not(.is-cropped) .wp-block-image img",
        " { max-height: 60px; width: auto; object-fit: contain; }",
    );
    html_block(&format!("<style>{}</style>", css))
}

/// `attrs.style` from a box style, in the editor's nesting order.
fn box_style_attrs(style: &BoxStyle) -> Attrs {
    let mut attrs = Attrs::new();
    if let Some(bg) = &style.bg_color {
        attrs.set_nested("color", "background", bg.as_str());
    }
    if let Some(text) = &style.text_color {
        attrs.set_nested("color", "text", text.as_str());
    }
    if let Some(padding) = &style.padding {
        attrs.set_nested("spacing", "padding", padding.to_value());
    }
    if let Some(min_height) = &style.min_height {
        attrs.set_nested("dimensions", "minHeight", min_height.as_str());
    }
    if let Some(radius) = &style.border_radius {
        attrs.set_nested("border", "radius", radius.as_str());
    }
    if let Some(width) = &style.border_width {
        attrs.set_nested("border", "width", width.as_str());
    }
    if let Some(color) = &style.border_color {
        attrs.set_nested("border", "color", color.as_str());
    }
    attrs
}

/// Presence classes shared by group and column, after the base class.
fn box_presence_classes(classes: &mut Vec<String>, style: &BoxStyle) {
    if style.border_color.is_some() || style.border_width.is_some() {
        classes.push("has-border-color".into());
    }
    if style.text_color.is_some() {
        classes.push("has-text-color".into());
    }
    if style.bg_color.is_some() {
        classes.push("has-background".into());
    }
}

fn box_inline_style<'a>(style: &'a BoxStyle, flex_basis: Option<&'a str>) -> InlineStyle<'a> {
    InlineStyle {
        border_color: style.border_color.as_deref(),
        border_width: style.border_width.as_deref(),
        border_radius: style.border_radius.as_deref(),
        color: style.text_color.as_deref(),
        background_color: style.bg_color.as_deref(),
        min_height: style.min_height.as_deref(),
        padding: style.padding.as_ref(),
        font_size: None,
        flex_basis,
    }
}

/// Text color then font size under `attrs.style`.
fn text_style_attrs(color: Option<&str>, font_size: Option<&str>) -> Attrs {
    let mut style = Attrs::new();
    if let Some(color) = color {
        style.set_nested("color", "text", color);
    }
    if let Some(size) = font_size {
        style.set_nested("typography", "fontSize", size);
    }
    style
}

fn set_style(attrs: &mut Attrs, style: Attrs) {
    if !style.is_empty() {
        attrs.set("style", style);
    }
}

fn align_classes(classes: &mut Vec<String>, align: Option<TextAlign>) {
    if let Some(align) = align {
        classes.push(format!("has-text-align-{}", align.as_str()));
    }
}

impl PortableDialect {
    fn button(&self, button: &ButtonBlock<'_>) -> String {
        let mut style = Attrs::new();
        let mut outer = vec!["wp-block-button".to_string()];
        let mut link = vec!["wp-block-button__link".to_string()];

        let css = match button.style {
            ButtonStyle::Outline => {
                outer.push("is-style-outline".into());
                match button.bg_color {
                    Some(accent) => {
                        style.set_nested("border", "width", "2px");
                        style.set_nested("border", "color", accent);
                        style.set_nested("color", "text", accent);
                        link.push("has-text-color".into());
                        link.push("has-border-color".into());
                        serialize_style(&InlineStyle {
                            border_color: Some(accent),
                            border_width: Some("2px"),
                            color: Some(accent),
                            ..Default::default()
                        })
                    }
                    None => String::new(),
                }
            }
            ButtonStyle::Fill => {
                if let Some(bg) = button.bg_color {
                    style.set_nested("color", "background", bg);
                    link.push("has-background".into());
                }
                if let Some(text) = button.text_color {
                    style.set_nested("color", "text", text);
                    link.push("has-text-color".into());
                }
                if let Some(radius) = button.border_radius {
                    style.set_nested("border", "radius", radius);
                }
                serialize_style(&InlineStyle {
                    border_radius: button.border_radius,
                    color: button.text_color,
                    background_color: button.bg_color,
                    ..Default::default()
                })
            }
        };
        link.push("wp-element-button".into());

        let mut attrs = Attrs::new();
        set_style(&mut attrs, style);

        let href = button
            .url
            .map(|url| format!(" href=\"{}\"", url))
            .unwrap_or_default();
        let body = format!(
            "<div{}><a{}{}{}>{}</a></div>",
            class_attr(&outer),
            class_attr(&link),
            href,
            style_attr(&css),
            button.text
        );
        wrap_block("button", &attrs, &body)
    }

    fn figure(&self, image: &ImageBlock<'_>) -> String {
        let mut attrs = Attrs::new();
        attrs.set_opt("id", image.id);
        attrs.set("sizeSlug", "large");

        let img_class = image
            .id
            .map(|id| format!(" class=\"wp-image-{}\"", id))
            .unwrap_or_default();
        let caption = image
            .caption
            .filter(|c| !c.is_empty())
            .map(|c| format!("<figcaption class=\"wp-element-caption\">{}</figcaption>", c))
            .unwrap_or_default();
        let body = format!(
            "<figure class=\"wp-block-image size-large\"><img src=\"{}\" alt=\"{}\"{}/>{}</figure>",
            image.url,
            html_escape::encode_double_quoted_attribute(image.alt),
            img_class,
            caption
        );
        wrap_block("image", &attrs, &body)
    }
}

impl BlockDialect for PortableDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Portable
    }

    fn heading(&self, block: &HeadingBlock<'_>) -> String {
        let mut attrs = Attrs::new();
        attrs.set_opt("textAlign", block.align.map(TextAlign::as_str));
        if block.level != 2 {
            attrs.set("level", block.level);
        }
        set_style(&mut attrs, text_style_attrs(block.color, block.font_size));

        let mut classes = vec!["wp-block-heading".to_string()];
        align_classes(&mut classes, block.align);
        if block.color.is_some() {
            classes.push("has-text-color".into());
        }

        let css = serialize_style(&InlineStyle {
            color: block.color,
            font_size: block.font_size,
            ..Default::default()
        });
        let body = format!(
            "<h{level}{}{}>{}</h{level}>",
            class_attr(&classes),
            style_attr(&css),
            block.text,
            level = block.level
        );
        wrap_block("heading", &attrs, &body)
    }

    fn paragraph(&self, block: &ParagraphBlock<'_>) -> String {
        let mut attrs = Attrs::new();
        attrs.set_opt("align", block.align.map(TextAlign::as_str));
        set_style(&mut attrs, text_style_attrs(block.color, block.font_size));

        let mut classes = Vec::new();
        align_classes(&mut classes, block.align);
        if block.color.is_some() {
            classes.push("has-text-color".into());
        }

        let css = serialize_style(&InlineStyle {
            color: block.color,
            font_size: block.font_size,
            ..Default::default()
        });
        let body = format!(
            "<p{}{}>{}</p>",
            class_attr(&classes),
            style_attr(&css),
            block.text.replace('\n', "<br>")
        );
        wrap_block("paragraph", &attrs, &body)
    }

    fn image(&self, block: &ImageBlock<'_>) -> String {
        self.figure(block)
    }

    fn buttons(&self, buttons: &[ButtonBlock<'_>], align: Option<TextAlign>) -> String {
        let mut attrs = Attrs::new();
        if let Some(align) = align {
            attrs.set("layout", json!({"type": "flex", "justifyContent": align.as_str()}));
        }
        let inner: Vec<String> = buttons.iter().map(|b| self.button(b)).collect();
        let body = format!("<div class=\"wp-block-buttons\">\n{}\n</div>", inner.join("\n"));
        wrap_block("buttons", &attrs, &body)
    }

    fn list(&self, items: &[String], ordered: bool) -> String {
        let mut attrs = Attrs::new();
        if ordered {
            attrs.set("ordered", true);
        }
        let tag = if ordered { "ol" } else { "ul" };
        let entries: Vec<String> = items
            .iter()
            .map(|item| wrap_block("list-item", &Attrs::new(), &format!("<li>{}</li>", item)))
            .collect();
        let body = format!("<{tag}>\n{}\n</{tag}>", entries.join("\n"), tag = tag);
        wrap_block("list", &attrs, &body)
    }

    fn icon_list(&self, items: &[String]) -> String {
        self.list(items, false)
    }

    fn spacer(&self, height: u32) -> String {
        let mut attrs = Attrs::new();
        attrs.set("height", format!("{}px", height));
        let body = format!(
            "<div style=\"height:{}px\" aria-hidden=\"true\" class=\"wp-block-spacer\"></div>",
            height
        );
        wrap_block("spacer", &attrs, &body)
    }

    fn separator(&self) -> String {
        wrap_block(
            "separator",
            &Attrs::new(),
            "<hr class=\"wp-block-separator has-alpha-channel-opacity\"/>",
        )
    }

    fn quote(&self, text: &str, citation: Option<&str>, align: Option<TextAlign>) -> String {
        let mut attrs = Attrs::new();
        attrs.set_opt("textAlign", align.map(TextAlign::as_str));

        let mut classes = vec!["wp-block-quote".to_string()];
        align_classes(&mut classes, align);

        let cite = citation
            .filter(|c| !c.is_empty())
            .map(|c| format!("<cite>{}</cite>", c))
            .unwrap_or_default();
        let paragraph = self.paragraph(&ParagraphBlock {
            text,
            color: None,
            font_size: None,
            align: None,
        });
        let body = format!("<blockquote{}>\n{}{}\n</blockquote>", class_attr(&classes), paragraph, cite);
        wrap_block("quote", &attrs, &body)
    }

    fn testimonial(&self, text: &str, name: &str, align: Option<TextAlign>) -> String {
        let citation = Some(name).filter(|n| !n.is_empty());
        self.quote(text, citation, align)
    }

    fn gallery(&self, images: &[GalleryEntry], columns: u32, crop: bool) -> String {
        let mut attrs = Attrs::new();
        attrs.set("columns", columns).set("linkTo", "none");
        if crop {
            attrs.set("imageCrop", true);
        }

        let mut classes = vec![
            "wp-block-gallery".to_string(),
            "has-nested-images".to_string(),
            format!("columns-{}", columns),
        ];
        if crop {
            classes.push("is-cropped".into());
        }

        let inner: Vec<String> = images
            .iter()
            .map(|entry| {
                self.figure(&ImageBlock {
                    url: &entry.url,
                    alt: &entry.alt,
                    id: entry.id,
                    caption: Some(entry.caption.as_str()),
                })
            })
            .collect();
        let body = format!("<figure{}>\n{}\n</figure>", class_attr(&classes), inner.join("\n\n"));
        wrap_block("gallery", &attrs, &body)
    }

    /// Forms need the page-builder dialect; core blocks have none.
    fn form(&self, _form: &ContactForm) -> String {
        "<!-- form: no core block -->".to_string()
    }

    fn media_text(
        &self,
        media: &ImageBlock<'_>,
        children: &[String],
        position: MediaPosition,
        align: Option<BlockAlign>,
    ) -> String {
        const MEDIA_WIDTH: u32 = 50;

        let mut attrs = Attrs::new();
        attrs
            .set("mediaType", "image")
            .set(
                "mediaPosition",
                match position {
                    MediaPosition::Left => "left",
                    MediaPosition::Right => "right",
                },
            )
            .set("mediaUrl", media.url)
            .set("mediaWidth", MEDIA_WIDTH);
        attrs.set_opt("mediaId", media.id);
        attrs.set_opt("align", align.map(BlockAlign::as_str));

        let mut classes = vec!["wp-block-media-text".to_string()];
        if let Some(align) = align {
            classes.push(format!("align{}", align.as_str()));
        }
        let grid = match position {
            MediaPosition::Left => format!("{}% auto", MEDIA_WIDTH),
            MediaPosition::Right => {
                classes.push("has-media-on-the-right".into());
                format!("auto {}%", MEDIA_WIDTH)
            }
        };
        let img_class = media
            .id
            .map(|id| format!(" class=\"wp-image-{} size-full\"", id))
            .unwrap_or_default();

        let body = format!(
            "<div{} style=\"grid-template-columns:{}\"><figure class=\"wp-block-media-text__media\"><img src=\"{}\" alt=\"{}\"{}/></figure><div class=\"wp-block-media-text__content\">\n{}\n</div></div>",
            class_attr(&classes),
            grid,
            media.url,
            html_escape::encode_double_quoted_attribute(media.alt),
            img_class,
            children.join("\n")
        );
        wrap_block("media-text", &attrs, &body)
    }

    fn group(&self, children: &[String], style: &BoxStyle, align: Option<BlockAlign>) -> String {
        let mut attrs = Attrs::new();
        attrs.set("layout", json!({"type": "constrained"}));
        attrs.set_opt("align", align.map(BlockAlign::as_str));
        set_style(&mut attrs, box_style_attrs(style));

        let mut classes = vec!["wp-block-group".to_string()];
        if let Some(align) = align {
            classes.push(format!("align{}", align.as_str()));
        }
        box_presence_classes(&mut classes, style);

        let css = serialize_style(&box_inline_style(style, None));
        let body = format!(
            "<div{}{}>\n{}\n</div>",
            class_attr(&classes),
            style_attr(&css),
            children.join("\n")
        );
        wrap_block("group", &attrs, &body)
    }

    fn columns(&self, columns: &[String], align: Option<BlockAlign>) -> String {
        let mut attrs = Attrs::new();
        attrs.set_opt("align", align.map(BlockAlign::as_str));

        let mut classes = vec!["wp-block-columns".to_string()];
        if let Some(align) = align {
            classes.push(format!("align{}", align.as_str()));
        }
        let body = format!("<div{}>\n{}\n</div>", class_attr(&classes), columns.join("\n"));
        wrap_block("columns", &attrs, &body)
    }

    fn column(&self, children: &[String], style: &ColumnStyle) -> String {
        let mut attrs = Attrs::new();
        attrs.set_opt("width", style.width.as_deref());
        set_style(&mut attrs, box_style_attrs(&style.frame));

        let mut classes = vec!["wp-block-column".to_string()];
        box_presence_classes(&mut classes, &style.frame);

        let css = serialize_style(&box_inline_style(&style.frame, style.width.as_deref()));
        let body = format!(
            "<div{}{}>\n{}\n</div>",
            class_attr(&classes),
            style_attr(&css),
            children.join("\n")
        );
        wrap_block("column", &attrs, &body)
    }

    fn cover(&self, children: &[String], cover: &CoverStyle) -> String {
        let dim_ratio = cover.dim_ratio.min(100);

        let mut attrs = Attrs::new();
        attrs.set_opt("url", cover.image_url.as_deref());
        attrs.set("dimRatio", dim_ratio);
        attrs.set_opt("customOverlayColor", cover.overlay_color.as_deref());
        attrs.set("minHeight", cover.min_height);
        attrs.set("isDark", true);
        attrs.set_opt("align", cover.align.map(BlockAlign::as_str));

        let mut classes = vec!["wp-block-cover".to_string()];
        if let Some(align) = cover.align {
            classes.push(format!("align{}", align.as_str()));
        }
        classes.push("is-dark".into());

        let img = cover
            .image_url
            .as_deref()
            .map(|url| {
                format!(
                    "<img class=\"wp-block-cover__image-background\" alt=\"\" src=\"{}\" data-object-fit=\"cover\"/>",
                    url
                )
            })
            .unwrap_or_default();
        let overlay_css = serialize_style(&InlineStyle {
            background_color: cover.overlay_color.as_deref(),
            ..Default::default()
        });
        let body = format!(
            "<div{} style=\"min-height:{}px\">{}<span aria-hidden=\"true\" class=\"wp-block-cover__background has-background-dim-{} has-background-dim\"{}></span><div class=\"wp-block-cover__inner-container\">\n{}\n</div></div>",
            class_attr(&classes),
            cover.min_height,
            img,
            dim_class_value(dim_ratio),
            style_attr(&overlay_css),
            children.join("\n")
        );
        wrap_block("cover", &attrs, &body)
    }

    fn placeholder_image(&self, description: &str, width: u32, height: u32) -> String {
        let label: String = description
            .replace(['\'', '"', '<', '>'], "")
            .replace('&', "and")
            .chars()
            .take(60)
            .collect();
        format!(
            "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}'%3E%3Crect fill='%23ccc' width='{w}' height='{h}'/%3E%3Ctext x='50%25' y='50%25' text-anchor='middle' fill='%23666' font-size='20'%3E{label}%3C/text%3E%3C/svg%3E",
            w = width,
            h = height,
            label = label
        )
    }
}

/// Self-closing reference to a reusable block.
pub fn block_reference(id: u64) -> String {
    let mut attrs = Attrs::new();
    attrs.set("ref", Value::from(id));
    void_marker("block", &attrs)
}
