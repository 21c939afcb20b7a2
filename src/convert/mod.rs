//! Layout-to-Block Conversion
//!
//! One item-level converter shared by every section archetype. Converters
//! only see [`BlockDialect`], never a concrete dialect.

pub mod resolve;
pub mod sections;

pub use sections::{convert_section, partition_footer, SectionKind};

use log::trace;

use crate::blocks::{
    BlockAlign, BlockDialect, ButtonBlock, ColumnStyle, ContactForm, FormFieldSpec, GalleryEntry,
    HeadingBlock, ImageBlock, ParagraphBlock,
};
use crate::config::ContactDefaults;
use crate::images::ImageRegistry;
use crate::layout::{ContentItem, FormField, GalleryImage, TextAlign};

/// Default spacer height in px.
pub const DEFAULT_SPACER_HEIGHT: u32 = 40;
/// Nested galleries never spread wider than this.
pub const MAX_NESTED_GALLERY_COLUMNS: u32 = 6;

/// Read-only inputs shared by one compile run.
#[derive(Clone, Copy)]
pub struct ConvertContext<'a> {
    pub dialect: &'a dyn BlockDialect,
    pub images: &'a ImageRegistry,
    pub contact: &'a ContactDefaults,
}

impl<'a> ConvertContext<'a> {
    pub fn new(
        dialect: &'a dyn BlockDialect,
        images: &'a ImageRegistry,
        contact: &'a ContactDefaults,
    ) -> Self {
        Self {
            dialect,
            images,
            contact,
        }
    }

    /// Source for an image: explicit URL, then registry, then placeholder.
    pub fn locate_image(
        &self,
        url: Option<&str>,
        description: &str,
        index: Option<usize>,
        width: u32,
        height: u32,
    ) -> (String, Option<u64>) {
        if let Some(url) = url {
            return (url.to_string(), None);
        }
        match self.images.resolve(description, index) {
            Some(found) => (found.url.clone(), found.id),
            None => (self.dialect.placeholder_image(description, width, height), None),
        }
    }

    pub fn gallery_entry(
        &self,
        image: &GalleryImage,
        index: Option<usize>,
        default_alt: &str,
        caption: String,
    ) -> GalleryEntry {
        let alt = image
            .alt
            .as_deref()
            .or(image.description.as_deref())
            .unwrap_or(default_alt);
        let (url, id) = self.locate_image(
            image.url.as_deref(),
            alt,
            index,
            image.width.unwrap_or(600),
            image.height.unwrap_or(400),
        );
        GalleryEntry {
            url,
            alt: alt.to_string(),
            caption,
            id,
        }
    }
}

/// Convert one content item. `inherited` is the section's effective
/// alignment; the item's own alignment, when present, wins.
pub fn convert_item(cx: &ConvertContext<'_>, item: &ContentItem, inherited: Option<TextAlign>) -> String {
    trace!("item `{}`", item.kind());
    let dialect = cx.dialect;

    match item {
        ContentItem::Heading(h) => dialect.heading(&HeadingBlock {
            text: &h.text,
            level: h.level.filter(|l| (1..=6).contains(l)).unwrap_or(2),
            color: h.color.as_deref(),
            font_size: h.font_size.as_deref(),
            align: resolve::item_align(h.align, inherited),
            font_weight: h.font_weight.as_deref(),
        }),

        ContentItem::Paragraph(p) => dialect.paragraph(&ParagraphBlock {
            text: &p.text,
            color: p.color.as_deref(),
            font_size: p.font_size.as_deref(),
            align: resolve::item_align(p.align, inherited),
        }),

        ContentItem::Image(img) => {
            let alt = img.alt.as_deref().unwrap_or_default();
            let description = if alt.is_empty() { "Image" } else { alt };
            let (url, id) = cx.locate_image(
                img.url.as_deref(),
                description,
                None,
                img.width.unwrap_or(800),
                img.height.unwrap_or(400),
            );
            dialect.image(&ImageBlock {
                url: &url,
                alt,
                id,
                caption: None,
            })
        }

        ContentItem::Buttons(b) => {
            let buttons: Vec<ButtonBlock<'_>> = b
                .items
                .iter()
                .map(|button| ButtonBlock {
                    text: &button.text,
                    url: button.url.as_deref(),
                    bg_color: button.bg_color.as_deref(),
                    text_color: button.text_color.as_deref(),
                    style: button.style,
                    border_radius: button.border_radius.as_deref(),
                })
                .collect();
            dialect.buttons(&buttons, resolve::item_align(b.align, inherited))
        }

        ContentItem::List(list) => dialect.list(&list.items, list.ordered),
        ContentItem::IconList(list) => dialect.icon_list(&list.items),
        ContentItem::Spacer(s) => dialect.spacer(s.height.unwrap_or(DEFAULT_SPACER_HEIGHT)),
        ContentItem::Separator => dialect.separator(),

        ContentItem::Quote(q) => dialect.quote(
            &q.text,
            q.citation.as_deref(),
            resolve::item_align(q.align, inherited),
        ),

        ContentItem::Columns(nested) => {
            let columns: Vec<String> = nested
                .items
                .iter()
                .map(|card| {
                    let inner = convert_items(cx, &card.content, resolve::item_align(card.align, inherited));
                    dialect.column(&inner, &ColumnStyle::default())
                })
                .collect();
            dialect.columns(&columns, Some(BlockAlign::Wide))
        }

        ContentItem::ImageGallery(gallery) => {
            if gallery.images.is_empty() {
                return String::new();
            }
            let entries: Vec<GalleryEntry> = gallery
                .images
                .iter()
                .map(|img| cx.gallery_entry(img, None, "Image", String::new()))
                .collect();
            let columns = (entries.len() as u32).min(MAX_NESTED_GALLERY_COLUMNS);
            dialect.gallery(&entries, columns, true)
        }

        ContentItem::Form(form) => dialect.form(&contact_form(cx.contact, &form.fields)),

        ContentItem::Unknown(kind) => dialect.unknown(kind),
    }
}

/// Convert a sequence, dropping items that produced nothing.
pub fn convert_items(
    cx: &ConvertContext<'_>,
    items: &[ContentItem],
    inherited: Option<TextAlign>,
) -> Vec<String> {
    items
        .iter()
        .map(|item| convert_item(cx, item, inherited))
        .filter(|unit| !unit.is_empty())
        .collect()
}

/// Normalise layout form fields; an empty list takes the configured defaults.
pub fn contact_form(defaults: &ContactDefaults, fields: &[FormField]) -> ContactForm {
    let source = if fields.is_empty() {
        defaults.fields.as_slice()
    } else {
        fields
    };

    let fields = source
        .iter()
        .map(|field| {
            let kind = match field.kind.as_str() {
                "tel" | "" => "text",
                other => other,
            };
            FormFieldSpec {
                label: field.label.clone(),
                kind: kind.to_string(),
                required: field.required,
                width: if kind == "textarea" { 100 } else { 50 },
            }
        })
        .collect();

    ContactForm {
        fields,
        email: defaults.email.clone(),
        subject: defaults.subject.clone(),
        submit_label: defaults.submit_label.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::PortableDialect;
    use crate::images::RegisteredImage;
    use serde_json::json;

    fn item(value: serde_json::Value) -> ContentItem {
        ContentItem::from_value(value)
    }

    #[test]
    fn test_inherited_align_fills_gaps_only() {
        let images = ImageRegistry::new();
        let contact = ContactDefaults::default();
        let cx = ConvertContext::new(&PortableDialect, &images, &contact);

        let inherited = convert_item(&cx, &item(json!({"type": "paragraph", "text": "a"})), Some(TextAlign::Center));
        assert!(inherited.contains("has-text-align-center"));

        let own = convert_item(
            &cx,
            &item(json!({"type": "paragraph", "text": "a", "align": "left"})),
            Some(TextAlign::Center),
        );
        assert!(own.contains("has-text-align-left"));
        assert!(!own.contains("has-text-align-center"));
    }

    #[test]
    fn test_out_of_range_heading_level() {
        let images = ImageRegistry::new();
        let contact = ContactDefaults::default();
        let cx = ConvertContext::new(&PortableDialect, &images, &contact);
        let out = convert_item(&cx, &item(json!({"type": "heading", "text": "x", "level": 9})), None);
        assert!(out.contains("<h2 "));
    }

    #[test]
    fn test_image_prefers_registry_over_placeholder() {
        let images: ImageRegistry = vec![RegisteredImage {
            url: "https://cdn.example.com/villa.jpg".into(),
            id: Some(12),
            filename: "villa-front.jpg".into(),
            original_index: None,
        }]
        .into_iter()
        .collect();
        let contact = ContactDefaults::default();
        let cx = ConvertContext::new(&PortableDialect, &images, &contact);

        let found = convert_item(&cx, &item(json!({"type": "image", "alt": "Villa front"})), None);
        assert!(found.contains(r#"src="https://cdn.example.com/villa.jpg""#));
        assert!(found.contains("wp-image-12"));

        let missing = convert_item(&cx, &item(json!({"type": "image", "alt": "Cabin"})), None);
        assert!(missing.contains("data:image/svg+xml"));
    }

    #[test]
    fn test_empty_nested_gallery_emits_nothing() {
        let images = ImageRegistry::new();
        let contact = ContactDefaults::default();
        let cx = ConvertContext::new(&PortableDialect, &images, &contact);
        let units = convert_items(
            &cx,
            &[item(json!({"type": "image-gallery", "images": []})), item(json!({"type": "separator"}))],
            None,
        );
        assert_eq!(units.len(), 1);
    }

    #[test]
    fn test_contact_form_normalises_fields() {
        let defaults = ContactDefaults::default();
        let form = contact_form(
            &defaults,
            &[FormField::new("Phone", "tel", false), FormField::new("Message", "textarea", true)],
        );
        assert_eq!(form.fields[0].kind, "text");
        assert_eq!(form.fields[0].width, 50);
        assert_eq!(form.fields[1].width, 100);

        let fallback = contact_form(&defaults, &[]);
        assert_eq!(fallback.fields.len(), defaults.fields.len());
        assert_eq!(fallback.submit_label, "Send message");
    }
}
