//! Native-extension dialect: page-builder blocks rendered by the host.
//!
//! Most units are a start marker with an attribute payload and at most a
//! thin structural shell; the host's server-side renderer owns the visual
//! result, so nothing here tries to reproduce styling in the static body.
//!
//! Every builder takes an optional `uniqueID`. When none is given one is
//! minted from the dialect's [`IdMinter`].

use serde_json::{json, Value};

use super::{
    void_marker, wrap_block, BlockAlign, BlockDialect, BoxStyle, ButtonBlock, ColumnStyle,
    ContactForm, CoverStyle, DialectKind, GalleryEntry, HeadingBlock, ImageBlock, ParagraphBlock,
    PortableDialect,
};
use crate::ids::{IdMinter, RandomIds};
use crate::layout::{ButtonStyle, MediaPosition, Padding, Side, TextAlign};
use crate::style::{parse_px, Attrs};

/// Icon used for icon-list entries that name none.
pub const DEFAULT_LIST_ICON: &str = "fe_check";

/// Row layout parameters. `columns` and `col_layout` are always written.
#[derive(Debug, Clone, Default)]
pub struct RowLayout<'a> {
    pub columns: usize,
    pub col_layout: &'a str,
    pub bg_color: Option<&'a str>,
    pub bg_img: Option<&'a str>,
    /// 0.0-1.0
    pub overlay_opacity: Option<f64>,
    pub overlay_color: Option<&'a str>,
    pub padding: Option<&'a Padding>,
    pub min_height: Option<u32>,
    pub align: Option<BlockAlign>,
    pub vertical_align: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct NativeDialect<M: IdMinter = RandomIds> {
    ids: M,
}

impl NativeDialect<RandomIds> {
    pub fn new() -> Self {
        Self { ids: RandomIds }
    }
}

impl Default for NativeDialect<RandomIds> {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// `[v, "", ""]`: desktop value, tablet and mobile inherit.
fn responsive(value: impl Into<Value>) -> Value {
    json!([value.into(), "", ""])
}

fn set_padding(attrs: &mut Attrs, padding: &Padding) {
    for (side, key) in [
        (Side::Top, "topPadding"),
        (Side::Bottom, "bottomPadding"),
        (Side::Left, "leftPadding"),
        (Side::Right, "rightPadding"),
    ] {
        attrs.set_opt(key, padding.get(side).and_then(parse_px));
    }
}

impl<M: IdMinter> NativeDialect<M> {
    pub fn with_minter(ids: M) -> Self {
        Self { ids }
    }

    fn uid(&self, given: Option<&str>, prefix: &str) -> String {
        match given {
            Some(id) => id.to_string(),
            None => self.ids.mint(prefix),
        }
    }

    pub fn row_layout(&self, inner: &[String], row: &RowLayout<'_>, unique_id: Option<&str>) -> String {
        let uid = self.uid(unique_id, "r");
        let mut attrs = Attrs::new();
        attrs
            .set("uniqueID", uid.as_str())
            .set("columns", row.columns)
            .set("colLayout", row.col_layout);
        attrs.set_opt("bgColor", row.bg_color);
        if let Some(img) = row.bg_img {
            attrs.set(
                "bgImg",
                json!([{"bgImg": img, "bgImgSize": "cover", "bgImgPosition": "center center"}]),
            );
        }
        attrs.set_opt("overlayOpacity", row.overlay_opacity);
        attrs.set_opt("overlay", row.overlay_color);
        if let Some(padding) = row.padding {
            set_padding(&mut attrs, padding);
        }
        if let Some(min_height) = row.min_height {
            attrs.set("minHeight", min_height).set("minHeightUnit", "px");
        }
        attrs.set_opt("align", row.align.map(BlockAlign::as_str));
        attrs.set_opt("verticalAlignment", row.vertical_align);

        wrap_block("kadence/rowlayout", &attrs, &inner.join("\n"))
    }

    pub fn kb_column(&self, inner: &[String], style: &ColumnStyle, unique_id: Option<&str>) -> String {
        let uid = self.uid(unique_id, "c");
        let frame = &style.frame;

        let mut attrs = Attrs::new();
        attrs.set("uniqueID", uid.as_str()).set("id", 1);
        attrs.set_opt("background", frame.bg_color.as_deref());
        attrs.set_opt("textColor", frame.text_color.as_deref());
        if let Some(align) = style.text_align {
            attrs.set("textAlign", responsive(align.as_str()));
        }
        if let Some(padding) = &frame.padding {
            set_padding(&mut attrs, padding);
        }
        attrs.set_opt("border", frame.border_color.as_deref());
        if let Some(width) = frame.border_width.as_deref().and_then(parse_px) {
            attrs.set("borderWidth", json!([width, width, width, width]));
        }
        if let Some(radius) = frame.border_radius.as_deref().and_then(parse_px) {
            attrs.set("borderRadius", json!([radius, radius, radius, radius]));
        }

        let body = format!(
            "<div class=\"wp-block-kadence-column kadence-column{}\"><div class=\"kt-inside-inner-col\">{}</div></div>",
            uid,
            inner.join("\n")
        );
        wrap_block("kadence/column", &attrs, &body)
    }

    pub fn adv_heading(&self, block: &HeadingBlock<'_>, unique_id: Option<&str>) -> String {
        let uid = self.uid(unique_id, "h");
        let mut attrs = Attrs::new();
        attrs.set("uniqueID", uid.as_str()).set("level", block.level);
        attrs.set_opt("color", block.color);
        if let Some(size) = block.font_size.and_then(parse_px) {
            attrs.set("fontSize", responsive(size));
        }
        attrs.set_opt("align", block.align.map(TextAlign::as_str));
        attrs.set_opt("fontWeight", block.font_weight);

        let body = format!(
            "<h{level} class=\"kt-adv-heading{uid} wp-block-kadence-advancedheading\" data-kb-block=\"kb-adv-heading{uid}\">{}</h{level}>",
            escape(block.text),
            level = block.level,
            uid = uid
        );
        wrap_block("kadence/advancedheading", &attrs, &body)
    }

    /// Button group; each button is a self-closing single-button unit.
    pub fn adv_btn(
        &self,
        buttons: &[ButtonBlock<'_>],
        align: Option<TextAlign>,
        unique_id: Option<&str>,
    ) -> String {
        let uid = self.uid(unique_id, "b");

        let singles: Vec<String> = buttons
            .iter()
            .map(|button| {
                let mut attrs = Attrs::new();
                attrs
                    .set("uniqueID", self.ids.mint("sb"))
                    .set("text", button.text);
                attrs.set_opt("link", button.url);
                attrs.set_opt("color", button.text_color);
                attrs.set_opt("background", button.bg_color);
                if let Some(radius) = button.border_radius.and_then(parse_px) {
                    attrs.set("borderRadius", json!([radius, radius, radius, radius]));
                }
                if button.style == ButtonStyle::Outline {
                    attrs.set("inheritStyles", "outline");
                }
                void_marker("kadence/singlebtn", &attrs)
            })
            .collect();

        let mut attrs = Attrs::new();
        attrs.set("uniqueID", uid.as_str());
        attrs.set_opt("hAlign", align.map(TextAlign::as_str));

        let align_class = align
            .map(|a| format!(" kt-btn-align-{}", a.as_str()))
            .unwrap_or_default();
        let body = format!(
            "<div class=\"wp-block-kadence-advancedbtn kb-buttons-wrap kb-btns{uid}{} kt-btns-wrap kt-btns{uid}\">\n{}\n</div>",
            align_class,
            singles.join("\n"),
            uid = uid
        );
        wrap_block("kadence/advancedbtn", &attrs, &body)
    }

    pub fn kb_spacer(&self, height: u32, unique_id: Option<&str>) -> String {
        let mut attrs = Attrs::new();
        attrs
            .set("uniqueID", self.uid(unique_id, "s"))
            .set("spacerHeight", height);
        void_marker("kadence/spacer", &attrs)
    }

    pub fn kb_image(&self, image: &ImageBlock<'_>, unique_id: Option<&str>) -> String {
        let uid = self.uid(unique_id, "i");
        let mut attrs = Attrs::new();
        attrs.set("uniqueID", uid.as_str()).set("imgLink", image.url);
        attrs.set_opt("id", image.id);

        let body = format!(
            "<figure class=\"wp-block-kadence-image kb-image{}\"><img src=\"{}\" alt=\"{}\" class=\"kb-img\"/></figure>",
            uid,
            image.url,
            html_escape::encode_double_quoted_attribute(image.alt)
        );
        wrap_block("kadence/image", &attrs, &body)
    }

    /// One card per `(text, name)` pair.
    pub fn testimonials(&self, entries: &[(&str, &str)], unique_id: Option<&str>) -> String {
        let cards: Vec<Value> = entries
            .iter()
            .map(|(text, name)| {
                json!({"content": text, "name": name, "title": "", "icon": "star", "rating": 5})
            })
            .collect();
        let columns = 1;

        let mut attrs = Attrs::new();
        attrs
            .set("uniqueID", self.uid(unique_id, "t"))
            .set("testimonials", cards)
            .set("columns", json!([columns, columns, 1]))
            .set("style", "card");
        void_marker("kadence/testimonials", &attrs)
    }

    pub fn kb_icon_list(&self, items: &[String], unique_id: Option<&str>) -> String {
        let entries: Vec<Value> = items
            .iter()
            .map(|text| json!({"icon": DEFAULT_LIST_ICON, "text": text}))
            .collect();
        let mut attrs = Attrs::new();
        attrs
            .set("uniqueID", self.uid(unique_id, "il"))
            .set("items", entries);
        void_marker("kadence/iconlist", &attrs)
    }

    pub fn form_block(&self, form: &ContactForm, unique_id: Option<&str>) -> String {
        let fields: Vec<Value> = form
            .fields
            .iter()
            .map(|f| {
                json!({
                    "label": f.label,
                    "type": f.kind,
                    "required": f.required,
                    "width": responsive(f.width.to_string()),
                })
            })
            .collect();

        let mut email = Attrs::new();
        email.set_opt("emailTo", form.email.as_deref());
        email.set("subject", form.subject.as_str());

        let mut attrs = Attrs::new();
        attrs
            .set("uniqueID", self.uid(unique_id, "f"))
            .set("fields", fields)
            .set("email", json!([Value::from(email)]))
            .set("submit", json!([{"label": form.submit_label}]))
            .set("actions", json!(["email"]));
        void_marker("kadence/form", &attrs)
    }

    /// A single full-width row holding one column.
    fn single_row(&self, children: &[String], row: RowLayout<'_>, column: &ColumnStyle) -> String {
        let col = self.kb_column(children, column, None);
        self.row_layout(&[col], &RowLayout { columns: 1, ..row }, None)
    }
}

impl<M: IdMinter> BlockDialect for NativeDialect<M> {
    fn kind(&self) -> DialectKind {
        DialectKind::Native
    }

    fn heading(&self, block: &HeadingBlock<'_>) -> String {
        self.adv_heading(block, None)
    }

    fn paragraph(&self, block: &ParagraphBlock<'_>) -> String {
        let text = escape(block.text);
        PortableDialect.paragraph(&ParagraphBlock { text: &text, ..*block })
    }

    fn image(&self, block: &ImageBlock<'_>) -> String {
        self.kb_image(block, None)
    }

    fn buttons(&self, buttons: &[ButtonBlock<'_>], align: Option<TextAlign>) -> String {
        self.adv_btn(buttons, align, None)
    }

    fn list(&self, items: &[String], ordered: bool) -> String {
        let escaped: Vec<String> = items.iter().map(|i| escape(i)).collect();
        PortableDialect.list(&escaped, ordered)
    }

    fn icon_list(&self, items: &[String]) -> String {
        self.kb_icon_list(items, None)
    }

    fn spacer(&self, height: u32) -> String {
        self.kb_spacer(height, None)
    }

    fn separator(&self) -> String {
        PortableDialect.separator()
    }

    fn quote(&self, text: &str, citation: Option<&str>, align: Option<TextAlign>) -> String {
        let citation = citation.map(escape);
        PortableDialect.quote(&escape(text), citation.as_deref(), align)
    }

    fn testimonial(&self, text: &str, name: &str, _align: Option<TextAlign>) -> String {
        self.testimonials(&[(text, name)], None)
    }

    fn gallery(&self, images: &[GalleryEntry], columns: u32, _crop: bool) -> String {
        let cols: Vec<String> = images
            .iter()
            .map(|entry| {
                let image = self.kb_image(
                    &ImageBlock {
                        url: &entry.url,
                        alt: &entry.alt,
                        id: entry.id,
                        caption: None,
                    },
                    None,
                );
                self.kb_column(&[image], &ColumnStyle::default(), None)
            })
            .collect();
        self.row_layout(
            &cols,
            &RowLayout {
                columns: columns as usize,
                col_layout: "equal",
                ..Default::default()
            },
            None,
        )
    }

    fn form(&self, form: &ContactForm) -> String {
        self.form_block(form, None)
    }

    fn media_text(
        &self,
        media: &ImageBlock<'_>,
        children: &[String],
        position: MediaPosition,
        align: Option<BlockAlign>,
    ) -> String {
        let image_col = self.kb_column(&[self.kb_image(media, None)], &ColumnStyle::default(), None);
        let text_col = self.kb_column(children, &ColumnStyle::default(), None);
        let cols = match position {
            MediaPosition::Left => [image_col, text_col],
            MediaPosition::Right => [text_col, image_col],
        };
        self.row_layout(
            &cols,
            &RowLayout {
                columns: 2,
                col_layout: "equal",
                align,
                ..Default::default()
            },
            None,
        )
    }

    fn group(&self, children: &[String], style: &BoxStyle, align: Option<BlockAlign>) -> String {
        let column = ColumnStyle {
            width: None,
            text_align: None,
            frame: BoxStyle {
                bg_color: None,
                padding: None,
                min_height: None,
                ..style.clone()
            },
        };
        self.single_row(
            children,
            RowLayout {
                col_layout: "equal",
                bg_color: style.bg_color.as_deref(),
                padding: style.padding.as_ref(),
                min_height: style.min_height.as_deref().and_then(parse_px),
                align,
                ..Default::default()
            },
            &column,
        )
    }

    fn columns(&self, columns: &[String], align: Option<BlockAlign>) -> String {
        self.row_layout(
            columns,
            &RowLayout {
                columns: columns.len(),
                col_layout: "equal",
                align,
                ..Default::default()
            },
            None,
        )
    }

    fn column(&self, children: &[String], style: &ColumnStyle) -> String {
        self.kb_column(children, style, None)
    }

    fn cover(&self, children: &[String], cover: &CoverStyle) -> String {
        self.single_row(
            children,
            RowLayout {
                col_layout: "equal",
                bg_img: cover.image_url.as_deref(),
                overlay_opacity: Some(f64::from(cover.dim_ratio.min(100)) / 100.0),
                overlay_color: cover.overlay_color.as_deref(),
                min_height: Some(cover.min_height),
                align: cover.align,
                vertical_align: Some("middle"),
                ..Default::default()
            },
            &ColumnStyle::default(),
        )
    }

    fn placeholder_image(&self, description: &str, width: u32, height: u32) -> String {
        let label: String = description.chars().take(40).collect::<String>().replace('"', "'");
        let svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\"><rect width=\"100%\" height=\"100%\" fill=\"#e0e0e0\"/><text x=\"50%\" y=\"50%\" dominant-baseline=\"middle\" text-anchor=\"middle\" font-family=\"Arial,sans-serif\" font-size=\"16\" fill=\"#666\">{label}</text></svg>",
            w = width,
            h = height,
            label = escape(&label)
        );
        format!("data:image/svg+xml,{}", urlencoding::encode(&svg))
    }
}
