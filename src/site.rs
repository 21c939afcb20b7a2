//! Site Glue
//!
//! Page roles, per-role page settings, SEO metadata, and the header and
//! footer units shared by every published page.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::blocks::native::RowLayout;
use crate::blocks::{portable, ButtonBlock, ColumnStyle, HeadingBlock, NativeDialect};
use crate::compiler::{build_page_content, CompileError};
use crate::ids::IdMinter;
use crate::images::ImageRegistry;
use crate::layout::{ButtonStyle, ContentItem, LayoutDocument, Padding, Side, TextAlign};

/// SEO descriptions are cut to this many characters.
pub const SEO_DESCRIPTION_LIMIT: usize = 160;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageRole {
    Frontpage,
    About,
    Properties,
    SingleProperty,
    Contact,
    #[default]
    Generic,
}

impl PageRole {
    /// Roles that appear in the site navigation, in menu order.
    pub const NAVIGATION: [PageRole; 4] = [
        PageRole::Frontpage,
        PageRole::About,
        PageRole::Properties,
        PageRole::Contact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Frontpage => "frontpage",
            Self::About => "about",
            Self::Properties => "properties",
            Self::SingleProperty => "single_property",
            Self::Contact => "contact",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for PageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frontpage" => Ok(Self::Frontpage),
            "about" => Ok(Self::About),
            "properties" => Ok(Self::Properties),
            "single_property" => Ok(Self::SingleProperty),
            "contact" => Ok(Self::Contact),
            "generic" => Ok(Self::Generic),
            other => Err(format!("unknown page role: {}", other)),
        }
    }
}

/// Title, slug and menu placement of a published page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    pub title: String,
    pub slug: String,
    pub menu_order: u32,
    pub is_front_page: bool,
}

impl PageConfig {
    /// Fixed settings per role; generic pages take their title from the
    /// layout and derive the slug from it.
    pub fn for_role(role: PageRole, page_title: Option<&str>) -> Self {
        let fixed = |title: &str, slug: &str, menu_order: u32| Self {
            title: title.to_string(),
            slug: slug.to_string(),
            menu_order,
            is_front_page: false,
        };

        match role {
            PageRole::Frontpage => Self {
                is_front_page: true,
                ..fixed("Home", "home", 0)
            },
            PageRole::About => fixed("About us", "about-us", 1),
            PageRole::Properties => fixed("Our properties", "our-properties", 2),
            PageRole::SingleProperty => fixed("Property", "property", 3),
            PageRole::Contact => fixed("Contact us", "contact-us", 4),
            PageRole::Generic => {
                let title = page_title.filter(|t| !t.trim().is_empty()).unwrap_or("Page");
                Self {
                    title: title.to_string(),
                    slug: slugify(title),
                    menu_order: 0,
                    is_front_page: false,
                }
            }
        }
    }
}

/// Lowercase, hyphen-separated, Nordic letters transliterated.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().to_lowercase().chars() {
        match c {
            'æ' => slug.push_str("ae"),
            'ø' => slug.push('o'),
            'å' => slug.push('a'),
            c if c.is_whitespace() => slug.push('-'),
            c if c.is_ascii_alphanumeric() || c == '-' => slug.push(c),
            _ => {}
        }
    }
    slug
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoMeta {
    pub title: String,
    pub description: String,
}

/// Title from the page title or the first heading near the top of the
/// page; description from the first paragraph there.
pub fn generate_seo_meta(doc: &LayoutDocument, role: PageRole, project: &str) -> SeoMeta {
    let mut title = doc
        .page_title
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    let mut description: Option<String> = None;

    let leading = doc
        .sections
        .iter()
        .take(3)
        .filter(|s| s.kind != "footer");
    for item in leading.flat_map(|s| s.content.iter()) {
        match item {
            ContentItem::Heading(h) if title.is_none() && !h.text.is_empty() => {
                title = Some(h.text.clone());
            }
            ContentItem::Paragraph(p) if description.is_none() && !p.text.is_empty() => {
                description = Some(p.text.chars().take(SEO_DESCRIPTION_LIMIT).collect());
            }
            _ => {}
        }
    }

    SeoMeta {
        title: title.unwrap_or_else(|| role_title(role, project)),
        description: description.unwrap_or_else(|| format!("{}: professional property development.", project)),
    }
}

fn role_title(role: PageRole, project: &str) -> String {
    match role {
        PageRole::Frontpage => format!("{} | Property development", project),
        PageRole::Generic => project.to_string(),
        other => format!("{} | {}", PageConfig::for_role(other, None).title, project),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub url: String,
}

impl NavLink {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }

    /// `{site_url}/{slug}/` under the role's page title.
    pub fn for_role(role: PageRole, site_url: &str) -> Self {
        let config = PageConfig::for_role(role, None);
        Self::new(
            config.title,
            format!("{}/{}/", site_url.trim_end_matches('/'), config.slug),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderStyle {
    pub bg_color: String,
    pub text_color: String,
    pub nav_background: String,
}

impl Default for HeaderStyle {
    fn default() -> Self {
        Self {
            bg_color: "#4b250d".to_string(),
            text_color: "#ffffff".to_string(),
            nav_background: "transparent".to_string(),
        }
    }
}

/// Two-column header row: site name on the left, navigation buttons on
/// the right. `None` when there is nothing to navigate to.
pub fn build_header_content<M: IdMinter>(
    dialect: &NativeDialect<M>,
    project: &str,
    links: &[NavLink],
    style: &HeaderStyle,
) -> Option<String> {
    if links.is_empty() {
        return None;
    }

    let logo = dialect.adv_heading(
        &HeadingBlock {
            text: project,
            level: 3,
            color: Some(style.text_color.as_str()),
            font_size: Some("24px"),
            align: None,
            font_weight: Some("700"),
        },
        None,
    );

    let buttons: Vec<ButtonBlock<'_>> = links
        .iter()
        .map(|link| ButtonBlock {
            text: &link.label,
            url: Some(link.url.as_str()),
            bg_color: Some(style.nav_background.as_str()),
            text_color: Some(style.text_color.as_str()),
            style: ButtonStyle::Fill,
            border_radius: None,
        })
        .collect();
    let nav = dialect.adv_btn(&buttons, Some(TextAlign::Right), None);

    let columns = [
        dialect.kb_column(&[logo], &ColumnStyle::default(), None),
        dialect.kb_column(&[nav], &ColumnStyle::default(), None),
    ];
    let padding = Padding::new()
        .with(Side::Top, "15px")
        .with(Side::Bottom, "15px")
        .with(Side::Left, "30px")
        .with(Side::Right, "30px");

    Some(dialect.row_layout(
        &columns,
        &RowLayout {
            columns: 2,
            col_layout: "left-golden",
            bg_color: Some(style.bg_color.as_str()),
            padding: Some(&padding),
            ..Default::default()
        },
        None,
    ))
}

/// Reference to the reusable footer block.
pub fn footer_reference(block_id: u64) -> String {
    portable::block_reference(block_id)
}

pub fn append_footer_reference(markup: &str, block_id: u64) -> String {
    if markup.is_empty() {
        return footer_reference(block_id);
    }
    format!("{}\n\n{}", markup, footer_reference(block_id))
}

/// Everything needed to publish one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageBuild {
    pub role: PageRole,
    pub title: String,
    pub slug: String,
    pub menu_order: u32,
    pub is_front_page: bool,
    pub markup: String,
    pub seo: SeoMeta,
}

pub fn build_page(
    layout: &Value,
    images: &ImageRegistry,
    role: PageRole,
    project: &str,
) -> Result<PageBuild, CompileError> {
    let doc = LayoutDocument::from_value(layout)?;
    let markup = build_page_content(layout, images, role)?;
    let config = PageConfig::for_role(role, doc.page_title.as_deref());

    Ok(PageBuild {
        role,
        title: config.title,
        slug: config.slug,
        menu_order: config.menu_order,
        is_front_page: config.is_front_page,
        markup,
        seo: generate_seo_meta(&doc, role, project),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use serde_json::json;

    #[test]
    fn test_slugify_transliterates() {
        assert_eq!(slugify("Blåbær Øya"), "blabaer-oya");
        assert_eq!(slugify("Our Team!"), "our-team");
    }

    #[test]
    fn test_role_round_trips_through_str() {
        for role in PageRole::NAVIGATION {
            assert_eq!(role.as_str().parse::<PageRole>().unwrap(), role);
        }
        assert!("footer".parse::<PageRole>().is_err());
    }

    #[test]
    fn test_generic_page_config_uses_title() {
        let config = PageConfig::for_role(PageRole::Generic, Some("Summer Cabins"));
        assert_eq!(config.slug, "summer-cabins");
        assert!(!config.is_front_page);
        assert_eq!(PageConfig::for_role(PageRole::Generic, None).title, "Page");
        assert!(PageConfig::for_role(PageRole::Frontpage, None).is_front_page);
    }

    #[test]
    fn test_seo_skips_footer_and_truncates() {
        let long = "x".repeat(200);
        let doc = LayoutDocument::from_value(&json!({"sections": [
            {"type": "footer", "content": [{"type": "heading", "text": "Footer heading"}]},
            {"type": "hero", "content": [
                {"type": "heading", "text": "Homes by the sea"},
                {"type": "paragraph", "text": long}
            ]}
        ]}))
        .unwrap();
        let seo = generate_seo_meta(&doc, PageRole::Frontpage, "Acme");
        assert_eq!(seo.title, "Homes by the sea");
        assert_eq!(seo.description.chars().count(), SEO_DESCRIPTION_LIMIT);
    }

    #[test]
    fn test_seo_falls_back_to_role_title() {
        let doc = LayoutDocument::from_value(&json!({"sections": []})).unwrap();
        let seo = generate_seo_meta(&doc, PageRole::About, "Acme");
        assert_eq!(seo.title, "About us | Acme");
        assert!(seo.description.starts_with("Acme"));
    }

    #[test]
    fn test_header_needs_links() {
        let dialect = NativeDialect::with_minter(SequentialIds::new());
        assert!(build_header_content(&dialect, "Acme", &[], &HeaderStyle::default()).is_none());

        let links = [NavLink::for_role(PageRole::About, "https://acme.test/")];
        let header = build_header_content(&dialect, "Acme", &links, &HeaderStyle::default()).unwrap();
        assert!(header.starts_with("<!-- wp:kadence/rowlayout"));
        assert!(header.contains(r#""colLayout":"left-golden""#));
        assert!(header.contains(r#""link":"https://acme.test/about-us/""#));
        assert!(header.contains(r#""hAlign":"right""#));
    }

    #[test]
    fn test_footer_reference_appended() {
        assert_eq!(append_footer_reference("", 42), r#"<!-- wp:block {"ref":42} /-->"#);
        assert!(append_footer_reference("<p>x</p>", 42).ends_with("\n\n<!-- wp:block {\"ref\":42} /-->"));
    }
}
