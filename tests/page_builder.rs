//! Page-builder output and the file-backed inputs around it.

use std::fs;

use blockforge_core::{
    build_footer_content, build_page_content,
    site::{build_page, footer_reference},
    CompileOptions, DialectKind, ImageRegistry, LayoutCompiler, LayoutDocument, PageRole,
};
use serde_json::{json, Value};
use tempfile::TempDir;

fn frontpage() -> Value {
    json!({
        "page_title": "Fjordhus",
        "sections": [
            {"type": "hero", "background": {"type": "image", "value": "Harbour at dusk", "overlay_opacity": 0.4},
             "content": [
                {"type": "heading", "text": "Homes by the fjord", "level": 1},
                {"type": "paragraph", "text": "Quiet living, ten minutes from town."}
             ]},
            {"type": "gallery", "images": [{"description": "Kitchen island"}, {"description": "Garden terrace"}]},
            {"type": "footer", "columns": 2, "content": [
                {"type": "heading", "text": "Visit"},
                {"type": "paragraph", "text": "Strandveien 1"},
                {"type": "heading", "text": "Call"},
                {"type": "paragraph", "text": "+47 000 00 000"}
            ]}
        ]
    })
}

fn write(dir: &TempDir, name: &str, value: &Value) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

#[test]
fn test_native_page_uses_row_layouts_and_registry() {
    let dir = TempDir::new().unwrap();
    let registry_path = write(
        &dir,
        "images.json",
        &json!([
            {"url": "https://cdn.example.com/harbour.jpg", "id": 11, "filename": "harbour-dusk.jpg"},
            {"url": "https://cdn.example.com/kitchen.jpg", "id": 12, "filename": "kitchen-island.jpg"}
        ]),
    );
    let images = ImageRegistry::load_from_file(&registry_path).unwrap();
    assert_eq!(images.len(), 2);

    let markup = build_page_content(&frontpage(), &images, PageRole::Frontpage).unwrap();
    assert!(markup.starts_with("<!-- wp:kadence/rowlayout"));
    assert!(markup.contains("https://cdn.example.com/harbour.jpg"));
    assert!(markup.contains(r#""overlayOpacity":0.4"#));
    assert!(markup.contains("https://cdn.example.com/kitchen.jpg"));
    // Footer is published separately
    assert!(!markup.contains("Strandveien 1"));
    // No theme override in page-builder output
    assert!(!markup.contains("<style>"));
}

#[test]
fn test_footer_content_keeps_heading_groups() {
    let footer = build_footer_content(&frontpage()).unwrap();
    assert!(footer.contains("Strandveien 1"));
    // One column per heading group inside the footer row's own column
    assert_eq!(footer.matches("<!-- wp:kadence/column ").count(), 3);

    let visit = footer.find("Visit").unwrap();
    let call = footer.find("Call").unwrap();
    let address = footer.find("Strandveien 1").unwrap();
    assert!(visit < address && address < call);
}

#[test]
fn test_footer_layout_without_footer_type() {
    let footer_json = json!({"sections": [
        {"type": "columns", "background_color": "#4b250d", "layout": {"columns": 2}, "content": [
            {"type": "heading", "text": "Visit"},
            {"type": "paragraph", "text": "Strandveien 1"}
        ]}
    ]});
    let footer = build_footer_content(&footer_json).unwrap();
    assert!(footer.starts_with("<!-- wp:kadence/rowlayout"));
    assert!(footer.contains("Strandveien 1"));
    assert!(footer.contains(r##""bgColor":"#4b250d""##));
}

#[test]
fn test_page_build_carries_config_and_seo() {
    let page = build_page(&frontpage(), &ImageRegistry::new(), PageRole::Frontpage, "Fjordhus").unwrap();
    assert_eq!(page.title, "Home");
    assert_eq!(page.slug, "home");
    assert!(page.is_front_page);
    assert_eq!(page.seo.title, "Fjordhus");
    assert_eq!(page.seo.description, "Quiet living, ten minutes from town.");
    // Unregistered images fall back to placeholders
    assert!(page.markup.contains("data:image/svg+xml"));

    let generic = build_page(
        &json!({"page_title": "Våre hytter", "sections": []}),
        &ImageRegistry::new(),
        PageRole::Generic,
        "Fjordhus",
    )
    .unwrap();
    assert_eq!(generic.slug, "vare-hytter");
    assert_eq!(generic.markup, "");
}

#[test]
fn test_options_file_switches_dialect() {
    let dir = TempDir::new().unwrap();
    let options_path = write(
        &dir,
        "options.json",
        &json!({"dialect": "native", "theme_override": false, "section_spacing": null}),
    );
    let options = CompileOptions::load(&options_path).unwrap();
    assert_eq!(options.dialect, DialectKind::Native);

    let layout_path = write(&dir, "layout.json", &frontpage());
    let doc = LayoutDocument::load(&layout_path).unwrap();
    let manifest = LayoutCompiler::new(options)
        .compile_manifest(&frontpage())
        .unwrap();
    assert_eq!(manifest.dialect, DialectKind::Native);
    // Footer kept: the options file did not ask to skip it
    assert_eq!(manifest.sections_emitted, doc.sections.len());
    assert!(manifest.markup.contains("Strandveien 1"));
}

#[test]
fn test_missing_files_surface_io_errors() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");
    assert!(ImageRegistry::load_from_file(&missing).is_err());
    assert!(LayoutDocument::load(&missing).is_err());
    assert_eq!(footer_reference(7), r#"<!-- wp:block {"ref":7} /-->"#);
}
