//! Layout Compiler - Single Entry Point
//!
//! Every section goes through `convert_section`; the compiler only decides
//! which dialect renders, which sections are skipped, and what separates
//! the emitted units.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::blocks::{portable, BlockDialect, DialectKind, NativeDialect, PortableDialect};
use crate::config::CompileOptions;
use crate::convert::{self, ConvertContext, SectionKind};
use crate::hashing::{compile_cache_key, layout_fingerprint, markup_fingerprint};
use crate::images::ImageRegistry;
use crate::layout::LayoutDocument;
use crate::site::PageRole;
use crate::ENGINE_VERSION;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Malformed layout document: {0}")]
    MalformedDocument(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Markup plus the record needed to reproduce it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompiledMarkup {
    pub id: String,
    pub dialect: DialectKind,
    pub engine_version: String,
    pub created_at: DateTime<Utc>,
    pub layout_hash: String,
    pub markup_hash: String,
    pub cache_key: String,
    pub sections_emitted: usize,
    pub markup: String,
}

pub struct LayoutCompiler {
    options: CompileOptions,
    images: ImageRegistry,
}

impl LayoutCompiler {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            images: ImageRegistry::new(),
        }
    }

    pub fn with_images(mut self, images: ImageRegistry) -> Self {
        self.images = images;
        self
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile with the dialect named in the options.
    pub fn compile(&self, doc: &LayoutDocument) -> String {
        self.compile_counted(doc, None).0
    }

    /// Compile with a caller-supplied dialect, e.g. a native dialect with a
    /// deterministic id source.
    pub fn compile_with(&self, doc: &LayoutDocument, dialect: &dyn BlockDialect) -> String {
        self.compile_counted(doc, Some(dialect)).0
    }

    /// Render the site footer on its own: the first footer section, else
    /// the document's first section whatever its type. Empty for an empty
    /// document.
    pub fn compile_footer(&self, doc: &LayoutDocument, dialect: &dyn BlockDialect) -> String {
        let cx = ConvertContext::new(dialect, &self.images, &self.options.contact);
        doc.sections
            .iter()
            .find(|s| SectionKind::from_type(&s.kind) == SectionKind::Footer)
            .or_else(|| doc.sections.first())
            .map(|s| {
                debug!("footer from section `{}`", s.kind);
                convert::sections::footer(&cx, s)
            })
            .unwrap_or_default()
    }

    /// Compile a JSON-shaped document and record fingerprints of input
    /// and output.
    pub fn compile_manifest(&self, layout: &Value) -> Result<CompiledMarkup, CompileError> {
        let doc = LayoutDocument::from_value(layout)?;
        let (markup, sections_emitted) = self.compile_counted(&doc, None);

        Ok(CompiledMarkup {
            id: Uuid::new_v4().to_string(),
            dialect: self.options.dialect,
            engine_version: ENGINE_VERSION.to_string(),
            created_at: Utc::now(),
            layout_hash: layout_fingerprint(layout)?,
            markup_hash: markup_fingerprint(&markup),
            cache_key: compile_cache_key(self.options.dialect.as_str(), layout, ENGINE_VERSION)?,
            sections_emitted,
            markup,
        })
    }

    fn compile_counted(
        &self,
        doc: &LayoutDocument,
        dialect: Option<&dyn BlockDialect>,
    ) -> (String, usize) {
        match dialect {
            Some(dialect) => self.run(doc, dialect),
            None => match self.options.dialect {
                DialectKind::Portable => self.run(doc, &PortableDialect),
                DialectKind::Native => self.run(doc, &NativeDialect::new()),
            },
        }
    }

    fn run(&self, doc: &LayoutDocument, dialect: &dyn BlockDialect) -> (String, usize) {
        let cx = ConvertContext::new(dialect, &self.images, &self.options.contact);
        let mut units = Vec::new();

        if self.options.theme_override {
            units.push(portable::theme_override_css());
        }

        let mut emitted = 0;
        for (index, section) in doc.sections.iter().enumerate() {
            if self.options.skip_footer_sections
                && SectionKind::from_type(&section.kind) == SectionKind::Footer
            {
                debug!("section {} skipped: footer is published separately", index);
                continue;
            }

            let unit = convert::convert_section(&cx, section);
            if unit.is_empty() {
                debug!("section {} (`{}`) elided: no output", index, section.kind);
                continue;
            }

            if emitted > 0 {
                if let Some(height) = self.options.section_spacing {
                    units.push(dialect.spacer(height));
                }
            }
            units.push(unit);
            emitted += 1;
        }

        debug!(
            "compiled {} of {} sections with the {} dialect",
            emitted,
            doc.sections.len(),
            dialect.kind().as_str()
        );
        (units.join("\n\n"), emitted)
    }
}

impl Default for LayoutCompiler {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}

/// Portable markup for pasting into the block editor.
pub fn convert_layout(layout: &Value) -> Result<String, CompileError> {
    let doc = LayoutDocument::from_value(layout)?;
    Ok(LayoutCompiler::new(CompileOptions::portable()).compile(&doc))
}

/// Native page markup; footer sections are left to `build_footer_content`.
pub fn build_page_content(
    layout: &Value,
    images: &ImageRegistry,
    role: PageRole,
) -> Result<String, CompileError> {
    let doc = LayoutDocument::from_value(layout)?;
    debug!("building {} page content", role.as_str());
    let compiler = LayoutCompiler::new(CompileOptions::native()).with_images(images.clone());
    Ok(compiler.compile(&doc))
}

/// Native markup for the site-wide footer, from the document's first
/// footer section or, failing that, its first section.
pub fn build_footer_content(layout: &Value) -> Result<String, CompileError> {
    let doc = LayoutDocument::from_value(layout)?;
    let compiler = LayoutCompiler::new(CompileOptions::native());
    Ok(compiler.compile_footer(&doc, &NativeDialect::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use serde_json::json;

    fn doc(value: Value) -> LayoutDocument {
        LayoutDocument::from_value(&value).unwrap()
    }

    fn bare_options() -> CompileOptions {
        CompileOptions {
            theme_override: false,
            ..CompileOptions::portable()
        }
    }

    #[test]
    fn test_theme_override_leads() {
        let out = LayoutCompiler::default().compile(&doc(json!({"sections": []})));
        assert!(out.starts_with("<!-- wp:html -->\n<style>"));
    }

    #[test]
    fn test_spacer_only_between_emitted_sections() {
        let layout = doc(json!({"sections": [
            {"type": "text-section", "content": [{"type": "paragraph", "text": "one"}]},
            {"type": "text-section", "content": []},
            {"type": "text-section", "content": [{"type": "paragraph", "text": "two"}]}
        ]}));
        let out = LayoutCompiler::new(bare_options()).compile(&layout);
        assert_eq!(out.matches("<!-- wp:spacer").count(), 1);
        assert!(!out.trim_end().ends_with("<!-- /wp:spacer -->"));
    }

    #[test]
    fn test_native_preset_skips_footer() {
        let layout = doc(json!({"sections": [
            {"type": "text-section", "content": [{"type": "paragraph", "text": "body"}]},
            {"type": "footer", "content": [{"type": "paragraph", "text": "(c) 2024"}]}
        ]}));
        let compiler = LayoutCompiler::new(CompileOptions::native());
        let dialect = NativeDialect::with_minter(SequentialIds::new());
        let out = compiler.compile_with(&layout, &dialect);
        assert!(out.contains("body"));
        assert!(!out.contains("(c) 2024"));

        let footer = compiler.compile_footer(&layout, &dialect);
        assert!(footer.contains("(c) 2024"));
    }

    #[test]
    fn test_manifest_records_fingerprints() {
        let layout = json!({"sections": [{"type": "text-section", "content": [{"type": "paragraph", "text": "hi"}]}]});
        let manifest = LayoutCompiler::new(bare_options()).compile_manifest(&layout).unwrap();
        assert_eq!(manifest.sections_emitted, 1);
        assert_eq!(manifest.dialect, DialectKind::Portable);
        assert_eq!(manifest.layout_hash.len(), 64);
        assert_eq!(manifest.markup_hash, markup_fingerprint(&manifest.markup));
        assert_eq!(manifest.engine_version, ENGINE_VERSION);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let err = convert_layout(&json!({"sections": "hero"})).unwrap_err();
        assert!(matches!(err, CompileError::MalformedDocument(_)));
    }

    #[test]
    fn test_footer_content_empty_without_sections() {
        assert_eq!(build_footer_content(&json!({"sections": []})).unwrap(), "");
    }

    #[test]
    fn test_footer_document_of_any_type_renders() {
        let layout = doc(json!({"sections": [
            {"type": "generic", "background_color": "#4b250d",
             "content": [{"type": "paragraph", "text": "Strandveien 1"}]},
            {"type": "text-section", "content": [{"type": "paragraph", "text": "second"}]}
        ]}));
        let compiler = LayoutCompiler::new(CompileOptions::native());
        let footer = compiler.compile_footer(&layout, &NativeDialect::with_minter(SequentialIds::new()));
        assert!(footer.contains("Strandveien 1"));
        assert!(footer.contains(r##""bgColor":"#4b250d""##));
        assert!(!footer.contains("second"));

        // A footer-typed section still wins over the first section
        let layout = doc(json!({"sections": [
            {"type": "hero", "content": [{"type": "heading", "text": "Welcome"}]},
            {"type": "footer", "content": [{"type": "paragraph", "text": "(c) 2024"}]}
        ]}));
        let footer = compiler.compile_footer(&layout, &NativeDialect::with_minter(SequentialIds::new()));
        assert!(footer.contains("(c) 2024"));
        assert!(!footer.contains("Welcome"));
    }
}
