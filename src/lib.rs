//! BlockForge Core - Layout-to-Block Markup Compiler
//!
//! # The Six Laws (Non-Negotiable)
//! 1. Layout Is Intent
//! 2. Dialects Are Interchangeable
//! 3. Explicit Beats Default
//! 4. Deterministic Output
//! 5. Bad Input Degrades Visibly
//! 6. Only A Malformed Document Fails

pub mod layout;
pub mod style;
pub mod ids;
pub mod blocks;
pub mod convert;
pub mod config;
pub mod images;
pub mod site;
pub mod hashing;
pub mod compiler;

pub use layout::{LayoutDocument, Section, ContentItem, TextAlign};
pub use blocks::{BlockDialect, DialectKind, NativeDialect, PortableDialect};
pub use ids::{IdMinter, RandomIds, SequentialIds};
pub use config::{CompileOptions, ContactDefaults};
pub use images::{ImageRegistry, RegisteredImage};
pub use site::{PageRole, PageBuild, SeoMeta, NavLink, HeaderStyle};
pub use hashing::{canonical_json, layout_fingerprint, markup_fingerprint};
pub use compiler::{
    LayoutCompiler, CompiledMarkup, CompileError,
    convert_layout, build_page_content, build_footer_content,
};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
