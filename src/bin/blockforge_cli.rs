//! BlockForge CLI - Bridge interface for the publishing scripts
//!
//! Commands: convert, page, footer, header, hash
//! Markup (or JSON with --manifest / --json) goes to stdout
//! Returns non-zero on malformed input

use clap::{Parser, Subcommand};
use log::{info, warn};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use blockforge_core::{
    hashing::compile_cache_key,
    site::{self, append_footer_reference, build_header_content},
    CompileError, CompileOptions, DialectKind, HeaderStyle, ImageRegistry, LayoutCompiler,
    LayoutDocument, NativeDialect, NavLink, PageRole, ENGINE_VERSION,
};

#[derive(Parser)]
#[command(name = "blockforge-cli")]
#[command(about = "BlockForge CLI - Layout to block markup compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON compile options file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print the JSON manifest instead of raw markup
    #[arg(short, long, global = true)]
    manifest: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Portable markup for pasting into the block editor
    Convert {
        /// Layout document (JSON)
        layout: PathBuf,
    },

    /// Native page markup
    Page {
        /// Layout document (JSON)
        layout: PathBuf,

        /// Uploaded image records (JSON array)
        #[arg(short, long)]
        images: Option<PathBuf>,

        /// Page role: frontpage, about, properties, single_property, contact, generic
        #[arg(short, long, default_value = "generic")]
        role: PageRole,

        /// Project (site) name
        #[arg(short, long, default_value = "site")]
        project: String,

        /// Print the full page build (title, slug, SEO) as JSON
        #[arg(long)]
        json: bool,

        /// Reusable footer block id to reference at the end of the page
        #[arg(long)]
        footer_ref: Option<u64>,
    },

    /// Native markup for the site footer
    Footer {
        /// Layout document (JSON)
        layout: PathBuf,
    },

    /// Native header row with site name and navigation
    Header {
        /// Project (site) name
        project: String,

        /// Navigation entry as `Label=url`; repeatable
        #[arg(short, long = "link", value_parser = parse_link)]
        links: Vec<NavLink>,

        /// Build navigation from the standard page roles under this URL
        #[arg(long)]
        site_url: Option<String>,
    },

    /// Fingerprint a layout document
    Hash {
        /// Layout document (JSON)
        layout: PathBuf,
    },
}

fn parse_link(raw: &str) -> Result<NavLink, String> {
    match raw.split_once('=') {
        Some((label, url)) if !label.is_empty() && !url.is_empty() => Ok(NavLink::new(label, url)),
        _ => Err(format!("expected Label=url, got `{}`", raw)),
    }
}

fn read_layout(path: &Path) -> Result<Value, CompileError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn load_options(path: Option<&Path>, preset: CompileOptions) -> Result<CompileOptions, CompileError> {
    match path {
        Some(path) => {
            info!("Loading options from {}", path.display());
            CompileOptions::load(path)
        }
        None => Ok(preset),
    }
}

fn run(cli: Cli) -> Result<String, CompileError> {
    match cli.command {
        Commands::Convert { layout } => {
            let value = read_layout(&layout)?;
            let options = load_options(cli.config.as_deref(), CompileOptions::portable())?;
            let compiler = LayoutCompiler::new(options);
            info!("Converting {}", layout.display());

            if cli.manifest {
                let compiled = compiler.compile_manifest(&value)?;
                Ok(serde_json::to_string_pretty(&compiled)?)
            } else {
                let doc = LayoutDocument::from_value(&value)?;
                Ok(compiler.compile(&doc))
            }
        }

        Commands::Page {
            layout,
            images,
            role,
            project,
            json,
            footer_ref,
        } => {
            let value = read_layout(&layout)?;
            let registry = match images {
                Some(path) => ImageRegistry::load_from_file(&path)?,
                None => ImageRegistry::new(),
            };
            info!(
                "Building {} page from {} ({} registered images)",
                role,
                layout.display(),
                registry.len()
            );

            if cli.manifest {
                let options = load_options(cli.config.as_deref(), CompileOptions::native())?;
                let compiled = LayoutCompiler::new(options)
                    .with_images(registry)
                    .compile_manifest(&value)?;
                return Ok(serde_json::to_string_pretty(&compiled)?);
            }

            let mut page = site::build_page(&value, &registry, role, &project)?;
            if let Some(id) = footer_ref {
                page.markup = append_footer_reference(&page.markup, id);
            }

            if json {
                Ok(serde_json::to_string_pretty(&page)?)
            } else {
                Ok(page.markup)
            }
        }

        Commands::Footer { layout } => {
            let value = read_layout(&layout)?;
            let doc = LayoutDocument::from_value(&value)?;
            let options = load_options(cli.config.as_deref(), CompileOptions::native())?;
            let footer = LayoutCompiler::new(options).compile_footer(&doc, &NativeDialect::new());
            if footer.is_empty() {
                warn!("{} has no footer section", layout.display());
            }
            Ok(footer)
        }

        Commands::Header {
            project,
            mut links,
            site_url,
        } => {
            if let Some(site_url) = site_url {
                links.extend(
                    PageRole::NAVIGATION
                        .iter()
                        .map(|role| NavLink::for_role(*role, &site_url)),
                );
            }
            match build_header_content(&NativeDialect::new(), &project, &links, &HeaderStyle::default()) {
                Some(header) => Ok(header),
                None => {
                    warn!("No navigation links given; header not built");
                    Ok(String::new())
                }
            }
        }

        Commands::Hash { layout } => {
            let value = read_layout(&layout)?;
            LayoutDocument::from_value(&value)?;

            let output = serde_json::json!({
                "layout_hash": blockforge_core::layout_fingerprint(&value)?,
                "engine_version": ENGINE_VERSION,
                "cache_keys": {
                    "portable": compile_cache_key(DialectKind::Portable.as_str(), &value, ENGINE_VERSION)?,
                    "native": compile_cache_key(DialectKind::Native.as_str(), &value, ENGINE_VERSION)?,
                },
            });
            Ok(serde_json::to_string_pretty(&output)?)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let output = serde_json::json!({
                "success": false,
                "error": e.to_string(),
            });
            println!("{}", output);
            ExitCode::FAILURE
        }
    }
}
