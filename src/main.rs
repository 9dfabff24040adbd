use annuaire::directory::Directory;
use annuaire::{config, generate, menu, output, page, scan};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Shared flags for commands that write pages.
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Disable the page cache — rewrite every page even if unchanged
    #[arg(long)]
    no_cache: bool,
}

#[derive(Parser)]
#[command(name = "annuaire")]
#[command(about = "Static site generator for local business directories")]
#[command(long_about = "\
Static site generator for local business directories

A semicolon-separated catalog becomes a three-level category menu and one
page per category, each listing embedded social page cards.

Content structure:

  content/
  ├── config.toml        # Site config (optional)
  ├── annuaire.csv       # Catalog: Categorie1;Categorie2;Categorie3;Nom;Lien
  ├── intro.md           # Home page introduction (optional)
  └── assets/            # Static assets (favicon, images) → copied to output root

Catalog rules:
  The first line is a header and is skipped.
  Rows need five fields and a first category, name and link.
  Links without a scheme are completed to https://www.facebook.com/<link>.

Run 'annuaire gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (scan manifest)
    #[arg(long, default_value = ".annuaire-temp", global = true)]
    temp_dir: PathBuf,

    /// Log debug diagnostics to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the catalog into a manifest
    Scan,
    /// Produce the HTML site from the scan manifest
    Generate(CacheArgs),
    /// Run the full pipeline: scan → generate
    Build(CacheArgs),
    /// Validate the content directory without building
    Check,
    /// Print one category page as served at category.html?cat=<slug>
    Render {
        /// Category slug
        #[arg(long, conflicts_with = "query")]
        cat: Option<String>,
        /// Raw query string, e.g. "?cat=commerces-vetements"
        #[arg(long)]
        query: Option<String>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let manifest_path = cli.temp_dir.join("manifest.json");

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate(cache_args) => {
            let report = generate::generate(
                &manifest_path,
                &cli.source,
                &cli.output,
                !cache_args.no_cache,
            )?;
            output::print_generate_output(&report);
        }
        Command::Build(cache_args) => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            if previous_manifest(&manifest_path).is_some_and(|prev| prev.is_current(&manifest)) {
                debug!("catalog and config unchanged since last scan; reusing manifest");
            } else {
                write_manifest(&manifest, &cli.temp_dir)?;
            }
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report = generate::generate(
                &manifest_path,
                &cli.source,
                &cli.output,
                !cache_args.no_cache,
            )?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_check_output(&manifest);
            println!("==> Content is valid");
        }
        Command::Render { cat, query } => {
            let site_config = config::load_config(&cli.source)?;
            let directory = Directory::from_path(cli.source.join(&site_config.catalog));
            let slug = cat.or_else(|| query.as_deref().and_then(page::category_param));
            let state = page::resolve_page(&directory, slug.as_deref());
            let site_menu = menu::build_menu(directory.tree(), site_config.menu.show_counts);
            let html = generate::render_category_page(
                &state,
                &site_menu,
                &site_config,
                &generate::site_css(&site_config),
                generate::LinkStyle::Query,
                slug.as_deref(),
            );
            println!("{}", html.into_string());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "annuaire=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn write_manifest(manifest: &scan::Manifest, temp_dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(temp_dir.join("manifest.json"), json)
}

fn previous_manifest(path: &Path) -> Option<scan::Manifest> {
    let content = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}
