use clap::{Parser, Subcommand};
use paperstack::preview::PdftoppmRasterizer;
use paperstack::store::Store;
use paperstack::{config, generate, output, preview, shell, sitemap};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "paperstack")]
#[command(about = "Static site generator for academic publication catalogs")]
#[command(long_about = "\
Static site generator for academic publication catalogs

A single articles.json file is the data source. Each record describes one
published article; every output is derived from that list.

Project structure:

  ./
  ├── paperstack.toml              # Site config (optional)
  ├── articles.json                # Article records (the only state)
  ├── pdfs/
  │   └── <id>.pdf                 # One source document per article
  └── dist/                        # Generated site (build output)
      ├── index.html               # Homepage grid
      ├── 404.html
      ├── sitemap.xml
      ├── article/<id>/index.html  # Detail pages with citation metadata
      └── previews/<id>-preview.jpg

The previews command requires Poppler's pdftoppm on PATH.

Run 'paperstack gen-config' to print a documented paperstack.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Article source file (overrides the configured path)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory containing paperstack.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the browsable site: homepage, article pages, 404, sitemap
    Build,
    /// Write minimal crawler-facing HTML shells, one per article
    Shells,
    /// Write sitemap.xml
    Sitemap,
    /// Render first-page PDF preview thumbnails
    Previews,
    /// Load and validate the article source without writing anything
    Check,
    /// Print a stock paperstack.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // gen-config needs no store or config file
    if matches!(cli.command, Command::GenConfig) {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let site_config = config::load_config(&cli.config_dir)?;
    let source = cli
        .source
        .clone()
        .unwrap_or_else(|| cli.config_dir.join(&site_config.paths.articles));

    // All generators load and validate the store before writing anything —
    // a bad source aborts the run with no partial output.
    let store = Store::load(&source)?;

    match cli.command {
        Command::Build => {
            println!("==> Generating site → {}", cli.output.display());
            let stats = generate::generate(&store, &site_config, &cli.output)?;
            output::print_generate(&stats, &cli.output.display().to_string());

            println!("==> Writing sitemap");
            let path = sitemap::write_sitemap(&store, &site_config, &cli.output)?;
            println!("Sitemap written to {} ({} URLs)", path.display(), store.len() + 1);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Shells => {
            let outcomes = shell::generate_shells(&store, &site_config, &cli.output)?;
            output::print_shell_report(&outcomes);
            if outcomes.iter().any(|o| !o.is_written()) {
                std::process::exit(1);
            }
        }
        Command::Sitemap => {
            let path = sitemap::write_sitemap(&store, &site_config, &cli.output)?;
            println!("Sitemap written to {} ({} URLs)", path.display(), store.len() + 1);
        }
        Command::Previews => {
            let pdfs_dir = cli.config_dir.join(&site_config.paths.pdfs);
            let previews_dir = previews_output_dir(&cli.output, &site_config.paths.previews);
            let rasterizer = PdftoppmRasterizer {
                density: site_config.previews.density,
            };
            let report = preview::generate_previews(
                &store,
                &site_config,
                &pdfs_dir,
                &previews_dir,
                &rasterizer,
            )?;
            output::print_preview_report(&report);
            // Nonzero exit after the full batch and summary, per item errors
            // already printed above.
            if report.has_failures() {
                std::process::exit(1);
            }
        }
        Command::Check => {
            output::print_check(&store);
        }
        Command::GenConfig => unreachable!("handled above"),
    }

    Ok(())
}

fn previews_output_dir(output: &Path, previews_name: &str) -> PathBuf {
    output.join(previews_name)
}
