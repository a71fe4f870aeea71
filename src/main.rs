use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use storefront::{config, generate, output, store};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Static site generator for small-business marketing sites")]
#[command(long_about = "\
Static site generator for small-business marketing sites

One JSON document holds the business facts and all page copy. The build
renders a home page, about page, contact page and one page per service.

Source structure:

  site/
  ├── config.toml        # Build config (optional, see gen-config)
  ├── content.json       # Business, SEO, design tokens, page content
  └── assets/            # Copied verbatim to the output root

Output:

  dist/
  ├── index.html
  ├── about/index.html
  ├── contact/index.html
  ├── services/<slug>/index.html
  └── 404.html

Run 'storefront gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Source directory (config.toml, content document, assets)
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten)]
    Content(ContentCommand),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

// Commands that need the loaded content document.
#[derive(Subcommand)]
enum ContentCommand {
    /// Load the content and generate the site
    Build,
    /// Validate the content document without building
    Check,
    /// List service slugs in document order
    Services,
    /// Show one service by slug
    Show {
        /// Service slug (case-sensitive)
        slug: String,
    },
}

/// Exit code for a slug that names no service.
const NOT_FOUND: u8 = 2;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            Ok(ExitCode::SUCCESS)
        }
        Command::Content(command) => run(command, &cli.source, &cli.output),
    }
}

/// Load config and content, then run a content command.
///
/// Loading failures abort before anything is written.
fn run(
    command: ContentCommand,
    source: &Path,
    output_dir: &Path,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let site_config = config::load_config(source)?;
    let content_path = source.join(&site_config.content_file);
    let loaded = store::install(store::load_content(&content_path)?)?;

    match command {
        ContentCommand::Build => {
            init_thread_pool(&site_config.processing);
            println!("==> Loaded {}", content_path.display());
            println!("==> Generating HTML → {}", output_dir.display());
            let report = generate::generate(loaded, &site_config, source, output_dir)?;
            output::print_generate_output(&report);
            println!("==> Build complete: {}", output_dir.display());
        }
        ContentCommand::Check => {
            println!("==> Checking {}", content_path.display());
            output::print_check_output(loaded, &content_path);
            println!("==> Content is valid");
        }
        ContentCommand::Services => {
            for slug in store::get_all_service_slugs() {
                println!("{}", slug);
            }
        }
        ContentCommand::Show { slug } => match store::get_service(&slug) {
            Some(service) => {
                let phone = &store::get_content().business.phone;
                output::print_service_detail(service, phone);
            }
            None => {
                eprintln!("Service not found: {}", slug);
                return Ok(ExitCode::from(NOT_FOUND));
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
