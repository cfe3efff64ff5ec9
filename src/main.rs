use clap::{Parser, Subcommand};
use neyna_site::generate::SiteContext;
use neyna_site::watch::Watcher;
use neyna_site::{config, filter, generate, logging, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "neyna-site")]
#[command(about = "Static site generator for a company site with a downloads browser")]
#[command(long_about = "\
Static site generator for a company site with a downloads browser

Drop PDFs and images into the public folder; every build turns them into a
searchable catalog with previews and download buttons.

Site structure:

  site/
  ├── config.toml          # Site config (optional)
  ├── pages/
  │   ├── advertise.md     # Landing page copy (optional)
  │   └── terms.md         # Terms of service copy (optional)
  └── public/              # Copied to the output as-is
      ├── pdfs/            # *.pdf → PDFs tab
      └── images/          # png, jpg, jpeg, gif, webp, avif → Images tab

Run 'neyna-site gen-config' to print a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site directory
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log filter when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the documents and images found in the public folder
    Discover,
    /// Show catalog entries whose name contains a term (case-insensitive)
    Search {
        /// Search term; empty matches everything
        #[arg(default_value = "")]
        term: String,
    },
    /// Generate the full site
    Build,
    /// Build, then re-discover on an interval and republish when files change
    Watch,
    /// Validate config and discover files without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    match cli.command {
        Command::Discover => {
            let ctx = SiteContext::load(&cli.source)?;
            output::print_discovery(&ctx.discover());
        }
        Command::Search { term } => {
            let ctx = SiteContext::load(&cli.source)?;
            let discovery = ctx.discover();
            let filtered = filter::filter_catalog(&discovery.catalog, &term);
            output::print_search(&filtered, &term);
        }
        Command::Build => {
            let ctx = SiteContext::load(&cli.source)?;
            println!("==> Discovering {}", ctx.public_root.display());
            let discovery = ctx.discover();
            output::print_discovery(&discovery);
            println!("==> Generating {}", cli.output.display());
            let report = generate::generate(&ctx, &discovery, &cli.output)?;
            output::print_generate(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Watch => {
            let ctx = SiteContext::load(&cli.source)?;
            let mut watcher = Watcher::new(ctx, cli.output.clone());
            let report = watcher.build()?;
            output::print_generate(&report);
            println!(
                "==> Watching for changes every {}s (Ctrl-C to stop)",
                watcher.interval().as_secs()
            );
            let task = watcher.spawn(|report| {
                println!("==> Catalog changed");
                output::print_generate(report);
            });
            task.wait();
        }
        Command::Check => {
            let ctx = SiteContext::load(&cli.source)?;
            println!("==> Checking {}", cli.source.display());
            let discovery = neyna_site::discover::discover(&ctx.public_root, &ctx.config.layout)?;
            output::print_discovery(&discovery);
            println!("==> Site is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
