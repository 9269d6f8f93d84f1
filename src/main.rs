use clap::{Parser, Subcommand};
use purpose_site::{config, content, generate, output, simulate, video};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "purpose-site")]
#[command(about = "Static site builder for the New Purpose Recovery House")]
#[command(long_about = "\
Static site builder for the New Purpose Recovery House

All site copy lives in one JSON file. The builder renders it into plain HTML
pages with scroll reveal, a scroll-linked zoom panel, and testimonial video
modals.

Content structure:

  content/
  ├── site.toml       # Site config (optional, overrides stock defaults)
  ├── content.json    # Pages, testimonials, timeline, FAQ, newsletter
  └── assets/         # Images, PDFs, favicons → copied to output root

Set RUST_LOG=debug for detailed logging.

Run 'purpose-site gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the full site into the output directory
    Build,
    /// Validate config and content without building
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
    /// Scroll a page layout through the reveal and zoom rules
    Simulate {
        /// Layout JSON with viewport size and region positions
        layout: PathBuf,
        /// Scroll step in pixels
        #[arg(long, default_value_t = 50.0)]
        step: f64,
    },
    /// Show how a testimonial video URL resolves
    Video {
        /// Video URL; omit to see the no-video placeholder
        url: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let report = generate::generate(&cli.source, &cli.output)?;
            output::print_generate_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;
            let (site_content, warnings) =
                content::load_content(&cli.source.join(&site_config.content_file))?;
            output::print_check_output(&site_content, &warnings);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Simulate { layout, step } => {
            let site_config = config::load_config(&cli.source)?;
            let page = simulate::PageLayout::load(&layout)?;
            let report = simulate::simulate(&page, &site_config, step)?;
            output::print_simulation(&report);
        }
        Command::Video { url } => {
            let source = video::resolve(url.as_deref());
            output::print_video(&source);
        }
    }

    Ok(())
}
