use anyhow::Context;
use clap::{Parser, Subcommand};
use lazyload_sources::{Config, Document, LazyLoader, LoadReport};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "lazyload-sources",
    version,
    about = "Resolve staged data-* sources onto live src, srcset and background images"
)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// CSS selector for the elements to resolve (overrides the config)
    #[arg(short, long, global = true)]
    selector: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve an HTML file and print the result
    Render {
        input: PathBuf,

        /// Write the HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a JSON report of the live sources to stderr
        #[arg(long)]
        report: bool,
    },
    /// Resolve the elements of a page in headless Chrome and print a JSON report
    #[cfg(feature = "chrome")]
    Live { url: String },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(selector) = cli.selector {
        config.render.selector = selector;
    }

    match cli.command {
        Command::Render {
            input,
            output,
            report,
        } => render(&config, &input, output.as_deref(), report),
        #[cfg(feature = "chrome")]
        Command::Live { url } => live(&config, &url),
    }
}

fn render(config: &Config, input: &Path, output: Option<&Path>, report: bool) -> anyhow::Result<()> {
    let html = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;

    let (mut document, selected) = Document::parse_selecting(&html, &config.render.selector)?;
    info!(
        "Selected {} elements with '{}' in {}",
        selected.len(),
        config.render.selector,
        input.display()
    );

    let loader = LazyLoader::new(config.sources.clone());
    let load_report = loader.load_all(&mut document, &selected)?;

    let rendered = document.to_html();
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", rendered),
    }

    if report {
        eprintln!("{}", report_json(config, &load_report)?);
    }
    Ok(())
}

#[cfg(feature = "chrome")]
fn live(config: &Config, url: &str) -> anyhow::Result<()> {
    use lazyload_sources::ChromeHost;

    let mut host = ChromeHost::launch(&config.browser)?;
    info!("Navigating to {}", url);
    host.navigate(url)?;

    let selected = host.query(&config.render.selector)?;
    info!(
        "Selected {} elements with '{}'",
        selected.len(),
        config.render.selector
    );

    let loader = LazyLoader::new(config.sources.clone());
    let load_report = loader.load_all(&mut host, &selected)?;
    println!("{}", report_json(config, &load_report)?);
    Ok(())
}

fn report_json(config: &Config, report: &LoadReport) -> anyhow::Result<String> {
    let json = if config.render.pretty_report {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}
