use clap::{Parser, Subcommand};
use folio::types::WorkData;
use folio::{cards, config, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("FOLIO_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("FOLIO_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            let dirty = if env!("FOLIO_GIT_DIRTY") == "true" {
                "+dirty"
            } else {
                ""
            };
            // Leaked once at startup
            Box::leak(format!("dev@{hash}{dirty}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Check and pre-render portfolio work data")]
#[command(long_about = "\
Check and pre-render portfolio work data

The portfolio page loads data.json in the browser and renders one card per
work item into #experience-cards, #publications-cards and #projects-cards.
This tool runs the same renderer outside the browser.

data.json layout:

  {
    \"experience\":   [ { \"title\", \"subtitle\"?, \"date\", \"description\", \"image\", \"link\" } ],
    \"publications\": [ ... ],
    \"projects\":     [ ... ]
  }

Dates are ISO (2023-03-15, 2023-03 or 2023) and render as \"March 2023\".

Run 'folio gen-config' to generate a documented folio.toml. The same TOML
can be inlined in the page as <script type=\"application/toml\" id=\"folio-config\">.")]
#[command(version = version_string())]
struct Cli {
    /// Work data document
    #[arg(long, default_value = "data.json", global = true)]
    data: PathBuf,

    /// Behavior config (stock defaults when the file does not exist)
    #[arg(long, default_value = "folio.toml", global = true)]
    config: PathBuf,

    /// Output directory for rendered card fragments
    #[arg(long, default_value = "dist/cards", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the work data and list every card
    Check,
    /// Write one HTML fragment of cards per category
    Render,
    /// Print a stock folio.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")?
        .log_to_stderr()
        .start()?;
    let cli = Cli::parse();

    match cli.command {
        Command::Check => {
            config::load_config(&cli.config)?;
            let data = read_data(&cli)?;
            println!("==> Checking {}", cli.data.display());
            let warnings = cards::lint(&data);
            output::print_check_output(&data, &warnings);
            if warnings.is_empty() {
                println!("==> Work data is valid");
            }
        }
        Command::Render => {
            let config = config::load_config(&cli.config)?;
            let data = read_data(&cli)?;
            let files = cards::render_to_dir(&data, &config.work, &cli.output)?;
            output::print_render_output(&files, &cli.output);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn read_data(cli: &Cli) -> Result<WorkData, Box<dyn std::error::Error>> {
    log::debug!("reading {}", cli.data.display());
    let text = std::fs::read_to_string(&cli.data)
        .map_err(|e| format!("cannot read {}: {e}", cli.data.display()))?;
    Ok(WorkData::parse(&text)?)
}
