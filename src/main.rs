use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use viewport_breakpoints::background::{ImageSizes, ResponsiveBackground};
use viewport_breakpoints::{config, output, simulate};

#[derive(Parser)]
#[command(name = "viewport-breakpoints")]
#[command(about = "Replay viewport widths through responsive background breakpoints")]
#[command(long_about = "\
Replay viewport widths through responsive background breakpoints

Images are keyed by the minimum viewport width at which they apply. The
active image is the one with the greatest width not exceeding the viewport
width; it is applied only when the active breakpoint changes.

  [images]
  \"0\" = \"img/xs.jpg\"      # below 320px
  \"320\" = \"img/sm.jpg\"    # 320px - 767px
  \"768\" = \"img/md.jpg\"    # 768px and up

The table can also be given inline in the data-bg-images JSON form:

  --sizes '{\"0\":\"img/xs.jpg\",\"320\":\"img/sm.jpg\"}'

Run 'viewport-breakpoints gen-config' to generate a documented breakpoints.toml.")]
#[command(version)]
struct Cli {
    /// Config file (stock defaults when missing)
    #[arg(long, default_value = "breakpoints.toml", global = true)]
    config: PathBuf,

    /// Image table as a JSON object; replaces the config's [images]
    #[arg(long, global = true)]
    sizes: Option<String>,

    /// Log breakpoint transitions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Feed a sequence of widths and show every transition
    Simulate {
        /// Viewport widths in order (defaults to [simulate] widths)
        widths: Vec<f64>,
    },
    /// Show the image applied at a single width
    Resolve {
        /// Viewport width in pixels
        width: f64,
    },
    /// Validate the config and list its breakpoints
    Check,
    /// Print a stock breakpoints.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Simulate { widths } => {
            let (site, sizes) = load_table(&cli.config, cli.sizes.as_deref())?;
            let widths = if widths.is_empty() {
                site.simulate.widths
            } else {
                widths
            };
            let sim = simulate::simulate(&sizes, &widths)?;
            output::print_simulation(&sim);
        }
        Command::Resolve { width } => {
            let (_, sizes) = load_table(&cli.config, cli.sizes.as_deref())?;
            let mut background = ResponsiveBackground::new(sizes, |_: &str| {});
            background.notify_width_changed(width)?;
            output::print_resolve(width, background.current_image());
        }
        Command::Check => {
            let (_, sizes) = load_table(&cli.config, cli.sizes.as_deref())?;
            output::print_breakpoints(&sizes);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config file and pick the image table: `--sizes` JSON wins over
/// the file's `[images]`.
fn load_table(
    path: &Path,
    sizes_json: Option<&str>,
) -> Result<(config::Config, ImageSizes), Box<dyn std::error::Error>> {
    let site = config::load_config(path)?;
    debug!(path = %path.display(), "loaded config");
    let sizes = match sizes_json {
        Some(json) => ImageSizes::from_json(json)?,
        None => site.images.clone(),
    };
    info!(breakpoints = sizes.len(), "image table ready");
    Ok((site, sizes))
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
