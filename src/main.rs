use clap::{Parser, Subcommand};
use preset_pages::generate::Generator;
use preset_pages::probe::{self, ProbeMode};
use preset_pages::{config, logging, output, scan};
use std::path::PathBuf;

fn version_string() -> &'static str {
    if env!("PRESET_PAGES_ON_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    let hash = env!("PRESET_PAGES_GIT_HASH");
    if hash.is_empty() {
        "dev@unknown"
    } else {
        // Leaked once at startup
        Box::leak(format!("dev@{hash}").into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "preset-pages")]
#[command(about = "Generate Markdown catalogue pages for a preset repository")]
#[command(long_about = "\
Generate Markdown catalogue pages for a preset repository

Top-level folders are categories, files inside them are presets. Filenames
follow author_..._name.ext: the author comes before the first underscore,
the name after the last one.

Repository structure:

  repo/
  ├── config.toml                 # Optional generator config
  ├── docs/                       # Output: index.md + <category>.md
  ├── images/
  │   └── Farms/
  │       └── Steve_BigFarm.jpg   # Thumbnail for Farms/Steve_BigFarm.json
  └── Farms/
      └── Steve_BigFarm.json      # Author \"Steve\", name \"BigFarm\"

Presets without a reachable thumbnail get the placeholder image.

Run 'preset-pages gen-config' to print a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Repository root containing the category folders
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file [default: <root>/config.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output directory, overrides `output_dir` from the config
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// How thumbnail existence is checked
    #[arg(long, value_enum, default_value_t = ProbeMode::Remote, global = true)]
    probe: ProbeMode,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write index.md and one page per category
    Generate,
    /// Print discovered categories and presets as JSON
    Scan,
    /// List categories and presets without probing or writing
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let load_config = || match &cli.config {
        Some(path) => config::load_config_file(path),
        None => config::load_config(&cli.root),
    };

    match cli.command {
        Command::Generate => {
            let site_config = load_config()?;
            let output_dir = cli
                .output
                .clone()
                .unwrap_or_else(|| site_config.output_path(&cli.root));
            let thumbnail_probe =
                probe::for_mode(cli.probe, &cli.root, site_config.probe.timeout())?;

            println!("==> Generating pages → {}", output_dir.display());
            let generator =
                Generator::new(&cli.root, &site_config, output_dir, thumbnail_probe.as_ref());
            let report = generator.generate()?;
            output::print_generate_output(&report, &cli.root);
        }
        Command::Scan => {
            let site_config = load_config()?;
            let manifest = scan::scan(&cli.root, &site_config)?;
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
        Command::Check => {
            let site_config = load_config()?;
            println!("==> Checking {}", cli.root.display());
            let manifest = scan::scan(&cli.root, &site_config)?;
            output::print_scan_output(&manifest);
            println!("==> Repository is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
