use clap::{Parser, Subcommand};
use recipe_tools::config::{self, ToolsConfig};
use recipe_tools::vcs::{GitUntracker, Untracker};
use recipe_tools::{index, normalize, output};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Shared flags for commands that convert images.
#[derive(clap::Args, Clone)]
struct ImageArgs {
    /// Keep source images after conversion (overrides images.delete_originals)
    #[arg(long)]
    keep_originals: bool,

    /// Do not rewrite image references in documents
    #[arg(long)]
    no_references: bool,
}

impl ImageArgs {
    fn apply(&self, config: &mut ToolsConfig) {
        if self.keep_originals {
            config.images.delete_originals = false;
        }
        if self.no_references {
            config.references.enabled = false;
        }
    }
}

/// `X.Y.Z` on a release tag, `dev@<commit>` otherwise.
fn version_string() -> &'static str {
    if env!("RECIPE_TOOLS_RELEASE") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("RECIPE_TOOLS_COMMIT") {
        "" => "dev@unknown",
        // Leaked once at startup, called exactly once
        commit => Box::leak(format!("dev@{commit}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "recipe-tools")]
#[command(about = "Image and index maintenance for a static recipe site")]
#[command(long_about = "\
Image and index maintenance for a static recipe site

Site structure:

  docs/
  ├── config.toml          # Optional, see 'recipe-tools gen-config'
  ├── index.json           # Written by 'recipe-tools index'
  ├── images/              # Converted by 'recipe-tools images'
  │   ├── cake.webp        #   primary variant
  │   └── cake_lower.webp  #   half-size preview
  └── recipes/
      └── cake.json        # {\"title\": ..., \"ingredients\": [...]}

Images that already have both .webp variants are skipped, so every command
can be re-run safely.

Run 'recipe-tools gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site docs root
    #[arg(long, default_value = "docs", global = true)]
    root: PathBuf,

    /// Delete originals without running `git rm` first
    #[arg(long, global = true)]
    no_git: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert images to WebP and rewrite references to them
    Images(ImageArgs),
    /// Write index.json from the recipe documents
    Index,
    /// Run both: images, then index
    Build(ImageArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Command::Images(image_args) => {
            let mut config = config::load_config(&cli.root)?;
            image_args.apply(&mut config);
            run_images(cli, &config)?;
        }
        Command::Index => {
            let config = config::load_config(&cli.root)?;
            run_index(&cli.root, &config)?;
        }
        Command::Build(image_args) => {
            let mut config = config::load_config(&cli.root)?;
            image_args.apply(&mut config);

            println!("==> Stage 1: Images");
            run_images(cli, &config)?;

            println!("==> Stage 2: Index");
            run_index(&cli.root, &config)?;

            println!("==> Build complete: {}", cli.root.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn run_images(cli: &Cli, config: &ToolsConfig) -> Result<(), normalize::NormalizeError> {
    let git = GitUntracker::new();
    let untracker: Option<&dyn Untracker> = if cli.no_git { None } else { Some(&git) };

    let summary = normalize::normalize(&cli.root, config, untracker, |event| {
        output::print_normalize_event(&event, &cli.root)
    })?;
    output::print_normalize_summary(&summary);
    Ok(())
}

fn run_index(root: &Path, config: &ToolsConfig) -> Result<(), index::IndexError> {
    let summary = index::build_index(root, &config.index, |event| {
        output::print_index_event(&event)
    })?;
    output::print_index_summary(&summary, root);
    Ok(())
}
