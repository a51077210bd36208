mod checks;
mod commands;
mod core;
mod logging;
mod ui;
mod utils;

use clap::{Args, Parser, Subcommand};
use crate::core::config::ConfigOverrides;
use crate::core::context::ReleaseContext;
use crate::core::error::{ReleaseError, print_error};
use std::path::PathBuf;

/// Build and push a container image tagged with the version from a VERSION file
#[derive(Parser)]
#[command(name = "image-release")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Show diagnostic logs on stderr (see also IMAGE_RELEASE_LOG)
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Defaults to `publish` when omitted
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  // ============================================================================
  // Release
  // ============================================================================
  /// Build the image tagged with the current version, then push it
  Publish {
    #[command(flatten)]
    config: ConfigArgs,
    /// Show the plan without running the engine
    #[arg(long)]
    dry_run: bool,
    /// Build only, do not push
    #[arg(long)]
    skip_push: bool,
    /// Capture engine output and show a progress bar instead
    #[arg(short, long)]
    quiet: bool,
    /// Output the plan or report in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Show what publish would run (same as publish --dry-run)
  Plan {
    #[command(flatten)]
    config: ConfigArgs,
    /// Plan a build without a push
    #[arg(long)]
    skip_push: bool,
    /// Output the plan in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Print the image tag derived from the version file
  Tag {
    #[command(flatten)]
    config: ConfigArgs,
    /// Output tag details in JSON format
    #[arg(long)]
    json: bool,
  },

  // ============================================================================
  // Setup & Inspection
  // ============================================================================
  /// Run health checks and diagnostics
  Doctor {
    #[command(flatten)]
    config: ConfigArgs,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Write a release.toml with default settings
  Init {
    /// Image name to record (namespace/name)
    #[arg(long)]
    image: Option<String>,
    /// Overwrite an existing configuration
    #[arg(long)]
    force: bool,
  },
}

/// Settings that override release.toml
#[derive(Args, Default)]
struct ConfigArgs {
  /// Image name without tag (e.g. callumjones/traccar)
  #[arg(long)]
  image: Option<String>,
  /// Container engine binary (e.g. docker, podman)
  #[arg(long)]
  engine: Option<String>,
  /// Version file, relative to the build context
  #[arg(long)]
  version_file: Option<PathBuf>,
  /// Build context directory
  #[arg(long)]
  context: Option<PathBuf>,
}

impl From<ConfigArgs> for ConfigOverrides {
  fn from(args: ConfigArgs) -> Self {
    ConfigOverrides {
      image_name: args.image,
      engine: args.engine,
      version_file: args.version_file,
      context: args.context,
    }
  }
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Cyan))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Cyan))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();
  logging::init(cli.verbose);

  let root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  let command = cli.command.unwrap_or(Commands::Publish {
    config: ConfigArgs::default(),
    dry_run: false,
    skip_push: false,
    quiet: false,
    json: false,
  });

  let result = match command {
    Commands::Publish {
      config,
      dry_run,
      skip_push,
      quiet,
      json,
    } => ReleaseContext::build(&root, config.into()).and_then(|ctx| {
      commands::run_publish(
        &ctx,
        commands::PublishOptions {
          dry_run,
          skip_push,
          quiet,
          json,
        },
      )
    }),
    Commands::Plan {
      config,
      skip_push,
      json,
    } => ReleaseContext::build(&root, config.into()).and_then(|ctx| commands::run_plan(&ctx, skip_push, json)),
    Commands::Tag { config, json } => {
      ReleaseContext::build(&root, config.into()).and_then(|ctx| commands::run_tag(&ctx, json))
    }
    Commands::Doctor { config, json } => commands::run_doctor(&root, config.into(), json),
    Commands::Init { image, force } => commands::run_init(&root, image, force),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  tracing::debug!(error = ?err, "command failed");
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
