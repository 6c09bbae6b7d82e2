use clap::{Parser, Subcommand, ValueEnum};
use postfolder::config::{self, FolderConfig, RunConfig};
use postfolder::imaging::{Quality, RustBackend};
use postfolder::publish::{Credentials, HttpService};
use postfolder::run::Orchestrator;
use postfolder::select::{self, SelectionPolicy};
use postfolder::{caption, logging, output};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "postfolder")]
#[command(about = "Post the next image from a folder, then archive it")]
#[command(long_about = "\
Post the next image from a folder, then archive it

Each run picks one image from the folder, converts it to JPEG if needed,
uploads it with a caption built from its filename, and moves it to history/.

Folder structure:

  photos/
  ├── postfolder.toml          # Optional settings (see gen-config)
  ├── sunset_over_bay.jpg      # Posted as \"sunset over bay #tag ...\"
  ├── harbour.webp             # Converted to harbour.jpg first
  └── history/                 # Processed files, never selected again

Supported: .jpg .jpeg (posted as is), .png .webp .gif (converted).

Run it from cron or a systemd timer. Runs must not overlap.")]
#[command(version)]
struct Cli {
    /// Folder to scan for images
    #[arg(long, default_value = ".", global = true)]
    folder: PathBuf,

    /// Log every pipeline stage
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Most recently modified image first
    Newest,
    /// Earliest modified image first (queue)
    Oldest,
}

impl From<PolicyArg> for SelectionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Newest => SelectionPolicy::Newest,
            PolicyArg::Oldest => SelectionPolicy::Oldest,
        }
    }
}

/// Flags shared by commands that select a candidate.
#[derive(clap::Args, Clone)]
struct SelectionArgs {
    /// Which image to post; overrides [selection] policy
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Comma-separated hashtags appended to the caption
    #[arg(long, env = "INSTA_TAG")]
    tags: Option<String>,
}

#[derive(clap::Args)]
struct RunArgs {
    #[command(flatten)]
    selection: SelectionArgs,

    /// Account name
    #[arg(long, env = "INSTA_USERNAME")]
    username: String,

    /// Account password
    #[arg(long, env = "INSTA_PASS", hide_env_values = true)]
    password: Option<String>,

    /// Base URL of the publishing service; overrides [publish] endpoint
    #[arg(long, env = "INSTA_ENDPOINT")]
    endpoint: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Select, convert, post and archive one image
    Run(RunArgs),
    /// Show which image the next run would post, without changing anything
    Check {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Print the selected candidate as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock postfolder.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Logger setup failed: {e}");
    }

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Run(args) => {
            let folder_config = config::load_config(&cli.folder)?;
            let credentials = Credentials::new(args.username, args.password.unwrap_or_default());
            let run_config =
                resolve_run_config(&cli.folder, &folder_config, &args.selection, credentials);

            let endpoint = args
                .endpoint
                .unwrap_or_else(|| folder_config.publish.endpoint.clone());
            if endpoint.is_empty() {
                return Err(
                    "no publishing endpoint: set [publish] endpoint or INSTA_ENDPOINT".into(),
                );
            }
            let service = HttpService::new(&endpoint, folder_config.publish.timeout())?;

            let orchestrator = Orchestrator::new(run_config, RustBackend::new(), service);
            let outcome = orchestrator.run()?;
            output::print_run_output(&outcome, &cli.folder);
        }
        Command::Check { selection, json } => {
            let folder_config = config::load_config(&cli.folder)?;
            let policy = resolve_policy(&folder_config, &selection);
            let tags = resolve_tags(&folder_config, &selection);

            let candidate = select::select(&cli.folder, policy)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&candidate)?);
            } else {
                output::print_check_output(candidate.as_ref(), policy, &tags, &cli.folder);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn resolve_policy(folder_config: &FolderConfig, args: &SelectionArgs) -> SelectionPolicy {
    args.policy
        .map(SelectionPolicy::from)
        .unwrap_or(folder_config.selection.policy)
}

/// Tags from the command line or `INSTA_TAG` win over `[publish] tags`.
fn resolve_tags(folder_config: &FolderConfig, args: &SelectionArgs) -> Vec<String> {
    match &args.tags {
        Some(list) => caption::parse_tags(list),
        None => folder_config.publish.tags.clone(),
    }
}

fn resolve_run_config(
    folder: &Path,
    folder_config: &FolderConfig,
    args: &SelectionArgs,
    credentials: Credentials,
) -> RunConfig {
    RunConfig {
        root: folder.to_path_buf(),
        policy: resolve_policy(folder_config, args),
        credentials,
        tags: resolve_tags(folder_config, args),
        quality: Quality::new(folder_config.convert.quality),
    }
}
