use clap::{Parser, Subcommand};
use dsviz::cli::{self, compare_sorts, render_report, show_info, SessionOptions};
use dsviz::{Kind, ModelConfig, Result};
use std::path::PathBuf;
use std::process::ExitCode;

/// Version info from build.rs
const VERSION: &str = env!("DSVIZ_VERSION");
const BUILD: &str = env!("DSVIZ_BUILD");
const PROFILE: &str = env!("DSVIZ_PROFILE");
const GIT_HASH: &str = env!("DSVIZ_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} build {} ({})", PROFILE, VERSION, BUILD, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "dsviz")]
#[command(author, about = "Step-driven data structures and sorting", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// Save file (overrides the config file)
    #[arg(long, global = true)]
    save_file: Option<PathBuf>,

    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for random sorter contents
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Structures to activate, comma separated
    #[arg(
        long,
        global = true,
        value_delimiter = ',',
        default_value = "list,stack,queue,insertion,bubble",
        value_parser = parse_kind
    )]
    kinds: Vec<Kind>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a value to every active structure
    #[command(alias = "a")]
    Add {
        value: String,

        /// Put the value at the head of the list instead of the tail
        #[arg(long)]
        prepend: bool,
    },

    /// Insert a value into the list at an index
    Insert { value: String, index: usize },

    /// Remove a value, or pop/dequeue when none is given
    #[command(alias = "rm")]
    Remove { value: Option<String> },

    /// Look a value up; prints -1 when not found
    Find { value: String },

    /// Clear every active structure and reseed the sorters
    Reset,

    /// Print the active structures
    Show,

    /// Run the active sorters, resuming a paused sort
    Sort {
        /// Print every intermediate sequence
        #[arg(long)]
        trace: bool,

        /// Stop after this many steps, leaving the sort paused
        #[arg(long)]
        max_steps: Option<usize>,

        /// Start over even if a sort is paused
        #[arg(long)]
        restart: bool,
    },

    /// Race insertion sort against bubble sort on one random sequence
    Compare {
        /// Number of values
        #[arg(long, default_value = "10")]
        len: usize,

        /// Print every lockstep round
        #[arg(long)]
        trace: bool,
    },

    /// Show information about a save file
    #[command(alias = "i")]
    Info {
        /// Save file to inspect (defaults to the configured one)
        file: Option<PathBuf>,
    },
}

fn parse_kind(s: &str) -> std::result::Result<Kind, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn build_config(args: &Cli) -> Result<ModelConfig> {
    let mut config = match &args.config {
        Some(path) => ModelConfig::from_json_file(path)?,
        None => ModelConfig::default(),
    };
    if let Some(path) = &args.save_file {
        config = config.with_save_path(path);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

fn run(args: &Cli, command: Commands) -> Result<String> {
    let config = build_config(args)?;
    let options = SessionOptions {
        config,
        kinds: args.kinds.clone(),
    };

    match command {
        Commands::Add { value, prepend } => cli::add(&options, value, prepend),
        Commands::Insert { value, index } => cli::insert(&options, value, index),
        Commands::Remove { value } => cli::remove(&options, value),
        Commands::Find { value } => cli::find(&options, value),
        Commands::Reset => cli::reset(&options),
        Commands::Show => cli::show(&options),
        Commands::Sort {
            trace,
            max_steps,
            restart,
        } => cli::sort(&options, trace, max_steps, restart),
        Commands::Compare { len, trace } => {
            let report = compare_sorts(options.config.seed, len, options.config.value_bound);
            Ok(render_report(&report, trace))
        }
        Commands::Info { file } => {
            let path = file.unwrap_or(options.config.save_path);
            show_info(&path)
        }
    }
}

fn main() -> ExitCode {
    let mut args = Cli::parse();
    dsviz::logging::init();

    if args.version {
        println!("dsviz {}", get_version());
        return ExitCode::SUCCESS;
    }

    let command = match args.command.take() {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            if let Err(e) = Cli::command().print_help() {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
            println!();
            return ExitCode::SUCCESS;
        }
    };

    match run(&args, command) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
