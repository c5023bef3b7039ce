mod commands;
mod output;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dsn-index",
    version,
    about = "Gender pay equality index from DSN payroll declarations"
)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a declaration and show what was reconstructed (without analysing)
    Parse {
        /// Path to a DSN declaration file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the parse result to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Compute the equality indicators from one or more monthly declarations
    Analyze {
        /// Declaration files; two or more enable the period comparison
        #[arg(required = true)]
        input_files: Vec<PathBuf>,

        /// Predefined option set: all, retabli (default), brut
        #[arg(short, long, value_name = "NAME", conflicts_with = "options")]
        preset: Option<String>,

        /// Custom JSON option file
        #[arg(long, value_name = "FILE")]
        options: Option<PathBuf>,

        /// Count only this remuneration type (repeatable, overrides the preset)
        #[arg(short = 't', long = "type", value_name = "CODE")]
        types: Vec<String>,

        /// Reference date for ages, DDMMYYYY
        #[arg(short, long, value_name = "DDMMYYYY")]
        reference_date: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// List every employee with category, age bracket and total
        #[arg(long)]
        show_employees: bool,
    },
    /// List the known remuneration types
    Types,
    /// Inspect and validate analysis options
    Options {
        #[command(subcommand)]
        action: OptionsAction,
    },
}

#[derive(Subcommand)]
enum OptionsAction {
    /// List predefined option sets
    List,
    /// Print a predefined option set as JSON
    Show {
        /// Preset name (e.g., "retabli")
        name: String,
    },
    /// Validate a custom option file
    Validate {
        /// Path to JSON option file
        file: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dsn_core={level},dsn_index={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Parse {
            input_file,
            output,
            out,
        } => commands::parse::run(input_file, &output, out),
        Commands::Analyze {
            input_files,
            preset,
            options,
            types,
            reference_date,
            output,
            show_employees,
        } => commands::analyze::run(commands::analyze::AnalyzeArgs {
            input_files,
            preset,
            options,
            types,
            reference_date,
            output,
            show_employees,
        }),
        Commands::Types => commands::types::run(),
        Commands::Options { action } => match action {
            OptionsAction::List => commands::options::list(),
            OptionsAction::Show { name } => commands::options::show(&name),
            OptionsAction::Validate { file } => commands::options::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
