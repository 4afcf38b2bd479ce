use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use fmeda::comments::{CommentStore, Severity, DEFAULT_STORE_PATH};
use fmeda::{common, drawio, plan, plan_execution};

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a run plan: parse the diagram and write every export
    Run {
        #[clap(short, long)]
        plan: String,
    },
    /// Write a starter run plan
    Init {
        #[clap(short, long)]
        plan: String,
    },
    /// Parse a diagram and print its meta (hash, counts) as JSON
    Inspect { file: String },
    /// Review comments on FMEDA rows
    Comment {
        #[clap(subcommand)]
        command: CommentCommands,
    },
}

#[derive(Subcommand)]
enum CommentCommands {
    /// Attach a comment to one FMEDA row of a diagram
    Add {
        #[clap(short, long)]
        diagram: String,
        #[clap(short, long)]
        row_id: String,
        /// FMEDA column the comment refers to
        #[clap(short, long, default_value = "notes")]
        field: String,
        #[clap(short, long, value_enum, default_value = "minor")]
        severity: Severity,
        #[clap(short, long)]
        text: String,
        #[clap(long, default_value = DEFAULT_STORE_PATH)]
        store: String,
    },
    /// Print the comment log as JSON
    List {
        #[clap(long, default_value = DEFAULT_STORE_PATH)]
        store: String,
    },
}

fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        Commands::Run { plan } => {
            plan_execution::execute_plan(&plan)?;
        }
        Commands::Init { plan } => {
            info!("Initializing plan: {}", plan);
            let plan_file_path = plan;
            let plan = plan::Plan::default();
            let serialized_plan = serde_yaml::to_string(&plan)?;
            common::write_string_to_file(std::path::Path::new(&plan_file_path), &serialized_plan)?;
        }
        Commands::Inspect { file } => {
            let bytes = std::fs::read(&file)?;
            let diagram = drawio::parse(&bytes)?;
            info!("{}", diagram.stats());
            println!("{}", serde_json::to_string_pretty(&diagram.meta)?);
        }
        Commands::Comment { command } => match command {
            CommentCommands::Add {
                diagram,
                row_id,
                field,
                severity,
                text,
                store,
            } => {
                let entry = plan_execution::add_comment(
                    &diagram, &store, &row_id, &field, severity, &text,
                )?;
                println!("{}", serde_json::to_string_pretty(&entry)?);
            }
            CommentCommands::List { store } => {
                let entries = CommentStore::new(store).load();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            }
        },
    }

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_string()))
        .without_time()
        .init();
}
