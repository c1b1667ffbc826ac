use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod config;
mod handlers;
mod logging;
mod reply;
mod staging;
mod state;

use handlers::PlanArgs;
use reply::Reply;

#[derive(Parser, Debug)]
#[command(name = "goalpath", version, about = "Statement summaries and savings goal projections")]
struct Cli {
    /// Config file (default: ~/.goalpath/config.toml)
    #[arg(long, global = true, env = "GOALPATH_CONFIG")]
    config: Option<PathBuf>,

    /// Log level or filter directive; overrides RUST_LOG and the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a statement (.csv, .xlsx or .pdf) as JSON
    Ingest {
        file: PathBuf,
    },

    /// Project a savings goal from a JSON request (file or stdin)
    Predict {
        /// Request file; reads stdin when omitted
        #[arg(long)]
        request: Option<PathBuf>,
    },

    /// Summarize a statement and project a goal against it
    Plan {
        file: PathBuf,

        #[arg(long)]
        income: f64,

        #[arg(long)]
        cost: f64,

        #[arg(long = "goal-type", default_value = "purchase")]
        goal_type: String,

        /// Restrict the projection window to these months (YYYY-MM)
        #[arg(long, value_delimiter = ',')]
        months: Vec<String>,
    },

    /// Summarize several statements concurrently
    Batch {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;
    logging::setup_logging(cli.log_level.as_deref(), &cfg.log_level)?;

    let max_upload = cfg.ingest.max_upload_bytes;

    let reply = match cli.command {
        Command::Ingest { file } => handlers::ingest(&file, max_upload)?,

        Command::Predict { request } => handlers::predict(request.as_deref(), &cfg.cuts)?,

        Command::Plan {
            file,
            income,
            cost,
            goal_type,
            months,
        } => {
            let args = PlanArgs {
                monthly_income: income,
                goal_type,
                goal_cost: cost,
                months,
            };
            handlers::plan(&file, &args, max_upload, &cfg.cuts)?
        }

        Command::Batch { files } => handlers::batch(files, cfg.runtime.workers, max_upload).await?,

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                config::init_config(cli.config.as_deref())?;
                return Ok(ExitCode::SUCCESS);
            }
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg)?);
                return Ok(ExitCode::SUCCESS);
            }
        },
    };

    emit(&reply)
}

fn emit(reply: &Reply) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(&reply.body)?);
    Ok(reply.status.exit_code())
}
