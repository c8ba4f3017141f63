//! `tomlet` command-line tool: manifest readers, session generator,
//! scaffolder, TCP forwarder and JSON dump.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tomlet::error::ConfigError;
use tomlet::export;
use tomlet::tools::{self, forward::shutdown_signal, Forwarder, Mode, ScaffoldOptions};

#[derive(Parser, Debug)]
#[command(name = "tomlet")]
#[command(about = "Config-subset parser and script-manifest tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a top-level string field of a manifest
    ReadField {
        toml_path: PathBuf,
        field: String,
    },

    /// Print `id<TAB>name<TAB>path` for each manifest
    List {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Emit a bash script running a manifest's test steps
    Session {
        #[arg(long = "toml")]
        toml: PathBuf,

        #[arg(long, value_enum)]
        mode: Mode,

        /// Repository root exported as REPO_ROOT
        #[arg(long)]
        root: PathBuf,
    },

    /// Create scripts/<id>/ with an entry script, README and manifest
    Scaffold {
        id: String,

        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        one_line: String,

        #[arg(long, default_value = ".")]
        repo_root: PathBuf,

        /// Directory holding custom *.tmpl files
        #[arg(long)]
        templates: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Forward TCP connections to a target until interrupted
    Forward {
        #[arg(long, default_value = "0.0.0.0")]
        listen_host: String,

        /// Port to listen on (0 picks a free one)
        #[arg(long, default_value = "0")]
        listen_port: u16,

        #[arg(long)]
        target_host: String,

        #[arg(long)]
        target_port: u16,
    },

    /// Print a parsed config file as JSON
    Dump {
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tomlet=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    debug!(command = ?cli.command, "starting");

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(command: Command) -> Result<(), ConfigError> {
    match command {
        Command::ReadField { toml_path, field } => {
            println!("{}", tools::read_field(&toml_path, &field)?);
        }
        Command::List { paths } => {
            for path in &paths {
                println!("{}", tools::list_entry(path)?);
            }
        }
        Command::Session { toml, mode, root } => {
            print!("{}", tools::generate_session(&toml, mode, &root));
        }
        Command::Scaffold { id, name, one_line, repo_root, templates, force } => {
            let opts = ScaffoldOptions { id, name, one_line, repo_root, templates, force };
            for path in tools::scaffold(&opts)? {
                println!("[OK] Created {}", path.display());
            }
        }
        Command::Forward { listen_host, listen_port, target_host, target_port } => {
            let forwarder = Forwarder::bind(&listen_host, listen_port, target_host, target_port).await?;
            let port = forwarder
                .local_addr()
                .map_err(|e| ConfigError::runtime(format!("failed to read bound address: {}", e)))?
                .port();
            println!("{}", port);
            forwarder.run_until(shutdown_signal()).await;
        }
        Command::Dump { path } => {
            println!("{}", export::file_to_json(&path)?);
        }
    }
    Ok(())
}
