use clap::{Parser, Subcommand};
use focus_balance::{
    client::DEFAULT_BASE_URL,
    controller::{SubmitOutcome, View},
    router, AppState, Config, HttpApi, MemoryView, SubmitKind, UiController,
};
use std::{net::SocketAddr, process::ExitCode};
use tokio::fs;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "focus_balance")]
#[command(about = "Work/relax minute balance tracker", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Server URL used by the client commands
    #[arg(long, env = "FOCUS_URL", default_value = DEFAULT_BASE_URL, global = true)]
    url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Show the current balance
    Status,
    /// Log worked minutes
    Work {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Spend relax minutes
    Relax {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Set the daily target in minutes
    Target {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = init_tracing() {
        eprintln!("failed to initialise logging: {err}");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();
    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve().await,
        Commands::Status => status(&cli.url).await,
        Commands::Work { value } => submit(&cli.url, SubmitKind::Work, &value).await,
        Commands::Relax { value } => submit(&cli.url, SubmitKind::Relax, &value).await,
        Commands::Target { value } => submit(&cli.url, SubmitKind::Target, &value).await,
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn serve() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let data = focus_balance::load_data(&config.data_path).await;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(
        data_path = %config.data_path.display(),
        utc_offset = %config.utc_offset,
        "loaded ledger"
    );
    let app = router(AppState::new(config, data));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(ExitCode::SUCCESS)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn status(url: &str) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let controller = UiController::new(HttpApi::new(url));
    let mut view = MemoryView::default();
    controller.refresh(&mut view).await?;
    println!("{}", view.summary());
    Ok(ExitCode::SUCCESS)
}

async fn submit(url: &str, kind: SubmitKind, value: &str) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let controller = UiController::new(HttpApi::new(url));
    let mut view = MemoryView::default();
    view.set_input_value(kind.input_id(), value);

    match controller.submit_minutes(kind, &mut view).await? {
        SubmitOutcome::Rejected => {
            for message in &view.alerts {
                eprintln!("{message}");
            }
            Ok(ExitCode::from(2))
        }
        SubmitOutcome::Submitted(_) => {
            println!("{}", view.summary());
            Ok(ExitCode::SUCCESS)
        }
    }
}
