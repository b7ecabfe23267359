use clap::{Parser, Subcommand};
use efforts::{
    config::AppConfig, connect, correlation::RunContext, effort_service::EffortProcessor,
    run_server,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(author, version, about = "Best and worst effort extraction", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP trigger endpoints
    Serve,
    /// Compute and store efforts for the given activities
    Process {
        /// Activity IDs to process
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        activity_ids: Vec<i64>,

        /// Process every stored activity
        #[arg(long)]
        all: bool,

        /// Correlation ID for this run (generated when omitted)
        #[arg(long)]
        correlation_id: Option<Uuid>,
    },
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = AppConfig::from_env()?;
    let db = connect(&config).await?;

    match cli.command {
        Command::Serve => run_server(db, &config).await,
        Command::Process {
            activity_ids,
            all,
            correlation_id,
        } => {
            let ctx = correlation_id
                .map(RunContext::with_correlation_id)
                .unwrap_or_default();

            let ids = if all {
                db.list_activity_ids().await?
            } else {
                activity_ids
            };

            let processor = EffortProcessor::new(
                db.clone(),
                db,
                config.targets.clone(),
                config.stream_policy,
            );
            let summary = processor.run_batch(&ctx, &ids).await;

            tracing::info!(
                "Done: {} processed, {} skipped, {} failed",
                summary.processed,
                summary.skipped,
                summary.failed
            );
            Ok(())
        }
    }
}
