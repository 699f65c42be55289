use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "braindump", about = "Guided journaling and task board server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the hub server (default)
    Hub,

    /// Create the database and schema
    InitDb,

    /// Replace the question library with the built-in prompt sets
    SeedQuestions,

    /// Show diagnostics information
    Doctor,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Hub) {
        Commands::Hub => braindump_hub::run_hub().await,
        Commands::InitDb => braindump_hub::commands::init_db(),
        Commands::SeedQuestions => braindump_hub::commands::seed_questions(),
        Commands::Doctor => braindump_hub::commands::doctor(),
    }
}
