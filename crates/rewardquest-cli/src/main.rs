use clap::{CommandFactory, Parser, Subcommand};
use rewardquest_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "rewardquest", version, about = "Reward Quest: earn an activity by staying focused")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one activity suggestion
    Activity(commands::activity::ActivityArgs),
    /// Fetch a reward, then run the focus countdown
    Focus(commands::focus::FocusArgs),
    /// Parse a time input (MM:SS or minutes)
    Parse {
        /// Time text, e.g. "25", "05:30"
        input: String,
    },
    /// Play the alarm tone once
    Alarm,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_tracing(&config);

    let result = match cli.command {
        Commands::Activity(args) => commands::activity::run(args, &config).await,
        Commands::Focus(args) => commands::focus::run(args, &config).await,
        Commands::Parse { input } => commands::parse::run(&input),
        Commands::Alarm => commands::alarm::run(&config).await,
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "rewardquest", &mut std::io::stdout());
            Ok(())
        }
    };

    let code = match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    };
    // A pending tokio stdin read cannot be cancelled and would hold up
    // runtime shutdown until the next line arrives.
    std::process::exit(code);
}
