use std::num::NonZeroUsize;

use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use syncliked::{cli, config, error, types::TransferRequest, utils};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in with Spotify through the browser
    Login,

    /// Remove the stored Spotify token
    Logout,

    /// Show whether a Spotify token is stored
    Status,

    /// Copy your liked songs into a new playlist
    Transfer(TransferOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TransferOptions {
    /// Name of the playlist to create
    #[clap(long, default_value = "My Liked Songs")]
    name: String,

    /// Make the playlist public
    #[clap(long)]
    public: bool,

    /// Only copy the most recently liked N songs
    #[clap(long, value_parser = utils::parse_song_limit)]
    limit: Option<NonZeroUsize>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };

    match cli.command {
        Command::Login => cli::login(config).await,
        Command::Logout => cli::logout(config).await,
        Command::Status => cli::status(config).await,
        Command::Transfer(opt) => {
            let request = TransferRequest::new(opt.name)
                .public(opt.public)
                .limit(opt.limit);
            cli::transfer(config, request).await
        }
        Command::Completions(_) => {}
    }
}
