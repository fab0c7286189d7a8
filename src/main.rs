use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tokio::sync::Mutex;
use wrappedcli::{
    cli, config, error,
    types::{OauthExchange, TermWindow},
};

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
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Link a Spotify account
    Auth,

    /// Remove a linked account's stored credential
    Disconnect(UserOption),

    /// Handle the cached listening profile
    Profile(ProfileOptions),

    /// Create Wrapped reports and browse past ones
    Wrapped(WrappedOptions),

    /// Create a Duo report with another account
    Duo(DuoOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct UserOption {
    /// Spotify account id (defaults to the current account)
    #[clap(long)]
    pub user: Option<String>,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Handle the cached listening profile",
    args_conflicts_with_subcommands = true // disallow mixing query flags with `update`
)]
pub struct ProfileOptions {
    /// Spotify account id (defaults to the current account)
    #[clap(long)]
    pub user: Option<String>,

    /// Term window to display
    #[clap(long, value_enum, default_value = "medium")]
    pub term: TermWindow,

    /// Subcommands under `profile` (e.g., `update`)
    #[command(subcommand)]
    pub command: Option<ProfileSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProfileSubcommand {
    /// Update the cached profile from Spotify
    Update(UserOption),
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Create Wrapped reports and browse past ones",
    args_conflicts_with_subcommands = true // disallow mixing create flags with `history`
)]
pub struct WrappedOptions {
    /// Spotify account id (defaults to the current account)
    #[clap(long)]
    pub user: Option<String>,

    /// Term window the report covers
    #[clap(long, value_enum, default_value = "medium")]
    pub term: TermWindow,

    /// Roast the quirky picks instead of the favorites
    #[clap(long)]
    pub quirky: bool,

    /// Subcommands under `wrapped` (e.g., `history`)
    #[command(subcommand)]
    pub command: Option<WrappedSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum WrappedSubcommand {
    /// List past reports
    History(UserOption),
}

#[derive(Parser, Debug, Clone)]
pub struct DuoOptions {
    /// Spotify account id (defaults to the current account)
    #[clap(long)]
    pub user: Option<String>,

    /// The other account's Spotify id
    #[clap(long)]
    pub peer: String,

    /// Term window the report covers
    #[clap(long, value_enum, default_value = "medium")]
    pub term: TermWindow,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli_args = Cli::parse();

    match cli_args.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<OauthExchange>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Disconnect(opt) => cli::disconnect(opt.user).await,

        Command::Profile(opt) => match opt.command {
            Some(ProfileSubcommand::Update(u)) => cli::update_profile(u.user).await,
            None => cli::show_profile(opt.user, opt.term).await,
        },

        Command::Wrapped(opt) => match opt.command {
            Some(WrappedSubcommand::History(u)) => cli::wrapped_history(u.user).await,
            None => cli::create_wrapped(opt.user, opt.term, opt.quirky).await,
        },

        Command::Duo(opt) => cli::duo(opt.user, opt.peer, opt.term).await,

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
