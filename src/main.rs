use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use gamedeck::config::{ClientConfig, ConfigError, normalize_base_url};
use gamedeck::net::api::{ApiClient, ListGamesQuery};
use gamedeck::net::error::ApiError;
use gamedeck::net::types::{GamePayload, User};
use gamedeck::router::{NavigationError, Router};
use gamedeck::state::{auth, session::SessionStore};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Api(ApiError),
    #[error("{0} (log in with --username and --password)")]
    Unauthorized(ApiError),
    #[error("navigation failed: {0}")]
    Navigation(#[from] NavigationError),
    #[error("--username requires --password (or GAMEDECK_PASSWORD)")]
    MissingPassword,
    #[error("nothing to update; pass at least one field")]
    EmptyUpdate,
    #[error("invalid JSON output: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        if err.is_unauthorized() { Self::Unauthorized(err) } else { Self::Api(err) }
    }
}

#[derive(Parser, Debug)]
#[command(name = "gamedeck", about = "Game catalogue API client")]
struct Cli {
    /// API base URL.
    #[arg(long, env = "GAMEDECK_API_BASE")]
    api_base: Option<String>,

    /// Bearer token sent with every request.
    #[arg(long, env = "GAMEDECK_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Log in as this user before running the command.
    #[arg(long, env = "GAMEDECK_USERNAME")]
    username: Option<String>,

    #[arg(long, env = "GAMEDECK_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve each path through the guarded router, in order.
    Navigate {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Show the current session user.
    Me,
    Login {
        username: String,
        #[arg(long, env = "GAMEDECK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    Register {
        username: String,
        #[arg(long, env = "GAMEDECK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Games(GamesCommand),
}

#[derive(Args, Debug)]
struct GamesCommand {
    #[command(subcommand)]
    command: GamesSubcommand,
}

#[derive(Subcommand, Debug)]
enum GamesSubcommand {
    List {
        #[arg(long)]
        q: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        title: String,
        #[command(flatten)]
        fields: GameFields,
    },
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: GameFields,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
struct GameFields {
    #[arg(long)]
    genre: Option<String>,
    #[arg(long)]
    url: Option<String>,
    #[arg(long)]
    image_url: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    rating: Option<f64>,
}

impl GameFields {
    fn into_payload(self, title: Option<String>) -> GamePayload {
        GamePayload {
            title,
            genre: self.genre,
            url: self.url,
            image_url: self.image_url,
            description: self.description,
            rating: self.rating,
        }
    }
}

#[derive(Serialize)]
struct NavigationReport<'a> {
    requested: &'a str,
    route: &'static str,
    path: &'static str,
    redirected: bool,
}

#[derive(Serialize)]
struct MeReport<'a> {
    authenticated: bool,
    admin: bool,
    user: Option<&'a User>,
}

impl<'a> MeReport<'a> {
    fn new(user: Option<&'a User>) -> Self {
        Self { authenticated: user.is_some(), admin: user.is_some_and(User::is_admin), user }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // A missing .env is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gamedeck=info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base) = cli.api_base.as_deref().filter(|b| !b.trim().is_empty()) {
        config.api_base = normalize_base_url(base);
    }
    if let Some(key) = cli.api_key.filter(|k| !k.trim().is_empty()) {
        config.api_key = key;
    }

    let api = ApiClient::new(config)?;
    let session = Arc::new(SessionStore::new(Arc::new(api.clone())));

    if let Some(username) = &cli.username {
        let password = cli.password.as_deref().ok_or(CliError::MissingPassword)?;
        auth::login(&api, &session, username, password).await?;
    }

    match cli.command {
        Command::Navigate { paths } => run_navigate(Router::app(session), &paths).await,
        Command::Me => {
            session.ensure_loaded().await?;
            let user = session.user();
            print_json(&MeReport::new(user.as_ref()))
        }
        Command::Login { username, password } => print_json(&auth::login(&api, &session, &username, &password).await?),
        Command::Logout => print_json(&auth::logout(&api, &session).await?),
        Command::Register { username, password } => print_json(&auth::register(&api, &username, &password).await?),
        Command::Games(games) => run_games(&api, games).await,
    }
}

async fn run_navigate(router: Router, paths: &[String]) -> Result<(), CliError> {
    for path in paths {
        let nav = router.navigate(path).await?;
        print_json(&NavigationReport {
            requested: path,
            route: nav.name.as_str(),
            path: nav.path,
            redirected: nav.was_redirected(),
        })?;
    }
    Ok(())
}

async fn run_games(api: &ApiClient, games: GamesCommand) -> Result<(), CliError> {
    match games.command {
        GamesSubcommand::List { q, limit, offset } => {
            print_json(&api.list_games(&ListGamesQuery { q, limit, offset }).await?)
        }
        GamesSubcommand::Get { id } => print_json(&api.get_game(id).await?),
        GamesSubcommand::Create { title, fields } => {
            print_json(&api.create_game(&fields.into_payload(Some(title))).await?)
        }
        GamesSubcommand::Update { id, title, fields } => {
            let payload = fields.into_payload(title);
            if payload.is_empty() {
                return Err(CliError::EmptyUpdate);
            }
            print_json(&api.update_game(id, &payload).await?)
        }
        GamesSubcommand::Delete { id } => print_json(&api.delete_game(id).await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
