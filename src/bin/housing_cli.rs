//! housing-cli — command-line front end for the Housing Price Predictor API
//!
//! Usage:
//!   housing-cli register <email> --password <pw>   Create an account
//!   housing-cli login <email> --password <pw>      Sign in and keep the token
//!   housing-cli predict [--median-income 6.1 ...]  Price estimate for the cached form
//!   housing-cli users [--offset N --limit N]       List registered users
//!   housing-cli logout                             Forget the token

use clap::{Args, Parser, Subcommand};
use housing_client::config::ClientConfig;
use housing_client::pages::{self, DashboardPage, LoginPage, RegisterPage, Route};
use housing_client::storage::{FileStorage, KeyringStorage, MemoryStorage, Storage};
use housing_client::{ApiClient, ApiClientBuilder, OceanProximity, Page, PredictionRequest};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Parser)]
#[command(
    name = "housing-cli",
    about = "Register, sign in and request housing price predictions",
    version
)]
struct Cli {
    /// API base URL. Falls back to `HOUSING_API_URL`; empty means same-origin.
    #[arg(long = "api-url", value_name = "url", global = true)]
    api_url: Option<String>,
    /// Origin for same-origin requests. Falls back to `HOUSING_ORIGIN`.
    #[arg(long, value_name = "url", global = true)]
    origin: Option<String>,
    /// HTTP(S) proxy for every request. Falls back to `HOUSING_PROXY_URL`.
    #[arg(long, value_name = "url", global = true)]
    proxy: Option<String>,
    /// State file holding the token and cached form. Falls back to `HOUSING_STATE_FILE`.
    #[arg(long, value_name = "path", global = true)]
    state: Option<PathBuf>,
    /// Keep the access token in the OS keyring instead of the state file.
    #[arg(long, global = true)]
    keyring: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an account.
    Register(CredentialArgs),
    /// Sign in and store the access token.
    Login(CredentialArgs),
    /// Forget the stored access token.
    Logout,
    /// Show the API base and whether a token is held.
    Status,
    /// Check that the backend is up.
    Health,
    /// List registered users.
    Users {
        #[arg(long, default_value_t = Page::USERS.offset)]
        offset: u32,
        #[arg(long, default_value_t = Page::USERS.limit)]
        limit: u32,
    },
    /// List past predictions.
    Predictions {
        #[arg(long, default_value_t = Page::PREDICTIONS.offset)]
        offset: u32,
        #[arg(long, default_value_t = Page::PREDICTIONS.limit)]
        limit: u32,
    },
    /// Request a price estimate. Omitted fields come from the cached form.
    Predict(PredictArgs),
}

#[derive(Debug, Args)]
struct CredentialArgs {
    email: String,
    #[arg(
        long,
        env = "HOUSING_PASSWORD",
        hide_env_values = true,
        value_parser = parse_password
    )]
    password: String,
}

#[derive(Debug, Default, Args)]
struct PredictArgs {
    #[arg(long, allow_hyphen_values = true)]
    longitude: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<f64>,
    #[arg(long)]
    housing_median_age: Option<f64>,
    #[arg(long)]
    total_rooms: Option<f64>,
    #[arg(long)]
    total_bedrooms: Option<f64>,
    #[arg(long)]
    population: Option<f64>,
    #[arg(long)]
    households: Option<f64>,
    #[arg(long)]
    median_income: Option<f64>,
    /// One of "NEAR OCEAN", INLAND, "<1H OCEAN", ISLAND, "NEAR BAY".
    #[arg(long)]
    ocean_proximity: Option<OceanProximity>,
}

impl PredictArgs {
    fn apply(&self, form: &mut PredictionRequest) {
        let fields: [(Option<f64>, &mut f64); 8] = [
            (self.longitude, &mut form.longitude),
            (self.latitude, &mut form.latitude),
            (self.housing_median_age, &mut form.housing_median_age),
            (self.total_rooms, &mut form.total_rooms),
            (self.total_bedrooms, &mut form.total_bedrooms),
            (self.population, &mut form.population),
            (self.households, &mut form.households),
            (self.median_income, &mut form.median_income),
        ];
        for (value, slot) in fields {
            if let Some(v) = value {
                *slot = v;
            }
        }
        if let Some(p) = self.ocean_proximity {
            form.ocean_proximity = p;
        }
    }
}

fn parse_password(s: &str) -> Result<String, String> {
    if s.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!("must be at least {} characters", MIN_PASSWORD_LEN));
    }
    Ok(s.to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_client(cli: &Cli) -> anyhow::Result<ApiClient> {
    let mut config = ClientConfig::from_env();
    if let Some(state) = &cli.state {
        config.state_file = Some(state.clone());
    }

    let storage: Arc<dyn Storage> = match config.state_file_path() {
        Some(path) => Arc::new(FileStorage::new(path)),
        None => Arc::new(MemoryStorage::new()),
    };

    let mut builder = ApiClientBuilder::from_config(config).storage(storage);
    if let Some(url) = &cli.api_url {
        builder = builder.base_url(url);
    }
    if let Some(origin) = &cli.origin {
        builder = builder.origin(origin.clone());
    }
    if let Some(proxy) = &cli.proxy {
        builder = builder.proxy_url(proxy.clone());
    }
    if cli.keyring {
        builder = builder.token_storage(Arc::new(KeyringStorage::default()));
    }
    Ok(builder.build()?)
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let client = build_client(&cli)?;

    let code = match cli.command {
        Command::Register(args) => cmd_register(&client, args).await,
        Command::Login(args) => cmd_login(&client, args).await,
        Command::Logout => {
            client.session().clear_token();
            println!("Signed out.");
            ExitCode::SUCCESS
        }
        Command::Status => cmd_status(&client),
        Command::Health => cmd_health(&client).await,
        Command::Users { offset, limit } => cmd_users(&client, Page::new(offset, limit)).await,
        Command::Predictions { offset, limit } => {
            cmd_predictions(&client, Page::new(offset, limit)).await
        }
        Command::Predict(args) => cmd_predict(&client, &args).await,
    };
    Ok(code)
}

fn outcome(status: &str, next: Option<Route>) -> ExitCode {
    println!("{status}");
    if next.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// `false` (after telling the user) when the dashboard would redirect.
fn require_sign_in(client: &ApiClient) -> bool {
    if pages::gate(Route::Dashboard, client.session()) == Route::Dashboard {
        return true;
    }
    eprintln!("Not signed in. Run `housing-cli login <email>` first.");
    false
}

async fn cmd_register(client: &ApiClient, args: CredentialArgs) -> ExitCode {
    if pages::gate(Route::Register, client.session()) != Route::Register {
        println!("Already signed in. Run `housing-cli logout` to switch accounts.");
        return ExitCode::SUCCESS;
    }
    let mut page = RegisterPage::new(args.email, args.password);
    let next = page.submit(client).await;
    outcome(page.status(), next)
}

async fn cmd_login(client: &ApiClient, args: CredentialArgs) -> ExitCode {
    if pages::gate(Route::Login, client.session()) != Route::Login {
        println!("Already signed in. Run `housing-cli logout` to switch accounts.");
        return ExitCode::SUCCESS;
    }
    let mut page = LoginPage::new(args.email, args.password);
    let next = page.submit(client).await;
    outcome(page.status(), next)
}

fn cmd_status(client: &ApiClient) -> ExitCode {
    let base = client.transport().base_url();
    println!(
        "API base: {}",
        if base.is_empty() { "(same-origin)" } else { base }
    );
    if client.session().is_authenticated() {
        println!("Signed in.");
    } else {
        println!("Not signed in.");
    }
    ExitCode::SUCCESS
}

async fn cmd_health(client: &ApiClient) -> ExitCode {
    match client.health().await {
        Ok(health) => {
            println!("Backend status: {}", health.status);
            if health.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn cmd_users(client: &ApiClient, page: Page) -> ExitCode {
    if !require_sign_in(client) {
        return ExitCode::FAILURE;
    }
    match client.list_users_page(page).await {
        Ok(users) => {
            println!("{:>6}  Email", "ID");
            for user in users {
                println!("{:>6}  {}", user.id, user.email);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn cmd_predictions(client: &ApiClient, page: Page) -> ExitCode {
    if !require_sign_in(client) {
        return ExitCode::FAILURE;
    }
    match client.list_predictions_page(page).await {
        Ok(records) => {
            for record in records {
                println!("{record}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn cmd_predict(client: &ApiClient, args: &PredictArgs) -> ExitCode {
    if !require_sign_in(client) {
        return ExitCode::FAILURE;
    }
    let mut page = DashboardPage::open(client);
    page.update_form(|form| args.apply(form));
    page.predict(client).await;

    if page.prediction().is_none() || !page.predict_status().is_empty() {
        eprintln!("{}", page.predict_status());
        return ExitCode::FAILURE;
    }
    println!("Predicted Price: {}", page.prediction_display());
    ExitCode::SUCCESS
}
