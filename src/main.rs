use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use hivemind::config::ClientConfig;
use hivemind::domain::{Credentials, DevicePatch, DeviceState, DeviceStatus, DeviceType, NewDevice, Power, group_by_api_key};
use hivemind::error::ApiError;
use hivemind::http::HttpClient;
use hivemind::llm::{LlmClient, LlmError};
use hivemind::repositories::{ApiKeyRepository, AuthRepository, DeviceRepository};
use hivemind::services::{ApiKeyService, AuthService, DeviceService};
use hivemind::session::Session;
use hivemind::suggestions::{self, SuggestionsInput};
use hivemind::use_cases::LoginUseCase;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Auth(String),
    #[error("api request failed: {0}")]
    Api(#[from] ApiError),
    #[error("llm unavailable: {0}")]
    Llm(#[from] LlmError),
    #[error("{0}")]
    Suggestions(String),
    #[error("pass either --password or --otp")]
    MissingSecret,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("failed to read {path}: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "hivemind", about = "Hivemind smart home API CLI")]
struct Cli {
    /// Overrides `NEXT_PUBLIC_API_URL`.
    #[arg(long, env = "NEXT_PUBLIC_API_URL")]
    api_url: Option<String>,

    /// Overrides `HIVEMIND_STATE_DIR`.
    #[arg(long, env = "HIVEMIND_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Use this token instead of the stored session.
    #[arg(long, env = "HIVEMIND_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login(LoginArgs),
    Signup(SignupArgs),
    Logout,
    Whoami,
    SendOtp {
        #[arg(long)]
        email: String,
    },
    Devices(DevicesCommand),
    ApiKeys(ApiKeysCommand),
    Suggest(SuggestArgs),
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    email: String,
    #[arg(long, env = "HIVEMIND_PASSWORD", conflicts_with = "otp")]
    password: Option<String>,
    #[arg(long)]
    otp: Option<String>,
}

#[derive(Args, Debug)]
struct SignupArgs {
    #[arg(long)]
    email: String,
    #[arg(long, env = "HIVEMIND_PASSWORD")]
    password: String,
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct DevicesCommand {
    #[command(subcommand)]
    command: DevicesSubcommand,
}

#[derive(Subcommand, Debug)]
enum DevicesSubcommand {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        room: String,
        #[arg(long = "type")]
        device_type: DeviceType,
        #[arg(long)]
        api_key_id: Option<String>,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        room: Option<String>,
        #[arg(long = "type")]
        device_type: Option<DeviceType>,
        /// `on`, `off`, or a numeric level.
        #[arg(long)]
        state: Option<DeviceState>,
        #[arg(long, value_parser = parse_status)]
        status: Option<DeviceStatus>,
        #[arg(long)]
        api_key_id: Option<String>,
    },
    Delete {
        id: String,
    },
    /// Devices grouped under the API key they reference.
    Grouped,
}

#[derive(Args, Debug)]
struct ApiKeysCommand {
    #[command(subcommand)]
    command: ApiKeysSubcommand,
}

#[derive(Subcommand, Debug)]
enum ApiKeysSubcommand {
    List,
    Create {
        #[arg(long)]
        name: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Args, Debug)]
struct SuggestArgs {
    /// JSON file with historical usage data. Defaults to a sample household.
    #[arg(long, requires = "preferences")]
    usage: Option<PathBuf>,
    /// JSON file with automation preferences.
    #[arg(long, requires = "usage")]
    preferences: Option<PathBuf>,
    #[arg(long, default_value = "user-12345")]
    user_id: String,
}

struct Services {
    auth: AuthService,
    devices: DeviceService,
    api_keys: ApiKeyService,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_lookup(|key| match key {
        "NEXT_PUBLIC_API_URL" => cli.api_url.clone(),
        "HIVEMIND_STATE_DIR" => cli.state_dir.as_ref().map(|p| p.display().to_string()),
        _ => std::env::var(key).ok(),
    });

    let http = HttpClient::new(&config, Session::open(&config))?;
    let services = Services {
        auth: AuthService::new(http.clone()),
        devices: DeviceService::new(http.clone()),
        api_keys: ApiKeyService::new(http),
    };
    let token = cli.token.as_deref();

    match cli.command {
        Command::Login(args) => run_login(&services, args).await,
        Command::Signup(args) => run_signup(&services, args).await,
        Command::Logout => {
            services.auth.logout().await?;
            print_json(&serde_json::json!({ "ok": true }))
        }
        Command::Whoami => print_json(&services.auth.current_user().await),
        Command::SendOtp { email } => {
            services.auth.send_otp(&email).await?;
            print_json(&serde_json::json!({ "ok": true }))
        }
        Command::Devices(cmd) => run_devices(&services, cmd, token).await,
        Command::ApiKeys(cmd) => run_api_keys(&services, cmd, token).await,
        Command::Suggest(args) => run_suggest(args).await,
    }
}

async fn run_login(services: &Services, args: LoginArgs) -> Result<(), CliError> {
    let credentials = match (args.password, args.otp) {
        (Some(password), None) => Credentials::with_password(&args.email, &password),
        (None, Some(otp)) => Credentials::with_otp(&args.email, &otp),
        _ => return Err(CliError::MissingSecret),
    };
    let login = LoginUseCase::new(Arc::new(services.auth.clone()));
    let response = login
        .execute(&credentials)
        .await
        .map_err(|e| CliError::Auth(e.user_message()))?;
    print_json(&response.user)
}

async fn run_signup(services: &Services, args: SignupArgs) -> Result<(), CliError> {
    let credentials = Credentials::with_password(&args.email, &args.password);
    let response = services
        .auth
        .signup(&credentials, &args.name)
        .await
        .map_err(|e| CliError::Auth(e.user_message()))?;
    print_json(&response.user)
}

async fn run_devices(services: &Services, cmd: DevicesCommand, token: Option<&str>) -> Result<(), CliError> {
    match cmd.command {
        DevicesSubcommand::List => print_json(&services.devices.get_devices(token).await?),
        DevicesSubcommand::Add { name, room, device_type, api_key_id } => {
            let device = NewDevice {
                name,
                device_type,
                room,
                state: DeviceState::Power(Power::Off),
                status: DeviceStatus::Online,
                last_seen: None,
                icon_name: Some(device_type.icon_name().to_owned()),
                api_key_id,
            };
            print_json(&services.devices.add_device(&device, token).await?)
        }
        DevicesSubcommand::Update { id, name, room, device_type, state, status, api_key_id } => {
            let patch = DevicePatch {
                name,
                device_type,
                room,
                state,
                status,
                icon_name: device_type.map(|t| t.icon_name().to_owned()),
                api_key_id,
            };
            if patch.is_empty() {
                return Err(CliError::InvalidArgument("nothing to update".into()));
            }
            print_json(&services.devices.update_device(&id, &patch, token).await?)
        }
        DevicesSubcommand::Delete { id } => {
            services.devices.delete_device(&id, token).await?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
        DevicesSubcommand::Grouped => {
            let (devices, keys) = tokio::try_join!(services.devices.get_devices(token), services.api_keys.get_api_keys(token))?;
            print_json(&group_by_api_key(&devices, &keys))
        }
    }
}

async fn run_api_keys(services: &Services, cmd: ApiKeysCommand, token: Option<&str>) -> Result<(), CliError> {
    match cmd.command {
        ApiKeysSubcommand::List => print_json(&services.api_keys.get_api_keys(token).await?),
        ApiKeysSubcommand::Create { name } => print_json(&services.api_keys.create_api_key(&name, token).await?),
        ApiKeysSubcommand::Delete { id } => {
            services.api_keys.delete_api_key(&id, token).await?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
    }
}

async fn run_suggest(args: SuggestArgs) -> Result<(), CliError> {
    let input = match (args.usage, args.preferences) {
        (Some(usage), Some(preferences)) => SuggestionsInput {
            user_id: args.user_id,
            historical_usage_data: read_json_file(usage)?,
            preferences: read_json_file(preferences)?,
        },
        _ => suggestions::demo_input(),
    };
    let llm = LlmClient::from_env()?;
    let result = suggestions::get_smart_suggestions(&llm, &input).await;
    match result.error {
        Some(message) => Err(CliError::Suggestions(message)),
        None => print_json(&result),
    }
}

/// Read a file and check it holds JSON; the text is passed on verbatim.
fn read_json_file(path: PathBuf) -> Result<String, CliError> {
    let text = std::fs::read_to_string(&path).map_err(|source| CliError::ReadFile { path, source })?;
    serde_json::from_str::<serde_json::Value>(&text)?;
    Ok(text)
}

fn parse_status(raw: &str) -> Result<DeviceStatus, String> {
    match raw {
        "online" => Ok(DeviceStatus::Online),
        "offline" => Ok(DeviceStatus::Offline),
        other => Err(format!("status must be 'online' or 'offline', got '{other}'")),
    }
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
