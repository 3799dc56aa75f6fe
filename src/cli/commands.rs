//! CLI command implementations

use anyhow::{Context, Result};
use std::fs;

use crate::auth::models::{ErrorBody, LoginResponse};
use crate::auth::{token, ClientSession, FileStore, Guard, Navigation, SessionEvidence, TokenClaims};
use crate::cli::{
    error, format_access, format_role, info, print_profile_table, success, warn, OutputFormat,
    TokenAction,
};
use crate::config::{self, loader::CONFIG_FILENAME, Config};

/// Initialize a new forgedesk.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new(CONFIG_FILENAME);

    if config_path.exists() {
        warn(&format!("{} already exists", CONFIG_FILENAME));
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success(&format!("Created {}", CONFIG_FILENAME));
    info("Run 'forgedesk serve' to start the server");

    Ok(())
}

/// Start the HTTP server
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = load_config()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting server at http://{}:{}", host, port));

    crate::api::run_server(config, &host, port).await?;
    Ok(())
}

/// Log in against the server and persist the session
pub async fn login(email: &str, password: &str, server: Option<String>) -> Result<()> {
    let config = load_config()?;
    let base = server.unwrap_or_else(|| config.client.server_url.clone());
    let url = format!("{}/api/auth/login", base.trim_end_matches('/'));

    let response = reqwest::Client::new()
        .post(&url)
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", url))?;

    if !response.status().is_success() {
        let status = response.status();
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| format!("Login failed ({})", status));
        error(&message);
        anyhow::bail!(message);
    }

    let login: LoginResponse = response.json().await?;
    let mut session = client_session(&config);
    session.persist(&login)?;

    success(&format!(
        "Logged in as {} ({})",
        login.user.name,
        format_role(login.user.role)
    ));
    Ok(())
}

/// Clear the stored session
pub async fn logout() -> Result<()> {
    let config = load_config()?;
    let mut session = client_session(&config);

    let Navigation::To(next) = session.logout();
    success("Logged out");
    info(&format!("Sign in again at {}{}", config.client.server_url, next));
    Ok(())
}

/// Show the stored identity
pub async fn whoami(format: OutputFormat) -> Result<()> {
    let config = load_config()?;
    let ctx = client_session(&config).snapshot();

    let Some(user) = ctx.user.as_ref().filter(|_| ctx.is_authenticated()) else {
        warn("Not logged in. Run 'forgedesk login --email <email> --password <password>'");
        return Ok(());
    };

    match format {
        OutputFormat::Table => print_profile_table(user),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(user)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(user)?),
    }

    Ok(())
}

/// Run the route guard for a path against the given evidence
pub async fn check(path: &str, token: Option<String>, user: Option<String>) -> Result<()> {
    let config = load_config()?;
    let guard = Guard::from_config(&config.auth);
    let evidence = SessionEvidence { token, user };

    let access = guard.check(path, &evidence);
    println!("{} {}", path, format_access(&access));
    Ok(())
}

/// Token encode/decode helpers
pub async fn token(action: TokenAction) -> Result<()> {
    match action {
        TokenAction::Issue { id, email } => {
            println!("{}", token::encode_claims(&TokenClaims { user_id: id, email }));
        }
        TokenAction::Decode { token: raw } => match token::decode(&raw) {
            Ok(claims) => println!("{}", serde_json::to_string_pretty(&claims)?),
            Err(e) => {
                error(&e.to_string());
                return Err(e.into());
            }
        },
    }
    Ok(())
}

fn client_session(config: &Config) -> ClientSession<FileStore> {
    ClientSession::new(
        FileStore::new(&config.client.session_file),
        config.auth.login_path.clone(),
    )
}

fn load_config() -> Result<Config> {
    Ok(config::load_or_default()?)
}
