use anyhow::{Context, Result, bail};
use clap::Parser;
use std::env;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Secret used to sign new tokens.
    pub jwt_secret: String,
    /// Retired secrets still accepted when verifying tokens.
    pub jwt_previous_secrets: Vec<String>,
    pub token_ttl_minutes: i64,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Bucket list management API")]
pub struct Args {
    /// Host to bind to (overrides BUCKETLIST_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides BUCKETLIST_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides BUCKETLIST_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Token signing secret (overrides BUCKETLIST_JWT_SECRET)
    #[arg(long)]
    pub jwt_secret: Option<String>,

    /// Token lifetime in minutes (overrides BUCKETLIST_TOKEN_TTL_MINUTES)
    #[arg(long)]
    pub token_ttl_minutes: Option<i64>,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,
}

const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        let args = Args::parse();

        // --- Environment fallback ---
        let env_host = env::var("BUCKETLIST_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match env::var("BUCKETLIST_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing BUCKETLIST_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 8080,
            Err(err) => return Err(err).context("reading BUCKETLIST_PORT"),
        };
        let env_db = env::var("BUCKETLIST_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./data/bucketlist.db".into());
        let env_ttl = match env::var("BUCKETLIST_TOKEN_TTL_MINUTES") {
            Ok(value) => value.parse::<i64>().with_context(|| {
                format!("parsing BUCKETLIST_TOKEN_TTL_MINUTES value `{}`", value)
            })?,
            Err(env::VarError::NotPresent) => DEFAULT_TOKEN_TTL_MINUTES,
            Err(err) => return Err(err).context("reading BUCKETLIST_TOKEN_TTL_MINUTES"),
        };
        let previous = env::var("BUCKETLIST_JWT_PREVIOUS_SECRETS").unwrap_or_default();

        let jwt_secret = match args.jwt_secret {
            Some(secret) => secret,
            None => env::var("BUCKETLIST_JWT_SECRET")
                .context("BUCKETLIST_JWT_SECRET (or --jwt-secret) must be set")?,
        };
        if jwt_secret.trim().is_empty() {
            bail!("token signing secret must not be empty");
        }

        let token_ttl_minutes = args.token_ttl_minutes.unwrap_or(env_ttl);
        if token_ttl_minutes <= 0 {
            bail!("token lifetime must be positive, got {}", token_ttl_minutes);
        }

        // --- Merge ---
        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            database_url: args.database_url.unwrap_or(env_db),
            jwt_secret,
            jwt_previous_secrets: parse_secret_list(&previous),
            token_ttl_minutes,
        };

        Ok((cfg, args.migrate))
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Secrets are never printed, only counted.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"<redacted>")
            .field("jwt_previous_secrets", &self.jwt_previous_secrets.len())
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .finish()
    }
}

/// Split a comma separated secret list, dropping blanks.
fn parse_secret_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
