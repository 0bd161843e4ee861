use anyhow::{Context, Result, bail};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
const DEFAULT_DATABASE: &str = "qrcodes";
const DEFAULT_SHORT_ID_LENGTH: usize = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub port: u16,
    /// Base for landing redirects, also always an allowed CORS origin.
    pub frontend_url: String,
    pub allowed_origins: Vec<String>,
    /// Public base of this service, embedded in minted QR codes.
    pub public_url: String,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub auth: AuthConfig,
    pub short_id_length: usize,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub key: JwtKey,
    pub issuer: Option<String>,
}

#[derive(Clone)]
pub enum JwtKey {
    Secret(String),
    RsaPem(String),
}

impl std::fmt::Debug for JwtKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtKey::Secret(_) => write!(f, "Secret(..)"),
            JwtKey::RsaPem(_) => write!(f, "RsaPem(..)"),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Treat blank variables as unset
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(p) => p.parse::<u16>().context("PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };

        let frontend_url = trim_base(&var("FRONTEND_URL").unwrap_or(DEFAULT_FRONTEND_URL.into()));

        let mut allowed_origins = vec![frontend_url.clone()];
        for origin in var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|o| trim_base(o.trim()))
            .filter(|o| !o.is_empty())
        {
            if !allowed_origins.contains(&origin) {
                allowed_origins.push(origin);
            }
        }

        let public_url = trim_base(
            &var("PUBLIC_URL").unwrap_or_else(|| format!("http://localhost:{}", port)),
        );

        let mongodb_uri = var("MONGODB_URI").context("MONGODB_URI not set")?;

        let key = match (var("JWT_PUBLIC_KEY"), var("JWT_SECRET")) {
            (Some(pem), _) => JwtKey::RsaPem(pem.replace("\\n", "\n")),
            (None, Some(secret)) => JwtKey::Secret(secret),
            (None, None) => bail!("Either JWT_PUBLIC_KEY or JWT_SECRET must be set"),
        };

        let short_id_length = match var("SHORT_ID_LENGTH") {
            Some(len) => len
                .parse::<usize>()
                .context("SHORT_ID_LENGTH must be a number")?,
            None => DEFAULT_SHORT_ID_LENGTH,
        };
        if !(4..=32).contains(&short_id_length) {
            bail!("SHORT_ID_LENGTH must be between 4 and 32");
        }

        Ok(Self {
            bind_address: var("BIND_ADDRESS").unwrap_or("0.0.0.0".into()),
            port,
            frontend_url,
            allowed_origins,
            public_url,
            mongodb_uri,
            mongodb_database: var("MONGODB_DATABASE").unwrap_or(DEFAULT_DATABASE.into()),
            auth: AuthConfig {
                key,
                issuer: var("JWT_ISSUER"),
            },
            short_id_length,
        })
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
