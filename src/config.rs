// src/config.rs
use crate::application::services::PeopleSettings;
use std::{env, time::Duration};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    listen_addr: String,
    backend_endpoint: String,
    backend_api_token: Option<String>,
    backend_timeout: Duration,
    biscuit_private_key: String,
    token_ttl: Duration,
    allowed_origins: Vec<String>,
    people: PeopleSettings,
    site: SiteSettings,
    avatar: AvatarSettings,
}

/// Display constants and well-known paths used when rendering pages.
#[derive(Clone, Debug)]
pub struct SiteSettings {
    pub app_name: String,
    pub description: String,
    pub keywords: String,
    pub people_path: String,
    pub signin_path: String,
    pub default_avatar_url: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            app_name: "qaboard".into(),
            description: "A community of people asking and answering questions.".into(),
            keywords: "questions, answers, community".into(),
            people_path: "/people".into(),
            signin_path: "/signin".into(),
            default_avatar_url: "/images/anon.svg".into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AvatarSettings {
    pub timeout: Duration,
    pub max_bytes: usize,
    pub cache_secs: u64,
    pub rate_per_second: u64,
    pub rate_burst: u32,
}

impl Default for AvatarSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_bytes: 1024 * 1024,
            cache_secs: 24 * 60 * 60,
            rate_per_second: 10,
            rate_burst: 20,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_backend_endpoint() -> String {
    "http://localhost:8081".into()
}

fn default_token_ttl() -> u64 {
    3600
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".into()]
}

fn parsed<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{key} has an invalid value '{raw}'"))),
        _ => Ok(None),
    }
}

fn flag(key: &'static str) -> Option<bool> {
    env::var(key)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

fn text(key: &'static str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Reads every setting from the process environment, after loading a
    /// `.env` file if one exists. Only the biscuit root key is mandatory.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let listen_addr = text("LISTEN_ADDR").unwrap_or_else(default_listen_addr);
        let backend_endpoint = text("BACKEND_ENDPOINT").unwrap_or_else(default_backend_endpoint);
        if !backend_endpoint.starts_with("http://") && !backend_endpoint.starts_with("https://") {
            return Err(ConfigError::Invalid(
                "BACKEND_ENDPOINT must be an http(s) URL".into(),
            ));
        }
        let backend_api_token = text("BACKEND_API_TOKEN");
        let backend_timeout = Duration::from_secs(parsed("BACKEND_TIMEOUT_SECS")?.unwrap_or(30));

        let biscuit_private_key = env::var("BISCUIT_ROOT_PRIVATE_KEY")
            .map_err(|_| ConfigError::Missing("BISCUIT_ROOT_PRIVATE_KEY"))?;
        let biscuit_private_key = biscuit_private_key.trim().to_string();
        if biscuit_private_key.len() != 64
            || !biscuit_private_key.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(ConfigError::Invalid(
                "BISCUIT_ROOT_PRIVATE_KEY must be 64 hex characters (an Ed25519 private key)".into(),
            ));
        }

        let token_ttl_secs = parsed("TOKEN_TTL_SECONDS")?.unwrap_or_else(default_token_ttl);

        let allowed_origins = text("ALLOWED_ORIGINS")
            .map(|s| s.split(',').map(|p| p.trim().to_string()).collect())
            .unwrap_or_else(default_allowed_origins);

        let defaults = PeopleSettings::default();
        let people = PeopleSettings {
            default_space: text("DEFAULT_SPACE").unwrap_or(defaults.default_space),
            default_space_public: flag("DEFAULT_SPACE_PUBLIC")
                .unwrap_or(defaults.default_space_public),
            page_size: parsed("PEOPLE_PAGE_SIZE")?.unwrap_or(defaults.page_size),
            bulk_page_size: parsed("MAX_ITEMS_PER_PAGE")?.unwrap_or(defaults.bulk_page_size),
            spaces_limit: parsed("SPACES_LIMIT")?.unwrap_or(defaults.spaces_limit),
        };
        if people.page_size == 0 || people.bulk_page_size == 0 {
            return Err(ConfigError::Invalid("page sizes must be positive".into()));
        }

        let site_defaults = SiteSettings::default();
        let site = SiteSettings {
            app_name: text("APP_NAME").unwrap_or(site_defaults.app_name),
            description: text("APP_DESCRIPTION").unwrap_or(site_defaults.description),
            keywords: text("APP_KEYWORDS").unwrap_or(site_defaults.keywords),
            people_path: site_defaults.people_path,
            signin_path: text("SIGNIN_PATH").unwrap_or(site_defaults.signin_path),
            default_avatar_url: text("DEFAULT_AVATAR_URL")
                .unwrap_or(site_defaults.default_avatar_url),
        };

        let avatar_defaults = AvatarSettings::default();
        let avatar = AvatarSettings {
            timeout: parsed("AVATAR_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(avatar_defaults.timeout),
            max_bytes: parsed("AVATAR_MAX_BYTES")?.unwrap_or(avatar_defaults.max_bytes),
            cache_secs: parsed("AVATAR_CACHE_SECS")?.unwrap_or(avatar_defaults.cache_secs),
            rate_per_second: parsed("AVATAR_RATE_PER_SECOND")?
                .unwrap_or(avatar_defaults.rate_per_second),
            rate_burst: parsed("AVATAR_RATE_BURST")?.unwrap_or(avatar_defaults.rate_burst),
        };

        Ok(Self {
            listen_addr,
            backend_endpoint,
            backend_api_token,
            backend_timeout,
            biscuit_private_key,
            token_ttl: Duration::from_secs(token_ttl_secs),
            allowed_origins,
            people,
            site,
            avatar,
        })
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn backend_endpoint(&self) -> &str {
        &self.backend_endpoint
    }

    pub fn backend_api_token(&self) -> Option<&str> {
        self.backend_api_token.as_deref()
    }

    pub fn backend_timeout(&self) -> Duration {
        self.backend_timeout
    }

    pub fn biscuit_private_key(&self) -> &str {
        &self.biscuit_private_key
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Return the allowed CORS origins as configured.
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn people(&self) -> &PeopleSettings {
        &self.people
    }

    pub fn site(&self) -> &SiteSettings {
        &self.site
    }

    pub fn avatar(&self) -> &AvatarSettings {
        &self.avatar
    }
}
