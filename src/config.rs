use std::time::Duration;

use serde::Serialize;
use url::Url;

use crate::common::ConfigError;

/// Process configuration loaded from the environment.
///
/// | Env Var                | Default            |
/// |------------------------|--------------------|
/// | `BACKEND_URL`          | required           |
/// | `BACKEND_ANON_KEY`     | required           |
/// | `BIND_ADDR`            | `0.0.0.0:8080`     |
/// | `STATIC_DIR`           | `./static`         |
/// | `BACKEND_TIMEOUT_SECS` | `10`               |
/// | `COOKIE_SECURE`        | `true`             |
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub static_dir: String,
    pub cookie_secure: bool,
    pub backend: BackendConfig,
    pub branding: Branding,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: Url,
    pub anon_key: String,
    pub timeout: Duration,
}

impl BackendConfig {
    pub fn new(url: Url, anon_key: impl Into<String>) -> Self {
        Self {
            url,
            anon_key: anon_key.into(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let raw_url = get("BACKEND_URL").ok_or(ConfigError::Missing("BACKEND_URL"))?;
        let url = Url::parse(&raw_url).map_err(|source| ConfigError::InvalidUrl {
            name: "BACKEND_URL",
            source,
        })?;
        let anon_key = get("BACKEND_ANON_KEY").ok_or(ConfigError::Missing("BACKEND_ANON_KEY"))?;

        let timeout = match get("BACKEND_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(v.parse().map_err(|_| ConfigError::InvalidValue {
                name: "BACKEND_TIMEOUT_SECS",
                value: v.clone(),
            })?),
            None => Duration::from_secs(10),
        };

        let cookie_secure = parse_flag(get("COOKIE_SECURE"), "COOKIE_SECURE", true)?;

        let defaults = Branding::default();
        let branding = Branding {
            name: get("SITE_NAME").unwrap_or(defaults.name),
            tagline: get("SITE_TAGLINE").unwrap_or(defaults.tagline),
            logo_url: get("SITE_LOGO_URL").or(defaults.logo_url),
            contact: ContactInfo {
                email: get("CONTACT_EMAIL").unwrap_or(defaults.contact.email),
                phone: get("CONTACT_PHONE").unwrap_or(defaults.contact.phone),
                address: get("CONTACT_ADDRESS").unwrap_or(defaults.contact.address),
            },
            nav_links: defaults.nav_links,
            show_admin_link: parse_flag(
                get("SHOW_ADMIN_LINK"),
                "SHOW_ADMIN_LINK",
                defaults.show_admin_link,
            )?,
        };

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            static_dir: get("STATIC_DIR").unwrap_or_else(|| "./static".to_string()),
            cookie_secure,
            backend: BackendConfig {
                url,
                anon_key,
                timeout,
            },
            branding,
        })
    }
}

fn parse_flag(value: Option<String>, name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(ConfigError::InvalidValue {
            name,
            value: other.to_string(),
        }),
    }
}

/// Branding shared by the navigation bar and footer of every public page.
#[derive(Debug, Clone, Serialize)]
pub struct Branding {
    pub name: String,
    pub tagline: String,
    pub logo_url: Option<String>,
    pub contact: ContactInfo,
    pub nav_links: Vec<NavLink>,
    pub show_admin_link: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            name: "Regenesis Green Energy".to_string(),
            tagline: "Clean Power Solutions".to_string(),
            logo_url: Some("/static/logo.svg".to_string()),
            contact: ContactInfo {
                email: "info@regenesisgreenenergy.com".to_string(),
                phone: "+91 94450 21202".to_string(),
                address: "Bangalore, Karnataka, India 560001".to_string(),
            },
            nav_links: vec![
                NavLink::new("Home", "/"),
                NavLink::new("Projects", "/projects"),
                NavLink::new("About", "/#about"),
            ],
            show_admin_link: true,
        }
    }
}
