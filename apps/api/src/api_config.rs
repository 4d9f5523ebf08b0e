use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use stratum_application::{AuthorizationConfig, DEFAULT_LOOKUP_TIMEOUT};
use stratum_core::{AppError, RoleId};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub frontend_url: String,
    pub bootstrap_token: String,
    pub api_host: String,
    pub api_port: u16,
    pub cookie_secure: bool,
    pub authorization: AuthorizationConfig,
    pub role_grant_cache_ttl: Duration,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = required_env("DATABASE_URL")?;
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let bootstrap_token = required_non_empty_env("AUTH_BOOTSTRAP_TOKEN")?;

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");

        let lookup_timeout = optional_env("AUTHZ_LOOKUP_TIMEOUT_MS")
            .map(|value| parse_u64("AUTHZ_LOOKUP_TIMEOUT_MS", &value).map(Duration::from_millis))
            .transpose()?
            .unwrap_or(DEFAULT_LOOKUP_TIMEOUT);
        if lookup_timeout.is_zero() {
            return Err(AppError::Validation(
                "AUTHZ_LOOKUP_TIMEOUT_MS must be greater than zero".to_owned(),
            ));
        }

        let role_grant_cache_ttl = optional_env("AUTHZ_ROLE_GRANT_CACHE_TTL_SECONDS")
            .map(|value| {
                parse_u64("AUTHZ_ROLE_GRANT_CACHE_TTL_SECONDS", &value).map(Duration::from_secs)
            })
            .transpose()?
            .unwrap_or(Duration::ZERO);

        let system_role_ids = optional_env("AUTHZ_SYSTEM_ROLE_IDS")
            .map(|value| parse_role_ids(&value))
            .transpose()?
            .unwrap_or_default();

        let bootstrap_admin_emails = optional_env("AUTHZ_BOOTSTRAP_ADMIN_EMAILS")
            .map(|value| parse_list(&value))
            .unwrap_or_default();

        let authorization = AuthorizationConfig::default()
            .with_lookup_timeout(lookup_timeout)
            .with_system_role_ids(system_role_ids)
            .with_bootstrap_admin_emails(bootstrap_admin_emails);

        Ok(Self {
            migrate_only,
            database_url,
            frontend_url,
            bootstrap_token,
            api_host,
            api_port,
            cookie_secure,
            authorization,
            role_grant_cache_ttl,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u64(name: &str, value: &str) -> Result<u64, AppError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|error| AppError::Validation(format!("invalid {name} '{value}': {error}")))
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn parse_role_ids(value: &str) -> Result<Vec<RoleId>, AppError> {
    parse_list(value)
        .iter()
        .map(|entry| {
            RoleId::parse(entry).map_err(|error| {
                AppError::Validation(format!("invalid AUTHZ_SYSTEM_ROLE_IDS entry: {error}"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use stratum_core::RoleId;

    use super::{parse_list, parse_role_ids, parse_u64};

    #[test]
    fn list_values_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_list(" admin@acme.example, ,ops@acme.example "),
            vec!["admin@acme.example".to_owned(), "ops@acme.example".to_owned()]
        );
    }

    #[test]
    fn role_ids_must_all_be_valid() {
        let role_id = RoleId::new();
        let parsed = parse_role_ids(&format!("{role_id}, {role_id}"));
        assert!(parsed.is_ok_and(|ids| ids == vec![role_id, role_id]));

        assert!(parse_role_ids(&format!("{role_id},not-a-uuid")).is_err());
    }

    #[test]
    fn numeric_settings_reject_garbage() {
        assert_eq!(parse_u64("AUTHZ_LOOKUP_TIMEOUT_MS", " 250 ").unwrap_or_default(), 250);
        assert!(parse_u64("AUTHZ_LOOKUP_TIMEOUT_MS", "-5").is_err());
    }
}
