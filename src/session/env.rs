use std::collections::HashMap;

use chrono::{TimeZone, Utc};

use crate::aws::Credentials;
use crate::config::ProfileConfig;

/// Role metadata recorded when (and only when) a role was assumed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssumedRole {
    pub role_arn: String,
    pub session_name: String,
}

/// Build the environment overlay for a set of obtained credentials
///
/// Optional settings are signaled by omitting the key, never by an empty
/// value, so consumers can test key presence.
pub fn credentials_env(
    creds: &Credentials,
    profile: &str,
    config: &ProfileConfig,
    assumed_role: Option<&AssumedRole>,
) -> HashMap<String, String> {
    let mut env = HashMap::new();

    env.insert("AWS_ACCESS_KEY_ID".to_string(), creds.access_key_id.clone());
    env.insert(
        "AWS_SECRET_ACCESS_KEY".to_string(),
        creds.secret_access_key.clone(),
    );
    env.insert("AWS_SESSION_TOKEN".to_string(), creds.session_token.clone());
    env.insert("AWS_RUNAS_PROFILE".to_string(), profile.to_string());

    let expiration_unix = creds.expiration.secs();
    env.insert(
        "AWS_SESSION_EXPIRATION".to_string(),
        format_expiration(expiration_unix),
    );
    env.insert(
        "AWS_SESSION_EXPIRATION_UNIX".to_string(),
        expiration_unix.to_string(),
    );

    if let Some(role) = assumed_role {
        env.insert(
            "AWS_RUNAS_ASSUMED_ROLE_ARN".to_string(),
            role.role_arn.clone(),
        );
        env.insert(
            "AWS_ROLE_SESSION_NAME".to_string(),
            role.session_name.clone(),
        );
    }

    if let Some(region) = &config.region {
        env.insert("AWS_REGION".to_string(), region.clone());
        env.insert("AWS_DEFAULT_REGION".to_string(), region.clone());
    }

    env
}

/// Render a Unix timestamp as a human-readable UTC expiration string
pub fn format_expiration(unix: i64) -> String {
    Utc.timestamp_opt(unix, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| unix.to_string())
}
