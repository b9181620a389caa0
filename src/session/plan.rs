use crate::config::ProfileConfig;
use crate::constants::DEFAULT_SESSION_DURATION_SECONDS;
use crate::error::ConfigError;

/// Parameters common to both STS authentication calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthParams {
    /// MFA device to satisfy; `None` means no MFA parameters are sent
    pub serial_number: Option<String>,
    pub duration_seconds: i32,
}

/// Which STS operation will produce the session credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// GetSessionToken for the caller's own identity
    SessionToken(AuthParams),
    /// AssumeRole into the profile's configured role
    AssumeRole { role_arn: String, params: AuthParams },
}

/// Decide how to authenticate for a profile. Pure; evaluated once per
/// session.
///
/// An ambient session token means MFA was already satisfied, so the serial
/// is suppressed. Duration precedence: explicit override, then the
/// profile's setting, then the systemwide default.
pub fn plan(
    profile: &str,
    config: &ProfileConfig,
    no_role: bool,
    duration_override: Option<i32>,
    ambient_session: bool,
) -> Result<AuthMethod, ConfigError> {
    let serial_number = if ambient_session {
        None
    } else {
        config.mfa_serial.clone()
    };

    let duration_seconds = duration_override
        .or(config.duration_seconds)
        .unwrap_or(DEFAULT_SESSION_DURATION_SECONDS);

    let params = AuthParams {
        serial_number,
        duration_seconds,
    };

    if no_role {
        if params.serial_number.is_none() && !ambient_session {
            return Err(ConfigError::MfaSerialRequired);
        }
        Ok(AuthMethod::SessionToken(params))
    } else {
        let role_arn = config
            .role_arn
            .clone()
            .ok_or_else(|| ConfigError::MissingRoleArn(profile.to_string()))?;
        Ok(AuthMethod::AssumeRole { role_arn, params })
    }
}
