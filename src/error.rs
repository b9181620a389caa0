use thiserror::Error;

/// Profile configuration problems that make the requested session
/// impossible. Surfaced verbatim; never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A session token minted without MFA grants nothing the bare profile
    /// credentials do not already have
    #[error("No mfa_serial in selected profile, session will be useless")]
    MfaSerialRequired,

    /// The selected profile does not configure a role to assume
    #[error("No role_arn in profile '{0}', nothing to assume")]
    MissingRoleArn(String),
}
