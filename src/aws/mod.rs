use aws_smithy_types::DateTime;

pub mod sts;

/// AWS temporary credentials structure
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: DateTime,
}

/// Identity of the caller as reported by STS. Pure data; one lookup
/// produces one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub account: String,
    pub arn: String,
    pub user_id: String,
}
