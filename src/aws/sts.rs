use anyhow::{Context, Result};
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sts::Client as StsClient;
use tracing::{debug, info};

use super::{CallerIdentity, Credentials};
use crate::constants::DEFAULT_AWS_REGION;

/// Build a profile-scoped STS client
///
/// Region priority: explicit region -> profile/env config -> DEFAULT_AWS_REGION
pub async fn client(profile: &str, region: Option<&str>) -> StsClient {
    let mut loader = aws_config::defaults(BehaviorVersion::latest()).profile_name(profile);
    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }
    let loaded = loader.load().await;

    let config = match loaded.region() {
        Some(region) => {
            debug!("Using region {} for STS", region);
            loaded
        }
        None => {
            info!(
                "No region configured, using default {} for STS",
                DEFAULT_AWS_REGION
            );
            aws_config::defaults(BehaviorVersion::latest())
                .profile_name(profile)
                .region(Region::new(DEFAULT_AWS_REGION))
                .load()
                .await
        }
    };

    StsClient::new(&config)
}

/// Look up who the profile's credentials belong to
pub async fn get_caller_identity(client: &StsClient) -> Result<CallerIdentity> {
    debug!("Calling AWS STS GetCallerIdentity");

    let response = client
        .get_caller_identity()
        .send()
        .await
        .context("Failed to get caller identity")?;

    Ok(CallerIdentity {
        account: response
            .account()
            .context("AWS STS returned no account")?
            .to_string(),
        arn: response.arn().context("AWS STS returned no ARN")?.to_string(),
        user_id: response
            .user_id()
            .context("AWS STS returned no user ID")?
            .to_string(),
    })
}

/// Mint a session token for the caller's own identity
pub async fn get_session_token(
    client: &StsClient,
    token_code: Option<&str>,
    serial_number: Option<&str>,
    duration_seconds: i32,
) -> Result<Credentials> {
    info!("Calling AWS STS GetSessionToken");
    debug!("Serial number: {:?}", serial_number);
    debug!("Duration: {} seconds", duration_seconds);

    let response = client
        .get_session_token()
        .set_serial_number(serial_number.map(String::from))
        .set_token_code(token_code.map(String::from))
        .duration_seconds(duration_seconds)
        .send()
        .await
        .context("Failed to get session token")?;

    let sts_creds = response
        .credentials()
        .context("AWS STS returned no credentials")?;

    let credentials = Credentials {
        access_key_id: sts_creds.access_key_id().to_string(),
        secret_access_key: sts_creds.secret_access_key().to_string(),
        session_token: sts_creds.session_token().to_string(),
        expiration: *sts_creds.expiration(),
    };

    info!("Successfully obtained session token credentials");
    Ok(credentials)
}

/// Assume a role and return its temporary credentials
pub async fn assume_role(
    client: &StsClient,
    role_arn: &str,
    session_name: &str,
    token_code: Option<&str>,
    serial_number: Option<&str>,
    duration_seconds: i32,
) -> Result<Credentials> {
    info!("Calling AWS STS AssumeRole");
    debug!("Role ARN: {}", role_arn);
    debug!("Session name: {}", session_name);
    debug!("Serial number: {:?}", serial_number);
    debug!("Duration: {} seconds", duration_seconds);

    let response = client
        .assume_role()
        .role_arn(role_arn)
        .role_session_name(session_name)
        .set_serial_number(serial_number.map(String::from))
        .set_token_code(token_code.map(String::from))
        .duration_seconds(duration_seconds)
        .send()
        .await
        .context("Failed to assume role")?;

    let sts_creds = response
        .credentials()
        .context("AWS STS returned no credentials")?;

    let credentials = Credentials {
        access_key_id: sts_creds.access_key_id().to_string(),
        secret_access_key: sts_creds.secret_access_key().to_string(),
        session_token: sts_creds.session_token().to_string(),
        expiration: *sts_creds.expiration(),
    };

    info!("Successfully assumed role {}", role_arn);
    Ok(credentials)
}
