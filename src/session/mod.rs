use std::collections::HashMap;

use anyhow::{Context, Result};
use aws_sdk_sts::Client as StsClient;
use chrono::Utc;
use tracing::debug;

pub mod env;
pub mod ident;
pub mod plan;

pub use env::AssumedRole;
pub use plan::{AuthMethod, AuthParams};

use crate::aws::{self, Credentials};
use crate::config::{self, ProfileConfig};
use crate::constants::{SESSION_TOKEN_VAR, SHELL_VAR};
use crate::handoff;

/// Options for creating a [`Session`]
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub profile: String,
    pub mfa_code: Option<String>,
    pub duration_seconds: Option<i32>,
    pub no_role: bool,
}

/// One credential session: owns the profile configuration, the STS client,
/// and the credential material once obtained. The session name and the
/// credentials are each computed at most once.
pub struct Session {
    profile: String,
    config: ProfileConfig,
    mfa_code: Option<String>,
    duration_seconds: Option<i32>,
    no_role: bool,
    /// Whether AWS_SESSION_TOKEN was present when the session was created
    ambient_session: bool,
    client: StsClient,
    session_name: Option<String>,
    credentials: Option<Credentials>,
    assumed_role: Option<AssumedRole>,
}

impl Session {
    pub async fn new(options: SessionOptions) -> Result<Self> {
        let config = config::load(&options.profile).with_context(|| {
            format!(
                "Failed to load configuration for profile '{}'",
                options.profile
            )
        })?;

        let ambient_session = std::env::var_os(SESSION_TOKEN_VAR).is_some();
        if ambient_session {
            debug!(
                "{} already present, MFA serial will not be sent",
                SESSION_TOKEN_VAR
            );
        }

        let client = aws::sts::client(&options.profile, config.region.as_deref()).await;

        Ok(Self {
            profile: options.profile,
            config,
            mfa_code: options.mfa_code,
            duration_seconds: options.duration_seconds,
            no_role: options.no_role,
            ambient_session,
            client,
            session_name: None,
            credentials: None,
            assumed_role: None,
        })
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    /// The MFA serial the operator still has to supply a token code for,
    /// if the chosen path will send one and no code was given
    pub fn mfa_serial_needing_code(&self) -> Option<&str> {
        if self.mfa_code.is_none() && !self.ambient_session {
            self.config.mfa_serial.as_deref()
        } else {
            None
        }
    }

    pub fn set_mfa_code(&mut self, code: String) {
        self.mfa_code = Some(code);
    }

    /// Session name for role assumption, visible in audit trails
    ///
    /// Computed once; an identity lookup failure is not fatal and selects
    /// the basic prefix + timestamp form
    pub async fn session_name(&mut self) -> &str {
        if self.session_name.is_none() {
            let label = match aws::sts::get_caller_identity(&self.client).await {
                Ok(identity) => Some(ident::session_label(&identity)),
                Err(e) => {
                    debug!("GetCallerIdentity failed, using basic session name: {e:#}");
                    None
                }
            };
            self.session_name = Some(ident::session_name(
                label.as_deref(),
                Utc::now().timestamp(),
            ));
        }
        self.session_name
            .as_deref()
            .expect("session name computed above")
    }

    /// Obtain the session credentials, authenticating on the first call
    ///
    /// Errors from STS propagate unmodified; retrying without a fresh MFA
    /// code cannot succeed, so nothing here retries
    pub async fn assume_role(&mut self) -> Result<&Credentials> {
        if self.credentials.is_none() {
            let method = plan::plan(
                &self.profile,
                &self.config,
                self.no_role,
                self.duration_seconds,
                self.ambient_session,
            )?;

            let credentials = match method {
                AuthMethod::SessionToken(params) => {
                    aws::sts::get_session_token(
                        &self.client,
                        self.token_code_for(&params),
                        params.serial_number.as_deref(),
                        params.duration_seconds,
                    )
                    .await?
                }
                AuthMethod::AssumeRole { role_arn, params } => {
                    let session_name = self.session_name().await.to_string();
                    let credentials = aws::sts::assume_role(
                        &self.client,
                        &role_arn,
                        &session_name,
                        self.token_code_for(&params),
                        params.serial_number.as_deref(),
                        params.duration_seconds,
                    )
                    .await?;
                    self.assumed_role = Some(AssumedRole {
                        role_arn,
                        session_name,
                    });
                    credentials
                }
            };

            self.credentials = Some(credentials);
        }

        Ok(self
            .credentials
            .as_ref()
            .expect("credentials obtained above"))
    }

    /// Environment overlay for the obtained credentials. Empty until
    /// [`Session::assume_role`] has run.
    pub fn credentials_env(&self) -> HashMap<String, String> {
        match &self.credentials {
            Some(creds) => env::credentials_env(
                creds,
                &self.profile,
                &self.config,
                self.assumed_role.as_ref(),
            ),
            None => HashMap::new(),
        }
    }

    /// Hand execution off to `command` (or the user's shell) with the
    /// credential overlay applied. Does not return on success.
    pub fn handoff(&self, command: Option<&str>, argv: &[String], skip_prompt: bool) -> Result<()> {
        let overlay = self.credentials_env();

        let shell;
        let command = match command {
            Some(command) => command,
            None => {
                shell = std::env::var(SHELL_VAR)
                    .context("No command given and SHELL is not set")?;
                if !skip_prompt {
                    println!(
                        "Starting {shell} with temporary credentials for profile '{}'.",
                        self.profile
                    );
                    if let Some(creds) = &self.credentials {
                        println!(
                            "Session expires at {}. Exit the shell to drop the credentials.",
                            env::format_expiration(creds.expiration.secs())
                        );
                    }
                }
                shell.as_str()
            }
        };

        handoff::exec(command, argv, &overlay)
    }

    /// Token code to send; only meaningful alongside a serial number
    fn token_code_for(&self, params: &AuthParams) -> Option<&str> {
        if params.serial_number.is_some() {
            self.mfa_code.as_deref()
        } else {
            None
        }
    }
}
