use std::{env, path::PathBuf};

use dirs;

/// Prefix for STS role session names minted by this tool
pub const SESSION_NAME_PREFIX: &str = "aws-runas-session";

/// Hard STS limit on the length of a role session name
pub const MAX_SESSION_NAME_LEN: usize = 64;

/// Session duration used when neither the CLI nor the profile sets one
pub const DEFAULT_SESSION_DURATION_SECONDS: i32 = 3600;

/// Default AWS region for STS operations when no region is configured
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// AWS configuration directory name
pub const AWS_CONFIG_DIR_NAME: &str = ".aws";

/// AWS configuration file name
pub const AWS_CONFIG_FILE_NAME: &str = "config";

/// Per-directory config file consulted before the shared AWS config
pub const LOCAL_CONFIG_FILE_NAME: &str = "aws_config";

/// Presence of this variable means an MFA-backed session is already active
pub const SESSION_TOKEN_VAR: &str = "AWS_SESSION_TOKEN";

/// Shell launched when no command is given at handoff
pub const SHELL_VAR: &str = "SHELL";

/// Get the AWS config file path
/// Respects AWS_CONFIG_FILE environment variable if set, then an
/// `aws_config` file in the working directory, then the shared default
pub fn get_aws_config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("AWS_CONFIG_FILE") {
        return Some(PathBuf::from(path));
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::home_dir().map(|home| home.join(AWS_CONFIG_DIR_NAME).join(AWS_CONFIG_FILE_NAME))
}
