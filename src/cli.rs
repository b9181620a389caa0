use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use dialoguer::{Input, theme::ColorfulTheme};

use crate::session::{Session, SessionOptions};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "aws-runas",
    version,
    about = "Run a command under temporary AWS credentials",
    long_about = None
)]
pub struct Cli {
    #[arg(short = 'p', long, default_value = "default", help = "AWS profile name")]
    pub profile: String,

    #[arg(
        short = 'm',
        long,
        value_name = "CODE",
        help = "MFA token code; prompted for when needed and not given"
    )]
    pub mfa_code: Option<String>,

    #[arg(
        short = 'd',
        long,
        value_name = "SECONDS",
        help = "Session duration, overriding the profile's setting"
    )]
    pub duration_seconds: Option<i32>,

    #[arg(
        short = 'n',
        long,
        help = "Get a session token for the caller instead of assuming the profile's role"
    )]
    pub no_role: bool,

    #[arg(
        short = 'q',
        long,
        help = "Do not print the notice before launching a shell"
    )]
    pub skip_prompt: bool,

    #[arg(short = 'v', long, action = ArgAction::Count, help = "Increase verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND",
        help = "Command and arguments to run; defaults to $SHELL"
    )]
    pub command: Vec<String>,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let options = SessionOptions {
            profile: self.profile,
            mfa_code: self.mfa_code,
            duration_seconds: self.duration_seconds,
            no_role: self.no_role,
        };
        let mut session = Session::new(options).await?;

        if let Some(serial) = session.mfa_serial_needing_code() {
            let code = Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("Enter MFA code for {serial}"))
                .interact_text()
                .context("Failed to read MFA code")?;
            session.set_mfa_code(code);
        }

        session.assume_role().await?;

        let (command, argv) = match self.command.split_first() {
            Some((command, argv)) => (Some(command.as_str()), argv),
            None => (None, &[][..]),
        };

        session.handoff(command, argv, self.skip_prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, error::ErrorKind};

    #[test]
    fn test_profile_default_value() {
        let cli = Cli::try_parse_from(["aws-runas"]).unwrap();
        assert_eq!(cli.profile, "default");
    }

    #[test]
    fn test_profile_custom_value() {
        let cli = Cli::try_parse_from(["aws-runas", "--profile", "production"]).unwrap();
        assert_eq!(cli.profile, "production");
    }

    #[test]
    fn test_profile_short_flag() {
        let cli = Cli::try_parse_from(["aws-runas", "-p", "dev"]).unwrap();
        assert_eq!(cli.profile, "dev");
    }

    #[test]
    fn test_mfa_code_flag() {
        let cli = Cli::try_parse_from(["aws-runas", "-m", "123456"]).unwrap();
        assert_eq!(cli.mfa_code.as_deref(), Some("123456"));
    }

    #[test]
    fn test_mfa_code_default_none() {
        let cli = Cli::try_parse_from(["aws-runas"]).unwrap();
        assert_eq!(cli.mfa_code, None);
    }

    #[test]
    fn test_duration_seconds_flag() {
        let cli = Cli::try_parse_from(["aws-runas", "-d", "43200"]).unwrap();
        assert_eq!(cli.duration_seconds, Some(43200));
    }

    #[test]
    fn test_no_role_flag() {
        let cli = Cli::try_parse_from(["aws-runas", "--no-role"]).unwrap();
        assert!(cli.no_role);
    }

    #[test]
    fn test_no_role_default_false() {
        let cli = Cli::try_parse_from(["aws-runas"]).unwrap();
        assert!(!cli.no_role);
    }

    #[test]
    fn test_skip_prompt_flag() {
        let cli = Cli::try_parse_from(["aws-runas", "-q"]).unwrap();
        assert!(cli.skip_prompt);
    }

    #[test]
    fn test_command_captured() {
        let cli = Cli::try_parse_from(["aws-runas", "terraform", "plan"]).unwrap();
        assert_eq!(cli.command, vec!["terraform", "plan"]);
    }

    #[test]
    fn test_command_captures_hyphen_arguments() {
        let cli = Cli::try_parse_from(["aws-runas", "-p", "dev", "ls", "-la"]).unwrap();
        assert_eq!(cli.profile, "dev");
        assert_eq!(cli.command, vec!["ls", "-la"]);
    }

    #[test]
    fn test_command_after_double_dash() {
        let cli = Cli::try_parse_from(["aws-runas", "--", "env"]).unwrap();
        assert_eq!(cli.command, vec!["env"]);
    }

    #[test]
    fn test_command_default_empty() {
        let cli = Cli::try_parse_from(["aws-runas"]).unwrap();
        assert!(cli.command.is_empty());
    }

    #[test]
    fn test_verbose_flag_multiple() {
        let cli = Cli::try_parse_from(["aws-runas", "-vvv"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_verbose_default_zero() {
        let cli = Cli::try_parse_from(["aws-runas"]).unwrap();
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_command_structure_validation() {
        let cmd = Cli::command();
        cmd.debug_assert();
    }

    #[test]
    fn test_help_flag_works() {
        let result = Cli::try_parse_from(["aws-runas", "--help"]);
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(e.kind(), ErrorKind::DisplayHelp);
        }
    }

    #[test]
    fn test_version_flag_works() {
        let result = Cli::try_parse_from(["aws-runas", "--version"]);
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(e.kind(), ErrorKind::DisplayVersion);
        }
    }
}
