use std::collections::HashMap;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::debug;

/// Run `command` with `overlay` merged over the ambient environment,
/// overlay keys winning on conflict.
///
/// On Unix the current process image is replaced, so this only returns on
/// failure; the environment is never left half-applied because the overlay
/// lives on the child command, not on this process. Elsewhere the command
/// is spawned and its exit status propagated.
pub fn exec(command: &str, argv: &[String], overlay: &HashMap<String, String>) -> Result<()> {
    debug!("Handing off to {} {:?}", command, argv);

    let mut cmd = Command::new(command);
    cmd.args(argv).envs(overlay);

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let err = cmd.exec();
        Err(err).with_context(|| format!("Failed to execute '{command}'"))
    }

    #[cfg(not(unix))]
    {
        let status = cmd
            .status()
            .with_context(|| format!("Failed to execute '{command}'"))?;
        std::process::exit(status.code().unwrap_or(1));
    }
}
