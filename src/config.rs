use anyhow::{Context, Result};
use ini::{Ini, Properties};

use crate::constants;

/// Per-profile settings that drive the credential session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileConfig {
    pub mfa_serial: Option<String>,
    pub role_arn: Option<String>,
    pub region: Option<String>,
    pub duration_seconds: Option<i32>,
}

impl ProfileConfig {
    fn from_ini_section(section: &Properties) -> Self {
        Self {
            mfa_serial: non_empty(section, "mfa_serial"),
            role_arn: non_empty(section, "role_arn"),
            region: non_empty(section, "region"),
            duration_seconds: section
                .get("duration_seconds")
                .and_then(|s| s.trim().parse().ok()),
        }
    }

    /// Fill settings the selected profile leaves unset from its source
    /// profile section
    fn fill_missing_from(&mut self, source: &ProfileConfig) {
        if self.mfa_serial.is_none() {
            self.mfa_serial = source.mfa_serial.clone();
        }
        if self.role_arn.is_none() {
            self.role_arn = source.role_arn.clone();
        }
        if self.region.is_none() {
            self.region = source.region.clone();
        }
        if self.duration_seconds.is_none() {
            self.duration_seconds = source.duration_seconds;
        }
    }
}

/// Load the configuration for a profile from the AWS config file
pub fn load(profile: &str) -> Result<ProfileConfig> {
    let path = constants::get_aws_config_path().context("Failed to determine AWS config path")?;

    let ini = Ini::load_from_file(&path)
        .with_context(|| format!("Failed to load AWS config file: {}", path.display()))?;

    let section = ini
        .section(Some(section_name(profile)))
        .with_context(|| format!("Profile '{profile}' not found in AWS config"))?;

    let mut config = ProfileConfig::from_ini_section(section);

    if let Some(source) = section.get("source_profile") {
        if let Some(source_section) = ini.section(Some(section_name(source))) {
            config.fill_missing_from(&ProfileConfig::from_ini_section(source_section));
        }
    }

    Ok(config)
}

fn section_name(profile: &str) -> String {
    if profile == "default" {
        profile.to_string()
    } else {
        format!("profile {profile}")
    }
}

fn non_empty(section: &Properties, key: &str) -> Option<String> {
    section
        .get(key)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
