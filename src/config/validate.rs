// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{PkgownerError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = PkgownerError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.exec, raw.tools))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_exec(cfg)?;
    validate_tools(cfg)?;
    Ok(())
}

fn validate_exec(cfg: &RawConfigFile) -> Result<()> {
    if cfg.exec.timeout_secs == 0 {
        return Err(PkgownerError::ConfigError(
            "[exec].timeout_secs must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_tools(cfg: &RawConfigFile) -> Result<()> {
    for (name, path) in cfg.tools.iter() {
        if name.trim().is_empty() {
            return Err(PkgownerError::ConfigError(
                "[tools] contains an entry with an empty name".to_string(),
            ));
        }
        if path.as_os_str().is_empty() {
            return Err(PkgownerError::ConfigError(format!(
                "[tools].{name} must not be empty"
            )));
        }
    }
    Ok(())
}
