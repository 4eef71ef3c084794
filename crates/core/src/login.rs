//! Login management
//!
//! A login binds a name to a Galaxy server URL, an API key and the history
//! gxwf stores its datasets in. Exactly one login may be active; remote
//! commands always run against it.

use crate::config::{Config, Login};
use crate::error::{Error, Result};

/// Outcome of switching the active login
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The requested login was already active; nothing changed
    AlreadyActive,
    /// The requested login is now active
    Activated,
}

impl Config {
    /// Get the active login and its name
    pub fn active_login(&self) -> Result<(&str, &Login)> {
        let name = self.active_login.as_deref().ok_or_else(|| {
            Error::ConfigMissing("please add a login first with `gxwf login add`".into())
        })?;
        let login = self
            .logins
            .get(name)
            .ok_or_else(|| Error::UnknownLogin(name.to_string()))?;
        Ok((name, login))
    }

    /// Whether a login with this name is configured
    pub fn has_login(&self, name: &str) -> bool {
        self.logins.contains_key(name)
    }

    /// Record a new login and make it the active one
    pub fn add_login(&mut self, name: &str, login: Login) -> Result<()> {
        if self.has_login(name) {
            return Err(Error::LoginExists(name.to_string()));
        }
        self.logins.insert(name.to_string(), login);
        self.active_login = Some(name.to_string());
        Ok(())
    }

    /// Make an existing login the active one
    pub fn switch_login(&mut self, name: &str) -> Result<SwitchOutcome> {
        if self.active_login.as_deref() == Some(name) {
            return Ok(SwitchOutcome::AlreadyActive);
        }
        if !self.has_login(name) {
            return Err(Error::UnknownLogin(name.to_string()));
        }
        self.active_login = Some(name.to_string());
        Ok(SwitchOutcome::Activated)
    }

    /// Remove a login that is not currently active
    pub fn delete_login(&mut self, name: &str) -> Result<Login> {
        if self.active_login.as_deref() == Some(name) {
            return Err(Error::ActiveLogin(name.to_string()));
        }
        self.logins
            .remove(name)
            .ok_or_else(|| Error::UnknownLogin(name.to_string()))
    }
}

/// Mask an API key for display, keeping only its last four characters
pub fn mask_api_key(api_key: &str) -> String {
    let chars: Vec<char> = api_key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{visible}", "*".repeat(chars.len() - 4))
}
