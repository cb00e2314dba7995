use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Profile {
    pub fn new(name: String, email: String) -> Self {
        Self { name, email }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            anyhow::bail!("Please fill in all profile fields.");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub notifications: bool,
}

/// A toggleable preference in [`Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    DarkMode,
    Notifications,
}

impl Preference {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark-mode" | "darkmode" | "dark" => Some(Self::DarkMode),
            "notifications" | "notify" => Some(Self::Notifications),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::DarkMode => "Dark Mode",
            Self::Notifications => "Enable Notifications",
        }
    }
}

impl Settings {
    pub fn get(&self, pref: Preference) -> bool {
        match pref {
            Preference::DarkMode => self.dark_mode,
            Preference::Notifications => self.notifications,
        }
    }

    pub fn set(&mut self, pref: Preference, value: bool) {
        match pref {
            Preference::DarkMode => self.dark_mode = value,
            Preference::Notifications => self.notifications = value,
        }
    }

    pub fn toggle(&mut self, pref: Preference) -> bool {
        let value = !self.get(pref);
        self.set(pref, value);
        value
    }
}
