//! Persisted light/dark preference.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::keys;
use crate::traits::SecureStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == ThemeMode::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

pub struct ThemeStore {
    storage: Arc<dyn SecureStore>,
    mode: watch::Sender<ThemeMode>,
}

impl ThemeStore {
    pub fn new(storage: Arc<dyn SecureStore>) -> Self {
        let (mode, _) = watch::channel(ThemeMode::default());
        Self { storage, mode }
    }

    pub fn mode(&self) -> ThemeMode {
        *self.mode.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ThemeMode> {
        self.mode.subscribe()
    }

    /// Apply the saved preference, or `system_default` when none is saved
    /// or it cannot be read.
    pub async fn load(&self, system_default: ThemeMode) -> ThemeMode {
        let mode = match self.storage.get(keys::THEME).await {
            Ok(Some(raw)) => raw.parse::<ThemeMode>().unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring saved theme");
                system_default
            }),
            Ok(None) => system_default,
            Err(e) => {
                warn!(error = %e, "Failed to read theme preference");
                system_default
            }
        };
        debug!(%mode, "Theme loaded");
        self.mode.send_replace(mode);
        mode
    }

    /// Flip the mode and persist it. A failed write is logged only.
    pub async fn toggle(&self) -> ThemeMode {
        let mut mode = ThemeMode::default();
        self.mode.send_modify(|current| {
            *current = current.toggled();
            mode = *current;
        });
        if let Err(e) = self.storage.set(keys::THEME, mode.as_str()).await {
            warn!(error = %e, "Failed to save theme preference");
        }
        mode
    }
}
