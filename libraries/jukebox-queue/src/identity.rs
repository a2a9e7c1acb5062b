//! Identity register
//!
//! Remembers who is submitting songs from this station. Names are trusted
//! labels, not authenticated accounts.

use jukebox_core::{storage::CURRENT_USER_KEY, InvalidNameError, KeyValueStore, UserName};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Label shown when no one has entered a name
pub const GUEST_NAME: &str = "Guest";

/// The current user of this station
pub struct IdentityRegister {
    storage: Arc<dyn KeyValueStore>,
    current: Mutex<Option<UserName>>,
}

impl IdentityRegister {
    /// Create a register, restoring any stored name
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let current = match storage.get(CURRENT_USER_KEY) {
            Ok(Some(raw)) => match UserName::parse(&raw) {
                Ok(name) => Some(name),
                Err(_) => {
                    warn!("Ignoring blank stored user name");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to load current user");
                None
            }
        };

        debug!(user = ?current, "Identity register ready");

        Self {
            storage,
            current: Mutex::new(current),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<UserName>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record `raw` (trimmed) as the current user
    ///
    /// # Errors
    ///
    /// Rejected when the trimmed name is empty; the previous name stays.
    pub fn set_current_user(&self, raw: &str) -> Result<UserName, InvalidNameError> {
        let name = UserName::parse(raw)?;

        let mut current = self.lock();
        if let Err(e) = self.storage.set(CURRENT_USER_KEY, name.as_str()) {
            warn!(error = %e, "Failed to save current user");
        }
        *current = Some(name.clone());

        info!(user = %name, "Current user set");
        Ok(name)
    }

    /// Forget the current user
    pub fn clear_current_user(&self) {
        let mut current = self.lock();
        if let Err(e) = self.storage.remove(CURRENT_USER_KEY) {
            warn!(error = %e, "Failed to clear stored user");
        }
        *current = None;

        info!("Current user cleared");
    }

    pub fn current_user(&self) -> Option<UserName> {
        self.lock().clone()
    }

    pub fn is_set(&self) -> bool {
        self.lock().is_some()
    }

    /// Current name, or `Guest`
    pub fn display_name(&self) -> String {
        self.lock()
            .as_ref()
            .map_or_else(|| GUEST_NAME.to_string(), ToString::to_string)
    }
}

impl std::fmt::Debug for IdentityRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityRegister")
            .field("current", &*self.lock())
            .finish_non_exhaustive()
    }
}
