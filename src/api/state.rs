//! Shared server state
//!
//! One wizard per registration key, each behind its own async mutex so
//! requests for different registrations never contend.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::client::{RegistrationStarter, StepSubmitter};
use crate::domain::{SessionScope, SessionToken};
use crate::wizard::{MemorySessionStorage, WizardController};

/// Wizard type hosted by the server
pub type RegistrationWizard = WizardController<Arc<dyn StepSubmitter>, MemorySessionStorage>;

/// Handle to one registration's wizard
pub type WizardHandle = Arc<Mutex<RegistrationWizard>>;

#[derive(Clone)]
pub struct AppState {
    registrations: Arc<RwLock<HashMap<String, WizardHandle>>>,
    submitter: Arc<dyn StepSubmitter>,
    starter: Arc<dyn RegistrationStarter>,
}

impl AppState {
    pub fn new(submitter: Arc<dyn StepSubmitter>, starter: Arc<dyn RegistrationStarter>) -> Self {
        Self {
            registrations: Arc::new(RwLock::new(HashMap::new())),
            submitter,
            starter,
        }
    }

    pub fn starter(&self) -> &Arc<dyn RegistrationStarter> {
        &self.starter
    }

    /// Open a wizard for a freshly issued registration key.
    ///
    /// A new registration under an existing key replaces the old wizard.
    pub async fn open(&self, token: SessionToken) -> WizardHandle {
        let key = token.as_str().to_string();
        let wizard = WizardController::new(
            SessionScope::with_token(token),
            MemorySessionStorage::new(),
            Arc::clone(&self.submitter),
        );
        let handle = Arc::new(Mutex::new(wizard));

        self.registrations
            .write()
            .await
            .insert(key, Arc::clone(&handle));
        handle
    }

    pub async fn wizard(&self, registration_key: &str) -> Option<WizardHandle> {
        self.registrations
            .read()
            .await
            .get(registration_key)
            .cloned()
    }

    /// Forget a finished registration along with everything entered for it
    pub async fn close(&self, registration_key: &str) {
        let mut registrations = self.registrations.write().await;
        if registrations.remove(registration_key).is_some() {
            tracing::debug!(open = registrations.len(), "Registration closed");
        }
    }
}
