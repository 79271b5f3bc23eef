use secrecy::{ExposeSecret, SecretString};

use crate::errors::DomainError;

/// Shared secret for the admin console. A placeholder, not an authentication mechanism.
#[derive(Clone, Debug)]
pub struct AdminCredential(SecretString);

impl AdminCredential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(SecretString::from(secret.into()))
    }

    /// Exact, case-sensitive comparison.
    pub fn matches(&self, attempt: &str) -> bool {
        self.0.expose_secret() == attempt
    }
}

impl From<SecretString> for AdminCredential {
    fn from(value: SecretString) -> Self {
        Self(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminState {
    LoggedOut,
    LoggedIn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminAction {
    AddItem,
    RemoveItem,
    UpdatePrice,
    ViewHistory,
    ViewMenu,
    ReturnToMain,
}

impl AdminAction {
    pub fn from_choice(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(Self::AddItem),
            2 => Some(Self::RemoveItem),
            3 => Some(Self::UpdatePrice),
            4 => Some(Self::ViewHistory),
            5 => Some(Self::ViewMenu),
            6 => Some(Self::ReturnToMain),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct AdminGate {
    state: AdminState,
}

impl Default for AdminGate {
    fn default() -> Self {
        Self { state: AdminState::LoggedOut }
    }
}

impl AdminGate {
    pub fn state(&self) -> AdminState {
        self.state
    }

    pub fn is_logged_in(&self) -> bool {
        self.state == AdminState::LoggedIn
    }

    pub fn login(&mut self, credential: &AdminCredential, attempt: &str) -> Result<(), DomainError> {
        if credential.matches(attempt) {
            self.state = AdminState::LoggedIn;
            Ok(())
        } else {
            self.state = AdminState::LoggedOut;
            Err(DomainError::AccessDenied)
        }
    }

    pub fn logout(&mut self) {
        self.state = AdminState::LoggedOut;
    }
}
