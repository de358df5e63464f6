//! Authentication gate state machine.
//!
//! Two states: [`GateState::Unauthenticated`] and
//! [`GateState::Authenticated`]. Credential checks happen elsewhere (the API
//! verifies hashes and issues a signed session); this module only decides
//! which state a gate is in and what a transition yields.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::{ROLE_ADMIN, ROLE_EDITOR};

/// How a principal proved their identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Matched a row in `admin_users`.
    Account,
    /// Matched the environment-configured fallback credentials.
    Fallback,
}

/// An authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The submitted identifier (email for accounts, username for fallback).
    pub identifier: String,
    pub method: AuthMethod,
    /// `"admin"` or `"editor"`.
    pub role: String,
}

impl Principal {
    pub fn account(email: impl Into<String>, is_admin: bool) -> Self {
        Self {
            identifier: email.into(),
            method: AuthMethod::Account,
            role: crate::roles::role_for(is_admin).to_string(),
        }
    }

    /// Fallback credentials always grant the admin role.
    pub fn fallback(username: impl Into<String>) -> Self {
        Self {
            identifier: username.into(),
            method: AuthMethod::Fallback,
            role: ROLE_ADMIN.to_string(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    pub fn can_edit_content(&self) -> bool {
        self.role == ROLE_ADMIN || self.role == ROLE_EDITOR
    }
}

/// Result of checking submitted credentials, in lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialCheck {
    /// An `admin_users` row matched email and password.
    AccountMatched { is_admin: bool },
    /// No row matched, but the fallback pair did.
    FallbackMatched,
    /// Neither matched.
    Rejected,
}

impl CredentialCheck {
    /// Combine the two checks: an account match wins over the fallback.
    pub fn resolve(account: Option<bool>, fallback_matched: bool) -> Self {
        match (account, fallback_matched) {
            (Some(is_admin), _) => Self::AccountMatched { is_admin },
            (None, true) => Self::FallbackMatched,
            (None, false) => Self::Rejected,
        }
    }

    /// Turn a check into a principal, or the generic authentication failure.
    pub fn into_principal(self, identifier: &str) -> Result<Principal, CoreError> {
        match self {
            Self::AccountMatched { is_admin } => Ok(Principal::account(identifier, is_admin)),
            Self::FallbackMatched => Ok(Principal::fallback(identifier)),
            Self::Rejected => Err(CoreError::Unauthorized(
                "Invalid email or password".into(),
            )),
        }
    }
}

/// Gate state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GateState {
    #[default]
    Unauthenticated,
    Authenticated { principal: Principal },
}

impl GateState {
    /// Apply a credential check. A rejected check leaves the gate unchanged
    /// and returns the failure.
    pub fn login(&mut self, identifier: &str, check: CredentialCheck) -> Result<&Principal, CoreError> {
        let principal = check.into_principal(identifier)?;
        *self = GateState::Authenticated { principal };
        match &*self {
            GateState::Authenticated { principal } => Ok(principal),
            GateState::Unauthenticated => Err(CoreError::Internal("gate did not transition".into())),
        }
    }

    /// Unconditionally return to `Unauthenticated`.
    pub fn logout(&mut self) {
        *self = GateState::Unauthenticated;
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, GateState::Authenticated { .. })
    }

    pub fn principal(&self) -> Option<&Principal> {
        match self {
            GateState::Authenticated { principal } => Some(principal),
            GateState::Unauthenticated => None,
        }
    }

    /// Gate for protected views: the principal, or an authentication failure.
    pub fn require(&self) -> Result<&Principal, CoreError> {
        self.principal()
            .ok_or_else(|| CoreError::Unauthorized("Login required".into()))
    }
}
