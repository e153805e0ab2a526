//! The locally persisted auth session.
//!
//! A successful login or registration yields an [`AuthResponse`]; storing
//! it here keeps the user signed in across restarts. Logout removes the
//! record. Clients also clear the session whenever the server answers 401,
//! since that means the token is missing, invalid, or expired.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::objects::auth::{AuthResponse, Role};
use crate::storage::{StateStore, StateStoreError};

/// Storage key under which the session is persisted.
pub const SESSION_STATE_KEY: &str = "campuseats-session";

/// The signed-in user as held by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub canteen_id: Option<Uuid>,
    pub token: String,
}

impl From<AuthResponse> for Session {
    fn from(auth: AuthResponse) -> Self {
        Self {
            user_id: auth.id,
            name: auth.name,
            email: auth.email,
            role: auth.role,
            canteen_id: auth.canteen_id,
            token: auth.token,
        }
    }
}

/// Session persistence over a [`StateStore`].
pub struct SessionManager<S: StateStore> {
    store: S,
}

impl<S: StateStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The currently persisted session, if any.
    pub fn current(&self) -> Result<Option<Session>, StateStoreError> {
        self.store.load_json(SESSION_STATE_KEY)
    }

    /// Persist the session of a fresh login or registration.
    pub fn sign_in(&self, auth: AuthResponse) -> Result<Session, StateStoreError> {
        let session = Session::from(auth);
        self.store.save_json(SESSION_STATE_KEY, &session)?;
        Ok(session)
    }

    /// Drop the persisted session (logout, or server-side 401).
    pub fn sign_out(&self) -> Result<(), StateStoreError> {
        self.store.remove(SESSION_STATE_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStateStore;

    fn auth() -> AuthResponse {
        AuthResponse {
            id: Uuid::new_v4(),
            name: "Asha".to_owned(),
            email: "asha@campus.test".to_owned(),
            role: Role::Customer,
            canteen_id: None,
            token: "tok".to_owned(),
        }
    }

    #[test]
    fn sign_in_persists_and_sign_out_clears() {
        let store = MemoryStateStore::new();
        let sessions = SessionManager::new(&store);
        assert!(sessions.current().unwrap().is_none());

        let session = sessions.sign_in(auth()).unwrap();
        assert_eq!(sessions.current().unwrap(), Some(session));

        sessions.sign_out().unwrap();
        assert!(sessions.current().unwrap().is_none());
    }
}
