use std::collections::HashMap;
use std::sync::RwLock;

use rand::RngExt;
use rand::distr::Alphanumeric;

use crate::domain::user::Role;

pub(crate) const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone, Copy)]
pub(crate) struct SessionData {
    pub(crate) user_id: i64,
    pub(crate) role: Role,
}

/// Server-side session records keyed by an opaque token; the cookie only
/// ever carries the token. Process-local by design, sessions do not
/// survive a restart and are not shared across nodes.
#[derive(Debug, Default)]
pub(crate) struct SessionStore {
    sessions: RwLock<HashMap<String, SessionData>>,
}

impl SessionStore {
    const TOKEN_LEN: usize = 43;

    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn create(&self, user_id: i64, role: Role) -> String {
        let token: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(Self::TOKEN_LEN)
            .map(char::from)
            .collect();

        self.sessions
            .write()
            .expect("session store lock poisoned")
            .insert(token.clone(), SessionData { user_id, role });

        token
    }

    pub(crate) fn get(&self, token: &str) -> Option<SessionData> {
        self.sessions
            .read()
            .expect("session store lock poisoned")
            .get(token)
            .copied()
    }

    pub(crate) fn remove(&self, token: &str) {
        self.sessions
            .write()
            .expect("session store lock poisoned")
            .remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::SessionStore;
    use crate::domain::user::Role;

    #[test]
    fn create_then_get_returns_session_data() {
        let store = SessionStore::new();
        let token = store.create(7, Role::Admin);

        let data = store.get(&token).expect("session must exist");
        assert_eq!(data.user_id, 7);
        assert!(data.role.is_admin());
    }

    #[test]
    fn remove_is_idempotent() {
        let store = SessionStore::new();
        let token = store.create(7, Role::User);

        store.remove(&token);
        store.remove(&token);
        assert!(store.get(&token).is_none());
    }

    #[test]
    fn tokens_are_unique_per_session() {
        let store = SessionStore::new();
        let first = store.create(1, Role::User);
        let second = store.create(1, Role::User);
        assert_ne!(first, second);
    }

    #[test]
    fn unknown_token_yields_none() {
        let store = SessionStore::new();
        assert!(store.get("not-a-token").is_none());
    }
}
