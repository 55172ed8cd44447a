use anyhow::{anyhow, Result};
use std::collections::HashMap;

use crate::identity::{AuthEvent, AuthListener, IdentityProvider, Listeners, Session, User};

#[derive(Default)]
pub struct MockIdentity {
    accounts: HashMap<String, String>,
    session: Option<Session>,
    listeners: Listeners,
}

impl MockIdentity {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_account(mut self, email: &str, password: &str) -> Self {
        self.accounts.insert(email.to_owned(), password.to_owned());
        self
    }

    fn open_session(&mut self, email: &str) -> Session {
        let session = Session {
            access_token: format!("token-{}", email),
            refresh_token: None,
            user: User {
                id: format!("id-{}", email),
                email: Some(email.to_owned()),
            },
        };
        self.session = Some(session.clone());
        self.listeners.notify(AuthEvent::SignedIn, Some(&session));
        session
    }
}

impl IdentityProvider for MockIdentity {
    fn current_session(&self) -> Result<Option<Session>> {
        Ok(self.session.clone())
    }

    fn sign_in_with_password(&mut self, email: &str, password: &str) -> Result<Session> {
        match self.accounts.get(email) {
            Some(p) if p == password => Ok(self.open_session(email)),
            _ => Err(anyhow!("Invalid login credentials")),
        }
    }

    fn sign_up(&mut self, email: &str, password: &str) -> Result<Option<Session>> {
        if self.accounts.contains_key(email) {
            return Err(anyhow!("User already registered"));
        }
        self.accounts.insert(email.to_owned(), password.to_owned());
        Ok(Some(self.open_session(email)))
    }

    fn sign_out(&mut self) -> Result<()> {
        self.session = None;
        self.listeners.notify(AuthEvent::SignedOut, None);
        Ok(())
    }

    fn subscribe(&mut self, listener: AuthListener) {
        self.listeners.push(listener);
    }
}
