use anyhow::{Context, Result};
use log::{info, warn};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::cache::{self, KeyValueStore};
use crate::supabase::SupabaseClient;

#[cfg(test)]
pub mod mock;

const SESSION_KEY: &str = "supabaseSession";

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
}

pub type AuthListener = Box<dyn FnMut(AuthEvent, Option<&Session>) + Send>;

/// Sign-in state owned by the hosted backend.
pub trait IdentityProvider {
    fn current_session(&self) -> Result<Option<Session>>;
    fn sign_in_with_password(&mut self, email: &str, password: &str) -> Result<Session>;
    /// `None` when the account still has to be confirmed by email.
    fn sign_up(&mut self, email: &str, password: &str) -> Result<Option<Session>>;
    fn sign_out(&mut self) -> Result<()>;
    fn subscribe(&mut self, listener: AuthListener);
}

#[derive(Default)]
pub struct Listeners {
    listeners: Vec<AuthListener>,
}

impl Listeners {
    pub fn push(&mut self, listener: AuthListener) {
        self.listeners.push(listener);
    }

    pub fn notify(&mut self, event: AuthEvent, session: Option<&Session>) {
        for listener in self.listeners.iter_mut() {
            listener(event, session);
        }
    }
}

/// Parses a token response; sign-up answers with a bare user while confirmation is pending.
pub fn session_from_response(body: Value) -> Result<Option<Session>> {
    if body.get("access_token").is_none() {
        return Ok(None);
    }
    let session = serde_json::from_value(body).context("unexpected session payload")?;
    Ok(Some(session))
}

pub struct SupabaseIdentity {
    client: SupabaseClient,
    store: Arc<dyn KeyValueStore>,
    listeners: Listeners,
}

impl SupabaseIdentity {
    pub fn new(client: SupabaseClient, store: Arc<dyn KeyValueStore>) -> Self {
        SupabaseIdentity {
            client,
            store,
            listeners: Default::default(),
        }
    }

    fn start_session(&mut self, session: &Session) {
        if let Err(e) = cache::save_json(self.store.as_ref(), SESSION_KEY, session) {
            warn!("Could not persist session: {:#}", e);
        }
        info!("Signed in as {}", session.user.id);
        self.listeners.notify(AuthEvent::SignedIn, Some(session));
    }
}

impl IdentityProvider for SupabaseIdentity {
    fn current_session(&self) -> Result<Option<Session>> {
        cache::load_json(self.store.as_ref(), SESSION_KEY)
    }

    fn sign_in_with_password(&mut self, email: &str, password: &str) -> Result<Session> {
        let request = self
            .client
            .request(Method::POST, "/auth/v1/token?grant_type=password", None)
            .json(&json!({ "email": email, "password": password }));
        let body = self.client.send(request).context("Sign in failed")?;
        let session = session_from_response(body)?.context("Sign in returned no session")?;
        self.start_session(&session);
        Ok(session)
    }

    fn sign_up(&mut self, email: &str, password: &str) -> Result<Option<Session>> {
        let request = self
            .client
            .request(Method::POST, "/auth/v1/signup", None)
            .json(&json!({ "email": email, "password": password }));
        let body = self.client.send(request).context("Sign up failed")?;
        let session = session_from_response(body)?;
        if let Some(session) = &session {
            self.start_session(session);
        }
        Ok(session)
    }

    fn sign_out(&mut self) -> Result<()> {
        if let Some(session) = self.current_session().unwrap_or(None) {
            let request = self.client.request(
                Method::POST,
                "/auth/v1/logout",
                Some(session.access_token.as_str()),
            );
            if let Err(e) = self.client.send(request) {
                warn!("Backend sign out failed, clearing local session anyway: {:#}", e);
            }
        }
        self.store.remove(SESSION_KEY)?;
        self.listeners.notify(AuthEvent::SignedOut, None);
        Ok(())
    }

    fn subscribe(&mut self, listener: AuthListener) {
        self.listeners.push(listener);
    }
}
