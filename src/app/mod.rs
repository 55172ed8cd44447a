use anyhow::{anyhow, Result};
use log::warn;
use std::sync::Arc;

use crate::cache::KeyValueStore;
use crate::identity::{AuthEvent, Session};

pub mod profile;
pub mod theme;

pub use profile::UserProfile;
pub use theme::Theme;


/// Where a front end should send the user.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Area {
    Authenticated,
    Login,
}

/// Theme, session and profile for one run of the application.
pub struct AppContext {
    store: Arc<dyn KeyValueStore>,
    theme: Theme,
    session: Option<Session>,
    profile: UserProfile,
}

impl AppContext {
    pub fn load(store: Arc<dyn KeyValueStore>, session: Option<Session>) -> AppContext {
        let theme = theme::load_theme(store.as_ref());
        let profile = match &session {
            Some(session) => profile::load_profile(store.as_ref(), &session.user.id),
            None => UserProfile::default(),
        };
        AppContext {
            store,
            theme,
            session,
            profile,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        theme::save_theme(self.store.as_ref(), self.theme);
        self.theme
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn area(&self) -> Area {
        match self.session {
            Some(_) => Area::Authenticated,
            None => Area::Login,
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn handle_auth_event(&mut self, event: AuthEvent, session: Option<&Session>) {
        match (event, session) {
            (AuthEvent::SignedIn, Some(session)) => {
                self.profile = profile::load_profile(self.store.as_ref(), &session.user.id);
                self.session = Some(session.clone());
            }
            _ => {
                self.profile = UserProfile::default();
                self.session = None;
            }
        }
    }

    /// Profiles belong to a user, so edits need a session. Storage failures are logged.
    pub fn update_profile(&mut self, name: Option<String>, avatar: Option<String>) -> Result<&UserProfile> {
        let user_id = match &self.session {
            Some(session) => session.user.id.clone(),
            None => return Err(anyhow!("Sign in to edit your profile")),
        };
        if let Some(name) = name {
            let name = name.trim();
            if name.is_empty() {
                return Err(anyhow!("Name cannot be empty"));
            }
            self.profile.name = name.to_owned();
        }
        if let Some(avatar) = avatar {
            self.profile.avatar = Some(avatar).filter(|a| !a.trim().is_empty());
        }
        if let Err(e) = profile::save_profile(self.store.as_ref(), &user_id, &self.profile) {
            warn!("Could not save profile for {}: {:#}", user_id, e);
        }
        Ok(&self.profile)
    }
}
