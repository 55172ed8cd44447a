use anyhow::{Context, Result};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use crate::app::{AppContext, Area};
use crate::cache::KeyValueStore;
use crate::commands::prompt;
use crate::identity::{AuthEvent, IdentityProvider, Session, SupabaseIdentity};
use crate::settings::Settings;
use crate::supabase::SupabaseClient;

type AuthEvents = Receiver<(AuthEvent, Option<Session>)>;

pub fn identity(settings: &Settings, store: Arc<dyn KeyValueStore>) -> Result<SupabaseIdentity> {
    let client = SupabaseClient::new(settings.supabase()?)?;
    Ok(SupabaseIdentity::new(client, store))
}

/// Forwards auth events so they can be applied to the app context afterwards.
fn watch(identity: &mut dyn IdentityProvider) -> AuthEvents {
    let (sender, events) = mpsc::channel();
    identity.subscribe(Box::new(move |event: AuthEvent, session: Option<&Session>| {
        sender.send((event, session.cloned())).ok();
    }));
    events
}

fn apply(app: &mut AppContext, events: &AuthEvents) {
    for (event, session) in events.try_iter() {
        app.handle_auth_event(event, session.as_ref());
    }
}

fn connect(settings: &Settings, store: Arc<dyn KeyValueStore>) -> Result<(SupabaseIdentity, AppContext)> {
    let identity = identity(settings, Arc::clone(&store))?;
    let session = identity.current_session().unwrap_or(None);
    Ok((identity, AppContext::load(store, session)))
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => prompt("Password: ")?.context("A password is required"),
    }
}

pub fn login(settings: &Settings, store: Arc<dyn KeyValueStore>, email: &str, password: Option<String>) -> Result<()> {
    let (mut identity, mut app) = connect(settings, store)?;
    let events = watch(&mut identity);
    let password = password_or_prompt(password)?;
    identity.sign_in_with_password(email, &password)?;
    apply(&mut app, &events);
    println!("Welcome back, {}!", app.profile().name);
    Ok(())
}

pub fn signup(settings: &Settings, store: Arc<dyn KeyValueStore>, email: &str, password: Option<String>) -> Result<()> {
    let (mut identity, mut app) = connect(settings, store)?;
    let events = watch(&mut identity);
    let password = password_or_prompt(password)?;
    match identity.sign_up(email, &password)? {
        Some(_) => {
            apply(&mut app, &events);
            println!("Account created. Welcome, {}!", app.profile().name);
        }
        None => println!("Account created. Check your email to confirm it before signing in."),
    }
    Ok(())
}

pub fn logout(settings: &Settings, store: Arc<dyn KeyValueStore>) -> Result<()> {
    let (mut identity, mut app) = connect(settings, store)?;
    let events = watch(&mut identity);
    identity.sign_out()?;
    apply(&mut app, &events);
    println!("Signed out.");
    Ok(())
}

pub fn whoami(settings: &Settings, store: Arc<dyn KeyValueStore>) -> Result<()> {
    let (_, app) = connect(settings, store)?;
    match (app.area(), app.session()) {
        (Area::Authenticated, Some(session)) => println!(
            "{} ({})",
            app.profile().name,
            session.user.email.as_deref().unwrap_or(&session.user.id)
        ),
        _ => println!("Not signed in."),
    }
    Ok(())
}

pub fn profile(
    settings: &Settings,
    store: Arc<dyn KeyValueStore>,
    name: Option<String>,
    avatar: Option<String>,
) -> Result<()> {
    let (_, mut app) = connect(settings, store)?;
    let profile = if name.is_some() || avatar.is_some() {
        app.update_profile(name, avatar)?.clone()
    } else {
        app.profile().clone()
    };
    println!("Name: {}", profile.name);
    if let Some(avatar) = &profile.avatar {
        println!("Avatar: {}", avatar);
    }
    Ok(())
}

/// The theme lives in the local cache, so no backend is needed.
pub fn theme(store: Arc<dyn KeyValueStore>, toggle: bool) -> Result<()> {
    let mut app = AppContext::load(store, None);
    if toggle {
        app.toggle_theme();
    }
    println!("Theme: {}", app.theme().as_str());
    Ok(())
}
