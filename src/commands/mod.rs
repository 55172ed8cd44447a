use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::cache::{FileStore, KeyValueStore};
use crate::content::{ContentSource, EpisodeFilter, HttpGateway};
use crate::settings::Settings;
use crate::stores::Element;

pub mod account;
pub mod browse;
pub mod locations;
pub mod quiz;

/// Avatar: The Last Airbender trivia quiz and companion tools.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Turn on debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Plays a ten question quiz.
    Quiz,
    /// Lists characters, optionally filtered by name.
    Characters {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Shows one character's details.
    Character { id: i64 },
    /// Lists episodes in airing order.
    Episodes {
        #[arg(long)]
        season: Option<String>,
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Shows the last quiz score.
    Score,
    /// Shows or switches the colour theme.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Shows or edits the signed in user's profile.
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Lists merchandise stores, nearest first.
    Stores {
        #[arg(short, long, value_enum)]
        element: Option<Element>,
    },
    /// Manages saved map locations.
    Locations {
        #[command(subcommand)]
        action: LocationsAction,
    },
    /// Signs in with email and password.
    Login {
        email: String,
        /// Read from standard input when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Creates an account.
    Signup {
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Signs out.
    Logout,
    /// Shows who is signed in.
    Whoami,
}

#[derive(Subcommand, Debug)]
pub enum ThemeAction {
    Toggle,
}

#[derive(Subcommand, Debug)]
pub enum LocationsAction {
    List,
    Add {
        title: String,
        /// Accepts `,` or `.` as decimal separator.
        #[arg(allow_hyphen_values = true)]
        latitude: String,
        #[arg(allow_hyphen_values = true)]
        longitude: String,
    },
}

pub fn run(cli: Cli, settings: Settings) -> Result<()> {
    let cache_dir = settings.cache_dir()?;
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&cache_dir)?);

    match cli.command {
        Command::Quiz => quiz::play(&settings, gateway(&settings)?, store),
        Command::Characters { search } => {
            browse::characters(gateway(&settings)?.as_ref(), store.as_ref(), search.as_deref())
        }
        Command::Character { id } => browse::character(gateway(&settings)?.as_ref(), store.as_ref(), id),
        Command::Episodes { season, search } => browse::episodes(
            gateway(&settings)?.as_ref(),
            store.as_ref(),
            &EpisodeFilter { season, search },
        ),
        Command::Score => browse::score(store.as_ref()),
        Command::Stores { element } => browse::stores(element),
        Command::Theme { action } => account::theme(store, action.is_some()),
        Command::Profile { name, avatar } => account::profile(&settings, store, name, avatar),
        Command::Login { email, password } => account::login(&settings, store, &email, password),
        Command::Signup { email, password } => account::signup(&settings, store, &email, password),
        Command::Logout => account::logout(&settings, store),
        Command::Whoami => account::whoami(&settings, store),
        Command::Locations { action } => match action {
            LocationsAction::List => locations::list(&settings, store),
            LocationsAction::Add {
                title,
                latitude,
                longitude,
            } => locations::add(&settings, store, &title, &latitude, &longitude),
        },
    }
}

fn gateway(settings: &Settings) -> Result<Arc<dyn ContentSource>> {
    Ok(Arc::new(HttpGateway::new(&settings.api_url)?))
}

/// Prints `text` and reads one line. `None` on end of input.
pub fn prompt(text: &str) -> Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush().context("could not write to stdout")?;
    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("could not read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}
