use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Where the store map is centred.
pub const CITY_CENTRE: (f64, f64) = (51.219447, 4.402464);

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Element::Fire => "fire",
            Element::Water => "water",
            Element::Earth => "earth",
            Element::Air => "air",
        };
        write!(f, "{}", name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Store {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub element: Element,
    pub address: &'static str,
    pub rating: f32,
}

pub static MERCH_STORES: [Store; 4] = [
    Store {
        name: "Akiba Station",
        latitude: 51.21622,
        longitude: 4.42149,
        element: Element::Fire,
        address: "Pelikaanstraat 3, 2018 Antwerpen, Belgium",
        rating: 4.5,
    },
    Store {
        name: "Mekanik Strip",
        latitude: 51.22232,
        longitude: 4.40360,
        element: Element::Water,
        address: "Sint-Jacobsmarkt 73, 2000 Antwerpen, Belgium",
        rating: 4.0,
    },
    Store {
        name: "Game Mania (Sint-Jacobsmarkt)",
        latitude: 51.22031,
        longitude: 4.41145,
        element: Element::Earth,
        address: "Sint-Jacobsmarkt 36, 2000 Antwerpen, Belgium",
        rating: 4.2,
    },
    Store {
        name: "Pop Culture Store",
        latitude: 51.21994,
        longitude: 4.40112,
        element: Element::Air,
        address: "Nationalestraat 5, 2000 Antwerpen, Belgium",
        rating: 4.3,
    },
];

/// Great-circle distance in kilometres.
pub fn distance_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lon2) = (to.0.to_radians(), to.1.to_radians());
    let a = ((lat2 - lat1) / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * ((lon2 - lon1) / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

impl Store {
    pub fn position(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    pub fn distance_from(&self, origin: (f64, f64)) -> f64 {
        distance_km(origin, self.position())
    }
}

/// Stores matching the element, nearest first.
pub fn find_stores(element: Option<Element>, origin: (f64, f64)) -> Vec<(&'static Store, f64)> {
    let mut found: Vec<(&'static Store, f64)> = MERCH_STORES
        .iter()
        .filter(|s| element.map_or(true, |e| s.element == e))
        .map(|s| (s, s.distance_from(origin)))
        .collect();
    found.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    found
}
