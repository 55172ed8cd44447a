use anyhow::{anyhow, Result};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use unidecode::unidecode;

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/100x100?text=NO+IMG";

lazy_static! {
    static ref FORBIDDEN_SEARCH_CHARACTERS_REGEX: Regex = Regex::new("[^a-z0-9]").unwrap();
}

fn sanitize(text: &str) -> String {
    let text = unidecode(text);
    FORBIDDEN_SEARCH_CHARACTERS_REGEX
        .replace_all(&text.to_lowercase(), "")
        .into()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    })
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bio {
    #[serde(default, deserialize_with = "one_or_many")]
    pub alternative_names: Vec<String>,
    pub nationality: Option<String>,
    pub ethnicity: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub ages: Vec<String>,
    pub born: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub died: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInformation {
    pub love_interest: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub weapons_of_choice: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub fighting_styles: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    #[serde(default)]
    pub bio: Bio,
    pub personal_information: Option<PersonalInformation>,
}

impl Character {
    pub fn image_url(&self) -> &str {
        match &self.image {
            Some(image) if !image.trim().is_empty() => image,
            _ => PLACEHOLDER_IMAGE,
        }
    }

    /// Accent, case and punctuation insensitive match against the name and alternative names.
    pub fn matches(&self, query: &str) -> bool {
        let query = sanitize(query);
        if query.is_empty() {
            return true;
        }
        std::iter::once(&self.name)
            .chain(self.bio.alternative_names.iter())
            .any(|name| sanitize(name).contains(&query))
    }

    /// Labeled detail lines, skipping blank and "NA" values.
    pub fn details(&self) -> Vec<(&'static str, String)> {
        let personal = self.personal_information.clone().unwrap_or_default();
        let fields: Vec<(&'static str, Vec<String>)> = vec![
            ("Alternative names", self.bio.alternative_names.clone()),
            ("Nationality", self.bio.nationality.iter().cloned().collect()),
            ("Ethnicity", self.bio.ethnicity.iter().cloned().collect()),
            ("Ages", self.bio.ages.clone()),
            ("Born", self.bio.born.iter().cloned().collect()),
            ("Died", self.bio.died.clone()),
            ("Love interest", personal.love_interest.into_iter().collect()),
            ("Weapons of choice", personal.weapons_of_choice),
            ("Fighting styles", personal.fighting_styles),
        ];
        fields
            .into_iter()
            .filter_map(|(label, values)| {
                let values: Vec<String> = values
                    .into_iter()
                    .filter(|v| !v.trim().is_empty() && v.trim() != "NA")
                    .collect();
                if values.is_empty() {
                    None
                } else {
                    Some((label, values.iter().join(", ")))
                }
            })
            .collect()
    }
}

pub fn validate(character: Character) -> Result<Character> {
    if character.name.trim().is_empty() {
        return Err(anyhow!("character {} has no name", character.id));
    }
    Ok(character)
}

pub fn find_by_id(characters: &[Character], id: i64) -> Option<&Character> {
    characters.iter().find(|c| c.id == id)
}
