use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Match, Regex};
use tracing::debug;

use crate::error::SurrogateError;
use crate::generators::identifier::IdentifierGenerator;
use crate::generators::{ExactMatchGenerator, SurrogateGenerator};
use crate::random::RandomSource;
use crate::reference::LocationDatabase;

// House numbers such as `7A`, `123-4` or `123 A`.
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:\d+-?)+(?:\w|\s\w\b)?").expect("valid house number regex")
});

static ZIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[0-9]{4}\s?[a-z]{2}").expect("valid zip regex"));

static STREET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\w*(?:straat|laan|hof|plein|plantsoen|gracht|kade|weg|burg|strjitte|veld|steeg|pad|dijk|baan|dam|dreef|markt|park|singel|bolwerk)\w*",
    )
    .expect("valid street regex")
});

static ZIP_DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{4}").expect("valid zip digits regex"));
static ZIP_LETTERS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z]{2}").expect("valid zip letters regex"));

/// An address split into its parts. Empty strings mark absent parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub raw: String,
    pub country: String,
    pub zip_code: String,
    pub place: String,
    pub street: String,
    pub house_number: String,
}

fn split_at_match<'s>(
    regex: &Regex,
    value: &'s str,
    include_match_in_left: bool,
) -> Option<(&'s str, &'s str, Match<'s>)> {
    let m = regex.find(value)?;
    let left = if include_match_in_left {
        &value[..m.end()]
    } else {
        &value[..m.start()]
    };
    Some((left, &value[m.end()..], m))
}

fn strip_non_word(value: &str) -> String {
    value
        .trim_matches(|c: char| !(c.is_alphanumeric() || c == '_'))
        .to_string()
}

/// Splits a free-text address on the first postal code, else the first house number, else the
/// first street-like word. Text before the split point is the street, text after it the place.
pub fn parse_location(value: &str, database: &LocationDatabase) -> Location {
    let mut zip_code = "";
    let (street, place) = if let Some((left, right, m)) = split_at_match(&ZIP_RE, value, false) {
        zip_code = m.as_str();
        (left, right)
    } else if let Some((left, right, _)) = split_at_match(&NUMBER_RE, value, true) {
        (left, right)
    } else if let Some((left, right, _)) = split_at_match(&STREET_RE, value, true) {
        (left, right)
    } else {
        ("", value)
    };

    let (street, house_number) = match NUMBER_RE.find(street) {
        Some(m) => (street.replace(m.as_str(), ""), m.as_str()),
        None => (street.to_string(), ""),
    };

    // Countries are single tokens; the last one wins.
    let country = place
        .split_whitespace()
        .filter(|token| database.is_country(token))
        .last()
        .unwrap_or("");
    let place = if country.is_empty() {
        place.to_string()
    } else {
        place.replace(country, "")
    };

    Location {
        raw: value.to_string(),
        country: strip_non_word(country),
        zip_code: strip_non_word(zip_code),
        place: strip_non_word(&place),
        street: strip_non_word(&street),
        house_number: strip_non_word(house_number),
    }
}

/// Replaces postal code, place, street and house number of an address; countries are kept.
///
/// Each part is replaced by plain substring substitution in the original text, so a part that
/// recurs elsewhere in the address is replaced there as well.
#[derive(Debug, Clone)]
pub struct LocationGenerator<'a> {
    database: &'a LocationDatabase,
}

#[derive(Default)]
struct PartCaches {
    zip_code: HashMap<String, String>,
    place: HashMap<String, String>,
    street: HashMap<String, String>,
    house_number: HashMap<String, String>,
}

impl<'a> LocationGenerator<'a> {
    pub fn new(database: &'a LocationDatabase) -> Self {
        Self { database }
    }

    fn surrogate_zip(
        &self,
        original: &str,
        random: &mut dyn RandomSource,
    ) -> Result<String, SurrogateError> {
        let normalized: String = original.split_whitespace().collect();
        let drawn = choose_other(self.database.zip_codes(), &normalized, random)
            .ok_or(SurrogateError::EmptyReferenceTable("zip codes"))?;

        let split = drawn.char_indices().nth(4).map_or(drawn.len(), |(i, _)| i);
        let (digits, letters) = drawn.split_at(split);

        let surrogate = ZIP_DIGITS_RE.replace(original, regex::NoExpand(digits));
        let surrogate = ZIP_LETTERS_RE.replace(&surrogate, regex::NoExpand(letters));
        Ok(surrogate.into_owned())
    }

    fn surrogate_place(
        &self,
        original: &str,
        random: &mut dyn RandomSource,
    ) -> Result<String, SurrogateError> {
        choose_other(self.database.places(), original, random)
            .ok_or(SurrogateError::EmptyReferenceTable("places"))
    }

    fn surrogate_street(
        &self,
        original: &str,
        random: &mut dyn RandomSource,
    ) -> Result<String, SurrogateError> {
        choose_other(self.database.streetnames(), original, random)
            .ok_or(SurrogateError::EmptyReferenceTable("streets"))
    }

    fn replace_one(
        &self,
        value: &str,
        caches: &mut PartCaches,
        random: &mut dyn RandomSource,
    ) -> Result<String, SurrogateError> {
        let location = parse_location(value, self.database);
        let mut replaced = value.to_string();

        if !location.zip_code.is_empty() {
            let surrogate = cached(&mut caches.zip_code, &location.zip_code, |zip| {
                self.surrogate_zip(zip, random)
            })?;
            replaced = replaced.replace(&location.zip_code, &surrogate);
        }

        if !location.place.is_empty() {
            let surrogate = cached(&mut caches.place, &location.place, |place| {
                self.surrogate_place(place, random)
            })?;
            replaced = replaced.replace(&location.place, &surrogate);
        }

        if !location.street.is_empty() {
            let surrogate = cached(&mut caches.street, &location.street, |street| {
                self.surrogate_street(street, random)
            })?;
            replaced = replaced.replace(&location.street, &surrogate);
        }

        if !location.house_number.is_empty() {
            let surrogate = cached(&mut caches.house_number, &location.house_number, |number| {
                IdentifierGenerator.replace_one(number, random)
            })?;
            replaced = replaced.replace(&location.house_number, &surrogate);
        }

        Ok(replaced)
    }
}

impl SurrogateGenerator for LocationGenerator<'_> {
    fn replace_all(&self, values: &[&str], random: &mut dyn RandomSource) -> Vec<Option<String>> {
        let mut caches = PartCaches::default();

        values
            .iter()
            .map(|value| match self.replace_one(value, &mut caches, random) {
                Ok(surrogate) => Some(surrogate),
                Err(err) => {
                    debug!(error = %err, "could not generate location surrogate");
                    None
                }
            })
            .collect()
    }
}

fn cached<F>(
    cache: &mut HashMap<String, String>,
    original: &str,
    generate: F,
) -> Result<String, SurrogateError>
where
    F: FnOnce(&str) -> Result<String, SurrogateError>,
{
    let key = original.to_lowercase();
    if let Some(surrogate) = cache.get(&key) {
        return Ok(surrogate.clone());
    }

    let surrogate = generate(original)?;
    cache.insert(key, surrogate.clone());
    Ok(surrogate)
}

/// Random table entry, avoiding `original` (ignoring case and whitespace) when possible.
fn choose_other(
    options: &[String],
    original: &str,
    random: &mut dyn RandomSource,
) -> Option<String> {
    let normalize = |value: &str| -> String {
        value
            .split_whitespace()
            .collect::<String>()
            .to_lowercase()
    };
    let original = normalize(original);

    let others: Vec<&String> = options
        .iter()
        .filter(|option| normalize(option) != original)
        .collect();

    if others.is_empty() {
        random.choice(options).cloned()
    } else {
        random.choice(&others).map(|option| (*option).clone())
    }
}
