//! Names and initials.
//!
//! Surrogate names keep the syntactic pattern of the original: `Daniel MT de Groot` may become
//! `Jurrien HD Nguyen`, and `Dr. Annemarie van Heijer, Ph.D` may become
//! `Dr. Clara van der Linden, Ph.D`.
//!
//! Two random bijections over the alphabet are drawn per document, one for first names and one
//! for last names. A name is replaced by a random real name whose initial is the mapped initial
//! of the original, so initials and full names that share a letter stay consistent.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use crate::error::SurrogateError;
use crate::generators::{CharMapping, ExactMatchGenerator, SurrogateGenerator};
use crate::random::RandomSource;
use crate::reference::{normalize_index_key, Lastname, NameDatabase, NameIndex};

/// Dutch tussenvoegsels. They belong to the last name, not the middle names.
pub const PREPOSITIONS: &[&str] = &[
    "van", "den", "v.d.", "vd", "de", "der", "'t", "ten", "ter", "at", "op",
];

const TITLES: &[&str] = &[
    "dr", "dhr", "mw", "mevr", "mr", "mrs", "ms", "prof", "drs", "ir", "ing", "sir", "zr", "hr",
    "heer", "meneer", "mevrouw", "mej", "juffrouw", "dokter", "professor", "zuster", "ds",
];

const SUFFIXES: &[&str] = &["phd", "md", "jr", "sr", "ii", "iii", "iv", "msc", "bsc", "mba"];

static PREPOSITIONS_RE: Lazy<Regex> = Lazy::new(|| {
    let alternatives: Vec<String> = PREPOSITIONS.iter().map(|p| regex::escape(p)).collect();
    Regex::new(&format!(r"(?i)^(?:(?:{})\s+)*", alternatives.join("|")))
        .expect("valid prepositions regex")
});

/// A name split into title, first name, middle names, last name and suffix.
///
/// Every non-empty part is a substring of the parsed text. The last name includes its
/// prepositions (`de Groot`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameParts {
    pub title: String,
    pub first: String,
    pub middle: String,
    pub last: String,
    pub suffix: String,
}

fn normalized_word(word: &str) -> String {
    word.chars()
        .filter(|c| *c != '.')
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_title(word: &str) -> bool {
    TITLES.contains(&normalized_word(word).as_str())
}

fn is_suffix(word: &str) -> bool {
    SUFFIXES.contains(&normalized_word(word).as_str())
}

fn is_preposition(word: &str) -> bool {
    PREPOSITIONS.contains(&word.to_lowercase().as_str())
}

/// Byte ranges of the whitespace-separated words of `text`.
fn word_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                spans.push((s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        spans.push((s, text.len()));
    }

    spans
}

/// The text covered by a run of consecutive words, separators included.
fn covering(text: &str, words: &[(usize, usize)]) -> String {
    match (words.first(), words.last()) {
        (Some((start, _)), Some((_, end))) => text[*start..*end].to_string(),
        _ => String::new(),
    }
}

impl NameParts {
    pub fn parse(value: &str) -> Result<Self, SurrogateError> {
        let segments: Vec<&str> = value
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [name] => Ok(Self::from_words(name)),
            [name, rest @ ..]
                if rest
                    .iter()
                    .all(|segment| segment.split_whitespace().all(is_suffix)) =>
            {
                Ok(Self {
                    suffix: rest.join(", "),
                    ..Self::from_words(name)
                })
            }
            // `van Janssen, Jan`
            [last, given] => Ok(Self {
                last: (*last).to_string(),
                ..Self::from_given_names(given)
            }),
            _ => Err(SurrogateError::UnparseableName(value.to_string())),
        }
    }

    /// Parses `[titles] first [middle...] [prepositions] last [suffixes]`.
    fn from_words(text: &str) -> Self {
        let words = word_spans(text);
        let tokens: Vec<&str> = words.iter().map(|(start, end)| &text[*start..*end]).collect();

        let mut lo = 0;
        let mut hi = words.len();
        while hi - lo > 1 && is_title(tokens[lo]) {
            lo += 1;
        }
        while hi - lo > 1 && is_suffix(tokens[hi - 1]) {
            hi -= 1;
        }

        let mut parts = Self {
            title: covering(text, &words[..lo]),
            suffix: covering(text, &words[hi..]),
            ..Self::default()
        };

        if hi - lo == 1 {
            parts.first = tokens[lo].to_string();
            return parts;
        }

        let mut last_start = hi - 1;
        while last_start > lo && is_preposition(tokens[last_start - 1]) {
            last_start -= 1;
        }

        // `Hr. van der Linden` has no given name.
        if last_start == lo {
            parts.last = covering(text, &words[lo..hi]);
            return parts;
        }

        parts.first = tokens[lo].to_string();
        parts.middle = covering(text, &words[lo + 1..last_start]);
        parts.last = covering(text, &words[last_start..hi]);
        parts
    }

    /// Parses the part after the comma of `last, [titles] first [middle...] [suffixes]`.
    fn from_given_names(text: &str) -> Self {
        let words = word_spans(text);
        let tokens: Vec<&str> = words.iter().map(|(start, end)| &text[*start..*end]).collect();

        let mut lo = 0;
        let mut hi = words.len();
        while hi - lo > 1 && is_title(tokens[lo]) {
            lo += 1;
        }
        while hi - lo > 1 && is_suffix(tokens[hi - 1]) {
            hi -= 1;
        }

        Self {
            title: covering(text, &words[..lo]),
            first: covering(text, &words[lo..lo + 1]),
            middle: covering(text, &words[lo + 1..hi]),
            last: String::new(),
            suffix: covering(text, &words[hi..]),
        }
    }
}

/// `true` for strings made of uppercase ASCII letters and dots only, e.g. `MT` or `M.T.`.
pub fn is_initials(part: &str) -> bool {
    !part.is_empty() && part.chars().all(|c| c.is_ascii_uppercase() || c == '.')
}

/// Strips leading prepositions: `van der Linden` becomes `Linden`.
pub fn remove_prepositions(lastname: &str) -> &str {
    match PREPOSITIONS_RE.find(lastname) {
        Some(m) => &lastname[m.end()..],
        None => lastname,
    }
}

/// Gives `name` the case of `original`'s first character.
pub fn restore_case(original: char, name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let first: String = if original.is_lowercase() {
        first.to_lowercase().collect()
    } else {
        first.to_uppercase().collect()
    };
    first + chars.as_str()
}

/// Replaces `part` in `whole` where it starts on a word boundary and ends on a word boundary,
/// before a non-word character or at the end of `whole`. Initials end on `.`, where `\b` alone
/// does not match.
pub fn strict_replace(part: &str, replacement: &str, whole: &str) -> String {
    let pattern = format!(r"\b(?:{})(\W|\b|$)", regex::escape(part));
    let Ok(regex) = Regex::new(&pattern) else {
        return whole.to_string();
    };

    regex
        .replace_all(whole, |caps: &Captures<'_>| {
            let separator = caps.get(1).map_or("", |m| m.as_str());
            format!("{}{}", replacement, separator)
        })
        .into_owned()
}

/// Maps each initial through the first-name bijection, keeping case and punctuation.
///
/// Accented initials are looked up by their base letter. Characters without a mapping are kept.
#[derive(Debug, Clone)]
pub struct InitialsGenerator {
    char_mapping: CharMapping,
}

impl InitialsGenerator {
    pub fn new(char_mapping: CharMapping) -> Self {
        Self { char_mapping }
    }
}

impl ExactMatchGenerator for InitialsGenerator {
    fn replace_one(
        &self,
        value: &str,
        _random: &mut dyn RandomSource,
    ) -> Result<String, SurrogateError> {
        value
            .chars()
            .map(|initial| {
                if !initial.is_alphabetic() {
                    return Ok(initial);
                }

                let Some(&mapped) = normalize_index_key(initial)
                    .and_then(|key| self.char_mapping.get(&key))
                else {
                    return Ok(initial);
                };

                Ok(if initial.is_uppercase() {
                    mapped.to_ascii_uppercase()
                } else {
                    mapped.to_ascii_lowercase()
                })
            })
            .collect()
    }
}

#[derive(Default)]
struct NameCaches {
    firstnames: HashMap<String, String>,
    lastnames: HashMap<String, Lastname>,
}

/// Replaces full names part by part, see the module documentation.
#[derive(Debug, Clone)]
pub struct NameGenerator<'a> {
    database: &'a NameDatabase,
    firstname_mapping: CharMapping,
    lastname_mapping: CharMapping,
    initials: InitialsGenerator,
}

fn surrogate_from_index<T: Clone>(
    index: &NameIndex<T>,
    initial: char,
    mapping: &CharMapping,
    random: &mut dyn RandomSource,
) -> Result<T, SurrogateError> {
    let key = normalize_index_key(initial).ok_or(SurrogateError::UnmappedInitial(initial))?;
    let mapped = *mapping
        .get(&key)
        .ok_or(SurrogateError::UnmappedInitial(initial))?;

    let bucket = index.get(&mapped).map(Vec::as_slice).unwrap_or_default();
    random
        .choice(bucket)
        .cloned()
        .ok_or(SurrogateError::EmptyNameBucket(mapped))
}

impl<'a> NameGenerator<'a> {
    pub fn new(
        database: &'a NameDatabase,
        firstname_mapping: CharMapping,
        lastname_mapping: CharMapping,
    ) -> Self {
        let initials = InitialsGenerator::new(firstname_mapping.clone());
        Self {
            database,
            firstname_mapping,
            lastname_mapping,
            initials,
        }
    }

    fn surrogate_firstname(
        &self,
        firstname: &str,
        cache: &mut HashMap<String, String>,
        random: &mut dyn RandomSource,
    ) -> Result<String, SurrogateError> {
        let key = firstname.to_lowercase();
        let surrogate = match cache.get(&key) {
            Some(surrogate) => surrogate.clone(),
            None => {
                let initial = firstname
                    .chars()
                    .next()
                    .ok_or_else(|| SurrogateError::UnparseableName(firstname.to_string()))?;
                let index = self.database.gender_index_for_name(firstname);
                let surrogate =
                    surrogate_from_index(index, initial, &self.firstname_mapping, random)?;
                cache.insert(key, surrogate.clone());
                surrogate
            }
        };

        let original_initial = firstname.chars().next().unwrap_or_default();
        Ok(restore_case(original_initial, &surrogate))
    }

    /// Full first names are drawn from the name index, initials go through the bijection.
    fn replace_given_name(
        &self,
        part: &str,
        cache: &mut HashMap<String, String>,
        random: &mut dyn RandomSource,
    ) -> Result<String, SurrogateError> {
        if is_initials(part) {
            self.initials.replace_one(part, random)
        } else {
            self.surrogate_firstname(part, cache, random)
        }
    }

    fn replace_lastname(
        &self,
        lastname: &str,
        cache: &mut HashMap<String, Lastname>,
        random: &mut dyn RandomSource,
    ) -> Result<String, SurrogateError> {
        let unparseable = || SurrogateError::UnparseableName(lastname.to_string());
        let original = remove_prepositions(lastname);
        let initial = original.chars().next().ok_or_else(unparseable)?;

        let key = lastname.to_lowercase();
        let surrogate = match cache.get(&key) {
            Some(surrogate) => surrogate.clone(),
            None => {
                let index = self.database.lastname_index();
                let surrogate =
                    surrogate_from_index(index, initial, &self.lastname_mapping, random)?;
                cache.insert(key, surrogate.clone());
                surrogate
            }
        };

        let name = restore_case(initial, &surrogate.name);
        Ok(if surrogate.prefix.is_empty() {
            name
        } else {
            format!("{} {}", surrogate.prefix, name)
        })
    }

    fn replace_name(
        &self,
        value: &str,
        caches: &mut NameCaches,
        random: &mut dyn RandomSource,
    ) -> Result<String, SurrogateError> {
        let name = NameParts::parse(value)?;
        let mut replaced = value.to_string();

        if !name.first.is_empty() {
            let replacement = self.replace_given_name(&name.first, &mut caches.firstnames, random)?;
            replaced = strict_replace(&name.first, &replacement, &replaced);
        }

        if !name.middle.is_empty() {
            let replacement = name
                .middle
                .split_whitespace()
                .map(|part| self.replace_given_name(part, &mut caches.firstnames, random))
                .collect::<Result<Vec<_>, _>>()?
                .join(" ");
            replaced = strict_replace(&name.middle, &replacement, &replaced);
        }

        if !name.last.is_empty() {
            let replacement = self.replace_lastname(&name.last, &mut caches.lastnames, random)?;
            replaced = strict_replace(&name.last, &replacement, &replaced);
        }

        if replaced == value {
            return Err(SurrogateError::Unchanged(value.to_string()));
        }
        Ok(replaced)
    }
}

impl SurrogateGenerator for NameGenerator<'_> {
    fn replace_all(&self, values: &[&str], random: &mut dyn RandomSource) -> Vec<Option<String>> {
        let mut caches = NameCaches::default();

        values
            .iter()
            .map(|value| match self.replace_name(value, &mut caches, random) {
                Ok(surrogate) => Some(surrogate),
                Err(err) => {
                    debug!(error = %err, "could not process name");
                    None
                }
            })
            .collect()
    }
}
