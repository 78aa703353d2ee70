//! Surrogate generators, one strategy per PHI category.
//!
//! Every strategy implements [`SurrogateGenerator`]: it receives all values of one tag within
//! one document and returns a parallel list of surrogates, `None` marking a value that could not
//! be replaced. Strategies that only look at one value at a time implement
//! [`ExactMatchGenerator`] and are wrapped in [`ExactMatch`], which adds the per-document cache.

pub mod age;
pub mod corpus_shuffle;
pub mod date;
pub mod email;
pub mod identifier;
pub mod location;
pub mod name;
pub mod phone;
pub mod url;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DateConfig;
use crate::error::SurrogateError;
use crate::random::RandomSource;
use crate::reference::ReferenceData;

pub use age::AgeGenerator;
pub use corpus_shuffle::CorpusShuffleGenerator;
pub use date::DateGenerator;
pub use email::EmailGenerator;
pub use identifier::IdentifierGenerator;
pub use location::LocationGenerator;
pub use name::{InitialsGenerator, NameGenerator};
pub use phone::PhoneGenerator;
pub use url::UrlGenerator;

/// Produces surrogates for all values of one tag in one document.
pub trait SurrogateGenerator {
    /// Returns exactly one entry per input value, in input order.
    fn replace_all(&self, values: &[&str], random: &mut dyn RandomSource) -> Vec<Option<String>>;
}

/// A generator whose output for a value depends only on that value.
pub trait ExactMatchGenerator {
    fn replace_one(&self, value: &str, random: &mut dyn RandomSource)
        -> Result<String, SurrogateError>;
}

/// Runs an [`ExactMatchGenerator`] over a batch so that case-insensitively equal values share
/// one surrogate.
#[derive(Debug, Clone)]
pub struct ExactMatch<G> {
    inner: G,
}

impl<G> ExactMatch<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

impl<G: ExactMatchGenerator> SurrogateGenerator for ExactMatch<G> {
    fn replace_all(&self, values: &[&str], random: &mut dyn RandomSource) -> Vec<Option<String>> {
        let mut cache: HashMap<String, Option<String>> = HashMap::new();

        values
            .iter()
            .map(|value| {
                cache
                    .entry(value.to_lowercase())
                    .or_insert_with(|| match self.inner.replace_one(value, random) {
                        Ok(surrogate) => Some(surrogate),
                        Err(err) => {
                            debug!(error = %err, "could not generate surrogate");
                            None
                        }
                    })
                    .clone()
            })
            .collect()
    }
}

/// Returns every value unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityGenerator;

impl SurrogateGenerator for IdentityGenerator {
    fn replace_all(&self, values: &[&str], _random: &mut dyn RandomSource) -> Vec<Option<String>> {
        values.iter().map(|value| Some((*value).to_string())).collect()
    }
}

/// The strategies a tag can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    Name,
    Initials,
    Location,
    Age,
    Date,
    Phone,
    Email,
    Url,
    Identifier,
    Identity,
}

/// Maps tag names (case-sensitive) to generator kinds.
#[derive(Debug, Clone)]
pub struct TagGeneratorRegistry {
    mapping: HashMap<String, GeneratorKind>,
}

impl Default for TagGeneratorRegistry {
    fn default() -> Self {
        let mapping = [
            ("Name", GeneratorKind::Name),
            ("Initials", GeneratorKind::Initials),
            ("Address", GeneratorKind::Location),
            ("Age", GeneratorKind::Age),
            ("Date", GeneratorKind::Date),
            ("Phone_fax", GeneratorKind::Phone),
            ("Email", GeneratorKind::Email),
            ("URL_IP", GeneratorKind::Url),
            ("SSN", GeneratorKind::Identifier),
            ("ID", GeneratorKind::Identifier),
            ("Other", GeneratorKind::Identity),
        ]
        .into_iter()
        .map(|(tag, kind)| (tag.to_string(), kind))
        .collect();

        Self { mapping }
    }
}

impl TagGeneratorRegistry {
    /// The built-in mapping with `overrides` layered on top.
    pub fn with_overrides<'t>(
        overrides: impl IntoIterator<Item = (&'t String, &'t GeneratorKind)>,
    ) -> Self {
        let mut registry = Self::default();
        for (tag, kind) in overrides {
            registry.register(tag.clone(), *kind);
        }
        registry
    }

    pub fn register(&mut self, tag: impl Into<String>, kind: GeneratorKind) {
        self.mapping.insert(tag.into(), kind);
    }

    /// `None` means the tag falls back to corpus shuffling.
    pub fn generator_for_tag(&self, tag: &str) -> Option<GeneratorKind> {
        self.mapping.get(tag).copied()
    }
}

/// A random bijection over the lowercase ASCII alphabet.
pub type CharMapping = HashMap<char, char>;

/// Draws a [`CharMapping`] by shuffling the alphabet.
pub fn random_char_mapping(random: &mut dyn RandomSource) -> CharMapping {
    let alphabet: Vec<char> = ('a'..='z').collect();
    let shuffled = random.shuffle(&alphabet);
    alphabet.into_iter().zip(shuffled).collect()
}

/// Builds the generators for one document.
///
/// The first- and last-name character mappings are drawn once on construction and shared by
/// every name and initials generator the factory hands out, so initials and full names stay
/// consistent within the document.
pub struct GeneratorFactory<'a> {
    reference: &'a ReferenceData,
    date_config: &'a DateConfig,
    firstname_mapping: CharMapping,
    lastname_mapping: CharMapping,
}

impl<'a> GeneratorFactory<'a> {
    pub fn new(
        reference: &'a ReferenceData,
        date_config: &'a DateConfig,
        random: &mut dyn RandomSource,
    ) -> Self {
        let firstname_mapping = random_char_mapping(random);
        let lastname_mapping = random_char_mapping(random);

        Self {
            reference,
            date_config,
            firstname_mapping,
            lastname_mapping,
        }
    }

    pub fn firstname_mapping(&self) -> &CharMapping {
        &self.firstname_mapping
    }

    pub fn lastname_mapping(&self) -> &CharMapping {
        &self.lastname_mapping
    }

    pub fn build(&self, kind: GeneratorKind) -> Box<dyn SurrogateGenerator + 'a> {
        match kind {
            GeneratorKind::Name => Box::new(NameGenerator::new(
                &self.reference.names,
                self.firstname_mapping.clone(),
                self.lastname_mapping.clone(),
            )),
            GeneratorKind::Initials => Box::new(ExactMatch::new(InitialsGenerator::new(
                self.firstname_mapping.clone(),
            ))),
            GeneratorKind::Location => {
                Box::new(LocationGenerator::new(&self.reference.locations))
            }
            GeneratorKind::Age => Box::new(ExactMatch::new(AgeGenerator)),
            GeneratorKind::Date => Box::new(DateGenerator::new(self.date_config.clone())),
            GeneratorKind::Phone => Box::new(ExactMatch::new(PhoneGenerator)),
            GeneratorKind::Email => Box::new(ExactMatch::new(EmailGenerator)),
            GeneratorKind::Url => Box::new(ExactMatch::new(UrlGenerator)),
            GeneratorKind::Identifier => Box::new(ExactMatch::new(IdentifierGenerator)),
            GeneratorKind::Identity => Box::new(IdentityGenerator),
        }
    }

    pub fn shuffle_generator(&self, choices: Vec<String>) -> Box<dyn SurrogateGenerator + 'a> {
        Box::new(CorpusShuffleGenerator::new(choices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::FixedRandom;
    use crate::random::RandomData;
    use std::cell::Cell;
    use std::collections::HashSet;

    struct CountingGenerator {
        calls: Cell<usize>,
    }

    impl ExactMatchGenerator for CountingGenerator {
        fn replace_one(
            &self,
            value: &str,
            _random: &mut dyn RandomSource,
        ) -> Result<String, SurrogateError> {
            self.calls.set(self.calls.get() + 1);
            if value == "bad" {
                return Err(SurrogateError::UnparseableName(value.to_string()));
            }
            Ok(format!("{}-{}", value, self.calls.get()))
        }
    }

    #[test]
    fn exact_match_caches_case_insensitively() {
        let generator = ExactMatch::new(CountingGenerator {
            calls: Cell::new(0),
        });
        let mut random = FixedRandom::first();

        let surrogates =
            generator.replace_all(&["Jan", "piet", "JAN", "bad", "Piet", "bad"], &mut random);

        assert_eq!(
            surrogates,
            vec![
                Some("Jan-1".to_string()),
                Some("piet-2".to_string()),
                Some("Jan-1".to_string()),
                None,
                Some("piet-2".to_string()),
                None,
            ]
        );
        assert_eq!(generator.inner().calls.get(), 3);
    }

    #[test]
    fn identity_returns_input() {
        let mut random = FixedRandom::first();
        assert_eq!(
            IdentityGenerator.replace_all(&["a", "b"], &mut random),
            vec![Some("a".to_string()), Some("b".to_string())]
        );
    }

    #[test]
    fn registry_maps_builtin_tags() {
        let registry = TagGeneratorRegistry::default();
        assert_eq!(registry.generator_for_tag("Name"), Some(GeneratorKind::Name));
        assert_eq!(registry.generator_for_tag("Address"), Some(GeneratorKind::Location));
        assert_eq!(registry.generator_for_tag("Phone_fax"), Some(GeneratorKind::Phone));
        assert_eq!(registry.generator_for_tag("URL_IP"), Some(GeneratorKind::Url));
        assert_eq!(registry.generator_for_tag("SSN"), Some(GeneratorKind::Identifier));
        assert_eq!(registry.generator_for_tag("ID"), Some(GeneratorKind::Identifier));
        assert_eq!(registry.generator_for_tag("Other"), Some(GeneratorKind::Identity));
        assert_eq!(registry.generator_for_tag("name"), None);
        assert_eq!(registry.generator_for_tag("Hospital"), None);
    }

    #[test]
    fn registry_overrides_replace_and_extend() {
        let overrides: HashMap<String, GeneratorKind> = [
            ("Hospital".to_string(), GeneratorKind::Identity),
            ("Other".to_string(), GeneratorKind::Identifier),
        ]
        .into_iter()
        .collect();

        let registry = TagGeneratorRegistry::with_overrides(&overrides);
        assert_eq!(registry.generator_for_tag("Hospital"), Some(GeneratorKind::Identity));
        assert_eq!(registry.generator_for_tag("Other"), Some(GeneratorKind::Identifier));
        assert_eq!(registry.generator_for_tag("Name"), Some(GeneratorKind::Name));
    }

    #[test]
    fn char_mapping_is_a_bijection() {
        let mut data = RandomData::new(45);
        let mapping = random_char_mapping(&mut data);

        let keys: HashSet<char> = mapping.keys().copied().collect();
        let values: HashSet<char> = mapping.values().copied().collect();
        let alphabet: HashSet<char> = ('a'..='z').collect();
        assert_eq!(keys, alphabet);
        assert_eq!(values, alphabet);
    }
}
