use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SurrogateError;
use crate::generators::identifier::IdentifierGenerator;
use crate::generators::ExactMatchGenerator;
use crate::random::RandomSource;

static URL_ELEMENTS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(https?|www\.|\.(?:org|com|nl|de|be|co\.uk|gov|net|edu|care))")
        .expect("valid url regex")
});

/// Scrambles a URL while keeping its scheme, `www.` and known top-level domains.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlGenerator;

impl ExactMatchGenerator for UrlGenerator {
    fn replace_one(
        &self,
        value: &str,
        random: &mut dyn RandomSource,
    ) -> Result<String, SurrogateError> {
        // Scrambling maps ASCII to ASCII and leaves everything else alone, so byte offsets of
        // the original matches are valid in the scrambled string.
        let mut surrogate = IdentifierGenerator.replace_one(value, random)?;
        for element in URL_ELEMENTS_RE.find_iter(value) {
            surrogate.replace_range(element.range(), element.as_str());
        }
        Ok(surrogate)
    }
}
