use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::SurrogateError;
use crate::generators::ExactMatchGenerator;
use crate::random::RandomSource;

const MAX_AGE: u64 = 89;

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid age regex"));

/// Caps every number above 89 at 89. Lower ages are left as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeGenerator;

impl ExactMatchGenerator for AgeGenerator {
    fn replace_one(
        &self,
        value: &str,
        _random: &mut dyn RandomSource,
    ) -> Result<String, SurrogateError> {
        let capped = NUMBER_RE.replace_all(value, |caps: &Captures| {
            let digits = &caps[0];
            // Runs too long for u64 are certainly above the cap.
            match digits.parse::<u64>() {
                Ok(age) if age <= MAX_AGE => digits.to_string(),
                _ => MAX_AGE.to_string(),
            }
        });
        Ok(capped.into_owned())
    }
}
