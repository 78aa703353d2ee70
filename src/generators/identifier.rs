use crate::error::SurrogateError;
use crate::generators::ExactMatchGenerator;
use crate::random::RandomSource;

/// Redraws when the scrambled value reproduces an input that has something to scramble.
const MAX_ATTEMPTS: usize = 8;

/// Replaces ASCII letters and digits with random characters of the same class.
///
/// `DE951` becomes something shaped like `[A-Z][A-Z][0-9][0-9][0-9]`; every other character,
/// including non-ASCII letters, is kept in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierGenerator;

impl IdentifierGenerator {
    /// One pass of class-preserving substitution.
    pub fn scramble(value: &str, random: &mut dyn RandomSource) -> String {
        value
            .chars()
            .map(|c| match c {
                'a'..='z' => random.random_lowercase_letter(),
                'A'..='Z' => random.random_uppercase_letter(),
                '0'..='9' => random.random_digit(),
                other => other,
            })
            .collect()
    }
}

impl ExactMatchGenerator for IdentifierGenerator {
    fn replace_one(
        &self,
        value: &str,
        random: &mut dyn RandomSource,
    ) -> Result<String, SurrogateError> {
        let scrambles = value.chars().any(|c| c.is_ascii_alphanumeric());

        let mut surrogate = Self::scramble(value, random);
        for _ in 1..MAX_ATTEMPTS {
            if !scrambles || surrogate != value {
                break;
            }
            surrogate = Self::scramble(value, random);
        }

        Ok(surrogate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{ExactMatch, SurrogateGenerator};
    use crate::random::testing::FixedRandom;
    use crate::random::RandomData;

    #[test]
    fn substitutes_per_character_class() {
        let mut random = FixedRandom::first();
        let generator = IdentifierGenerator;

        assert_eq!(generator.replace_one("DE951", &mut random).unwrap(), "CC111");
        assert_eq!(generator.replace_one("ef-51m@", &mut random).unwrap(), "cc-11c@");
        assert_eq!(generator.replace_one("123456", &mut random).unwrap(), "111111");
        assert_eq!(generator.replace_one("é-ß", &mut random).unwrap(), "é-ß");
    }

    #[test]
    fn seeded_output_keeps_shape_and_differs() {
        let mut random = RandomData::new(42);
        let generator = IdentifierGenerator;

        for value in ["DE951", "ef-51m@", "1234567", "AB-12-cd"] {
            let surrogate = generator.replace_one(value, &mut random).unwrap();
            assert_ne!(surrogate, value);
            assert_eq!(surrogate.len(), value.len());
            for (original, replaced) in value.chars().zip(surrogate.chars()) {
                assert_eq!(original.is_ascii_digit(), replaced.is_ascii_digit());
                assert_eq!(original.is_ascii_lowercase(), replaced.is_ascii_lowercase());
                assert_eq!(original.is_ascii_uppercase(), replaced.is_ascii_uppercase());
                if !original.is_ascii_alphanumeric() {
                    assert_eq!(original, replaced);
                }
            }
        }
    }

    #[test]
    fn repeated_identifiers_share_a_surrogate() {
        let mut random = RandomData::new(1);
        let surrogates =
            ExactMatch::new(IdentifierGenerator).replace_all(&["ab12", "XY9", "AB12"], &mut random);
        assert_eq!(surrogates[0], surrogates[2]);
        assert_ne!(surrogates[0], surrogates[1]);
    }
}
