use crate::error::SurrogateError;
use crate::generators::identifier::IdentifierGenerator;
use crate::generators::ExactMatchGenerator;
use crate::random::RandomSource;

/// Scrambles everything before the last `.` and keeps the top-level domain.
///
/// The result is not a realistic address: `jan.janssen@gmail.com` may become
/// `iba.qbkbaase@uync.com`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailGenerator;

impl ExactMatchGenerator for EmailGenerator {
    fn replace_one(
        &self,
        value: &str,
        random: &mut dyn RandomSource,
    ) -> Result<String, SurrogateError> {
        let (local, tld) = match value.rfind('.') {
            Some(index) => value.split_at(index),
            None => (value, ""),
        };

        let scrambled = IdentifierGenerator.replace_one(local, random)?;
        Ok(scrambled + tld)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{ExactMatch, SurrogateGenerator};
    use crate::random::testing::FixedRandom;

    #[test]
    fn keeps_top_level_domain() {
        let mut random = FixedRandom::first();
        let surrogates = ExactMatch::new(EmailGenerator).replace_all(
            &["jan.janssen@gmail.com", "jan.janssen@com.com", "Abc-aBc@com3.com"],
            &mut random,
        );

        assert_eq!(
            surrogates,
            vec![
                Some("ccc.ccccccc@ccccc.com".to_string()),
                Some("ccc.ccccccc@ccc.com".to_string()),
                Some("Ccc-cCc@ccc1.com".to_string()),
            ]
        );
    }

    #[test]
    fn address_without_dot_is_fully_scrambled() {
        let mut random = FixedRandom::first();
        assert_eq!(
            EmailGenerator.replace_one("info@localhost", &mut random).unwrap(),
            "cccc@ccccccccc"
        );
    }
}
