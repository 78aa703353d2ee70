use std::collections::{BTreeSet, HashMap};

use crate::generators::SurrogateGenerator;
use crate::random::RandomSource;

/// Maps each distinct value to a real value of the same tag seen elsewhere in the dataset.
///
/// Inputs and choices are sorted before sampling so a seed always yields the same mapping.
/// Choices are drawn without replacement unless there are more distinct inputs than choices.
#[derive(Debug, Clone)]
pub struct CorpusShuffleGenerator {
    choices: Vec<String>,
}

impl CorpusShuffleGenerator {
    pub fn new(choices: impl IntoIterator<Item = String>) -> Self {
        let choices: BTreeSet<String> = choices.into_iter().collect();
        Self {
            choices: choices.into_iter().collect(),
        }
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }
}

impl SurrogateGenerator for CorpusShuffleGenerator {
    fn replace_all(&self, values: &[&str], random: &mut dyn RandomSource) -> Vec<Option<String>> {
        let unique: BTreeSet<&str> = values.iter().copied().collect();
        let with_replacement = unique.len() > self.choices.len();
        let targets = random.sample(&self.choices, unique.len(), with_replacement);

        let mapping: HashMap<&str, String> = unique.into_iter().zip(targets).collect();
        values
            .iter()
            .map(|value| mapping.get(value).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RandomData;

    fn counts(values: &[Option<String>]) -> HashMap<&Option<String>, usize> {
        let mut counts = HashMap::new();
        for value in values {
            *counts.entry(value).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn maps_equal_inputs_to_equal_choices() {
        let generator = CorpusShuffleGenerator::new(
            ["E", "F", "G", "H", "I"].into_iter().map(String::from),
        );
        let values = ["A", "B", "B", "C", "D"];

        for seed in 0..100 {
            let mut random = RandomData::new(seed);
            let replaced = generator.replace_all(&values, &mut random);

            assert_eq!(replaced.len(), values.len());
            assert!(replaced
                .iter()
                .all(|r| r.as_ref().is_some_and(|r| generator.choices().contains(r))));

            let occurrences = counts(&replaced);
            assert_eq!(replaced[1], replaced[2]);
            assert_eq!(occurrences[&replaced[0]], 1);
            assert_eq!(occurrences[&replaced[1]], 2);
            assert_eq!(occurrences[&replaced[3]], 1);
            assert_eq!(occurrences[&replaced[4]], 1);
        }
    }

    #[test]
    fn samples_with_replacement_when_choices_run_out() {
        let generator = CorpusShuffleGenerator::new(["X".to_string()]);
        let mut random = RandomData::new(3);

        let replaced = generator.replace_all(&["a", "b", "c"], &mut random);
        assert_eq!(replaced, vec![Some("X".to_string()); 3]);
    }

    #[test]
    fn same_seed_same_mapping() {
        let generator =
            CorpusShuffleGenerator::new(["q", "r", "s", "t"].into_iter().map(String::from));
        let first = generator.replace_all(&["b", "a"], &mut RandomData::new(9));
        let second = generator.replace_all(&["b", "a"], &mut RandomData::new(9));
        assert_eq!(first, second);
    }
}
