//! Seeded randomness shared by every surrogate generator.
//!
//! Generators never touch an RNG directly: they draw through [`RandomSource`], which keeps a
//! surrogate run reproducible for a given seed and lets tests substitute scripted draws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DIGITS: &[u8] = b"0123456789";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Primitive random draws. Everything else is derived from these.
pub trait RandomSource {
    /// Uniform integer in `low..=high`.
    fn random_int(&mut self, low: i64, high: i64) -> i64;

    /// `k` distinct indices drawn from `0..len`, in draw order. Requires `k <= len`.
    fn sample_indices(&mut self, len: usize, k: usize) -> Vec<usize>;

    /// Uniform index in `0..len`. Requires `len > 0`.
    fn choice_index(&mut self, len: usize) -> usize {
        self.random_int(0, len as i64 - 1) as usize
    }

    fn sample_indices_with_replacement(&mut self, len: usize, k: usize) -> Vec<usize> {
        (0..k).map(|_| self.choice_index(len)).collect()
    }

    /// A character drawn from `digits`.
    fn digit_from(&mut self, digits: &[u8]) -> char {
        digits[self.choice_index(digits.len())] as char
    }

    fn random_digit(&mut self) -> char {
        self.digit_from(DIGITS)
    }

    fn random_lowercase_letter(&mut self) -> char {
        LOWERCASE[self.choice_index(LOWERCASE.len())] as char
    }

    fn random_uppercase_letter(&mut self) -> char {
        UPPERCASE[self.choice_index(UPPERCASE.len())] as char
    }
}

impl dyn RandomSource + '_ {
    /// Uniformly chosen element, or `None` for an empty sequence.
    pub fn choice<'s, T>(&mut self, seq: &'s [T]) -> Option<&'s T> {
        if seq.is_empty() {
            return None;
        }
        seq.get(self.choice_index(seq.len()))
    }

    /// `k` elements of `seq`. Without replacement `k` is capped at `seq.len()`.
    pub fn sample<T: Clone>(&mut self, seq: &[T], k: usize, with_replacement: bool) -> Vec<T> {
        if seq.is_empty() {
            return Vec::new();
        }

        let indices = if with_replacement {
            self.sample_indices_with_replacement(seq.len(), k)
        } else {
            self.sample_indices(seq.len(), k.min(seq.len()))
        };
        indices.into_iter().map(|i| seq[i].clone()).collect()
    }

    /// A permutation of `seq`, drawn as a sample of the whole sequence without replacement.
    pub fn shuffle<T: Clone>(&mut self, seq: &[T]) -> Vec<T> {
        self.sample(seq, seq.len(), false)
    }
}

/// The production [`RandomSource`]: a seeded `StdRng` that is never re-seeded mid-run.
pub struct RandomData {
    rng: StdRng,
}

impl RandomData {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Independent stream for one document of a dataset run.
    ///
    /// Derived only from the dataset seed and the document position, so a document's surrogates
    /// do not depend on how many draws the documents before it consumed.
    pub fn for_document(seed: u64, index: usize) -> Self {
        let salt = (index as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self::new(seed ^ salt)
    }
}

impl RandomSource for RandomData {
    fn random_int(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    fn sample_indices(&mut self, len: usize, k: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, len, k.min(len)).into_vec()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_seed_same_draws() {
        let mut a = RandomData::new(42);
        let mut b = RandomData::new(42);
        let draws_a: Vec<i64> = (0..20).map(|_| a.random_int(0, 1000)).collect();
        let draws_b: Vec<i64> = (0..20).map(|_| b.random_int(0, 1000)).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn random_int_is_inclusive() {
        let mut random = RandomData::new(7);
        let seen: HashSet<i64> = (0..500).map(|_| random.random_int(-2, 2)).collect();
        assert_eq!(seen, (-2..=2).collect());
    }

    #[test]
    fn shuffle_is_a_permutation_and_keeps_duplicates() {
        let mut data = RandomData::new(3);
        let random: &mut dyn RandomSource = &mut data;
        let seq = vec!['a', 'b', 'b', 'c'];
        let mut shuffled = random.shuffle(&seq);
        shuffled.sort();
        assert_eq!(shuffled, seq);
    }

    #[test]
    fn sample_without_replacement_is_distinct() {
        let mut data = RandomData::new(11);
        let random: &mut dyn RandomSource = &mut data;
        let seq: Vec<u32> = (0..10).collect();
        let sample = random.sample(&seq, 10, false);
        let distinct: HashSet<u32> = sample.iter().copied().collect();
        assert_eq!(distinct.len(), 10);

        let with_replacement = random.sample(&seq, 25, true);
        assert_eq!(with_replacement.len(), 25);
    }

    #[test]
    fn choice_on_empty_sequence_is_none() {
        let mut data = RandomData::new(1);
        let random: &mut dyn RandomSource = &mut data;
        let empty: [u8; 0] = [];
        assert!(random.choice(&empty).is_none());
    }

    #[test]
    fn document_streams_are_independent_of_each_other() {
        let mut first = RandomData::for_document(45, 0);
        let mut second = RandomData::for_document(45, 1);
        let a: Vec<i64> = (0..8).map(|_| first.random_int(0, 1 << 30)).collect();
        let b: Vec<i64> = (0..8).map(|_| second.random_int(0, 1 << 30)).collect();
        assert_ne!(a, b);

        let mut again = RandomData::for_document(45, 1);
        let c: Vec<i64> = (0..8).map(|_| again.random_int(0, 1 << 30)).collect();
        assert_eq!(b, c);
    }
}
