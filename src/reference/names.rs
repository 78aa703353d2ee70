use std::collections::{HashMap, HashSet};

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// A surname with its (possibly empty) preposition, e.g. `("van der", "Linden")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lastname {
    pub prefix: String,
    pub name: String,
}

impl Lastname {
    pub fn new(prefix: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            name: name.into(),
        }
    }
}

/// Name buckets keyed by the normalized first letter of the (sur)name.
pub type NameIndex<T> = HashMap<char, Vec<T>>;

/// First and last names indexed by their initial.
#[derive(Debug, Clone, Default)]
pub struct NameDatabase {
    male_normalized: HashSet<String>,
    male_index: NameIndex<String>,
    female_index: NameIndex<String>,
    lastname_index: NameIndex<Lastname>,
}

impl NameDatabase {
    pub fn new<M, F, L>(firstnames_male: M, firstnames_female: F, lastnames: L) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
        L: IntoIterator<Item = Lastname>,
    {
        let male: Vec<String> = firstnames_male.into_iter().map(Into::into).collect();
        let female: Vec<String> = firstnames_female.into_iter().map(Into::into).collect();

        Self {
            male_normalized: male.iter().map(|name| name.to_lowercase()).collect(),
            male_index: inverted_index(male, |name| name.chars().next()),
            female_index: inverted_index(female, |name| name.chars().next()),
            lastname_index: inverted_index(lastnames, |lastname| lastname.name.chars().next()),
        }
    }

    /// Best-effort gender guess: names absent from the male table are treated as female.
    pub fn gender_index_for_name(&self, firstname: &str) -> &NameIndex<String> {
        if self.male_normalized.contains(&firstname.to_lowercase()) {
            &self.male_index
        } else {
            &self.female_index
        }
    }

    pub fn male_index(&self) -> &NameIndex<String> {
        &self.male_index
    }

    pub fn female_index(&self) -> &NameIndex<String> {
        &self.female_index
    }

    pub fn lastname_index(&self) -> &NameIndex<Lastname> {
        &self.lastname_index
    }
}

/// Transliterates to ASCII and lower-cases, so `Ö` and `Ş` index as `o` and `s`.
pub fn normalize_index_key(key: char) -> Option<char> {
    key.to_string()
        .nfkd()
        .find(|c| !is_combining_mark(*c))
        .and_then(|c| c.to_lowercase().next())
}

fn inverted_index<T, I, F>(items: I, initial: F) -> NameIndex<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> Option<char>,
{
    let mut index: NameIndex<T> = HashMap::new();
    for item in items {
        if let Some(key) = initial(&item).and_then(normalize_index_key) {
            index.entry(key).or_default().push(item);
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database() -> NameDatabase {
        NameDatabase::new(
            ["Jonatan", "Joep", "Stevan", "Anne", "Lucas"],
            ["Celina", "Anne", "Caroline", "Janine", "Özlem", "Şeyda", "Şerife"],
            [
                Lastname::new("", "Heijermanns"),
                Lastname::new("", "Heijer"),
                Lastname::new("", "Lammers"),
                Lastname::new("van der", "Linden"),
            ],
        )
    }

    #[test]
    fn indexes_by_normalized_initial() {
        let db = database();

        assert_eq!(db.male_index()[&'j'], vec!["Jonatan", "Joep"]);
        assert_eq!(db.male_index().len(), 4);
        assert_eq!(db.female_index()[&'c'], vec!["Celina", "Caroline"]);
        assert_eq!(db.female_index()[&'o'], vec!["Özlem"]);
        assert_eq!(db.female_index()[&'s'], vec!["Şeyda", "Şerife"]);
        assert_eq!(
            db.lastname_index()[&'l'],
            vec![Lastname::new("", "Lammers"), Lastname::new("van der", "Linden")]
        );
    }

    #[test]
    fn gender_guess_defaults_to_female() {
        let db = database();
        assert!(std::ptr::eq(db.gender_index_for_name("Celina"), db.female_index()));
        assert!(std::ptr::eq(db.gender_index_for_name("jonAtan"), db.male_index()));
        assert!(std::ptr::eq(db.gender_index_for_name("unknown-name"), db.female_index()));
    }

    #[test]
    fn normalizes_accented_initials() {
        assert_eq!(normalize_index_key('Ö'), Some('o'));
        assert_eq!(normalize_index_key('Ş'), Some('s'));
        assert_eq!(normalize_index_key('a'), Some('a'));
    }
}
