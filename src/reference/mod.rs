//! Read-only lookup tables used by the name and location generators.
//!
//! [`ReferenceData`] is built once at startup, either from the compiled-in tables or from a
//! directory of flat files, and then borrowed by every generator.

mod builtin;
pub mod locations;
pub mod names;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ReferenceDataError;

pub use locations::{LocationDatabase, LocationRow};
pub use names::{normalize_index_key, Lastname, NameDatabase, NameIndex};

const FIRSTNAMES_MALE_FILE: &str = "firstnames_male.txt";
const FIRSTNAMES_FEMALE_FILE: &str = "firstnames_female.txt";
const LASTNAMES_FILE: &str = "lastnames.csv";
const COUNTRIES_FILE: &str = "country.csv";
const LOCATIONS_FILE: &str = "postcodes-zones.csv";

#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub names: NameDatabase,
    pub locations: LocationDatabase,
}

#[derive(Debug, Deserialize)]
struct LastnameRecord {
    #[serde(default)]
    prefix: Option<String>,
    name: String,
}

#[derive(Debug, Deserialize)]
struct CountryRecord {
    #[allow(dead_code)]
    id: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct LocationRecord {
    postcode: String,
    plaats: String,
    straat: String,
}

impl ReferenceData {
    pub fn new(names: NameDatabase, locations: LocationDatabase) -> Self {
        Self { names, locations }
    }

    /// The compiled-in Dutch tables.
    pub fn builtin() -> Self {
        let names = NameDatabase::new(
            builtin::FIRSTNAMES_MALE.iter().copied(),
            builtin::FIRSTNAMES_FEMALE.iter().copied(),
            builtin::LASTNAMES
                .iter()
                .map(|(prefix, name)| Lastname::new(*prefix, *name)),
        );
        let locations = LocationDatabase::new(
            builtin::COUNTRIES.iter().copied(),
            builtin::LOCATIONS
                .iter()
                .map(|(zip, place, street)| LocationRow::new(*zip, *place, *street)),
        );
        Self { names, locations }
    }

    /// Loads the five flat tables from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, ReferenceDataError> {
        let male = read_lines(&dir.join(FIRSTNAMES_MALE_FILE))?;
        let female = read_lines(&dir.join(FIRSTNAMES_FEMALE_FILE))?;

        let lastnames: Vec<LastnameRecord> = read_csv(&dir.join(LASTNAMES_FILE))?;
        let countries: Vec<CountryRecord> = read_csv(&dir.join(COUNTRIES_FILE))?;
        let locations: Vec<LocationRecord> = read_csv(&dir.join(LOCATIONS_FILE))?;

        let names = NameDatabase::new(
            male,
            female,
            lastnames
                .into_iter()
                .map(|r| Lastname::new(r.prefix.unwrap_or_default(), r.name)),
        );
        let locations = LocationDatabase::new(
            countries.into_iter().map(|r| r.value),
            locations
                .into_iter()
                .map(|r| LocationRow::new(r.postcode, r.plaats, r.straat)),
        );

        Ok(Self { names, locations })
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>, ReferenceDataError> {
    let io_error = |source| ReferenceDataError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let mut names = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(io_error)?;
        let name = line.trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

fn read_csv<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, ReferenceDataError> {
    let csv_error = |source| ReferenceDataError::Csv {
        path: PathBuf::from(path),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(csv_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn builtin_tables_cover_every_initial() {
        let reference = ReferenceData::builtin();
        for letter in 'a'..='z' {
            assert!(reference.names.male_index().contains_key(&letter), "male {letter}");
            assert!(reference.names.female_index().contains_key(&letter), "female {letter}");
            assert!(reference.names.lastname_index().contains_key(&letter), "last {letter}");
        }
        assert!(reference.locations.places().contains(&"Groenlo".to_string()));
        assert!(reference.locations.is_country("Oostenrijk"));
    }

    #[test]
    fn loads_flat_tables_from_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(FIRSTNAMES_MALE_FILE), "Jan\nPieter\n\n").expect("write");
        fs::write(dir.path().join(FIRSTNAMES_FEMALE_FILE), "Anna\n").expect("write");
        fs::write(dir.path().join(LASTNAMES_FILE), "prefix,name\nvan der,Linden\n,Bakker\n")
            .expect("write");
        fs::write(dir.path().join(COUNTRIES_FILE), "id,value\n1,Nederland\n").expect("write");
        fs::write(
            dir.path().join(LOCATIONS_FILE),
            "postcode,plaats,straat\n7141DC,Groenlo,Parallelweg\n",
        )
        .expect("write");

        let reference = ReferenceData::from_dir(dir.path()).expect("reference data");
        assert_eq!(reference.names.male_index()[&'p'], vec!["Pieter"]);
        assert_eq!(
            reference.names.lastname_index()[&'b'],
            vec![Lastname::new("", "Bakker")]
        );
        assert_eq!(reference.locations.zip_codes(), ["7141DC"]);
        assert!(reference.locations.is_country("NEDERLAND"));
    }

    #[test]
    fn missing_table_is_reported_with_its_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = ReferenceData::from_dir(dir.path()).expect_err("missing files");
        assert!(matches!(err, ReferenceDataError::Io { ref path, .. } if path.ends_with(FIRSTNAMES_MALE_FILE)));
    }
}
