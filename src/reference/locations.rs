use std::collections::{BTreeSet, HashSet};

/// One row of the postal-code table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRow {
    pub zip_code: String,
    pub place: String,
    pub street: String,
}

impl LocationRow {
    pub fn new(zip_code: impl Into<String>, place: impl Into<String>, street: impl Into<String>) -> Self {
        Self {
            zip_code: zip_code.into(),
            place: place.into(),
            street: street.into(),
        }
    }
}

/// Countries, postal codes, places and street names, each sorted and deduplicated.
#[derive(Debug, Clone, Default)]
pub struct LocationDatabase {
    countries: Vec<String>,
    countries_normalized: HashSet<String>,
    places: Vec<String>,
    zip_codes: Vec<String>,
    streetnames: Vec<String>,
}

impl LocationDatabase {
    pub fn new<C, L>(countries: C, locations: L) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        L: IntoIterator<Item = LocationRow>,
    {
        let countries = unique(countries.into_iter().map(Into::into));
        let countries_normalized = countries.iter().map(|c| c.to_lowercase()).collect();

        let mut places = BTreeSet::new();
        let mut zip_codes = BTreeSet::new();
        let mut streetnames = BTreeSet::new();
        for row in locations {
            places.insert(row.place);
            zip_codes.insert(row.zip_code);
            streetnames.insert(row.street);
        }

        Self {
            countries,
            countries_normalized,
            places: places.into_iter().collect(),
            zip_codes: zip_codes.into_iter().collect(),
            streetnames: streetnames.into_iter().collect(),
        }
    }

    pub fn is_country(&self, token: &str) -> bool {
        self.countries_normalized.contains(&token.to_lowercase())
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn places(&self) -> &[String] {
        &self.places
    }

    pub fn zip_codes(&self) -> &[String] {
        &self.zip_codes
    }

    pub fn streetnames(&self) -> &[String] {
        &self.streetnames
    }
}

fn unique(items: impl Iterator<Item = String>) -> Vec<String> {
    items.collect::<BTreeSet<_>>().into_iter().collect()
}
