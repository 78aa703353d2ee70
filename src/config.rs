use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::generators::date::{DateLocale, SeasonScope};
use crate::generators::GeneratorKind;
use crate::reference::ReferenceData;
use crate::rewrite::ErrorPolicy;

pub const DEFAULT_SEED: u64 = 45;

/// Options for a surrogate run. Every field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurrogateConfig {
    /// Dataset seed; each document derives its own stream from it.
    pub seed: u64,
    pub date: DateConfig,
    /// Extra or overriding tag to generator routes, e.g. `{"Hospital": "identity"}`.
    pub tag_generators: HashMap<String, GeneratorKind>,
    /// Directory with reference tables. The built-in tables are used when absent.
    pub reference_data: Option<PathBuf>,
    /// What the rewrite step does with annotations that have no surrogate.
    pub errors: ErrorPolicy,
}

impl Default for SurrogateConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            date: DateConfig::default(),
            tag_generators: HashMap::new(),
            reference_data: None,
            errors: ErrorPolicy::default(),
        }
    }
}

/// Date shifting options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateConfig {
    /// Years every date of a document is moved forward by, before fuzzing.
    pub year_shift_base: i64,
    /// The year shift is drawn from `base - fuzz ..= base + fuzz`.
    pub year_shift_fuzz: i64,
    /// Largest number of years a date may lie before the most recent date of its document.
    pub max_year_span: i64,
    /// Trial order for format inference.
    pub locales: Vec<DateLocale>,
    pub season_scope: SeasonScope,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            year_shift_base: 65,
            year_shift_fuzz: 20,
            max_year_span: 89,
            locales: vec![DateLocale::Nl, DateLocale::En, DateLocale::De],
            season_scope: SeasonScope::default(),
        }
    }
}

impl SurrogateConfig {
    /// Reads a JSON config, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => {
                let raw = fs::read_to_string(p)
                    .with_context(|| format!("failed to read config file: {}", p.display()))?;
                let config: SurrogateConfig = serde_json::from_str(&raw)
                    .with_context(|| format!("failed to parse config JSON: {}", p.display()))?;
                config
            }
            None => SurrogateConfig::default(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let date = &self.date;
        if date.year_shift_fuzz < 0 || date.year_shift_fuzz > date.year_shift_base {
            bail!(
                "date.year_shift_fuzz must be between 0 and date.year_shift_base ({}), got {}",
                date.year_shift_base,
                date.year_shift_fuzz
            );
        }
        if date.max_year_span <= 0 {
            bail!("date.max_year_span must be positive, got {}", date.max_year_span);
        }
        if date.locales.is_empty() {
            bail!("date.locales must name at least one locale");
        }
        Ok(())
    }

    pub fn load_reference_data(&self) -> Result<ReferenceData> {
        match &self.reference_data {
            Some(dir) => ReferenceData::from_dir(dir).with_context(|| {
                format!("failed to load reference data from {}", dir.display())
            }),
            None => Ok(ReferenceData::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_values() {
        let config = SurrogateConfig::default();
        assert_eq!(config.seed, 45);
        assert_eq!(config.date.year_shift_base, 65);
        assert_eq!(config.date.year_shift_fuzz, 20);
        assert_eq!(config.date.max_year_span, 89);
        assert_eq!(config.date.season_scope, SeasonScope::Dayless);
        assert_eq!(config.errors, ErrorPolicy::Raise);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: SurrogateConfig = serde_json::from_str(
            r#"{
                "seed": 7,
                "date": {"year_shift_fuzz": 5, "locales": ["en"], "season_scope": "all"},
                "tag_generators": {"Hospital": "identity"},
                "errors": "coerce"
            }"#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.date.year_shift_base, 65);
        assert_eq!(config.date.year_shift_fuzz, 5);
        assert_eq!(config.date.locales, vec![DateLocale::En]);
        assert_eq!(config.date.season_scope, SeasonScope::All);
        assert_eq!(
            config.tag_generators.get("Hospital"),
            Some(&GeneratorKind::Identity)
        );
        assert_eq!(config.errors, ErrorPolicy::Coerce);
    }

    #[test]
    fn unknown_generator_kind_is_rejected() {
        let parsed: Result<SurrogateConfig, _> =
            serde_json::from_str(r#"{"tag_generators": {"Hospital": "shuffle"}}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn rejects_invalid_date_options() {
        let mut config = SurrogateConfig::default();
        config.date.year_shift_fuzz = 70;
        assert!(config.validate().is_err());

        let mut config = SurrogateConfig::default();
        config.date.max_year_span = 0;
        assert!(config.validate().is_err());

        let mut config = SurrogateConfig::default();
        config.date.locales.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn loads_and_validates_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"seed": 3}}"#).unwrap();
        let config = SurrogateConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.seed, 3);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"date": {{"max_year_span": 0}}}}"#).unwrap();
        assert!(SurrogateConfig::load(Some(file.path())).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = SurrogateConfig::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("failed to parse config JSON"));
    }

    #[test]
    fn builtin_reference_data_without_directory() {
        let reference = SurrogateConfig::default().load_reference_data().unwrap();
        assert!(!reference.locations.places().is_empty());
    }
}
