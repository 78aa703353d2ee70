use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SurrogateError;
use crate::generators::ExactMatchGenerator;
use crate::random::RandomSource;

/// Dutch area and mobile dial codes without the trunk prefix `0`.
pub const DIAL_CODES: &[&str] = &[
    "6", "10", "111", "113", "114", "115", "117", "118", "13", "15", "161", "162", "164", "165",
    "166", "167", "168", "172", "174", "180", "181", "182", "183", "184", "186", "187", "20",
    "222", "223", "224", "226", "227", "228", "229", "23", "24", "251", "252", "255", "26",
    "294", "297", "299", "30", "313", "314", "315", "316", "317", "318", "320", "321", "33",
    "341", "342", "343", "344", "345", "346", "347", "348", "35", "36", "38", "40", "411", "412",
    "413", "416", "418", "43", "45", "46", "475", "478", "481", "485", "486", "487", "488",
    "492", "493", "495", "497", "499", "50", "511", "512", "513", "514", "515", "516", "517",
    "518", "519", "521", "522", "523", "524", "525", "527", "528", "529", "53", "541", "543",
    "544", "545", "546", "547", "548", "55", "561", "562", "566", "570", "571", "572", "573",
    "575", "577", "578", "58", "591", "592", "593", "594", "595", "596", "597", "598", "599",
    "70", "71", "72", "73", "74", "75", "76", "77", "78", "79",
];

/// Shortest Dutch subscriber number, excluding the dial code.
const MIN_PHONE_LENGTH: usize = 7;

pub static DIAL_CODES_BY_LENGTH: Lazy<HashMap<usize, Vec<&'static str>>> = Lazy::new(|| {
    let mut index: HashMap<usize, Vec<&'static str>> = HashMap::new();
    for code in DIAL_CODES {
        index.entry(code.len()).or_default().push(code);
    }
    index
});

// Groups: 1 = country code, 2 = dial code, 3 = subscriber number.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"^(?:(?:\+|00)(31))?[ -]*[(0)]*[ \-\(]*({})?[ \-\)]*((?:\d[ -]*)+)",
        DIAL_CODES.join("|")
    );
    Regex::new(&pattern).expect("valid phone regex")
});

static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("valid digit regex"));
static COUNTRY_MASK_RE: Lazy<Regex> = Lazy::new(|| Regex::new("C+").expect("valid mask regex"));
static DIAL_MASK_RE: Lazy<Regex> = Lazy::new(|| Regex::new("D+").expect("valid mask regex"));

/// Replaces a phone or fax number with a random one of the same layout.
///
/// The number is first reduced to a mask (`+31 6 11 22 11 11` becomes `+CC D ## ## ## ##`),
/// then every placeholder is filled: `CC` with `31`, the dial code with a real code of equal
/// length, and `#` with random digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneGenerator;

impl PhoneGenerator {
    pub fn mask_phonenumber(value: &str) -> Result<String, SurrogateError> {
        let caps = PHONE_RE
            .captures(value)
            .filter(|caps| caps[0].len() >= MIN_PHONE_LENGTH)
            .ok_or_else(|| SurrogateError::InvalidPhoneNumber(value.to_string()))?;

        let mut masked = value.to_string();
        for (group, placeholder) in [(1, "C"), (2, "D"), (3, "#")] {
            if let Some(m) = caps.get(group) {
                let replaced = DIGIT_RE.replace_all(m.as_str(), placeholder);
                // Masking keeps the length, so the offsets of later groups stay valid.
                masked.replace_range(m.range(), &replaced);
            }
        }

        Ok(masked)
    }

    pub fn replace_pattern(
        pattern: &str,
        random: &mut dyn RandomSource,
    ) -> Result<String, SurrogateError> {
        let mut pattern = COUNTRY_MASK_RE.replace_all(pattern, "31").into_owned();

        if let Some(mask) = DIAL_MASK_RE.find(&pattern) {
            let codes = DIAL_CODES_BY_LENGTH
                .get(&mask.len())
                .map(Vec::as_slice)
                .unwrap_or_default();
            let code = *random
                .choice(codes)
                .ok_or_else(|| SurrogateError::InvalidPhoneNumber(pattern.clone()))?;
            pattern = DIAL_MASK_RE.replace_all(&pattern, code).into_owned();
        }

        let mut first_digit = true;
        let replaced: String = pattern
            .chars()
            .map(|c| {
                if c != '#' {
                    c
                } else if first_digit {
                    first_digit = false;
                    random.digit_from(b"123456789")
                } else {
                    random.random_digit()
                }
            })
            .collect();

        Ok(replaced)
    }
}

impl ExactMatchGenerator for PhoneGenerator {
    fn replace_one(
        &self,
        value: &str,
        random: &mut dyn RandomSource,
    ) -> Result<String, SurrogateError> {
        let pattern = Self::mask_phonenumber(value)?;
        Self::replace_pattern(&pattern, random)
    }
}
