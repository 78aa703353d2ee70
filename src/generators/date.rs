//! Date shifting.
//!
//! Each date string is parsed by inferring its format under a list of locales. All dates of a
//! document are then moved by one shared year shift and one shared day shift, and written back
//! in the format and language they were found in. The day shift is bounded by how far the
//! affected dates sit from the edges of their season, so a month-only date such as
//! `februari 2001` keeps pointing at roughly the same time of year.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DateConfig;
use crate::error::SurrogateError;
use crate::generators::SurrogateGenerator;
use crate::random::RandomSource;

/// Larger than any season; kept when no date bounds the day shift.
const SEASON_SENTINEL: i64 = 300;

const PUNCTUATION: &str = ".,/#!$^&*;:{}=-_`~() ";

/// Languages month and weekday names are recognised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateLocale {
    Nl,
    En,
    De,
}

/// Which dates bound the per-document day shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonScope {
    /// Only dates without a day component, such as `maart 2019`.
    #[default]
    Dayless,
    /// Every parsed date.
    All,
}

struct LocaleNames {
    months: [&'static str; 12],
    months_abbr: [&'static str; 12],
    /// Monday first.
    weekdays: [&'static str; 7],
    weekdays_abbr: [&'static str; 7],
}

static NL: LocaleNames = LocaleNames {
    months: [
        "januari", "februari", "maart", "april", "mei", "juni", "juli", "augustus", "september",
        "oktober", "november", "december",
    ],
    months_abbr: [
        "jan", "feb", "mrt", "apr", "mei", "jun", "jul", "aug", "sep", "okt", "nov", "dec",
    ],
    weekdays: [
        "maandag", "dinsdag", "woensdag", "donderdag", "vrijdag", "zaterdag", "zondag",
    ],
    weekdays_abbr: ["ma", "di", "wo", "do", "vr", "za", "zo"],
};

static EN: LocaleNames = LocaleNames {
    months: [
        "january", "february", "march", "april", "may", "june", "july", "august", "september",
        "october", "november", "december",
    ],
    months_abbr: [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ],
    weekdays: [
        "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
    ],
    weekdays_abbr: ["mon", "tue", "wed", "thu", "fri", "sat", "sun"],
};

static DE: LocaleNames = LocaleNames {
    months: [
        "januar", "februar", "märz", "april", "mai", "juni", "juli", "august", "september",
        "oktober", "november", "dezember",
    ],
    months_abbr: [
        "jan", "feb", "mär", "apr", "mai", "jun", "jul", "aug", "sep", "okt", "nov", "dez",
    ],
    weekdays: [
        "montag", "dienstag", "mittwoch", "donnerstag", "freitag", "samstag", "sonntag",
    ],
    weekdays_abbr: ["mo", "di", "mi", "do", "fr", "sa", "so"],
};

impl DateLocale {
    fn names(self) -> &'static LocaleNames {
        match self {
            DateLocale::Nl => &NL,
            DateLocale::En => &EN,
            DateLocale::De => &DE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DateLocale::Nl => "nl",
            DateLocale::En => "en",
            DateLocale::De => "de",
        }
    }
}

impl fmt::Display for DateLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStyle {
    Full,
    Abbreviated,
}

/// Letter case of a month or weekday name as it appeared in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Casing {
    Lower,
    Upper,
    Title,
}

impl Casing {
    fn detect(word: &str) -> Self {
        if !word.chars().any(char::is_uppercase) {
            Casing::Lower
        } else if word.chars().count() > 1 && !word.chars().any(char::is_lowercase) {
            Casing::Upper
        } else {
            Casing::Title
        }
    }

    fn apply(self, name: &str) -> String {
        match self {
            Casing::Lower => name.to_lowercase(),
            Casing::Upper => name.to_uppercase(),
            Casing::Title => {
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

/// One directive or literal of an inferred date format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatItem {
    Literal(String),
    Day,
    Month,
    Year,
    ShortYear,
    Hour,
    Minute,
    Second,
    MonthName { style: NameStyle, casing: Casing },
    Weekday { style: NameStyle, casing: Casing },
}

/// An inferred date format; displays as its `strftime` equivalent, e.g. `%d %B %Y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    items: Vec<FormatItem>,
}

impl DateFormat {
    pub fn items(&self) -> &[FormatItem] {
        &self.items
    }

    pub fn has_year(&self) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, FormatItem::Year | FormatItem::ShortYear))
    }

    pub fn has_day(&self) -> bool {
        self.items.contains(&FormatItem::Day)
    }

    pub fn render(&self, datetime: &NaiveDateTime, locale: DateLocale) -> String {
        let names = locale.names();
        let mut rendered = String::new();

        for item in &self.items {
            match item {
                FormatItem::Literal(text) => rendered.push_str(text),
                FormatItem::Day => rendered.push_str(&format!("{:02}", datetime.day())),
                FormatItem::Month => rendered.push_str(&format!("{:02}", datetime.month())),
                FormatItem::Year => rendered.push_str(&format!("{:04}", datetime.year())),
                FormatItem::ShortYear => {
                    rendered.push_str(&format!("{:02}", datetime.year().rem_euclid(100)))
                }
                FormatItem::Hour => rendered.push_str(&format!("{:02}", datetime.hour())),
                FormatItem::Minute => rendered.push_str(&format!("{:02}", datetime.minute())),
                FormatItem::Second => rendered.push_str(&format!("{:02}", datetime.second())),
                FormatItem::MonthName { style, casing } => {
                    let table = match style {
                        NameStyle::Full => &names.months,
                        NameStyle::Abbreviated => &names.months_abbr,
                    };
                    rendered.push_str(&casing.apply(table[datetime.month0() as usize]));
                }
                FormatItem::Weekday { style, casing } => {
                    let table = match style {
                        NameStyle::Full => &names.weekdays,
                        NameStyle::Abbreviated => &names.weekdays_abbr,
                    };
                    let index = datetime.weekday().num_days_from_monday() as usize;
                    rendered.push_str(&casing.apply(table[index]));
                }
            }
        }

        rendered
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            let directive = match item {
                FormatItem::Literal(text) => text.as_str(),
                FormatItem::Day => "%d",
                FormatItem::Month => "%m",
                FormatItem::Year => "%Y",
                FormatItem::ShortYear => "%y",
                FormatItem::Hour => "%H",
                FormatItem::Minute => "%M",
                FormatItem::Second => "%S",
                FormatItem::MonthName { style: NameStyle::Full, .. } => "%B",
                FormatItem::MonthName { style: NameStyle::Abbreviated, .. } => "%b",
                FormatItem::Weekday { style: NameStyle::Full, .. } => "%A",
                FormatItem::Weekday { style: NameStyle::Abbreviated, .. } => "%a",
            };
            f.write_str(directive)?;
        }
        Ok(())
    }
}

/// A date string with the format and locale it was recognised under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDate {
    pub value: String,
    pub format: DateFormat,
    pub locale: DateLocale,
    /// Missing components default to 1900-01-01; a missing day becomes the 15th.
    pub datetime: NaiveDateTime,
}

impl ParsedDate {
    pub fn year_anchored(&self) -> bool {
        self.format.has_year()
    }

    pub fn day_anchored(&self) -> bool {
        self.format.has_day()
    }

    /// Days since the start and until the end of the season the date falls in.
    pub fn season_offsets(&self) -> Option<(i64, i64)> {
        season_offsets(self.datetime.date())
    }

    pub fn render(&self, datetime: &NaiveDateTime) -> String {
        self.format.render(datetime, self.locale)
    }
}

/// Tries each locale in order and returns the first complete parse.
pub fn infer_format(value: &str, locales: &[DateLocale]) -> Result<ParsedDate, SurrogateError> {
    locales
        .iter()
        .find_map(|locale| infer_with_locale(value, *locale))
        .ok_or_else(|| SurrogateError::UnparseableDate {
            value: value.to_string(),
            locales: locales
                .iter()
                .map(|locale| locale.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

enum Token<'a> {
    Number(&'a str),
    Word(&'a str),
    Punct(char),
}

fn tokenize(value: &str) -> Option<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut rest = value;

    while let Some(c) = rest.chars().next() {
        let run_end = |predicate: fn(char) -> bool| {
            rest.char_indices()
                .find(|(_, ch)| !predicate(*ch))
                .map_or(rest.len(), |(i, _)| i)
        };

        let consumed = if c.is_ascii_digit() {
            let end = run_end(|ch| ch.is_ascii_digit());
            tokens.push(Token::Number(&rest[..end]));
            end
        } else if c.is_alphabetic() {
            let end = run_end(char::is_alphabetic);
            tokens.push(Token::Word(&rest[..end]));
            end
        } else if PUNCTUATION.contains(c) {
            tokens.push(Token::Punct(c));
            c.len_utf8()
        } else {
            return None;
        };

        rest = &rest[consumed..];
    }

    Some(tokens)
}

enum Slot<'a> {
    Fixed(FormatItem),
    Number(&'a str),
}

#[derive(Default)]
struct Components {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: u32,
    minute: u32,
    second: u32,
}

fn lookup_word(word: &str, names: &LocaleNames) -> Option<(FormatItem, Option<u32>)> {
    let lower = word.to_lowercase();
    let casing = Casing::detect(word);
    let position = |table: &[&str]| table.iter().position(|name| *name == lower);

    if let Some(i) = position(&names.months[..]) {
        let item = FormatItem::MonthName { style: NameStyle::Full, casing };
        return Some((item, Some(i as u32 + 1)));
    }
    if position(&names.weekdays[..]).is_some() {
        return Some((FormatItem::Weekday { style: NameStyle::Full, casing }, None));
    }
    if let Some(i) = position(&names.months_abbr[..]) {
        let item = FormatItem::MonthName { style: NameStyle::Abbreviated, casing };
        return Some((item, Some(i as u32 + 1)));
    }
    if position(&names.weekdays_abbr[..]).is_some() {
        return Some((FormatItem::Weekday { style: NameStyle::Abbreviated, casing }, None));
    }
    if word == "T" {
        return Some((FormatItem::Literal("T".to_string()), None));
    }
    None
}

fn infer_with_locale(value: &str, locale: DateLocale) -> Option<ParsedDate> {
    let names = locale.names();
    let mut components = Components::default();

    let mut slots = Vec::new();
    for token in tokenize(value)? {
        match token {
            Token::Number(digits) => slots.push(Slot::Number(digits)),
            Token::Punct(c) => slots.push(Slot::Fixed(FormatItem::Literal(c.to_string()))),
            Token::Word(word) => {
                let (item, month) = lookup_word(word, names)?;
                if month.is_some() {
                    if components.month.is_some() {
                        return None;
                    }
                    components.month = month;
                }
                slots.push(Slot::Fixed(item));
            }
        }
    }

    let items = assign_numbers(slots, &mut components)?;
    if items.iter().all(|item| matches!(item, FormatItem::Literal(_))) {
        return None;
    }

    let format = DateFormat { items };
    let date = NaiveDate::from_ymd_opt(
        components.year.unwrap_or(1900),
        components.month.unwrap_or(1),
        components.day.unwrap_or(1),
    )?;
    let date = if format.has_day() {
        date
    } else {
        date.with_day(15)?
    };
    let time = NaiveTime::from_hms_opt(components.hour, components.minute, components.second)?;

    Some(ParsedDate {
        value: value.to_string(),
        format,
        locale,
        datetime: date.and_time(time),
    })
}

#[derive(Clone, Copy)]
enum Role {
    Day,
    Month,
    Year,
    ShortYear,
}

/// Resolves the numeric slots into time and date directives.
///
/// Colon-joined numbers are read as `%H:%M[:%S]`. The remaining numbers are read day first;
/// four-digit runs are years.
fn assign_numbers(slots: Vec<Slot<'_>>, components: &mut Components) -> Option<Vec<FormatItem>> {
    let mut items: Vec<Option<FormatItem>> = Vec::with_capacity(slots.len());
    let mut date_numbers: Vec<(usize, &str)> = Vec::new();

    let mut i = 0;
    while i < slots.len() {
        match &slots[i] {
            Slot::Fixed(item) => {
                items.push(Some(item.clone()));
                i += 1;
            }
            Slot::Number(digits) => {
                let minute = number_at(&slots, i + 2).filter(|_| is_colon(slots.get(i + 1)));
                match minute {
                    Some(minute) if items_lack_time(&items) => {
                        components.hour = parse_field(digits, 1, 2)?;
                        components.minute = parse_field(minute, 2, 2)?;
                        items.push(Some(FormatItem::Hour));
                        items.push(Some(FormatItem::Literal(":".to_string())));
                        items.push(Some(FormatItem::Minute));
                        i += 3;

                        let second = number_at(&slots, i + 1).filter(|_| is_colon(slots.get(i)));
                        if let Some(second) = second {
                            components.second = parse_field(second, 2, 2)?;
                            items.push(Some(FormatItem::Literal(":".to_string())));
                            items.push(Some(FormatItem::Second));
                            i += 2;
                        }
                    }
                    _ => {
                        date_numbers.push((items.len(), *digits));
                        items.push(None);
                        i += 1;
                    }
                }
            }
        }
    }

    let has_month_name = items
        .iter()
        .flatten()
        .any(|item| matches!(item, FormatItem::MonthName { .. }));
    let roles = number_roles(&date_numbers, has_month_name)?;

    for ((position, digits), role) in date_numbers.iter().zip(roles) {
        let item = match role {
            Role::Day => {
                components.day = Some(parse_field(digits, 1, 2)?);
                FormatItem::Day
            }
            Role::Month => {
                components.month = Some(parse_field(digits, 1, 2)?);
                FormatItem::Month
            }
            Role::Year => {
                components.year = Some(parse_field(digits, 4, 4)?);
                FormatItem::Year
            }
            Role::ShortYear => {
                let short: i32 = parse_field(digits, 2, 2)?;
                components.year = Some(if short < 69 { 2000 + short } else { 1900 + short });
                FormatItem::ShortYear
            }
        };
        items[*position] = Some(item);
    }

    items.into_iter().collect()
}

fn is_colon(slot: Option<&Slot<'_>>) -> bool {
    matches!(slot, Some(Slot::Fixed(FormatItem::Literal(text))) if text == ":")
}

fn number_at<'a>(slots: &[Slot<'a>], i: usize) -> Option<&'a str> {
    match slots.get(i) {
        Some(Slot::Number(digits)) => Some(*digits),
        _ => None,
    }
}

fn items_lack_time(items: &[Option<FormatItem>]) -> bool {
    !items.iter().any(|item| matches!(item, Some(FormatItem::Hour)))
}

fn is_year(digits: &str) -> bool {
    digits.len() == 4
}

/// Day first, unless only the second number can be a day.
fn day_month(a: &str, b: &str) -> Option<[Role; 2]> {
    let a: u32 = a.parse().ok()?;
    let b: u32 = b.parse().ok()?;
    Some(if a <= 12 && b > 12 {
        [Role::Month, Role::Day]
    } else {
        [Role::Day, Role::Month]
    })
}

fn number_roles(numbers: &[(usize, &str)], has_month_name: bool) -> Option<Vec<Role>> {
    let digits: Vec<&str> = numbers.iter().map(|(_, digits)| *digits).collect();

    let roles = match (has_month_name, digits.as_slice()) {
        (_, []) => vec![],
        (true, [a]) => vec![if is_year(a) { Role::Year } else { Role::Day }],
        (true, [a, b]) => {
            if is_year(a) {
                vec![Role::Year, Role::Day]
            } else if is_year(b) {
                vec![Role::Day, Role::Year]
            } else {
                vec![Role::Day, Role::ShortYear]
            }
        }
        (false, [a]) if is_year(a) => vec![Role::Year],
        (false, [a, b]) => {
            if is_year(a) {
                vec![Role::Year, Role::Month]
            } else if is_year(b) {
                vec![Role::Month, Role::Year]
            } else {
                day_month(a, b)?.to_vec()
            }
        }
        (false, [a, b, c]) => {
            if is_year(a) {
                vec![Role::Year, Role::Month, Role::Day]
            } else {
                let mut roles = day_month(a, b)?.to_vec();
                roles.push(if is_year(c) { Role::Year } else { Role::ShortYear });
                roles
            }
        }
        _ => return None,
    };

    Some(roles)
}

fn parse_field<T: std::str::FromStr>(digits: &str, min_len: usize, max_len: usize) -> Option<T> {
    if digits.len() < min_len || digits.len() > max_len {
        return None;
    }
    digits.parse().ok()
}

fn season_offsets(date: NaiveDate) -> Option<(i64, i64)> {
    let ymd = |year: i32, month: u32, day: u32| NaiveDate::from_ymd_opt(year, month, day);
    let year = date.year();

    let mut seasons = vec![
        (ymd(year, 3, 21)?, ymd(year, 6, 20)?),
        (ymd(year, 6, 21)?, ymd(year, 9, 22)?),
        (ymd(year, 9, 23)?, ymd(year, 12, 20)?),
    ];
    if date <= ymd(year, 3, 20)? {
        seasons.push((ymd(year - 1, 12, 21)?, ymd(year, 3, 20)?));
    } else if date >= ymd(year, 12, 21)? {
        seasons.push((ymd(year, 12, 21)?, ymd(year + 1, 3, 20)?));
    }

    seasons
        .into_iter()
        .find(|(start, end)| *start <= date && date <= *end)
        .map(|(start, end)| {
            (
                date.signed_duration_since(start).num_days(),
                end.signed_duration_since(date).num_days(),
            )
        })
}

/// Smallest days-since-start and days-until-end over `offsets`.
///
/// A date only lowers the days-until-end bound when it did not lower the days-since-start bound.
pub fn minimum_season_offsets(offsets: impl IntoIterator<Item = (i64, i64)>) -> (i64, i64) {
    let mut min_days_past = SEASON_SENTINEL;
    let mut min_days_left = SEASON_SENTINEL;

    for (days_past, days_left) in offsets {
        if days_past < min_days_past {
            min_days_past = days_past;
        } else if days_left < min_days_left {
            min_days_left = days_left;
        }
    }

    (min_days_past, min_days_left)
}

/// Whole years from `from` to `to`, truncated toward zero.
pub fn full_years_between(from: &NaiveDateTime, to: &NaiveDateTime) -> i64 {
    if to < from {
        return -full_years_between(to, from);
    }

    let mut years = i64::from(to.year() - from.year());
    let to_key = (to.month(), to.day(), to.time());
    let from_key = (from.month(), from.day(), from.time());
    if to_key < from_key {
        years -= 1;
    }
    years
}

/// Calendar year addition; 29 February falls back to the 28th in common years.
pub fn add_years(datetime: &NaiveDateTime, years: i64) -> Option<NaiveDateTime> {
    let year = i32::try_from(i64::from(datetime.year()).checked_add(years)?).ok()?;
    let date = NaiveDate::from_ymd_opt(year, datetime.month(), datetime.day()).or_else(|| {
        if datetime.month() == 2 && datetime.day() == 29 {
            NaiveDate::from_ymd_opt(year, 2, 28)
        } else {
            None
        }
    })?;
    Some(date.and_time(datetime.time()))
}

pub fn add_days(datetime: &NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    if days >= 0 {
        datetime.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        datetime.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

/// The per-document state of date shifting: the parsed batch and the two shifts drawn for it.
#[derive(Debug, Clone)]
pub struct DateShifter {
    dates: Vec<Option<ParsedDate>>,
    year_shift: i64,
    day_shift: i64,
    max_year_span: i64,
}

impl DateShifter {
    /// Parses the batch and draws the year shift, then the day shift.
    pub fn new(values: &[&str], config: &DateConfig, random: &mut dyn RandomSource) -> Self {
        let dates: Vec<Option<ParsedDate>> = values
            .iter()
            .map(|value| infer_format(value, &config.locales).ok())
            .collect();

        let failed: Vec<&str> = values
            .iter()
            .zip(&dates)
            .filter(|(_, date)| date.is_none())
            .map(|(value, _)| *value)
            .collect();
        if !failed.is_empty() {
            debug!(
                failed = failed.len(),
                total = values.len(),
                dates = ?failed,
                "could not parse dates in document"
            );
        }

        let year_shift = config.year_shift_base
            + random.random_int(-config.year_shift_fuzz, config.year_shift_fuzz);

        let bounding = dates
            .iter()
            .flatten()
            .filter(|date| match config.season_scope {
                SeasonScope::Dayless => !date.day_anchored(),
                SeasonScope::All => true,
            })
            .filter_map(ParsedDate::season_offsets);
        let (days_past, days_left) = minimum_season_offsets(bounding);

        let magnitude = random.random_int(1, days_past.max(days_left).max(1));
        let day_shift = if days_past >= days_left {
            -magnitude
        } else {
            magnitude
        };

        Self {
            dates,
            year_shift,
            day_shift,
            max_year_span: config.max_year_span,
        }
    }

    pub fn dates(&self) -> &[Option<ParsedDate>] {
        &self.dates
    }

    pub fn year_shift(&self) -> i64 {
        self.year_shift
    }

    pub fn day_shift(&self) -> i64 {
        self.day_shift
    }

    /// Latest date that carries a year.
    pub fn most_recent(&self) -> Option<NaiveDateTime> {
        self.dates
            .iter()
            .flatten()
            .filter(|date| date.year_anchored())
            .map(|date| date.datetime)
            .max()
    }

    pub fn surrogates(&self) -> Vec<Option<String>> {
        let most_recent = self.most_recent();

        self.dates
            .iter()
            .map(|date| {
                let date = date.as_ref()?;
                match self.shift(date, most_recent.as_ref()) {
                    Ok(surrogate) => Some(surrogate),
                    Err(err) => {
                        debug!(error = %err, "could not shift date");
                        None
                    }
                }
            })
            .collect()
    }

    fn shift(
        &self,
        date: &ParsedDate,
        most_recent: Option<&NaiveDateTime>,
    ) -> Result<String, SurrogateError> {
        let out_of_range = || SurrogateError::DateOutOfRange(date.value.clone());
        let mut datetime = date.datetime;

        if let (true, Some(most_recent)) = (date.year_anchored(), most_recent) {
            let span = full_years_between(&datetime, most_recent);
            if span > self.max_year_span {
                datetime =
                    add_years(&datetime, span - self.max_year_span).ok_or_else(out_of_range)?;
            }
        }

        let shifted = add_years(&datetime, self.year_shift)
            .and_then(|shifted| add_days(&shifted, self.day_shift))
            .ok_or_else(out_of_range)?;

        Ok(date.render(&shifted))
    }
}

/// Shifts every date of a document by the same amount, keeping its original format.
#[derive(Debug, Clone)]
pub struct DateGenerator {
    config: DateConfig,
}

impl DateGenerator {
    pub fn new(config: DateConfig) -> Self {
        Self { config }
    }
}

impl SurrogateGenerator for DateGenerator {
    fn replace_all(&self, values: &[&str], random: &mut dyn RandomSource) -> Vec<Option<String>> {
        DateShifter::new(values, &self.config, random).surrogates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::FixedRandom;
    use crate::random::RandomData;
    use test_case::test_case;

    const LOCALES: &[DateLocale] = &[DateLocale::Nl, DateLocale::En, DateLocale::De];

    fn parse(value: &str) -> ParsedDate {
        infer_format(value, LOCALES).unwrap()
    }

    fn datetime(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn config(base: i64, fuzz: i64) -> DateConfig {
        DateConfig {
            year_shift_base: base,
            year_shift_fuzz: fuzz,
            ..DateConfig::default()
        }
    }

    #[test_case("Tuesday 5 March 2019 08:59", "%A %d %B %Y %H:%M" ; "full english")]
    #[test_case("Friday (10 June)", "%A (%d %B)" ; "weekday and parentheses")]
    #[test_case("10 November", "%d %B" ; "day and month")]
    #[test_case("August 3, 2009", "%B %d, %Y" ; "american order")]
    #[test_case("2 May 1980", "%d %B %Y" ; "single digit day")]
    #[test_case("20-08-2016", "%d-%m-%Y" ; "numeric")]
    #[test_case("Friday", "%A" ; "weekday only")]
    #[test_case("23 feb.", "%d %b." ; "abbreviated month")]
    #[test_case("01 01 2015", "%d %m %Y" ; "spaces")]
    #[test_case("22/05/13", "%d/%m/%y" ; "short year")]
    #[test_case("0411", "%Y" ; "year only")]
    #[test_case("2018-04", "%Y-%m" ; "year and month")]
    #[test_case("04-24", "%m-%d" ; "month first when day exceeds twelve")]
    #[test_case("2019-03-05T08:59:30", "%Y-%m-%dT%H:%M:%S" ; "iso timestamp")]
    fn infers_formats(value: &str, expected: &str) {
        assert_eq!(parse(value).format.to_string(), expected);
    }

    #[test_case("dinsdag 5 maart 2019 08:59", DateLocale::Nl ; "dutch")]
    #[test_case("Tuesday 5 March 2019 08:59", DateLocale::En ; "english")]
    #[test_case("Dienstag 5 März 2019 08:59", DateLocale::De ; "german")]
    fn infers_locale(value: &str, locale: DateLocale) {
        let date = parse(value);
        assert_eq!(date.format.to_string(), "%A %d %B %Y %H:%M");
        assert_eq!(date.locale, locale);
    }

    #[test_case("Tuesday 5 Marc 2019 08:59" ; "misspelled month")]
    #[test_case("marc 2001" ; "unknown word")]
    #[test_case("15-34-2019" ; "invalid month")]
    #[test_case("20082016" ; "unseparated digits")]
    #[test_case("31-02-2019" ; "not a calendar date")]
    #[test_case("-" ; "punctuation only")]
    fn rejects_unparseable_dates(value: &str) {
        assert!(matches!(
            infer_format(value, LOCALES),
            Err(SurrogateError::UnparseableDate { .. })
        ));
    }

    #[test]
    fn unanchored_weekday_defaults_to_mid_january_1900() {
        let date = parse("vrijdag");
        assert_eq!(date.locale, DateLocale::Nl);
        assert_eq!(date.datetime, datetime(1900, 1, 15));
        assert!(!date.year_anchored());
        assert!(!date.day_anchored());
    }

    #[test]
    fn anchoring() {
        assert!(parse("01-01-1905").year_anchored());
        assert!(parse("01-01-18").year_anchored());
        assert!(!parse("01-01").year_anchored());
        assert!(parse("01-01-1905").day_anchored());
        assert!(!parse("01-1905").day_anchored());
    }

    #[test]
    fn renders_in_original_casing_and_locale() {
        let date = parse("MAART 2019");
        assert_eq!(date.render(&datetime(2020, 10, 15)), "OKTOBER 2020");

        let date = parse("Mär 2019");
        assert_eq!(date.render(&datetime(2020, 12, 15)), "Dez 2020");

        let date = parse("ma 3 jan");
        assert_eq!(date.render(&datetime(1910, 1, 17)), "ma 17 jan");
    }

    #[test_case("2018-04-24", (34, 57) ; "spring")]
    #[test_case("2018-7-7", (16, 77) ; "summer")]
    #[test_case("2018-11-11", (49, 39) ; "autumn")]
    #[test_case("2018-12-22", (1, 88) ; "winter end of year")]
    #[test_case("2019-1-7", (17, 72) ; "winter start of year")]
    #[test_case("2018-12-21", (0, 89) ; "season border")]
    #[test_case("04-24", (34, 57) ; "missing year")]
    #[test_case("2018-04", (25, 66) ; "missing day")]
    fn season_offsets_of_dates(value: &str, expected: (i64, i64)) {
        assert_eq!(parse(value).season_offsets(), Some(expected));
    }

    #[test]
    fn minimum_offsets_skip_days_left_when_days_past_drops() {
        let offsets = [
            "2018-04-24",
            "2018-7-7",
            "2018-11-11",
            "2018-12-22",
            "2019-1-7",
            "2018-12-21",
        ]
        .iter()
        .filter_map(|value| parse(value).season_offsets());

        assert_eq!(minimum_season_offsets(offsets), (0, 39));
        assert_eq!(minimum_season_offsets([]), (300, 300));
    }

    #[test]
    fn full_years_truncate() {
        assert_eq!(full_years_between(&datetime(1905, 1, 1), &datetime(1989, 1, 1)), 84);
        assert_eq!(full_years_between(&datetime(1899, 11, 3), &datetime(1995, 1, 1)), 95);
        assert_eq!(full_years_between(&datetime(1995, 1, 1), &datetime(1899, 11, 3)), -95);
    }

    #[test]
    fn leap_day_falls_back_to_february_28() {
        assert_eq!(add_years(&datetime(2016, 2, 29), 1), Some(datetime(2017, 2, 28)));
        assert_eq!(add_days(&datetime(2017, 3, 1), -1), Some(datetime(2017, 2, 28)));
    }

    #[test]
    fn shifts_draw_within_configured_bounds() {
        let values = [
            "2018-04-24",
            "2018-7-7",
            "2018-11-11",
            "2018-12-22",
            "2019-1-7",
            "2018-12-21",
        ];
        let config = DateConfig {
            season_scope: SeasonScope::All,
            ..config(65, 10)
        };

        for seed in 0..100 {
            let shifter = DateShifter::new(&values, &config, &mut RandomData::new(seed));
            assert!((55..=75).contains(&shifter.year_shift()));
            assert!((1..=39).contains(&shifter.day_shift()));
        }
    }

    #[test]
    fn day_anchored_dates_do_not_bound_dayless_scope() {
        let values = ["2018-04-24", "2018-7-7"];
        let mut random = FixedRandom::with_ints(|_, high| high);
        let shifter = DateShifter::new(&values, &config(65, 0), &mut random);
        assert_eq!(shifter.day_shift(), -300);
    }

    #[test]
    fn shifts_whole_batch_consistently() {
        let values = ["01 januari 1915", "01-02", "vrijdag"];
        let mut random =
            FixedRandom::with_ints(|low, high| if low == 0 && high == 0 { 0 } else { 2 });

        let surrogates = DateGenerator::new(config(10, 0)).replace_all(&values, &mut random);
        assert_eq!(
            surrogates,
            vec![
                Some("03 januari 1925".to_string()),
                Some("03-02".to_string()),
                Some("maandag".to_string()),
            ]
        );
    }

    #[test]
    fn shifts_dates_without_years() {
        let values = ["01 januari", "01-02", "vrijdag"];
        let mut random =
            FixedRandom::with_ints(|low, high| if low == 0 && high == 0 { 0 } else { 2 });

        let surrogates = DateGenerator::new(config(10, 0)).replace_all(&values, &mut random);
        assert_eq!(
            surrogates,
            vec![
                Some("03 januari".to_string()),
                Some("03-02".to_string()),
                Some("maandag".to_string()),
            ]
        );
    }

    #[test]
    fn clamps_long_spans_before_shifting() {
        let values = ["01-01-1900", "01-01-2000"];
        let mut random = FixedRandom::with_ints(|low, _| if low == 1 { 1 } else { 0 });

        let surrogates = DateGenerator::new(config(0, 0)).replace_all(&values, &mut random);
        assert_eq!(
            surrogates,
            vec![Some("31-12-1910".to_string()), Some("31-12-1999".to_string())]
        );
    }

    #[test]
    fn unparseable_dates_become_missing_surrogates() {
        let values = ["01 januari 1915", "01-02", "marc 2001", "February 2001", "01-02-2010"];
        let mut random = RandomData::new(42);

        let shifter = DateShifter::new(&values, &DateConfig::default(), &mut random);
        let surrogates = shifter.surrogates();

        assert_eq!(shifter.year_shift(), 66);
        assert_eq!(shifter.day_shift(), 11);
        // 1915 lies 95 years before 2010 and is first clamped to 1921.
        assert_eq!(
            surrogates,
            vec![
                Some("12 januari 1987".to_string()),
                Some("12-02".to_string()),
                None,
                Some("February 2067".to_string()),
                Some("12-02-2076".to_string()),
            ]
        );
        for (value, surrogate) in values.iter().zip(&surrogates) {
            if let Some(surrogate) = surrogate {
                assert_eq!(
                    parse(surrogate).format.to_string(),
                    parse(value).format.to_string()
                );
            }
        }
    }
}
