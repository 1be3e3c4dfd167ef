//! Value and filename matchers.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// `<TENANT>_<TEMPLATE>_<ENV>_<YYYYMMDD>[_<HHMISS>][_<TAG>].txt`
static FILENAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{4}_[A-Za-z]{4,10}_[A-Za-z]{3,4}_[0-9]{8}(_[0-9]{6})?(_\w+)?\.txt$")
        .expect("Invalid filename regex")
});

/// US number format: optional minus, digits, optional fraction.
static NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("Invalid number regex"));

/// M/D/YYYY or MM/DD/YYYY.
static DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("Invalid date regex"));

static BOOLEAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[01]$").expect("Invalid boolean regex"));

const DATE_FORMAT: &str = "%m/%d/%Y";

pub fn is_valid_filename(name: &str) -> bool {
    FILENAME_REGEX.is_match(name)
}

pub fn is_number(value: &str) -> bool {
    NUMBER_REGEX.is_match(value)
}

/// Shape check plus a calendar parse, so `02/30/2007` is rejected.
/// Years start at 1.
pub fn is_date(value: &str) -> bool {
    DATE_REGEX.is_match(value)
        && NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok_and(|date| date.year() >= 1)
}

pub fn is_boolean(value: &str) -> bool {
    BOOLEAN_REGEX.is_match(value)
}
