use chrono::NaiveDate;

/// US-style formats accepted for dob and service date, tried in order.
const US_DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%m/%d/%y"];

/// Why a raw date field failed to normalize. `code()` supplies the suffix
/// the evaluator composes into the field-specific reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFault {
    Missing,
    InvalidFormat,
}

impl DateFault {
    pub const fn code(self) -> &'static str {
        match self {
            DateFault::Missing => "MISSING_DATE",
            DateFault::InvalidFormat => "INVALID_DATE_FORMAT",
        }
    }
}

/// Parse dates like `12/31/2024` or `7/4/2025`.
pub fn parse_us_date(value: &str) -> Result<NaiveDate, DateFault> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DateFault::Missing);
    }

    for format in US_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    Err(DateFault::InvalidFormat)
}

/// Strip everything that is not an ASCII digit. Length policy is the
/// caller's concern.
pub fn normalize_phone(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}
