/// Representative years for each experience label offered by the jobs form.
pub const EXPERIENCE_YEARS: [(&str, f64); 8] = [
    ("fresher", 0.0),
    ("0-1", 0.5),
    ("1-2", 1.5),
    ("2-3", 2.5),
    ("3-5", 4.0),
    ("5-7", 6.0),
    ("7-10", 8.5),
    ("10+", 10.0),
];

/// Parse the leading run of digits, ignoring surrounding whitespace and an
/// optional `+` sign. Trailing garbage is ignored (`"1000000+"` -> 1000000).
pub fn parse_leading_int(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    unsigned[..end].parse().ok()
}

/// Lower bound of an income bracket such as `"50000-100000"`; 0 when unparsable.
pub fn parse_income_bracket(bracket: &str) -> u64 {
    let lower = bracket.split('-').next().unwrap_or_default();
    parse_leading_int(lower).unwrap_or(0)
}

/// Age as an integer; 0 when unparsable, so range checks stay deterministic.
pub fn parse_age(raw: &str) -> u32 {
    parse_leading_int(raw)
        .and_then(|age| u32::try_from(age).ok())
        .unwrap_or(0)
}

/// Map an experience label to years; unknown labels count as no experience.
pub fn experience_years(label: &str) -> f64 {
    let label = label.trim();
    EXPERIENCE_YEARS
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, years)| *years)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_bracket_lower_bound() {
        assert_eq!(parse_income_bracket("50000-100000"), 50000);
        assert_eq!(parse_income_bracket("0-250000"), 0);
        assert_eq!(parse_income_bracket("800000"), 800000);
        assert_eq!(parse_income_bracket("1000000+"), 1000000);
    }

    #[test]
    fn test_income_bracket_unparsable() {
        assert_eq!(parse_income_bracket("abc"), 0);
        assert_eq!(parse_income_bracket(""), 0);
        assert_eq!(parse_income_bracket("-5000"), 0);
    }

    #[test]
    fn test_experience_table() {
        assert_eq!(experience_years("fresher"), 0.0);
        assert_eq!(experience_years("0-1"), 0.5);
        assert_eq!(experience_years("2-3"), 2.5);
        assert_eq!(experience_years("3-5"), 4.0);
        assert_eq!(experience_years("7-10"), 8.5);
        assert_eq!(experience_years("10+"), 10.0);
        assert_eq!(experience_years("unknown"), 0.0);
    }

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age("21"), 21);
        assert_eq!(parse_age(" 30 "), 30);
        assert_eq!(parse_age("18 years"), 18);
        assert_eq!(parse_age("twenty"), 0);
        assert_eq!(parse_age(""), 0);
        assert_eq!(parse_age("99999999999"), 0);
    }
}
