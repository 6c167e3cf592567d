//! Document numbering
//!
//! Job and invoice numbers have the form `AAL-<ABBR>-<YY>-<NNN>`: company
//! prefix, job-type abbreviation (or `INV`), two-digit year and a sequence
//! zero-padded to at least three digits. The next number is one past the
//! highest numeric sequence already issued under the same prefix.

use chrono::{Datelike, Utc};

use crate::models::job::JobType;

pub const COMPANY_PREFIX: &str = "AAL";
pub const INVOICE_ABBREVIATION: &str = "INV";

/// What a number is being issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberSeries {
    Job(JobType),
    Invoice,
}

impl NumberSeries {
    pub fn abbreviation(self) -> &'static str {
        match self {
            NumberSeries::Job(job_type) => job_type.abbreviation(),
            NumberSeries::Invoice => INVOICE_ABBREVIATION,
        }
    }

    /// Prefix for the given calendar year, e.g. `AAL-AI-25-`
    pub fn prefix(self, year: i32) -> String {
        format!(
            "{}-{}-{:02}-",
            COMPANY_PREFIX,
            self.abbreviation(),
            year.rem_euclid(100)
        )
    }

    pub fn current_prefix(self) -> String {
        self.prefix(Utc::now().year())
    }
}

/// Sequence of `number` under `prefix`; `None` when the suffix is not all digits
pub fn parse_sequence(prefix: &str, number: &str) -> Option<u32> {
    let suffix = number.strip_prefix(prefix)?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}

/// One past the highest parseable sequence, or 1
pub fn next_sequence<'a, I>(prefix: &str, existing: I) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    existing
        .into_iter()
        .filter_map(|number| parse_sequence(prefix, number))
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

pub fn format_number(prefix: &str, sequence: u32) -> String {
    format!("{}{:03}", prefix, sequence)
}

/// Next number under `prefix` given the numbers already issued
pub fn next_number<'a, I>(prefix: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    format_number(prefix, next_sequence(prefix, existing))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_per_job_type() {
        assert_eq!(NumberSeries::Job(JobType::AirImport).prefix(2025), "AAL-AI-25-");
        assert_eq!(NumberSeries::Job(JobType::SeaExport).prefix(2031), "AAL-SE-31-");
        assert_eq!(NumberSeries::Invoice.prefix(2009), "AAL-INV-09-");
    }

    #[test]
    fn test_first_number_defaults_to_one() {
        let prefix = NumberSeries::Job(JobType::RoadImport).prefix(2025);
        assert_eq!(next_number(&prefix, Vec::<&str>::new()), "AAL-RI-25-001");
    }

    #[test]
    fn test_next_after_max_for_every_type() {
        for job_type in JobType::ALL {
            let prefix = NumberSeries::Job(job_type).prefix(2025);
            let existing = vec![
                format!("{}001", prefix),
                format!("{}007", prefix),
                format!("{}003", prefix),
            ];
            let next = next_number(&prefix, existing.iter().map(String::as_str));
            assert_eq!(next, format!("AAL-{}-25-008", job_type.abbreviation()));
        }
    }

    #[test]
    fn test_max_is_numeric_not_lexicographic() {
        let prefix = "AAL-AE-25-";
        let existing = ["AAL-AE-25-999", "AAL-AE-25-1000"];
        assert_eq!(next_number(prefix, existing), "AAL-AE-25-1001");
    }

    #[test]
    fn test_non_numeric_suffix_is_ignored() {
        let prefix = "AAL-SI-25-";
        assert_eq!(parse_sequence(prefix, "AAL-SI-25-01A"), None);
        assert_eq!(parse_sequence(prefix, "AAL-SI-25-"), None);
        assert_eq!(next_number(prefix, ["AAL-SI-25-XYZ"]), "AAL-SI-25-001");
        assert_eq!(next_number(prefix, ["AAL-SI-25-XYZ", "AAL-SI-25-004"]), "AAL-SI-25-005");
    }

    #[test]
    fn test_other_prefixes_do_not_count() {
        let prefix = "AAL-AI-25-";
        let existing = ["AAL-AI-24-050", "AAL-AE-25-010", "AAL-AI-25-002"];
        assert_eq!(next_number(prefix, existing), "AAL-AI-25-003");
    }
}
