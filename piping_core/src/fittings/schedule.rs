//! # Schedule Normalizer
//!
//! Pipe dimension tables were populated by hand over many years, so the same
//! schedule shows up as "Sch40", "Sch 40", "40" or "Sch 40/STD" depending on
//! who entered the row. Rather than guessing a single canonical form, the
//! normalizer produces an ordered list of candidate keys and the pipe lookup
//! takes the first one the table knows.
//!
//! Candidate order, most specific first:
//!
//! 1. the designation exactly as given
//! 2. `Sch{N}`
//! 3. `Sch {N}`
//! 4. `{N}`
//!
//! where `N` is the numeric part (with an optional trailing `S` for stainless
//! schedules). Designations without a numeric part ("MEDIUM", "STD", "WT6")
//! yield only themselves.
//!
//! Two different designations can normalize to the same candidate; this is
//! not guarded against.
//!
//! ## Example
//!
//! ```rust
//! use piping_core::fittings::schedule::schedule_candidates;
//!
//! assert_eq!(schedule_candidates("Sch 40"), vec!["Sch 40", "Sch40", "40"]);
//! assert_eq!(schedule_candidates("MEDIUM"), vec!["MEDIUM"]);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

static SCH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[Ss][Cc][Hh]\s*(\d+[Ss]?)(?:/\w+)?$").expect("valid schedule regex"));

static BARE_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)(?:/\w+)?$").expect("valid number regex"));

/// Numeric schedule part of a designation, if any ("Sch 80/XS" → "80").
pub fn schedule_number(designation: &str) -> Option<String> {
    let trimmed = designation.trim();
    SCH_PATTERN
        .captures(trimmed)
        .or_else(|| BARE_NUMBER_PATTERN.captures(trimmed))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Ordered, de-duplicated lookup candidates for a schedule designation.
pub fn schedule_candidates(designation: &str) -> Vec<String> {
    let mut candidates = vec![designation.to_string()];

    if let Some(number) = schedule_number(designation) {
        for candidate in [format!("Sch{}", number), format!("Sch {}", number), number] {
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    }

    log::debug!("schedule '{}' -> candidates {:?}", designation, candidates);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_form() {
        assert_eq!(schedule_candidates("Sch40"), vec!["Sch40", "Sch 40", "40"]);
    }

    #[test]
    fn test_spaced_form() {
        assert_eq!(schedule_candidates("Sch 40"), vec!["Sch 40", "Sch40", "40"]);
    }

    #[test]
    fn test_bare_number() {
        assert_eq!(schedule_candidates("40"), vec!["40", "Sch40", "Sch 40"]);
    }

    #[test]
    fn test_lowercase_prefix() {
        assert_eq!(schedule_candidates("sch80"), vec!["sch80", "Sch80", "Sch 80", "80"]);
    }

    #[test]
    fn test_dual_designation_suffix() {
        assert_eq!(
            schedule_candidates("Sch 40/STD"),
            vec!["Sch 40/STD", "Sch40", "Sch 40", "40"]
        );
        assert_eq!(schedule_candidates("80/XS"), vec!["80/XS", "Sch80", "Sch 80", "80"]);
    }

    #[test]
    fn test_stainless_suffix() {
        assert_eq!(schedule_candidates("Sch10S"), vec!["Sch10S", "Sch 10S", "10S"]);
        assert_eq!(schedule_number("Sch 40s"), Some("40s".to_string()));
    }

    #[test]
    fn test_named_designations_pass_through() {
        for name in ["MEDIUM", "HEAVY", "STD", "XS", "WT6", ""] {
            assert_eq!(schedule_candidates(name), vec![name.to_string()]);
        }
    }

    #[test]
    fn test_equivalent_forms_share_every_key() {
        let forms = ["Sch40", "Sch 40", "40"];
        for key in ["Sch40", "Sch 40", "40"] {
            for form in forms {
                assert!(schedule_candidates(form).iter().any(|c| c == key), "{} missing {}", form, key);
            }
        }
    }

    #[test]
    fn test_whitespace_is_not_silently_trimmed_from_original() {
        let candidates = schedule_candidates(" Sch40 ");
        assert_eq!(candidates[0], " Sch40 ");
        assert_eq!(&candidates[1..], &["Sch40", "Sch 40", "40"]);
    }
}
