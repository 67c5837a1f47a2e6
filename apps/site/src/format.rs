//! Display formatting for dates, recommendation hierarchy and language levels.
//!
//! Everything here is a pure function of its inputs; localized words come
//! from the `Catalog`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::i18n::{Catalog, Locale};
use crate::models::cv::{HierarchyMode, LanguageLevel};

/// Returned for dates that cannot be parsed, instead of an error.
pub const INVALID_DATE: &str = "Invalid Date";

/// WCAG 2.x AA minimum contrast for normal-size text.
pub const WCAG_AA_CONTRAST: f64 = 4.5;

// ────────────────────────────────────────────────────────────────────────────
// Dates
// ────────────────────────────────────────────────────────────────────────────

/// Date-times without an offset, tried in order.
const LOCAL_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, local date-times such as
/// `2023-06-15T10:00:00` and RFC 3339 timestamps.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::from_ymd_opt(raw.parse().ok()?, 1, 1);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"))
        .ok()
        .or_else(|| {
            LOCAL_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Short "Month Year" string, e.g. `Jun 2023` / `juin 2023`.
///
/// `None` or blank input gives `""`; unparseable input gives [`INVALID_DATE`].
pub fn format_date(catalog: &Catalog, iso: Option<&str>, locale: Locale) -> String {
    let Some(raw) = iso.filter(|s| !s.trim().is_empty()) else {
        return String::new();
    };
    match parse_iso_date(raw) {
        Some(date) => {
            let month = catalog
                .month_short(locale, date.month())
                .unwrap_or_else(|| format!("{:02}", date.month()));
            format!("{month} {}", date.year())
        }
        None => INVALID_DATE.to_string(),
    }
}

/// `Jun 2020 – Present` style range; a missing end means the role is current.
pub fn format_date_range(
    catalog: &Catalog,
    start: &str,
    end: Option<&str>,
    locale: Locale,
) -> String {
    let start = format_date(catalog, Some(start), locale);
    let end = match end {
        Some(end) => format_date(catalog, Some(end), locale),
        None => catalog.t(locale, "common.present"),
    };
    format!("{start} – {end}")
}

// ────────────────────────────────────────────────────────────────────────────
// Recommendations
// ────────────────────────────────────────────────────────────────────────────

/// Sentence describing how the recommender worked with `subject`.
pub fn format_hierarchy_mode(
    catalog: &Catalog,
    mode: HierarchyMode,
    locale: Locale,
    subject: &str,
) -> String {
    catalog.t_with(locale, mode.key(), &[("name", subject)])
}

// ────────────────────────────────────────────────────────────────────────────
// Language levels
// ────────────────────────────────────────────────────────────────────────────

/// Ordinal for the level bars: Basic → 1 … Native → 5.
pub fn language_level_number(level: LanguageLevel) -> u8 {
    match level {
        LanguageLevel::Basic => 1,
        LanguageLevel::Conversational => 2,
        LanguageLevel::Professional => 3,
        LanguageLevel::Fluent => 4,
        LanguageLevel::Native => 5,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// WCAG relative luminance.
    pub fn relative_luminance(self) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = f64::from(c) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.0) + 0.7152 * channel(self.1) + 0.0722 * channel(self.2)
    }
}

/// WCAG contrast ratio between two colors, in `[1, 21]`.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let (la, lb) = (a.relative_luminance(), b.relative_luminance());
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Background/text colors of a level badge for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelColors {
    pub background: Rgb,
    pub text: Rgb,
}

/// Badge colors. Dark shades carry white text so both palettes meet AA.
pub fn language_level_colors(level: LanguageLevel, dark: bool) -> LevelColors {
    let background = match (level, dark) {
        (LanguageLevel::Native, false) => Rgb(0xb9, 0x1c, 0x1c), // red-700
        (LanguageLevel::Native, true) => Rgb(0xdc, 0x26, 0x26),  // red-600
        (LanguageLevel::Fluent, false) => Rgb(0x9a, 0x34, 0x12), // orange-800
        (LanguageLevel::Fluent, true) => Rgb(0xc2, 0x41, 0x0c),  // orange-700
        (LanguageLevel::Professional, false) => Rgb(0x85, 0x4d, 0x0e), // yellow-800
        (LanguageLevel::Professional, true) => Rgb(0xa1, 0x62, 0x07),  // yellow-700
        (LanguageLevel::Conversational, false) => Rgb(0x15, 0x5e, 0x75), // cyan-800
        (LanguageLevel::Conversational, true) => Rgb(0x0e, 0x74, 0x90),  // cyan-700
        (LanguageLevel::Basic, false) => Rgb(0x1d, 0x4e, 0xd8), // blue-700
        (LanguageLevel::Basic, true) => Rgb(0x25, 0x63, 0xeb),  // blue-600
    };
    LevelColors {
        background,
        text: WHITE,
    }
}

/// Utility classes for the badge, light shade first then the `dark:` variant.
pub fn language_level_classes(level: LanguageLevel) -> &'static str {
    match level {
        LanguageLevel::Native => "text-white bg-red-700 dark:bg-red-600",
        LanguageLevel::Fluent => "text-white bg-orange-800 dark:bg-orange-700",
        LanguageLevel::Professional => "text-white bg-yellow-800 dark:bg-yellow-700",
        LanguageLevel::Conversational => "text-white bg-cyan-800 dark:bg-cyan-700",
        LanguageLevel::Basic => "text-white bg-blue-700 dark:bg-blue-600",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::embedded().unwrap()
    }

    #[test]
    fn test_format_date_none_is_empty() {
        assert_eq!(format_date(&catalog(), None, Locale::En), "");
        assert_eq!(format_date(&catalog(), Some("  "), Locale::En), "");
    }

    #[test]
    fn test_format_date_invalid_is_sentinel() {
        assert_eq!(
            format_date(&catalog(), Some("invalid-date"), Locale::En),
            "Invalid Date"
        );
        assert_eq!(
            format_date(&catalog(), Some("2023-13-40"), Locale::Es),
            INVALID_DATE
        );
    }

    #[test]
    fn test_format_date_short_month_and_year() {
        let catalog = catalog();
        assert_eq!(format_date(&catalog, Some("2023-06-15"), Locale::En), "Jun 2023");
        assert_eq!(format_date(&catalog, Some("2020-01-01"), Locale::Es), "ene 2020");
        assert_eq!(format_date(&catalog, Some("2023-06-15"), Locale::Fr), "juin 2023");
    }

    #[test]
    fn test_format_date_accepts_month_and_timestamp() {
        let catalog = catalog();
        assert_eq!(format_date(&catalog, Some("2021-09"), Locale::En), "Sep 2021");
        assert_eq!(
            format_date(&catalog, Some("2022-03-04T10:00:00+02:00"), Locale::En),
            "Mar 2022"
        );
    }

    #[test]
    fn test_format_date_accepts_year_and_local_datetime() {
        let catalog = catalog();
        let cases = [
            ("2023", "Jan 2023"),
            ("2023-06-15T10:00:00", "Jun 2023"),
            ("2023-06-15T10:00:00.250", "Jun 2023"),
            ("2023-06-15T10:00", "Jun 2023"),
        ];
        for (raw, expected) in cases {
            assert_eq!(format_date(&catalog, Some(raw), Locale::En), expected, "{raw}");
        }
        assert_eq!(
            format_date(&catalog, Some("2023-06-15T25:00:00"), Locale::En),
            INVALID_DATE
        );
        assert_eq!(format_date(&catalog, Some("20231"), Locale::En), INVALID_DATE);
    }

    #[test]
    fn test_date_range_open_end_is_present() {
        let text = format_date_range(&catalog(), "2020-06-01", None, Locale::En);
        assert_eq!(text, "Jun 2020 – Present");
    }

    #[test]
    fn test_hierarchy_mode_sentences() {
        let catalog = catalog();
        let cases = [
            (HierarchyMode::Client, "Chechu was my client"),
            (HierarchyMode::Colleague, "We worked together on the same team"),
            (HierarchyMode::Manager, "I managed Chechu directly"),
            (HierarchyMode::ReportsTo, "I reported to Chechu directly"),
        ];
        for (mode, expected) in cases {
            assert_eq!(
                format_hierarchy_mode(&catalog, mode, Locale::En, "Chechu"),
                expected
            );
        }
    }

    #[test]
    fn test_language_level_number_is_increasing_bijection() {
        let numbers: Vec<u8> = LanguageLevel::ALL
            .into_iter()
            .map(language_level_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_level_colors_meet_wcag_aa() {
        for level in LanguageLevel::ALL {
            for dark in [false, true] {
                let colors = language_level_colors(level, dark);
                let ratio = contrast_ratio(colors.background, colors.text);
                assert!(
                    ratio >= WCAG_AA_CONTRAST,
                    "{level:?} (dark={dark}) contrast {ratio:.2} below AA"
                );
            }
        }
    }

    #[test]
    fn test_contrast_ratio_extremes() {
        let ratio = contrast_ratio(Rgb(0, 0, 0), WHITE);
        assert!((ratio - 21.0).abs() < 1e-9);
        assert!((contrast_ratio(WHITE, WHITE) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_level_classes_use_white_text() {
        for level in LanguageLevel::ALL {
            assert!(language_level_classes(level).contains("text-white"));
        }
        assert!(language_level_classes(LanguageLevel::Native).contains("bg-red-700"));
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb(0xb9, 0x1c, 0x1c).hex(), "#b91c1c");
    }
}
