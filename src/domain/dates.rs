// src/domain/dates.rs

use chrono::NaiveDate;

/// Locale date patterns (strftime). Unknown or missing locales fall back to
/// `en_US`.
const DATE_PATTERNS: &[(&str, &str)] = &[
    ("en_US", "%m/%d/%Y"),
    ("en_GB", "%d/%m/%Y"),
    ("en_AU", "%d/%m/%Y"),
    ("en_IN", "%d/%m/%Y"),
    ("fr_FR", "%d/%m/%Y"),
    ("es_ES", "%d/%m/%Y"),
    ("it_IT", "%d/%m/%Y"),
    ("pt_BR", "%d/%m/%Y"),
    ("de_DE", "%d.%m.%Y"),
    ("nl_NL", "%d-%m-%Y"),
    ("ja_JP", "%Y/%m/%d"),
    ("zh_CN", "%Y-%m-%d"),
];

const FALLBACK_PATTERN: &str = "%m/%d/%Y";

/// Picks the pattern for a locale. Accepts `fr_FR`, `fr-FR` and a bare `fr`
/// (first locale of that language wins).
pub fn date_pattern(lang: Option<&str>) -> &'static str {
    let Some(lang) = lang.map(|l| l.trim().replace('-', "_")) else {
        return FALLBACK_PATTERN;
    };

    if let Some((_, pattern)) = DATE_PATTERNS.iter().find(|(code, _)| *code == lang) {
        return *pattern;
    }

    let language = lang.split('_').next().unwrap_or_default();
    DATE_PATTERNS
        .iter()
        .find(|(code, _)| code.split('_').next() == Some(language))
        .map(|(_, pattern)| *pattern)
        .unwrap_or(FALLBACK_PATTERN)
}

pub fn format_date(date: NaiveDate, lang: Option<&str>) -> String {
    date.format(date_pattern(lang)).to_string()
}
