//! Classification of elected representatives.
//!
//! Directory records only carry a free-text office title ("MP", "MPP",
//! "Regional Councillor", ...). Government level is inferred from that text
//! with an ordered rule list; the first matching rule wins.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Level of government a representative sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Level {
    /// House of Commons (MPs).
    Federal,
    /// Provincial or territorial legislatures (MPPs, MLAs, MNAs, MHAs).
    Provincial,
    /// Mayors, councillors, regional chairs and everything unrecognized.
    Municipal,
}

impl Level {
    pub const ALL: [Self; 3] = [Self::Federal, Self::Provincial, Self::Municipal];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Federal => "Federal",
            Self::Provincial => "Provincial",
            Self::Municipal => "Municipal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a string names no [`Level`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown government level: {0}")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

impl TryFrom<String> for Level {
    type Error = ParseLevelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ─── Office title rules ─────────────────────────────────────────────────────

const PROVINCIAL_MARKERS: &[&str] = &["mpp", "mla", "mna", "mha"];
const MUNICIPAL_MARKERS: &[&str] = &["mayor", "councillor", "chair", "reeve", "warden"];

/// One entry of the office-title rule list. `office` is already lowercased.
struct LevelRule {
    level: Level,
    matches: fn(&str) -> bool,
}

fn is_federal_title(office: &str) -> bool {
    // "MPP" contains "MP", so the provincial title has to be excluded here.
    (office.contains("mp") || office.contains("member of parliament")) && !office.contains("mpp")
}

fn is_provincial_title(office: &str) -> bool {
    PROVINCIAL_MARKERS.iter().any(|marker| office.contains(marker))
}

fn is_municipal_title(office: &str) -> bool {
    MUNICIPAL_MARKERS.iter().any(|marker| office.contains(marker))
}

/// Order is load-bearing: federal, then provincial, then municipal.
const LEVEL_RULES: [LevelRule; 3] = [
    LevelRule {
        level: Level::Federal,
        matches: is_federal_title,
    },
    LevelRule {
        level: Level::Provincial,
        matches: is_provincial_title,
    },
    LevelRule {
        level: Level::Municipal,
        matches: is_municipal_title,
    },
];

/// Classify an office title. Unrecognized titles are municipal.
#[must_use]
pub fn classify_office(elected_office: &str) -> Level {
    let office = elected_office.to_lowercase();
    LEVEL_RULES
        .iter()
        .find(|rule| (rule.matches)(&office))
        .map_or(Level::Municipal, |rule| rule.level)
}

// ─── Representative ─────────────────────────────────────────────────────────

/// An elected representative as returned by the directory lookup.
///
/// Only identity fields are stored; level, language preference and honorific
/// are derived on demand from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Representative {
    pub name: String,
    pub elected_office: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub district_name: Option<String>,
    #[serde(default)]
    pub party: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// "M", "F", or absent.
    #[serde(default)]
    pub gender: Option<String>,
    /// Languages the representative corresponds in, e.g. `["English", "French"]`.
    #[serde(default)]
    pub preferred_languages: Vec<String>,
}

impl Representative {
    /// Create a representative with only the required fields set.
    pub fn new(name: impl Into<String>, elected_office: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elected_office: elected_office.into(),
            email: None,
            district_name: None,
            party: None,
            url: None,
            gender: None,
            preferred_languages: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_district(mut self, district_name: impl Into<String>) -> Self {
        self.district_name = Some(district_name.into());
        self
    }

    #[must_use]
    pub fn with_party(mut self, party: impl Into<String>) -> Self {
        self.party = Some(party.into());
        self
    }

    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    #[must_use]
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Government level inferred from the office title.
    #[must_use]
    pub fn level(&self) -> Level {
        classify_office(&self.elected_office)
    }

    #[must_use]
    pub fn is_federal_mp(&self) -> bool {
        self.level() == Level::Federal
    }

    /// True if the office title names a municipal role explicitly. Municipal
    /// is also the fallback level, so this can be false for a municipal
    /// [`level`](Self::level).
    #[must_use]
    pub fn has_municipal_title(&self) -> bool {
        is_municipal_title(&self.elected_office.to_lowercase())
    }

    /// True when an email address is present and not blank.
    #[must_use]
    pub fn has_email(&self) -> bool {
        self.email.as_deref().is_some_and(|email| !email.trim().is_empty())
    }

    #[must_use]
    pub fn prefers_french(&self) -> bool {
        self.preferred_languages
            .iter()
            .any(|language| language.to_lowercase().contains("french"))
    }

    /// `"fr"` for French-preferring representatives, otherwise `"en"`.
    #[must_use]
    pub fn preferred_language_code(&self) -> &'static str {
        if self.prefers_french() {
            "fr"
        } else {
            "en"
        }
    }

    /// "Mr." or "Ms." from the gender field; empty when unknown.
    #[must_use]
    pub fn honorific(&self) -> &'static str {
        match self.gender.as_deref() {
            Some(g) if g.eq_ignore_ascii_case("m") => "Mr.",
            Some(g) if g.eq_ignore_ascii_case("f") => "Ms.",
            _ => "",
        }
    }

    /// Salutation used in letters: `"Ms. Jane Doe"`, or just the name.
    #[must_use]
    pub fn salutation(&self) -> String {
        match self.honorific() {
            "" => self.name.clone(),
            honorific => format!("{honorific} {}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn office_title_levels() {
        let cases = [
            ("MP", Level::Federal, "bare MP"),
            ("Member of Parliament", Level::Federal, "long form"),
            ("member of parliament", Level::Federal, "lowercase long form"),
            ("mp", Level::Federal, "lowercase mp"),
            ("MPP", Level::Provincial, "Ontario MPP"),
            ("MLA", Level::Provincial, "MLA"),
            ("MNA", Level::Provincial, "Quebec MNA"),
            ("MHA", Level::Provincial, "Newfoundland MHA"),
            ("Member of Parliament MPP", Level::Provincial, "MPP wins over long form"),
            ("Mayor", Level::Municipal, "mayor"),
            ("Regional Councillor", Level::Municipal, "councillor"),
            ("Chair", Level::Municipal, "chair"),
            ("Reeve", Level::Municipal, "reeve"),
            ("Warden", Level::Municipal, "warden"),
            ("School Trustee", Level::Municipal, "unrecognized defaults"),
            ("", Level::Municipal, "empty title"),
        ];

        for (office, expected, desc) in cases {
            assert_eq!(classify_office(office), expected, "case '{desc}'");
        }
    }

    #[test]
    fn municipal_title_is_explicit_only() {
        assert!(Representative::new("A", "Mayor").has_municipal_title());
        assert!(!Representative::new("A", "School Trustee").has_municipal_title());
        assert_eq!(
            Representative::new("A", "School Trustee").level(),
            Level::Municipal
        );
    }

    #[test]
    fn blank_email_is_not_emailable() {
        assert!(!Representative::new("A", "MP").has_email());
        assert!(!Representative::new("A", "MP").with_email("   ").has_email());
        assert!(Representative::new("A", "MP").with_email("a@b.ca").has_email());
    }

    #[test]
    fn french_preference_is_case_insensitive() {
        let rep = Representative::new("A", "MNA").with_languages(["English", "FRENCH"]);
        assert!(rep.prefers_french());
        assert_eq!(rep.preferred_language_code(), "fr");

        let rep = Representative::new("A", "MP").with_languages(["English"]);
        assert!(!rep.prefers_french());
        assert_eq!(rep.preferred_language_code(), "en");

        assert_eq!(Representative::new("A", "MP").preferred_language_code(), "en");
    }

    #[test]
    fn honorific_from_gender() {
        let cases = [
            (Some("M"), "Mr."),
            (Some("m"), "Mr."),
            (Some("F"), "Ms."),
            (Some("f"), "Ms."),
            (Some("X"), ""),
            (Some(""), ""),
            (None, ""),
        ];

        for (gender, expected) in cases {
            let mut rep = Representative::new("A", "MP");
            rep.gender = gender.map(String::from);
            assert_eq!(rep.honorific(), expected, "gender {gender:?}");
        }
    }

    #[test]
    fn salutation_includes_honorific_when_known() {
        let rep = Representative::new("Jane Doe", "MP").with_gender("F");
        assert_eq!(rep.salutation(), "Ms. Jane Doe");
        assert_eq!(Representative::new("Sam Lee", "MP").salutation(), "Sam Lee");
    }

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!("federal".parse::<Level>(), Ok(Level::Federal));
        assert_eq!(" PROVINCIAL ".parse::<Level>(), Ok(Level::Provincial));
        assert!("county".parse::<Level>().is_err());
    }

    #[test]
    fn level_deserializes_from_any_case() {
        let level: Level = serde_json::from_str("\"municipal\"").expect("parse");
        assert_eq!(level, Level::Municipal);
        assert_eq!(
            serde_json::to_string(&Level::Federal).expect("serialize"),
            "\"Federal\""
        );
    }
}
