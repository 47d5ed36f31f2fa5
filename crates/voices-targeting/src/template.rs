//! Advocacy email templates and their targeting metadata.

use regex::{NoExpand, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::ideology::PoliticalIdeology;
use crate::representative::Level;

fn default_language() -> String {
    "en".to_string()
}

/// Which representatives a template is written for.
///
/// An unset `level` or `ideology` means the template applies to all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateTargeting {
    #[serde(default, alias = "Level")]
    pub level: Option<Level>,
    #[serde(default, alias = "Ideology")]
    pub ideology: Option<PoliticalIdeology>,
    /// Language code the template is written in (`"en"`, `"fr"`).
    #[serde(default = "default_language", alias = "Language")]
    pub language: String,
    /// Free-form categories, e.g. `"human-rights"`. Not used for matching.
    #[serde(default, alias = "Tags")]
    pub tags: Vec<String>,
}

impl Default for TemplateTargeting {
    fn default() -> Self {
        Self {
            level: None,
            ideology: None,
            language: default_language(),
            tags: Vec::new(),
        }
    }
}

impl TemplateTargeting {
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_ideology(mut self, ideology: PoliticalIdeology) -> Self {
        self.ideology = Some(ideology);
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Neither level nor ideology is set.
    #[must_use]
    pub const fn is_generic(&self) -> bool {
        self.level.is_none() && self.ideology.is_none()
    }

    #[must_use]
    pub fn language_is(&self, language: &str) -> bool {
        self.language.eq_ignore_ascii_case(language)
    }

    /// Loose filter used for listing templates: a `None` on either side of
    /// level or ideology matches anything, language must be equal.
    #[must_use]
    pub fn matches(
        &self,
        level: Option<Level>,
        ideology: Option<PoliticalIdeology>,
        language: &str,
    ) -> bool {
        let level_ok = match (self.level, level) {
            (Some(ours), Some(wanted)) => ours == wanted,
            _ => true,
        };
        let ideology_ok = match (self.ideology, ideology) {
            (Some(ours), Some(wanted)) => ours == wanted,
            _ => true,
        };
        level_ok && ideology_ok && self.language_is(language)
    }

    /// Descriptive ranking: +2 level, +2 ideology, +1 for any tags.
    #[must_use]
    pub fn specificity_score(&self) -> u8 {
        let mut score = 0;
        if self.level.is_some() {
            score += 2;
        }
        if self.ideology.is_some() {
            score += 2;
        }
        if !self.tags.is_empty() {
            score += 1;
        }
        score
    }
}

/// A loaded advocacy email with `{{Placeholder}}` tokens in subject and body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplate {
    pub id: String,
    /// Where the template was loaded from.
    pub file_name: String,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub targeting: TemplateTargeting,
}

impl EmailTemplate {
    pub fn new(
        id: impl Into<String>,
        file_name: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            subject: subject.into(),
            body: body.into(),
            targeting: TemplateTargeting::default(),
        }
    }

    #[must_use]
    pub fn with_targeting(mut self, targeting: TemplateTargeting) -> Self {
        self.targeting = targeting;
        self
    }

    /// Return a copy with every `{{name}}` token replaced by its value.
    ///
    /// Token names match case-insensitively; tokens without a value are left
    /// in place. Variables are applied in iteration order.
    #[must_use]
    pub fn with_variables<I, K, V>(&self, variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut subject = self.subject.clone();
        let mut body = self.body.clone();

        for (name, value) in variables {
            let token = format!("{{{{{}}}}}", name.as_ref());
            subject = replace_ignore_case(&subject, &token, value.as_ref());
            body = replace_ignore_case(&body, &token, value.as_ref());
        }

        Self {
            subject,
            body,
            ..self.clone()
        }
    }
}

fn replace_ignore_case(text: &str, token: &str, value: &str) -> String {
    // An escaped literal only fails to build past the regex size limit.
    match RegexBuilder::new(&regex::escape(token))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re.replace_all(text, NoExpand(value)).into_owned(),
        Err(err) => {
            tracing::warn!(%err, token, "placeholder pattern rejected; leaving text unchanged");
            text.to_string()
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Substitution replaces the token wherever it appears, whatever its case
        #[test]
        fn substitution_replaces_all_case_variants(
            pieces in proptest::collection::vec("[a-z ]{0,6}", 1..5),
            upper in proptest::collection::vec(any::<bool>(), 5),
        ) {
            let mut body = String::new();
            for (i, piece) in pieces.iter().enumerate() {
                body.push_str(piece);
                let token = if upper[i] { "{{POSTALCODE}}" } else { "{{postalCode}}" };
                body.push_str(token);
            }
            body.push_str("{{Other}}");

            let out = EmailTemplate::new("t", "t.json", "", body)
                .with_variables([("PostalCode", "K1A0A6")]);

            prop_assert!(!out.body.to_lowercase().contains("{{postalcode}}"));
            prop_assert_eq!(out.body.matches("K1A0A6").count(), pieces.len());
            prop_assert!(out.body.ends_with("{{Other}}"));
        }
    }
}
