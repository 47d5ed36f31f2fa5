//! Template selection for a representative.
//!
//! Selection walks a cascade of progressively looser predicates and stops at
//! the first one that matches any template. Among the templates that pass
//! that step one is drawn uniformly at random: many constituents mailing the
//! same office with identical text get caught by bulk-mail filters.
//!
//! | Step                 | level             | ideology             | language        |
//! |----------------------|-------------------|----------------------|-----------------|
//! | `Exact`              | equal             | equal                | equal           |
//! | `LevelLanguage`      | equal             | unset or equal       | equal           |
//! | `IdeologyLanguage`   | unset or equal    | equal                | equal           |
//! | `GenericLanguage`    | unset             | unset                | equal           |
//! | `LanguageFallback`   | any               | any                  | equal or `"en"` |
//! | `Any`                | any               | any                  | any             |

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::TargetingError;
use crate::ideology::{PartyMapping, PoliticalIdeology};
use crate::representative::{Level, Representative};
use crate::template::{EmailTemplate, TemplateTargeting};

/// One step of the selection cascade, most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStep {
    Exact,
    LevelLanguage,
    IdeologyLanguage,
    GenericLanguage,
    LanguageFallback,
    Any,
}

impl MatchStep {
    pub const CASCADE: [Self; 6] = [
        Self::Exact,
        Self::LevelLanguage,
        Self::IdeologyLanguage,
        Self::GenericLanguage,
        Self::LanguageFallback,
        Self::Any,
    ];

    /// Whether `targeting` passes this step for the given profile.
    #[must_use]
    pub fn accepts(self, targeting: &TemplateTargeting, profile: &TargetProfile<'_>) -> bool {
        let level_equal = targeting.level == Some(profile.level);
        let level_open = targeting.level.is_none() || level_equal;
        let ideology_equal = targeting.ideology == Some(profile.ideology);
        let ideology_open = targeting.ideology.is_none() || ideology_equal;
        let language = targeting.language_is(profile.language);

        match self {
            Self::Exact => level_equal && ideology_equal && language,
            Self::LevelLanguage => level_equal && ideology_open && language,
            Self::IdeologyLanguage => ideology_equal && level_open && language,
            Self::GenericLanguage => targeting.is_generic() && language,
            Self::LanguageFallback => language || targeting.language_is("en"),
            Self::Any => true,
        }
    }
}

impl fmt::Display for MatchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Exact => "exact",
            Self::LevelLanguage => "level+language",
            Self::IdeologyLanguage => "ideology+language",
            Self::GenericLanguage => "generic+language",
            Self::LanguageFallback => "language-fallback",
            Self::Any => "any",
        };
        f.write_str(name)
    }
}

/// What the cascade matches against: the representative's level, ideology
/// and preferred language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetProfile<'a> {
    pub level: Level,
    pub ideology: PoliticalIdeology,
    pub language: &'a str,
}

impl TargetProfile<'_> {
    #[must_use]
    pub fn of(representative: &Representative, party_mapping: &PartyMapping) -> Self {
        Self {
            level: representative.level(),
            ideology: party_mapping.resolve(representative.party.as_deref()),
            language: representative.preferred_language_code(),
        }
    }
}

/// The winning step of the cascade and every template that passed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidates<'a> {
    pub step: MatchStep,
    pub templates: Vec<&'a EmailTemplate>,
}

impl<'a> Candidates<'a> {
    /// Draw one candidate uniformly.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'a EmailTemplate> {
        self.templates.choose(rng).copied()
    }
}

/// Run the cascade. `None` only when `templates` is empty.
#[must_use]
pub fn candidates<'a>(
    profile: &TargetProfile<'_>,
    templates: &'a [EmailTemplate],
) -> Option<Candidates<'a>> {
    MatchStep::CASCADE.into_iter().find_map(|step| {
        let matched: Vec<&EmailTemplate> = templates
            .iter()
            .filter(|template| step.accepts(&template.targeting, profile))
            .collect();
        (!matched.is_empty()).then_some(Candidates {
            step,
            templates: matched,
        })
    })
}

/// Pick a template for `representative` using the supplied random source.
///
/// Returns `None` only when `templates` is empty.
pub fn select_template<'a, R: Rng + ?Sized>(
    representative: &Representative,
    templates: &'a [EmailTemplate],
    party_mapping: &PartyMapping,
    rng: &mut R,
) -> Option<&'a EmailTemplate> {
    let profile = TargetProfile::of(representative, party_mapping);
    let found = candidates(&profile, templates)?;
    let chosen = found.choose(rng)?;
    tracing::debug!(
        representative = %representative.name,
        level = %profile.level,
        ideology = %profile.ideology,
        language = profile.language,
        step = %found.step,
        candidates = found.templates.len(),
        template = %chosen.id,
        "selected template"
    );
    Some(chosen)
}

/// Every template fitting the given filters, without random choice.
///
/// `None` for level or ideology means "don't filter on it"; templates with
/// the field unset always pass. Language must match.
#[must_use]
pub fn get_templates<'a>(
    templates: &'a [EmailTemplate],
    level: Option<Level>,
    ideology: Option<PoliticalIdeology>,
    language: &str,
) -> Vec<&'a EmailTemplate> {
    templates
        .iter()
        .filter(|template| template.targeting.matches(level, ideology, language))
        .collect()
}

// ─── Catalog ────────────────────────────────────────────────────────────────

/// The loaded template set together with the party grouping table.
///
/// Built once at startup and only read afterwards; share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateCatalog {
    templates: Vec<EmailTemplate>,
    party_mapping: PartyMapping,
}

impl TemplateCatalog {
    #[must_use]
    pub const fn new(templates: Vec<EmailTemplate>, party_mapping: PartyMapping) -> Self {
        Self {
            templates,
            party_mapping,
        }
    }

    #[must_use]
    pub fn templates(&self) -> &[EmailTemplate] {
        &self.templates
    }

    #[must_use]
    pub const fn party_mapping(&self) -> &PartyMapping {
        &self.party_mapping
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&EmailTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    #[must_use]
    pub fn ideology_for(&self, party_name: Option<&str>) -> PoliticalIdeology {
        self.party_mapping.resolve(party_name)
    }

    #[must_use]
    pub fn profile<'r>(&self, representative: &'r Representative) -> TargetProfile<'r> {
        TargetProfile::of(representative, &self.party_mapping)
    }

    /// Pick a template for `representative` with the thread-local RNG.
    ///
    /// # Errors
    ///
    /// Returns [`TargetingError::NoTemplatesLoaded`] if the catalog is empty.
    pub fn select(&self, representative: &Representative) -> Result<&EmailTemplate, TargetingError> {
        self.select_with(representative, &mut rand::thread_rng())
    }

    /// Pick a template for `representative` with a caller-supplied RNG.
    ///
    /// # Errors
    ///
    /// Returns [`TargetingError::NoTemplatesLoaded`] if the catalog is empty.
    pub fn select_with<R: Rng + ?Sized>(
        &self,
        representative: &Representative,
        rng: &mut R,
    ) -> Result<&EmailTemplate, TargetingError> {
        select_template(representative, &self.templates, &self.party_mapping, rng)
            .ok_or(TargetingError::NoTemplatesLoaded)
    }

    /// The candidate set selection would draw from, for inspection.
    #[must_use]
    pub fn candidates_for(&self, representative: &Representative) -> Option<Candidates<'_>> {
        candidates(&self.profile(representative), &self.templates)
    }

    /// Enumeration view; see [`get_templates`].
    #[must_use]
    pub fn get_templates(
        &self,
        level: Option<Level>,
        ideology: Option<PoliticalIdeology>,
        language: &str,
    ) -> Vec<&EmailTemplate> {
        get_templates(&self.templates, level, ideology, language)
    }
}
