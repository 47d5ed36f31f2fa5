//! Representatives found for one postal code.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::representative::Representative;

/// Remove all whitespace and uppercase: `"k1a 0a6"` → `"K1A0A6"`.
#[must_use]
pub fn normalize_postal_code(postal_code: &str) -> String {
    postal_code
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

#[allow(clippy::expect_used)]
fn postal_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // D, F, I, O, Q, U never appear; W and Z never lead.
        Regex::new(r"^[ABCEGHJ-NPRSTVXY]\d[ABCEGHJ-NPRSTV-Z]\d[ABCEGHJ-NPRSTV-Z]\d$")
            .expect("postal code regex must compile")
    })
}

/// Check an already-normalized code against the Canadian `A1A1A1` format.
#[must_use]
pub fn is_valid_postal_code(normalized: &str) -> bool {
    postal_code_re().is_match(normalized)
}

/// Representatives for a postal code, ordered for recipient selection.
///
/// Deserialization goes through [`LookupResult::new`], so a decoded result
/// is ordered the same way as a constructed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "UnorderedLookupResult")]
pub struct LookupResult {
    /// The postal code as the user typed it.
    pub postal_code: String,
    representatives: Vec<Representative>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnorderedLookupResult {
    postal_code: String,
    #[serde(default)]
    representatives: Vec<Representative>,
}

impl From<UnorderedLookupResult> for LookupResult {
    fn from(raw: UnorderedLookupResult) -> Self {
        Self::new(raw.postal_code, raw.representatives)
    }
}

impl LookupResult {
    /// Build a result, ordering federal MPs with an email first and the rest
    /// alphabetically by office title.
    pub fn new(postal_code: impl Into<String>, mut representatives: Vec<Representative>) -> Self {
        representatives.sort_by_cached_key(|rep| {
            (
                !(rep.is_federal_mp() && rep.has_email()),
                rep.elected_office.to_lowercase(),
            )
        });
        Self {
            postal_code: postal_code.into(),
            representatives,
        }
    }

    /// A result with no representatives, e.g. for a malformed postal code.
    pub fn empty(postal_code: impl Into<String>) -> Self {
        Self {
            postal_code: postal_code.into(),
            representatives: Vec::new(),
        }
    }

    #[must_use]
    pub fn representatives(&self) -> &[Representative] {
        &self.representatives
    }

    #[must_use]
    pub fn normalized_postal_code(&self) -> String {
        normalize_postal_code(&self.postal_code)
    }

    /// First federal MP with an email address.
    #[must_use]
    pub fn primary_mp(&self) -> Option<&Representative> {
        self.representatives
            .iter()
            .find(|rep| rep.is_federal_mp() && rep.has_email())
    }

    /// Emailable representatives who are not federal MPs.
    #[must_use]
    pub fn cc_recipients(&self) -> Vec<&Representative> {
        self.representatives
            .iter()
            .filter(|rep| rep.has_email() && !rep.is_federal_mp())
            .collect()
    }

    #[must_use]
    pub fn emailable_representatives(&self) -> Vec<&Representative> {
        self.representatives
            .iter()
            .filter(|rep| rep.has_email())
            .collect()
    }

    /// The "to" recipient of a generated email: the primary MP, otherwise
    /// the first emailable representative.
    #[must_use]
    pub fn primary_recipient(&self) -> Option<&Representative> {
        self.primary_mp()
            .or_else(|| self.representatives.iter().find(|rep| rep.has_email()))
    }

    #[must_use]
    pub fn has_any_representatives(&self) -> bool {
        !self.representatives.is_empty()
    }

    #[must_use]
    pub fn has_emailable_representatives(&self) -> bool {
        self.representatives.iter().any(Representative::has_email)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_representative() -> impl Strategy<Value = Representative> {
        (
            "[A-Z][a-z]{1,8}",
            proptest::sample::select(vec!["MP", "Member of Parliament", "MPP", "MLA", "Mayor", "Councillor"]),
            proptest::option::of("[a-z]{1,6}@[a-z]{1,6}\\.ca"),
        )
            .prop_map(|(name, office, email)| {
                let mut rep = Representative::new(name, office);
                rep.email = email;
                rep
            })
    }

    proptest! {
        /// The CC list never includes the primary MP and every view is a
        /// subset of the emailable representatives
        #[test]
        fn cc_and_primary_are_disjoint(reps in proptest::collection::vec(arb_representative(), 0..10)) {
            let result = LookupResult::new("K1A0A6", reps);
            let emailable = result.emailable_representatives();

            if let Some(primary) = result.primary_mp() {
                prop_assert!(!result.cc_recipients().iter().any(|cc| std::ptr::eq(*cc, primary)));
                prop_assert!(emailable.iter().any(|rep| std::ptr::eq(*rep, primary)));
            }
            for cc in result.cc_recipients() {
                prop_assert!(emailable.iter().any(|rep| std::ptr::eq(*rep, cc)));
            }
        }

        /// Lowercase and spaced inputs normalize to the same code
        #[test]
        fn normalization_is_idempotent(code in "[a-zA-Z0-9 ]{0,10}") {
            let once = normalize_postal_code(&code);
            prop_assert_eq!(normalize_postal_code(&once), once.clone());
            prop_assert!(!once.contains(' '));
        }
    }
}
