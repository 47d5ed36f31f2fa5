//! Wire types for the Open North Represent API.
//!
//! Only the fields the targeting pipeline reads are modelled; everything
//! else in the response is ignored.

use serde::{Deserialize, Serialize};
use voices_targeting::Representative;

/// Response of `GET /postcodes/{code}/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostcodeResponse {
    /// Representatives whose boundary contains the postcode centroid.
    #[serde(default)]
    pub representatives_centroid: Option<Vec<RawRepresentative>>,
    /// Representatives matched through Elections Canada concordance.
    #[serde(default)]
    pub representatives_concordance: Option<Vec<RawRepresentative>>,
}

impl PostcodeResponse {
    /// Centroid and concordance lists merged, keeping the first record for
    /// each `(name, elected_office)` pair.
    #[must_use]
    pub fn into_representatives(self) -> Vec<RawRepresentative> {
        let mut merged: Vec<RawRepresentative> = Vec::new();
        let all = self
            .representatives_centroid
            .into_iter()
            .flatten()
            .chain(self.representatives_concordance.into_iter().flatten());

        for raw in all {
            let seen = merged
                .iter()
                .any(|kept| kept.name == raw.name && kept.elected_office == raw.elected_office);
            if !seen {
                merged.push(raw);
            }
        }
        merged
    }
}

/// One representative record as the directory returns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRepresentative {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub elected_office: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub district_name: Option<String>,
    #[serde(default)]
    pub party_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub personal_url: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub extra: Option<RepresentativeExtra>,
}

/// Free-form `extra` object; only the language list is read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentativeExtra {
    #[serde(default)]
    pub preferred_languages: Vec<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RawRepresentative {
    /// Convert into the pipeline's model.
    ///
    /// Records without a name or an elected office are unusable and yield
    /// `None`.
    #[must_use]
    pub fn into_representative(self) -> Option<Representative> {
        let name = non_blank(self.name)?;
        let elected_office = non_blank(self.elected_office)?;

        let mut representative = Representative::new(name, elected_office);
        representative.email = non_blank(self.email);
        representative.district_name = self.district_name;
        representative.party = non_blank(self.party_name);
        representative.url = non_blank(self.personal_url).or_else(|| non_blank(self.url));
        representative.gender = non_blank(self.gender);
        representative.preferred_languages = self
            .extra
            .map(|extra| extra.preferred_languages)
            .unwrap_or_default();
        Some(representative)
    }
}
