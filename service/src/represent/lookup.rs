use std::sync::Arc;

use voices_targeting::{is_valid_postal_code, normalize_postal_code, LookupResult};

use super::client::{LookupError, RepresentativeDirectory};
use super::types::RawRepresentative;

/// Postal code → ordered [`LookupResult`], with input validation in front of
/// the directory.
#[derive(Clone)]
pub struct RepresentativeLookup {
    directory: Arc<dyn RepresentativeDirectory>,
}

impl RepresentativeLookup {
    pub fn new(directory: Arc<dyn RepresentativeDirectory>) -> Self {
        Self { directory }
    }

    /// Look up the representatives for `postal_code` as the user typed it.
    ///
    /// A malformed code is not an error: it is logged and answered with an
    /// empty result without contacting the directory. Dropping the returned
    /// future cancels the outbound request.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the directory call fails.
    pub async fn lookup(&self, postal_code: &str) -> Result<LookupResult, LookupError> {
        let normalized = normalize_postal_code(postal_code);

        if !is_valid_postal_code(&normalized) {
            tracing::warn!(postal_code, "invalid postal code format");
            return Ok(LookupResult::empty(postal_code));
        }

        tracing::info!(postal_code = %normalized, "looking up representatives");

        let records = self
            .directory
            .fetch_postcode(&normalized)
            .await
            .inspect_err(|err| {
                tracing::error!(postal_code = %normalized, error = %err, "representative lookup failed");
            })?;

        let representatives: Vec<_> = records
            .into_iter()
            .filter_map(RawRepresentative::into_representative)
            .collect();

        tracing::info!(
            postal_code = %normalized,
            count = representatives.len(),
            "found representatives"
        );

        Ok(LookupResult::new(postal_code, representatives))
    }
}
