//! The end-to-end send pipeline: postal code in, `mailto:` link out.
//!
//! Lookup is the only step that performs I/O; everything after it runs
//! against the startup template snapshot.

use std::sync::Arc;

use rand::Rng;
use thiserror::Error;
use voices_targeting::{
    build_mailto, cc_list, template_variables, LookupResult, Representative, TargetingError,
    TemplateCatalog,
};

use crate::represent::{LookupError, RepresentativeLookup};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Targeting(#[from] TargetingError),
}

/// A ready-to-open email for one postal code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedEmail {
    pub mailto: String,
    pub template_id: String,
    pub primary_recipient: Representative,
    pub cc_count: usize,
}

/// Lookup plus the loaded template catalog.
#[derive(Clone)]
pub struct AdvocacyService {
    lookup: RepresentativeLookup,
    catalog: Arc<TemplateCatalog>,
}

impl AdvocacyService {
    pub fn new(lookup: RepresentativeLookup, catalog: Arc<TemplateCatalog>) -> Self {
        Self { lookup, catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// # Errors
    ///
    /// Returns [`LookupError`] when the directory call fails.
    pub async fn lookup(&self, postal_code: &str) -> Result<LookupResult, LookupError> {
        self.lookup.lookup(postal_code).await
    }

    /// Look up `postal_code` and compose the email for its representatives.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Lookup`] when the directory fails,
    /// [`PipelineError::Targeting`] when nobody can be emailed or no
    /// templates are loaded.
    pub async fn generate(
        &self,
        postal_code: &str,
        user_name: Option<&str>,
    ) -> Result<GeneratedEmail, PipelineError> {
        let result = self.lookup.lookup(postal_code).await?;
        Ok(self.compose(&result, user_name)?)
    }

    /// Compose an email for an existing lookup result with the thread-local
    /// RNG.
    ///
    /// # Errors
    ///
    /// See [`AdvocacyService::compose_with`].
    pub fn compose(
        &self,
        result: &LookupResult,
        user_name: Option<&str>,
    ) -> Result<GeneratedEmail, TargetingError> {
        self.compose_with(result, user_name, &mut rand::thread_rng())
    }

    /// Pick the primary recipient, choose a template for them, fill in the
    /// placeholders and assemble the link.
    ///
    /// # Errors
    ///
    /// [`TargetingError::NoEmailableRecipient`] if nobody has an email
    /// address, [`TargetingError::NoTemplatesLoaded`] if the catalog is
    /// empty.
    pub fn compose_with<R: Rng + ?Sized>(
        &self,
        result: &LookupResult,
        user_name: Option<&str>,
        rng: &mut R,
    ) -> Result<GeneratedEmail, TargetingError> {
        let primary = result
            .primary_recipient()
            .ok_or(TargetingError::NoEmailableRecipient)?;

        let template = self.catalog.select_with(primary, rng)?;
        let filled = template.with_variables(template_variables(primary, result, user_name));
        let mailto = build_mailto(result, &filled, user_name)?;

        Ok(GeneratedEmail {
            mailto,
            template_id: template.id.clone(),
            primary_recipient: primary.clone(),
            cc_count: cc_list(result, primary).len(),
        })
    }
}
