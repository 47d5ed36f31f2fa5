/// Failures of the targeting pipeline.
///
/// Classification and ideology resolution never fail; only template
/// selection and link assembly can.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetingError {
    /// Template selection ran against an empty template set.
    #[error("no email templates are loaded")]
    NoTemplatesLoaded,

    /// The lookup result has no representative with an email address.
    #[error("no representative found for this address")]
    NoEmailableRecipient,
}
