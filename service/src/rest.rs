//! REST API handlers and `OpenAPI` documentation.
//!
//! Handlers take the shared [`AdvocacyService`] from an `Extension` layer and
//! render failures as RFC 7807 [`ProblemDetails`].

// The OpenApi derive macro generates code that triggers this lint
#![allow(clippy::needless_for_each)]

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::{IntoParams, OpenApi, ToSchema};
use voices_targeting::{
    EmailTemplate, Level, LookupResult, PoliticalIdeology, Representative, TargetingError,
    TemplateCatalog,
};

use crate::build_info::BuildInfo;
use crate::pipeline::{AdvocacyService, GeneratedEmail, PipelineError};

/// Serialize a `StatusCode` as its `u16` representation.
#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires `&T` signature
fn serialize_status_code<S: Serializer>(status: &StatusCode, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u16(status.as_u16())
}

// ─── Problem Details ────────────────────────────────────────────────────────

/// RFC 7807 Problem Details error response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    /// URI reference identifying the problem type
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short human-readable summary
    pub title: String,
    /// HTTP status code
    #[serde(serialize_with = "serialize_status_code")]
    #[schema(value_type = u16)]
    pub status: StatusCode,
    /// Human-readable explanation specific to this occurrence
    pub detail: String,
    /// URI reference identifying the specific occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ProblemExtensions>,
}

/// Machine-readable error code and offending field.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemExtensions {
    /// Stable error code, e.g. `NO_REPRESENTATIVE_FOUND`
    pub code: String,
    /// Field that caused the error (for validation errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ProblemDetails {
    fn new(status: StatusCode, slug: &str, title: &str, detail: &str, code: &str) -> Self {
        Self {
            problem_type: format!("/errors/{slug}"),
            title: title.to_string(),
            status,
            detail: detail.to_string(),
            instance: None,
            extensions: Some(ProblemExtensions {
                code: code.to_string(),
                field: None,
            }),
        }
    }

    /// Create an internal server error response.
    #[must_use]
    pub fn internal_error(detail: &str) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal",
            "Internal Server Error",
            detail,
            "INTERNAL_ERROR",
        )
    }

    /// Nobody at the address can be emailed.
    #[must_use]
    pub fn no_representative() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "no-representative",
            "Not Found",
            &TargetingError::NoEmailableRecipient.to_string(),
            "NO_REPRESENTATIVE_FOUND",
        )
    }

    /// The representative directory could not be reached or answered badly.
    #[must_use]
    pub fn lookup_failed(detail: &str) -> Self {
        Self::new(
            StatusCode::BAD_GATEWAY,
            "lookup-failed",
            "Bad Gateway",
            detail,
            "LOOKUP_FAILED",
        )
    }

    /// A query or body field has an unusable value.
    #[must_use]
    pub fn invalid_field(field: &str, detail: &str) -> Self {
        let mut problem = Self::new(
            StatusCode::BAD_REQUEST,
            "validation",
            "Bad Request",
            detail,
            "VALIDATION_ERROR",
        );
        if let Some(ext) = problem.extensions.as_mut() {
            ext.field = Some(field.to_string());
        }
        problem
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<PipelineError> for ProblemDetails {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Lookup(err) => {
                tracing::error!(error = %err, "representative directory unavailable");
                Self::lookup_failed("the representative directory could not be reached")
            }
            PipelineError::Targeting(TargetingError::NoEmailableRecipient) => {
                Self::no_representative()
            }
            PipelineError::Targeting(err @ TargetingError::NoTemplatesLoaded) => {
                tracing::error!(error = %err, "mailto requested without templates");
                Self::internal_error(&err.to_string())
            }
        }
    }
}

// ─── Response types ─────────────────────────────────────────────────────────

/// A representative with its derived classification.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepresentativeView {
    pub name: String,
    pub elected_office: String,
    pub email: Option<String>,
    pub district_name: Option<String>,
    pub party: Option<String>,
    pub url: Option<String>,
    pub gender: Option<String>,
    pub preferred_languages: Vec<String>,
    /// `Federal`, `Provincial` or `Municipal`
    pub level: String,
    /// Ideology resolved from the party name
    pub ideology: String,
    pub is_federal_mp: bool,
    pub has_email: bool,
    /// `en` or `fr`
    pub preferred_language_code: String,
    /// `Mr.`, `Ms.` or empty
    pub honorific: String,
}

impl RepresentativeView {
    fn new(rep: &Representative, catalog: &TemplateCatalog) -> Self {
        Self {
            name: rep.name.clone(),
            elected_office: rep.elected_office.clone(),
            email: rep.email.clone(),
            district_name: rep.district_name.clone(),
            party: rep.party.clone(),
            url: rep.url.clone(),
            gender: rep.gender.clone(),
            preferred_languages: rep.preferred_languages.clone(),
            level: rep.level().to_string(),
            ideology: catalog.ideology_for(rep.party.as_deref()).to_string(),
            is_federal_mp: rep.is_federal_mp(),
            has_email: rep.has_email(),
            preferred_language_code: rep.preferred_language_code().to_string(),
            honorific: rep.honorific().to_string(),
        }
    }
}

/// Representatives found for a postal code.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    /// Postal code as submitted
    pub postal_code: String,
    /// Whitespace-free uppercase form
    pub normalized_postal_code: String,
    /// Federal MP with email first, then by office
    pub representatives: Vec<RepresentativeView>,
    pub primary_mp: Option<RepresentativeView>,
    pub cc_recipients: Vec<RepresentativeView>,
}

impl LookupResponse {
    fn new(result: &LookupResult, catalog: &TemplateCatalog) -> Self {
        let view = |rep: &Representative| RepresentativeView::new(rep, catalog);
        Self {
            postal_code: result.postal_code.clone(),
            normalized_postal_code: result.normalized_postal_code(),
            representatives: result.representatives().iter().map(view).collect(),
            primary_mp: result.primary_mp().map(view),
            cc_recipients: result.cc_recipients().into_iter().map(view).collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MailtoRequest {
    /// Canadian postal code, any case and spacing
    pub postal_code: String,
    /// Sender name for the signature
    #[serde(default)]
    pub user_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MailtoResponse {
    /// Percent-encoded `mailto:` URI
    pub mailto: String,
    /// Template chosen for the primary recipient
    pub template_id: String,
    pub primary_recipient: RepresentativeView,
    pub cc_count: usize,
}

impl MailtoResponse {
    fn new(email: GeneratedEmail, catalog: &TemplateCatalog) -> Self {
        Self {
            primary_recipient: RepresentativeView::new(&email.primary_recipient, catalog),
            mailto: email.mailto,
            template_id: email.template_id,
            cc_count: email.cc_count,
        }
    }
}

/// A loaded template without its body.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: String,
    pub file_name: String,
    pub subject: String,
    pub level: Option<String>,
    pub ideology: Option<String>,
    pub language: String,
    pub tags: Vec<String>,
    /// Descriptive only; selection follows the cascade
    pub specificity_score: u8,
}

impl From<&EmailTemplate> for TemplateSummary {
    fn from(template: &EmailTemplate) -> Self {
        let targeting = &template.targeting;
        Self {
            id: template.id.clone(),
            file_name: template.file_name.clone(),
            subject: template.subject.clone(),
            level: targeting.level.map(|level| level.to_string()),
            ideology: targeting.ideology.map(|ideology| ideology.to_string()),
            language: targeting.language.clone(),
            tags: targeting.tags.clone(),
            specificity_score: targeting.specificity_score(),
        }
    }
}

// ─── Query parameters ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RepresentativesQuery {
    /// Canadian postal code, any case and spacing
    pub postal_code: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TemplatesQuery {
    /// `federal`, `provincial` or `municipal`
    pub level: Option<String>,
    /// Ideology name, e.g. `liberal`
    pub ideology: Option<String>,
    /// Language code (default `en`)
    pub language: Option<String>,
}

// ─── OpenAPI ────────────────────────────────────────────────────────────────

/// `OpenAPI` documentation for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Voices API",
        version = "1.0.0",
        description = "Find your representatives and write to them",
        license(name = "MIT")
    ),
    servers(
        (url = "/api/v1", description = "REST API v1")
    ),
    paths(get_representatives, create_mailto, list_templates, get_build_info),
    components(schemas(
        BuildInfo,
        LookupResponse,
        MailtoRequest,
        MailtoResponse,
        ProblemDetails,
        ProblemExtensions,
        RepresentativeView,
        TemplateSummary
    ))
)]
pub struct ApiDoc;

/// Routes served under `/api/v1`.
pub fn router() -> Router {
    Router::new()
        .route("/representatives", get(get_representatives))
        .route("/mailto", post(create_mailto))
        .route("/templates", get(list_templates))
        .route("/build-info", get(get_build_info))
}

// ─── Handlers ───────────────────────────────────────────────────────────────

/// Look up representatives
///
/// A malformed postal code yields an empty result, not an error.
///
/// # Errors
///
/// Returns `ProblemDetails` when the representative directory fails.
#[utoipa::path(
    get,
    path = "/representatives",
    tag = "Representatives",
    params(RepresentativesQuery),
    responses(
        (status = 200, description = "Representatives for the postal code", body = LookupResponse),
        (status = 502, description = "Representative directory unavailable", body = ProblemDetails)
    )
)]
pub async fn get_representatives(
    Extension(service): Extension<AdvocacyService>,
    Query(query): Query<RepresentativesQuery>,
) -> Result<Json<LookupResponse>, ProblemDetails> {
    let result = service
        .lookup(&query.postal_code)
        .await
        .map_err(|err| ProblemDetails::from(PipelineError::from(err)))?;
    Ok(Json(LookupResponse::new(&result, service.catalog())))
}

/// Generate a mailto link
///
/// Runs the whole pipeline for the postal code and returns a link addressed
/// to the primary representative with everyone else emailable in CC.
///
/// # Errors
///
/// Returns `ProblemDetails` when nobody can be emailed or the directory fails.
#[utoipa::path(
    post,
    path = "/mailto",
    tag = "Mailto",
    request_body = MailtoRequest,
    responses(
        (status = 200, description = "Mailto link generated", body = MailtoResponse),
        (status = 404, description = "No representative found for this address", body = ProblemDetails),
        (status = 500, description = "No templates loaded", body = ProblemDetails),
        (status = 502, description = "Representative directory unavailable", body = ProblemDetails)
    )
)]
pub async fn create_mailto(
    Extension(service): Extension<AdvocacyService>,
    Json(request): Json<MailtoRequest>,
) -> Result<Json<MailtoResponse>, ProblemDetails> {
    let email = service
        .generate(&request.postal_code, request.user_name.as_deref())
        .await?;
    Ok(Json(MailtoResponse::new(email, service.catalog())))
}

/// List templates
///
/// Every template applicable to the filters, without random selection.
/// Templates with no level or ideology match any filter value.
///
/// # Errors
///
/// Returns `ProblemDetails` for an unknown level or ideology.
#[utoipa::path(
    get,
    path = "/templates",
    tag = "Templates",
    params(TemplatesQuery),
    responses(
        (status = 200, description = "Matching templates", body = Vec<TemplateSummary>),
        (status = 400, description = "Unknown filter value", body = ProblemDetails)
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn list_templates(
    Extension(service): Extension<AdvocacyService>,
    Query(query): Query<TemplatesQuery>,
) -> Result<Json<Vec<TemplateSummary>>, ProblemDetails> {
    let level = query
        .level
        .as_deref()
        .map(str::parse::<Level>)
        .transpose()
        .map_err(|err| ProblemDetails::invalid_field("level", &err.to_string()))?;
    let ideology = query
        .ideology
        .as_deref()
        .map(str::parse::<PoliticalIdeology>)
        .transpose()
        .map_err(|err| ProblemDetails::invalid_field("ideology", &err.to_string()))?;
    let language = query.language.as_deref().unwrap_or("en");

    let templates = service
        .catalog()
        .get_templates(level, ideology, language)
        .into_iter()
        .map(TemplateSummary::from)
        .collect();
    Ok(Json(templates))
}

/// Get build information
///
/// Returns metadata about the running service including version, git SHA, and build time.
///
/// # Errors
///
/// Returns `ProblemDetails` on internal server errors.
#[utoipa::path(
    get,
    path = "/build-info",
    tag = "System",
    responses(
        (status = 200, description = "Build information retrieved successfully", body = BuildInfo),
        (status = 500, description = "Internal server error", body = ProblemDetails)
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn get_build_info(
    Extension(build_info): Extension<BuildInfo>,
) -> Result<Json<BuildInfo>, ProblemDetails> {
    Ok(Json(build_info))
}
