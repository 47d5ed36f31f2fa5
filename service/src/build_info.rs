use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

const UNKNOWN: &str = "unknown";

/// Build metadata served at `/api/v1/build-info` and logged at startup.
///
/// Resolved from `APP_VERSION` (or `VERSION`), `GIT_SHA`, `BUILD_TIME` and
/// `BUILD_MESSAGE`, all set by the release pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    /// Release version, `dev` for local builds
    pub version: String,
    pub git_sha: String,
    /// RFC 3339 UTC timestamp or `unknown`
    pub build_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BuildInfo {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve through `lookup` instead of the process environment.
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            version: var("APP_VERSION")
                .or_else(|| var("VERSION"))
                .unwrap_or_else(|| "dev".into()),
            git_sha: var("GIT_SHA").unwrap_or_else(|| UNKNOWN.into()),
            build_time: var("BUILD_TIME")
                .as_deref()
                .and_then(utc_timestamp)
                .unwrap_or_else(|| UNKNOWN.into()),
            message: var("BUILD_MESSAGE"),
        }
    }
}

/// RFC 3339 in UTC. A missing zone designator is read as UTC.
fn utc_timestamp(value: &str) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_rfc3339(&format!("{value}Z")))
        .ok()?;
    Some(parsed.with_timezone(&Utc).to_rfc3339())
}
