//! Test app builder that mirrors main.rs wiring with injectable mocks.
//!
//! ```ignore
//! use crate::common::app_builder::TestAppBuilder;
//!
//! let app = TestAppBuilder::with_mocks()
//!     .with_directory(Arc::new(MockDirectory::returning(records)))
//!     .build();
//! // Use app.oneshot(...) to send requests
//! ```
//!
//! # Preset Builders
//!
//! - [`TestAppBuilder::minimal()`] - Health check only
//! - [`TestAppBuilder::with_mocks()`] - Full app with an empty mock directory

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use voices_api::{
    build_info::BuildInfo,
    config::SecurityHeadersConfig,
    http::{cors_layer, health_check, with_security_headers},
    pipeline::AdvocacyService,
    represent::{mock::MockDirectory, RepresentativeDirectory, RepresentativeLookup},
    rest::{self, ApiDoc},
};
use voices_targeting::TemplateCatalog;

/// Builder for test applications that mirrors main.rs wiring.
pub struct TestAppBuilder {
    include_rest: bool,
    include_swagger: bool,
    directory: Arc<dyn RepresentativeDirectory>,
    catalog: TemplateCatalog,
    build_info: Option<BuildInfo>,
    /// CORS allowed origins (None means no CORS layer)
    cors_origins: Option<Vec<String>>,
    /// Security headers config (None means disabled)
    security_headers: Option<SecurityHeadersConfig>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            include_rest: false,
            include_swagger: false,
            directory: Arc::new(MockDirectory::new()),
            catalog: super::catalog(),
            build_info: None,
            cors_origins: None,
            security_headers: None,
        }
    }

    // ─── Presets ────────────────────────────────────────────────────────────

    /// Health check only.
    #[must_use]
    pub fn minimal() -> Self {
        Self::new()
    }

    /// All routes, CORS for `http://localhost:3000` and default security
    /// headers, backed by an empty mock directory and the fixture catalog.
    #[must_use]
    pub fn with_mocks() -> Self {
        Self::new()
            .with_rest()
            .with_swagger()
            .with_cors(&["http://localhost:3000"])
            .with_security_headers_default()
    }

    // ─── Components ─────────────────────────────────────────────────────────

    /// Include REST API routes (/api/v1/*).
    #[must_use]
    pub fn with_rest(mut self) -> Self {
        self.include_rest = true;
        self
    }

    /// Include Swagger UI (/swagger-ui) and the `OpenAPI` document.
    #[must_use]
    pub fn with_swagger(mut self) -> Self {
        self.include_swagger = true;
        self
    }

    #[must_use]
    pub fn with_directory(mut self, directory: Arc<dyn RepresentativeDirectory>) -> Self {
        self.directory = directory;
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: TemplateCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn with_build_info(mut self, build_info: BuildInfo) -> Self {
        self.build_info = Some(build_info);
        self
    }

    /// Pass an empty slice to block all cross-origin requests, `&["*"]` to
    /// allow any origin.
    #[must_use]
    pub fn with_cors(mut self, origins: &[&str]) -> Self {
        self.cors_origins = Some(origins.iter().map(|s| (*s).to_string()).collect());
        self
    }

    #[must_use]
    pub fn with_security_headers_default(mut self) -> Self {
        self.security_headers = Some(SecurityHeadersConfig::default());
        self
    }

    #[must_use]
    pub fn with_security_headers(mut self, config: SecurityHeadersConfig) -> Self {
        self.security_headers = Some(config);
        self
    }

    // ─── Build ──────────────────────────────────────────────────────────────

    /// Build the Axum router with main.rs layer ordering: routes, then
    /// extensions, CORS, and security headers outermost.
    #[must_use]
    pub fn build(self) -> Router {
        let build_info = self.build_info.unwrap_or_else(BuildInfo::from_env);
        let service = AdvocacyService::new(
            RepresentativeLookup::new(self.directory),
            Arc::new(self.catalog),
        );

        let mut app = Router::new();
        if self.include_rest {
            app = app.nest("/api/v1", rest::router());
        }
        app = app.route("/health", get(health_check));
        if self.include_swagger {
            app = app.merge(
                SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
            );
        }

        app = app.layer(Extension(service)).layer(Extension(build_info));

        if let Some(origins) = self.cors_origins {
            app = app.layer(cors_layer(&origins));
        }

        if let Some(config) = self.security_headers {
            app = with_security_headers(app, &config);
        }

        app
    }
}
