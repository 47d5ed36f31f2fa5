//! Template storage: JSON files on disk plus the party grouping table.
//!
//! Everything here runs once at startup. The resulting
//! [`voices_targeting::TemplateCatalog`] is shared read-only afterwards.

mod defaults;
mod loader;

use std::path::PathBuf;

use thiserror::Error;

pub use defaults::DEFAULT_TEMPLATES;
pub use loader::{
    load_catalog, load_party_mapping, load_templates, parse_template, seed_default_templates,
};

/// Errors raised while loading templates from disk.
#[derive(Debug, Error)]
pub enum TemplateStoreError {
    #[error("template storage I/O failed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("template file {file} is invalid: {source}")]
    Parse {
        file: String,
        source: serde_json::Error,
    },

    /// Nothing usable was found; the service cannot select templates.
    #[error("no email templates could be loaded from {}", dir.display())]
    Empty { dir: PathBuf },
}
