use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::json;
use tokio::fs;
use voices_targeting::{EmailTemplate, PartyMapping, TemplateCatalog, TemplateTargeting};

use super::defaults::{DEFAULT_TAGS, DEFAULT_TEMPLATES};
use super::TemplateStoreError;
use crate::config::TemplatesConfig;

/// On-disk shape of one template file.
#[derive(Debug, Deserialize)]
struct TemplateFile {
    #[serde(default, alias = "Id")]
    id: Option<String>,
    #[serde(alias = "Subject")]
    subject: String,
    #[serde(alias = "Body")]
    body: String,
    #[serde(default, alias = "Targeting")]
    targeting: TemplateTargeting,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> TemplateStoreError + '_ {
    move |source| TemplateStoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Parse one template file. `file_name` becomes the template's provenance
/// and, without an explicit `id`, its stem becomes the id.
///
/// # Errors
///
/// Returns [`TemplateStoreError::Parse`] for malformed JSON or a missing
/// `subject`/`body`.
pub fn parse_template(file_name: &str, contents: &str) -> Result<EmailTemplate, TemplateStoreError> {
    let file: TemplateFile =
        serde_json::from_str(contents).map_err(|source| TemplateStoreError::Parse {
            file: file_name.to_string(),
            source,
        })?;

    let id = file
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| {
            Path::new(file_name)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| file_name.to_string())
        });

    Ok(EmailTemplate::new(id, file_name, file.subject, file.body).with_targeting(file.targeting))
}

async fn json_files(dir: &Path) -> Result<Vec<PathBuf>, TemplateStoreError> {
    let mut entries = fs::read_dir(dir).await.map_err(io_error(dir))?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io_error(dir))? {
        let path = entry.path();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let is_file = entry.file_type().await.map_err(io_error(&path))?.is_file();
        if is_json && is_file {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Write the default letters into `dir`.
///
/// # Errors
///
/// Returns [`TemplateStoreError::Io`] if a file cannot be written.
pub async fn seed_default_templates(dir: &Path) -> Result<(), TemplateStoreError> {
    for (file_name, subject, body) in DEFAULT_TEMPLATES {
        let contents = json!({
            "subject": subject,
            "body": body,
            "targeting": { "language": "en", "tags": DEFAULT_TAGS },
        });
        let path = dir.join(file_name);
        let pretty = serde_json::to_string_pretty(&contents).map_err(|source| {
            TemplateStoreError::Parse {
                file: file_name.to_string(),
                source,
            }
        })?;
        fs::write(&path, pretty).await.map_err(io_error(&path))?;
        tracing::info!(file = file_name, "created default template");
    }
    Ok(())
}

/// Load every `*.json` template in `dir`, sorted by file name.
///
/// A missing directory is created, and an empty one seeded, with the
/// default templates. Files that fail to parse are logged and skipped.
///
/// # Errors
///
/// Returns [`TemplateStoreError::Io`] when the directory cannot be read or
/// seeded and [`TemplateStoreError::Empty`] when no file could be loaded.
pub async fn load_templates(dir: &Path) -> Result<Vec<EmailTemplate>, TemplateStoreError> {
    if !fs::try_exists(dir).await.map_err(io_error(dir))? {
        tracing::warn!(dir = %dir.display(), "templates directory not found, creating it with default templates");
        fs::create_dir_all(dir).await.map_err(io_error(dir))?;
        seed_default_templates(dir).await?;
    }

    let mut files = json_files(dir).await?;
    if files.is_empty() {
        tracing::warn!(dir = %dir.display(), "no template files found, creating default templates");
        seed_default_templates(dir).await?;
        files = json_files(dir).await?;
    }

    let mut templates = Vec::with_capacity(files.len());
    for path in files {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let loaded = match fs::read_to_string(&path).await {
            Ok(contents) => parse_template(&file_name, &contents),
            Err(source) => Err(TemplateStoreError::Io {
                path: path.clone(),
                source,
            }),
        };

        match loaded {
            Ok(template) => {
                tracing::debug!(file = %file_name, id = %template.id, "loaded template");
                templates.push(template);
            }
            Err(err) => tracing::error!(file = %path.display(), error = %err, "failed to load template file"),
        }
    }

    if templates.is_empty() {
        return Err(TemplateStoreError::Empty {
            dir: dir.to_path_buf(),
        });
    }

    tracing::info!(count = templates.len(), "loaded email templates");
    Ok(templates)
}

/// Load the party grouping table. Never fails: a missing or malformed file
/// yields an empty table, which resolves every party to Independent.
pub async fn load_party_mapping(path: &Path) -> PartyMapping {
    let contents = match fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(err) => {
            tracing::warn!(file = %path.display(), error = %err, "party mapping unavailable, using an empty table");
            return PartyMapping::empty();
        }
    };

    match serde_json::from_str::<PartyMapping>(&contents) {
        Ok(mapping) => {
            tracing::info!(groups = mapping.groups().len(), "loaded party mapping");
            mapping
        }
        Err(err) => {
            tracing::warn!(file = %path.display(), error = %err, "party mapping is malformed, using an empty table");
            PartyMapping::empty()
        }
    }
}

/// Load the read-only template snapshot the service runs with.
///
/// # Errors
///
/// Propagates [`load_templates`] failures; the party mapping never fails.
pub async fn load_catalog(config: &TemplatesConfig) -> Result<TemplateCatalog, TemplateStoreError> {
    let templates = load_templates(&config.dir).await?;
    let party_mapping = load_party_mapping(&config.party_mapping_file).await;
    Ok(TemplateCatalog::new(templates, party_mapping))
}
