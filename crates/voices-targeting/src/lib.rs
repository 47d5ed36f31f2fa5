//! Targeting pipeline for Voices advocacy emails.
//!
//! Turns the representatives returned for a postal code into a ready-to-send
//! `mailto:` link:
//!
//! 1. [`Representative`] classifies each raw directory record into a
//!    government [`Level`], a language preference and an honorific.
//! 2. [`PartyMapping`] resolves a free-text party name into a
//!    [`PoliticalIdeology`].
//! 3. [`matcher`] picks the best-matching [`EmailTemplate`] for a
//!    representative through a specificity cascade, choosing at random among
//!    equally good candidates.
//! 4. [`build_mailto`] assembles the primary recipient, the CC list, subject
//!    and body into a percent-encoded URI.
//!
//! Everything in this crate is pure and synchronous. Fetching representatives
//! and loading templates from storage belong to the caller.
//!
//! # Example
//!
//! ```ignore
//! use voices_targeting::{build_mailto, LookupResult, TemplateCatalog};
//!
//! let result = LookupResult::new("K1A 0A6", representatives);
//! let primary = result.primary_recipient().ok_or(TargetingError::NoEmailableRecipient)?;
//! let template = catalog.select(primary)?;
//! let mailto = build_mailto(&result, template, None)?;
//! ```

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

mod error;
pub mod ideology;
pub mod lookup;
pub mod mailto;
pub mod matcher;
pub mod representative;
pub mod template;

pub use error::TargetingError;
pub use ideology::{IdeologyGroup, PartyMapping, PoliticalIdeology};
pub use lookup::{is_valid_postal_code, normalize_postal_code, LookupResult};
pub use mailto::{build_mailto, cc_list, format_recipient, template_variables};
pub use matcher::{get_templates, select_template, Candidates, MatchStep, TargetProfile, TemplateCatalog};
pub use representative::{Level, Representative};
pub use template::{EmailTemplate, TemplateTargeting};
