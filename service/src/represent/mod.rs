//! Directory lookup against the Open North Represent API.
//!
//! # Architecture
//!
//! - [`RepresentativeDirectory`] - Trait for fetching raw records by postal code
//! - [`HttpRepresentClient`] - Real HTTP implementation using reqwest
//! - [`mock::MockDirectory`] - Mock for unit tests (behind `test-utils` feature)
//! - [`RepresentativeLookup`] - Normalizes and validates the postal code, then
//!   turns raw records into an ordered [`voices_targeting::LookupResult`]
//!
//! # Testing Patterns
//!
//! ```ignore
//! use voices_api::represent::{mock::MockDirectory, RepresentativeLookup};
//!
//! let directory = Arc::new(MockDirectory::returning(vec![record]));
//! let lookup = RepresentativeLookup::new(directory.clone());
//! let result = lookup.lookup("k1a 0a6").await?;
//! assert_eq!(directory.calls(), ["K1A0A6"]);
//! ```

mod client;
mod lookup;
mod types;

pub use client::{
    HttpRepresentClient, LookupError, RepresentativeDirectory, MAX_ERROR_BODY_BYTES,
};
pub use lookup::RepresentativeLookup;
pub use types::{PostcodeResponse, RawRepresentative, RepresentativeExtra};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;
