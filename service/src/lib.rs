//! Voices API: look up a postal code's elected representatives and build a
//! pre-filled `mailto:` link addressed to them.
//!
//! The targeting rules live in `voices-targeting`; this crate adds the
//! Represent directory client, template storage, configuration and the HTTP
//! surface.

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

pub mod build_info;
pub mod config;
pub mod http;
pub mod pipeline;
pub mod represent;
pub mod rest;
pub mod templates;
