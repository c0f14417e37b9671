//! Common utilities for the Wren layout engine.
//!
//! This crate provides shared infrastructure used by all engine components:
//! - **Warning System** - deduplicated diagnostics routed through `log`
//! - **URL Resolution** - resolving `href` values against a document location
//! - **Fetching** - loading documents and style sheets from files, `data:` and HTTP URLs

pub mod net;
pub mod url;
pub mod warning;
