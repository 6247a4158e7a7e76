//! Single test binary entry point.
//!
//! - helpers: shared fixtures
//! - scenarios: end-to-end controller workflows driven through the scene toolkit
//! - selection: selection, palette and vertex-deletion properties

mod helpers;
mod scenarios;
mod selection;
