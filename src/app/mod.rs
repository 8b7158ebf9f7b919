//! Application module - dashboard sessions and the pages they render.
//!
//! This module is organized into several submodules:
//! - `profile` - Dashboard presets (title, chart kinds, upload formats)
//! - `pages` - Page enum and the content model for each page
//! - `session` - The session-scoped context holding the active dataset

mod pages;
mod profile;
mod session;

pub use pages::*;
pub use profile::DashboardProfile;
pub use session::{Session, SessionError};
