//! Command implementations for wasmpak CLI

pub mod build;
pub mod clean;
pub mod completions;
pub mod helpers;
pub mod inspect;
pub mod version;
