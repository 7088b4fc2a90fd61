//! Rank players against weighted role definitions.
//!
//! A [`roles::RoleCatalog`] holds roles as attribute weights, a
//! [`players::PlayerDataset`] holds normalized player rows, and
//! [`scoring::rank_roles`] filters, scores and ranks the dataset once per
//! selected role.

pub mod config;
pub mod error;
pub mod output;
pub mod players;
pub mod roles;
pub mod scoring;

pub use error::{DefinitionError, ExportError, ImportError, UnscoreableRole};
