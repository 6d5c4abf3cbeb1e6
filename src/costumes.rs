//! Costume selection and asset redirection for party members.
//!
//! The catalog lists every costume we know about. The settings decide which of those are enabled
//! (the active registry) and the catalog's mod costumes declare overrides. Each time the game sets
//! a costume, the resolver picks the costume actually worn; once, when the costume item table is
//! loaded, the registration pass gives our costumes item entries and redirects mod costume assets.

pub mod assets;
pub mod catalog;
mod costume;
pub mod defaults;
mod hooks;
pub mod music;
pub mod overrides;
pub mod policy;
pub mod redirect;
pub mod registration;
pub mod registry;
pub mod resolve;
mod service;

pub use costume::{Costume, CostumeConfig, CostumeDefinition, CostumeSource};
pub use hooks::{CostumeHooks, TableSetup};
pub use service::{CostumeService, Host};
