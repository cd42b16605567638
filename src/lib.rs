//! Findcomp - find assets that use a component type.
//!
//! Findcomp is a CLI tool and library for locating every asset in an engine
//! project snapshot whose dependency closure includes the script defining a
//! given component type, and for extracting the attached instances of that
//! type from composite documents.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands and output)
//! - `config`: Configuration file loading and parsing
//! - `core`: Type registry, searchable catalog, and dependency matcher

pub mod cli;
pub mod config;
pub mod core;
