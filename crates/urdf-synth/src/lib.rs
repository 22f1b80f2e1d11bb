//! URDF synthesis from CAD assemblies
//!
//! This crate turns a snapshot of a CAD assembly into a URDF document:
//! - Snapshot: read-only bodies and joints captured from the CAD host
//! - Resolver: absolute link positions and relative joint origins
//! - Material: deduplicated visual materials
//! - Entity: link, joint and transmission fragments
//! - Document: assembly of the fragments under one `<robot>` root
//! - Export: staged, all-or-nothing write of the final document

pub mod config;
pub mod document;
pub mod entity;
pub mod error;
pub mod export;
pub mod material;
pub mod resolver;
pub mod snapshot;
pub mod types;
mod xml;

pub use config::*;
pub use document::*;
pub use entity::*;
pub use error::*;
pub use export::*;
pub use material::*;
pub use resolver::*;
pub use snapshot::*;
pub use types::*;
