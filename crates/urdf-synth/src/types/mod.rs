//! Core type definitions

mod color;
mod inertia;
mod joint;

pub use color::*;
pub use inertia::*;
pub use joint::*;
