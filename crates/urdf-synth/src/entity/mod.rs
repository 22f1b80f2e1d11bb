//! Link and joint records ready for document emission

mod joint;
mod link;

pub use joint::*;
pub use link::*;
