//! Release workflows

mod previous_version;
mod publish;

pub use previous_version::*;
pub use publish::*;
