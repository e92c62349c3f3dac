//! Layers that can be attached to a Launchkey by name.

mod base;
mod mastervol;

pub use base::BaseLayer;
pub use mastervol::MasterVolLayer;

use crate::error::{Error, Result};
use crate::launchkey::Layer;

/// Identifiers accepted in the `layers` config list.
pub const KNOWN: [&str; 2] = ["base", "mastervol"];

pub fn is_known(id: &str) -> bool {
    KNOWN.contains(&id)
}

pub fn build(id: &str) -> Result<Box<dyn Layer>> {
    match id {
        "base" => Ok(Box::new(BaseLayer::new())),
        "mastervol" => Ok(Box::new(MasterVolLayer::new())),
        other => Err(Error::UnknownLayer(other.to_owned())),
    }
}

/// Build every layer in `ids`, keeping their order.
pub fn build_all<S: AsRef<str>>(ids: &[S]) -> Result<Vec<Box<dyn Layer>>> {
    ids.iter().map(|id| build(id.as_ref())).collect()
}
