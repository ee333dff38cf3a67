//! Transit API - Shared types between the navigation core, its renderers, and
//! the routing layer.

mod directive;
mod intent;
mod path;
mod touch;

pub use directive::*;
pub use intent::*;
pub use path::*;
pub use touch::*;
