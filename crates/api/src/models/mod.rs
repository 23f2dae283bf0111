pub mod graph;
pub mod metadata;
pub mod mixin;
pub mod module;
pub mod relationship;
pub mod symbol;
pub mod version;

pub use graph::*;
pub use metadata::*;
pub use mixin::*;
pub use module::*;
pub use relationship::*;
pub use symbol::*;
pub use version::*;
