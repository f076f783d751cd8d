//! # contentgraph-core
//!
//! Content model shared by every ContentGraph crate: content references,
//! locale tags, content-type descriptors and the content nodes returned by
//! repositories.

pub mod descriptor;
pub mod error;
pub mod locale;
pub mod node;
pub mod reference;

pub use descriptor::{
    ContentTypeDescriptor, FieldDescriptor, FieldKind, ModelDescriptor, ModelId, ModelKind,
    ScalarKind,
};
pub use error::{CoreError, Result};
pub use locale::Locale;
pub use node::{ContentNode, PropertyValue};
pub use reference::ContentReference;
