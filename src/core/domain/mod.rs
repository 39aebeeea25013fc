//! Domain types.

mod binding;
mod context;
mod credentials;
mod key;

pub use binding::Binding;
pub use context::{RunContext, TaskId};
pub use credentials::{CredentialSet, Role};
pub use key::GlobalKey;
