//! Repository descriptor and its validation rules.
//!
//! A [`RepositoryDescriptor`] names the repository a workflow run creates:
//! who owns it, where the working copy lives, how visible it is and which
//! hosting service stores it. Everything else (name, `owner/name`, clone URL)
//! is derived from those four inputs.

mod descriptor;
mod error;
mod host;
mod visibility;

pub use descriptor::RepositoryDescriptor;
pub use error::ValidationError;
pub use visibility::Visibility;
