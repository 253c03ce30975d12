//! Catalog use cases.
//!
//! Viewing operations take `viewer: Option<UserId>` (`None` for anonymous
//! callers); mutations that require an authenticated caller take a `UserId`.
//! Resolving a request to either is the authentication collaborator's job.

pub mod authorization;
pub mod categories;
pub mod errors;
pub mod hidden;
pub mod phrases;
pub mod pictograms;
pub mod registration;
pub mod settings;
pub mod visibility;

pub use errors::{ServiceError, ServiceResult};
