//! Read models handed to the transport layer.

pub mod categories;
pub mod phrases;
pub mod pictograms;
pub mod settings;
pub mod users;
