//! Core library exports for the pictogram catalog.
//!
//! The catalog holds a shared ("general") set of categories and pictograms
//! plus per-user private extensions. This crate exposes the domain types,
//! Diesel persistence, form validation and the service layer that resolves
//! what each viewer may see and do.

pub mod db;
pub mod domain;
pub mod dto;
mod error_conversions;
pub mod forms;
pub mod models;
pub mod repository;
pub mod schema;
pub mod services;
