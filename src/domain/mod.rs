pub mod association;
pub mod category;
pub mod phrase;
pub mod pictogram;
pub mod settings;
pub mod types;
pub mod user;
