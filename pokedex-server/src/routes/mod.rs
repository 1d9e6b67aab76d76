//! Route modules, one per admin panel

pub mod admin;
pub mod health;
pub mod import;
pub mod pokemon;
