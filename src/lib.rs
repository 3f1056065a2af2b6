pub mod app;
pub mod auth;
pub mod config;
pub mod dates;
pub mod error;
pub mod meals;
pub mod nutrition;
pub mod profiles;
pub mod social;
pub mod state;
mod validation;
