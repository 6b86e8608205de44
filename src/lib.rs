pub mod auth;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod db;
pub mod errors;
pub mod vault;
