//! Configuration modules for the Eruditx API.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables at startup:
//!
//! - [`cors`]: allowed origins for the CORS layer
//! - [`database`]: PostgreSQL pool initialization and migrations
//! - [`jwt`]: token signing secret and expiry

pub mod cors;
pub mod database;
pub mod jwt;
