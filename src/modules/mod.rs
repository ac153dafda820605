pub mod accounts;
pub mod questions;
pub mod tenants;
