//! Middleware de la API

pub mod auth;
pub mod cors;
pub mod rate_limit;
