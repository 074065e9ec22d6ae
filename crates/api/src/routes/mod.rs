//! Route handlers

pub mod health;
pub mod prometheus;
pub mod rul;
