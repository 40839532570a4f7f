//! Data models describing the outcome of scanning one docking result.

pub mod histogram;
pub mod record;
