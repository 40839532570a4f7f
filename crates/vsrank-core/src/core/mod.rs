//! # Core Module
//!
//! Foundational, stateless building blocks shared by the engine and the workflows.
//!
//! - **Models** ([`models`]) - one classified [`Record`](models::record::Record) per ligand
//!   and the per-status [`OutcomeHistogram`](models::histogram::OutcomeHistogram).
//! - **Metrics** ([`metrics`]) - the tolerant floating-point comparison used for score
//!   classification and the ligand-efficiency calculation.
//! - **I/O** ([`io`]) - docking-log and pdbqt parsing, report and score-table rendering,
//!   and copying of ligand artifacts to a result directory.

pub mod io;
pub mod metrics;
pub mod models;
