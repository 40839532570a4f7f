//! # vsrank Core Library
//!
//! Post-processing of virtual-screening results produced by a docking tool such as smina.
//! Every ligand of a screen leaves behind a docking log (`<id>.log`) and a docked pose
//! (`<id>.pdbqt`); this library turns a directory of such artifacts into a ranked and
//! filtered set of hits.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Record`, `Status`,
//!   `OutcomeHistogram`), pure metrics (tolerant comparison, ligand efficiency) and the
//!   I/O helpers that parse logs, count heavy atoms, render reports and copy artifacts.
//!
//! - **[`engine`]: The Logic Core.** Configuration, error types, progress reporting, the
//!   bounded-concurrency directory scanner and the ranking and selection engines.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures (`screen`, `triage`) that tie
//!   the engine and core together.

pub mod core;
pub mod engine;
pub mod workflows;
