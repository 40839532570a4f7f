//! Provides input/output functionality for docking artifacts.
//!
//! This module reads the two files a docking run leaves per ligand (the textual log and the
//! docked pose in pdbqt format), renders the human-readable hit report and the tab-separated
//! score table, and copies the artifacts of selected ligands to a result directory.

pub mod export;
pub mod log;
pub mod pdbqt;
pub mod report;
pub mod table;
