//! # Workflows Module
//!
//! Top-level entry points that run a complete post-processing procedure on a directory of
//! docking results.
//!
//! - **Screen** ([`screen`]) - scan, rank, select and render the hit report.
//! - **Triage** ([`triage`]) - scan, tabulate every score and copy the artifacts of all
//!   ligands at or below the score cutoff.

pub mod screen;
pub mod triage;
