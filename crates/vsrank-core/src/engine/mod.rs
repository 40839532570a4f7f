//! # Engine Module
//!
//! The stateful logic between raw docking artifacts and the final hit list.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - immutable [`SelectionCriteria`](config::SelectionCriteria)
//!   and [`ScanConfig`](config::ScanConfig), built once and passed by reference.
//! - **Scanning** ([`scan`], [`collector`]) - a bounded worker pool parses every log of a
//!   directory; workers send their outcomes over a channel to a single collector that owns
//!   the records, the outcome histogram and the observed heavy-atom span.
//! - **Ranking** ([`ranking`]) - stable ascending sort by raw score or ligand efficiency.
//! - **Selection** ([`selection`]) - heavy-atom clamping plus one of the top-N, top-N per
//!   heavy atom, threshold or all-ligands strategies.
//! - **Progress Monitoring** ([`progress`]) and **Error Handling** ([`error`]).

pub mod collector;
pub mod config;
pub mod error;
pub mod progress;
pub mod ranking;
pub mod scan;
pub mod selection;
