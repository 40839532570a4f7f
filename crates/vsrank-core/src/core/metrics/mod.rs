//! Pure numeric helpers: tolerant comparison and ligand efficiency.

pub mod efficiency;
pub mod tolerance;
