pub mod screen;
pub mod triage;
