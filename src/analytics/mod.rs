//! Best-effort run log for sellerdash reports.
//!
//! Every rendered report appends one JSON line (see [`logger::RunLogEntry`]).
//! `sellerdash health` reads it back to report how many runs were recorded.

pub mod logger;
