//! Core of the Caw Space arcade shooter.
//!
//! `entities` and `status` are the data, `logic` owns the game, `compute`
//! advances it one frame at a time.  Front ends plug in through `adapters`.

pub mod adapters;
pub mod compute;
pub mod config;
pub mod entities;
pub mod logging;
pub mod logic;
pub mod schedule;
pub mod status;
