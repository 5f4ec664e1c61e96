//! Archive block inventory
//!
//! Scans a set of files and summarizes, per station and block title, how many
//! observations exist, the covered time span, and where the record has
//! dropouts longer than a configurable gap. Used to decide which stations and
//! blocks are worth extracting before committing to a full gathering run.

pub mod inventory;

#[cfg(test)]
pub mod tests;

pub use inventory::{BlockInventory, BlockSummary};
