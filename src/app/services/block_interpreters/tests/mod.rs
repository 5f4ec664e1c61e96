//! Test utilities for block interpreter testing

use crate::app::models::RawBlock;


/// Build a raw block with the given title and values
pub fn raw_block(title: &str, values: &[f64]) -> RawBlock {
    RawBlock {
        title: title.to_string(),
        declared_entries: values.len(),
        values: values.to_vec(),
        partial: false,
    }
}
