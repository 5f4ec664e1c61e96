//! Tests for spec-based extraction
