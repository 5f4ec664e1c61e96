//! Tests for grid alignment
