//! Tests for the archive inventory
