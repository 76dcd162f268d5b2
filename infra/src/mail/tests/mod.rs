//! Tests for the mail transport module

#[cfg(test)]
mod adapter_tests;
