/*
 * This module provides the style management layer, centered around
 * `StyleManager` which owns the resolved style table and the font table and
 * answers style lookups by name. Unit tests for `StyleManager` are in
 * `manager_tests.rs`.
 */
pub mod manager;


pub use manager::StyleManager;
