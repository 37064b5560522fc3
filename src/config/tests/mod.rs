//! Unit tests for configuration loading and request building.
//!
//! - `cli_loading`: Loading from command-line arguments
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Token, owner, directory and backend resolution
//! - `request`: Conversion into a workflow request

mod helpers;
