//! Integration tests for the gamestate container and its host surfaces

mod config_integration;
mod state_contracts;
mod test_utils;
