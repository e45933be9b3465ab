//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the service against
//! mock adapters. No real sensors or actuators are required.

mod app_service_tests;
mod mock_hw;
