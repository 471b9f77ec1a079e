//! Host-side integration tests for the control core.
//!
//! Everything here runs on x86_64 with mock adapters — no hardware, no
//! ESP-IDF.  The scenarios cover the full tick pipeline from button edge to
//! motor command and display intent.

mod controller_tests;
mod mock_hw;
