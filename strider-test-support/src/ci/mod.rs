//! Knobs that CI jobs turn through the environment.

pub mod property_test_profile;
