//! Configuration loading and management for the payroll engine.
//!
//! This module loads the restaurant's time zone, pay policy, role salary
//! table and public holidays from YAML files and validates them at startup.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/restaurant").unwrap();
//! println!("Loaded restaurant: {}", config.restaurant().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{HolidaysConfig, PayPolicy, RestaurantConfig, RolesConfig};
