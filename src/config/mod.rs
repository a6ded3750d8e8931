//! Configuration loading and management for the benefits oracle.
//!
//! This module builds the pay policy and the endpoints of the system under
//! test, either from environment variables or from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use benefits_oracle::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./oracle.yaml").unwrap().into_config();
//! println!("API: {}", config.endpoints.api_url);
//! ```

mod loader;
mod types;

pub use loader::{
    ConfigLoader, ENV_API_TOLERANCE, ENV_API_URL, ENV_BASE_URL, ENV_BASIC_TOKEN,
    ENV_DEPENDANT_BENEFIT_COST, ENV_EMPLOYEE_BENEFIT_COST, ENV_LOGIN_URL, ENV_PASSWORD,
    ENV_PAY_PERIODS_PER_YEAR, ENV_USERNAME,
};
pub use types::{
    DEFAULT_PAY_PERIODS_PER_YEAR, Endpoints, PayPolicy, SuiteConfig, default_api_tolerance,
};
