//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for building a
//! [`SuiteConfig`] from environment variables or a YAML file.

use std::fs;
use std::num::NonZeroU32;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{OracleError, OracleResult};

use super::types::{ConfigFile, Endpoints, PayPolicy, SuiteConfig, default_api_tolerance};

/// Environment variable holding the number of pay periods per year.
pub const ENV_PAY_PERIODS_PER_YEAR: &str = "PAY_PERIODS_PER_YEAR";
/// Environment variable holding the yearly employee benefit cost.
pub const ENV_EMPLOYEE_BENEFIT_COST: &str = "EMPLOYEE_BENEFIT_COST";
/// Environment variable holding the yearly benefit cost per dependant.
pub const ENV_DEPENDANT_BENEFIT_COST: &str = "DEPENDANT_BENEFIT_COST";
/// Environment variable holding the REST API base URL.
pub const ENV_API_URL: &str = "API_URL";
/// Environment variable holding the `Authorization` header value.
pub const ENV_BASIC_TOKEN: &str = "BASIC_TOKEN";
/// Environment variable holding the dashboard URL.
pub const ENV_BASE_URL: &str = "BASE_URL";
/// Environment variable holding the login page URL.
pub const ENV_LOGIN_URL: &str = "LOGIN_URL";
/// Environment variable holding the dashboard login name.
pub const ENV_USERNAME: &str = "USERNAME";
/// Environment variable holding the dashboard password.
pub const ENV_PASSWORD: &str = "PASSWORD";
/// Environment variable overriding the API comparison tolerance.
pub const ENV_API_TOLERANCE: &str = "API_TOLERANCE";

/// Loads and provides access to the suite configuration.
///
/// Configuration is read once, either from the process environment or from
/// a YAML file, and is immutable afterwards.
///
/// # File Layout
///
/// ```text
/// policy:
///   pay_periods_per_year: 26
///   employee_benefit_cost_per_year: 1000
///   dependant_benefit_cost_per_year: 500
/// endpoints:
///   api_url: https://dashboard.example/Prod/api
///   basic_token: Basic dXNlcjpwYXNz
///   base_url: https://dashboard.example/Prod/Benefits   # optional
///   login_url: https://dashboard.example/Prod/Account/Login   # optional
/// api_tolerance: "0.000000001"   # optional
/// ```
///
/// # Example
///
/// ```no_run
/// use benefits_oracle::config::ConfigLoader;
///
/// let loader = ConfigLoader::from_env()?;
/// println!("Pay periods: {}", loader.policy().pay_periods_per_year());
/// # Ok::<(), benefits_oracle::error::OracleError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: SuiteConfig,
}

impl ConfigLoader {
    /// Loads configuration from a YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file is not valid YAML or misses a section (`ConfigParseError`)
    /// - A value is out of range (`InvalidSetting`)
    pub fn load<P: AsRef<Path>>(path: P) -> OracleResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| OracleError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses configuration from YAML text. `origin` is used in error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> OracleResult<Self> {
        let file: ConfigFile =
            serde_yaml::from_str(content).map_err(|e| OracleError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        let pay_periods = NonZeroU32::new(file.policy.pay_periods_per_year).ok_or_else(|| {
            OracleError::InvalidSetting {
                name: "policy.pay_periods_per_year".to_string(),
                message: "must be greater than zero".to_string(),
            }
        })?;
        let policy = PayPolicy::new(
            pay_periods,
            file.policy.employee_benefit_cost_per_year,
            file.policy.dependant_benefit_cost_per_year,
        )?;
        let api_tolerance = file.api_tolerance.unwrap_or_else(default_api_tolerance);
        validate_tolerance("api_tolerance", api_tolerance)?;

        Ok(Self {
            config: SuiteConfig {
                policy,
                endpoints: file.endpoints,
                api_tolerance,
            },
        })
    }

    /// Loads configuration from the process environment.
    pub fn from_env() -> OracleResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration from an arbitrary variable lookup.
    ///
    /// Blank values are treated as missing.
    ///
    /// # Example
    ///
    /// ```
    /// use benefits_oracle::config::ConfigLoader;
    /// use std::collections::HashMap;
    ///
    /// let vars: HashMap<&str, &str> = [
    ///     ("PAY_PERIODS_PER_YEAR", "26"),
    ///     ("EMPLOYEE_BENEFIT_COST", "1000"),
    ///     ("DEPENDANT_BENEFIT_COST", "500"),
    ///     ("API_URL", "http://localhost:8080/api"),
    ///     ("BASIC_TOKEN", "Basic dGVzdA=="),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let loader = ConfigLoader::from_lookup(|name| vars.get(name).map(|v| v.to_string()))?;
    /// assert_eq!(loader.policy().pay_periods_per_year().get(), 26);
    /// # Ok::<(), benefits_oracle::error::OracleError>(())
    /// ```
    pub fn from_lookup<F>(lookup: F) -> OracleResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let require = |name: &str| {
            get(name).ok_or_else(|| OracleError::MissingSetting {
                name: name.to_string(),
            })
        };

        let pay_periods = parse_pay_periods(
            ENV_PAY_PERIODS_PER_YEAR,
            &require(ENV_PAY_PERIODS_PER_YEAR)?,
        )?;
        let employee_cost = parse_decimal(
            ENV_EMPLOYEE_BENEFIT_COST,
            &require(ENV_EMPLOYEE_BENEFIT_COST)?,
        )?;
        let dependant_cost = parse_decimal(
            ENV_DEPENDANT_BENEFIT_COST,
            &require(ENV_DEPENDANT_BENEFIT_COST)?,
        )?;
        let policy = PayPolicy::new(pay_periods, employee_cost, dependant_cost)?;

        let endpoints = Endpoints {
            api_url: require(ENV_API_URL)?,
            basic_token: require(ENV_BASIC_TOKEN)?,
            base_url: get(ENV_BASE_URL),
            login_url: get(ENV_LOGIN_URL),
            username: get(ENV_USERNAME),
            password: get(ENV_PASSWORD),
        };

        let api_tolerance = match get(ENV_API_TOLERANCE) {
            Some(value) => parse_decimal(ENV_API_TOLERANCE, &value)?,
            None => default_api_tolerance(),
        };
        validate_tolerance(ENV_API_TOLERANCE, api_tolerance)?;

        Ok(Self {
            config: SuiteConfig {
                policy,
                endpoints,
                api_tolerance,
            },
        })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> SuiteConfig {
        self.config
    }

    /// Returns the pay policy.
    pub fn policy(&self) -> &PayPolicy {
        &self.config.policy
    }

    /// Returns the endpoints of the system under test.
    pub fn endpoints(&self) -> &Endpoints {
        &self.config.endpoints
    }
}

fn parse_pay_periods(name: &str, value: &str) -> OracleResult<NonZeroU32> {
    let periods = value.parse::<u32>().map_err(|e| OracleError::InvalidSetting {
        name: name.to_string(),
        message: format!("'{}' is not a whole number: {}", value, e),
    })?;

    NonZeroU32::new(periods).ok_or_else(|| OracleError::InvalidSetting {
        name: name.to_string(),
        message: "must be greater than zero".to_string(),
    })
}

fn parse_decimal(name: &str, value: &str) -> OracleResult<Decimal> {
    Decimal::from_str(value).map_err(|e| OracleError::InvalidSetting {
        name: name.to_string(),
        message: format!("'{}' is not a decimal number: {}", value, e),
    })
}

fn validate_tolerance(name: &str, tolerance: Decimal) -> OracleResult<()> {
    if tolerance < Decimal::ZERO {
        return Err(OracleError::InvalidSetting {
            name: name.to_string(),
            message: format!("must not be negative, got {}", tolerance),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn base_vars() -> HashMap<&'static str, &'static str> {
        [
            (ENV_PAY_PERIODS_PER_YEAR, "26"),
            (ENV_EMPLOYEE_BENEFIT_COST, "1000"),
            (ENV_DEPENDANT_BENEFIT_COST, "500"),
            (ENV_API_URL, "http://localhost:5000/api"),
            (ENV_BASIC_TOKEN, "Basic dGVzdDp0ZXN0"),
        ]
        .into_iter()
        .collect()
    }

    fn load_vars(vars: &HashMap<&'static str, &'static str>) -> OracleResult<ConfigLoader> {
        ConfigLoader::from_lookup(|name| vars.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn test_from_lookup_builds_policy_and_endpoints() {
        let loader = load_vars(&base_vars()).unwrap();

        assert_eq!(loader.policy().pay_periods_per_year().get(), 26);
        assert_eq!(loader.policy().employee_benefit_cost_per_year(), dec("1000"));
        assert_eq!(loader.policy().dependant_benefit_cost_per_year(), dec("500"));
        assert_eq!(loader.endpoints().api_url, "http://localhost:5000/api");
        assert_eq!(loader.endpoints().basic_token, "Basic dGVzdDp0ZXN0");
        assert_eq!(loader.endpoints().base_url, None);
        assert_eq!(loader.config().api_tolerance, default_api_tolerance());
    }

    #[test]
    fn test_from_lookup_reads_optional_collaborator_settings() {
        let mut vars = base_vars();
        vars.insert(ENV_BASE_URL, "http://localhost:5000/Benefits");
        vars.insert(ENV_LOGIN_URL, "http://localhost:5000/Account/Login");
        vars.insert(ENV_USERNAME, "TestUser");
        vars.insert(ENV_PASSWORD, "secret");
        vars.insert(ENV_API_TOLERANCE, "0.0001");

        let loader = load_vars(&vars).unwrap();
        let endpoints = loader.endpoints();

        assert_eq!(
            endpoints.base_url.as_deref(),
            Some("http://localhost:5000/Benefits")
        );
        assert_eq!(
            endpoints.login_url.as_deref(),
            Some("http://localhost:5000/Account/Login")
        );
        assert_eq!(endpoints.username.as_deref(), Some("TestUser"));
        assert_eq!(endpoints.password.as_deref(), Some("secret"));
        assert_eq!(loader.config().api_tolerance, dec("0.0001"));
    }

    #[test]
    fn test_missing_variable_names_the_variable() {
        let mut vars = base_vars();
        vars.remove(ENV_API_URL);

        match load_vars(&vars).unwrap_err() {
            OracleError::MissingSetting { name } => assert_eq!(name, ENV_API_URL),
            other => panic!("Expected MissingSetting, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_variable_is_missing() {
        let mut vars = base_vars();
        vars.insert(ENV_BASIC_TOKEN, "   ");

        assert!(matches!(
            load_vars(&vars),
            Err(OracleError::MissingSetting { .. })
        ));
    }

    #[test]
    fn test_zero_pay_periods_is_invalid() {
        let mut vars = base_vars();
        vars.insert(ENV_PAY_PERIODS_PER_YEAR, "0");

        match load_vars(&vars).unwrap_err() {
            OracleError::InvalidSetting { name, message } => {
                assert_eq!(name, ENV_PAY_PERIODS_PER_YEAR);
                assert!(message.contains("greater than zero"));
            }
            other => panic!("Expected InvalidSetting, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_cost_is_invalid() {
        let mut vars = base_vars();
        vars.insert(ENV_EMPLOYEE_BENEFIT_COST, "a thousand");

        match load_vars(&vars).unwrap_err() {
            OracleError::InvalidSetting { name, .. } => {
                assert_eq!(name, ENV_EMPLOYEE_BENEFIT_COST)
            }
            other => panic!("Expected InvalidSetting, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_tolerance_is_invalid() {
        let mut vars = base_vars();
        vars.insert(ENV_API_TOLERANCE, "-0.1");

        assert!(matches!(
            load_vars(&vars),
            Err(OracleError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_yaml_config_is_parsed() {
        let yaml = r#"
policy:
  pay_periods_per_year: 26
  employee_benefit_cost_per_year: 1000
  dependant_benefit_cost_per_year: 500
endpoints:
  api_url: http://localhost:5000/api
  basic_token: Basic dGVzdDp0ZXN0
  login_url: http://localhost:5000/Account/Login
api_tolerance: "0.00001"
"#;
        let loader = ConfigLoader::from_yaml_str(yaml, "inline").unwrap();

        assert_eq!(loader.policy().pay_periods_per_year().get(), 26);
        assert_eq!(loader.policy().dependant_benefit_cost_per_year(), dec("500"));
        assert_eq!(
            loader.endpoints().login_url.as_deref(),
            Some("http://localhost:5000/Account/Login")
        );
        assert_eq!(loader.config().api_tolerance, dec("0.00001"));
    }

    #[test]
    fn test_yaml_zero_pay_periods_is_invalid() {
        let yaml = r#"
policy:
  pay_periods_per_year: 0
  employee_benefit_cost_per_year: 1000
  dependant_benefit_cost_per_year: 500
endpoints:
  api_url: http://localhost:5000/api
  basic_token: token
"#;
        assert!(matches!(
            ConfigLoader::from_yaml_str(yaml, "inline"),
            Err(OracleError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_yaml_missing_section_is_parse_error() {
        let yaml = "policy:\n  pay_periods_per_year: 26\n";

        match ConfigLoader::from_yaml_str(yaml, "partial.yaml").unwrap_err() {
            OracleError::ConfigParseError { path, .. } => assert_eq!(path, "partial.yaml"),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let result = ConfigLoader::load("/nonexistent/benefits-oracle.yaml");

        assert!(matches!(result, Err(OracleError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_load_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "benefits-oracle-{}.yaml",
            uuid::Uuid::new_v4()
        ));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "policy:\n  pay_periods_per_year: 52\n  employee_benefit_cost_per_year: 1040\n  dependant_benefit_cost_per_year: 520\nendpoints:\n  api_url: http://localhost/api\n  basic_token: token"
        )
        .unwrap();

        let loader = ConfigLoader::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loader.policy().pay_periods_per_year().get(), 52);
        assert_eq!(loader.into_config().endpoints.api_url, "http://localhost/api");
    }
}
