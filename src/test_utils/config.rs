//! Configuration builders for testing.

use crate::config::{EredesConfig, InfluxConfig};

/// Builder for creating test provider configurations.
#[derive(Debug)]
pub struct TestEredesConfigBuilder {
    config: EredesConfig,
}

impl TestEredesConfigBuilder {
    /// Creates a new builder with safe local defaults.
    pub fn new() -> Self {
        Self {
            config: EredesConfig {
                username: "user@example.com".to_string(),
                password: "secret".to_string(),
                cpe: "PT0002000".to_string(),
                sign_in_url: "http://test.local/signin".to_string(),
                usage_url: "http://test.local/usage".to_string(),
                extra_headers: None,
                timeout_seconds: 5,
                insecure_skip_verify: false,
                success_status_codes: vec![200],
                history_interval_hours: 24,
                start_date: None,
                dry_run: false,
            },
        }
    }

    pub fn with_base_url(mut self, base: &str) -> Self {
        self.config.sign_in_url = format!("{}/signin", base);
        self.config.usage_url = format!("{}/usage", base);
        self
    }

    pub fn with_extra_headers(mut self, spec: impl Into<String>) -> Self {
        self.config.extra_headers = Some(spec.into());
        self
    }

    pub fn with_start_date(mut self, date: impl Into<String>) -> Self {
        self.config.start_date = Some(date.into());
        self
    }

    pub fn with_history_interval_hours(mut self, hours: u64) -> Self {
        self.config.history_interval_hours = hours;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        self
    }

    pub fn build(self) -> EredesConfig {
        self.config
    }
}

impl Default for TestEredesConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a default test provider configuration.
pub fn test_eredes_config() -> EredesConfig {
    TestEredesConfigBuilder::new().build()
}

/// Creates a test InfluxDB configuration with a custom URL.
pub fn test_influx_config_with_url(url: impl Into<String>) -> InfluxConfig {
    InfluxConfig {
        url: url.into(),
        org: "test-org".to_string(),
        token: "test-token".to_string(),
        bucket: "test-bucket".to_string(),
    }
}

/// Creates a default test InfluxDB configuration.
pub fn test_influx_config() -> InfluxConfig {
    test_influx_config_with_url("http://localhost:8086")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eredes_config_builder() {
        let config = TestEredesConfigBuilder::new()
            .with_base_url("http://mock.local:9999")
            .with_start_date("2020-12-31 23:59:59")
            .with_history_interval_hours(168)
            .with_dry_run(true)
            .build();

        assert_eq!(config.sign_in_url, "http://mock.local:9999/signin");
        assert_eq!(config.usage_url, "http://mock.local:9999/usage");
        assert_eq!(config.start_date.as_deref(), Some("2020-12-31 23:59:59"));
        assert_eq!(config.history_interval_hours, 168);
        assert!(config.dry_run);
    }

    #[test]
    fn test_default_config_convenience() {
        let config = test_eredes_config();
        assert_eq!(config.cpe, "PT0002000");
        assert_eq!(config.success_status_codes, vec![200]);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_influx_config_helpers() {
        let config = test_influx_config();
        assert_eq!(config.url, "http://localhost:8086");

        let config = test_influx_config_with_url("http://mock:8086");
        assert_eq!(config.url, "http://mock:8086");
    }
}
