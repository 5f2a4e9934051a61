#[cfg(test)]
mod config_tests {
    use crate::config::{ObservabilityConfig, ServerConfig, StorageConfig};
    use std::env;

    #[test]
    fn test_server_config_defaults() {
        // Ensure no environment variables are set
        env::remove_var("TIENDA_HOST");
        env::remove_var("TIENDA_PORT");

        // Wait a bit to ensure environment changes take effect
        std::thread::sleep(std::time::Duration::from_millis(10));

        let config = ServerConfig::from_env().unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_storage_config_from_env() {
        env::set_var("TIENDA_PRODUCTS_FILE", "test-data/products.json");
        env::set_var("TIENDA_CARTS_FILE", "test-data/carts.json");

        let config = StorageConfig::from_env().unwrap();

        assert_eq!(config.products_file, "test-data/products.json");
        assert_eq!(config.carts_file, "test-data/carts.json");

        // Clean up
        env::remove_var("TIENDA_PRODUCTS_FILE");
        env::remove_var("TIENDA_CARTS_FILE");
    }

    #[test]
    fn test_observability_config_from_env() {
        env::set_var("TIENDA_SERVICE_NAME", "test-service");
        env::set_var("TIENDA_LOG_LEVEL", "debug");
        env::set_var("TIENDA_ENABLE_JSON_LOGGING", "true");

        let config = ObservabilityConfig::from_env().unwrap();

        assert_eq!(config.service_name, "test-service");
        assert_eq!(config.log_level, "debug");
        assert!(config.enable_json_logging);

        // Clean up
        env::remove_var("TIENDA_SERVICE_NAME");
        env::remove_var("TIENDA_LOG_LEVEL");
        env::remove_var("TIENDA_ENABLE_JSON_LOGGING");
    }
}
