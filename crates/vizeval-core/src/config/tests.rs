use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::time::Duration;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_vizeval_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("VIZEVAL_PORT");
        env::remove_var("VIZEVAL_BIND_ADDR");
        env::remove_var("VIZEVAL_POLL_INTERVAL_MS");
        env::remove_var("VIZEVAL_REST_URL");
        env::remove_var("VIZEVAL_REST_SERVICE_KEY");
        env::remove_var("VIZEVAL_MEDICAL_MODEL");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_vizeval_env();
    let config = Config::default();

    assert_eq!(config.port, 8000);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.poll_interval, Duration::from_millis(500));
    assert!(config.rest_url.is_none());
    assert!(config.rest_service_key.is_none());
    assert_eq!(config.medical_model, "gpt-4o-mini");
}

#[test]
#[serial]
fn test_from_env_reads_overrides() {
    clear_vizeval_env();
    let config = with_env_vars(
        &[
            ("VIZEVAL_PORT", "9000"),
            ("VIZEVAL_BIND_ADDR", "0.0.0.0"),
            ("VIZEVAL_POLL_INTERVAL_MS", "50"),
            ("VIZEVAL_MEDICAL_MODEL", "gpt-4o"),
        ],
        || Config::from_env().unwrap(),
    );

    assert_eq!(config.port, 9000);
    assert_eq!(config.bind_addr.to_string(), "0.0.0.0");
    assert_eq!(config.poll_interval, Duration::from_millis(50));
    assert_eq!(config.medical_model, "gpt-4o");
}

#[test]
#[serial]
fn test_invalid_port_is_rejected() {
    clear_vizeval_env();
    let result = with_env_vars(&[("VIZEVAL_PORT", "not-a-port")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));
}

#[test]
#[serial]
fn test_zero_poll_interval_is_rejected() {
    clear_vizeval_env();
    let result = with_env_vars(&[("VIZEVAL_POLL_INTERVAL_MS", "0")], Config::from_env);
    assert!(matches!(
        result,
        Err(ConfigError::InvalidPollInterval { .. })
    ));
}

#[test]
#[serial]
fn test_rest_url_without_key_fails_validation() {
    clear_vizeval_env();
    let config = with_env_vars(
        &[("VIZEVAL_REST_URL", "https://example.supabase.co")],
        || Config::from_env().unwrap(),
    );

    assert!(matches!(
        config.validate(),
        Err(ConfigError::IncompleteRestConfig)
    ));
}

#[test]
#[serial]
fn test_complete_rest_config_validates() {
    clear_vizeval_env();
    let config = with_env_vars(
        &[
            ("VIZEVAL_REST_URL", "https://example.supabase.co"),
            ("VIZEVAL_REST_SERVICE_KEY", "service-key"),
        ],
        || Config::from_env().unwrap(),
    );

    assert!(config.validate().is_ok());
    assert_eq!(
        config.rest_url.as_deref(),
        Some("https://example.supabase.co")
    );
}

#[test]
#[serial]
fn test_socket_addr() {
    clear_vizeval_env();
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8000");
}
