use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("SUPABASE_URL", "https://example.supabase.co");
    m.insert("SUPABASE_SERVICE_ROLE_KEY", "service-role-test-key");
    m
}

#[test]
fn build_app_config_fails_without_supabase_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SUPABASE_URL"),
        "expected MissingEnvVar(SUPABASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_service_role_key() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("SUPABASE_URL", "https://example.supabase.co");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SUPABASE_SERVICE_ROLE_KEY"),
        "expected MissingEnvVar(SUPABASE_SERVICE_ROLE_KEY), got: {result:?}"
    );
}

#[test]
fn blank_required_var_counts_as_missing() {
    let mut map = full_env();
    map.insert("SUPABASE_SERVICE_ROLE_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SUPABASE_SERVICE_ROLE_KEY"),
        "expected MissingEnvVar(SUPABASE_SERVICE_ROLE_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.supabase_url, "https://example.supabase.co");
    assert_eq!(cfg.service_role_key, "service-role-test-key");
    assert_eq!(cfg.bucket, "appliances");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.upload_delay_ms, 40);
    assert_eq!(cfg.user_agent, "restock/0.1 (inventory-import)");
    assert_eq!(cfg.warm_concurrency, 8);
}

#[test]
fn bucket_override() {
    let mut map = full_env();
    map.insert("BUCKET", "staging-photos");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.bucket, "staging-photos");
}

#[test]
fn empty_bucket_falls_back_to_default() {
    let mut map = full_env();
    map.insert("BUCKET", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.bucket, DEFAULT_BUCKET);
}

#[test]
fn upload_delay_ms_override() {
    let mut map = full_env();
    map.insert("RESTOCK_UPLOAD_DELAY_MS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.upload_delay_ms, 0);
}

#[test]
fn upload_delay_ms_invalid() {
    let mut map = full_env();
    map.insert("RESTOCK_UPLOAD_DELAY_MS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RESTOCK_UPLOAD_DELAY_MS"),
        "expected InvalidEnvVar(RESTOCK_UPLOAD_DELAY_MS), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = full_env();
    map.insert("RESTOCK_REQUEST_TIMEOUT_SECS", "-5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RESTOCK_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(RESTOCK_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn warm_concurrency_override() {
    let mut map = full_env();
    map.insert("RESTOCK_WARM_CONCURRENCY", "2");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.warm_concurrency, 2);
}

#[test]
fn debug_output_redacts_service_role_key() {
    let cfg = build_app_config(lookup_from_map(&full_env())).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("service-role-test-key"));
    assert!(rendered.contains("[redacted]"));
}
