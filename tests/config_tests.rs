// Config loading and validation tests

use statusboard::config::AppConfig;

const VALID_CONFIG: &str = r#"
[server]
port = 3000
host = "0.0.0.0"

[collector]
probe_timeout_ms = 3000
log_probe_timeout_ms = 2000

[service]
unit = "openclaw-gateway"
user_scope = true
process_pattern = "openclaw-gateway"
model_marker = "agent model:"
model_log_lines = 100
channel_name = "whatsapp"
channel_marker = "listening"
channel_log_lines = 50

[dashboard]
hostname = "homebot"
"#;

const MINIMAL_CONFIG: &str = r#"
[server]
port = 3000
host = "0.0.0.0"
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.collector.probe_timeout_ms, 3000);
    assert_eq!(config.collector.log_probe_timeout_ms, 2000);
    assert_eq!(config.service.unit, "openclaw-gateway");
    assert_eq!(config.service.model_log_lines, 100);
    assert_eq!(config.service.channel_log_lines, 50);
    assert_eq!(config.dashboard.hostname.as_deref(), Some("homebot"));
}

#[test]
fn test_config_defaults_when_sections_omitted() {
    let config = AppConfig::load_from_str(MINIMAL_CONFIG).expect("minimal");
    assert_eq!(config.collector.probe_timeout_ms, 3000);
    assert_eq!(config.collector.log_probe_timeout_ms, 2000);
    assert_eq!(config.service.unit, "openclaw-gateway");
    assert!(config.service.user_scope);
    assert_eq!(config.service.model_marker, "agent model:");
    assert_eq!(config.service.channel_name, "whatsapp");
    assert_eq!(config.service.channel_marker, "listening");
    assert_eq!(config.service.model_log_lines, 100);
    assert_eq!(config.service.channel_log_lines, 50);
    assert!(config.dashboard.hostname.is_none());
}

#[test]
fn test_process_pattern_falls_back_to_unit() {
    let config = AppConfig::load_from_str(&format!(
        "{MINIMAL_CONFIG}\n[service]\nunit = \"my-daemon\"\n"
    ))
    .unwrap();
    assert_eq!(config.service.process_pattern(), "my-daemon");

    let config = AppConfig::load_from_str(VALID_CONFIG).unwrap();
    assert_eq!(config.service.process_pattern(), "openclaw-gateway");
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 3000", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_host() {
    let bad = VALID_CONFIG.replace("host = \"0.0.0.0\"", "host = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.host"));
}

#[test]
fn test_config_validation_rejects_probe_timeout_zero() {
    let bad = VALID_CONFIG.replace("probe_timeout_ms = 3000", "probe_timeout_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("collector.probe_timeout_ms"));
}

#[test]
fn test_config_validation_rejects_log_probe_timeout_zero() {
    let bad = VALID_CONFIG.replace("log_probe_timeout_ms = 2000", "log_probe_timeout_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("log_probe_timeout_ms"));
}

#[test]
fn test_config_validation_rejects_empty_unit() {
    let bad = VALID_CONFIG.replace("unit = \"openclaw-gateway\"", "unit = \"  \"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("service.unit"));
}

#[test]
fn test_config_validation_rejects_empty_process_pattern() {
    let bad = VALID_CONFIG.replace(
        "process_pattern = \"openclaw-gateway\"",
        "process_pattern = \"\"",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("process_pattern"));
}

#[test]
fn test_config_validation_rejects_empty_markers() {
    let bad = VALID_CONFIG.replace("model_marker = \"agent model:\"", "model_marker = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("model_marker"));

    let bad = VALID_CONFIG.replace("channel_marker = \"listening\"", "channel_marker = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("channel_marker"));

    let bad = VALID_CONFIG.replace("channel_name = \"whatsapp\"", "channel_name = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("channel_name"));
}

#[test]
fn test_config_validation_rejects_zero_log_windows() {
    let bad = VALID_CONFIG.replace("model_log_lines = 100", "model_log_lines = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("model_log_lines"));

    let bad = VALID_CONFIG.replace("channel_log_lines = 50", "channel_log_lines = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("channel_log_lines"));
}

#[test]
fn test_config_validation_rejects_blank_dashboard_hostname() {
    let bad = VALID_CONFIG.replace("hostname = \"homebot\"", "hostname = \" \"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("dashboard.hostname"));
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_validation_rejects_missing_server_section() {
    assert!(AppConfig::load_from_str("[collector]\nprobe_timeout_ms = 10\n").is_err());
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.service.unit, "openclaw-gateway");
}
