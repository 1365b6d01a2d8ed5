use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

const SAMPLE_CONFIG_TOML: &str = r#"
[service]
http_bind = "127.0.0.1:8080"
log_level = "info"

[upstream.control]
api_base = "http://127.0.0.1:9470"
api_key  = "control-key"

[upstream.data]
api_base = "http://127.0.0.1:9471"
api_key  = "data-key"
"#;

fn sample_toml_with_view(field: &str, value: i64) -> String {
	let mut parsed: Value =
		toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let root = parsed.as_table_mut().expect("Sample config must be a table.");
	let mut view = toml::Table::new();

	view.insert(field.to_string(), Value::Integer(value));
	root.insert("view".to_string(), Value::Table(view));

	toml::to_string(&parsed).expect("Failed to render sample config.")
}

fn write_temp_config(payload: &str) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("scry_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load(payload: &str) -> scry_config::Result<scry_config::Config> {
	let path = write_temp_config(payload);
	let result = scry_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

#[test]
fn loads_sample_config_with_view_defaults() {
	let cfg = load(SAMPLE_CONFIG_TOML).expect("Failed to load sample config.");

	assert_eq!(cfg.service.http_bind, "127.0.0.1:8080");
	assert_eq!(cfg.upstream.control.api_key, "control-key");
	assert_eq!(cfg.upstream.control.timeout_ms, 10_000);
	assert_eq!(cfg.view.page_size, 50);
	assert_eq!(cfg.view.event_page_size, 100);
	assert_eq!(cfg.view.max_page_size, 100);
	assert_eq!(cfg.view.derive_scan_limit, 100);
}

#[test]
fn trims_endpoint_strings() {
	let payload = SAMPLE_CONFIG_TOML.replace("\"data-key\"", "\"  data-key  \"");
	let cfg = load(&payload).expect("Failed to load sample config.");

	assert_eq!(cfg.upstream.data.api_key, "data-key");
}

#[test]
fn missing_api_key_is_not_a_validation_error() {
	// The catalog client reports missing credentials at startup instead, so a
	// half-configured viewer still starts and serves /health.
	let payload = SAMPLE_CONFIG_TOML.replace("api_key  = \"data-key\"\n", "");
	let cfg = load(&payload).expect("Failed to load sample config.");

	assert_eq!(cfg.upstream.data.api_key, "");
}

#[test]
fn page_size_must_be_positive() {
	let err = load(&sample_toml_with_view("page_size", 0))
		.expect_err("Expected page_size validation error.");

	assert!(
		err.to_string().contains("view.page_size must be greater than zero."),
		"Unexpected error message: {err}"
	);
}

#[test]
fn page_size_must_not_exceed_the_cap() {
	let err = load(&sample_toml_with_view("page_size", 101))
		.expect_err("Expected page_size validation error.");

	assert!(
		err.to_string().contains("view.page_size must not exceed view.max_page_size."),
		"Unexpected error message: {err}"
	);
}

#[test]
fn max_page_size_is_capped_at_the_upstream_limit() {
	let err = load(&sample_toml_with_view("max_page_size", 500))
		.expect_err("Expected max_page_size validation error.");

	assert!(
		err.to_string().contains("view.max_page_size must not exceed 100."),
		"Unexpected error message: {err}"
	);
}

#[test]
fn derive_scan_limit_must_be_positive() {
	let err = load(&sample_toml_with_view("derive_scan_limit", 0))
		.expect_err("Expected derive_scan_limit validation error.");

	assert!(
		err.to_string().contains("view.derive_scan_limit must be greater than zero."),
		"Unexpected error message: {err}"
	);
}

#[test]
fn endpoint_timeout_must_be_positive() {
	let payload = SAMPLE_CONFIG_TOML.replace(
		"api_base = \"http://127.0.0.1:9471\"",
		"api_base = \"http://127.0.0.1:9471\"\ntimeout_ms = 0",
	);
	let err = load(&payload).expect_err("Expected timeout validation error.");

	assert!(
		err.to_string().contains("upstream.data.timeout_ms must be greater than zero."),
		"Unexpected error message: {err}"
	);
}

#[test]
fn missing_config_file_reports_the_path() {
	let mut path = env::temp_dir();

	path.push("scry_config_test_does_not_exist.toml");

	let err = scry_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, scry_config::Error::ReadConfig { .. }));
}
