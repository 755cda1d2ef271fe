use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use crate::encoding::TextEncoding;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_trackmeta_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("TRACKMETA_CONFIG_PATH", "/tmp/trackmeta-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/trackmeta-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("trackmeta")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("trackmeta")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file_and_parse_encoding_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[encoding]
default = "latin-1"

[formats]
disabled = ["wma", ".tta"]
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TRACKMETA_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("TRACKMETA__ENCODING__DEFAULT");

    let s = Settings::load().unwrap();
    assert_eq!(s.encoding.default, TextEncoding::Latin1);
    assert_eq!(s.formats.disabled, vec!["wma".to_string(), ".tta".to_string()]);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[encoding]
default = "utf8"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TRACKMETA_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("TRACKMETA__ENCODING__DEFAULT", "latin1");

    let s = Settings::load().unwrap();
    assert_eq!(s.encoding.default, TextEncoding::Latin1);
}

#[test]
fn defaults_are_utf8_with_no_disabled_formats() {
    let s = Settings::default();
    assert_eq!(s.encoding.default, TextEncoding::Utf8);
    assert!(s.formats.disabled.is_empty());
}
