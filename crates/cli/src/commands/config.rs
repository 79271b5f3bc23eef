use std::env;
use std::fs;
use std::path::Path;

use canteen_core::config::{resolve_config_path, AppConfig, LoadOptions, DEFAULT_ADMIN_PASSWORD};
use secrecy::ExposeSecret;
use toml::Value;

pub fn run(options: LoadOptions) -> String {
    let config_file_path = resolve_config_path(options.config_path.as_deref());
    let overrides = options.overrides.clone();
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, flag: Option<&str>, env_keys: &[&str]| {
        if let Some(flag) = flag {
            return format!("flag ({flag})");
        }
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let mut lines =
        vec!["effective config (source precedence: flag > env > file > default):".to_string()];

    lines.push(render_line(
        "admin.password",
        &redact_password(config.admin.password.expose_secret()),
        source(
            "admin.password",
            overrides.admin_password.as_ref().map(|_| "override"),
            &["CANTEEN_ADMIN_PASSWORD"],
        ),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        source(
            "logging.level",
            overrides.log_level.as_ref().map(|_| "--log-level"),
            &["CANTEEN_LOGGING_LEVEL", "CANTEEN_LOG_LEVEL"],
        ),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        source(
            "logging.format",
            overrides.log_format.as_ref().map(|_| "override"),
            &["CANTEEN_LOGGING_FORMAT", "CANTEEN_LOG_FORMAT"],
        ),
    ));

    lines.join("\n")
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

fn redact_password(password: &str) -> String {
    if password.is_empty() {
        return "<empty>".to_string();
    }
    if password == DEFAULT_ADMIN_PASSWORD {
        return "<redacted> (stock default, change it)".to_string();
    }

    "<redacted>".to_string()
}

#[cfg(test)]
mod tests {
    use toml::Value;

    use super::{contains_path, redact_password};

    #[test]
    fn dotted_paths_are_resolved_in_toml_documents() {
        let doc = "[admin]\npassword = \"x\"\n".parse::<Value>().expect("valid toml");

        assert!(contains_path(&doc, "admin.password"));
        assert!(!contains_path(&doc, "logging.level"));
    }

    #[test]
    fn passwords_are_never_rendered() {
        assert_eq!(redact_password(""), "<empty>");
        assert_eq!(redact_password("hunter2"), "<redacted>");
        assert!(redact_password("admin123").starts_with("<redacted>"));
    }
}
