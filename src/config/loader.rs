use std::path::Path;

use anyhow::{Context, Result};

use super::types::{CONFIG_FILE, Config, DATA_DIR};

/// Load configuration from the fixed data directory.
pub fn load_default() -> Result<Config> {
    load(Path::new(DATA_DIR))
}

/// Load configuration rooted at `data_dir`.
///
/// Resolution order mirrors shell `source` semantics: compiled defaults,
/// overlaid by the process environment, overlaid by the config file.
/// A missing config file is not an error.
pub fn load(data_dir: &Path) -> Result<Config> {
    let mut cfg = Config::defaults(data_dir);
    apply_environment(&mut cfg);

    let path = data_dir.join(CONFIG_FILE);
    if path.exists() {
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        for (key, value) in parse_env_file(&contents) {
            apply(&mut cfg, &key, value);
        }
    }

    Ok(cfg)
}

fn apply_environment(cfg: &mut Config) {
    if let Ok(pw) = std::env::var("ADMIN_PASS")
        && !pw.is_empty()
    {
        cfg.admin_password = Some(pw);
    }
    if let Ok(domain) = std::env::var("DOMAIN")
        && !domain.is_empty()
    {
        cfg.domain = domain;
    }
}

/// Parse a shell-sourceable key=value file.
///
/// Blank lines and `#` comments are skipped, an `export ` prefix is
/// tolerated, and matching single or double quotes around a value are
/// stripped. Lines without `=` are ignored — no schema validation.
pub fn parse_env_file(contents: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line).trim_start();

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        pairs.push((key.to_string(), unquote(value.trim()).to_string()));
    }

    pairs
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn apply(cfg: &mut Config, key: &str, value: String) {
    match key {
        "ADMIN_PASS" => cfg.admin_password = Some(value),
        "DOMAIN" => cfg.domain = value,
        "REPO_URL" => cfg.repo_url = value,
        "REPO_DIR" => cfg.repo_dir = value.into(),
        "SERVICE_UNIT" => cfg.service_unit = value,
        "DNS_IMAGE" => cfg.dns_image = value,
        "DB_IMAGE" => cfg.db_image = value,
        "APP_IMAGE" => cfg.app_image = value,
        "NODE_IMAGE" => cfg.node_image = value,
        "INSTALL_WAIT_SECS" => {
            if let Ok(secs) = value.parse() {
                cfg.install_wait_secs = secs;
            }
        }
        // Unknown keys come from the operator's own additions.
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load(dir.path()).unwrap();
        assert_eq!(cfg.domain, "wiki.example.com");
        assert_eq!(cfg.data_dir, dir.path());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "ADMIN_PASS=filepass1\nDOMAIN=wiki.internal\nDB_IMAGE=mysql:8\n",
        )
        .unwrap();

        let cfg = load(dir.path()).unwrap();
        assert_eq!(cfg.admin_password.as_deref(), Some("filepass1"));
        assert_eq!(cfg.domain, "wiki.internal");
        assert_eq!(cfg.db_image, "mysql:8");
    }

    #[test]
    fn configured_password_survives_generation() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "ADMIN_PASS=keepme01\n").unwrap();

        let mut cfg = load(dir.path()).unwrap();
        assert_eq!(cfg.ensure_admin_password(), "keepme01");
    }

    #[test]
    fn parser_skips_comments_and_blanks() {
        let pairs = parse_env_file("# comment\n\nDOMAIN=a.example\n  # indented\n");
        assert_eq!(pairs, vec![("DOMAIN".to_string(), "a.example".to_string())]);
    }

    #[test]
    fn parser_handles_export_and_quotes() {
        let pairs = parse_env_file("export ADMIN_PASS=\"pw with space\"\nDOMAIN='x.example'\n");
        assert_eq!(pairs[0], ("ADMIN_PASS".to_string(), "pw with space".to_string()));
        assert_eq!(pairs[1], ("DOMAIN".to_string(), "x.example".to_string()));
    }

    #[test]
    fn parser_ignores_lines_without_equals() {
        let pairs = parse_env_file("set -e\nDOMAIN=y.example\n");
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn value_may_contain_equals() {
        let pairs = parse_env_file("REPO_URL=https://host/repo.git?ref=main\n");
        assert_eq!(pairs[0].1, "https://host/repo.git?ref=main");
    }

    #[test]
    fn invalid_wait_value_keeps_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "INSTALL_WAIT_SECS=soon\n").unwrap();
        let cfg = load(dir.path()).unwrap();
        assert_eq!(cfg.install_wait_secs, 900);
    }
}
