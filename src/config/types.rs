use std::path::{Path, PathBuf};

use crate::secrets;

/// Host path holding all durable per-service state.
pub const DATA_DIR: &str = "/data";

/// Name of the key=value config file inside the data directory.
pub const CONFIG_FILE: &str = "config.env";

/// Resolved runtime configuration, loaded once at startup and threaded
/// through explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    /// Wiki admin password. `None` until configured or generated.
    pub admin_password: Option<String>,
    /// Public domain the wiki is served under.
    pub domain: String,
    /// Base directory for bind-mounted service state.
    pub data_dir: PathBuf,
    /// Companion bootstrap repository.
    pub repo_url: String,
    pub repo_dir: PathBuf,
    /// systemd unit supervising the stack.
    pub service_unit: String,
    pub dns_image: String,
    pub db_image: String,
    pub app_image: String,
    pub node_image: String,
    /// Upper bound on the post-restart journal wait, in seconds.
    pub install_wait_secs: u64,
}

impl Config {
    /// Defaults rooted at the given data directory.
    pub fn defaults(data_dir: &Path) -> Self {
        Self {
            admin_password: None,
            domain: "wiki.example.com".to_string(),
            data_dir: data_dir.to_path_buf(),
            repo_url: "https://github.com/wikistack/wikistack-bootstrap.git".to_string(),
            repo_dir: PathBuf::from("/opt/wikistack-bootstrap"),
            service_unit: "wikistack.service".to_string(),
            dns_image: "mgood/resolvable:latest".to_string(),
            db_image: "mysql:5.7".to_string(),
            app_image: "wikistack/mediawiki:latest".to_string(),
            node_image: "wikistack/node-services:latest".to_string(),
            install_wait_secs: 900,
        }
    }

    /// The site URL the application advertises.
    pub fn site_url(&self) -> String {
        format!("https://{}", self.domain)
    }

    /// Return the admin password, generating one on first use.
    ///
    /// A password set by the config file or the environment is never
    /// replaced, and the generated value stays stable for the rest of
    /// the process.
    pub fn ensure_admin_password(&mut self) -> &str {
        self.admin_password
            .get_or_insert_with(|| secrets::generate_password(secrets::PASSWORD_LEN))
            .as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_url_uses_domain() {
        let cfg = Config::defaults(Path::new("/data"));
        assert_eq!(cfg.site_url(), "https://wiki.example.com");
    }

    #[test]
    fn password_generated_once_and_reused() {
        let mut cfg = Config::defaults(Path::new("/data"));
        let first = cfg.ensure_admin_password().to_string();
        let second = cfg.ensure_admin_password().to_string();
        assert_eq!(first, second);
        assert_eq!(first.len(), 8);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn configured_password_is_not_overwritten() {
        let mut cfg = Config::defaults(Path::new("/data"));
        cfg.admin_password = Some("s3cretpw".to_string());
        assert_eq!(cfg.ensure_admin_password(), "s3cretpw");
    }
}
