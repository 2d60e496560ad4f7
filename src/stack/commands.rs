use crate::config::Config;
use crate::docker::RunSpec;

pub const DNS_CONTAINER: &str = "wiki-dns";
pub const DB_CONTAINER: &str = "wiki-db";
pub const APP_CONTAINER: &str = "wiki-app";
pub const NODE_CONTAINER: &str = "wiki-node";

/// All stack containers, in launch order.
pub const CONTAINERS: [&str; 4] = [DNS_CONTAINER, DB_CONTAINER, APP_CONTAINER, NODE_CONTAINER];

/// DNS resolver. Watches the Docker socket so it can resolve the other
/// containers by name; launched first, its address feeds every other spec.
pub fn dns_spec(cfg: &Config) -> RunSpec {
    RunSpec::new(DNS_CONTAINER, &cfg.dns_image)
        .volume("/var/run/docker.sock", "/tmp/docker.sock")
}

/// Database. State lives on the host under the data directory.
pub fn db_spec(cfg: &Config, admin_password: &str, dns_ip: &str) -> RunSpec {
    RunSpec::new(DB_CONTAINER, &cfg.db_image)
        .volume(cfg.data_dir.join("mysql"), "/var/lib/mysql")
        .env("MYSQL_ROOT_PASSWORD", admin_password)
        .dns(dns_ip)
}

/// MediaWiki application.
pub fn app_spec(cfg: &Config, admin_password: &str, dns_ip: &str) -> RunSpec {
    RunSpec::new(APP_CONTAINER, &cfg.app_image)
        .volume(cfg.data_dir.join("mediawiki"), "/var/www/html/images")
        .env("MEDIAWIKI_ADMIN_PASS", admin_password)
        .env("MEDIAWIKI_DOMAIN", &cfg.domain)
        .env("MEDIAWIKI_SITE_SERVER", cfg.site_url())
        .env("MEDIAWIKI_DB_HOST", DB_CONTAINER)
        .dns(dns_ip)
}

/// Auxiliary node services.
pub fn node_spec(cfg: &Config, dns_ip: &str) -> RunSpec {
    RunSpec::new(NODE_CONTAINER, &cfg.node_image)
        .volume(cfg.data_dir.join("node"), "/srv/node/data")
        .env("WIKI_DOMAIN", &cfg.domain)
        .dns(dns_ip)
}
