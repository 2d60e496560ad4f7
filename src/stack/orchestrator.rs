use anyhow::{Context, Result};

use crate::config::Config;
use crate::docker::ContainerRuntime;
use crate::report;

use super::commands::{self, CONTAINERS, DNS_CONTAINER};

/// Launch the stack in dependency order.
///
/// The DNS resolver goes first; its runtime-assigned address is read back
/// and handed to every subsequent container so in-stack name resolution
/// works. The first failed launch aborts — containers already running are
/// left as they are, with no rollback or retry.
pub fn start(cfg: &mut Config, runtime: &impl ContainerRuntime) -> Result<()> {
    let password = cfg.ensure_admin_password().to_string();

    report::info(format!("starting {DNS_CONTAINER}"));
    runtime
        .launch(&commands::dns_spec(cfg))
        .context("DNS resolver failed to start")?;
    let dns_ip = runtime
        .ip_address(DNS_CONTAINER)
        .context("could not determine DNS resolver address")?;

    for spec in [
        commands::db_spec(cfg, &password, &dns_ip),
        commands::app_spec(cfg, &password, &dns_ip),
        commands::node_spec(cfg, &dns_ip),
    ] {
        report::info(format!("starting {}", spec.name));
        let name = spec.name.clone();
        runtime
            .launch(&spec)
            .with_context(|| format!("{name} failed to start"))?;
    }

    Ok(())
}

/// Force-remove every stack container by name.
///
/// Removal errors are swallowed — the usual cause is that the container
/// does not exist, and `stop` must be safe to call when nothing runs.
pub fn stop(runtime: &impl ContainerRuntime) {
    for name in CONTAINERS {
        if runtime.remove_force(name).is_ok() {
            report::info(format!("removed {name}"));
        }
    }
}

/// Refresh every stack image. Failures propagate.
pub fn pull(cfg: &Config, runtime: &impl ContainerRuntime) -> Result<()> {
    for image in [
        &cfg.dns_image,
        &cfg.db_image,
        &cfg.app_image,
        &cfg.node_image,
    ] {
        report::info(format!("pulling {image}"));
        runtime
            .pull(image)
            .with_context(|| format!("failed to pull {image}"))?;
    }
    Ok(())
}
