use std::process::{Command, Output};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use super::types::{ContainerRuntime, RunSpec};

/// Verify that the Docker daemon is reachable.
pub fn ensure_available() -> Result<()> {
    let status = Command::new("docker")
        .args(["version", "--format", "{{.Server.Version}}"])
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .context("failed to invoke `docker` — is it installed and on PATH?")?;

    if !status.success() {
        bail!("docker daemon is not running (exit {})", status);
    }
    Ok(())
}

fn run_docker(args: &[String]) -> Result<Output> {
    let output = Command::new("docker")
        .args(args)
        .output()
        .context("failed to spawn docker process")?;

    if !output.status.success() {
        bail!(
            "docker {} failed (exit {}): {}",
            args.first().map(String::as_str).unwrap_or(""),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(output)
}

/// `docker inspect` output, reduced to the fields we read.
#[derive(Debug, Deserialize)]
struct InspectEntry {
    #[serde(rename = "NetworkSettings")]
    network_settings: NetworkSettings,
}

#[derive(Debug, Deserialize)]
struct NetworkSettings {
    #[serde(rename = "IPAddress")]
    ip_address: String,
}

/// [`ContainerRuntime`] backed by the `docker` CLI.
pub struct CliRuntime;

impl ContainerRuntime for CliRuntime {
    fn launch(&self, spec: &RunSpec) -> Result<String> {
        let output = run_docker(&spec.to_args())
            .with_context(|| format!("failed to launch container {}", spec.name))?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn remove_force(&self, name: &str) -> Result<()> {
        run_docker(&["rm".into(), "-f".into(), name.into()])?;
        Ok(())
    }

    fn pull(&self, image: &str) -> Result<()> {
        let status = Command::new("docker")
            .args(["pull", image])
            .status()
            .context("failed to spawn docker process")?;
        if !status.success() {
            bail!("docker pull {image} failed (exit {status})");
        }
        Ok(())
    }

    fn ip_address(&self, name: &str) -> Result<String> {
        let output = run_docker(&["inspect".into(), name.into()])?;
        let entries: Vec<InspectEntry> = serde_json::from_slice(&output.stdout)
            .with_context(|| format!("unexpected `docker inspect {name}` output"))?;

        let ip = entries
            .first()
            .map(|e| e.network_settings.ip_address.as_str())
            .unwrap_or_default();
        if ip.is_empty() {
            bail!("container {name} has no assigned IP address");
        }
        Ok(ip.to_string())
    }
}
