use std::path::PathBuf;

use anyhow::Result;

/// Describes a detached container launch. [`to_args`](RunSpec::to_args)
/// assembles the full argument list passed to `docker`.
#[derive(Debug, Clone)]
pub struct RunSpec {
    pub name: String,
    pub image: String,
    /// Host path → container path bind mounts.
    pub volumes: Vec<(PathBuf, String)>,
    pub env: Vec<(String, String)>,
    /// DNS resolver address injected with `--dns`.
    pub dns: Option<String>,
}

impl RunSpec {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            volumes: Vec::new(),
            env: Vec::new(),
            dns: None,
        }
    }

    pub fn volume(mut self, host: impl Into<PathBuf>, container: impl Into<String>) -> Self {
        self.volumes.push((host.into(), container.into()));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn dns(mut self, address: impl Into<String>) -> Self {
        self.dns = Some(address.into());
        self
    }

    /// Assemble the `docker run` argument list.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "run".to_string(),
            "-d".to_string(),
            "--name".to_string(),
            self.name.clone(),
        ];
        for (host, container) in &self.volumes {
            args.push("-v".to_string());
            args.push(format!("{}:{container}", host.display()));
        }
        for (key, value) in &self.env {
            args.push("-e".to_string());
            args.push(format!("{key}={value}"));
        }
        if let Some(dns) = &self.dns {
            args.push("--dns".to_string());
            args.push(dns.clone());
        }
        args.push(self.image.clone());
        args
    }
}

/// Operations the stack needs from a container runtime.
///
/// Sequencing logic is generic over this trait so launch ordering can be
/// exercised without a daemon.
pub trait ContainerRuntime {
    /// Launch a detached container, returning its id.
    fn launch(&self, spec: &RunSpec) -> Result<String>;

    /// Force-remove a container by name. Fails if it does not exist.
    fn remove_force(&self, name: &str) -> Result<()>;

    /// Pull the latest version of an image.
    fn pull(&self, image: &str) -> Result<()>;

    /// The runtime-assigned IP address of a running container.
    fn ip_address(&self, name: &str) -> Result<String>;
}
