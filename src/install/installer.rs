use std::io::{BufRead, Write};
use std::process::{Command, Stdio};
use std::time::Duration;

use anyhow::{Context, Result, bail};

use crate::config::Config;
use crate::docker::ContainerRuntime;
use crate::report;
use crate::stack;

use super::journal::{self, APACHE_READY_SENTINEL, INSTALL_DONE_SENTINEL};

/// One-time bootstrap of the whole stack.
///
/// Confirmation gate, git bootstrap, companion repo sync, companion
/// installer, image refresh, service restart, then journal verification.
/// Every step aborts on failure except the final web-server check, which
/// only reports.
pub fn run(cfg: &mut Config, runtime: &impl ContainerRuntime, assume_yes: bool) -> Result<()> {
    if !assume_yes {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        if !confirm(&mut stdin.lock(), &mut stdout)? {
            bail!("installation declined by operator");
        }
    }

    ensure_git()?;
    sync_repo(cfg)?;
    run_companion_install(cfg)?;
    stack::pull(cfg, runtime)?;
    restart_service(&cfg.service_unit)?;

    report::info(format!(
        "waiting for the installer to finish (watching {} for \"{INSTALL_DONE_SENTINEL}\")",
        cfg.service_unit
    ));
    journal::wait_for_sentinel(
        &cfg.service_unit,
        INSTALL_DONE_SENTINEL,
        Duration::from_secs(cfg.install_wait_secs),
    )?;

    verify_startup(cfg)
}

/// Prompt for y/n until a valid answer arrives.
///
/// Invalid input re-prompts rather than defaulting; EOF counts as a
/// decline so a closed stdin cannot loop forever.
pub fn confirm(input: &mut impl BufRead, output: &mut impl Write) -> std::io::Result<bool> {
    loop {
        write!(
            output,
            "This will install the wiki stack on this host. Continue? [y/n] "
        )?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => {}
        }
    }
}

/// Make sure git is on PATH, installing it if the probe fails.
fn ensure_git() -> Result<()> {
    let probe = Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    if matches!(probe, Ok(status) if status.success()) {
        return Ok(());
    }

    report::warn("git not found, installing");
    let status = Command::new("apt-get")
        .args(["install", "-y", "git"])
        .status()
        .context("failed to invoke apt-get")?;
    if !status.success() {
        bail!("failed to install git (exit {status})");
    }
    Ok(())
}

/// Clone the companion repository, or pull if it is already checked out.
fn sync_repo(cfg: &Config) -> Result<()> {
    if cfg.repo_dir.join(".git").exists() {
        report::info(format!("updating {}", cfg.repo_dir.display()));
        let status = Command::new("git")
            .arg("-C")
            .arg(&cfg.repo_dir)
            .arg("pull")
            .status()
            .context("failed to invoke git")?;
        if !status.success() {
            bail!("git pull in {} failed (exit {status})", cfg.repo_dir.display());
        }
    } else {
        report::info(format!("cloning {}", cfg.repo_url));
        let status = Command::new("git")
            .arg("clone")
            .arg(&cfg.repo_url)
            .arg(&cfg.repo_dir)
            .status()
            .context("failed to invoke git")?;
        if !status.success() {
            bail!("git clone {} failed (exit {status})", cfg.repo_url);
        }
    }
    Ok(())
}

/// Delegate to the companion repository's own installer, which exposes a
/// `do_install` entry point when sourced.
fn run_companion_install(cfg: &Config) -> Result<()> {
    report::info("running companion installer");
    let script = format!(
        "cd {} && source ./install.sh && do_install",
        shell_words::quote(&cfg.repo_dir.display().to_string())
    );
    let status = Command::new("bash")
        .args(["-c", &script])
        .status()
        .context("failed to invoke bash")?;
    if !status.success() {
        bail!("companion installer failed (exit {status})");
    }
    Ok(())
}

fn restart_service(unit: &str) -> Result<()> {
    report::info(format!("restarting {unit}"));
    let status = Command::new("systemctl")
        .args(["restart", unit])
        .status()
        .context("failed to invoke systemctl")?;
    if !status.success() {
        bail!("systemctl restart {unit} failed (exit {status})");
    }
    Ok(())
}

/// Check the last journal line for the Apache startup marker.
///
/// A missing marker is reported with the full journal for diagnosis but
/// does not fail the install — the containers may still converge.
fn verify_startup(cfg: &mut Config) -> Result<()> {
    let log = journal::read_full(&cfg.service_unit)?;

    match journal::last_line(&log) {
        Some(line) if line.contains(APACHE_READY_SENTINEL) => {
            let password = cfg.ensure_admin_password().to_string();
            report::info(format!("install complete, site available at {}", cfg.site_url()));
            report::info(format!("admin password: {}", shell_words::quote(&password)));
        }
        _ => {
            println!("{log}");
            report::error("web server did not report ready; full journal dumped above");
        }
    }
    Ok(())
}
