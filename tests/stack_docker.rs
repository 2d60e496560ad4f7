//! Integration tests for the stack orchestration against a real daemon.
//!
//! These require a running Docker daemon and are marked `#[ignore]`.
//! Run with: `cargo test -- --ignored`

use std::path::Path;

use wikistack::config::Config;
use wikistack::docker::{CliRuntime, ContainerRuntime, RunSpec};
use wikistack::stack;

const TEST_CONTAINER: &str = "wikistack-test";

fn cleanup(runtime: &CliRuntime) {
    let _ = runtime.remove_force(TEST_CONTAINER);
}

#[test]
#[ignore]
fn launch_inspect_remove_roundtrip() {
    let runtime = CliRuntime;
    cleanup(&runtime);

    let spec = RunSpec::new(TEST_CONTAINER, "alpine:3").env("MARKER", "wikistack");
    let id = runtime.launch(&spec).expect("launch should succeed");
    assert!(!id.is_empty());

    // Alpine without a command may exit before inspection, so the address
    // lookup is allowed to fail; removal of an existing container is not.
    let _ = runtime.ip_address(TEST_CONTAINER);

    runtime
        .remove_force(TEST_CONTAINER)
        .expect("removal of an existing container should succeed");
}

#[test]
#[ignore]
fn remove_of_absent_container_fails() {
    let runtime = CliRuntime;
    cleanup(&runtime);

    // `stop` depends on this error being reported (and then swallowed).
    assert!(runtime.remove_force(TEST_CONTAINER).is_err());
}

#[test]
#[ignore]
fn stop_is_idempotent_against_real_daemon() {
    let runtime = CliRuntime;

    // No stack containers exist in CI; both calls must complete quietly.
    stack::stop(&runtime);
    stack::stop(&runtime);
}

#[test]
#[ignore]
fn pull_refreshes_a_small_image() {
    let runtime = CliRuntime;
    let mut cfg = Config::defaults(Path::new("/tmp/wikistack-test"));
    cfg.dns_image = "alpine:3".to_string();
    cfg.db_image = "alpine:3".to_string();
    cfg.app_image = "alpine:3".to_string();
    cfg.node_image = "alpine:3".to_string();

    stack::pull(&cfg, &runtime).expect("pulling alpine should succeed");
}
