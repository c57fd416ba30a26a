//! Integration test: Verify binary prints correct version

use std::process::Command;

#[test]
fn binary_prints_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_nftdeck"))
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "Expected version in output, got: {}",
        stdout
    );
}

#[test]
fn missing_safe_address_fails_before_touching_the_terminal() {
    let dir = std::env::temp_dir().join("nftdeck_version_test_state");
    let output = Command::new(env!("CARGO_BIN_EXE_nftdeck"))
        .env("NFTDECK_CONFIG", dir.join("absent.toml"))
        .env("HOME", &dir)
        .env("XDG_STATE_HOME", dir.join("state"))
        .env_remove("NFTDECK_GATEWAY_URL")
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("MissingSafeAddress"), "stderr: {stderr}");
}
