//! Tests for the cadmin help output

use std::process::Command;

#[test]
fn test_no_args_shows_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_cadmin"))
        .output()
        .expect("Failed to execute cadmin command");

    assert!(output.status.success(), "Command should exit successfully");

    let stdout = String::from_utf8_lossy(&output.stdout);

    for section in ["Usage:", "Commands:", "Options:"] {
        assert!(
            stdout.contains(section),
            "Output should contain '{section}': {stdout}"
        );
    }
}

#[test]
fn test_nodes_help_lists_subcommands() {
    let output = Command::new(env!("CARGO_BIN_EXE_cadmin"))
        .args(["nodes", "--help"])
        .output()
        .expect("Failed to execute cadmin command");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for subcommand in ["list", "move", "reset"] {
        assert!(stdout.contains(subcommand), "Missing '{subcommand}': {stdout}");
    }
}
