/// Smoke tests to verify the binary runs without panicking
use std::process::Command;

fn glyphfield() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_glyphfield"));
    // keep a developer's own settings file out of the way
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("glyphfield-smoke-empty"));
    cmd
}

#[test]
fn binary_shows_help() {
    let output = glyphfield().arg("--help").output().expect("Failed to run glyphfield");

    assert!(
        output.status.success(),
        "Binary failed to run --help: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("glyphfield"), "Help output should mention glyphfield");
    assert!(stdout.contains("show"));
    assert!(stdout.contains("print"));
    assert!(stdout.contains("list"));
}

#[test]
fn binary_shows_version() {
    let output = glyphfield().arg("--version").output().expect("Failed to run glyphfield");

    assert!(
        output.status.success(),
        "Binary failed to run --version: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn invalid_subcommand_fails_gracefully() {
    let output = glyphfield().arg("nonexistent-command").output().expect("Failed to run glyphfield");

    // Should fail with error, not panic
    assert!(!output.status.success(), "Invalid subcommand should return error status");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("panicked at"), "Invalid subcommand should not cause panic");
}

#[test]
fn list_shows_every_pattern() {
    let output = glyphfield().arg("list").output().expect("Failed to run glyphfield");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 23);
    assert!(stdout.contains("soft-waves"));
    assert!(stdout.lines().filter(|l| l.contains("(audio)")).count() == 2);
}

#[test]
fn print_emits_the_requested_size() {
    let output = glyphfield()
        .args(["print", "--pattern", "soft-waves", "--cols", "40", "--rows", "20"])
        .output()
        .expect("Failed to run glyphfield");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 20);
    assert!(lines.iter().all(|l| l.chars().count() == 40));
    assert!(stdout.chars().any(|c| c != ' ' && c != '\n'));
}

#[test]
fn print_is_deterministic() {
    let run = || {
        glyphfield()
            .args(["print", "-P", "starry-night", "--frame", "123.5", "--cols", "30", "--rows", "10"])
            .output()
            .expect("Failed to run glyphfield")
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn colored_print_uses_truecolor() {
    let output = glyphfield()
        .args(["print", "-P", "dot-field", "--cols", "20", "--rows", "5", "--color"])
        .output()
        .expect("Failed to run glyphfield");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("\x1b[38;2;"));
}

#[test]
fn unknown_pattern_falls_back() {
    let output = glyphfield()
        .args(["print", "-P", "no-such-pattern", "--cols", "10", "--rows", "4"])
        .output()
        .expect("Failed to run glyphfield");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown pattern"));
}

#[test]
fn malformed_settings_are_logged_with_debug() {
    let config_home = std::env::temp_dir().join("glyphfield-smoke-malformed");
    let dir = config_home.join("glyphfield");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "fps = [not toml").unwrap();

    let log = std::path::Path::new("/tmp/glyphfield.log");
    let before = std::fs::metadata(log).map(|m| m.len()).unwrap_or(0) as usize;

    let output = Command::new(env!("CARGO_BIN_EXE_glyphfield"))
        .env("XDG_CONFIG_HOME", &config_home)
        .args(["list", "--debug"])
        .output()
        .expect("Failed to run glyphfield");
    assert!(output.status.success());

    let text = std::fs::read(log).unwrap();
    let appended = String::from_utf8_lossy(&text[before.min(text.len())..]);
    assert!(appended.contains("ignoring malformed settings"), "log was: {}", appended);
}
