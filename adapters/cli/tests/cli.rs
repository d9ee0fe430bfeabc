use std::process::Command;

fn corner_rush(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_corner-rush"))
        .args(args)
        .output()
        .expect("failed to launch corner-rush")
}

#[test]
fn help_lists_every_profile() {
    let output = corner_rush(&["--help"]);
    assert!(output.status.success());

    let help = String::from_utf8(output.stdout).expect("utf-8 help");
    for needle in ["--profile", "--seed", "--log-format", "corner-rush", "starter", "siege"] {
        assert!(help.contains(needle), "help is missing {needle}:\n{help}");
    }
}

#[test]
fn unknown_profile_is_rejected() {
    let output = corner_rush(&["--profile", "turtle"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("turtle"), "unexpected error output:\n{stderr}");
}
