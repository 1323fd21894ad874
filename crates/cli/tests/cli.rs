use assert_cmd::Command;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("invsys-cli").unwrap();
    cmd.env_remove("PORT")
        .env_remove("INVSYS_ENV")
        .env("INVSYS_CONFIG_DIR", env!("CARGO_TARGET_TMPDIR"))
        .env("INVSYS__DATABASE__URL", "memory://")
        .env("RUST_LOG", "error");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{:?}", output);
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn help_lists_subcommands() {
    let stdout = stdout_of(cli().arg("--help"));
    for command in ["serve", "reset", "seed", "config"] {
        assert!(stdout.contains(command), "missing {command}");
    }
}

#[test]
fn config_defaults_to_port_5000() {
    let stdout = stdout_of(cli().arg("config"));
    assert!(stdout.contains("server.port       = 5000"));
    assert!(stdout.contains("database.backend  = memory"));
}

#[test]
fn config_honors_port_variable() {
    let stdout = stdout_of(cli().env("PORT", "5050").arg("config"));
    assert!(stdout.contains("server.port       = 5050"));
}

#[test]
fn seed_succeeds_against_memory_backend() {
    cli().arg("seed").assert().success();
}

#[test]
fn unknown_environment_fails() {
    cli().env("INVSYS_ENV", "qa").arg("config").assert().failure();
}

#[test]
fn config_treats_empty_port_as_unset() {
    let stdout = stdout_of(cli().env("PORT", "").arg("config"));
    assert!(stdout.contains("server.port       = 5000"));
}
