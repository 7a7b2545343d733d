use assert_cmd::Command;

#[test]
fn check_passes_against_memory_store() {
    let config_dir = std::env::temp_dir().join(format!("gamedex-cli-{}", std::process::id()));
    std::fs::create_dir_all(&config_dir).unwrap();

    Command::cargo_bin("gamedex")
        .unwrap()
        .arg("check")
        .env("GAMEDEX_CONFIG_DIR", &config_dir)
        .env("GAMEDEX_DATABASE__BACKEND", "memory")
        .assert()
        .success();

    std::fs::remove_dir_all(config_dir).ok();
}

#[test]
fn unknown_environment_fails() {
    Command::cargo_bin("gamedex")
        .unwrap()
        .arg("check")
        .env("GAMEDEX_ENV", "qa")
        .assert()
        .failure();
}
