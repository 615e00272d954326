//! Integration tests for depot

mod cli_tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn depot() -> Command {
        Command::cargo_bin("depot").unwrap()
    }

    /// Command with HOME pointed at a scratch directory so caches and
    /// config never touch the real user home
    fn depot_in(home: &TempDir) -> Command {
        let mut cmd = depot();
        cmd.env("HOME", home.path());
        cmd.env("XDG_CONFIG_HOME", home.path().join(".config"));
        cmd
    }

    #[test]
    fn help_displays() {
        depot()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Integration connector dependency manager"));
    }

    #[test]
    fn version_displays() {
        depot()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("depot"));
    }

    #[test]
    fn init_creates_manifest() {
        let dir = TempDir::new().unwrap();
        depot()
            .args(["init", "--path"])
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Created"));

        assert!(dir.path().join("depot.toml").is_file());
    }

    #[test]
    fn init_refuses_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("depot.toml"), "versioned_deployment = false").unwrap();

        depot()
            .args(["init", "--path"])
            .arg(dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn coords_resolves_known_driver_offline() {
        let home = TempDir::new().unwrap();
        depot_in(&home)
            .args(["coords", "--file", "postgresql-42.5.0.jar"])
            .assert()
            .success()
            .stdout(predicate::str::contains("org.postgresql"))
            .stdout(predicate::str::contains("42.5.0"));
    }

    #[test]
    fn coords_rejects_non_jar() {
        let home = TempDir::new().unwrap();
        depot_in(&home)
            .args(["coords", "--file", "driver.zip"])
            .assert()
            .success()
            .stdout(predicate::str::contains("could not be resolved"));
    }

    #[test]
    fn coords_without_input_fails() {
        let home = TempDir::new().unwrap();
        depot_in(&home)
            .arg("coords")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Provide --file"));
    }

    #[test]
    fn download_empty_project_succeeds() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        std::fs::write(
            project.path().join("depot.toml"),
            "versioned_deployment = false\n",
        )
        .unwrap();

        depot_in(&home)
            .args(["download", "--project"])
            .arg(project.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Success"));
    }

    #[test]
    fn status_empty_project() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();

        depot_in(&home)
            .args(["status", "--project"])
            .arg(project.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("No declared dependencies"));
    }

    #[test]
    fn config_show_prints_sections() {
        let home = TempDir::new().unwrap();
        depot_in(&home)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[registry]"));
    }

    #[test]
    fn config_path_prints_toml_path() {
        let home = TempDir::new().unwrap();
        depot_in(&home)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }
}
