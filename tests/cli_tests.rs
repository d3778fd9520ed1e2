use assert_cmd::cargo::cargo_bin_cmd;

/// `--help` exits successfully and documents the flags.
#[test]
fn test_cli_help_success() {
    let mut cmd = cargo_bin_cmd!("crs-manage");

    let assert = cmd.arg("--help").assert().success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    for flag in ["--api-key", "--filename", "--hostname"] {
        assert!(stdout.contains(flag), "help is missing {flag}:\n{stdout}");
    }
}

/// Missing `-a` is a usage error with a non-zero exit code.
#[test]
fn test_cli_missing_api_key_is_usage_error() {
    let mut cmd = cargo_bin_cmd!("crs-manage");
    cmd.env_remove("CRS_API_KEY").env_remove("CRS_HOSTNAME");

    let assert = cmd.args(["-f", "reference.jpg"]).assert().failure().code(2);

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("--api-key"), "unexpected stderr:\n{stderr}");
}

/// Missing `-f` is a usage error with a non-zero exit code.
#[test]
fn test_cli_missing_filename_is_usage_error() {
    let mut cmd = cargo_bin_cmd!("crs-manage");

    let assert = cmd.args(["-a", "key"]).assert().failure().code(2);

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("--filename"), "unexpected stderr:\n{stderr}");
}

/// A zero page size is a usage error rather than an unbounded listing.
#[test]
fn test_cli_zero_items_per_page_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("ref.jpg");
    std::fs::write(&image, b"jpeg").unwrap();
    let mut cmd = cargo_bin_cmd!("crs-manage");

    let assert = cmd
        .arg("-a")
        .arg("key")
        .arg("-f")
        .arg(&image)
        .args(["-n", "0", "-H", "http://127.0.0.1:1"])
        .assert()
        .failure()
        .code(2);

    let out = assert.get_output();
    let stderr = String::from_utf8_lossy(&out.stderr).into_owned();
    assert!(stderr.contains("--items-per-page"), "unexpected stderr:\n{stderr}");
    assert!(out.stdout.is_empty());
}

/// A reference image that does not exist stops the run before any call.
#[test]
fn test_cli_nonexistent_image_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.jpg");
    let mut cmd = cargo_bin_cmd!("crs-manage");
    cmd.env_remove("CRS_HOSTNAME");

    let assert = cmd
        .arg("-a")
        .arg("key")
        .arg("-f")
        .arg(&missing)
        // Unroutable on purpose: the run must stop before reaching it.
        .args(["-H", "http://127.0.0.1:1"])
        .assert()
        .failure()
        .code(2);

    let out = assert.get_output();
    let stderr = String::from_utf8_lossy(&out.stderr).into_owned();
    assert!(stderr.contains("reference image not found"), "unexpected stderr:\n{stderr}");
    assert!(out.stdout.is_empty());
}

/// A failed call ends the run with a non-zero exit and the step in the error.
#[test]
fn test_cli_unreachable_host_fails() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("ref.jpg");
    std::fs::write(&image, b"jpeg").unwrap();
    let mut cmd = cargo_bin_cmd!("crs-manage");

    let assert = cmd
        .arg("-a")
        .arg("key")
        .arg("-f")
        .arg(&image)
        .args(["-H", "http://127.0.0.1:1", "--timeout", "2"])
        .assert()
        .failure()
        .code(1);

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(
        stderr.contains("Retrieving first 5 collections failed"),
        "unexpected stderr:\n{stderr}"
    );
}
