use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::Write;

fn lightsail() -> Command {
    Command::cargo_bin("lightsail").expect("lightsail bin")
}

#[test]
fn full_flight_arrives_at_proxima() {
    lightsail()
        .args(["--unpaced", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ARRIVED at Proxima Centauri b"))
        .stdout(predicate::str::contains("Outcome        : arrived"))
        .stdout(predicate::str::contains("Final speed    : 59960.00 km/s (20.00% c)"));
}

#[test]
fn tick_limit_ends_the_run_early() {
    lightsail()
        .args(["--unpaced", "--quiet", "--max-ticks", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stopped at tick limit"))
        .stdout(predicate::str::contains("Ticks          : 50"))
        .stdout(predicate::str::contains("ARRIVED").not());
}

#[test]
fn live_overlay_prints_title_and_telemetry() {
    lightsail()
        .args(["--unpaced", "--max-ticks", "3", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Light Sail to Proxima Centauri b"))
        .stdout(predicate::str::contains("Accel: 3.3022e+05 m/s²"))
        .stdout(predicate::str::contains("Distance: "));
}

#[test]
fn config_file_selects_policy_and_limit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("run.toml");
    let mut file = File::create(&config_path).expect("config create");
    writeln!(
        file,
        "[simulation]\nframe_rate_hz = 0\nstep_policy = \"persistent\"\nmax_ticks = 40\n\n[scene]\nstar_count = 10"
    )
    .unwrap();

    lightsail()
        .args(["--quiet", "--config", config_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ticks          : 40"))
        .stdout(predicate::str::contains("Laser cutoff   : tick"));
}

#[test]
fn frames_dir_receives_snapshots() {
    let dir = tempfile::tempdir().expect("tempdir");
    let frames = dir.path().join("frames");
    let config_path = dir.path().join("run.yaml");
    fs::write(
        &config_path,
        "render:\n  width: 320\n  height: 200\n  labels: false\nscene:\n  star_count: 50\n",
    )
    .expect("config write");

    lightsail()
        .args([
            "--quiet",
            "--unpaced",
            "--max-ticks",
            "6",
            "--frame-every",
            "3",
            "--config",
            config_path.to_str().unwrap(),
            "--frames-dir",
            frames.to_str().unwrap(),
        ])
        .assert()
        .success();

    for name in ["frame_00000003.png", "frame_00000006.png", "final.png"] {
        let metadata = fs::metadata(frames.join(name)).expect("png metadata");
        assert!(metadata.len() > 0, "{name} should not be empty");
    }
}

#[test]
fn unsupported_config_extension_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("run.json");
    fs::write(&config_path, "{}").expect("config write");

    lightsail()
        .args(["--quiet", "--config", config_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported config format"));
}

#[test]
fn zero_frame_interval_is_rejected() {
    lightsail()
        .args(["--quiet", "--unpaced", "--frame-every", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("frame_every"));
}
