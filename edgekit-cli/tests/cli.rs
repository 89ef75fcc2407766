use std::{fs, path::Path, process::Command};

const BIN: &str = env!("CARGO_BIN_EXE_edgekit");

const SOBEL_OUTPUTS: [&str; 5] = [
    "horizontalGrad.pgm",
    "verticalGrad.pgm",
    "magnitudeMap.pgm",
    "liberalEdgeMap.pgm",
    "restrictiveEdgeMap.pgm",
];

const CANNY_OUTPUTS: [&str; 4] = [
    "horizontalGrad.pgm",
    "verticalGrad.pgm",
    "magnitudeMap.pgm",
    "peakMap.pgm",
];

/// An 8x8 greymap with a vertical step edge down the middle.
fn write_step_image(path: &Path) -> std::io::Result<()> {
    let mut bytes = b"P5\n8 8\n255\n".to_vec();
    for _ in 0..8 {
        bytes.extend_from_slice(&[0, 0, 0, 0, 200, 200, 200, 200]);
    }
    fs::write(path, bytes)
}

fn pgm_outputs(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".pgm") && name != "input.pgm")
        .collect::<Vec<_>>();
    names.sort();
    Ok(names)
}

fn sorted(names: &[&str]) -> Vec<String> {
    let mut names = names.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    names.sort();
    names
}

#[test]
fn sobel_writes_all_maps() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let input = tmp_dir.path().join("input.pgm");
    write_step_image(&input)?;

    let status = Command::new(BIN)
        .arg("sobel")
        .arg(&input)
        .arg("--output-dir")
        .arg(tmp_dir.path())
        .status()?;
    assert!(status.success());
    assert_eq!(pgm_outputs(tmp_dir.path())?, sorted(&SOBEL_OUTPUTS));

    let edges = fs::read(tmp_dir.path().join("liberalEdgeMap.pgm"))?;
    assert!(edges.starts_with(b"P5\n8 8\n255\n"));
    assert_eq!(edges.len(), b"P5\n8 8\n255\n".len() + 64);

    Ok(())
}

#[test]
fn canny_writes_all_maps() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let input = tmp_dir.path().join("input.pgm");
    write_step_image(&input)?;

    let status = Command::new(BIN)
        .arg("canny")
        .arg(&input)
        .arg("1.0")
        .arg("--output-dir")
        .arg(tmp_dir.path())
        .status()?;
    assert!(status.success());
    assert_eq!(pgm_outputs(tmp_dir.path())?, sorted(&CANNY_OUTPUTS));

    Ok(())
}

#[test]
fn malformed_input_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let input = tmp_dir.path().join("input.pgm");
    fs::write(&input, b"P2\n2 2\n255\n\x00\x00\x00\x00")?;

    let status = Command::new(BIN)
        .arg("sobel")
        .arg(&input)
        .arg("--output-dir")
        .arg(tmp_dir.path())
        .status()?;
    assert!(!status.success());
    assert!(pgm_outputs(tmp_dir.path())?.is_empty());

    Ok(())
}

#[test]
fn invalid_sigma_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let input = tmp_dir.path().join("input.pgm");
    write_step_image(&input)?;

    let status = Command::new(BIN)
        .arg("canny")
        .arg(&input)
        .arg("0.1")
        .arg("--output-dir")
        .arg(tmp_dir.path())
        .status()?;
    assert!(!status.success());
    assert!(pgm_outputs(tmp_dir.path())?.is_empty());

    Ok(())
}

#[test]
fn missing_input_fails() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;

    let status = Command::new(BIN)
        .arg("sobel")
        .arg(tmp_dir.path().join("nope.pgm"))
        .arg("--output-dir")
        .arg(tmp_dir.path())
        .status()?;
    assert!(!status.success());

    Ok(())
}

#[test]
fn failure_is_reported_once() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let input = tmp_dir.path().join("input.pgm");
    fs::write(&input, b"P2\n2 2\n255\n\x00\x00\x00\x00")?;

    let output = Command::new(BIN)
        .arg("sobel")
        .arg(&input)
        .arg("--output-dir")
        .arg(tmp_dir.path())
        .output()?;
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("expected magic token P5").count(), 1, "{stderr}");

    Ok(())
}
