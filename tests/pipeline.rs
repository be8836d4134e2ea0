use std::io::Write;
use std::process::{Command, Stdio};
use vecsort::{run, Config, Termination, VecsortError};

const TRIANGLE: &str = "P0,255,0\nM0,0\nL10,0\nL10,10\nC\nX\n";

fn run_job(input: &str, config: &Config) -> (String, String) {
    let mut out = Vec::new();
    let mut diag = Vec::new();
    run(input.as_bytes(), &mut out, &mut diag, config).unwrap();
    (String::from_utf8(out).unwrap(), String::from_utf8(diag).unwrap())
}

fn run_binary(input: &str) -> std::process::Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_vecsort"))
        .env_remove("VECSORT_CONFIG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_triangle_end_to_end() {
    let (out, diag) = run_job(TRIANGLE, &Config::default());

    assert_eq!(
        out,
        ";PU0.000,0.000;PD0.000,10.000,10.000,10.000,0.000,0.000"
    );
    assert_eq!(
        diag,
        "read 2 segments\n\
         Cuts: 3 len 34\nMove: 0 len 0\n\
         Cuts: 0 len 0\nMove: 0 len 0\n\
         Cuts: 0 len 0\nMove: 0 len 0\n\
         ---\n\
         Cuts: 3 len 34\nMove: 0 len 0\n\
         Cuts: 0 len 0\nMove: 0 len 0\n\
         Cuts: 0 len 0\nMove: 0 len 0\n"
    );
}

#[test]
fn test_redrawn_edge_is_not_cut_twice() {
    let input = "P0,255,0\nM0,0\nL10,0\nL10,10\nC\nL0,0\nX\n";
    let (out, _) = run_job(input, &Config::default());
    assert_eq!(
        out,
        ";PU0.000,0.000;PD0.000,10.000,10.000,10.000,0.000,0.000"
    );
}

#[test]
fn test_fatal_color_produces_no_output() {
    let mut out = Vec::new();
    let mut diag = Vec::new();
    let err = run(
        "P10,10,10\nM0,0\nL1,1\nX\n".as_bytes(),
        &mut out,
        &mut diag,
        &Config::default(),
    )
    .unwrap_err();

    assert!(matches!(err, VecsortError::Parse(ref e) if e.is_malformed_color()));
    assert!(out.is_empty());
    assert!(diag.is_empty());
}

#[test]
fn test_unknown_command_still_emits_earlier_segments() {
    let mut out = Vec::new();
    let mut diag = Vec::new();
    let summary = run(
        "M5,0\nL6,0\n?\nL7,0\n".as_bytes(),
        &mut out,
        &mut diag,
        &Config::default(),
    )
    .unwrap();

    assert_eq!(summary.termination, Termination::UnknownCommand('?'));
    assert_eq!(String::from_utf8(out).unwrap(), ";PU0.000,5.000;PD0.000,6.000");
    assert!(String::from_utf8(diag)
        .unwrap()
        .starts_with("Unknown command '?'read 1 segments\n"));
}

#[test]
fn test_passes_emit_in_green_red_blue_order() {
    let input = "P255,0,0\nM3,0\nL4,0\nP0,0,255\nM2,0\nL3,0\nP0,255,0\nM1,0\nL2,0\nX\n";
    let (out, _) = run_job(input, &Config::default());
    assert_eq!(
        out,
        ";PU0.000,1.000;PD0.000,2.000;PU0.000,2.000;PD0.000,3.000;PU0.000,3.000;PD0.000,4.000"
    );
}

#[test]
fn test_configured_start_position() {
    let mut config = Config::default();
    config.tour.start = vecsort::Point::new(10.0, 0.0);

    let (out, _) = run_job("M0,0\nL9,0\nX\n", &config);
    assert_eq!(out, ";PU0.000,9.000;PD0.000,0.000");
}

#[test]
fn test_binary_success_status() {
    let output = run_binary(TRIANGLE);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        ";PU0.000,0.000;PD0.000,10.000,10.000,10.000,0.000,0.000"
    );
}

#[test]
fn test_binary_fatal_color_status() {
    let output = run_binary("P10,10,10\nM0,0\nL1,1\nX\n");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr)
        .unwrap()
        .contains("non-red/green/blue vector? 10,10,10"));
}

#[test]
fn test_binary_unknown_command_is_not_a_failure() {
    let output = run_binary("M0,0\nL1,0\nQ\n");
    assert!(output.status.success());
    assert!(!output.stdout.is_empty());
}

#[test]
fn test_huge_coordinates_do_not_stall_the_tour() {
    let mut out = Vec::new();
    let mut diag = Vec::new();
    let summary = run(
        "M0,0\nL1,0\nM1e200,0\nL2e200,0\nX\n".as_bytes(),
        &mut out,
        &mut diag,
        &Config::default(),
    )
    .unwrap();

    assert_eq!(summary.passes[0].after.cuts, 2);
    assert_eq!(summary.cursor.position(), vecsort::Point::new(2.0e200, 0.0));
    assert!(String::from_utf8(out)
        .unwrap()
        .starts_with(";PU0.000,0.000;PD0.000,1.000;PU0.000,1"));
}
