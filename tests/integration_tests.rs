//! Integration tests for umidedup.
//!
//! These tests run `run_dedup` over files on disk.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::TempDir;
use umidedup::{Args, DedupError, run_dedup};

const UMIS: &str = "AACGCCAT\nAAGGTACG\nAATTCCGG\n";

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn args(dir: &TempDir, input: &str, output: &str) -> Args {
    Args {
        input: dir.path().join(input),
        umi: write(dir.path(), "umis.txt", UMIS),
        output: dir.path().join(output),
        verbose: false,
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_three_duplicates_and_unknown_umi() {
    let dir = TempDir::new().unwrap();
    let input = "@HD\tVN:1.0\tSO:coordinate\n\
NS500451:154:HWKTMBGXX:1:11101:24260:1121:AACGCCAT\t0\t2\t10\t36\t71M\t*\t0\t0\tTCCA\tEEEE\n\
NS500451:154:HWKTMBGXX:1:11101:24260:1122:AACGCCAT\t0\t2\t13\t36\t3S68M\t*\t0\t0\tTCCA\tEEEE\n\
NS500451:154:HWKTMBGXX:1:11101:24260:1123:AACGCCAT\t0\t2\t10\t36\t71M\t*\t0\t0\tTCCA\tEEEE\n\
NS500451:154:HWKTMBGXX:1:11101:24260:1124:GGGGGGGG\t0\t2\t10\t36\t71M\t*\t0\t0\tTCCA\tEEEE\n";
    write(dir.path(), "in.sam", input);
    let args = args(&dir, "in.sam", "out.sam");

    let counts = run_dedup(&args).unwrap();
    assert_eq!(counts.header_lines, 1);
    assert_eq!(counts.unique_reads, 1);
    assert_eq!(counts.duplicates, 2);
    assert_eq!(counts.unknown_umis, 1);

    let lines = read_lines(&args.output);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "@HD\tVN:1.0\tSO:coordinate");
    assert!(lines[1].starts_with("NS500451:154:HWKTMBGXX:1:11101:24260:1121:AACGCCAT"));
}

#[test]
fn test_output_preserves_order_and_bytes() {
    let dir = TempDir::new().unwrap();
    let input = "@HD\tVN:1.0\r\n\
@SQ\tSN:1\tLN:1000\r\n\
r1:AACGCCAT\t16\t1\t100\t36\t30M6S\t*\t0\t0\tA\tE\tNH:i:1\r\n\
r2:AAGGTACG\t0\t1\t100\t36\t36M\t*\t0\t0\tA\tE\r\n\
@CO\tlate comment\r\n\
r3:AACGCCAT\t16\t1\t100\t36\t36M\t*\t0\t0\tA\tE\r\n\
r4:AACGCCAT\t0\t2\t100\t36\t36M\t*\t0\t0\tA\tE\r\n";
    write(dir.path(), "in.sam", input);
    let args = args(&dir, "in.sam", "out.sam");

    let counts = run_dedup(&args).unwrap();
    assert_eq!(counts.header_lines, 3);
    assert_eq!(counts.unique_reads, 3);
    assert_eq!(counts.duplicates, 1);

    // r3 shares r1's reverse-strand start of 135
    let expected: String = input
        .split_inclusive('\n')
        .filter(|l| !l.starts_with("r3:"))
        .collect();
    assert_eq!(fs::read_to_string(&args.output).unwrap(), expected);
}

#[test]
fn test_bgzf_input_and_output() {
    let dir = TempDir::new().unwrap();
    let input = "@HD\tVN:1.0\n\
r1:AATTCCGG\t0\t1\t100\t36\t36M\t*\t0\t0\tA\tE\n\
r2:AATTCCGG\t0\t1\t104\t36\t4S32M\t*\t0\t0\tA\tE\n";

    let mut writer = noodles::bgzf::io::Writer::new(fs::File::create(dir.path().join("in.sam.gz")).unwrap());
    writer.write_all(input.as_bytes()).unwrap();
    writer.finish().unwrap();

    let args = args(&dir, "in.sam.gz", "out.sam.gz");
    let counts = run_dedup(&args).unwrap();
    assert_eq!(counts.unique_reads, 1);
    assert_eq!(counts.duplicates, 1);

    let mut text = String::new();
    let mut reader = umidedup::io::open_input(&args.output).unwrap();
    std::io::Read::read_to_string(&mut reader, &mut text).unwrap();
    assert_eq!(text, "@HD\tVN:1.0\nr1:AATTCCGG\t0\t1\t100\t36\t36M\t*\t0\t0\tA\tE\n");
}

#[test]
fn test_malformed_cigar_aborts() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "in.sam",
        "r1:AACGCCAT\t0\t1\t100\t36\t36M\t*\t0\t0\tA\tE\nr2:AACGCCAT\t16\t1\t100\t36\t3?M\t*\t0\t0\tA\tE\n",
    );
    let args = args(&dir, "in.sam", "out.sam");

    let err = run_dedup(&args).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DedupError>(),
        Some(DedupError::MalformedCigar { .. })
    ));
    assert!(format!("{err:#}").contains("input line 2"));
}

#[test]
fn test_missing_whitelist_aborts_before_output() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "in.sam", "@HD\tVN:1.0\n");
    let args = Args {
        input: dir.path().join("in.sam"),
        umi: dir.path().join("missing.txt"),
        output: dir.path().join("out.sam"),
        verbose: false,
    };

    let err = run_dedup(&args).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DedupError>(),
        Some(DedupError::Config { role: "UMI whitelist", .. })
    ));
    assert!(!args.output.exists());
}

#[test]
fn test_missing_input_aborts() {
    let dir = TempDir::new().unwrap();
    let args = args(&dir, "missing.sam", "out.sam");
    let err = run_dedup(&args).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DedupError>(),
        Some(DedupError::Config { role: "input SAM", .. })
    ));
}
