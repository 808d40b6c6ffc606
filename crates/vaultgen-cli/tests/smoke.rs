//! End-to-end smoke test for the vaultgen binary.
//!
//! Writes a grants CSV to a temp dir, runs the real binary on it, and checks
//! the CSV on stdout, the log on stderr, and the exit code.
//!
//! Run with:
//!   cargo test -p vaultgen-cli --test smoke

use std::path::PathBuf;
use std::process::{Command, Output};

use ed25519_dalek::SigningKey;

// ── Helpers ──────────────────────────────────────────────────────────────────

const HEADER: &str = "Name,Amount,Key1,Key2,Key3,Key4,Key5,M,N";

/// Temp directory removed on drop.
struct TempDir(PathBuf);

impl TempDir {
    fn new(tag: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("vaultgen_smoke_{tag}_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.0.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn key_hex(seed: u8) -> String {
    hex::encode(SigningKey::from_bytes(&[seed; 32]).verifying_key().to_bytes())
}

fn vaultgen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vaultgen"))
        .args(args)
        .env("RUST_LOG", "info")
        .env("NO_COLOR", "1")
        .output()
        .expect("spawn vaultgen")
}

fn csv_rows(stdout: &[u8]) -> Vec<Vec<String>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(stdout)
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn grants_file_produces_accounts() {
    let dir = TempDir::new("grants");
    let (k1, k2, k3) = (key_hex(1), key_hex(2), key_hex(3));
    let input = format!(
        "{HEADER}\n\
         Alice,\"1,000\",{k1},,,,,,\n\
         Bob,500,{k1},{k2},,,,2,2\n\
         Carol,250,{k1},{k2},{k3},,,2,3\n\
         Dave,100,{k1},,,,,1,\n"
    );
    let path = dir.write("grants.csv", &input);

    let out = vaultgen(&[path.to_str().unwrap()]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let rows = csv_rows(&out.stdout);
    assert_eq!(
        rows[0],
        vec![
            "Name",
            "AmountInitial",
            "AmountTotal",
            "TemplateAddress",
            "VestingAddress",
            "VaultAddress",
            "VestStart",
            "VestEnd"
        ]
    );
    assert_eq!(rows.len(), 4, "Dave has m without n and is skipped");

    assert_eq!(rows[1][0], "record2");
    assert_eq!(rows[1][1], "250000000000");
    assert_eq!(rows[1][2], "1000000000000");
    assert_eq!(rows[2][0], "record3");
    assert_eq!(rows[3][0], "record4");
    for row in &rows[1..] {
        assert!(row[3..6].iter().all(|a| a.starts_with("sm1")));
        assert_eq!(row[6], "105120");
        assert_eq!(row[7], "420480");
    }
    // Same template everywhere, distinct vesting accounts per key set.
    assert_eq!(rows[1][3], rows[2][3]);
    assert_ne!(rows[1][4], rows[2][4]);

    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    for name in ["Alice", "Bob", "Carol", "Dave"] {
        assert!(!stdout.contains(name));
    }
    assert!(stderr.contains("skipping record"));
    assert_eq!(
        stderr.matches("vaulted issuance does not match expected total").count(),
        1
    );
}

#[test]
fn output_is_reproducible() {
    let dir = TempDir::new("repro");
    let input = format!("{HEADER}\nA,42,{},{},,,,,\n", key_hex(7), key_hex(8));
    let path = dir.write("grants.csv", &input);

    let first = vaultgen(&[path.to_str().unwrap()]);
    let second = vaultgen(&[path.to_str().unwrap()]);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn network_prefix_override() {
    let dir = TempDir::new("prefix");
    let path = dir.write("grants.csv", &format!("{HEADER}\nA,1,{},,,,,,\n", key_hex(1)));

    let out = vaultgen(&[path.to_str().unwrap(), "--network-prefix", "stest"]);
    assert!(out.status.success());
    let rows = csv_rows(&out.stdout);
    assert!(rows[1][4].starts_with("stest1"));
}

#[test]
fn params_file_sets_expected_total() {
    let dir = TempDir::new("params");
    let path = dir.write("grants.csv", &format!("{HEADER}\nA,1,{},,,,,,\n", key_hex(1)));
    let params = dir.write(
        "params.json",
        r#"{ "unit_multiplier": 100000, "expected_total": 100000 }"#,
    );

    let out = vaultgen(&[path.to_str().unwrap(), "--params", params.to_str().unwrap()]);
    assert!(out.status.success());
    let rows = csv_rows(&out.stdout);
    assert_eq!(rows[1][2], "100000");
    assert_eq!(rows[1][1], "25000");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!stderr.contains("does not match"));
}

#[test]
fn missing_file_fails() {
    let out = vaultgen(&["/nonexistent/grants.csv"]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn malformed_csv_fails_after_flushing_good_rows() {
    let dir = TempDir::new("malformed");
    let k = key_hex(1);
    let path = dir.write(
        "grants.csv",
        &format!("{HEADER}\nA,1,{k},,,,,,\nB,1,{k}\n"),
    );

    let out = vaultgen(&[path.to_str().unwrap()]);
    assert!(!out.status.success());
    let rows = csv_rows(&out.stdout);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][0], "record2");
}
