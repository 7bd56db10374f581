//! Custom cargo commands for the smoki crate.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests
//!   cargo xtask kani      - Run Kani proofs
//!   cargo xtask check     - Quick check (no Kani)

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("kani") => kani()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Run full verification suite (tests + Kani + proof copy alignment)
  test      Run all Rust tests
  kani      Run Kani proofs only
  check     Quick check (cargo test + clippy, no Kani)
  bench     Run benchmarks
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("Smoki Verification Suite");
    println!("==========================================\n");

    println!("[1/5] Checking invariant markers...");
    check_invariant_markers()?;
    println!("✓ Invariant markers present\n");

    println!("[2/5] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[3/5] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[4/5] Running Kani proofs...");
    kani()?;
    println!("✓ Kani proofs hold\n");

    println!("[5/5] Verifying proof copies match the crate...");
    verify_proof_copies()?;
    println!("✓ Proof copies aligned\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");
    println!("\nSafe to commit changes.");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Run Kani proofs
fn kani() -> Result<()> {
    let proofs_dir = project_root()?.join("kani-proofs");
    if !proofs_dir.exists() {
        println!("  (no kani-proofs directory, skipping)");
        return Ok(());
    }

    let status = Command::new("cargo")
        .arg("kani")
        .current_dir(&proofs_dir)
        .status()
        .context("Failed to run cargo kani (is kani-verifier installed?)")?;

    if !status.success() {
        bail!("Kani proofs failed");
    }

    Ok(())
}

/// Quick check (no Kani)
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

fn check_invariant_markers() -> Result<()> {
    let root = project_root()?;
    let src_dir = root.join("src");

    let output = Command::new("grep")
        .args(["-r", "INVARIANT:", "--include=*.rs"])
        .current_dir(&src_dir)
        .output()
        .context("Failed to run grep")?;

    let count = output.stdout.split(|&b| b == b'\n').filter(|l| !l.is_empty()).count();

    if count < 5 {
        bail!(
            "Expected at least 5 INVARIANT markers, found {}. Someone may have removed safety comments!",
            count
        );
    }

    Ok(())
}

/// Functions duplicated into kani-proofs, with the file holding the original.
const PROOF_COPIES: &[(&str, &str)] = &[
    ("src/block/growth.rs", "pub const fn grown_capacity"),
    ("src/signal.rs", "pub fn increment_bits"),
];

/// The Kani crate proves copies of pure functions; the copies must not drift.
fn verify_proof_copies() -> Result<()> {
    let root = project_root()?;

    let proofs_path = root.join("kani-proofs/src/lib.rs");
    if !proofs_path.exists() {
        println!("  (no kani-proofs/src/lib.rs, skipping copy check)");
        return Ok(());
    }
    let proofs_src = std::fs::read_to_string(&proofs_path)
        .context("Failed to read kani-proofs/src/lib.rs")?;

    for (source, signature) in PROOF_COPIES {
        let crate_src = std::fs::read_to_string(root.join(source))
            .with_context(|| format!("Failed to read {}", source))?;

        let original = extract_fn_body(&crate_src, signature)
            .with_context(|| format!("`{}` not found in {}", signature, source))?;
        let copy = extract_fn_body(&proofs_src, signature)
            .with_context(|| format!("`{}` not found in kani-proofs", signature))?;

        if original != copy {
            bail!("kani-proofs copy of `{}` differs from {}", signature, source);
        }
        println!("  ✓ {}", signature);
    }

    Ok(())
}

/// Lines from `signature` up to the first closing brace at column zero,
/// trimmed so indentation changes do not count as drift.
fn extract_fn_body(content: &str, signature: &str) -> Option<Vec<String>> {
    let mut lines = content.lines().skip_while(|line| !line.starts_with(signature));
    let first = lines.next()?;

    let mut body = vec![first.trim().to_string()];
    for line in lines {
        body.push(line.trim().to_string());
        if line.starts_with('}') {
            return Some(body);
        }
    }
    None
}
