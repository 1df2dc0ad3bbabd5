//! Build script for the syncliked CLI.
//!
//! Copies the `.env.example` configuration template into the user's local data
//! directory so a ready-to-edit template sits next to the `.env` file the
//! binary loads at startup.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root to the local data directory.
///
/// # File Operations
///
/// Templates are copied to the platform-specific local data directory:
/// - Linux: `~/.local/share/syncliked/.env.example`
/// - macOS: `~/Library/Application Support/syncliked/.env.example`
/// - Windows: `%LOCALAPPDATA%/syncliked/.env.example`
///
/// A missing template only produces a cargo warning. Failing to create the
/// target directory or write the file fails the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("syncliked");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
