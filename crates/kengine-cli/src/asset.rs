//! # Asset Subcommands
//!
//! Thin wrappers over `kengine-store`: hash, save, read, list, copy, info
//! and verify. Handlers write their output to the supplied writer and return
//! the process exit code.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;

use kengine_core::hash_bytes;
use kengine_store::{copy_asset, get_file_info, read_file};

use crate::bootstrap::AppContext;

/// Asset store subcommands.
#[derive(Subcommand, Debug)]
pub enum AssetCommand {
    /// Print the content hash of a file.
    Hash {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Store a file in the upload directory.
    Save {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Name whose extension the stored file takes (defaults to FILE's name).
        #[arg(long, conflicts_with = "move_source")]
        name: Option<String>,
        /// Delete FILE after storing it, as for a consumed temp upload.
        #[arg(long = "move")]
        move_source: bool,
    },

    /// Write a stored asset's bytes to stdout.
    Read {
        /// Stored name, e.g. `ca978112ca1bbdca.png`.
        name: String,
    },

    /// List stored assets.
    List {
        /// Only names ending with this suffix (case-insensitive).
        #[arg(long)]
        ext: Option<String>,
    },

    /// Copy a file into the upload directory (or another directory).
    Copy {
        #[arg(value_name = "SOURCE")]
        source: PathBuf,
        /// Name whose extension the copy takes.
        #[arg(long)]
        name: Option<String>,
        /// Target directory instead of the upload directory.
        #[arg(long, value_name = "DIR")]
        to: Option<PathBuf>,
    },

    /// Print file metadata as JSON.
    Info {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Check that a stored asset still matches its content hash.
    Verify {
        /// Stored name.
        name: String,
    },
}

/// Execute an asset subcommand.
pub fn run_asset(cmd: &AssetCommand, ctx: &AppContext, out: &mut dyn Write) -> Result<u8> {
    match cmd {
        AssetCommand::Hash { file } => cmd_hash(file, out),
        AssetCommand::Save {
            file,
            name,
            move_source,
        } => cmd_save(ctx, file, name.as_deref(), *move_source, out),
        AssetCommand::Read { name } => cmd_read(ctx, name, out),
        AssetCommand::List { ext } => cmd_list(ctx, ext.as_deref(), out),
        AssetCommand::Copy { source, name, to } => {
            cmd_copy(ctx, source, name.as_deref(), to.as_deref(), out)
        }
        AssetCommand::Info { path } => cmd_info(path, out),
        AssetCommand::Verify { name } => cmd_verify(ctx, name, out),
    }
}

fn cmd_hash(file: &Path, out: &mut dyn Write) -> Result<u8> {
    let data = read_file(file)?;
    writeln!(out, "{}", hash_bytes(&data))?;
    Ok(0)
}

fn cmd_save(
    ctx: &AppContext,
    file: &Path,
    name: Option<&str>,
    move_source: bool,
    out: &mut dyn Write,
) -> Result<u8> {
    let stored = if move_source {
        ctx.store.save_file(file)?
    } else {
        let data = read_file(file)?;
        let filename = match name {
            Some(n) => n.to_string(),
            None => file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        ctx.store.save_bytes(&data, &filename)?
    };

    writeln!(
        out,
        "OK: stored hash={} name={}",
        stored.hash, stored.stored_name
    )?;
    Ok(0)
}

fn cmd_read(ctx: &AppContext, name: &str, out: &mut dyn Write) -> Result<u8> {
    let bytes = ctx.store.read(name)?;
    out.write_all(&bytes)?;
    Ok(0)
}

fn cmd_list(ctx: &AppContext, ext: Option<&str>, out: &mut dyn Write) -> Result<u8> {
    for name in ctx.store.list(ext) {
        writeln!(out, "{name}")?;
    }
    Ok(0)
}

fn cmd_copy(
    ctx: &AppContext,
    source: &Path,
    name: Option<&str>,
    to: Option<&Path>,
    out: &mut dyn Write,
) -> Result<u8> {
    let stored = match to {
        Some(dir) => copy_asset(source, dir, name)?,
        None => ctx.store.import(source, name)?,
    };
    writeln!(
        out,
        "OK: copied hash={} name={}",
        stored.hash, stored.stored_name
    )?;
    Ok(0)
}

fn cmd_info(path: &Path, out: &mut dyn Write) -> Result<u8> {
    let info = get_file_info(path);
    let json = serde_json::to_string_pretty(&info).context("failed to serialize file info")?;
    writeln!(out, "{json}")?;
    Ok(if info.exists { 0 } else { 1 })
}

fn cmd_verify(ctx: &AppContext, name: &str, out: &mut dyn Write) -> Result<u8> {
    if ctx.store.verify(name)? {
        writeln!(out, "OK: {name} matches its content hash")?;
        Ok(0)
    } else {
        writeln!(out, "FAIL: {name} does not match its content hash")?;
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KengineConfig;

    fn context(dir: &Path) -> AppContext {
        AppContext::bootstrap(&KengineConfig {
            upload_dir: dir.join("uploads"),
            ..KengineConfig::default()
        })
    }

    fn run(cmd: AssetCommand, ctx: &AppContext) -> (u8, String) {
        let mut out = Vec::new();
        let code = run_asset(&cmd, ctx, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn hash_prints_sixteen_hex_chars() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, b"a").unwrap();

        let (code, out) = run(AssetCommand::Hash { file }, &context(dir.path()));
        assert_eq!(code, 0);
        assert_eq!(out.trim(), "ca978112ca1bbdca");
    }

    #[test]
    fn save_then_list_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let file = dir.path().join("notes.md");
        std::fs::write(&file, b"# Notes").unwrap();

        let (code, out) = run(
            AssetCommand::Save {
                file: file.clone(),
                name: None,
                move_source: false,
            },
            &ctx,
        );
        assert_eq!(code, 0);
        assert!(out.starts_with("OK: stored"));
        assert!(file.exists(), "plain save keeps the source");

        let (_, listing) = run(AssetCommand::List { ext: Some(".MD".into()) }, &ctx);
        let stored_name = listing.trim().to_string();
        assert!(stored_name.ends_with(".md"));

        let (_, bytes) = run(AssetCommand::Read { name: stored_name }, &ctx);
        assert_eq!(bytes, "# Notes");
    }

    #[test]
    fn save_with_name_uses_its_extension() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let file = dir.path().join("upload.tmp");
        std::fs::write(&file, b"jpeg").unwrap();

        let (_, out) = run(
            AssetCommand::Save {
                file,
                name: Some("photo.JPG".into()),
                move_source: false,
            },
            &ctx,
        );
        assert!(out.trim_end().ends_with(".JPG"));
    }

    #[test]
    fn save_move_consumes_source() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let file = dir.path().join("tmp-upload.wav");
        std::fs::write(&file, b"RIFF").unwrap();

        let (code, _) = run(
            AssetCommand::Save {
                file: file.clone(),
                name: None,
                move_source: true,
            },
            &ctx,
        );
        assert_eq!(code, 0);
        assert!(!file.exists());
        assert_eq!(ctx.store.list(Some(".wav")).len(), 1);
    }

    #[test]
    fn save_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let mut out = Vec::new();
        let result = run_asset(
            &AssetCommand::Save {
                file: dir.path().join("missing.png"),
                name: None,
                move_source: false,
            },
            &ctx,
            &mut out,
        );
        assert!(result.is_err());
    }

    #[test]
    fn copy_to_other_directory() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let source = dir.path().join("logo.svg");
        std::fs::write(&source, b"<svg/>").unwrap();
        let target = dir.path().join("mirror");

        let (code, _) = run(
            AssetCommand::Copy {
                source,
                name: None,
                to: Some(target.clone()),
            },
            &ctx,
        );
        assert_eq!(code, 0);
        assert_eq!(kengine_store::list_assets(&target, None).len(), 1);
        assert!(ctx.store.list(None).is_empty());
    }

    #[test]
    fn info_exit_code_reflects_existence() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let file = dir.path().join("x.bin");
        std::fs::write(&file, b"xyz").unwrap();

        let (code, json) = run(AssetCommand::Info { path: file }, &ctx);
        assert_eq!(code, 0);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["size"], 3);

        let (code, json) = run(
            AssetCommand::Info {
                path: dir.path().join("nope"),
            },
            &ctx,
        );
        assert_eq!(code, 1);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!({"exists": false}));
    }

    #[test]
    fn verify_reports_tampering() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let stored = ctx.store.save_bytes(b"clean", "c.txt").unwrap();

        let (code, _) = run(
            AssetCommand::Verify {
                name: stored.stored_name.clone(),
            },
            &ctx,
        );
        assert_eq!(code, 0);

        std::fs::write(stored.path_in(ctx.store.base_dir()), b"dirty").unwrap();
        let (code, out) = run(
            AssetCommand::Verify {
                name: stored.stored_name,
            },
            &ctx,
        );
        assert_eq!(code, 1);
        assert!(out.starts_with("FAIL"));
    }
}
