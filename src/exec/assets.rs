// src/exec/assets.rs

//! In-process asset transforms.
//!
//! Currently just font flattening: every file anywhere under the source
//! tree is copied into a single flat destination directory. Collisions on
//! file name are last-writer-wins, matching the original pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::errors::Result;

/// Copy every file under `source` (recursively) into `dest`, discarding
/// intermediate directory structure. Returns the number of files copied.
/// A missing source tree copies nothing.
pub fn flatten_copy(source: &Path, dest: &Path) -> Result<usize> {
    if !source.exists() {
        debug!(?source, "asset source does not exist; nothing to copy");
        return Ok(0);
    }

    fs::create_dir_all(dest)
        .with_context(|| format!("creating asset output directory {dest:?}"))?;

    let mut copied = 0;
    let mut stack: Vec<PathBuf> = vec![source.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let entries =
            fs::read_dir(&dir).with_context(|| format!("reading asset directory {dir:?}"))?;

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if let Some(file_name) = path.file_name() {
                let target = dest.join(file_name);
                fs::copy(&path, &target)
                    .with_context(|| format!("copying {path:?} to {target:?}"))?;
                copied += 1;
            }
        }
    }

    debug!(?source, ?dest, copied, "flattened asset tree");
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_nested_tree_into_single_directory() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let src = tmp.path().join("fonts");
        fs::create_dir_all(src.join("serif/bold"))?;
        fs::write(src.join("a.woff"), b"a")?;
        fs::write(src.join("serif/b.woff"), b"b")?;
        fs::write(src.join("serif/bold/c.woff"), b"c")?;

        let dest = tmp.path().join("out");
        let copied = flatten_copy(&src, &dest)?;

        assert_eq!(copied, 3);
        for name in ["a.woff", "b.woff", "c.woff"] {
            assert!(dest.join(name).is_file(), "missing {name}");
        }
        Ok(())
    }

    #[test]
    fn missing_source_copies_nothing() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let copied = flatten_copy(&tmp.path().join("nope"), &tmp.path().join("out"))?;
        assert_eq!(copied, 0);
        Ok(())
    }
}
