// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Writing scripts to disk.

use std::path::{Path, PathBuf};
use tracing::debug;

use super::shell::Shell;
use crate::error::{FsError, SetenvResult};

/// Mode given to generated scripts: `rwxr-xr-x`.
pub const SCRIPT_MODE: u32 = 0o755;

/// Creates `dir` and its parents. An existing directory is not an error;
/// any other failure is.
///
/// # Errors
///
/// Returns `FsError::CreateDir` if the directory cannot be created, or if
/// the path exists and is not a directory.
pub fn ensure_dir(dir: &Path) -> SetenvResult<()> {
    match std::fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(source) => Err(FsError::CreateDir {
            path: dir.display().to_string(),
            source,
        }
        .into()),
    }
}

/// Writes `content` to `dir/<shell file name>` and marks it executable.
///
/// Other files in `dir` are left alone; an existing script is replaced.
///
/// # Errors
///
/// Returns an `FsError` if the directory cannot be created, the file cannot
/// be written, or its permissions cannot be set.
pub fn write_script(dir: &Path, shell: Shell, content: &str) -> SetenvResult<PathBuf> {
    ensure_dir(dir)?;

    let path = dir.join(shell.file_name());
    std::fs::write(&path, content).map_err(|source| FsError::Write {
        path: path.display().to_string(),
        source,
    })?;
    make_executable(&path)?;

    debug!(path = %path.display(), bytes = content.len(), "wrote script");
    Ok(path)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> SetenvResult<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(SCRIPT_MODE)).map_err(
        |source| {
            FsError::Permissions {
                path: path.display().to_string(),
                source,
            }
            .into()
        },
    )
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn make_executable(_path: &Path) -> SetenvResult<()> {
    Ok(())
}
