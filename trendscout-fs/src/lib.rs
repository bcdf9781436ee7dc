//! Capability-based UTF-8 file access shared by the Trendscout crates.
//!
//! Every helper resolves an ambient directory handle first and performs the
//! actual I/O relative to it through `cap-std`.
#![forbid(unsafe_code)]

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io::{self, Read};

/// Read a whole UTF-8 file using ambient authority.
pub fn read_utf8_file(path: &Utf8Path) -> io::Result<String> {
    let mut file = fs_utf8::File::open_ambient(path, ambient_authority())?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Read a UTF-8 file, returning `None` when it or its directory is missing.
pub fn read_optional(path: &Utf8Path) -> io::Result<Option<String>> {
    let (dir, name) = match open_parent(path) {
        Ok(found) => found,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err),
    };
    match dir.read_to_string(name.as_str()) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Replace `path` with `contents`, creating parent directories as needed.
///
/// The bytes go to a hidden sibling first and are renamed into place, so a
/// reader never observes a half-written file.
pub fn write_replacing(path: &Utf8Path, contents: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent(path)?;
    let staging = format!(".{name}.tmp");
    dir.write(staging.as_str(), contents)?;
    dir.rename(staging.as_str(), &dir, name.as_str())
}

/// Return whether a path exists and is a regular file.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_parent(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Return whether a path exists and is a directory.
pub fn dir_exists(path: &Utf8Path) -> io::Result<bool> {
    match fs_utf8::Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Create `path` and any missing ancestors.
pub fn create_dir_all(path: &Utf8Path) -> io::Result<()> {
    let (anchor, relative) = split_anchor(path);
    if relative.as_str().is_empty() {
        return Ok(());
    }
    fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?.create_dir_all(&relative)
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Open the directory containing `path` and return it with the file name.
fn open_parent(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} has no file name")))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Split a path into its root (drive prefix and root, or `.`) and the rest.
fn split_anchor(path: &Utf8Path) -> (Utf8PathBuf, Utf8PathBuf) {
    let mut anchor = Utf8PathBuf::new();
    let mut relative = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::Prefix(_) | Utf8Component::RootDir => anchor.push(component),
            Utf8Component::CurDir => {}
            other => relative.push(other),
        }
    }
    if anchor.as_str().is_empty() {
        anchor.push(".");
    }
    (anchor, relative)
}
