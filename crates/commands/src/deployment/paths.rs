//! Install directory selection and Django project detection

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use askbot_runtime::config::RESERVED_DIR_NAMES;
use askbot_runtime::deps::{FileSystem, MessageStyle, UserInterface};
use once_cell::sync::Lazy;
use regex::Regex;

use super::messages;
use crate::error::SetupError;

static DJANGO_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(from django.*import|import django)").expect("valid django import pattern")
});

/// Lexically resolves `path` against `base`, dropping `.` and `..` components
pub fn normalize_path(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Absolute, normalized form of `directory`.
///
/// Returns `None` when no directory was given or when it names an existing
/// file; the latter is reported to the user.
pub fn clean_directory(
    fs: &dyn FileSystem,
    ui: &dyn UserInterface,
    directory: Option<&Path>,
) -> Result<Option<PathBuf>> {
    let Some(directory) = directory else {
        return Ok(None);
    };

    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let directory = normalize_path(&cwd, directory);

    if fs.is_file(&directory) {
        ui.print_styled(&messages::cant_install_into_file(&directory), MessageStyle::Warning);
        return Ok(None);
    }
    Ok(Some(directory))
}

/// True when a top-level Python module of `directory` imports Django.
///
/// `manage.py` is ignored so that a bare skeleton does not count as a project.
pub fn has_existing_django_project(fs: &dyn FileSystem, directory: &Path) -> bool {
    if !fs.is_dir(directory) {
        return false;
    }

    let mut entries = match fs.read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Cannot list {}: {}", directory.display(), e);
            return false;
        }
    };
    entries.sort();

    for path in entries {
        let is_python = path.extension().is_some_and(|ext| ext == "py");
        let is_manage = path.file_name().is_some_and(|name| name == "manage.py");
        if !is_python || is_manage || !fs.is_file(&path) {
            continue;
        }

        let source = match fs.read_to_string(&path) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!("Skipping unreadable module {}: {}", path.display(), e);
                continue;
            }
        };
        if source.lines().any(|line| DJANGO_IMPORT.is_match(line)) {
            tracing::debug!("Django project detected via {}", path.display());
            return true;
        }
    }
    false
}

/// Nearest directory, starting at `directory` itself, that holds a Django project
pub fn find_parent_dir_with_django(fs: &dyn FileSystem, directory: &Path) -> Option<PathBuf> {
    directory
        .ancestors()
        .find(|ancestor| has_existing_django_project(fs, ancestor))
        .map(Path::to_path_buf)
}

/// True when `directory` exists and is writable, or its nearest existing ancestor is
pub fn can_create_path(fs: &dyn FileSystem, directory: &Path) -> bool {
    directory
        .ancestors()
        .find(|ancestor| fs.exists(ancestor))
        .is_some_and(|existing| fs.is_dir(existing) && fs.is_writable(existing))
}

/// True when the last path component is one of the reserved package names
pub fn dir_name_is_reserved(directory: &Path) -> bool {
    directory
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| RESERVED_DIR_NAMES.contains(&name))
}

/// Creates `directory` unless it exists; an existing file in its place is an error
pub fn create_path(fs: &dyn FileSystem, directory: &Path) -> Result<()> {
    if fs.exists(directory) {
        if !fs.is_dir(directory) {
            return Err(SetupError::NotADirectory(directory.to_path_buf()).into());
        }
        return Ok(());
    }
    fs.create_dir_all(directory)
}

/// Asks the user for an install directory.
///
/// Returns `None` whenever the answer cannot be used so the caller can ask
/// again. With `force` set, no confirmation questions are asked.
pub fn get_install_directory(
    fs: &dyn FileSystem,
    ui: &dyn UserInterface,
    force: bool,
) -> Result<Option<PathBuf>> {
    let answer = ui.prompt_input(messages::WHERE_TO_DEPLOY, None)?;
    let answer = answer.trim();
    if answer.is_empty() {
        ui.print_styled(messages::PLEASE_TYPE_DIRECTORY, MessageStyle::Warning);
        return Ok(None);
    }

    let Some(directory) = clean_directory(fs, ui, Some(Path::new(answer)))? else {
        return Ok(None);
    };

    if !can_create_path(fs, &directory) {
        ui.print_styled(&messages::dir_not_writable(&directory), MessageStyle::Warning);
        return Ok(None);
    }

    if dir_name_is_reserved(&directory) {
        ui.print_styled(&messages::dir_name_reserved(&directory), MessageStyle::Warning);
        return Ok(None);
    }

    if fs.exists(&directory) {
        if let Some(parent) = directory.parent()
            && let Some(project_dir) = find_parent_dir_with_django(fs, parent)
        {
            ui.print_styled(
                &messages::dir_unclean_django(&directory, &project_dir),
                MessageStyle::Warning,
            );
            return Ok(None);
        }
        let is_empty = fs.read_dir(&directory)?.is_empty();
        if !force
            && !is_empty
            && !ui.prompt_confirm(&messages::confirm_dir_not_empty(&directory), false)?
        {
            return Ok(None);
        }
    } else if !force && !ui.prompt_confirm(&messages::confirm_dir_creation(&directory), true)? {
        return Ok(None);
    }

    Ok(Some(directory))
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
