//! Writes the project skeleton, settings and askbot assets into a directory

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use askbot_runtime::config::APP_DIR_NAME;
use askbot_runtime::deps::{FileSystem, MessageStyle, UserInterface};
use handlebars::Handlebars;

use super::context::{ContextKey, DeployContext};
use super::messages::{print_message, print_styled_message};

/// Files of a new Django project, written in this order
const SKELETON_FILES: &[(&str, &str)] = &[
    (
        "__init__.py",
        include_str!("../../templates/setup_templates/__init__.py"),
    ),
    (
        "manage.py",
        include_str!("../../templates/setup_templates/manage.py"),
    ),
    (
        "urls.py",
        include_str!("../../templates/setup_templates/urls.py"),
    ),
    (
        "django.wsgi",
        include_str!("../../templates/setup_templates/django.wsgi"),
    ),
];

/// Skeleton files left alone when the directory already has them
const KEEP_IF_PRESENT: &[&str] = &["__init__.py", "manage.py"];

const SETTINGS_TEMPLATE: &str = include_str!("../../templates/setup_templates/settings.py.hbs");

/// Asset directories copied under `<directory>/askbot/`
const ASSET_DIRS: &[(&str, &[(&str, &str)])] = &[
    (
        "doc",
        &[("INSTALL", include_str!("../../templates/doc/INSTALL"))],
    ),
    (
        "cron",
        &[(
            "send_email_alerts.sh",
            include_str!("../../templates/cron/send_email_alerts.sh"),
        )],
    ),
    (
        "upfiles",
        &[("README", include_str!("../../templates/upfiles/README"))],
    ),
];

const LOG_DIR: &str = "log";
const LOG_FILE: &str = "askbot.log";

/// Path of the installation instructions inside a deployed directory
pub fn help_file_path(directory: &Path) -> PathBuf {
    directory.join(APP_DIR_NAME).join("doc").join("INSTALL")
}

/// Renders `settings.py` for `context`; unset keys render empty
pub fn render_settings(context: &DeployContext) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars
        .render_template(SETTINGS_TEMPLATE, &context.to_template_data())
        .context("Failed to render settings.py")
}

/// Deploys askbot into `directory`, which must already exist.
///
/// With `new_project` the Django skeleton and a fresh `settings.py` are
/// written first. The askbot asset directories are copied in both modes.
pub fn deploy_into(
    fs: &dyn FileSystem,
    ui: &dyn UserInterface,
    directory: &Path,
    new_project: bool,
    verbosity: u8,
    context: &DeployContext,
) -> Result<()> {
    tracing::info!(
        directory = %directory.display(),
        new_project,
        "deploying askbot"
    );

    if new_project {
        write_skeleton(fs, ui, directory, verbosity)?;
        create_log_file(fs, directory)?;

        print_styled_message(ui, "Creating settings file", MessageStyle::Cyan, verbosity);
        let settings = settings_with_local_overrides(fs, context)?;
        fs.write_string(&directory.join("settings.py"), &settings)?;
    }

    copy_assets(fs, ui, &directory.join(APP_DIR_NAME), verbosity)
}

fn write_skeleton(
    fs: &dyn FileSystem,
    ui: &dyn UserInterface,
    directory: &Path,
    verbosity: u8,
) -> Result<()> {
    print_styled_message(ui, "Copying files:", MessageStyle::Cyan, verbosity);
    for (name, content) in SKELETON_FILES {
        let target = directory.join(name);
        if KEEP_IF_PRESENT.contains(name) && fs.exists(&target) {
            tracing::debug!("Keeping existing {}", target.display());
            continue;
        }
        print_message(ui, &format!("* {name}"), verbosity);
        fs.write_string(&target, content)?;
    }
    Ok(())
}

fn create_log_file(fs: &dyn FileSystem, directory: &Path) -> Result<()> {
    let log_dir = directory.join(LOG_DIR);
    fs.create_dir_all(&log_dir)?;

    let log_file = log_dir.join(LOG_FILE);
    if !fs.exists(&log_file) {
        fs.write_string(&log_file, "")?;
    }
    Ok(())
}

fn settings_with_local_overrides(fs: &dyn FileSystem, context: &DeployContext) -> Result<String> {
    let mut settings = render_settings(context)?;

    let local_settings = context.get(ContextKey::LocalSettings).unwrap_or_default();
    if !local_settings.is_empty() {
        let extra = fs
            .read_to_string(Path::new(local_settings))
            .with_context(|| format!("Failed to read extra settings from {local_settings}"))?;
        if !settings.ends_with('\n') {
            settings.push('\n');
        }
        settings.push_str(&extra);
    }
    Ok(settings)
}

fn copy_assets(
    fs: &dyn FileSystem,
    ui: &dyn UserInterface,
    app_dir: &Path,
    verbosity: u8,
) -> Result<()> {
    fs.create_dir_all(app_dir)?;

    for (dir_name, files) in ASSET_DIRS {
        let target = app_dir.join(dir_name);
        if fs.exists(&target) {
            print_styled_message(
                ui,
                &format!("{} already exists, not copying", target.display()),
                MessageStyle::Warning,
                verbosity,
            );
            continue;
        }

        print_message(ui, &format!("* {APP_DIR_NAME}/{dir_name}"), verbosity);
        fs.create_dir_all(&target)?;
        for (name, content) in *files {
            fs.write_string(&target.join(name), content)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "deploy_tests.rs"]
mod tests;
