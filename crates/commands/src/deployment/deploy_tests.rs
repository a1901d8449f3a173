//! Unit tests for the deployment writer

use std::fs;

use askbot_common::TestUserInterface;
use askbot_runtime::deps::RealFileSystem;
use pretty_assertions::assert_eq;

use super::*;
use crate::deployment::compat::{FrameworkVersion, STATICFILES_APP_ENTRY, fragments_for};
use crate::deployment::context::DatabaseEngine;

fn sample_context() -> DeployContext {
    let mut context = DeployContext::new();
    context.set(
        ContextKey::DatabaseEngine,
        DatabaseEngine::Postgresql.backend_name(),
    );
    context.set(ContextKey::DatabaseName, "forum");
    context.set(ContextKey::DatabaseUser, "askbot");
    context.set(ContextKey::DatabasePassword, "s3cr&t<pw>");
    context.set(ContextKey::DomainName, "qa.example.com");
    context.set(ContextKey::LocalSettings, "");
    fragments_for(FrameworkVersion::new(1, 4))
        .unwrap()
        .apply(&mut context);
    context
}

#[test]
fn test_help_file_path() {
    assert_eq!(
        help_file_path(Path::new("/srv/forum")),
        Path::new("/srv/forum/askbot/doc/INSTALL")
    );
}

#[test]
fn test_render_settings_substitutes_values_without_escaping() {
    let settings = render_settings(&sample_context()).unwrap();

    assert!(settings.contains("'ENGINE': 'django.db.backends.postgresql_psycopg2',"));
    assert!(settings.contains("'NAME': 'forum',"));
    assert!(settings.contains("'PASSWORD': 's3cr&t<pw>',"));
    assert!(settings.contains("ASKBOT_DOMAIN_NAME = 'qa.example.com'"));
    assert!(settings.contains("'django.contrib.auth.context_processors.auth',"));
    assert!(settings.contains(STATICFILES_APP_ENTRY));
}

#[test]
fn test_render_settings_leaves_unset_values_empty() {
    let settings = render_settings(&DeployContext::new()).unwrap();

    assert!(settings.contains("'USER': '',"));
    assert!(!settings.contains("{{"));
    assert!(!settings.contains(STATICFILES_APP_ENTRY));
}

#[test]
fn test_deploy_new_project_writes_skeleton_settings_and_assets() {
    let temp = tempfile::tempdir().unwrap();
    let ui = TestUserInterface::new();

    deploy_into(
        &RealFileSystem,
        &ui,
        temp.path(),
        true,
        1,
        &sample_context(),
    )
    .unwrap();

    for name in ["__init__.py", "manage.py", "urls.py", "django.wsgi", "settings.py"] {
        assert!(temp.path().join(name).is_file(), "{name} missing");
    }
    assert!(temp.path().join("log/askbot.log").is_file());
    assert!(help_file_path(temp.path()).is_file());
    assert!(temp.path().join("askbot/cron/send_email_alerts.sh").is_file());
    assert!(temp.path().join("askbot/upfiles/README").is_file());

    let output = ui.get_output();
    assert_eq!(output[0], "Copying files:");
    assert!(output.contains(&"* urls.py".to_string()));
    assert!(output.contains(&"Creating settings file".to_string()));
}

#[test]
fn test_deploy_keeps_existing_init_and_manage() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("manage.py"), "# mine\n").unwrap();
    fs::write(temp.path().join("urls.py"), "# stale\n").unwrap();
    let ui = TestUserInterface::new();

    deploy_into(
        &RealFileSystem,
        &ui,
        temp.path(),
        true,
        1,
        &sample_context(),
    )
    .unwrap();

    assert_eq!(
        fs::read_to_string(temp.path().join("manage.py")).unwrap(),
        "# mine\n"
    );
    assert_ne!(
        fs::read_to_string(temp.path().join("urls.py")).unwrap(),
        "# stale\n"
    );
    assert!(!ui.get_output().contains(&"* manage.py".to_string()));
}

#[test]
fn test_deploy_appends_local_settings() {
    let temp = tempfile::tempdir().unwrap();
    let extra = temp.path().join("extra_settings.py");
    fs::write(&extra, "ASKBOT_EXTRA = True\n").unwrap();
    let target = temp.path().join("site");
    fs::create_dir(&target).unwrap();
    let mut context = sample_context();
    context.set(ContextKey::LocalSettings, extra.display().to_string());

    deploy_into(
        &RealFileSystem,
        &TestUserInterface::new(),
        &target,
        true,
        0,
        &context,
    )
    .unwrap();

    let settings = fs::read_to_string(target.join("settings.py")).unwrap();
    assert!(settings.ends_with("\nASKBOT_EXTRA = True\n"));
}

#[test]
fn test_deploy_fails_on_missing_local_settings() {
    let temp = tempfile::tempdir().unwrap();
    let mut context = sample_context();
    context.set(ContextKey::LocalSettings, "/nonexistent/extra.py");

    let err = deploy_into(
        &RealFileSystem,
        &TestUserInterface::new(),
        temp.path(),
        true,
        0,
        &context,
    )
    .unwrap_err();

    assert!(err.to_string().contains("extra settings"));
    assert!(!temp.path().join("settings.py").exists());
}

#[test]
fn test_deploy_existing_project_only_adds_assets() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("settings.py"), "# project settings\n").unwrap();
    let ui = TestUserInterface::new();

    deploy_into(
        &RealFileSystem,
        &ui,
        temp.path(),
        false,
        1,
        &sample_context(),
    )
    .unwrap();

    assert_eq!(
        fs::read_to_string(temp.path().join("settings.py")).unwrap(),
        "# project settings\n"
    );
    assert!(!temp.path().join("urls.py").exists());
    assert!(!temp.path().join("log").exists());
    assert!(help_file_path(temp.path()).is_file());
    assert!(!ui.get_output().contains(&"Copying files:".to_string()));
}

#[test]
fn test_deploy_skips_existing_asset_directories() {
    let temp = tempfile::tempdir().unwrap();
    let doc = temp.path().join("askbot/doc");
    fs::create_dir_all(&doc).unwrap();
    fs::write(doc.join("INSTALL"), "custom notes").unwrap();
    let ui = TestUserInterface::new();

    deploy_into(
        &RealFileSystem,
        &ui,
        temp.path(),
        false,
        1,
        &sample_context(),
    )
    .unwrap();

    assert_eq!(fs::read_to_string(doc.join("INSTALL")).unwrap(), "custom notes");
    assert!(
        ui.get_output()
            .iter()
            .any(|line| line.ends_with("already exists, not copying"))
    );
    assert!(temp.path().join("askbot/cron").is_dir());
}

#[test]
fn test_deploy_is_silent_at_verbosity_zero() {
    let temp = tempfile::tempdir().unwrap();
    let ui = TestUserInterface::new();

    deploy_into(
        &RealFileSystem,
        &ui,
        temp.path(),
        true,
        0,
        &sample_context(),
    )
    .unwrap();

    assert!(ui.get_output().is_empty());
}

#[test]
fn test_deploy_keeps_existing_log_file() {
    let temp = tempfile::tempdir().unwrap();
    fs::create_dir(temp.path().join("log")).unwrap();
    fs::write(temp.path().join("log/askbot.log"), "old entries\n").unwrap();

    deploy_into(
        &RealFileSystem,
        &TestUserInterface::new(),
        temp.path(),
        true,
        0,
        &sample_context(),
    )
    .unwrap();

    assert_eq!(
        fs::read_to_string(temp.path().join("log/askbot.log")).unwrap(),
        "old entries\n"
    );
}
