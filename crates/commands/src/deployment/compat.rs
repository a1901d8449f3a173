//! Django version detection and the settings fragments each version needs

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use anyhow::Result;
use askbot_runtime::config::DJANGO_VERSION_PROBE;
use askbot_runtime::deps::{CommandExecutor, UserInterface};
use thiserror::Error;

use super::context::{ContextKey, DeployContext};
use crate::error::SetupError;

/// Highest Django major version the templates are written for
pub const SUPPORTED_MAJOR: u32 = 1;

/// `INSTALLED_APPS` entry registering the bundled static files app
pub const STATICFILES_APP_ENTRY: &str = "'django.contrib.staticfiles',";

/// Auth context processor location up to Django 1.3
pub const LEGACY_AUTH_CONTEXT_PROCESSOR: &str = "django.core.context_processors.auth";

/// Auth context processor location from Django 1.4 on
pub const AUTH_CONTEXT_PROCESSOR: &str = "django.contrib.auth.context_processors.auth";

/// `MAJOR.MINOR` of an installed Django
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrameworkVersion {
    /// Major release number
    pub major: u32,
    /// Minor release number
    pub minor: u32,
}

impl FrameworkVersion {
    /// Version `major.minor`
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for FrameworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A version string that is not `MAJOR.MINOR[.PATCH]`
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid Django version '{0}', expected MAJOR.MINOR")]
pub struct InvalidVersion(String);

impl FromStr for FrameworkVersion {
    type Err = InvalidVersion;

    /// Accepts `1.4` as well as longer forms such as `1.4.22`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidVersion(s.to_string());
        let mut parts = s.trim().split('.');
        let major = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        let minor = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        Ok(Self { major, minor })
    }
}

/// Settings fragments that differ between Django releases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompatFragments {
    /// `INSTALLED_APPS` line for the static files app, empty before 1.3
    pub staticfiles_app: &'static str,
    /// Auth context processor path for `TEMPLATE_CONTEXT_PROCESSORS`
    pub auth_context_processor: &'static str,
}

impl CompatFragments {
    /// Stores both fragments in the template context
    pub fn apply(&self, context: &mut DeployContext) {
        context.set(ContextKey::StaticfilesApp, self.staticfiles_app);
        context.set(ContextKey::AuthContextProcessor, self.auth_context_processor);
    }
}

struct CompatRule {
    minors: RangeInclusive<u32>,
    fragments: CompatFragments,
}

// Minor versions of the supported major, checked in order.
const COMPAT_TABLE: &[CompatRule] = &[
    CompatRule {
        minors: 0..=2,
        fragments: CompatFragments {
            staticfiles_app: "",
            auth_context_processor: LEGACY_AUTH_CONTEXT_PROCESSOR,
        },
    },
    CompatRule {
        minors: 3..=3,
        fragments: CompatFragments {
            staticfiles_app: STATICFILES_APP_ENTRY,
            auth_context_processor: LEGACY_AUTH_CONTEXT_PROCESSOR,
        },
    },
    CompatRule {
        minors: 4..=u32::MAX,
        fragments: CompatFragments {
            staticfiles_app: STATICFILES_APP_ENTRY,
            auth_context_processor: AUTH_CONTEXT_PROCESSOR,
        },
    },
];

/// Looks up the settings fragments for `version`
pub fn fragments_for(version: FrameworkVersion) -> Result<CompatFragments, SetupError> {
    let unsupported = SetupError::UnsupportedFramework {
        major: version.major,
        minor: version.minor,
    };
    if version.major > SUPPORTED_MAJOR {
        return Err(unsupported);
    }

    COMPAT_TABLE
        .iter()
        .find(|rule| rule.minors.contains(&version.minor))
        .map(|rule| rule.fragments)
        .ok_or(unsupported)
}

/// Asks `python` which Django it imports
pub async fn detect_framework_version(
    executor: &dyn CommandExecutor,
    ui: &dyn UserInterface,
    python: &str,
) -> Result<FrameworkVersion> {
    let probe_failed = |reason: String| SetupError::FrameworkProbe {
        interpreter: python.to_string(),
        reason,
    };

    executor
        .check_command_exists(python)
        .await
        .map_err(|e| probe_failed(e.to_string()))?;

    let spinner = ui.create_spinner();
    spinner.set_message("Detecting Django version...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    let output = executor.execute(python, &["-c", DJANGO_VERSION_PROBE]).await;
    spinner.finish_and_clear();
    let output = output?;

    if !output.success {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let reason = stderr
            .lines()
            .last()
            .unwrap_or("Django is not importable")
            .to_string();
        return Err(probe_failed(reason).into());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = stdout
        .trim()
        .parse::<FrameworkVersion>()
        .map_err(|e| probe_failed(e.to_string()))?;
    tracing::info!(%version, python, "detected Django");
    Ok(version)
}
