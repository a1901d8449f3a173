//! Centralized configuration for the Askbot installer
//!
//! This module provides a single source of truth for the constants used
//! throughout the installer.
//!
//! # Environment Variables
//!
//! The following environment variables can be used to override defaults:
//! - `ASKBOT_PYTHON`: Python interpreter used to detect the installed Django
//! - `ASKBOT_DJANGO_VERSION`: Skip detection and use this `MAJOR.MINOR` version

/// Default Python interpreter used to probe the Django version
pub const DEFAULT_PYTHON: &str = "python";

/// Environment variable name for overriding the Python interpreter
pub const PYTHON_ENV_VAR: &str = "ASKBOT_PYTHON";

/// Environment variable name for pinning the Django version
pub const DJANGO_VERSION_ENV_VAR: &str = "ASKBOT_DJANGO_VERSION";

/// Python snippet printing `MAJOR.MINOR` of the importable Django package
pub const DJANGO_VERSION_PROBE: &str = "import django; print('%d.%d' % django.VERSION[:2])";

/// Directory names that would shadow a Python package once the project is on `sys.path`
pub const RESERVED_DIR_NAMES: &[&str] = &["askbot", "django"];

/// Name of the application directory created inside the deployment
pub const APP_DIR_NAME: &str = "askbot";
