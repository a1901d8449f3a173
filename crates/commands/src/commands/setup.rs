//! The askbot-setup command with dependency injection for better testability

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use askbot_common::RealUserInterface;
use askbot_runtime::config::DEFAULT_PYTHON;
use askbot_runtime::deps::{
    CommandExecutor, FileSystem, MessageStyle, RealCommandExecutor, RealFileSystem,
    UserInterface,
};

use crate::deployment::compat::{FrameworkVersion, detect_framework_version, fragments_for};
use crate::deployment::context::{ContextKey, DatabaseEngine, DeployContext};
use crate::deployment::deploy::{deploy_into, help_file_path};
use crate::deployment::messages::{self, print_styled_message};
use crate::deployment::paths::{
    clean_directory, create_path, get_install_directory, has_existing_django_project,
};
use crate::error::SetupError;

/// Setup command arguments (matches CLI parser)
#[derive(Debug, Clone)]
pub struct SetupArgs {
    /// 0 silences status text, higher values also raise log detail
    pub verbosity: u8,
    /// Install directory; asked for when absent
    pub dir_name: Option<PathBuf>,
    /// Database backend chosen by code
    pub database_engine: Option<DatabaseEngine>,
    /// Database name
    pub database_name: Option<String>,
    /// Database user
    pub database_user: Option<String>,
    /// Database password
    pub database_password: Option<String>,
    /// Domain the forum is served on
    pub domain_name: Option<String>,
    /// File whose contents are appended to the generated settings
    pub local_settings: Option<PathBuf>,
    /// Skip every question and overwrite an existing Django project
    pub force: bool,
    /// Interpreter used to probe the installed Django
    pub python: String,
    /// Known Django version; skips the probe
    pub framework_version: Option<FrameworkVersion>,
}

impl Default for SetupArgs {
    fn default() -> Self {
        Self {
            verbosity: 1,
            dir_name: None,
            database_engine: None,
            database_name: None,
            database_user: None,
            database_password: None,
            domain_name: None,
            local_settings: None,
            force: false,
            python: DEFAULT_PYTHON.to_string(),
            framework_version: None,
        }
    }
}

/// Dependencies for the setup command
pub struct SetupDependencies {
    /// File system operations
    pub file_system: Arc<dyn FileSystem>,
    /// Command execution operations
    pub command_executor: Arc<dyn CommandExecutor>,
    /// User interface for output and prompts
    pub ui: Arc<dyn UserInterface>,
}

/// What a finished setup did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupOutcome {
    /// Directory askbot was deployed into
    pub directory: PathBuf,
    /// False when askbot was added to an existing Django project
    pub new_project: bool,
    /// Values the templates were rendered with
    pub context: DeployContext,
}

/// Whether `directory` gets a fresh project skeleton.
///
/// An existing Django project is only replaced when `force` is set.
pub fn decide_new_project(fs: &dyn FileSystem, directory: &Path, force: bool) -> bool {
    if fs.exists(directory) && has_existing_django_project(fs, directory) {
        return force;
    }
    true
}

/// Execute the setup command with injected dependencies.
///
/// An interrupted prompt surfaces as [`SetupError::Aborted`].
pub async fn execute_with_deps(
    args: SetupArgs,
    deps: Arc<SetupDependencies>,
) -> Result<SetupOutcome> {
    run_setup(args, &deps).await.map_err(|e| {
        if SetupError::is_abort(&e) {
            tracing::debug!("setup interrupted: {:#}", e);
            SetupError::Aborted.into()
        } else {
            e
        }
    })
}

async fn run_setup(args: SetupArgs, deps: &SetupDependencies) -> Result<SetupOutcome> {
    let fs = deps.file_system.as_ref();
    let ui = deps.ui.as_ref();
    let verbosity = args.verbosity;

    print_styled_message(ui, messages::DEPLOY_PREAMBLE, MessageStyle::Bold, verbosity);

    let directory = match clean_directory(fs, ui, args.dir_name.as_deref())? {
        Some(directory) => directory,
        None => loop {
            if let Some(directory) = get_install_directory(fs, ui, args.force)? {
                break directory;
            }
        },
    };
    tracing::info!("Installing into {}", directory.display());

    let mut context = initial_context(&args);
    if !args.force {
        context.prompt_for_missing(ui)?;
    }

    let new_project = decide_new_project(fs, &directory, args.force);

    let version = match args.framework_version {
        Some(version) => version,
        None => {
            detect_framework_version(deps.command_executor.as_ref(), ui, &args.python).await?
        }
    };
    fragments_for(version)?.apply(&mut context);

    create_path(fs, &directory)?;
    deploy_into(fs, ui, &directory, new_project, verbosity, &context)?;

    let help_file = help_file_path(&directory);
    let closing = if new_project {
        messages::how_to_deploy_new(&help_file)
    } else {
        messages::how_to_add_askbot_to_django(&help_file)
    };
    print_styled_message(ui, &closing, MessageStyle::Success, verbosity);

    Ok(SetupOutcome {
        directory,
        new_project,
        context,
    })
}

fn initial_context(args: &SetupArgs) -> DeployContext {
    let mut context = DeployContext::new();
    context.set_opt(
        ContextKey::DatabaseEngine,
        args.database_engine.map(|e| e.backend_name().to_string()),
    );
    context.set_opt(ContextKey::DatabaseName, args.database_name.clone());
    context.set_opt(ContextKey::DatabaseUser, args.database_user.clone());
    context.set_opt(ContextKey::DatabasePassword, args.database_password.clone());
    context.set_opt(ContextKey::DomainName, args.domain_name.clone());
    context.set(
        ContextKey::LocalSettings,
        args.local_settings
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_default(),
    );
    context
}

/// Execute the setup command with default dependencies
pub async fn execute(args: SetupArgs) -> Result<()> {
    let deps = Arc::new(SetupDependencies {
        file_system: Arc::new(RealFileSystem),
        command_executor: Arc::new(RealCommandExecutor),
        ui: Arc::new(RealUserInterface),
    });

    execute_with_deps(args, deps).await.map(|_| ())
}

#[cfg(test)]
#[path = "setup_tests.rs"]
mod tests;
