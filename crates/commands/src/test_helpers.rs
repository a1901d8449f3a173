//! Test helper utilities and mock implementations for askbot-commands

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use mockall::mock;

use askbot_runtime::deps::{CommandExecutor, CommandOutput, FileSystem};

// Mock implementation of the FileSystem trait for testing file operations.
//
// # Example
//
// ```rust
// use askbot_commands::test_helpers::MockFileSystemMock;
//
// let mut mock_fs = MockFileSystemMock::new();
// mock_fs.expect_exists()
//     .with(eq(Path::new("/srv/forum")))
//     .times(1)
//     .returning(|_| true);
// ```
mock! {
    pub FileSystemMock {}

    impl FileSystem for FileSystemMock {
        fn exists(&self, path: &Path) -> bool;
        fn is_dir(&self, path: &Path) -> bool;
        fn is_file(&self, path: &Path) -> bool;
        fn is_writable(&self, path: &Path) -> bool;
        fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;
        fn read_to_string(&self, path: &Path) -> Result<String>;
        fn write_string(&self, path: &Path, content: &str) -> Result<()>;
        fn create_dir_all(&self, path: &Path) -> Result<()>;
    }
}

// Simple manual mock implementation for CommandExecutor
// This avoids mockall's issues with async traits containing slice references
type CommandCheckFn = dyn Fn(&str) -> Result<()> + Send + Sync;
type CommandExecFn = dyn Fn(&str, &[&str]) -> Result<CommandOutput> + Send + Sync;
type CommandMatcher = Box<dyn Fn(&str, &[&str]) -> bool + Send + Sync>;

struct ExecuteExpectationEntry {
    matcher: Option<CommandMatcher>,
    respond: Box<CommandExecFn>,
}

/// Mock implementation of the `CommandExecutor` trait.
///
/// Expectations registered with [`expect_execute`](Self::expect_execute) answer
/// calls in registration order; calls beyond them succeed with empty output.
///
/// # Example
///
/// ```rust
/// use askbot_commands::test_helpers::MockCommandExecutorMock;
/// use askbot_runtime::deps::CommandOutput;
///
/// let mut mock_exec = MockCommandExecutorMock::new();
/// mock_exec.expect_execute()
///     .withf(|cmd, args| cmd == "python" && args[0] == "-c")
///     .returning(|_, _| Ok(CommandOutput {
///         success: true,
///         stdout: b"1.4\n".to_vec(),
///         stderr: vec![],
///     }));
/// ```
#[derive(Default)]
pub struct MockCommandExecutorMock {
    check_command_exists_fn: Mutex<Option<Box<CommandCheckFn>>>,
    execute_expectations: Mutex<Vec<ExecuteExpectationEntry>>,
    execute_call_count: Arc<Mutex<usize>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockCommandExecutorMock {
    /// Mock with no expectations
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the result of `check_command_exists`; by default every command exists
    pub fn expect_check_command_exists(&mut self) -> CheckCommandExistsExpectation<'_> {
        CheckCommandExistsExpectation { mock: self }
    }

    /// Adds an expectation for the next unanswered `execute` call
    pub fn expect_execute(&mut self) -> ExecuteExpectation<'_> {
        ExecuteExpectation {
            mock: self,
            matcher: None,
        }
    }

    /// Number of `execute` calls made so far
    pub fn execute_calls(&self) -> usize {
        *lock(&self.execute_call_count)
    }
}

/// Builder for configuring `check_command_exists` expectations.
pub struct CheckCommandExistsExpectation<'a> {
    mock: &'a mut MockCommandExecutorMock,
}

impl<'a> CheckCommandExistsExpectation<'a> {
    /// Answers every `check_command_exists` call with `f`
    pub fn returning<F>(self, f: F) -> &'a mut MockCommandExecutorMock
    where
        F: Fn(&str) -> Result<()> + Send + Sync + 'static,
    {
        *lock(&self.mock.check_command_exists_fn) = Some(Box::new(f));
        self.mock
    }
}

/// Builder for configuring execute expectations.
pub struct ExecuteExpectation<'a> {
    mock: &'a mut MockCommandExecutorMock,
    matcher: Option<CommandMatcher>,
}

impl<'a> ExecuteExpectation<'a> {
    /// Rejects calls whose command and arguments do not satisfy `f`
    #[must_use]
    pub fn withf<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &[&str]) -> bool + Send + Sync + 'static,
    {
        self.matcher = Some(Box::new(f));
        self
    }

    /// Answers the matching `execute` call with `f`
    pub fn returning<F>(self, f: F) -> &'a mut MockCommandExecutorMock
    where
        F: Fn(&str, &[&str]) -> Result<CommandOutput> + Send + Sync + 'static,
    {
        lock(&self.mock.execute_expectations).push(ExecuteExpectationEntry {
            matcher: self.matcher,
            respond: Box::new(f),
        });
        self.mock
    }
}

#[async_trait]
impl CommandExecutor for MockCommandExecutorMock {
    async fn check_command_exists(&self, command: &str) -> Result<()> {
        match &*lock(&self.check_command_exists_fn) {
            Some(f) => f(command),
            None => Ok(()),
        }
    }

    async fn execute(&self, command: &str, args: &[&str]) -> Result<CommandOutput> {
        let index = {
            let mut count = lock(&self.execute_call_count);
            let index = *count;
            *count += 1;
            index
        };

        let expectations = lock(&self.execute_expectations);
        let Some(expectation) = expectations.get(index) else {
            return Ok(CommandOutput {
                success: true,
                stdout: vec![],
                stderr: vec![],
            });
        };
        if let Some(matcher) = &expectation.matcher
            && !matcher(command, args)
        {
            return Err(anyhow!("Unexpected command: {} {:?}", command, args));
        }
        (expectation.respond)(command, args)
    }
}

/// A [`MockCommandExecutorMock`] whose Django probe reports `version`
pub fn executor_reporting_version(version: &'static str) -> MockCommandExecutorMock {
    let mut executor = MockCommandExecutorMock::new();
    executor
        .expect_execute()
        .withf(|_, args| args.first() == Some(&"-c"))
        .returning(move |_, _| {
            Ok(CommandOutput {
                success: true,
                stdout: format!("{version}\n").into_bytes(),
                stderr: vec![],
            })
        });
    executor
}

/// Lays out a minimal existing Django project in `dir`
pub fn write_django_project(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join("urls.py"),
        "from django.conf.urls.defaults import patterns, include, url\n\nurlpatterns = patterns('')\n",
    )
    .unwrap();
    fs::write(dir.join("manage.py"), "#!/usr/bin/env python\n").unwrap();
}
