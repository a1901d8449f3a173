//! The key/value context handed to the templates

use std::collections::BTreeMap;

use anyhow::Result;
use askbot_runtime::deps::UserInterface;
use serde_json::{Map, Value};

use super::messages;

/// Database backends selectable with `--db-engine`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseEngine {
    /// PostgreSQL through psycopg2
    Postgresql,
    /// SQLite 3
    Sqlite,
    /// MySQL
    Mysql,
}

impl DatabaseEngine {
    /// Suffix of the `django.db.backends.*` module
    pub const fn backend_name(self) -> &'static str {
        match self {
            Self::Postgresql => "postgresql_psycopg2",
            Self::Sqlite => "sqlite3",
            Self::Mysql => "mysql",
        }
    }
}

/// Keys of the deployment context, in prompt order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContextKey {
    /// `django.db.backends` module suffix
    DatabaseEngine,
    /// Database name
    DatabaseName,
    /// Database user
    DatabaseUser,
    /// Database password
    DatabasePassword,
    /// Domain the forum is served on
    DomainName,
    /// Path of a file appended to `settings.py`, or empty
    LocalSettings,
    /// `INSTALLED_APPS` entry for static files, possibly empty
    StaticfilesApp,
    /// Dotted path of the auth context processor
    AuthContextProcessor,
}

impl ContextKey {
    /// Every key the templates may reference
    pub const ALL: [Self; 8] = [
        Self::DatabaseEngine,
        Self::DatabaseName,
        Self::DatabaseUser,
        Self::DatabasePassword,
        Self::DomainName,
        Self::LocalSettings,
        Self::StaticfilesApp,
        Self::AuthContextProcessor,
    ];

    /// Keys the user is asked for when no value was given
    pub const PROMPTED: [Self; 5] = [
        Self::DatabaseEngine,
        Self::DatabaseName,
        Self::DatabaseUser,
        Self::DatabasePassword,
        Self::DomainName,
    ];

    /// Template variable name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DatabaseEngine => "database_engine",
            Self::DatabaseName => "database_name",
            Self::DatabaseUser => "database_user",
            Self::DatabasePassword => "database_password",
            Self::DomainName => "domain_name",
            Self::LocalSettings => "local_settings",
            Self::StaticfilesApp => "staticfiles_app",
            Self::AuthContextProcessor => "auth_context_processor",
        }
    }
}

/// String values keyed by [`ContextKey`]; an absent key has not been supplied yet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployContext {
    values: BTreeMap<ContextKey, String>,
}

impl DeployContext {
    /// Empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `key`, `None` when not supplied yet
    pub fn get(&self, key: ContextKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Stores `value` under `key`, replacing any earlier value
    pub fn set(&mut self, key: ContextKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    /// Sets `key` only when `value` is present
    pub fn set_opt(&mut self, key: ContextKey, value: Option<String>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    /// Prompted keys that still have no value
    pub fn missing_keys(&self) -> Vec<ContextKey> {
        ContextKey::PROMPTED
            .into_iter()
            .filter(|key| !self.values.contains_key(key))
            .collect()
    }

    /// Asks once for every missing key and stores the answer verbatim
    pub fn prompt_for_missing(&mut self, ui: &dyn UserInterface) -> Result<usize> {
        let missing = self.missing_keys();
        for key in &missing {
            let value = ui.prompt_input(&messages::enter_value_for(key.as_str()), None)?;
            tracing::debug!(key = key.as_str(), "value entered");
            self.set(*key, value);
        }
        Ok(missing.len())
    }

    /// Template data with every key present, unset ones as empty strings
    pub fn to_template_data(&self) -> Value {
        let map: Map<String, Value> = ContextKey::ALL
            .into_iter()
            .map(|key| {
                let value = self.get(key).unwrap_or_default();
                (key.as_str().to_string(), Value::String(value.to_string()))
            })
            .collect();
        Value::Object(map)
    }
}
