//! Schema-management mode selection.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::ConfigError;

/// The property holding the mode keyword.
pub const DDL_MODE_KEY: &str = "ebean.test.ddlMode";

/// Every accepted keyword, as reported in errors.
pub const DDL_MODE_OPTIONS: &str = "none, migration, migrations, migrationDropCreate, \
     migrationsDropCreate, createOnly, create or dropCreate";

/// How a test database schema is managed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DdlMode {
    /// Leave the schema alone and keep migrations from running.
    None,
    /// Run migrations.
    Migration,
    /// Run migrations against a freshly recreated container database.
    MigrationDropCreate,
    /// Generate and run create DDL without the drop script.
    CreateOnly,
    /// Like [`CreateOnly`](Self::CreateOnly), also recreating the container database.
    Create,
    /// Generate and run drop and create DDL.
    DropCreate,
}

/// Whether the ORM should run migrations on startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MigrationRun {
    #[default]
    Unchanged,
    Enable,
    Disable,
}

/// The flags a [`DdlMode`] sets. Unset flags leave existing settings alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DdlFlags {
    pub migration: MigrationRun,
    pub generate: bool,
    pub run: bool,
    pub create_only: bool,
    pub container_drop_create: bool,
}

impl DdlFlags {
    const DROP_CREATE: DdlFlags = DdlFlags {
        migration: MigrationRun::Disable,
        generate: true,
        run: true,
        create_only: false,
        container_drop_create: false,
    };
}

impl DdlMode {
    pub fn flags(self) -> DdlFlags {
        match self {
            Self::None => DdlFlags {
                migration: MigrationRun::Disable,
                ..DdlFlags::default()
            },
            Self::Migration => DdlFlags {
                migration: MigrationRun::Enable,
                ..DdlFlags::default()
            },
            Self::MigrationDropCreate => DdlFlags {
                migration: MigrationRun::Enable,
                container_drop_create: true,
                ..DdlFlags::default()
            },
            Self::DropCreate => DdlFlags::DROP_CREATE,
            Self::CreateOnly => DdlFlags {
                create_only: true,
                ..DdlFlags::DROP_CREATE
            },
            Self::Create => DdlFlags {
                create_only: true,
                container_drop_create: true,
                ..DdlFlags::DROP_CREATE
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Migration => "migration",
            Self::MigrationDropCreate => "migrationDropCreate",
            Self::CreateOnly => "createOnly",
            Self::Create => "create",
            Self::DropCreate => "dropCreate",
        }
    }

    /// Picks the mode from an optional property value and an optional
    /// caller default.
    pub fn select(value: Option<&str>, default: Option<&str>) -> Result<Self, ConfigError> {
        value
            .or(default)
            .ok_or(ConfigError::MissingDdlMode)?
            .parse()
    }
}

impl FromStr for DdlMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "migration" | "migrations" => Ok(Self::Migration),
            "migrationdropcreate" | "migrationsdropcreate" => Ok(Self::MigrationDropCreate),
            "createonly" => Ok(Self::CreateOnly),
            "create" => Ok(Self::Create),
            "dropcreate" => Ok(Self::DropCreate),
            _ => Err(ConfigError::UnknownDdlMode(s.to_string())),
        }
    }
}

impl fmt::Display for DdlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
