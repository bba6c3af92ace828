//! # Alias Store
//!
//! Reads, reconciles and persists the alias file of a group. This is where the pieces
//! meet:
//!
//! 1. **Pre-flight:** the alias directory is created if needed and probed for
//!    writability, and an existing target file must be writable. A doomed run fails here,
//!    before anything is generated or written.
//! 2. **Reconciliation:** existing aliases are read, fresh ones generated and merged over
//!    them. Managed aliases that were not regenerated are dropped (their environment is
//!    gone); user-defined ones are carried over with lower priority than generated ones.
//! 3. **Persistence:** the banner and the serialized aliases replace the file atomically.
//!
//! The syntax of the file is delegated to an [`AliasFormat`] backend.

use log::{debug, info};
use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};
use thiserror::Error;

use crate::{
    core::{generator::AliasGenerator, merge, ownership, ownership::OwnershipKey},
    formats::{AliasFormat, FormatError},
    models::{AliasMap, Application, Environment, Project},
    system::atomic_file,
};

/// Errors raised while reading or writing alias files.
#[derive(Error, Debug)]
pub enum AliasStoreError {
    /// The group name cannot be used as a file name inside the alias directory.
    #[error("Invalid alias group '{group}': expected a plain name without path separators")]
    InvalidGroup { group: String },
    /// The alias directory does not exist and could not be created.
    #[error("Alias directory not found: '{}': {source}", .path.display())]
    DirectoryNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// No new files can be created in the alias directory.
    #[error("Alias directory not writable: '{}': {source}", .path.display())]
    DirectoryNotWritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The alias file exists but cannot be replaced.
    #[error("Alias file not writable: '{}'", .path.display())]
    FileNotWritable { path: PathBuf },
    /// An existing alias file could not be read.
    #[error("Failed to read alias file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// An existing alias file could not be understood.
    #[error("Failed to parse alias file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
    /// The aliases could not be rendered in the configured format.
    #[error("Failed to format aliases for '{}': {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
    /// The alias file could not be written. The previous file, if any, is intact.
    #[error("Failed to write alias file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The alias file could not be removed.
    #[error("Failed to delete alias file '{}': {source}", .path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

type StoreResult<T> = Result<T, AliasStoreError>;

/// Alias files of one format in one directory.
#[derive(Debug)]
pub struct AliasStore {
    dir: PathBuf,
    format: Box<dyn AliasFormat>,
    key: OwnershipKey,
    generator: AliasGenerator,
}

impl AliasStore {
    /// Creates a store writing `format` files into `dir`.
    pub fn new(
        dir: PathBuf,
        format: Box<dyn AliasFormat>,
        key: OwnershipKey,
        generator: AliasGenerator,
    ) -> Self {
        Self {
            dir,
            format,
            key,
            generator,
        }
    }

    /// The alias directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The key marking aliases as managed.
    pub fn ownership_key(&self) -> &OwnershipKey {
        &self.key
    }

    /// The file holding `group`.
    ///
    /// # Errors
    /// Returns [`AliasStoreError::InvalidGroup`] if `group` is empty, `.`, `..` or contains
    /// a path separator, so that no group resolves outside the alias directory.
    pub fn file_path(&self, group: &str) -> StoreResult<PathBuf> {
        validate_group(group)?;
        Ok(self.dir.join(self.format.file_name(group)))
    }

    /// Generates the aliases for a project and reconciles them with those on disk.
    ///
    /// # Arguments
    /// * `project` - The project, named in the file banner.
    /// * `group` - The alias group (file) to write.
    /// * `apps` - The project's applications. When empty nothing happens and `false` is returned.
    /// * `environments` - The project's environments.
    /// * `previous_group` - A former group name whose aliases should be carried over.
    ///
    /// # Errors
    /// Returns an error if the directory or file is not usable, if an existing file
    /// cannot be read or parsed, or if writing fails. Nothing is written in any of
    /// these cases.
    pub fn create_aliases(
        &self,
        project: &Project,
        group: &str,
        apps: &[Application],
        environments: &[Environment],
        previous_group: Option<&str>,
    ) -> StoreResult<bool> {
        if apps.is_empty() {
            debug!("No applications for group '{}'; skipping alias generation.", group);
            return Ok(false);
        }

        // --- 1. Pre-flight ---
        let path = self.file_path(group)?;
        self.prepare_directory()?;
        ensure_file_writable(&path)?;

        // --- 2. Reconciliation ---
        let existing = self.read_existing(group, previous_group)?;
        let generated = self.generator.generate(apps, environments);
        let merged = merge::merge(generated, &existing);

        let (managed, mut aliases) = ownership::partition(existing);
        for name in managed.keys().filter(|name| !merged.contains_key(*name)) {
            info!("Removing stale alias '{}' from group '{}'.", name, group);
        }
        aliases.extend(merged);

        // --- 3. Persistence ---
        let body = self
            .format
            .serialize(&aliases, &self.key)
            .map_err(|source| AliasStoreError::Serialize {
                path: path.clone(),
                source,
            })?;
        let header = self.format.header(project, &self.key);
        let content = format!("{}\n\n{}", header.trim_end(), body);

        atomic_file::write_atomic(&path, &content).map_err(|source| AliasStoreError::Write {
            path: path.clone(),
            source,
        })?;

        info!(
            "Wrote {} aliases for group '{}' to '{}'.",
            aliases.len(),
            group,
            path.display()
        );
        Ok(true)
    }

    /// Removes the alias file of `group`. A missing file is not an error.
    pub fn delete_aliases(&self, group: &str) -> StoreResult<()> {
        let path = self.file_path(group)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Deleted alias file '{}'.", path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Alias file '{}' does not exist; nothing to delete.", path.display());
                Ok(())
            }
            Err(source) => Err(AliasStoreError::Delete { path, source }),
        }
    }

    /// Reads the aliases of `current_group` and, when given and different,
    /// `previous_group`.
    ///
    /// Groups are read in that order and a later group overwrites names read from an
    /// earlier one. Keys are normalized by stripping a `<group>.` prefix.
    pub fn read_existing(
        &self,
        current_group: &str,
        previous_group: Option<&str>,
    ) -> StoreResult<AliasMap> {
        let previous = previous_group.filter(|g| !g.is_empty() && *g != current_group);

        let mut aliases = AliasMap::new();
        for group in [Some(current_group), previous]
            .into_iter()
            .flatten()
            .filter(|g| !g.is_empty())
        {
            aliases.extend(self.read_group(group)?);
        }
        Ok(aliases)
    }

    /// Lists the aliases currently stored for `group`.
    pub fn list_aliases(&self, group: &str) -> StoreResult<AliasMap> {
        self.read_existing(group, None)
    }

    fn read_group(&self, group: &str) -> StoreResult<AliasMap> {
        let path = self.file_path(group)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No alias file for group '{}' at '{}'.", group, path.display());
                return Ok(AliasMap::new());
            }
            Err(source) => return Err(AliasStoreError::Read { path, source }),
        };

        let parsed = self
            .format
            .parse(&text, &self.key)
            .map_err(|source| AliasStoreError::Parse {
                path: path.clone(),
                source,
            })?;
        debug!(
            "Read {} aliases for group '{}' from '{}'.",
            parsed.len(),
            group,
            path.display()
        );

        let prefix = format!("{group}.");
        Ok(parsed
            .into_iter()
            .map(|(name, alias)| match name.strip_prefix(&prefix) {
                Some(stripped) => (stripped.to_string(), alias),
                None => (name, alias),
            })
            .collect())
    }

    /// Creates the alias directory if needed and checks files can be created in it.
    fn prepare_directory(&self) -> StoreResult<()> {
        if !self.dir.is_dir() {
            info!("Creating alias directory '{}'.", self.dir.display());
            fs::create_dir_all(&self.dir).map_err(|source| {
                AliasStoreError::DirectoryNotFound {
                    path: self.dir.clone(),
                    source,
                }
            })?;
        }
        atomic_file::probe_writable(&self.dir).map_err(|source| {
            AliasStoreError::DirectoryNotWritable {
                path: self.dir.clone(),
                source,
            }
        })
    }
}

fn validate_group(group: &str) -> StoreResult<()> {
    let mut components = Path::new(group).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !group.contains(['/', '\\']) => Ok(()),
        _ => Err(AliasStoreError::InvalidGroup {
            group: group.to_string(),
        }),
    }
}

/// Fails if `path` exists but cannot be replaced by a regular file.
fn ensure_file_writable(path: &Path) -> StoreResult<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() || meta.permissions().readonly() => {
            Err(AliasStoreError::FileNotWritable {
                path: path.to_path_buf(),
            })
        }
        _ => Ok(()),
    }
}
