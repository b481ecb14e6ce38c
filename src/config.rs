use std::{
    env,
    fs::File,
    io::{self, Read},
    path::{Component, Path, PathBuf},
};

use crate::{
    context::Context,
    error::{Error, Result},
};

/// File name looked up in the resolved directory when `--file` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "pgql.yaml";

/// Where a command should read or write its configuration.
///
/// An empty `file_name` means the caller picks the default name itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct ConfigLocation {
    pub directory: PathBuf,
    pub file_name: Option<String>,
}

impl ConfigLocation {
    pub fn config_path(&self) -> PathBuf {
        let file_name = self.file_name.as_deref().unwrap_or(DEFAULT_CONFIG_FILE);
        self.directory.join(file_name)
    }
}

/// Computes the config location from the `--file` flag without checking
/// that anything exists on disk.
pub fn resolve(file: Option<&str>) -> Result<ConfigLocation> {
    match file {
        Some("") => Err(Error::EmptyConfigPath),
        Some(file) if Path::new(file).is_absolute() => Ok(split(&normalize(Path::new(file)))),
        Some(file) => {
            let cwd = env::current_dir().map_err(Error::PathResolution)?;
            resolve_in(&cwd, Some(file))
        }
        None => {
            let cwd = env::current_dir().map_err(Error::WorkingDirectoryUnavailable)?;
            resolve_in(&cwd, None)
        }
    }
}

/// Same as [`resolve`] with an explicit working directory.
pub fn resolve_in(cwd: &Path, file: Option<&str>) -> Result<ConfigLocation> {
    match file {
        Some("") => Err(Error::EmptyConfigPath),
        Some(file) => {
            if !cwd.is_absolute() {
                return Err(Error::PathResolution(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("working directory {} is not absolute", cwd.display()),
                )));
            }
            Ok(split(&normalize(&cwd.join(file))))
        }
        None => Ok(ConfigLocation {
            directory: cwd.to_path_buf(),
            file_name: None,
        }),
    }
}

fn split(path: &Path) -> ConfigLocation {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => ConfigLocation {
            directory: parent.to_path_buf(),
            file_name: Some(name.to_string_lossy().into_owned()),
        },
        // Filesystem root: nothing to split off.
        _ => ConfigLocation {
            directory: path.to_path_buf(),
            file_name: None,
        },
    }
}

/// Lexically drops `.` and folds `..` into its parent. `..` never climbs
/// past the root.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component.as_os_str())
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if normalized.file_name().is_some() {
                    normalized.pop();
                }
            }
        }
    }
    normalized
}

/// Reads and parses the config file at `path`. The document is returned as
/// plain YAML; an empty file yields `Value::Null`.
pub fn load(path: &Path, ctx: &Context) -> Result<serde_yaml::Value> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(err) => return Err(Error::io(path, err)),
    };
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|err| Error::io(path, err))?;
    drop(file);
    ctx.check_cancelled()?;

    tracing::debug!("Read {} bytes from {}", content.len(), path.display());
    if content.trim().is_empty() {
        return Ok(serde_yaml::Value::Null);
    }
    serde_yaml::from_str(&content).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}
