use std::path::{Path, PathBuf};

use eyre::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Picked from the file extension, YAML unless it is `.json`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::Json,
            _ => Self::Yaml,
        }
    }

    fn parse<T: DeserializeOwned>(self, content: &str) -> eyre::Result<T> {
        Ok(match self {
            Self::Yaml => serde_yaml::from_str(content)?,
            Self::Json => serde_json::from_str(content)?,
        })
    }

    fn render<T: Serialize>(self, value: &T) -> eyre::Result<String> {
        Ok(match self {
            Self::Yaml => serde_yaml::to_string(value)?,
            Self::Json => serde_json::to_string_pretty(value)?,
        })
    }
}

pub async fn read_deserialize<T>(path: impl AsRef<Path>) -> eyre::Result<T>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();

    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Reading from {}", path.display()))?;

    Format::of(path).parse(&content).with_context(|| {
        format!("Parsing {} content was {content}", path.display())
    })
}

/// Writes next to `path` first and renames over it, so readers never see a
/// partially written file.
pub async fn write_serialize<T>(
    path: impl AsRef<Path>,
    value: T,
) -> eyre::Result<()>
where
    T: Serialize,
{
    let path = path.as_ref();

    let content = Format::of(path)
        .render(&value)
        .with_context(|| format!("Serializing {}", path.display()))?;

    let staging = staging_path(path);

    tokio::fs::write(&staging, content)
        .await
        .with_context(|| format!("Writing to {}", staging.display()))?;

    tokio::fs::rename(&staging, path)
        .await
        .with_context(|| format!("Replacing {}", path.display()))?;

    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    PathBuf::from(staging)
}
