//! Task catalog and conversation history files.
//!
//! Catalogs are TOML (`[[tasks]]` tables) or JSON (`{"tasks": [...]}` or a
//! bare array). Histories are JSON arrays or TOML `[[turns]]` tables. The
//! format is picked from the file extension.

use dispatch_domain::{ConversationTurn, Task};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CatalogLoadError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {message}")]
    Toml { path: PathBuf, message: String },

    #[error("Invalid JSON in {path}: {message}")]
    Json { path: PathBuf, message: String },

    #[error("Unsupported file extension for {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    fn of(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "toml" => Some(FileFormat::Toml),
            "json" => Some(FileFormat::Json),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    tasks: Vec<Task>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonCatalog {
    Wrapped(CatalogDocument),
    Bare(Vec<Task>),
}

#[derive(Deserialize)]
struct HistoryDocument {
    #[serde(default)]
    turns: Vec<ConversationTurn>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonHistory {
    Wrapped(HistoryDocument),
    Bare(Vec<ConversationTurn>),
}

/// Load a task catalog.
pub fn load_catalog(path: &Path) -> Result<Vec<Task>, CatalogLoadError> {
    let tasks = match read_format(path)? {
        (FileFormat::Toml, content) => parse_toml::<CatalogDocument>(path, &content)?.tasks,
        (FileFormat::Json, content) => match parse_json::<JsonCatalog>(path, &content)? {
            JsonCatalog::Wrapped(doc) => doc.tasks,
            JsonCatalog::Bare(tasks) => tasks,
        },
    };
    debug!("Loaded {} tasks from {}", tasks.len(), path.display());
    Ok(tasks)
}

/// Load a conversation history, oldest turn first.
pub fn load_history(path: &Path) -> Result<Vec<ConversationTurn>, CatalogLoadError> {
    let turns = match read_format(path)? {
        (FileFormat::Toml, content) => parse_toml::<HistoryDocument>(path, &content)?.turns,
        (FileFormat::Json, content) => match parse_json::<JsonHistory>(path, &content)? {
            JsonHistory::Wrapped(doc) => doc.turns,
            JsonHistory::Bare(turns) => turns,
        },
    };
    debug!("Loaded {} history turns from {}", turns.len(), path.display());
    Ok(turns)
}

fn read_format(path: &Path) -> Result<(FileFormat, String), CatalogLoadError> {
    let format =
        FileFormat::of(path).ok_or_else(|| CatalogLoadError::UnsupportedFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((format, content))
}

fn parse_toml<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T, CatalogLoadError> {
    toml::from_str(content).map_err(|e| CatalogLoadError::Toml {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn parse_json<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T, CatalogLoadError> {
    serde_json::from_str(content).map_err(|e| CatalogLoadError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_domain::{ParameterType, TurnRole};

    const CATALOG_TOML: &str = r#"
[[tasks]]
id = "t1"
name = "Agendar cita"
instruction = "Ofrece un recordatorio."

[tasks.automation_function]
name = "agendarCita"
description = "Agenda una cita"

[[tasks.automation_function.parameters]]
name = "fecha"
type = "fecha"
required = true

[[tasks.required_custom_fields]]
name = "telefono_contacto"
type = "telefono"

[[tasks]]
id = "t2"
name = "Preguntas frecuentes"
"#;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_toml_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = load_catalog(&write(&dir, "tasks.toml", CATALOG_TOML)).unwrap();

        assert_eq!(tasks.len(), 2);
        let function = tasks[0].automation_function.as_ref().unwrap();
        assert_eq!(function.name, "agendarCita");
        assert_eq!(function.parameters[0].domain_type, ParameterType::Date);
        assert!(function.parameters[0].required);
        assert_eq!(
            tasks[0].required_custom_fields[0].domain_type,
            ParameterType::Phone
        );
        assert!(!tasks[1].is_invokable());
    }

    #[test]
    fn test_load_json_catalog_wrapped_and_bare() {
        let dir = tempfile::tempdir().unwrap();
        let body = r#"[{"id": "t1", "name": "Agendar", "automation_function": {"name": "agendarCita"}}]"#;

        let bare = load_catalog(&write(&dir, "bare.json", body)).unwrap();
        let wrapped =
            load_catalog(&write(&dir, "wrapped.json", &format!("{{\"tasks\": {}}}", body)))
                .unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(bare[0].function_name(), Some("agendarCita"));
    }

    #[test]
    fn test_load_json_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "history.json",
            r#"[
                {"role": "user", "message": "Quiero una cita"},
                {"role": "assistant", "message": "¿Para qué fecha?"},
                {"role": "function", "message": "ok", "function_name": "agendarCita"}
            ]"#,
        );
        let history = load_history(&path).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].role, TurnRole::Assistant);
        assert_eq!(history[2].function_name.as_deref(), Some("agendarCita"));
    }

    #[test]
    fn test_load_toml_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "history.toml",
            "[[turns]]\nrole = \"user\"\nmessage = \"Hola\"\n",
        );
        let history = load_history(&path).unwrap();
        assert_eq!(history, vec![ConversationTurn::user("Hola")]);
    }

    #[test]
    fn test_errors() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_catalog(&write(&dir, "tasks.yaml", "tasks: []")).unwrap_err();
        assert!(matches!(err, CatalogLoadError::UnsupportedFormat(_)));

        let err = load_catalog(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, CatalogLoadError::Io { .. }));

        let err = load_catalog(&write(&dir, "broken.toml", "[[tasks]\n")).unwrap_err();
        assert!(matches!(err, CatalogLoadError::Toml { .. }));

        let err = load_history(&write(&dir, "broken.json", "{")).unwrap_err();
        assert!(matches!(err, CatalogLoadError::Json { .. }));
    }
}
