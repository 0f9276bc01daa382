//! `tsconfig.json` / `jsconfig.json` merging

use super::MergeOutcome;
use crate::options::Language;
use crate::project::ProjectProfile;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};

const DEFAULT_INDENT: &str = "  ";
const ALIAS_KEY: &str = "@/*";

/// Settings the module-resolution config must carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionConfig {
    /// `compilerOptions.jsx`
    pub jsx: String,
    /// Target of the `@/*` path alias, e.g. `./src/*`
    pub alias_target: String,
    /// Globs appended to an existing `include` list
    pub include: Vec<String>,
}

impl ResolutionConfig {
    pub fn for_project(profile: &ProjectProfile, language: Language) -> Self {
        let base = profile.base_relative();
        let prefix = if base == "." {
            String::new()
        } else {
            format!("{}/", base)
        };
        let extensions: &[&str] = if language.is_typed() {
            &["ts", "tsx"]
        } else {
            &["js", "jsx"]
        };

        Self {
            jsx: profile.kind.jsx_mode().to_string(),
            alias_target: format!("./{}*", prefix),
            include: extensions
                .iter()
                .map(|ext| format!("{}**/*.{}", prefix, ext))
                .collect(),
        }
    }

    fn alias_value(&self) -> Value {
        json!([self.alias_target])
    }

    /// Minimal document for a project that has no config yet
    fn fresh_document(&self) -> Value {
        let mut paths = Map::new();
        paths.insert(ALIAS_KEY.to_string(), self.alias_value());
        json!({
            "compilerOptions": {
                "jsx": self.jsx,
                "baseUrl": ".",
                "moduleResolution": "bundler",
                "paths": paths,
            },
            "include": self.include,
        })
    }
}

/// Why a config file could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0}")]
    Parse(String),
}

/// A JSON config held in memory together with where it came from
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    pub path: PathBuf,
    pub value: Value,
    /// Whether the file was on disk when loaded
    pub existed: bool,
    indent: String,
}

impl ConfigDocument {
    /// Load `path`. A missing file yields an empty, not-yet-existing document.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Ok(Self {
                path: path.to_path_buf(),
                value: Value::Object(Map::new()),
                existed: false,
                indent: DEFAULT_INDENT.to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value =
            serde_json::from_str(&content).map_err(|e| LoadError::Parse(e.to_string()))?;
        if !value.is_object() {
            return Err(LoadError::Parse("top level is not an object".to_string()));
        }

        Ok(Self {
            path: path.to_path_buf(),
            value,
            existed: true,
            indent: detect_indent(&content),
        })
    }

    /// Serialize with the file's own indentation and a trailing newline
    pub fn render(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(self.indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.value
            .serialize(&mut ser)
            .context("Failed to serialize config")?;
        let mut out = String::from_utf8(buf).context("Serialized config is not UTF-8")?;
        out.push('\n');
        Ok(out)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(&self.path, self.render()?)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

/// Leading whitespace of the first line that opens a top-level key, or two
/// spaces when that key is flush left or shares a line with the opening brace
fn detect_indent(content: &str) -> String {
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escaped = false;

    for line in content.lines() {
        let trimmed = line.trim_start();
        if depth == 1 && !in_string && trimmed.starts_with('"') {
            let indent = &line[..line.len() - trimmed.len()];
            if indent.is_empty() {
                break;
            }
            return indent.to_string();
        }

        for c in line.chars() {
            if in_string {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
            } else {
                match c {
                    '"' => in_string = true,
                    '{' | '[' => depth += 1,
                    '}' | ']' => depth -= 1,
                    _ => {}
                }
            }
        }
    }

    DEFAULT_INDENT.to_string()
}

/// Ensure the module-resolution config declares JSX handling and the `@/*` alias.
///
/// A config that already sets `compilerOptions.jsx` is left byte-for-byte
/// untouched. Unparseable files are skipped, never rewritten.
pub fn merge_jsx_setting(path: &Path, config: &ResolutionConfig) -> Result<MergeOutcome> {
    let mut doc = match ConfigDocument::load(path) {
        Ok(doc) => doc,
        Err(LoadError::Parse(reason)) => {
            return Ok(MergeOutcome::Skipped {
                reason: format!("could not parse {}: {}", file_name(path), reason),
            })
        }
        Err(e) => return Err(e.into()),
    };

    if !doc.existed {
        doc.value = config.fresh_document();
        doc.save()?;
        return Ok(MergeOutcome::Created);
    }

    let Some(root) = doc.value.as_object_mut() else {
        return Ok(MergeOutcome::Skipped {
            reason: "top level is not an object".to_string(),
        });
    };

    let compiler_options = root
        .entry("compilerOptions")
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(compiler_options) = compiler_options.as_object_mut() else {
        return Ok(MergeOutcome::Skipped {
            reason: "compilerOptions is not an object".to_string(),
        });
    };

    if compiler_options.contains_key("jsx") {
        return Ok(MergeOutcome::AlreadyConfigured);
    }

    compiler_options.insert("jsx".to_string(), Value::String(config.jsx.clone()));

    match compiler_options.get_mut("paths") {
        None => {
            let mut paths = Map::new();
            paths.insert(ALIAS_KEY.to_string(), config.alias_value());
            compiler_options.insert("paths".to_string(), Value::Object(paths));
        }
        Some(Value::Object(paths)) => {
            paths
                .entry(ALIAS_KEY.to_string())
                .or_insert_with(|| config.alias_value());
        }
        // Unknown shape, leave it
        Some(_) => {}
    }

    if let Some(Value::Array(include)) = root.get_mut("include") {
        append_missing_globs(include, &config.include);
    }

    doc.save()?;
    Ok(MergeOutcome::Updated)
}

/// Append globs that no existing entry already contains
fn append_missing_globs(include: &mut Vec<Value>, globs: &[String]) {
    for glob in globs {
        let present = include
            .iter()
            .filter_map(Value::as_str)
            .any(|existing| existing.contains(glob.as_str()));
        if !present {
            include.push(Value::String(glob.clone()));
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
