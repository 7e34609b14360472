use anyhow::{Context, Result, anyhow};
use jsonschema::{Validator, validator_for};
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

mod assertions;

pub use assertions::{assert_no_nulls, collect_action_types, find_nulls};

/// Schema for the card payloads produced by `gsm-cards`, relative to the workspace root.
pub const CARDS_SCHEMA: &str = "libs/cards/schema/bot-framework-cards.schema.json";

pub fn workspace_root() -> PathBuf {
    // workspace root is two levels up from this crate's manifest (libs/testutil)
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("workspace root")
        .to_path_buf();
    root.canonicalize().unwrap_or(root)
}

/// Loads a JSON or YAML fixture (relative to the workspace root) as a JSON value.
pub fn load_card_value(path: &str) -> Result<Value> {
    let absolute = absolute_path(path)?;
    let content = fs::read_to_string(&absolute)
        .with_context(|| format!("failed to read {}", absolute.display()))?;
    let extension = absolute
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match extension.as_str() {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse json {}", absolute.display())),
        "yaml" | "yml" => {
            let yaml: serde_yaml_bw::Value = serde_yaml_bw::from_str(&content)
                .with_context(|| format!("failed to parse yaml {}", absolute.display()))?;
            serde_json::to_value(yaml)
                .with_context(|| format!("failed to convert yaml {}", absolute.display()))
        }
        other => Err(anyhow!("unsupported fixture extension: {other}")),
    }
}

/// Lists fixture files under a workspace-relative directory, sorted by name.
pub fn list_fixtures(dir: &str) -> Result<Vec<PathBuf>> {
    let absolute = absolute_path(dir)?;
    let mut files = Vec::new();
    for entry in fs::read_dir(&absolute)
        .with_context(|| format!("failed to list {}", absolute.display()))?
    {
        let path = entry?.path();
        let supported = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext, "json" | "yaml" | "yml"));
        if path.is_file() && supported {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn absolute_path<P>(path: P) -> Result<PathBuf>
where
    P: AsRef<Path>,
{
    resolve_under(&workspace_root(), path.as_ref())
}

/// Canonicalizes `path` (relative paths are joined onto `root`) and refuses
/// anything that does not land inside `root`.
fn resolve_under(root: &Path, path: &Path) -> Result<PathBuf> {
    let candidate = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    let canonical = candidate
        .canonicalize()
        .with_context(|| format!("fixture not found: {}", candidate.display()))?;
    if !canonical.starts_with(root) {
        anyhow::bail!(
            "fixture path escapes workspace root ({}): {}",
            root.display(),
            canonical.display()
        );
    }
    Ok(canonical)
}

/// Validates `value` against the named definition (`#/$defs/<definition>`) of a schema file.
pub fn assert_matches_schema<P>(schema_path: P, definition: &str, value: &Value) -> Result<()>
where
    P: AsRef<Path>,
{
    let compiled = load_compiled_schema(schema_path.as_ref(), definition)?;

    let mut errors = compiled.iter_errors(value);
    if let Some(first) = errors.next() {
        let mut messages: Vec<String> = Vec::new();
        messages.push(first.to_string());
        for err in errors {
            messages.push(err.to_string());
        }
        return Err(anyhow!(
            "schema validation against {definition} failed: {}",
            messages.join("; ")
        ));
    }

    Ok(())
}

fn load_schema(path: &Path) -> Result<Value> {
    let absolute = absolute_path(path)?;
    let content = fs::read_to_string(&absolute)
        .with_context(|| format!("failed to read {}", absolute.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse json {}", absolute.display()))
}

fn load_compiled_schema(path: &Path, definition: &str) -> Result<Arc<Validator>> {
    static CACHE: Lazy<Mutex<HashMap<(PathBuf, String), Arc<Validator>>>> =
        Lazy::new(|| Mutex::new(HashMap::new()));

    let absolute = absolute_path(path)?;
    let key = (absolute.clone(), definition.to_string());

    {
        let cache = CACHE.lock().map_err(|_| anyhow!("schema cache poisoned"))?;
        if let Some(schema) = cache.get(&key) {
            return Ok(schema.clone());
        }
    }

    let mut schema_value = load_schema(&absolute)?;
    if schema_value
        .get("$defs")
        .and_then(|defs| defs.get(definition))
        .is_none()
    {
        anyhow::bail!("schema {} has no definition `{definition}`", absolute.display());
    }
    // Point the root at the requested definition; `$defs` stay resolvable.
    if let Some(root) = schema_value.as_object_mut() {
        root.insert(
            "$ref".to_string(),
            Value::String(format!("#/$defs/{definition}")),
        );
    }
    let compiled = validator_for(&schema_value)
        .map_err(|err| anyhow!("failed to compile json schema: {err}"))?;
    let compiled = Arc::new(compiled);

    let mut cache = CACHE.lock().map_err(|_| anyhow!("schema cache poisoned"))?;
    let entry = cache.entry(key).or_insert_with(|| compiled.clone());
    Ok(entry.clone())
}

pub fn to_json_value<T>(value: &T) -> Result<Value>
where
    T: Serialize,
{
    serde_json::to_value(value).context("failed to convert to json value")
}

#[macro_export]
macro_rules! load_card {
    ($path:expr $(,)?) => {{
        $crate::load_card_value($path)
            .unwrap_or_else(|err| panic!("failed to load card {}: {}", $path, err))
    }};
}

#[macro_export]
macro_rules! assert_snapshot_json {
    ($value:expr, @$snapshot:literal $(,)?) => {{
        let snapshot_value = $crate::to_json_value(&$value)
            .unwrap_or_else(|err| panic!("failed to serialise snapshot: {}", err));
        insta::assert_json_snapshot!(snapshot_value, @$snapshot);
    }};
    ($name:expr, $value:expr $(,)?) => {{
        let snapshot_value = $crate::to_json_value(&$value)
            .unwrap_or_else(|err| panic!("failed to serialise snapshot {}: {}", $name, err));
        insta::assert_json_snapshot!($name, snapshot_value);
    }};
}
