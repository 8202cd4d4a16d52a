//! Kernel descriptor (`kernel.json`) patching
//!
//! The bundled template refers to its own install location through a placeholder
//! token. After the registry copy, the installed copy is regenerated from the
//! template with the real path and the accumulated environment overrides.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::error::{InstallError, Result};
use crate::options::EnvOverrides;

/// Descriptor file name inside a kernel directory
pub const DESCRIPTOR_FILE: &str = "kernel.json";

/// Placeholder replaced by the install path
pub const INSTALL_DIR_TOKEN: &str = "@KERNEL_INSTALL_DIRECTORY@";

/// Descriptor key holding environment variables for the kernel process
pub const ENV_KEY: &str = "env";

const INDENT: &[u8] = b"    ";

/// JSON string escaping of `path`, without the surrounding quotes
pub fn json_fragment(path: &Path) -> Result<String> {
    let text = path.to_str().ok_or_else(|| InstallError::NonUtf8Path {
        path: path.display().to_string(),
    })?;

    let quoted = Value::from(text).to_string();
    Ok(quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(&quoted)
        .to_string())
}

/// Replace every install directory token in `template`
pub fn substitute_install_dir(template: &str, install_dir: &Path) -> Result<String> {
    Ok(template.replace(INSTALL_DIR_TOKEN, &json_fragment(install_dir)?))
}

/// Merge overrides into the descriptor's `env` object, creating it if absent
pub fn merge_env(descriptor: &mut Value, overrides: &EnvOverrides) -> Result<()> {
    let object = descriptor
        .as_object_mut()
        .ok_or_else(|| InstallError::InvalidDescriptor {
            message: "top-level value must be a JSON object".to_string(),
        })?;

    let env = object
        .entry(ENV_KEY)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| InstallError::InvalidDescriptor {
            message: format!("\"{ENV_KEY}\" must be a JSON object"),
        })?;

    for (key, value) in overrides {
        env.insert((*key).to_string(), Value::String(value.clone()));
    }

    Ok(())
}

/// Load the template at `template_path` and produce the patched descriptor
pub fn render(template_path: &Path, install_dir: &Path, overrides: &EnvOverrides) -> Result<Value> {
    let template =
        fs::read_to_string(template_path).map_err(|e| InstallError::TemplateReadFailed {
            path: template_path.display().to_string(),
            reason: e.to_string(),
        })?;

    let contents = substitute_install_dir(&template, install_dir)?;
    let mut descriptor: Value =
        serde_json::from_str(&contents).map_err(|e| InstallError::TemplateParseFailed {
            path: template_path.display().to_string(),
            reason: e.to_string(),
        })?;

    merge_env(&mut descriptor, overrides)?;
    Ok(descriptor)
}

/// Serialize with alphabetically sorted keys and four-space indentation
pub fn to_sorted_json(descriptor: &Value) -> Result<String> {
    let sorted = sort_keys(descriptor);
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    sorted
        .serialize(&mut serializer)
        .map_err(|e| InstallError::InvalidDescriptor {
            message: e.to_string(),
        })?;

    String::from_utf8(buf).map_err(|e| InstallError::InvalidDescriptor {
        message: e.to_string(),
    })
}

/// Overwrite `path` with the serialized descriptor
pub fn write(path: &Path, descriptor: &Value) -> Result<()> {
    let contents = to_sorted_json(descriptor)?;
    fs::write(path, contents).map_err(|e| InstallError::DescriptorWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

// serde_json keeps insertion order when `preserve_order` is enabled anywhere in the
// dependency graph, so objects are rebuilt in key order here.
fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(object) => {
            let mut entries: Vec<_> = object.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_keys(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}
