use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;

/// Loads a `.jarship.env` file (shell-style `KEY=value` format).
///
/// `.jarship.env` holds publishing secrets (repository passwords, the signing
/// passphrase). Values are available via `${env:VAR}` interpolation in
/// `Jarship.toml`. Surrounding single or double quotes are stripped and an
/// optional leading `export ` is ignored.
pub fn load_env_file(path: &Path) -> miette::Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    if !path.is_file() {
        return Ok(map);
    }
    let content =
        std::fs::read_to_string(path).map_err(jarship_util::errors::JarshipError::Io)?;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
        if let Some((key, value)) = trimmed.split_once('=') {
            map.insert(key.trim().to_string(), unquote(value.trim()).to_string());
        }
    }
    Ok(map)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Interpolate `${env:VAR}` references in a string.
///
/// Looks up values first from the provided `env_overrides` map (populated
/// from `.jarship.env`), then falls back to actual process environment variables.
/// Unresolved references become empty strings, so a missing password surfaces
/// later as a missing-credentials error rather than a parse error.
pub fn interpolate(input: &str, env_overrides: &BTreeMap<String, String>) -> String {
    let mut result = input.to_string();
    let mut search_from = 0;
    while let Some(offset) = result[search_from..].find("${env:") {
        let start = search_from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let end = start + end;
        let key = &result[start + 6..end];
        let value = match env_overrides.get(key) {
            Some(v) => v.clone(),
            None => std::env::var(key).unwrap_or_else(|_| {
                tracing::debug!("${{env:{key}}} is not set; substituting empty string");
                String::new()
            }),
        };
        result.replace_range(start..=end, &value);
        search_from = start + value.len();
    }
    result
}

/// Resolve `${env:VAR}` references inside every string value of a parsed
/// TOML document. Keys and non-string values are left as they are.
///
/// Substitution happens after parsing, so secrets containing `"` or `\`
/// are taken verbatim instead of being read as TOML syntax.
pub fn interpolate_toml(value: &mut toml::Value, env_overrides: &BTreeMap<String, String>) {
    match value {
        toml::Value::String(s) if s.contains("${env:") => {
            *s = interpolate(s, env_overrides);
        }
        toml::Value::Array(items) => {
            for item in items {
                interpolate_toml(item, env_overrides);
            }
        }
        toml::Value::Table(table) => {
            for (_, item) in table.iter_mut() {
                interpolate_toml(item, env_overrides);
            }
        }
        _ => {}
    }
}

/// Parse a TOML document, resolve its `${env:VAR}` references, then
/// deserialize it into `T`.
pub fn parse_interpolated<T: DeserializeOwned>(
    content: &str,
    env_overrides: &BTreeMap<String, String>,
) -> Result<T, toml::de::Error> {
    let table: toml::Table = toml::from_str(content)?;
    let mut value = toml::Value::Table(table);
    interpolate_toml(&mut value, env_overrides);
    value.try_into()
}
