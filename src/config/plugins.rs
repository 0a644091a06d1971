//! Plugin list parsing.
//!
//! Each entry of a `plugins` list is a map with a single key: the plugin
//! name. Its value is the plugin's argument string, split on whitespace.
//!
//! ```yaml
//! plugins:
//!   - server_id: LL 00:de:ad:be:ef:00
//!   - lease_time: 3600s
//!   - nbp:
//! ```

use serde_json::Value;

use super::error::ConfigError;
use super::types::{PluginConfig, Protocol};

/// Parse a raw plugin list, preserving order.
pub fn parse_plugins(protocol: Protocol, entries: &[Value]) -> Result<Vec<PluginConfig>, ConfigError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(protocol, index, entry))
        .collect()
}

fn parse_entry(protocol: Protocol, index: usize, entry: &Value) -> Result<PluginConfig, ConfigError> {
    let map = entry
        .as_object()
        .ok_or(ConfigError::InvalidPluginEntry { protocol, index })?;

    // one plugin per item, since it's a map of name -> args
    let mut iter = map.iter();
    let (name, value) = match (iter.next(), iter.next()) {
        (Some(kv), None) => kv,
        _ => {
            return Err(ConfigError::MalformedPluginEntry {
                protocol,
                index,
                keys: map.len(),
            });
        }
    };
    if name.trim().is_empty() {
        return Err(ConfigError::EmptyPluginName { protocol, index });
    }

    let mut args = Vec::new();
    push_args(value, &mut args, true).map_err(|()| ConfigError::InvalidPluginArgs {
        protocol,
        index,
        name: name.clone(),
    })?;

    Ok(PluginConfig {
        name: name.clone(),
        args,
    })
}

/// Append the whitespace-separated tokens of `value` to `args`.
///
/// Scalars are rendered as text; a top-level list contributes each of its
/// scalar elements in order.
fn push_args(value: &Value, args: &mut Vec<String>, allow_list: bool) -> Result<(), ()> {
    match value {
        Value::Null => {}
        Value::String(s) => args.extend(s.split_whitespace().map(str::to_string)),
        Value::Bool(b) => args.push(b.to_string()),
        Value::Number(n) => args.push(n.to_string()),
        Value::Array(items) if allow_list => {
            for item in items {
                push_args(item, args, false)?;
            }
        }
        Value::Array(_) | Value::Object(_) => return Err(()),
    }
    Ok(())
}
