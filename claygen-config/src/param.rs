//! Protoc-style generator parameters.
//!
//! protoc hands plugins a single comma-separated string
//! (`--goclay_out=impl=true,impl_path=impl:.`). Each `key=value` pair
//! overrides the matching `[generate]` setting; a bare boolean key means `true`.

use crate::{Error, GenerateConfig, Result};

impl GenerateConfig {
    /// Overlay a protoc-style parameter string onto this config.
    pub fn apply_parameter(&mut self, parameter: &str) -> Result<()> {
        for item in parameter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = match item.split_once('=') {
                Some((key, value)) => (key.trim(), Some(value.trim())),
                None => (item, None),
            };

            match key {
                "impl" => self.emit_impl = parse_bool(item, value)?,
                "force" => self.force = parse_bool(item, value)?,
                "desc_path" => self.desc_path = parse_path(item, value)?,
                "impl_path" => self.impl_path = parse_path(item, value)?,
                _ => return Err(Error::parameter(item, format!("unknown key '{}'", key))),
            }
        }
        Ok(())
    }
}

fn parse_bool(item: &str, value: Option<&str>) -> Result<bool> {
    match value {
        None | Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(other) => Err(Error::parameter(
            item,
            format!("expected a boolean, got '{}'", other),
        )),
    }
}

fn parse_path(item: &str, value: Option<&str>) -> Result<String> {
    match value {
        Some(path) if !path.is_empty() => Ok(path.to_string()),
        _ => Err(Error::parameter(item, "expected a non-empty path")),
    }
}
