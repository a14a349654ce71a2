use crate::utils::error::{BepError, Result};
use std::collections::HashSet;
use std::path::{Component, Path};
use url::Url;

/// Pre-flight check run before a workflow leaves `Idle` or a config is used.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> BepError {
    BepError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Backend endpoints must be absolute http(s) URLs.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.trim().is_empty() {
        return Err(invalid(
            field_name,
            url_str,
            "an endpoint URL is required to reach the generation service",
        ));
    }

    let url = Url::parse(url_str).map_err(|e| {
        invalid(field_name, url_str, format!("not a valid endpoint URL: {}", e))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field_name,
            url_str,
            format!("the generation service is only reachable over http(s), not {}", scheme),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field_name, path, "a directory for exported documents is required"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "path contains null bytes"));
    }
    Ok(())
}

/// Accepts only plain relative paths that stay below the directory they are
/// joined to: no root, drive prefix or `..` component.
pub fn validate_relative_path(field_name: &str, path: &str) -> Result<()> {
    validate_path(field_name, path)?;

    let escapes = Path::new(path).components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(invalid(
            field_name,
            path,
            "path must stay inside the storage directory",
        ));
    }
    Ok(())
}

/// Extension match is case-insensitive; `allowed_extensions` are lowercase.
pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        let extension = Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension {
            Some(ext) if allowed.contains(ext.as_str()) => {}
            Some(ext) => {
                return Err(invalid(
                    field_name,
                    file,
                    format!(
                        "cannot read .{} documents; expected one of: {}",
                        ext,
                        allowed_extensions.join(", ")
                    ),
                ))
            }
            None => {
                return Err(invalid(
                    field_name,
                    file,
                    format!(
                        "file has no extension; expected one of: {}",
                        allowed_extensions.join(", ")
                    ),
                ))
            }
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "value cannot be empty or whitespace-only"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            &value.to_string(),
            format!("value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}
