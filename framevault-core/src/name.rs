//! Container file name codec
//!
//! The descriptor travels in the container's own file name:
//! `<base_name>-<extension>-<original_length>.<container_extension>`.
//! Parsing runs right to left, so the base name may contain dashes but the
//! extension may not.

use crate::constants::NAME_FIELD_SEPARATOR;
use crate::error::CodecError;
use crate::types::ContainerDescriptor;
use alloc::format;
use alloc::string::{String, ToString};

/// Encode a descriptor into a container file name
pub fn encode_name(descriptor: &ContainerDescriptor, container_extension: &str) -> String {
    format!(
        "{base}{sep}{ext}{sep}{len}.{container}",
        base = descriptor.base_name,
        ext = descriptor.extension,
        len = descriptor.original_length,
        container = container_extension,
        sep = NAME_FIELD_SEPARATOR,
    )
}

/// Decode a descriptor from a bare container file name
///
/// Fails with:
/// - [`CodecError::UnexpectedContainerExtension`] if the name does not end
///   with `.<expected_extension>`
/// - [`CodecError::MalformedContainerName`] if fewer than two dashes precede
///   the extension
/// - [`CodecError::MalformedSizeToken`] if the length field is not a
///   non-negative integer
pub fn decode_name(name: &str, expected_extension: &str) -> Result<ContainerDescriptor, CodecError> {
    let stem = match name.rsplit_once('.') {
        Some((stem, ext)) if ext == expected_extension => stem,
        _ => {
            return Err(CodecError::UnexpectedContainerExtension {
                name: name.to_string(),
                expected: expected_extension.to_string(),
            })
        }
    };

    let (rest, size_token) = stem
        .rsplit_once(NAME_FIELD_SEPARATOR)
        .ok_or_else(|| CodecError::MalformedContainerName(name.to_string()))?;

    let original_length = parse_size_token(size_token).ok_or_else(|| CodecError::MalformedSizeToken {
        name: name.to_string(),
        token: size_token.to_string(),
    })?;

    let (base_name, extension) = rest
        .rsplit_once(NAME_FIELD_SEPARATOR)
        .ok_or_else(|| CodecError::MalformedContainerName(name.to_string()))?;

    Ok(ContainerDescriptor::new(base_name, extension, original_length))
}

// Digits only: no sign, whitespace or trailing garbage.
fn parse_size_token(token: &str) -> Option<u64> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
