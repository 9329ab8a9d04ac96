//! Application descriptor parsing.
//!
//! A descriptor names the providers an application wants bound:
//!
//! ```json
//! { "authenticationId": "cas-prod", "authorizationId": "acl-default" }
//! ```
//!
//! Unknown fields are ignored.

use std::io::Read;

use serde_json::{Map, Value};

use super::error::DescriptorParseError;

const AUTHENTICATION_ID: &str = "authenticationId";
const AUTHORIZATION_ID: &str = "authorizationId";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Provider names declared by one application.
///
/// Both identifiers are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfiguration {
    authentication_id: String,
    authorization_id: String,
}

impl AppConfiguration {
    /// # Errors
    ///
    /// Returns `MissingField` if either identifier is blank.
    pub fn new(
        authentication_id: impl Into<String>,
        authorization_id: impl Into<String>,
    ) -> Result<Self, DescriptorParseError> {
        Ok(Self {
            authentication_id: non_blank(authentication_id.into(), AUTHENTICATION_ID)?,
            authorization_id: non_blank(authorization_id.into(), AUTHORIZATION_ID)?,
        })
    }

    #[must_use]
    pub fn authentication_id(&self) -> &str {
        &self.authentication_id
    }

    #[must_use]
    pub fn authorization_id(&self) -> &str {
        &self.authorization_id
    }
}

/// Turns raw descriptor bytes into an [`AppConfiguration`].
///
/// Implementations either return a fully valid configuration or fail; no
/// partially populated value ever escapes.
pub trait DescriptorParser: Send + Sync {
    /// # Errors
    ///
    /// Returns [`DescriptorParseError`] if the input cannot be read, is not
    /// well-formed, or lacks a required identifier.
    fn parse(&self, input: &mut dyn Read) -> Result<AppConfiguration, DescriptorParseError>;
}

/// JSON descriptor parser with a bounded read.
#[derive(Debug, Clone)]
pub struct JsonDescriptorParser {
    max_bytes: u64,
}

impl JsonDescriptorParser {
    #[must_use]
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }
}

impl DescriptorParser for JsonDescriptorParser {
    fn parse(&self, input: &mut dyn Read) -> Result<AppConfiguration, DescriptorParseError> {
        let mut buf = Vec::new();
        input
            .take(self.max_bytes.saturating_add(1))
            .read_to_end(&mut buf)?;

        if u64::try_from(buf.len()).unwrap_or(u64::MAX) > self.max_bytes {
            return Err(DescriptorParseError::TooLarge {
                limit: self.max_bytes,
            });
        }
        let body = buf.strip_prefix(UTF8_BOM).unwrap_or(&buf);
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(DescriptorParseError::Empty);
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| DescriptorParseError::malformed(e.to_string()))?;
        let Value::Object(fields) = value else {
            return Err(DescriptorParseError::malformed("expected a JSON object"));
        };

        AppConfiguration::new(
            string_field(&fields, AUTHENTICATION_ID)?,
            string_field(&fields, AUTHORIZATION_ID)?,
        )
    }
}

fn string_field(
    fields: &Map<String, Value>,
    field: &'static str,
) -> Result<String, DescriptorParseError> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(DescriptorParseError::MissingField { field }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(DescriptorParseError::malformed(format!(
            "field '{field}' must be a string"
        ))),
    }
}

fn non_blank(value: String, field: &'static str) -> Result<String, DescriptorParseError> {
    if value.trim().is_empty() {
        return Err(DescriptorParseError::MissingField { field });
    }
    Ok(value)
}
