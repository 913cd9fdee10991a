//! Shared domain models.

use std::fmt;

use serde::Serialize;

use crate::error::ValidationError;

/// Type assigned to resources built without an explicit type.
pub const DEFAULT_TYPE: &str = "other";
/// Status assigned to resources built without an explicit status.
pub const DEFAULT_STATUS: &str = "available";

/// A single tracked ICT asset.
///
/// Values are only obtainable through [`ResourceBuilder::build`], so `code`
/// and `name` are always non-blank. Neither can change afterwards; `type` and
/// `status` are free-form and may be reassigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    code: String,
    name: String,
    #[serde(rename = "type")]
    resource_type: String,
    status: String,
}

impl Resource {
    /// Start building a new resource.
    pub fn builder() -> ResourceBuilder {
        ResourceBuilder::new()
    }

    /// Unique identifier of the resource.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form category such as `computer` or `projector`.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Free-form availability status.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Replace the type. Not validated.
    pub fn set_resource_type(&mut self, resource_type: impl Into<String>) {
        self.resource_type = resource_type.into();
    }

    /// Replace the status. Not validated.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Independent copy carrying the same field values.
    pub fn duplicate(&self) -> Self {
        Self {
            code: self.code.clone(),
            name: self.name.clone(),
            resource_type: self.resource_type.clone(),
            status: self.status.clone(),
        }
    }

    /// Whether `other` denotes the same registry entry, i.e. has the same code.
    pub fn is_same_entry(&self, other: &Resource) -> bool {
        self.code == other.code
    }

    /// Builder pre-filled with this resource's fields.
    pub fn to_builder(&self) -> ResourceBuilder {
        ResourceBuilder {
            code: Some(self.code.clone()),
            name: Some(self.name.clone()),
            resource_type: Some(self.resource_type.clone()),
            status: Some(self.status.clone()),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Resource(code={}, name={}, type={}, status={})",
            self.code, self.name, self.resource_type, self.status
        )
    }
}

/// Fluent, validating constructor for [`Resource`].
#[derive(Debug, Clone, Default)]
pub struct ResourceBuilder {
    code: Option<String>,
    name: Option<String>,
    resource_type: Option<String>,
    status: Option<String>,
}

impl ResourceBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unique code.
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the type; stored verbatim.
    pub fn resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    /// Set the status; stored verbatim.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Validate and produce the resource.
    ///
    /// The code is checked before the name, so a builder with both blank
    /// reports [`ValidationError::BlankCode`].
    pub fn build(self) -> Result<Resource, ValidationError> {
        let code = self
            .code
            .filter(|value| !value.trim().is_empty())
            .ok_or(ValidationError::BlankCode)?;
        let name = self
            .name
            .filter(|value| !value.trim().is_empty())
            .ok_or(ValidationError::BlankName)?;

        Ok(Resource {
            code,
            name,
            resource_type: self
                .resource_type
                .unwrap_or_else(|| DEFAULT_TYPE.to_string()),
            status: self.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        })
    }
}
