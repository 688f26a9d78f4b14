//! Reference to a business object tracked by workflows.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::foundation::ValidationError;

/// A polymorphic reference: the object's type name plus its id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackedObject {
    object_type: String,
    object_id: Uuid,
}

impl TrackedObject {
    /// Creates a reference, rejecting a blank type name.
    pub fn new(object_type: impl Into<String>, object_id: Uuid) -> Result<Self, ValidationError> {
        let object_type = object_type.into();
        if object_type.trim().is_empty() {
            return Err(ValidationError::empty_field("object_type"));
        }
        Ok(Self {
            object_type,
            object_id,
        })
    }

    /// The type name of the tracked object (e.g. "Control").
    pub fn object_type(&self) -> &str {
        &self.object_type
    }

    /// The id of the tracked object.
    pub fn object_id(&self) -> Uuid {
        self.object_id
    }
}

impl fmt::Display for TrackedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.object_type, self.object_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_type() {
        assert!(TrackedObject::new("  ", Uuid::new_v4()).is_err());
    }

    #[test]
    fn displays_type_and_id() {
        let id = Uuid::new_v4();
        let obj = TrackedObject::new("Control", id).unwrap();
        assert_eq!(obj.to_string(), format!("Control:{}", id));
    }
}
