#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(ModelError::EmptyId);
                }
                Ok(Self(trimmed.to_string()))
            }

            /// A fresh random identifier.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().simple().to_string())
            }

            pub(crate) fn from_trusted(value: &str) -> Self {
                Self(value.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier assigned to a sequence when it is parsed. Never changes afterwards.
    SequenceId
);
string_id!(CategoryId);
string_id!(TagId);
string_id!(
    /// Identifier of a review stack inside a session.
    StackId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_trimmed() {
        let id = TagId::new("  weird ").unwrap();
        assert_eq!(id.as_str(), "weird");
    }

    #[test]
    fn empty_ids_are_rejected() {
        assert!(matches!(CategoryId::new("   "), Err(ModelError::EmptyId)));
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(SequenceId::generate(), SequenceId::generate());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = StackId::new("main").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"main\"");
    }
}
