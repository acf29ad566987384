//! Store-assigned identifiers for catalogue entities.
//!
//! Each entity gets its own newtype so a module id cannot be passed where a
//! course id is expected. Values are the `BIGSERIAL` keys assigned on insert
//! and serialise as bare JSON numbers.

use serde::{Deserialize, Serialize};

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw store key.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Return the raw store key.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_entity_id! {
    /// Identifier of a [`crate::domain::Subject`].
    SubjectId
}

define_entity_id! {
    /// Identifier of a [`crate::domain::Course`].
    CourseId
}

define_entity_id! {
    /// Identifier of a [`crate::domain::CourseModule`].
    CourseModuleId
}

define_entity_id! {
    /// Identifier of a [`crate::domain::Material`].
    MaterialId
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn ids_serialise_as_bare_numbers() {
        let value = serde_json::to_value(CourseId::new(42)).expect("serialise id");
        assert_eq!(value, serde_json::json!(42));
    }

    #[rstest]
    fn ids_display_raw_value() {
        assert_eq!(MaterialId::new(7).to_string(), "7");
    }
}
