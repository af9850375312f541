//! UUID-backed identifiers for catalogue records.
//!
//! Each record type gets its own newtype so a monument id can never be passed
//! where a category id is expected.

use std::fmt;

use uuid::Uuid;

/// Error returned when an identifier string is not a UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} must be a valid UUID")]
pub struct InvalidId {
    kind: &'static str,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Parse an identifier from its string form.
            pub fn new(id: impl AsRef<str>) -> Result<Self, InvalidId> {
                let raw = id.as_ref();
                if raw.trim() != raw {
                    return Err(InvalidId { kind: $kind });
                }
                Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| InvalidId { kind: $kind })
            }

            /// Generate a new random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidId;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

define_id!(
    /// Stable user identifier.
    UserId,
    "user id"
);
define_id!(
    /// Stable monument identifier.
    MonumentId,
    "monument id"
);
define_id!(
    /// Stable category identifier.
    CategoryId,
    "category id"
);
define_id!(
    /// Stable image identifier.
    ImageId,
    "image id"
);

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("1234")]
    #[case("012345678901234567890123")]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    fn rejects_non_uuid_input(#[case] raw: &str) {
        let err = MonumentId::new(raw).expect_err("non-uuid must fail");
        assert_eq!(err.to_string(), "monument id must be a valid UUID");
    }

    #[rstest]
    fn parses_and_displays_uuid() {
        let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let id = CategoryId::new(raw).expect("valid uuid");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    fn serialises_as_plain_string() {
        let id = ImageId::from_uuid(Uuid::nil());
        let json = serde_json::to_string(&id).expect("serialise id");
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
    }
}
