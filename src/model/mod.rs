//! API data transfer objects.
//!
//! Request and response shapes exchanged with the web frontend. Server-side domain
//! models convert into these at the controller boundary. Enumerations shared by the
//! database layer and the API are declared here with their stored string values.

/// Declares a string-backed enum stored as upper-case text in the database.
///
/// Generates serde/OpenAPI derives using the stored value as the wire name, plus
/// `as_str`, `Display` and `FromStr` so repositories can convert entity columns.
macro_rules! db_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            serde::Serialize,
            serde::Deserialize,
            utoipa::ToSchema,
        )]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Value stored in the database and sent over the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($value => Ok($name::$variant),)+
                    other => Err(format!(
                        "unknown {} value '{}'",
                        stringify!($name),
                        other
                    )),
                }
            }
        }
    };
}

pub mod api;
pub mod assistance;
pub mod complaint;
pub mod document;
pub mod event;
pub mod family;
pub mod forum;
pub mod notification;
pub mod resident;
pub mod rt;
pub mod user;
