//! Domain records shared by the store, the list utilities and the HTTP layer.
//!
//! Enumerations are stored as `snake_case` text in Postgres and travel the same
//! way over JSON, so each one gets `as_str` / `FromStr` through `text_enum!`.

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(anyhow::anyhow!(
                        "unknown {} value '{}'",
                        stringify!($name),
                        other
                    )),
                }
            }
        }
    };
}

pub(crate) use text_enum;

pub mod article;
pub mod contact;
pub mod event;
pub mod reporter;
pub mod theme;
pub mod upload;

pub use article::{Article, NewArticle};
pub use contact::{ContactHistory, ContactOutcome, ContactType, NewContact};
pub use event::{
    Event, EventParticipant, EventPatch, EventStatus, EventType, ExposureStatus, NewEvent,
    NewParticipant,
};
pub use reporter::{ContactPreference, NewReporter, Reporter, ReporterPatch};
pub use theme::{NewTheme, Priority, Theme, ThemePatch};
pub use upload::FileUpload;
