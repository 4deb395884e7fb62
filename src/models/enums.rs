//! Closed enumerations transmitted as plain strings.
//!
//! Each enum has a fixed set of documented values plus an `Unknown(raw)`
//! fallback so decoding never fails on a value the server added later. The
//! raw string is kept verbatim and serializes back unchanged.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Value outside the documented set, kept verbatim
            Unknown(String),
        }

        impl $name {
            /// Every documented value
            pub const KNOWN: &'static [$name] = &[$( $name::$variant ),+];

            /// Wire representation
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $value, )+
                    $name::Unknown(raw) => raw.as_str(),
                }
            }

            /// Whether this is one of the documented values
            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Unknown(_))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $( $value => $name::$variant, )+
                    other => $name::Unknown(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $( $value => $name::$variant, )+
                    _ => $name::Unknown(value),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Unknown(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok($name::from(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// Delivery medium a provider can send through
    ChannelId {
        Phone => "phone",
        Email => "email",
        Telegram => "telegram",
    }
}

string_enum! {
    /// Server-reported delivery state of one recipient.
    ///
    /// Transitions are driven by the server:
    /// `pending -> {sent, error}`, `sent -> {delivered, error}`;
    /// `delivered` and `error` are terminal.
    RecipientState {
        Pending => "pending",
        Sent => "sent",
        Delivered => "delivered",
        Error => "error",
    }
}

string_enum! {
    /// Format of the notification payload, sent in the `contentType` field
    ContentType {
        Text => "text",
        Html => "html",
        Markdown => "markdown",
    }
}

impl RecipientState {
    /// `delivered` and `error` never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, RecipientState::Delivered | RecipientState::Error)
    }

    /// Whether the server may move a recipient from `self` to `next`.
    ///
    /// Unknown states are not part of the state machine and never match.
    pub fn can_transition_to(&self, next: &RecipientState) -> bool {
        use RecipientState::*;
        matches!(
            (self, next),
            (Pending, Sent) | (Pending, Error) | (Sent, Delivered) | (Sent, Error)
        )
    }
}
