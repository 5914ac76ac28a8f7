//! Arena keys.
//!
//! The registry owns every [`Event`](crate::Event) and [`User`](crate::User)
//! in append-only arenas. Everything else (status lists, rosters, a
//! volunteer's joined cache, a manager's created list) refers to them through
//! these copyable keys instead of shared pointers.

use std::fmt;

macro_rules! arena_key {
    ($(#[$meta:meta])* $name:ident, $label:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
        pub struct $name(usize);

        impl $name {
            /// Wrap a raw arena index.
            ///
            /// Keys are meant to come from the registry that owns the arena;
            /// a hand-built key is only valid against that registry.
            pub const fn from_index(index: usize) -> Self {
                Self(index)
            }

            /// The arena index this key points at.
            pub const fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $label, self.0)
            }
        }
    };
}

arena_key!(
    /// Handle to an event in the registry arena.
    EventKey,
    "event"
);
arena_key!(
    /// Handle to a user in the registry arena.
    UserKey,
    "user"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip() {
        assert_eq!(EventKey::from_index(7).index(), 7);
        assert_eq!(UserKey::from_index(0).index(), 0);
    }

    #[test]
    fn display_has_label() {
        assert_eq!(EventKey::from_index(3).to_string(), "event#3");
        assert_eq!(UserKey::from_index(12).to_string(), "user#12");
    }

    #[test]
    fn keys_order_by_index() {
        assert!(EventKey::from_index(1) < EventKey::from_index(2));
    }
}
