//! Typisierte IDs der Domänen-Entitäten.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Stabile Identität eines Marchers
    MarcherId
);
entity_id!(
    /// Identität einer Page (Formations-Schnappschuss)
    PageId
);
entity_id!(
    /// Identität einer wiederverwendbaren Shape
    ShapeId
);
entity_id!(
    /// Identität einer auf einer Page instanziierten Shape
    ShapePageId
);
