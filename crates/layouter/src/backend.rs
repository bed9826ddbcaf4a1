//! Backend identity and the engine trait the registry hands out.

use core::fmt;
use core::str::FromStr;

use crate::tree::LayoutTree;

/// A layout backend. Names are `"flexbox"` and `"taffy"`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum BackendKind {
    /// Object-per-node flex engine; no grid.
    Flexbox,
    /// Shared-tree engine with batched style writes; flex and grid.
    #[default]
    Taffy,
}

impl BackendKind {
    pub const ALL: [Self; 2] = [Self::Flexbox, Self::Taffy];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Flexbox => "flexbox",
            Self::Taffy => "taffy",
        }
    }

    /// The other backend, offered when this one cannot be used.
    pub const fn alternative(self) -> Self {
        match self {
            Self::Flexbox => Self::Taffy,
            Self::Taffy => Self::Flexbox,
        }
    }

    /// Whether this build was compiled with the backend.
    pub const fn is_compiled(self) -> bool {
        match self {
            Self::Flexbox => cfg!(feature = "backend-flexbox"),
            Self::Taffy => cfg!(feature = "backend-taffy"),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Error for backend names that match neither backend.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("unknown layout backend `{0}`; expected `flexbox` or `taffy`")]
pub struct UnknownBackend(pub String);

impl FromStr for BackendKind {
    type Err = UnknownBackend;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let name = raw.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownBackend(name.to_owned()))
    }
}

/// A constructed backend. One instance serves every pass that selects it; each
/// pass builds its own tree.
pub trait LayoutEngine: Send + Sync {
    fn kind(&self) -> BackendKind;

    fn supports_grid(&self) -> bool;

    /// A fresh, empty tree.
    fn new_tree(&self) -> Box<dyn LayoutTree>;
}

impl fmt::Debug for dyn LayoutEngine {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LayoutEngine")
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Backend names parse back case-insensitively and reject anything else.
    ///
    /// # Panics
    /// Panics if a name does not round-trip or an unknown name parses.
    fn names_parse() {
        assert_eq!("taffy".parse::<BackendKind>(), Ok(BackendKind::Taffy));
        assert_eq!(" Flexbox ".parse::<BackendKind>(), Ok(BackendKind::Flexbox));
        assert_eq!(BackendKind::Flexbox.to_string(), "flexbox");
        assert_eq!(BackendKind::default(), BackendKind::Taffy);
        assert!(matches!("yoga".parse::<BackendKind>(), Err(_)));
        assert_eq!(BackendKind::Taffy.alternative(), BackendKind::Flexbox);
    }
}
