//! Style expansion for the layout engine.
//!
//! Declarations arrive as loosely typed `(name, value)` pairs in kebab-case or
//! camelCase, with shorthands, aliases and relative units. `expand` turns them
//! into a `ResolvedStyle`: one value per canonical longhand, lengths in pixels,
//! percentages kept as percentages, keywords folded to a fixed set.

mod declared;
mod expand;
mod presets;
mod property;
mod resolved;
mod value;

pub use declared::DeclaredStyle;
pub use expand::expand;
pub use presets::preset_declarations;
pub use property::{Property, PropertyName, Shorthand};
pub use resolved::{ResolvedStyle, StyleEnv};
pub use value::{DeclaredValue, Keyword, StyleValue};

pub use css_values_units::Viewport;
