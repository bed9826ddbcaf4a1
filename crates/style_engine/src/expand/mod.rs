//! Style expansion: declared style plus inherited style into a `ResolvedStyle`.
//!
//! Layers, lowest first: initial values, inherited properties, the element
//! preset, explicit declarations. Preset font sizes are relative, so they scale
//! the inherited size instead of replacing it.

mod longhand;
mod shorthand;

use std::collections::BTreeMap;

use css_values_units::UnitContext;
use log::{debug, trace};

use crate::declared::DeclaredStyle;
use crate::presets::preset_declarations;
use crate::property::{Property, PropertyName};
use crate::resolved::ResolvedStyle;
use crate::value::{DeclaredValue, StyleValue};
use longhand::parse_longhand;
use shorthand::{expand_shorthand, is_css_wide};

/// Expand `declared` against the parent's resolved style.
///
/// Pure and total: unknown names are ignored, invalid values become the
/// property's initial value, and no shorthand survives.
pub fn expand(declared: &DeclaredStyle, inherited: &ResolvedStyle) -> ResolvedStyle {
    let env = inherited.env();
    let mut resolved = ResolvedStyle::initial(env);
    for property in Property::ALL {
        if property.is_inherited() {
            resolved.set(property, inherited.get(property).clone());
        }
    }

    let mut winners: BTreeMap<Property, DeclaredValue> = BTreeMap::new();
    if let Some(preset) = declared.preset.as_deref() {
        for (name, value) in preset_declarations(preset) {
            collect(&mut winners, name, &DeclaredValue::from(*value));
        }
    }
    for (name, value) in &declared.declarations {
        collect(&mut winners, name, value);
    }

    let parent_font_size = inherited.font_size();
    let mut units = UnitContext {
        font_size_px: parent_font_size,
        root_font_size_px: env.root_font_size,
        viewport: env.viewport,
    };
    if let Some(raw) = winners.remove(&Property::FontSize) {
        let value = resolve_one(Property::FontSize, &raw, &units, inherited);
        resolved.set(Property::FontSize, value);
    }
    units.font_size_px = resolved.font_size();

    for (property, raw) in winners {
        let value = resolve_one(property, &raw, &units, inherited);
        resolved.set(property, value);
    }
    trace!(target: "style::expand", "expanded {declared:?} into {resolved:?}");
    resolved
}

/// Record a declaration's longhands; later calls win.
fn collect(winners: &mut BTreeMap<Property, DeclaredValue>, name: &str, value: &DeclaredValue) {
    match PropertyName::parse(name) {
        Some(PropertyName::Longhand(property)) => {
            winners.insert(property, value.clone());
        }
        Some(PropertyName::Shorthand(shorthand)) => {
            winners.extend(expand_shorthand(shorthand, value));
        }
        None => debug!(target: "style::expand", "ignoring unknown property `{name}`"),
    }
}

fn resolve_one(
    property: Property,
    raw: &DeclaredValue,
    units: &UnitContext,
    inherited: &ResolvedStyle,
) -> StyleValue {
    let initial = || property.initial_value(inherited.env().root_font_size);
    if let DeclaredValue::Text(text) = raw
        && is_css_wide(text.trim())
    {
        let keyword = text.trim().to_ascii_lowercase();
        return if keyword == "inherit" || (keyword == "unset" && property.is_inherited()) {
            inherited.get(property).clone()
        } else {
            initial()
        };
    }
    parse_longhand(property, raw, units).unwrap_or_else(|| {
        debug!(
            target: "style::expand",
            "invalid value `{raw}` for `{property}`, using the initial value"
        );
        initial()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolved::StyleEnv;
    use crate::value::Keyword;

    fn root() -> ResolvedStyle {
        ResolvedStyle::initial(StyleEnv::default())
    }

    #[test]
    fn explicit_longhand_beats_earlier_shorthand() {
        let declared = DeclaredStyle::new()
            .with("margin", "4px")
            .with("marginLeft", 10.0);
        let resolved = expand(&declared, &root());
        assert_eq!(resolved.number(Property::MarginTop), Some(4.0));
        assert_eq!(resolved.number(Property::MarginLeft), Some(10.0));
    }

    #[test]
    fn em_uses_element_font_size_and_font_size_uses_parent() {
        let parent = expand(&DeclaredStyle::new().with("fontSize", 20.0), &root());
        let declared = DeclaredStyle::new()
            .with("font-size", "2em")
            .with("padding", "1em");
        let resolved = expand(&declared, &parent);
        assert_eq!(resolved.font_size(), 40.0);
        assert_eq!(resolved.number(Property::PaddingLeft), Some(40.0));
    }

    #[test]
    fn preset_font_scales_inherited_size() {
        let parent = expand(&DeclaredStyle::new().with("font-size", 10.0), &root());
        let heading = expand(&DeclaredStyle::for_element("h1"), &parent);
        assert_eq!(heading.font_size(), 20.0);
        assert!((heading.number(Property::MarginTop).unwrap_or_default() - 13.4).abs() < 0.01);
        let overridden = expand(&DeclaredStyle::for_element("h1").with("margin", 0.0), &parent);
        assert_eq!(overridden.number(Property::MarginTop), Some(0.0));
    }

    #[test]
    fn invalid_values_fall_back_to_initial() {
        let declared = DeclaredStyle::new()
            .with("flex-direction", "diagonal")
            .with("width", "wide")
            .with("flexGrow", -1.0);
        let resolved = expand(&declared, &root());
        assert_eq!(resolved.keyword(Property::FlexDirection), Some(Keyword::Row));
        assert_eq!(resolved.keyword(Property::Width), Some(Keyword::Auto));
        assert_eq!(resolved.number(Property::FlexGrow), Some(0.0));
    }

    #[test]
    fn css_wide_keywords() {
        let parent = expand(&DeclaredStyle::new().with("line-height", 2.0), &root());
        let declared = DeclaredStyle::new()
            .with("line-height", "initial")
            .with("padding-top", "inherit");
        let resolved = expand(&declared, &parent);
        assert_eq!(resolved.number(Property::LineHeight), Some(1.2));
        assert_eq!(resolved.number(Property::PaddingTop), Some(0.0));
    }
}
