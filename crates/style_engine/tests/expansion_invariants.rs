//! Expansion invariants over a spread of authored styles.

use style_engine::{
    DeclaredStyle, Property, PropertyName, ResolvedStyle, StyleEnv, StyleValue, Viewport, expand,
};

fn init_logging() {
    let _ignored = env_logger::builder().is_test(true).try_init();
}

fn env() -> StyleEnv {
    StyleEnv {
        root_font_size: 16.0,
        viewport: Some(Viewport {
            width_px: 800.0,
            height_px: 600.0,
        }),
    }
}

fn samples() -> Vec<DeclaredStyle> {
    vec![
        DeclaredStyle::new(),
        DeclaredStyle::new()
            .with("flex", "1")
            .with("margin", "10px auto")
            .with("padding", "2em 5%")
            .with("border", "1px solid black"),
        DeclaredStyle::new()
            .with("flexFlow", "column wrap-reverse")
            .with("gap", "4px 2vw")
            .with("inset", "0 auto auto 10%")
            .with("overflow", "hidden scroll")
            .with("aspectRatio", "16 / 9"),
        DeclaredStyle::new()
            .with("display", "grid")
            .with("gridTemplateColumns", "repeat(3, 1fr 10px)")
            .with("gridTemplateAreas", "\"a a\" \"b c\"")
            .with("gridArea", "a")
            .with("place-content", "center space-between")
            .with("place-items", "end"),
        DeclaredStyle::for_element("h2")
            .with("flex", "none")
            .with("width", "33.333%")
            .with("max-width", "none")
            .with("line-height", "150%"),
        DeclaredStyle::new()
            .with("flex", "garbage in")
            .with("margin", "1 2 3 4 5")
            .with("border-top", "thick dashed")
            .with("grid-column", "1 / span 2")
            .with("fontSize", "1.25rem")
            .with("width", f32::NAN),
    ]
}

#[test]
/// Ensures no shorthand name ever appears in a resolved style.
///
/// # Panics
/// Panics if a resolved key parses as a shorthand.
fn expansion_never_returns_shorthands() {
    init_logging();
    let parent = ResolvedStyle::initial(env());
    for declared in samples() {
        let resolved = expand(&declared, &parent);
        for (property, value) in resolved.iter() {
            assert!(matches!(
                PropertyName::parse(property.name()),
                Some(PropertyName::Longhand(_))
            ));
            if let StyleValue::Number(number) | StyleValue::Percent(number) = value {
                assert!(number.is_finite(), "{property} is not finite");
            }
        }
        assert_eq!(resolved.iter().count(), Property::ALL.len());
    }
}

#[test]
/// Ensures re-expanding a resolved style changes nothing.
///
/// # Panics
/// Panics if a second expansion differs from the first.
fn expansion_is_idempotent() {
    init_logging();
    let parent = expand(&DeclaredStyle::new().with("font-size", 12.0), &ResolvedStyle::initial(env()));
    for declared in samples() {
        let once = expand(&declared, &parent);
        let twice = expand(&DeclaredStyle::from(&once), &parent);
        assert_eq!(once, twice);
    }
}

#[test]
/// Ensures viewport units and percentages keep their meaning.
///
/// # Panics
/// Panics if the units resolve incorrectly.
fn units_resolve_against_environment() {
    init_logging();
    let resolved = expand(
        &DeclaredStyle::new()
            .with("width", "50vw")
            .with("height", "10vmin")
            .with("min-width", "25%"),
        &ResolvedStyle::initial(env()),
    );
    assert_eq!(resolved.get(Property::Width), &StyleValue::Number(400.0));
    assert_eq!(resolved.get(Property::Height), &StyleValue::Number(60.0));
    assert_eq!(resolved.get(Property::MinWidth), &StyleValue::Percent(25.0));
    assert_eq!(resolved.get(Property::MinWidth).to_string(), "25%");
}
