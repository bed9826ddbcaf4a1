//! Element presets: the lowest-priority declaration layer.
//!
//! Font sizes are relative (`em`), so they scale whatever size the element inherits.

/// Declarations for an element type; unknown types have none.
pub fn preset_declarations(element_type: &str) -> &'static [(&'static str, &'static str)] {
    match element_type.to_ascii_lowercase().as_str() {
        "h1" => &[("font-size", "2em"), ("margin", "0.67em 0")],
        "h2" => &[("font-size", "1.5em"), ("margin", "0.83em 0")],
        "h3" => &[("font-size", "1.17em"), ("margin", "1em 0")],
        "h4" => &[("font-size", "1em"), ("margin", "1.33em 0")],
        "h5" => &[("font-size", "0.83em"), ("margin", "1.67em 0")],
        "h6" => &[("font-size", "0.67em"), ("margin", "2.33em 0")],
        "p" => &[("margin", "1em 0")],
        "ul" | "ol" => &[
            ("margin", "1em 0"),
            ("padding-left", "40px"),
            ("flex-direction", "column"),
        ],
        "li" => &[("flex-direction", "row")],
        "img" => &[("flex-shrink", "0")],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_scale_fonts() {
        assert!(
            preset_declarations("H1")
                .iter()
                .any(|(name, value)| *name == "font-size" && *value == "2em")
        );
        assert!(preset_declarations("section").is_empty());
    }
}
