//! Sizing of images and other replaced content.

use std::rc::Rc;

use anyhow::Context as _;
use layouter::{
    BackendKind, ContentRef, ContentSize, Element, EngineRegistry, LayoutError, LayoutOptions,
    LayoutPass, LayoutResult, MeasureContent, NoContent, WidthConstraint,
};

/// Knows the pixel size of one image source.
struct Decoder;

impl MeasureContent for Decoder {
    fn measure(
        &self,
        content: &ContentRef<'_>,
        _width: WidthConstraint,
        _height: Option<f32>,
    ) -> Option<ContentSize> {
        (content.element_type == "img" && content.props.text.as_deref() == Some("logo.png"))
            .then_some(ContentSize::new(120.0, 40.0))
    }
}

async fn solve(
    root: &Element,
    backend: BackendKind,
    measurer: Rc<dyn MeasureContent>,
) -> anyhow::Result<LayoutResult> {
    let _ignored = env_logger::builder().is_test(true).try_init();
    let registry = EngineRegistry::new();
    let options = LayoutOptions::sized(800.0, 600.0).with_backend(backend);
    let pass = LayoutPass::prepare_with(&registry, options).await?;
    pass.run(root, measurer)
}

fn near(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() <= 1.0
}

fn photo() -> Element {
    Element::new("img").with_natural_size(200.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Explicit sizes win; one explicit size keeps the natural ratio; none uses
    /// the natural size; attributes count as explicit.
    ///
    /// # Panics
    /// Panics if any image is sized against the rules.
    #[tokio::test]
    async fn sizing_rules() -> anyhow::Result<()> {
        let mut attributed = photo();
        attributed.props.height = Some(30.0);
        let root = Element::new("div")
            .with("align-items", "flex-start")
            .with_children([
                photo().with("width", 80.0).with("height", 80.0),
                photo().with("width", 50.0),
                photo(),
                attributed,
            ]);
        for backend in BackendKind::ALL {
            let result = solve(&root, backend, Rc::new(NoContent)).await?;
            let both = result.get(&[0]).context("both explicit")?.geometry;
            let width_only = result.get(&[1]).context("width only")?.geometry;
            let natural = result.get(&[2]).context("natural")?.geometry;
            let attribute = result.get(&[3]).context("attribute")?.geometry;

            assert!(near(both.width, 80.0) && near(both.height, 80.0), "{backend}: {both:?}");
            assert!(near(width_only.width, 50.0) && near(width_only.height, 25.0), "{backend}: {width_only:?}");
            assert!(near(natural.width, 200.0) && near(natural.height, 100.0), "{backend}: {natural:?}");
            assert!(near(attribute.width, 60.0) && near(attribute.height, 30.0), "{backend}: {attribute:?}");
        }
        Ok(())
    }

    /// Without a natural size the provider is asked for one.
    ///
    /// # Panics
    /// Panics if the measured size is not used.
    #[tokio::test]
    async fn provider_supplies_natural_size() -> anyhow::Result<()> {
        let root = Element::new("div")
            .with("align-items", "flex-start")
            .with_child(Element::text("img", "logo.png"));
        let result = solve(&root, BackendKind::Flexbox, Rc::new(Decoder)).await?;
        let logo = result.get(&[0]).context("logo")?.geometry;
        assert!(near(logo.width, 120.0) && near(logo.height, 40.0), "{logo:?}");
        Ok(())
    }

    /// An image with nothing to size it from fails the pass with its path.
    ///
    /// # Panics
    /// Panics if the pass succeeds or reports a different error.
    #[tokio::test]
    async fn unsizeable_image_is_fatal() {
        let root = Element::new("div")
            .with_child(Element::new("div").with_child(Element::text("img", "missing.png")));
        for backend in BackendKind::ALL {
            let outcome = solve(&root, backend, Rc::new(Decoder)).await;
            let error = outcome.err();
            assert!(
                matches!(
                    error.as_ref().and_then(|failure| failure.downcast_ref::<LayoutError>()),
                    Some(LayoutError::MissingIntrinsicSize { element }) if element == "img /0/0"
                ),
                "{backend}: {error:?}"
            );
        }
    }
}
