//! Percentages resolve against the containing box on every backend.

use std::rc::Rc;

use anyhow::Context as _;
use layouter::{
    BackendKind, Element, EngineRegistry, LayoutOptions, LayoutPass, LayoutResult, NoContent,
    Viewport,
};

async fn solve_with(root: &Element, options: LayoutOptions) -> anyhow::Result<LayoutResult> {
    let _ignored = env_logger::builder().is_test(true).try_init();
    let registry = EngineRegistry::new();
    let pass = LayoutPass::prepare_with(&registry, options).await?;
    pass.run(root, Rc::new(NoContent))
}

async fn solve(root: &Element, backend: BackendKind) -> anyhow::Result<LayoutResult> {
    solve_with(root, LayoutOptions::sized(1024.0, 768.0).with_backend(backend)).await
}

fn near(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() <= 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 37.5% child of a 480px parent is 180px wide.
    ///
    /// # Panics
    /// Panics if the percentage is not resolved against the parent width.
    #[tokio::test]
    async fn percent_width_of_definite_parent() -> anyhow::Result<()> {
        let root = Element::new("div")
            .with("width", 480.0)
            .with("height", 100.0)
            .with_child(Element::new("div").with("width", "37.5%"));
        for backend in BackendKind::ALL {
            let result = solve(&root, backend).await?;
            let child = result.get(&[0]).context("child")?.geometry;
            assert!(near(child.width, 480.0 * 0.375), "{backend}: {child:?}");
        }
        Ok(())
    }

    /// Percentages resolve against the content box, not the padded border box.
    ///
    /// # Panics
    /// Panics if padding leaks into the percentage basis.
    #[tokio::test]
    async fn percent_width_ignores_parent_padding() -> anyhow::Result<()> {
        let root = Element::new("div")
            .with("width", 420.0)
            .with("padding", "0 10px")
            .with("flex-direction", "column")
            .with_child(Element::new("div").with("width", "50%").with("height", 10.0));
        for backend in BackendKind::ALL {
            let result = solve(&root, backend).await?;
            let child = result.get(&[0]).context("child")?.geometry;
            assert!(near(child.width, 200.0) && near(child.left, 10.0), "{backend}: {child:?}");
        }
        Ok(())
    }

    /// A percentage flex-basis is a share of the container, never a pixel count.
    ///
    /// # Panics
    /// Panics if the basis is read as pixels.
    #[tokio::test]
    async fn percent_flex_basis_is_a_share() -> anyhow::Result<()> {
        let root = Element::new("div")
            .with("width", 600.0)
            .with("height", 50.0)
            .with_children([
                Element::new("div").with("flex", "0 0 25%"),
                Element::new("div").with("flex-basis", "50%").with("flex-shrink", 0.0),
            ]);
        for backend in BackendKind::ALL {
            let result = solve(&root, backend).await?;
            let first = result.get(&[0]).context("first")?.geometry;
            let second = result.get(&[1]).context("second")?.geometry;
            assert!(near(first.width, 150.0), "{backend}: {first:?}");
            assert!(near(second.left, 150.0) && near(second.width, 300.0), "{backend}: {second:?}");
        }
        Ok(())
    }

    /// Percent padding and margins use the parent width on both axes.
    ///
    /// # Panics
    /// Panics if a percentage edge is resolved against the wrong axis.
    #[tokio::test]
    async fn percent_edges_use_parent_width() -> anyhow::Result<()> {
        let root = Element::new("div")
            .with("width", 200.0)
            .with("height", 400.0)
            .with_child(
                Element::new("div")
                    .with("width", 50.0)
                    .with("height", 50.0)
                    .with("margin-top", "10%")
                    .with("padding-left", "5%"),
            );
        for backend in BackendKind::ALL {
            let result = solve(&root, backend).await?;
            let child = result.get(&[0]).context("child")?;
            assert!(near(child.geometry.top, 20.0), "{backend}: {:?}", child.geometry);
            assert!(near(child.edges.margin.top, 20.0), "{backend}: {:?}", child.edges);
            assert!(near(child.edges.padding.left, 10.0), "{backend}: {:?}", child.edges);
        }
        Ok(())
    }

    /// Viewport units follow the pass size unless a viewport is given.
    ///
    /// # Panics
    /// Panics if a viewport-relative length falls back to its initial value.
    #[tokio::test]
    async fn viewport_units_follow_the_pass_size() -> anyhow::Result<()> {
        let root = Element::new("div")
            .with("align-items", "flex-start")
            .with_child(Element::new("div").with("width", "50vw").with("height", "10vh"));
        for backend in BackendKind::ALL {
            let sized = solve(&root, backend).await?;
            let child = sized.get(&[0]).context("sized child")?.geometry;
            assert!(near(child.width, 512.0) && near(child.height, 76.8), "{backend}: {child:?}");

            let mut options = LayoutOptions::sized(1024.0, 768.0).with_backend(backend);
            options.viewport = Some(Viewport {
                width_px: 400.0,
                height_px: 300.0,
            });
            let explicit = solve_with(&root, options).await?;
            let narrow = explicit.get(&[0]).context("explicit child")?.geometry;
            assert!(near(narrow.width, 200.0) && near(narrow.height, 30.0), "{backend}: {narrow:?}");
        }
        Ok(())
    }
}
