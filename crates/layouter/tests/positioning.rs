//! Out-of-flow and offset boxes, hidden subtrees and document coordinates.

use std::rc::Rc;

use anyhow::Context as _;
use layouter::{
    BackendKind, Element, EngineRegistry, Geometry, LayoutOptions, LayoutPass, LayoutResult,
    NoContent,
};

async fn solve(root: &Element, backend: BackendKind) -> anyhow::Result<LayoutResult> {
    let _ignored = env_logger::builder().is_test(true).try_init();
    let registry = EngineRegistry::new();
    let options = LayoutOptions::sized(800.0, 600.0).with_backend(backend);
    let pass = LayoutPass::prepare_with(&registry, options).await?;
    pass.run(root, Rc::new(NoContent))
}

fn at(geometry: Geometry, left: f32, top: f32, width: f32, height: f32) -> bool {
    [
        (geometry.left, left),
        (geometry.top, top),
        (geometry.width, width),
        (geometry.height, height),
    ]
    .iter()
    .all(|(actual, expected)| (actual - expected).abs() <= 1.0)
}

fn square(size: f32) -> Element {
    Element::new("div").with("width", size).with("height", size)
}

fn stage() -> Element {
    Element::new("div")
        .with("width", 300.0)
        .with("height", 200.0)
        .with("padding", "10px")
        .with("position", "relative")
        .with("align-items", "flex-start")
        .with_children([
            square(50.0),
            square(40.0)
                .with("position", "absolute")
                .with("top", 20.0)
                .with("left", 30.0)
                .with_child(square(10.0)),
            square(20.0)
                .with("position", "absolute")
                .with("inset", "auto 10px 10px auto"),
            square(50.0).with("position", "relative").with("top", 5.0).with("left", 5.0),
            square(50.0).with("top", 100.0),
            square(50.0).with("display", "none").with_child(square(10.0)),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Absolute boxes leave the flow and sit against the padding box; relative
    /// boxes shift from their flow position; static boxes ignore insets.
    ///
    /// # Panics
    /// Panics if any box is misplaced.
    #[tokio::test]
    async fn positioned_boxes() -> anyhow::Result<()> {
        for backend in BackendKind::ALL {
            let result = solve(&stage(), backend).await?;
            let boxes: Vec<Geometry> = (0..6)
                .map(|index| result.get(&[index]).map(|node| node.geometry))
                .collect::<Option<_>>()
                .context("stage children")?;

            assert!(at(boxes[0], 10.0, 10.0, 50.0, 50.0), "{backend}: {:?}", boxes[0]);
            assert!(at(boxes[1], 30.0, 20.0, 40.0, 40.0), "{backend}: {:?}", boxes[1]);
            assert!(at(boxes[2], 270.0, 170.0, 20.0, 20.0), "{backend}: {:?}", boxes[2]);
            assert!(at(boxes[3], 65.0, 15.0, 50.0, 50.0), "{backend}: {:?}", boxes[3]);
            assert!(at(boxes[4], 110.0, 10.0, 50.0, 50.0), "{backend}: {:?}", boxes[4]);
        }
        Ok(())
    }

    /// `display: none` collapses the whole subtree to nothing.
    ///
    /// # Panics
    /// Panics if the hidden box or its child keeps a size.
    #[tokio::test]
    async fn hidden_subtree_has_no_size() -> anyhow::Result<()> {
        for backend in BackendKind::ALL {
            let result = solve(&stage(), backend).await?;
            for path in [&[5][..], &[5, 0][..]] {
                let hidden = result.get(path).context("hidden box")?.geometry;
                assert!(hidden.width.abs() < f32::EPSILON && hidden.height.abs() < f32::EPSILON);
            }
        }
        Ok(())
    }

    /// Reported positions are in document coordinates, not parent-relative.
    ///
    /// # Panics
    /// Panics if a nested box is not offset by its ancestors.
    #[tokio::test]
    async fn nested_positions_accumulate() -> anyhow::Result<()> {
        let page = Element::new("div")
            .with("padding", "7px")
            .with_child(Element::new("div").with("margin", "3px").with_child(square(5.0)));
        for backend in BackendKind::ALL {
            let result = solve(&page, backend).await?;
            let inner = result.get(&[0, 0]).context("inner")?.geometry;
            assert!(at(inner, 10.0, 10.0, 5.0, 5.0), "{backend}: {inner:?}");

            let pinned = solve(&stage(), backend).await?;
            let dot = pinned.get(&[1, 0]).context("pinned dot")?.geometry;
            assert!(at(dot, 30.0, 20.0, 10.0, 10.0), "{backend}: {dot:?}");
        }
        Ok(())
    }
}
