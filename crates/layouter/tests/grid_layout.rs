//! Grid containers: a real solve where grid is supported, flex fallback elsewhere.

use std::rc::Rc;

use anyhow::Context as _;
use layouter::{
    BackendKind, Element, EngineRegistry, LayoutOptions, LayoutPass, LayoutResult, NoContent,
};

async fn solve(root: &Element, backend: BackendKind) -> anyhow::Result<LayoutResult> {
    let _ignored = env_logger::builder().is_test(true).try_init();
    let registry = EngineRegistry::new();
    let options = LayoutOptions::sized(600.0, 400.0).with_backend(backend);
    let pass = LayoutPass::prepare_with(&registry, options).await?;
    pass.run(root, Rc::new(NoContent))
}

fn near(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() <= 1.0
}

fn cell() -> Element {
    Element::new("div").with("height", 20.0)
}

fn board(display: &str) -> Element {
    Element::new("div")
        .with("display", display)
        .with("width", 300.0)
        .with("align-content", "flex-start")
        .with("grid-template-columns", "repeat(3, 1fr)")
        .with_children([cell(), cell(), cell(), cell()])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Three equal fractional columns place the fourth cell on a second row.
    ///
    /// # Panics
    /// Panics if the cells are not placed on the grid.
    #[tokio::test]
    async fn taffy_solves_grid_tracks() -> anyhow::Result<()> {
        let result = solve(&board("grid"), BackendKind::Taffy).await?;
        assert!(result.diagnostics.is_empty());

        let second = result.get(&[1]).context("second cell")?.geometry;
        let fourth = result.get(&[3]).context("fourth cell")?.geometry;
        assert!(near(second.left, 100.0) && near(second.width, 100.0), "{second:?}");
        assert!(near(fourth.left, 0.0) && near(fourth.top, 20.0), "{fourth:?}");
        Ok(())
    }

    /// Without grid support the container lays out as flex and the pass reports
    /// the fallback once, however many grid containers there are.
    ///
    /// # Panics
    /// Panics if the geometry differs from a flex container or the warning repeats.
    #[tokio::test]
    async fn flexbox_falls_back_with_one_warning() -> anyhow::Result<()> {
        let nested = Element::new("section")
            .with_child(board("grid"))
            .with_child(board("grid"));
        let fallback = solve(&nested, BackendKind::Flexbox).await?;

        assert_eq!(fallback.diagnostics.len(), 1);
        let warning = fallback.diagnostics.first().context("diagnostic")?;
        assert_eq!(warning.backend, BackendKind::Flexbox);
        assert_eq!(warning.element, "div /0");
        assert!(warning.to_string().contains("display: grid"));

        let flex = Element::new("section")
            .with_child(board("flex"))
            .with_child(board("flex"));
        let reference = solve(&flex, BackendKind::Flexbox).await?;
        assert!(reference.diagnostics.is_empty());
        for (fell_back, direct) in fallback.nodes.iter().zip(&reference.nodes) {
            assert_eq!(fell_back.geometry, direct.geometry, "{:?}", fell_back.path);
        }
        Ok(())
    }

    /// Named areas resolve to lines; spans and explicit lines place items.
    ///
    /// # Panics
    /// Panics if an item is not in its area.
    #[tokio::test]
    async fn named_areas_and_lines_place_items() -> anyhow::Result<()> {
        let page = Element::new("div")
            .with("display", "grid")
            .with("width", 400.0)
            .with("height", 300.0)
            .with("grid-template-columns", "100px 1fr")
            .with("grid-template-rows", "50px 1fr")
            .with("grid-template-areas", "\"head head\" \"side main\"")
            .with_children([
                Element::new("header").with("grid-area", "head"),
                Element::new("main").with("gridArea", "main"),
                Element::new("aside").with("grid-row", "2").with("grid-column", "1 / span 1"),
            ]);
        let result = solve(&page, BackendKind::Taffy).await?;

        let head = result.get(&[0]).context("head")?.geometry;
        let main = result.get(&[1]).context("main")?.geometry;
        let side = result.get(&[2]).context("side")?.geometry;
        assert!(near(head.width, 400.0) && near(head.height, 50.0), "{head:?}");
        assert!(near(main.left, 100.0) && near(main.top, 50.0), "{main:?}");
        assert!(near(main.width, 300.0) && near(main.height, 250.0), "{main:?}");
        assert!(near(side.left, 0.0) && near(side.top, 50.0) && near(side.width, 100.0), "{side:?}");
        Ok(())
    }

    /// Implicit rows take `grid-auto-rows`; column flow fills down first.
    ///
    /// # Panics
    /// Panics if auto tracks or auto flow are ignored.
    #[tokio::test]
    async fn auto_tracks_and_flow() -> anyhow::Result<()> {
        let column_flow = Element::new("div")
            .with("display", "grid")
            .with("grid-template-rows", "30px 30px")
            .with("grid-auto-columns", "2em")
            .with("grid-auto-flow", "column")
            .with_children([Element::new("i"), Element::new("i"), Element::new("i")]);
        let result = solve(&column_flow, BackendKind::Taffy).await?;

        let second = result.get(&[1]).context("second")?.geometry;
        let third = result.get(&[2]).context("third")?.geometry;
        assert!(near(second.left, 0.0) && near(second.top, 30.0), "{second:?}");
        assert!(near(third.left, 32.0) && near(third.width, 32.0), "{third:?}");
        Ok(())
    }
}
