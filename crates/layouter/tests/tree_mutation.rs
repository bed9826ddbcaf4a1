//! Driving a backend tree directly through the node abstraction.

use std::sync::Arc;

use layouter::{
    BackendKind, BoxEdge, Dimension, Edge, EngineRegistry, LayoutEngine, LayoutError, Length,
};

async fn engines() -> anyhow::Result<Vec<Arc<dyn LayoutEngine>>> {
    let _ignored = env_logger::builder().is_test(true).try_init();
    let registry = EngineRegistry::new();
    let mut engines = Vec::new();
    for kind in BackendKind::ALL {
        engines.push(registry.instance(kind).await?);
    }
    Ok(engines)
}

fn near(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() <= 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A child edited after its parent was flushed still lays out with the edit.
    ///
    /// # Panics
    /// Panics if the late write is lost.
    #[tokio::test]
    async fn writes_after_flush_reach_the_solve() -> anyhow::Result<()> {
        for engine in engines().await? {
            let mut tree = engine.new_tree();
            let root = tree.create_node()?;
            let child = tree.create_node()?;
            tree.set_size(root, Dimension::Width, Length::Points(320.0))?;
            tree.set_size(root, Dimension::Height, Length::Points(100.0))?;
            tree.insert_child(root, child, 0)?;
            tree.flush()?;

            tree.set_size(child, Dimension::Width, Length::Percent(25.0))?;
            tree.set_margin(child, Edge::Left, Length::Points(8.0))?;
            tree.calculate_layout(root, None, None)?;

            let geometry = tree.geometry(child)?;
            assert!(near(geometry.width, 80.0) && near(geometry.left, 8.0), "{}: {geometry:?}", engine.kind());
            assert!(near(tree.edge(child, BoxEdge::Margin, Edge::Left)?, 8.0));
        }
        Ok(())
    }

    /// Reading geometry before a solve, or after a later write, is an error.
    ///
    /// # Panics
    /// Panics if stale geometry is handed out.
    #[tokio::test]
    async fn stale_geometry_is_refused() -> anyhow::Result<()> {
        for engine in engines().await? {
            let mut tree = engine.new_tree();
            let root = tree.create_node()?;
            assert_eq!(tree.geometry(root), Err(LayoutError::NotSolved { node: root }));

            tree.calculate_layout(root, Some(100.0), Some(50.0))?;
            assert!(tree.geometry(root).is_ok_and(|geometry| near(geometry.width, 100.0)));

            tree.set_border(root, Edge::Top, 2.0)?;
            assert!(matches!(tree.geometry(root), Err(LayoutError::NotSolved { .. })));
        }
        Ok(())
    }

    /// Edges come back on the side they were written to, on every backend.
    ///
    /// # Panics
    /// Panics if an edge is remapped to the wrong side.
    #[tokio::test]
    async fn edges_round_trip_by_side() -> anyhow::Result<()> {
        for engine in engines().await? {
            let mut tree = engine.new_tree();
            let root = tree.create_node()?;
            for (offset, edge) in Edge::ALL.into_iter().enumerate() {
                let amount = offset as f32 + 1.0;
                tree.set_padding(root, edge, Length::Points(amount))?;
                tree.set_border(root, edge, amount * 10.0)?;
            }
            tree.calculate_layout(root, Some(200.0), Some(200.0))?;

            let edges = tree.edges(root)?;
            for (offset, edge) in Edge::ALL.into_iter().enumerate() {
                let amount = offset as f32 + 1.0;
                assert!(near(edges.padding.get(edge), amount), "{}: {edge:?}", engine.kind());
                assert!(near(edges.border.get(edge), amount * 10.0), "{}: {edge:?}", engine.kind());
            }
            assert_eq!(tree.child_count(root)?, 0);
        }
        Ok(())
    }

    /// Unknown handles are rejected rather than silently ignored.
    ///
    /// # Panics
    /// Panics if a foreign handle is accepted.
    #[tokio::test]
    async fn foreign_handles_are_rejected() -> anyhow::Result<()> {
        for engine in engines().await? {
            let mut donor = engine.new_tree();
            let _first = donor.create_node()?;
            let foreign = donor.create_node()?;

            let mut tree = engine.new_tree();
            let root = tree.create_node()?;
            assert_eq!(tree.insert_child(root, foreign, 0), Err(LayoutError::UnknownNode(foreign)));
        }
        Ok(())
    }
}
