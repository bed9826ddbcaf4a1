//! Backend selection and memoized engine construction.
//!
//! Selection moves `Unselected -> Selecting(kind) -> Ready(engine)`. Engines are
//! built lazily, once per backend: concurrent first users wait on the same
//! in-flight construction. A pass resolves its engine once, up front, so
//! re-selecting mid-pass only affects later passes.

use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info};
use once_cell::sync::Lazy;
use tokio::sync::Mutex as AsyncMutex;
use tokio::task;

#[cfg(feature = "backend-flexbox")]
use crate::adapters::FlexboxEngine;
#[cfg(feature = "backend-taffy")]
use crate::adapters::TaffyEngine;
use crate::backend::{BackendKind, LayoutEngine};
use crate::error::LayoutError;

/// Observable selection state.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EngineState {
    Unselected,
    Selecting(BackendKind),
    Ready(BackendKind),
}

enum Selection {
    Unselected,
    Selecting(BackendKind),
    Ready(Arc<dyn LayoutEngine>),
}

type EngineSlot = AsyncMutex<Option<Arc<dyn LayoutEngine>>>;

/// Process-wide (or test-local) backend selection plus one engine per backend.
pub struct EngineRegistry {
    selection: Mutex<Selection>,
    flexbox: EngineSlot,
    taffy: EngineSlot,
    constructions: AtomicUsize,
}

static GLOBAL: Lazy<EngineRegistry> = Lazy::new(EngineRegistry::new);

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self {
            selection: Mutex::new(Selection::Unselected),
            flexbox: AsyncMutex::new(None),
            taffy: AsyncMutex::new(None),
            constructions: AtomicUsize::new(0),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    pub fn state(&self) -> EngineState {
        match &*self.lock_selection() {
            Selection::Unselected => EngineState::Unselected,
            Selection::Selecting(kind) => EngineState::Selecting(*kind),
            Selection::Ready(engine) => EngineState::Ready(engine.kind()),
        }
    }

    /// Select the backend for future passes. The engine is built on first use.
    pub fn select(&self, kind: BackendKind) {
        info!(target: "layouter::engine", "[SELECT] backend {kind}");
        *self.lock_selection() = Selection::Selecting(kind);
    }

    /// Backend the next pass without an override would use.
    pub fn selected(&self) -> BackendKind {
        match &*self.lock_selection() {
            Selection::Unselected => BackendKind::default(),
            Selection::Selecting(kind) => *kind,
            Selection::Ready(engine) => engine.kind(),
        }
    }

    /// Resolve the engine for one pass. A per-pass override wins over the
    /// registry's selection and leaves that selection untouched.
    ///
    /// # Errors
    /// [`LayoutError::BackendUnavailable`] when the backend is not compiled in.
    pub async fn acquire(
        &self,
        override_kind: Option<BackendKind>,
    ) -> Result<Arc<dyn LayoutEngine>, LayoutError> {
        if let Some(kind) = override_kind {
            debug!(target: "layouter::engine", "[ACQUIRE] per-pass override {kind}");
            return self.instance(kind).await;
        }

        let kind = {
            let mut selection = self.lock_selection();
            match &*selection {
                Selection::Ready(engine) => return Ok(Arc::clone(engine)),
                Selection::Selecting(kind) => *kind,
                Selection::Unselected => {
                    let kind = BackendKind::default();
                    *selection = Selection::Selecting(kind);
                    kind
                }
            }
        };

        let engine = self.instance(kind).await?;
        let mut selection = self.lock_selection();
        if matches!(&*selection, Selection::Selecting(selecting) if *selecting == kind) {
            *selection = Selection::Ready(Arc::clone(&engine));
        }
        Ok(engine)
    }

    /// The memoized engine for `kind`, constructing it on first use.
    ///
    /// # Errors
    /// [`LayoutError::BackendUnavailable`] when the backend is not compiled in.
    pub async fn instance(&self, kind: BackendKind) -> Result<Arc<dyn LayoutEngine>, LayoutError> {
        let mut slot = self.slot(kind).lock().await;
        if let Some(engine) = slot.as_ref() {
            return Ok(Arc::clone(engine));
        }
        let engine = construct(kind).await?;
        let count = self.constructions.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            target: "layouter::engine",
            "[INIT] constructed {kind} backend (construction #{count})"
        );
        *slot = Some(Arc::clone(&engine));
        Ok(engine)
    }

    /// Number of engine constructions since this registry was created.
    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }

    /// Drop every memoized engine and forget the selection.
    pub async fn teardown(&self) {
        *self.flexbox.lock().await = None;
        *self.taffy.lock().await = None;
        *self.lock_selection() = Selection::Unselected;
        debug!(target: "layouter::engine", "[TEARDOWN] engines released");
    }

    const fn slot(&self, kind: BackendKind) -> &EngineSlot {
        match kind {
            BackendKind::Flexbox => &self.flexbox,
            BackendKind::Taffy => &self.taffy,
        }
    }

    fn lock_selection(&self) -> MutexGuard<'_, Selection> {
        self.selection.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Build a backend engine.
async fn construct(kind: BackendKind) -> Result<Arc<dyn LayoutEngine>, LayoutError> {
    task::yield_now().await;
    match kind {
        #[cfg(feature = "backend-flexbox")]
        BackendKind::Flexbox => Ok(Arc::new(FlexboxEngine::new())),
        #[cfg(feature = "backend-taffy")]
        BackendKind::Taffy => Ok(Arc::new(TaffyEngine::new())),
        #[allow(unreachable_patterns, reason = "reached only when a backend feature is off")]
        unavailable => Err(LayoutError::BackendUnavailable {
            requested: unavailable,
            alternative: unavailable.alternative(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    /// Selection walks Unselected, Selecting and Ready, and teardown resets it.
    ///
    /// # Panics
    /// Panics if a state transition is wrong.
    async fn selection_state_machine() {
        let registry = EngineRegistry::new();
        assert_eq!(registry.state(), EngineState::Unselected);

        registry.select(BackendKind::Flexbox);
        assert_eq!(registry.state(), EngineState::Selecting(BackendKind::Flexbox));

        let engine = registry.acquire(None).await;
        assert!(engine.is_ok_and(|ready| ready.kind() == BackendKind::Flexbox));
        assert_eq!(registry.state(), EngineState::Ready(BackendKind::Flexbox));

        registry.teardown().await;
        assert_eq!(registry.state(), EngineState::Unselected);
        assert_eq!(registry.selected(), BackendKind::Taffy);
    }

    #[tokio::test]
    /// An override resolves its own backend without changing the selection.
    ///
    /// # Panics
    /// Panics if the override leaks into the registry state.
    async fn override_leaves_selection_alone() {
        let registry = EngineRegistry::new();
        registry.select(BackendKind::Taffy);

        let engine = registry.acquire(Some(BackendKind::Flexbox)).await;
        assert!(engine.is_ok_and(|ready| ready.kind() == BackendKind::Flexbox));
        assert_eq!(registry.state(), EngineState::Selecting(BackendKind::Taffy));
    }
}
