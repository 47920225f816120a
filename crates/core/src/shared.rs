use alloy::primitives::{Address, aliases::B32};
use eyre::{Result, eyre};
use log::{debug, info};
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::actions::admin_action::{AdminAction, AdminCall};
use crate::authority::{Authority, Ownable};
use crate::events::RegistryEvent;
use crate::registry::AccessRegistry;

/// Registry handle shared between tasks. Readers run concurrently; writers
/// are serialized by the lock.
pub struct SharedRegistry<A: Authority = Ownable> {
    inner: Arc<RwLock<AccessRegistry<A>>>,
}

impl<A: Authority> Clone for SharedRegistry<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: Authority> SharedRegistry<A> {
    pub fn new(registry: AccessRegistry<A>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, AccessRegistry<A>> {
        self.inner.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, AccessRegistry<A>> {
        self.inner.write().await
    }

    /// Runs `f` against a staged copy and commits it only if `f` succeeds.
    /// Pending events are moved around the copy, not cloned with it.
    pub async fn transact<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut AccessRegistry<A>) -> Result<T, E>,
    {
        let mut guard = self.inner.write().await;
        let pending = guard.take_events();
        let mut staged = guard.clone();
        match f(&mut staged) {
            Ok(out) => {
                staged.restore_events(pending);
                *guard = staged;
                Ok(out)
            }
            Err(e) => {
                guard.restore_events(pending);
                Err(e)
            }
        }
    }

    pub async fn has_access(&self, caller: Address, target: Address, selector: B32) -> bool {
        self.inner.read().await.has_access(caller, target, selector)
    }

    /// Applies every action as its sender, all or nothing. Returns the events
    /// the batch emitted and leaves the registry's event log empty.
    pub async fn apply_actions(
        &self,
        actions: &[Box<dyn AdminAction<A>>],
    ) -> Result<Vec<RegistryEvent>> {
        self.transact(|registry| {
            for (i, action) in actions.iter().enumerate() {
                debug!("applying action {}: {}", i, action.describe());
                action.apply(registry).map_err(|e| {
                    eyre!(
                        "action {} ({}) failed: {}",
                        i,
                        action.describe()["action"],
                        e
                    )
                })?;
            }
            info!("applied {} action(s)", actions.len());
            Ok(registry.take_events())
        })
        .await
    }

    pub fn into_inner(self) -> Option<AccessRegistry<A>> {
        Arc::try_unwrap(self.inner).ok().map(RwLock::into_inner)
    }
}
