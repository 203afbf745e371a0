//! Lazily loaded parsing capabilities
//!
//! Each parser backend is acquired on first use and shared for the rest of
//! the process. Concurrent first callers wait on the same in-flight load.

use crate::error::Result;
use async_trait::async_trait;
use log::{debug, info};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityState {
    Uninitialized,
    Loading,
    Ready,
}

/// Acquires a parser backend. Called at most once per successful load.
#[async_trait]
pub trait CapabilityLoader<T: ?Sized + Send + Sync>: Send + Sync {
    async fn load(&self) -> Result<Arc<T>>;
}

pub struct LazyCapability<T: ?Sized + Send + Sync> {
    name: &'static str,
    loader: Box<dyn CapabilityLoader<T>>,
    cell: OnceCell<Arc<T>>,
    state: Mutex<CapabilityState>,
    loads: AtomicUsize,
}

impl<T: ?Sized + Send + Sync> LazyCapability<T> {
    pub fn new(name: &'static str, loader: Box<dyn CapabilityLoader<T>>) -> Self {
        Self {
            name,
            loader,
            cell: OnceCell::new(),
            state: Mutex::new(CapabilityState::Uninitialized),
            loads: AtomicUsize::new(0),
        }
    }

    /// Returns the loaded capability, loading it first if needed.
    /// A failed load leaves the capability uninitialized so a later call retries.
    pub async fn get(&self) -> Result<Arc<T>> {
        if let Some(capability) = self.cell.get() {
            return Ok(Arc::clone(capability));
        }

        let capability = self
            .cell
            .get_or_try_init(|| async {
                self.set_state(CapabilityState::Loading);
                self.loads.fetch_add(1, Ordering::SeqCst);
                info!("Loading {} parsing capability", self.name);

                match self.loader.load().await {
                    Ok(capability) => {
                        self.set_state(CapabilityState::Ready);
                        debug!("{} parsing capability ready", self.name);
                        Ok(capability)
                    }
                    Err(e) => {
                        self.set_state(CapabilityState::Uninitialized);
                        Err(e)
                    }
                }
            })
            .await?;

        Ok(Arc::clone(capability))
    }

    pub fn state(&self) -> CapabilityState {
        match self.state.lock() {
            Ok(state) => *state,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Number of load attempts made so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn set_state(&self, next: CapabilityState) {
        match self.state.lock() {
            Ok(mut state) => *state = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }
}
