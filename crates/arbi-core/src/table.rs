use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use tracing::trace;

use crate::arb::{ArbAccess, ArbData};
use crate::cmd::ArbCmd;
use crate::config::TableConfig;
use crate::error::{Error, Result};
use crate::object::{HandleType, Object};

/// Opaque reference to an object owned by a [`HandleTable`]. 0 is never
/// issued.
pub type Handle = u64;

// An emptied slot (None) marks a handle deleted while another thread still
// holds the Arc.
type Slot = Arc<Mutex<Option<Object>>>;

/// Registry of host-owned objects addressed by integer handles.
///
/// Handle numbers come from a monotonically increasing counter and are never
/// reused. The map is behind an `RwLock` and every entry behind its own
/// `Mutex`, so operations on distinct handles only share the read lock.
pub struct HandleTable {
    config: TableConfig,
    next: AtomicU64,
    slots: RwLock<HashMap<Handle, Slot>>,
}

impl Default for HandleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HandleTable {
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    pub fn with_config(config: TableConfig) -> Self {
        HandleTable {
            config,
            next: AtomicU64::new(1),
            slots: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> TableConfig {
        self.config
    }

    fn next_handle(&self) -> Handle {
        loop {
            let handle = self.next.fetch_add(1, Ordering::Relaxed);
            if handle != 0 {
                return handle;
            }
        }
    }

    fn slot(&self, handle: Handle) -> Result<Slot> {
        let slots = self.slots.read().unwrap_or_else(|err| err.into_inner());
        slots
            .get(&handle)
            .cloned()
            .ok_or_else(|| Error::invalid_handle(handle))
    }

    pub fn insert(&self, object: impl Into<Object>) -> Result<Handle> {
        let object = object.into();
        let kind = object.handle_type();
        let mut slots = self.slots.write().unwrap_or_else(|err| err.into_inner());
        let max = self.config.max_live_handles;
        if max != 0 && slots.len() >= max as usize {
            return Err(Error::invalid_operation(format!(
                "handle table is full ({max} live handles)"
            )));
        }
        let handle = self.next_handle();
        slots.insert(handle, Arc::new(Mutex::new(Some(object))));
        drop(slots);
        trace!(handle, ?kind, "handle created");
        Ok(handle)
    }

    /// Type of the object behind `handle`; `Invalid` for 0, unknown and
    /// deleted handles.
    pub fn handle_type(&self, handle: Handle) -> HandleType {
        let Ok(slot) = self.slot(handle) else {
            return HandleType::Invalid;
        };
        let guard = lock_slot(&slot);
        guard
            .as_ref()
            .map_or(HandleType::Invalid, Object::handle_type)
    }

    pub fn with<R>(&self, handle: Handle, f: impl FnOnce(&Object) -> Result<R>) -> Result<R> {
        let slot = self.slot(handle)?;
        let guard = lock_slot(&slot);
        let object = guard.as_ref().ok_or_else(|| Error::invalid_handle(handle))?;
        f(object)
    }

    pub fn with_mut<R>(
        &self,
        handle: Handle,
        f: impl FnOnce(&mut Object) -> Result<R>,
    ) -> Result<R> {
        let slot = self.slot(handle)?;
        let mut guard = lock_slot(&slot);
        let object = guard.as_mut().ok_or_else(|| Error::invalid_handle(handle))?;
        f(object)
    }

    pub fn with_arb<R>(&self, handle: Handle, f: impl FnOnce(&ArbData) -> Result<R>) -> Result<R> {
        self.with(handle, |object| f(object.arb()))
    }

    pub fn with_arb_mut<R>(
        &self,
        handle: Handle,
        f: impl FnOnce(&mut ArbData) -> Result<R>,
    ) -> Result<R> {
        self.with_mut(handle, |object| f(object.arb_mut()))
    }

    pub fn with_cmd<R>(&self, handle: Handle, f: impl FnOnce(&ArbCmd) -> Result<R>) -> Result<R> {
        self.with(handle, |object| f(object.as_cmd()?))
    }

    /// Debug rendering of the object; not meant to be parsed.
    pub fn dump(&self, handle: Handle) -> Result<String> {
        self.with(handle, |object| Ok(format!("{object:#?}")))
    }

    /// Replaces the ArbData of `dst` with a copy of the ArbData of `src`.
    /// Either side may be a command; identifiers are left alone.
    pub fn assign_arb(&self, dst: Handle, src: Handle) -> Result<()> {
        let data = self.with_arb(src, |arb| Ok(arb.clone()))?;
        self.with_arb_mut(dst, |arb| {
            *arb = data;
            Ok(())
        })
    }

    /// Removes `handle` and hands its object to the caller.
    pub fn take(&self, handle: Handle) -> Result<Object> {
        let slot = {
            let mut slots = self.slots.write().unwrap_or_else(|err| err.into_inner());
            slots
                .remove(&handle)
                .ok_or_else(|| Error::invalid_handle(handle))?
        };
        let object = lock_slot(&slot)
            .take()
            .ok_or_else(|| Error::invalid_handle(handle))?;
        trace!(handle, kind = ?object.handle_type(), "handle deleted");
        Ok(object)
    }

    pub fn delete(&self, handle: Handle) -> Result<()> {
        self.take(handle).map(drop)
    }

    /// Deletes every live handle and returns how many there were.
    pub fn clear(&self) -> usize {
        let drained: Vec<Slot> = {
            let mut slots = self.slots.write().unwrap_or_else(|err| err.into_inner());
            slots.drain().map(|(_, slot)| slot).collect()
        };
        for slot in &drained {
            lock_slot(slot).take();
        }
        trace!(count = drained.len(), "all handles deleted");
        drained.len()
    }

    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(|err| err.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live handles in ascending order.
    pub fn live_handles(&self) -> Vec<Handle> {
        let mut handles: Vec<Handle> = self
            .slots
            .read()
            .unwrap_or_else(|err| err.into_inner())
            .keys()
            .copied()
            .collect();
        handles.sort_unstable();
        handles
    }

    pub fn leak_check(&self) -> Result<()> {
        let live = self.live_handles();
        if live.is_empty() {
            return Ok(());
        }
        let list = live
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(Error::invalid_operation(format!(
            "{} handle(s) still live: {list}",
            live.len()
        )))
    }
}

fn lock_slot(slot: &Mutex<Option<Object>>) -> MutexGuard<'_, Option<Object>> {
    slot.lock().unwrap_or_else(|err| err.into_inner())
}
