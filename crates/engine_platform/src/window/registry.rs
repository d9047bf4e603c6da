// crates/engine_platform/src/window/registry.rs

use super::{Rect, WindowStyle};
use crate::message::NativeWindowId;
use engine_shared::WindowHandle;

const GROWTH_STEP: usize = 4;

/// Style and outer rect saved when a window enters fullscreen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedPlacement {
    pub style: WindowStyle,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub native: NativeWindowId,
    /// Style the window was created with.
    pub style: WindowStyle,
    pub saved: Option<SavedPlacement>,
    pub fullscreen: bool,
}

impl WindowRecord {
    pub fn new(native: NativeWindowId, style: WindowStyle) -> Self {
        Self {
            native,
            style,
            saved: None,
            fullscreen: false,
        }
    }
}

/// Handle-indexed table of created windows. Slot 0 is a placeholder so a
/// handle's value is its index.
#[derive(Debug, Clone)]
pub struct WindowRegistry {
    records: Vec<Option<WindowRecord>>,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowRegistry {
    pub fn new() -> Self {
        let mut records = Vec::with_capacity(GROWTH_STEP);
        records.push(None);
        Self { records }
    }

    /// Stores a record and returns its handle. Handles are never reused.
    /// `None` only once the 32-bit handle space is exhausted.
    pub fn insert(&mut self, record: WindowRecord) -> Option<WindowHandle> {
        if self.records.len() == self.records.capacity() {
            self.records.reserve_exact(GROWTH_STEP);
        }
        let handle = u32::try_from(self.records.len())
            .ok()
            .and_then(WindowHandle::new)?;
        self.records.push(Some(record));
        Some(handle)
    }

    pub fn get(&self, handle: WindowHandle) -> Option<&WindowRecord> {
        self.records.get(handle.index())?.as_ref()
    }

    pub fn get_mut(&mut self, handle: WindowHandle) -> Option<&mut WindowRecord> {
        self.records.get_mut(handle.index())?.as_mut()
    }

    /// Reverse lookup from the backend's window id.
    pub fn handle_for(&self, native: NativeWindowId) -> Option<WindowHandle> {
        self.iter()
            .find(|(_, record)| record.native == native)
            .map(|(handle, _)| handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (WindowHandle, &WindowRecord)> {
        self.records.iter().enumerate().filter_map(|(i, slot)| {
            let record = slot.as_ref()?;
            Some((WindowHandle::new(i as u32)?, record))
        })
    }

    /// Number of live windows (the placeholder is not counted).
    pub fn len(&self) -> usize {
        self.records.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
