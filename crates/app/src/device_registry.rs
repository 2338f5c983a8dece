//! Device registry: named outputs and their last driven status.
//!
//! Each device pairs an [`OutputPin`] with its status behind a per-device
//! mutex. The pin write and the status update happen under the same lock, so
//! a concurrent reader never sees a status that disagrees with the pin.

use std::sync::{Mutex, MutexGuard, PoisonError};

use coopctl_domain::device::{Device, DeviceName, DeviceStatus};
use coopctl_domain::error::{CoopError, NotFoundError, ValidationError};

use crate::ports::OutputPin;

struct Slot<O> {
    name: DeviceName,
    output: O,
    status: Mutex<DeviceStatus>,
}

impl<O: OutputPin> Slot<O> {
    fn lock(&self) -> MutexGuard<'_, DeviceStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write the pin, then record the status. Caller holds the guard.
    fn drive(
        &self,
        guard: &mut MutexGuard<'_, DeviceStatus>,
        status: DeviceStatus,
    ) -> Result<(), CoopError> {
        self.output.write(status.level())?;
        **guard = status;
        tracing::debug!(device = %self.name, %status, "output driven");
        Ok(())
    }
}

/// Fixed set of controllable outputs, in binding order.
pub struct DeviceRegistry<O> {
    slots: Vec<Slot<O>>,
}

impl<O: OutputPin> DeviceRegistry<O> {
    /// Bind every device to its output and drive all outputs low.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateDevice`] when a name is bound twice,
    /// or [`CoopError::Output`] when an output cannot be initialised.
    pub fn new(bindings: impl IntoIterator<Item = (DeviceName, O)>) -> Result<Self, CoopError> {
        let mut slots: Vec<Slot<O>> = Vec::new();
        for (name, output) in bindings {
            if slots.iter().any(|slot| slot.name == name) {
                return Err(ValidationError::DuplicateDevice(name.to_string()).into());
            }
            output.write(DeviceStatus::Off.level())?;
            slots.push(Slot {
                name,
                output,
                status: Mutex::new(DeviceStatus::Off),
            });
        }
        Ok(Self { slots })
    }

    fn slot(&self, name: &str) -> Option<&Slot<O>> {
        self.slots.iter().find(|slot| slot.name.as_str() == name)
    }

    /// Snapshot of every device, in binding order.
    #[must_use]
    pub fn list(&self) -> Vec<Device> {
        self.slots
            .iter()
            .map(|slot| Device {
                name: slot.name.clone(),
                status: *slot.lock(),
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.slot(name).is_some()
    }

    /// Current status of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CoopError::NotFound`] for an unknown device.
    pub fn status(&self, name: &str) -> Result<DeviceStatus, CoopError> {
        self.slot(name)
            .map(|slot| *slot.lock())
            .ok_or_else(|| not_found(name))
    }

    /// Command `name` to `action` (`"on"` or `"off"`) and return the new status.
    ///
    /// Exactly one output write happens on success, even when the device is
    /// already in the requested state.
    ///
    /// # Errors
    ///
    /// Returns [`CoopError::Validation`] for an unknown device or an action
    /// other than `on`/`off` (no write occurs), or [`CoopError::Output`] when
    /// the pin rejects the write (status is left unchanged).
    #[tracing::instrument(skip(self))]
    pub fn set_status(&self, name: &str, action: &str) -> Result<DeviceStatus, CoopError> {
        let slot = self
            .slot(name)
            .ok_or_else(|| ValidationError::UnknownDevice(name.to_string()))?;
        let status: DeviceStatus = action.parse()?;

        let mut guard = slot.lock();
        slot.drive(&mut guard, status)?;
        Ok(status)
    }

    /// Atomically read the status of `name`, let `decide` pick a new one and
    /// drive it. Returns the status after the update.
    ///
    /// No write happens when `decide` returns `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CoopError::NotFound`] for an unknown device or
    /// [`CoopError::Output`] when the write fails.
    pub fn update_with(
        &self,
        name: &str,
        decide: impl FnOnce(DeviceStatus) -> Option<DeviceStatus>,
    ) -> Result<DeviceStatus, CoopError> {
        let slot = self.slot(name).ok_or_else(|| not_found(name))?;
        let mut guard = slot.lock();
        if let Some(next) = decide(*guard) {
            slot.drive(&mut guard, next)?;
        }
        Ok(*guard)
    }
}

fn not_found(name: &str) -> CoopError {
    NotFoundError {
        kind: "Device",
        name: name.to_string(),
    }
    .into()
}
