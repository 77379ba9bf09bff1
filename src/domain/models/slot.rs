#[cfg(test)]
#[path = "slot_test.rs"]
mod tests;

/// Lifecycle of one request/response slot. `Succeeded` and `Failed` are not
/// terminal, a new trigger moves either back to `Loading`.
#[derive(Clone, Debug, PartialEq)]
pub enum SlotState<T> {
    Idle,
    Loading,
    Succeeded(T),
    Failed(String),
}

/// Independently tracked request state. At most one request is in flight
/// per slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot<T> {
    state: SlotState<T>,
}

impl<T> Default for Slot<T> {
    fn default() -> Slot<T> {
        return Slot {
            state: SlotState::Idle,
        };
    }
}

impl<T> Slot<T> {
    pub fn state(&self) -> &SlotState<T> {
        return &self.state;
    }

    pub fn is_loading(&self) -> bool {
        return matches!(self.state, SlotState::Loading);
    }

    pub fn result(&self) -> Option<&T> {
        if let SlotState::Succeeded(value) = &self.state {
            return Some(value);
        }

        return None;
    }

    /// Moves the slot to `Loading`. Blank input, or a request already in
    /// flight, leaves the state untouched and returns false.
    pub fn trigger(&mut self, input: &str) -> bool {
        if input.trim().is_empty() || self.is_loading() {
            return false;
        }

        self.state = SlotState::Loading;
        return true;
    }

    pub fn succeed(&mut self, value: T) {
        if !self.is_loading() {
            tracing::warn!("ignoring result for a slot that is not loading");
            return;
        }

        self.state = SlotState::Succeeded(value);
    }

    pub fn fail(&mut self, message: &str) {
        if !self.is_loading() {
            tracing::warn!("ignoring failure for a slot that is not loading");
            return;
        }

        self.state = SlotState::Failed(message.to_string());
    }

    pub fn reset(&mut self) {
        self.state = SlotState::Idle;
    }
}
