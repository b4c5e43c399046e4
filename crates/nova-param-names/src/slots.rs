use nova_classfile::FieldType;

/// Local-variable slot of each formal parameter.
///
/// Instance members reserve slot 0 for the receiver; `long` and `double`
/// parameters take two consecutive slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPlan {
    slots: Vec<u16>,
    end: u16,
    is_static: bool,
}

impl SlotPlan {
    pub fn new(is_static: bool, parameter_types: &[FieldType]) -> Self {
        let mut next: u16 = if is_static { 0 } else { 1 };
        let mut slots = Vec::with_capacity(parameter_types.len());
        for ty in parameter_types {
            slots.push(next);
            next = next.saturating_add(ty.slot_width());
        }
        Self {
            slots,
            end: next,
            is_static,
        }
    }

    pub fn slots(&self) -> &[u16] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// First slot past the parameters.
    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn slot_of(&self, parameter: usize) -> Option<u16> {
        self.slots.get(parameter).copied()
    }

    /// Position of the parameter stored at `slot`, if any.
    pub fn parameter_for_slot(&self, slot: u16) -> Option<usize> {
        // Slots are strictly increasing.
        self.slots.binary_search(&slot).ok()
    }

    pub fn is_receiver_slot(&self, slot: u16) -> bool {
        !self.is_static && slot == 0
    }
}
