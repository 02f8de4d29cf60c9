//! Filling selection limit
//!
//! At most [`MAX_FILLINGS`] fillings may be checked. Once the limit is reached
//! every unchecked filling checkbox is disabled; below it, all are enabled.
//! The disabled flags are always recomputed from the checked flags and applied
//! wholesale, never patched incrementally.

use tracing::trace;

use crate::options::OptionId;

/// Maximum number of fillings per cake.
pub const MAX_FILLINGS: usize = 2;

/// One filling checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    id: OptionId,
    checked: bool,
    disabled: bool,
}

impl Checkbox {
    /// An enabled, unchecked checkbox.
    pub fn new(id: impl Into<OptionId>) -> Self {
        Self {
            id: id.into(),
            checked: false,
            disabled: false,
        }
    }

    /// Option identifier.
    pub fn id(&self) -> &OptionId {
        &self.id
    }

    /// Whether the box is checked.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Whether the box is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

/// Desired disabled flag for each checkbox, given each one's checked flag.
///
/// With [`MAX_FILLINGS`] or more checked, unchecked boxes are disabled and
/// checked ones stay enabled so they can be unchecked.
pub fn enforce_filling_limit(checked: &[bool]) -> Vec<bool> {
    let limit_reached = checked.iter().filter(|&&c| c).count() >= MAX_FILLINGS;

    checked.iter().map(|&c| limit_reached && !c).collect()
}

/// The filling checkbox group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FillingGroup {
    checkboxes: Vec<Checkbox>,
}

impl FillingGroup {
    /// A group with one unchecked box per option, in the given order.
    pub fn new<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OptionId>,
    {
        Self {
            checkboxes: ids.into_iter().map(Checkbox::new).collect(),
        }
    }

    /// Every checkbox in the group.
    pub fn checkboxes(&self) -> &[Checkbox] {
        &self.checkboxes
    }

    /// Look up a checkbox by option identifier.
    pub fn checkbox(&self, id: &str) -> Option<&Checkbox> {
        self.checkboxes.iter().find(|cb| cb.id.as_str() == id)
    }

    /// Number of checked boxes.
    pub fn checked_count(&self) -> usize {
        self.checkboxes.iter().filter(|cb| cb.checked).count()
    }

    /// Set a box's checked flag without touching disabled flags.
    ///
    /// Returns `false` if no box has that identifier.
    pub fn set_checked(&mut self, id: &str, checked: bool) -> bool {
        match self.checkboxes.iter_mut().find(|cb| cb.id.as_str() == id) {
            Some(checkbox) => {
                checkbox.checked = checked;
                true
            }
            None => false,
        }
    }

    /// Re-apply the selection limit to every checkbox.
    pub fn enforce_limit(&mut self) {
        let checked: Vec<bool> = self.checkboxes.iter().map(|cb| cb.checked).collect();
        let disabled = enforce_filling_limit(&checked);

        for (checkbox, disabled) in self.checkboxes.iter_mut().zip(disabled) {
            checkbox.disabled = disabled;
        }

        trace!(checked = self.checked_count(), "applied filling limit");
    }
}
