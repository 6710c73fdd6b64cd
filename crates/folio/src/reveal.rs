//! Scroll-triggered section reveal
//!
//! Each section starts hidden and is shown the first time enough of it
//! enters the viewport. The transition is one-way; the watcher is released
//! as soon as it happens.

use crate::host::WatchControl;

pub const HIDDEN_CLASS: &str = "hidden-section";
pub const SHOWN_CLASS: &str = "show-section";

/// Slack for intersection ratios, which browsers round.
const RATIO_EPSILON: f64 = 0.005;

/// Whether an intersection entry shows at least `threshold` of the element.
///
/// `isIntersecting` alone is true for any overlap, so the first entry an
/// observer delivers can report a barely visible element.
pub fn meets_threshold(is_intersecting: bool, ratio: f64, threshold: f64) -> bool {
    is_intersecting && ratio + RATIO_EPSILON >= threshold
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SectionVisibility {
    #[default]
    Hidden,
    Shown,
}

impl SectionVisibility {
    /// Apply an intersection notification. Returns true on the one
    /// hidden-to-shown transition; every later notification is ignored.
    pub fn observe(&mut self, intersecting: bool) -> bool {
        if *self == SectionVisibility::Hidden && intersecting {
            *self = SectionVisibility::Shown;
            return true;
        }
        false
    }

    /// Whether the watcher for this section is still needed.
    pub fn control(&self) -> WatchControl {
        match self {
            SectionVisibility::Hidden => WatchControl::Keep,
            SectionVisibility::Shown => WatchControl::Release,
        }
    }

    pub fn is_shown(&self) -> bool {
        *self == SectionVisibility::Shown
    }
}
