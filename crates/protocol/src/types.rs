//! Primitive values used by print and navigation options.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A physical length, stored in inches (the unit `Page.printToPDF` expects).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Length(f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    pub fn inches(value: f64) -> Self {
        Self(value)
    }

    pub fn as_inches(self) -> f64 {
        self.0
    }
}

/// Named paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaperFormat {
    /// 8.5in x 11in
    #[default]
    Letter,
}

impl PaperFormat {
    /// Portrait `(width, height)`.
    pub fn dimensions(self) -> (Length, Length) {
        match self {
            PaperFormat::Letter => (Length::inches(8.5), Length::inches(11.0)),
        }
    }
}

/// Page margins.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl Margin {
    /// Same margin on all four sides.
    pub fn uniform(length: Length) -> Self {
        Self {
            top: length,
            right: length,
            bottom: length,
            left: length,
        }
    }
}

/// When a navigation is considered finished.
///
/// Each variant maps to a `Page.lifecycleEvent` name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitUntil {
    /// `load` event fired.
    Load,
    /// No connections for 500 ms.
    #[default]
    #[serde(rename = "networkidle")]
    NetworkIdle,
}

impl WaitUntil {
    /// Lifecycle event name reported by the browser for this condition.
    pub fn lifecycle_event(self) -> &'static str {
        match self {
            WaitUntil::Load => "load",
            WaitUntil::NetworkIdle => "networkIdle",
        }
    }
}

impl fmt::Display for WaitUntil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lifecycle_event())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_is_eight_and_a_half_by_eleven() {
        let (width, height) = PaperFormat::default().dimensions();
        assert_eq!(width.as_inches(), 8.5);
        assert_eq!(height.as_inches(), 11.0);
    }

    #[test]
    fn wait_until_maps_to_lifecycle_names() {
        assert_eq!(WaitUntil::default(), WaitUntil::NetworkIdle);
        assert_eq!(WaitUntil::NetworkIdle.lifecycle_event(), "networkIdle");
        assert_eq!(WaitUntil::Load.to_string(), "load");
    }

    #[test]
    fn uniform_margin_sets_every_side() {
        let margin = Margin::uniform(Length::inches(0.5));
        assert_eq!(margin.top, margin.right);
        assert_eq!(margin.bottom, margin.left);
        assert_eq!(margin.left.as_inches(), 0.5);
        assert_eq!(Margin::default().top, Length::ZERO);
    }
}
