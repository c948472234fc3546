//! Host Capability Traits
//! The gate never touches a UI toolkit directly. Everything it needs from the
//! host page (checkboxes, content regions, the modal view) goes through these.

/// A checkbox-like element owned by the host.
pub trait CheckboxHandle {
    /// False when the handle no longer points at a live element.
    fn is_attached(&self) -> bool {
        true
    }
    fn is_checked(&self) -> bool;
    fn set_checked(&mut self, checked: bool);
    fn is_disabled(&self) -> bool;
    fn set_disabled(&mut self, disabled: bool);
    /// Ask the host to scroll the element into view.
    fn bring_into_view(&mut self);
}

/// A region holding textual content (the TOS source, or a destination sink).
pub trait ContentHandle {
    fn is_attached(&self) -> bool {
        true
    }
    fn content(&self) -> String;
    fn set_content(&mut self, content: &str);
}

/// Scroll measurements of the content panel, in host layout units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollGeometry {
    /// Total scrollable extent of the content.
    pub scroll_height: f32,
    /// Visible extent of the panel.
    pub client_height: f32,
    /// Current scroll offset from the top.
    pub scroll_top: f32,
}

impl ScrollGeometry {
    pub fn new(scroll_height: f32, client_height: f32, scroll_top: f32) -> Self {
        Self {
            scroll_height,
            client_height,
            scroll_top,
        }
    }

    /// Hidden or zero-sized panels report nothing usable.
    pub fn is_measurable(&self) -> bool {
        self.scroll_height.is_finite()
            && self.client_height.is_finite()
            && self.scroll_top.is_finite()
            && self.client_height > 0.0
    }

    pub fn overflows(&self, tolerance: f32) -> bool {
        self.scroll_height > self.client_height + tolerance
    }

    pub fn distance_from_bottom(&self) -> f32 {
        self.scroll_height - self.scroll_top - self.client_height
    }

    pub fn with_offset(self, scroll_top: f32) -> Self {
        Self { scroll_top, ..self }
    }
}

/// The status banner shown above the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    ScrollPrompt,
    EndReached,
}

/// Presentation of the approval section (internal checkbox + approve button).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApprovalView {
    pub enabled: bool,
    pub checked: bool,
    pub emphasized: bool,
}

impl ApprovalView {
    pub fn locked() -> Self {
        Self::default()
    }
}

/// Everything the view needs to lay out the modal once, at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewContent {
    pub title: String,
    pub snapshot: String,
    pub approve_label: String,
    pub approve_button: String,
    pub scroll_prompt: String,
    pub end_reached: String,
}

/// Scroll access to the modal's content panel.
pub trait ScrollPanel {
    /// `None` when the host cannot report layout (e.g. not rendered yet).
    fn geometry(&self) -> Option<ScrollGeometry>;
    fn scroll_to_top(&mut self);
    /// Start delivering scroll position updates to the gate.
    fn subscribe_scroll(&mut self);
    fn unsubscribe_scroll(&mut self);
}

/// The gated modal view, as driven by the gate.
pub trait GateView: ScrollPanel {
    fn prepare(&mut self, content: &ViewContent);
    fn set_visible(&mut self, visible: bool);
    /// Suspend or restore scrolling of the page behind the modal.
    fn set_page_scroll_suspended(&mut self, suspended: bool);
    fn set_indicator(&mut self, indicator: Indicator);
    fn set_approval(&mut self, approval: ApprovalView);
    /// Show a blocking notice to the user.
    fn notify(&mut self, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_from_bottom() {
        let geometry = ScrollGeometry::new(1000.0, 300.0, 650.0);
        assert_eq!(geometry.distance_from_bottom(), 50.0);
        assert_eq!(geometry.with_offset(698.0).distance_from_bottom(), 2.0);
    }

    #[test]
    fn test_overflow_tolerance() {
        assert!(!ScrollGeometry::new(200.0, 300.0, 0.0).overflows(5.0));
        // Within the rounding buffer
        assert!(!ScrollGeometry::new(304.0, 300.0, 0.0).overflows(5.0));
        assert!(ScrollGeometry::new(306.0, 300.0, 0.0).overflows(5.0));
    }

    #[test]
    fn test_zero_sized_panel_is_not_measurable() {
        assert!(!ScrollGeometry::new(0.0, 0.0, 0.0).is_measurable());
        assert!(!ScrollGeometry::new(f32::NAN, 300.0, 0.0).is_measurable());
        assert!(ScrollGeometry::new(1000.0, 300.0, 0.0).is_measurable());
    }
}
