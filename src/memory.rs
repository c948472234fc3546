//! In-Memory Host
//! Shared, cloneable stand-ins for host elements. The host keeps one clone and
//! hands another to the gate, the way a page keeps its own element references.

use crate::handles::{
    ApprovalView, CheckboxHandle, ContentHandle, GateView, Indicator, ScrollGeometry, ScrollPanel,
    ViewContent,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckboxState {
    pub checked: bool,
    pub disabled: bool,
    pub attached: bool,
    /// Number of bring-into-view requests received.
    pub scroll_requests: usize,
}

#[derive(Debug, Clone)]
pub struct SharedCheckbox(Rc<RefCell<CheckboxState>>);

impl Default for SharedCheckbox {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedCheckbox {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(CheckboxState {
            attached: true,
            ..Default::default()
        })))
    }

    /// A handle whose element has been removed from the page.
    pub fn detached() -> Self {
        Self(Rc::new(RefCell::new(CheckboxState::default())))
    }

    pub fn snapshot(&self) -> CheckboxState {
        self.0.borrow().clone()
    }
}

impl CheckboxHandle for SharedCheckbox {
    fn is_attached(&self) -> bool {
        self.0.borrow().attached
    }

    fn is_checked(&self) -> bool {
        self.0.borrow().checked
    }

    fn set_checked(&mut self, checked: bool) {
        self.0.borrow_mut().checked = checked;
    }

    fn is_disabled(&self) -> bool {
        self.0.borrow().disabled
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.0.borrow_mut().disabled = disabled;
    }

    fn bring_into_view(&mut self) {
        self.0.borrow_mut().scroll_requests += 1;
    }
}

#[derive(Debug, Clone)]
pub struct SharedContent {
    text: Rc<RefCell<String>>,
    attached: bool,
}

impl SharedContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Rc::new(RefCell::new(text.into())),
            attached: true,
        }
    }

    pub fn empty() -> Self {
        Self::new(String::new())
    }

    pub fn detached() -> Self {
        Self {
            text: Rc::new(RefCell::new(String::new())),
            attached: false,
        }
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

impl ContentHandle for SharedContent {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn content(&self) -> String {
        self.text()
    }

    fn set_content(&mut self, content: &str) {
        *self.text.borrow_mut() = content.to_string();
    }
}

/// A view that records what the gate asked it to display.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingView {
    pub prepared: Option<ViewContent>,
    pub visible: bool,
    pub page_scroll_suspended: bool,
    pub indicator: Indicator,
    pub approval: ApprovalView,
    pub notices: Vec<String>,
    pub subscribed: bool,
    pub scroll_to_top_calls: usize,
    pub geometry: Option<ScrollGeometry>,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self::new(None)
    }
}

impl RecordingView {
    pub fn new(geometry: Option<ScrollGeometry>) -> Self {
        Self {
            prepared: None,
            visible: false,
            page_scroll_suspended: false,
            indicator: Indicator::ScrollPrompt,
            approval: ApprovalView::locked(),
            notices: Vec::new(),
            subscribed: false,
            scroll_to_top_calls: 0,
            geometry,
        }
    }

    /// Content panel of `content_height` shown in a viewport of `viewport_height`.
    pub fn with_heights(content_height: f32, viewport_height: f32) -> Self {
        Self::new(Some(ScrollGeometry::new(
            content_height,
            viewport_height,
            0.0,
        )))
    }
}

impl ScrollPanel for RecordingView {
    fn geometry(&self) -> Option<ScrollGeometry> {
        self.geometry
    }

    fn scroll_to_top(&mut self) {
        self.scroll_to_top_calls += 1;
        if let Some(geometry) = self.geometry.as_mut() {
            geometry.scroll_top = 0.0;
        }
    }

    fn subscribe_scroll(&mut self) {
        self.subscribed = true;
    }

    fn unsubscribe_scroll(&mut self) {
        self.subscribed = false;
    }
}

impl GateView for RecordingView {
    fn prepare(&mut self, content: &ViewContent) {
        self.prepared = Some(content.clone());
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_page_scroll_suspended(&mut self, suspended: bool) {
        self.page_scroll_suspended = suspended;
    }

    fn set_indicator(&mut self, indicator: Indicator) {
        self.indicator = indicator;
    }

    fn set_approval(&mut self, approval: ApprovalView) {
        self.approval = approval;
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkbox_clones_share_state() {
        let host_side = SharedCheckbox::new();
        let mut gate_side = host_side.clone();

        gate_side.set_disabled(true);
        gate_side.set_checked(true);
        gate_side.bring_into_view();

        let state = host_side.snapshot();
        assert!(state.disabled);
        assert!(state.checked);
        assert_eq!(state.scroll_requests, 1);
    }

    #[test]
    fn test_detached_handles() {
        assert!(!SharedCheckbox::detached().is_attached());
        assert!(!SharedContent::detached().is_attached());
        assert!(SharedContent::new("terms").is_attached());
    }

    #[test]
    fn test_recording_view_scroll_to_top_resets_offset() {
        let mut view = RecordingView::new(Some(ScrollGeometry::new(1000.0, 300.0, 420.0)));
        view.scroll_to_top();
        assert_eq!(view.scroll_to_top_calls, 1);
        assert_eq!(view.geometry.map(|g| g.scroll_top), Some(0.0));
    }
}
