//! egui Gate View
//! Renders the consent modal as an `egui::Window` with a fixed-height scroll
//! area. The gate drives what is shown; `show` reports what the user did.

use crate::handles::{ApprovalView, GateView, Indicator, ScrollGeometry, ScrollPanel, ViewContent};
use eframe::egui;

/// User interaction collected during one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEvent {
    Scrolled(ScrollGeometry),
    ApprovalToggled(bool),
    ConfirmClicked,
    CloseClicked,
}

pub struct EguiGateView {
    content: Option<ViewContent>,
    visible: bool,
    page_scroll_suspended: bool,
    indicator: Indicator,
    approval: ApprovalView,
    notice: Option<String>,
    subscribed: bool,
    scroll_to_top_pending: bool,
    geometry: Option<ScrollGeometry>,
    panel_height: f32,
}

impl Default for EguiGateView {
    fn default() -> Self {
        Self::new()
    }
}

impl EguiGateView {
    pub fn new() -> Self {
        Self {
            content: None,
            visible: false,
            page_scroll_suspended: false,
            indicator: Indicator::ScrollPrompt,
            approval: ApprovalView::locked(),
            notice: None,
            subscribed: false,
            scroll_to_top_pending: false,
            geometry: None,
            panel_height: 300.0,
        }
    }

    pub fn with_panel_height(mut self, height: f32) -> Self {
        self.panel_height = height;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The host should freeze its own scroll areas while this is set.
    pub fn page_scroll_suspended(&self) -> bool {
        self.page_scroll_suspended
    }

    /// Render one frame and return the user's interactions.
    pub fn show(&mut self, ctx: &egui::Context) -> Vec<ViewEvent> {
        let mut events = Vec::new();

        if self.visible {
            self.show_modal(ctx, &mut events);
        }
        self.show_notice(ctx);

        events
    }

    fn show_modal(&mut self, ctx: &egui::Context, events: &mut Vec<ViewEvent>) {
        let Some(content) = self.content.clone() else {
            return;
        };

        let mut open = true;
        egui::Window::new(content.title.as_str())
            .collapsible(false)
            .resizable(false)
            .default_width(640.0)
            .anchor(egui::Align2::CENTER_TOP, [0.0, 50.0])
            .open(&mut open)
            .show(ctx, |ui| {
                // Blocked while a notice is up
                ui.add_enabled_ui(self.notice.is_none(), |ui| {
                    match self.indicator {
                        Indicator::ScrollPrompt => ui.colored_label(
                            egui::Color32::YELLOW,
                            format!("⚠ {}", content.scroll_prompt),
                        ),
                        Indicator::EndReached => ui.colored_label(
                            egui::Color32::GREEN,
                            format!("✓ {}", content.end_reached),
                        ),
                    };
                    ui.add_space(8.0);

                    let mut area = egui::ScrollArea::vertical()
                        .id_salt("consent_gate_terms")
                        .max_height(self.panel_height)
                        .auto_shrink([false, false]);
                    if self.scroll_to_top_pending {
                        area = area.vertical_scroll_offset(0.0);
                        self.scroll_to_top_pending = false;
                    }

                    let output = area.show(ui, |ui| {
                        ui.label(egui::RichText::new(content.snapshot.as_str()).monospace());
                    });

                    let geometry = ScrollGeometry::new(
                        output.content_size.y,
                        output.inner_rect.height(),
                        output.state.offset.y,
                    );
                    let moved = self.geometry != Some(geometry);
                    self.geometry = Some(geometry);
                    if self.subscribed && moved {
                        events.push(ViewEvent::Scrolled(geometry));
                    }

                    ui.add_space(12.0);

                    let frame = if self.approval.emphasized {
                        egui::Frame::none()
                            .fill(egui::Color32::from_rgb(28, 44, 60))
                            .inner_margin(15.0)
                            .rounding(5.0)
                    } else {
                        egui::Frame::none()
                    };
                    frame.show(ui, |ui| {
                        let mut checked = self.approval.checked;
                        let response = ui.add_enabled(
                            self.approval.enabled,
                            egui::Checkbox::new(&mut checked, content.approve_label.as_str()),
                        );
                        if response.changed() {
                            events.push(ViewEvent::ApprovalToggled(checked));
                        }

                        ui.add_space(8.0);
                        if ui.button(content.approve_button.as_str()).clicked() {
                            events.push(ViewEvent::ConfirmClicked);
                        }
                    });
                });
            });

        if !open {
            events.push(ViewEvent::CloseClicked);
        }
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.notice.clone() else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(notice);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.notice = None;
        }
    }
}

impl ScrollPanel for EguiGateView {
    fn geometry(&self) -> Option<ScrollGeometry> {
        self.geometry
    }

    fn scroll_to_top(&mut self) {
        self.scroll_to_top_pending = true;
        self.geometry = self.geometry.map(|g| g.with_offset(0.0));
    }

    fn subscribe_scroll(&mut self) {
        self.subscribed = true;
    }

    fn unsubscribe_scroll(&mut self) {
        self.subscribed = false;
    }
}

impl GateView for EguiGateView {
    fn prepare(&mut self, content: &ViewContent) {
        self.content = Some(content.clone());
        self.geometry = None;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.notice = None;
        }
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
        self.notice = Some(message.to_string());
    }
}
