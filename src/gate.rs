//! Consent Gate
//! Locks a host checkbox behind a read-and-scroll Terms of Service modal.
//!
//! The gate moves through three phases: `Closed`, `OpenLocked` (the user has
//! not reached the end of the content yet) and `OpenUnlocked`. The internal
//! approval checkbox is only usable while unlocked, so `confirm` can only
//! succeed after the user has scrolled to the bottom, or the content fit
//! without scrolling.

use crate::config::{Config, GateSettings, TextSettings, TimingSettings};
use crate::error::{ConfigurationError, ConfirmationError};
use crate::handles::{
    ApprovalView, CheckboxHandle, ContentHandle, GateView, Indicator, ScrollGeometry, ViewContent,
};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::time::Duration;

/// Inputs for building a [`ConsentGate`].
#[derive(Debug, Clone)]
pub struct GateConfig<C, S> {
    pub checkbox: Option<C>,
    pub content_source: Option<S>,
    pub destination: Option<S>,
    pub clear_source_on_init: bool,
    pub copy_content_on_approve: bool,
    pub approve_label: String,
    pub texts: TextSettings,
    pub timing: TimingSettings,
}

impl<C, S> GateConfig<C, S> {
    pub fn new(checkbox: C, content_source: S) -> Self {
        Self::from_settings(&Config::default(), Some(checkbox), Some(content_source), None)
    }

    pub fn from_settings(
        config: &Config,
        checkbox: Option<C>,
        content_source: Option<S>,
        destination: Option<S>,
    ) -> Self {
        let GateSettings {
            approve_label,
            clear_source_on_init,
            copy_content_on_approve,
        } = config.gate.clone();

        Self {
            checkbox,
            content_source,
            destination,
            clear_source_on_init,
            copy_content_on_approve,
            approve_label,
            texts: config.texts.clone(),
            timing: config.timing.clone(),
        }
    }

    pub fn with_destination(mut self, destination: S) -> Self {
        self.destination = Some(destination);
        self
    }
}

/// Per-session state. Reset on every `open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GateState {
    pub reached_end: bool,
    pub internal_approved: bool,
    pub is_open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePhase {
    Closed,
    OpenLocked,
    OpenUnlocked,
}

/// Handed out by `open`; redeemed once by `measure` after the settle delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureTicket {
    session: u64,
    settle_delay: Duration,
}

impl MeasureTicket {
    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureOutcome {
    /// Content fits the panel; approval unlocked without scrolling.
    Unlocked,
    /// Content overflows (or could not be measured); waiting for scroll-to-bottom.
    Tracking,
    /// The gate was closed or reopened since the ticket was issued.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollOutcome {
    Ignored,
    StillLocked { distance: f32 },
    ReachedEnd,
}

/// Completion notice returned by a successful `confirm`.
#[derive(Debug, Clone, PartialEq)]
pub struct Approval {
    pub approved_at: DateTime<Utc>,
    pub content_copied: bool,
    pub session: u64,
}

pub struct ConsentGate<C, S, V> {
    checkbox: C,
    destination: Option<S>,
    view: V,
    snapshot: String,
    copy_content_on_approve: bool,
    confirm_notice: String,
    timing: TimingSettings,
    state: GateState,
    session: u64,
    pending_measure: Option<u64>,
    subscribed: bool,
    page_scroll_suspended: bool,
}

impl<C, S, V> ConsentGate<C, S, V>
where
    C: CheckboxHandle,
    S: ContentHandle,
    V: GateView,
{
    pub fn new(config: GateConfig<C, S>, mut view: V) -> Result<Self, ConfigurationError> {
        let GateConfig {
            checkbox,
            content_source,
            destination,
            clear_source_on_init,
            copy_content_on_approve,
            approve_label,
            texts,
            timing,
        } = config;

        let mut checkbox = checkbox.ok_or(ConfigurationError::MissingCheckbox)?;
        if !checkbox.is_attached() {
            return Err(ConfigurationError::InvalidCheckbox);
        }

        let mut content_source = content_source.ok_or(ConfigurationError::MissingContentSource)?;
        if !content_source.is_attached() {
            return Err(ConfigurationError::InvalidContentSource);
        }

        if destination.as_ref().is_some_and(|d| !d.is_attached()) {
            return Err(ConfigurationError::InvalidDestination);
        }

        if approve_label.trim().is_empty() {
            return Err(ConfigurationError::EmptyApproveLabel);
        }

        // A NaN tolerance makes every panel "fit"; a threshold <= 0 is never reached.
        if !timing.overflow_tolerance.is_finite() || timing.overflow_tolerance < 0.0 {
            return Err(ConfigurationError::InvalidTiming {
                field: "overflow_tolerance",
            });
        }
        if !timing.bottom_threshold.is_finite() || timing.bottom_threshold <= 0.0 {
            return Err(ConfigurationError::InvalidTiming {
                field: "bottom_threshold",
            });
        }

        checkbox.set_disabled(true);

        let snapshot = content_source.content();
        if clear_source_on_init {
            content_source.set_content("");
        }

        view.prepare(&ViewContent {
            title: texts.title,
            snapshot: snapshot.clone(),
            approve_label,
            approve_button: texts.approve_button,
            scroll_prompt: texts.scroll_prompt,
            end_reached: texts.end_reached,
        });
        view.set_indicator(Indicator::ScrollPrompt);
        view.set_approval(ApprovalView::locked());
        view.set_visible(false);

        info!(
            "[Gate] Initialized ({} bytes of terms, destination: {}, cleared source: {})",
            snapshot.len(),
            destination.is_some(),
            clear_source_on_init
        );

        Ok(Self {
            checkbox,
            destination,
            view,
            snapshot,
            copy_content_on_approve,
            confirm_notice: texts.confirm_notice,
            timing,
            state: GateState::default(),
            session: 0,
            pending_measure: None,
            subscribed: false,
            page_scroll_suspended: false,
        })
    }

    /// Show the modal and start a fresh session.
    ///
    /// The content panel is not measured here. Run [`ConsentGate::measure`]
    /// with the returned ticket once the view has had `settle_delay` to lay out.
    pub fn open(&mut self) -> MeasureTicket {
        self.detach_scroll();

        self.session += 1;
        self.state = GateState {
            reached_end: false,
            internal_approved: false,
            is_open: true,
        };
        self.pending_measure = Some(self.session);

        self.view.set_indicator(Indicator::ScrollPrompt);
        self.view.set_approval(self.approval_view());
        self.view.set_visible(true);
        if !self.page_scroll_suspended {
            self.view.set_page_scroll_suspended(true);
            self.page_scroll_suspended = true;
        }

        info!("[Gate] Opened (session {})", self.session);

        MeasureTicket {
            session: self.session,
            settle_delay: self.timing.settle_delay(),
        }
    }

    /// Deferred post-open measurement.
    pub fn measure(&mut self, ticket: MeasureTicket) -> MeasureOutcome {
        if !self.state.is_open || self.pending_measure != Some(ticket.session) {
            debug!(
                "[Gate] Ignoring stale measurement (ticket {}, session {})",
                ticket.session, self.session
            );
            return MeasureOutcome::Stale;
        }
        self.pending_measure = None;

        match self.view.geometry() {
            Some(geometry)
                if geometry.is_measurable()
                    && !geometry.overflows(self.timing.overflow_tolerance) =>
            {
                debug!(
                    "[Gate] Content fits ({} <= {})",
                    geometry.scroll_height, geometry.client_height
                );
                self.unlock();
                MeasureOutcome::Unlocked
            }
            geometry => {
                if !geometry.is_some_and(|g| g.is_measurable()) {
                    warn!("[Gate] Content panel reported no usable geometry; requiring scroll");
                }
                self.view.scroll_to_top();
                self.view.subscribe_scroll();
                self.subscribed = true;
                MeasureOutcome::Tracking
            }
        }
    }

    /// Scroll position update from the content panel.
    pub fn on_scroll(&mut self, geometry: ScrollGeometry) -> ScrollOutcome {
        if !self.state.is_open || !self.subscribed || self.state.reached_end {
            return ScrollOutcome::Ignored;
        }
        if !geometry.is_measurable() {
            debug!("[Gate] Ignoring unmeasurable scroll update");
            return ScrollOutcome::Ignored;
        }

        let distance = geometry.distance_from_bottom();
        if distance < self.timing.bottom_threshold {
            self.unlock();
            ScrollOutcome::ReachedEnd
        } else {
            debug!("[Gate] {:.1} units from the bottom", distance);
            ScrollOutcome::StillLocked { distance }
        }
    }

    /// Toggle of the internal approval checkbox. Returns false while locked.
    pub fn set_internal_approved(&mut self, checked: bool) -> bool {
        if !self.internal_enabled() {
            debug!("[Gate] Approval checkbox is locked; toggle ignored");
            return false;
        }

        self.state.internal_approved = checked;
        self.checkbox.set_checked(checked);
        self.view.set_approval(self.approval_view());
        true
    }

    /// The approve action.
    pub fn confirm(&mut self) -> Result<Approval, ConfirmationError> {
        if !self.state.is_open {
            return Err(ConfirmationError::GateClosed);
        }
        if !(self.state.reached_end && self.state.internal_approved) {
            self.view.notify(&self.confirm_notice);
            return Err(ConfirmationError::NotApproved {
                notice: self.confirm_notice.clone(),
            });
        }

        self.checkbox.set_disabled(false);
        self.checkbox.set_checked(true);

        let mut content_copied = false;
        if self.copy_content_on_approve {
            if let Some(destination) = self.destination.as_mut() {
                destination.set_content(&self.snapshot);
                content_copied = true;
            }
        }

        let session = self.session;
        self.close();
        self.checkbox.bring_into_view();

        info!(
            "[Gate] Terms approved (session {}, copied: {})",
            session, content_copied
        );

        Ok(Approval {
            approved_at: Utc::now(),
            content_copied,
            session,
        })
    }

    /// Hide the modal. Leaves `GateState` as is until the next `open`.
    pub fn close(&mut self) {
        let was_open = self.state.is_open;

        self.state.is_open = false;
        self.pending_measure = None;
        self.detach_scroll();

        self.view.set_visible(false);
        if self.page_scroll_suspended {
            self.view.set_page_scroll_suspended(false);
            self.page_scroll_suspended = false;
        }

        if was_open {
            info!("[Gate] Closed (session {})", self.session);
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn phase(&self) -> GatePhase {
        match (self.state.is_open, self.state.reached_end) {
            (false, _) => GatePhase::Closed,
            (true, false) => GatePhase::OpenLocked,
            (true, true) => GatePhase::OpenUnlocked,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn reached_end(&self) -> bool {
        self.state.reached_end
    }

    pub fn internal_approved(&self) -> bool {
        self.state.internal_approved
    }

    pub fn internal_enabled(&self) -> bool {
        self.phase() == GatePhase::OpenUnlocked
    }

    pub fn is_tracking_scroll(&self) -> bool {
        self.subscribed
    }

    pub fn snapshot(&self) -> &str {
        &self.snapshot
    }

    pub fn timing(&self) -> &TimingSettings {
        &self.timing
    }

    pub fn checkbox(&self) -> &C {
        &self.checkbox
    }

    pub fn destination(&self) -> Option<&S> {
        self.destination.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn approval_view(&self) -> ApprovalView {
        ApprovalView {
            enabled: self.internal_enabled(),
            checked: self.state.internal_approved,
            emphasized: self.state.reached_end,
        }
    }

    fn unlock(&mut self) {
        self.state.reached_end = true;
        self.detach_scroll();
        self.view.set_indicator(Indicator::EndReached);
        self.view.set_approval(self.approval_view());
        info!("[Gate] Reached end of terms (session {})", self.session);
    }

    fn detach_scroll(&mut self) {
        if self.subscribed {
            self.view.unsubscribe_scroll();
            self.subscribed = false;
        }
    }
}
