use consent_gate::config::Config;
use consent_gate::egui_view::{EguiGateView, ViewEvent};
use consent_gate::memory::{SharedCheckbox, SharedContent};
use consent_gate::settle::PendingMeasurement;
use consent_gate::tos_text::SAMPLE_TERMS;
use consent_gate::{logger, CheckboxHandle, ConsentGate, GateConfig};
use eframe::egui;
use std::time::Instant;

type DemoGate = ConsentGate<SharedCheckbox, SharedContent, EguiGateView>;

struct SignupForm {
    gate: DemoGate,
    checkbox: SharedCheckbox,
    accepted_terms: SharedContent,
    pending: Option<PendingMeasurement>,
    link_text: String,
    email: String,
    seen_scroll_requests: usize,
    status: Option<String>,
}

impl SignupForm {
    fn open_terms(&mut self, ctx: &egui::Context) {
        let ticket = self.gate.open();
        self.pending = Some(PendingMeasurement::new(ticket, Instant::now()));
        ctx.request_repaint_after(ticket.settle_delay());
    }

    fn poll_measurement(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if let Some(ticket) = PendingMeasurement::take_due(&mut self.pending, now) {
            self.gate.measure(ticket);
        } else if let Some(pending) = &self.pending {
            ctx.request_repaint_after(pending.remaining(now));
        }
    }

    fn dispatch(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::Scrolled(geometry) => {
                self.gate.on_scroll(geometry);
            }
            ViewEvent::ApprovalToggled(checked) => {
                self.gate.set_internal_approved(checked);
            }
            ViewEvent::ConfirmClicked => match self.gate.confirm() {
                Ok(approval) => {
                    self.status = Some(format!(
                        "Terms accepted at {}",
                        approval.approved_at.format("%Y-%m-%d %H:%M:%S UTC")
                    ));
                }
                Err(e) => log::warn!("[Demo] Approval rejected: {}", e),
            },
            ViewEvent::CloseClicked => self.gate.close(),
        }
    }
}

impl eframe::App for SignupForm {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_measurement(ctx);

        let page_locked = self.gate.view().page_scroll_suspended();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Create your account");
            ui.add_space(8.0);
            ui.separator();

            egui::ScrollArea::vertical()
                .enable_scrolling(!page_locked)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Email:");
                        ui.text_edit_singleline(&mut self.email);
                    });
                    ui.add_space(12.0);

                    ui.horizontal(|ui| {
                        let state = self.checkbox.snapshot();
                        let mut checked = state.checked;
                        let response = ui.add_enabled(
                            !state.disabled,
                            egui::Checkbox::new(&mut checked, "I accept the Terms of Service"),
                        );
                        if response.changed() {
                            self.checkbox.set_checked(checked);
                        }
                        if state.scroll_requests > self.seen_scroll_requests {
                            self.seen_scroll_requests = state.scroll_requests;
                            response.scroll_to_me(Some(egui::Align::TOP));
                        }

                        if ui.link(self.link_text.as_str()).clicked() {
                            self.open_terms(ctx);
                        }
                    });

                    let accepted = self.accepted_terms.text();
                    if !accepted.is_empty() {
                        ui.add_space(8.0);
                        ui.collapsing("Accepted terms", |ui| {
                            ui.label(egui::RichText::new(accepted).monospace().small());
                        });
                    }

                    ui.add_space(12.0);
                    let can_submit = self.checkbox.is_checked() && !self.checkbox.is_disabled();
                    if ui
                        .add_enabled(can_submit, egui::Button::new("Sign up"))
                        .clicked()
                    {
                        log::info!("[Demo] Sign-up submitted for {}", self.email);
                        self.status = Some(format!("Signed up as {}", self.email));
                    }

                    if let Some(status) = &self.status {
                        ui.add_space(8.0);
                        ui.colored_label(egui::Color32::GREEN, status.as_str());
                    }
                });
        });

        let events = self.gate.view_mut().show(ctx);
        for event in events {
            self.dispatch(event);
        }
    }
}

fn main() -> anyhow::Result<()> {
    println!("[*] Loading Consent Gate demo...");
    let config = Config::try_load().unwrap_or_default();

    if let Err(e) = logger::init(&config.logging) {
        eprintln!("[!] Failed to initialize logger: {}", e);
    }

    let checkbox = SharedCheckbox::new();
    let accepted_terms = SharedContent::empty();
    let gate_config = GateConfig::from_settings(
        &config,
        Some(checkbox.clone()),
        Some(SharedContent::new(SAMPLE_TERMS)),
        Some(accepted_terms.clone()),
    );
    let gate = ConsentGate::new(gate_config, EguiGateView::new())?;

    let app = SignupForm {
        gate,
        checkbox,
        accepted_terms,
        pending: None,
        link_text: config.texts.link_text.clone(),
        email: String::new(),
        seen_scroll_requests: 0,
        status: None,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([480.0, 480.0])
            .with_title("Consent Gate Demo"),
        ..Default::default()
    };

    eframe::run_native(
        "Consent Gate Demo",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run demo window: {}", e))?;

    Ok(())
}
