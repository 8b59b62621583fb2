// Agent entry overlay
// Draws the trigger, panel and confirmation on top of the host window and
// feeds pointer input into the controller

use crate::ui::components::{self, ACCENT};
use agent_entry_core::fetch::{FetchOutcome, FetchRequest, FetchWorker};
use agent_entry_core::panel::{PanelBody, EMPTY_TEXT, LOADING_TEXT};
use agent_entry_core::{EntryController, FetchError};
use eframe::egui;
use std::time::{Duration, Instant};

const PANEL_WIDTH: f32 = 240.0;
const PANEL_GAP: f32 = 12.0;
const LIST_MAX_HEIGHT: f32 = 280.0;
/// How often a hidden widget wakes up to notice the day rolling over
const IDLE_REPAINT: Duration = Duration::from_secs(60);

/// Floating agent entry embedded in an egui host
pub struct AgentEntryWidget {
    /// Interaction state machine
    controller: EntryController,
    /// Runs fetches off the UI thread; `None` disables remote lists
    worker: Option<FetchWorker>,
    /// Pointer was over the trigger or panel last frame
    hovered: bool,
    /// Trigger size measured last frame
    trigger_size: egui::Vec2,
}

impl AgentEntryWidget {
    /// Wrap a controller and mount it
    pub fn new(
        controller: EntryController,
        worker: Option<FetchWorker>,
        ctx: &egui::Context,
    ) -> Self {
        let mut widget = Self {
            controller,
            worker,
            hovered: false,
            trigger_size: egui::vec2(28.0, 96.0),
        };
        let request = widget.controller.initialize();
        widget.dispatch(request, ctx);
        widget
    }

    /// Draw the widget and process this frame's input
    pub fn show(&mut self, ctx: &egui::Context) {
        let now = Instant::now();

        if let Some(worker) = &self.worker {
            for outcome in worker.drain() {
                self.controller.complete_fetch(outcome);
            }
        }
        self.controller.tick(now);
        let request = self.controller.pending_fetch();
        self.dispatch(request, ctx);

        if !self.controller.is_visible() {
            self.hovered = false;
            ctx.request_repaint_after(IDLE_REPAINT);
            return;
        }

        let screen = ctx.screen_rect();
        let center_y =
            screen.min.y + self.controller.widget_center_y(screen.height(), self.trigger_size.y);
        let config = self.controller.config().clone();

        // Trigger
        let trigger_pos = egui::pos2(
            screen.max.x - self.trigger_size.x,
            center_y - self.trigger_size.y / 2.0,
        );
        let trigger = egui::Area::new(egui::Id::new("agent_entry_trigger"))
            .fixed_pos(trigger_pos)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| components::trigger_button(ui, &config.trigger_text))
            .inner;
        self.trigger_size = trigger.rect.size();
        self.handle_drag(&trigger, screen);

        // Panel
        let mut signal = None;
        let mut panel_rect = None;
        if self.controller.is_open() {
            let view = self.controller.panel_view();
            let area = egui::Area::new(egui::Id::new("agent_entry_panel"))
                .pivot(egui::Align2::RIGHT_CENTER)
                .fixed_pos(egui::pos2(
                    trigger.rect.min.x - PANEL_GAP,
                    trigger.rect.center().y,
                ))
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.set_width(PANEL_WIDTH);
                        render_header(ui, &config.header_text);

                        egui::ScrollArea::vertical()
                            .id_source("agent_entry_list")
                            .max_height(LIST_MAX_HEIGHT)
                            .show(ui, |ui| match &view.body {
                                PanelBody::Loading => render_notice(ui, LOADING_TEXT),
                                PanelBody::Empty => render_notice(ui, EMPTY_TEXT),
                                PanelBody::Rows(rows) => {
                                    for row in rows {
                                        if components::agent_row(ui, row) {
                                            signal = Some(row.select());
                                        }
                                        ui.separator();
                                    }
                                }
                            });

                        ui.add_space(4.0);
                        ui.separator();
                        if components::panel_footer(ui, &view.footer) {
                            signal = Some(view.click_close());
                        }
                        ui.add_space(4.0);
                    });
                });
            panel_rect = Some(area.response.rect);
        }

        self.track_hover(ctx, trigger.rect, panel_rect, now);

        if let Some(signal) = signal {
            self.controller.handle_panel_signal(signal);
        }

        if self.controller.visibility().show_confirm_dialog {
            self.render_confirm(ctx, &config.confirm_text);
        }

        if let Some(deadline) = self.controller.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }

    fn handle_drag(&mut self, trigger: &egui::Response, screen: egui::Rect) {
        let pointer_y = trigger.interact_pointer_pos().map(|p| p.y - screen.min.y);

        if trigger.drag_started() {
            if let Some(y) = pointer_y {
                self.controller
                    .drag_start(y, screen.height(), self.trigger_size.y);
            }
        }
        if trigger.dragged() {
            if let Some(y) = pointer_y {
                self.controller
                    .drag_move(y, screen.height(), self.trigger_size.y);
            }
        }
        if trigger.drag_stopped() {
            self.controller.drag_end();
        }
    }

    /// Translate pointer position into enter/leave transitions
    fn track_hover(
        &mut self,
        ctx: &egui::Context,
        trigger_rect: egui::Rect,
        panel_rect: Option<egui::Rect>,
        now: Instant,
    ) {
        let inside = ctx.pointer_hover_pos().map_or(false, |pos| {
            trigger_rect.contains(pos) || panel_rect.map_or(false, |rect| rect.contains(pos))
        });
        if inside == self.hovered {
            return;
        }
        self.hovered = inside;

        if inside {
            let request = self.controller.pointer_enter(now);
            self.dispatch(request, ctx);
        } else {
            self.controller.pointer_leave(now);
        }
    }

    fn render_confirm(&mut self, ctx: &egui::Context, prompt: &str) {
        let mut confirmed = false;
        let mut cancelled = false;

        egui::Window::new("agent_entry_confirm")
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label(egui::RichText::new(prompt).size(14.0));
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if ui.button("取消").clicked() {
                        cancelled = true;
                    }
                    if ui
                        .button(egui::RichText::new("确定").color(ACCENT).strong())
                        .clicked()
                    {
                        confirmed = true;
                    }
                });
            });

        if confirmed {
            self.controller.confirm_dismissal();
        } else if cancelled {
            self.controller.cancel_dismissal();
        }
    }

    fn dispatch(&mut self, request: Option<FetchRequest>, ctx: &egui::Context) {
        let Some(request) = request else {
            return;
        };

        match &self.worker {
            Some(worker) => {
                let ctx = ctx.clone();
                worker.spawn(request, move || ctx.request_repaint());
            }
            None => self.controller.complete_fetch(FetchOutcome {
                request,
                result: Err(FetchError::Aborted("no fetch worker".to_string())),
            }),
        }
    }
}

impl Drop for AgentEntryWidget {
    fn drop(&mut self) {
        self.controller.unmount();
    }
}

fn render_header(ui: &mut egui::Ui, title: &str) {
    let mut frame = egui::Frame::none();
    frame.fill = ACCENT;
    frame.rounding = egui::Rounding::same(4.0);
    frame.inner_margin = egui::Margin::symmetric(12.0, 10.0);
    frame.show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(
            egui::RichText::new(title)
                .size(14.0)
                .strong()
                .color(egui::Color32::WHITE),
        );
    });
}

fn render_notice(ui: &mut egui::Ui, text: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.label(egui::RichText::new(text).size(12.0).weak());
        ui.add_space(24.0);
    });
}
