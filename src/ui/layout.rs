// Host application layout
// The page the agent entry floats over

use crate::state::HostState;
use eframe::egui;

/// Render the host page: a short intro and the widget event log
pub fn render_host_layout(ctx: &egui::Context, host: &HostState) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical(|ui| {
            ui.add_space(12.0);
            ui.heading("Agent Entry");
            ui.add_space(8.0);
            ui.separator();
            ui.add_space(12.0);

            render_intro(ui, host);

            ui.add_space(16.0);
            ui.separator();
            ui.add_space(8.0);
            render_event_log(ui, host);
        });
    });
}

fn render_intro(ui: &mut egui::Ui, host: &HostState) {
    ui.label(
        egui::RichText::new("Hover the tab on the right edge to list agents")
            .size(14.0),
    );
    ui.add_space(4.0);
    ui.label(
        egui::RichText::new("Drag the tab to move it; ✕ hides it until tomorrow")
            .weak()
            .size(13.0),
    );

    if let Some(agent) = &host.last_selected {
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Last selected:").strong());
            ui.hyperlink_to(&agent.title, &agent.url);
        });
    }

    if host.widget_closed {
        ui.add_space(8.0);
        ui.label(
            egui::RichText::new("The agent entry is hidden for the rest of today")
                .italics()
                .weak(),
        );
    }
}

fn render_event_log(ui: &mut egui::Ui, host: &HostState) {
    ui.label(egui::RichText::new("Widget events").heading());
    ui.add_space(4.0);

    egui::ScrollArea::vertical()
        .id_source("host_event_log")
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);

            if host.log().is_empty() {
                ui.label(egui::RichText::new("No events yet").italics().weak());
            }
            for line in host.log() {
                ui.label(egui::RichText::new(line).size(12.0));
            }
        });
}
