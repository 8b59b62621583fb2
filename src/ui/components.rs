// Reusable UI components
// Trigger tab, avatar badge, agent row and panel footer

use agent_entry_core::panel::{AgentRow, Avatar, PanelFooter};
use eframe::egui;

/// Accent used by the trigger, header and avatar badges
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(102, 126, 234);
/// Accent used while the trigger is hovered
pub const ACCENT_HOVER: egui::Color32 = egui::Color32::from_rgb(118, 75, 162);

const TRIGGER_WIDTH: f32 = 28.0;
const TRIGGER_ICON: &str = "🤖";
const CHAR_HEIGHT: f32 = 15.0;
const AVATAR_SIZE: f32 = 36.0;

/// Render the vertical trigger tab docked to the right edge
///
/// The label is drawn one character per line. The response senses both
/// clicks and drags so the tab can be moved.
pub fn trigger_button(ui: &mut egui::Ui, label: &str) -> egui::Response {
    let chars: Vec<char> = label.chars().collect();
    let height = 20.0 + 26.0 + chars.len() as f32 * CHAR_HEIGHT;
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(TRIGGER_WIDTH, height),
        egui::Sense::click_and_drag(),
    );

    let fill = if response.hovered() || response.dragged() {
        ACCENT_HOVER
    } else {
        ACCENT
    };
    let rounding = egui::Rounding {
        nw: 8.0,
        sw: 8.0,
        ne: 0.0,
        se: 0.0,
    };
    let painter = ui.painter();
    painter.rect_filled(rect, rounding, fill);

    let mut y = rect.min.y + 10.0;
    painter.text(
        egui::pos2(rect.center().x, y),
        egui::Align2::CENTER_TOP,
        TRIGGER_ICON,
        egui::FontId::proportional(18.0),
        egui::Color32::WHITE,
    );
    y += 26.0;
    for c in chars {
        painter.text(
            egui::pos2(rect.center().x, y),
            egui::Align2::CENTER_TOP,
            c,
            egui::FontId::proportional(13.0),
            egui::Color32::WHITE,
        );
        y += CHAR_HEIGHT;
    }

    if response.dragged() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
    } else if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
    }

    response
}

/// Render a round avatar badge
///
/// Image avatars fall back to the title's first character since no image
/// loader is installed in this host.
pub fn avatar_badge(ui: &mut egui::Ui, avatar: &Avatar, title: &str) {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(AVATAR_SIZE, AVATAR_SIZE), egui::Sense::hover());

    let letter = match avatar {
        Avatar::Initial(letter) => letter.clone(),
        Avatar::Image(_) => title
            .chars()
            .next()
            .map(|c| c.to_string())
            .unwrap_or_else(|| agent_entry_core::panel::FALLBACK_AVATAR.to_string()),
    };

    let painter = ui.painter();
    painter.circle_filled(rect.center(), AVATAR_SIZE / 2.0, ACCENT);
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        letter,
        egui::FontId::proportional(16.0),
        egui::Color32::WHITE,
    );

    if let Avatar::Image(url) = avatar {
        response.on_hover_text(url);
    }
}

/// Render one agent row; returns true when it was clicked
pub fn agent_row(ui: &mut egui::Ui, row: &AgentRow) -> bool {
    let row_id = ui.id().with(("agent_row", row.index));

    let mut frame = egui::Frame::none();
    frame.inner_margin = egui::Margin::symmetric(12.0, 8.0);

    let row_response = frame.show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            avatar_badge(ui, &row.avatar, &row.title);
            ui.add_space(10.0);
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&row.title).size(13.0).strong());
                if let Some(description) = &row.description {
                    ui.label(egui::RichText::new(description).size(11.0).weak());
                }
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new("›").weak());
            });
        })
    });

    let row_rect = row_response.response.rect;
    let interact = ui.interact(row_rect, row_id, egui::Sense::click());

    // Outline rather than fill so the row text stays readable
    if interact.hovered() {
        let hover = ui.visuals().widgets.hovered.bg_fill;
        let hover_alpha =
            egui::Color32::from_rgba_unmultiplied(hover.r(), hover.g(), hover.b(), 100);
        ui.painter().rect_stroke(
            row_rect,
            egui::Rounding::same(4.0),
            egui::Stroke::new(1.5, hover_alpha),
        );
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }

    interact.clicked()
}

/// Render the footer; returns true when the close affordance was clicked
pub fn panel_footer(ui: &mut egui::Ui, footer: &PanelFooter) -> bool {
    let mut close_clicked = false;

    ui.horizontal(|ui| {
        ui.add_space(12.0);
        ui.hyperlink_to(
            egui::RichText::new(&footer.phone).size(11.0).color(ACCENT),
            &footer.dial_href,
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add_space(8.0);
            if ui
                .button(egui::RichText::new("✕").size(11.0))
                .on_hover_text("Hide")
                .clicked()
            {
                close_clicked = true;
            }
        });
    });

    close_clicked
}
