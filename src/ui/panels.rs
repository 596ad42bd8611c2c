use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Ui};

use crate::data::filter::PayloadRange;
use crate::layout::{RangeSlider, SiteDropdown};
use crate::state::{AppState, ControlEvent};

const HEADING_COLOR: Color32 = Color32::from_rgb(0x50, 0x3D, 0x36);

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the status strip above the page.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        let ds = state.dataset();
        ui.label(format!(
            "{} launches across {} sites, payload {}–{} kg",
            ds.len(),
            ds.sites().len(),
            ds.min_payload(),
            ds.max_payload()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().weak_text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Page heading
// ---------------------------------------------------------------------------

pub fn heading(ui: &mut Ui, text: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(text).size(40.0).color(HEADING_COLOR));
    });
}

// ---------------------------------------------------------------------------
// Site dropdown
// ---------------------------------------------------------------------------

/// Case-insensitive substring match used by the dropdown's search field.
/// An empty query matches everything.
pub fn option_matches(label: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || label.to_lowercase().contains(&query.to_lowercase())
}

/// Render the searchable site selector. Returns an event when the selection
/// changes.
pub fn site_dropdown(ui: &mut Ui, dropdown: &SiteDropdown, current: &str) -> Option<ControlEvent> {
    let selected_text = dropdown
        .options
        .iter()
        .find(|o| o.value == current)
        .map(|o| o.label.clone())
        .unwrap_or_else(|| dropdown.placeholder.to_string());

    // The search text lives in egui memory so it survives between frames.
    let query_id = ui.make_persistent_id((dropdown.id, "search"));
    let mut query: String = ui.data_mut(|d| d.get_temp(query_id).unwrap_or_default());

    let mut event = None;
    egui::ComboBox::from_id_salt(dropdown.id)
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(egui::TextEdit::singleline(&mut query).hint_text("Search sites…"));
            ui.separator();
            for option in dropdown
                .options
                .iter()
                .filter(|o| option_matches(&o.label, &query))
            {
                if ui
                    .selectable_label(option.value == current, option.label.as_str())
                    .clicked()
                    && option.value != current
                {
                    event = Some(ControlEvent::SiteChanged(option.value.clone()));
                }
            }
        });

    if event.is_some() {
        query.clear();
    }
    ui.data_mut(|d| d.insert_temp(query_id, query));
    event
}

// ---------------------------------------------------------------------------
// Payload range selector
// ---------------------------------------------------------------------------

/// Two linked handles: moving one past the other drags the other along, so
/// the selection never inverts. Returns an event when either handle moves.
pub fn payload_slider(ui: &mut Ui, slider: &RangeSlider, current: PayloadRange) -> Option<ControlEvent> {
    ui.label(slider.caption);

    let mut low = current.low;
    let mut high = current.high;

    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, slider.min..=slider.max)
                .step_by(slider.step)
                .clamping(egui::SliderClamping::Edits)
                .text("low"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, slider.min..=slider.max)
                .step_by(slider.step)
                .clamping(egui::SliderClamping::Edits)
                .text("high"),
        )
        .changed();

    if low_changed && low > high {
        high = low;
    }
    if high_changed && high < low {
        low = high;
    }

    slider_marks(ui, slider);

    (low_changed || high_changed).then(|| ControlEvent::PayloadChanged(PayloadRange::new(low, high)))
}

/// Tick labels under the sliders, positioned proportionally across the
/// slider track width.
fn slider_marks(ui: &mut Ui, slider: &RangeSlider) {
    let width = ui.spacing().slider_width;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 16.0), Sense::hover());
    let painter = ui.painter_at(rect);
    let font = FontId::proportional(10.0);
    let color = ui.visuals().weak_text_color();
    let span = slider.max - slider.min;

    for (value, label) in &slider.marks {
        let t = ((value - slider.min) / span) as f32;
        let x = rect.left() + t * rect.width();
        painter.text(
            egui::pos2(x, rect.center().y),
            Align2::CENTER_CENTER,
            label,
            font.clone(),
            color,
        );
    }
}
