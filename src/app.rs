use eframe::egui::{self, ScrollArea, Ui};

use crate::state::{AppState, ControlEvent};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: dataset summary + status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Central panel: the page, top to bottom ----
        let mut events: Vec<ControlEvent> = Vec::new();
        let mut status: Option<String> = None;
        let state = &self.state;
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    let layout = &state.layout;
                    let controls = state.controls();

                    panels::heading(ui, layout.heading);

                    events.extend(panels::site_dropdown(
                        ui,
                        &layout.site_dropdown,
                        controls.site.value(),
                    ));
                    ui.add_space(8.0);

                    let pie = layout.pie_container;
                    if let Some(msg) = plot::chart_container(ui, pie, state.chart(pie)) {
                        status = Some(msg);
                    }
                    ui.add_space(8.0);

                    events.extend(panels::payload_slider(
                        ui,
                        &layout.payload_slider,
                        controls.payload,
                    ));
                    ui.add_space(8.0);

                    let scatter = layout.scatter_container;
                    if let Some(msg) = plot::chart_container(ui, scatter, state.chart(scatter)) {
                        status = Some(msg);
                    }
                });
        });

        if status.is_some() {
            self.state.status_message = status;
        }
        // Callbacks run after the frame's widgets so each event sees the
        // control values the frame was drawn with.
        for event in events {
            self.state.dispatch(event);
        }
    }
}
