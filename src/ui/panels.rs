use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::CategoricalField;
use crate::state::AppState;
use crate::ui::{charts, tables};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let companies = state.company_options.clone();
            multi_select(ui, state, CategoricalField::Company, "Select Company", &companies);
            ui.separator();
            let fuels = state.fuel_options.clone();
            multi_select(ui, state, CategoricalField::FuelType, "Select Fuel Type", &fuels);
        });
}

/// Checkbox list for one column. Nothing ticked means no restriction.
fn multi_select(
    ui: &mut Ui,
    state: &mut AppState,
    field: CategoricalField,
    title: &str,
    options: &[String],
) {
    let n_selected = state.filters.selected(field).map_or(0, |s| s.len());
    let header_text = if n_selected == 0 {
        format!("{title}  (all)")
    } else {
        format!("{title}  ({n_selected}/{})", options.len())
    };

    let mut toggled: Vec<String> = Vec::new();
    let mut cleared = false;

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            if ui.small_button("Clear").clicked() {
                cleared = true;
            }

            let selected = state.filters.selected(field);
            for value in options {
                let mut checked = selected.is_some_and(|s| s.contains(value));
                let mut text = RichText::new(value);
                if field == CategoricalField::FuelType {
                    text = text.color(state.fuel_colors.color_for(value));
                }
                if ui.checkbox(&mut checked, text).changed() {
                    toggled.push(value.clone());
                }
            }
        });

    if cleared {
        state.clear_filter(field);
    } else {
        for value in &toggled {
            state.toggle_filter_value(field, value);
        }
    }
}

// ---------------------------------------------------------------------------
// Central panel – tables and charts
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new("Cars Dataset 2025 - Data Visualization Dashboard").size(24.0));
            ui.add_space(8.0);

            ui.heading("Dataset Preview");
            if state.dataset.is_empty() {
                ui.label("The dataset has no rows.");
            }
            tables::car_table(
                ui,
                "preview",
                state.dataset.preview(state.preview_rows).iter(),
                200.0,
            );
            ui.add_space(8.0);

            let view = state.view();
            ui.heading(format!("Filtered Data ({} rows)", view.len()));
            tables::car_table(ui, "filtered", view.iter(), 300.0);
            ui.add_space(8.0);

            charts::dashboard_charts(
                ui,
                &state.summary,
                &state.fuel_colors,
                state.options.top_n,
            );
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} cars loaded, {} visible",
            state.dataset.len(),
            state.visible_indices.len()
        ));
        if state.filters.is_empty() {
            ui.label(RichText::new("(no filters)").weak());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open cars dataset")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.reload(&path);
    }
}
