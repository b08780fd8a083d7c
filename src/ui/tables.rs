use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::CarRecord;

const HEADERS: [&str; 7] = [
    "Company",
    "Car",
    "Fuel Type",
    "HorsePower",
    "Price",
    "Seats",
    "0-100 km/h",
];
const ROW_HEIGHT: f32 = 18.0;

/// Raw text cells of a record, in [`HEADERS`] order.
fn cells(record: &CarRecord) -> [&str; 7] {
    let raw = &record.raw;
    [
        &raw.company,
        &raw.name,
        &raw.fuel_type,
        &raw.horsepower,
        &raw.price,
        &raw.seats,
        &raw.acceleration,
    ]
}

/// Scrollable table of records as they appear in the source file.
pub fn car_table<'a>(
    ui: &mut Ui,
    id: &str,
    rows: impl Iterator<Item = &'a CarRecord>,
    max_height: f32,
) {
    let rows: Vec<&CarRecord> = rows.collect();
    if rows.is_empty() {
        ui.label("No rows.");
        return;
    }

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(max_height)
            .columns(Column::auto().at_least(60.0), HEADERS.len())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for title in HEADERS {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let record = rows[row.index()];
                    for cell in cells(record) {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}
