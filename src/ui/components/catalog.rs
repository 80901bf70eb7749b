// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Public catalog: read-only cards over the registry snapshot.

use eframe::egui;

use crate::models::record::{ConfigRecord, RecordId};

/// Messages the catalog view can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogMsg {
    Download(RecordId),
}

/// Render the card list. Purely a reader of the snapshot; all mutation
/// goes through the emitted messages.
pub fn view(ui: &mut egui::Ui, records: &[ConfigRecord]) -> Vec<CatalogMsg> {
    let mut msgs = Vec::new();

    ui.vertical_centered(|ui| {
        ui.heading("Available Configurations");
    });
    ui.add_space(10.0);

    if records.is_empty() {
        ui.vertical_centered(|ui| {
            ui.label("No configurations available");
            ui.label(
                egui::RichText::new("Upload your first config to get started")
                    .small()
                    .color(egui::Color32::from_gray(120)),
            );
        });
        return msgs;
    }

    for record in records {
        render_card(ui, record, &mut msgs);
        ui.add_space(8.0);
    }

    msgs
}

fn render_card(ui: &mut egui::Ui, record: &ConfigRecord, msgs: &mut Vec<CatalogMsg>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(&record.filename).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(&record.size_label)
                        .small()
                        .color(egui::Color32::from_gray(120)),
                );
            });
        });
        ui.label(
            egui::RichText::new(format!("Uploaded: {}", record.upload_date))
                .small()
                .color(egui::Color32::from_gray(110)),
        );
        ui.add_space(4.0);
        ui.label(egui::RichText::new(&record.description).color(egui::Color32::from_gray(140)));
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!(
                    "{} {} downloads",
                    egui_phosphor::regular::DOWNLOAD_SIMPLE,
                    record.downloads
                ))
                .small()
                .color(egui::Color32::from_gray(120)),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(format!(
                        "{} Download",
                        egui_phosphor::regular::DOWNLOAD_SIMPLE
                    ))
                    .clicked()
                {
                    msgs.push(CatalogMsg::Download(record.id));
                }
            });
        });
    });
}
