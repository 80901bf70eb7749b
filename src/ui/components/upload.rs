// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Upload modal as an MVU component: one instance per upload attempt.
//!
//! Phase machine: `Idle -> Selecting -> Ready -> Uploading -> Succeeded ->
//! Closed`. Rejected inputs keep the current phase and surface an error;
//! dismissing the modal before `Uploading` cancels the attempt. Once the
//! simulated transfer starts it always runs to completion.

use std::time::Duration;

use eframe::egui;

use crate::logic::validate::{
    MAX_DESCRIPTION_CHARS, clamp_description, is_acceptable_description, is_acceptable_file,
};
use crate::models::record::{CandidateFile, kib_label};

/// Stand-in network latency for the simulated transfer.
pub const TRANSFER_LATENCY: Duration = Duration::from_millis(2000);
/// How long the success panel stays up before the modal closes itself.
pub const CLOSE_DELAY: Duration = Duration::from_millis(2000);

/// Where the attempt currently stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UploadPhase {
    /// Nothing selected yet.
    #[default]
    Idle,
    /// Accepted file present, description still empty.
    Selecting,
    /// File and description both valid; submit is available.
    Ready,
    /// Simulated transfer in flight. Uninterruptible.
    Uploading,
    /// Record inserted; success panel showing until auto-close.
    Succeeded,
    /// Attempt finished; the owner should discard this model.
    Closed,
}

/// Per-attempt state. Dropped wholesale when the modal closes.
#[derive(Debug, Default)]
pub struct UploadModel {
    candidate: Option<CandidateFile>,
    description: String,
    phase: UploadPhase,
}

impl UploadModel {
    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    pub fn candidate(&self) -> Option<&CandidateFile> {
        self.candidate.as_ref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Recompute the pre-upload phase from current inputs. Never called
    /// once the transfer has started.
    fn settle_phase(&mut self) {
        self.phase = match (&self.candidate, is_acceptable_description(&self.description)) {
            (Some(_), true) => UploadPhase::Ready,
            (Some(_), false) => UploadPhase::Selecting,
            (None, _) => UploadPhase::Idle,
        };
    }
}

/// Messages emitted by the upload view or by finished background commands.
#[derive(Clone, Debug)]
pub enum UploadMsg {
    RequestPickFile,
    PickCancelled,
    /// A candidate arrived from the picker or a window drop.
    FileChosen(CandidateFile),
    DescriptionChanged(String),
    RemoveFile,
    Submit,
    /// Simulated transfer latency elapsed.
    TransferFinished,
    /// Success display delay elapsed.
    CloseElapsed,
}

/// Side-effectful commands run off the UI path.
#[derive(Clone, Debug)]
pub enum UploadCommand {
    PickFile,
    PerformTransfer { latency: Duration },
    ScheduleClose { delay: Duration },
}

/// What an update may report to the owning model.
#[derive(Clone, Debug)]
pub enum UploadEvent {
    /// Status or error text for the shared surfaces.
    Feedback { message: String, is_error: bool },
    /// Transfer completed; the owner turns this into a registry record.
    Completed {
        candidate: CandidateFile,
        description: String,
    },
}

impl UploadEvent {
    fn error(message: impl Into<String>) -> Self {
        UploadEvent::Feedback {
            message: message.into(),
            is_error: true,
        }
    }
}

/// Apply a message to the attempt. Returns an event when relevant.
pub fn update(
    model: &mut UploadModel,
    msg: UploadMsg,
    cmds: &mut Vec<UploadCommand>,
) -> Option<UploadEvent> {
    match msg {
        UploadMsg::RequestPickFile => {
            if pre_upload(model.phase) {
                cmds.push(UploadCommand::PickFile);
            }
            None
        }
        UploadMsg::PickCancelled => None,
        UploadMsg::FileChosen(candidate) => {
            if !pre_upload(model.phase) {
                return None;
            }
            if !is_acceptable_file(&candidate) {
                // File type rejected; phase stays put, user must reselect.
                return Some(UploadEvent::error(
                    "Only JSON configuration files are accepted.",
                ));
            }
            // Replacing an earlier selection simply re-runs this step.
            model.candidate = Some(candidate);
            model.settle_phase();
            None
        }
        UploadMsg::DescriptionChanged(text) => {
            if pre_upload(model.phase) {
                model.description = clamp_description(&text);
                model.settle_phase();
            }
            None
        }
        UploadMsg::RemoveFile => {
            // Permitted from Selecting or Ready only, never mid-transfer.
            if matches!(model.phase, UploadPhase::Selecting | UploadPhase::Ready) {
                model.candidate = None;
                model.description.clear();
                model.phase = UploadPhase::Idle;
            }
            None
        }
        UploadMsg::Submit => {
            if model.phase != UploadPhase::Ready {
                return None;
            }
            // Second gate against stale state.
            let valid = model
                .candidate
                .as_ref()
                .is_some_and(is_acceptable_file)
                && is_acceptable_description(&model.description);
            if !valid {
                return Some(UploadEvent::error(
                    "Please select a JSON file and add a description.",
                ));
            }
            model.phase = UploadPhase::Uploading;
            cmds.push(UploadCommand::PerformTransfer {
                latency: TRANSFER_LATENCY,
            });
            None
        }
        UploadMsg::TransferFinished => {
            if model.phase != UploadPhase::Uploading {
                return None;
            }
            let Some(candidate) = model.candidate.clone() else {
                return None;
            };
            model.phase = UploadPhase::Succeeded;
            cmds.push(UploadCommand::ScheduleClose { delay: CLOSE_DELAY });
            Some(UploadEvent::Completed {
                candidate,
                description: model.description.trim().to_string(),
            })
        }
        UploadMsg::CloseElapsed => {
            if model.phase == UploadPhase::Succeeded {
                model.phase = UploadPhase::Closed;
            }
            None
        }
    }
}

fn pre_upload(phase: UploadPhase) -> bool {
    matches!(
        phase,
        UploadPhase::Idle | UploadPhase::Selecting | UploadPhase::Ready
    )
}

/// Render the modal body. The owning shell places this inside a window and
/// handles dismissal.
pub fn view(ui: &mut egui::Ui, model: &UploadModel) -> Vec<UploadMsg> {
    let mut msgs = Vec::new();

    if model.phase == UploadPhase::Succeeded {
        render_success(ui);
        return msgs;
    }

    ui.label("Share your configuration with the community.");
    ui.add_space(8.0);

    render_drop_zone(ui, model, &mut msgs);
    ui.add_space(10.0);

    render_description_input(ui, model, &mut msgs);
    ui.add_space(10.0);

    render_submit_row(ui, model, &mut msgs);

    msgs
}

fn render_drop_zone(ui: &mut egui::Ui, model: &UploadModel, msgs: &mut Vec<UploadMsg>) {
    let visuals = ui.visuals().clone();
    egui::Frame::new()
        .fill(visuals.panel_fill)
        .stroke(visuals.window_stroke())
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            match model.candidate() {
                Some(candidate) => {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(egui_phosphor::regular::FILE).size(22.0));
                        ui.vertical(|ui| {
                            ui.label(&candidate.name);
                            ui.label(
                                egui::RichText::new(kib_label(candidate.bytes))
                                    .small()
                                    .color(egui::Color32::from_gray(110)),
                            );
                        });
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                let removable = pre_upload(model.phase);
                                if ui
                                    .add_enabled(
                                        removable,
                                        egui::Button::new(egui_phosphor::regular::X),
                                    )
                                    .on_hover_text("Remove file")
                                    .clicked()
                                {
                                    msgs.push(UploadMsg::RemoveFile);
                                }
                            },
                        );
                    });
                }
                None => {
                    ui.vertical_centered(|ui| {
                        ui.label(
                            egui::RichText::new(egui_phosphor::regular::UPLOAD_SIMPLE).size(28.0),
                        );
                        ui.label("Drop your V2Ray config here");
                        if ui.button("Browse files").clicked() {
                            msgs.push(UploadMsg::RequestPickFile);
                        }
                        ui.label(
                            egui::RichText::new("Only JSON files are accepted")
                                .small()
                                .color(egui::Color32::from_gray(110)),
                        );
                    });
                }
            }
        });
}

fn render_description_input(ui: &mut egui::Ui, model: &UploadModel, msgs: &mut Vec<UploadMsg>) {
    ui.label("Description");
    let mut text = model.description.to_string();
    let editable = pre_upload(model.phase);
    let response = ui.add_enabled(
        editable,
        egui::TextEdit::multiline(&mut text)
            .desired_rows(4)
            .desired_width(f32::INFINITY)
            .hint_text("Describe your configuration (server location, speed, features...)"),
    );
    if response.changed() {
        msgs.push(UploadMsg::DescriptionChanged(text));
    }
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        ui.label(
            egui::RichText::new(format!(
                "{}/{} characters",
                model.description.chars().count(),
                MAX_DESCRIPTION_CHARS
            ))
            .small()
            .color(egui::Color32::from_gray(110)),
        );
    });
}

fn render_submit_row(ui: &mut egui::Ui, model: &UploadModel, msgs: &mut Vec<UploadMsg>) {
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        match model.phase {
            UploadPhase::Uploading => {
                ui.add(egui::Spinner::new().size(16.0));
                ui.label("Uploading...");
            }
            _ => {
                let button = egui::Button::new(format!(
                    "{} Upload Config",
                    egui_phosphor::regular::UPLOAD_SIMPLE
                ));
                if ui
                    .add_enabled(model.phase == UploadPhase::Ready, button)
                    .on_disabled_hover_text("Select a JSON file and add a description")
                    .clicked()
                {
                    msgs.push(UploadMsg::Submit);
                }
            }
        }
    });
}

fn render_success(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(12.0);
        ui.label(
            egui::RichText::new(egui_phosphor::regular::CHECK_CIRCLE)
                .size(40.0)
                .color(egui::Color32::from_rgb(46, 160, 67)),
        );
        ui.heading("Upload Successful!");
        ui.label("Your configuration has been added to the library.");
        ui.add_space(12.0);
    });
}
