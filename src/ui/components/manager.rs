// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Admin panel: inline record editing and confirmed deletion.
//!
//! Holds at most one edit draft; starting another edit discards the open
//! one (last-writer-wins, no merge). Deletion goes through a yes/no
//! confirmation command before touching the registry.

use eframe::egui;

use crate::logic::registry::ConfigRegistry;
use crate::models::record::{ConfigRecord, RecordId};

/// Transient draft for one record edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditDraft {
    pub id: RecordId,
    pub filename: String,
    pub description: String,
}

/// Admin panel state.
#[derive(Debug, Default)]
pub struct ManagerModel {
    draft: Option<EditDraft>,
}

impl ManagerModel {
    pub fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    /// Drop any open draft without touching the registry.
    pub fn reset(&mut self) {
        self.draft = None;
    }
}

/// Messages emitted by the admin view or the confirmation dialog.
#[derive(Clone, Debug)]
pub enum ManagerMsg {
    StartEdit(RecordId),
    DraftFilenameChanged(String),
    DraftDescriptionChanged(String),
    CommitEdit,
    CancelEdit,
    RequestDelete(RecordId),
    DeleteAnswered { id: RecordId, accepted: bool },
}

/// Side effects the panel needs run off the UI path.
#[derive(Clone, Debug)]
pub enum ManagerCommand {
    /// Ask the user to confirm deleting `filename`.
    ConfirmDelete { id: RecordId, filename: String },
}

/// Feedback for the shared status/error surfaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManagerEvent {
    pub message: String,
    pub is_error: bool,
}

impl ManagerEvent {
    fn error(message: impl Into<String>) -> Option<Self> {
        Some(Self {
            message: message.into(),
            is_error: true,
        })
    }

    fn info(message: impl Into<String>) -> Option<Self> {
        Some(Self {
            message: message.into(),
            is_error: false,
        })
    }
}

/// Apply a message, mutating the registry where the operation calls for it.
pub fn update(
    model: &mut ManagerModel,
    msg: ManagerMsg,
    registry: &mut ConfigRegistry,
    cmds: &mut Vec<ManagerCommand>,
) -> Option<ManagerEvent> {
    match msg {
        ManagerMsg::StartEdit(id) => match registry.find(id) {
            // An already-open draft is discarded implicitly.
            Some(record) => {
                model.draft = Some(EditDraft {
                    id,
                    filename: record.filename.clone(),
                    description: record.description.clone(),
                });
                None
            }
            None => ManagerEvent::error("Configuration no longer exists."),
        },
        ManagerMsg::DraftFilenameChanged(text) => {
            if let Some(draft) = &mut model.draft {
                draft.filename = text;
            }
            None
        }
        ManagerMsg::DraftDescriptionChanged(text) => {
            if let Some(draft) = &mut model.draft {
                draft.description = text;
            }
            None
        }
        ManagerMsg::CommitEdit => {
            let Some(draft) = model.draft.clone() else {
                return None;
            };
            // No length re-check here; only non-emptiness gates a commit.
            if draft.filename.is_empty() || draft.description.is_empty() {
                return ManagerEvent::error("Filename and description must not be empty.");
            }
            match registry.update(draft.id, &draft.filename, &draft.description) {
                Ok(_) => {
                    model.draft = None;
                    ManagerEvent::info("Configuration updated.")
                }
                // Session stays open so the user can cancel or retry.
                Err(err) => ManagerEvent::error(err.to_string()),
            }
        }
        ManagerMsg::CancelEdit => {
            model.draft = None;
            None
        }
        ManagerMsg::RequestDelete(id) => match registry.find(id) {
            Some(record) => {
                cmds.push(ManagerCommand::ConfirmDelete {
                    id,
                    filename: record.filename.clone(),
                });
                None
            }
            None => ManagerEvent::error("Configuration no longer exists."),
        },
        ManagerMsg::DeleteAnswered { id, accepted } => {
            if !accepted {
                return None;
            }
            match registry.remove(id) {
                Ok(_) => {
                    // A draft for the deleted record has nothing to commit to.
                    if model.draft.as_ref().is_some_and(|d| d.id == id) {
                        model.draft = None;
                    }
                    ManagerEvent::info("Configuration deleted.")
                }
                Err(err) => ManagerEvent::error(err.to_string()),
            }
        }
    }
}

/// Render the admin panel over the current registry snapshot.
pub fn view(ui: &mut egui::Ui, model: &ManagerModel, records: &[ConfigRecord]) -> Vec<ManagerMsg> {
    let mut msgs = Vec::new();

    ui.vertical_centered(|ui| {
        ui.heading("Configuration Manager");
        ui.label(
            egui::RichText::new("Admin panel for managing V2Ray configurations")
                .color(egui::Color32::from_gray(130)),
        );
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
        render_record_card(ui, model, record, &mut msgs);
        ui.add_space(8.0);
    }

    msgs
}

fn render_record_card(
    ui: &mut egui::Ui,
    model: &ManagerModel,
    record: &ConfigRecord,
    msgs: &mut Vec<ManagerMsg>,
) {
    let editing = model.draft().filter(|d| d.id == record.id);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());

        ui.horizontal(|ui| {
            match editing {
                Some(draft) => {
                    let mut filename = draft.filename.clone();
                    if ui
                        .add(
                            egui::TextEdit::singleline(&mut filename)
                                .hint_text("Filename")
                                .desired_width(220.0),
                        )
                        .changed()
                    {
                        msgs.push(ManagerMsg::DraftFilenameChanged(filename));
                    }
                }
                None => {
                    ui.label(egui::RichText::new(&record.filename).strong());
                }
            }
            ui.label(
                egui::RichText::new(&record.size_label)
                    .small()
                    .color(egui::Color32::from_gray(120)),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                match editing {
                    Some(_) => {
                        if ui
                            .button(egui_phosphor::regular::FLOPPY_DISK)
                            .on_hover_text("Save changes")
                            .clicked()
                        {
                            msgs.push(ManagerMsg::CommitEdit);
                        }
                        if ui
                            .button(egui_phosphor::regular::X)
                            .on_hover_text("Cancel")
                            .clicked()
                        {
                            msgs.push(ManagerMsg::CancelEdit);
                        }
                    }
                    None => {
                        if ui
                            .button(egui_phosphor::regular::TRASH_SIMPLE)
                            .on_hover_text("Delete configuration")
                            .clicked()
                        {
                            msgs.push(ManagerMsg::RequestDelete(record.id));
                        }
                        if ui
                            .button(egui_phosphor::regular::PENCIL_SIMPLE)
                            .on_hover_text("Edit")
                            .clicked()
                        {
                            msgs.push(ManagerMsg::StartEdit(record.id));
                        }
                    }
                }
                ui.label(
                    egui::RichText::new(format!(
                        "{} {}",
                        egui_phosphor::regular::DOWNLOAD_SIMPLE,
                        record.downloads
                    ))
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

        match editing {
            Some(draft) => {
                let mut description = draft.description.clone();
                if ui
                    .add(
                        egui::TextEdit::multiline(&mut description)
                            .desired_rows(3)
                            .desired_width(f32::INFINITY)
                            .hint_text("Configuration description"),
                    )
                    .changed()
                {
                    msgs.push(ManagerMsg::DraftDescriptionChanged(description));
                }
            }
            None => {
                ui.label(
                    egui::RichText::new(&record.description)
                        .color(egui::Color32::from_gray(140)),
                );
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn record(id: u64, filename: &str) -> ConfigRecord {
        ConfigRecord {
            id: RecordId(id),
            filename: filename.to_string(),
            size_label: "1.2 KB".to_string(),
            description: "original text".to_string(),
            upload_date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            downloads: 5,
        }
    }

    fn seeded_registry() -> ConfigRegistry {
        ConfigRegistry::seeded(vec![record(1, "a.json"), record(2, "b.json")])
    }

    #[test]
    fn begin_loads_current_fields_into_the_draft() {
        let mut model = ManagerModel::default();
        let mut registry = seeded_registry();
        let mut cmds = Vec::new();

        update(
            &mut model,
            ManagerMsg::StartEdit(RecordId(2)),
            &mut registry,
            &mut cmds,
        );

        let draft = model.draft().expect("draft open");
        assert_eq!(draft.id, RecordId(2));
        assert_eq!(draft.filename, "b.json");
        assert_eq!(draft.description, "original text");
    }

    #[test]
    fn starting_a_new_edit_discards_the_previous_draft() {
        let mut model = ManagerModel::default();
        let mut registry = seeded_registry();
        let mut cmds = Vec::new();

        update(
            &mut model,
            ManagerMsg::StartEdit(RecordId(1)),
            &mut registry,
            &mut cmds,
        );
        update(
            &mut model,
            ManagerMsg::DraftFilenameChanged("changed.json".to_string()),
            &mut registry,
            &mut cmds,
        );
        update(
            &mut model,
            ManagerMsg::StartEdit(RecordId(2)),
            &mut registry,
            &mut cmds,
        );

        let draft = model.draft().expect("draft open");
        assert_eq!(draft.id, RecordId(2));
        assert_eq!(draft.filename, "b.json");
        // Registry untouched by the discarded draft.
        assert_eq!(registry.find(RecordId(1)).unwrap().filename, "a.json");
    }

    #[test]
    fn commit_with_empty_filename_keeps_session_open_and_record_unchanged() {
        let mut model = ManagerModel::default();
        let mut registry = seeded_registry();
        let mut cmds = Vec::new();
        update(
            &mut model,
            ManagerMsg::StartEdit(RecordId(1)),
            &mut registry,
            &mut cmds,
        );
        update(
            &mut model,
            ManagerMsg::DraftFilenameChanged(String::new()),
            &mut registry,
            &mut cmds,
        );

        let event = update(&mut model, ManagerMsg::CommitEdit, &mut registry, &mut cmds);

        assert!(event.is_some_and(|e| e.is_error));
        assert!(model.draft().is_some());
        assert_eq!(registry.find(RecordId(1)).unwrap().filename, "a.json");
    }

    #[test]
    fn commit_writes_both_fields_and_closes_the_session() {
        let mut model = ManagerModel::default();
        let mut registry = seeded_registry();
        let mut cmds = Vec::new();
        update(
            &mut model,
            ManagerMsg::StartEdit(RecordId(1)),
            &mut registry,
            &mut cmds,
        );
        update(
            &mut model,
            ManagerMsg::DraftFilenameChanged("renamed.json".to_string()),
            &mut registry,
            &mut cmds,
        );
        update(
            &mut model,
            ManagerMsg::DraftDescriptionChanged("better text".to_string()),
            &mut registry,
            &mut cmds,
        );

        let event = update(&mut model, ManagerMsg::CommitEdit, &mut registry, &mut cmds);

        assert!(event.is_some_and(|e| !e.is_error));
        assert!(model.draft().is_none());
        let updated = registry.find(RecordId(1)).unwrap();
        assert_eq!(updated.filename, "renamed.json");
        assert_eq!(updated.description, "better text");
        assert_eq!(updated.downloads, 5);
    }

    #[test]
    fn commit_against_a_vanished_record_surfaces_not_found() {
        let mut model = ManagerModel::default();
        let mut registry = seeded_registry();
        let mut cmds = Vec::new();
        update(
            &mut model,
            ManagerMsg::StartEdit(RecordId(1)),
            &mut registry,
            &mut cmds,
        );
        registry.remove(RecordId(1)).unwrap();

        let event = update(&mut model, ManagerMsg::CommitEdit, &mut registry, &mut cmds);

        assert!(event.is_some_and(|e| e.is_error));
        assert!(model.draft().is_some());
    }

    #[test]
    fn cancel_discards_the_draft_without_registry_changes() {
        let mut model = ManagerModel::default();
        let mut registry = seeded_registry();
        let mut cmds = Vec::new();
        update(
            &mut model,
            ManagerMsg::StartEdit(RecordId(1)),
            &mut registry,
            &mut cmds,
        );
        update(
            &mut model,
            ManagerMsg::DraftFilenameChanged("never-saved.json".to_string()),
            &mut registry,
            &mut cmds,
        );

        update(&mut model, ManagerMsg::CancelEdit, &mut registry, &mut cmds);

        assert!(model.draft().is_none());
        assert_eq!(registry.find(RecordId(1)).unwrap().filename, "a.json");
    }

    #[test]
    fn delete_request_only_enqueues_a_confirmation() {
        let mut model = ManagerModel::default();
        let mut registry = seeded_registry();
        let mut cmds = Vec::new();

        update(
            &mut model,
            ManagerMsg::RequestDelete(RecordId(1)),
            &mut registry,
            &mut cmds,
        );

        assert_eq!(registry.all().len(), 2);
        assert!(matches!(
            cmds.as_slice(),
            [ManagerCommand::ConfirmDelete { id, filename }]
                if *id == RecordId(1) && filename == "a.json"
        ));
    }

    #[test]
    fn declined_confirmation_is_a_noop() {
        let mut model = ManagerModel::default();
        let mut registry = seeded_registry();
        let mut cmds = Vec::new();

        let event = update(
            &mut model,
            ManagerMsg::DeleteAnswered {
                id: RecordId(1),
                accepted: false,
            },
            &mut registry,
            &mut cmds,
        );

        assert!(event.is_none());
        assert_eq!(registry.all().len(), 2);
    }

    #[test]
    fn accepted_confirmation_deletes_and_drops_a_matching_draft() {
        let mut model = ManagerModel::default();
        let mut registry = seeded_registry();
        let mut cmds = Vec::new();
        update(
            &mut model,
            ManagerMsg::StartEdit(RecordId(1)),
            &mut registry,
            &mut cmds,
        );

        let event = update(
            &mut model,
            ManagerMsg::DeleteAnswered {
                id: RecordId(1),
                accepted: true,
            },
            &mut registry,
            &mut cmds,
        );

        assert!(event.is_some_and(|e| !e.is_error));
        assert!(registry.find(RecordId(1)).is_none());
        assert!(model.draft().is_none());
    }
}
