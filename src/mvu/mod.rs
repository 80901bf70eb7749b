// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring component state, messages, and
//! commands.
//!
//! `update` is the single place application state changes; `run_command`
//! is the single place side effects happen (dialogs, the simulated
//! transfer latency, writing the download artifact, opening links). The
//! two never run on the same thread, and tests exercise `update` alone.

use std::path::PathBuf;
use std::time::Duration;

use crate::logic::artifact::{ensure_extension, write_placeholder};
use crate::logic::registry::ConfigRegistry;
use crate::models::record::{CandidateFile, ConfigRecord, RecordId, RecordIdGen};
use crate::models::site::SiteConfig;
use crate::ui::components::manager::{self, ManagerCommand, ManagerModel, ManagerMsg};
use crate::ui::components::upload::{
    self, UploadCommand, UploadEvent, UploadModel, UploadMsg, UploadPhase,
};

/// Top-level application state.
pub struct AppModel {
    /// The authoritative record collection.
    pub registry: ConfigRegistry,
    /// Shared monotonic id source for completed uploads.
    pub id_gen: RecordIdGen,
    /// Branding, external links, seed records.
    pub site: SiteConfig,
    /// Open upload attempt, if the modal is showing.
    pub upload: Option<UploadModel>,
    /// Admin panel state.
    pub manager: ManagerModel,
    /// Local UI toggle, not a security boundary.
    pub admin_mode: bool,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in the modal.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl AppModel {
    /// Build the initial model from site configuration, seeding the
    /// registry and placing the id generator past the seeded ids.
    pub fn from_site(site: SiteConfig) -> Self {
        let registry = ConfigRegistry::seeded(site.default_configs.clone());
        let id_gen = RecordIdGen::starting_after(registry.all());
        Self {
            registry,
            id_gen,
            site,
            upload: None,
            manager: ManagerModel::default(),
            admin_mode: false,
            status: None,
            error: None,
            pending_commands: 0,
        }
    }
}

/// Application messages routed through the update function.
#[derive(Clone, Debug)]
pub enum Msg {
    OpenUpload,
    /// User tried to close the upload modal.
    DismissUpload,
    ToggleAdminMode,
    DismissError,
    /// A file was dropped onto the window while the upload modal is open.
    FileDropped(PathBuf),
    DownloadRequested(RecordId),
    DownloadSaved {
        id: RecordId,
        result: Result<PathBuf, String>,
    },
    DownloadCancelled,
    OpenExternal(String),
    LinkOpened(Result<(), String>),
    /// A background command failed before producing its usual message.
    BackgroundFailed(String),
    Upload(UploadMsg),
    Manager(ManagerMsg),
}

/// Commands represent side effects executed between frames.
#[derive(Clone, Debug)]
pub enum Command {
    PickConfigFile,
    /// Read metadata for a dropped file and turn it into a candidate.
    InspectFile { path: PathBuf },
    PerformTransfer { latency: Duration },
    ScheduleClose { delay: Duration },
    /// Ask for a destination and write the placeholder document there.
    SaveArtifact { id: RecordId, filename: String },
    ConfirmDelete { id: RecordId, filename: String },
    OpenLink(String),
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::OpenUpload => {
            if model.upload.is_none() {
                model.upload = Some(UploadModel::default());
            }
        }
        Msg::DismissUpload => {
            // A started transfer always completes; ignore the dismissal.
            let uploading = model
                .upload
                .as_ref()
                .is_some_and(|u| u.phase() == UploadPhase::Uploading);
            if !uploading {
                model.upload = None;
            }
        }
        Msg::ToggleAdminMode => {
            model.admin_mode = !model.admin_mode;
            if !model.admin_mode {
                // Leaving admin mode drops any open edit draft.
                model.manager.reset();
            }
        }
        Msg::DismissError => model.error = None,
        Msg::FileDropped(path) => {
            if model.upload.is_some() {
                cmds.push(Command::InspectFile { path });
            }
        }
        Msg::DownloadRequested(id) => match model.registry.find(id) {
            Some(record) => cmds.push(Command::SaveArtifact {
                id,
                filename: record.filename.clone(),
            }),
            None => surface_event(model, "Configuration no longer exists.".to_string(), true),
        },
        Msg::DownloadSaved { id, result } => match result {
            Ok(path) => match model.registry.increment_downloads(id) {
                Ok(_) => {
                    surface_event(model, format!("Saved {}", path.display()), false);
                }
                // Deleted while the save dialog was open; counter untouched.
                Err(err) => surface_event(model, err.to_string(), true),
            },
            Err(err) => surface_event(model, format!("Failed to save config: {err}"), true),
        },
        Msg::DownloadCancelled => surface_event(model, "Download cancelled.".to_string(), false),
        Msg::OpenExternal(url) => cmds.push(Command::OpenLink(url)),
        Msg::LinkOpened(result) => {
            if let Err(err) = result {
                surface_event(model, format!("Failed to open link: {err}"), true);
            }
        }
        Msg::BackgroundFailed(err) => surface_event(model, err, true),
        Msg::Upload(m) => {
            let Some(upload_model) = &mut model.upload else {
                return;
            };
            let mut up_cmds = Vec::new();
            let event = upload::update(upload_model, m, &mut up_cmds);
            for c in up_cmds {
                cmds.push(match c {
                    UploadCommand::PickFile => Command::PickConfigFile,
                    UploadCommand::PerformTransfer { latency } => {
                        Command::PerformTransfer { latency }
                    }
                    UploadCommand::ScheduleClose { delay } => Command::ScheduleClose { delay },
                });
            }
            match event {
                Some(UploadEvent::Feedback { message, is_error }) => {
                    surface_event(model, message, is_error);
                }
                Some(UploadEvent::Completed {
                    candidate,
                    description,
                }) => insert_completed_upload(model, &candidate, description),
                None => {}
            }
            // The attempt dissolves once the success panel times out.
            if model
                .upload
                .as_ref()
                .is_some_and(|u| u.phase() == UploadPhase::Closed)
            {
                model.upload = None;
            }
        }
        Msg::Manager(m) => {
            let mut mgr_cmds = Vec::new();
            let event = manager::update(&mut model.manager, m, &mut model.registry, &mut mgr_cmds);
            for c in mgr_cmds {
                cmds.push(match c {
                    ManagerCommand::ConfirmDelete { id, filename } => {
                        Command::ConfirmDelete { id, filename }
                    }
                });
            }
            if let Some(event) = event {
                surface_event(model, event.message, event.is_error);
            }
        }
    }
}

/// Turn a finished transfer into a registry record.
fn insert_completed_upload(model: &mut AppModel, candidate: &CandidateFile, description: String) {
    let record = ConfigRecord::from_upload(model.id_gen.allocate(), candidate, description);
    match model.registry.insert(record) {
        Ok(_) => surface_event(
            model,
            "Upload successful. Configuration added to the library.".to_string(),
            false,
        ),
        // Unreachable given the generator guarantee; treat as invariant breach.
        Err(err) => surface_event(model, err.to_string(), true),
    }
}

/// Execute a command on a worker thread and return the resulting message.
pub fn run_command(cmd: Command) -> Msg {
    match cmd {
        Command::PickConfigFile => {
            let file = rfd::FileDialog::new()
                .set_title("Select V2Ray config")
                .add_filter("JSON", &["json"])
                .pick_file();
            match file {
                Some(path) => inspect_to_msg(&path),
                None => Msg::Upload(UploadMsg::PickCancelled),
            }
        }
        Command::InspectFile { path } => inspect_to_msg(&path),
        Command::PerformTransfer { latency } => {
            // Stand-in for the network round trip; nothing is transferred.
            std::thread::sleep(latency);
            Msg::Upload(UploadMsg::TransferFinished)
        }
        Command::ScheduleClose { delay } => {
            std::thread::sleep(delay);
            Msg::Upload(UploadMsg::CloseElapsed)
        }
        Command::SaveArtifact { id, filename } => {
            let dialog = rfd::FileDialog::new()
                .set_title("Save configuration")
                .add_filter("JSON", &["json"])
                .set_file_name(&filename);
            match dialog.save_file() {
                Some(path) => {
                    let output = ensure_extension(path, "json");
                    let result = write_placeholder(&output)
                        .map(|_| output)
                        .map_err(|e| format!("{e:#}"));
                    Msg::DownloadSaved { id, result }
                }
                None => Msg::DownloadCancelled,
            }
        }
        Command::ConfirmDelete { id, filename } => {
            let answer = rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Warning)
                .set_title("Delete configuration")
                .set_description(format!(
                    "Are you sure you want to delete \"{filename}\"? This cannot be undone."
                ))
                .set_buttons(rfd::MessageButtons::YesNo)
                .show();
            Msg::Manager(ManagerMsg::DeleteAnswered {
                id,
                accepted: matches!(answer, rfd::MessageDialogResult::Yes),
            })
        }
        Command::OpenLink(url) => Msg::LinkOpened(open::that(&url).map_err(|e| e.to_string())),
    }
}

fn inspect_to_msg(path: &std::path::Path) -> Msg {
    match CandidateFile::inspect(path) {
        Ok(candidate) => Msg::Upload(UploadMsg::FileChosen(candidate)),
        Err(err) => Msg::BackgroundFailed(format!("{err:#}")),
    }
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        model.error = Some(message.clone());
    }
    model.status = Some(message);
}
