// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for the configuration catalog.
//! Handles layout, the upload modal, and wiring to background commands.

pub mod components;

use eframe::egui;

use crate::models::site::{SITE_CONFIG_FILE, SiteConfig};
use crate::mvu::{self, AppModel, Command, Msg};
use crate::ui::components::{catalog, manager, upload};

/// Stateful egui application over the MVU kernel.
pub struct ConfShareApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl Default for ConfShareApp {
    fn default() -> Self {
        let site = SiteConfig::load(std::path::Path::new(SITE_CONFIG_FILE)).unwrap_or_else(|err| {
            eprintln!("confshare: {err:#}; using built-in defaults");
            SiteConfig::default()
        });
        Self::with_site(site)
    }
}

impl ConfShareApp {
    /// Build the shell and spawn the command workers.
    pub fn with_site(site: SiteConfig) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        // Several workers so a sleeping transfer never blocks a dialog.
        let threads = std::thread::available_parallelism()
            .map(|n| n.get().max(2))
            .unwrap_or(2);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd);
                    let _ = msg_tx.send(msg);
                }
            });
        }

        Self {
            model: AppModel::from_site(site),
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for ConfShareApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ctx);

        // Pull messages produced by the command workers.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        // Files dropped anywhere on the window feed the open upload modal.
        let dropped: Vec<_> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        self.inbox.extend(dropped.into_iter().map(Msg::FileDropped));

        // Process pending messages until exhausted.
        let mut msgs = std::mem::take(&mut self.inbox);
        while let Some(msg) = msgs.pop() {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                }
            }
        }
        self.inbox = msgs;

        // The simulated transfer resolves off-thread; keep painting so its
        // completion shows up without user input.
        if self.model.pending_commands > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            self.render_header(ui);
            ui.add_space(4.0);
        });

        self.render_error_modal(ctx);
        self.render_upload_modal(ctx);

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            egui::ScrollArea::vertical().show(ui, |ui| {
                if self.model.admin_mode {
                    let msgs =
                        manager::view(ui, &self.model.manager, self.model.registry.all());
                    self.inbox.extend(msgs.into_iter().map(Msg::Manager));
                } else {
                    let msgs = catalog::view(ui, self.model.registry.all());
                    self.inbox.extend(msgs.into_iter().map(|m| match m {
                        catalog::CatalogMsg::Download(id) => Msg::DownloadRequested(id),
                    }));
                }
                ui.add_space(16.0);
                self.render_footer(ui);
                ui.add_space(8.0);
            });
        });
    }
}

impl ConfShareApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(egui_phosphor::regular::SHIELD)
                    .size(22.0)
                    .color(egui::Color32::from_rgb(64, 196, 255)),
            );
            ui.heading(&self.model.site.site_name);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let gear = egui::Button::new(egui_phosphor::regular::GEAR)
                    .selected(self.model.admin_mode);
                if ui.add(gear).on_hover_text("Toggle admin mode").clicked() {
                    self.inbox.push(Msg::ToggleAdminMode);
                }
                ui.separator();
                if ui
                    .button(format!(
                        "{} Upload Config",
                        egui_phosphor::regular::UPLOAD_SIMPLE
                    ))
                    .clicked()
                {
                    self.inbox.push(Msg::OpenUpload);
                }
                ui.separator();
                ui.label(
                    egui::RichText::new(format!(
                        "{} {} Configs Available",
                        egui_phosphor::regular::LIGHTNING,
                        self.model.registry.all().len()
                    ))
                    .color(egui::Color32::from_gray(130)),
                );
            });
        });
    }

    /// Upload modal window; visible while an attempt is open.
    fn render_upload_modal(&mut self, ctx: &egui::Context) {
        let mut open = true;
        let mut msgs = Vec::new();
        if let Some(upload_model) = &self.model.upload {
            egui::Window::new("Upload V2Ray Config")
                .collapsible(false)
                .resizable(false)
                .open(&mut open)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .min_width(420.0)
                .show(ctx, |ui| {
                    msgs = upload::view(ui, upload_model);
                });
        } else {
            return;
        }
        self.inbox.extend(msgs.into_iter().map(Msg::Upload));

        if !open {
            self.inbox.push(Msg::DismissUpload);
        }
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }

    /// Render latest status message and background activity when present.
    fn render_status(&self, ui: &mut egui::Ui) {
        if let Some(text) = &self.model.status {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(text).color(egui::Color32::from_gray(68)));
                if self.model.pending_commands > 0 {
                    ui.add(egui::Spinner::new().size(14.0)).on_hover_text(format!(
                        "{} task(s) running in background",
                        self.model.pending_commands
                    ));
                }
            });
        }
    }

    fn render_footer(&mut self, ui: &mut egui::Ui) {
        ui.separator();
        ui.label(
            egui::RichText::new(&self.model.site.site_description)
                .small()
                .color(egui::Color32::from_gray(120)),
        );
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui
                .button(format!(
                    "{} Channel",
                    egui_phosphor::regular::PAPER_PLANE_TILT
                ))
                .clicked()
            {
                self.inbox
                    .push(Msg::OpenExternal(self.model.site.telegram_channel.clone()));
            }
            if ui
                .button(format!("{} Contact", egui_phosphor::regular::CHAT_CIRCLE))
                .clicked()
            {
                self.inbox
                    .push(Msg::OpenExternal(self.model.site.telegram_contact.clone()));
            }
        });
    }
}
