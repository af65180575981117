use crate::config::{AppConfig, ProjectSource};
use crate::page::{Listing, ProjectFilter, ProjectRenderer, ThemeToggler};
use crate::services::api::GithubClient;
use crate::services::{fetch_repositories, FetchOutcome};
use crate::ui::{apply_theme, render_projects};
use crate::view::{Document, ViewError};
use anyhow::{anyhow, Context, Result};
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use eframe::{egui, App, CreationContext, NativeOptions};
use std::error::Error;
use std::thread;
use tokio::runtime::Runtime;

pub fn run(config: AppConfig) -> Result<()> {
    let app_name = config.application_name.clone();
    let native_options = NativeOptions::default();

    eframe::run_native(
        &app_name,
        native_options,
        Box::new(move |cc| -> Result<Box<dyn App>, Box<dyn Error + Send + Sync>> {
            let app = PortfolioApp::new(cc, config)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow!(err.to_string()))
}

struct PortfolioApp {
    config: AppConfig,
    document: Document,
    toggler: ThemeToggler,
    renderer: ProjectRenderer,
    /// `None` while the fetch is in flight.
    listing: Option<Listing>,
    filter_query: String,
    event_rx: Receiver<AppEvent>,
    status_message: Option<String>,
    worker_failed: bool,
}

impl PortfolioApp {
    fn new(cc: &CreationContext<'_>, config: AppConfig) -> Result<Self> {
        let document = Document::portfolio_shell(config.application_name.clone());
        let toggler = ThemeToggler::register(&document).context("page has no theme control")?;
        let renderer =
            ProjectRenderer::locate(&document).context("page has no projects container")?;
        let (event_tx, event_rx) = unbounded();

        apply_theme(&cc.egui_ctx, toggler.is_dark());

        let mut app = Self {
            config,
            document,
            toggler,
            renderer,
            listing: None,
            filter_query: String::new(),
            event_rx,
            status_message: None,
            worker_failed: false,
        };

        match app.config.project_source {
            ProjectSource::Static => {
                let cards = app.renderer.render_static(&mut app.document)?;
                app.listing = Some(Listing::Cards(cards));
            }
            ProjectSource::Github => {
                app.renderer.show_loading(&mut app.document)?;
                spawn_fetch_worker(app.config.clone(), event_tx, cc.egui_ctx.clone());
            }
        }

        Ok(app)
    }

    fn consume_events(&mut self) {
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => self.handle_event(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.listing.is_none() && !self.worker_failed {
                        self.worker_failed = true;
                        tracing::error!("fetch worker exited without a result");
                        self.handle_event(AppEvent::ProjectsFetched(FetchOutcome::Failed));
                    }
                    break;
                }
            }
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ProjectsFetched(outcome) => {
                match self.renderer.render_outcome(&mut self.document, outcome) {
                    Ok(listing) => {
                        self.status_message = match &listing {
                            Listing::Cards(cards) => Some(format!("Loaded {} projects.", cards.len())),
                            Listing::Error => None,
                        };
                        self.listing = Some(listing);
                        self.apply_filter();
                    }
                    Err(err) => self.report_view_error(err),
                }
            }
        }
    }

    fn apply_filter(&mut self) {
        let Some(Listing::Cards(cards)) = &self.listing else {
            return;
        };
        let kept = ProjectFilter::new(&self.filter_query).apply(cards);
        if let Err(err) = self.renderer.render_cards(&mut self.document, &kept) {
            self.report_view_error(err);
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        match self.toggler.activate(&mut self.document) {
            Ok(dark) => apply_theme(ctx, dark),
            Err(err) => self.report_view_error(err),
        }
    }

    fn report_view_error(&mut self, err: ViewError) {
        tracing::error!(error = %err, "page update failed");
        self.status_message = Some(format!("Page update failed: {err}"));
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(&self.config.application_name);
            ui.separator();
            let toggle_label = self.document.text_content(self.toggler.control());
            if ui.button(toggle_label).clicked() {
                self.toggle_theme(ui.ctx());
            }
            ui.separator();
            ui.label("Filter:");
            if ui.text_edit_singleline(&mut self.filter_query).changed() {
                self.apply_filter();
            }
        });

        if self.config.project_source == ProjectSource::Github {
            ui.label(format!("Repositories of {}", self.config.github_user));
        }
        if let Some(message) = &self.status_message {
            ui.label(message);
        }
    }
}

impl App for PortfolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.consume_events();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.render_top_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                render_projects(ui, &self.document, self.renderer.container());
            });
        });
    }
}

enum AppEvent {
    ProjectsFetched(FetchOutcome),
}

/// Runs the single repository fetch off the UI thread.
fn spawn_fetch_worker(config: AppConfig, event_tx: Sender<AppEvent>, ctx: egui::Context) {
    thread::spawn(move || {
        let outcome = match Runtime::new() {
            Ok(runtime) => runtime.block_on(async {
                match GithubClient::from_config(&config) {
                    Ok(client) => fetch_repositories(&client, &config.github_user).await,
                    Err(err) => {
                        tracing::warn!(error = %err, "GitHub client setup failed");
                        FetchOutcome::Failed
                    }
                }
            }),
            Err(err) => {
                tracing::error!(error = %err, "tokio runtime");
                FetchOutcome::Failed
            }
        };
        let _ = event_tx.send(AppEvent::ProjectsFetched(outcome));
        ctx.request_repaint();
    });
}
