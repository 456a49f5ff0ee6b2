use iced::widget::{button, canvas, column, container, image, row, scrollable, text, Column};
use iced::{Alignment, Element, Length, Size, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::Arc;

mod features;
mod library;
mod logging;
mod ranking;
mod state;
mod ui;

use library::{DecodeError, LoadError, LoadReport, Preview};
use ranking::{Metric, RankError};
use state::data::{ImageId, Selection};
use state::session::Session;
use state::settings::Settings;
use ui::grid::{thumbnail_grid, GridLayout};
use ui::histogram::HistogramChart;

/// Main application state
struct ImageScroller {
    settings: Settings,
    /// Images, histograms, working set and reference of the open folder
    session: Session,
    /// Grid thumbnails, indexed by image id
    thumbnails: Vec<image::Handle>,
    /// Enlarged view of the reference image
    preview: Option<image::Handle>,
    /// True while a folder is being decoded in the background
    loading: bool,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Open Folder…"
    OpenFolder,
    /// Background load finished
    FolderLoaded(Result<Arc<LoadReport>, LoadError>),
    /// User picked a thumbnail as the reference
    Select(ImageId),
    /// Enlarged preview for a reference finished loading
    PreviewLoaded(ImageId, Result<Arc<Preview>, DecodeError>),
    /// User asked to sort by one of the metrics
    Rank(Metric),
    /// User asked to go back to load order
    ResetOrder,
}

impl ImageScroller {
    /// Create the application and start loading the configured folder
    fn new(settings: Settings) -> (Self, Task<Message>) {
        let session = Session::empty(settings.image_dir.clone(), settings.processing_size());
        let mut app = ImageScroller {
            settings,
            session,
            thumbnails: Vec::new(),
            preview: None,
            loading: false,
            status: String::new(),
        };

        let task = app.start_load(app.settings.image_dir.clone());
        (app, task)
    }

    /// Kick off a background load of `folder`
    fn start_load(&mut self, folder: PathBuf) -> Task<Message> {
        self.loading = true;
        self.status = format!("Loading images from {}...", folder.display());

        Task::perform(
            library::load_folder_async(folder, self.settings.clone()),
            |result| Message::FolderLoaded(result.map(Arc::new)),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenFolder => {
                // Show the native folder picker dialog
                let folder = FileDialog::new()
                    .set_title("Select Folder with Images")
                    .set_directory(self.session.folder())
                    .pick_folder();

                let Some(folder) = folder else {
                    return Task::none();
                };

                self.settings.image_dir = folder.clone();
                if let Some(path) = Settings::default_path() {
                    if let Err(e) = self.settings.save_to(&path) {
                        tracing::warn!("could not remember folder: {e}");
                    }
                }

                self.start_load(folder)
            }
            Message::FolderLoaded(Ok(report)) => {
                self.loading = false;
                self.session = Session::from_report(&report, self.settings.processing_size());
                self.thumbnails = report
                    .images
                    .iter()
                    .map(|loaded| {
                        let thumb = &loaded.thumbnail;
                        image::Handle::from_rgba(thumb.size, thumb.size, thumb.rgba.clone())
                    })
                    .collect();
                self.preview = None;
                self.status = report.summary();

                Task::none()
            }
            Message::FolderLoaded(Err(e)) => {
                self.loading = false;
                tracing::error!("{e}");
                self.session = Session::empty(self.settings.image_dir.clone(), self.settings.processing_size());
                self.thumbnails.clear();
                self.preview = None;
                self.status = format!("⚠️  {e}");

                Task::none()
            }
            Message::Select(id) => {
                let Some(record) = self.session.select(id) else {
                    return Task::none();
                };

                self.status = format!("Selected {}", record.filename);
                self.preview = None;

                Task::perform(
                    library::load_preview(record.path.clone(), self.settings.preview_size),
                    move |result| Message::PreviewLoaded(id, result.map(Arc::new)),
                )
            }
            Message::PreviewLoaded(id, result) => {
                // Ignore previews for a reference the user already moved away from
                if self.session.selection() != Selection::Selected(id) {
                    return Task::none();
                }

                match result {
                    Ok(preview) => {
                        self.preview = Some(image::Handle::from_rgba(
                            preview.width,
                            preview.height,
                            preview.rgba.clone(),
                        ));
                    }
                    Err(e) => {
                        tracing::warn!("{e}");
                        self.status = format!("⚠️  {e}");
                    }
                }

                Task::none()
            }
            Message::Rank(metric) => {
                self.status = match self.session.rank(metric) {
                    Ok(ranking) => {
                        let name = self
                            .session
                            .record(ranking.reference)
                            .map(|r| r.filename.as_str())
                            .unwrap_or("?");
                        format!("Sorted {} images by {metric} similarity to {name}", self.session.len())
                    }
                    Err(RankError::NoSelection) => "No image selected".to_string(),
                    Err(e) => format!("⚠️  Sort failed: {e}"),
                };

                Task::none()
            }
            Message::ResetOrder => {
                self.session.reset_order();
                self.status = "Original order".to_string();

                Task::none()
            }
        }
    }

    /// Right-hand panel: preview, histograms, commands and status
    fn side_panel(&self) -> Element<Message> {
        let preview: Element<Message> = match &self.preview {
            Some(handle) => image(handle.clone()).width(Length::Fill).into(),
            None => text("No Image Selected").size(16).into(),
        };

        let mut panel: Column<Message> = column![
            container(preview)
                .center_x(Length::Fill)
                .center_y(Length::Fixed(self.settings.preview_size as f32)),
        ]
        .spacing(10)
        .padding(10)
        .width(Length::Fixed(self.settings.preview_size as f32 + 20.0));

        if let Some(features) = self.session.selection().id().and_then(|id| self.session.features_of(id)) {
            panel = panel
                .push(text("Intensity").size(12))
                .push(
                    canvas(HistogramChart::intensity(&features.intensity))
                        .width(Length::Fill)
                        .height(Length::Fixed(80.0)),
                )
                .push(text("Color code").size(12))
                .push(
                    canvas(HistogramChart::color(&features.color))
                        .width(Length::Fill)
                        .height(Length::Fixed(80.0)),
                );
        }

        let ready = !self.loading && !self.session.is_empty();
        for metric in Metric::ALL {
            panel = panel.push(
                button(text(metric.label()))
                    .width(Length::Fill)
                    .padding(10)
                    .on_press_maybe(ready.then_some(Message::Rank(metric))),
            );
        }

        panel
            .push(
                button("Original Order")
                    .width(Length::Fill)
                    .padding(10)
                    .on_press_maybe((ready && self.session.ranked_by().is_some()).then_some(Message::ResetOrder)),
            )
            .push(
                button("Open Folder…")
                    .width(Length::Fill)
                    .padding(10)
                    .on_press_maybe((!self.loading).then_some(Message::OpenFolder)),
            )
            .push(text(&self.status).size(14))
            .into()
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let layout = GridLayout {
            columns: self.settings.columns,
            thumbnail_size: self.settings.thumbnail_size,
            interactive: !self.loading,
        };

        let grid = scrollable(
            container(thumbnail_grid(&self.session, &self.thumbnails, layout)).padding(10),
        )
        .width(Length::Fill)
        .height(Length::Fill);

        row![grid, self.side_panel()]
            .spacing(10)
            .align_y(Alignment::Start)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    logging::init();

    let mut settings = Settings::load_or_default();
    // First argument overrides the configured folder
    if let Some(folder) = std::env::args_os().nth(1) {
        settings.image_dir = PathBuf::from(folder);
    }

    tracing::info!(folder = %settings.image_dir.display(), "starting image scroller");

    iced::application(
        "Image Scroller",
        ImageScroller::update,
        ImageScroller::view,
    )
    .theme(ImageScroller::theme)
    .window_size(Size::new(1280.0, 800.0))
    .centered()
    .run_with(move || ImageScroller::new(settings))
}
