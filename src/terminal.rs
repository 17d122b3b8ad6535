// SPDX-License-Identifier: GPL-3.0-only

//! Terminal front end for the capture screen
//!
//! Renders the live preview and the captured photo with Unicode half-block
//! characters, turns key presses into [`Message`]s and awaits each one on a
//! tokio runtime before reading the next event.

use crate::app::{CaptureScreen, Message, Notice, NoticeKind, Screen};
use crate::backends::camera::{CameraEvent, CameraFacing, FlashMode, PreviewFrame, V4l2Camera};
use crate::backends::files::LocalFiles;
use crate::backends::gallery::DirectoryGallery;
use crate::config::Config;
use crate::display::load_review_image;
use crate::errors::AppResult;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use image::RgbImage;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, info};

type TerminalScreen = CaptureScreen<V4l2Camera, DirectoryGallery, LocalFiles>;

/// Run the capture screen in the terminal
pub fn run(config: Config) -> AppResult<()> {
    let runtime = Runtime::new()?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &runtime, &config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Decoded review photo, keyed by what it was decoded from
struct ReviewImage {
    path: PathBuf,
    flipped: bool,
    image: Option<RgbImage>,
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    runtime: &Runtime,
    config: &Config,
) -> AppResult<()> {
    let camera = V4l2Camera::new(config);
    let gallery = DirectoryGallery::new(config.gallery_root());
    info!(
        device = camera.active_device(),
        gallery = %gallery.root().display(),
        "Starting capture screen"
    );

    let mut screen = CaptureScreen::new(camera, gallery, LocalFiles, config);
    runtime.block_on(screen.update(Message::Mounted));

    let mut review: Option<ReviewImage> = None;

    loop {
        let view = screen.screen();
        sync_stream(&mut screen, &view);

        // Drain readiness/mount events from the preview thread
        while let Some(event) = screen.camera_mut().poll_event() {
            let message = match event {
                CameraEvent::Ready => Message::CameraReady,
                CameraEvent::MountError(reason) => Message::CameraMountError(reason),
            };
            runtime.block_on(screen.update(message));
        }

        // Decode the review photo once per (photo, flip)
        let view = screen.screen();
        if let Screen::PhotoReview(ref details) = view {
            let stale = review.as_ref().is_none_or(|r| {
                r.path != details.photo.location || r.flipped != details.flipped
            });
            if stale {
                let loaded = load_review_image(&details.photo.location, details.flipped);
                let image = match loaded {
                    Ok(image) => Some(image),
                    Err(e) => {
                        runtime.block_on(screen.update(Message::ImageLoadFailed(e.to_string())));
                        None
                    }
                };
                review = Some(ReviewImage {
                    path: details.photo.location.clone(),
                    flipped: details.flipped,
                    image,
                });
            }
        } else {
            review = None;
        }

        let view = screen.screen();
        let preview = screen.camera().latest_frame();
        let notice = screen.current_notice().cloned();
        let mirror = screen.session().mirror;
        let status_message = build_status_message(&view, mirror);
        let review_image = review.as_ref().and_then(|r| r.image.as_ref());
        draw_frame(
            terminal,
            &view,
            preview.as_ref(),
            review_image,
            notice.as_ref(),
            &status_message,
        )?;

        // Handle input with timeout for frame updates
        if event::poll(Duration::from_millis(16))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            if is_quit(&key) {
                break;
            }
            if let Some(message) = key_to_message(&key, &view, notice.is_some()) {
                if message == Message::Save {
                    // The save blocks this loop, so show its state first
                    let pending = saving_view(&view);
                    draw_frame(
                        terminal,
                        &pending,
                        None,
                        review_image,
                        None,
                        &build_status_message(&pending, mirror),
                    )?;
                }
                runtime.block_on(screen.update(message));
            }
        }
    }

    screen.camera_mut().stop();
    Ok(())
}

/// Render one frame of the capture screen
fn draw_frame(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    view: &Screen,
    preview: Option<&PreviewFrame>,
    review_image: Option<&RgbImage>,
    notice: Option<&Notice>,
    status_message: &str,
) -> AppResult<()> {
    terminal.draw(|f| {
        let area = f.area();

        // Reserve bottom line for status
        let main_area = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };
        let status_area = Rect {
            x: area.x,
            y: area.height.saturating_sub(1),
            width: area.width,
            height: 1,
        };

        match view {
            Screen::AwaitingPermission(prompt) => {
                let text = format!("{}\n\nPress 'g' to grant permission", prompt.message());
                f.render_widget(centered_text(&text), main_area);
            }
            Screen::LiveCapture(live) => {
                let widget = FrameWidget {
                    source: preview.map(|p| p as &dyn PixelSource),
                    flipped: live.preview_flipped,
                    placeholder: "Waiting for camera...",
                };
                f.render_widget(widget, main_area);
            }
            Screen::PhotoReview(_) => {
                let widget = FrameWidget {
                    source: review_image.map(|i| i as &dyn PixelSource),
                    flipped: false,
                    placeholder: "Photo could not be displayed",
                };
                f.render_widget(widget, main_area);
            }
        }

        f.render_widget(
            StatusBar {
                message: status_message,
            },
            status_area,
        );

        if let Some(notice) = notice {
            let popup = popup_area(main_area);
            f.render_widget(Clear, popup);
            f.render_widget(NoticePopup { notice }, popup);
        }
    })?;
    Ok(())
}

/// The review view as it looks while a save is running
fn saving_view(view: &Screen) -> Screen {
    let mut pending = view.clone();
    if let Screen::PhotoReview(review) = &mut pending {
        review.is_saving = true;
        review.can_save = false;
    }
    pending
}

/// Stream only while the live view is visible
fn sync_stream(screen: &mut TerminalScreen, view: &Screen) {
    let camera = screen.camera_mut();
    if view.is_live() && !camera.is_streaming() {
        debug!("Live view visible, starting preview");
        camera.start();
    } else if !view.is_live() && camera.is_streaming() {
        debug!("Live view hidden, stopping preview");
        camera.stop();
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('q')
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Map a key press to a controller message for the visible screen
///
/// While a notice is shown only its acknowledgement is accepted.
fn key_to_message(key: &KeyEvent, view: &Screen, notice_open: bool) -> Option<Message> {
    if notice_open {
        return matches!(key.code, KeyCode::Enter | KeyCode::Esc).then_some(Message::DismissNotice);
    }

    match (view, key.code) {
        (Screen::AwaitingPermission(prompt), KeyCode::Char('g')) => Some(match prompt {
            crate::app::PermissionPrompt::Camera => Message::RequestCameraPermission,
            crate::app::PermissionPrompt::Gallery => Message::RequestGalleryPermission,
        }),
        (Screen::LiveCapture(_), KeyCode::Char('f')) => Some(Message::ToggleFacing),
        (Screen::LiveCapture(_), KeyCode::Char('l')) => Some(Message::ToggleFlash),
        (Screen::LiveCapture(_), KeyCode::Char('m')) => Some(Message::ToggleMirror),
        (Screen::LiveCapture(_), KeyCode::Char('x')) => Some(Message::ToggleFlip),
        (Screen::LiveCapture(_), KeyCode::Char(' ') | KeyCode::Char('p')) => Some(Message::Capture),
        (Screen::PhotoReview(_), KeyCode::Char('r')) => Some(Message::Retake),
        (Screen::PhotoReview(r), KeyCode::Char('s')) if r.can_save => Some(Message::Save),
        (Screen::PhotoReview(r), KeyCode::Char('d')) if r.can_check_file => {
            Some(Message::CheckImageFile)
        }
        _ => None,
    }
}

fn build_status_message(view: &Screen, mirror: bool) -> String {
    match view {
        Screen::AwaitingPermission(_) => "'g' grant | 'q' quit".to_string(),
        Screen::LiveCapture(live) => {
            let facing = match live.facing {
                CameraFacing::Front => "front",
                CameraFacing::Back => "back",
            };
            let flash = match live.flash {
                FlashMode::On => "on",
                FlashMode::Off => "off",
            };
            let mut msg = format!(
                "[{} | flash {} | mirror {} | flip {}] ",
                facing,
                flash,
                on_off(mirror),
                on_off(live.preview_flipped != mirror)
            );
            if live.camera_ready {
                msg.push_str("space capture | ");
            }
            msg.push_str("'f' facing | 'l' flash | 'm' mirror | 'x' flip | 'q' quit");
            msg
        }
        Screen::PhotoReview(review) => {
            let mut msg = String::new();
            if review.is_saving {
                msg.push_str("Saving... | ");
            } else if review.can_save {
                msg.push_str("'s' save | ");
            }
            msg.push_str("'r' retake");
            if review.can_check_file {
                msg.push_str(" | 'd' check file");
            }
            msg.push_str(" | 'q' quit");
            msg
        }
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn centered_text(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .alignment(ratatui::layout::Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::NONE))
}

fn popup_area(area: Rect) -> Rect {
    let width = area.width.min(60);
    let height = area.height.min(7);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Anything the half-block renderer can sample
trait PixelSource {
    fn dimensions(&self) -> (u32, u32);
    fn rgb(&self, x: u32, y: u32) -> (u8, u8, u8);
}

impl PixelSource for PreviewFrame {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn rgb(&self, x: u32, y: u32) -> (u8, u8, u8) {
        self.pixel(x, y)
    }
}

impl PixelSource for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbImage::dimensions(self)
    }

    fn rgb(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let (w, h) = RgbImage::dimensions(self);
        let [r, g, b] = self.get_pixel(x.min(w - 1), y.min(h - 1)).0;
        (r, g, b)
    }
}

/// Widget that renders a picture using half-block characters
struct FrameWidget<'a> {
    source: Option<&'a dyn PixelSource>,
    /// Mirror horizontally while rendering
    flipped: bool,
    placeholder: &'a str,
}

impl Widget for FrameWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let source = match self.source {
            Some(source) if source.dimensions().0 > 0 && source.dimensions().1 > 0 => source,
            _ => {
                let msg = self.placeholder;
                let x = area.x + (area.width.saturating_sub(msg.len() as u16)) / 2;
                let y = area.y + area.height / 2;
                if y < area.y + area.height && x < area.x + area.width {
                    buf.set_string(x, y, msg, Style::default());
                }
                return;
            }
        };
        let (width, height) = source.dimensions();

        // Each terminal cell displays 2 vertical pixels
        let aspect = width as f64 / height as f64;
        let term_width = area.width as f64;
        let term_height = (area.height * 2) as f64;

        let (display_width, display_height) = if term_width / term_height > aspect {
            let h = term_height;
            ((h * aspect) as u16, (h / 2.0) as u16)
        } else {
            let w = term_width;
            (w as u16, (w / aspect / 2.0) as u16)
        };
        if display_width == 0 || display_height == 0 {
            return;
        }

        let x_offset = area.x + (area.width.saturating_sub(display_width)) / 2;
        let y_offset = area.y + (area.height.saturating_sub(display_height)) / 2;

        let x_scale = width as f64 / display_width as f64;
        let y_scale = height as f64 / (display_height * 2) as f64;

        for ty in 0..display_height {
            for tx in 0..display_width {
                let term_x = x_offset + tx;
                let term_y = y_offset + ty;
                if term_x >= area.x + area.width || term_y >= area.y + area.height {
                    continue;
                }

                let col = if self.flipped {
                    display_width - 1 - tx
                } else {
                    tx
                };
                let src_x = (col as f64 * x_scale) as u32;
                let src_y_top = (ty as f64 * 2.0 * y_scale) as u32;
                let src_y_bottom = ((ty as f64 * 2.0 + 1.0) * y_scale) as u32;

                let (r, g, b) = source.rgb(src_x, src_y_top);
                let top = Color::Rgb(r, g, b);
                let (r, g, b) = source.rgb(src_x, src_y_bottom);
                let bottom = Color::Rgb(r, g, b);

                if let Some(cell) = buf.cell_mut((term_x, term_y)) {
                    cell.set_char('▀');
                    cell.set_fg(top);
                    cell.set_bg(bottom);
                }
            }
        }
    }
}

/// Modal notice box
struct NoticePopup<'a> {
    notice: &'a Notice,
}

impl Widget for NoticePopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = match self.notice.kind {
            NoticeKind::Info => Color::Blue,
            NoticeKind::Success => Color::Green,
            NoticeKind::Error => Color::Red,
        };
        let text = format!("{}\n\n[Enter] OK", self.notice.message);
        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(self.notice.title.as_str())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            )
            .render(area, buf);
    }
}

/// Status bar widget
struct StatusBar<'a> {
    message: &'a str,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(' ');
                cell.set_bg(Color::DarkGray);
            }
        }

        let text: String = self.message.chars().take(area.width as usize).collect();
        buf.set_string(
            area.x,
            area.y,
            text,
            Style::default().fg(Color::White).bg(Color::DarkGray),
        );
    }
}
