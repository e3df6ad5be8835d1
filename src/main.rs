mod message;

use std::env;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use iced::advanced::widget::Id as WidgetId;
use iced::border::Radius;
use iced::keyboard::{self, Key};
use iced::widget::button::Status as ButtonStatus;
use iced::widget::{Space, button, column, container, row, scrollable, text};
use iced::{Border, Center, Color, Element, Fill, Font, Length, Shadow, Subscription, Task};

use faultline::config::Config;
use faultline::issue::ValidationError;
use faultline::loader::{self, LoadError};
use faultline::render::{RenderSession, RenderedLine, SpanEnd};
use faultline::theme::{Theme, ThemePreference};
use faultline::value::Value;
use faultline::viewer::{self, ROW_HEIGHT, ViewerEvent};

use message::Message;

// Virtual scrolling: extra rows rendered above/below the viewport
const BUFFER_ROWS: usize = 5;

pub fn main() -> iced::Result {
    iced::application(App::boot, App::update, App::view)
        .window_size((960.0, 700.0))
        .resizable(true)
        .title(|app: &App| match &app.data_file {
            Some(path) => format!("{} - Faultline", loader::file_name(path)),
            None => String::from("Faultline - Validation Error Viewer"),
        })
        .subscription(App::subscription)
        .run()
}

// The application state (Model)
struct App {
    data: Option<Value>,
    error: ValidationError,
    // Interaction state + line-count cache for the current inputs
    session: RenderSession,
    // Precomputed display lines, rebuilt on every state change
    lines: Vec<RenderedLine>,
    data_file: Option<PathBuf>,
    issues_file: Option<PathBuf>,
    load_time: Option<Duration>,
    load_error: Option<LoadError>,
    status: String,
    config: Config,
    // Viewport height in pixels (updated on resize)
    viewport_height: f32,
    // Current scroll offset in pixels (for virtual scrolling)
    scroll_offset: f32,
    scrollable_id: WidgetId,
}

impl Default for App {
    fn default() -> Self {
        App {
            data: None,
            error: ValidationError::default(),
            session: RenderSession::new(),
            lines: Vec::new(),
            data_file: None,
            issues_file: None,
            load_time: None,
            load_error: None,
            status: String::from("No file loaded"),
            config: Config::load(),
            viewport_height: 600.0,
            scroll_offset: 0.0,
            scrollable_id: WidgetId::unique(),
        }
    }
}

impl App {
    // Initialize the application (called once at startup)
    // CLI usage: `faultline data.json [issues.json]`
    fn boot() -> (Self, Task<Message>) {
        let app = App::default();
        let args: Vec<String> = env::args().collect();

        let mut tasks = Vec::new();
        if args.len() > 1 {
            tasks.push(Task::done(Message::DataFileSelected(Some(PathBuf::from(
                &args[1],
            )))));
        }
        if args.len() > 2 {
            tasks.push(Task::done(Message::IssuesFileSelected(Some(
                PathBuf::from(&args[2]),
            ))));
        }

        if tasks.is_empty() {
            (app, Task::none())
        } else {
            (app, Task::batch(tasks))
        }
    }

    // Listen for keyboard shortcuts not consumed by widgets
    fn subscription(&self) -> Subscription<Message> {
        keyboard::listen().filter_map(|event| match event {
            keyboard::Event::KeyPressed { key, modifiers, .. } => {
                Some(Message::KeyPressed(key, modifiers))
            }
            _ => None,
        })
    }

    /// Interaction state and line counts are only meaningful against one
    /// (data, error) pair; loading either file starts a fresh session.
    fn restart_session(&mut self) {
        self.session = RenderSession::new();
        self.rebuild_lines();
    }

    fn rebuild_lines(&mut self) {
        match &self.data {
            Some(data) => self.lines = self.session.render(data, &self.error),
            None => self.lines.clear(),
        }
    }

    // Handle messages and update state
    // Returns a Task for async operations (like file dialogs)
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenDataDialog => Task::perform(
                async {
                    let file = rfd::AsyncFileDialog::new()
                        .add_filter("JSON", &["json"])
                        .add_filter("All Files", &["*"])
                        .set_title("Open Data File")
                        .pick_file()
                        .await;
                    file.map(|f| f.path().to_path_buf())
                },
                Message::DataFileSelected,
            ),
            Message::OpenIssuesDialog => Task::perform(
                async {
                    let file = rfd::AsyncFileDialog::new()
                        .add_filter("JSON", &["json"])
                        .add_filter("All Files", &["*"])
                        .set_title("Open Issues File")
                        .pick_file()
                        .await;
                    file.map(|f| f.path().to_path_buf())
                },
                Message::IssuesFileSelected,
            ),
            Message::DataFileSelected(path_option) => {
                if let Some(path) = path_option {
                    let start = Instant::now();
                    match loader::load_data(&path) {
                        Ok(data) => {
                            let filename = loader::file_name(&path);
                            self.data = Some(data);
                            self.data_file = Some(path);
                            self.load_time = Some(start.elapsed());
                            self.load_error = None;
                            self.restart_session();
                            self.status = format!("✓ {} ({} lines)", filename, self.lines.len());
                        }
                        Err(e) => {
                            self.status = format!("✗ Failed to load {}", e.filename);
                            self.load_error = Some(e);
                            self.data = None;
                            self.data_file = None;
                            self.lines.clear();
                        }
                    }
                }
                Task::none()
            }
            Message::IssuesFileSelected(path_option) => {
                if let Some(path) = path_option {
                    match loader::load_issues(&path) {
                        Ok(error) => {
                            self.error = error;
                            self.issues_file = Some(path);
                            self.load_error = None;
                            self.restart_session();
                        }
                        Err(e) => {
                            self.status = format!("✗ Failed to load {}", e.filename);
                            self.load_error = Some(e);
                        }
                    }
                }
                Task::none()
            }
            Message::Viewer(event) => {
                match event {
                    ViewerEvent::ToggleTruncation(path, SpanEnd::Start) => {
                        self.session.toggle_start(&path)
                    }
                    ViewerEvent::ToggleTruncation(path, SpanEnd::End) => {
                        self.session.toggle_end(&path)
                    }
                    ViewerEvent::SelectUnion(path, index) => {
                        self.session.select_union(&path, index)
                    }
                }
                // State change and focus land in the same rebuild, so the
                // toggled control is highlighted in the very next frame
                self.rebuild_lines();
                Task::none()
            }
            Message::Scrolled(viewport) => {
                self.scroll_offset = viewport.absolute_offset().y;
                self.viewport_height = viewport.bounds().height;
                Task::none()
            }
            Message::ToggleTheme => {
                self.config.theme = self.config.theme.toggled();
                let _ = self.config.save();
                Task::none()
            }
            Message::KeyPressed(key, modifiers) => {
                // Check for Cmd on macOS, Ctrl on other platforms
                let cmd_or_ctrl = modifiers.command() || modifiers.control();

                match key {
                    Key::Character(c) if c.as_str() == "o" && cmd_or_ctrl => {
                        self.update(Message::OpenDataDialog)
                    }
                    Key::Character(c) if c.as_str() == "i" && cmd_or_ctrl => {
                        self.update(Message::OpenIssuesDialog)
                    }
                    Key::Character(c) if c.as_str() == "t" && cmd_or_ctrl => {
                        self.update(Message::ToggleTheme)
                    }
                    _ => Task::none(),
                }
            }
        }
    }

    fn chrome(&self) -> ChromeColors {
        match self.config.theme {
            ThemePreference::Dark => ChromeColors::dark(),
            ThemePreference::Light => ChromeColors::light(),
        }
    }

    // Render the UI
    fn view(&self) -> Element<'_, Message> {
        let theme = self.config.theme.theme();

        if self.load_error.is_some() {
            return self.error_screen(theme);
        }
        if self.data.is_none() {
            return self.welcome_screen(theme);
        }

        column![
            self.toolbar(),
            self.tree_view(theme),
            self.status_bar()
        ]
        .into()
    }

    /// The annotated tree, behind virtual scrolling: only rows near the
    /// viewport are built, with spacers keeping the scrollbar honest.
    fn tree_view(&self, theme: Theme) -> Element<'_, Message> {
        let total_rows = self.lines.len();
        let first_visible = (self.scroll_offset / ROW_HEIGHT).floor() as usize;
        let visible_count = (self.viewport_height / ROW_HEIGHT).ceil() as usize + 1;

        let start = first_visible.saturating_sub(BUFFER_ROWS);
        let end = (first_visible + visible_count + BUFFER_ROWS).min(total_rows);

        let gutter = viewer::gutter_width(&self.lines);
        let focused = self.session.focused_control();

        let mut elements: Vec<Element<'_, Message>> = Vec::new();

        let top_offset = start as f32 * ROW_HEIGHT;
        if top_offset > 0.0 {
            elements.push(Space::new().height(Length::Fixed(top_offset)).into());
        }

        for line in self.lines.iter().skip(start).take(end - start) {
            elements.push(viewer::view_line(line, &theme, gutter, focused).map(Message::Viewer));
        }

        let bottom_offset = (total_rows - end) as f32 * ROW_HEIGHT;
        if bottom_offset > 0.0 {
            elements.push(Space::new().height(Length::Fixed(bottom_offset)).into());
        }

        let background = theme.background;
        container(
            scrollable(container(column(elements).spacing(0)).padding([10, 0]))
                .id(self.scrollable_id.clone())
                .direction(scrollable::Direction::Both {
                    vertical: scrollable::Scrollbar::default(),
                    horizontal: scrollable::Scrollbar::default(),
                })
                .on_scroll(Message::Scrolled)
                .height(Length::Fill)
                .width(Fill),
        )
        .style(move |_theme| container::Style {
            background: Some(background.into()),
            ..Default::default()
        })
        .height(Length::Fill)
        .width(Fill)
        .into()
    }

    fn toolbar(&self) -> Element<'_, Message> {
        let chrome = self.chrome();

        let open_data = button(text("Open Data...").size(12))
            .on_press(Message::OpenDataDialog)
            .padding([5, 12])
            .style(button_3d_style(chrome));

        let open_issues = button(text("Open Issues...").size(12))
            .on_press(Message::OpenIssuesDialog)
            .padding([5, 12])
            .style(button_3d_style(chrome));

        let theme_label = match self.config.theme {
            ThemePreference::Light => "Dark Mode",
            ThemePreference::Dark => "Light Mode",
        };
        let theme_button = button(text(theme_label).size(12))
            .on_press(Message::ToggleTheme)
            .padding([5, 12])
            .style(button_3d_style(chrome));

        let issue_summary = match self.error.issues.len() {
            0 => String::from("No issues loaded"),
            1 => String::from("1 issue"),
            n => format!("{} issues", n),
        };

        container(
            row![
                open_data,
                Space::new().width(Length::Fixed(5.0)),
                open_issues,
                Space::new().width(Length::Fixed(10.0)),
                text(issue_summary).size(11).color(chrome.text_dim),
                Space::new().width(Length::Fill),
                theme_button,
            ]
            .align_y(Center),
        )
        .width(Fill)
        .padding([8, 10])
        .style(move |_theme| container::Style {
            background: Some(chrome.bar.into()),
            ..Default::default()
        })
        .into()
    }

    fn status_bar(&self) -> Element<'_, Message> {
        let chrome = self.chrome();

        let issues_display = match &self.issues_file {
            Some(path) => format!("Issues: {}", loader::file_name(path)),
            None => String::from("Issues: none"),
        };

        let load_time_str: String = self
            .load_time
            .map(|d| format!("Load: {}ms", d.as_millis()))
            .unwrap_or_default();

        container(
            row![
                text(self.status.clone()).size(12).color(chrome.text_dim),
                text("  |  ").size(12).color(chrome.text_dim),
                text(issues_display).size(12).color(chrome.text_dim),
                Space::new().width(Length::Fill),
                text(load_time_str).size(12).color(chrome.text_dim),
            ]
        )
        .width(Fill)
        .padding([5, 10])
        .style(move |_theme| container::Style {
            background: Some(chrome.status_bar.into()),
            ..Default::default()
        })
        .into()
    }

    fn welcome_screen(&self, theme: Theme) -> Element<'_, Message> {
        let chrome = self.chrome();

        let header = column![
            text("Faultline").size(32).color(chrome.text),
            text("Validation Error Viewer").size(16).color(chrome.text_dim),
        ]
        .spacing(5)
        .align_x(Center);

        let open_button = button(text("Open Data File...").size(14))
            .on_press(Message::OpenDataDialog)
            .padding([8, 16])
            .style(button_3d_style(chrome));

        let open_issues_button = button(text("Open Issues File...").size(12))
            .on_press(Message::OpenIssuesDialog)
            .padding([6, 12])
            .style(button_3d_style(chrome));

        let welcome = column![header, open_button, open_issues_button]
            .spacing(15)
            .align_x(Center);

        let background = theme.background;
        container(welcome)
            .width(Fill)
            .height(Fill)
            .center(Fill)
            .style(move |_theme| container::Style {
                background: Some(background.into()),
                ..Default::default()
            })
            .into()
    }

    // Error screen with detailed information
    fn error_screen(&self, theme: Theme) -> Element<'_, Message> {
        let chrome = self.chrome();
        let Some(error) = &self.load_error else {
            return self.welcome_screen(theme);
        };

        let error_icon = text("⚠").size(48).color(theme.error_foreground);

        let error_title = text(format!("Failed to parse {}", error.filename))
            .size(18)
            .color(theme.error_foreground);

        let error_message = text(error.message.clone()).size(14).color(chrome.text);

        // Location info (line:column)
        let location_text = match (error.line, error.column) {
            (Some(line), Some(col)) => format!("Line {}, Column {}", line, col),
            (Some(line), None) => format!("Line {}", line),
            _ => String::new(),
        };
        let location = text(location_text).size(13).color(chrome.text_dim);

        // Context line with caret pointing to the error column
        let context_section: Element<'_, Message> = if let Some(ctx_line) = &error.context_line {
            let truncated = if ctx_line.len() > 80 {
                format!("{}...", &ctx_line[..80])
            } else {
                ctx_line.clone()
            };

            let caret = if let Some(col) = error.column {
                let spaces = " ".repeat(col.saturating_sub(1));
                format!("{}^", spaces)
            } else {
                String::new()
            };

            column![
                text(truncated)
                    .size(12)
                    .font(Font::MONOSPACE)
                    .color(chrome.text_dim),
                text(caret)
                    .size(12)
                    .font(Font::MONOSPACE)
                    .color(theme.error_foreground),
            ]
            .spacing(0)
            .into()
        } else {
            Space::new().into()
        };

        let try_again_button = button(text("Try Another File...").size(14))
            .on_press(Message::OpenDataDialog)
            .padding([8, 16])
            .style(button_3d_style(chrome));

        let error_content = column![
            error_icon,
            error_title,
            Space::new().height(Length::Fixed(10.0)),
            error_message,
            location,
            Space::new().height(Length::Fixed(15.0)),
            context_section,
            Space::new().height(Length::Fixed(20.0)),
            try_again_button,
        ]
        .spacing(5)
        .align_x(Center);

        let background = theme.background;
        container(error_content)
            .width(Fill)
            .height(Fill)
            .center(Fill)
            .style(move |_theme| container::Style {
                background: Some(background.into()),
                ..Default::default()
            })
            .into()
    }
}

// Window chrome colors (toolbar, status bar, buttons), per theme
#[derive(Clone, Copy)]
struct ChromeColors {
    bar: Color,
    status_bar: Color,
    text: Color,
    text_dim: Color,
    btn_bg: Color,
    btn_bg_hover: Color,
    btn_border_top: Color,
    btn_border_bottom: Color,
    btn_disabled: Color,
}

impl ChromeColors {
    fn dark() -> Self {
        ChromeColors {
            bar: Color::from_rgb(0.12, 0.12, 0.12),
            status_bar: Color::from_rgb(0.15, 0.15, 0.15),
            text: Color::WHITE,
            text_dim: Color::from_rgb(0.7, 0.7, 0.7),
            btn_bg: Color::from_rgb(0.28, 0.28, 0.30),
            btn_bg_hover: Color::from_rgb(0.32, 0.32, 0.35),
            btn_border_top: Color::from_rgb(0.45, 0.45, 0.48),
            btn_border_bottom: Color::from_rgb(0.15, 0.15, 0.17),
            btn_disabled: Color::from_rgb(0.22, 0.22, 0.24),
        }
    }

    fn light() -> Self {
        ChromeColors {
            bar: Color::from_rgb(0.94, 0.94, 0.94),
            status_bar: Color::from_rgb(0.90, 0.90, 0.90),
            text: Color::from_rgb(0.1, 0.1, 0.1),
            text_dim: Color::from_rgb(0.4, 0.4, 0.4),
            btn_bg: Color::from_rgb(0.88, 0.88, 0.90),
            btn_bg_hover: Color::from_rgb(0.82, 0.82, 0.85),
            btn_border_top: Color::from_rgb(0.95, 0.95, 0.98),
            btn_border_bottom: Color::from_rgb(0.70, 0.70, 0.72),
            btn_disabled: Color::from_rgb(0.92, 0.92, 0.94),
        }
    }
}

/// Custom 3D button style with raised appearance (theme-aware)
fn button_3d_style(chrome: ChromeColors) -> impl Fn(&iced::Theme, ButtonStatus) -> button::Style {
    move |_theme: &iced::Theme, status: ButtonStatus| {
        let (bg_color, text_color, border_color) = match status {
            ButtonStatus::Active => (chrome.btn_bg, chrome.text, chrome.btn_border_top),
            ButtonStatus::Hovered => (chrome.btn_bg_hover, chrome.text, chrome.btn_border_top),
            ButtonStatus::Pressed => (
                chrome.btn_border_bottom,
                chrome.text_dim,
                chrome.btn_border_bottom,
            ),
            ButtonStatus::Disabled => (chrome.btn_disabled, chrome.text_dim, chrome.btn_disabled),
        };

        button::Style {
            background: Some(bg_color.into()),
            text_color,
            border: Border {
                color: border_color,
                width: 1.0,
                radius: Radius::from(4.0),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
                offset: iced::Vector::new(0.0, 2.0),
                blur_radius: 3.0,
            },
            snap: true,
        }
    }
}
