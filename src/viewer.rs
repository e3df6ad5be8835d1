//! Iced widgets for rendered lines.
//!
//! This layer is dumb on purpose: it turns precomputed `RenderedLine`
//! records into fixed-height monospaced rows and reports interactions as
//! `ViewerEvent`s for the host to feed back into its `RenderSession`.

use iced::border::Radius;
use iced::widget::button::Status as ButtonStatus;
use iced::widget::{button, column, container, row, scrollable, text};
use iced::{Border, Color, Element, Font, Length, Shadow};

use crate::path::Path;
use crate::render::{ControlId, Literal, RenderedLine, SpanEnd};
use crate::theme::Theme;

/// Fixed height per row, for virtual scrolling hosts.
pub const ROW_HEIGHT: f32 = 18.0;

/// Interactions reported by the viewer widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    ToggleTruncation(Path, SpanEnd),
    SelectUnion(Path, usize),
}

/// Vertical sizing of the assembled viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Height {
    #[default]
    Natural,
    Fill,
}

/// Digits needed by the line-number gutter. The last line carries the
/// highest number.
pub fn gutter_width(lines: &[RenderedLine]) -> usize {
    lines
        .last()
        .map(|line| line.number.to_string().len())
        .unwrap_or(1)
}

/// The full viewer: every line in a scrollable column. Hosts with large
/// inputs can instead drive `view_line` themselves behind virtual
/// scrolling.
pub fn viewer<'a>(
    lines: &[RenderedLine],
    theme: &Theme,
    height: Height,
    focused: Option<&ControlId>,
) -> Element<'a, ViewerEvent> {
    let th = *theme;
    let gutter_chars = gutter_width(lines);
    let rows: Vec<Element<'a, ViewerEvent>> = lines
        .iter()
        .map(|line| view_line(line, theme, gutter_chars, focused))
        .collect();

    let body = scrollable(
        container(column(rows).spacing(0))
            .padding([6, 0])
            .style(move |_theme| container::Style {
                background: Some(th.background.into()),
                ..Default::default()
            }),
    )
    .direction(scrollable::Direction::Both {
        vertical: scrollable::Scrollbar::default(),
        horizontal: scrollable::Scrollbar::default(),
    })
    .width(Length::Fill);

    match height {
        Height::Fill => body.height(Length::Fill).into(),
        Height::Natural => body.into(),
    }
}

/// Render a single precomputed line as one fixed-height row.
pub fn view_line<'a>(
    line: &RenderedLine,
    theme: &Theme,
    gutter_chars: usize,
    focused: Option<&ControlId>,
) -> Element<'a, ViewerEvent> {
    let th = *theme;

    let mono = |content: String, color: Color| -> Element<'a, ViewerEvent> {
        text(content)
            .font(Font::MONOSPACE)
            .size(th.font_size)
            .color(color)
            .into()
    };

    let mut pieces: Vec<Element<'a, ViewerEvent>> = Vec::new();

    // Line number gutter
    pieces.push(
        container(
            text(format!("{:>width$}", line.number, width = gutter_chars))
                .font(Font::MONOSPACE)
                .size(th.font_size)
                .color(th.line_number),
        )
        .padding([0, 4])
        .center_y(Length::Fixed(ROW_HEIGHT))
        .style(move |_theme| container::Style {
            background: Some(th.line_number_background.into()),
            ..Default::default()
        })
        .into(),
    );

    // Indentation
    pieces.push(mono(format!(" {}", "  ".repeat(line.indent)), th.comma));

    // Key
    if let Some(key) = &line.key {
        pieces.push(mono(format!("\"{}\"", key), th.key));
        pieces.push(mono(String::from(": "), th.colon));
    }

    // Literal value
    match &line.literal {
        Some(Literal::Str(s)) => {
            // Multi-line strings stay on one row with explicit markers
            pieces.push(mono(String::from("\""), th.string));
            let segments: Vec<&str> = s.split('\n').collect();
            for (i, segment) in segments.iter().enumerate() {
                pieces.push(mono((*segment).to_string(), th.string));
                if i != segments.len() - 1 {
                    pieces.push(mono(String::from("↵"), th.newline));
                }
            }
            pieces.push(mono(String::from("\""), th.string));
        }
        Some(Literal::Num(n)) => pieces.push(mono(n.to_string(), th.number)),
        Some(Literal::Bool(b)) => pieces.push(mono(b.to_string(), th.boolean)),
        Some(Literal::Null) => pieces.push(mono(String::from("null"), th.null)),
        Some(Literal::Undefined) => pieces.push(mono(String::from("undefined"), th.undefined)),
        None => {}
    }

    // Bracket
    if let Some(bracket) = line.bracket {
        pieces.push(mono(bracket.to_string(), th.bracket));
    }

    // Comma
    if line.comma {
        pieces.push(mono(String::from(","), th.comma));
    }

    // Truncation toggle
    if let Some(control) = &line.truncation {
        let label = if control.expanded {
            "// ..."
        } else {
            "// ... truncated ..."
        };
        let is_focused = matches!(
            focused,
            Some(ControlId::Truncation(path, end)) if *path == control.path && *end == control.end
        );
        pieces.push(mono(String::from(" "), th.comma));
        pieces.push(
            button(text(label).font(Font::MONOSPACE).size(th.font_size))
                .on_press(ViewerEvent::ToggleTruncation(
                    control.path.clone(),
                    control.end,
                ))
                .padding([0, 4])
                .style(truncation_style(th, is_focused))
                .into(),
        );
    }

    // Error badge
    if let Some(issue) = &line.issue {
        pieces.push(mono(String::from("  ⚠ "), th.error_foreground));
        pieces.push(mono(issue.message.clone(), th.error_foreground));

        if let Some(switcher) = &issue.switcher {
            pieces.push(mono(
                format!(" {}/{} ", switcher.index + 1, switcher.max),
                th.error_foreground,
            ));

            let prev = button(text("‹").size(th.font_size))
                .padding([0, 6])
                .style(switcher_style(th));
            let prev = if switcher.prev_enabled() {
                prev.on_press(ViewerEvent::SelectUnion(
                    switcher.path.clone(),
                    switcher.index - 1,
                ))
            } else {
                prev
            };
            pieces.push(prev.into());

            let next = button(text("›").size(th.font_size))
                .padding([0, 6])
                .style(switcher_style(th));
            let next = if switcher.next_enabled() {
                next.on_press(ViewerEvent::SelectUnion(
                    switcher.path.clone(),
                    switcher.index + 1,
                ))
            } else {
                next
            };
            pieces.push(next.into());

            pieces.push(mono(
                format!(": {}", switcher.nested_message),
                th.error_foreground,
            ));
        }
    }

    let content = row(pieces).spacing(0).align_y(iced::Center);
    let wrapped = container(content)
        .width(Length::Fixed(5000.0))
        .height(Length::Fixed(ROW_HEIGHT));

    match line.issue.as_ref().map(|_| th.error_background) {
        Some(color) => wrapped
            .style(move |_theme| container::Style {
                background: Some(color.into()),
                ..Default::default()
            })
            .into(),
        None => wrapped.into(),
    }
}

/// Ellipsis toggle style; the control keeping logical focus after a
/// toggle gets a visible outline.
fn truncation_style(
    theme: Theme,
    focused: bool,
) -> impl Fn(&iced::Theme, ButtonStatus) -> button::Style {
    move |_theme: &iced::Theme, status: ButtonStatus| {
        let background = match status {
            ButtonStatus::Hovered | ButtonStatus::Pressed => theme.error_background,
            _ => theme.truncation_background,
        };

        button::Style {
            background: Some(background.into()),
            text_color: theme.truncation,
            border: Border {
                color: if focused {
                    theme.error_foreground
                } else {
                    theme.truncation_background
                },
                width: 1.0,
                radius: Radius::from(4.0),
            },
            shadow: Shadow::default(),
            snap: true,
        }
    }
}

/// Union prev/next buttons; disabled buttons render hollow.
fn switcher_style(theme: Theme) -> impl Fn(&iced::Theme, ButtonStatus) -> button::Style {
    move |_theme: &iced::Theme, status: ButtonStatus| {
        let (background, text_color) = match status {
            ButtonStatus::Disabled => (theme.background, theme.truncation),
            _ => (theme.error_foreground, theme.background),
        };

        button::Style {
            background: Some(background.into()),
            text_color,
            border: Border {
                color: theme.error_foreground,
                width: 1.0,
                radius: Radius::from(2.0),
            },
            shadow: Shadow::default(),
            snap: true,
        }
    }
}
