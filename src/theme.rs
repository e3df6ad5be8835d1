//! Theme system for the error viewer.
//!
//! All colors are type-keyed: every syntactic element of a rendered line
//! can be themed independently. Hosts start from `Theme::light()` or
//! `Theme::dark()` and override individual fields through
//! `ThemeOverride`, merged field-by-field at construction time.

use iced::Color;
use serde::{Deserialize, Serialize};

/// All theme-dependent colors and sizing in one place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub font_size: f32,
    pub line_number: Color,
    pub line_number_background: Color,
    pub string: Color,
    pub number: Color,
    pub boolean: Color,
    pub null: Color,
    pub undefined: Color,
    pub key: Color,
    pub colon: Color,
    pub comma: Color,
    pub bracket: Color,
    pub background: Color,
    pub error_foreground: Color,
    pub error_background: Color,
    pub truncation: Color,
    pub truncation_background: Color,
    pub newline: Color,
}

impl Theme {
    /// The default palette: dark reds and blues on white.
    pub fn light() -> Self {
        Theme {
            font_size: 13.0,
            line_number: Color::BLACK,
            line_number_background: Color::from_rgb(0.94, 0.94, 0.94),
            string: Color::from_rgb(0.58, 0.15, 0.12),
            number: Color::from_rgb(0.24, 0.52, 0.36),
            boolean: Color::from_rgb(0.05, 0.05, 0.96),
            null: Color::from_rgb(0.05, 0.05, 0.96),
            undefined: Color::from_rgb(0.05, 0.05, 0.96),
            key: Color::from_rgb(0.13, 0.31, 0.62),
            colon: Color::from_rgb(0.13, 0.31, 0.62),
            comma: Color::BLACK,
            bracket: Color::from_rgb(0.07, 0.19, 0.94),
            background: Color::WHITE,
            error_foreground: Color::from_rgb(0.78, 0.10, 0.10),
            error_background: Color::from_rgb(1.0, 0.94, 0.94),
            truncation: Color::from_rgb(0.38, 0.38, 0.38),
            truncation_background: Color::from_rgb(0.93, 0.95, 1.0),
            newline: Color::from_rgb(0.85, 0.18, 0.13),
        }
    }

    /// Bright-on-dark palette.
    pub fn dark() -> Self {
        Theme {
            font_size: 13.0,
            line_number: Color::from_rgb(0.6, 0.6, 0.6),
            line_number_background: Color::from_rgb(0.15, 0.15, 0.15),
            string: Color::from_rgb(0.6, 0.8, 0.5),
            number: Color::from_rgb(0.9, 0.7, 0.4),
            boolean: Color::from_rgb(0.8, 0.5, 0.7),
            null: Color::from_rgb(0.6, 0.6, 0.6),
            undefined: Color::from_rgb(0.6, 0.6, 0.6),
            key: Color::from_rgb(0.4, 0.7, 0.9),
            colon: Color::from_rgb(0.4, 0.7, 0.9),
            comma: Color::from_rgb(0.7, 0.7, 0.7),
            bracket: Color::from_rgb(0.7, 0.7, 0.7),
            background: Color::from_rgb(0.12, 0.12, 0.12),
            error_foreground: Color::from_rgb(0.95, 0.45, 0.45),
            error_background: Color::from_rgb(0.25, 0.11, 0.11),
            truncation: Color::from_rgb(0.65, 0.65, 0.65),
            truncation_background: Color::from_rgb(0.2, 0.22, 0.28),
            newline: Color::from_rgb(0.9, 0.4, 0.3),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::light()
    }
}

/// Partial theme: every field optional. Unset fields fall back to the
/// base theme when applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeOverride {
    pub font_size: Option<f32>,
    pub line_number: Option<Color>,
    pub line_number_background: Option<Color>,
    pub string: Option<Color>,
    pub number: Option<Color>,
    pub boolean: Option<Color>,
    pub null: Option<Color>,
    pub undefined: Option<Color>,
    pub key: Option<Color>,
    pub colon: Option<Color>,
    pub comma: Option<Color>,
    pub bracket: Option<Color>,
    pub background: Option<Color>,
    pub error_foreground: Option<Color>,
    pub error_background: Option<Color>,
    pub truncation: Option<Color>,
    pub truncation_background: Option<Color>,
    pub newline: Option<Color>,
}

impl ThemeOverride {
    /// Merge over `base`, field by field.
    pub fn apply(&self, base: Theme) -> Theme {
        Theme {
            font_size: self.font_size.unwrap_or(base.font_size),
            line_number: self.line_number.unwrap_or(base.line_number),
            line_number_background: self
                .line_number_background
                .unwrap_or(base.line_number_background),
            string: self.string.unwrap_or(base.string),
            number: self.number.unwrap_or(base.number),
            boolean: self.boolean.unwrap_or(base.boolean),
            null: self.null.unwrap_or(base.null),
            undefined: self.undefined.unwrap_or(base.undefined),
            key: self.key.unwrap_or(base.key),
            colon: self.colon.unwrap_or(base.colon),
            comma: self.comma.unwrap_or(base.comma),
            bracket: self.bracket.unwrap_or(base.bracket),
            background: self.background.unwrap_or(base.background),
            error_foreground: self.error_foreground.unwrap_or(base.error_foreground),
            error_background: self.error_background.unwrap_or(base.error_background),
            truncation: self.truncation.unwrap_or(base.truncation),
            truncation_background: self
                .truncation_background
                .unwrap_or(base.truncation_background),
            newline: self.newline.unwrap_or(base.newline),
        }
    }
}

/// Persisted theme choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn theme(self) -> Theme {
        match self {
            ThemePreference::Light => Theme::light(),
            ThemePreference::Dark => Theme::dark(),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}
