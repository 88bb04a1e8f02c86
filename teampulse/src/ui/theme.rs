//! Theme and styling for the TUI.
//!
//! Unlike a fixed palette, Team Pulse carries two palettes and picks one
//! from the store's dark-mode flag each frame.

use ratatui::style::{Color, Modifier, Style};

use teampulse_model::member::MemberStatus;

/// A resolved color palette plus style helpers.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Secondary foreground color (dimmed text).
    pub fg_dim: Color,
    /// Accent color for the app title and active toggles.
    pub accent: Color,
    /// Highlight color for focused panel borders and selections.
    pub highlight: Color,
    /// Working status color.
    pub working: Color,
    /// Break status color.
    pub on_break: Color,
    /// Meeting status color.
    pub meeting: Color,
    /// Offline status color.
    pub offline: Color,
    /// Error text color.
    pub error: Color,
    /// Status bar background.
    pub bar_bg: Color,
}

impl Theme {
    /// The light palette (default).
    #[must_use]
    pub const fn light() -> Self {
        Self {
            fg: Color::Black,
            fg_dim: Color::DarkGray,
            accent: Color::Blue,
            highlight: Color::Cyan,
            working: Color::Green,
            on_break: Color::Yellow,
            meeting: Color::Blue,
            offline: Color::Gray,
            error: Color::Red,
            bar_bg: Color::Rgb(220, 220, 230),
        }
    }

    /// The dark palette.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            fg: Color::White,
            fg_dim: Color::Gray,
            accent: Color::LightBlue,
            highlight: Color::Cyan,
            working: Color::LightGreen,
            on_break: Color::LightYellow,
            meeting: Color::LightBlue,
            offline: Color::DarkGray,
            error: Color::LightRed,
            bar_bg: Color::Rgb(30, 30, 50),
        }
    }

    /// Picks the palette for the given dark-mode flag.
    #[must_use]
    pub const fn for_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::dark() } else { Self::light() }
    }

    /// The indicator color for a member status.
    #[must_use]
    pub const fn status_color(&self, status: MemberStatus) -> Color {
        match status {
            MemberStatus::Working => self.working,
            MemberStatus::Break => self.on_break,
            MemberStatus::Meeting => self.meeting,
            MemberStatus::Offline => self.offline,
        }
    }

    /// Normal text style.
    #[must_use]
    pub fn normal(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// Dimmed text style (metadata, help text).
    #[must_use]
    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    /// Bold text style.
    #[must_use]
    pub fn bold(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    /// Accent style for titles and active toggles.
    #[must_use]
    pub fn accented(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Highlighted style (focused panel borders).
    #[must_use]
    pub fn highlighted(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected item style (in lists).
    #[must_use]
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Error text style.
    #[must_use]
    pub fn error_text(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    /// Style for the status bar background.
    #[must_use]
    pub fn status_bar_bg(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bar_bg)
    }

    /// Border style for a panel, highlighted when focused.
    #[must_use]
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.highlighted()
        } else {
            self.normal()
        }
    }
}
