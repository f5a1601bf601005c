use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::ui::theme::Theme;

/// Rounded panel used by every dashboard section.
pub struct Card<'a> {
    title: &'a str,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            theme,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn block(&self) -> Block<'a> {
        let border_color = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };

        Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.theme.accent),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(self.theme.surface))
    }

    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }

    pub fn render_with<W: Widget>(&self, frame: &mut Frame<'_>, area: Rect, content: W) {
        let inner = self.inner(area);
        frame.render_widget(self.block(), area);
        frame.render_widget(content, inner);
    }
}

/// A titled card with one emphasized value and an optional subtitle.
pub struct StatCard<'a> {
    title: &'a str,
    value: Span<'static>,
    subtitle: Option<String>,
    theme: &'a Theme,
}

impl<'a> StatCard<'a> {
    pub fn new(title: &'a str, value: Span<'static>, theme: &'a Theme) -> Self {
        Self {
            title,
            value,
            subtitle: None,
            theme,
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn render(self, frame: &mut Frame<'_>, area: Rect) {
        let value = self.value.patch_style(Style::default().add_modifier(Modifier::BOLD));
        let mut lines = vec![Line::from(value)];
        if let Some(sub) = self.subtitle {
            lines.push(Line::from(Span::styled(
                sub,
                Style::default().fg(self.theme.dim),
            )));
        }

        Card::new(self.title, self.theme).render_with(frame, area, Paragraph::new(lines));
    }
}
