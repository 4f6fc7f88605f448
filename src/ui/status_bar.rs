use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::Theme;
use crate::config::{GlobalAction, KeyResolver, NavAction};
use crate::ui::Keybinding;

/// Lines inside the border.
pub const STATUS_BAR_HEIGHT: u16 = 4;

const LOGO: &[&str] = &[
    r"   ___________   ",
    r"  /  campus  /|  ",
    r" /___desk___/ /  ",
    r" |__________|/   ",
];

pub struct StatusBar {
    api_host: String,
    resolver: Arc<KeyResolver>,
}

impl StatusBar {
    pub fn new(api_host: impl Into<String>, resolver: Arc<KeyResolver>) -> Self {
        Self {
            api_host: api_host.into(),
            resolver,
        }
    }

    pub fn render_with_keybindings(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        breadcrumbs: &[String],
        local_keybindings: &[Keybinding],
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [status, hints, logo] = Layout::horizontal([
            Constraint::Length(36),
            Constraint::Min(20),
            Constraint::Length(18),
        ])
        .areas(inner);

        self.render_status(frame, status, theme, breadcrumbs);
        self.render_hints(frame, hints, theme, local_keybindings);
        Self::render_logo(frame, logo, theme);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, theme: &Theme, breadcrumbs: &[String]) {
        let w = area.width as usize;
        let label_style = Style::default().fg(theme.overlay1());
        let value_style = Style::default().fg(theme.text());

        let location = if breadcrumbs.is_empty() {
            "Home".to_string()
        } else {
            breadcrumbs.join(" › ")
        };

        let lines = vec![
            Line::from(Span::styled(
                truncate_str(&location, w),
                Style::default()
                    .fg(theme.lavender())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            status_line("api", &self.api_host, w, label_style, value_style),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_hints(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        local_keybindings: &[Keybinding],
    ) {
        let global = self.global_keybindings();
        let hints: Vec<&Keybinding> = local_keybindings
            .iter()
            .chain(global.iter())
            .filter(|kb| kb.hint)
            .collect();
        if hints.is_empty() {
            return;
        }

        // Widths from the content so the separators line up.
        let key_w = hints.iter().map(|kb| kb.key.chars().count()).max().unwrap_or(1);
        let desc_w = hints
            .iter()
            .map(|kb| kb.description.chars().count())
            .max()
            .unwrap_or(1);
        let col_width = u16::try_from(key_w + 3 + desc_w + 2).unwrap_or(u16::MAX);
        let num_cols = (area.width / col_width).max(1) as usize;
        let num_rows = (area.height as usize).max(1);

        let mut columns: Vec<Vec<Line>> = vec![Vec::new(); num_cols];
        for (i, kb) in hints.iter().enumerate() {
            let col = i / num_rows;
            if col >= num_cols {
                break;
            }
            columns[col].push(Line::from(vec![
                Span::styled(format!("{:>key_w$}", kb.key), Style::default().fg(theme.peach())),
                Span::styled(" │ ", Style::default().fg(theme.border())),
                Span::styled(kb.description.clone(), Style::default().fg(theme.subtext0())),
            ]));
        }

        let areas = Layout::horizontal(vec![Constraint::Length(col_width); num_cols]).split(area);
        for (lines, col_area) in columns.into_iter().zip(areas.iter()) {
            frame.render_widget(Paragraph::new(lines), *col_area);
        }
    }

    fn render_logo(frame: &mut Frame, area: Rect, theme: &Theme) {
        let lines: Vec<Line> = LOGO
            .iter()
            .map(|line| {
                Line::from(Span::styled(
                    *line,
                    Style::default()
                        .fg(theme.mauve())
                        .add_modifier(Modifier::BOLD),
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    /// Bindings that work everywhere, for the hints and the help overlay.
    pub fn global_keybindings(&self) -> Vec<Keybinding> {
        vec![
            Keybinding::hint(self.resolver.display_global(GlobalAction::Help), "Help"),
            Keybinding::hint(self.resolver.display_global(GlobalAction::Back), "Back"),
            Keybinding::new(self.resolver.display_global(GlobalAction::Theme), "Theme"),
            Keybinding::new(self.resolver.display_global(GlobalAction::Quit), "Quit"),
            Keybinding::new(
                format!(
                    "{}/{}",
                    self.resolver.display_nav(NavAction::Up),
                    self.resolver.display_nav(NavAction::Down)
                ),
                "Navigate",
            ),
        ]
    }
}

fn status_line<'a>(
    label: &'a str,
    value: &str,
    max_width: usize,
    label_style: Style,
    value_style: Style,
) -> Line<'a> {
    const LABEL_W: usize = 6;
    let available = max_width.saturating_sub(LABEL_W + 1);
    Line::from(vec![
        Span::styled(format!("{label:>LABEL_W$}"), label_style),
        Span::raw(" "),
        Span::styled(truncate_str(value, available), value_style),
    ])
}

/// Truncate to `max_width` characters, ending in "..." when cut.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width > 3 {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{kept}...")
    } else {
        s.chars().take(max_width).collect()
    }
}
