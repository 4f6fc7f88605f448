use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::Theme;
use crate::listing::page::PageRequest;
use crate::listing::render::{page_window, summary};
use crate::ui::Component;

/// Footer under a list: "Showing x to y of z", page buttons and page size.
#[derive(Debug, Clone, Default)]
pub struct Pager {
    total_count: usize,
    total_pages: usize,
    page: PageRequest,
}

impl Pager {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn update(&mut self, total_count: usize, total_pages: usize, page: PageRequest) {
        self.total_count = total_count;
        self.total_pages = total_pages;
        self.page = page;
    }

    fn buttons(&self, theme: &Theme) -> Vec<Span<'static>> {
        let muted = Style::default().fg(theme.overlay0());
        let normal = Style::default().fg(theme.subtext1());
        let current = Style::default()
            .fg(theme.base())
            .bg(theme.lavender())
            .add_modifier(Modifier::BOLD);

        let first = self.page.number <= 1;
        let last = self.page.number >= self.total_pages;

        let mut spans = vec![
            Span::styled("« ", if first { muted } else { normal }),
            Span::styled("‹ ", if first { muted } else { normal }),
        ];
        for n in page_window(self.page.number, self.total_pages) {
            let style = if n == self.page.number { current } else { normal };
            spans.push(Span::styled(format!(" {n} "), style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled("› ", if last { muted } else { normal }));
        spans.push(Span::styled("»", if last { muted } else { normal }));
        spans
    }
}

impl Component for Pager {
    type Output = ();

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [left, middle, right] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(40),
            Constraint::Length(16),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(summary(self.total_count, self.page))
                .style(Style::default().fg(theme.subtext0())),
            left,
        );
        frame.render_widget(
            Paragraph::new(Line::from(self.buttons(theme))).centered(),
            middle,
        );
        frame.render_widget(
            Paragraph::new(format!("{} per page", self.page.size))
                .style(Style::default().fg(theme.subtext0()))
                .right_aligned(),
            right,
        );
    }
}
