use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::layout::LayoutVariant;
use crate::model::{Dimensions, Theme, WidgetConfig};
use crate::populate::ViewElement;
use crate::relay::RenderedWidget;

const DP_PER_COL: i32 = 6;
const DP_PER_ROW: i32 = 12;

/// Terminal cell size (cols, rows) standing in for a widget of `dims`.
pub fn cells_for(dims: Dimensions) -> (u16, u16) {
    let cols = (dims.min_width / DP_PER_COL).clamp(16, 80);
    let rows = (dims.min_height / DP_PER_ROW).clamp(4, 30);
    (cols as u16, rows as u16)
}

/// Inverse of [`cells_for`], used when the terminal decides the size.
pub fn dims_for(cols: u16, rows: u16) -> Dimensions {
    Dimensions::new(i32::from(cols) * DP_PER_COL, i32::from(rows) * DP_PER_ROW)
}

pub struct WidgetView<'a> {
    rendered: &'a RenderedWidget,
    config: &'a WidgetConfig,
}

impl<'a> WidgetView<'a> {
    pub fn new(rendered: &'a RenderedWidget, config: &'a WidgetConfig) -> Self {
        Self { rendered, config }
    }

    fn lines(&self, max_rows: usize) -> Vec<Line<'a>> {
        let state = &self.rendered.state;
        let palette = Palette::from_theme(&self.config.theme);
        let mut lines = Vec::new();

        if let Some(date) = state.text(ViewElement::Date) {
            lines.push(Line::from(Span::styled(date.to_string(), palette.text)));
        }
        if state.is_shown(ViewElement::Location)
            && let Some(city) = state.text(ViewElement::Location)
        {
            lines.push(Line::from(Span::styled(city.to_string(), palette.muted)));
        }
        if self.rendered.variant == LayoutVariant::Small {
            return lines;
        }

        let list_shown = state.is_shown(ViewElement::MenuList);
        let mut empty_view = None;
        match (state.list, list_shown) {
            (Some(binding), true) if !self.rendered.rows.is_empty() => {
                let reserved = usize::from(state.visibility(ViewElement::MoreItems) == Some(true));
                let room = max_rows.saturating_sub(lines.len() + reserved);
                let cap = binding.visible_cap.unwrap_or(usize::MAX).min(room);
                for row in self.rendered.rows.iter().take(cap) {
                    lines.push(Line::from(vec![
                        Span::styled("• ", palette.accent),
                        Span::styled(row.text.clone(), palette.text),
                    ]));
                }
            }
            // The host swaps in the empty view whenever the bound list has no rows.
            (Some(binding), true) => {
                empty_view = Some(binding.empty_view);
                if let Some(line) = self.element_line(binding.empty_view, &palette) {
                    lines.push(line);
                }
            }
            _ => {}
        }

        for el in [ViewElement::MoreItems, ViewElement::NoData] {
            if state.visibility(el) == Some(true)
                && empty_view != Some(el)
                && let Some(line) = self.element_line(el, &palette)
            {
                lines.push(line);
            }
        }
        lines
    }

    fn element_line(&self, el: ViewElement, palette: &Palette) -> Option<Line<'a>> {
        let state = &self.rendered.state;
        let text = match el {
            ViewElement::NoData => state
                .text(el)
                .unwrap_or(self.config.labels.no_data.as_str())
                .to_string(),
            _ => state.text(el)?.to_string(),
        };
        Some(Line::from(Span::styled(text, palette.muted)))
    }
}

impl Widget for WidgetView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = Palette::from_theme(&self.config.theme);
        let title = self
            .rendered
            .state
            .text(ViewElement::MealType)
            .unwrap_or(self.config.labels.widget_name.as_str())
            .to_string();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(palette.accent)
            .style(palette.base)
            .title(Span::styled(title, palette.title));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = self.lines(usize::from(inner.height));
        Paragraph::new(lines).style(palette.base).render(inner, buf);
    }
}

/// Draws `rendered` off-screen and returns the text rows, right-trimmed.
pub fn render_to_lines(
    rendered: &RenderedWidget,
    config: &WidgetConfig,
    cols: u16,
    rows: u16,
) -> Vec<String> {
    let area = Rect::new(0, 0, cols, rows);
    let mut buf = Buffer::empty(area);
    WidgetView::new(rendered, config).render(area, &mut buf);

    (0..rows)
        .map(|y| {
            let line: String = (0..cols)
                .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
                .collect();
            line.trim_end().to_string()
        })
        .collect()
}

struct Palette {
    base: Style,
    text: Style,
    muted: Style,
    accent: Style,
    title: Style,
}

impl Palette {
    fn from_theme(theme: &Theme) -> Self {
        let bg = parse_hex_color(&theme.background_color).unwrap_or(Color::Reset);
        let fg = parse_hex_color(&theme.text_color).unwrap_or(Color::Reset);
        let accent = parse_hex_color(&theme.accent_color).unwrap_or(Color::Yellow);
        Self {
            base: Style::default().bg(bg).fg(fg),
            text: Style::default().fg(fg),
            muted: Style::default().fg(Color::Gray),
            accent: Style::default().fg(accent),
            title: Style::default().fg(accent).add_modifier(Modifier::BOLD),
        }
    }
}

pub fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
