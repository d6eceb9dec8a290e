use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    session::{CharClass, Completion},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const PANEL_WIDTH: u16 = 32;
const PANEL_HEIGHT: u16 = 7;

fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn class_style(class: CharClass) -> Style {
    let dim_bold_style = bold_style().add_modifier(Modifier::DIM);
    match class {
        CharClass::Correct => bold_style().fg(Color::Green),
        CharClass::Incorrect => bold_style().fg(Color::Red),
        CharClass::Current => dim_bold_style.add_modifier(Modifier::UNDERLINED),
        CharClass::Untyped => dim_bold_style,
    }
}

/// Mistyped spaces would be invisible, so they get a visible stand-in
fn display_char(c: char, class: CharClass) -> char {
    match (c, class) {
        (' ', CharClass::Incorrect) => '·',
        _ => c,
    }
}

/// Target text as spans, one per run of equally classified characters
pub fn prompt_spans(app: &App) -> Vec<Span<'static>> {
    let classes = app.session.classifications();
    let runs = app
        .session
        .target_text()
        .iter()
        .zip(classes.iter())
        .chunk_by(|(_, class)| **class);

    let spans = (&runs)
        .into_iter()
        .map(|(class, run)| {
            let text: String = run.map(|(c, _)| display_char(*c, class)).collect();
            Span::styled(text, class_style(class))
        })
        .collect();
    spans
}

fn stats_line(app: &App) -> String {
    let stats = app.session.live_stats();
    let mut line = format!(
        "{} chars   {} errors   {}% acc",
        stats.char_count, stats.error_count, stats.accuracy
    );
    let to_fix = app.session.current_mismatches();
    if to_fix > 0 {
        line.push_str(&format!("   {} to fix", to_fix));
    }
    line
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_completion(done: &Completion, area: Rect, buf: &mut Buffer) {
    let panel = centered_rect(PANEL_WIDTH, PANEL_HEIGHT, area);
    Clear.render(panel, buf);

    let lines = vec![
        Line::from(Span::styled(format!("Accuracy: {}%", done.accuracy), bold_style())),
        Line::from(Span::styled(format!("Errors: {}", done.errors), bold_style())),
        Line::from(""),
        Line::from(Span::styled(
            "(r)eset / (esc)ape",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Test Complete!")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Center)
        .render(panel, buf);
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let prompt: String = self.session.target_text().iter().collect();
        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let prompt_width = prompt.width();
        let prompt_occupied_lines = if prompt_width <= max_chars_per_line as usize {
            1
        } else {
            (prompt_width as f64 / max_chars_per_line as f64).ceil() as u16 + 1
        };

        let padding = area
            .height
            .saturating_sub(prompt_occupied_lines + VERTICAL_MARGIN * 2 + 4)
            / 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1),                     // source
                Constraint::Length(padding),               // padding
                Constraint::Length(prompt_occupied_lines), // prompt
                Constraint::Length(1),                     // padding
                Constraint::Length(1),                     // stats
                Constraint::Min(0),                        // padding
                Constraint::Length(1),                     // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            format!("text: {}", self.source_label),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        ))
        .render(chunks[0], buf);

        Paragraph::new(Line::from(prompt_spans(self)))
            .alignment(if prompt_occupied_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);

        Paragraph::new(Span::styled(stats_line(self), bold_style()))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        Paragraph::new(Span::styled("(ctrl+r) reset / (esc) quit", italic_style))
            .render(chunks[6], buf);

        if let Some(done) = &self.completion {
            render_completion(done, area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update::Message;

    fn rendered(app: &App, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        Widget::render(app, area, &mut buffer);

        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .join("\n")
    }

    fn typed(target: &str, input: &str) -> App {
        let mut app = App::new(target, "test source");
        app.dispatch(Message::Edit(input.to_string()));
        app
    }

    #[test]
    fn test_ui_in_progress_shows_prompt_and_stats() {
        let app = typed("hello world", "hel");
        let screen = rendered(&app, 80, 24);

        assert!(screen.contains("hello world"));
        assert!(screen.contains("3 chars   0 errors   100% acc"));
        assert!(screen.contains("text: test source"));
        assert!(screen.contains("(ctrl+r) reset / (esc) quit"));
        assert!(!screen.contains("Test Complete!"));
    }

    #[test]
    fn test_ui_shows_to_fix_hint() {
        let app = typed("hello", "hx");
        let screen = rendered(&app, 80, 24);

        assert!(screen.contains("2 chars   1 errors   50% acc   1 to fix"));
    }

    #[test]
    fn test_prompt_spans_group_by_class() {
        let app = typed("cat dog", "cbt");
        let spans = prompt_spans(&app);
        let parts: Vec<(String, Style)> = spans
            .iter()
            .map(|s| (s.content.to_string(), s.style))
            .collect();

        assert_eq!(
            parts,
            vec![
                ("c".to_string(), class_style(CharClass::Correct)),
                ("a".to_string(), class_style(CharClass::Incorrect)),
                ("t".to_string(), class_style(CharClass::Correct)),
                (" ".to_string(), class_style(CharClass::Current)),
                ("dog".to_string(), class_style(CharClass::Untyped)),
            ]
        );
    }

    #[test]
    fn test_incorrect_space_is_visible() {
        let app = typed("a b", "axx");
        let spans = prompt_spans(&app);

        assert_eq!(spans[1].content, "·b");
    }

    #[test]
    fn test_completion_panel() {
        let app = typed("cat", "cbt");
        let screen = rendered(&app, 80, 24);

        assert!(screen.contains("Test Complete!"));
        assert!(screen.contains("Accuracy: 67%"));
        assert!(screen.contains("Errors: 1"));
        assert!(screen.contains("(r)eset / (esc)ape"));
    }

    #[test]
    fn test_ui_long_prompt_wraps() {
        let text = "word ".repeat(40);
        let app = typed(text.trim(), "wo");
        let screen = rendered(&app, 40, 20);

        assert!(screen.contains("word word"));
    }

    #[test]
    fn test_ui_tiny_areas_do_not_panic() {
        let app = typed("cat", "cbt");
        for (w, h) in [(1, 1), (5, 2), (10, 3), (200, 60)] {
            let area = Rect::new(0, 0, w, h);
            let mut buffer = Buffer::empty(area);
            Widget::render(&app, area, &mut buffer);
            assert_eq!(*buffer.area(), area);
        }
    }

    #[test]
    fn test_ui_constants() {
        assert_eq!(HORIZONTAL_MARGIN, 5);
        assert_eq!(VERTICAL_MARGIN, 1);
    }
}
