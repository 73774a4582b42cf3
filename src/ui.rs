use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use typeclock::{scorer::CharStatus, session::Phase, util::format_time};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const SUMMARY_HEIGHT: u16 = 3;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);

        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);

        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);

        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let prompt_width = session.reference().width();
        let prompt_occupied_lines = if prompt_width <= max_chars_per_line as usize {
            1
        } else {
            let lines = (prompt_width as f64 / max_chars_per_line as f64).ceil() + 1.0;
            lines.min(u16::MAX as f64) as u16
        };

        let summary_lines = if session.phase() == Phase::Finished {
            SUMMARY_HEIGHT
        } else {
            0
        };

        // countdown, metrics, gap, prompt, gap, summary, legend
        let content_height = prompt_occupied_lines.saturating_add(5 + summary_lines);
        let top_padding = area.height.saturating_sub(content_height) / 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(top_padding),
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Length(prompt_occupied_lines),
                    Constraint::Length(1),
                    Constraint::Length(summary_lines),
                    Constraint::Length(1),
                    Constraint::Min(0),
                ]
                .as_ref(),
            )
            .split(area);

        let countdown_style = match session.phase() {
            Phase::Running if session.seconds_remaining() <= 10.0 => {
                Style::default().patch(bold_style).fg(Color::Yellow)
            }
            Phase::Running => bold_style,
            _ => dim_bold_style,
        };
        let countdown = Paragraph::new(Line::from(vec![
            Span::styled(format_time(session.seconds_remaining()), countdown_style),
            Span::styled(format!("   {} test", self.settings.duration), italic_style),
        ]))
        .alignment(Alignment::Center);
        countdown.render(chunks[1], buf);

        let metrics = session.metrics();
        let live = Paragraph::new(Span::styled(
            format!(
                "{} wpm   {} cpm   {}% acc   {} err",
                metrics.wpm, metrics.cpm, metrics.accuracy, metrics.errors
            ),
            bold_style,
        ))
        .alignment(Alignment::Center);
        live.render(chunks[2], buf);

        let score = session.score();
        let spans = session
            .reference()
            .chars()
            .zip(score.statuses.iter())
            .enumerate()
            .map(|(idx, (expected, status))| {
                let mut style = match status {
                    CharStatus::Correct => green_bold_style,
                    CharStatus::Incorrect => red_bold_style,
                    CharStatus::Untyped | CharStatus::Current => dim_bold_style,
                };
                if score.cursor == Some(idx) && session.is_input_enabled() {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }

                let text = match (status, expected) {
                    (CharStatus::Incorrect, ' ') => "·".to_owned(),
                    (_, c) => c.to_string(),
                };
                Span::styled(text, style)
            })
            .collect::<Vec<Span>>();

        let prompt = Paragraph::new(Line::from(spans))
            .alignment(if prompt_occupied_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true });
        prompt.render(chunks[4], buf);

        if let Some(summary) = session.summary() {
            let panel = Paragraph::new(Span::styled(
                format!(
                    "{} wpm   {} cpm   {}% acc   {} errors",
                    summary.wpm, summary.cpm, summary.accuracy, summary.errors
                ),
                bold_style,
            ))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Results")
                    .border_style(Style::default().fg(Color::Magenta)),
            )
            .alignment(Alignment::Center);
            panel.render(chunks[6], buf);
        }

        let legend = Paragraph::new(Span::styled(legend_for(session.phase()), italic_style))
            .alignment(Alignment::Center);
        legend.render(chunks[7], buf);
    }
}

pub fn legend_for(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "(enter) start / (tab) duration / (esc) new text / (ctrl+c) quit",
        Phase::Running => "(esc) restart / (ctrl+c) quit",
        Phase::Finished => "(r)etry / (esc) new text / (q)uit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_varies_by_phase() {
        assert!(legend_for(Phase::Idle).contains("(tab) duration"));
        assert!(!legend_for(Phase::Running).contains("(tab)"));
        assert!(legend_for(Phase::Finished).contains("(r)etry"));
    }
}
