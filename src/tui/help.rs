use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("tab", Style::default().fg(Color::Magenta)),
            Span::raw("        Switch tabs"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("enter", Style::default().fg(Color::Magenta)),
            Span::raw("      Analyze"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("up/down", Style::default().fg(Color::Magenta)),
            Span::raw("    Move between feature fields"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("Ctrl-R", Style::default().fg(Color::Magenta)),
            Span::raw("     Reset form and results"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("Ctrl-C", Style::default().fg(Color::Magenta)),
            Span::raw("     Quit ("),
            Span::styled("q", Style::default().fg(Color::Magenta)),
            Span::raw(" also quits from this tab)"),
        ]),
        Line::from(""),
        Line::from("Check by Username looks the account up server-side and"),
        Line::from("shows the derived profile metrics next to the verdict."),
        Line::from("Check by Features sends the five profile statistics you"),
        Line::from("enter and shows the verdict only."),
        Line::from(""),
        Line::from("Feature fields accept digits only; the submit request is"),
        Line::from("sent once per press, with no automatic retries."),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
