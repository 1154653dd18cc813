use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Tab};

const ACTIVE: Color = Color::Rgb(255, 220, 80);
const IDLE: Color = Color::Rgb(120, 120, 140);

/// One tab title. Game tabs carry their current score, and a cross once
/// that game has ended.
fn tab_title(app: &App, tab: Tab) -> Line<'static> {
    let style = if tab == app.current_tab {
        Style::default().fg(ACTIVE).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(IDLE)
    };

    let mut spans = vec![Span::styled(tab.title(), style)];
    if let Some(game) = app.game(tab) {
        let (marker, color) = if game.is_game_over() {
            ("✖", Color::Rgb(220, 80, 80))
        } else {
            ("•", Color::Rgb(80, 200, 120))
        };
        spans.push(Span::styled(format!("{} {} ", marker, game.get_score()), Style::default().fg(color)));
    }
    Line::from(spans)
}

pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all().iter().map(|&tab| tab_title(app, tab)).collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
                .border_type(BorderType::Rounded)
                .title(" 🌿 Calmcade ")
                .title_style(Style::default().fg(Color::Rgb(120, 220, 160)).add_modifier(Modifier::BOLD)),
        )
        .select(app.current_tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(ACTIVE).add_modifier(Modifier::BOLD))
        .divider(Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 80))));

    frame.render_widget(tabs, area);
}
