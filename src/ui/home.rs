use ratatui::prelude::*;
use ratatui::widgets::*;

const BANNER: &str = r#"
 ╔═══════════════════════════════════════════════════════════════════════╗
 ║   ██████╗ █████╗ ██╗     ███╗   ███╗ ██████╗ █████╗ ██████╗ ███████╗  ║
 ║  ██╔════╝██╔══██╗██║     ████╗ ████║██╔════╝██╔══██╗██╔══██╗██╔════╝  ║
 ║  ██║     ███████║██║     ██╔████╔██║██║     ███████║██║  ██║█████╗    ║
 ║  ██║     ██╔══██║██║     ██║╚██╔╝██║██║     ██╔══██║██║  ██║██╔══╝    ║
 ║  ╚██████╗██║  ██║███████╗██║ ╚═╝ ██║╚██████╗██║  ██║██████╔╝███████╗  ║
 ║   ╚═════╝╚═╝  ╚═╝╚══════╝╚═╝     ╚═╝ ╚═════╝╚═╝  ╚═╝╚═════╝ ╚══════╝  ║
 ╚═══════════════════════════════════════════════════════════════════════╝"#;

const KEY: Color = Color::Rgb(80, 200, 255);
const LABEL: Color = Color::Rgb(140, 140, 140);
const HEADING: Color = Color::Rgb(255, 220, 80);
const FRAME: Color = Color::Rgb(60, 150, 200);
const TITLE: Color = Color::Rgb(200, 120, 255);

struct GameTile {
    key: &'static str,
    icon: &'static str,
    name: &'static str,
    desc: &'static str,
    color: Color,
    border_color: Color,
    controls: &'static [(&'static str, &'static str)],
}

const GAME_TILES: [GameTile; 3] = [
    GameTile {
        key: "1",
        icon: "💣",
        name: "Minesweeper",
        desc: "Clear the field,\nmind the mines.",
        color: Color::Rgb(120, 200, 110),
        border_color: Color::Rgb(60, 110, 55),
        controls: &[
            ("←↑↓→ / WASD", "Move cursor"),
            ("Enter / Click", "Reveal cell"),
            ("F / Right click", "Flag cell"),
            ("Space / P", "Pause, or new game when over"),
            ("N", "New game"),
        ],
    },
    GameTile {
        key: "2",
        icon: "🐍",
        name: "Snake",
        desc: "Eat, grow, and\nkeep off the walls.",
        color: Color::Rgb(100, 220, 120),
        border_color: Color::Rgb(50, 120, 60),
        controls: &[
            ("←↑↓→ / WASD", "Steer"),
            ("Space / P", "Pause, or play again when over"),
            ("R", "Restart"),
        ],
    },
    GameTile {
        key: "3",
        icon: "🧱",
        name: "Tetris",
        desc: "Stack pieces and\nclear full lines.",
        color: Color::Rgb(160, 120, 255),
        border_color: Color::Rgb(80, 60, 140),
        controls: &[
            ("← → / A D", "Move piece"),
            ("↑ / W", "Rotate"),
            ("↓ / S", "Soft drop"),
            ("Space / P", "Pause, or play again when over"),
            ("R", "Restart"),
        ],
    },
];

fn key_line(key: &'static str, label: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {:<18}", key), Style::default().fg(KEY)),
        Span::styled(label, Style::default().fg(LABEL)),
    ])
}

fn panel(title: String, accent: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(FRAME))
        .title(title)
        .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
}

fn render_game_tile(frame: &mut Frame, area: Rect, tile: &GameTile, best: u32, selected: bool) {
    let border_color = if selected { HEADING } else { tile.border_color };
    let border_type = if selected { BorderType::Double } else { BorderType::Rounded };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let name_color = if selected { Color::White } else { tile.color };
    let desc_color = if selected { Color::Rgb(180, 180, 200) } else { Color::Rgb(120, 120, 140) };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("[{}] ", tile.key), Style::default().fg(HEADING).add_modifier(Modifier::BOLD)),
        Span::styled(format!("{} ", tile.icon), Style::default()),
        Span::styled(tile.name, Style::default().fg(name_color).add_modifier(Modifier::BOLD)),
    ])];
    lines.extend(
        tile.desc
            .split('\n')
            .map(|desc| Line::from(Span::styled(desc, Style::default().fg(desc_color)))),
    );
    lines.push(Line::from(Span::styled(
        format!("🏆 {}", best),
        Style::default().fg(Color::Cyan),
    )));
    if selected {
        lines.push(Line::from(Span::styled(
            "▶ Enter to play",
            Style::default().fg(HEADING).add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn navigation_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            "  🔧 Navigation",
            Style::default().fg(HEADING).add_modifier(Modifier::BOLD),
        )),
        key_line("Tab / Shift+Tab", "Switch tabs"),
        key_line("1-3", "Launch game"),
        key_line("← →", "Select game"),
        key_line("Enter", "Play selected"),
        key_line("Esc", "Return to Home"),
        key_line("q / Ctrl+C", "Quit"),
    ]
}

fn game_control_lines(tile: &GameTile) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {} {}", tile.icon, tile.name),
            Style::default().fg(tile.color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(tile.controls.iter().map(|&(key, label)| key_line(key, label)));
    lines
}

/// `best` holds the session high score of each game, in tile order.
pub fn render_home(frame: &mut Frame, area: Rect, selected_game: usize, best: [u32; 3]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Banner
            Constraint::Length(2),  // Subtitle
            Constraint::Length(9),  // Game tiles
            Constraint::Min(9),     // Controls
            Constraint::Length(1),  // Footer
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(KEY))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let subtitle = Paragraph::new(Line::from(Span::styled(
        "  🌿 Take a short break  🌿  ",
        Style::default().fg(HEADING).add_modifier(Modifier::BOLD | Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    let games_block = panel(" 🎮 Games: ←→ Select, Enter to Play ".to_string(), TITLE);
    let games_inner = games_block.inner(chunks[2]);
    frame.render_widget(games_block, chunks[2]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
        .split(games_inner);
    for (i, tile) in GAME_TILES.iter().enumerate() {
        render_game_tile(frame, cols[i], tile, best[i], selected_game == i);
    }

    let ctrl_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[3]);

    let navigation = Paragraph::new(navigation_lines()).block(panel(" ⌨ Navigation ".to_string(), TITLE));
    frame.render_widget(navigation, ctrl_cols[0]);

    let tile = &GAME_TILES[selected_game.min(GAME_TILES.len() - 1)];
    let game_ctrl = Paragraph::new(game_control_lines(tile))
        .block(panel(format!(" 🎮 {} Controls ", tile.name), tile.color));
    frame.render_widget(game_ctrl, ctrl_cols[1]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("🦀 ", Style::default().fg(Color::Rgb(255, 100, 50))),
        Span::styled(
            concat!("v", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Rgb(80, 80, 100)),
        ),
        Span::styled("  │  ", Style::default().fg(Color::Rgb(40, 40, 60))),
        Span::styled(
            "High scores last for this session",
            Style::default().fg(Color::Rgb(100, 100, 130)),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[4]);
}
