use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::App;
use crate::state::app_state::{DashboardState, DashboardStats, SortField};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use frag_api::Game;

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            layout.update(f.area());

            let dashboard = &app.state.dashboard;
            draw_stat_cards(f, layout.stat_cards, &dashboard.stats());
            draw_search_bar(f, layout.search_bar, dashboard);

            if let Some(expanded_id) = dashboard.expanded.clone() {
                let (table_area, detail_area) = LayoutAreas::split_for_detail(layout.main);
                draw_games_table(f, table_area, dashboard);
                draw_detail_panel(f, detail_area, dashboard, &expanded_id);
            } else {
                draw_games_table(f, layout.main, dashboard);
            }

            draw_legend(f, layout.legend, loading);

            if app.state.show_logs {
                draw_log_pane(f, layout.main);
            }

            draw_loading_spinner(f, f.area(), loading);
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

// ---------------------------------------------------------------------------
// Summary cards
// ---------------------------------------------------------------------------

fn draw_stat_cards(f: &mut Frame, cards: [Rect; 4], stats: &DashboardStats) {
    let values = [
        (" Games ", stats.games.to_string(), Color::Cyan),
        (" Total Kills ", stats.total_kills.to_string(), Color::Red),
        (" Players ", stats.distinct_players.to_string(), Color::Green),
        (" World Kills ", stats.world_kills.to_string(), Color::Yellow),
    ];

    for (area, (title, value, color)) in cards.into_iter().zip(values) {
        let card = Paragraph::new(value)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .block(default_border(Color::DarkGray).title(title));
        f.render_widget(card, area);
    }
}

// ---------------------------------------------------------------------------
// Search bar
// ---------------------------------------------------------------------------

fn draw_search_bar(f: &mut Frame, area: Rect, dashboard: &DashboardState) {
    let (border_color, cursor) = if dashboard.composing {
        (Color::Yellow, "▏")
    } else {
        (Color::DarkGray, "")
    };

    let content = if dashboard.search.is_empty() && !dashboard.composing {
        Line::from(Span::styled(
            "press / to filter by game or player",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(format!("{}{cursor}", dashboard.search))
    };

    let search = Paragraph::new(content).block(default_border(border_color).title(" Search "));
    f.render_widget(search, area);
}

// ---------------------------------------------------------------------------
// Games table
// ---------------------------------------------------------------------------

fn header_cell(dashboard: &DashboardState, field: SortField, key: char) -> Cell<'static> {
    let indicator = match dashboard.sort {
        Some(spec) if spec.field == field => spec.dir.indicator(),
        _ => ' ',
    };
    Cell::from(format!("{} [{key}]{indicator}", field.label()))
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
}

fn draw_games_table(f: &mut Frame, area: Rect, dashboard: &DashboardState) {
    let block = default_border(Color::White).title(" Matches ");
    let visible = dashboard.visible_games();

    if dashboard.games.is_empty() {
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(
            Paragraph::new("No games loaded yet — press r to fetch")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    if visible.is_empty() {
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(
            Paragraph::new(format!("No games match \"{}\"", dashboard.search))
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from(" "),
        header_cell(dashboard, SortField::GameId, '1'),
        header_cell(dashboard, SortField::TotalKills, '2'),
        header_cell(dashboard, SortField::PlayerCount, '3'),
        header_cell(dashboard, SortField::WorldKills, '4'),
    ])
    .height(1);

    let rows: Vec<Row> = visible
        .iter()
        .map(|game| {
            let marker = if dashboard.is_detail_loading(&game.id) {
                Span::styled("…", Style::default().fg(Color::Yellow))
            } else if dashboard.expanded.as_deref() == Some(game.id.as_str()) {
                Span::styled("▾", Style::default().fg(Color::Cyan))
            } else {
                Span::raw("▸")
            };
            Row::new(vec![
                Cell::from(Line::from(marker)),
                Cell::from(game.id.clone()),
                Cell::from(game.total_kills.to_string()),
                Cell::from(game.player_count().to_string()),
                Cell::from(game.world_kills.to_string()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Length(13),
        Constraint::Length(11),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut table_state = TableState::default().with_selected(Some(dashboard.selected));
    f.render_stateful_widget(table, area, &mut table_state);
}

// ---------------------------------------------------------------------------
// Expanded match detail
// ---------------------------------------------------------------------------

fn draw_detail_panel(f: &mut Frame, area: Rect, dashboard: &DashboardState, game_id: &str) {
    let block = default_border(Color::Cyan).title(format!(" {game_id} "));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(game) = dashboard.games.iter().find(|g| g.id == game_id) else {
        f.render_widget(
            Paragraph::new("Match no longer in the list")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    push_scores_section(&mut lines, game);
    push_means_section(&mut lines, game);
    push_ranking_section(&mut lines, game);

    f.render_widget(Paragraph::new(lines), inner);
}

fn section_heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_owned(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))
}

fn push_scores_section(lines: &mut Vec<Line>, game: &Game) {
    lines.push(section_heading("Player scores"));
    let mut scores: Vec<(&str, i64)> = game
        .kills
        .iter()
        .map(|(pid, score)| {
            let name = game.players.get(pid).map(String::as_str).unwrap_or(pid);
            (name, *score)
        })
        .collect();
    scores.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    if scores.is_empty() {
        lines.push(dim_line("  (no score data)"));
    }
    for (name, score) in scores {
        lines.push(Line::from(format!("  {name:<24}{score:>6}")));
    }
    lines.push(Line::default());
}

fn push_means_section(lines: &mut Vec<Line>, game: &Game) {
    lines.push(section_heading("Kills by means"));
    let mut means: Vec<(&str, u32)> = game
        .kills_by_means
        .iter()
        .map(|(label, count)| (label.as_str(), *count))
        .collect();
    means.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    if means.is_empty() {
        lines.push(dim_line("  (no kill data)"));
    }
    for (label, count) in means {
        lines.push(Line::from(format!("  {label:<24}{count:>6}")));
    }
    lines.push(Line::default());
}

fn push_ranking_section(lines: &mut Vec<Line>, game: &Game) {
    lines.push(section_heading("Ranking"));
    if game.ranking.is_empty() {
        lines.push(dim_line("  (no ranking yet — press R to fetch)"));
        return;
    }
    for (position, entry) in game.ranking.iter().enumerate() {
        let rank = MEDALS
            .get(position)
            .map(|m| (*m).to_string())
            .unwrap_or_else(|| format!("{:>2}.", position + 1));
        lines.push(Line::from(format!("  {rank} {:<22}{:>6}", entry.name, entry.score)));
    }
}

fn dim_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_owned(),
        Style::default().fg(Color::DarkGray),
    ))
}

// ---------------------------------------------------------------------------
// Chrome: legend, log pane, spinner
// ---------------------------------------------------------------------------

fn draw_legend(f: &mut Frame, area: Rect, loading: LoadingState) {
    let text = if loading.is_loading {
        "refreshing game list..."
    } else {
        "Keys: j/k=move  Enter=details  r=refresh  R=ranking  /=search  1-4=sort  \"=logs  q=quit"
    };
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn draw_log_pane(f: &mut Frame, area: Rect) {
    let [_, pane] = Layout::vertical([Constraint::Fill(1), Constraint::Length(10)]).areas(area);
    f.render_widget(Clear, pane);
    let logs = TuiLoggerWidget::default()
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray))
        .block(default_border(Color::DarkGray).title(" Logs "));
    f.render_widget(logs, pane);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = Rect::new(area.width.saturating_sub(3), 1, 1, 1);
    f.render_widget(spinner, area);
}
