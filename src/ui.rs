use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, List, ListItem, Paragraph, Row, Table},
    Frame,
};
use crate::app::App;
use crate::dashboard::{BadgeTone, KpiCard, MarketStatus};
use crate::series::{self, PERFORMANCE_SHAPE, RISK_SHAPE};
use crate::trades::{self, PnlTone, TradeStatus};

const SIDEBAR_WIDTH: u16 = 22;

pub fn render(f: &mut Frame, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, layout[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(layout[1]);

    render_sidebar(f, body[0]);
    render_dashboard(f, app, body[1]);
    render_footer(f, layout[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let snap = &app.snapshot;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(36)])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", snap.brand), Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
        Span::raw(" | "),
        Span::styled(snap.greeting.as_str(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let status_color = match snap.market_status {
        MarketStatus::Open => Color::Green,
        MarketStatus::Closed => Color::Red,
    };
    let status = Paragraph::new(Line::from(vec![
        Span::styled("Market: ", Style::default().fg(Color::Gray)),
        Span::styled(snap.market_status.label(), Style::default().fg(status_color).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" • {}", snap.clock), Style::default().fg(Color::Gray)),
    ]))
    .alignment(Alignment::Right)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);
}

fn render_sidebar(f: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = crate::dashboard::NavItem::ALL
        .iter()
        .map(|item| {
            let style = if item.is_active() {
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            ListItem::new(Line::from(Span::styled(format!(" {} ", item.label()), style)))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Menu "));
    f.render_widget(list, area);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(" Controls: ", Style::default().fg(Color::Gray)),
        Span::styled("p: period | q/Esc: quit", Style::default().fg(Color::White)),
    ]))
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

fn render_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(9),
        ])
        .split(area);

    render_kpis(f, app, chunks[0]);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(67), Constraint::Percentage(33)])
        .split(chunks[1]);

    render_performance_chart(f, app, charts[0]);
    render_risk_chart(f, app, charts[1]);
    render_trades(f, app, chunks[2]);
}

fn render_kpis(f: &mut Frame, app: &App, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (card, slot) in app.snapshot.kpis.iter().zip(cards.iter()) {
        render_kpi_card(f, card, *slot);
    }
}

fn render_kpi_card(f: &mut Frame, card: &KpiCard, area: Rect) {
    let badge_color = match card.tone {
        BadgeTone::Gain => Color::Green,
        BadgeTone::Info => Color::Magenta,
    };
    let text = vec![
        Line::from(Span::styled(card.value, Style::default().fg(Color::White).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(card.badge, Style::default().fg(badge_color))),
    ];
    let widget = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(format!(" {} ", card.label), Style::default().fg(Color::Gray))),
    );
    f.render_widget(widget, area);
}

fn render_performance_chart(f: &mut Frame, app: &App, area: Rect) {
    let points = series::performance_chart_points(&app.snapshot.performance);
    let (y_min, y_max) = PERFORMANCE_SHAPE.bounds();
    let x_max = points.len().max(1) as f64;

    let datasets = vec![Dataset::default()
        .name("Value")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(Line::from(vec![
                    Span::styled(" Performance Overview ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                    Span::styled(format!("[{}] ", app.period.label()), Style::default().fg(Color::Yellow)),
                ]))
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("Day")
                .style(Style::default().fg(Color::Gray))
                .bounds([1.0, x_max])
                .labels(vec![
                    Span::styled("1", Style::default().fg(Color::Gray)),
                    Span::styled(format!("{:.0}", x_max), Style::default().fg(Color::Gray)),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{:.0}k", y_min / 1000.0), Style::default().fg(Color::Gray)),
                    Span::styled(format!("{:.0}k", y_max / 1000.0), Style::default().fg(Color::Gray)),
                ]),
        );

    f.render_widget(chart, area);
}

fn render_risk_chart(f: &mut Frame, app: &App, area: Rect) {
    let points = series::risk_chart_points(&app.snapshot.risk);
    let (y_min, y_max) = RISK_SHAPE.bounds();
    let x_max = points.len().saturating_sub(1).max(1) as f64;

    let datasets = vec![Dataset::default()
        .name("Risk")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Yellow))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(Span::styled(" Risk Analysis ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)))
                .borders(Borders::ALL),
        )
        .x_axis(Axis::default().bounds([0.0, x_max]))
        .y_axis(Axis::default().bounds([y_min, y_max]));

    f.render_widget(chart, area);
}

fn render_trades(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(["Symbol", "Entry", "Exit", "P&L", "Status"])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = app
        .snapshot
        .trades
        .iter()
        .map(|row| {
            let pnl_color = match row.tone {
                PnlTone::Positive => Color::Green,
                PnlTone::Negative => Color::Red,
            };
            let status_color = match row.trade.status {
                TradeStatus::Closed => Color::Green,
                TradeStatus::Open => Color::Magenta,
            };
            Row::new(vec![
                Cell::from(Span::styled(row.trade.symbol, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))),
                Cell::from(row.entry_label.as_str()),
                Cell::from(row.exit_label.as_str()),
                Cell::from(Span::styled(row.trade.pnl, Style::default().fg(pnl_color).add_modifier(Modifier::BOLD))),
                Cell::from(Span::styled(row.trade.status.label(), Style::default().fg(status_color))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(trades_title()));

    f.render_widget(table, area);
}

fn trades_title() -> String {
    let all = trades::recent_trades();
    format!(
        " Recent Trades ({} open, {} closed) ",
        trades::filter_by_status(all, TradeStatus::Open).len(),
        trades::filter_by_status(all, TradeStatus::Closed).len(),
    )
}
