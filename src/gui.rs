use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};
use crate::clock::ClockTicker;
use crate::config::DashboardConfig;
use crate::dashboard::{BadgeTone, DashboardSnapshot, KpiCard, MarketStatus, Period};
use crate::series::{PERFORMANCE_SHAPE, RISK_SHAPE};
use crate::trades::{PnlTone, TradeStatus};
use std::time::Duration;

// ──────────────────────────────────────────────────────────────────────────────
// Color Palette
// ──────────────────────────────────────────────────────────────────────────────

const ACCENT_CYAN: egui::Color32 = egui::Color32::from_rgb(6, 182, 212);
const ACCENT_PURPLE: egui::Color32 = egui::Color32::from_rgb(168, 85, 247);
const ACCENT_GREEN: egui::Color32 = egui::Color32::from_rgb(74, 222, 128);
const ACCENT_RED: egui::Color32 = egui::Color32::from_rgb(248, 113, 113);
const ACCENT_AMBER: egui::Color32 = egui::Color32::from_rgb(245, 158, 11);

const BG_DARK: egui::Color32 = egui::Color32::from_rgb(17, 24, 39);
const BG_CARD: egui::Color32 = egui::Color32::from_rgb(31, 41, 55);
const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(243, 244, 246);
const TEXT_SECONDARY: egui::Color32 = egui::Color32::from_rgb(156, 163, 175);
const BORDER_SUBTLE: egui::Color32 = egui::Color32::from_rgb(55, 65, 81);

const REPAINT_EVERY: Duration = Duration::from_millis(250);

pub struct GuiApp {
    config: DashboardConfig,
    period: Period,
    snapshot: DashboardSnapshot,
    clock: ClockTicker,
}

impl GuiApp {
    /// Starts the header clock; must be called inside a tokio runtime.
    pub fn new(config: DashboardConfig) -> Self {
        let clock = ClockTicker::start(config.tick_interval);
        let period = Period::default();
        let snapshot =
            DashboardSnapshot::capture(&clock.now(), &config, period, &mut rand::thread_rng());
        Self {
            config,
            period,
            snapshot,
            clock,
        }
    }

    fn refresh(&mut self) {
        self.snapshot = DashboardSnapshot::capture(
            &self.clock.now(),
            &self.config,
            self.period,
            &mut rand::thread_rng(),
        );
    }

    fn apply_theme(ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();

        style.visuals.window_rounding = egui::Rounding::same(8.0);
        style.visuals.widgets.inactive.rounding = egui::Rounding::same(6.0);
        style.visuals.widgets.hovered.rounding = egui::Rounding::same(6.0);

        style.visuals.dark_mode = true;
        style.visuals.panel_fill = BG_DARK;
        style.visuals.window_fill = BG_CARD;
        style.visuals.widgets.noninteractive.bg_fill = BG_CARD;
        style.visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);
        style.visuals.widgets.inactive.bg_fill = BG_CARD;
        style.visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
        style.visuals.selection.bg_fill = ACCENT_PURPLE.linear_multiply(0.6);

        style.spacing.item_spacing = egui::vec2(8.0, 6.0);

        ctx.set_style(style);
    }
}

impl eframe::App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        Self::apply_theme(ctx);
        if self.clock.take_update().is_some() {
            self.refresh();
        }
        ctx.request_repaint_after(REPAINT_EVERY);

        // ── Sidebar ──
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .exact_width(200.0)
            .show(ctx, |ui| {
                ui.add_space(16.0);
                ui.label(egui::RichText::new(self.snapshot.brand)
                    .size(20.0)
                    .strong()
                    .color(ACCENT_PURPLE));
                ui.add_space(20.0);
                for item in &self.snapshot.nav {
                    let text = egui::RichText::new(item.label).size(14.0);
                    let text = if item.active { text.strong().color(TEXT_PRIMARY) } else { text.color(TEXT_SECONDARY) };
                    let _ = ui.selectable_label(item.active, text);
                    ui.add_space(2.0);
                }
            });

        // ── Header ──
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&self.snapshot.greeting)
                    .size(22.0)
                    .strong()
                    .color(TEXT_PRIMARY));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new(format!("• {}", self.snapshot.clock)).color(TEXT_SECONDARY));
                    let color = match self.snapshot.market_status {
                        MarketStatus::Open => ACCENT_GREEN,
                        MarketStatus::Closed => ACCENT_RED,
                    };
                    ui.label(egui::RichText::new(self.snapshot.market_status.label()).strong().color(color));
                    ui.label(egui::RichText::new("Market Status:").size(11.0).color(TEXT_SECONDARY));
                });
            });
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_kpis(ui);
                ui.add_space(12.0);
                self.render_charts(ui);
                ui.add_space(12.0);
                self.render_trades(ui);
            });
        });
    }
}

impl GuiApp {
    fn render_kpis(&self, ui: &mut egui::Ui) {
        ui.columns(4, |cols| {
            for (card, col) in self.snapshot.kpis.iter().zip(cols.iter_mut()) {
                kpi_card(col, card);
            }
        });
    }

    fn render_charts(&mut self, ui: &mut egui::Ui) {
        let mut cycle_period = false;
        ui.columns(2, |cols| {
            card_frame().show(&mut cols[0], |ui| {
                ui.horizontal(|ui| {
                    section_header(ui, "Performance Overview");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(format!("{} ▾", self.period.label())).clicked() {
                            cycle_period = true;
                        }
                    });
                });
                let points: PlotPoints = self.snapshot.performance.iter()
                    .map(|p| [p.day as f64, p.value])
                    .collect();
                let (y_min, y_max) = PERFORMANCE_SHAPE.bounds();
                Plot::new("performance_chart")
                    .height(240.0)
                    .allow_drag(false)
                    .allow_zoom(false)
                    .allow_scroll(false)
                    .include_y(y_min)
                    .include_y(y_max)
                    .show(ui, |plot_ui| {
                        plot_ui.line(Line::new(points)
                            .name("Value")
                            .color(ACCENT_CYAN)
                            .fill(y_min as f32)
                            .width(2.0));
                    });
            });

            card_frame().show(&mut cols[1], |ui| {
                section_header(ui, "Risk Analysis");
                let points: PlotPoints = self.snapshot.risk.iter()
                    .map(|p| [p.time as f64, p.risk])
                    .collect();
                let (y_min, y_max) = RISK_SHAPE.bounds();
                Plot::new("risk_chart")
                    .height(240.0)
                    .show_axes([false, false])
                    .allow_drag(false)
                    .allow_zoom(false)
                    .allow_scroll(false)
                    .include_y(y_min)
                    .include_y(y_max)
                    .show(ui, |plot_ui| {
                        plot_ui.line(Line::new(points).name("Risk").color(ACCENT_AMBER).width(2.0));
                    });
                ui.label(egui::RichText::new("Sharpe Ratio, Max Drawdown, VaR").size(11.0).color(TEXT_SECONDARY));
            });
        });

        if cycle_period {
            self.period = self.period.next();
            self.refresh();
        }
    }

    fn render_trades(&self, ui: &mut egui::Ui) {
        card_frame().show(ui, |ui| {
            section_header(ui, "Recent Trades");
            egui::Grid::new("recent_trades")
                .num_columns(5)
                .spacing([40.0, 10.0])
                .striped(true)
                .show(ui, |ui| {
                    for title in ["Symbol", "Entry", "Exit", "P&L", "Status"] {
                        ui.label(egui::RichText::new(title).color(TEXT_SECONDARY));
                    }
                    ui.end_row();

                    for row in &self.snapshot.trades {
                        ui.label(egui::RichText::new(row.trade.symbol).strong().color(ACCENT_CYAN));
                        ui.label(egui::RichText::new(&row.entry_label).monospace().color(TEXT_PRIMARY));
                        ui.label(egui::RichText::new(&row.exit_label).monospace().color(TEXT_PRIMARY));
                        let pnl_color = match row.tone {
                            PnlTone::Positive => ACCENT_GREEN,
                            PnlTone::Negative => ACCENT_RED,
                        };
                        ui.label(egui::RichText::new(row.trade.pnl).strong().color(pnl_color));
                        let status_color = match row.trade.status {
                            TradeStatus::Closed => ACCENT_GREEN,
                            TradeStatus::Open => ACCENT_PURPLE,
                        };
                        ui.label(egui::RichText::new(row.trade.status.label()).size(11.0).color(status_color));
                        ui.end_row();
                    }
                });
        });
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────────────────────────────────────

fn card_frame() -> egui::Frame {
    egui::Frame::none()
        .fill(BG_CARD)
        .rounding(egui::Rounding::same(10.0))
        .stroke(egui::Stroke::new(1.0, BORDER_SUBTLE))
        .inner_margin(egui::Margin::same(16.0))
}

fn section_header(ui: &mut egui::Ui, text: &str) {
    ui.label(egui::RichText::new(text)
        .size(16.0)
        .strong()
        .color(TEXT_PRIMARY));
    ui.add_space(4.0);
}

fn kpi_card(ui: &mut egui::Ui, card: &KpiCard) {
    let badge_color = match card.tone {
        BadgeTone::Gain => ACCENT_GREEN,
        BadgeTone::Info => ACCENT_PURPLE,
    };
    card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.label(egui::RichText::new(card.label).size(12.0).color(TEXT_SECONDARY));
        ui.label(egui::RichText::new(card.value).size(26.0).strong().color(TEXT_PRIMARY));
        ui.label(egui::RichText::new(card.badge).size(12.0).strong().color(badge_color));
    });
}
