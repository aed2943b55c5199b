use crate::clock::format_time;
use crate::config::{self, DashboardConfig};
use crate::series::{self, PerformancePoint, RiskPoint};
use crate::trades::{self, Trade};
use chrono::{DateTime, Datelike, NaiveTime, TimeZone, Timelike, Weekday};
use rand::Rng;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NavItem {
    Dashboard,
    Portfolio,
    Trading,
    Reports,
    Strategies,
    LearningHub,
    Settings,
}

impl NavItem {
    pub const ALL: [NavItem; 7] = [
        NavItem::Dashboard,
        NavItem::Portfolio,
        NavItem::Trading,
        NavItem::Reports,
        NavItem::Strategies,
        NavItem::LearningHub,
        NavItem::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NavItem::Dashboard => "Dashboard",
            NavItem::Portfolio => "Portfolio",
            NavItem::Trading => "Trading",
            NavItem::Reports => "Reports",
            NavItem::Strategies => "Strategies",
            NavItem::LearningHub => "Learning Hub",
            NavItem::Settings => "Settings",
        }
    }

    pub fn is_active(self) -> bool {
        self == NavItem::Dashboard
    }
}

/// Performance chart period. Display only; the sample data ignores it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Period {
    #[serde(rename = "Last 7 Days")]
    Last7Days,
    #[default]
    #[serde(rename = "Last 30 Days")]
    Last30Days,
    #[serde(rename = "Last 90 Days")]
    Last90Days,
    #[serde(rename = "Year to Date")]
    YearToDate,
}

impl Period {
    pub fn label(self) -> &'static str {
        match self {
            Period::Last7Days => "Last 7 Days",
            Period::Last30Days => "Last 30 Days",
            Period::Last90Days => "Last 90 Days",
            Period::YearToDate => "Year to Date",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Period::Last7Days => Period::Last30Days,
            Period::Last30Days => Period::Last90Days,
            Period::Last90Days => Period::YearToDate,
            Period::YearToDate => Period::Last7Days,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Gain,
    Info,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KpiCard {
    pub label: &'static str,
    pub value: &'static str,
    pub badge: &'static str,
    pub tone: BadgeTone,
}

static KPI_CARDS: [KpiCard; 4] = [
    KpiCard { label: "Portfolio Value", value: "$125,847.63", badge: "+12.4%", tone: BadgeTone::Gain },
    KpiCard { label: "Win Rate", value: "73.8%", badge: "+5.2%", tone: BadgeTone::Gain },
    KpiCard { label: "Daily P&L", value: "$2,347", badge: "+18.2%", tone: BadgeTone::Gain },
    KpiCard { label: "Active Positions", value: "8", badge: "2 new", tone: BadgeTone::Info },
];

pub fn kpi_cards() -> &'static [KpiCard] {
    &KPI_CARDS
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketStatus {
    Open,
    Closed,
}

impl MarketStatus {
    pub fn label(self) -> &'static str {
        match self {
            MarketStatus::Open => "OPEN",
            MarketStatus::Closed => "CLOSED",
        }
    }
}

/// Regular NYSE session, weekdays only. Exchange holidays are not modelled.
pub fn market_status<Tz: TimeZone>(now: &DateTime<Tz>) -> MarketStatus {
    let local = now.with_timezone(&config::MARKET_TIMEZONE);
    if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
        return MarketStatus::Closed;
    }
    let (open_h, open_m) = config::MARKET_OPEN_HHMM;
    let (close_h, close_m) = config::MARKET_CLOSE_HHMM;
    let (Some(open), Some(close)) = (
        NaiveTime::from_hms_opt(open_h, open_m, 0),
        NaiveTime::from_hms_opt(close_h, close_m, 0),
    ) else {
        return MarketStatus::Closed;
    };
    let t = local.time();
    if t >= open && t < close {
        MarketStatus::Open
    } else {
        MarketStatus::Closed
    }
}

pub fn greeting(hour: u32, trader: &str) -> String {
    let part = match hour {
        0..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    };
    format!("{}, {}!", part, trader)
}

/// Everything one render pass of the dashboard shows.
#[derive(Clone, Debug, Serialize)]
pub struct DashboardSnapshot {
    pub brand: &'static str,
    pub clock: String,
    pub greeting: String,
    pub market_status: MarketStatus,
    pub period: Period,
    pub nav: Vec<NavEntry>,
    pub kpis: Vec<KpiCard>,
    pub performance: Vec<PerformancePoint>,
    pub risk: Vec<RiskPoint>,
    pub trades: Vec<TradeRow>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NavEntry {
    pub label: &'static str,
    pub active: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct TradeRow {
    #[serde(flatten)]
    pub trade: Trade,
    pub entry_label: String,
    pub exit_label: String,
    pub tone: trades::PnlTone,
}

impl From<&Trade> for TradeRow {
    fn from(trade: &Trade) -> Self {
        Self {
            trade: trade.clone(),
            entry_label: trade.entry_label(),
            exit_label: trade.exit_label(),
            tone: trade.tone(),
        }
    }
}

impl DashboardSnapshot {
    pub fn capture<Tz, R>(now: &DateTime<Tz>, cfg: &DashboardConfig, period: Period, rng: &mut R) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
        R: Rng,
    {
        Self {
            brand: config::BRAND,
            clock: format_time(now, cfg.clock_format),
            greeting: greeting(now.hour(), &cfg.trader_name),
            market_status: market_status(now),
            period,
            nav: NavItem::ALL
                .iter()
                .map(|item| NavEntry {
                    label: item.label(),
                    active: item.is_active(),
                })
                .collect(),
            kpis: kpi_cards().to_vec(),
            performance: series::generate_performance_series(config::PERFORMANCE_SERIES_LEN, rng),
            risk: series::generate_risk_series(config::RISK_SERIES_LEN, rng),
            trades: trades::recent_trades().iter().map(TradeRow::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use chrono_tz::America::New_York;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_market_open_inside_session() {
        // Wednesday 2024-03-06 10:00 New York.
        let t = New_York.with_ymd_and_hms(2024, 3, 6, 10, 0, 0).unwrap();
        assert_eq!(market_status(&t), MarketStatus::Open);
    }

    #[test]
    fn test_market_session_edges() {
        let open = New_York.with_ymd_and_hms(2024, 3, 6, 9, 30, 0).unwrap();
        let before = New_York.with_ymd_and_hms(2024, 3, 6, 9, 29, 59).unwrap();
        let close = New_York.with_ymd_and_hms(2024, 3, 6, 16, 0, 0).unwrap();
        assert_eq!(market_status(&open), MarketStatus::Open);
        assert_eq!(market_status(&before), MarketStatus::Closed);
        assert_eq!(market_status(&close), MarketStatus::Closed);
    }

    #[test]
    fn test_market_closed_on_weekend() {
        let saturday = New_York.with_ymd_and_hms(2024, 3, 9, 11, 0, 0).unwrap();
        assert_eq!(market_status(&saturday), MarketStatus::Closed);
    }

    #[test]
    fn test_market_status_converts_from_utc() {
        // 15:00 UTC on a March weekday after DST start is 11:00 in New York.
        let t = Utc.with_ymd_and_hms(2024, 3, 13, 15, 0, 0).unwrap();
        assert_eq!(market_status(&t), MarketStatus::Open);
        let late = Utc.with_ymd_and_hms(2024, 3, 13, 21, 0, 0).unwrap();
        assert_eq!(market_status(&late), MarketStatus::Closed);
    }

    #[test]
    fn test_greeting_by_hour() {
        assert_eq!(greeting(8, "Trader"), "Good morning, Trader!");
        assert_eq!(greeting(12, "Ada"), "Good afternoon, Ada!");
        assert_eq!(greeting(23, "Ada"), "Good evening, Ada!");
    }

    #[test]
    fn test_period_cycles_back() {
        let start = Period::default();
        assert_eq!(start.label(), "Last 30 Days");
        let mut p = start;
        for _ in 0..4 {
            p = p.next();
        }
        assert_eq!(p, start);
    }

    #[test]
    fn test_only_dashboard_is_active() {
        let active: Vec<_> = NavItem::ALL.iter().filter(|i| i.is_active()).collect();
        assert_eq!(active, vec![&NavItem::Dashboard]);
    }

    #[test]
    fn test_snapshot_contents() {
        let now = Utc.with_ymd_and_hms(2024, 3, 13, 15, 4, 5).unwrap();
        let cfg = DashboardConfig::with_defaults();
        let snap = DashboardSnapshot::capture(&now, &cfg, Period::default(), &mut StepRng::new(0, 0));

        assert_eq!(snap.clock, "3:04:05 PM");
        assert_eq!(snap.greeting, "Good afternoon, Trader!");
        assert_eq!(snap.market_status, MarketStatus::Open);
        assert_eq!(snap.performance.len(), 30);
        assert_eq!(snap.risk.len(), 20);
        assert_eq!(snap.trades.len(), 5);
        assert_eq!(snap.kpis.len(), 4);
        assert_eq!(snap.nav.len(), 7);
        assert_eq!(snap.performance[0].value, 120_000.0);
    }

    #[test]
    fn test_snapshot_json_layout() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 8, 0, 0).unwrap();
        let cfg = DashboardConfig::with_defaults();
        let snap = DashboardSnapshot::capture(&now, &cfg, Period::Last90Days, &mut StepRng::new(0, 0));
        let json = serde_json::to_value(&snap).unwrap();

        assert_eq!(json["market_status"], "CLOSED");
        assert_eq!(json["period"], "Last 90 Days");
        assert_eq!(json["trades"][1]["symbol"], "TSLA");
        assert_eq!(json["trades"][1]["tone"], "negative");
        assert_eq!(json["trades"][2]["exit_label"], "-");
        assert_eq!(json["kpis"][3]["tone"], "info");
        assert_eq!(json["performance"][29]["day"], 30);
    }
}
