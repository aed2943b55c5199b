use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TradeStatus {
    Open,
    Closed,
}

impl TradeStatus {
    pub fn label(self) -> &'static str {
        match self {
            TradeStatus::Open => "Open",
            TradeStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Colour class of a P&L cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PnlTone {
    Positive,
    Negative,
}

impl PnlTone {
    /// Only a leading `+` reads as a gain; anything else is styled as a loss.
    pub fn classify(pnl: &str) -> Self {
        if pnl.starts_with('+') {
            PnlTone::Positive
        } else {
            PnlTone::Negative
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trade {
    pub symbol: &'static str,
    pub entry: f64,
    pub exit: Option<f64>,
    pub pnl: &'static str,
    pub status: TradeStatus,
}

impl Trade {
    pub fn tone(&self) -> PnlTone {
        PnlTone::classify(self.pnl)
    }

    pub fn entry_label(&self) -> String {
        format!("${}", self.entry)
    }

    pub fn exit_label(&self) -> String {
        match self.exit {
            Some(exit) => format!("${}", exit),
            None => "-".to_string(),
        }
    }
}

static RECENT_TRADES: [Trade; 5] = [
    Trade { symbol: "AAPL", entry: 175.20, exit: Some(178.45), pnl: "+$325", status: TradeStatus::Closed },
    Trade { symbol: "TSLA", entry: 245.80, exit: Some(241.20), pnl: "-$460", status: TradeStatus::Closed },
    Trade { symbol: "MSFT", entry: 378.90, exit: None, pnl: "+$124", status: TradeStatus::Open },
    Trade { symbol: "GOOGL", entry: 142.30, exit: None, pnl: "-$89", status: TradeStatus::Open },
    Trade { symbol: "AMZN", entry: 156.70, exit: Some(159.20), pnl: "+$250", status: TradeStatus::Closed },
];

pub fn recent_trades() -> &'static [Trade] {
    &RECENT_TRADES
}

pub fn filter_by_status(trades: &[Trade], status: TradeStatus) -> Vec<&Trade> {
    trades.iter().filter(|t| t.status == status).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(trades: &[&Trade]) -> Vec<&'static str> {
        trades.iter().map(|t| t.symbol).collect()
    }

    #[test]
    fn test_closed_trades() {
        let closed = filter_by_status(recent_trades(), TradeStatus::Closed);
        assert_eq!(symbols(&closed), vec!["AAPL", "TSLA", "AMZN"]);
    }

    #[test]
    fn test_open_trades() {
        let open = filter_by_status(recent_trades(), TradeStatus::Open);
        assert_eq!(symbols(&open), vec!["MSFT", "GOOGL"]);
        assert!(open.iter().all(|t| t.exit.is_none()));
    }

    #[test]
    fn test_pnl_tone_follows_sign_prefix() {
        assert_eq!(PnlTone::classify("+$325"), PnlTone::Positive);
        assert_eq!(PnlTone::classify("-$460"), PnlTone::Negative);

        for trade in recent_trades() {
            let expected = if trade.pnl.starts_with('+') {
                PnlTone::Positive
            } else {
                assert!(trade.pnl.starts_with('-'));
                PnlTone::Negative
            };
            assert_eq!(trade.tone(), expected, "{}", trade.symbol);
        }
    }

    #[test]
    fn test_price_labels() {
        let trades = recent_trades();
        assert_eq!(trades[0].entry_label(), "$175.2");
        assert_eq!(trades[0].exit_label(), "$178.45");
        assert_eq!(trades[2].entry_label(), "$378.9");
        assert_eq!(trades[2].exit_label(), "-");
    }

    #[test]
    fn test_status_serializes_as_label() {
        let json = serde_json::to_value(&recent_trades()[3]).unwrap();
        assert_eq!(json["status"], "Open");
        assert_eq!(json["exit"], serde_json::Value::Null);
        assert_eq!(TradeStatus::Closed.to_string(), "Closed");
    }
}
