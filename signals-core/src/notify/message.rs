//! Plain-text message bodies for the probes.

use crate::crossover::CrossoverOutcome;
use crate::domain::CrossoverState;
use crate::probes::daily_close::DailyClose;
use chrono::NaiveDate;

fn signed_pct(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{value:.2}%")
}

/// Alert for a state change; `None` when there is nothing to announce.
pub fn crossover_alert(ticker: &str, lookback: usize, outcome: &CrossoverOutcome) -> Option<String> {
    if !outcome.changed {
        return None;
    }
    let (icon, direction) = match outcome.new_state {
        CrossoverState::Above => ("📈", "above"),
        CrossoverState::Below => ("📉", "below"),
        CrossoverState::Neutral => return None,
    };
    Some(format!(
        "{icon} {ticker} crossed {direction} its {lookback}-day SMA\n\
         Close {:.2} vs SMA {:.2} ({})\n\
         As of {}",
        outcome.price,
        outcome.sma,
        signed_pct(outcome.deviation_pct),
        outcome.as_of_date
    ))
}

pub fn daily_close_line(close: &DailyClose) -> String {
    format!(
        "{}  {:.2} → {:.2}  {}",
        close.ticker,
        close.prev_close,
        close.latest_close,
        signed_pct(close.return_pct())
    )
}

pub fn daily_close_error_line(ticker: &str, error: &dyn std::fmt::Display) -> String {
    format!("{ticker}: error — {error}")
}

/// Header plus one line per ticker.
pub fn daily_close_digest(date: Option<NaiveDate>, lines: &[String]) -> String {
    let date = date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "unknown date".to_string());
    format!("📊 Daily close — {date}\n{}", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(previous: CrossoverState, new: CrossoverState) -> CrossoverOutcome {
        CrossoverOutcome {
            previous_state: previous,
            new_state: new,
            changed: previous != new,
            price: 97.5,
            sma: 100.0,
            deviation_pct: -2.5,
            as_of_date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
        }
    }

    #[test]
    fn alert_for_downward_cross() {
        let msg = crossover_alert("SPY", 200, &outcome(CrossoverState::Above, CrossoverState::Below))
            .unwrap();
        assert_eq!(
            msg,
            "📉 SPY crossed below its 200-day SMA\nClose 97.50 vs SMA 100.00 (-2.50%)\nAs of 2024-03-08"
        );
    }

    #[test]
    fn alert_for_upward_cross_has_plus_sign() {
        let mut o = outcome(CrossoverState::Neutral, CrossoverState::Above);
        o.price = 103.0;
        o.deviation_pct = 3.0;
        let msg = crossover_alert("QQQ", 50, &o).unwrap();
        assert!(msg.starts_with("📈 QQQ crossed above its 50-day SMA"));
        assert!(msg.contains("(+3.00%)"));
    }

    #[test]
    fn no_alert_without_change() {
        assert!(crossover_alert("SPY", 20, &outcome(CrossoverState::Above, CrossoverState::Above)).is_none());
    }

    #[test]
    fn daily_close_line_format() {
        let close = DailyClose {
            ticker: "DCAM.PA".into(),
            prev_close: 45.20,
            latest_close: 45.80,
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        };
        assert_eq!(daily_close_line(&close), "DCAM.PA  45.20 → 45.80  +1.33%");
    }

    #[test]
    fn negative_return_keeps_minus_sign() {
        let close = DailyClose {
            ticker: "X".into(),
            prev_close: 100.0,
            latest_close: 98.0,
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        };
        assert!(daily_close_line(&close).ends_with(" -2.00%"));
    }

    #[test]
    fn digest_without_date() {
        let msg = daily_close_digest(None, &["BAD: error — boom".to_string()]);
        assert_eq!(msg, "📊 Daily close — unknown date\nBAD: error — boom");
    }
}
