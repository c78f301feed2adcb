use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use botdash::analytics::equity_curve::build_curve;
use botdash::analytics::reconcile::{normalize_side, reconcile};
use botdash::models::{EquityCurve, TradeRecord};

const T: i64 = 1_700_000_000;

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

fn records(v: Value) -> Vec<TradeRecord> {
    serde_json::from_value(v).unwrap()
}

fn assert_well_formed(curve: &EquityCurve) {
    assert!(curve.points.len() >= 2, "curve must be drawable as a line");
    assert!(
        curve.points.windows(2).all(|w| w[0].time < w[1].time),
        "points must be strictly ascending, one per second"
    );
    assert!(curve.points.iter().all(|p| p.value <= curve.all_time_high));
}

#[test]
fn scenario_a_no_trades() {
    let curve = build_curve(&[], Decimal::from(100), at(T));

    assert_eq!(curve.points.len(), 2);
    assert!(curve.points.iter().all(|p| p.value == Decimal::from(100)));
    assert_eq!(
        (curve.points[1].time - curve.points[0].time).num_seconds(),
        1
    );
    assert_eq!(curve.all_time_high, Decimal::from(100));
}

#[test]
fn scenario_b_single_win() {
    let trades = records(json!([{"timestamp": T, "result": "WIN", "pnl": 10}]));
    let curve = build_curve(&trades, Decimal::from(100), at(T + 60));

    let got: Vec<(i64, Decimal)> = curve
        .points
        .iter()
        .map(|p| (p.time.timestamp(), p.value))
        .collect();
    assert_eq!(
        got,
        vec![
            (T - 1, Decimal::from(100)),
            (T, Decimal::from(110)),
            (T + 60, Decimal::from(110)),
        ]
    );
    assert_eq!(curve.all_time_high, Decimal::from(110));
}

#[test]
fn scenario_c_high_water_above_final_value() {
    let trades = records(json!([
        {"timestamp": T, "result": "WIN", "pnl": 20},
        {"timestamp": T + 30, "result": "LOSS", "pnl": -30}
    ]));
    let curve = build_curve(&trades, Decimal::from(100), at(T + 60));

    assert_eq!(curve.all_time_high, Decimal::from(120));
    assert_eq!(curve.latest(), Some(Decimal::from(90)));
    assert_well_formed(&curve);
}

#[test]
fn scenario_d_pending_contributes_nothing() {
    let trades = records(json!([
        {"timestamp": T, "result": "WIN", "pnl": 20},
        {"timestamp": T + 10, "result": "PENDING", "pnl": 1000},
        {"timestamp": T + 20, "result": "LOSS", "pnl": -5}
    ]));
    let curve = build_curve(&trades, Decimal::from(100), at(T + 60));

    assert!(curve.points.iter().all(|p| p.time != at(T + 10)));
    assert_eq!(curve.latest(), Some(Decimal::from(115)));
    assert_eq!(curve.all_time_high, Decimal::from(120));
}

#[test]
fn scenario_e_secondary_supersedes_primary() {
    let primary = records(json!([{"marketId": "m1", "side": "UP", "pnl": 5}]));
    let secondary = records(json!([{"marketId": "m1", "side": "YES", "pnl": 9}]));

    let merged = reconcile(&primary, &secondary);

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].record.pnl, Some(Decimal::from(9)));
}

#[test]
fn side_normalization_table() {
    assert_eq!(normalize_side(Some("up")), "YES");
    assert_eq!(normalize_side(Some("down")), "NO");
    assert_eq!(normalize_side(Some("yes")), "YES");
    assert_eq!(normalize_side(None), "");
}

#[test]
fn reconciled_feed_drives_curve() {
    // Both feeds report the same closed position; only the analytics pnl
    // may reach the curve.
    let primary = records(json!([
        {"timestamp": "2023-11-14T22:13:20Z", "marketId": "m1", "side": "DOWN", "result": "WIN", "pnl": 5},
        {"timestamp": "2023-11-14T22:14:20Z", "marketId": "m2", "side": "UP", "result": "LOSS", "pnl": -2}
    ]));
    let secondary = records(json!([
        {"timestamp": T, "marketId": "m1", "side": "no", "result": "WIN", "pnl": 6}
    ]));

    let merged: Vec<TradeRecord> = reconcile(&primary, &secondary)
        .into_iter()
        .map(|t| t.record)
        .collect();
    let curve = build_curve(&merged, Decimal::from(50), at(T + 600));

    assert_eq!(merged.len(), 2);
    assert_eq!(curve.all_time_high, Decimal::from(56));
    assert_eq!(curve.latest(), Some(Decimal::from(54)));
    assert_well_formed(&curve);
}

#[test]
fn messy_payload_still_renders() {
    let trades = records(json!([
        {"timestamp": "garbage", "result": "WIN", "pnl": 3},
        {"timestamp": null, "result": "LOSS", "pnl": "n/a"},
        {"timestamp": T, "result": "win", "pnl": "2.5"},
        {"timestamp": T, "result": "LOSS", "pnl": -1},
        {"timestamp": T + 5, "result": "REJECTED", "pnl": 40},
        {"timestamp": T + 7, "result": "TIMEOUT"},
        {"result": "WIN", "pnl": true}
    ]));
    let now = at(T + 30);

    let first = build_curve(&trades, Decimal::from(10), now);
    let second = build_curve(&trades, Decimal::from(10), now);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
    assert_eq!(first.latest(), Some(Decimal::new(145, 1)));
    assert_eq!(first.all_time_high, Decimal::new(155, 1));
    assert_well_formed(&first);
}
