//! `(label, value)` points of one group, for feeding a historical chart.
use crate::core::{AssetGroup, HoldingKind, Portfolio};
use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotPoint {
    pub label: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub taken_at: DateTime<Utc>,
    pub group: String,
    pub points: Vec<SnapshotPoint>,
}

/// Points ordered like the report rows: by value, largest first.
/// Watched holdings are represented by their unit price.
pub fn snapshot_points(group: &AssetGroup) -> Vec<SnapshotPoint> {
    let mut points: Vec<SnapshotPoint> = group
        .holdings
        .iter()
        .map(|h| SnapshotPoint {
            label: h.title.clone(),
            value: match h.kind {
                HoldingKind::Owned => h.market_value,
                HoldingKind::Watched => h.current_price,
            },
        })
        .collect();
    points.sort_by(|a, b| b.value.cmp(&a.value));
    points
}

pub fn take(portfolio: &Portfolio, group_title: &str, taken_at: DateTime<Utc>) -> Result<Snapshot> {
    let group = portfolio
        .group(group_title)
        .ok_or_else(|| anyhow!("No asset group named {group_title}"))?;
    Ok(Snapshot {
        taken_at,
        group: group.title.clone(),
        points: snapshot_points(group),
    })
}
