// =============================================================================
// Top Movers & Sector Performance
// =============================================================================
//
// Both tables are built from one quote per universe constituent:
//   - movers:  top-N by change % (gainers descending, losers ascending)
//   - sectors: mean change % of the constituents in each sector

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Latest close and session change of one constituent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub sector: Option<String>,
    pub close: f64,
    pub change_pct: Option<f64>,
}

/// A row of the gainers / losers tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    pub symbol: String,
    pub close: f64,
    pub change_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movers {
    pub gainers: Vec<Mover>,
    pub losers: Vec<Mover>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorPerformance {
    pub sector: String,
    pub avg_change_pct: f64,
    /// Constituents that contributed to the average.
    pub members: usize,
}

/// Rank quotes into the top `n` gainers and top `n` losers.
///
/// An undefined change counts as 0 %.  Ties keep universe order.
pub fn top_movers(quotes: &[Quote], n: usize) -> Movers {
    let rows: Vec<Mover> = quotes
        .iter()
        .map(|q| Mover {
            symbol: q.symbol.clone(),
            close: q.close,
            change_pct: q.change_pct.unwrap_or(0.0),
        })
        .collect();

    let mut gainers = rows.clone();
    gainers.sort_by(|a, b| {
        b.change_pct
            .partial_cmp(&a.change_pct)
            .unwrap_or(Ordering::Equal)
    });
    gainers.truncate(n);

    let mut losers = rows;
    losers.sort_by(|a, b| {
        a.change_pct
            .partial_cmp(&b.change_pct)
            .unwrap_or(Ordering::Equal)
    });
    losers.truncate(n);

    Movers { gainers, losers }
}

/// Average change per sector, ordered by sector name.
///
/// Quotes without a sector or without a defined change are ignored; a
/// sector with no contributing quote is omitted.
pub fn sector_performance(quotes: &[Quote]) -> Vec<SectorPerformance> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for q in quotes {
        if let (Some(sector), Some(change)) = (q.sector.as_deref(), q.change_pct) {
            groups.entry(sector).or_default().push(change);
        }
    }

    groups
        .into_iter()
        .map(|(sector, changes)| SectorPerformance {
            sector: sector.to_string(),
            avg_change_pct: changes.iter().sum::<f64>() / changes.len() as f64,
            members: changes.len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(symbol: &str, sector: Option<&str>, change: Option<f64>) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            sector: sector.map(str::to_string),
            close: 100.0,
            change_pct: change,
        }
    }

    fn symbols(rows: &[Mover]) -> Vec<&str> {
        rows.iter().map(|m| m.symbol.as_str()).collect()
    }

    #[test]
    fn movers_rank_and_truncate() {
        let quotes = vec![
            quote("A", None, Some(1.5)),
            quote("B", None, Some(-2.0)),
            quote("C", None, Some(3.0)),
            quote("D", None, Some(-0.5)),
            quote("E", None, None),
        ];
        let movers = top_movers(&quotes, 2);
        assert_eq!(symbols(&movers.gainers), vec!["C", "A"]);
        assert_eq!(symbols(&movers.losers), vec!["B", "D"]);
    }

    #[test]
    fn missing_change_counts_as_zero() {
        let quotes = vec![quote("A", None, Some(-1.0)), quote("B", None, None)];
        let movers = top_movers(&quotes, 1);
        assert_eq!(movers.gainers[0].symbol, "B");
        assert_eq!(movers.gainers[0].change_pct, 0.0);
    }

    #[test]
    fn movers_of_small_universe_overlap() {
        let quotes = vec![quote("A", None, Some(1.0)), quote("B", None, Some(2.0))];
        let movers = top_movers(&quotes, 5);
        assert_eq!(symbols(&movers.gainers), vec!["B", "A"]);
        assert_eq!(symbols(&movers.losers), vec!["A", "B"]);
    }

    #[test]
    fn movers_of_empty_universe() {
        assert_eq!(top_movers(&[], 5), Movers::default());
    }

    #[test]
    fn sectors_are_averaged_and_sorted() {
        let quotes = vec![
            quote("INFY", Some("IT"), Some(2.0)),
            quote("HDFCBANK", Some("Banks"), Some(-1.0)),
            quote("TCS", Some("IT"), Some(1.0)),
            quote("SBIN", Some("Banks"), None),
            quote("ORPHAN", None, Some(9.0)),
            quote("FLAT", Some("Energy"), None),
        ];
        let sectors = sector_performance(&quotes);
        assert_eq!(sectors.len(), 2);
        assert_eq!(sectors[0].sector, "Banks");
        assert_eq!(sectors[0].avg_change_pct, -1.0);
        assert_eq!(sectors[0].members, 1);
        assert_eq!(sectors[1].sector, "IT");
        assert!((sectors[1].avg_change_pct - 1.5).abs() < 1e-12);
        assert_eq!(sectors[1].members, 2);
    }
}
