//! JSON export of matched opportunities.
//!
//! Writes a timestamped file into the configured export directory. The
//! payload is a JSON array with one object per opportunity, one per line, so
//! the file diffs cleanly and still parses as ordinary JSON.

use std::path::{Path, PathBuf};

use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};

use crate::market::{MarketError, Opportunity};

/// One exported opportunity line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub product: String,
    pub buy_price: f32,
    pub buy_store: String,
    pub sell_price: f32,
    pub sell_store: String,
    pub margin: f32,
    pub quantity: u32,
    pub profit: f32,
    /// Rounded to whole blocks.
    pub distance: u32,
}

impl From<&Opportunity> for ExportRecord {
    fn from(opportunity: &Opportunity) -> Self {
        Self {
            product: opportunity.buy_from.product_name.clone(),
            buy_price: opportunity.buy_from.price,
            buy_store: opportunity.buy_from.store_name.clone(),
            sell_price: opportunity.sell_to.price,
            sell_store: opportunity.sell_to.store_name.clone(),
            margin: opportunity.margin(),
            quantity: opportunity.max_quantity,
            profit: opportunity.total_profit(),
            distance: opportunity.distance.round() as u32,
        }
    }
}

/// Render opportunities as a JSON array, one object per line.
pub fn render(opportunities: &[Opportunity]) -> Result<String, MarketError> {
    let mut lines = Vec::with_capacity(opportunities.len());
    for opportunity in opportunities {
        lines.push(serde_json::to_string(&ExportRecord::from(opportunity))?);
    }
    if lines.is_empty() {
        return Ok("[]\n".to_string());
    }
    Ok(format!("[\n  {}\n]\n", lines.join(",\n  ")))
}

/// Parse a previously exported payload.
pub fn parse(payload: &str) -> Result<Vec<ExportRecord>, MarketError> {
    Ok(serde_json::from_str(payload)?)
}

/// Write an export file into `directory`, creating it if needed.
/// Returns the path of the written file.
pub async fn write_export(
    directory: &Path,
    opportunities: &[Opportunity],
) -> Result<PathBuf, MarketError> {
    let payload = render(opportunities)?;
    tokio::fs::create_dir_all(directory).await?;

    let filename = format!("opportunities-{}.json", Utc::now().format("%Y%m%d-%H%M%S"));
    let path = directory.join(filename);
    tokio::fs::write(&path, payload).await?;
    info!(
        "exported {} opportunities to {}",
        opportunities.len(),
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::offer::{Offer, OfferDirection};

    fn sample_opportunity() -> Opportunity {
        Opportunity {
            buy_from: Offer {
                product: "stone".to_string(),
                product_name: "Stone".to_string(),
                price: 10.0,
                quantity: 100,
                direction: OfferDirection::Selling,
                store: "seller".to_string(),
                store_name: "Quarry Stand".to_string(),
                owner_name: "alice".to_string(),
                currency: "coin".to_string(),
            },
            sell_to: Offer {
                product: "stone".to_string(),
                product_name: "Stone".to_string(),
                price: 15.0,
                quantity: 50,
                direction: OfferDirection::Buying,
                store: "buyer".to_string(),
                store_name: "Mason Stand".to_string(),
                owner_name: "bob".to_string(),
                currency: "coin".to_string(),
            },
            max_quantity: 50,
            storage_capacity: 200,
            distance: 49.6,
        }
    }

    #[test]
    fn record_fields_and_rounding() {
        let record = ExportRecord::from(&sample_opportunity());
        assert_eq!(record.product, "Stone");
        assert_eq!(record.buy_price, 10.0);
        assert_eq!(record.sell_price, 15.0);
        assert_eq!(record.margin, 5.0);
        assert_eq!(record.quantity, 50);
        assert_eq!(record.profit, 250.0);
        assert_eq!(record.distance, 50);
    }

    #[test]
    fn render_uses_camel_case_one_object_per_line() {
        let payload = render(&[sample_opportunity()]).unwrap();
        assert!(payload.starts_with("[\n"));
        assert!(payload.ends_with("]\n"));
        assert!(payload.contains("\"buyPrice\":10.0"));
        assert!(payload.contains("\"sellStore\":\"Mason Stand\""));
        assert_eq!(payload.lines().count(), 3);
    }

    #[test]
    fn empty_export_is_an_empty_array() {
        assert_eq!(render(&[]).unwrap(), "[]\n");
        assert!(parse("[]\n").unwrap().is_empty());
    }

    #[test]
    fn export_round_trips() {
        let original = ExportRecord::from(&sample_opportunity());
        let payload = render(&[sample_opportunity()]).unwrap();
        let parsed = parse(&payload).unwrap();
        assert_eq!(parsed, vec![original]);
    }

    #[tokio::test]
    async fn write_export_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("exports");
        let path = write_export(&target, &[sample_opportunity()]).await.unwrap();

        assert!(path.starts_with(&target));
        let payload = tokio::fs::read_to_string(&path).await.unwrap();
        let parsed = parse(&payload).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].quantity, 50);
    }
}
