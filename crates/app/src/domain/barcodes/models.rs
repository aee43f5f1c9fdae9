//! Barcode Models

use jiff::Timestamp;
use labels::{
    items::{ItemCode, ItemName, Mrp},
    label::LabelContent,
};
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Barcode UUID
pub type BarcodeUuid = TypedUuid<BarcodeRecord>;

/// Saved Barcode Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeRecord {
    pub id: BarcodeUuid,
    pub item_name: ItemName,
    pub item_code: ItemCode,
    pub mrp: Mrp,
    #[serde(with = "epoch_millis")]
    pub timestamp: Timestamp,
}

impl BarcodeRecord {
    /// Create a record for confirmed label content, stamped with a fresh id
    /// and the current time.
    pub fn new(content: LabelContent) -> Self {
        Self {
            id: BarcodeUuid::new(),
            item_name: content.name,
            item_code: content.code,
            mrp: content.mrp,
            timestamp: now_millis(),
        }
    }

    /// The label content this record was created from.
    pub fn content(&self) -> LabelContent {
        LabelContent {
            name: self.item_name.clone(),
            code: self.item_code.clone(),
            mrp: self.mrp,
        }
    }
}

/// The current time truncated to the millisecond precision records are stored
/// with.
fn now_millis() -> Timestamp {
    let now = Timestamp::now();

    Timestamp::from_millisecond(now.as_millisecond()).unwrap_or(now)
}

mod epoch_millis {
    use jiff::Timestamp;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub(super) fn serialize<S: Serializer>(
        timestamp: &Timestamp,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(timestamp.as_millisecond())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Timestamp, D::Error> {
        let millis = i64::deserialize(deserializer)?;

        Timestamp::from_millisecond(millis).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use labels::validation::LabelInput;
    use serde_json::{Value, json};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn serializes_in_storage_shape() -> TestResult {
        let content = LabelInput::new("Basmati Rice", "590123412345", "25.5").validate()?;
        let record = BarcodeRecord {
            timestamp: Timestamp::from_millisecond(1_700_000_000_123)?,
            ..BarcodeRecord::new(content)
        };

        let value = serde_json::to_value(&record)?;

        assert_eq!(
            value,
            json!({
                "id": record.id.to_string(),
                "itemName": "Basmati Rice",
                "itemCode": "590123412345",
                "mrp": 25.5,
                "timestamp": 1_700_000_000_123_i64,
            })
        );

        Ok(())
    }

    #[test]
    fn round_trips_through_json() -> TestResult {
        let content = LabelInput::new("Tea", "400638133393", "120").validate()?;
        let record = BarcodeRecord::new(content);

        let json = serde_json::to_string(&record)?;
        let back: BarcodeRecord = serde_json::from_str(&json)?;

        assert_eq!(back, record);

        Ok(())
    }

    #[test]
    fn rejects_malformed_item_codes() {
        let value: Value = json!({
            "id": "0190b7a4-6f4e-7d2a-9c1e-3b5a7d9e1f20",
            "itemName": "Tea",
            "itemCode": "12345",
            "mrp": 1.0,
            "timestamp": 0,
        });

        let result = serde_json::from_value::<BarcodeRecord>(value);

        assert!(result.is_err(), "short item codes should not deserialize");
    }

    #[test]
    fn new_record_is_stamped_no_earlier_than_creation() -> TestResult {
        let content = LabelInput::new("Tea", "400638133393", "120").validate()?;
        let before = now_millis();

        let record = BarcodeRecord::new(content);

        assert!(
            record.timestamp >= before,
            "{} should not precede {before}",
            record.timestamp
        );
        assert!(record.timestamp <= Timestamp::now(), "timestamp should not be in the future");

        Ok(())
    }

    #[test]
    fn long_price_reloads_unchanged() -> TestResult {
        let content =
            LabelInput::new("Tea", "400638133393", "0.3333333333333333333").validate()?;
        let record = BarcodeRecord::new(content);

        let back: Vec<BarcodeRecord> =
            serde_json::from_str(&serde_json::to_string(&[record.clone()])?)?;

        assert_eq!(back, vec![record]);

        Ok(())
    }

    #[test]
    fn content_matches_record_fields() -> TestResult {
        let content = LabelInput::new("Tea", "400638133393", "120").validate()?;
        let record = BarcodeRecord::new(content.clone());

        assert_eq!(record.content(), content);

        Ok(())
    }
}
