//! Wire types for the inventory sheet endpoint.
//!
//! The remote store is a spreadsheet exposed over HTTP, so every cell may come
//! back as a JSON string, a number or `null` depending on how the sheet was
//! edited. The field deserializers in `cell` normalise that before the rest of
//! the client sees the data.
use serde::{Deserialize, Serialize};

pub mod item {
    use super::*;

    /// A stock item as cached from the last snapshot.
    ///
    /// The barcode identifies the item and never changes once the item
    /// exists; everything else may be edited remotely.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct Item {
        #[serde(default, deserialize_with = "crate::cell::text")]
        pub barcode: String,
        #[serde(default, deserialize_with = "crate::cell::text")]
        pub item_name: String,
        #[serde(default, deserialize_with = "crate::cell::text")]
        pub unit: String,
        #[serde(default, deserialize_with = "crate::cell::opt_text")]
        pub location: Option<String>,
        /// Current quantity. Can be negative until the sheet settles a write.
        #[serde(default, deserialize_with = "crate::cell::int")]
        pub qty: i64,
        #[serde(default, deserialize_with = "crate::cell::int")]
        pub min_qty: i64,
    }

    impl Item {
        /// Display-only check used for the inventory badge. The dashboard
        /// count always comes from the server aggregate.
        pub fn is_low(&self) -> bool {
            self.qty <= self.min_qty
        }

        pub fn location_label(&self) -> &str {
            self.location.as_deref().unwrap_or("-")
        }
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(from = "String", into = "String")]
    pub enum TransactionAction {
        /// Stock returned to the store.
        In,
        /// Stock withdrawn from the store.
        Out,
        Other(String),
    }

    impl TransactionAction {
        pub fn as_str(&self) -> &str {
            match self {
                Self::In => "IN",
                Self::Out => "OUT",
                Self::Other(raw) => raw.as_str(),
            }
        }
    }

    impl From<String> for TransactionAction {
        fn from(value: String) -> Self {
            match value.trim().to_ascii_uppercase().as_str() {
                "IN" => Self::In,
                "OUT" => Self::Out,
                _ => Self::Other(value),
            }
        }
    }

    impl From<TransactionAction> for String {
        fn from(value: TransactionAction) -> Self {
            value.as_str().to_string()
        }
    }

    impl Default for TransactionAction {
        fn default() -> Self {
            Self::Other(String::new())
        }
    }

    /// One row of the append-only transaction log.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct Transaction {
        /// Sheet timestamp, `YYYY-MM-DD HH:MM:SS` in the sheet's timezone.
        #[serde(default, deserialize_with = "crate::cell::text")]
        pub date_time: String,
        #[serde(default, deserialize_with = "crate::cell::text")]
        pub barcode: String,
        #[serde(default, deserialize_with = "crate::cell::text")]
        pub item_name: String,
        /// Signed quantity delta.
        #[serde(default, deserialize_with = "crate::cell::int")]
        pub qty: i64,
        #[serde(default, deserialize_with = "crate::cell::text_into")]
        pub action: TransactionAction,
        #[serde(default, deserialize_with = "crate::cell::text")]
        pub requestor: String,
        #[serde(default, deserialize_with = "crate::cell::text")]
        pub project: String,
        #[serde(default, deserialize_with = "crate::cell::text")]
        pub remark: String,
    }

    impl Transaction {
        /// Date part of the timestamp (everything before the first space).
        pub fn date(&self) -> &str {
            self.date_time
                .split_once(' ')
                .map(|(date, _)| date)
                .unwrap_or(self.date_time.as_str())
        }

        /// Time part of the timestamp, empty when the sheet sent a bare date.
        pub fn time(&self) -> &str {
            self.date_time
                .split_once(' ')
                .map(|(_, time)| time)
                .unwrap_or("")
        }
    }
}

pub mod dashboard {
    use super::*;
    use crate::item::Item;

    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DailyUsage {
        #[serde(default, deserialize_with = "crate::cell::text")]
        pub date: String,
        #[serde(default, deserialize_with = "crate::cell::int")]
        pub usage: i64,
    }

    /// Aggregates computed by the remote store. The client displays them as
    /// they are and never recomputes them from raw rows.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Dashboard {
        #[serde(default, deserialize_with = "crate::cell::seq")]
        pub low_stock_items: Vec<Item>,
        #[serde(default, deserialize_with = "crate::cell::int")]
        pub low_stock_count: i64,
        /// Per-day outflow totals, oldest first. The server sends seven days.
        #[serde(default, deserialize_with = "crate::cell::seq")]
        pub daily_usage_chart: Vec<DailyUsage>,
    }
}

pub mod snapshot {
    use super::*;
    use crate::{dashboard::Dashboard, item::Item, transaction::Transaction};

    /// Body of the read endpoint.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Snapshot {
        #[serde(default, deserialize_with = "crate::cell::seq")]
        pub stock: Vec<Item>,
        #[serde(default, deserialize_with = "crate::cell::seq")]
        pub transactions: Vec<Transaction>,
        /// Absent when the script did not compute aggregates for this read.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub dashboard: Option<Dashboard>,
    }
}

pub mod command {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum Action {
        #[serde(rename = "ADD_NEW")]
        AddNew,
        #[serde(rename = "IN")]
        In,
        #[serde(rename = "OUT")]
        Out,
        #[serde(rename = "EDIT")]
        Edit,
        #[serde(rename = "DELETE")]
        Delete,
    }

    /// Body of the write endpoint.
    ///
    /// The remote applies it asynchronously and does not report the outcome.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct MutationCommand {
        #[serde(rename = "action")]
        pub action: Action,
        pub barcode: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub item_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub unit: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub location: Option<String>,
        /// Signed delta for `IN`/`OUT`, initial stock for `ADD_NEW`.
        pub qty: i64,
        pub min_qty: i64,
        pub requestor: String,
        pub project: String,
        pub remark: String,
    }
}

mod cell {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Int(i64),
        Float(f64),
        Bool(bool),
        Text(String),
    }

    pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Cell>::deserialize(deserializer)? {
            None => String::new(),
            Some(Cell::Int(value)) => value.to_string(),
            Some(Cell::Float(value)) => value.to_string(),
            Some(Cell::Bool(value)) => value.to_string(),
            Some(Cell::Text(value)) => value,
        })
    }

    pub(crate) fn text_into<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: From<String>,
    {
        text(deserializer).map(T::from)
    }

    pub(crate) fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = text(deserializer)?;
        if value.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(value))
        }
    }

    // Blank cells and unparseable text count as zero, like an empty sheet cell.
    pub(crate) fn int<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Cell>::deserialize(deserializer)? {
            None | Some(Cell::Bool(_)) => 0,
            Some(Cell::Int(value)) => value,
            Some(Cell::Float(value)) => value.trunc() as i64,
            Some(Cell::Text(value)) => {
                let value = value.trim();
                value
                    .parse::<i64>()
                    .ok()
                    .or_else(|| value.parse::<f64>().ok().map(|v| v.trunc() as i64))
                    .unwrap_or(0)
            }
        })
    }

    pub(crate) fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        command::{Action, MutationCommand},
        item::Item,
        snapshot::Snapshot,
        transaction::TransactionAction,
    };

    #[test]
    fn item_accepts_numeric_cells() {
        let item: Item = serde_json::from_str(
            r#"{"Barcode":885001,"ItemName":"Cable tie","Unit":"pack","Location":"","Qty":"12","MinQty":3.0}"#,
        )
        .unwrap();
        assert_eq!(item.barcode, "885001");
        assert_eq!(item.location, None);
        assert_eq!(item.qty, 12);
        assert_eq!(item.min_qty, 3);
        assert_eq!(item.location_label(), "-");
    }

    #[test]
    fn item_blank_quantity_is_zero() {
        let item: Item =
            serde_json::from_str(r#"{"Barcode":"A1","ItemName":"Glove","Unit":"pair","Qty":""}"#)
                .unwrap();
        assert_eq!(item.qty, 0);
        assert_eq!(item.min_qty, 0);
        assert!(item.is_low());
    }

    #[test]
    fn snapshot_defaults_missing_sections() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.stock.is_empty());
        assert!(snapshot.transactions.is_empty());
        assert!(snapshot.dashboard.is_none());

        let snapshot: Snapshot =
            serde_json::from_str(r#"{"stock":null,"transactions":null}"#).unwrap();
        assert!(snapshot.stock.is_empty());
        assert!(snapshot.transactions.is_empty());
    }

    #[test]
    fn snapshot_parses_dashboard() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{
                "stock": [],
                "transactions": [
                    {"DateTime":"2026-10-18 09:15:00","Barcode":"A1","ItemName":"Glove","Qty":-2,"Action":"OUT","Requestor":"Niran","Project":"Tunnel B","Remark":""}
                ],
                "dashboard": {
                    "lowStockItems": [{"Barcode":"A1","ItemName":"Glove","Unit":"pair","Qty":1,"MinQty":5}],
                    "lowStockCount": 1,
                    "dailyUsageChart": [{"date":"12/10","usage":4},{"date":"13/10","usage":"7"}]
                }
            }"#,
        )
        .unwrap();

        let tx = &snapshot.transactions[0];
        assert_eq!(tx.action, TransactionAction::Out);
        assert_eq!(tx.date(), "2026-10-18");
        assert_eq!(tx.time(), "09:15:00");

        let dashboard = snapshot.dashboard.unwrap();
        assert_eq!(dashboard.low_stock_count, 1);
        assert_eq!(dashboard.low_stock_items.len(), 1);
        assert_eq!(dashboard.daily_usage_chart[1].usage, 7);
    }

    #[test]
    fn unknown_action_is_preserved() {
        let action = TransactionAction::from("ADJUST".to_string());
        assert_eq!(action, TransactionAction::Other("ADJUST".to_string()));
        assert_eq!(action.as_str(), "ADJUST");
        assert_eq!(TransactionAction::from("in".to_string()), TransactionAction::In);
    }

    #[test]
    fn command_uses_sheet_field_names() {
        let command = MutationCommand {
            action: Action::Out,
            barcode: "A1".to_string(),
            item_name: Some("Glove".to_string()),
            unit: Some("pair".to_string()),
            location: None,
            qty: -5,
            min_qty: 0,
            requestor: "Niran".to_string(),
            project: "Tunnel B".to_string(),
            remark: String::new(),
        };

        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "action": "OUT",
                "Barcode": "A1",
                "ItemName": "Glove",
                "Unit": "pair",
                "Qty": -5,
                "MinQty": 0,
                "Requestor": "Niran",
                "Project": "Tunnel B",
                "Remark": ""
            })
        );
    }

    #[test]
    fn add_new_action_name() {
        let value = serde_json::to_value(Action::AddNew).unwrap();
        assert_eq!(value, serde_json::json!("ADD_NEW"));
    }
}
