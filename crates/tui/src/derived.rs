//! Figures recomputed from the cached snapshot on every frame.
use api_types::{dashboard::Dashboard, item::Item, transaction::Transaction};
use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;

/// Counts computed in this process from cached rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocalStats {
    pub total_items: usize,
    pub today_transactions: usize,
}

/// Counts copied verbatim from the server aggregate.
///
/// Low stock is never recounted here: the sheet decides what "low" means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServerStats {
    pub low_stock: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub local: LocalStats,
    pub server: ServerStats,
}

pub fn stats(
    items: &[Item],
    transactions: &[Transaction],
    dashboard: &Dashboard,
    today: NaiveDate,
) -> Stats {
    let today = today.format("%Y-%m-%d").to_string();
    let today_transactions = transactions
        .iter()
        .filter(|tx| tx.date_time.starts_with(&today))
        .count();

    Stats {
        local: LocalStats {
            total_items: items.len(),
            today_transactions,
        },
        server: ServerStats {
            low_stock: dashboard.low_stock_count,
        },
    }
}

/// Items whose name, barcode or location contains `search`, ignoring case.
pub fn filter_items<'a>(items: &'a [Item], search: &str) -> Vec<&'a Item> {
    let needle = search.to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|item| {
            item.item_name.to_lowercase().contains(&needle)
                || item.barcode.to_lowercase().contains(&needle)
                || item
                    .location
                    .as_deref()
                    .is_some_and(|location| location.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Today's date in `timezone`, or in the system zone when it is unset or
/// does not parse.
pub fn today(timezone: Option<&str>) -> NaiveDate {
    match timezone.map(str::parse::<Tz>) {
        Some(Ok(tz)) => Utc::now().with_timezone(&tz).date_naive(),
        Some(Err(_)) | None => Local::now().date_naive(),
    }
}
