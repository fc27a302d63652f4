use std::time::{Duration, Instant};

use api_types::{
    dashboard::Dashboard, item::Item, snapshot::Snapshot, transaction::Transaction,
};
use chrono::{DateTime, Local, NaiveDate};

use crate::{
    app::modal::ModalController,
    derived::{self, Stats},
};

/// How long a status notice stays on screen.
pub const NOTICE_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Overview,
    Inventory,
    History,
}

impl View {
    pub const ALL: [View; 3] = [View::Overview, View::Inventory, View::History];

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Inventory => "Inventory",
            Self::History => "History",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Overview => Self::Inventory,
            Self::Inventory => Self::History,
            Self::History => Self::Overview,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Overview => Self::History,
            Self::Inventory => Self::Overview,
            Self::History => Self::Inventory,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct InventoryState {
    pub search: String,
    pub searching: bool,
    pub selected: usize,
}

#[derive(Debug, Default)]
pub struct HistoryState {
    pub selected: usize,
}

#[derive(Debug)]
pub struct AppState {
    pub items: Vec<Item>,
    pub transactions: Vec<Transaction>,
    pub dashboard: Dashboard,
    pub view: View,
    pub modal: ModalController,
    pub inventory: InventoryState,
    pub history: HistoryState,
    pub notice: Option<Notice>,
    pub endpoint: Option<String>,
    pub last_refresh: Option<DateTime<Local>>,
    pub today: NaiveDate,
    in_flight: usize,
}

impl AppState {
    pub fn new(endpoint: Option<String>, today: NaiveDate) -> Self {
        Self {
            items: Vec::new(),
            transactions: Vec::new(),
            dashboard: Dashboard::default(),
            view: View::default(),
            modal: ModalController::default(),
            inventory: InventoryState::default(),
            history: HistoryState::default(),
            notice: None,
            endpoint,
            last_refresh: None,
            today,
            in_flight: 0,
        }
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    /// Replaces the cache with the server's view. Items and transactions are
    /// swapped wholesale; the aggregate only when the read carried one.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.items = snapshot.stock;
        self.transactions = snapshot.transactions;
        if let Some(dashboard) = snapshot.dashboard {
            self.dashboard = dashboard;
        }
        self.last_refresh = Some(Local::now());
        self.clamp_selection();
    }

    pub fn begin_request(&mut self) {
        self.in_flight += 1;
    }

    pub fn end_request(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Shows `message`, replacing whatever notice and deadline were pending.
    pub fn notify(&mut self, message: impl Into<String>, level: NoticeLevel, now: Instant) {
        self.notice = Some(Notice {
            message: message.into(),
            level,
            expires_at: now + NOTICE_LIFETIME,
        });
    }

    pub fn expire_notice(&mut self, now: Instant) {
        if self
            .notice
            .as_ref()
            .is_some_and(|notice| now >= notice.expires_at)
        {
            self.notice = None;
        }
    }

    pub fn stats(&self) -> Stats {
        derived::stats(&self.items, &self.transactions, &self.dashboard, self.today)
    }

    pub fn filtered_items(&self) -> Vec<&Item> {
        derived::filter_items(&self.items, &self.inventory.search)
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.filtered_items()
            .get(self.inventory.selected)
            .copied()
    }

    pub fn select_next(&mut self) {
        match self.view {
            View::Inventory => {
                let len = self.filtered_items().len();
                if len > 0 {
                    self.inventory.selected = (self.inventory.selected + 1).min(len - 1);
                }
            }
            View::History => {
                let len = self.transactions.len();
                if len > 0 {
                    self.history.selected = (self.history.selected + 1).min(len - 1);
                }
            }
            View::Overview => {}
        }
    }

    pub fn select_prev(&mut self) {
        match self.view {
            View::Inventory => {
                self.inventory.selected = self.inventory.selected.saturating_sub(1);
            }
            View::History => {
                self.history.selected = self.history.selected.saturating_sub(1);
            }
            View::Overview => {}
        }
    }

    pub fn push_search(&mut self, ch: char) {
        self.inventory.search.push(ch);
        self.inventory.selected = 0;
    }

    pub fn pop_search(&mut self) {
        self.inventory.search.pop();
        self.inventory.selected = 0;
    }

    pub fn clear_search(&mut self) {
        self.inventory.search.clear();
        self.inventory.selected = 0;
    }

    fn clamp_selection(&mut self) {
        let items = self.filtered_items().len();
        self.inventory.selected = self.inventory.selected.min(items.saturating_sub(1));
        self.history.selected = self
            .history
            .selected
            .min(self.transactions.len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(barcode: &str, name: &str) -> Item {
        Item {
            barcode: barcode.to_string(),
            item_name: name.to_string(),
            unit: "pcs".to_string(),
            location: None,
            qty: 5,
            min_qty: 1,
        }
    }

    fn state() -> AppState {
        AppState::new(None, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
    }

    #[test]
    fn starts_on_overview_and_empty() {
        let state = state();
        assert_eq!(state.view, View::Overview);
        assert!(state.items.is_empty());
        assert!(!state.is_loading());
        assert!(!state.modal.is_open());
    }

    #[test]
    fn view_cycles_without_touching_data() {
        let mut state = state();
        state.items.push(item("A1", "Glove"));
        state.set_view(state.view.next());
        assert_eq!(state.view, View::Inventory);
        state.set_view(state.view.next().next());
        assert_eq!(state.view, View::Overview);
        assert_eq!(state.view.prev(), View::History);
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn snapshot_replaces_cache_wholesale() {
        let mut state = state();
        state.items = vec![item("A1", "Glove"), item("A2", "Helmet")];
        state.dashboard.low_stock_count = 4;

        state.apply_snapshot(Snapshot {
            stock: vec![item("B1", "Tape")],
            transactions: Vec::new(),
            dashboard: None,
        });

        assert_eq!(state.items, vec![item("B1", "Tape")]);
        assert_eq!(state.dashboard.low_stock_count, 4);
        assert!(state.last_refresh.is_some());

        state.apply_snapshot(Snapshot {
            stock: Vec::new(),
            transactions: Vec::new(),
            dashboard: Some(Dashboard {
                low_stock_items: Vec::new(),
                low_stock_count: 0,
                daily_usage_chart: Vec::new(),
            }),
        });
        assert!(state.items.is_empty());
        assert_eq!(state.dashboard.low_stock_count, 0);
    }

    #[test]
    fn selection_is_clamped_after_reload() {
        let mut state = state();
        state.set_view(View::Inventory);
        state.items = vec![item("A1", "Glove"), item("A2", "Helmet"), item("A3", "Tape")];
        state.select_next();
        state.select_next();
        assert_eq!(state.selected_item().map(|i| i.barcode.as_str()), Some("A3"));

        state.apply_snapshot(Snapshot {
            stock: vec![item("A1", "Glove")],
            ..Snapshot::default()
        });
        assert_eq!(state.selected_item().map(|i| i.barcode.as_str()), Some("A1"));
    }

    #[test]
    fn selection_follows_search() {
        let mut state = state();
        state.items = vec![item("A1", "Glove"), item("A2", "Helmet")];
        for ch in "helm".chars() {
            state.push_search(ch);
        }
        assert_eq!(state.filtered_items().len(), 1);
        assert_eq!(
            state.selected_item().map(|i| i.item_name.as_str()),
            Some("Helmet")
        );
        state.clear_search();
        assert_eq!(state.filtered_items().len(), 2);
        assert_eq!(state.items.len(), 2);
    }

    #[test]
    fn loading_counts_overlapping_requests() {
        let mut state = state();
        state.begin_request();
        state.begin_request();
        state.end_request();
        assert!(state.is_loading());
        state.end_request();
        state.end_request();
        assert!(!state.is_loading());
    }

    #[test]
    fn notice_lives_three_seconds() {
        let mut state = state();
        let t = Instant::now();
        state.notify("saved", NoticeLevel::Success, t);

        state.expire_notice(t + Duration::from_millis(2900));
        assert!(state.notice.is_some());

        state.expire_notice(t + Duration::from_millis(3100));
        assert!(state.notice.is_none());
    }

    #[test]
    fn new_notice_replaces_pending_deadline() {
        let mut state = state();
        let t = Instant::now();
        state.notify("first", NoticeLevel::Success, t);
        state.notify("second", NoticeLevel::Error, t + Duration::from_secs(1));

        state.expire_notice(t + Duration::from_millis(3100));
        let notice = state.notice.as_ref().unwrap();
        assert_eq!(notice.message, "second");
        assert_eq!(notice.level, NoticeLevel::Error);

        state.expire_notice(t + Duration::from_millis(4100));
        assert!(state.notice.is_none());
    }
}
