pub mod modal;
pub mod state;

use std::time::{Duration, Instant};

use api_types::snapshot::Snapshot;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::{
    client::{Ack, Client, ClientError},
    config::AppConfig,
    derived,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{self, AppAction},
    },
};

pub use modal::{ModalKind, ModalState};
pub use state::{AppState, NoticeLevel, View};

/// Pause between a write leaving and the follow-up read, giving the sheet
/// script time to apply the command.
const SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Results of background requests, delivered back to the event loop.
#[derive(Debug)]
pub enum AppEvent {
    SnapshotLoaded(std::result::Result<Snapshot, ClientError>),
    WriteSettled(Ack),
    WriteFailed(ClientError),
}

pub struct App {
    config: AppConfig,
    client: Client,
    pub state: AppState,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(config.endpoint())?;
        let state = AppState::new(
            client.endpoint_host().map(str::to_string),
            derived::today(config.timezone.as_deref()),
        );
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Ok(Self {
            config,
            client,
            state,
            events_tx,
            events_rx,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(self.config.tick_ms.max(16));

        self.load_snapshot();

        while !self.should_quit {
            self.tick(Instant::now());

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    _ => {}
                }
            }

            while let Ok(event) = self.events_rx.try_recv() {
                self.handle_event(event, Instant::now());
            }
        }

        Ok(())
    }

    fn tick(&mut self, now: Instant) {
        self.state.expire_notice(now);
        self.state.today = derived::today(self.config.timezone.as_deref());
    }

    /// Starts a snapshot read in the background. Without an endpoint this is
    /// a no-op and the dashboard stays empty.
    pub fn load_snapshot(&mut self) {
        if !self.client.is_configured() {
            return;
        }

        self.state.begin_request();
        let client = self.client.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.read_snapshot().await;
            let _ = events.send(AppEvent::SnapshotLoaded(result));
        });
    }

    fn submit_modal(&mut self, now: Instant) {
        if !self.state.modal.is_open() || self.state.modal.is_submitting() {
            return;
        }

        let missing = self.state.modal.missing_required();
        if !missing.is_empty() {
            self.state.modal.reject(&missing);
            return;
        }

        if !self.client.is_configured() {
            self.state.notify(
                "Set the sheet endpoint before saving.",
                NoticeLevel::Error,
                now,
            );
            return;
        }

        let Some(command) = self.state.modal.submit() else {
            return;
        };

        self.state.begin_request();
        let client = self.client.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let event = match client.write(&command).await {
                Ok(ack) => {
                    tokio::time::sleep(SETTLE_DELAY).await;
                    AppEvent::WriteSettled(ack)
                }
                Err(err) => AppEvent::WriteFailed(err),
            };
            let _ = events.send(event);
        });
    }

    pub fn handle_event(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::SnapshotLoaded(result) => {
                self.state.end_request();
                match result {
                    Ok(snapshot) => self.state.apply_snapshot(snapshot),
                    Err(err) => {
                        tracing::warn!("snapshot read failed: {err}");
                        self.state.notify(notice_for_error(&err), NoticeLevel::Error, now);
                    }
                }
            }
            AppEvent::WriteSettled(Ack) => {
                self.state.end_request();
                // Optimistic: the remote never reports whether it applied the
                // command, the reload below is the only confirmation.
                self.state.notify("Saved.", NoticeLevel::Success, now);
                self.state.modal.close();
                self.load_snapshot();
            }
            AppEvent::WriteFailed(err) => {
                self.state.end_request();
                tracing::warn!("write failed: {err}");
                self.state.modal.write_failed();
                self.state.notify(notice_for_error(&err), NoticeLevel::Error, now);
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = keymap::map_key(key);
        let now = Instant::now();

        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        if self.state.modal.is_open() {
            self.handle_modal_key(action, now);
        } else if self.state.view == View::Inventory && self.state.inventory.searching {
            self.handle_search_key(action);
        } else {
            self.handle_view_key(action);
        }
    }

    fn handle_modal_key(&mut self, action: AppAction, now: Instant) {
        if action == AppAction::Submit {
            self.submit_modal(now);
            return;
        }

        let modal = &mut self.state.modal;
        match action {
            AppAction::Cancel => modal.close(),
            AppAction::NextField | AppAction::Down => modal.focus_next(),
            AppAction::PrevField | AppAction::Up => modal.focus_prev(),
            AppAction::Backspace => modal.backspace(),
            AppAction::Input(ch) => modal.input(ch),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => {
                self.state.clear_search();
                self.state.inventory.searching = false;
            }
            AppAction::Submit | AppAction::Down => {
                self.state.inventory.searching = false;
            }
            AppAction::Backspace => self.state.pop_search(),
            AppAction::Input(ch) => self.state.push_search(ch),
            _ => {}
        }
    }

    fn handle_view_key(&mut self, action: AppAction) {
        match action {
            AppAction::NextField => self.state.set_view(self.state.view.next()),
            AppAction::PrevField => self.state.set_view(self.state.view.prev()),
            AppAction::Up => self.state.select_prev(),
            AppAction::Down => self.state.select_next(),
            AppAction::Cancel => {
                if self.state.view == View::Inventory {
                    self.state.clear_search();
                }
            }
            AppAction::Input(ch) => self.handle_view_char(ch),
            _ => {}
        }
    }

    fn handle_view_char(&mut self, ch: char) {
        match ch {
            'q' => self.should_quit = true,
            '1' | 'o' => self.state.set_view(View::Overview),
            '2' | 'i' => self.state.set_view(View::Inventory),
            '3' | 'h' => self.state.set_view(View::History),
            'r' => self.load_snapshot(),
            'j' => self.state.select_next(),
            'k' => self.state.select_prev(),
            _ if self.state.view == View::Inventory => self.handle_inventory_char(ch),
            _ => {}
        }
    }

    fn handle_inventory_char(&mut self, ch: char) {
        let kind = match ch {
            '/' => {
                self.state.inventory.searching = true;
                return;
            }
            'n' => ModalKind::Create,
            '-' => ModalKind::CheckOut,
            '+' => ModalKind::CheckIn,
            'e' => ModalKind::Edit,
            'd' => ModalKind::Delete,
            _ => return,
        };

        let item = self.state.selected_item().cloned();
        self.state.modal.open(kind, item.as_ref());
    }
}

fn notice_for_error(err: &ClientError) -> String {
    match err {
        ClientError::MissingEndpoint => "Sheet endpoint is not configured.".to_string(),
        ClientError::Transport(err) => format!("Cannot reach the sheet: {err}"),
        ClientError::Status(status) => format!("Sheet answered {status}."),
        ClientError::Decode(_) => "Sheet sent an unreadable snapshot.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use api_types::item::Item;
    use axum::{Router, routing::get};
    use crossterm::event::{KeyCode, KeyModifiers};
    use tokio::sync::mpsc::error::TryRecvError;

    use super::*;

    fn app() -> App {
        App::new(AppConfig::default()).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn glove() -> Item {
        Item {
            barcode: "885001".to_string(),
            item_name: "Safety Glove".to_string(),
            unit: "pair".to_string(),
            location: Some("Rack A".to_string()),
            qty: 12,
            min_qty: 4,
        }
    }

    #[test]
    fn view_keys_switch_panels() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.state.view, View::Inventory);
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.state.view, View::History);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.state.view, View::Overview);
    }

    #[test]
    fn refresh_without_endpoint_stays_idle() {
        let mut app = app();
        press(&mut app, KeyCode::Char('r'));
        assert!(!app.state.is_loading());
        assert!(app.state.items.is_empty());
    }

    #[test]
    fn search_mode_captures_typing() {
        let mut app = app();
        app.state.items = vec![glove()];
        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "h1");
        assert_eq!(app.state.inventory.search, "h1");
        assert_eq!(app.state.view, View::Inventory);

        press(&mut app, KeyCode::Esc);
        assert!(!app.state.inventory.searching);
        assert_eq!(app.state.inventory.search, "");
    }

    #[test]
    fn inventory_keys_open_modals_on_selection() {
        let mut app = app();
        app.state.items = vec![glove()];
        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.state.modal.state().kind(), Some(ModalKind::CheckOut));
        assert_eq!(app.state.modal.state().item(), Some(&glove()));

        press(&mut app, KeyCode::Esc);
        assert!(!app.state.modal.is_open());
    }

    #[test]
    fn item_modals_need_a_selection() {
        let mut app = app();
        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Char('e'));
        assert!(!app.state.modal.is_open());
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.state.modal.state().kind(), Some(ModalKind::Create));
    }

    #[test]
    fn modal_captures_view_keys() {
        let mut app = app();
        app.state.items = vec![glove()];
        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "q1");
        assert!(!app.should_quit);
        assert_eq!(app.state.view, View::Inventory);
        assert_eq!(app.state.modal.state().draft().unwrap().requestor, "q1");
    }

    #[test]
    fn missing_fields_block_submit() {
        let mut app = app();
        app.state.items = vec![glove()];
        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Enter);
        assert!(app.state.modal.error().is_some());
        assert!(!app.state.modal.is_submitting());
        assert!(app.state.notice.is_none());
    }

    #[test]
    fn submit_without_endpoint_is_refused_locally() {
        let mut app = app();
        app.state.items = vec![glove()];
        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Niran");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Tunnel B");
        press(&mut app, KeyCode::Enter);

        let notice = app.state.notice.as_ref().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(app.state.modal.is_open());
        assert!(!app.state.modal.is_submitting());
        assert!(!app.state.is_loading());
    }

    #[test]
    fn failed_read_keeps_cache() {
        let mut app = app();
        app.state.items = vec![glove()];
        app.state.begin_request();
        app.handle_event(
            AppEvent::SnapshotLoaded(Err(ClientError::Status(reqwest::StatusCode::BAD_GATEWAY))),
            Instant::now(),
        );
        assert_eq!(app.state.items, vec![glove()]);
        assert!(!app.state.is_loading());
        assert_eq!(app.state.notice.as_ref().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn settled_write_closes_modal_with_success() {
        let mut app = app();
        app.state.modal.open(ModalKind::Delete, Some(&glove()));
        app.state.modal.submit().unwrap();
        app.state.begin_request();

        app.handle_event(AppEvent::WriteSettled(Ack), Instant::now());
        assert!(!app.state.modal.is_open());
        assert_eq!(app.state.notice.as_ref().unwrap().level, NoticeLevel::Success);
        assert!(!app.state.is_loading());
    }

    #[test]
    fn failed_write_keeps_draft() {
        let mut app = app();
        app.state.modal.open(ModalKind::Edit, Some(&glove()));
        app.state.modal.submit().unwrap();
        app.state.begin_request();

        app.handle_event(
            AppEvent::WriteFailed(ClientError::MissingEndpoint),
            Instant::now(),
        );
        assert!(app.state.modal.is_open());
        assert!(!app.state.modal.is_submitting());
        assert_eq!(
            app.state.modal.state().draft().unwrap().item_name,
            "Safety Glove"
        );
    }

    #[derive(Clone, Default)]
    struct Hits {
        reads: Arc<AtomicUsize>,
        writes: Arc<AtomicUsize>,
    }

    async fn spawn_sheet(hits: Hits) -> String {
        let reads = hits.reads.clone();
        let writes = hits.writes.clone();
        let router = Router::new().route(
            "/exec",
            get(move || {
                let reads = reads.clone();
                async move {
                    reads.fetch_add(1, Ordering::SeqCst);
                    r#"{"stock":[],"transactions":[]}"#
                }
            })
            .post(move || {
                let writes = writes.clone();
                async move {
                    writes.fetch_add(1, Ordering::SeqCst);
                    "ok"
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/exec")
    }

    /// Lets socket I/O progress without moving the paused clock.
    async fn spin_until(mut done: impl FnMut() -> bool) {
        for _ in 0..10_000 {
            if done() {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("condition not reached");
    }

    async fn spin(times: usize) {
        for _ in 0..times {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn write_settles_after_delay_then_reloads() {
        let hits = Hits::default();
        let endpoint = spawn_sheet(hits.clone()).await;
        let mut app = App::new(AppConfig {
            endpoint: Some(endpoint),
            ..AppConfig::default()
        })
        .unwrap();
        app.state.items = vec![glove()];
        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Enter);
        assert!(app.state.modal.is_submitting());
        assert!(app.state.is_loading());

        spin_until(|| hits.writes.load(Ordering::SeqCst) == 1).await;
        // Let the response reach the write task so its settle timer starts.
        spin(1_000).await;
        assert!(matches!(app.events_rx.try_recv(), Err(TryRecvError::Empty)));

        tokio::time::advance(SETTLE_DELAY - Duration::from_millis(1)).await;
        spin(100).await;
        assert!(matches!(app.events_rx.try_recv(), Err(TryRecvError::Empty)));

        tokio::time::advance(Duration::from_millis(1)).await;
        let mut settled = None;
        spin_until(|| {
            settled = app.events_rx.try_recv().ok();
            settled.is_some()
        })
        .await;
        let settled = settled.unwrap();
        assert!(matches!(settled, AppEvent::WriteSettled(Ack)));
        assert_eq!(hits.reads.load(Ordering::SeqCst), 0);

        app.handle_event(settled, Instant::now());
        assert!(!app.state.modal.is_open());
        assert_eq!(app.state.notice.as_ref().unwrap().message, "Saved.");

        spin_until(|| hits.reads.load(Ordering::SeqCst) == 1).await;
        let mut loaded = None;
        spin_until(|| {
            loaded = app.events_rx.try_recv().ok();
            loaded.is_some()
        })
        .await;
        app.handle_event(loaded.unwrap(), Instant::now());
        assert!(app.state.items.is_empty());
        assert!(!app.state.is_loading());
        assert_eq!(hits.writes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn snapshot_event_populates_state() {
        let mut app = app();
        app.handle_event(
            AppEvent::SnapshotLoaded(Ok(Snapshot {
                stock: vec![glove()],
                ..Snapshot::default()
            })),
            Instant::now(),
        );
        assert_eq!(app.state.items.len(), 1);
        assert!(app.state.last_refresh.is_some());
    }
}
