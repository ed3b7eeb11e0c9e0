//! View model and controller behind the balance page.
//!
//! The controller never looks elements up globally: it is handed an [`Api`]
//! transport and a [`View`] and drives both explicitly. The browser page in
//! [`crate::ui`] follows the same refresh and submit sequence.

use crate::errors::ClientError;
use crate::models::StateSnapshot;
use std::collections::BTreeMap;
use std::future::Future;
use tracing::{debug, warn};

pub const BALANCE_TEXT: &str = "balanceText";
pub const NEED_TEXT: &str = "needText";
pub const TARGET_TEXT: &str = "targetText";
pub const TODAY_TEXT: &str = "todayText";
pub const BALANCE_CARD: &str = "balanceCard";

pub const POSITIVE_BORDER: &str = "1px solid rgba(55,214,122,0.4)";
pub const NEGATIVE_BORDER: &str = "1px solid rgba(255,92,92,0.4)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitKind {
    Work,
    Relax,
    Target,
}

impl SubmitKind {
    pub const ALL: [SubmitKind; 3] = [SubmitKind::Work, SubmitKind::Relax, SubmitKind::Target];

    pub fn endpoint(self) -> &'static str {
        match self {
            SubmitKind::Work => "/api/work",
            SubmitKind::Relax => "/api/relax",
            SubmitKind::Target => "/api/target",
        }
    }

    pub fn input_id(self) -> &'static str {
        match self {
            SubmitKind::Work => "workInput",
            SubmitKind::Relax => "relaxInput",
            SubmitKind::Target => "targetInput",
        }
    }

    pub fn button_id(self) -> &'static str {
        match self {
            SubmitKind::Work => "workBtn",
            SubmitKind::Relax => "relaxBtn",
            SubmitKind::Target => "targetBtn",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            SubmitKind::Work => "Enter minutes (e.g. 45)",
            SubmitKind::Relax => "Enter minutes (e.g. 30)",
            SubmitKind::Target => "Enter target minutes (e.g. 120)",
        }
    }

    /// Body sent to [`SubmitKind::endpoint`].
    pub fn body(self, value: i64) -> serde_json::Value {
        match self {
            SubmitKind::Work | SubmitKind::Relax => serde_json::json!({ "minutes": value }),
            SubmitKind::Target => serde_json::json!({ "target": value }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    Positive,
    Negative,
}

impl Border {
    pub fn for_balance(balance: i64) -> Self {
        if balance >= 0 {
            Border::Positive
        } else {
            Border::Negative
        }
    }

    pub fn css(self) -> &'static str {
        match self {
            Border::Positive => POSITIVE_BORDER,
            Border::Negative => NEGATIVE_BORDER,
        }
    }
}

/// Network side of the controller.
pub trait Api {
    fn fetch_state(&self) -> impl Future<Output = Result<StateSnapshot, ClientError>> + Send;

    fn post_json(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> impl Future<Output = Result<serde_json::Value, ClientError>> + Send;
}

/// Element handles the controller reads and writes.
pub trait View {
    fn set_text(&mut self, id: &str, text: &str);
    fn set_border(&mut self, id: &str, border: Border);
    fn input_value(&self, id: &str) -> String;
    fn set_input_value(&mut self, id: &str, value: &str);
    /// Blocking user-facing notice.
    fn alert(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected,
    Submitted(StateSnapshot),
}

pub struct UiController<A> {
    api: A,
}

impl<A: Api> UiController<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetches one snapshot and renders all of it. On failure the view is left untouched.
    pub async fn refresh<V: View>(&self, view: &mut V) -> Result<StateSnapshot, ClientError> {
        let snapshot = self.api.fetch_state().await?;
        render(view, &snapshot);
        Ok(snapshot)
    }

    pub async fn submit_minutes<V: View>(
        &self,
        kind: SubmitKind,
        view: &mut V,
    ) -> Result<SubmitOutcome, ClientError> {
        let raw = view.input_value(kind.input_id());
        let Some(value) = parse_int(&raw).filter(|v| *v > 0) else {
            debug!(input = %raw, endpoint = kind.endpoint(), "rejected submission");
            view.alert(kind.hint());
            return Ok(SubmitOutcome::Rejected);
        };

        if let Err(err) = self.api.post_json(kind.endpoint(), &kind.body(value)).await {
            warn!(endpoint = kind.endpoint(), "submission failed: {err}");
            return Err(err);
        }
        view.set_input_value(kind.input_id(), "");
        let snapshot = self.refresh(view).await?;
        Ok(SubmitOutcome::Submitted(snapshot))
    }
}

pub fn render<V: View>(view: &mut V, snapshot: &StateSnapshot) {
    view.set_text(BALANCE_TEXT, &format!("{} min", snapshot.balance));
    view.set_text(NEED_TEXT, &format!("To break even: {} min", snapshot.need));
    view.set_text(TARGET_TEXT, &snapshot.target.to_string());
    view.set_text(TODAY_TEXT, &snapshot.today.to_string());
    view.set_border(BALANCE_CARD, Border::for_balance(snapshot.balance));
}

/// Base-10 prefix parse: leading whitespace and a sign are allowed, and
/// parsing stops at the first non-digit. `None` when no digits are found
/// or the value overflows.
pub fn parse_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// In-memory element store, used by the CLI and by tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryView {
    pub texts: BTreeMap<String, String>,
    pub inputs: BTreeMap<String, String>,
    pub borders: BTreeMap<String, Border>,
    pub alerts: Vec<String>,
}

impl MemoryView {
    pub fn text(&self, id: &str) -> Option<&str> {
        self.texts.get(id).map(String::as_str)
    }

    pub fn border(&self, id: &str) -> Option<Border> {
        self.borders.get(id).copied()
    }

    /// Four display lines in page order.
    pub fn summary(&self) -> String {
        let line = |label: &str, id: &str| format!("{label:<8}{}", self.text(id).unwrap_or("-"));
        [
            line("Balance", BALANCE_TEXT),
            line("", NEED_TEXT),
            line("Target", TARGET_TEXT),
            line("Today", TODAY_TEXT),
        ]
        .join("\n")
    }
}

impl View for MemoryView {
    fn set_text(&mut self, id: &str, text: &str) {
        self.texts.insert(id.to_string(), text.to_string());
    }

    fn set_border(&mut self, id: &str, border: Border) {
        self.borders.insert(id.to_string(), border);
    }

    fn input_value(&self, id: &str) -> String {
        self.inputs.get(id).cloned().unwrap_or_default()
    }

    fn set_input_value(&mut self, id: &str, value: &str) {
        self.inputs.insert(id.to_string(), value.to_string());
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Today;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Get,
        Post(String, serde_json::Value),
    }

    struct FakeApi {
        snapshot: StateSnapshot,
        calls: Mutex<Vec<Call>>,
        fail_post: bool,
        fail_get: bool,
    }

    impl FakeApi {
        fn new(snapshot: StateSnapshot) -> Self {
            Self {
                snapshot,
                calls: Mutex::new(Vec::new()),
                fail_post: false,
                fail_get: false,
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn server_error(url: &str) -> ClientError {
        ClientError::Status {
            url: url.to_string(),
            status: 500,
            message: "boom".to_string(),
        }
    }

    impl Api for FakeApi {
        async fn fetch_state(&self) -> Result<StateSnapshot, ClientError> {
            self.calls.lock().unwrap().push(Call::Get);
            if self.fail_get {
                return Err(server_error("/api/state"));
            }
            Ok(self.snapshot.clone())
        }

        async fn post_json(
            &self,
            endpoint: &str,
            body: &serde_json::Value,
        ) -> Result<serde_json::Value, ClientError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Post(endpoint.to_string(), body.clone()));
            if self.fail_post {
                return Err(server_error(endpoint));
            }
            Ok(serde_json::json!({ "ok": true }))
        }
    }

    fn snapshot(balance: i64) -> StateSnapshot {
        StateSnapshot {
            balance,
            need: (-balance).max(0),
            target: 120,
            today: Today::Count(90),
            last_applied: None,
        }
    }

    fn view_with(kind: SubmitKind, value: &str) -> MemoryView {
        let mut view = MemoryView::default();
        view.set_input_value(kind.input_id(), value);
        view
    }

    #[test]
    fn parse_int_follows_prefix_rules() {
        assert_eq!(parse_int("45"), Some(45));
        assert_eq!(parse_int("  45  "), Some(45));
        assert_eq!(parse_int("45.9"), Some(45));
        assert_eq!(parse_int("12abc"), Some(12));
        assert_eq!(parse_int("+7"), Some(7));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int(".5"), None);
        assert_eq!(parse_int("99999999999999999999"), None);
    }

    #[test]
    fn renders_negative_snapshot() {
        let mut view = MemoryView::default();
        render(&mut view, &snapshot(-15));
        assert_eq!(view.text(BALANCE_TEXT), Some("-15 min"));
        assert_eq!(view.text(NEED_TEXT), Some("To break even: 15 min"));
        assert_eq!(view.text(TARGET_TEXT), Some("120"));
        assert_eq!(view.text(TODAY_TEXT), Some("90"));
        assert_eq!(view.border(BALANCE_CARD), Some(Border::Negative));
    }

    #[test]
    fn renders_scenario_snapshot_verbatim() {
        let snap = StateSnapshot {
            balance: -15,
            need: 20,
            target: 120,
            today: Today::Count(90),
            last_applied: None,
        };
        let mut view = MemoryView::default();
        render(&mut view, &snap);
        assert_eq!(view.text(BALANCE_TEXT), Some("-15 min"));
        assert_eq!(view.text(NEED_TEXT), Some("To break even: 20 min"));
        assert_eq!(view.text(TARGET_TEXT), Some("120"));
        assert_eq!(view.text(TODAY_TEXT), Some("90"));
        assert_eq!(view.border(BALANCE_CARD).map(Border::css), Some(NEGATIVE_BORDER));
    }

    #[test]
    fn rendering_is_idempotent() {
        let snap = snapshot(30);
        let mut once = MemoryView::default();
        render(&mut once, &snap);
        let mut twice = once.clone();
        render(&mut twice, &snap);
        assert_eq!(once.texts, twice.texts);
        assert_eq!(once.borders, twice.borders);
    }

    #[test]
    fn zero_balance_is_positive() {
        assert_eq!(Border::for_balance(0), Border::Positive);
        assert_eq!(Border::for_balance(1), Border::Positive);
        assert_eq!(Border::for_balance(-1), Border::Negative);
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_network() {
        for kind in SubmitKind::ALL {
            for raw in ["", "abc", "0", "-5", "  ", "-0"] {
                let api = FakeApi::new(snapshot(0));
                let controller = UiController::new(api);
                let mut view = view_with(kind, raw);

                let outcome = controller.submit_minutes(kind, &mut view).await.unwrap();
                assert_eq!(outcome, SubmitOutcome::Rejected);
                assert!(controller.api().calls().is_empty());
                assert_eq!(view.alerts, vec![kind.hint().to_string()]);
                assert_eq!(view.input_value(kind.input_id()), raw);
            }
        }
    }

    #[tokio::test]
    async fn work_submission_posts_clears_then_refreshes() {
        let controller = UiController::new(FakeApi::new(snapshot(45)));
        let mut view = view_with(SubmitKind::Work, "45");

        let outcome = controller.submit_minutes(SubmitKind::Work, &mut view).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Submitted(snapshot(45)));
        assert_eq!(
            controller.api().calls(),
            vec![
                Call::Post("/api/work".to_string(), serde_json::json!({ "minutes": 45 })),
                Call::Get,
            ]
        );
        assert_eq!(view.input_value("workInput"), "");
        assert_eq!(view.text(BALANCE_TEXT), Some("45 min"));
        assert!(view.alerts.is_empty());
    }

    #[tokio::test]
    async fn target_submission_sends_target_field() {
        let controller = UiController::new(FakeApi::new(snapshot(0)));
        let mut view = view_with(SubmitKind::Target, "90.5");

        controller.submit_minutes(SubmitKind::Target, &mut view).await.unwrap();

        assert_eq!(
            controller.api().calls(),
            vec![
                Call::Post("/api/target".to_string(), serde_json::json!({ "target": 90 })),
                Call::Get,
            ]
        );
        assert_eq!(view.input_value("targetInput"), "");
    }

    #[tokio::test]
    async fn failed_post_keeps_input_and_skips_refresh() {
        let mut api = FakeApi::new(snapshot(0));
        api.fail_post = true;
        let controller = UiController::new(api);
        let mut view = view_with(SubmitKind::Relax, "30");

        let err = controller
            .submit_minutes(SubmitKind::Relax, &mut view)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Status { status: 500, .. }));
        assert_eq!(controller.api().calls().len(), 1);
        assert_eq!(view.input_value("relaxInput"), "30");
    }

    #[tokio::test]
    async fn failed_refresh_leaves_view_untouched() {
        let mut api = FakeApi::new(snapshot(0));
        api.fail_get = true;
        let controller = UiController::new(api);
        let mut view = MemoryView::default();
        render(&mut view, &snapshot(10));
        let before = view.texts.clone();

        assert!(controller.refresh(&mut view).await.is_err());
        assert_eq!(view.texts, before);
    }
}
