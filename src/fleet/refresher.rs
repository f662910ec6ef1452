//! Fixed-interval polling of a [`FleetSource`] into a [`RenderSink`].
//!
//! Every request takes a ticket when it starts. Results are applied through
//! the render gate, which only lets through the newest ticket of the current
//! run, so a slow fetch can never overwrite a newer one and nothing renders
//! once [`Refresher::stop`] has returned.
//!
//! Viewers hold leases. A lease that is not renewed within
//! [`RefreshPolicy::lease_ttl`] lapses, and when the last one goes the
//! refresher stops, so a closed tab cannot keep the backend busy.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dioxus::logger::tracing::{debug, error, info, warn};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::source::{FetchError, FleetSource, RenderSink};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
/// Three missed view polls.
pub const DEFAULT_LEASE_TTL: Duration = Duration::from_secs(15);
pub const DEFAULT_REFRESH_ROUTES: [&str; 2] = ["/", "/fleet"];

/// Shown to the user when a refresh fails; details only go to the log.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load fleet data";

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshPolicy {
    pub interval: Duration,
    pub fetch_timeout: Duration,
    pub lease_ttl: Duration,
    pub routes: Vec<String>,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REFRESH_INTERVAL,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            lease_ttl: DEFAULT_LEASE_TTL,
            routes: DEFAULT_REFRESH_ROUTES.iter().map(|r| r.to_string()).collect(),
        }
    }
}

impl RefreshPolicy {
    /// Whether a view at `path` gets live updates.
    pub fn enabled_for(&self, path: &str) -> bool {
        let path = normalize_route(path);
        self.routes.iter().any(|r| normalize_route(r) == path)
    }

    fn sweep_period(&self) -> Duration {
        (self.lease_ttl / 3).max(Duration::from_millis(1))
    }
}

/// `/fleet/?x=1#top` -> `/fleet`, `` -> `/`
pub fn normalize_route(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default().trim();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RefresherStatus {
    pub running: bool,
    pub ticks: u64,
    pub viewers: usize,
    pub last_tick_at: Option<DateTime<Utc>>,
    pub last_success_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub next_tick_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Rendered,
    Failed,
    /// Stopped meanwhile, or a newer request already rendered.
    Discarded,
}

/// Handle for one viewer, returned by [`Refresher::acquire`].
pub type LeaseId = u64;

#[derive(Debug, Default)]
struct RenderGate {
    running: bool,
    epoch: u64,
    last_applied: u64,
}

/// Lock order: `leases`, then `task`, then `gate`, then `status`.
struct Shared {
    source: Arc<dyn FleetSource>,
    sink: Arc<dyn RenderSink>,
    policy: RefreshPolicy,
    leases: Mutex<HashMap<LeaseId, Instant>>,
    next_lease: AtomicU64,
    task: Mutex<Option<JoinHandle<()>>>,
    gate: Mutex<RenderGate>,
    next_ticket: AtomicU64,
    status: RwLock<RefresherStatus>,
}

pub struct Refresher {
    shared: Arc<Shared>,
}

impl Refresher {
    pub fn new(
        source: Arc<dyn FleetSource>,
        sink: Arc<dyn RenderSink>,
        policy: RefreshPolicy,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                source,
                sink,
                policy,
                leases: Mutex::new(HashMap::new()),
                next_lease: AtomicU64::new(0),
                task: Mutex::new(None),
                gate: Mutex::new(RenderGate::default()),
                next_ticket: AtomicU64::new(0),
                status: RwLock::new(RefresherStatus::default()),
            }),
        }
    }

    pub fn policy(&self) -> &RefreshPolicy {
        &self.shared.policy
    }

    /// Starts polling; the first refresh happens right away.
    /// Returns `false` if it was already running.
    pub async fn start(&self) -> bool {
        let mut task = self.shared.task.lock().await;
        let epoch = {
            let mut gate = self.shared.gate.lock().await;
            if gate.running {
                return false;
            }
            gate.running = true;
            gate.epoch += 1;
            gate.epoch
        };
        {
            let mut st = self.shared.status.write().await;
            st.running = true;
            st.last_error = None;
        }
        info!(
            "[refresher] starting: source={} every {}s",
            self.shared.source.name(),
            self.shared.policy.interval.as_secs()
        );
        *task = Some(tokio::spawn(run_loop(self.shared.clone(), epoch)));
        true
    }

    /// Stops polling. Once this returns no further render happens, including
    /// for fetches that are still in flight. Returns `false` if already stopped.
    pub async fn stop(&self) -> bool {
        self.shared.halt(true).await
    }

    pub async fn is_running(&self) -> bool {
        self.shared.gate.lock().await.running
    }

    pub async fn status(&self) -> RefresherStatus {
        let viewers = self.shared.leases.lock().await.len();
        let mut st = self.shared.status.read().await.clone();
        st.viewers = viewers;
        st
    }

    /// Out-of-band refresh for the current run. Does nothing while stopped.
    pub async fn refresh_now(&self) -> RefreshOutcome {
        let epoch = {
            let gate = self.shared.gate.lock().await;
            if !gate.running {
                debug!("[refresher] refresh_now ignored: not running");
                return RefreshOutcome::Discarded;
            }
            gate.epoch
        };
        refresh_cycle(&self.shared, epoch).await
    }

    /// Registers a viewer of `path`. Returns a lease only for live routes; the
    /// caller keeps it with [`Refresher::renew`] and hands it back through
    /// [`Refresher::release`].
    pub async fn acquire(&self, path: &str) -> Option<LeaseId> {
        if !self.shared.policy.enabled_for(path) {
            debug!("[refresher] {} is not a live route", path);
            return None;
        }
        let id = self.shared.next_lease.fetch_add(1, Ordering::SeqCst) + 1;
        let mut leases = self.shared.leases.lock().await;
        leases.insert(id, Instant::now() + self.shared.policy.lease_ttl);
        if leases.len() == 1 {
            self.start().await;
        }
        debug!("[refresher] lease {} for {} ({} viewers)", id, path, leases.len());
        Some(id)
    }

    /// Extends a lease. `false` means it already lapsed and the viewer has to
    /// acquire a new one.
    pub async fn renew(&self, lease: LeaseId) -> bool {
        let mut leases = self.shared.leases.lock().await;
        match leases.get_mut(&lease) {
            Some(deadline) => {
                *deadline = Instant::now() + self.shared.policy.lease_ttl;
                true
            }
            None => false,
        }
    }

    /// Drops a viewer; the last one out stops polling.
    pub async fn release(&self, lease: LeaseId) {
        let mut leases = self.shared.leases.lock().await;
        if leases.remove(&lease).is_none() {
            warn!("[refresher] release of unknown lease {}", lease);
            return;
        }
        if leases.is_empty() {
            self.shared.halt(true).await;
        }
    }
}

impl Shared {
    /// `abort` is false when the run loop stops itself; it exits on its own.
    async fn halt(&self, abort: bool) -> bool {
        let mut task = self.task.lock().await;
        {
            let mut gate = self.gate.lock().await;
            if !gate.running {
                return false;
            }
            gate.running = false;
        }
        if let Some(handle) = task.take() {
            if abort {
                handle.abort();
            }
        }
        {
            let mut st = self.status.write().await;
            st.running = false;
            st.next_tick_at = None;
        }
        info!("[refresher] stopped");
        true
    }

    /// Drops lapsed leases. Returns `true` if that left no viewer and polling
    /// was stopped.
    async fn sweep_leases(&self) -> bool {
        let mut leases = self.leases.lock().await;
        let now = Instant::now();
        let before = leases.len();
        leases.retain(|_, deadline| *deadline > now);
        let lapsed = before - leases.len();
        if lapsed == 0 {
            return false;
        }
        warn!("[refresher] {} viewer lease(s) lapsed", lapsed);
        leases.is_empty() && self.halt(false).await
    }

    async fn is_current(&self, epoch: u64) -> bool {
        let gate = self.gate.lock().await;
        gate.running && gate.epoch == epoch
    }
}

async fn run_loop(shared: Arc<Shared>, epoch: u64) {
    let period = shared.policy.interval.max(Duration::from_millis(1));
    let mut ticks = tokio::time::interval(period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut sweep = tokio::time::interval(shared.policy.sweep_period());
    sweep.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = ticks.tick() => {
                refresh_cycle(&shared, epoch).await;

                let next = chrono::Duration::from_std(period)
                    .ok()
                    .map(|d| Utc::now() + d);
                // gate held so a concurrent stop cannot be overwritten
                let gate = shared.gate.lock().await;
                if !(gate.running && gate.epoch == epoch) {
                    return;
                }
                shared.status.write().await.next_tick_at = next;
            }
            _ = sweep.tick() => {
                if shared.sweep_leases().await || !shared.is_current(epoch).await {
                    return;
                }
            }
        }
    }
}

async fn refresh_cycle(shared: &Shared, epoch: u64) -> RefreshOutcome {
    let ticket = shared.next_ticket.fetch_add(1, Ordering::SeqCst) + 1;
    {
        let mut st = shared.status.write().await;
        st.ticks += 1;
        st.last_tick_at = Some(Utc::now());
    }

    let timeout = shared.policy.fetch_timeout;
    let result = match tokio::time::timeout(timeout, shared.source.fetch_snapshot()).await {
        Ok(result) => result,
        Err(_elapsed) => Err(FetchError::Timeout(timeout)),
    };

    let mut gate = shared.gate.lock().await;
    if !gate.running || gate.epoch != epoch {
        debug!("[refresher] dropping ticket {}: stopped", ticket);
        return RefreshOutcome::Discarded;
    }
    if ticket <= gate.last_applied {
        debug!(
            "[refresher] dropping stale ticket {} (already applied {})",
            ticket, gate.last_applied
        );
        return RefreshOutcome::Discarded;
    }
    gate.last_applied = ticket;

    match result {
        Ok(snapshot) => {
            shared.sink.render_snapshot(&snapshot).await;
            drop(gate);
            info!(
                "[refresher] rendered {} vehicles ({} available, avg battery {}%)",
                snapshot.stats.total_vehicles,
                snapshot.stats.available_vehicles,
                snapshot.stats.avg_battery
            );
            let mut st = shared.status.write().await;
            st.last_success_at = Some(Utc::now());
            st.last_error = None;
            RefreshOutcome::Rendered
        }
        Err(e) => {
            shared.sink.render_error(FETCH_FAILED_MESSAGE).await;
            drop(gate);
            error!(
                "[refresher] fetch from {} failed: {}",
                shared.source.name(),
                e
            );
            shared.status.write().await.last_error = Some(e.to_string());
            RefreshOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::model::{FleetSnapshot, VehicleRecord, VehicleStatus};
    use crate::fleet::view::{DashboardView, NotificationKind, REFRESHED_MESSAGE};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use tokio::time::sleep;

    #[derive(Clone)]
    enum Step {
        Ok(&'static str, Duration),
        Fail(Duration),
    }

    struct ScriptedSource {
        steps: Vec<Step>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(steps: Vec<Step>) -> Arc<Self> {
            Arc::new(Self {
                steps,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    fn snapshot(plate: &str) -> FleetSnapshot {
        FleetSnapshot::from_vehicles(
            vec![VehicleRecord::new(1, plate, "Nissan Leaf", 80, VehicleStatus::Available)],
            Utc::now(),
        )
    }

    #[async_trait]
    impl FleetSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn fetch_snapshot(&self) -> Result<FleetSnapshot, FetchError> {
            let idx = self.calls.fetch_add(1, Ordering::SeqCst);
            let step = self
                .steps
                .get(idx)
                .or(self.steps.last())
                .cloned()
                .expect("empty script");
            match step {
                Step::Ok(plate, delay) => {
                    sleep(delay).await;
                    Ok(snapshot(plate))
                }
                Step::Fail(delay) => {
                    sleep(delay).await;
                    Err(FetchError::Unavailable("scripted failure".into()))
                }
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Rendered {
        Snapshot(String),
        Error(String),
    }

    #[derive(Default)]
    struct RecordingSink {
        renders: std::sync::Mutex<Vec<Rendered>>,
    }

    impl RecordingSink {
        fn renders(&self) -> Vec<Rendered> {
            self.renders.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RenderSink for RecordingSink {
        async fn render_snapshot(&self, snapshot: &FleetSnapshot) {
            let plate = snapshot.vehicles[0].license_plate.clone();
            self.renders.lock().unwrap().push(Rendered::Snapshot(plate));
        }

        async fn render_error(&self, message: &str) {
            self.renders
                .lock()
                .unwrap()
                .push(Rendered::Error(message.to_string()));
        }
    }

    fn refresher(source: Arc<ScriptedSource>, sink: Arc<RecordingSink>) -> Refresher {
        Refresher::new(source, sink, RefreshPolicy::default())
    }

    #[test]
    fn route_allow_list() {
        let policy = RefreshPolicy::default();
        assert!(policy.enabled_for("/"));
        assert!(policy.enabled_for(""));
        assert!(policy.enabled_for("/fleet"));
        assert!(policy.enabled_for("/fleet/"));
        assert!(policy.enabled_for("/fleet?sort=plate#top"));
        assert!(!policy.enabled_for("/contact"));
        assert!(!policy.enabled_for("/fleet/3"));
        assert!(!policy.enabled_for("/fleetx"));
    }

    #[test]
    fn normalizes_routes() {
        assert_eq!(normalize_route("fleet/"), "/fleet");
        assert_eq!(normalize_route("///"), "/");
        assert_eq!(normalize_route("/about?x=1"), "/about");
    }

    #[tokio::test(start_paused = true)]
    async fn first_refresh_is_immediate_then_periodic() {
        let source = ScriptedSource::new(vec![Step::Ok("EV-001", Duration::ZERO)]);
        let sink = Arc::new(RecordingSink::default());
        let r = refresher(source.clone(), sink.clone());

        assert!(r.start().await);
        sleep(Duration::from_millis(10)).await;
        assert_eq!(sink.renders().len(), 1);

        sleep(Duration::from_secs(30)).await;
        assert_eq!(sink.renders().len(), 2);
        assert_eq!(source.calls(), 2);

        let status = r.status().await;
        assert!(status.running);
        assert_eq!(status.ticks, 2);
        assert!(status.last_success_at.is_some());
        assert!(status.next_tick_at.is_some());
        r.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn start_and_stop_are_idempotent() {
        let source = ScriptedSource::new(vec![Step::Ok("EV-001", Duration::ZERO)]);
        let sink = Arc::new(RecordingSink::default());
        let r = refresher(source, sink);

        assert!(!r.stop().await);
        assert!(r.start().await);
        assert!(!r.start().await);
        assert!(r.is_running().await);
        assert!(r.stop().await);
        assert!(!r.stop().await);
        assert!(!r.is_running().await);
        assert!(!r.status().await.running);
    }

    #[tokio::test(start_paused = true)]
    async fn no_render_after_stop_even_with_fetch_in_flight() {
        let source = ScriptedSource::new(vec![Step::Ok("EV-001", Duration::from_secs(5))]);
        let sink = Arc::new(RecordingSink::default());
        let r = refresher(source.clone(), sink.clone());

        r.start().await;
        sleep(Duration::from_secs(1)).await;
        assert_eq!(source.calls(), 1);
        r.stop().await;

        sleep(Duration::from_secs(120)).await;
        assert!(sink.renders().is_empty());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn out_of_band_refresh_is_dropped_after_stop() {
        let source = ScriptedSource::new(vec![
            Step::Ok("EV-001", Duration::ZERO),
            Step::Ok("EV-002", Duration::from_secs(5)),
        ]);
        let sink = Arc::new(RecordingSink::default());
        let r = Arc::new(refresher(source, sink.clone()));

        r.start().await;
        sleep(Duration::from_millis(10)).await;

        let pending = tokio::spawn({
            let r = r.clone();
            async move { r.refresh_now().await }
        });
        sleep(Duration::from_secs(1)).await;
        r.stop().await;

        assert_eq!(pending.await.unwrap(), RefreshOutcome::Discarded);
        assert_eq!(sink.renders(), vec![Rendered::Snapshot("EV-001".into())]);
        assert_eq!(r.refresh_now().await, RefreshOutcome::Discarded);
    }

    #[tokio::test(start_paused = true)]
    async fn slower_older_request_does_not_overwrite_newer() {
        let source = ScriptedSource::new(vec![
            Step::Ok("EV-OLD", Duration::from_secs(10)),
            Step::Ok("EV-NEW", Duration::from_secs(1)),
        ]);
        let sink = Arc::new(RecordingSink::default());
        let r = refresher(source, sink.clone());

        r.start().await;
        sleep(Duration::from_secs(1)).await;
        assert_eq!(r.refresh_now().await, RefreshOutcome::Rendered);

        sleep(Duration::from_secs(10)).await;
        assert_eq!(sink.renders(), vec![Rendered::Snapshot("EV-NEW".into())]);
        r.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn slow_fetch_times_out_as_error() {
        let source = ScriptedSource::new(vec![Step::Ok("EV-001", Duration::from_secs(20))]);
        let sink = Arc::new(RecordingSink::default());
        let r = refresher(source, sink.clone());

        r.start().await;
        sleep(Duration::from_secs(11)).await;
        assert_eq!(
            sink.renders(),
            vec![Rendered::Error(FETCH_FAILED_MESSAGE.to_string())]
        );
        let status = r.status().await;
        assert!(status.last_error.unwrap().contains("timed out"));
        r.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn failed_tick_keeps_previous_render() {
        let source = ScriptedSource::new(vec![
            Step::Ok("EV-001", Duration::from_millis(800)),
            Step::Fail(Duration::from_millis(800)),
        ]);
        let view = Arc::new(DashboardView::new());
        let r = Refresher::new(source, view.clone(), RefreshPolicy::default());

        r.start().await;
        sleep(Duration::from_secs(1)).await;
        let first = view.fleet().await.expect("tick 1 rendered");
        assert_eq!(first.cards[0].license_plate, "EV-001");
        assert!(view.notifications().await.is_empty());

        sleep(Duration::from_secs(30)).await;
        let after = view.fleet().await.expect("still rendered");
        assert_eq!(after, first);
        let notes = view.notifications().await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, FETCH_FAILED_MESSAGE);
        r.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn viewers_drive_start_and_stop() {
        let source = ScriptedSource::new(vec![Step::Ok("EV-001", Duration::ZERO)]);
        let sink = Arc::new(RecordingSink::default());
        let r = refresher(source, sink);

        assert_eq!(r.acquire("/contact").await, None);
        assert!(!r.is_running().await);

        let a = r.acquire("/fleet/").await.expect("live route");
        let b = r.acquire("/").await.expect("live route");
        assert_ne!(a, b);
        assert!(r.is_running().await);
        assert_eq!(r.status().await.viewers, 2);

        r.release(a).await;
        assert!(r.is_running().await);
        // double release is ignored
        r.release(a).await;
        assert!(r.is_running().await);
        r.release(b).await;
        assert!(!r.is_running().await);
        assert_eq!(r.status().await.viewers, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_lease_lapses_and_stops_polling() {
        let source = ScriptedSource::new(vec![Step::Ok("EV-001", Duration::ZERO)]);
        let sink = Arc::new(RecordingSink::default());
        let r = refresher(source.clone(), sink);

        let lease = r.acquire("/fleet").await.expect("live route");
        assert!(r.is_running().await);

        // no renewals: gone after the ttl plus one sweep
        sleep(DEFAULT_LEASE_TTL + DEFAULT_LEASE_TTL / 3 + Duration::from_secs(1)).await;
        assert!(!r.is_running().await);
        assert!(!r.renew(lease).await);
        let calls = source.calls();

        sleep(Duration::from_secs(300)).await;
        assert_eq!(source.calls(), calls);

        // a returning viewer starts a fresh run
        assert!(r.acquire("/fleet").await.is_some());
        assert!(r.is_running().await);
        r.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn renewed_lease_keeps_polling() {
        let source = ScriptedSource::new(vec![Step::Ok("EV-001", Duration::ZERO)]);
        let sink = Arc::new(RecordingSink::default());
        let r = refresher(source.clone(), sink.clone());

        let lease = r.acquire("/").await.expect("live route");
        for _ in 0..23 {
            sleep(Duration::from_secs(5)).await;
            assert!(r.renew(lease).await);
        }
        assert!(r.is_running().await);
        // t=0, 30, 60, 90
        assert_eq!(sink.renders().len(), 4);
        r.release(lease).await;
        assert!(!r.is_running().await);
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_loop_leaves_next_tick_unset() {
        let source = ScriptedSource::new(vec![Step::Ok("EV-001", Duration::ZERO)]);
        let sink = Arc::new(RecordingSink::default());
        let r = refresher(source, sink.clone());

        r.start().await;
        sleep(Duration::from_millis(10)).await;
        assert!(r.status().await.next_tick_at.is_some());

        // stop observed by the loop before its abort lands
        r.shared.gate.lock().await.running = false;
        r.shared.status.write().await.next_tick_at = None;
        sleep(Duration::from_secs(31)).await;

        assert!(r.status().await.next_tick_at.is_none());
        assert_eq!(sink.renders().len(), 1);
        assert!(r.shared.task.lock().await.as_ref().map_or(true, |h| h.is_finished()));
    }

    #[tokio::test(start_paused = true)]
    async fn user_refresh_gets_a_private_success_notice() {
        let source = ScriptedSource::new(vec![
            Step::Ok("EV-001", Duration::ZERO),
            Step::Ok("EV-002", Duration::ZERO),
            Step::Fail(Duration::ZERO),
        ]);
        let view = Arc::new(DashboardView::new());
        let r = Refresher::new(source, view.clone(), RefreshPolicy::default());

        // stopped: nothing happens
        assert_eq!(view.refresh_for_user(&r).await, None);

        r.start().await;
        sleep(Duration::from_millis(10)).await;

        let notice = view.refresh_for_user(&r).await.expect("rendered");
        assert_eq!(notice.kind, NotificationKind::Success);
        assert_eq!(notice.message, REFRESHED_MESSAGE);
        assert_eq!(view.fleet().await.unwrap().cards[0].license_plate, "EV-002");
        // other viewers never see it
        assert!(view.notifications().await.is_empty());

        // failures go to every viewer through the sink, not as a private notice
        assert_eq!(view.refresh_for_user(&r).await, None);
        let shared = view.notifications().await;
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].kind, NotificationKind::Error);
        assert_ne!(shared[0].id, notice.id);
        r.stop().await;
    }
}
