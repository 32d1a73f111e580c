use std::time::{Duration, Instant};

use rand::Rng;

/// Chance that each metric changes on a periodic update.
pub const UPDATE_PROBABILITY: f64 = 0.3;

/// Simulated latency of a manual data refresh.
pub const REFRESH_DELAY: Duration = Duration::from_secs(2);

pub const REFRESHED_MESSAGE: &str = "Dashboard data updated";

const COUNT_STEP: i32 = 2;
const UPTIME_STEP: f64 = 0.5;
const UPTIME_MIN: f64 = 90.0;
const UPTIME_MAX: f64 = 100.0;

/// The three headline maintenance metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub active_work_orders: u32,
    pub pending_tasks: u32,
    /// Percentage in [90, 100].
    pub equipment_uptime: f64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            active_work_orders: 156,
            pending_tasks: 24,
            equipment_uptime: 95.2,
        }
    }
}

impl Metrics {
    /// Nudges each metric with the given probability.
    pub fn jitter<R: Rng + ?Sized>(&mut self, rng: &mut R, probability: f64) {
        if rng.random_bool(probability) {
            self.active_work_orders = vary_count(self.active_work_orders, rng);
        }
        if rng.random_bool(probability) {
            self.pending_tasks = vary_count(self.pending_tasks, rng);
        }
        if rng.random_bool(probability) {
            self.equipment_uptime = (self.equipment_uptime
                + rng.random_range(-UPTIME_STEP..=UPTIME_STEP))
            .clamp(UPTIME_MIN, UPTIME_MAX);
        }
    }

    /// Changes every metric (manual refresh).
    pub fn refresh_all<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.jitter(rng, 1.0);
    }

    pub fn uptime_label(&self) -> String {
        format!("{:.1}%", self.equipment_uptime)
    }
}

fn vary_count<R: Rng + ?Sized>(value: u32, rng: &mut R) -> u32 {
    value.saturating_add_signed(rng.random_range(-COUNT_STEP..=COUNT_STEP))
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub metrics: Metrics,
    interval: Duration,
    next_update: Option<Instant>,
    refreshing: bool,
}

impl DashboardState {
    pub fn new(interval: Duration) -> Self {
        Self {
            metrics: Metrics::default(),
            interval,
            next_update: None,
            refreshing: false,
        }
    }

    /// Starts the periodic update timer.
    pub fn enter(&mut self, now: Instant) {
        self.next_update = Some(now + self.interval);
    }

    /// Stops updates and forgets any in-flight refresh.
    pub fn leave(&mut self) {
        self.next_update = None;
        self.refreshing = false;
    }

    pub fn is_active(&self) -> bool {
        self.next_update.is_some()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Applies a periodic update if one is due. Returns true if it ran.
    pub fn poll<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> bool {
        match self.next_update {
            Some(due) if now >= due => {
                self.metrics.jitter(rng, UPDATE_PROBABILITY);
                self.next_update = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Marks a manual refresh as started. Returns false if one is running.
    pub fn begin_refresh(&mut self) -> bool {
        if self.refreshing {
            return false;
        }
        self.refreshing = true;
        true
    }

    pub fn finish_refresh<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.refreshing = false;
        self.metrics.refresh_all(rng);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn jitter_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut metrics = Metrics {
            active_work_orders: 1,
            pending_tasks: 0,
            equipment_uptime: 99.9,
        };

        for _ in 0..1_000 {
            let before = metrics;
            metrics.jitter(&mut rng, UPDATE_PROBABILITY);
            assert!(metrics.active_work_orders.abs_diff(before.active_work_orders) <= 2);
            assert!(metrics.pending_tasks.abs_diff(before.pending_tasks) <= 2);
            assert!((metrics.equipment_uptime - before.equipment_uptime).abs() <= 0.5 + 1e-9);
            assert!((UPTIME_MIN..=UPTIME_MAX).contains(&metrics.equipment_uptime));
        }
    }

    #[test]
    fn zero_probability_changes_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut metrics = Metrics::default();
        metrics.jitter(&mut rng, 0.0);
        assert_eq!(metrics, Metrics::default());
        assert_eq!(metrics.uptime_label(), "95.2%");
    }

    #[test]
    fn periodic_update_waits_for_interval() {
        let mut rng = StdRng::seed_from_u64(3);
        let start = Instant::now();
        let mut dashboard = DashboardState::new(Duration::from_secs(10));

        assert!(!dashboard.poll(start + Duration::from_secs(60), &mut rng));

        dashboard.enter(start);
        assert!(!dashboard.poll(start + Duration::from_secs(9), &mut rng));
        assert!(dashboard.poll(start + Duration::from_secs(10), &mut rng));
        assert!(!dashboard.poll(start + Duration::from_secs(11), &mut rng));
    }

    #[test]
    fn second_refresh_waits_for_the_first() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut dashboard = DashboardState::new(Duration::from_secs(10));
        assert!(dashboard.begin_refresh());
        assert!(!dashboard.begin_refresh());
        dashboard.finish_refresh(&mut rng);
        assert!(!dashboard.is_refreshing());
        assert!(dashboard.begin_refresh());
    }
}
