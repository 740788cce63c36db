//! Periodic recoloring of the sphere from a background thread.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use log::debug;
use rand::Rng;

use crate::sphere::ColorCell;

/// How often the sphere changes color.
pub const COLOR_INTERVAL: Duration = Duration::from_secs(10);

/// Background producer writing a random opaque color into the shared
/// [`ColorCell`]: once immediately on start, then at every interval tick.
///
/// Stopping (or dropping) the updater joins the worker thread, so no write
/// can happen after [`ColorUpdater::stop`] returns.
pub struct ColorUpdater {
    shutdown: Option<mpsc::Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl ColorUpdater {
    pub fn start(cell: Arc<ColorCell>) -> Self {
        Self::start_with_interval(cell, COLOR_INTERVAL)
    }

    pub fn start_with_interval(cell: Arc<ColorCell>, interval: Duration) -> Self {
        // The channel carries no messages; the worker wakes up on timeout
        // and exits when the sender disappears.
        let (shutdown, signal) = mpsc::channel::<()>();

        let worker = std::thread::Builder::new()
            .name("color-updater".into())
            .spawn(move || {
                let mut rng = rand::thread_rng();
                loop {
                    let r = rng.gen::<f32>();
                    let g = rng.gen::<f32>();
                    let b = rng.gen::<f32>();
                    cell.set(r, g, b, 1.0);
                    debug!("sphere color now ({r:.3}, {g:.3}, {b:.3})");

                    match signal.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        _ => break,
                    }
                }
            })
            .expect("failed to spawn color-updater thread");

        Self {
            shutdown: Some(shutdown),
            worker: Some(worker),
        }
    }

    /// Stop the timer and wait for the worker to exit.
    pub fn stop(&mut self) {
        self.shutdown.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for ColorUpdater {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::sphere::DEFAULT_COLOR;

    fn wait_for_change(cell: &ColorCell, from: [f32; 4]) -> [f32; 4] {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let color = cell.get();
            if color != from {
                return color;
            }
            assert!(Instant::now() < deadline, "no color update observed");
            std::thread::yield_now();
        }
    }

    #[test]
    fn first_update_is_immediate_and_opaque() {
        let cell = Arc::new(ColorCell::new(DEFAULT_COLOR));
        let mut updater = ColorUpdater::start_with_interval(Arc::clone(&cell), Duration::from_secs(3600));

        let [r, g, b, a] = wait_for_change(&cell, DEFAULT_COLOR);
        assert!((0.0..1.0).contains(&r));
        assert!((0.0..1.0).contains(&g));
        assert!((0.0..1.0).contains(&b));
        assert_eq!(a, 1.0);

        updater.stop();
    }

    #[test]
    fn keeps_firing_at_the_interval() {
        let cell = Arc::new(ColorCell::new(DEFAULT_COLOR));
        let mut updater =
            ColorUpdater::start_with_interval(Arc::clone(&cell), Duration::from_millis(10));

        let first = wait_for_change(&cell, DEFAULT_COLOR);
        let second = wait_for_change(&cell, first);
        assert_ne!(second, first);

        updater.stop();
    }

    #[test]
    fn no_update_lands_after_stop() {
        let cell = Arc::new(ColorCell::new(DEFAULT_COLOR));
        let mut updater =
            ColorUpdater::start_with_interval(Arc::clone(&cell), Duration::from_millis(1));
        wait_for_change(&cell, DEFAULT_COLOR);

        updater.stop();
        let settled = cell.get();
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(cell.get(), settled);
    }
}
