//! Per-system frame timings, kept over a short sliding window for the debug overlay and slow-frame warnings.

use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use bevy_ecs::system::IntoSystem;
use bevy_ecs::world::World;
use bevy_ecs::{resource::Resource, system::System};
use circular_buffer::CircularBuffer;
use num_width::NumberWidth;
use parking_lot::Mutex;
use smallvec::SmallVec;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount, EnumIter, IntoStaticStr};
use thousands::Separable;

const MAX_SYSTEMS: usize = SystemId::COUNT;
/// Frames of history kept per system.
const WINDOW: usize = 30;
/// Systems listed in the overlay beneath the frame total.
const OVERLAY_ROWS: usize = 9;
/// A single system taking this long is named outright in slow-frame warnings.
const SLOW_SYSTEM: Duration = Duration::from_millis(2);

#[derive(EnumCount, EnumIter, IntoStaticStr, Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum SystemId {
    Total,
    Input,
    Pointer,
    PlayerControls,
    PlayerWalk,
    PlayerWield,
    Creatures,
    Plants,
    Crafting,
    Census,
    ErrorLog,
    WorldRender,
    HudRender,
    CraftingRender,
    DebugRender,
    Fullscreen,
    Present,
}

impl Display for SystemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Into::<&'static str>::into(self).to_ascii_lowercase())
    }
}

/// Mean and sample standard deviation of a window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimingStats {
    pub mean: Duration,
    pub deviation: Duration,
}

/// Recent durations of one system, one entry per frame.
///
/// Frames where the system did not run are filled with zeros so the window always spans the
/// same number of frames.
#[derive(Debug, Default)]
pub struct SampleWindow {
    samples: CircularBuffer<WINDOW, Duration>,
    last_tick: u64,
}

impl SampleWindow {
    fn pad_to(&mut self, tick: u64) {
        let skipped = tick.saturating_sub(self.last_tick).saturating_sub(1);
        for _ in 0..skipped.min(WINDOW as u64) {
            self.samples.push_back(Duration::ZERO);
        }
    }

    /// Records a sample for `tick`. Samples from earlier ticks than the last one are dropped.
    pub fn record(&mut self, duration: Duration, tick: u64) {
        if tick < self.last_tick {
            return;
        }
        self.pad_to(tick);
        self.samples.push_back(duration);
        self.last_tick = tick;
    }

    pub fn latest(&self) -> Duration {
        self.samples.back().copied().unwrap_or(Duration::ZERO)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Statistics as of `tick`, counting frames since the last sample as zeros.
    pub fn stats(&mut self, tick: u64) -> TimingStats {
        if tick > self.last_tick {
            self.pad_to(tick);
            self.last_tick = tick;
        }

        // Welford's online mean and variance.
        let (count, mean, m2) = self.samples.iter().fold((0u32, 0.0f64, 0.0f64), |(n, mean, m2), d| {
            let x = d.as_secs_f64();
            let n = n + 1;
            let delta = x - mean;
            let mean = mean + delta / n as f64;
            (n, mean, m2 + delta * (x - mean))
        });

        match count {
            0 => TimingStats::default(),
            1 => TimingStats {
                mean: Duration::from_secs_f64(mean),
                deviation: Duration::ZERO,
            },
            n => TimingStats {
                mean: Duration::from_secs_f64(mean),
                deviation: Duration::from_secs_f64((m2 / (n - 1) as f64).sqrt()),
            },
        }
    }
}

/// The frame counter the timings are keyed by.
#[derive(Resource, Debug, Default)]
pub struct Timing {
    current_tick: AtomicU64,
}

impl Timing {
    pub fn get_current_tick(&self) -> u64 {
        self.current_tick.load(Ordering::Relaxed)
    }

    /// Advances to the next frame and returns its number.
    pub fn increment_tick(&self) -> u64 {
        self.current_tick.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[derive(Resource, Debug)]
pub struct SystemTimings {
    windows: micromap::Map<SystemId, Mutex<SampleWindow>, MAX_SYSTEMS>,
}

impl Default for SystemTimings {
    fn default() -> Self {
        let mut windows = micromap::Map::new();
        for id in SystemId::iter() {
            windows.insert(id, Mutex::new(SampleWindow::default()));
        }
        Self { windows }
    }
}

impl SystemTimings {
    pub fn add_timing(&self, id: SystemId, duration: Duration, tick: u64) {
        if let Some(window) = self.windows.get(&id) {
            window.lock().record(duration, tick);
        }
    }

    /// The whole frame, schedule and bookkeeping included.
    pub fn add_total_timing(&self, duration: Duration, tick: u64) {
        self.add_timing(SystemId::Total, duration, tick);
    }

    pub fn get_stats(&self, tick: u64) -> micromap::Map<SystemId, TimingStats, MAX_SYSTEMS> {
        let mut stats = micromap::Map::new();
        for (id, window) in self.windows.iter() {
            stats.insert(*id, window.lock().stats(tick));
        }
        stats
    }

    /// Overlay lines: the frame rate and total, then the most expensive systems.
    pub fn format_timing_display(&self, tick: u64) -> SmallVec<[String; SystemId::COUNT]> {
        let stats = self.get_stats(tick);
        let total = stats.get(&SystemId::Total).copied().unwrap_or_default();

        let fps = match total.mean.as_secs_f64() {
            s if s <= 0.0 => "  --- FPS".to_string(),
            s => match 1.0 / s {
                f if f >= 1000.0 => format!("{:>5} FPS", (f as u32).separate_with_commas()),
                f if f < 10.0 => format!("{f:5.1} FPS"),
                f => format!("{f:5.0} FPS"),
            },
        };

        let mut systems: SmallVec<[(SystemId, TimingStats); SystemId::COUNT]> = stats
            .iter()
            .filter(|(id, _)| **id != SystemId::Total)
            .map(|(id, s)| (*id, *s))
            .collect();
        systems.sort_by(|a, b| b.1.mean.cmp(&a.1.mean));

        let rows = std::iter::once((fps, total))
            .chain(systems.into_iter().take(OVERLAY_ROWS).map(|(id, s)| (id.to_string(), s)));
        format_timing_display(rows)
    }

    /// The systems most likely behind a slow frame, judged by their latest sample.
    ///
    /// Any system over 2 ms is named; otherwise the largest ones are taken until they
    /// account for 30% of the frame, at most five.
    pub fn get_slowest_systems(&self) -> SmallVec<[(SystemId, Duration); 5]> {
        let mut latest: SmallVec<[(SystemId, Duration); SystemId::COUNT]> = self
            .windows
            .iter()
            .filter(|(id, _)| **id != SystemId::Total)
            .map(|(id, window)| (*id, window.lock().latest()))
            .collect();
        latest.sort_by(|a, b| b.1.cmp(&a.1));

        let slow: SmallVec<[(SystemId, Duration); 5]> =
            latest.iter().filter(|(_, d)| *d >= SLOW_SYSTEM).take(5).copied().collect();
        if !slow.is_empty() {
            return slow;
        }

        let total: Duration = latest.iter().map(|(_, d)| *d).sum();
        let share = total.mul_f64(0.3);
        let mut accumulated = Duration::ZERO;
        let mut result = SmallVec::new();
        for (id, duration) in latest.into_iter().take(5) {
            result.push((id, duration));
            accumulated += duration;
            if accumulated >= share {
                break;
            }
        }
        result
    }
}

/// Wraps a system so each run is timed under `id`.
pub fn profile<S, M>(id: SystemId, system: S) -> impl FnMut(&mut World)
where
    S: IntoSystem<(), (), M> + 'static,
{
    let mut system: S::System = IntoSystem::into_system(system);
    let mut initialized = false;
    move |world: &mut World| {
        if !initialized {
            system.initialize(world);
            initialized = true;
        }

        let start = Instant::now();
        system.run((), world);
        let elapsed = start.elapsed();

        if let (Some(timings), Some(timing)) = (world.get_resource::<SystemTimings>(), world.get_resource::<Timing>()) {
            timings.add_timing(id, elapsed, timing.get_current_tick());
        }
    }
}

/// Splits a duration into whole units, a three-digit fraction, and the unit's symbol.
fn split_duration(duration: Duration) -> (u64, u32, &'static str) {
    let nanos = duration.as_nanos();
    let (scale, unit) = match nanos {
        n if n >= 1_000_000_000 => (1_000_000_000, "s"),
        n if n >= 1_000_000 => (1_000_000, "ms"),
        n if n >= 1_000 => (1_000, "us"),
        _ => return (nanos as u64, 0, "ns"),
    };
    let whole = (nanos / scale) as u64;
    let fraction = ((nanos % scale) * 1000 / scale) as u32;
    (whole, fraction, unit)
}

/// Lays out `name : mean +- deviation` rows with the columns aligned.
pub fn format_timing_display(
    rows: impl IntoIterator<Item = (String, TimingStats)>,
) -> SmallVec<[String; SystemId::COUNT]> {
    struct Row {
        name: String,
        mean: (u64, u32, &'static str),
        deviation: (u64, u32, &'static str),
    }

    let rows: SmallVec<[Row; SystemId::COUNT]> = rows
        .into_iter()
        .map(|(name, stats)| Row {
            name,
            mean: split_duration(stats.mean),
            deviation: split_duration(stats.deviation),
        })
        .collect();
    if rows.is_empty() {
        return SmallVec::new();
    }

    let name_width = SystemId::iter()
        .map(|id| id.to_string().len())
        .chain(rows.iter().map(|r| r.name.chars().count()))
        .max()
        .unwrap_or(0);
    let mean_width = rows.iter().map(|r| r.mean.0.width() as usize).max().unwrap_or(1);
    let deviation_width = rows.iter().map(|r| r.deviation.0.width() as usize).max().unwrap_or(1);

    rows.iter()
        .map(|r| {
            format!(
                "{name:<name_width$} : {mean:>mean_width$}.{mean_frac:03}{mean_unit} +- {dev:>deviation_width$}.{dev_frac:03}{dev_unit}",
                name = r.name,
                mean = r.mean.0,
                mean_frac = r.mean.1,
                mean_unit = r.mean.2,
                dev = r.deviation.0,
                dev_frac = r.deviation.1,
                dev_unit = r.deviation.2,
            )
        })
        .collect()
}
