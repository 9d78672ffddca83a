//! Deterministic prayer time computation.
//!
//! Given an observer position and a civil date (as UTC-midnight epoch
//! milliseconds), the engine computes up to eleven daily moments — dawn,
//! sunrise, solar noon, afternoon, sunset, dusk, and four night-derived
//! points — from Meeus-series solar astronomy with a thin jurisprudence
//! layer: configurable twilight angles or intervals, the shadow-factor
//! afternoon rule, and high-latitude fallbacks.
//!
//! All inputs and outputs are absolute epoch milliseconds; timezone
//! arithmetic and HH:MM rendering belong to the caller. The engine performs
//! no I/O and keeps no state beyond its caches.
//!
//! # Quick Start
//!
//! ```rust
//! use salat::{compute_prayer_times, Configuration, Coordinates, Method};
//!
//! let config = Configuration::new(
//!     Coordinates::new(30.0444, 31.2357)?, // Cairo
//!     1_655_769_600_000.0,                 // 2022-06-21 UTC midnight
//!     Method::muslim_world_league(),
//! )?;
//!
//! let times = compute_prayer_times(&config);
//! if let Some(fajr_ms) = times.fajr().time_ms() {
//!     assert!(fajr_ms < times.sunrise().time_ms().unwrap());
//! }
//! # Ok::<(), salat::ConfigError>(())
//! ```
//!
//! # Undefined events
//!
//! Above the polar circles, and in the high-latitude seasonal band for
//! twilight, some events have no geometric solution. Every accessor returns
//! a tagged [`PrayerTime`] — `Valid` or `Undefined` with a reason — and the
//! kernel itself never fails. Select a [`HighLatitudeRule`] to substitute
//! night-fraction dawn/dusk times in the seasonal band; with
//! [`HighLatitudeRule::None`] nothing is substituted.
//!
//! # Threading
//!
//! The free functions below operate on a thread-local [`Engine`]. An engine
//! is a plain value: to share one across threads, own it yourself and add
//! the synchronization your host requires.

mod cache;
mod config;
mod context;
mod engine;
mod errors;
mod high_latitude;
mod kernel;
pub mod moonsighting;
mod outputs;
mod qibla;
mod slab;
mod sunnah;

pub use salat_core::{Coordinates, CoreError};

pub use config::{
    Configuration, HighLatitudeRule, Madhab, Method, MidnightMode, PolarCircleResolution,
    TimeAdjustments,
};
pub use context::PrayerContext;
pub use engine::Engine;
pub use errors::{ConfigError, ConfigResult};
pub use outputs::{Diagnostics, Fallback, Prayer, PrayerTime, PrayerTimes, UndefinedReason};
pub use qibla::compute_qibla;
pub use sunnah::{compute_sunnah_times, SunnahTimes};

use std::cell::RefCell;

thread_local! {
    static ENGINE: RefCell<Engine> = RefCell::new(Engine::new());
}

/// One-shot compute through the thread-local engine.
pub fn compute_prayer_times(config: &Configuration) -> PrayerTimes {
    ENGINE.with(|engine| engine.borrow_mut().compute(config))
}

/// Empties the thread-local engine's caches: solar positions, day
/// constants, and the resolved location.
///
/// Purely a memory/warmup operation — subsequent outputs are bit-identical
/// with or without it.
pub fn clear_solar_cache() {
    ENGINE.with(|engine| engine.borrow_mut().clear_caches());
}
