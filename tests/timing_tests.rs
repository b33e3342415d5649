//! Animation Scheduler Tests
//!
//! Tests for:
//! - Instantaneous frame rate formula (ceil of 1000 / elapsed ms)
//! - FrameClock tick sequence and self-rescheduling drift
//! - FixedTick fixed-rate behaviour
//! - CancellationToken semantics
//! - Target period derivation from settings

use std::time::{Duration, Instant};

use gyre::renderer::settings::RendererSettings;
use gyre::timing::{CancellationToken, FixedTick, FrameClock, fps_from_elapsed};

// ============================================================================
// Frame Rate Formula
// ============================================================================

#[test]
fn fps_rounds_up_to_whole_frames() {
    assert_eq!(fps_from_elapsed(Duration::from_millis(16)), 63);
    assert_eq!(fps_from_elapsed(Duration::from_millis(33)), 31);
}

#[test]
fn fps_exact_divisions() {
    assert_eq!(fps_from_elapsed(Duration::from_millis(1000)), 1);
    assert_eq!(fps_from_elapsed(Duration::from_millis(500)), 2);
    assert_eq!(fps_from_elapsed(Duration::from_millis(100)), 10);
}

#[test]
fn fps_slower_than_one_hz_still_reports_one() {
    assert_eq!(fps_from_elapsed(Duration::from_millis(2000)), 1);
}

#[test]
fn fps_saturates_on_zero_interval() {
    assert_eq!(fps_from_elapsed(Duration::ZERO), u32::MAX);
}

#[test]
fn fps_sub_millisecond_interval() {
    assert_eq!(fps_from_elapsed(Duration::from_micros(100)), 10000);
}

// ============================================================================
// FrameClock
// ============================================================================

#[test]
fn clock_seeds_at_sixty_until_first_tick() {
    let clock = FrameClock::starting_at(Duration::from_millis(16), Instant::now());
    assert_eq!(clock.real_fps(), 60);
}

#[test]
fn clock_measures_each_interval() {
    let base = Instant::now();
    let mut clock = FrameClock::starting_at(Duration::from_millis(16), base);

    assert_eq!(clock.tick(base + Duration::from_millis(16)), 63);
    assert_eq!(clock.tick(base + Duration::from_millis(32)), 63);
    assert_eq!(clock.tick(base + Duration::from_millis(65)), 31);
    assert_eq!(clock.real_fps(), 31);
}

#[test]
fn sixty_even_ticks_measure_sixty_fps() {
    let base = Instant::now();
    let mut clock = FrameClock::starting_at(Duration::from_millis(16), base);

    for i in 1..=60u64 {
        clock.tick(base + Duration::from_micros(i * 16_670));
    }
    assert_eq!(clock.real_fps(), 60);
}

#[test]
fn next_deadline_follows_the_actual_tick_time() {
    let base = Instant::now();
    let period = Duration::from_millis(16);
    let clock = FrameClock::starting_at(period, base);

    // A late tick pushes the whole schedule; there is no catch-up.
    let late = base + Duration::from_millis(40);
    assert_eq!(clock.next_deadline(late), late + period);
    assert_eq!(clock.period(), period);
}

// ============================================================================
// FixedTick
// ============================================================================

#[test]
fn fixed_tick_fires_once_per_interval() {
    let base = Instant::now();
    let mut tick = FixedTick::starting_at(Duration::from_secs(1), base);

    assert!(!tick.poll(base));
    assert!(!tick.poll(base + Duration::from_millis(999)));
    assert!(tick.poll(base + Duration::from_millis(1000)));
    assert!(!tick.poll(base + Duration::from_millis(1001)));
    assert!(tick.poll(base + Duration::from_millis(2000)));
}

#[test]
fn fixed_tick_keeps_its_schedule_after_a_late_poll() {
    let base = Instant::now();
    let mut tick = FixedTick::starting_at(Duration::from_secs(1), base);

    assert!(tick.poll(base + Duration::from_millis(1500)));
    // The next deadline stays anchored to the start, not to the poll.
    assert_eq!(tick.next_deadline(), base + Duration::from_secs(2));
    assert!(!tick.poll(base + Duration::from_millis(1999)));
    assert!(tick.poll(base + Duration::from_millis(2000)));
}

// ============================================================================
// CancellationToken
// ============================================================================

#[test]
fn token_starts_uncancelled() {
    let token = CancellationToken::new();
    assert!(!token.is_cancelled());
}

#[test]
fn cancel_is_visible_through_every_clone() {
    let token = CancellationToken::new();
    let clone = token.clone();

    clone.cancel();
    assert!(token.is_cancelled());
    assert!(clone.is_cancelled());
}

// ============================================================================
// Target Period
// ============================================================================

#[test]
fn default_period_is_a_sixtieth_of_a_second() {
    let settings = RendererSettings::default();
    let period = settings.frame_period().as_secs_f64();
    assert!((period - 1.0 / 60.0).abs() < 1e-9);
}

#[test]
fn period_follows_target_fps() {
    let settings = RendererSettings {
        target_fps: 30,
        ..Default::default()
    };
    let period = settings.frame_period().as_secs_f64();
    assert!((period - 1.0 / 30.0).abs() < 1e-9);
}
