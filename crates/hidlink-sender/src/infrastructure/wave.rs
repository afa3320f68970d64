//! Synthetic motion source: a slow circular sweep with scripted buttons.
//!
//! Stands in for the accelerometer-and-buttons board so the tilt loop can be
//! demonstrated and tested without hardware. The sweep traces a circle in
//! tilt space (amplitude well past the dead zone), and every cycle weaves in
//! one of each discrete event so all command paths get exercised.

use std::time::Duration;

use crate::application::tilt::{PointerSource, SourceEvent};

/// Steps per sweep cycle; the discrete events below index into it.
const CYCLE: u32 = 16;

/// Tilt amplitude of the sweep, milli-g.
const AMPLITUDE: f64 = 600.0;

/// A deterministic, self-pacing pointer source.
pub struct WaveSource {
    step: u32,
    total: u32,
    interval: Duration,
}

impl WaveSource {
    /// A source yielding `total` events, sleeping `interval` before each.
    /// Pass a zero interval in tests to run at full speed.
    pub fn new(total: u32, interval: Duration) -> WaveSource {
        WaveSource {
            step: 0,
            total,
            interval,
        }
    }
}

impl PointerSource for WaveSource {
    fn next_event(&mut self) -> Option<SourceEvent> {
        if self.step >= self.total {
            return None;
        }
        if !self.interval.is_zero() {
            std::thread::sleep(self.interval);
        }

        let step = self.step;
        self.step += 1;

        Some(match step % CYCLE {
            3 => SourceEvent::ButtonB,
            7 => SourceEvent::ButtonA,
            11 => SourceEvent::Tilt {
                ax: 0,
                ay: -800,
                scroll_chord: true,
            },
            15 => SourceEvent::Shake,
            phase_step => {
                let phase = f64::from(phase_step) * std::f64::consts::TAU / f64::from(CYCLE);
                SourceEvent::Tilt {
                    ax: (phase.sin() * AMPLITUDE) as i32,
                    ay: (phase.cos() * AMPLITUDE) as i32,
                    scroll_chord: false,
                }
            }
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_ends_after_total_events() {
        let mut source = WaveSource::new(5, Duration::ZERO);
        for _ in 0..5 {
            assert!(source.next_event().is_some());
        }
        assert_eq!(source.next_event(), None);
        assert_eq!(source.next_event(), None);
    }

    #[test]
    fn test_one_cycle_contains_every_event_kind() {
        let mut source = WaveSource::new(CYCLE, Duration::ZERO);
        let events: Vec<SourceEvent> = std::iter::from_fn(|| source.next_event()).collect();

        assert_eq!(events.len(), CYCLE as usize);
        assert_eq!(events[3], SourceEvent::ButtonB);
        assert_eq!(events[7], SourceEvent::ButtonA);
        assert_eq!(events[15], SourceEvent::Shake);
        assert!(matches!(
            events[11],
            SourceEvent::Tilt {
                scroll_chord: true,
                ..
            }
        ));
    }

    #[test]
    fn test_sweep_samples_clear_the_default_dead_zone() {
        let mut source = WaveSource::new(CYCLE, Duration::ZERO);
        let mut moving_samples = 0;
        while let Some(event) = source.next_event() {
            if let SourceEvent::Tilt {
                ax,
                ay,
                scroll_chord: false,
            } = event
            {
                if ax.abs() > 150 || ay.abs() > 150 {
                    moving_samples += 1;
                }
            }
        }
        assert!(moving_samples > 0, "the sweep must actually move the pointer");
    }

    #[test]
    fn test_source_is_deterministic() {
        let collect = || {
            let mut source = WaveSource::new(2 * CYCLE, Duration::ZERO);
            std::iter::from_fn(move || source.next_event()).collect::<Vec<_>>()
        };
        assert_eq!(collect(), collect());
    }
}
