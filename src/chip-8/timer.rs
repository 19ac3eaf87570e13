/// A timer that ticks down. This is used for the 60hz sound and delay timers by [`Timers`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Timer {
    value: u8,
}

impl Timer {
    pub fn current_value(&self) -> u8 {
        self.value
    }

    pub fn set_value(&mut self, new_value: u8) {
        self.value = new_value;
    }

    pub fn tick(&mut self) {
        if self.is_active() {
            self.value -= 1;
        }
    }

    pub fn is_active(&self) -> bool {
        self.value > 0
    }
}

/// The delay and sound timers. Both count down once per [`Timers::tick`],
/// which the host drives at 60hz independently of the instruction rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timers {
    pub delay: Timer,
    pub sound: Timer,
}

impl Timers {
    pub fn tick(&mut self) {
        self.delay.tick();
        self.sound.tick();
    }

    /// The tone is on for as long as the sound timer is non zero.
    pub fn is_sound_on(&self) -> bool {
        self.sound.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::{Timer, Timers};

    #[test]
    fn test_tick_stops_at_zero() {
        let mut timer = Timer::default();
        assert!(!timer.is_active());

        timer.tick();
        timer.tick();

        assert!(!timer.is_active());
        assert_eq!(timer.current_value(), 0);
    }

    #[test]
    fn test_tick_counts_down_to_zero() {
        let mut timer = Timer::default();
        timer.set_value(2);

        timer.tick();
        assert!(timer.is_active());
        assert_eq!(timer.current_value(), 1);

        timer.tick();
        assert!(!timer.is_active());
        assert_eq!(timer.current_value(), 0);

        timer.tick();
        assert_eq!(timer.current_value(), 0);
    }

    #[test]
    fn test_timers_count_down_independently() {
        let mut timers = Timers::default();
        assert!(!timers.is_sound_on());

        timers.delay.set_value(3);
        timers.sound.set_value(1);
        assert!(timers.is_sound_on());

        timers.tick();
        assert_eq!(timers.delay.current_value(), 2);
        assert_eq!(timers.sound.current_value(), 0);
        assert!(!timers.is_sound_on());

        for _ in 0..3 {
            timers.tick();
        }
        assert_eq!(timers.delay.current_value(), 0);
        assert_eq!(timers.sound.current_value(), 0);
    }
}
