/// Study timer that counts down once per second and stops at zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u64,
}

impl Countdown {
    pub fn new(seconds: u64) -> Self {
        Self { remaining: seconds }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Returns false once the timer has run out
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_ticks_from_two_hours() {
        let mut countdown = Countdown::new(7200);
        for _ in 0..5 {
            assert!(countdown.tick());
        }
        assert_eq!(countdown.remaining(), 7195);
    }

    #[test]
    fn stops_at_zero() {
        let mut countdown = Countdown::new(2);
        assert!(countdown.tick());
        assert!(countdown.tick());
        assert!(!countdown.tick());
        assert!(!countdown.tick());
        assert_eq!(countdown.remaining(), 0);
        assert!(countdown.is_finished());
    }
}
