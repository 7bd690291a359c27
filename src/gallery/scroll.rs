/// Horizontal offset of the doubled tile strip.
///
/// The strip holds the tiles twice, so once the offset passes the first copy
/// it can jump back by exactly one copy and land on identical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScrollLoop {
    offset: f64,
    speed: f64,
}

pub const DEFAULT_SPEED: f64 = 1.0;

impl ScrollLoop {
    /// A speed that is not a positive number would never wrap, so it falls
    /// back to `DEFAULT_SPEED`.
    pub fn new(speed: f64) -> Self {
        let speed = if speed.is_finite() && speed > 0.0 {
            speed
        } else {
            DEFAULT_SPEED
        };
        ScrollLoop { offset: 0.0, speed }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Advance one frame against a strip whose first copy is `half_length`
    /// wide. An empty strip never wraps.
    pub fn advance(&mut self, half_length: f64) -> f64 {
        self.offset += self.speed;
        if half_length > 0.0 && self.offset >= half_length {
            // same as subtracting `half_length` once while offset < 2 * half,
            // and still lands in range if the strip shrank underneath us
            self.offset %= half_length;
        }
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_by_half_length() {
        let mut scroll = ScrollLoop::new(1.0);
        for _ in 0..99 {
            scroll.advance(100.0);
        }
        assert_eq!(scroll.offset(), 99.0);
        assert_eq!(scroll.advance(100.0), 0.0);
        assert_eq!(scroll.advance(100.0), 1.0);
    }

    #[test]
    fn offset_stays_below_half_length() {
        let mut scroll = ScrollLoop::new(1.0);
        for frame in 0..10_000 {
            let offset = scroll.advance(333.5);
            assert!((0.0..333.5).contains(&offset), "frame {} offset {}", frame, offset);
        }
    }

    #[test]
    fn fractional_speed_keeps_remainder() {
        let mut scroll = ScrollLoop::new(0.75);
        for _ in 0..4 {
            scroll.advance(2.0);
        }
        // 3.0 wrapped once
        assert_eq!(scroll.offset(), 1.0);
    }

    #[test]
    fn empty_strip_skips_wrap() {
        let mut scroll = ScrollLoop::new(1.0);
        for _ in 0..5 {
            scroll.advance(0.0);
        }
        assert_eq!(scroll.offset(), 5.0);
        // content appears: offset is pulled back into range
        assert_eq!(scroll.advance(4.0), 2.0);
    }

    #[test]
    fn unusable_speed_falls_back_to_default() {
        for speed in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let mut scroll = ScrollLoop::new(speed);
            assert_eq!(scroll.speed(), DEFAULT_SPEED);
            for _ in 0..250 {
                let offset = scroll.advance(100.0);
                assert!((0.0..100.0).contains(&offset), "speed {} offset {}", speed, offset);
            }
        }
        assert_eq!(ScrollLoop::new(2.5).speed(), 2.5);
    }

    #[test]
    fn shrinking_strip_lands_in_range() {
        let mut scroll = ScrollLoop::new(1.0);
        for _ in 0..90 {
            scroll.advance(100.0);
        }
        let offset = scroll.advance(10.0);
        assert!((0.0..10.0).contains(&offset));
    }
}
