/// Five-star breakdown of a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarRating {
    pub fn from_rating(rating: f32) -> Self {
        let rating = if rating.is_finite() {
            rating.clamp(0.0, 5.0)
        } else {
            0.0
        };

        let full = rating.floor() as u8;
        let half = rating.fract() != 0.0;
        let empty = 5 - rating.ceil() as u8;

        Self { full, half, empty }
    }

    /// Text form using ★ for full, ⯨ for half and ☆ for empty stars
    pub fn symbols(&self) -> String {
        let mut out = String::with_capacity(5 * 3);
        out.extend(std::iter::repeat_n('★', self.full as usize));
        if self.half {
            out.push('⯨');
        }
        out.extend(std::iter::repeat_n('☆', self.empty as usize));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_rating_has_no_half_star() {
        let stars = StarRating::from_rating(4.0);
        assert_eq!(
            stars,
            StarRating {
                full: 4,
                half: false,
                empty: 1
            }
        );
        assert_eq!(stars.symbols().chars().count(), 5);
    }

    #[test]
    fn fractional_rating_adds_half_star() {
        let stars = StarRating::from_rating(4.5);
        assert_eq!(stars.full, 4);
        assert!(stars.half);
        assert_eq!(stars.empty, 0);
    }

    #[test]
    fn out_of_range_ratings_are_clamped() {
        assert_eq!(StarRating::from_rating(7.0).full, 5);
        assert_eq!(StarRating::from_rating(-1.0).empty, 5);
        assert_eq!(StarRating::from_rating(f32::NAN).empty, 5);
    }
}
