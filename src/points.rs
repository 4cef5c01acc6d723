//! Mahjong point calculation
//!
//! Converts the four raw end-of-game scores of one hanchan into
//! rank-adjusted point values. The CSV export and the team ranking both
//! depend on this producing the same numbers as the web frontend.

/// Uma per rank, 1st through 4th, with the oka already folded in
pub const UMA_VALUES: [i64; 4] = [50, 10, -10, -30];

/// Nominal starting total subtracted before scaling raw score into points
pub const RETURN_SCORE: i64 = 30000;

/// Seat indices ordered by score descending.
///
/// Ties keep original seat order (stable sort): on equal scores the lower
/// seat index takes the better rank.
pub fn seat_order(scores: &[i64; 4]) -> [usize; 4] {
    let mut order = [0usize, 1, 2, 3];
    order.sort_by(|&a, &b| scores[b].cmp(&scores[a]));
    order
}

/// Rank per seat, 1-based (1 = winner).
pub fn seat_ranks(scores: &[i64; 4]) -> [usize; 4] {
    let order = seat_order(scores);
    let mut ranks = [0usize; 4];
    for (rank, &seat) in order.iter().enumerate() {
        ranks[seat] = rank + 1;
    }
    ranks
}

/// Point value per seat: `(score - RETURN_SCORE) / 1000.0 + uma`.
pub fn calc_pts(scores: &[i64; 4]) -> [f64; 4] {
    let order = seat_order(scores);

    let mut uma = [0i64; 4];
    for (rank, &seat) in order.iter().enumerate() {
        uma[seat] = UMA_VALUES[rank];
    }

    let mut pts = [0.0f64; 4];
    for i in 0..4 {
        pts[i] = (scores[i] - RETURN_SCORE) as f64 / 1000.0 + uma[i] as f64;
    }
    pts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tied_resolves_by_seat_index() {
        let pts = calc_pts(&[30000, 30000, 30000, 30000]);
        assert_eq!(pts, [50.0, 10.0, -10.0, -30.0]);
    }

    #[test]
    fn test_distinct_scores() {
        let pts = calc_pts(&[40000, 30000, 20000, 10000]);
        assert_eq!(pts, [60.0, 10.0, -20.0, -50.0]);
    }

    #[test]
    fn test_winner_not_in_seat_one() {
        // Seat 3 wins, seat 0 is last
        let pts = calc_pts(&[10000, 20000, 30000, 40000]);
        assert_eq!(pts, [-50.0, -20.0, 10.0, 60.0]);
    }

    #[test]
    fn test_partial_tie_keeps_seat_order() {
        // Seats 1 and 2 tied: seat 1 takes rank 3, seat 2 takes rank 4
        let pts = calc_pts(&[40000, 25000, 25000, 30000]);
        assert_eq!(pts[1], -5.0 - 10.0);
        assert_eq!(pts[2], -5.0 - 30.0);
    }

    #[test]
    fn test_fractional_thousands() {
        // 1000-point granularity is not assumed
        let pts = calc_pts(&[30500, 30000, 29800, 29700]);
        assert_eq!(pts[0], 50.5);
        assert_eq!(pts[1], 10.0);
        assert!((pts[2] - (-10.2)).abs() < 1e-9);
        assert!((pts[3] - (-30.3)).abs() < 1e-9);
    }

    #[test]
    fn test_seat_ranks() {
        assert_eq!(seat_ranks(&[20000, 40000, 10000, 30000]), [3, 1, 4, 2]);
        assert_eq!(seat_ranks(&[30000, 30000, 30000, 30000]), [1, 2, 3, 4]);
    }

    #[test]
    fn test_negative_scores() {
        // A bust (below zero) still ranks and scales linearly
        let pts = calc_pts(&[61000, 30000, 24000, -15000]);
        assert_eq!(pts[0], 81.0);
        assert_eq!(pts[3], -75.0);
    }
}
