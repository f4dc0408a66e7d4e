//! Distance and effort helpers for presenting venues to walkers.
//!
//! Pure arithmetic used by callers listing venues by proximity: great-circle
//! distance between two points, a flat-pace walking estimate, and the
//! calorie/pint conversions shown alongside each venue. None of this feeds
//! back into popularity scoring.

use geo::Coord;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;
/// Minutes to cover one kilometre at a relaxed walking pace.
const WALK_MINUTES_PER_KM: f64 = 12.0;
/// Walker weight assumed when none is known.
pub const DEFAULT_WEIGHT_KG: f64 = 75.0;
const CALORIES_PER_KG_KM: f64 = 1.05;
const CALORIES_PER_PINT: f64 = 200.0;

/// Great-circle distance between two WGS84 coordinates, in kilometres.
///
/// Coordinates follow the crate convention of `x = longitude` and
/// `y = latitude`, in degrees.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use pubpulse_core::walk::distance_km;
///
/// let greenwich = Coord { x: 0.0, y: 51.48 };
/// let soho = Coord { x: -0.13, y: 51.51 };
/// let km = distance_km(greenwich, soho);
/// assert!(km > 9.0 && km < 10.0);
/// ```
#[must_use]
pub fn distance_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let lat1 = from.y.to_radians();
    let lat2 = to.y.to_radians();
    let d_lat = (to.y - from.y).to_radians();
    let d_lon = (to.x - from.x).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Estimated minutes to walk `distance` kilometres, rounded to the nearest
/// minute.
#[must_use]
pub fn walking_minutes(distance: f64) -> u32 {
    (distance * WALK_MINUTES_PER_KM).round().max(0.0) as u32
}

/// Calories burned walking `distance` kilometres at `weight_kg`.
#[must_use]
pub fn calories_burned(distance: f64, weight_kg: f64) -> u32 {
    (weight_kg * distance * CALORIES_PER_KG_KM).round().max(0.0) as u32
}

/// Pints "earned" by the given calorie burn, to one decimal place.
#[must_use]
pub fn pints_earned(calories: u32) -> f64 {
    (f64::from(calories) / CALORIES_PER_PINT * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = Coord { x: 0.0, y: 0.0 };
        let b = Coord { x: 0.0, y: 1.0 };
        let km = distance_km(a, b);
        assert!((km - 111.2).abs() < 0.5, "got {km}");
    }

    #[rstest]
    fn zero_distance_for_identical_points() {
        let here = Coord { x: -0.1, y: 51.5 };
        assert!(distance_km(here, here).abs() < 1e-9);
    }

    #[rstest]
    #[case(2.5, 30)]
    #[case(0.0, 0)]
    #[case(1.04, 12)]
    fn walking_pace_is_twelve_minutes_per_km(#[case] km: f64, #[case] minutes: u32) {
        assert_eq!(walking_minutes(km), minutes);
    }

    #[rstest]
    fn calories_scale_with_weight_and_distance() {
        assert_eq!(calories_burned(2.0, DEFAULT_WEIGHT_KG), 158);
        assert_eq!(calories_burned(0.0, DEFAULT_WEIGHT_KG), 0);
    }

    #[rstest]
    #[case(400, 2.0)]
    #[case(300, 1.5)]
    #[case(0, 0.0)]
    fn pints_round_to_one_decimal(#[case] calories: u32, #[case] pints: f64) {
        assert!((pints_earned(calories) - pints).abs() < 1e-9);
    }
}
