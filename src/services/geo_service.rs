use crate::models::GeoRecord;
use rand::Rng;

/// Fixed display set for the dashboard's geography widget.
const GEO_COUNTRIES: [&str; 10] = ["US", "IN", "BR", "DE", "GB", "CA", "FR", "PH", "ID", "AU"];

/// Synthetic country breakdown: random weights scaled so the counts sum
/// approximately to the channel's total views (truncation loses a little).
/// Unseeded on purpose, every call produces a fresh distribution.
pub fn mock_geo_breakdown(total_views: i64) -> Vec<GeoRecord> {
    let mut rng = rand::rng();

    let weights: Vec<i64> = GEO_COUNTRIES
        .iter()
        .map(|_| rng.random_range(1..=100))
        .collect();

    let scale = total_views as f64 / weights.iter().sum::<i64>().max(1) as f64;

    let mut records: Vec<GeoRecord> = GEO_COUNTRIES
        .iter()
        .zip(&weights)
        .map(|(country, weight)| GeoRecord {
            country: country.to_string(),
            views: (*weight as f64 * scale) as i64,
        })
        .collect();

    records.sort_by(|a, b| b.views.cmp(&a.views));
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_ten_records_covering_the_fixed_set() {
        let records = mock_geo_breakdown(1_000_000);

        assert_eq!(records.len(), 10);
        let mut countries: Vec<&str> = records.iter().map(|r| r.country.as_str()).collect();
        countries.sort_unstable();
        let mut expected = GEO_COUNTRIES.to_vec();
        expected.sort_unstable();
        assert_eq!(countries, expected);
    }

    #[test]
    fn counts_sum_close_to_total_views() {
        let total = 5_000_000;
        let records = mock_geo_breakdown(total);

        let sum: i64 = records.iter().map(|r| r.views).sum();
        assert!(records.iter().all(|r| r.views >= 0));
        assert!(sum <= total);
        // Each of the 10 truncations loses less than one scale unit.
        assert!(total - sum < total / 5);
    }

    #[test]
    fn sorted_descending_by_views() {
        let records = mock_geo_breakdown(123_456);
        assert!(records.windows(2).all(|w| w[0].views >= w[1].views));
    }

    #[test]
    fn zero_total_views_yields_all_zero_counts() {
        let records = mock_geo_breakdown(0);
        assert_eq!(records.len(), 10);
        assert!(records.iter().all(|r| r.views == 0));
    }
}
