use seqdep_plot::stats;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_mean() {
    assert_close(stats::mean(&[1.0, 2.0, 3.0, 6.0]), 3.0);
    // NaN entries are skipped
    assert_close(stats::mean(&[1.0, f64::NAN, 3.0]), 2.0);
    assert!(stats::mean(&[]).is_nan());
}

#[test]
fn test_uniform_series_has_zero_ellipticity() {
    let row_means = vec![4.5; 10];
    assert_close(stats::mean(&row_means), 4.5);
    assert_eq!(stats::ellipticity(&row_means), 0.0);
}

#[test]
fn test_ellipticity_is_sum_of_squared_deviations() {
    // mean 2.5, deviations 1.5, 0.5, 0.5, 1.5
    assert_close(stats::ellipticity(&[1.0, 2.0, 3.0, 4.0]), 5.0);
    // not divided by the row count
    assert_close(stats::ellipticity(&[0.0, 2.0]), 2.0);
    assert_close(stats::ellipticity(&[1.0, f64::NAN, 3.0]), 2.0);
}

#[test]
fn test_relative_ellipticity() {
    assert_close(stats::relative_ellipticity(8.0, Some(2.0)), 4.0);
    assert_close(stats::relative_ellipticity(3.0, Some(1.0)), 3.0);
    assert_close(stats::relative_ellipticity(8.0, None), 8.0);
    // a zero reference leaves the raw value
    assert_close(stats::relative_ellipticity(8.0, Some(0.0)), 8.0);
}

#[test]
fn test_normalize_by_sum() {
    let normalized = stats::normalize_by_sum(&[1.0, 1.0, 2.0]);
    assert_eq!(normalized, vec![0.25, 0.25, 0.5]);

    let normalized = stats::normalize_by_sum(&[0.3, 1.7, 2.9, 0.01, 5.5]);
    assert_close(normalized.iter().sum(), 1.0);
}
