use prob_core::ErrorKind;
use prob_stats::{linspace, meshgrid, GaussianKde2d};

fn sample_points() -> (Vec<f64>, Vec<f64>) {
    let xs = vec![-1.0, -0.5, 0.0, 0.3, 0.8, 1.2, -0.2, 0.6];
    let ys = vec![-0.8, -0.7, 0.1, 0.2, 0.9, 1.0, 0.3, 0.1];
    (xs, ys)
}

#[test]
fn linspace_includes_both_ends() {
    let axis = linspace(-2.0, 2.0, 5);
    assert_eq!(axis, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
    assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    assert!(linspace(0.0, 1.0, 0).is_empty());
    assert_eq!(*linspace(0.1, 0.7, 50).last().unwrap(), 0.7);
}

#[test]
fn meshgrid_layout_matches_rows_of_y() {
    let (xg, yg) = meshgrid(&[1.0, 2.0, 3.0], &[10.0, 20.0]);
    assert_eq!(xg, vec![vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]]);
    assert_eq!(yg, vec![vec![10.0; 3], vec![20.0; 3]]);
}

#[test]
fn density_is_positive_and_integrates_to_about_one() {
    let (xs, ys) = sample_points();
    let kde = GaussianKde2d::fit(&xs, &ys).expect("fit");
    let axis_x = linspace(-6.0, 6.0, 241);
    let axis_y = linspace(-6.0, 6.0, 241);
    let grid = kde.evaluate_grid(&axis_x, &axis_y);
    assert_eq!(grid.len(), 241);
    assert_eq!(grid[0].len(), 241);
    let cell = (axis_x[1] - axis_x[0]) * (axis_y[1] - axis_y[0]);
    let mass: f64 = grid.iter().flatten().sum::<f64>() * cell;
    assert!((mass - 1.0).abs() < 1e-2, "mass={mass}");
    assert!(grid.iter().flatten().all(|&d| d >= 0.0));
}

#[test]
fn density_peaks_near_the_data() {
    let (xs, ys) = sample_points();
    let kde = GaussianKde2d::fit(&xs, &ys).unwrap();
    assert!(kde.evaluate(0.1, 0.1) > kde.evaluate(5.0, -5.0));
}

#[test]
fn degenerate_inputs_are_rejected() {
    assert_eq!(
        GaussianKde2d::fit(&[1.0], &[1.0]).unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
    assert!(GaussianKde2d::fit(&[1.0, 2.0], &[1.0]).is_err());
    // Perfectly collinear points have a singular covariance.
    let err = GaussianKde2d::fit(&[0.0, 1.0, 2.0], &[0.0, 2.0, 4.0]).unwrap_err();
    assert_eq!(err.info().code, "kde-singular");
}
