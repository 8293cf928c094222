use maternal_vitals::model::Predictor;
use maternal_vitals::model::bundle::{EvaluatedOn, HealthModels};
use maternal_vitals::model::centroid::CentroidClassifier;
use maternal_vitals::model::linear::LinearModel;
use maternal_vitals::model::train_bp_model;
use maternal_vitals::synth::{bp_calibration, generate};
use maternal_vitals::vitals::{HealthLabel, VitalSample};

#[test]
fn linear_fit_recovers_exact_coefficients() {
    let rows: Vec<Vec<f64>> = (0..20)
        .map(|i| vec![i as f64, ((i * 7) % 11) as f64])
        .collect();
    let targets: Vec<f64> = rows.iter().map(|r| 3.0 + 2.0 * r[0] - 0.5 * r[1]).collect();
    let model = LinearModel::fit(&["a", "b"], &rows, &targets).unwrap();
    assert!((model.intercept - 3.0).abs() < 1e-9);
    assert!((model.coefficients[0] - 2.0).abs() < 1e-9);
    assert!((model.coefficients[1] + 0.5).abs() < 1e-9);
    let out = model.predict(&[vec![1.0, 2.0]]).unwrap();
    assert!((out[0] - 4.0).abs() < 1e-9);
}

#[test]
fn linear_fit_rejects_bad_design() {
    assert!(LinearModel::fit(&["a"], &[], &[]).is_err());
    assert!(LinearModel::fit(&["a"], &[vec![1.0]], &[1.0, 2.0]).is_err());
    assert!(LinearModel::fit(&["a", "b"], &[vec![1.0], vec![2.0]], &[1.0, 2.0]).is_err());
    // Constant feature: singular normal equations.
    let rows = vec![vec![1.0], vec![1.0], vec![1.0]];
    assert!(LinearModel::fit(&["a"], &rows, &[1.0, 2.0, 3.0]).is_err());
}

#[test]
fn linear_predict_checks_width() {
    let model = LinearModel {
        feature_names: vec!["a".into()],
        intercept: 0.0,
        coefficients: vec![1.0],
    };
    assert!(model.predict_row(&[1.0, 2.0]).is_err());
}

#[test]
fn centroid_separates_clusters() {
    let rows = vec![
        vec![0.0, 0.0],
        vec![0.2, 0.1],
        vec![10.0, 10.0],
        vec![10.2, 9.9],
    ];
    let labels = vec![
        HealthLabel::Normal,
        HealthLabel::Normal,
        HealthLabel::Critical,
        HealthLabel::Critical,
    ];
    let clf = CentroidClassifier::fit(&["x", "y"], &rows, &labels).unwrap();
    assert_eq!(clf.centroids.len(), 2);
    assert_eq!(clf.predict_label(&[0.5, 0.5]).unwrap(), HealthLabel::Normal);
    assert_eq!(clf.predict_label(&[9.0, 9.5]).unwrap(), HealthLabel::Critical);
    let codes = clf.predict(&[vec![0.5, 0.5], vec![9.0, 9.5]]).unwrap();
    assert_eq!(codes, vec![0.0, 2.0]);
}

#[test]
fn centroid_handles_constant_column() {
    let rows = vec![vec![1.0, 0.0], vec![1.0, 5.0]];
    let labels = vec![HealthLabel::Normal, HealthLabel::Warning];
    let clf = CentroidClassifier::fit(&["c", "x"], &rows, &labels).unwrap();
    assert_eq!(clf.scales[0], 1.0);
    assert_eq!(clf.predict_label(&[1.0, 4.0]).unwrap(), HealthLabel::Warning);
}

#[test]
fn bp_model_learns_calibration_rule() {
    let calibration = bp_calibration(1000, 42).unwrap();
    let model = train_bp_model(&calibration).unwrap();
    assert_eq!(model.feature_names, vec!["heart_rate", "spo2"]);
    let predicted = model.predict_row(&[90.0, 96.0]).unwrap();
    let expected = 0.5 * 90.0 + 0.8 * 96.0;
    assert!((predicted - expected).abs() < 2.0, "predicted {}", predicted);
    assert!((model.coefficients[0] - 0.5).abs() < 0.1);
}

#[test]
fn health_models_train_deterministically() {
    let ds = generate(2000, 42).unwrap();
    let (a, ma) = HealthModels::train(&ds, 0.2, 42).unwrap();
    let (b, mb) = HealthModels::train(&ds, 0.2, 42).unwrap();
    assert_eq!(a, b);
    assert_eq!(ma, mb);
    assert_eq!(ma.train_rows, 1600);
    assert_eq!(ma.test_rows, 400);
    assert_eq!(ma.evaluated_on, EvaluatedOn::Test);
    assert!((0.0..=1.0).contains(&ma.status_accuracy));
    assert_eq!(ma.targets.len(), 5);
    assert!(ma.targets.iter().all(|t| t.mse.is_finite() && t.mse >= 0.0));
}

#[test]
fn next_day_regressors_track_current_vitals() {
    let ds = generate(3000, 9).unwrap();
    let (models, metrics) = HealthModels::train(&ds, 0.2, 9).unwrap();
    let hr_mse = metrics
        .targets
        .iter()
        .find(|t| t.target == "next_day_hr")
        .unwrap()
        .mse;
    // Next-day noise has sigma 3, so the best achievable MSE is about 9.
    assert!(hr_mse < 12.0, "next_day_hr mse {}", hr_mse);
    assert!((models.next_day_hr.coefficients[0] - 1.0).abs() < 0.05);
}

#[test]
fn zero_test_fraction_evaluates_on_train() {
    let ds = generate(200, 1).unwrap();
    let (_, metrics) = HealthModels::train(&ds, 0.0, 1).unwrap();
    assert_eq!(metrics.test_rows, 0);
    assert_eq!(metrics.evaluated_on, EvaluatedOn::Train);
}

#[test]
fn invalid_test_fraction_rejected() {
    let ds = generate(100, 1).unwrap();
    assert!(HealthModels::train(&ds, 1.0, 1).is_err());
    assert!(HealthModels::train(&ds, -0.1, 1).is_err());
}

#[test]
fn too_few_rows_rejected() {
    let ds = generate(5, 1).unwrap();
    assert!(HealthModels::train(&ds, 0.0, 1).is_err());
}

#[test]
fn forecast_produces_bounded_risk() {
    let ds = generate(2000, 4).unwrap();
    let (models, _) = HealthModels::train(&ds, 0.2, 4).unwrap();
    let sample = VitalSample {
        heart_rate: 140.0,
        spo2: 85.0,
        temperature: 39.0,
        blood_pressure: 170.0,
        pregnancy_week: 30,
    };
    let f = models.forecast(&sample).unwrap();
    assert!((0.0..=100.0).contains(&f.risk_score));
    assert!((f.next_day.next_day_hr - 140.0).abs() < 10.0);
}

#[test]
fn forecast_rejects_unknown_bundle_schema() {
    let ds = generate(300, 4).unwrap();
    let (mut models, _) = HealthModels::train(&ds, 0.2, 4).unwrap();
    models.schema_version = "v0".to_string();
    let sample = VitalSample {
        heart_rate: 80.0,
        spo2: 98.0,
        temperature: 37.0,
        blood_pressure: 115.0,
        pregnancy_week: 12,
    };
    assert!(models.forecast(&sample).is_err());
}
