use ndarray::{Array1, ArrayD, IxDyn, arr0, array};
use pk_core::Error;
use pk_prob::testing::{assert_all_close, assert_bijective_and_finite, assert_scalar_congruency};
use pk_prob::{Bijector, MoyalCdf, MoyalCdfConfig, Variable};

const LOC: f64 = 0.3;
const SCALE: f64 = 5.0;

fn points() -> ArrayD<f64> {
    array![[[-3.0], [0.0], [0.5], [4.2], [12.0]]].into_dyn()
}

/// Moyal(0.3, 5) CDF at [`points`], computed to 30 digits.
fn reference_cdf() -> ArrayD<f64> {
    array![[
        [0.164_235_091_679_908_06],
        [0.302_796_684_773_029_49],
        [0.326_988_059_287_152_17],
        [0.498_369_869_558_407_77],
        [0.756_281_930_752_788_92]
    ]]
    .into_dyn()
}

/// Moyal(0.3, 5) log-density at [`points`], last axis squeezed.
fn reference_logpdf() -> ArrayD<f64> {
    array![[
        -3.165_772_612_839_788_9,
        -3.029_294_718_911_452_9,
        -3.028_771_165_214_934_7,
        -3.147_579_451_291_384_9,
        -3.746_540_264_754_019_6
    ]]
    .into_dyn()
}

#[test]
fn moyal_cdf_matches_reference_distribution() {
    let b = MoyalCdf::new(LOC, SCALE, true).unwrap();
    assert!(b.name().starts_with("moyal"));

    let x = points();
    let y = reference_cdf();

    assert_all_close(&b.forward(&x).unwrap(), &y, 1e-6, 1e-6);
    assert_all_close(&b.inverse(&y).unwrap(), &x, 1e-5, 1e-5);

    let fldj = b.forward_log_det_jacobian(&x, 1).unwrap();
    assert_eq!(fldj.shape(), &[1, 5]);
    assert_all_close(&fldj, &reference_logpdf(), 1e-6, 1e-6);

    let neg_ildj = b.inverse_log_det_jacobian(&y, 1).unwrap().mapv(|v| -v);
    assert_all_close(&neg_ildj, &fldj, 1e-4, 0.0);
}

#[test]
fn moyal_cdf_matches_distribution_module() {
    let b = MoyalCdf::new(LOC, SCALE, true).unwrap();
    for &x in points().iter() {
        let cdf = pk_prob::moyal::cdf(x, LOC, SCALE).unwrap();
        let logpdf = pk_prob::moyal::logpdf(x, LOC, SCALE).unwrap();
        assert_eq!(b.forward_scalar(x).unwrap(), cdf);
        assert_eq!(b.forward_log_det_jacobian_scalar(x).unwrap(), logpdf);
    }
}

#[test]
fn moyal_cdf_scalar_congruency() {
    let b = MoyalCdf::new(0.3, 20.0, false).unwrap();
    assert_scalar_congruency(&b, 1.0, 100.0, 10_000, 0.05);
}

#[test]
fn moyal_cdf_bijective_and_finite() {
    let b = MoyalCdf::new(0.0, 3.0, true).unwrap();
    let x = Array1::linspace(-10.0, 10.0, 10).into_dyn();
    let y = Array1::linspace(0.01, 0.99, 10).into_dyn();
    assert_bijective_and_finite(&b, &x, &y, 0, 1e-3);
}

#[test]
fn moyal_cdf_variable_scale() {
    let scale = Variable::new(1.0);
    let b = MoyalCdf::new(0.0, &scale, true).unwrap();
    assert!(b.scale_is(&scale));

    let y = b.forward(&arr0(-3.0).into_dyn()).unwrap();
    assert_eq!(y.shape(), &[] as &[usize]);
    assert!(y[IxDyn(&[])] > 0.0);

    scale.assign(-1.0);
    let err = b.forward(&arr0(-3.0).into_dyn()).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert!(err.to_string().contains("Argument `scale` must be positive."), "{}", err);
}

#[test]
fn moyal_cdf_event_ndims_out_of_range() {
    let b = MoyalCdf::new(LOC, SCALE, true).unwrap();
    let err = b.forward_log_det_jacobian(&points(), 4).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn moyal_cdf_full_event_reduction() {
    let b = MoyalCdf::new(LOC, SCALE, true).unwrap();
    let total = b.forward_log_det_jacobian(&points(), 3).unwrap();
    let expected: f64 = reference_logpdf().sum();
    assert!((total[IxDyn(&[])] - expected).abs() < 1e-10);
}

#[test]
fn moyal_cdf_from_json_config() {
    let cfg = MoyalCdfConfig::from_json_str(
        r#"{"loc": 0.3, "scale": 5.0, "validate_args": true, "name": "moyal_energy_loss"}"#,
    )
    .unwrap();
    let b = MoyalCdf::from_config(&cfg).unwrap();
    assert_eq!(b.name(), "moyal_energy_loss");
    assert_all_close(&b.forward(&points()).unwrap(), &reference_cdf(), 1e-6, 1e-6);
}
