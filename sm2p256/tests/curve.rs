//! Curve arithmetic tests.

use hex_literal::hex;
use num_bigint::BigUint;
use proptest::{prelude::*, prop_compose, proptest};
use sm2p256::{
    AffinePoint, BaseTableCache, Curve, CurveParams, Sm2P256,
    arithmetic::{MAX_WINDOW, MIN_WINDOW},
};
use std::sync::Arc;

/// 2·G
const TWO_G: ([u8; 32], [u8; 32]) = (
    hex!("56CEFD60D7C87C000D58EF57FA73BA4D9C0DFA08C08A7331495C2E1DA3F2BD52"),
    hex!("31B7E7E6CC8189F668535CE0F8EAF1BD6DE84C182F6C8E716F780D3A970A23C3"),
);

/// 3·G
const THREE_G: ([u8; 32], [u8; 32]) = (
    hex!("A97F7CD4B3C993B4BE2DAA8CDB41E24CA13F6BD945302244E26918F1D0509EBF"),
    hex!("530B5DD88C688EF5CCC5CEC08A72150F7C400EE5CD045292AAACDD037458F6E6"),
);

/// Key pair extracted via `openssl ec -in pkcs8-private-key.pem -noout -text`
const SECRET_SCALAR: [u8; 32] =
    hex!("4BB8DF505722299592CBED4283B354A13FF5D3FEEB3A0660C5BDF3C87C559499");
const PUBLIC_POINT: ([u8; 32], [u8; 32]) = (
    hex!("08D77AE04C01CC4C1104360DD8AF6B6F7DF334283D7C1A6AFD5652407B87BEE5"),
    hex!("014E2A57C36C150D16324DC664E31E6432359609C4E79847A5B161C8C7364C8A"),
);

fn point(coords: &([u8; 32], [u8; 32])) -> AffinePoint {
    AffinePoint::new(
        BigUint::from_bytes_be(&coords.0),
        BigUint::from_bytes_be(&coords.1),
    )
}

fn curve_with_window(window: usize) -> Sm2P256 {
    let mut curve = Sm2P256::new();
    curve.set_window(window);
    curve
}

prop_compose! {
    fn scalar()(bytes in any::<[u8; 32]>()) -> [u8; 32] {
        bytes
    }
}

prop_compose! {
    fn curve_point()(k in scalar()) -> AffinePoint {
        Sm2P256::new()
            .scalar_base_mult(&k)
            .unwrap_or_else(|| CurveParams::sm2().generator())
    }
}

#[test]
fn scalar_base_mult_one_is_generator() {
    let curve = Sm2P256::new();
    assert_eq!(
        curve.scalar_base_mult(&[1]),
        Some(CurveParams::sm2().generator())
    );
}

#[test]
fn scalar_base_mult_two_is_double() {
    let curve = Sm2P256::new();
    let g = CurveParams::sm2().generator();
    let expected = point(&TWO_G);

    assert_eq!(curve.scalar_base_mult(&[2]), Some(expected.clone()));
    assert_eq!(curve.double(&g), Some(expected));
}

#[test]
fn scalar_base_mult_three() {
    let curve = Sm2P256::new();
    let g = CurveParams::sm2().generator();
    let expected = point(&THREE_G);

    assert_eq!(curve.scalar_base_mult(&[3]), Some(expected.clone()));
    let two_g = curve.double(&g).unwrap();
    assert_eq!(curve.add(&two_g, &g), Some(expected));
}

#[test]
fn scalar_zero_is_infinity() {
    let curve = Sm2P256::new();
    let g = CurveParams::sm2().generator();

    assert!(curve.scalar_base_mult(&[]).is_none());
    assert!(curve.scalar_base_mult(&[0; 32]).is_none());
    assert!(curve.scalar_mult(&g, &[]).is_none());
    assert!(curve.scalar_mult(&g, &[0, 0, 0]).is_none());
}

#[test]
fn scalar_order_is_infinity() {
    let curve = Sm2P256::new();
    let params = CurveParams::sm2();
    let n = params.n.to_bytes_be();

    assert!(curve.scalar_base_mult(&n).is_none());
    assert!(curve.scalar_mult(&params.generator(), &n).is_none());

    let n_plus_one = (&params.n + 1u32).to_bytes_be();
    assert_eq!(curve.scalar_base_mult(&n_plus_one), Some(params.generator()));
}

#[test]
fn known_key_pair() {
    let expected = point(&PUBLIC_POINT);
    for window in MIN_WINDOW..=MAX_WINDOW {
        let curve = curve_with_window(window);
        assert_eq!(curve.scalar_base_mult(&SECRET_SCALAR), Some(expected.clone()));
        assert_eq!(
            curve.scalar_mult(&CurveParams::sm2().generator(), &SECRET_SCALAR),
            Some(expected.clone())
        );
    }
}

#[test]
fn long_scalars_are_accepted() {
    let curve = Sm2P256::new();
    let mut k = vec![0u8; 40];
    k[39] = 2;
    assert_eq!(curve.scalar_base_mult(&k), Some(point(&TWO_G)));
}

#[test]
fn base_tables_have_expected_lengths() {
    let cache = BaseTableCache::new();
    for window in MIN_WINDOW..=MAX_WINDOW {
        let first = cache.get(window);
        let second = cache.get(window);
        assert_eq!(first.len(), second.len());
        assert_eq!(first.len(), 1 << (window - 1));
    }
}

#[test]
fn concurrent_scalar_base_mult() {
    let cache = Arc::new(BaseTableCache::new());
    let expected = point(&PUBLIC_POINT);

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let cache = Arc::clone(&cache);
            let expected = expected.clone();
            std::thread::spawn(move || {
                let mut curve = Sm2P256::with_cache(cache);
                curve.set_window(MIN_WINDOW + i % 5);
                assert_eq!(curve.scalar_base_mult(&SECRET_SCALAR), Some(expected));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(cache.len(), 5);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn double_matches_add(p in curve_point()) {
        let curve = Sm2P256::new();
        prop_assert_eq!(curve.double(&p), curve.add(&p, &p));
    }

    #[test]
    fn scalar_base_mult_is_on_curve(k in scalar()) {
        let curve = Sm2P256::new();
        if let Some(p) = curve.scalar_base_mult(&k) {
            prop_assert!(curve.is_on_curve(&p.x, &p.y));
        }
    }

    #[test]
    fn windows_agree_with_reference(k in scalar(), window in MIN_WINDOW..=MAX_WINDOW) {
        let params = CurveParams::sm2();
        let curve = curve_with_window(window);
        let expected = params.scalar_base_mult(&k);

        prop_assert_eq!(&curve.scalar_base_mult(&k), &expected);
        prop_assert_eq!(&curve.scalar_mult(&params.generator(), &k), &expected);
    }

    #[test]
    fn scalar_mult_arbitrary_point(p in curve_point(), k in scalar()) {
        let curve = Sm2P256::new();
        prop_assert_eq!(curve.scalar_mult(&p, &k), CurveParams::sm2().scalar_mult(&p, &k));
    }

    #[test]
    fn add_matches_reference(a in curve_point(), b in curve_point()) {
        let curve = Sm2P256::new();
        prop_assert_eq!(curve.add(&a, &b), CurveParams::sm2().add(&a, &b));
    }
}
