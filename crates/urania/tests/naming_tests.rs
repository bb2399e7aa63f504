mod common;

use urania::ephemeris::{
    map_response, MappingError, MappingPolicy, NameKind, ProviderCusp, ProviderPlanet,
    ProviderResponse,
};
use urania::{CelestialBody, RecordedProvider, ZodiacSign};

fn third_party() -> ProviderResponse {
    RecordedProvider::from_json_str("fixture", common::THIRD_PARTY_JSON)
        .unwrap()
        .response()
        .clone()
}

#[test]
fn test_third_party_payload_parses_aliases() {
    let response = third_party();
    assert_eq!(response.planets.len(), 9);
    assert_eq!(response.cusps.len(), 12);
    assert_eq!(response.planets[2].retrograde, Some(true));
    assert_eq!(response.cusps[9].longitude, 270.0);
    assert_eq!(response.midheaven, Some(270.0));
}

#[test]
fn test_lenient_mapping_drops_unknown_bodies() {
    let raw = map_response(&third_party(), MappingPolicy::Lenient).unwrap();
    assert_eq!(raw.planets.len(), 8);
    assert!(raw.planets.iter().any(|p| p.body == CelestialBody::NorthNode));
    assert!(raw.planets.iter().all(|p| p.body != CelestialBody::Chiron));
    assert_eq!(raw.cusps.len(), 12);
}

#[test]
fn test_strict_mapping_rejects_unknown_bodies() {
    let err = map_response(&third_party(), MappingPolicy::Strict).unwrap_err();
    assert_eq!(
        err,
        MappingError::UnknownName {
            kind: NameKind::Planet,
            name: "Ceres".to_string()
        }
    );
}

#[test]
fn test_body_name_variants() {
    for name in ["north_node", "North Node", "TRUE-NODE", "mean node"] {
        assert_eq!(CelestialBody::from_name(name), Some(CelestialBody::NorthNode), "{}", name);
    }
    assert_eq!(CelestialBody::from_name("Black Moon Lilith"), Some(CelestialBody::Lilith));
    assert_eq!(CelestialBody::from_name("Vulcan"), None);
}

#[test]
fn test_duplicate_bodies() {
    let response = ProviderResponse {
        planets: vec![
            ProviderPlanet {
                name: "true_node".to_string(),
                longitude: 100.0,
                latitude: 0.0,
                retrograde: None,
                speed: -0.05,
            },
            ProviderPlanet {
                name: "mean_node".to_string(),
                longitude: 101.2,
                latitude: 0.0,
                retrograde: None,
                speed: -0.05,
            },
        ],
        ..Default::default()
    };

    let lenient = map_response(&response, MappingPolicy::Lenient).unwrap();
    assert_eq!(lenient.planets.len(), 1);
    assert_eq!(lenient.planets[0].longitude, 100.0);

    assert_eq!(
        map_response(&response, MappingPolicy::Strict),
        Err(MappingError::DuplicateBody {
            body: CelestialBody::NorthNode
        })
    );
}

#[test]
fn test_cusp_sign_checks() {
    let mismatched = ProviderResponse {
        cusps: vec![ProviderCusp {
            number: 1,
            longitude: 2.4,
            sign: Some("Taurus".to_string()),
        }],
        ..Default::default()
    };
    assert_eq!(
        map_response(&mismatched, MappingPolicy::Strict),
        Err(MappingError::SignMismatch {
            house: 1,
            reported: "Taurus".to_string(),
            derived: ZodiacSign::Aries,
        })
    );
    assert_eq!(
        map_response(&mismatched, MappingPolicy::Lenient)
            .unwrap()
            .cusps
            .len(),
        1
    );

    let unknown = ProviderResponse {
        cusps: vec![ProviderCusp {
            number: 1,
            longitude: 2.4,
            sign: Some("Serpentarius".to_string()),
        }],
        ..Default::default()
    };
    assert!(matches!(
        map_response(&unknown, MappingPolicy::Strict),
        Err(MappingError::UnknownName { kind: NameKind::Sign, .. })
    ));
    assert!(map_response(&unknown, MappingPolicy::Lenient).is_ok());
}

#[test]
fn test_non_finite_values_fail_in_both_policies() {
    let response = ProviderResponse {
        planets: vec![ProviderPlanet {
            name: "Sun".to_string(),
            longitude: f64::NAN,
            latitude: 0.0,
            retrograde: None,
            speed: 1.0,
        }],
        ..Default::default()
    };
    for policy in [MappingPolicy::Strict, MappingPolicy::Lenient] {
        assert!(matches!(
            map_response(&response, policy),
            Err(MappingError::NonFinite { .. })
        ));
    }
}

#[test]
fn test_policy_from_name() {
    assert_eq!(MappingPolicy::from_name("Lenient"), Some(MappingPolicy::Lenient));
    assert_eq!(MappingPolicy::from_name("strict"), Some(MappingPolicy::Strict));
    assert_eq!(MappingPolicy::from_name("loose"), None);
}
