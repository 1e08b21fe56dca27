use polyline::testing::paths::random_line_string;
use polyline::testing::paths::random_polygon;
use polyline::Geometry;
use polyline::GeometryKind;
use rand::rngs::StdRng;
use rand::SeedableRng as _;

#[test_log::test]
fn line_strings_roundtrip_through_json() {
    let mut rng = StdRng::seed_from_u64(11);
    let line = random_line_string(&mut rng, 50, 5);
    let json = serde_json::to_string(&line).unwrap();

    let encoded = polyline::encode_geojson(&json, 5).unwrap();
    assert_eq!(encoded, polyline::encode_geometry(&line, 5).unwrap());

    let decoded = polyline::decode_geojson(&encoded, 5, "LineString").unwrap();
    let decoded: Geometry = serde_json::from_str(&decoded).unwrap();
    assert_eq!(decoded, line);
}

#[test_log::test]
fn open_polygons_come_back_closed() {
    let mut rng = StdRng::seed_from_u64(12);
    let Geometry::Polygon { coordinates } = random_polygon(&mut rng, 20, 5) else {
        panic!("expected a polygon");
    };
    let ring = coordinates[0].clone();
    let polygon = Geometry::Polygon { coordinates };

    let encoded = polyline::encode_geometry(&polygon, 5).unwrap();
    let decoded = polyline::decode_geometry(&encoded, 5, GeometryKind::Polygon).unwrap();

    let mut closed = ring.clone();
    if ring.first() != ring.last() {
        closed.push(ring[0]);
    }
    assert_eq!(decoded, Geometry::Polygon { coordinates: vec![closed] });
}

#[test]
fn settings_drive_the_codec() {
    let settings = polyline::config::Settings::default();
    let codec = settings.codec();

    let line = Geometry::LineString {
        coordinates: vec![[-120.2, 38.5], [-120.95, 40.7], [-126.453, 43.252]],
    };
    let encoded = codec.encode_geometry(&line).unwrap();
    assert_eq!(encoded, "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
    assert_eq!(codec.decode_geometry(&encoded, settings.codec.geometry).unwrap(), line);
}

#[test]
fn unsupported_types_are_rejected() {
    let point = r#"{"type":"Point","coordinates":[-120.2,38.5]}"#;
    assert!(matches!(
        polyline::encode_geojson(point, 5),
        Err(polyline::Error::InvalidGeometry(_))
    ));
    assert!(matches!(
        polyline::decode_geojson("??", 5, "Point"),
        Err(polyline::Error::InvalidGeometry(_))
    ));
}
