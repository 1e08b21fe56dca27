//! Round-trip testing for verifying that the whole codec pipeline
//! (encode -> decode -> encode) holds for realistic paths.

use polyline::testing::paths::random_path;
use polyline::Coordinate;
use polyline::PolylineCodec;
use rand::rngs::StdRng;
use rand::SeedableRng as _;
use test_case::test_case;

#[test_case(0 ; "whole degrees")]
#[test_case(5 ; "default precision")]
#[test_case(6 ; "six digits")]
fn random_tracks_roundtrip(precision: u32) {
    let mut rng = StdRng::seed_from_u64(46);
    let codec = PolylineCodec::new(precision);

    for len in [0, 1, 2, 10, 500] {
        let path = random_path(&mut rng, len, precision);
        let encoded = codec.encode(&path);
        let decoded = codec.decode(&encoded).unwrap();

        assert_eq!(decoded, path);
        assert_eq!(codec.encode(&decoded), encoded);
    }
}

#[test_log::test]
fn tracks_compress_against_fixed_width() {
    let mut rng = StdRng::seed_from_u64(7);
    let path = random_path(&mut rng, 1000, 5);
    let encoded = polyline::encode(&path, 5);

    // Two f64 per point is 16 bytes, small deltas take a handful of chars.
    assert!(encoded.len() < path.len() * 16 / 2);
}

#[test]
fn concatenated_runs_decode_with_decode_signed() {
    let values = [0, 1, -1, 179, -179, 1 << 20, -(1 << 20), i32::MAX, i32::MIN];
    let encoded: String = values.iter().map(|&v| polyline::encode_signed(v)).collect();

    let mut index = 0;
    let mut decoded = Vec::new();
    while index < encoded.len() {
        let (value, next) = polyline::decode_signed(&encoded, index).unwrap();
        decoded.push(value);
        index = next;
    }
    assert_eq!(decoded, values);
}

#[test]
fn truncated_tracks_fail_to_decode() {
    let path = vec![
        Coordinate::new(38.5, -120.2),
        Coordinate::new(40.7, -120.95),
        Coordinate::new(43.252, -126.453),
    ];
    let encoded = polyline::encode(&path, 5);

    for cut in 1..encoded.len() {
        let result = polyline::decode(&encoded[..cut], 5);
        // Cutting on a point boundary is indistinguishable from a shorter path.
        match result {
            Ok(points) => assert!(points.len() < path.len()),
            Err(error) => assert!(error.is_malformed()),
        }
    }
}
