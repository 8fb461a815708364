//! Property-based checks for the pipeline stages.
//!
//! ```bash
//! cargo test -p prosody-backend-audio --test properties
//! ```

use proptest::prelude::*;
use serde_json::{json, Value};

use prosody_backend_audio::wav::{decode_bytes, encode_to_vec};
use prosody_backend_audio::{apply_gain, change_speed, compute_intensity, Channels, Waveform};
use prosody_spec::ParameterMap;

fn arbitrary_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<f64>().prop_map(|f| json!(f)),
        (-4.0f64..4.0).prop_map(|f| json!(f)),
        prop::num::f64::NORMAL.prop_map(|f| json!(f)),
        prop_oneof![Just(f64::MAX), Just(-f64::MAX), Just(f64::MIN_POSITIVE)].prop_map(|f| json!(f)),
        any::<i32>().prop_map(|i| json!(i)),
        any::<bool>().prop_map(|b| json!(b)),
        "[ -~]{0,8}".prop_map(Value::String),
        Just(Value::Null),
    ]
}

fn arbitrary_map() -> impl Strategy<Value = ParameterMap> {
    prop::collection::vec(
        prop::collection::btree_map("[a-z_]{1,12}", arbitrary_value(), 0..6),
        0..8,
    )
    .prop_map(|words| {
        let mut map = ParameterMap::new();
        for (index, record) in words.into_iter().enumerate() {
            map.insert_raw(index.to_string(), json!(record));
        }
        map
    })
}

fn arbitrary_waveform() -> impl Strategy<Value = Waveform> {
    (any::<bool>(), prop::collection::vec(any::<i16>(), 0..400)).prop_map(|(stereo, mut samples)| {
        if stereo {
            samples.truncate(samples.len() / 2 * 2);
            Waveform::new(8000, Channels::Stereo, samples).unwrap()
        } else {
            Waveform::mono(8000, samples).unwrap()
        }
    })
}

proptest! {
    /// Intensity is always inside the unit interval.
    #[test]
    fn intensity_in_unit_interval(map in arbitrary_map()) {
        let intensity = compute_intensity(&map);
        prop_assert!((0.0..=1.0).contains(&intensity), "{}", intensity);
    }

    /// A map whose every value is `v` yields exactly clamp(v / 2).
    #[test]
    fn uniform_values_give_exact_intensity(v in -5.0f64..5.0, words in 1usize..10) {
        let mut map = ParameterMap::new();
        for index in 0..words {
            map.insert_raw(index.to_string(), json!({
                "breathiness": v, "creakiness": v, "nasality": v,
                "average_pitch": v, "average_range": v,
            }));
        }
        prop_assert_eq!(compute_intensity(&map), (v / 2.0).clamp(0.0, 1.0));
    }

    /// Gain never panics and keeps frame count, for any gain.
    #[test]
    fn gain_keeps_shape(wave in arbitrary_waveform(), gain in any::<f64>()) {
        let frames = wave.frame_count();
        let out = apply_gain(wave.clone(), gain);
        prop_assert_eq!(out.frame_count(), frames);
        prop_assert_eq!(out.channels(), wave.channels());
    }

    /// Doubling speed halves the length to within one frame.
    #[test]
    fn double_speed_halves(wave in arbitrary_waveform()) {
        let n = wave.frame_count();
        let out = change_speed(wave, 2.0).unwrap();
        prop_assert!(out.frame_count().abs_diff(n / 2) <= 1);
    }

    /// Selected frames always come from the input.
    #[test]
    fn speed_selects_existing_frames(wave in arbitrary_waveform(), factor in 0.1f64..4.0) {
        let input: Vec<Vec<i16>> = wave.frames().map(<[i16]>::to_vec).collect();
        let out = change_speed(wave, factor).unwrap();
        for frame in out.frames() {
            prop_assert!(input.iter().any(|f| f.as_slice() == frame));
        }
    }

    /// Encoding then decoding returns the same waveform.
    #[test]
    fn wav_round_trip(wave in arbitrary_waveform()) {
        let decoded = decode_bytes(&encode_to_vec(&wave).unwrap()).unwrap();
        prop_assert_eq!(decoded, wave);
    }
}
