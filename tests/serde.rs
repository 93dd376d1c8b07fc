#![cfg(feature = "serde")]

use p_recognizer::{classify, Gesture, Point, RecognitionResult};

#[test]
fn gestures_are_renormalized_on_load() {
    let raw = [Point::new(0.0, 0.0), Point::new(3.0, 4.0), Point::new(6.0, 0.0)];
    let caret = Gesture::new(&raw, "caret").unwrap();
    let dash = Gesture::new(&[Point::new(0.0, 0.0), Point::new(6.0, 0.0)], "dash").unwrap();

    let text = ron::to_string(&vec![caret.clone(), dash]).unwrap();
    let loaded: Vec<Gesture> = ron::from_str(&text).unwrap();

    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0], Gesture::new(caret.points(), "caret").unwrap());
    assert_eq!(loaded[1].name(), "dash");
    assert_eq!(classify(&caret, &loaded)[0].name, "caret");
}

#[test]
fn stored_raw_points_are_normalized_on_load() {
    let text = r#"(name: "dash", points: [(x: 100.0, y: 50.0), (x: 300.0, y: 50.0)])"#;
    let gesture: Gesture = ron::from_str(text).unwrap();
    assert_eq!(gesture.points().len(), p_recognizer::SAMPLING_RESOLUTION);
    assert!(gesture.points().iter().all(|p| p.x.abs() <= 0.5 + 1e-5));
    assert!(gesture.points().iter().all(|p| p.stroke_id.is_none()));
}

#[test]
fn stroke_ids_survive_serialization() {
    let text = r#"(name: "t", points: [
        (x: 0.0, y: 0.0, stroke_id: Some(0)), (x: 2.0, y: 0.0, stroke_id: Some(0)),
        (x: 1.0, y: 0.0, stroke_id: Some(1)), (x: 1.0, y: 2.0, stroke_id: Some(1)),
    ])"#;
    let gesture: Gesture = ron::from_str(text).unwrap();
    assert_eq!(gesture.points()[0].stroke_id, Some(0));
    assert_eq!(gesture.points().last().unwrap().stroke_id, Some(1));
}

#[test]
fn degenerate_records_fail_to_load() {
    let err = ron::from_str::<Gesture>(r#"(name: "tap", points: [(x: 1.0, y: 1.0)])"#)
        .unwrap_err()
        .to_string();
    assert!(err.contains("invalid input"), "{err}");
    assert!(ron::from_str::<Gesture>(r#"(name: "none", points: [])"#).is_err());
}

#[test]
fn results_serialize() {
    let result = RecognitionResult {
        name: "circle".into(),
        score: 0.5,
        sub_scores: None,
    };
    let text = ron::to_string(&result).unwrap();
    let back: RecognitionResult = ron::from_str(&text).unwrap();
    assert_eq!(back, result);
}
