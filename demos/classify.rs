//! Builds a small gesture library, stores it as RON, loads it back and ranks a few strokes.

use std::f32::consts::TAU;

use p_recognizer::{classify, Gesture, Point};
use ron::ser::{to_string_pretty, PrettyConfig};

fn circle(center: (f32, f32), radius: f32, start: f32) -> Vec<Point> {
    (0..24)
        .map(|i| {
            let a = start + i as f32 * TAU / 24.0;
            Point::new(center.0 + radius * a.cos(), center.1 + radius * a.sin())
        })
        .collect()
}

fn polyline(points: &[(f32, f32)]) -> Vec<Point> {
    points.iter().copied().map(Point::from).collect()
}

fn arrow() -> Vec<Point> {
    let mut points: Vec<Point> = [(0.0, 5.0), (10.0, 5.0)]
        .iter()
        .map(|&(x, y)| Point::with_stroke(x, y, 0))
        .collect();
    points.extend(
        [(7.0, 2.0), (10.0, 5.0), (7.0, 8.0)]
            .iter()
            .map(|&(x, y)| Point::with_stroke(x, y, 1)),
    );
    points
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let library = vec![
        Gesture::new(&circle((0.0, 0.0), 1.0, 0.0), "circle")?,
        Gesture::new(&polyline(&[(0.0, 0.0), (5.0, 10.0), (10.0, 0.0)]), "caret")?,
        Gesture::new(&polyline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]), "square")?,
        Gesture::new(&arrow(), "arrow")?,
    ];

    let stored = to_string_pretty(&library, PrettyConfig::default())?;
    println!("stored {} gestures ({} bytes of RON)", library.len(), stored.len());
    let library: Vec<Gesture> = ron::from_str(&stored)?;

    let strokes = [
        ("wobbly circle", circle((50.0, 50.0), 30.0, 0.4)),
        ("tall caret", polyline(&[(0.0, 0.0), (3.0, 20.0), (6.0, 1.0)])),
        ("arrow", arrow().into_iter().map(|p| p.moved_to(p.x * 3.0, p.y * 3.0)).collect()),
        ("tap", polyline(&[(4.0, 4.0)])),
    ];

    for (label, raw) in strokes {
        let candidate = match Gesture::new(&raw, "") {
            Ok(g) => g,
            Err(e) => {
                println!("{label}: discarded ({e})");
                continue;
            }
        };
        let results = classify(&candidate, &library);
        let ranking: Vec<String> = results.iter().map(|r| format!("{r}")).collect();
        println!("{label}: {}", ranking.join(", "));
    }
    Ok(())
}
