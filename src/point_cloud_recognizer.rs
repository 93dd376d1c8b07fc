/*
 * The $P Point-Cloud Recognizer (rust version)
 *
 * Original authors:
 * 
 * 	    Radu-Daniel Vatavu, Ph.D.
 *	    University Stefan cel Mare of Suceava
 *	    Suceava 720229, Romania
 *	    vatavu@eed.usv.ro
 *
 *	    Lisa Anthony, Ph.D.
 *      UMBC
 *      Information Systems Department
 *      1000 Hilltop Circle
 *      Baltimore, MD 21250
 *      lanthony@umbc.edu
 *
 *	    Jacob O. Wobbrock, Ph.D.
 * 	    The Information School
 *	    University of Washington
 *	    Seattle, WA 98195-2840
 *	    wobbrock@uw.edu
 *
 * The academic publication for the $P recognizer, and what should be 
 * used to cite it, is:
 *
 *	Vatavu, R.-D., Anthony, L. and Wobbrock, J.O. (2012).  
 *	  Gestures as point clouds: A $P recognizer for user interface 
 *	  prototypes. Proceedings of the ACM Int'l Conference on  
 *	  Multimodal Interfaces (ICMI '12). Santa Monica, California  
 *	  (October 22-26, 2012). New York: ACM Press, pp. 273-280.
 *
 * This software is distributed under the "New BSD License" agreement:
 *
 * Copyright (c) 2012, Radu-Daniel Vatavu, Lisa Anthony, and 
 * Jacob O. Wobbrock. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without
 * modification, are permitted provided that the following conditions are met:
 *    * Redistributions of source code must retain the above copyright
 *      notice, this list of conditions and the following disclaimer.
 *    * Redistributions in binary form must reproduce the above copyright
 *      notice, this list of conditions and the following disclaimer in the
 *      documentation and/or other materials provided with the distribution.
 *    * Neither the names of the University Stefan cel Mare of Suceava, 
 *	    University of Washington, nor UMBC, nor the names of its contributors 
 *	    may be used to endorse or promote products derived from this software 
 *	    without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS
 * IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO,
 * THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR
 * PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL Radu-Daniel Vatavu OR Lisa Anthony
 * OR Jacob O. Wobbrock OR Ferran Pujol Camins BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, 
 * EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT 
 * OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS 
 * INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, 
 * STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY
 * OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF
 * SUCH DAMAGE.
**/

use std::fmt;

use log::debug;
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

use crate::{geometry, gesture::Gesture, point::Point};

/// Default number of greedy search trials, as an exponent of the cloud size
pub const DEFAULT_EPS: f32 = 0.5;

pub struct Parameters {
    // controls the number of greedy search trials (eps is in [0..1]):
    // 1 tries every starting point, 0 tries a single one
    pub eps: f32,
    // keep the per-trial distances in RecognitionResult::sub_scores
    pub sub_scores: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            eps: DEFAULT_EPS,
            sub_scores: false,
        }
    }
}

/// Score of a candidate gesture against one training gesture
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecognitionResult {
    /// Class of the training gesture
    pub name: String,
    /// Dissimilarity, lower is better
    pub score: f32,
    /// Best distance of each greedy trial, when requested through [`Parameters`]
    #[cfg_attr(feature = "serde", serde(default))]
    pub sub_scores: Option<Vec<f32>>,
}

impl fmt::Display for RecognitionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.score)
    }
}

/// Main function of the $P recognizer.
/// Classifies a candidate gesture against a set of training samples.
/// Returns every training sample's score, best match first.
pub fn classify(candidate: &Gesture, training_set: &[Gesture]) -> Vec<RecognitionResult> {
    classify_with(candidate, training_set, &Parameters::default())
}

/// Same as [`classify`], with explicit search parameters.
///
/// Ties keep the order of `training_set`. NaN scores, which only come from
/// degenerate clouds, sort last.
pub fn classify_with(
    candidate: &Gesture,
    training_set: &[Gesture],
    params: &Parameters,
) -> Vec<RecognitionResult> {
    let mut results: Vec<RecognitionResult> = training_set
        .iter()
        .map(|template| {
            let (score, trials) = match_trials(candidate.points(), template.points(), params.eps);
            RecognitionResult {
                name: template.name().to_owned(),
                score,
                sub_scores: params.sub_scores.then_some(trials),
            }
        })
        .collect();
    rank(&mut results);

    if let Some(best) = results.first() {
        debug!(
            "classified {:?} against {} templates, best {best}",
            candidate.name(),
            training_set.len()
        );
    }
    results
}

/// Stable ascending sort by score with NaN after every number, whatever its sign bit
fn rank(results: &mut [RecognitionResult]) {
    results.sort_by(|a, b| {
        a.score
            .is_nan()
            .cmp(&b.score.is_nan())
            .then(a.score.total_cmp(&b.score))
    });
}

/// Minimum of two distances, NaN if either is NaN
fn nan_min(a: f32, b: f32) -> f32 {
    if a.is_nan() || b.is_nan() {
        f32::NAN
    } else {
        a.min(b)
    }
}

/// Implements greedy search for a minimum-distance matching between two point clouds.
/// A cloud holding NaN coordinates scores NaN.
pub fn greedy_cloud_match(points1: &[Point], points2: &[Point], eps: f32) -> f32 {
    match_trials(points1, points2, eps).0
}

/// Runs every greedy trial, returning the overall minimum and the minimum of each trial
fn match_trials(points1: &[Point], points2: &[Point], eps: f32) -> (f32, Vec<f32>) {
    // the two clouds should have the same number of points by now
    let n = points1.len();
    let eps = eps.clamp(0.0, 1.0);
    let step = ((n as f32).powf(1.0 - eps).floor() as usize).max(1);

    let trials: Vec<f32> = (0..n)
        .step_by(step)
        .map(|i| {
            // match points1 --> points2 starting with index point i
            let dist1 = cloud_distance(points1, points2, i);
            // match points2 --> points1 starting with index point i
            let dist2 = cloud_distance(points2, points1, i);
            nan_min(dist1, dist2)
        })
        .collect();
    let min_distance = trials.iter().copied().fold(f32::MAX, nan_min);
    (min_distance, trials)
}

/// Computes the distance between two point clouds by performing a minimum-distance greedy matching
/// starting with point start_index
pub fn cloud_distance(points1: &[Point], points2: &[Point], start_index: usize) -> f32 {
    let n = points1.len();
    let m = n.min(points2.len());
    // matched[j] signals whether point j from the 2nd cloud has been already matched
    let mut matched = vec![false; m];
    // sum of weighted distances between matched points (i.e., the distance between the two clouds)
    let mut sum = 0.0;

    for k in 0..n {
        let i = (start_index + k) % n;
        let mut closest: Option<(usize, f32)> = None;
        for (j, q) in points2[..m].iter().enumerate() {
            if matched[j] {
                continue;
            }
            let dist = geometry::sqr_euclidean_distance(&points1[i], q);
            if closest.map_or(true, |(_, min)| dist < min) {
                closest = Some((j, dist));
            }
        }
        let Some((index, min_distance)) = closest else {
            continue;
        };
        // point index from the 2nd cloud is matched to point i from the 1st cloud
        matched[index] = true;
        // weight each distance with a confidence coefficient that decreases from 1 to 0
        let weight = 1.0 - k as f32 / n as f32;
        sum += weight * min_distance;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::SAMPLING_RESOLUTION;
    use approx::assert_relative_eq;

    fn gesture(raw: &[(f32, f32)], name: &str) -> Gesture {
        let points: Vec<Point> = raw.iter().copied().map(Point::from).collect();
        Gesture::new(&points, name).unwrap()
    }

    fn zigzag() -> Gesture {
        gesture(&[(0.0, 0.0), (1.0, 2.0), (2.0, 0.0), (3.0, 2.0)], "zigzag")
    }

    fn vee() -> Gesture {
        gesture(&[(0.0, 0.0), (1.0, -1.0), (2.0, 0.0)], "vee")
    }

    #[test]
    fn self_match_is_zero() {
        let g = zigzag();
        assert_eq!(greedy_cloud_match(g.points(), g.points(), DEFAULT_EPS), 0.0);
        assert!(greedy_cloud_match(g.points(), vee().points(), DEFAULT_EPS) > 0.0);
    }

    #[test]
    fn cloud_distance_weights_decay_from_start() {
        let p = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let q = [Point::new(0.0, 1.0), Point::new(10.0, 2.0)];
        // start 0: full weight on the 1 unit gap, half weight on the 2 unit gap
        assert_relative_eq!(cloud_distance(&p, &q, 0), 1.0 + 0.5 * 4.0);
        // start 1: the order flips
        assert_relative_eq!(cloud_distance(&p, &q, 1), 4.0 + 0.5 * 1.0);
    }

    #[test]
    fn cloud_distance_matches_each_point_once() {
        // both points of p are closest to q[0], but only one may claim it
        let p = [Point::new(0.0, 0.0), Point::new(0.0, 1.0)];
        let q = [Point::new(0.0, 0.0), Point::new(0.0, 3.0)];
        assert_relative_eq!(cloud_distance(&p, &q, 0), 0.0 + 0.5 * 4.0);
    }

    #[test]
    fn ties_go_to_the_lowest_index() {
        let p = [Point::new(0.0, 0.0), Point::new(5.0, 0.0)];
        let q = [Point::new(-1.0, 0.0), Point::new(1.0, 0.0)];
        // p[0] ties between q[0] and q[1] and takes q[0]; p[1] is left with q[1]
        assert_relative_eq!(cloud_distance(&p, &q, 0), 1.0 + 0.5 * 16.0);
    }

    #[test]
    fn shorter_second_cloud_leaves_visits_unmatched() {
        let p = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)];
        let q = [Point::new(0.0, 0.0)];
        assert_relative_eq!(cloud_distance(&p, &q, 1), 1.0);
    }

    #[test]
    fn eps_controls_number_of_trials() {
        let a = zigzag();
        let b = vee();
        let run = |eps| {
            let params = Parameters {
                eps,
                sub_scores: true,
            };
            classify_with(&a, std::slice::from_ref(&b), &params)
                .remove(0)
                .sub_scores
                .unwrap()
                .len()
        };
        // n = 32: step 5 at eps 0.5, every point at eps 1, one trial at eps 0
        assert_eq!(run(0.5), 7);
        assert_eq!(run(1.0), 32);
        assert_eq!(run(0.0), 1);
        assert_eq!(run(3.0), 32);
    }

    #[test]
    fn sub_scores_bound_the_score() {
        let params = Parameters {
            sub_scores: true,
            ..Default::default()
        };
        let results = classify_with(&zigzag(), &[vee()], &params);
        let result = &results[0];
        let trials = result.sub_scores.as_ref().unwrap();
        assert!(trials.iter().all(|&t| t >= result.score));
        assert!(trials.contains(&result.score));
        assert!(classify(&zigzag(), &[vee()])[0].sub_scores.is_none());
    }

    #[test]
    fn classify_sorts_ascending() {
        let candidate = zigzag();
        let set = [vee(), zigzag(), vee()];
        let results = classify(&candidate, &set);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].name, "zigzag");
        assert_eq!(results[0].score, 0.0);
        assert!(results.windows(2).all(|w| w[0].score <= w[1].score));
    }

    #[test]
    fn classify_keeps_training_order_on_ties() {
        let candidate = zigzag();
        let first = gesture(&[(0.0, 0.0), (1.0, 2.0), (2.0, 0.0), (3.0, 2.0)], "first");
        let second = gesture(&[(0.0, 0.0), (2.0, 4.0), (4.0, 0.0), (6.0, 4.0)], "second");
        let results = classify(&candidate, &[vee(), first, second]);
        assert_eq!(results[0].score, results[1].score);
        assert_eq!(results[0].name, "first");
        assert_eq!(results[1].name, "second");
        assert_eq!(results[2].name, "vee");
    }

    #[test]
    fn classify_empty_training_set() {
        assert!(classify(&zigzag(), &[]).is_empty());
    }

    #[test]
    fn degenerate_cloud_scores_nan() {
        let g = zigzag();
        let zero = std::hint::black_box(0.0_f32);
        let broken = vec![Point::new(zero / zero, zero / zero); SAMPLING_RESOLUTION];
        assert!(greedy_cloud_match(g.points(), &broken, DEFAULT_EPS).is_nan());
        assert!(greedy_cloud_match(&broken, g.points(), DEFAULT_EPS).is_nan());
    }

    #[test]
    fn nan_scores_sort_last() {
        let g = zigzag();
        let zero = std::hint::black_box(0.0_f32);
        let broken = vec![Point::new(zero / zero, zero / zero); SAMPLING_RESOLUTION];
        let result = |name: &str, score| RecognitionResult {
            name: name.into(),
            score,
            sub_scores: None,
        };
        let mut results = vec![
            result("broken", greedy_cloud_match(g.points(), &broken, DEFAULT_EPS)),
            result("far", greedy_cloud_match(g.points(), vee().points(), DEFAULT_EPS)),
            result("negative nan", -f32::NAN),
            result("self", greedy_cloud_match(g.points(), g.points(), DEFAULT_EPS)),
        ];
        rank(&mut results);
        assert_eq!(results[0].name, "self");
        assert_eq!(results[1].name, "far");
        assert!(results[2..].iter().all(|r| r.score.is_nan()));
    }

    #[test]
    fn result_display() {
        let r = RecognitionResult {
            name: "circle".into(),
            score: 0.25,
            sub_scores: None,
        };
        assert_eq!(r.to_string(), "circle: 0.25");
    }
}
