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

use log::{debug, trace};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

use crate::{
    error::{GestureError, Result},
    geometry,
    point::Point,
};

/// Number of points on a normalized gesture path
pub const SAMPLING_RESOLUTION: usize = 32;

/// Implements a gesture as a cloud of points (i.e., an unordered set of points).
/// Gestures are normalized with respect to scale, translated to origin, and resampled
/// into a fixed number of [`SAMPLING_RESOLUTION`] points.
///
/// A gesture is immutable once built. Deserialized gestures go through the same
/// normalization as freshly captured ones.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "GestureRecord")
)]
pub struct Gesture {
    name: String,
    points: Vec<Point>,
}

/// Stored shape of a gesture, normalized again on load
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct GestureRecord {
    #[serde(default)]
    name: String,
    points: Vec<Point>,
}

#[cfg(feature = "serde")]
impl TryFrom<GestureRecord> for Gesture {
    type Error = GestureError;

    fn try_from(record: GestureRecord) -> Result<Self> {
        Gesture::new(&record.points, &record.name)
    }
}

impl Gesture {
    /// Constructs a gesture from raw input points and a class name.
    /// The name may be empty for candidates of unknown class.
    ///
    /// Fails with [`GestureError::InvalidInput`] if `points` is empty or collapses
    /// to a single point (e.g. a tap with no movement).
    ///
    /// Normalizing the points of an existing gesture again is only exact for evenly
    /// sampled straight strokes. Resampling cuts corners, so on other shapes the
    /// bounding box and centroid move and the points drift slightly.
    pub fn new(points: &[Point], name: &str) -> Result<Self> {
        if points.is_empty() {
            debug!("rejecting gesture {name:?}: no points");
            return Err(GestureError::InvalidInput("gesture has no points"));
        }

        let points = Self::scale(points);
        let c = geometry::centroid(&points);
        let points = Self::translate_to(&points, &c);
        let points = Self::resample(&points, SAMPLING_RESOLUTION);

        if let [single] = points.as_slice() {
            debug!("rejecting gesture {name:?}: collapsed to {single}");
            return Err(GestureError::InvalidInput(if single.is_nan() {
                "gesture has zero extent"
            } else {
                "gesture has no connected path"
            }));
        }
        trace!("normalized gesture {name:?} to {} points", points.len());

        Ok(Self {
            name: name.into(),
            points,
        })
    }

    /// Gesture class
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gesture points (normalized)
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consumes the gesture, returning its class and normalized points
    pub fn into_parts(self) -> (String, Vec<Point>) {
        (self.name, self.points)
    }

    /// Performs scale normalization with shape preservation into [0..1]x[0..1]
    fn scale(points: &[Point]) -> Vec<Point> {
        let Some(bounds) = geometry::bounding_box(points) else {
            return Vec::new();
        };
        // zero extent yields NaN coordinates, caught after resampling
        let scale = bounds.width().max(bounds.height());
        points
            .iter()
            .map(|p| p.moved_to((p.x - bounds.min_x) / scale, (p.y - bounds.min_y) / scale))
            .collect()
    }

    /// Translates the array of points by p
    fn translate_to(points: &[Point], p: &Point) -> Vec<Point> {
        points
            .iter()
            .map(|point| point.moved_to(point.x - p.x, point.y - p.y))
            .collect()
    }

    /// Resamples the array of points into n points equally distanced along the path
    fn resample(points: &[Point], n: usize) -> Vec<Point> {
        let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
            return Vec::new();
        };
        let mut new_points = Vec::with_capacity(n);
        new_points.push(first);

        let interval = geometry::path_length(points) / (n as f32 - 1.0);
        if !(interval > 0.0) {
            // nothing to walk along
            return new_points;
        }
        // distance walked since the last emitted point
        let mut walked = 0.0;

        for w in points.windows(2) {
            let (from, to) = (&w[0], &w[1]);
            if !from.shares_stroke(to) {
                continue;
            }
            let mut dist = geometry::euclidean_distance(from, to);
            if walked + dist < interval {
                walked += dist;
                continue;
            }
            let mut start = *from;
            while walked + dist >= interval {
                let mut t = ((interval - walked) / dist).clamp(0.0, 1.0);
                if t.is_nan() {
                    t = 0.5;
                }
                let q = start.lerp(to, t);
                new_points.push(q);

                // update partial length
                dist = walked + dist - interval;
                walked = 0.0;
                start = q;
            }
            walked = dist;
        }

        // sometimes we fall a rounding-error short of adding the last point, so add it if so
        if new_points.len() == n - 1 {
            new_points.push(last);
        }
        new_points
    }
}
