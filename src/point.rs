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

#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// A 2D point, optionally tagged with the stroke it belongs to.
/// The stroke id is the index of the pen down/up segment (e.g., 0, 1, 2, ...)
/// and is only used to decide which consecutive points are connected.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub stroke_id: Option<i32>,
}

impl Point {
    /// Constructs an untagged point
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            stroke_id: None,
        }
    }

    /// Constructs a point belonging to stroke `stroke_id`
    pub const fn with_stroke(x: f32, y: f32, stroke_id: i32) -> Self {
        Self {
            x,
            y,
            stroke_id: Some(stroke_id),
        }
    }

    /// Returns a copy of this point moved to (x, y), keeping its stroke id
    pub fn moved_to(&self, x: f32, y: f32) -> Self {
        Self { x, y, ..*self }
    }

    /// Whether `self` and `other` are consecutive samples of the same pen stroke.
    /// Untagged points all belong to one implicit stroke.
    pub fn shares_stroke(&self, other: &Point) -> bool {
        self.stroke_id == other.stroke_id
    }

    /// Linear interpolation from `self` (t = 0) towards `other` (t = 1).
    /// The result lies on `other`'s stroke.
    pub fn lerp(&self, other: &Point, t: f32) -> Point {
        other.moved_to(
            (1.0 - t) * self.x + t * other.x,
            (1.0 - t) * self.y + t * other.y,
        )
    }

    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lerp_takes_target_stroke() {
        let a = Point::with_stroke(0.0, 0.0, 1);
        let b = Point::with_stroke(2.0, 4.0, 2);
        let mid = a.lerp(&b, 0.25);
        assert_relative_eq!(mid.x, 0.5);
        assert_relative_eq!(mid.y, 1.0);
        assert_eq!(mid.stroke_id, Some(2));
    }

    #[test]
    fn untagged_points_share_a_stroke() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 1.0);
        assert!(a.shares_stroke(&b));
        assert!(!a.shares_stroke(&Point::with_stroke(1.0, 1.0, 0)));
        assert!(!Point::with_stroke(0.0, 0.0, 0).shares_stroke(&Point::with_stroke(0.0, 0.0, 1)));
    }

    #[test]
    fn displays_as_colon_pair() {
        assert_eq!(Point::new(1.5, -2.0).to_string(), "1.5:-2");
    }

    #[test]
    fn nan_detection() {
        assert!(Point::new(f32::NAN, 0.0).is_nan());
        assert!(!Point::from((0.0, 1.0)).is_nan());
    }
}
