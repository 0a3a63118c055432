// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the grid view: per-object draw info, hit candidates, location
//! results, and selection.

use core::fmt;

use kurbo::{Point, Rect, Size};
use understory_dense_grid::{Coord3, Identity};

/// Text reported for an object whose location could not be recovered.
pub const LOCATION_UNKNOWN: &str = "location unknown";

/// Everything a renderer needs to paint or hit-test one object.
///
/// `draw` is centered: its origin is the midpoint of the cell's pixel footprint and
/// its size is the footprint's size. Renderers draw around `draw.origin()` rather
/// than from the cell corner. Use [`DrawInfo::footprint`] for the corner-anchored
/// cell rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawInfo {
    /// Centered destination rectangle (origin at the cell midpoint).
    pub draw: Rect,
    /// Clip region in draw mode, query region in hit-test mode.
    pub clip: Rect,
    /// Cell holding the object.
    pub location: Coord3,
    /// Whether the object is part of the current selection (draw mode only).
    pub selected: bool,
    /// Caller asked for precise rather than fast rendering.
    pub precise: bool,
}

impl DrawInfo {
    /// Midpoint of the cell's pixel footprint.
    pub fn center(&self) -> Point {
        self.draw.origin()
    }

    /// Pixel size of the cell. May be zero at very small scales.
    pub fn size(&self) -> Size {
        self.draw.size()
    }

    /// Corner-anchored pixel footprint of the cell.
    pub fn footprint(&self) -> Rect {
        Rect::from_center_size(self.center(), self.size())
    }
}

/// An object found by a hit test, with the cell it was found in.
#[derive(Clone, Debug)]
pub struct Candidate<O> {
    /// The object that was hit.
    pub object: O,
    /// Cell the object occupied when it was hit.
    pub location: Coord3,
}

/// Outcome of locating an object.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Located {
    /// The object is at this cell now.
    At(Coord3),
    /// The object was not found within the search bound.
    Unknown,
}

impl Located {
    /// The coordinate, if known.
    pub const fn coord(self) -> Option<Coord3> {
        match self {
            Self::At(c) => Some(c),
            Self::Unknown => None,
        }
    }

    /// True if the object was found.
    pub const fn is_known(self) -> bool {
        matches!(self, Self::At(_))
    }
}

impl From<Option<Coord3>> for Located {
    fn from(c: Option<Coord3>) -> Self {
        c.map_or(Self::Unknown, Self::At)
    }
}

impl fmt::Display for Located {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(c) => fmt::Display::fmt(c, f),
            Self::Unknown => f.write_str(LOCATION_UNKNOWN),
        }
    }
}

/// The set of selected objects: an optional primary plus any others.
///
/// Membership is by identity, see [`Identity`].
#[derive(Clone, Debug)]
pub struct Selection<O> {
    primary: Option<O>,
    others: Vec<O>,
}

impl<O> Default for Selection<O> {
    fn default() -> Self {
        Self {
            primary: None,
            others: Vec::new(),
        }
    }
}

impl<O: Identity> Selection<O> {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// A selection holding only `object` as primary.
    pub fn single(object: O) -> Self {
        Self {
            primary: Some(object),
            others: Vec::new(),
        }
    }

    /// The primary selected object.
    pub fn primary(&self) -> Option<&O> {
        self.primary.as_ref()
    }

    /// Replace the primary object, returning the previous one.
    pub fn set_primary(&mut self, object: Option<O>) -> Option<O> {
        core::mem::replace(&mut self.primary, object)
    }

    /// Add a secondary selected object. Objects already selected are ignored.
    pub fn add(&mut self, object: O) {
        if !self.contains(&object) {
            self.others.push(object);
        }
    }

    /// Deselect `object`. Returns true if it was selected.
    pub fn remove(&mut self, object: &O) -> bool {
        let mut removed = false;
        if self.primary.as_ref().is_some_and(|p| p.same_object(object)) {
            self.primary = None;
            removed = true;
        }
        let before = self.others.len();
        self.others.retain(|o| !o.same_object(object));
        removed || self.others.len() != before
    }

    /// True if `object` is the primary or one of the others.
    pub fn contains(&self, object: &O) -> bool {
        self.primary.as_ref().is_some_and(|p| p.same_object(object))
            || self.others.iter().any(|o| o.same_object(object))
    }

    /// True if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.others.is_empty()
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.primary = None;
        self.others.clear();
    }
}
