// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderer plumbing: per-object renderers, the kind-keyed registry that resolves them,
//! and the minimal canvas interface used for grid decorations.
//!
//! Renderers are registered per object kind when the view is configured. At scan time
//! each object is classified with [`Classify::kind`] and its renderer is looked up; a
//! registry default covers kinds without their own entry. A renderer that cannot
//! project onto a 2D surface is a configuration mistake and is reported as
//! [`ViewError::MissingCapability`] instead of being skipped.

use core::fmt;
use core::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

use bitflags::bitflags;
use kurbo::{Line, Rect};
use rustc_hash::FxHashMap;

use crate::error::ViewError;
use crate::types::DrawInfo;

bitflags! {
    /// Projections a renderer knows how to produce.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Can paint and hit-test onto a flat 2D surface.
        const PROJECT_2D = 0b0000_0001;
        /// Can build a 3D model (not used by the 2D view).
        const MODEL_3D   = 0b0000_0010;
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::PROJECT_2D
    }
}

/// Paints and hit-tests one kind of object.
///
/// `O` is the object type stored in the grid, `S` the render surface.
pub trait ObjectRenderer<O, S: ?Sized> {
    /// Name used in diagnostics.
    fn name(&self) -> &str {
        core::any::type_name::<Self>()
    }

    /// Projections this renderer supports.
    fn capabilities(&self) -> Capabilities {
        Capabilities::PROJECT_2D
    }

    /// Paint `object` centered on `info.draw.origin()`.
    fn paint(&self, object: &O, surface: &mut S, info: &DrawInfo);

    /// True if `object`, drawn with `info`, intersects `info.clip`.
    fn hit_test(&self, object: &O, info: &DrawInfo) -> bool;
}

/// Maps an object to the kind used for renderer lookup.
pub trait Classify {
    /// Renderer lookup key.
    type Kind: Copy + Eq + Hash + fmt::Debug;

    /// The kind of this object.
    fn kind(&self) -> Self::Kind;
}

impl<T: Classify + ?Sized> Classify for Arc<T> {
    type Kind = T::Kind;

    fn kind(&self) -> Self::Kind {
        (**self).kind()
    }
}

impl<T: Classify + ?Sized> Classify for Rc<T> {
    type Kind = T::Kind;

    fn kind(&self) -> Self::Kind {
        (**self).kind()
    }
}

/// Renderers keyed by object kind, with an optional default.
pub struct RendererRegistry<O: Classify, S: ?Sized> {
    by_kind: FxHashMap<O::Kind, Arc<dyn ObjectRenderer<O, S>>>,
    fallback: Option<Arc<dyn ObjectRenderer<O, S>>>,
}

impl<O: Classify, S: ?Sized> Default for RendererRegistry<O, S> {
    fn default() -> Self {
        Self {
            by_kind: FxHashMap::default(),
            fallback: None,
        }
    }
}

impl<O: Classify, S: ?Sized> RendererRegistry<O, S> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `renderer` for objects of `kind`, replacing any previous entry.
    pub fn insert<R>(&mut self, kind: O::Kind, renderer: R) -> &mut Self
    where
        R: ObjectRenderer<O, S> + 'static,
    {
        self.by_kind.insert(kind, Arc::new(renderer));
        self
    }

    /// Builder form of [`RendererRegistry::insert`].
    pub fn with<R>(mut self, kind: O::Kind, renderer: R) -> Self
    where
        R: ObjectRenderer<O, S> + 'static,
    {
        self.insert(kind, renderer);
        self
    }

    /// Set the renderer used for kinds without their own entry.
    pub fn set_default<R>(&mut self, renderer: R) -> &mut Self
    where
        R: ObjectRenderer<O, S> + 'static,
    {
        self.fallback = Some(Arc::new(renderer));
        self
    }

    /// Builder form of [`RendererRegistry::set_default`].
    pub fn with_default<R>(mut self, renderer: R) -> Self
    where
        R: ObjectRenderer<O, S> + 'static,
    {
        self.set_default(renderer);
        self
    }

    /// Renderer for `object` that can draw in 2D.
    ///
    /// Fails if no renderer is registered for the object's kind and there is no
    /// default, or if the resolved renderer lacks [`Capabilities::PROJECT_2D`].
    pub fn resolve(&self, object: &O) -> Result<&dyn ObjectRenderer<O, S>, ViewError> {
        let kind = object.kind();
        let Some(renderer) = self.by_kind.get(&kind).or(self.fallback.as_ref()) else {
            return Err(ViewError::NoRenderer {
                kind: format!("{kind:?}"),
            });
        };
        if !renderer.capabilities().contains(Capabilities::PROJECT_2D) {
            return Err(ViewError::MissingCapability {
                renderer: renderer.name().to_owned(),
                kind: format!("{kind:?}"),
            });
        }
        Ok(renderer.as_ref())
    }

    /// Number of kinds with their own renderer.
    pub fn len(&self) -> usize {
        self.by_kind.len()
    }

    /// True if no kind has its own renderer (a default may still be set).
    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }
}

impl<O: Classify, S: ?Sized> fmt::Debug for RendererRegistry<O, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds = f.debug_map();
        for (kind, renderer) in &self.by_kind {
            kinds.entry(kind, &renderer.name());
        }
        kinds.finish()?;
        if let Some(fallback) = &self.fallback {
            write!(f, " (default: {})", fallback.name())?;
        }
        Ok(())
    }
}

/// 8-bit RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Opaque blue.
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Opaque red.
    pub const RED: Self = Self::rgb(255, 0, 0);

    /// Opaque color from components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Line style for decorations.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Line color.
    pub color: Color,
    /// Line width in pixels.
    pub width: f64,
}

/// Minimal drawing interface a render surface offers for grid lines and borders.
pub trait Canvas {
    /// Stroke a straight line.
    fn stroke_line(&mut self, line: Line, stroke: &Stroke);

    /// Stroke the outline of a rectangle.
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    enum Kind {
        Plain,
        Fancy,
    }

    struct Thing(Kind);

    impl Classify for Thing {
        type Kind = Kind;
        fn kind(&self) -> Kind {
            self.0
        }
    }

    struct Flat;
    impl ObjectRenderer<Arc<Thing>, ()> for Flat {
        fn paint(&self, _: &Arc<Thing>, _: &mut (), _: &DrawInfo) {}
        fn hit_test(&self, _: &Arc<Thing>, _: &DrawInfo) -> bool {
            true
        }
    }

    struct Solid;
    impl ObjectRenderer<Arc<Thing>, ()> for Solid {
        fn name(&self) -> &str {
            "solid"
        }
        fn capabilities(&self) -> Capabilities {
            Capabilities::MODEL_3D
        }
        fn paint(&self, _: &Arc<Thing>, _: &mut (), _: &DrawInfo) {}
        fn hit_test(&self, _: &Arc<Thing>, _: &DrawInfo) -> bool {
            false
        }
    }

    #[test]
    fn resolves_by_kind_then_default() {
        let reg: RendererRegistry<Arc<Thing>, ()> = RendererRegistry::new().with(Kind::Plain, Flat);
        assert!(reg.resolve(&Arc::new(Thing(Kind::Plain))).is_ok());
        let err = reg.resolve(&Arc::new(Thing(Kind::Fancy))).err().unwrap();
        assert_eq!(
            err,
            ViewError::NoRenderer {
                kind: "Fancy".into()
            }
        );
        let reg = reg.with_default(Flat);
        assert!(reg.resolve(&Arc::new(Thing(Kind::Fancy))).is_ok());
    }

    #[test]
    fn renderer_without_2d_projection_is_rejected() {
        let reg: RendererRegistry<Arc<Thing>, ()> =
            RendererRegistry::new().with(Kind::Fancy, Solid);
        let err = reg.resolve(&Arc::new(Thing(Kind::Fancy))).err().unwrap();
        assert_eq!(
            err,
            ViewError::MissingCapability {
                renderer: "solid".into(),
                kind: "Fancy".into()
            }
        );
    }
}
