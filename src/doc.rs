//! Document model: scene elements, their styles, and the ordered element store.
//!
//! This module defines what is on the canvas (`Element`, `ElementKind`), a
//! sparse-update type for incremental edits (`PartialElement`), and the store
//! that owns every live element in paint order (`ElementStore`).
//!
//! Each variant has a fixed attribute set. A `PartialElement` naming an
//! attribute outside that set is rejected as a whole, so a half-applied
//! update can never be observed.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::config::is_positive;

/// Unique identifier for a scene element.
pub type ElementId = Uuid;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("element not found: {0}")]
    UnknownElement(ElementId),
    #[error("duplicate element id: {0}")]
    DuplicateId(ElementId),
    #[error("{tag} elements have no `{attribute}` attribute")]
    UnsupportedAttribute { tag: ElementTag, attribute: &'static str },
    #[error("invalid color {0:?}: expected #RRGGBB")]
    InvalidColor(String),
    #[error("invalid {attribute}: {value} (must be positive)")]
    InvalidSize { attribute: &'static str, value: f64 },
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(f64),
    #[error("letter text must not be empty")]
    EmptyText,
    #[error("scene is read-only")]
    ReadOnly,
}

/// Variant tag of an element, used by selections and capability checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementTag {
    Letter,
    Ball,
}

impl fmt::Display for ElementTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Letter => f.write_str("letter"),
            Self::Ball => f.write_str("ball"),
        }
    }
}

/// Font family of a letter. The seven listed families are the ones the
/// property panel offers; anything else is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontFamily {
    #[default]
    Arial,
    Verdana,
    TimesNewRoman,
    CourierNew,
    Georgia,
    Tahoma,
    TrebuchetMs,
    Other(String),
}

impl FontFamily {
    /// Families offered by the property panel, in menu order.
    pub const LISTED: [Self; 7] = [
        Self::Arial,
        Self::Verdana,
        Self::TimesNewRoman,
        Self::CourierNew,
        Self::Georgia,
        Self::Tahoma,
        Self::TrebuchetMs,
    ];

    /// CSS family name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Arial => "Arial",
            Self::Verdana => "Verdana",
            Self::TimesNewRoman => "Times New Roman",
            Self::CourierNew => "Courier New",
            Self::Georgia => "Georgia",
            Self::Tahoma => "Tahoma",
            Self::TrebuchetMs => "Trebuchet MS",
            Self::Other(name) => name,
        }
    }

    /// Whether this family is one of the panel's listed options.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for FontFamily {
    fn from(name: &str) -> Self {
        match name {
            "Arial" => Self::Arial,
            "Verdana" => Self::Verdana,
            "Times New Roman" => Self::TimesNewRoman,
            "Courier New" => Self::CourierNew,
            "Georgia" => Self::Georgia,
            "Tahoma" => Self::Tahoma,
            "Trebuchet MS" => Self::TrebuchetMs,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for FontFamily {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<FontFamily> for String {
    fn from(family: FontFamily) -> Self {
        match family {
            FontFamily::Other(name) => name,
            listed => listed.as_str().to_owned(),
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single glyph placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Letter {
    /// Displayed character; may span several code points.
    pub text: String,
    pub font_size: f64,
    /// `#RRGGBB`.
    pub color: String,
    pub font_family: FontFamily,
    /// Clockwise rotation in degrees. Not range-limited.
    pub rotation: f64,
}

/// A filled circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Diameter.
    pub size: f64,
    /// `#RRGGBB`.
    pub color: String,
}

/// Variant-specific payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ElementKind {
    Letter(Letter),
    Ball(Ball),
}

/// An element as stored in the scene and handed to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    /// Left edge in scene coordinates.
    pub x: f64,
    /// Top edge in scene coordinates.
    pub y: f64,
    #[serde(flatten)]
    pub kind: ElementKind,
}

/// Sparse update for an element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Letter only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Letter only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Letter and ball.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Letter only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<FontFamily>,
    /// Letter only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Ball only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

impl PartialElement {
    /// A position-only update, as produced by dragging.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Self::default() }
    }
}

impl Element {
    /// Create a letter at `(x, y)` with a fresh id.
    #[must_use]
    pub fn letter(x: f64, y: f64, letter: Letter) -> Self {
        Self { id: Uuid::new_v4(), x, y, kind: ElementKind::Letter(letter) }
    }

    /// Create a ball at `(x, y)` with a fresh id.
    #[must_use]
    pub fn ball(x: f64, y: f64, ball: Ball) -> Self {
        Self { id: Uuid::new_v4(), x, y, kind: ElementKind::Ball(ball) }
    }

    #[must_use]
    pub fn tag(&self) -> ElementTag {
        match self.kind {
            ElementKind::Letter(_) => ElementTag::Letter,
            ElementKind::Ball(_) => ElementTag::Ball,
        }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn as_letter(&self) -> Option<&Letter> {
        match &self.kind {
            ElementKind::Letter(letter) => Some(letter),
            ElementKind::Ball(_) => None,
        }
    }

    #[must_use]
    pub fn as_ball(&self) -> Option<&Ball> {
        match &self.kind {
            ElementKind::Ball(ball) => Some(ball),
            ElementKind::Letter(_) => None,
        }
    }

    /// Merge `partial` into this element.
    ///
    /// The whole update is validated against the variant's attribute set
    /// before anything is written.
    pub fn apply(&mut self, partial: &PartialElement) -> Result<(), SceneError> {
        self.check(partial)?;

        if let Some(x) = partial.x {
            self.x = x;
        }
        if let Some(y) = partial.y {
            self.y = y;
        }
        match &mut self.kind {
            ElementKind::Letter(letter) => {
                if let Some(text) = &partial.text {
                    letter.text.clone_from(text);
                }
                if let Some(size) = partial.font_size {
                    letter.font_size = size;
                }
                if let Some(color) = &partial.color {
                    letter.color.clone_from(color);
                }
                if let Some(family) = &partial.font_family {
                    letter.font_family = family.clone();
                }
                if let Some(rotation) = partial.rotation {
                    letter.rotation = rotation;
                }
            }
            ElementKind::Ball(ball) => {
                if let Some(size) = partial.size {
                    ball.size = size;
                }
                if let Some(color) = &partial.color {
                    ball.color.clone_from(color);
                }
            }
        }
        Ok(())
    }

    fn check(&self, partial: &PartialElement) -> Result<(), SceneError> {
        for coord in [partial.x, partial.y].into_iter().flatten() {
            if !coord.is_finite() {
                return Err(SceneError::InvalidCoordinate(coord));
            }
        }
        if let Some(color) = &partial.color {
            if !is_hex_color(color) {
                return Err(SceneError::InvalidColor(color.clone()));
            }
        }

        let tag = self.tag();
        let unsupported = |attribute| SceneError::UnsupportedAttribute { tag, attribute };
        match tag {
            ElementTag::Letter => {
                if partial.size.is_some() {
                    return Err(unsupported("size"));
                }
                if partial.text.as_ref().is_some_and(String::is_empty) {
                    return Err(SceneError::EmptyText);
                }
                if let Some(size) = partial.font_size {
                    if !is_positive(size) {
                        return Err(SceneError::InvalidSize { attribute: "font_size", value: size });
                    }
                }
                if let Some(rotation) = partial.rotation {
                    if !rotation.is_finite() {
                        return Err(SceneError::InvalidCoordinate(rotation));
                    }
                }
            }
            ElementTag::Ball => {
                if partial.text.is_some() {
                    return Err(unsupported("text"));
                }
                if partial.font_size.is_some() {
                    return Err(unsupported("font_size"));
                }
                if partial.font_family.is_some() {
                    return Err(unsupported("font_family"));
                }
                if partial.rotation.is_some() {
                    return Err(unsupported("rotation"));
                }
                if let Some(size) = partial.size {
                    if !is_positive(size) {
                        return Err(SceneError::InvalidSize { attribute: "size", value: size });
                    }
                }
            }
        }
        Ok(())
    }
}

/// `true` for strings of the form `#RRGGBB` (either case).
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].bytes().all(|b| b.is_ascii_hexdigit())
}

/// In-memory store of scene elements in paint order (later = on top).
///
/// Only live ids are checked for collisions; fresh ids come from UUID v4,
/// so an id is not handed out twice over a session.
#[derive(Debug, Default)]
pub struct ElementStore {
    elements: Vec<Element>,
}

impl ElementStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element on top of the paint order.
    pub fn push(&mut self, element: Element) -> Result<(), SceneError> {
        if self.contains(&element.id) {
            return Err(SceneError::DuplicateId(element.id));
        }
        self.elements.push(element);
        Ok(())
    }

    /// Remove an element by id, returning it if it was present.
    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        let index = self.elements.iter().position(|e| e.id == *id)?;
        Some(self.elements.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Apply a partial update to an existing element.
    pub fn apply_partial(&mut self, id: &ElementId, partial: &PartialElement) -> Result<(), SceneError> {
        let element = self
            .elements
            .iter_mut()
            .find(|e| e.id == *id)
            .ok_or(SceneError::UnknownElement(*id))?;
        element.apply(partial)
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Elements in paint order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Largest `y` among all elements, or `None` when empty.
    #[must_use]
    pub fn max_y(&self) -> Option<f64> {
        self.elements.iter().map(|e| e.y).reduce(f64::max)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
