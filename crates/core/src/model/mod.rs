//! The page model: the serializable output of compilation.
//!
//! Shape on the wire:
//!
//! ```json
//! { "version": "1.0",
//!   "book": { "pages": [ { "id": "page-1",
//!                          "size": { "width": 794.0, "height": 1123.0 },
//!                          "background": "#ffffff",
//!                          "layers": [ { "name": "content", "elements": [] } ] } ] } }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::css::LayoutKind;

/// Root artifact. `book_name` and `book_image` are filled in by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookModel {
    pub version: String,
    pub book: Book,
    #[serde(rename = "bookName", default, skip_serializing_if = "Option::is_none")]
    pub book_name: Option<String>,
    #[serde(rename = "bookImage", default, skip_serializing_if = "Option::is_none")]
    pub book_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub size: PageSize,
    pub background: String,
    pub layers: Vec<Layer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub elements: Vec<LayoutElement>,
}

/// Explicit placement of an element taken out of normal flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Typed style of an element: normalized colors and sizes plus every other
/// raw declaration passed through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStyle {
    pub color: Option<String>,
    pub background: Option<String>,
    #[serde(rename = "fontSize")]
    pub font_size: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    #[serde(flatten)]
    pub declarations: BTreeMap<String, String>,
}

/// One compiled element. Absent elements are simply not constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayoutElement {
    Text(Leaf<TextData>),
    Image(Leaf<ImageData>),
    Video(Leaf<PlaybackData>),
    Audio(Leaf<PlaybackData>),
    Model3d(Leaf<ModelData>),
    Math(Leaf<MathData>),
    Row(Container),
    Column(Container),
}

/// A content-bearing element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf<D> {
    pub frame: Option<Frame>,
    pub style: ResolvedStyle,
    pub data: D,
}

/// An element holding an ordered, non-empty list of children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub style: ResolvedStyle,
    pub children: Vec<LayoutElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextData {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    pub src: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackData {
    pub src: Option<String>,
    pub controls: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelData {
    pub src: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathData {
    pub value: String,
    pub format: MathFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathFormat {
    Latex,
}

impl LayoutElement {
    /// Wrap children into the container variant for `kind`.
    pub fn container(kind: LayoutKind, container: Container) -> Self {
        match kind {
            LayoutKind::Row => LayoutElement::Row(container),
            LayoutKind::Column => LayoutElement::Column(container),
        }
    }

    /// The `type` tag this element serializes with.
    pub fn kind(&self) -> &'static str {
        match self {
            LayoutElement::Text(_) => "text",
            LayoutElement::Image(_) => "image",
            LayoutElement::Video(_) => "video",
            LayoutElement::Audio(_) => "audio",
            LayoutElement::Model3d(_) => "model3d",
            LayoutElement::Math(_) => "math",
            LayoutElement::Row(_) => "row",
            LayoutElement::Column(_) => "column",
        }
    }

    pub fn style(&self) -> &ResolvedStyle {
        match self {
            LayoutElement::Text(leaf) => &leaf.style,
            LayoutElement::Image(leaf) => &leaf.style,
            LayoutElement::Video(leaf) | LayoutElement::Audio(leaf) => &leaf.style,
            LayoutElement::Model3d(leaf) => &leaf.style,
            LayoutElement::Math(leaf) => &leaf.style,
            LayoutElement::Row(c) | LayoutElement::Column(c) => &c.style,
        }
    }

    /// Positioning frame; containers never carry one.
    pub fn frame(&self) -> Option<&Frame> {
        match self {
            LayoutElement::Text(leaf) => leaf.frame.as_ref(),
            LayoutElement::Image(leaf) => leaf.frame.as_ref(),
            LayoutElement::Video(leaf) | LayoutElement::Audio(leaf) => leaf.frame.as_ref(),
            LayoutElement::Model3d(leaf) => leaf.frame.as_ref(),
            LayoutElement::Math(leaf) => leaf.frame.as_ref(),
            LayoutElement::Row(_) | LayoutElement::Column(_) => None,
        }
    }

    pub fn children(&self) -> &[LayoutElement] {
        match self {
            LayoutElement::Row(c) | LayoutElement::Column(c) => &c.children,
            _ => &[],
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            LayoutElement::Text(leaf) => Some(&leaf.data.value),
            _ => None,
        }
    }

    /// Source of an image element, when present and non-empty.
    pub fn image_src(&self) -> Option<&str> {
        match self {
            LayoutElement::Image(leaf) => leaf.data.src.as_deref().filter(|s| !s.is_empty()),
            _ => None,
        }
    }
}

impl Page {
    /// All top-level elements across every layer, in layer order.
    pub fn elements(&self) -> impl Iterator<Item = &LayoutElement> {
        self.layers.iter().flat_map(|layer| layer.elements.iter())
    }
}

/// The `{html, css}` document handed to the compiler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileInput {
    pub html: String,
    pub css: String,
}

impl CompileInput {
    pub fn from_json_str(source: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }
}
