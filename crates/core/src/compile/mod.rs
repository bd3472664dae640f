//! Element classification and compilation: DOM nodes + indexed styles into
//! [`LayoutElement`]s, and the page/book wrapped around them.

use crate::config::CompileConfig;
use crate::css::{
    extract_translate, is_removed_from_flow, normalize_number, resolve_layout, Declarations,
    Normalizer, StyleMap,
};
use crate::dom::DomNode;
use crate::error::{Error, Result};
use crate::model::{
    Book, BookModel, Container, Frame, ImageData, Layer, LayoutElement, Leaf, MathData,
    MathFormat, ModelData, Page, PageSize, PlaybackData, ResolvedStyle, TextData,
};

/// Version stamped on freshly compiled models; the store may bump it.
pub const MODEL_VERSION: &str = "1.0";

/// Name of the single layer every page carries.
pub const CONTENT_LAYER: &str = "content";

/// Tag of the nested viewer inside a `3d_object` element.
const MODEL_VIEWER_TAG: &str = "model-viewer";

/// Annotation encoding marking TeX source inside MathML.
const TEX_ENCODING: &str = "application/x-tex";

/// Declarations replaced by their resolved forms in [`ResolvedStyle`].
const RESOLVED_PROPERTIES: &[&str] = &["color", "background", "width", "height"];

/// Compiles one document against one stylesheet. Holds no state beyond its
/// inputs, so the same compiler yields the same output for the same node.
pub struct Compiler<'a> {
    config: &'a CompileConfig,
    normalizer: Normalizer,
    styles: StyleMap,
}

impl<'a> Compiler<'a> {
    pub fn new(config: &'a CompileConfig, styles: StyleMap) -> Self {
        Self {
            config,
            normalizer: Normalizer::new(config.colors.clone()),
            styles,
        }
    }

    /// Compile a single node, or `None` when it contributes nothing: non-element
    /// nodes, empty text, media wrappers missing their inner node, and
    /// containers whose children all compiled to nothing.
    pub fn compile_node(&self, node: &DomNode) -> Option<LayoutElement> {
        if !node.is_element() {
            return None;
        }

        let id = node.get_attr("id");
        let data_type = node.get_attr("data-type").map(str::trim);
        let raw = self.styles.lookup(id);

        let style = self.resolve_style(node, &raw);
        let frame = is_removed_from_flow(&raw).then(|| {
            let translate = raw
                .get("transform")
                .map(|t| extract_translate(t))
                .unwrap_or_default();
            Frame {
                x: translate.x,
                y: translate.y,
                width: style.width,
                height: style.height,
            }
        });

        match data_type {
            Some("text") => return text_element(node, frame, style),
            _ if node.tag == "p" => return text_element(node, frame, style),
            Some("image") => {
                return Some(LayoutElement::Image(Leaf {
                    frame,
                    style,
                    data: ImageData { src: src_of(node) },
                }))
            }
            Some("video") => {
                return Some(LayoutElement::Video(Leaf {
                    frame,
                    style,
                    data: PlaybackData { src: src_of(node), controls: true },
                }))
            }
            Some("audio") => {
                return Some(LayoutElement::Audio(Leaf {
                    frame,
                    style,
                    data: PlaybackData { src: src_of(node), controls: true },
                }))
            }
            Some("3d_object") => {
                let Some(viewer) = node.find_tag(MODEL_VIEWER_TAG) else {
                    log::debug!("dropping 3d_object {:?}: no <{}>", id, MODEL_VIEWER_TAG);
                    return None;
                };
                return Some(LayoutElement::Model3d(Leaf {
                    frame,
                    style,
                    data: ModelData { src: src_of(viewer) },
                }));
            }
            Some("equation") => {
                let Some(annotation) = node.find_descendant(|n| {
                    n.is_element()
                        && n.tag == "annotation"
                        && n.get_attr("encoding").map(str::trim) == Some(TEX_ENCODING)
                }) else {
                    log::debug!("dropping equation {:?}: no TeX annotation", id);
                    return None;
                };
                return Some(LayoutElement::Math(Leaf {
                    frame,
                    style,
                    data: MathData {
                        value: annotation.text_content(),
                        format: MathFormat::Latex,
                    },
                }));
            }
            _ => {}
        }

        let children: Vec<LayoutElement> = node
            .children
            .iter()
            .filter_map(|child| self.compile_node(child))
            .collect();

        if children.is_empty() {
            log::debug!("dropping empty <{}> container {:?}", node.tag, id);
            return None;
        }

        Some(LayoutElement::container(
            resolve_layout(&raw),
            Container {
                id: id.map(str::to_string),
                style,
                children,
            },
        ))
    }

    /// Typed style for `node` from its raw declarations. Width resolves
    /// percentages against the page width; width and height fall back to
    /// the element's HTML attributes.
    pub fn resolve_style(&self, node: &DomNode, raw: &Declarations) -> ResolvedStyle {
        let color = |prop: &str| {
            raw.get(prop)
                .and_then(|v| self.normalizer.normalize_color(v))
        };
        let length = |prop: &str, reference: Option<f64>| {
            raw.get(prop)
                .and_then(|v| normalize_number(v, reference))
                .or_else(|| node.get_attr(prop).and_then(|v| normalize_number(v, reference)))
        };

        let declarations = raw
            .iter()
            .filter(|(prop, _)| !RESOLVED_PROPERTIES.contains(&prop.as_str()))
            .map(|(prop, value)| (prop.clone(), value.clone()))
            .collect();

        ResolvedStyle {
            color: color("color"),
            background: color("background"),
            font_size: raw.get("font-size").and_then(|v| normalize_number(v, None)),
            width: length("width", Some(self.config.page.width)),
            height: length("height", None),
            declarations,
        }
    }

    /// Compile the body's children into a single-layer page.
    pub fn build_page(&self, document: &DomNode) -> Result<Page> {
        let body = document
            .find_body()
            .ok_or_else(|| Error::InvalidInput("document has no <body>".to_string()))?;

        let body_style = self.styles.lookup(body.get_attr("id"));
        let background = body_style
            .get("background")
            .and_then(|v| self.normalizer.normalize_color(v))
            .unwrap_or_else(|| self.config.page.background.clone());

        let elements: Vec<LayoutElement> = body
            .children
            .iter()
            .filter_map(|child| self.compile_node(child))
            .collect();

        Ok(Page {
            id: self.config.page.id.clone(),
            size: PageSize {
                width: self.config.page.width,
                height: self.config.page.height,
            },
            background,
            layers: vec![Layer {
                name: CONTENT_LAYER.to_string(),
                elements,
            }],
        })
    }
}

fn text_element(node: &DomNode, frame: Option<Frame>, style: ResolvedStyle) -> Option<LayoutElement> {
    let value = node.text_content();
    if value.is_empty() {
        log::debug!("dropping empty text <{}>", node.tag);
        return None;
    }
    Some(LayoutElement::Text(Leaf {
        frame,
        style,
        data: TextData { value },
    }))
}

fn src_of(node: &DomNode) -> Option<String> {
    node.get_attr("src").map(str::to_string)
}

/// Compile markup and stylesheet into a [`BookModel`] using `config`.
///
/// Both inputs must be non-blank; nothing is compiled otherwise.
pub fn compile_with_config(html: &str, css: &str, config: &CompileConfig) -> Result<BookModel> {
    if html.trim().is_empty() || css.trim().is_empty() {
        return Err(Error::InvalidInput("html and css are required".to_string()));
    }

    let document = crate::dom::parse_html(html)?;
    let styles = crate::css::parse_stylesheet(css);
    log::debug!("indexed {} styled ids", styles.len());

    let page = Compiler::new(config, styles).build_page(&document)?;

    Ok(BookModel {
        version: MODEL_VERSION.to_string(),
        book: Book { pages: vec![page] },
        book_name: None,
        book_image: None,
    })
}
