//! Phrasing content: mdast → engine inline tree → HTML.

use markdown::mdast::Node;
use std::collections::HashMap;
use typographer_core::Inline;

/// Target of a link reference definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// Destination URL.
    pub url: String,
    /// Optional title.
    pub title: Option<String>,
}

/// Link reference definitions keyed by normalized identifier.
pub type Definitions = HashMap<String, Definition>;

/// Collects every definition in the document; the first one wins.
pub fn collect_definitions(root: &Node) -> Definitions {
    fn walk(node: &Node, out: &mut Definitions) {
        if let Node::Definition(def) = node {
            out.entry(def.identifier.clone()).or_insert_with(|| Definition {
                url: def.url.clone(),
                title: def.title.clone(),
            });
        }
        if let Some(children) = node.children() {
            for child in children {
                walk(child, out);
            }
        }
    }

    let mut out = Definitions::new();
    walk(root, &mut out);
    out
}

/// Host data carried by structural inline nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    /// `<em>`
    Emphasis,
    /// `<strong>`
    Strong,
    /// `<del>`
    Delete,
    /// `<a>`
    Link {
        /// Escaped on output.
        url: String,
        /// Escaped on output.
        title: Option<String>,
    },
    /// Pre-rendered markup the engine must not look into.
    Raw(String),
}

impl HtmlNode {
    fn write_open(&self, out: &mut String) {
        match self {
            HtmlNode::Emphasis => out.push_str("<em>"),
            HtmlNode::Strong => out.push_str("<strong>"),
            HtmlNode::Delete => out.push_str("<del>"),
            HtmlNode::Link { url, title } => {
                out.push_str("<a href=\"");
                push_attr(out, url);
                out.push('"');
                if let Some(title) = title {
                    out.push_str(" title=\"");
                    push_attr(out, title);
                    out.push('"');
                }
                out.push('>');
            }
            HtmlNode::Raw(html) => out.push_str(html),
        }
    }

    fn write_close(&self, out: &mut String) {
        match self {
            HtmlNode::Emphasis => out.push_str("</em>"),
            HtmlNode::Strong => out.push_str("</strong>"),
            HtmlNode::Delete => out.push_str("</del>"),
            HtmlNode::Link { .. } => out.push_str("</a>"),
            HtmlNode::Raw(_) => {}
        }
    }
}

pub(crate) fn push_text(out: &mut String, s: &str) {
    out.push_str(&html_escape::encode_text(s));
}

pub(crate) fn push_attr(out: &mut String, s: &str) {
    out.push_str(&html_escape::encode_double_quoted_attribute(s));
}

/// Converts mdast phrasing nodes into the engine's inline tree.
pub struct Phrasing<'a> {
    /// Pass raw HTML through instead of escaping it.
    pub raw_html: bool,
    /// Targets for link and image references.
    pub definitions: &'a Definitions,
}

impl Phrasing<'_> {
    /// Converts `nodes`. Code, images and raw HTML become opaque.
    pub fn convert(&self, nodes: &[Node]) -> Vec<Inline<HtmlNode>> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            self.convert_node(node, &mut out);
        }
        out
    }

    fn convert_node(&self, node: &Node, out: &mut Vec<Inline<HtmlNode>>) {
        match node {
            Node::Text(text) => out.push(Inline::text(text.value.as_str())),
            Node::Emphasis(n) => out.push(Inline::element(HtmlNode::Emphasis, self.convert(&n.children))),
            Node::Strong(n) => out.push(Inline::element(HtmlNode::Strong, self.convert(&n.children))),
            Node::Delete(n) => out.push(Inline::element(HtmlNode::Delete, self.convert(&n.children))),
            Node::Link(link) => out.push(Inline::element(
                HtmlNode::Link {
                    url: link.url.clone(),
                    title: link.title.clone(),
                },
                self.convert(&link.children),
            )),
            Node::LinkReference(reference) => match self.definitions.get(&reference.identifier) {
                Some(def) => out.push(Inline::element(
                    HtmlNode::Link {
                        url: def.url.clone(),
                        title: def.title.clone(),
                    },
                    self.convert(&reference.children),
                )),
                None => out.extend(self.convert(&reference.children)),
            },
            Node::InlineCode(code) => {
                let mut html = String::from("<code>");
                push_text(&mut html, &code.value);
                html.push_str("</code>");
                out.push(Inline::Opaque(HtmlNode::Raw(html)));
            }
            Node::InlineMath(math) => {
                let mut html = String::from("<code class=\"language-math math-inline\">");
                push_text(&mut html, &math.value);
                html.push_str("</code>");
                out.push(Inline::Opaque(HtmlNode::Raw(html)));
            }
            Node::Break(_) => out.push(Inline::Opaque(HtmlNode::Raw("<br />".to_string()))),
            Node::Image(img) => out.push(Inline::Opaque(HtmlNode::Raw(image_html(
                &img.url,
                &img.alt,
                img.title.as_deref(),
            )))),
            Node::ImageReference(reference) => {
                if let Some(def) = self.definitions.get(&reference.identifier) {
                    out.push(Inline::Opaque(HtmlNode::Raw(image_html(
                        &def.url,
                        &reference.alt,
                        def.title.as_deref(),
                    ))));
                }
            }
            Node::Html(html) => {
                let markup = if self.raw_html {
                    html.value.clone()
                } else {
                    let mut escaped = String::new();
                    push_text(&mut escaped, &html.value);
                    escaped
                };
                out.push(Inline::Opaque(HtmlNode::Raw(markup)));
            }
            _ => {
                log::warn!("Unhandled phrasing node type: {:?}", node);
            }
        }
    }
}

fn image_html(url: &str, alt: &str, title: Option<&str>) -> String {
    let mut html = String::from("<img src=\"");
    push_attr(&mut html, url);
    html.push_str("\" alt=\"");
    push_attr(&mut html, alt);
    html.push('"');
    if let Some(title) = title {
        html.push_str(" title=\"");
        push_attr(&mut html, title);
        html.push('"');
    }
    html.push_str(" />");
    html
}

/// Writes an inline tree as HTML. Style wrappers become `<span class="...">`.
pub fn write_inline(nodes: &[Inline<HtmlNode>], out: &mut String) {
    for node in nodes {
        match node {
            Inline::Text(value) => push_text(out, value),
            Inline::Element { data, children } => {
                data.write_open(out);
                write_inline(children, out);
                data.write_close(out);
            }
            Inline::Opaque(data) => {
                data.write_open(out);
                data.write_close(out);
            }
            Inline::Styled { class, children } => {
                out.push_str("<span class=\"");
                out.push_str(class.as_str());
                out.push_str("\">");
                write_inline(children, out);
                out.push_str("</span>");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParseOptions;
    use crate::parse::parse_mdast;
    use typographer_core::StyleClass;

    fn paragraph_children(markdown: &str) -> Vec<Node> {
        let root = parse_mdast(markdown, &ParseOptions::default()).unwrap();
        match root.children().and_then(|c| c.first()) {
            Some(Node::Paragraph(p)) => p.children.clone(),
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn structural_and_opaque_nodes() {
        let children = paragraph_children("a *b* `c` [d](/e)");
        let definitions = Definitions::new();
        let inline = Phrasing {
            raw_html: false,
            definitions: &definitions,
        }
        .convert(&children);
        assert_eq!(
            inline,
            vec![
                Inline::text("a "),
                Inline::element(HtmlNode::Emphasis, vec![Inline::text("b")]),
                Inline::text(" "),
                Inline::Opaque(HtmlNode::Raw("<code>c</code>".to_string())),
                Inline::text(" "),
                Inline::element(
                    HtmlNode::Link {
                        url: "/e".to_string(),
                        title: None
                    },
                    vec![Inline::text("d")]
                ),
            ]
        );
    }

    #[test]
    fn reference_links_resolve_through_definitions() {
        let root = parse_mdast("see [here][x]\n\n[x]: /target \"T\"", &ParseOptions::default())
            .unwrap();
        let definitions = collect_definitions(&root);
        assert_eq!(
            definitions.get("x"),
            Some(&Definition {
                url: "/target".to_string(),
                title: Some("T".to_string())
            })
        );

        let Some(Node::Paragraph(p)) = root.children().and_then(|c| c.first()) else {
            panic!("expected paragraph");
        };
        let mut html = String::new();
        let inline = Phrasing {
            raw_html: false,
            definitions: &definitions,
        }
        .convert(&p.children);
        write_inline(&inline, &mut html);
        assert_eq!(html, "see <a href=\"/target\" title=\"T\">here</a>");
    }

    #[test]
    fn writes_spans_and_escapes_text() {
        let nodes = vec![
            Inline::text("a < b "),
            Inline::Styled {
                class: StyleClass::DoubleQuote,
                children: vec![Inline::text("x")],
            },
        ];
        let mut html = String::new();
        write_inline(&nodes, &mut html);
        assert_eq!(html, "a &lt; b <span class=\"doubleQuote\">x</span>");
    }
}
