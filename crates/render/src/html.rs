//! Block-level HTML rendering with per-block typography.

use crate::error::{BlockFailure, RenderDiagnostics, RenderError, SourceLocation};
use crate::options::RenderOptions;
use crate::parse::parse_mdast;
use crate::phrasing::{Definitions, Phrasing, collect_definitions, push_attr, push_text, write_inline};
use markdown::mdast::{AlignKind, Node};
use markdown::unist::Position;
use typographer_core::process_with_budget;

/// Output of rendering one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// HTML body.
    pub html: String,
    /// Blocks rendered without typography.
    pub diagnostics: RenderDiagnostics,
}

/// Renders a markdown document to HTML.
///
/// Typography runs on headings and paragraphs (including those inside lists,
/// blockquotes and table cells). A block the engine fails on is rendered
/// as is and recorded in [`Rendered::diagnostics`].
pub fn render_markdown(input: &str, options: &RenderOptions) -> Result<Rendered, RenderError> {
    let root = parse_mdast(input, &options.parse)?;
    let definitions = collect_definitions(&root);
    let mut renderer = Renderer::new(options, &definitions);
    renderer.render_node(&root);
    log::debug!(
        "typographer: rendered {} block(s), {} failure(s)",
        renderer.blocks,
        renderer.diagnostics.failures.len()
    );
    Ok(Rendered {
        html: renderer.out,
        diagnostics: renderer.diagnostics,
    })
}

/// Renders a one-line fragment such as a title, without a `<p>` wrapper.
///
/// Only the first paragraph or heading is used. Engine errors are returned
/// rather than isolated.
pub fn render_inline(input: &str, options: &RenderOptions) -> Result<String, RenderError> {
    let root = parse_mdast(input, &options.parse)?;
    let definitions = collect_definitions(&root);
    let children = match root.children().and_then(|c| c.first()) {
        Some(Node::Paragraph(p)) => &p.children,
        Some(Node::Heading(h)) => &h.children,
        _ => return Ok(String::new()),
    };

    let mut nodes = Phrasing {
        raw_html: options.parse.raw_html,
        definitions: &definitions,
    }
    .convert(children);
    if let Some(config) = &options.typography {
        process_with_budget(&mut nodes, config, options.budget)?;
    }

    let mut out = String::new();
    write_inline(&nodes, &mut out);
    Ok(out)
}

struct Renderer<'a> {
    options: &'a RenderOptions,
    definitions: &'a Definitions,
    out: String,
    diagnostics: RenderDiagnostics,
    /// Processed blocks so far.
    blocks: usize,
    /// Tightness of each enclosing list, innermost last.
    lists: Vec<bool>,
}

impl<'a> Renderer<'a> {
    fn new(options: &'a RenderOptions, definitions: &'a Definitions) -> Self {
        Self {
            options,
            definitions,
            out: String::new(),
            diagnostics: RenderDiagnostics::default(),
            blocks: 0,
            lists: Vec::new(),
        }
    }

    fn in_tight_list(&self) -> bool {
        self.lists.last().copied().unwrap_or(false)
    }

    fn render_children(&mut self, children: &[Node]) {
        for child in children {
            self.render_node(child);
        }
    }

    fn render_node(&mut self, node: &Node) {
        match node {
            Node::Root(root) => self.render_children(&root.children),
            Node::Paragraph(para) => {
                let tight = self.in_tight_list();
                if !tight {
                    self.out.push_str("<p>");
                }
                self.render_phrasing(&para.children, para.position.as_ref());
                if !tight {
                    self.out.push_str("</p>");
                }
            }
            Node::Heading(heading) => {
                self.out.push_str(&format!("<h{}>", heading.depth));
                self.render_phrasing(&heading.children, heading.position.as_ref());
                self.out.push_str(&format!("</h{}>", heading.depth));
            }
            Node::Blockquote(quote) => {
                self.out.push_str("<blockquote>");
                self.lists.push(false);
                self.render_children(&quote.children);
                self.lists.pop();
                self.out.push_str("</blockquote>");
            }
            Node::List(list) => self.render_list(list),
            Node::ListItem(item) => {
                match item.checked {
                    Some(checked) => {
                        self.out.push_str("<li class=\"task-list-item\"><input type=\"checkbox\" disabled");
                        if checked {
                            self.out.push_str(" checked");
                        }
                        self.out.push_str(" /> ");
                    }
                    None => self.out.push_str("<li>"),
                }
                self.render_children(&item.children);
                self.out.push_str("</li>");
            }
            Node::Code(code) => {
                match code.lang.as_deref() {
                    Some(lang) => {
                        self.out.push_str("<pre><code class=\"language-");
                        push_attr(&mut self.out, lang);
                        self.out.push_str("\">");
                    }
                    None => self.out.push_str("<pre><code>"),
                }
                push_text(&mut self.out, &code.value);
                self.out.push_str("</code></pre>");
            }
            Node::Math(math) => {
                self.out.push_str("<pre><code class=\"language-math math-display\">");
                push_text(&mut self.out, &math.value);
                self.out.push_str("</code></pre>");
            }
            Node::Html(html) => {
                if self.options.parse.raw_html {
                    self.out.push_str(&html.value);
                } else {
                    log::debug!("Raw HTML in markdown will be escaped: {}", html.value);
                    push_text(&mut self.out, &html.value);
                }
            }
            Node::ThematicBreak(_) => self.out.push_str("<hr />"),
            Node::Table(table) => self.render_table(table),
            Node::Definition(_) | Node::Yaml(_) | Node::Toml(_) => {}
            _ => {
                log::warn!("Unhandled markdown node type: {:?}", node);
            }
        }
    }

    fn render_list(&mut self, list: &markdown::mdast::List) {
        if list.ordered {
            match list.start {
                Some(start) if start != 1 => self.out.push_str(&format!("<ol start=\"{}\">", start)),
                _ => self.out.push_str("<ol>"),
            }
        } else {
            self.out.push_str("<ul>");
        }

        self.lists.push(!list.spread);
        self.render_children(&list.children);
        self.lists.pop();

        self.out.push_str(if list.ordered { "</ol>" } else { "</ul>" });
    }

    fn render_table(&mut self, table: &markdown::mdast::Table) {
        self.out.push_str("<table><thead>");
        if let Some(Node::TableRow(row)) = table.children.first() {
            self.render_table_row(row, true, &table.align);
        }
        self.out.push_str("</thead>");

        if table.children.len() > 1 {
            self.out.push_str("<tbody>");
            for row in table.children.iter().skip(1) {
                if let Node::TableRow(row) = row {
                    self.render_table_row(row, false, &table.align);
                }
            }
            self.out.push_str("</tbody>");
        }
        self.out.push_str("</table>");
    }

    fn render_table_row(&mut self, row: &markdown::mdast::TableRow, header: bool, aligns: &[AlignKind]) {
        let tag = if header { "th" } else { "td" };
        self.out.push_str("<tr>");
        for (i, cell) in row.children.iter().enumerate() {
            let Node::TableCell(cell) = cell else {
                continue;
            };
            let align = match aligns.get(i) {
                Some(AlignKind::Left) => " align=\"left\"",
                Some(AlignKind::Right) => " align=\"right\"",
                Some(AlignKind::Center) => " align=\"center\"",
                _ => "",
            };
            self.out.push_str(&format!("<{}{}>", tag, align));
            self.render_phrasing(&cell.children, cell.position.as_ref());
            self.out.push_str(&format!("</{}>", tag));
        }
        self.out.push_str("</tr>");
    }

    /// Converts, processes and writes one block of phrasing content.
    fn render_phrasing(&mut self, children: &[Node], position: Option<&Position>) {
        let mut nodes = Phrasing {
            raw_html: self.options.parse.raw_html,
            definitions: self.definitions,
        }
        .convert(children);

        if let Some(config) = &self.options.typography {
            let block_index = self.blocks;
            self.blocks += 1;
            let original = nodes.clone();
            match process_with_budget(&mut nodes, config, self.options.budget) {
                Ok(applied) => {
                    log::debug!("typographer: block {} applied {} token(s)", block_index, applied);
                }
                Err(err) => {
                    log::warn!(
                        "typographer: block {} rendered without typography: {}",
                        block_index,
                        err
                    );
                    self.diagnostics.push(BlockFailure {
                        block_index,
                        location: position.map(|p| SourceLocation::new(p.start.line, p.start.column)),
                        message: err.to_string(),
                    });
                    nodes = original;
                }
            }
        }

        write_inline(&nodes, &mut self.out);
    }
}
