//! Splices resolved tokens back into a host's inline tree.
//!
//! The host hands over its phrasing content as a sequence of [`Inline`]
//! nodes whose text, concatenated in order (skipping [`Inline::Opaque`]),
//! is exactly the block text the tokens were resolved against. Text leaves
//! are split around each token and style wrappers are opened and closed as
//! tokens ask. A wrapper never crosses a structural node boundary: it either
//! encloses the whole node or is split around it, so the result is always
//! well nested.

use crate::error::{BudgetLimit, SpliceError};
use crate::token::{StyleClass, Token};

/// A node of a host's inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline<E> {
    /// Text-bearing leaf.
    Text(String),
    /// Structural node with children (emphasis, links, ...).
    Element {
        /// Host data for the node.
        data: E,
        /// Child nodes.
        children: Vec<Inline<E>>,
    },
    /// Structural node without processable text (inline code, images, raw markup).
    Opaque(E),
    /// Style wrapper.
    Styled {
        /// Wrapper class.
        class: StyleClass,
        /// Wrapped nodes.
        children: Vec<Inline<E>>,
    },
}

impl<E> Inline<E> {
    /// Text leaf.
    pub fn text(value: impl Into<String>) -> Self {
        Inline::Text(value.into())
    }

    /// Structural node.
    pub fn element(data: E, children: Vec<Inline<E>>) -> Self {
        Inline::Element { data, children }
    }

    /// Byte length of the text this node contributes to the block.
    pub fn text_len(&self) -> usize {
        match self {
            Inline::Text(value) => value.len(),
            Inline::Element { children, .. } | Inline::Styled { children, .. } => {
                children.iter().map(Inline::text_len).sum()
            }
            Inline::Opaque(_) => 0,
        }
    }
}

/// Concatenated text of `nodes`, the string the engine scans.
pub fn flatten<E>(nodes: &[Inline<E>]) -> String {
    fn walk<E>(nodes: &[Inline<E>], out: &mut String) {
        for node in nodes {
            match node {
                Inline::Text(value) => out.push_str(value),
                Inline::Element { children, .. } | Inline::Styled { children, .. } => {
                    walk(children, out)
                }
                Inline::Opaque(_) => {}
            }
        }
    }

    let mut out = String::new();
    walk(nodes, &mut out);
    out
}

/// Traversal limits for one splice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpliceBudget {
    /// Deepest allowed nesting of structural nodes.
    pub max_depth: usize,
    /// Most nodes visited before giving up.
    pub max_nodes: usize,
}

impl Default for SpliceBudget {
    fn default() -> Self {
        Self {
            max_depth: 32,
            max_nodes: 4096,
        }
    }
}

/// Splices `tokens` into `nodes` in place with the default budget.
///
/// On error the nodes are still well formed: everything after the point
/// where the budget ran out is left as it was, except the source bytes of a
/// token whose replacement was already emitted.
pub fn splice<E>(nodes: &mut Vec<Inline<E>>, tokens: &[Token]) -> Result<(), SpliceError> {
    splice_with_budget(nodes, tokens, SpliceBudget::default())
}

/// Splices `tokens` into `nodes` in place.
pub fn splice_with_budget<E>(
    nodes: &mut Vec<Inline<E>>,
    tokens: &[Token],
    budget: SpliceBudget,
) -> Result<(), SpliceError> {
    let mut splicer = Splicer {
        tokens,
        next: 0,
        offset: 0,
        skip: 0,
        open: Vec::new(),
        budget,
        visited: 0,
        halted: None,
    };
    let taken = std::mem::take(nodes);
    *nodes = splicer.children(taken, 0, 0);

    if splicer.next < tokens.len() && splicer.halted.is_none() {
        log::debug!(
            "typographer: {} token(s) fell outside the spliced text",
            tokens.len() - splicer.next
        );
    }

    match splicer.halted {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// A wrapper that is open at the current point of the walk.
#[derive(Debug, Clone, Copy)]
struct OpenWrap {
    /// Index of the opening token; identifies the wrapper.
    id: usize,
    class: StyleClass,
    /// Location of the closing token; `None` runs to the end of the block.
    end: Option<usize>,
}

impl OpenWrap {
    fn encloses(&self, end: usize) -> bool {
        self.end.is_none_or(|close| close >= end)
    }
}

struct Frame<E> {
    id: Option<usize>,
    class: Option<StyleClass>,
    items: Vec<Inline<E>>,
}

/// Output under construction for one child list.
///
/// `frames[0]` collects the list itself; `frames[1..]` mirror the open
/// wrappers `open[base..]` that have been materialised at this level.
struct Level<E> {
    base: usize,
    frames: Vec<Frame<E>>,
}

impl<E> Level<E> {
    fn new(base: usize) -> Self {
        Self {
            base,
            frames: vec![Frame {
                id: None,
                class: None,
                items: Vec::new(),
            }],
        }
    }

    /// Makes the local frames mirror `open[base..upto]`.
    fn sync(&mut self, open: &[OpenWrap], upto: usize) {
        let wanted = open.get(self.base..upto).unwrap_or_default();
        let mut shared = 0;
        while shared < wanted.len()
            && shared + 1 < self.frames.len()
            && self.frames[shared + 1].id == Some(wanted[shared].id)
        {
            shared += 1;
        }
        while self.frames.len() > shared + 1 {
            self.close_top();
        }
        for wrap in &wanted[shared..] {
            self.frames.push(Frame {
                id: Some(wrap.id),
                class: Some(wrap.class),
                items: Vec::new(),
            });
        }
    }

    fn close_top(&mut self) {
        if let Some(frame) = self.frames.pop()
            && let Some(class) = frame.class
            && !frame.items.is_empty()
        {
            self.push(Inline::Styled {
                class,
                children: frame.items,
            });
        }
    }

    /// Appends to the innermost frame, merging adjacent text.
    fn push(&mut self, node: Inline<E>) {
        let Some(frame) = self.frames.last_mut() else {
            return;
        };
        if let Inline::Text(value) = &node
            && let Some(Inline::Text(last)) = frame.items.last_mut()
        {
            last.push_str(value);
            return;
        }
        if matches!(&node, Inline::Text(value) if value.is_empty()) {
            return;
        }
        frame.items.push(node);
    }

    fn finish(mut self) -> Vec<Inline<E>> {
        while self.frames.len() > 1 {
            self.close_top();
        }
        self.frames.pop().map(|frame| frame.items).unwrap_or_default()
    }
}

struct Splicer<'t> {
    tokens: &'t [Token],
    /// Next token to apply.
    next: usize,
    /// Block offset of the next unvisited text.
    offset: usize,
    /// Source bytes of a token that straddles leaves, still to be consumed.
    skip: usize,
    open: Vec<OpenWrap>,
    budget: SpliceBudget,
    visited: usize,
    halted: Option<SpliceError>,
}

impl Splicer<'_> {
    fn children<E>(&mut self, nodes: Vec<Inline<E>>, base: usize, depth: usize) -> Vec<Inline<E>> {
        let mut level = Level::new(base);
        let mut nodes = nodes.into_iter();

        while let Some(node) = nodes.next() {
            if self.halted.is_none() {
                self.charge(depth);
            }
            if self.halted.is_some() {
                for mut rest in std::iter::once(node).chain(nodes.by_ref()) {
                    self.consume_skip(&mut rest);
                    level.push(rest);
                }
                break;
            }

            match node {
                Inline::Text(value) => self.text(&mut level, value),
                Inline::Opaque(data) => self.emit(&mut level, Inline::Opaque(data)),
                Inline::Element { data, children } => {
                    let children = self.nested(&mut level, children, depth);
                    level.push(Inline::Element { data, children });
                }
                Inline::Styled { class, children } => {
                    let children = self.nested(&mut level, children, depth);
                    level.push(Inline::Styled { class, children });
                }
            }
        }

        level.finish()
    }

    /// Descends into a structural node. Open wrappers that close after the
    /// node enclose it whole; the rest are split and reopened inside.
    fn nested<E>(
        &mut self,
        level: &mut Level<E>,
        children: Vec<Inline<E>>,
        depth: usize,
    ) -> Vec<Inline<E>> {
        let end = self.offset + children.iter().map(Inline::text_len).sum::<usize>();
        let enclosing = self
            .open
            .get(level.base..)
            .unwrap_or_default()
            .iter()
            .take_while(|wrap| wrap.encloses(end))
            .count();
        let child_base = level.base + enclosing;
        level.sync(&self.open, child_base);
        self.children(children, child_base, depth + 1)
    }

    /// Drops the leftover source bytes of a token that straddles leaves.
    fn consume_skip<E>(&mut self, node: &mut Inline<E>) {
        if self.skip == 0 {
            return;
        }
        match node {
            Inline::Text(value) => {
                let take = self.skip.min(value.len());
                value.drain(..take);
                self.skip -= take;
            }
            Inline::Element { children, .. } | Inline::Styled { children, .. } => {
                for child in children.iter_mut() {
                    self.consume_skip(child);
                    if self.skip == 0 {
                        break;
                    }
                }
            }
            Inline::Opaque(_) => {}
        }
    }

    fn charge(&mut self, depth: usize) {
        self.visited += 1;
        let limit = if depth > self.budget.max_depth {
            BudgetLimit::Depth(self.budget.max_depth)
        } else if self.visited > self.budget.max_nodes {
            BudgetLimit::Nodes(self.budget.max_nodes)
        } else {
            return;
        };
        let err = SpliceError::BudgetExceeded {
            limit,
            visited: self.visited,
        };
        log::warn!(
            "typographer: {}; leaving the rest of the block unprocessed",
            err
        );
        self.halted = Some(err);
    }

    fn emit<E>(&mut self, level: &mut Level<E>, node: Inline<E>) {
        level.sync(&self.open, self.open.len());
        level.push(node);
    }

    fn text<E>(&mut self, level: &mut Level<E>, value: String) {
        let start = self.offset;
        let len = value.len();
        self.offset += len;

        let mut cursor = self.skip.min(len);
        self.skip -= cursor;

        let tokens = self.tokens;
        while let Some(token) = tokens.get(self.next) {
            if token.location >= start + len {
                break;
            }
            let local = token.location.saturating_sub(start);
            if token.location < start + cursor || !value.is_char_boundary(local) {
                log::warn!(
                    "typographer: token at {} does not line up with the text; skipped",
                    token.location
                );
                self.next += 1;
                continue;
            }

            if local > cursor {
                self.emit(level, Inline::Text(value[cursor..local].to_string()));
            }
            let take = token.length.min(len - local);
            self.skip = token.length - take;
            cursor = local + take;

            self.apply(level, self.next);
            self.next += 1;
        }

        if cursor < len {
            self.emit(level, Inline::Text(value[cursor..].to_string()));
        }
    }

    fn apply<E>(&mut self, level: &mut Level<E>, index: usize) {
        let tokens = self.tokens;
        let token = &tokens[index];
        let replacement = Inline::Text(token.replacement.clone());
        let unit = match token.style.glyph {
            Some(class) => Inline::Styled {
                class,
                children: vec![replacement],
            },
            None => replacement,
        };

        if let Some(class) = token.style.span_start {
            let end = token
                .closer()
                .and_then(|closer| tokens.get(closer))
                .map(|closer| closer.location);
            self.open.push(OpenWrap {
                id: index,
                class,
                end,
            });
        }

        self.emit(level, unit);

        if token.style.span_end
            && let Some(opener) = token.opener()
            && let Some(at) = self.open.iter().rposition(|wrap| wrap.id == opener)
        {
            self.open.remove(at);
        }
    }
}
