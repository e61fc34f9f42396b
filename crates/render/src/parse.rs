//! markdown-rs adapter.

use crate::error::{RenderError, SourceLocation};
use crate::options::ParseOptions;
use markdown::mdast::Node;
use markdown::message::{Message, Place};

/// Parse markdown into an MDAST tree.
pub fn parse_mdast(input: &str, options: &ParseOptions) -> Result<Node, RenderError> {
    markdown::to_mdast(input, &options.to_markdown()).map_err(|err| RenderError::Parse {
        message: err.to_string(),
        location: message_location(&err),
    })
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::new(1, 1),
    }
}
