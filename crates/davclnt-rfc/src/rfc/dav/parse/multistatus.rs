//! Multistatus response XML parsing.

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;

use super::error::{ParseError, ParseResult};
use crate::rfc::dav::core::{Multistatus, ResourceEntry};

/// Parses a multistatus response body.
///
/// ## Summary
/// Walks the document once and collects every `response` directly under
/// the `multistatus` root. Each child element of a response's
/// `propstat/prop` becomes one property, keyed by its local name with the
/// namespace discarded; its value is the element's own character data,
/// kept verbatim. A property holding only child elements and the
/// whitespace between them has an empty value.
/// When a response carries several `propstat` blocks their properties are
/// merged.
///
/// ## Errors
/// Fails as a whole, never returning partial entries, when:
/// - the body is not well-formed XML or the root is not `multistatus`,
/// - the document has no `response` element,
/// - any response lacks `propstat`, `prop`, or at least one property.
#[tracing::instrument(skip(xml), fields(xml_len = xml.len()))]
pub fn parse_multistatus(xml: &[u8]) -> ParseResult<Multistatus> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut state = DecodeState::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let local_name = std::str::from_utf8(e.local_name().as_ref())?.to_owned();
                state.open(local_name)?;
            }
            Ok(Event::Empty(ref e)) => {
                let local_name = std::str::from_utf8(e.local_name().as_ref())?.to_owned();
                state.open(local_name)?;
                state.close()?;
            }
            Ok(Event::End(_)) => {
                state.close()?;
            }
            Ok(Event::Text(ref e)) => {
                let decoded = reader.decoder().decode(e.as_ref())?;
                state.text(&decoded);
            }
            Ok(Event::CData(ref e)) => {
                let text = std::str::from_utf8(e.as_ref())?;
                state.text(text);
            }
            Ok(Event::GeneralRef(ref e)) => {
                let name = reader.decoder().decode(e.as_ref())?;
                state.text(&resolve_reference(&name)?);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    let multistatus = state.finish()?;
    tracing::debug!(responses = multistatus.len(), "Parsed multistatus");
    Ok(multistatus)
}

/// Resolves the name inside `&...;`.
fn resolve_reference(name: &str) -> ParseResult<String> {
    if let Some(digits) = name.strip_prefix('#') {
        let code = if let Some(hex) = digits.strip_prefix(['x', 'X']) {
            u32::from_str_radix(hex, 16)
        } else {
            digits.parse::<u32>()
        }
        .map_err(|err| {
            tracing::warn!(error = ?err, value = %name, "Invalid numeric character reference");
            ParseError::invalid_value("invalid numeric character reference")
        })?;

        return char::from_u32(code)
            .map(String::from)
            .ok_or_else(|| ParseError::invalid_value("invalid XML numeric character reference"));
    }

    resolve_predefined_entity(name)
        .map(str::to_owned)
        .ok_or_else(|| ParseError::invalid_value(format!("unknown entity: &{name};")))
}

/// Where an open element sits in the multistatus tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Root,
    Response,
    Href,
    Propstat,
    Prop,
    Property,
    Other,
}

#[derive(Debug, Default)]
struct PendingResponse {
    href: String,
    has_propstat: bool,
    has_prop: bool,
    properties: Vec<(String, String)>,
}

/// A property element being read. `nested` is set once a child element
/// opens inside it.
#[derive(Debug)]
struct PendingProperty {
    name: String,
    value: String,
    nested: bool,
}

impl PendingProperty {
    /// Character data is kept verbatim. Only whitespace that merely
    /// separates nested child elements is dropped.
    fn into_pair(self) -> (String, String) {
        let value = if self.nested && self.value.trim().is_empty() {
            String::new()
        } else {
            self.value
        };
        (self.name, value)
    }
}

#[derive(Debug, Default)]
struct DecodeState {
    stack: Vec<Context>,
    seen_root: bool,
    response: Option<PendingResponse>,
    property: Option<PendingProperty>,
    responses: Vec<ResourceEntry>,
}

impl DecodeState {
    fn open(&mut self, local_name: String) -> ParseResult<()> {
        let parent = self.stack.last().copied();
        let context = match parent {
            None if self.seen_root => return Err(ParseError::unexpected_element(&local_name)),
            None if local_name == "multistatus" => {
                self.seen_root = true;
                Context::Root
            }
            None => return Err(ParseError::unexpected_element(&local_name)),
            Some(Context::Root) if local_name == "response" => {
                self.response = Some(PendingResponse::default());
                Context::Response
            }
            Some(Context::Response) => match local_name.as_str() {
                "href" => Context::Href,
                "propstat" => {
                    self.pending()?.has_propstat = true;
                    Context::Propstat
                }
                _ => Context::Other,
            },
            Some(Context::Propstat) if local_name == "prop" => {
                self.pending()?.has_prop = true;
                Context::Prop
            }
            Some(Context::Prop) => {
                self.property = Some(PendingProperty {
                    name: local_name,
                    value: String::new(),
                    nested: false,
                });
                Context::Property
            }
            Some(Context::Property) => {
                if let Some(property) = self.property.as_mut() {
                    property.nested = true;
                }
                Context::Other
            }
            Some(_) => Context::Other,
        };

        self.stack.push(context);
        Ok(())
    }

    fn close(&mut self) -> ParseResult<()> {
        match self.stack.pop() {
            Some(Context::Property) => {
                if let Some(property) = self.property.take() {
                    self.pending()?.properties.push(property.into_pair());
                }
            }
            Some(Context::Response) => {
                let pending = self.response.take().unwrap_or_default();
                self.responses.push(finish_response(pending)?);
            }
            Some(_) => {}
            None => return Err(ParseError::xml("unbalanced end tag")),
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        match self.stack.last() {
            Some(Context::Href) => {
                if let Some(response) = self.response.as_mut() {
                    response.href.push_str(text);
                }
            }
            Some(Context::Property) => {
                if let Some(property) = self.property.as_mut() {
                    property.value.push_str(text);
                }
            }
            _ => {}
        }
    }

    fn pending(&mut self) -> ParseResult<&mut PendingResponse> {
        self.response
            .as_mut()
            .ok_or_else(|| ParseError::xml("element outside of response"))
    }

    fn finish(self) -> ParseResult<Multistatus> {
        if !self.seen_root {
            return Err(ParseError::missing_element("multistatus"));
        }
        if !self.stack.is_empty() {
            return Err(ParseError::xml("unexpected end of document"));
        }
        if self.responses.is_empty() {
            return Err(ParseError::missing_element("response"));
        }

        Ok(Multistatus {
            responses: self.responses,
        })
    }
}

fn finish_response(pending: PendingResponse) -> ParseResult<ResourceEntry> {
    if !pending.has_propstat {
        return Err(ParseError::missing_element("propstat"));
    }
    if !pending.has_prop {
        return Err(ParseError::missing_element("prop"));
    }
    if pending.properties.is_empty() {
        return Err(ParseError::missing_element("property in prop"));
    }

    Ok(ResourceEntry::new(pending.href, pending.properties))
}
