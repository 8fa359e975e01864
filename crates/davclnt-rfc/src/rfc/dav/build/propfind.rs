//! PROPFIND request XML serialization.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::rfc::dav::core::{DAV_NS, PropfindRequest, PropfindType};

/// Serializes a PROPFIND request body.
///
/// ## Summary
/// Produces `<propfind xmlns="DAV:">` wrapping `<prop>` with one empty
/// element per requested name, `<allprop/>`, or `<propname/>`. Names are
/// written as given; the caller is responsible for them being valid XML
/// names.
///
/// ## Errors
/// Returns an error if XML writing fails.
pub fn serialize_propfind(request: &PropfindRequest) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut root = BytesStart::new("propfind");
    root.push_attribute(("xmlns", DAV_NS));
    writer.write_event(Event::Start(root))?;

    match &request.propfind_type {
        PropfindType::Prop(names) => {
            writer.write_event(Event::Start(BytesStart::new("prop")))?;
            for name in names {
                writer.write_event(Event::Empty(BytesStart::new(name.as_str())))?;
            }
            writer.write_event(Event::End(BytesEnd::new("prop")))?;
        }
        PropfindType::AllProp => {
            writer.write_event(Event::Empty(BytesStart::new("allprop")))?;
        }
        PropfindType::PropName => {
            writer.write_event(Event::Empty(BytesStart::new("propname")))?;
        }
    }

    writer.write_event(Event::End(BytesEnd::new("propfind")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| {
        tracing::error!("Generated invalid UTF-8 in PROPFIND XML: {}", e);
        quick_xml::Error::Io(std::sync::Arc::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Invalid UTF-8 in XML output",
        )))
    })
}
