use quick_xml::Reader;
use quick_xml::events::Event;

use crate::core::SubmissionState;
use crate::submit::{LineResponse, RegisterState, SiiResponse, TransportError};

/// Parse the agency's SOAP response to a supply call.
///
/// The agency picks its own element prefixes, so matching is done on local
/// names. A SOAP fault surfaces as [`TransportError::Fault`]; a well-formed
/// response without `EstadoEnvio` parses into a verdict-less [`SiiResponse`].
pub fn parse_submission_response(xml: &str) -> Result<SiiResponse, TransportError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut response = SiiResponse::default();
    let mut current_line: Option<LineResponse> = None;
    let mut fault: Option<String> = None;
    let mut field = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let local = std::str::from_utf8(e.local_name().as_ref())
                    .unwrap_or("")
                    .to_string();
                if local == "RespuestaLinea" {
                    current_line = Some(LineResponse::default());
                }
                field = local;
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default().to_string();
                if text.is_empty() {
                    continue;
                }
                match (field.as_str(), current_line.as_mut()) {
                    ("EstadoEnvio", None) => {
                        response.state = SubmissionState::from_code(&text);
                    }
                    ("CSV", None) => response.csv = Some(text),
                    ("EstadoRegistro", Some(line)) => {
                        line.register_state = RegisterState::from_code(&text);
                    }
                    ("CodigoErrorRegistro", Some(line)) => {
                        line.error_code = text.parse().ok();
                    }
                    ("DescripcionErrorRegistro", Some(line)) => {
                        line.error_description = Some(text);
                    }
                    ("faultstring", _) => fault = Some(text),
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.local_name();
                let local = std::str::from_utf8(name.as_ref()).unwrap_or("");
                if local == "RespuestaLinea" {
                    if let Some(line) = current_line.take() {
                        response.lines.push(line);
                    }
                }
                field.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(TransportError::ParseError(format!("{e}"))),
            _ => {}
        }
    }

    if let Some(fault) = fault {
        return Err(TransportError::Fault(fault));
    }
    Ok(response)
}
