use chrono::NaiveDate;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::Decimal;
use std::io::Cursor;

use crate::core::SiiError;

pub type XmlResult = Result<String, SiiError>;

fn xml_io(e: std::io::Error) -> SiiError {
    SiiError::Xml(format!("XML write error: {e}"))
}

pub struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    pub fn new() -> Result<Self, SiiError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(quick_xml::events::BytesDecl::new(
                "1.0",
                Some("UTF-8"),
                None,
            )))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub fn into_string(self) -> Result<String, SiiError> {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| SiiError::Xml(format!("XML UTF-8 error: {e}")))
    }

    pub fn start_element(&mut self, name: &str) -> Result<&mut Self, SiiError> {
        let elem = BytesStart::new(name);
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn start_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, SiiError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn end_element(&mut self, name: &str) -> Result<&mut Self, SiiError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn text_element(&mut self, name: &str, text: &str) -> Result<&mut Self, SiiError> {
        self.start_element(name)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    /// Write a self-closing element with no content.
    pub fn empty_element(&mut self, name: &str) -> Result<&mut Self, SiiError> {
        self.writer
            .write_event(Event::Empty(BytesStart::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }
}

/// Format a Decimal for the supply schema: at least 2 decimal places,
/// trailing zeros beyond that stripped.
pub fn format_decimal(d: Decimal) -> String {
    let s = d.normalize().to_string();
    if let Some(dot_pos) = s.find('.') {
        let decimals = s.len() - dot_pos - 1;
        if decimals < 2 {
            format!("{s}{}", "0".repeat(2 - decimals))
        } else {
            s
        }
    } else {
        format!("{s}.00")
    }
}

/// Format a date the way the supply schema expects it: `dd-mm-yyyy`.
pub fn format_date(d: NaiveDate) -> String {
    d.format("%d-%m-%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn format_decimal_cases() {
        assert_eq!(format_decimal(dec!(100)), "100.00");
        assert_eq!(format_decimal(dec!(212.7)), "212.70");
        assert_eq!(format_decimal(dec!(21)), "21.00");
        assert_eq!(format_decimal(dec!(31.50)), "31.50");
        assert_eq!(format_decimal(dec!(0.005)), "0.005");
        assert_eq!(format_decimal(dec!(4)), "4.00");
    }

    #[test]
    fn format_date_is_day_first() {
        let d = NaiveDate::from_ymd_opt(2017, 6, 6).unwrap();
        assert_eq!(format_date(d), "06-06-2017");
    }

    #[test]
    fn empty_element_self_closes() {
        let mut w = XmlWriter::new().unwrap();
        w.start_element("sii:Wrapper").unwrap();
        w.empty_element("sii:TipoDesglose").unwrap();
        w.end_element("sii:Wrapper").unwrap();
        let xml = w.into_string().unwrap();
        assert!(xml.contains("<sii:TipoDesglose/>"));
    }
}
