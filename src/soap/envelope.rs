use crate::core::{InvoiceSide, SiiError, SiiVersion};
use crate::payload::{
    BatchHeader, CorrectionBlock, InvoiceDetail, InvoiceId, InvoiceRecord, IssuedDetail,
    PartyBlock, PeriodBlock, ReceivedDetail,
};

use super::xml_utils::{XmlResult, XmlWriter, format_date, format_decimal};
use super::{SOAP_ENV_NS, sii_ns};

/// Generate the SOAP envelope for one supply batch.
///
/// `side` selects the operation (`SuministroLRFacturasEmitidas` or
/// `SuministroLRFacturasRecibidas`); every record must carry the matching
/// register body.
pub fn build_submission_envelope(
    header: &BatchHeader,
    records: &[InvoiceRecord],
    side: InvoiceSide,
) -> XmlResult {
    let (operation, register) = match side {
        InvoiceSide::Issued => (
            "siiLR:SuministroLRFacturasEmitidas",
            "siiLR:RegistroLRFacturasEmitidas",
        ),
        InvoiceSide::Received => (
            "siiLR:SuministroLRFacturasRecibidas",
            "siiLR:RegistroLRFacturasRecibidas",
        ),
    };

    let mut w = XmlWriter::new()?;
    w.start_element_with_attrs(
        "soapenv:Envelope",
        &[
            ("xmlns:soapenv", SOAP_ENV_NS),
            ("xmlns:sii", sii_ns::SII),
            ("xmlns:siiLR", sii_ns::SII_LR),
        ],
    )?;
    w.empty_element("soapenv:Header")?;
    w.start_element("soapenv:Body")?;
    w.start_element(operation)?;

    write_header(&mut w, header)?;
    for record in records {
        write_record(&mut w, record, register, header.version, side)?;
    }

    w.end_element(operation)?;
    w.end_element("soapenv:Body")?;
    w.end_element("soapenv:Envelope")?;
    w.into_string()
}

fn write_header(w: &mut XmlWriter, header: &BatchHeader) -> Result<(), SiiError> {
    w.start_element("sii:Cabecera")?;
    w.text_element("sii:IDVersionSii", header.version.id())?;
    write_party(w, "sii:Titular", &header.titular)?;
    w.text_element("sii:TipoComunicacion", header.communication.code())?;
    w.end_element("sii:Cabecera")?;
    Ok(())
}

fn write_record(
    w: &mut XmlWriter,
    record: &InvoiceRecord,
    register: &str,
    version: SiiVersion,
    side: InvoiceSide,
) -> Result<(), SiiError> {
    w.start_element(register)?;
    write_period(w, &record.period, version)?;
    write_id(w, &record.id)?;
    match (&record.detail, side) {
        (InvoiceDetail::Issued(d), InvoiceSide::Issued) => write_issued(w, d)?,
        (InvoiceDetail::Received(d), InvoiceSide::Received) => write_received(w, d)?,
        _ => {
            return Err(SiiError::Xml(format!(
                "record '{}' carries the wrong register body for this batch",
                record.id.series_number
            )));
        }
    }
    w.end_element(register)?;
    Ok(())
}

fn write_period(
    w: &mut XmlWriter,
    period: &PeriodBlock,
    version: SiiVersion,
) -> Result<(), SiiError> {
    // v1.0 called this block PeriodoImpositivo; v1.1 renamed it.
    let name = match version {
        SiiVersion::V10 => "sii:PeriodoImpositivo",
        SiiVersion::V11 => "sii:PeriodoLiquidacion",
    };
    w.start_element(name)?;
    w.text_element("sii:Ejercicio", &period.year.to_string())?;
    w.text_element("sii:Periodo", &period.period)?;
    w.end_element(name)?;
    Ok(())
}

fn write_id(w: &mut XmlWriter, id: &InvoiceId) -> Result<(), SiiError> {
    w.start_element("siiLR:IDFactura")?;
    w.start_element("sii:IDEmisorFactura")?;
    w.text_element("sii:NIF", &id.issuer_nif)?;
    w.end_element("sii:IDEmisorFactura")?;
    w.text_element("sii:NumSerieFacturaEmisor", &id.series_number)?;
    w.text_element(
        "sii:FechaExpedicionFacturaEmisor",
        &format_date(id.issue_date),
    )?;
    w.end_element("siiLR:IDFactura")?;
    Ok(())
}

fn write_issued(w: &mut XmlWriter, d: &IssuedDetail) -> Result<(), SiiError> {
    w.start_element("siiLR:FacturaExpedida")?;
    w.text_element("sii:TipoFactura", d.invoice_type.code())?;
    if let Some(c) = &d.correction {
        write_correction(w, c)?;
    }
    w.text_element("sii:ClaveRegimenEspecialOTrascendencia", &d.registration_key)?;
    w.text_element("sii:ImporteTotal", &format_decimal(d.total))?;
    w.text_element("sii:DescripcionOperacion", &d.description)?;
    write_party(w, "sii:Contraparte", &d.counterparty)?;
    w.empty_element("sii:TipoDesglose")?;
    w.end_element("siiLR:FacturaExpedida")?;
    Ok(())
}

fn write_received(w: &mut XmlWriter, d: &ReceivedDetail) -> Result<(), SiiError> {
    w.start_element("siiLR:FacturaRecibida")?;
    w.text_element("sii:TipoFactura", d.invoice_type.code())?;
    if let Some(c) = &d.correction {
        write_correction(w, c)?;
    }
    w.text_element("sii:ClaveRegimenEspecialOTrascendencia", &d.registration_key)?;
    w.text_element("sii:ImporteTotal", &format_decimal(d.total))?;
    w.text_element("sii:DescripcionOperacion", &d.description)?;
    w.start_element("sii:DesgloseFactura")?;
    w.start_element("sii:DesgloseIVA")?;
    for detail in &d.tax_details {
        w.start_element("sii:DetalleIVA")?;
        w.text_element("sii:TipoImpositivo", &format_decimal(detail.tax_rate))?;
        w.text_element("sii:BaseImponible", &format_decimal(detail.taxable_base))?;
        w.text_element("sii:CuotaSoportada", &format_decimal(detail.tax_amount))?;
        w.end_element("sii:DetalleIVA")?;
    }
    w.end_element("sii:DesgloseIVA")?;
    w.end_element("sii:DesgloseFactura")?;
    write_party(w, "sii:Contraparte", &d.counterparty)?;
    w.text_element("sii:FechaRegContable", &format_date(d.accounting_date))?;
    w.text_element("sii:CuotaDeducible", &format_decimal(d.deductible_tax))?;
    w.end_element("siiLR:FacturaRecibida")?;
    Ok(())
}

fn write_correction(w: &mut XmlWriter, c: &CorrectionBlock) -> Result<(), SiiError> {
    w.text_element("sii:TipoRectificativa", c.mode.code())?;
    if let Some(amounts) = &c.amounts {
        w.start_element("sii:ImporteRectificacion")?;
        w.text_element("sii:BaseRectificada", &format_decimal(amounts.corrected_base))?;
        w.text_element("sii:CuotaRectificada", &format_decimal(amounts.corrected_tax))?;
        w.end_element("sii:ImporteRectificacion")?;
    }
    Ok(())
}

fn write_party(w: &mut XmlWriter, name: &str, party: &PartyBlock) -> Result<(), SiiError> {
    w.start_element(name)?;
    w.text_element("sii:NombreRazon", &party.name)?;
    w.text_element("sii:NIF", &party.nif)?;
    w.end_element(name)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CorrectionMode, Environment, SiiConfig};
    use crate::payload::{
        CommunicationType, CorrectionAmounts, IssuedBreakdown, SiiInvoiceType, VatDetail,
    };
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample_header() -> BatchHeader {
        BatchHeader {
            version: SiiVersion::V11,
            titular: PartyBlock {
                name: "Compañía de Prueba SA".into(),
                nif: "U2687761C".into(),
            },
            communication: CommunicationType::Registration,
        }
    }

    fn sample_issued_record() -> InvoiceRecord {
        InvoiceRecord {
            period: PeriodBlock {
                period: "06".into(),
                year: 2017,
            },
            id: InvoiceId {
                issuer_nif: "U2687761C".into(),
                series_number: "INV-2017-001".into(),
                issue_date: NaiveDate::from_ymd_opt(2017, 6, 6).unwrap(),
            },
            detail: InvoiceDetail::Issued(IssuedDetail {
                invoice_type: SiiInvoiceType::F1,
                registration_key: "01".into(),
                description: "/".into(),
                counterparty: PartyBlock {
                    name: "Cliente SL".into(),
                    nif: "F35999705".into(),
                },
                breakdown: IssuedBreakdown,
                total: dec!(212.70),
                correction: None,
            }),
        }
    }

    fn sample_received_record() -> InvoiceRecord {
        InvoiceRecord {
            period: PeriodBlock {
                period: "06".into(),
                year: 2017,
            },
            id: InvoiceId {
                issuer_nif: "F35999705".into(),
                series_number: "SUP-77".into(),
                issue_date: NaiveDate::from_ymd_opt(2017, 6, 2).unwrap(),
            },
            detail: InvoiceDetail::Received(ReceivedDetail {
                invoice_type: SiiInvoiceType::F1,
                registration_key: "01".into(),
                description: "Compra de material".into(),
                counterparty: PartyBlock {
                    name: "Proveedor SL".into(),
                    nif: "F35999705".into(),
                },
                tax_details: vec![VatDetail {
                    taxable_base: dec!(100.00),
                    tax_rate: dec!(21),
                    tax_amount: dec!(21.00),
                }],
                deductible_tax: dec!(21.00),
                accounting_date: NaiveDate::from_ymd_opt(2017, 6, 10).unwrap(),
                total: dec!(121.00),
                correction: None,
            }),
        }
    }

    #[test]
    fn issued_envelope_structure() {
        let xml = build_submission_envelope(
            &sample_header(),
            &[sample_issued_record()],
            InvoiceSide::Issued,
        )
        .unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<siiLR:SuministroLRFacturasEmitidas>"));
        assert!(xml.contains("<sii:IDVersionSii>1.1</sii:IDVersionSii>"));
        assert!(xml.contains("<sii:NombreRazon>Compañía de Prueba SA</sii:NombreRazon>"));
        assert!(xml.contains("<sii:TipoComunicacion>A0</sii:TipoComunicacion>"));
        assert!(xml.contains("<siiLR:RegistroLRFacturasEmitidas>"));
        assert!(xml.contains("<sii:Ejercicio>2017</sii:Ejercicio>"));
        assert!(xml.contains("<sii:Periodo>06</sii:Periodo>"));
        assert!(xml.contains("<sii:NumSerieFacturaEmisor>INV-2017-001</sii:NumSerieFacturaEmisor>"));
        assert!(
            xml.contains("<sii:FechaExpedicionFacturaEmisor>06-06-2017</sii:FechaExpedicionFacturaEmisor>")
        );
        assert!(xml.contains("<sii:TipoFactura>F1</sii:TipoFactura>"));
        assert!(xml.contains("<sii:ImporteTotal>212.70</sii:ImporteTotal>"));
        assert!(xml.contains("<sii:TipoDesglose/>"));
    }

    #[test]
    fn v10_uses_the_old_period_name() {
        let header = BatchHeader {
            version: SiiVersion::V10,
            ..sample_header()
        };
        let xml =
            build_submission_envelope(&header, &[sample_issued_record()], InvoiceSide::Issued)
                .unwrap();
        assert!(xml.contains("<sii:IDVersionSii>1.0</sii:IDVersionSii>"));
        assert!(xml.contains("<sii:PeriodoImpositivo>"));
        assert!(!xml.contains("PeriodoLiquidacion"));
    }

    #[test]
    fn received_envelope_carries_the_vat_detail() {
        let xml = build_submission_envelope(
            &sample_header(),
            &[sample_received_record()],
            InvoiceSide::Received,
        )
        .unwrap();
        assert!(xml.contains("<siiLR:SuministroLRFacturasRecibidas>"));
        assert!(xml.contains("<siiLR:FacturaRecibida>"));
        assert!(xml.contains("<sii:TipoImpositivo>21.00</sii:TipoImpositivo>"));
        assert!(xml.contains("<sii:BaseImponible>100.00</sii:BaseImponible>"));
        assert!(xml.contains("<sii:CuotaSoportada>21.00</sii:CuotaSoportada>"));
        assert!(xml.contains("<sii:CuotaDeducible>21.00</sii:CuotaDeducible>"));
        assert!(xml.contains("<sii:FechaRegContable>10-06-2017</sii:FechaRegContable>"));
    }

    #[test]
    fn correction_sits_between_type_and_regime_key() {
        let mut record = sample_issued_record();
        if let InvoiceDetail::Issued(d) = &mut record.detail {
            d.invoice_type = SiiInvoiceType::R4;
            d.correction = Some(CorrectionBlock {
                mode: CorrectionMode::Substitution,
                amounts: Some(CorrectionAmounts {
                    corrected_base: dec!(200.00),
                    corrected_tax: dec!(42.00),
                }),
            });
        }
        let xml = build_submission_envelope(&sample_header(), &[record], InvoiceSide::Issued)
            .unwrap();
        let tipo = xml.find("<sii:TipoFactura>R4").unwrap();
        let rect = xml.find("<sii:TipoRectificativa>S").unwrap();
        let clave = xml.find("<sii:ClaveRegimenEspecialOTrascendencia>").unwrap();
        assert!(tipo < rect && rect < clave);
        assert!(xml.contains("<sii:BaseRectificada>200.00</sii:BaseRectificada>"));
        assert!(xml.contains("<sii:CuotaRectificada>42.00</sii:CuotaRectificada>"));
    }

    #[test]
    fn differences_correction_omits_the_amounts_block() {
        let mut record = sample_issued_record();
        if let InvoiceDetail::Issued(d) = &mut record.detail {
            d.invoice_type = SiiInvoiceType::R4;
            d.correction = Some(CorrectionBlock {
                mode: CorrectionMode::Differences,
                amounts: None,
            });
        }
        let xml = build_submission_envelope(&sample_header(), &[record], InvoiceSide::Issued)
            .unwrap();
        assert!(xml.contains("<sii:TipoRectificativa>I</sii:TipoRectificativa>"));
        assert!(!xml.contains("ImporteRectificacion"));
    }

    #[test]
    fn two_records_share_one_header() {
        let mut second = sample_issued_record();
        second.id.series_number = "INV-2017-002".into();
        let xml = build_submission_envelope(
            &sample_header(),
            &[sample_issued_record(), second],
            InvoiceSide::Issued,
        )
        .unwrap();
        assert_eq!(xml.matches("<sii:Cabecera>").count(), 1);
        assert_eq!(xml.matches("<siiLR:RegistroLRFacturasEmitidas>").count(), 2);
    }

    #[test]
    fn wrong_book_is_an_error() {
        let err = build_submission_envelope(
            &sample_header(),
            &[sample_received_record()],
            InvoiceSide::Issued,
        )
        .unwrap_err();
        assert!(err.to_string().contains("wrong register body"));
    }

    #[test]
    fn envelope_matches_the_configured_environment_catalog() {
        // The endpoint catalog and the envelope agree on which operation
        // a side maps to.
        let config = SiiConfig::new("Compañía de Prueba SA", "ESU2687761C");
        let ep = super::super::endpoint_for(
            InvoiceSide::Issued,
            Environment::Testing,
            config.version,
        );
        let xml = build_submission_envelope(
            &sample_header(),
            &[sample_issued_record()],
            InvoiceSide::Issued,
        )
        .unwrap();
        assert!(xml.contains(&format!("<siiLR:{}>", ep.operation)));
    }
}
