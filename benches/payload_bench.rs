use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use suministro::core::*;
use suministro::payload::{CommunicationType, build_batch_header, build_invoice_record};
use suministro::soap::{build_submission_envelope, parse_submission_response};

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 6, 15).unwrap()
}

fn config() -> SiiConfig {
    SiiConfig::new("Compañía de Prueba SA", "ESU2687761C")
}

fn build_6_line_invoice() -> Invoice {
    let mut builder = InvoiceBuilder::new("BENCH-001", test_date())
        .company(Party::new("Compañía de Prueba SA").with_tax_id("ESU2687761C"))
        .counterparty(Party::new("Cliente SL").with_tax_id("ESF35999705"))
        .period(FiscalPeriod::new("06/2017").unwrap());

    for i in 1..=6 {
        builder = builder.add_line(InvoiceLine::new(
            format!("Concepto {i}"),
            dec!(2),
            dec!(120.50),
            dec!(21),
        ));
    }

    builder.build().unwrap()
}

fn build_100_invoices() -> Vec<Invoice> {
    (1..=100)
        .map(|n| {
            InvoiceBuilder::new(format!("FV2017/{n:04}"), test_date())
                .company(Party::new("Compañía de Prueba SA").with_tax_id("ESU2687761C"))
                .counterparty(Party::new("Cliente SL").with_tax_id("ESF35999705"))
                .period(FiscalPeriod::new("06/2017").unwrap())
                .add_line(InvoiceLine::new("Consultoría", dec!(8), dec!(150), dec!(21)))
                .add_line(InvoiceLine::new("Desplazamiento", dec!(1), dec!(250), dec!(10)))
                .build()
                .unwrap()
        })
        .collect()
}

const RESPONSE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
  <env:Body>
    <siiR:RespuestaLRFacturasEmitidas xmlns:siiR="https://www2.agenciatributaria.gob.es/static_files/common/internet/dep/aplicaciones/es/aeat/ssii/fact/ws/RespuestaSuministro.xsd">
      <siiR:CSV>MCSVSII20170615</siiR:CSV>
      <siiR:EstadoEnvio>Correcto</siiR:EstadoEnvio>
      <siiR:RespuestaLinea>
        <siiR:EstadoRegistro>Correcto</siiR:EstadoRegistro>
      </siiR:RespuestaLinea>
    </siiR:RespuestaLRFacturasEmitidas>
  </env:Body>
</env:Envelope>"#;

// ── Benchmarks ─────────────────────────────────────────────────────

fn bench_build_invoice(c: &mut Criterion) {
    c.bench_function("build_invoice_6_lines", |b| {
        b.iter(|| black_box(build_6_line_invoice()));
    });
}

fn bench_build_record(c: &mut Criterion) {
    let invoice = build_6_line_invoice();
    let cfg = config();
    c.bench_function("build_record", |b| {
        b.iter(|| black_box(build_invoice_record(black_box(&invoice), black_box(&cfg))));
    });
}

fn bench_envelope_serialize(c: &mut Criterion) {
    let cfg = config();
    let header = build_batch_header(&cfg, CommunicationType::Registration).unwrap();
    let record = build_invoice_record(&build_6_line_invoice(), &cfg).unwrap();
    let records = vec![record];

    c.bench_function("envelope_1_record", |b| {
        b.iter(|| {
            black_box(build_submission_envelope(
                black_box(&header),
                black_box(&records),
                InvoiceSide::Issued,
            ))
        });
    });
}

fn bench_envelope_serialize_100_records(c: &mut Criterion) {
    let cfg = config();
    let header = build_batch_header(&cfg, CommunicationType::Registration).unwrap();
    let records: Vec<_> = build_100_invoices()
        .iter()
        .map(|inv| build_invoice_record(inv, &cfg).unwrap())
        .collect();

    c.bench_function("envelope_100_records", |b| {
        b.iter(|| {
            black_box(build_submission_envelope(
                black_box(&header),
                black_box(&records),
                InvoiceSide::Issued,
            ))
        });
    });
}

fn bench_response_parse(c: &mut Criterion) {
    c.bench_function("response_parse", |b| {
        b.iter(|| black_box(parse_submission_response(black_box(RESPONSE_XML))));
    });
}

fn bench_nif_validation(c: &mut Criterion) {
    let nifs = ["ESU2687761C", "12345678Z", "X1234567L", "A58818501", "ESB123"];
    c.bench_function("validate_nif_batch", |b| {
        b.iter(|| {
            for nif in &nifs {
                black_box(is_valid_nif(black_box(nif)));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_build_invoice,
    bench_build_record,
    bench_envelope_serialize,
    bench_envelope_serialize_100_records,
    bench_response_parse,
    bench_nif_validation,
);
criterion_main!(benches);
