use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use suministro::core::*;
use suministro::submit::{
    LineResponse, RegisterState, SiiDispatcher, SiiResponse, SiiTransport, SubmissionRequest,
    TransportError,
};

/// Answers every batch with an acceptance, without touching the network.
/// Swap in `suministro::soap::HttpTransport` to talk to the real endpoints.
struct DemoTransport;

#[async_trait]
impl SiiTransport for DemoTransport {
    async fn send(&self, request: &SubmissionRequest) -> Result<SiiResponse, TransportError> {
        println!(
            "  -> {} registro(s) for {} ({:?}, {:?})",
            request.records.len(),
            request.header.titular.name,
            request.side,
            request.environment,
        );
        Ok(SiiResponse {
            state: Some(SubmissionState::Accepted),
            csv: Some("DEMO-CSV-0001".into()),
            lines: vec![LineResponse {
                register_state: Some(RegisterState::Accepted),
                error_code: None,
                error_description: None,
            }],
        })
    }
}

fn invoice(day: u32, concept: &str, amount: rust_decimal::Decimal) -> Invoice {
    InvoiceBuilder::unnumbered(NaiveDate::from_ymd_opt(2017, 6, day).unwrap())
        .company(Party::new("Compañía de Prueba SA").with_tax_id("ESU2687761C"))
        .counterparty(Party::new("Cliente SL").with_tax_id("ESF35999705"))
        .period(FiscalPeriod::new("06/2017").unwrap())
        .add_line(InvoiceLine::new(concept, dec!(1), amount, dec!(21)))
        .build()
        .expect("invoice should be valid")
}

#[tokio::main]
async fn main() {
    let config = SiiConfig::new("Compañía de Prueba SA", "ESU2687761C");
    let mut dispatcher =
        SiiDispatcher::new(config, DemoTransport).with_series(InvoiceSeries::new("FV"));

    let mut invoices = vec![
        invoice(6, "Consultoría", dec!(1500)),
        invoice(12, "Mantenimiento", dec!(350)),
        invoice(20, "Formación", dec!(800)),
    ];

    // Posting validates, assigns numbers from the series and moves
    // each invoice to the open state.
    println!("=== Posting ===");
    for inv in &mut invoices {
        let action = dispatcher.post_invoice(inv).expect("posting should succeed");
        println!("  {} posted ({action:?})", inv.number);
    }

    println!("\n=== Reporting ===");
    dispatcher.send_batch(&mut invoices).await;

    println!("\n=== Results ===");
    for inv in &invoices {
        let last = inv.sii.results.last().expect("one result per attempt");
        println!(
            "  {}: sent={} csv={} state={:?}",
            inv.number,
            inv.sii.sent,
            inv.sii.csv.as_deref().unwrap_or("-"),
            last.state,
        );
    }
}
