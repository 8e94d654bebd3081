use chrono::NaiveDate;
use rust_decimal_macros::dec;
use suministro::core::*;
use suministro::payload::{CommunicationType, build_batch_header, build_invoice_record};
use suministro::soap::{build_submission_envelope, endpoint_for};

fn main() {
    let config = SiiConfig::new("Compañía de Prueba SA", "ESU2687761C");

    let invoice = InvoiceBuilder::new("FV2017/0042", NaiveDate::from_ymd_opt(2017, 6, 6).unwrap())
        .company(Party::new("Compañía de Prueba SA").with_tax_id("ESU2687761C"))
        .counterparty(Party::new("Cliente SL").with_tax_id("ESF35999705"))
        .period(FiscalPeriod::new("06/2017").unwrap())
        .add_line(InvoiceLine::new("Consultoría", dec!(10), dec!(150), dec!(21)))
        .build()
        .expect("invoice should be valid");

    let header = build_batch_header(&config, CommunicationType::Registration)
        .expect("header should build");
    let record = build_invoice_record(&invoice, &config).expect("record should build");

    let xml = build_submission_envelope(&header, &[record], InvoiceSide::Issued)
        .expect("envelope should serialize");

    println!("=== SuministroLRFacturasEmitidas ===");
    println!("{xml}");

    // Where each combination of book and environment posts to
    println!("\n=== Endpoints ===");
    for side in [InvoiceSide::Issued, InvoiceSide::Received] {
        for env in [Environment::Production, Environment::Testing] {
            let endpoint = endpoint_for(side, env, SiiVersion::V11);
            println!("  {side:?}/{env:?}:");
            println!("    url:  {}", endpoint.url);
            println!("    port: {}", endpoint.port);
        }
    }
}
