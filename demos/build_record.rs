use chrono::NaiveDate;
use rust_decimal_macros::dec;
use suministro::core::*;
use suministro::payload::{CommunicationType, build_batch_header, build_invoice_record};

fn main() {
    // A standard domestic sale, two lines at different VAT rates
    let invoice = InvoiceBuilder::new("FV2017/0042", NaiveDate::from_ymd_opt(2017, 6, 6).unwrap())
        .company(Party::new("Compañía de Prueba SA").with_tax_id("ESU2687761C"))
        .counterparty(Party::new("Cliente SL").with_tax_id("ESF35999705"))
        .period(FiscalPeriod::new("06/2017").unwrap())
        .add_line(InvoiceLine::new("Consultoría", dec!(10), dec!(150), dec!(21)))
        .add_line(InvoiceLine::new("Libros técnicos", dec!(3), dec!(25), dec!(4)))
        .description("Prestación de servicios")
        .build()
        .expect("invoice should be valid");

    let totals = invoice.totals.as_ref().unwrap();
    println!("Invoice: {}", invoice.number);
    println!("Date:    {}", invoice.issue_date);
    println!("Period:  {}", invoice.period);
    println!("---");
    for entry in &totals.tax_summary {
        println!(
            "  {:>5}% on {:>9} => {:>8}",
            entry.rate, entry.taxable_base, entry.tax_amount
        );
    }
    println!("---");
    println!("Untaxed: {}", totals.untaxed_total);
    println!("Tax:     {}", totals.tax_total);
    println!("Gross:   {}", totals.gross_total);

    // The registro and cabecera the agency will receive
    let config = SiiConfig::new("Compañía de Prueba SA", "ESU2687761C");
    let header = build_batch_header(&config, CommunicationType::Registration)
        .expect("header should build");
    let record = build_invoice_record(&invoice, &config).expect("record should build");

    println!("\n=== Cabecera ===");
    println!("{}", serde_json::to_string_pretty(&header).unwrap());
    println!("\n=== Registro ===");
    println!("{}", serde_json::to_string_pretty(&record).unwrap());
}
