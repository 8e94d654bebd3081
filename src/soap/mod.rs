//! SOAP transport for the AEAT supply services.
//!
//! Builds `SuministroLRFacturas*` envelopes from [`crate::payload`] records,
//! posts them over HTTPS, and parses the agency's verdict into the response
//! types of [`crate::submit`].
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use suministro::core::*;
//! use suministro::payload::{self, CommunicationType};
//! use suministro::soap;
//!
//! let invoice = InvoiceBuilder::new("FV2017/0001", NaiveDate::from_ymd_opt(2017, 6, 6).unwrap())
//!     .company(Party::new("Empresa SL").with_tax_id("ESU2687761C"))
//!     .counterparty(Party::new("Cliente SL").with_tax_id("ESF35999705"))
//!     .period(FiscalPeriod::new("06/2017").unwrap())
//!     .add_line(InvoiceLine::new("Servicios", dec!(1), dec!(100.00), dec!(21)))
//!     .build()
//!     .unwrap();
//!
//! let config = SiiConfig::new("Empresa SL", "ESU2687761C");
//! let record = payload::build_invoice_record(&invoice, &config).unwrap();
//! let header = payload::build_batch_header(&config, CommunicationType::Registration).unwrap();
//! let xml = soap::build_submission_envelope(&header, &[record], InvoiceSide::Issued).unwrap();
//! ```

mod envelope;
mod http;
mod response;
pub(crate) mod xml_utils;

pub use envelope::build_submission_envelope;
pub use http::HttpTransport;
pub use response::parse_submission_response;

use crate::core::{Environment, InvoiceSide, SiiVersion};

/// SOAP 1.1 envelope namespace.
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// SII schema namespace URIs.
pub mod sii_ns {
    /// `SuministroInformacion.xsd` — the shared element vocabulary.
    pub const SII: &str = "https://www2.agenciatributaria.gob.es/static_files/common/internet/dep/aplicaciones/es/aeat/ssii/fact/ws/SuministroInformacion.xsd";
    /// `SuministroLR.xsd` — the register-book operations.
    pub const SII_LR: &str = "https://www2.agenciatributaria.gob.es/static_files/common/internet/dep/aplicaciones/es/aeat/ssii/fact/ws/SuministroLR.xsd";
}

const WSDL_BASE: &str = "https://www.agenciatributaria.es/static_files/AEAT/Contenidos_Comunes/La_Agencia_Tributaria/Modelos_y_formularios/Suministro_inmediato_informacion/FicherosSuministros";

/// Where and how to reach one of the agency's supply services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiiEndpoint {
    /// WSDL document describing the service.
    pub wsdl: String,
    /// Port within the WSDL. Test ports carry a `Pruebas` suffix.
    pub port: String,
    /// SOAP operation the envelope body invokes.
    pub operation: &'static str,
    /// Address the port binds to.
    pub url: String,
}

/// Resolve the service endpoint for a register book, environment, and
/// schema version.
///
/// The agency publishes one WSDL per book and version; each WSDL declares
/// a production port on `www1.agenciatributaria.gob.es` and a test port on
/// `prewww1.aeat.es`.
pub fn endpoint_for(
    side: InvoiceSide,
    environment: Environment,
    version: SiiVersion,
) -> SiiEndpoint {
    let version_dir = match version {
        SiiVersion::V10 => "V_1_0",
        SiiVersion::V11 => "V_1_1",
    };
    let (document, port_base, operation, path) = match side {
        InvoiceSide::Issued => (
            "SuministroFactEmitidas.wsdl",
            "SuministroFactEmitidas",
            "SuministroLRFacturasEmitidas",
            "fe/SiiFactFEV1SOAP",
        ),
        InvoiceSide::Received => (
            "SuministroFactRecibidas.wsdl",
            "SuministroFactRecibidas",
            "SuministroLRFacturasRecibidas",
            "fr/SiiFactFRV1SOAP",
        ),
    };
    let (host, port_suffix) = match environment {
        Environment::Production => ("https://www1.agenciatributaria.gob.es", ""),
        Environment::Testing => ("https://prewww1.aeat.es", "Pruebas"),
    };
    SiiEndpoint {
        wsdl: format!("{WSDL_BASE}/{version_dir}/{document}"),
        port: format!("{port_base}{port_suffix}"),
        operation,
        url: format!("{host}/wlpl/SSII-FACT/ws/{path}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_production_endpoint() {
        let ep = endpoint_for(
            InvoiceSide::Issued,
            Environment::Production,
            SiiVersion::V11,
        );
        assert!(ep.wsdl.ends_with("V_1_1/SuministroFactEmitidas.wsdl"));
        assert_eq!(ep.port, "SuministroFactEmitidas");
        assert_eq!(ep.operation, "SuministroLRFacturasEmitidas");
        assert_eq!(
            ep.url,
            "https://www1.agenciatributaria.gob.es/wlpl/SSII-FACT/ws/fe/SiiFactFEV1SOAP"
        );
    }

    #[test]
    fn received_testing_endpoint() {
        let ep = endpoint_for(
            InvoiceSide::Received,
            Environment::Testing,
            SiiVersion::V11,
        );
        assert_eq!(ep.port, "SuministroFactRecibidasPruebas");
        assert_eq!(ep.operation, "SuministroLRFacturasRecibidas");
        assert_eq!(
            ep.url,
            "https://prewww1.aeat.es/wlpl/SSII-FACT/ws/fr/SiiFactFRV1SOAP"
        );
    }

    #[test]
    fn old_version_picks_old_wsdl() {
        let ep = endpoint_for(
            InvoiceSide::Issued,
            Environment::Production,
            SiiVersion::V10,
        );
        assert!(ep.wsdl.contains("/V_1_0/"));
    }

    #[test]
    fn endpoints_are_https() {
        for side in [InvoiceSide::Issued, InvoiceSide::Received] {
            for env in [Environment::Production, Environment::Testing] {
                let ep = endpoint_for(side, env, SiiVersion::V11);
                assert!(ep.url.starts_with("https://"));
                assert!(ep.wsdl.starts_with("https://"));
            }
        }
    }
}
