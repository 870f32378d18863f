//! Decoding of the getaddress.io `find` response body.

use crate::models::{Address, LookupResponse};
use crate::{Error, Result};
use serde::Deserialize;
use std::str::FromStr;

/// Wire shape of a lookup response. All three fields are required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawLookup {
    latitude: Coordinate,
    longitude: Coordinate,
    addresses: Vec<String>,
}

/// A decimal coordinate, kept as the text the API sent.
#[derive(Debug, Deserialize)]
#[serde(try_from = "RawCoordinate")]
struct Coordinate(String);

/// The API sends numbers, but quoted decimals are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCoordinate {
    Number(serde_json::Number),
    Text(String),
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = String;

    fn try_from(raw: RawCoordinate) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawCoordinate::Number(number) => Ok(Coordinate(number.to_string())),
            RawCoordinate::Text(text) => {
                let text = text.trim();
                match text.parse::<f64>() {
                    Ok(value) if value.is_finite() => Ok(Coordinate(text.to_string())),
                    _ => Err(format!("invalid coordinate {text:?}, expected a decimal number")),
                }
            }
        }
    }
}

/// Parse a raw JSON body into a [`LookupResponse`].
///
/// Every entry of `Addresses` is split into its seven fields with
/// [`Address::parse`]. A body that is not JSON, or that misses `Latitude`,
/// `Longitude` or `Addresses`, fails with [`Error::ResponseParse`].
///
/// # Examples
/// ```
/// let body = r#"{
///     "Latitude": 52.76197,
///     "Longitude": 1.109534,
///     "Addresses": ["7 Market Place, , , , Reepham, Norwich, Norfolk"]
/// }"#;
///
/// let response = getaddress_client::parse_response(body)?;
/// assert_eq!(response.latitude(), "52.76197");
/// assert_eq!(response.addresses()[0].town(), "Reepham");
/// # Ok::<(), getaddress_client::Error>(())
/// ```
pub fn parse_response(raw: &str) -> Result<LookupResponse> {
    let raw: RawLookup = serde_json::from_str(raw)?;

    let addresses = raw
        .addresses
        .iter()
        .map(|line| Address::parse(line))
        .collect();

    Ok(LookupResponse::new(raw.latitude.0, raw.longitude.0, addresses))
}

impl FromStr for LookupResponse {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_response(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../tests/fixtures/nr10_4jj.json");

    #[test]
    fn parses_fixture_coordinates() {
        let response = parse_response(FIXTURE).unwrap();
        assert_eq!(response.latitude(), "52.76197");
        assert_eq!(response.longitude(), "1.109534");
    }

    #[test]
    fn parses_fixture_first_address() {
        let response = parse_response(FIXTURE).unwrap();
        let first = &response.addresses()[0];

        assert_eq!(first.line1(), "7 Market Place");
        assert_eq!(first.line2(), "");
        assert_eq!(first.line3(), "");
        assert_eq!(first.line4(), "");
        assert_eq!(first.town(), "Reepham");
        assert_eq!(first.postal_town(), "Norwich");
        assert_eq!(first.county(), "Norfolk");
    }

    #[test]
    fn keeps_every_address_in_order() {
        let response = parse_response(FIXTURE).unwrap();
        let addresses = response.addresses();

        assert_eq!(addresses.len(), 40);
        assert_eq!(addresses[1].line1(), "Bank House");
        assert_eq!(addresses[39].line1(), "Very Nice Things");
        assert!(addresses.iter().all(|a| a.county() == "Norfolk"));
    }

    #[test]
    fn fields_match_the_raw_segments() {
        let raw: serde_json::Value = serde_json::from_str(FIXTURE).unwrap();
        let lines = raw["Addresses"].as_array().unwrap();
        let response = parse_response(FIXTURE).unwrap();

        for (line, address) in lines.iter().zip(response.addresses()) {
            let expected: Vec<&str> = line.as_str().unwrap().split(',').map(str::trim).collect();
            assert_eq!(address.to_string().split(", ").collect::<Vec<_>>(), expected);
        }
    }

    #[test]
    fn filter_on_fixture_finds_single_house() {
        let response = parse_response(FIXTURE).unwrap().filter("Bank");
        assert_eq!(response.addresses().len(), 1);
        assert_eq!(response.addresses()[0].line1(), "Bank House");
    }

    #[test]
    fn accepts_quoted_coordinates() {
        let response: LookupResponse =
            r#"{"Latitude":"51.5","Longitude":"-0.12","Addresses":[]}"#.parse().unwrap();
        assert_eq!(response.latitude(), "51.5");
        assert_eq!(response.longitude(), "-0.12");
        assert!(response.addresses().is_empty());
    }

    #[test]
    fn rejects_invalid_json() {
        let err = parse_response("<html>oops</html>").unwrap_err();
        assert!(matches!(err, Error::ResponseParse(_)));
    }

    #[test]
    fn rejects_missing_addresses() {
        let err = parse_response(r#"{"Latitude":52.7,"Longitude":1.1}"#).unwrap_err();
        assert!(matches!(err, Error::ResponseParse(_)));
    }

    #[test]
    fn rejects_missing_coordinates() {
        let err = parse_response(r#"{"Addresses":[]}"#).unwrap_err();
        assert!(matches!(err, Error::ResponseParse(_)));
    }

    #[test]
    fn rejects_non_string_addresses() {
        let err =
            parse_response(r#"{"Latitude":52.7,"Longitude":1.1,"Addresses":[1, 2]}"#).unwrap_err();
        assert!(matches!(err, Error::ResponseParse(_)));
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        for body in [
            r#"{"Latitude":"not-a-number","Longitude":"1.1","Addresses":[]}"#,
            r#"{"Latitude":"52.7","Longitude":"","Addresses":[]}"#,
            r#"{"Latitude":"NaN","Longitude":"1.1","Addresses":[]}"#,
            r#"{"Latitude":true,"Longitude":1.1,"Addresses":[]}"#,
        ] {
            let err = parse_response(body).unwrap_err();
            assert!(matches!(err, Error::ResponseParse(_)), "{body} should not parse");
        }
    }

    #[test]
    fn quoted_coordinates_are_trimmed() {
        let response =
            parse_response(r#"{"Latitude":" 52.76197 ","Longitude":"1.109534","Addresses":[]}"#)
                .unwrap();
        assert_eq!(response.latitude(), "52.76197");
    }
}
