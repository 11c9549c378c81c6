//! Tests for `CongressClient` driven by the exported mock transport.
//!
//! These exercise the `test-utils` feature the way a downstream crate would.

use std::sync::Arc;

use serde_json::json;
use sunlight_congress::congress::location::mock::MockGeocoder;
use sunlight_congress::congress::transport::mock::MockTransport;
use sunlight_congress::congress::{ApiMethod, CongressClient, Legislator, LocationCriteria};

fn legislator_list(names: &[(&str, &str)]) -> serde_json::Value {
    let items: Vec<_> = names
        .iter()
        .map(|(first, district)| json!({"legislator": {"firstname": first, "district": district}}))
        .collect();
    json!({"response": {"legislators": items}})
}

/// Test an address lookup goes through the geocoder and then by point.
#[tokio::test]
async fn test_address_lookup_uses_geocoder() {
    let transport = Arc::new(MockTransport::new());
    let geocoder = Arc::new(MockGeocoder::new(Some((33.876_145, -84.453_789))));

    transport.push_json(
        ApiMethod::DistrictsFromLatLong,
        json!({"response": {"districts": [{"district": {"state": "GA", "number": "6"}}]}}),
    );
    transport.push_json(ApiMethod::LegislatorsGetList, legislator_list(&[("Saxby", "Senior Seat")]));
    transport.push_json(ApiMethod::LegislatorsGetList, legislator_list(&[("Johnny", "Junior Seat")]));
    transport.push_json(ApiMethod::LegislatorsGetList, legislator_list(&[("Tom", "6")]));

    let client = CongressClient::new(Arc::clone(&transport)).with_geocoder(Arc::clone(&geocoder));
    let delegation = client
        .legislators_for_location(&LocationCriteria::address("123 Fake St Anytown USA"))
        .await
        .expect("should succeed")
        .expect("delegation present");

    assert_eq!(geocoder.calls(), ["123 Fake St Anytown USA"]);
    let point = &transport.calls_for(ApiMethod::DistrictsFromLatLong)[0];
    assert_eq!(point.get("latitude").map(String::as_str), Some("33.876145"));
    assert_eq!(point.get("longitude").map(String::as_str), Some("-84.453789"));
    assert_eq!(
        delegation.representative.and_then(|l| l.firstname).as_deref(),
        Some("Tom")
    );
}

/// Test committees are attached to a legislator in service order.
#[tokio::test]
async fn test_load_committees_attaches_list() {
    let transport = Arc::new(MockTransport::new());
    transport.push_json(
        ApiMethod::CommitteesAllForLegislator,
        json!({"response": {"committees": [
            {"committee": {"id": "HSAP", "name": "Appropriations"}},
            {"committee": {"id": "HSIF", "name": "Energy and Commerce"}}
        ]}}),
    );

    let client = CongressClient::new(Arc::clone(&transport));
    let mut legislator = Legislator {
        bioguide_id: Some("P000197".into()),
        ..Legislator::default()
    };
    client
        .load_committees(&mut legislator)
        .await
        .expect("should succeed");

    let ids: Vec<_> = legislator
        .committees
        .unwrap_or_default()
        .into_iter()
        .filter_map(|c| c.id)
        .collect();
    assert_eq!(ids, ["HSAP", "HSIF"]);
    assert_eq!(
        transport.calls_for(ApiMethod::CommitteesAllForLegislator)[0]
            .get("bioguide_id")
            .map(String::as_str),
        Some("P000197")
    );
}
