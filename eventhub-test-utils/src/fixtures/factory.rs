//! Provider resource payloads.
//!
//! Each function returns a resource body as a provider would serve it.

/// A single event object with one date and one zone, without sale dates.
///
/// Reconciles into 1 event, 1 date and 1 zone.
pub fn concert_json() -> String {
    concert_json_titled("Concert")
}

/// [`concert_json`] with a different event title.
pub fn concert_json_titled(title: &str) -> String {
    serde_json::json!({
        "provider_event_id": "291",
        "title": title,
        "active": true,
        "dates": [{
            "provider_date_id": "291",
            "date": "2019-06-30",
            "zones": [{
                "provider_zone_id": "40",
                "name": "Platea",
                "price": 20.00,
                "numbered": true
            }]
        }]
    })
    .to_string()
}

/// A catalog list using upstream field names (`event`, `zone`, `sell_*`, `sold`).
///
/// Reconciles into 2 events, 2 dates and 2 zones. Sales for "Concert" run from 2014-07-01
/// to 2019-06-30; "Theater" has no dates.
pub fn catalog_json() -> String {
    serde_json::json!([
        {
            "provider_event_id": "291",
            "title": "Concert",
            "event": [
                {
                    "date": "2019-06-30T21:00:00",
                    "provider_date_id": "291",
                    "sell_start_date": "2014-07-01T00:00:00",
                    "sell_end_date": "2019-06-30T20:00:00",
                    "zone": [
                        {
                            "provider_zone_id": "40",
                            "capacity": "243",
                            "name": "Platea",
                            "numbered": "true",
                            "sold": 243
                        },
                        {
                            "provider_zone_id": "38",
                            "capacity": "100",
                            "name": "test",
                            "numbered": "false"
                        }
                    ]
                },
                {
                    "date": "2019-06-30T21:00:00",
                    "provider_date_id": "292",
                    "sell_start_date": "2014-07-01T00:00:00",
                    "sell_end_date": "2019-06-30T20:00:00"
                }
            ]
        },
        {
            "provider_event_id": "322",
            "title": "Theater"
        }
    ])
    .to_string()
}

/// The catalog of [`catalog_json`] published as XML.
pub fn catalog_xml() -> String {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<events>
    <event provider_event_id="291">
        <title>Concert</title>
        <dates>
            <date>
                <date>2019-06-30T21:00:00</date>
                <provider_date_id>291</provider_date_id>
                <sell_start_date>2014-07-01T00:00:00</sell_start_date>
                <sell_end_date>2019-06-30T20:00:00</sell_end_date>
                <zones>
                    <zone provider_zone_id="40">
                        <capacity>243</capacity>
                        <name>Platea</name>
                        <numbered>true</numbered>
                        <sold>243</sold>
                    </zone>
                    <zone provider_zone_id="38">
                        <capacity>100</capacity>
                        <name>test</name>
                        <numbered>false</numbered>
                    </zone>
                </zones>
            </date>
            <date>
                <date>2019-06-30T21:00:00</date>
                <provider_date_id>292</provider_date_id>
                <sell_start_date>2014-07-01T00:00:00</sell_start_date>
                <sell_end_date>2019-06-30T20:00:00</sell_end_date>
            </date>
        </dates>
    </event>
    <event provider_event_id="322">
        <title>Theater</title>
    </event>
</events>"#
        .to_string()
}

/// A catalog whose second event has no `provider_event_id`.
///
/// The first event is valid, so a non-transactional reconcile would leave it behind.
pub fn malformed_json() -> String {
    serde_json::json!([
        {
            "provider_event_id": "291",
            "title": "Concert",
            "dates": [{
                "provider_date_id": "291",
                "date": "2019-06-30",
                "zones": [{"provider_zone_id": "40", "name": "Platea", "capacity": 10}]
            }]
        },
        {
            "title": "Missing identifier",
            "dates": []
        }
    ])
    .to_string()
}
