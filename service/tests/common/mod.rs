//! Common test utilities for integration tests.
//!
//! - [`app_builder::TestAppBuilder`] - Build test Axum apps that mirror main.rs wiring
//! - [`http_mock::MockHttpServer`] - Stub the Represent API over real HTTP
//! - Fixtures below - Represent records and a small template catalog

#![allow(dead_code)]

pub mod app_builder;
pub mod http_mock;

use serde_json::{json, Value};
use voices_api::represent::{RawRepresentative, RepresentativeExtra};
use voices_targeting::{
    EmailTemplate, IdeologyGroup, Level, PartyMapping, PoliticalIdeology, TemplateCatalog,
    TemplateTargeting,
};

pub fn record(name: &str, office: &str, email: Option<&str>, party: Option<&str>) -> RawRepresentative {
    RawRepresentative {
        name: Some(name.to_string()),
        elected_office: Some(office.to_string()),
        email: email.map(String::from),
        district_name: Some("Ottawa Centre".to_string()),
        party_name: party.map(String::from),
        ..RawRepresentative::default()
    }
}

/// MP, MPP and a councillor for Ottawa Centre, in the directory's order.
pub fn ottawa_records() -> Vec<RawRepresentative> {
    let mut mp = record(
        "Jane Doe",
        "MP",
        Some("jane.doe@parl.gc.ca"),
        Some("Liberal Party of Canada"),
    );
    mp.gender = Some("F".to_string());
    mp.extra = Some(RepresentativeExtra {
        preferred_languages: vec!["English".to_string()],
    });

    vec![
        record("Ann Lee", "Councillor", Some("ann.lee@ottawa.ca"), None),
        record("Bo Chan", "MPP", Some("bchan@ola.org"), Some("Ontario NDP")),
        mp,
    ]
}

/// Represent API body for [`ottawa_records`], with the MP repeated in
/// the concordance list.
pub fn ottawa_response() -> Value {
    json!({
        "representatives_centroid": [
            {
                "name": "Ann Lee",
                "elected_office": "Councillor",
                "email": "ann.lee@ottawa.ca",
                "district_name": "Somerset",
                "party_name": ""
            },
            {
                "name": "Bo Chan",
                "elected_office": "MPP",
                "email": "bchan@ola.org",
                "district_name": "Ottawa Centre",
                "party_name": "Ontario NDP"
            },
            {
                "name": "Jane Doe",
                "elected_office": "MP",
                "email": "jane.doe@parl.gc.ca",
                "district_name": "Ottawa Centre",
                "party_name": "Liberal",
                "gender": "F",
                "extra": { "preferred_languages": ["English", "French"] }
            }
        ],
        "representatives_concordance": [
            {
                "name": "Jane Doe",
                "elected_office": "MP",
                "email": "duplicate@parl.gc.ca",
                "district_name": "Ottawa Centre"
            },
            {
                "name": "",
                "elected_office": "Mayor"
            }
        ],
        "boundaries_centroid": [
            { "name": "Ottawa Centre", "boundary_set_name": "Federal electoral district" }
        ]
    })
}

pub fn party_mapping() -> PartyMapping {
    PartyMapping::new(vec![
        IdeologyGroup::new("Liberal", ["Liberal", "Liberal Party of Canada"]),
        IdeologyGroup::new("Ndp", ["NDP", "Ontario NDP"]),
    ])
}

/// A generic fallback plus one federal Liberal template.
pub fn catalog() -> TemplateCatalog {
    TemplateCatalog::new(
        vec![
            EmailTemplate::new(
                "generic-en",
                "generic-en.json",
                "A message from {{PostalCode}}",
                "Dear {{RepresentativeTitle}},\n\nPlease act.",
            ),
            EmailTemplate::new(
                "federal-liberal-en",
                "federal-liberal-en.json",
                "Your constituent in {{RidingName}}",
                "Dear {{RepresentativeTitle}},\n\nAs your constituent from {{PostalCode}}...",
            )
            .with_targeting(
                TemplateTargeting::default()
                    .with_level(Level::Federal)
                    .with_ideology(PoliticalIdeology::Liberal),
            ),
            EmailTemplate::new("generic-fr", "generic-fr.json", "Message", "Bonjour")
                .with_targeting(TemplateTargeting::default().with_language("fr")),
        ],
        party_mapping(),
    )
}
