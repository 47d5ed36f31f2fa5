//! `mailto:` link assembly.
//!
//! Recipients are rendered as `"Name (Office)" <email>` and each one is
//! percent-encoded as a whole before being joined with commas, so a comma or
//! ampersand inside a name can never split the recipient list or the query.

use std::collections::HashSet;

use urlencoding::encode;

use crate::error::TargetingError;
use crate::lookup::LookupResult;
use crate::representative::Representative;
use crate::template::EmailTemplate;

/// Percent-encoded `"Name (Office)" <email>` for one representative.
///
/// Parentheses rather than a comma separate name and title: the comma is
/// the recipient delimiter in `mailto:` lists.
#[must_use]
pub fn format_recipient(representative: &Representative) -> String {
    let email = representative.email.as_deref().unwrap_or_default().trim();
    let display = format!(
        "\"{} ({})\" <{email}>",
        representative.name, representative.elected_office
    );
    encode(&display).into_owned()
}

/// Trimmed, ASCII-lowercased address used to compare recipients.
fn address_key(representative: &Representative) -> Option<String> {
    representative
        .email
        .as_deref()
        .map(|email| email.trim().to_ascii_lowercase())
}

/// Everyone CC'd when `primary` is the "to" recipient: each emailable
/// representative whose address differs from the primary's. An address
/// shared by several records is CC'd once, for the first of them.
#[must_use]
pub fn cc_list<'a>(lookup: &'a LookupResult, primary: &Representative) -> Vec<&'a Representative> {
    let mut seen: HashSet<String> = address_key(primary).into_iter().collect();
    lookup
        .emailable_representatives()
        .into_iter()
        .filter(|rep| address_key(rep).is_some_and(|key| seen.insert(key)))
        .collect()
}

/// Signature hook for the body. `user_name` is accepted so a signature can
/// be appended later; the body currently passes through unchanged.
fn body_with_signature(body: &str, _user_name: Option<&str>) -> String {
    body.to_string()
}

/// Build the `mailto:` URI for a lookup result and an already-filled template.
///
/// The primary MP is the "to" recipient, falling back to the first
/// emailable representative. Every other distinct address is CC'd once.
///
/// # Errors
///
/// Returns [`TargetingError::NoEmailableRecipient`] when nobody in the
/// result has an email address.
pub fn build_mailto(
    lookup: &LookupResult,
    template: &EmailTemplate,
    user_name: Option<&str>,
) -> Result<String, TargetingError> {
    let primary = lookup
        .primary_recipient()
        .ok_or(TargetingError::NoEmailableRecipient)?;

    let cc: Vec<String> = cc_list(lookup, primary)
        .into_iter()
        .map(format_recipient)
        .collect();

    let mut uri = format!("mailto:{}", format_recipient(primary));
    let mut separator = '?';
    if !cc.is_empty() {
        uri.push(separator);
        uri.push_str("cc=");
        uri.push_str(&cc.join(","));
        separator = '&';
    }

    uri.push(separator);
    uri.push_str("subject=");
    uri.push_str(&encode(&template.subject));

    let body = body_with_signature(&template.body, user_name);
    uri.push_str("&body=");
    uri.push_str(&encode(&body));

    Ok(uri)
}

/// Standard placeholder values for a letter to `recipient`.
///
/// `PostalCode` is the normalized code, `RepresentativeTitle` is the
/// salutation ("Ms. Jane Doe"), `RidingName` the district or empty.
/// `UserName` is only present when supplied.
#[must_use]
pub fn template_variables(
    recipient: &Representative,
    lookup: &LookupResult,
    user_name: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut variables = vec![
        ("PostalCode", lookup.normalized_postal_code()),
        (
            "RidingName",
            recipient.district_name.clone().unwrap_or_default(),
        ),
        ("RepresentativeName", recipient.name.clone()),
        ("RepresentativeTitle", recipient.salutation()),
    ];
    if let Some(name) = user_name.filter(|name| !name.trim().is_empty()) {
        variables.push(("UserName", name.trim().to_string()));
    }
    variables
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_representative() -> impl Strategy<Value = Representative> {
        (
            "[A-Za-z ,&]{1,12}",
            proptest::sample::select(vec!["MP", "MPP", "Mayor", "Councillor"]),
            proptest::option::of(proptest::sample::select(vec![
                "a@x.ca", "b@x.ca", "c@x.ca", "d@x.ca",
            ])),
        )
            .prop_map(|(name, office, email)| {
                let mut rep = Representative::new(name, office);
                rep.email = email.map(String::from);
                rep
            })
    }

    proptest! {
        /// The CC block never repeats the primary recipient's address
        #[test]
        fn cc_never_repeats_primary(reps in proptest::collection::vec(arb_representative(), 0..8)) {
            let result = LookupResult::new("K1A0A6", reps);
            let template = EmailTemplate::new("t", "t.json", "s", "b");

            match build_mailto(&result, &template, None) {
                Ok(uri) => {
                    let primary = result.primary_recipient();
                    prop_assert!(primary.is_some());
                    let email = primary.and_then(|p| p.email.clone()).unwrap_or_default();
                    let encoded_email = encode(&email).into_owned();
                    prop_assert_eq!(uri.matches(encoded_email.as_str()).count(), 1);

                    let keys: Vec<String> = cc_list(&result, primary.expect("primary"))
                        .iter()
                        .filter_map(|rep| rep.email.as_deref())
                        .map(|email| email.trim().to_ascii_lowercase())
                        .collect();
                    let unique: std::collections::HashSet<&String> = keys.iter().collect();
                    prop_assert_eq!(unique.len(), keys.len());
                }
                Err(err) => {
                    prop_assert_eq!(err, TargetingError::NoEmailableRecipient);
                    prop_assert!(!result.has_emailable_representatives());
                }
            }
        }
    }
}
