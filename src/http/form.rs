//! URL-encoded form body decoding
//!
//! Create and update requests carry `application/x-www-form-urlencoded`
//! bodies with `name` and `size` fields. Percent-escapes and `+` are
//! decoded by the `form_urlencoded` crate.

use crate::config::MissingFieldPolicy;

/// The decoded fields of a create/update request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquirrelForm {
    pub name: String,
    pub size: String,
}

/// Decode `name` and `size` from a form body
///
/// Unknown keys are ignored; a repeated key keeps its last value.
/// Absent fields are handled per `policy`: rejected with an error
/// message, or defaulted to the empty string.
pub fn parse_squirrel_form(
    body: &[u8],
    policy: MissingFieldPolicy,
) -> Result<SquirrelForm, String> {
    let mut name = None;
    let mut size = None;

    for (key, value) in form_urlencoded::parse(body) {
        match key.as_ref() {
            "name" => name = Some(value.into_owned()),
            "size" => size = Some(value.into_owned()),
            _ => {}
        }
    }

    match policy {
        MissingFieldPolicy::Reject => {
            let name = name.ok_or("missing form field: name")?;
            let size = size.ok_or("missing form field: size")?;
            Ok(SquirrelForm { name, size })
        }
        MissingFieldPolicy::Empty => Ok(SquirrelForm {
            name: name.unwrap_or_default(),
            size: size.unwrap_or_default(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_fields() {
        let form = parse_squirrel_form(b"name=Rex&size=medium", MissingFieldPolicy::Reject)
            .unwrap();
        assert_eq!(form.name, "Rex");
        assert_eq!(form.size, "medium");
    }

    #[test]
    fn test_values_are_unescaped() {
        let form = parse_squirrel_form(
            b"name=Mr.+Nutkin%21&size=extra%20large",
            MissingFieldPolicy::Reject,
        )
        .unwrap();
        assert_eq!(form.name, "Mr. Nutkin!");
        assert_eq!(form.size, "extra large");
    }

    #[test]
    fn test_unknown_keys_ignored_and_last_value_wins() {
        let form = parse_squirrel_form(
            b"color=red&name=Rex&name=Sandy&size=small",
            MissingFieldPolicy::Reject,
        )
        .unwrap();
        assert_eq!(form.name, "Sandy");
        assert_eq!(form.size, "small");
    }

    #[test]
    fn test_reject_policy_errors_on_missing_field() {
        let err = parse_squirrel_form(b"name=Rex", MissingFieldPolicy::Reject).unwrap_err();
        assert!(err.contains("size"));

        let err = parse_squirrel_form(b"", MissingFieldPolicy::Reject).unwrap_err();
        assert!(err.contains("name"));
    }

    #[test]
    fn test_empty_policy_defaults_missing_fields() {
        let form = parse_squirrel_form(b"name=Rex", MissingFieldPolicy::Empty).unwrap();
        assert_eq!(form.name, "Rex");
        assert_eq!(form.size, "");
    }
}
