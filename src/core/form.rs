use std::collections::HashMap;

/// Parse an `application/x-www-form-urlencoded` body into field pairs.
///
/// Values are percent-decoded and `+` is read as a space. A key without `=`
/// maps to an empty value. Repeated keys keep the last value.
///
/// # Example
/// ```
/// use socialnet::core::form::parse_form;
/// let fields = parse_form(b"username=alice&password=pw+1");
/// assert_eq!(fields.get("username"), Some(&"alice".to_string()));
/// assert_eq!(fields.get("password"), Some(&"pw 1".to_string()));
/// ```
pub fn parse_form(body: &[u8]) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    let raw = String::from_utf8_lossy(body);

    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = match pair.find('=') {
            Some(eq_idx) => (&pair[..eq_idx], &pair[eq_idx + 1..]),
            None => (pair, ""),
        };
        fields.insert(decode(key), decode(value));
    }

    fields
}

fn decode(component: &str) -> String {
    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

/// Take a required field, naming it in the error like a form validator would.
pub fn required(fields: &HashMap<String, String>, key: &str) -> Result<String, String> {
    fields
        .get(key)
        .cloned()
        .ok_or_else(|| format!("field required: {}", key))
}
