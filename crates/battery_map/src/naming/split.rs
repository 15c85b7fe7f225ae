/// Splits an identifier at case boundaries.
///
/// A part starts at an upper case letter that follows a lower case letter
/// or a digit, and at the last capital of an acronym followed by a lower
/// case letter. Digits stay with the preceding part. Non alphanumeric
/// characters separate parts and are dropped.
///
/// # Examples
///
/// ```
/// use battery_map::naming::split_by_case;
///
/// assert_eq!(split_by_case("userName"), ["user", "Name"]);
/// assert_eq!(split_by_case("HTTPServer"), ["HTTP", "Server"]);
/// assert_eq!(split_by_case("page2Token"), ["page2", "Token"]);
/// assert_eq!(split_by_case("userID"), ["user", "ID"]);
/// ```
pub fn split_by_case(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut parts = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                parts.push(core::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                parts.push(core::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::split_by_case;

    #[test]
    fn boundaries() {
        assert_eq!(split_by_case("name"), ["name"]);
        assert_eq!(split_by_case("Name"), ["Name"]);
        assert_eq!(split_by_case("aB"), ["a", "B"]);
        assert_eq!(split_by_case("ABc"), ["A", "Bc"]);
        assert_eq!(split_by_case("parseHTTPResponse"), ["parse", "HTTP", "Response"]);
        assert_eq!(split_by_case("v2Api"), ["v2", "Api"]);
        assert_eq!(split_by_case("x_y"), ["x", "y"]);
        assert!(split_by_case("").is_empty());
    }
}
