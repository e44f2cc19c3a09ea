use regex::Regex;

/// First family of a CSS `font-family` value, unquoted.
///
/// `"'Open Sans', Arial, sans-serif"` becomes `Open Sans`; a bare name is
/// returned trimmed.
pub fn primary_font_family(value: &str) -> String {
  let first = value.split(',').next().unwrap_or("").trim();
  let quoted = Regex::new(r#"^["'](.*)["']$"#).expect("regex");
  let name = match quoted.captures(first) {
    Some(cap) => cap[1].to_string(),
    None => first.to_string(),
  };
  name.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// CSS `font-family` value for a theme font. A bare family name is quoted and
/// given a generic fallback; a value that is already a list or already quoted
/// is used as written.
pub fn font_stack(value: &str) -> String {
  let value = value.trim();
  if value.contains(',') {
    value.to_string()
  } else if value.contains('\'') || value.contains('"') {
    format!("{value}, sans-serif")
  } else {
    format!("'{value}', sans-serif")
  }
}

pub fn pluralize_stars(count: u32) -> String {
  if count == 1 {
    "1 Star".to_string()
  } else {
    format!("{count} Stars")
  }
}
