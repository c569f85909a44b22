use std::{
  collections::HashSet,
  sync::LazyLock,
};

use any_ascii::any_ascii;
use inflections::Inflect;
use regex::Regex;

/// Kotlin hard keywords. Identifiers matching one of these must be backtick-quoted.
static KOTLIN_HARD_KEYWORDS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in", "interface", "is", "null",
    "object", "package", "return", "super", "this", "throw", "true", "try", "typealias", "typeof", "val", "var", "when",
    "while",
  ]
  .into_iter()
  .collect()
});

static SNAKE_BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([^_A-Z])([A-Z])").unwrap());
static DTO_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(SyncDto|Dto)\b").unwrap());
static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());
static PLAIN_IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());
static ID_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^id[A-Z]").unwrap());

/// Converts a camelCase or PascalCase name into a snake_case table or column name.
///
/// An underscore is inserted between any non-underscore, non-uppercase character and a
/// following uppercase letter, then the whole string is lowercased. Runs of capitals are
/// therefore kept together: `"XMLFile"` becomes `"xmlfile"`, `"PersonGroup"` becomes
/// `"person_group"`.
pub(crate) fn snake(name: &str) -> String {
  SNAKE_BOUNDARY_RE.replace_all(name, "${1}_${2}").to_lowercase()
}

pub(crate) fn capitalize(name: &str) -> String {
  let mut chars = name.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

pub(crate) fn decapitalize(name: &str) -> String {
  let mut chars = name.chars();
  match chars.next() {
    Some(first) => first.to_lowercase().chain(chars).collect(),
    None => String::new(),
  }
}

/// Strips a trailing `SyncDto` or `Dto` word from a raw definition name.
pub(crate) fn canonical_entity_name(raw: &str) -> String {
  DTO_SUFFIX_RE.replace_all(raw, "").into_owned()
}

/// True when `name` is `id` followed by an uppercase letter, e.g. `idPersonGroup`.
pub(crate) fn has_id_prefix(name: &str) -> bool {
  ID_PREFIX_RE.is_match(name)
}

/// Returns the part after the `id` prefix, if there is one.
pub(crate) fn strip_id_prefix(name: &str) -> Option<&str> {
  has_id_prefix(name).then(|| &name[2..])
}

/// Id-prefixes a reference field name unless it is already prefixed.
pub(crate) fn id_prefixed(name: &str) -> String {
  if has_id_prefix(name) {
    name.to_string()
  } else {
    format!("id{}", capitalize(name))
  }
}

pub(crate) fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

/// Turns a document property key into a usable Kotlin property name.
///
/// Keys that already are plain identifiers pass through unchanged so that generated
/// names stay aligned with the wire names. Anything else is transliterated and
/// camel-cased.
pub(crate) fn property_identifier(raw: &str) -> String {
  if PLAIN_IDENTIFIER_RE.is_match(raw) {
    return raw.to_string();
  }

  let camel = sanitize(raw).to_camel_case();
  match camel.chars().next() {
    None => "value".to_string(),
    Some(first) if first.is_ascii_digit() => format!("_{camel}"),
    Some(_) => camel,
  }
}

/// Quotes an identifier with backticks when it collides with a Kotlin hard keyword.
pub(crate) fn kotlin_identifier(name: &str) -> String {
  if KOTLIN_HARD_KEYWORDS.contains(name) {
    format!("`{name}`")
  } else {
    name.to_string()
  }
}

/// Renders `value` as a double-quoted Kotlin string literal.
pub(crate) fn kotlin_string_literal(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  out.push('"');
  for ch in value.chars() {
    match ch {
      '\\' => out.push_str("\\\\"),
      '"' => out.push_str("\\\""),
      '$' => out.push_str("\\$"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      other => out.push(other),
    }
  }
  out.push('"');
  out
}

/// Derives a SCREAMING_SNAKE_CASE enum constant name from a wire literal.
pub(crate) fn enum_constant_name(literal: &str) -> String {
  let words = sanitize(&any_ascii(literal).replace(['-', '.', ' '], "_"));
  if words.is_empty() {
    return "UNKNOWN".to_string();
  }

  let constant = words.to_constant_case();
  let constant = if constant.is_empty() { words.to_uppercase() } else { constant };
  if constant.starts_with(|c: char| c.is_ascii_digit()) {
    format!("_{constant}")
  } else {
    constant
  }
}

/// Assigns constant names to every literal of one enum domain, suffixing collisions.
///
/// The first literal to produce a name keeps it. Suffixes skip every name some literal
/// produces on its own, so `["A", "a", "A_2"]` yields `A`, `A_3`, `A_2`.
pub(crate) fn enum_constant_names<'a>(literals: impl IntoIterator<Item = &'a str>) -> Vec<String> {
  let bases = literals.into_iter().map(enum_constant_name).collect::<Vec<_>>();
  let reserved: HashSet<&str> = bases.iter().map(String::as_str).collect();
  let mut assigned: HashSet<String> = HashSet::new();
  bases
    .iter()
    .map(|base| {
      let name = if assigned.contains(base) {
        (2..)
          .map(|suffix| format!("{base}_{suffix}"))
          .find(|candidate| !reserved.contains(candidate.as_str()) && !assigned.contains(candidate))
          .unwrap_or_else(|| base.clone())
      } else {
        base.clone()
      };
      assigned.insert(name.clone());
      name
    })
    .collect()
}
