//! Zig identifier rules.

/// Whether `s` cannot be used as a bare Zig identifier.
///
/// `type` is not a keyword but is rejected as an identifier all the same.
#[rustfmt::skip]
pub fn is_reserved(s: &str) -> bool {
    matches!(
        s,
        | "addrspace" | "align" | "allowzero" | "and" | "anyframe" | "anytype" | "asm"
        | "async" | "await" | "break" | "callconv" | "catch" | "comptime" | "const"
        | "continue" | "defer" | "else" | "enum" | "errdefer" | "error" | "export" | "extern"
        | "fn" | "for" | "if" | "inline" | "linksection" | "noalias" | "noinline"
        | "nosuspend" | "opaque" | "or" | "orelse" | "packed" | "pub" | "resume" | "return"
        | "struct" | "suspend" | "switch" | "test" | "threadlocal" | "try" | "type"
        | "union" | "unreachable" | "usingnamespace" | "var" | "volatile" | "while"
    )
}

/// Quote `s` as `@"s"`.
pub fn quote(s: &str) -> String {
    format!("@\"{}\"", s)
}

/// Quote `s` if it collides with a reserved word.
pub fn escape_keyword(s: &str) -> String {
    if is_reserved(s) {
        quote(s)
    } else {
        s.to_string()
    }
}

/// `GET_ENTITY_COORDS` -> `getEntityCoords`
pub fn camel_case(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut parts = lower.split('_');

    let mut out = parts.next().unwrap_or_default().to_string();
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    out
}

/// `vehicleModelHash` -> `vehicle_model_hash`
///
/// The first character is lower-cased but never prefixed.
pub fn snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);

    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }

    out
}

/// Transform a raw native name into a Zig function name.
pub fn native_name(raw: &str, enforce_naming: bool) -> String {
    let name = if let Some(hex) = raw.strip_prefix("_0x") {
        // Identifiers can't start with a digit.
        quote(&format!("0x{}", hex))
    } else if let Some(rest) = raw.strip_prefix('_') {
        let rest = if enforce_naming {
            camel_case(rest)
        } else {
            rest.to_string()
        };
        format!("{}_", rest)
    } else if enforce_naming {
        camel_case(raw)
    } else {
        raw.to_string()
    };

    escape_keyword(&name)
}

/// Transform a raw parameter name into a Zig parameter name.
pub fn param_name(raw: &str, enforce_naming: bool) -> String {
    if enforce_naming {
        escape_keyword(&snake_case(raw))
    } else {
        escape_keyword(raw)
    }
}

/// Transform a namespace name into a Zig container name.
pub fn namespace_name(raw: &str, enforce_naming: bool) -> String {
    let name = if enforce_naming {
        raw.to_lowercase()
    } else {
        raw.to_string()
    };

    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}
