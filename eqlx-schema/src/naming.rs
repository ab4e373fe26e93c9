/// How host-side member names map to domain-level (EdgeQL-facing) names
/// when no explicit domain name is registered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NamingStrategy {
    /// Use the host name verbatim.
    #[default]
    Default,
    /// `CreatedAt` / `createdAt` -> `created_at`.
    SnakeCase,
    /// `CreatedAt` -> `createdAt`.
    CamelCase,
}

impl NamingStrategy {
    pub fn apply(&self, name: &str) -> String {
        match self {
            NamingStrategy::Default => name.to_string(),
            NamingStrategy::SnakeCase => to_snake_case(name),
            NamingStrategy::CamelCase => to_camel_case(name),
        }
    }
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if i != 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn to_camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_verbatim() {
        assert_eq!(NamingStrategy::Default.apply("CreatedAt"), "CreatedAt");
    }

    #[test]
    fn snake_case_conversion() {
        let s = NamingStrategy::SnakeCase;
        assert_eq!(s.apply("CreatedAt"), "created_at");
        assert_eq!(s.apply("createdAt"), "created_at");
        assert_eq!(s.apply("name"), "name");
        assert_eq!(s.apply("URL"), "u_r_l");
    }

    #[test]
    fn camel_case_conversion() {
        let c = NamingStrategy::CamelCase;
        assert_eq!(c.apply("CreatedAt"), "createdAt");
        assert_eq!(c.apply("name"), "name");
        assert_eq!(c.apply(""), "");
    }
}
