use crate::domain::space::ALL_SPACES;

pub const MATCH_ALL: &str = "*";
const SPACE_FIELD: &str = "properties.space:";
const SPACES_FIELD: &str = "properties.spaces:";
const STRIPPED_CHARS: [char; 7] = ['?', '<', '>', '(', ')', '|', '&'];
const BOOLEAN_KEYWORDS: [&str; 3] = ["AND", "OR", "NOT"];

/// The set of spaces a request is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceScope {
    AllSpaces,
    Space(String),
}

impl SpaceScope {
    /// Picks the scope for a request. Only administrators may widen the scope
    /// to every space; anyone else is confined to a space they belong to or
    /// the deployment default.
    pub fn resolve(
        requested: Option<&str>,
        is_admin: bool,
        member_of: &[String],
        default_space: &str,
    ) -> Self {
        match requested.map(str::trim).filter(|s| !s.is_empty()) {
            Some(ALL_SPACES) if is_admin => SpaceScope::AllSpaces,
            Some(space)
                if space != ALL_SPACES
                    && (is_admin || space == default_space || member_of.iter().any(|m| m == space)) =>
            {
                SpaceScope::Space(space.to_string())
            }
            _ => SpaceScope::Space(default_space.to_string()),
        }
    }

    pub fn filter(&self) -> String {
        match self {
            SpaceScope::AllSpaces => MATCH_ALL.to_string(),
            SpaceScope::Space(space) => {
                format!("{SPACE_FIELD}\"{}\"", space.replace(['"', '\\'], ""))
            }
        }
    }
}

/// Confines a free-text query to `scope`. Inside a single space the user part
/// is stripped of grouping and boolean operators so it cannot escape the space
/// filter it is joined to.
pub fn sanitize_query(query: &str, scope: &SpaceScope) -> String {
    let trimmed = query.trim();
    match scope {
        SpaceScope::AllSpaces => {
            if trimmed.is_empty() {
                MATCH_ALL.to_string()
            } else {
                trimmed.to_string()
            }
        }
        SpaceScope::Space(_) => {
            let filter = scope.filter();
            let cleaned: String = trimmed.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect();
            let rest = cleaned
                .split_whitespace()
                .filter(|token| !BOOLEAN_KEYWORDS.contains(token))
                .collect::<Vec<_>>()
                .join(" ");

            if rest.is_empty() || rest == MATCH_ALL {
                filter
            } else {
                format!("{filter} AND ({rest})")
            }
        }
    }
}

/// Profiles store memberships in a plural field; space filters written for
/// other content types are pointed at it.
pub fn widen_space_field(query: &str) -> String {
    query.replace(SPACE_FIELD, SPACES_FIELD)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(name: &str) -> SpaceScope {
        SpaceScope::Space(name.to_string())
    }

    #[test]
    fn admin_may_request_all_spaces() {
        let scope = SpaceScope::resolve(Some("*"), true, &[], "default");
        assert_eq!(scope, SpaceScope::AllSpaces);
    }

    #[test]
    fn non_admin_requesting_all_spaces_gets_default() {
        let scope = SpaceScope::resolve(Some("*"), false, &[], "default");
        assert_eq!(scope, space("default"));
    }

    #[test]
    fn membership_is_required_for_a_named_space() {
        let member_of = vec!["eng".to_string()];
        assert_eq!(SpaceScope::resolve(Some("eng"), false, &member_of, "default"), space("eng"));
        assert_eq!(
            SpaceScope::resolve(Some("sales"), false, &member_of, "default"),
            space("default")
        );
        assert_eq!(SpaceScope::resolve(None, false, &member_of, "default"), space("default"));
    }

    #[test]
    fn match_all_inside_a_space_is_just_the_filter() {
        assert_eq!(sanitize_query("*", &space("eng")), "properties.space:\"eng\"");
        assert_eq!(sanitize_query("  ", &space("eng")), "properties.space:\"eng\"");
    }

    #[test]
    fn scoped_queries_lose_operators() {
        let qs = sanitize_query("alice) OR (properties.spaces:* <b>?", &space("eng"));
        assert_eq!(qs, "properties.space:\"eng\" AND (alice properties.spaces:* b)");
    }

    #[test]
    fn all_spaces_passes_query_through() {
        assert_eq!(sanitize_query(" name:bob ", &SpaceScope::AllSpaces), "name:bob");
        assert_eq!(sanitize_query("", &SpaceScope::AllSpaces), "*");
    }

    #[test]
    fn space_field_is_widened() {
        let qs = widen_space_field("properties.space:\"eng\" AND (bob)");
        assert_eq!(qs, "properties.spaces:\"eng\" AND (bob)");
    }
}
