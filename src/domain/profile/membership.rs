use crate::domain::profile::value_objects::ProfileId;
use crate::domain::profile::query::MATCH_ALL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceOperation {
    Add,
    Remove,
    Replace,
}

impl SpaceOperation {
    /// Anything other than `add` or `remove` replaces the membership set.
    pub fn from_form(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("add") => SpaceOperation::Add,
            Some("remove") => SpaceOperation::Remove,
            _ => SpaceOperation::Replace,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpaceOperation::Add => "add",
            SpaceOperation::Remove => "remove",
            SpaceOperation::Replace => "replace",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSelection {
    All,
    Selected(Vec<ProfileId>),
}

impl ProfileSelection {
    /// `selection=all` wins; otherwise the explicit ids, if any.
    pub fn from_form(selection: Option<&str>, selected: Vec<ProfileId>) -> Option<Self> {
        if selection.map(str::trim) == Some("all") {
            Some(ProfileSelection::All)
        } else if selected.is_empty() {
            None
        } else {
            Some(ProfileSelection::Selected(selected))
        }
    }

    pub fn query(&self) -> String {
        match self {
            ProfileSelection::All => MATCH_ALL.to_string(),
            ProfileSelection::Selected(ids) => {
                let quoted: Vec<String> = ids
                    .iter()
                    .map(|id| format!("\"{}\"", id.as_str().replace('"', "")))
                    .collect();
                format!("_id:({})", quoted.join(" "))
            }
        }
    }
}
