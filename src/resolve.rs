//! Attribute resolution: turn a [`RawItem`] into a [`ResolvedItem`].
//!
//! Each attribute has its own [`AttrPolicy`] for the absent case. `id` is
//! always required. `name` is required or defaulted depending on the run.
//! `active` and `visible` default to `"1"` with a warning.

use serde::Serialize;

use crate::error::SceneError;
use crate::export::{ExportIssue, ExportIssueCode};
use crate::svg::RawItem;

/// Value substituted for an absent `active` or `visible` flag.
pub const DEFAULT_FLAG: &str = "1";

/// What to do when an attribute is absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttrPolicy {
    /// Abort the run.
    Required,
    /// Substitute the given value and warn.
    DefaultTo(&'static str),
}

/// An item with every attribute present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedItem {
    pub id: String,
    pub name: String,
    pub active: String,
    pub visible: String,
}

/// Result of resolving one item: the item plus any warnings raised.
#[derive(Clone, Debug)]
pub struct Resolution {
    pub item: ResolvedItem,
    pub issues: Vec<ExportIssue>,
}

/// An optional item attribute with a configurable absent-value policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemAttr {
    Name,
    Active,
    Visible,
}

impl ItemAttr {
    /// Policy applied when the attribute is absent.
    pub fn policy(self, names_required: bool) -> AttrPolicy {
        match self {
            ItemAttr::Name if names_required => AttrPolicy::Required,
            ItemAttr::Name => AttrPolicy::DefaultTo(""),
            ItemAttr::Active | ItemAttr::Visible => AttrPolicy::DefaultTo(DEFAULT_FLAG),
        }
    }

    /// Upper-case attribute name used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            ItemAttr::Name => "NAME",
            ItemAttr::Active => "ACTIVE",
            ItemAttr::Visible => "VISIBLE",
        }
    }

    fn issue_code(self) -> ExportIssueCode {
        match self {
            ItemAttr::Name => ExportIssueCode::MissingName,
            ItemAttr::Active => ExportIssueCode::MissingActive,
            ItemAttr::Visible => ExportIssueCode::MissingVisible,
        }
    }

    fn value(self, raw: &RawItem) -> Option<&str> {
        match self {
            ItemAttr::Name => raw.name.as_deref(),
            ItemAttr::Active => raw.active.as_deref(),
            ItemAttr::Visible => raw.visible.as_deref(),
        }
    }
}

/// Apply the per-attribute policies to `raw`.
///
/// `position` is the 1-based index of the item in its layer, used when the
/// id itself is missing. `names_required` selects the `name` policy.
pub fn resolve_item(
    raw: &RawItem,
    layer: &str,
    position: usize,
    names_required: bool,
) -> Result<Resolution, SceneError> {
    let id = raw
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| SceneError::MissingItemId {
            layer: layer.to_string(),
            position,
        })?
        .to_string();

    let mut issues = Vec::new();
    let mut resolve = |attr: ItemAttr| {
        apply_policy(attr, raw, attr.policy(names_required), &id, layer, &mut issues)
    };

    let name = resolve(ItemAttr::Name)?;
    let visible = resolve(ItemAttr::Visible)?;
    let active = resolve(ItemAttr::Active)?;

    Ok(Resolution {
        item: ResolvedItem {
            id,
            name,
            active,
            visible,
        },
        issues,
    })
}

fn apply_policy(
    attr: ItemAttr,
    raw: &RawItem,
    policy: AttrPolicy,
    id: &str,
    layer: &str,
    issues: &mut Vec<ExportIssue>,
) -> Result<String, SceneError> {
    match (attr.value(raw), policy) {
        (Some(value), _) => Ok(value.to_string()),
        (None, AttrPolicy::Required) => Err(SceneError::MissingItemAttribute {
            id: id.to_string(),
            attribute: attr.label(),
        }),
        (None, AttrPolicy::DefaultTo(fallback)) => {
            issues.push(ExportIssue::warning(
                attr.issue_code(),
                format!(
                    "item {id} in layer '{layer}' has no {} attribute; setting it to {fallback:?}",
                    attr.label()
                ),
            ));
            Ok(fallback.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_item_resolves_without_issues() {
        let raw = RawItem::with_id("b")
            .name("lives")
            .active("0")
            .visible("1");
        let resolved = resolve_item(&raw, "HUD", 2, true).expect("resolve");

        assert!(resolved.issues.is_empty());
        assert_eq!(
            resolved.item,
            ResolvedItem {
                id: "b".into(),
                name: "lives".into(),
                active: "0".into(),
                visible: "1".into(),
            }
        );
    }

    #[test]
    fn absent_flags_default_to_one_with_warnings() {
        let raw = RawItem::with_id("a").name("score");
        let resolved = resolve_item(&raw, "HUD", 1, true).expect("resolve");

        assert_eq!(resolved.item.active, "1");
        assert_eq!(resolved.item.visible, "1");
        let codes: Vec<_> = resolved.issues.iter().map(|issue| issue.code).collect();
        assert_eq!(
            codes,
            vec![ExportIssueCode::MissingVisible, ExportIssueCode::MissingActive]
        );
    }

    #[test]
    fn absent_name_is_fatal_when_required() {
        let raw = RawItem::with_id("rect7");
        let err = resolve_item(&raw, "HUD", 1, true).unwrap_err();

        assert!(matches!(
            err,
            SceneError::MissingItemAttribute { ref id, attribute: "NAME" } if id == "rect7"
        ));
        assert!(err.to_string().contains("rect7"));
    }

    #[test]
    fn absent_name_defaults_to_empty_when_optional() {
        let raw = RawItem::with_id("rect7").active("1").visible("1");
        let resolved = resolve_item(&raw, "HUD", 1, false).expect("resolve");

        assert_eq!(resolved.item.name, "");
        assert_eq!(resolved.issues.len(), 1);
        assert_eq!(resolved.issues[0].code, ExportIssueCode::MissingName);
    }

    #[test]
    fn declared_name_is_kept_when_optional() {
        let raw = RawItem::with_id("a").name("score");
        let resolved = resolve_item(&raw, "HUD", 1, false).expect("resolve");
        assert_eq!(resolved.item.name, "score");
    }

    #[test]
    fn every_attribute_has_a_policy() {
        assert_eq!(ItemAttr::Name.policy(true), AttrPolicy::Required);
        assert_eq!(ItemAttr::Name.policy(false), AttrPolicy::DefaultTo(""));
        for names_required in [true, false] {
            assert_eq!(
                ItemAttr::Active.policy(names_required),
                AttrPolicy::DefaultTo(DEFAULT_FLAG)
            );
            assert_eq!(
                ItemAttr::Visible.policy(names_required),
                AttrPolicy::DefaultTo(DEFAULT_FLAG)
            );
        }
    }

    #[test]
    fn required_flag_policy_is_fatal() {
        let raw = RawItem::with_id("a").name("score");
        let mut issues = Vec::new();
        let err = apply_policy(
            ItemAttr::Active,
            &raw,
            AttrPolicy::Required,
            "a",
            "HUD",
            &mut issues,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            SceneError::MissingItemAttribute { attribute: "ACTIVE", .. }
        ));
        assert!(issues.is_empty());
    }

    #[test]
    fn missing_or_empty_id_is_fatal() {
        let err = resolve_item(&RawItem::default(), "HUD", 3, false).unwrap_err();
        assert!(matches!(err, SceneError::MissingItemId { position: 3, .. }));

        let err = resolve_item(&RawItem::with_id(""), "HUD", 1, false).unwrap_err();
        assert!(matches!(err, SceneError::MissingItemId { .. }));
    }
}
