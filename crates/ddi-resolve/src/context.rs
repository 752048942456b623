use ddi_model::{Kind, ResolutionLevel, classify_map};
use serde_json::{Map, Value};

/// Identity of a resource on the traversal path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub kind: Option<Kind>,
    pub id: String,
}

impl NodeKey {
    /// Key for an object that names itself by `id` (or `urn`).
    ///
    /// `kind` is the collection the object was looked up in, or the kind its
    /// position implies. Without one the explicit tag and then the structural
    /// classifier decide.
    pub fn of(kind: Option<Kind>, map: &Map<String, Value>) -> Option<Self> {
        let id = ["id", "urn"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))?;
        Some(Self {
            kind: kind.or_else(|| classify_map(map)),
            id: id.to_string(),
        })
    }
}

/// Per-branch traversal state.
///
/// Each branch owns its copy, so siblings never see each other's path and
/// nothing is shared across concurrent resolutions.
#[derive(Debug, Clone)]
pub struct Traversal {
    level: ResolutionLevel,
    depth: usize,
    path: Vec<NodeKey>,
}

impl Traversal {
    pub fn root(level: ResolutionLevel, kind: Option<Kind>, root: &Map<String, Value>) -> Self {
        Self {
            level,
            depth: 0,
            path: NodeKey::of(kind, root).into_iter().collect(),
        }
    }

    pub fn level(&self) -> ResolutionLevel {
        self.level
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn path(&self) -> &[NodeKey] {
        &self.path
    }

    /// True where references are expanded: the root object always, every
    /// nested object under recursive resolution.
    pub fn expands(&self) -> bool {
        match self.level {
            ResolutionLevel::None => false,
            ResolutionLevel::Children => self.depth == 0,
            ResolutionLevel::All => true,
        }
    }

    pub fn is_recursive(&self) -> bool {
        self.level.is_recursive()
    }

    pub fn contains(&self, key: &NodeKey) -> bool {
        self.path.contains(key)
    }

    /// State for a nested object. Objects that carry an identity are pushed
    /// onto the path under `kind` (see [`NodeKey::of`]).
    pub fn enter(&self, kind: Option<Kind>, map: &Map<String, Value>) -> Self {
        let mut next = self.clone();
        next.depth += 1;
        next.path.extend(NodeKey::of(kind, map));
        next
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn root_is_on_its_own_path() {
        let root = object(json!({"id": "c1", "typeOfObject": "Concept"}));
        let cx = Traversal::root(ResolutionLevel::All, None, &root);
        assert!(cx.contains(&NodeKey {
            kind: Some(Kind::Concept),
            id: "c1".into()
        }));
    }

    #[test]
    fn children_expands_only_at_root() {
        let root = object(json!({"id": "v1"}));
        let cx = Traversal::root(ResolutionLevel::Children, None, &root);
        assert!(cx.expands());
        let nested = cx.enter(None, &object(json!({"value": "x"})));
        assert!(!nested.expands());
        assert_eq!(nested.depth(), 1);
        assert_eq!(nested.path().len(), 1);
    }

    #[test]
    fn siblings_do_not_share_paths() {
        let root = object(json!({"id": "s1"}));
        let cx = Traversal::root(ResolutionLevel::All, None, &root);
        let left = cx.enter(None, &object(json!({"id": "a"})));
        let right = cx.enter(None, &object(json!({"id": "b"})));
        assert_eq!(left.path().len(), 2);
        assert!(!right.contains(&NodeKey::of(None, &object(json!({"id": "a"}))).unwrap()));
    }

    #[test]
    fn known_kind_outranks_structure() {
        // Name and label alone look like a variable.
        let concept = object(json!({"id": "x", "name": [], "label": []}));
        assert_eq!(NodeKey::of(None, &concept).unwrap().kind, Some(Kind::Variable));
        assert_eq!(
            NodeKey::of(Some(Kind::Concept), &concept).unwrap().kind,
            Some(Kind::Concept)
        );

        let variable = object(json!({"id": "x", "typeOfObject": "Variable"}));
        let cx = Traversal::root(ResolutionLevel::All, Some(Kind::Variable), &variable);
        let inner = cx.enter(Some(Kind::Concept), &concept);
        assert_eq!(inner.path().len(), 2);
        assert!(!cx.contains(&NodeKey::of(Some(Kind::Concept), &concept).unwrap()));
    }
}
