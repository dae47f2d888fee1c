//! The uniform persistence contract.

use serde_json::Value;

use crate::error::SaveResult;
use crate::rules::Ruleset;

/// Contract every stateful entity follows.
///
/// `save` composes the entity's document node from an unmutated snapshot and
/// never fails for a fully-constructed entity. `load` rebuilds the entity
/// from its node, re-resolving any definition reference through `rules`; the
/// first malformed node, unparseable scalar, or unresolvable identifier
/// aborts the whole operation. Pure value types ignore `rules`.
pub trait Persist: Sized {
    fn save(&self) -> Value;

    fn load(node: &Value, rules: &Ruleset) -> SaveResult<Self>;
}
