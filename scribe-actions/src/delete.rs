use crate::Action;
use scribe_types::Document;

/// Recursive removal of keys and array elements described by a delete spec.
pub struct DeleteAction;

impl DeleteAction {
    pub const NAME: &'static str = "delete";
}

impl Action for DeleteAction {
    fn transform(&self, base: &Document, params: &Document) -> Document {
        delete(base, params)
    }
}

/// Removes what `spec` points at from a copy of `base`.
///
/// - an array spec applies each element in turn;
/// - an object spec descends: `{"c": "x"}` removes `x` inside `c`, never `c`
///   itself;
/// - a scalar removes an array index or an object key at the current level.
///
/// Indices out of range and absent keys are ignored. Negative indices count
/// from the end of the array.
pub fn delete(base: &Document, spec: &Document) -> Document {
    let mut target = base.clone();
    delete_in_place(&mut target, spec);
    target
}

fn delete_in_place(target: &mut Document, spec: &Document) {
    if !(target.is_object() || target.is_array()) {
        return;
    }

    match spec {
        Document::Array(specs) => {
            for s in specs {
                delete_in_place(target, s);
            }
        }
        Document::Object(entries) => {
            for (key, sub) in entries {
                if let Some(child) = child_mut(target, key) {
                    delete_in_place(child, sub);
                }
            }
        }
        scalar => remove_at(target, scalar),
    }
}

fn child_mut<'a>(target: &'a mut Document, key: &str) -> Option<&'a mut Document> {
    match target {
        Document::Object(map) => map.get_mut(key),
        Document::Array(items) => {
            let idx = key.parse::<usize>().ok()?;
            items.get_mut(idx)
        }
        _ => None,
    }
}

fn remove_at(target: &mut Document, scalar: &Document) {
    match target {
        Document::Array(items) => {
            if let Some(idx) = scalar.as_i64().and_then(|i| resolve_index(i, items.len())) {
                items.remove(idx);
            }
        }
        Document::Object(map) => {
            if let Some(key) = scalar.as_str() {
                map.remove(key);
            }
        }
        _ => {}
    }
}

fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let idx = if index < 0 { len + index } else { index };
    if (0..len).contains(&idx) {
        usize::try_from(idx).ok()
    } else {
        None
    }
}
