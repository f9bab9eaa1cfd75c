use crate::document::{Document, Value};

/// Deep-merge `overlay` on top of `base`.
/// If both sides have a Section for the same entry, recurse.
/// Otherwise, `overlay`'s value wins — lists replace wholesale, never append.
pub fn deep_merge(mut base: Document, overlay: Document) -> Document {
    for (name, overlay_val) in overlay.into_entries() {
        match (base.remove_entry(&name), overlay_val) {
            (Some(Value::Section(base_sec)), Value::Section(overlay_sec)) => {
                base.insert(name, Value::Section(deep_merge(base_sec, overlay_sec)));
            }
            (_, overlay_val) => {
                base.insert(name, overlay_val);
            }
        }
    }
    base
}
