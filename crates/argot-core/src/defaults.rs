//! Default filling for absent optional parameters.

use crate::matcher::Slot;
use crate::schema::{DefaultValue, Schema};
use crate::value::CallContext;

/// Fills every unfilled slot that declares a default.
///
/// Computed defaults are invoked with `ctx`; static defaults are cloned.
/// Slots without a default stay unfilled. This stage never fails: the matcher
/// has already rejected unfilled non-optional parameters.
///
/// Entity resolution has already run, so a computed default must produce a
/// value its parameter type admits (a resolved [`User`](crate::User) for a
/// user parameter, not an identifier). Debug builds assert this.
pub fn fill_defaults(slots: Vec<Slot>, schema: &Schema, ctx: &CallContext) -> Vec<Slot> {
    slots
        .into_iter()
        .zip(schema)
        .map(|(slot, spec)| match (slot, &spec.default) {
            (Slot::Unfilled, DefaultValue::Static(value)) => Slot::Filled(value.clone()),
            (Slot::Unfilled, DefaultValue::Computed(f)) => {
                let value = f(ctx);
                debug_assert!(
                    spec.kind.admits(&value),
                    "computed default for a {} parameter produced {value:?}",
                    spec.kind
                );
                Slot::Filled(value)
            }
            (slot, _) => slot,
        })
        .collect()
}
