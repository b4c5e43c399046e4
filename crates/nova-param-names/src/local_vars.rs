use std::sync::Arc;

use nova_classfile::{ClassFile, ClassMember};

use crate::error::{InvariantViolation, LookupError};
use crate::identity::TypeIdentity;
use crate::name_cache::ParameterNames;
use crate::slots::SlotPlan;

/// Read parameter names for `member` out of its `LocalVariableTable`.
///
/// Returns `Ok(None)` when the class was compiled without local variable
/// debug info (or the member has no body). Names the table does not cover
/// are left as empty strings.
pub fn read_parameter_names(
    class: &ClassFile,
    member: &ClassMember,
    is_static: bool,
    plan: &SlotPlan,
) -> Result<Option<ParameterNames>, LookupError> {
    let label = || {
        format!(
            "{}#{}{}",
            TypeIdentity::from_internal_name(&class.this_class),
            member.name,
            member.descriptor
        )
    };

    if member.is_static() != is_static {
        return Err(InvariantViolation::StaticMismatch {
            member: label(),
            requested: modifier(is_static),
            declared: modifier(member.is_static()),
        }
        .into());
    }

    if is_static && plan.is_empty() {
        return Ok(Some(empty()));
    }

    let code = class
        .code(member)
        .map_err(|source| LookupError::MalformedResource {
            type_name: TypeIdentity::from_internal_name(&class.this_class),
            source,
        })?;
    let Some(code) = code else {
        return Ok(None);
    };
    let locals = code.local_variables();

    if plan.is_empty() {
        // Only the receiver; an entry for `this` proves debug info exists.
        return Ok((!locals.is_empty()).then(empty));
    }

    let mut names = vec![String::new(); plan.len()];
    // `Some(true)` once a parameter's name came from an entry scoped at pc 0.
    let mut assigned: Vec<Option<bool>> = vec![None; plan.len()];

    for local in locals {
        match plan.parameter_for_slot(local.slot) {
            Some(index) => {
                let replace = match assigned[index] {
                    None => true,
                    Some(pinned) => !pinned && local.starts_at_entry(),
                };
                if replace {
                    names[index] = local.name.clone();
                    assigned[index] = Some(local.starts_at_entry());
                }
            }
            None => {
                if local.starts_at_entry()
                    && local.slot < plan.end()
                    && !plan.is_receiver_slot(local.slot)
                {
                    return Err(InvariantViolation::SlotOutsidePlan {
                        member: label(),
                        name: local.name.clone(),
                        slot: local.slot,
                    }
                    .into());
                }
            }
        }
    }

    if assigned.iter().all(Option::is_none) {
        return Ok(None);
    }
    Ok(Some(names.into()))
}

fn empty() -> ParameterNames {
    Arc::from(Vec::<String>::new())
}

fn modifier(is_static: bool) -> &'static str {
    if is_static {
        "static"
    } else {
        "non-static"
    }
}
