use nova_classfile::{ClassFile, ClassMember};

use crate::error::InvariantViolation;
use crate::identity::TypeIdentity;

/// Find the member named `name` with exactly `descriptor`.
///
/// The descriptor includes the return type, so overloads that share a name
/// and arity never match each other.
pub fn find_member<'a>(
    class: &'a ClassFile,
    name: &str,
    descriptor: &str,
) -> Result<Option<&'a ClassMember>, InvariantViolation> {
    let mut matches = class
        .methods
        .iter()
        .filter(|m| m.name == name && m.descriptor == descriptor);

    let Some(found) = matches.next() else {
        return Ok(None);
    };
    let extra = matches.count();
    if extra > 0 {
        return Err(InvariantViolation::DuplicateMember {
            type_name: TypeIdentity::from_internal_name(&class.this_class),
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            count: extra + 1,
        });
    }
    Ok(Some(found))
}
