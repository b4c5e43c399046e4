use nova_param_names::{
    ConstructorRef, MemberIdentity, MethodRef, Resolution, UnresolvedReason,
};
use pretty_assertions::assert_eq;

use super::fixtures::{discoverer, names};

fn method(name: &str, descriptor: &str, is_static: bool) -> MethodRef {
    MethodRef::from_descriptor("demo.Shapes", name, descriptor, is_static).unwrap()
}

#[test]
fn debug_compiled_members_report_declared_names() {
    let discoverer = discoverer();

    assert_eq!(
        discoverer.resolve_method_parameter_names(&method("mix", "(IJI)V", false)),
        names(&["count", "offset", "limit"])
    );
    assert_eq!(
        discoverer.resolve_method_parameter_names(&method("scaled", "([DJ)[D", true)),
        names(&["values", "factor"])
    );

    let ctor = ConstructorRef::from_binary_names("demo.Shapes", &["java.lang.String", "double"])
        .unwrap();
    assert_eq!(
        discoverer.resolve_constructor_parameter_names(&ctor),
        names(&["label", "scale"])
    );
}

#[test]
fn overloads_with_equal_arity_resolve_independently() {
    let discoverer = discoverer();

    let by_int = method("area", "(I)D", false);
    let by_long = method("area", "(J)D", false);
    let by_name =
        MethodRef::from_binary_names("demo.Shapes", "area", &["java.lang.String"], "double", false)
            .unwrap();

    assert_eq!(
        discoverer.resolve_method_parameter_names(&by_int),
        names(&["sides"])
    );
    assert_eq!(
        discoverer.resolve_method_parameter_names(&by_long),
        names(&["bigSides"])
    );
    assert_eq!(
        discoverer.resolve_method_parameter_names(&by_name),
        names(&["shapeName"])
    );
    assert_eq!(discoverer.name_cache().len(), 3);
    assert_eq!(discoverer.class_cache().load_count(), 1);
}

#[test]
fn zero_parameter_members() {
    let discoverer = discoverer();

    assert_eq!(
        discoverer.resolve_method_parameter_names(&method("reset", "()V", true)),
        names(&[])
    );
    assert_eq!(
        discoverer.resolve_method_parameter_names(&method("describe", "()Ljava/lang/String;", false)),
        names(&[])
    );

    let stripped_static = MethodRef::from_descriptor("demo.Stripped", "tick", "()V", true).unwrap();
    assert_eq!(
        discoverer.resolve_method_parameter_names(&stripped_static),
        names(&[])
    );
    let stripped_instance =
        MethodRef::from_descriptor("demo.Stripped", "none", "()V", false).unwrap();
    assert_eq!(discoverer.resolve_method_parameter_names(&stripped_instance), None);
}

#[test]
fn missing_debug_info_yields_no_result() {
    let discoverer = discoverer();

    let run = MethodRef::from_descriptor("demo.Stripped", "run", "(Ljava/lang/String;)V", false)
        .unwrap();
    assert_eq!(discoverer.resolve_method_parameter_names(&run), None);
    assert_eq!(
        discoverer.lookup(&MemberIdentity::from(&run)),
        Ok(Resolution::Unresolved(UnresolvedReason::DebugInfoAbsent))
    );

    let ctor = ConstructorRef::from_binary_names("demo.Stripped", &["int"]).unwrap();
    assert_eq!(discoverer.resolve_constructor_parameter_names(&ctor), None);

    let abstract_method = method("perimeter", "(I)I", false);
    assert_eq!(
        discoverer.lookup(&MemberIdentity::from(&abstract_method)),
        Ok(Resolution::Unresolved(UnresolvedReason::DebugInfoAbsent))
    );
}

#[test]
fn unavailable_classes_and_members_yield_no_result() {
    let discoverer = discoverer();

    let cases = [
        (
            MethodRef::from_descriptor("demo.Nowhere", "f", "(I)V", false).unwrap(),
            UnresolvedReason::ResourceNotFound,
        ),
        (
            MethodRef::from_descriptor("demo.Broken", "f", "(I)V", false).unwrap(),
            UnresolvedReason::MalformedResource,
        ),
        (method("area", "(S)D", false), UnresolvedReason::MemberNotFound),
        (method("area", "(I)I", false), UnresolvedReason::MemberNotFound),
    ];

    for (method, reason) in cases {
        assert_eq!(discoverer.resolve_method_parameter_names(&method), None);
        assert_eq!(
            discoverer.lookup(&MemberIdentity::from(&method)),
            Ok(Resolution::Unresolved(reason)),
            "{method:?}"
        );
    }
}

#[test]
fn repeated_lookups_return_the_cached_result() {
    let discoverer = discoverer();
    let mix = method("mix", "(IJI)V", false);

    let first = discoverer.resolve_method_parameter_names(&mix).unwrap();
    let second = discoverer.resolve_method_parameter_names(&mix).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    let missing = MethodRef::from_descriptor("demo.Nowhere", "f", "()V", false).unwrap();
    assert_eq!(discoverer.resolve_method_parameter_names(&missing), None);
    assert_eq!(discoverer.resolve_method_parameter_names(&missing), None);

    assert_eq!(discoverer.name_cache().len(), 2);
    assert_eq!(discoverer.class_cache().load_count(), 1);
}

#[test]
fn static_flag_mismatch_is_not_cached() {
    let discoverer = discoverer();
    let wrong = method("mix", "(IJI)V", true);

    assert!(discoverer.lookup(&MemberIdentity::from(&wrong)).is_err());
    assert_eq!(discoverer.resolve_method_parameter_names(&wrong), None);
    assert!(discoverer.name_cache().is_empty());
}

#[test]
fn malformed_code_attribute_only_affects_its_member() {
    let discoverer = discoverer();
    let cracked = MethodRef::from_descriptor("demo.Fragile", "cracked", "(I)V", false).unwrap();
    let sound = MethodRef::from_descriptor("demo.Fragile", "sound", "(I)V", false).unwrap();

    assert_eq!(
        discoverer.lookup(&MemberIdentity::from(&cracked)),
        Ok(Resolution::Unresolved(UnresolvedReason::MalformedResource))
    );
    assert_eq!(discoverer.resolve_method_parameter_names(&cracked), None);
    assert_eq!(
        discoverer.resolve_method_parameter_names(&sound),
        names(&["volume"])
    );
    assert_eq!(discoverer.class_cache().load_count(), 1);
    assert_eq!(discoverer.class_cache().len(), 1);
}
