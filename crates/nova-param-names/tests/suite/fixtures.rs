use std::sync::Arc;

use nova_classfile::testing::{ClassBuilder, MethodSpec};
use nova_classfile::{ACC_ABSTRACT, ACC_STATIC};
use nova_param_names::{InMemoryLocator, ParameterNameDiscoverer, ParameterNames};

/// `demo.Shapes`, compiled with local variable debug info.
pub fn shapes_class() -> Vec<u8> {
    ClassBuilder::new("demo/Shapes")
        .method(
            MethodSpec::new("<init>", "(Ljava/lang/String;D)V").locals(&[
                (0, "this", "Ldemo/Shapes;"),
                (1, "label", "Ljava/lang/String;"),
                (2, "scale", "D"),
            ]),
        )
        .method(MethodSpec::new("area", "(I)D").locals(&[
            (0, "this", "Ldemo/Shapes;"),
            (1, "sides", "I"),
        ]))
        .method(MethodSpec::new("area", "(J)D").locals(&[
            (0, "this", "Ldemo/Shapes;"),
            (1, "bigSides", "J"),
        ]))
        .method(
            MethodSpec::new("area", "(Ljava/lang/String;)D")
                .locals(&[(0, "this", "Ldemo/Shapes;"), (1, "shapeName", "Ljava/lang/String;")]),
        )
        .method(
            MethodSpec::new("mix", "(IJI)V").locals(&[
                (0, "this", "Ldemo/Shapes;"),
                (1, "count", "I"),
                (2, "offset", "J"),
                (4, "limit", "I"),
                (5, "sum", "J"),
            ]),
        )
        .method(
            MethodSpec::new("scaled", "([DJ)[D")
                .access(ACC_STATIC)
                .locals(&[(0, "values", "[D"), (1, "factor", "J")]),
        )
        .method(MethodSpec::new("reset", "()V").access(ACC_STATIC))
        .method(
            MethodSpec::new("describe", "()Ljava/lang/String;")
                .locals(&[(0, "this", "Ldemo/Shapes;")]),
        )
        .method(
            MethodSpec::new("perimeter", "(I)I")
                .access(ACC_ABSTRACT)
                .no_code(),
        )
        .build()
}

/// The same class compiled without local variable debug info.
pub fn stripped_class() -> Vec<u8> {
    ClassBuilder::new("demo/Stripped")
        .method(MethodSpec::new("<init>", "(I)V"))
        .method(MethodSpec::new("run", "(Ljava/lang/String;)V"))
        .method(MethodSpec::new("none", "()V"))
        .method(MethodSpec::new("tick", "()V").access(ACC_STATIC))
        .build()
}

/// A class that parses, but one method's local variable table names a
/// constant pool index that does not exist.
pub fn fragile_class() -> Vec<u8> {
    ClassBuilder::new("demo/Fragile")
        .method(
            MethodSpec::new("sound", "(I)V")
                .locals(&[(0, "this", "Ldemo/Fragile;"), (1, "volume", "I")]),
        )
        .method(
            MethodSpec::new("cracked", "(I)V")
                .locals(&[(0, "this", "Ldemo/Fragile;"), (1, "volume", "I")])
                .corrupt_local_names(),
        )
        .build()
}

pub fn locator() -> InMemoryLocator {
    InMemoryLocator::new()
        .with_class("demo.Shapes", shapes_class())
        .with_class("demo.Stripped", stripped_class())
        .with_class("demo.Fragile", fragile_class())
        .with_class("demo.Broken", vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00])
}

pub fn discoverer() -> ParameterNameDiscoverer {
    ParameterNameDiscoverer::new(Arc::new(locator()))
}

pub fn names(names: &[&str]) -> Option<ParameterNames> {
    Some(
        names
            .iter()
            .map(|name| name.to_string())
            .collect::<Vec<_>>()
            .into(),
    )
}
