#![no_main]

use std::sync::{Arc, OnceLock};

use libfuzzer_sys::fuzz_target;
use nova_classfile::ClassFile;
use nova_param_names::{
    InMemoryLocator, MemberIdentity, MethodRef, ParameterNameDiscoverer, TypeIdentity,
};

mod utils;

use utils::Runner;

const FUZZ_TYPE: &str = "fuzz.Target";

/// Serves the input as `fuzz.Target` and looks up every method it declares,
/// both as static and as instance members.
fn discover(input: &[u8]) {
    let discoverer = ParameterNameDiscoverer::new(Arc::new(
        InMemoryLocator::new().with_class(FUZZ_TYPE, input.to_vec()),
    ));

    let members: Vec<(String, String)> = match ClassFile::parse(input) {
        Ok(class) => class
            .methods
            .iter()
            .map(|m| (m.name.clone(), m.descriptor.clone()))
            .collect(),
        Err(_) => vec![("run".to_string(), "()V".to_string())],
    };

    for (name, descriptor) in members {
        for is_static in [false, true] {
            let Ok(method) =
                MethodRef::from_descriptor(TypeIdentity::new(FUZZ_TYPE), &name, &descriptor, is_static)
            else {
                continue;
            };
            let _ = discoverer.resolve_method_parameter_names(&method);
            let _ = discoverer.lookup(&MemberIdentity::from(&method));
        }
    }
}

fn runner() -> &'static Runner {
    static RUNNER: OnceLock<Runner> = OnceLock::new();
    RUNNER.get_or_init(|| Runner::spawn("fuzz_param_names", discover))
}

fuzz_target!(|data: &[u8]| {
    runner().run(data);
});
