#![no_main]

use std::sync::OnceLock;

use libfuzzer_sys::fuzz_target;
use nova_classfile::{parse_method_descriptor, ClassFile};
use nova_param_names::{read_parameter_names, SlotPlan};

mod utils;

use utils::Runner;

fn decode(input: &[u8]) {
    let Ok(class) = ClassFile::parse(input) else {
        return;
    };
    for member in &class.methods {
        let _ = class.code(member);
        let Ok(descriptor) = parse_method_descriptor(&member.descriptor) else {
            continue;
        };
        let plan = SlotPlan::new(member.is_static(), &descriptor.params);
        let _ = read_parameter_names(&class, member, member.is_static(), &plan);
    }
}

fn runner() -> &'static Runner {
    static RUNNER: OnceLock<Runner> = OnceLock::new();
    RUNNER.get_or_init(|| Runner::spawn("fuzz_classfile", decode))
}

fuzz_target!(|data: &[u8]| {
    runner().run(data);
});
