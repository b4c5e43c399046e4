use std::sync::{Arc, Barrier};
use std::thread;

use nova_param_names::MethodRef;

use super::fixtures::{discoverer, names};

const THREADS: usize = 16;

#[test]
fn concurrent_first_lookups_converge() {
    let discoverer = Arc::new(discoverer());
    let barrier = Arc::new(Barrier::new(THREADS));
    let mix = MethodRef::from_descriptor("demo.Shapes", "mix", "(IJI)V", false).unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let discoverer = Arc::clone(&discoverer);
            let barrier = Arc::clone(&barrier);
            let mix = mix.clone();
            thread::spawn(move || {
                barrier.wait();
                discoverer.resolve_method_parameter_names(&mix)
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    for result in &results {
        assert_eq!(result, &names(&["count", "offset", "limit"]));
    }
    assert_eq!(discoverer.class_cache().len(), 1);
    assert_eq!(discoverer.class_cache().load_count(), 1);
    assert_eq!(discoverer.name_cache().len(), 1);
}

#[test]
fn concurrent_lookups_of_different_members_share_one_class_load() {
    let discoverer = Arc::new(discoverer());
    let members = [
        ("area", "(I)D", false),
        ("area", "(J)D", false),
        ("mix", "(IJI)V", false),
        ("scaled", "([DJ)[D", true),
    ];

    thread::scope(|scope| {
        for i in 0..THREADS {
            let discoverer = &discoverer;
            let (name, descriptor, is_static) = members[i % members.len()];
            scope.spawn(move || {
                let method =
                    MethodRef::from_descriptor("demo.Shapes", name, descriptor, is_static).unwrap();
                assert!(discoverer.resolve_method_parameter_names(&method).is_some());
            });
        }
    });

    assert_eq!(discoverer.class_cache().load_count(), 1);
    assert_eq!(discoverer.name_cache().len(), members.len());
}
