//! Resolution from several threads

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use arbiter::ConfigStore;
use arbiter::prelude::*;

struct Expensive;

struct Dependent {
    expensive: Arc<Expensive>,
}

#[test]
fn test_concurrent_resolution_constructs_once() {
    const THREADS: usize = 8;

    let constructed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&constructed);
    let catalog = Catalog::builder()
        .component(Component::<Expensive>::new().constructor(Constructor::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Expensive)
        })))
        .component(
            Component::<Dependent>::new().constructor(
                Constructor::new(|args| {
                    Ok(Dependent {
                        expensive: args.component()?,
                    })
                })
                .inject::<Expensive>(),
            ),
        )
        .build();
    let container = Arc::new(Container::new(catalog, ConfigStore::new()));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let container = Arc::clone(&container);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                if i % 2 == 0 {
                    container.resolve::<Expensive>().unwrap()
                } else {
                    Arc::clone(&container.resolve::<Dependent>().unwrap().expensive)
                }
            })
        })
        .collect();
    let instances: Vec<Arc<Expensive>> = handles
        .into_iter()
        .map(|h| h.join().expect("resolver thread panicked"))
        .collect();

    assert_eq!(constructed.load(Ordering::SeqCst), 1);
    assert!(instances.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert_eq!(container.instance_count(), 2);
}
