use std::sync::{Arc, Mutex};

use rail_future::{Deferred, DeferredConfig, ResolvePolicy, Resolver};

use crate::common::init_tracing;

#[tokio::test]
async fn value_awaits_to_its_payload() {
    init_tracing();
    assert_eq!(Deferred::value(42).await, 42);
}

#[tokio::test]
async fn second_resolve_with_different_value_has_no_effect() {
    init_tracing();
    let deferred = Deferred::make(|resolver| {
        resolver.resolve("first").unwrap();
        resolver.resolve("second").unwrap();
    });
    assert_eq!(deferred.await, "first");
}

#[tokio::test]
async fn late_resolve_after_consumer_awaited_has_no_effect() {
    init_tracing();
    let slot: Arc<Mutex<Option<Resolver<i32>>>> = Arc::default();
    let keep = Arc::clone(&slot);
    let deferred = Deferred::make(move |resolver| {
        let later = resolver.clone();
        tokio::spawn(async move {
            resolver.resolve(1).unwrap();
        });
        *keep.lock().unwrap() = Some(later);
    });

    assert_eq!(deferred.await, 1);

    let later = slot.lock().unwrap().take().unwrap();
    assert!(later.is_settled());
    assert!(later.resolve(2).is_ok());
}

#[tokio::test]
async fn reject_policy_reports_misuse_but_keeps_first_value() {
    init_tracing();
    let config = DeferredConfig::default().with_resolve_policy(ResolvePolicy::Reject);
    let mut misuse = None;
    let deferred = Deferred::make_with(&config, |resolver| {
        resolver.resolve(10).unwrap();
        misuse = resolver.resolve(20).err();
    });

    let misuse = misuse.expect("second resolve should be reported");
    assert_eq!(misuse.to_string(), "deferred value was already settled");
    assert_eq!(misuse.into_inner(), 20);
    assert_eq!(deferred.await, 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn resolvers_racing_across_threads_settle_once() {
    init_tracing();
    let config = DeferredConfig::default().with_resolve_policy(ResolvePolicy::Reject);
    let accepted = Arc::new(Mutex::new(Vec::new()));
    let mut tasks = Vec::new();

    let deferred = Deferred::make_with(&config, |resolver| {
        for i in 0..16 {
            let resolver = resolver.clone();
            let accepted = Arc::clone(&accepted);
            tasks.push(tokio::spawn(async move {
                if resolver.resolve(i).is_ok() {
                    accepted.lock().unwrap().push(i);
                }
            }));
        }
    });

    let winner = deferred.await;
    for task in tasks {
        task.await.unwrap();
    }

    let accepted = accepted.lock().unwrap();
    assert_eq!(accepted.as_slice(), &[winner]);
}
