use std::sync::Arc;

use rail_future::{Deferred, Outcome};

use crate::common::{Calls, init_tracing};

#[tokio::test]
async fn map_ok_on_error_keeps_error_and_skips_callback() {
    init_tracing();
    let calls = Calls::default();
    let probe = calls.clone();

    let out = Deferred::value(Outcome::<i32, &str>::Error("e"))
        .map_ok(move |x| {
            probe.hit();
            x * 2
        })
        .await;

    assert_eq!(out, Outcome::Error("e"));
    assert_eq!(calls.count(), 0);
}

#[tokio::test]
async fn error_channel_combinators_skip_ok() {
    init_tracing();
    let calls = Calls::default();
    let (a, b, c) = (calls.clone(), calls.clone(), calls.clone());

    let out = Deferred::value(Outcome::<i32, String>::Ok(1))
        .map_error(move |e| {
            a.hit();
            e
        })
        .tap_error(move |_| b.hit())
        .flat_map_error(move |e| {
            c.hit();
            Deferred::value(Outcome::Error(e))
        })
        .await;

    assert_eq!(out, Outcome::Ok(1));
    assert_eq!(calls.count(), 0);
}

#[tokio::test]
async fn railway_chain_short_circuits_after_first_error() {
    init_tracing();
    let calls = Calls::default();
    let late = calls.clone();

    let out = Deferred::value(Outcome::<u32, String>::Ok(4))
        .map_ok(|x| x + 1)
        .flat_map_ok(|x| {
            Deferred::value(if x % 2 == 0 {
                Outcome::Ok(x)
            } else {
                Outcome::Error(format!("{x} is odd"))
            })
        })
        .tap_ok(move |_| late.hit())
        .map_ok(|x| x * 100)
        .await;

    assert_eq!(out, Outcome::Error("5 is odd".to_string()));
    assert_eq!(calls.count(), 0);
}

#[tokio::test]
async fn untouched_payload_keeps_identity_through_async_chain() {
    init_tracing();
    let payload = Arc::new(vec![1, 2, 3]);

    let out = Deferred::<Outcome<Arc<Vec<i32>>, String>>::make(|resolver| {
        let payload = Arc::clone(&payload);
        tokio::spawn(async move {
            resolver.resolve(Outcome::Ok(payload)).unwrap();
        });
    })
    .map_error(|e| e.len())
    .tap_error(|_| {})
    .await;

    match out {
        Outcome::Ok(value) => assert!(Arc::ptr_eq(&value, &payload)),
        Outcome::Error(_) => panic!("expected Ok"),
    }
}

#[tokio::test]
async fn generic_combinators_compose() {
    init_tracing();
    let calls = Calls::default();
    let probe = calls.clone();

    let out = Deferred::value("21")
        .map(|s| s.parse::<i32>().unwrap_or_default())
        .tap(move |_| probe.hit())
        .flat_map(|x| Deferred::value(x * 2))
        .await;

    assert_eq!(out, 42);
    assert_eq!(calls.count(), 1);
}

#[tokio::test]
async fn deferred_is_accepted_where_native_futures_are() {
    init_tracing();
    let joined = futures_util::future::join(Deferred::value(1), async { 2 }).await;
    assert_eq!(joined, (1, 2));

    let handle = tokio::spawn(Deferred::value("spawned"));
    assert_eq!(handle.await.unwrap(), "spawned");
}
