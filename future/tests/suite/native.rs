use std::time::Duration;

use rail_future::{Deferred, Outcome, Panic};
use tokio::sync::oneshot;
use tokio::time;

use crate::common::init_tracing;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Refused(&'static str);

async fn refuse_later() -> Result<u32, Refused> {
    time::sleep(Duration::from_millis(5)).await;
    Err(Refused("R"))
}

#[tokio::test]
async fn native_failure_becomes_error_outcome() {
    init_tracing();
    let out = Deferred::from_native(refuse_later()).await;
    assert_eq!(out, Outcome::Error(Refused("R")));
}

#[tokio::test]
async fn native_success_becomes_ok_outcome() {
    init_tracing();
    let (tx, rx) = oneshot::channel::<u32>();
    let deferred = Deferred::from_native(async move { rx.await });
    assert!(!deferred.is_settled());

    tx.send(11).unwrap();
    assert_eq!(deferred.await.to_option(), Some(11));
}

#[tokio::test]
async fn panicking_task_is_absorbed_through_join_handle() {
    init_tracing();
    let task = tokio::spawn(async {
        let items: Vec<u8> = Vec::new();
        items[3]
    });

    let out = Deferred::from_native(task).await;
    assert!(out.is_error());
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HeaderError {
    Empty,
    Crashed(Panic),
}

impl From<Panic> for HeaderError {
    fn from(panic: Panic) -> Self {
        Self::Crashed(panic)
    }
}

async fn read_flags(frame: Vec<u8>) -> Result<u8, HeaderError> {
    time::sleep(Duration::from_millis(5)).await;
    if frame.is_empty() {
        return Err(HeaderError::Empty);
    }
    Ok(frame[8])
}

#[tokio::test]
async fn panicking_native_future_settles_as_error() {
    init_tracing();
    let deferred = Deferred::from_native_catching(read_flags(vec![0x01, 0x02]));

    let out = time::timeout(Duration::from_secs(1), deferred)
        .await
        .expect("a panicking native future still settles");

    match out {
        Outcome::Error(HeaderError::Crashed(panic)) => {
            assert!(panic.message().contains("index out of bounds"));
        }
        other => panic!("expected a caught panic, got {other:?}"),
    }
}

#[tokio::test]
async fn catching_variant_keeps_declared_errors_and_values() {
    init_tracing();
    let empty = Deferred::from_native_catching(read_flags(Vec::new())).await;
    assert_eq!(empty, Outcome::Error(HeaderError::Empty));

    let flags = Deferred::from_native_catching(read_flags(vec![0; 9])).await;
    assert_eq!(flags, Outcome::Ok(0));
}

#[tokio::test]
async fn reject_flows_into_question_mark() {
    init_tracing();

    async fn fetch() -> Result<u8, String> {
        let value = Deferred::<Result<u8, String>>::reject("offline".to_string()).await?;
        Ok(value + 1)
    }

    assert_eq!(fetch().await, Err("offline".to_string()));
}

#[tokio::test]
async fn into_native_round_trips_through_from_native() {
    init_tracing();
    let native = Deferred::value(Ok::<_, String>(3)).into_native();
    let back = Deferred::from_native(native).map_ok(|x| x * 2).await;
    assert_eq!(back, Outcome::Ok(6));
}
