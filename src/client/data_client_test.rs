use std::sync::Arc;

use mockall::predicate::eq;
use tonic::Code;
use tonic::Status;
use tracing_test::traced_test;

use crate::test_utils::named_row;
use crate::ApiFuture;
use crate::DataClient;
use crate::KeyOffset;
use crate::MockDataStub;
use crate::MockResponseObserver;
use crate::MockServerStreamingCallable;
use crate::MockUnaryCallable;
use crate::Query;
use crate::ReadRowsCallable;
use crate::ResponseObserver;
use crate::Row;
use crate::SampleRowKeysCallable;

type MockReadRows = MockServerStreamingCallable<Query, Row>;
type MockSampleRowKeys = MockUnaryCallable<String, Vec<KeyOffset>>;

/// Client over a mock stub that hands out the given callables; also returns
/// the handles so tests can compare identity.
fn setup_client(
    read_rows: MockReadRows,
    sample_row_keys: MockSampleRowKeys,
    stub: MockDataStub,
) -> (DataClient, ReadRowsCallable, SampleRowKeysCallable) {
    let read_rows: ReadRowsCallable = Arc::new(read_rows);
    let sample_row_keys: SampleRowKeysCallable = Arc::new(sample_row_keys);

    let mut stub = stub;
    let handle = read_rows.clone();
    stub.expect_read_rows_callable().returning(move || handle.clone());
    let handle = sample_row_keys.clone();
    stub.expect_sample_row_keys_callable().returning(move || handle.clone());

    (DataClient::new(stub), read_rows, sample_row_keys)
}

fn setup_default_client() -> (DataClient, ReadRowsCallable, SampleRowKeysCallable) {
    setup_client(
        MockReadRows::new(),
        MockSampleRowKeys::new(),
        MockDataStub::new(),
    )
}

#[tokio::test]
#[traced_test]
async fn proxy_close_closes_stub_once() {
    let mut stub = MockDataStub::new();
    stub.expect_close().times(1).returning(|| Ok(()));
    let (client, _, _) = setup_client(MockReadRows::new(), MockSampleRowKeys::new(), stub);

    client.close().await.expect("close should succeed");
}

#[tokio::test]
async fn proxy_close_propagates_stub_failure() {
    let mut stub = MockDataStub::new();
    stub.expect_close()
        .times(1)
        .returning(|| Err(Status::unavailable("transport busy").into()));
    let (client, _, _) = setup_client(MockReadRows::new(), MockSampleRowKeys::new(), stub);

    let err = client.close().await.unwrap_err();

    assert_eq!(err.code(), Code::Unavailable);
    assert!(err.to_string().contains("transport busy"));
}

#[test]
fn proxy_read_rows_callable_returns_same_handle() {
    let (client, read_rows, _) = setup_default_client();

    assert!(Arc::ptr_eq(&client.read_rows_callable(), &read_rows));
    assert!(Arc::ptr_eq(&client.read_rows_callable(), &read_rows));
}

#[test]
fn proxy_sample_row_keys_callable_returns_same_handle() {
    let (client, _, sample_row_keys) = setup_default_client();

    assert!(Arc::ptr_eq(
        &client.sample_row_keys_callable(),
        &sample_row_keys
    ));
}

#[tokio::test]
#[traced_test]
async fn proxy_read_rows_sync() {
    let mut read_rows = MockReadRows::new();
    read_rows
        .expect_call()
        .with(eq(Query::create("fake-table")))
        .times(1)
        .returning(|_| Ok(vec![named_row("user#1", "Alice"), named_row("user#2", "Bob")]));
    read_rows.expect_stream().never();
    read_rows.expect_call_with_observer().never();
    let (client, _, _) = setup_client(read_rows, MockSampleRowKeys::new(), MockDataStub::new());

    let rows = client.read_rows(Query::create("fake-table")).await.unwrap();

    assert_eq!(
        rows,
        vec![named_row("user#1", "Alice"), named_row("user#2", "Bob")]
    );
    assert!(logs_contain("read_rows finished"));
    assert!(logs_contain("rows=2"));
    assert!(logs_contain("fake-table"));
}

#[tokio::test]
#[traced_test]
async fn proxy_read_rows_sync_surfaces_error_unchanged() {
    let mut read_rows = MockReadRows::new();
    read_rows
        .expect_call()
        .times(1)
        .returning(|_| Err(Status::not_found("table fake-table not found").into()));
    let (client, _, _) = setup_client(read_rows, MockSampleRowKeys::new(), MockDataStub::new());

    let err = client.read_rows(Query::create("fake-table")).await.unwrap_err();

    assert_eq!(err.code(), Code::NotFound);
    assert!(err.to_string().contains("fake-table"));
    assert!(logs_contain("read_rows failed"));
    assert!(!logs_contain("read_rows finished"));
}

#[test]
fn proxy_read_rows_async() {
    let observer: Arc<dyn ResponseObserver<Row>> = Arc::new(MockResponseObserver::<Row>::new());
    let expected_observer = observer.clone();

    let mut read_rows = MockReadRows::new();
    read_rows
        .expect_call_with_observer()
        .withf(move |query, observer| {
            *query == Query::create("fake-table") && Arc::ptr_eq(observer, &expected_observer)
        })
        .times(1)
        .return_const(());
    read_rows.expect_call().never();
    let (client, _, _) = setup_client(read_rows, MockSampleRowKeys::new(), MockDataStub::new());

    client.read_rows_async(Query::create("fake-table"), observer);
}

#[tokio::test]
#[traced_test]
async fn proxy_sample_row_keys() {
    let mut sample_row_keys = MockSampleRowKeys::new();
    sample_row_keys
        .expect_future_call()
        .with(eq("fake-table".to_string()))
        .times(1)
        .returning(|_| {
            ApiFuture::ready(Ok(vec![
                KeyOffset::create("user#5", 1024),
                KeyOffset::create("", 2048),
            ]))
        });
    sample_row_keys.expect_call().never();
    let (client, _, _) = setup_client(MockReadRows::new(), sample_row_keys, MockDataStub::new());

    let offsets = client.sample_row_keys("fake-table").await.unwrap();

    assert_eq!(
        offsets,
        vec![
            KeyOffset::create("user#5", 1024),
            KeyOffset::create("", 2048)
        ]
    );
}

#[test]
fn proxy_sample_row_keys_starts_call_without_awaiting() {
    let mut sample_row_keys = MockSampleRowKeys::new();
    sample_row_keys
        .expect_future_call()
        .with(eq("fake-table".to_string()))
        .times(1)
        .returning(|_| ApiFuture::ready(Ok(Vec::new())));
    let (client, _, _) = setup_client(MockReadRows::new(), sample_row_keys, MockDataStub::new());

    let future = client.sample_row_keys("fake-table");

    drop(future);
}

#[tokio::test]
async fn proxy_sample_row_keys_surfaces_error_unchanged() {
    let mut sample_row_keys = MockSampleRowKeys::new();
    sample_row_keys
        .expect_future_call()
        .times(1)
        .returning(|_| ApiFuture::ready(Err(Status::permission_denied("no access").into())));
    let (client, _, _) = setup_client(MockReadRows::new(), sample_row_keys, MockDataStub::new());

    let err = client.sample_row_keys("fake-table").await.unwrap_err();

    assert_eq!(err.code(), Code::PermissionDenied);
}
