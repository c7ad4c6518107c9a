use stfu_core::{run_async_test, run_test, SINGLE_TEST_NAME};

#[tokio::test]
async fn test_run_test_noop() {
    let results = run_test(|_ctx| {}).await.unwrap();

    assert_eq!(results.tests.len(), 1);
    assert_eq!(results.tests[0].test_name, SINGLE_TEST_NAME);
    assert!(results.tests[0].err.is_none());
    assert!(results.async_tests.is_empty());
}

#[tokio::test]
async fn test_run_async_test_noop() {
    let results = run_async_test(|_ctx| async {}).await.unwrap();

    assert_eq!(results.async_tests.len(), 1);
    assert_eq!(results.async_tests[0].test_name, SINGLE_TEST_NAME);
    assert!(results.async_tests[0].err.is_none());
    assert!(results.tests.is_empty());
}

#[tokio::test]
async fn test_run_async_test_on_tokio_timer() {
    let results = run_async_test(|_ctx| async {
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        Err::<(), _>(anyhow::anyhow!("late failure"))
    })
    .await
    .unwrap();

    let fault = results.async_tests[0].err.as_ref().unwrap();
    assert_eq!(fault.message(), "late failure");
}
