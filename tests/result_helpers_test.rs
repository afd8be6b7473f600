/// Outcome combinators and error logging through the public API
use std::sync::Arc;

use cchistory::result::{MemorySink, Thrown, unexpected_error};
use cchistory::{
    AppError, ErrorCode, ErrorLogger, ErrorReason, Outcome, combine_results, log_error,
    wrap_async_throwable, wrap_throwable,
};

#[derive(Debug, PartialEq)]
struct HostError(&'static str);

#[test]
fn test_wrap_throwable_success_and_failure() {
    let ok: Result<i32, String> = wrap_throwable(|| Ok::<_, HostError>(42), |_| "unused".into());
    assert_eq!(ok, Ok(42));

    let mut seen = None;
    let failed: Result<i32, &str> = wrap_throwable(
        || Err(HostError("x")),
        |thrown| {
            seen = Some(thrown);
            "mapped"
        },
    );
    assert_eq!(failed, Err("mapped"));
    assert!(matches!(seen, Some(Thrown::Error(HostError("x")))));
}

#[test]
fn test_wrap_throwable_maps_panics_to_unexpected() {
    let outcome: Outcome<u8> =
        wrap_throwable(|| -> Result<u8, HostError> { panic!("index out of range") }, |thrown| {
            let thrown = match thrown {
                Thrown::Error(HostError(message)) => Thrown::Error(message.to_string()),
                Thrown::Panic(message) => Thrown::Panic(message),
            };
            unexpected_error(thrown)
        });

    let error = outcome.unwrap_err();
    assert_eq!(error.code, ErrorCode::UnknownError);
    assert!(error.is(ErrorReason::UnexpectedError));
    assert!(error.message.contains("index out of range"));
}

#[tokio::test]
async fn test_wrap_async_throwable() {
    let ok: Outcome<usize> =
        wrap_async_throwable(|| async { Ok::<_, String>(7) }, unexpected_error).await;
    assert_eq!(ok, Ok(7));

    let failed: Outcome<usize> = wrap_async_throwable(
        || async { Err::<usize, _>(AppError::api_network_error()) },
        |thrown| match thrown {
            Thrown::Error(error) => error,
            panic => unexpected_error(panic),
        },
    )
    .await;
    assert_eq!(failed, Err(AppError::api_network_error()));
}

#[test]
fn test_combine_results() {
    let empty: Vec<Result<i32, &str>> = Vec::new();
    assert_eq!(combine_results(empty), Ok(vec![]));

    assert_eq!(combine_results(vec![Ok::<_, &str>(1), Ok(2), Ok(3)]), Ok(vec![1, 2, 3]));

    let mixed = vec![Ok(1), Err("second"), Ok(3), Err("fourth")];
    assert_eq!(combine_results(mixed), Err("second"));

    let all_failed: Vec<Result<i32, &str>> = vec![Err("a"), Err("b")];
    assert_eq!(combine_results(all_failed), Err("a"));
}

#[test]
fn test_log_error_tags_entry_with_context() {
    let sink = MemorySink::new();
    let result: Outcome<()> = log_error(&sink, AppError::no_search_results(), Some("Ctx"));

    assert_eq!(result, Err(AppError::no_search_results()));
    assert_eq!(sink.entries(), vec!["[Ctx] VALIDATION_ERROR: No results found".to_string()]);
}

#[test]
fn test_log_error_returns_the_same_error() {
    let sink = MemorySink::new();
    let error = Arc::new(AppError::missing_api_key());
    let result: Result<(), Arc<AppError>> = log_error(&sink, Arc::clone(&error), Some("Ctx"));

    assert!(Arc::ptr_eq(&result.unwrap_err(), &error));
    assert_eq!(sink.entries().len(), 1);
}

#[test]
fn test_error_logger_with_injected_sink() {
    let sink = Arc::new(MemorySink::new());
    let logger = ErrorLogger::new(sink.clone());

    let ok: Outcome<i32> = logger.inspect(Ok(5), "load");
    assert_eq!(ok, Ok(5));
    assert!(sink.entries().is_empty());

    let failed: Outcome<i32> = logger.inspect(Err(AppError::invalid_config()), "load");
    assert!(failed.is_err());
    assert_eq!(sink.entries(), vec!["[load] CONFIG_ERROR: Invalid configuration".to_string()]);

    let _: Outcome<()> = logger.log_error(AppError::api_authentication_failed(), Some(""));
    assert_eq!(sink.entries()[1], "API_ERROR: API authentication failed");
}
