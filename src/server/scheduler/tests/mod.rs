use eventhub_test_utils::prelude::*;

use crate::server::{
    model::app::AppState, scheduler::config::DEFAULT_SYNC_CRON, scheduler::Scheduler,
};

/// Tests registering the batch sync with the default cron expression.
///
/// Expected: Ok
#[tokio::test]
async fn starts_with_default_cron() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let state: AppState = test.to_app_state();

    let scheduler = Scheduler::new(state.orchestrator).await;
    assert!(scheduler.is_ok());

    let result = scheduler.unwrap().start(DEFAULT_SYNC_CRON).await;
    assert!(result.is_ok(), "Error: {:?}", result);

    Ok(())
}

/// Tests registering the batch sync with an invalid cron expression.
///
/// Expected: Err(SchedulerError)
#[tokio::test]
async fn rejects_invalid_cron() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let state: AppState = test.to_app_state();

    let scheduler = Scheduler::new(state.orchestrator).await.unwrap();
    let result = scheduler.start("every day at three").await;

    assert!(matches!(
        result,
        Err(crate::server::error::Error::SchedulerError(_))
    ));

    Ok(())
}
