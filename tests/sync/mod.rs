use eventhub::server::{
    error::{sync::SyncError, Error},
    model::app::AppState,
    resource::format::ResourceFormat,
};
use eventhub_test_utils::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait};
use std::{
    io::Write,
    sync::{Arc, Mutex},
};

mod sync_all;
mod sync_provider;

/// Row counts of the event, event_date and zone tables.
async fn row_counts(test: &TestContext) -> Result<(u64, u64, u64), TestError> {
    Ok((
        entity::prelude::Event::find().count(&test.db).await?,
        entity::prelude::EventDate::find().count(&test.db).await?,
        entity::prelude::Zone::find().count(&test.db).await?,
    ))
}

/// Log sink collecting formatted `tracing` output in memory.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer lock").clone();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("log buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
