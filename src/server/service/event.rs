//! Event listing service.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::event::EventRepository, error::Error, model::api::EventSummary,
    util::time::parse_date_filter,
};

/// Read access to the unified event listing.
pub struct EventService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventService<'a> {
    /// Creates a new instance of [`EventService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists active events with an active date inside the optional sale window
    ///
    /// Filters are `YYYY-MM-DD` strings; anything else is ignored rather than rejected.
    pub async fn list_active_events(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<EventSummary>, Error> {
        let start = parse_date_filter(start_date);
        let end = parse_date_filter(end_date);

        let events = EventRepository::new(self.db).list_active(start, end).await?;

        Ok(events.into_iter().map(EventSummary::from).collect())
    }
}
