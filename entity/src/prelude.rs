pub use super::event::Entity as Event;
pub use super::event_date::Entity as EventDate;
pub use super::provider::Entity as Provider;
pub use super::provider_resource::Entity as ProviderResource;
pub use super::zone::Entity as Zone;
